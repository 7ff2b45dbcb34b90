//! Pixel formats and planar 4:2:0 images for the recorder.
//!
//! Everything here is synchronous and allocation-aware: conversions write
//! into a caller-owned [`Yuv420Image`] so one buffer can be reused frame
//! after frame.

pub mod error;
pub use error::*;

mod jpeg;
pub use jpeg::*;

mod pixelformat;
pub use pixelformat::*;

mod scale;
pub use scale::*;

mod yuv420;
pub use yuv420::*;

mod yuv420_from;
pub use yuv420_from::*;
