//! Raw video recorder for decode pipelines.
//!
//! Decoded frames (host- or device-resident, any supported pixel format) are
//! converted to planar 4:2:0 at a fixed output size and appended to a raw
//! `.yuv` file, with a `.meta` sidecar holding what is needed to turn the
//! stream back into video.

pub mod config;
pub mod convert;
pub mod error;
pub mod recorder;
pub mod sidecar;
pub mod videoframe;

mod persist;
mod transfer;

pub use config::RecorderConfig;
pub use convert::ConversionContext;
pub use error::{RecorderError, TransferError};
pub use recorder::VideoRecorder;
pub use sidecar::Sidecar;
pub use videoframe::{DeviceSurface, FrameData, HostFrame, VideoFrame};
