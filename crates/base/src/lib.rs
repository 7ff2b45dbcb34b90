pub mod logging;
pub use logging::*;

mod vec2;
pub use vec2::*;
