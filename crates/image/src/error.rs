use {
    crate::PixelFormat,
    std::{collections::TryReserveError, fmt},
};

#[derive(Debug)]
pub enum ImageError {
    Unsupported(PixelFormat),
    InvalidInput(String),
    Allocation(TryReserveError),
    Decode(crates_image::ImageError),
    Resize(fast_image_resize::ResizeError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Unsupported(format) => {
                write!(f, "unsupported pixel format: {}", format.name())
            }
            ImageError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            ImageError::Allocation(err) => write!(f, "allocation failed: {err}"),
            ImageError::Decode(err) => write!(f, "decode error: {err}"),
            ImageError::Resize(err) => write!(f, "resize error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageError::Allocation(err) => Some(err),
            ImageError::Decode(err) => Some(err),
            ImageError::Resize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TryReserveError> for ImageError {
    fn from(err: TryReserveError) -> Self {
        ImageError::Allocation(err)
    }
}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Decode(err)
    }
}

impl From<fast_image_resize::ResizeError> for ImageError {
    fn from(err: fast_image_resize::ResizeError) -> Self {
        ImageError::Resize(err)
    }
}
