use {
    image::ImageError,
    std::{collections::TryReserveError, fmt, io},
};

/// Failure reported by a [`DeviceSurface`](crate::DeviceSurface) download.
#[derive(Debug)]
pub enum TransferError {
    Device(String),
    Mismatch(String),
    Allocation(TryReserveError),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Device(msg) => write!(f, "device error: {msg}"),
            TransferError::Mismatch(msg) => write!(f, "layout mismatch: {msg}"),
            TransferError::Allocation(err) => write!(f, "could not allocate host frame: {err}"),
        }
    }
}

impl std::error::Error for TransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransferError::Allocation(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum RecorderError {
    AlreadyRecording,
    NotRecording,
    InvalidConfig(String),
    InvalidFrame(String),
    Open(io::Error),
    Allocation(TryReserveError),
    Transfer(TransferError),
    Convert(ImageError),
    Write(io::Error),
    Sidecar(String),
}

impl fmt::Display for RecorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecorderError::AlreadyRecording => write!(f, "already recording"),
            RecorderError::NotRecording => write!(f, "not recording"),
            RecorderError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            RecorderError::InvalidFrame(msg) => write!(f, "invalid frame: {msg}"),
            RecorderError::Open(err) => write!(f, "could not open output: {err}"),
            RecorderError::Allocation(err) => write!(f, "could not allocate frame buffer: {err}"),
            RecorderError::Transfer(err) => write!(f, "device transfer failed: {err}"),
            RecorderError::Convert(err) => write!(f, "conversion failed: {err}"),
            RecorderError::Write(err) => write!(f, "write failed: {err}"),
            RecorderError::Sidecar(msg) => write!(f, "sidecar error: {msg}"),
        }
    }
}

impl std::error::Error for RecorderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecorderError::Open(err) | RecorderError::Write(err) => Some(err),
            RecorderError::Allocation(err) => Some(err),
            RecorderError::Transfer(err) => Some(err),
            RecorderError::Convert(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransferError> for RecorderError {
    fn from(err: TransferError) -> Self {
        RecorderError::Transfer(err)
    }
}

impl From<ImageError> for RecorderError {
    fn from(err: ImageError) -> Self {
        RecorderError::Convert(err)
    }
}

impl From<TryReserveError> for RecorderError {
    fn from(err: TryReserveError) -> Self {
        RecorderError::Allocation(err)
    }
}
