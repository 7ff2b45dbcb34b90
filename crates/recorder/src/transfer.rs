use {
    crate::*,
    base::Vec2,
    image::{PixelFormat, Plane},
    std::borrow::Cow,
};

/// A frame whose pixels are guaranteed to be in host memory.
pub(crate) enum Resident<'f> {
    /// The caller's own planes, untouched.
    Host {
        size: Vec2<usize>,
        format: PixelFormat,
        planes: &'f [Plane<'f>],
    },
    /// A temporary copy downloaded from the device, dropped with `self`.
    Downloaded(HostFrame),
}

impl Resident<'_> {
    pub fn size(&self) -> Vec2<usize> {
        match self {
            Resident::Host { size, .. } => *size,
            Resident::Downloaded(frame) => frame.size(),
        }
    }

    pub fn format(&self) -> PixelFormat {
        match self {
            Resident::Host { format, .. } => *format,
            Resident::Downloaded(frame) => frame.format(),
        }
    }

    pub fn planes(&self) -> Cow<'_, [Plane<'_>]> {
        match self {
            Resident::Host { planes, .. } => Cow::Borrowed(*planes),
            Resident::Downloaded(frame) => Cow::Owned(frame.planes()),
        }
    }
}

/// Bring `frame` into host memory. Host frames pass through by reference;
/// device frames are downloaded synchronously into one freshly allocated
/// [`HostFrame`].
pub(crate) fn make_resident<'f>(frame: &'f VideoFrame<'f>) -> Result<Resident<'f>, TransferError> {
    match &frame.data {
        FrameData::Host(planes) => Ok(Resident::Host {
            size: frame.size,
            format: frame.format,
            planes,
        }),
        FrameData::Device(surface) => {
            let sw_format = surface.sw_format();
            let mut host = HostFrame::allocate(frame.size, sw_format)?;
            surface.transfer_to(&mut host)?;
            if host.size() != frame.size || host.format() != sw_format {
                return Err(TransferError::Mismatch(format!(
                    "downloaded {} {}, expected {} {}",
                    host.size(),
                    host.format().name(),
                    frame.size,
                    sw_format.name()
                )));
            }
            Ok(Resident::Downloaded(host))
        }
    }
}
