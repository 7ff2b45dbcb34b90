use {
    crate::*,
    base::Vec2,
    image::{PixelFormat, Plane, padded_stride},
};

/// A decoded picture living in accelerator memory.
///
/// Implemented by the decoder's hardware backend. The recorder only ever
/// asks for a blocking download into host memory.
pub trait DeviceSurface {
    /// Host layout the surface downloads as.
    fn sw_format(&self) -> PixelFormat;

    /// Copy the whole surface into `dst`, which has been allocated for
    /// [`DeviceSurface::sw_format`] at the frame size. Blocks until done.
    fn transfer_to(&self, dst: &mut HostFrame) -> Result<(), TransferError>;
}

/// Where a frame's pixels live.
pub enum FrameData<'a> {
    Host(Vec<Plane<'a>>),
    Device(&'a dyn DeviceSurface),
}

/// A decoded frame handed over by the pipeline for the duration of one
/// [`VideoRecorder::write_frame`] call.
pub struct VideoFrame<'a> {
    pub size: Vec2<usize>,
    pub format: PixelFormat,
    pub data: FrameData<'a>,
}

impl<'a> VideoFrame<'a> {
    pub fn host(size: Vec2<usize>, format: PixelFormat, planes: Vec<Plane<'a>>) -> Self {
        Self {
            size,
            format,
            data: FrameData::Host(planes),
        }
    }

    pub fn device(size: Vec2<usize>, surface: &'a dyn DeviceSurface) -> Self {
        Self {
            size,
            format: surface.sw_format(),
            data: FrameData::Device(surface),
        }
    }

    pub fn is_device_resident(&self) -> bool {
        matches!(self.data, FrameData::Device(_))
    }

    /// True for frames without pixels: zero width or height, or host data
    /// without planes.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty() || matches!(&self.data, FrameData::Host(planes) if planes.is_empty())
    }
}

/// Owned host-resident frame with padded planes, the target of a device
/// download.
#[derive(Debug, Clone)]
pub struct HostFrame {
    size: Vec2<usize>,
    format: PixelFormat,
    strides: Vec<usize>,
    planes: Vec<Vec<u8>>,
}

impl HostFrame {
    /// Allocate zeroed planes for `format` at `size`. Fails without
    /// aborting when the layout overflows or memory runs out.
    pub fn allocate(size: Vec2<usize>, format: PixelFormat) -> Result<Self, TransferError> {
        let mut strides = Vec::with_capacity(format.plane_count());
        let mut planes = Vec::with_capacity(format.plane_count());
        for index in 0..format.plane_count() {
            let extent = format.plane_extent(size, index).ok_or_else(|| {
                TransferError::Mismatch(format!("{} has no host layout at {size}", format.name()))
            })?;
            let (stride, len) = padded_stride(extent.x)
                .and_then(|stride| Some((stride, stride.checked_mul(extent.y)?)))
                .ok_or_else(|| {
                    TransferError::Mismatch(format!("{} plane {index} of {size} overflows", format.name()))
                })?;
            let mut plane = Vec::new();
            plane
                .try_reserve_exact(len)
                .map_err(TransferError::Allocation)?;
            plane.resize(len, 0);
            strides.push(stride);
            planes.push(plane);
        }
        Ok(Self {
            size,
            format,
            strides,
            planes,
        })
    }

    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    pub fn stride(&self, index: usize) -> usize {
        self.strides[index]
    }

    pub fn plane_mut(&mut self, index: usize) -> &mut [u8] {
        &mut self.planes[index]
    }

    pub fn planes(&self) -> Vec<Plane<'_>> {
        self.planes
            .iter()
            .zip(self.strides.iter())
            .map(|(data, &stride)| Plane::new(data, stride))
            .collect()
    }

    /// Borrow as a host-resident [`VideoFrame`].
    pub fn as_frame(&self) -> VideoFrame<'_> {
        VideoFrame::host(self.size, self.format, self.planes())
    }
}
