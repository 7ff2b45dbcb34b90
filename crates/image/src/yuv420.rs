use {crate::*, base::Vec2};

// row alignment of the planes in a Yuv420Image
const ROW_ALIGN: usize = 32;

/// A borrowed plane of pixel data.
///
/// `stride` is the distance in bytes between the starts of two rows; it may
/// be larger than the logical row width.
#[derive(Debug, Clone, Copy)]
pub struct Plane<'a> {
    pub data: &'a [u8],
    pub stride: usize,
}

impl<'a> Plane<'a> {
    pub fn new(data: &'a [u8], stride: usize) -> Self {
        Self { data, stride }
    }

    /// Check that the plane holds `rows` rows of at least `row_bytes` bytes.
    pub fn check(&self, row_bytes: usize, rows: usize, what: &str) -> Result<(), ImageError> {
        if self.stride < row_bytes {
            return Err(ImageError::InvalidInput(format!(
                "{what}: stride {} is smaller than row width {row_bytes}",
                self.stride
            )));
        }
        let needed = match rows {
            0 => Some(0),
            _ => self
                .stride
                .checked_mul(rows - 1)
                .and_then(|n| n.checked_add(row_bytes)),
        }
        .ok_or_else(|| {
            ImageError::InvalidInput(format!(
                "{what}: {rows} rows of stride {} overflow",
                self.stride
            ))
        })?;
        if self.data.len() < needed {
            return Err(ImageError::InvalidInput(format!(
                "{what}: {} bytes, expected at least {needed}",
                self.data.len()
            )));
        }
        Ok(())
    }

    /// Row `y`, `width` bytes long. Only valid after [`Plane::check`].
    pub fn row(&self, y: usize, width: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + width]
    }
}

/// Owned planar 4:2:0 image (Y, then U, then V).
///
/// Chroma planes are `ceil(width / 2) x ceil(height / 2)`. Rows are padded to
/// a 32-byte stride; the padding is never part of the logical image.
#[derive(Debug, Clone)]
pub struct Yuv420Image {
    size: Vec2<usize>,
    strides: [usize; 3],
    offsets: [usize; 3],
    data: Vec<u8>,
}

/// Round a row width up to the stride used for allocated planes. `None` on
/// overflow.
pub fn padded_stride(row_bytes: usize) -> Option<usize> {
    row_bytes.checked_next_multiple_of(ROW_ALIGN)
}

impl Yuv420Image {
    /// Allocate a zeroed image. Sizes whose layout overflows are rejected as
    /// invalid input; allocation failure is reported instead of aborting.
    pub fn try_new(size: Vec2<usize>) -> Result<Self, ImageError> {
        let (strides, offsets, len) = Self::layout(size)
            .ok_or_else(|| ImageError::InvalidInput(format!("image of {size} is too large")))?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)?;
        data.resize(len, 0);
        Ok(Self {
            size,
            strides,
            offsets,
            data,
        })
    }

    fn layout(size: Vec2<usize>) -> Option<([usize; 3], [usize; 3], usize)> {
        let chroma = size.half_ceil();
        let luma_stride = padded_stride(size.x)?;
        let chroma_stride = padded_stride(chroma.x)?;
        let luma_len = luma_stride.checked_mul(size.y)?;
        let chroma_len = chroma_stride.checked_mul(chroma.y)?;
        let len = chroma_len.checked_mul(2)?.checked_add(luma_len)?;
        Some((
            [luma_stride, chroma_stride, chroma_stride],
            [0, luma_len, luma_len + chroma_len],
            len,
        ))
    }

    /// Number of bytes one frame of `size` occupies when its planes are
    /// packed without padding.
    pub fn frame_byte_size(size: Vec2<usize>) -> usize {
        size.area() + 2 * size.half_ceil().area()
    }

    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    pub fn plane_size(&self, index: usize) -> Vec2<usize> {
        if index == 0 {
            self.size
        } else {
            self.size.half_ceil()
        }
    }

    pub fn stride(&self, index: usize) -> usize {
        self.strides[index]
    }

    fn plane_range(&self, index: usize) -> std::ops::Range<usize> {
        let start = self.offsets[index];
        start..start + self.strides[index] * self.plane_size(index).y
    }

    pub fn plane(&self, index: usize) -> Plane<'_> {
        Plane {
            data: &self.data[self.plane_range(index)],
            stride: self.strides[index],
        }
    }

    pub fn plane_mut(&mut self, index: usize) -> &mut [u8] {
        let range = self.plane_range(index);
        &mut self.data[range]
    }

    /// Mutable access to all three planes at once.
    pub fn planes_mut(&mut self) -> [&mut [u8]; 3] {
        let (y, rest) = self.data.split_at_mut(self.offsets[1]);
        let (u, v) = rest.split_at_mut(self.offsets[2] - self.offsets[1]);
        [y, u, v]
    }

    /// Logical rows of plane `index`, stride padding excluded.
    pub fn rows(&self, index: usize) -> impl Iterator<Item = &[u8]> {
        let plane = self.plane(index);
        let size = self.plane_size(index);
        (0..size.y).map(move |y| plane.row(y, size.x))
    }

    /// Fill every plane with a constant value.
    pub fn fill(&mut self, y: u8, u: u8, v: u8) {
        let [py, pu, pv] = self.planes_mut();
        py.fill(y);
        pu.fill(u);
        pv.fill(v);
    }

    /// Packed copy of the logical image, as it appears in a raw stream.
    pub fn to_packed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::frame_byte_size(self.size));
        for index in 0..3 {
            for row in self.rows(index) {
                out.extend_from_slice(row);
            }
        }
        out
    }
}
