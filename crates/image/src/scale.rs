use {
    crate::*,
    base::Vec2,
    fast_image_resize::{
        FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer,
        images::{Image, ImageRef},
    },
};

fn to_u32(size: Vec2<usize>) -> Result<(u32, u32), ImageError> {
    match (u32::try_from(size.x), u32::try_from(size.y)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(ImageError::InvalidInput(format!("cannot resample a {size} plane"))),
    }
}

/// Bilinear resampler for 8-bit planes.
///
/// Holds a `fast_image_resize` resizer and the scratch images around it, so
/// one scaler per plane kind is reused frame after frame; the scratch
/// buffers follow size changes.
pub struct Scaler {
    resizer: Resizer,
    options: ResizeOptions,
    // tightly packed copy of the source plane
    packed: Vec<u8>,
    target: Option<Image<'static>>,
}

impl Default for Scaler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scaler {
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear)),
            packed: Vec::new(),
            target: None,
        }
    }

    /// Resample `src` (a plane of `src_size`) into `dst` (a plane of
    /// `dst_size`, rows `dst_stride` apart). Equal sizes copy rows. Bytes
    /// past the logical width of either plane are neither read nor written.
    pub fn scale(
        &mut self,
        src: &Plane,
        src_size: Vec2<usize>,
        dst: &mut [u8],
        dst_stride: usize,
        dst_size: Vec2<usize>,
    ) -> Result<(), ImageError> {
        src.check(src_size.x, src_size.y, "scaler source")?;
        Plane::new(dst, dst_stride).check(dst_size.x, dst_size.y, "scaler target")?;

        if src_size == dst_size {
            for y in 0..dst_size.y {
                dst[y * dst_stride..y * dst_stride + dst_size.x]
                    .copy_from_slice(src.row(y, src_size.x));
            }
            return Ok(());
        }

        let (src_w, src_h) = to_u32(src_size)?;
        let (dst_w, dst_h) = to_u32(dst_size)?;

        self.packed.clear();
        for y in 0..src_size.y {
            self.packed.extend_from_slice(src.row(y, src_size.x));
        }
        let source = ImageRef::new(src_w, src_h, &self.packed, PixelType::U8)
            .map_err(|err| ImageError::InvalidInput(err.to_string()))?;

        let target = match self.target.take() {
            Some(image) if image.width() == dst_w && image.height() == dst_h => image,
            _ => Image::new(dst_w, dst_h, PixelType::U8),
        };
        let target = self.target.insert(target);
        self.resizer.resize(&source, target, &self.options)?;

        for (y, row) in target.buffer().chunks_exact(dst_size.x).enumerate() {
            dst[y * dst_stride..y * dst_stride + dst_size.x].copy_from_slice(row);
        }
        Ok(())
    }
}
