use {
    base::Vec2,
    image::{
        ImageError, PixelFormat, Plane, RgbLayout, Scaler, Yuv420Image, check_planes,
        jpeg_to_rgb, nv12_to_yuv420, rgb_to_yuv420, yu12_to_yuv420, yuyv_to_yuv420,
    },
};

/// Reusable conversion state for one input pixel format.
///
/// Built once per input format; frames of a different input resolution are
/// handled by resampling through the same context (only the staging image
/// and the scalers' scratch buffers follow the input size).
pub struct ConversionContext {
    input_format: PixelFormat,
    output_size: Vec2<usize>,
    luma: Scaler,
    chroma: Scaler,
    staging: Option<Yuv420Image>,
}

impl ConversionContext {
    pub fn new(input_format: PixelFormat, output_size: Vec2<usize>) -> Result<Self, ImageError> {
        match input_format {
            PixelFormat::Yu12
            | PixelFormat::Nv12
            | PixelFormat::Yuyv
            | PixelFormat::Rgb8
            | PixelFormat::Argb8
            | PixelFormat::Bgra8
            | PixelFormat::Jpeg => {}
            // raw bayer needs demosaicing, which this context does not do
            PixelFormat::Srggb10p => return Err(ImageError::Unsupported(input_format)),
        }
        if output_size.is_empty() {
            return Err(ImageError::InvalidInput(format!(
                "empty output size {output_size}"
            )));
        }
        Ok(Self {
            input_format,
            output_size,
            luma: Scaler::new(),
            chroma: Scaler::new(),
            staging: None,
        })
    }

    pub fn input_format(&self) -> PixelFormat {
        self.input_format
    }

    pub fn output_size(&self) -> Vec2<usize> {
        self.output_size
    }

    /// Convert one host frame of `size` into `dst`, which must be sized to
    /// the context's output size.
    pub fn convert(
        &mut self,
        size: Vec2<usize>,
        planes: &[Plane],
        dst: &mut Yuv420Image,
    ) -> Result<(), ImageError> {
        if dst.size() != self.output_size {
            return Err(ImageError::InvalidInput(format!(
                "output buffer is {}, context targets {}",
                dst.size(),
                self.output_size
            )));
        }
        if size.is_empty() {
            return Err(ImageError::InvalidInput(format!("empty input size {size}")));
        }

        if self.input_format == PixelFormat::Jpeg {
            let data = planes.first().ok_or_else(|| {
                ImageError::InvalidInput("mjpeg frame without a bitstream".to_string())
            })?;
            let (decoded_size, rgb) = jpeg_to_rgb(data.data)?;
            if decoded_size != size {
                return Err(ImageError::InvalidInput(format!(
                    "mjpeg decoded to {decoded_size}, frame declares {size}"
                )));
            }
            let plane = Plane::new(&rgb, size.x * 3);
            return self.convert_unpacked(size, PixelFormat::Rgb8, &[plane], dst);
        }
        self.convert_unpacked(size, self.input_format, planes, dst)
    }

    fn convert_unpacked(
        &mut self,
        size: Vec2<usize>,
        format: PixelFormat,
        planes: &[Plane],
        dst: &mut Yuv420Image,
    ) -> Result<(), ImageError> {
        if size == self.output_size {
            return unpack(format, size, planes, dst);
        }

        // the declared size is only trusted once the planes back it up
        check_planes(format, size, planes)?;
        let staging = match self.staging.take() {
            Some(image) if image.size() == size => image,
            _ => Yuv420Image::try_new(size)?,
        };
        let staging = self.staging.insert(staging);
        unpack(format, size, planes, staging)?;

        let (out_luma, out_chroma) = (self.output_size, self.output_size.half_ceil());
        let strides = [dst.stride(0), dst.stride(1), dst.stride(2)];
        let [y, u, v] = dst.planes_mut();
        let chroma = size.half_ceil();
        self.luma.scale(&staging.plane(0), size, y, strides[0], out_luma)?;
        self.chroma.scale(&staging.plane(1), chroma, u, strides[1], out_chroma)?;
        self.chroma.scale(&staging.plane(2), chroma, v, strides[2], out_chroma)?;
        Ok(())
    }
}

fn unpack(
    format: PixelFormat,
    size: Vec2<usize>,
    planes: &[Plane],
    dst: &mut Yuv420Image,
) -> Result<(), ImageError> {
    match format {
        PixelFormat::Yu12 => yu12_to_yuv420(size, planes, dst),
        PixelFormat::Nv12 => nv12_to_yuv420(size, planes, dst),
        PixelFormat::Yuyv => yuyv_to_yuv420(size, planes, dst),
        PixelFormat::Rgb8 | PixelFormat::Argb8 | PixelFormat::Bgra8 => {
            let plane = planes.first().ok_or_else(|| {
                ImageError::InvalidInput(format!("{} frame without a plane", format.name()))
            })?;
            let layout = RgbLayout::for_format(format).ok_or(ImageError::Unsupported(format))?;
            rgb_to_yuv420(size, layout, plane, dst)
        }
        PixelFormat::Jpeg | PixelFormat::Srggb10p => Err(ImageError::Unsupported(format)),
    }
}
