use {crate::*, base::Vec2};

/// Decode a JPEG bitstream into packed RGB8.
pub fn jpeg_to_rgb(data: &[u8]) -> Result<(Vec2<usize>, Vec<u8>), ImageError> {
    let decoded = crates_image::load_from_memory_with_format(data, crates_image::ImageFormat::Jpeg)?;
    let rgb = decoded.to_rgb8();
    let size = Vec2::new(rgb.width() as usize, rgb.height() as usize);
    Ok((size, rgb.into_raw()))
}
