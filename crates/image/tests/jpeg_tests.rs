use image::{ImageError, jpeg_to_rgb};

#[test]
fn test_jpeg_to_rgb_decode() {
    let mut buffer = Vec::new();
    let img = crates_image::RgbImage::from_fn(8, 6, |_, _| crates_image::Rgb([90, 90, 90]));
    crates_image::codecs::jpeg::JpegEncoder::new(&mut buffer)
        .encode_image(&img)
        .unwrap();

    let (size, rgb) = jpeg_to_rgb(&buffer).unwrap();
    assert_eq!((size.x, size.y), (8, 6));
    assert_eq!(rgb.len(), 8 * 6 * 3);
    // flat colour survives lossy coding within a small tolerance
    assert!(rgb.iter().all(|&v| (v as i32 - 90).abs() <= 3));
}

#[test]
fn test_corrupt_jpeg_produces_decode_error() {
    let result = jpeg_to_rgb(b"not a jpeg at all");
    assert!(matches!(result, Err(ImageError::Decode(_))));
}
