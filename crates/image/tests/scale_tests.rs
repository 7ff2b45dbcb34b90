use {
    base::Vec2,
    image::{ImageError, Plane, Scaler},
};

#[test]
fn test_identity_copies() {
    let mut scaler = Scaler::new();
    let src = [1, 2, 3, 0, 4, 5, 6, 0];
    let mut dst = [0u8; 6];
    scaler
        .scale(&Plane::new(&src, 4), Vec2::new(3, 2), &mut dst, 3, Vec2::new(3, 2))
        .unwrap();
    assert_eq!(dst, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_constant_plane_stays_constant() {
    let mut scaler = Scaler::new();
    let src = [77u8; 35];
    let mut dst = [0u8; 33];
    scaler
        .scale(&Plane::new(&src, 7), Vec2::new(7, 5), &mut dst, 3, Vec2::new(3, 11))
        .unwrap();
    assert!(dst.iter().all(|&v| v.abs_diff(77) <= 1));
}

#[test]
fn test_upscale_interpolates() {
    let mut scaler = Scaler::new();
    let mut dst = [0u8; 8];
    scaler
        .scale(&Plane::new(&[0, 255], 2), Vec2::new(2, 1), &mut dst, 8, Vec2::new(8, 1))
        .unwrap();
    assert!(dst[0] <= 1);
    assert!(dst[7] >= 254);
    assert!(dst.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(dst[3] > 32 && dst[4] < 223);
}

#[test]
fn test_padding_is_neither_read_nor_written() {
    let mut scaler = Scaler::new();
    let mut src = [0xEEu8; 4 * 8];
    for y in 0..4 {
        src[y * 8..y * 8 + 4].fill(40);
    }
    let mut dst = [0u8; 2 * 16];
    scaler
        .scale(&Plane::new(&src, 8), Vec2::new(4, 4), &mut dst, 16, Vec2::new(2, 2))
        .unwrap();
    assert!(dst[0..2].iter().all(|&v| v.abs_diff(40) <= 1));
    assert!(dst[16..18].iter().all(|&v| v.abs_diff(40) <= 1));
    assert!(dst[2..16].iter().all(|&v| v == 0));
}

#[test]
fn test_scaler_is_reused_across_sizes() {
    let mut scaler = Scaler::new();
    let mut dst = [0u8; 6 * 4];
    for size in [Vec2::new(3, 2), Vec2::new(12, 8), Vec2::new(5, 7)] {
        let src = vec![200u8; size.area()];
        scaler
            .scale(&Plane::new(&src, size.x), size, &mut dst, 6, Vec2::new(6, 4))
            .unwrap();
        assert!(dst.iter().all(|&v| v.abs_diff(200) <= 1));
    }
}

#[test]
fn test_short_buffers_are_rejected() {
    let mut scaler = Scaler::new();
    let src = [0u8; 10];
    let mut dst = [0u8; 16];
    let short_src = scaler.scale(&Plane::new(&src, 4), Vec2::new(4, 4), &mut dst, 4, Vec2::new(4, 4));
    assert!(matches!(short_src, Err(ImageError::InvalidInput(_))));

    let src = [0u8; 16];
    let mut dst = [0u8; 5];
    let short_dst = scaler.scale(&Plane::new(&src, 4), Vec2::new(4, 4), &mut dst, 4, Vec2::new(2, 2));
    assert!(matches!(short_dst, Err(ImageError::InvalidInput(_))));
}
