//! Unpacking of host pixel layouts into a [`Yuv420Image`] of the same size.
//!
//! Every function validates the input planes against the frame size before
//! touching the destination, so a malformed frame never leaves a half
//! converted image behind.

use {crate::*, base::Vec2};

/// Byte layout of a packed 8-bit RGB format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbLayout {
    pub bytes_per_pixel: usize,
    pub r: usize,
    pub g: usize,
    pub b: usize,
}

impl RgbLayout {
    pub const RGB8: RgbLayout = RgbLayout {
        bytes_per_pixel: 3,
        r: 0,
        g: 1,
        b: 2,
    };
    pub const ARGB8: RgbLayout = RgbLayout {
        bytes_per_pixel: 4,
        r: 1,
        g: 2,
        b: 3,
    };
    pub const BGRA8: RgbLayout = RgbLayout {
        bytes_per_pixel: 4,
        r: 2,
        g: 1,
        b: 0,
    };

    pub fn for_format(format: PixelFormat) -> Option<RgbLayout> {
        match format {
            PixelFormat::Rgb8 => Some(Self::RGB8),
            PixelFormat::Argb8 => Some(Self::ARGB8),
            PixelFormat::Bgra8 => Some(Self::BGRA8),
            _ => None,
        }
    }
}

fn check_target(size: Vec2<usize>, dst: &Yuv420Image) -> Result<(), ImageError> {
    if dst.size() != size {
        return Err(ImageError::InvalidInput(format!(
            "destination is {}, source is {}",
            dst.size(),
            size
        )));
    }
    Ok(())
}

/// Check `planes` against the layout of a `format` frame of `size`, before
/// anything is allocated or written for it. Compressed formats have no plane
/// layout and are rejected.
pub fn check_planes(
    format: PixelFormat,
    size: Vec2<usize>,
    planes: &[Plane],
) -> Result<(), ImageError> {
    if planes.len() < format.plane_count() {
        return Err(ImageError::InvalidInput(format!(
            "{} needs {} planes, got {}",
            format.name(),
            format.plane_count(),
            planes.len()
        )));
    }
    for (index, plane) in planes.iter().take(format.plane_count()).enumerate() {
        let extent = format.plane_extent(size, index).ok_or_else(|| {
            ImageError::InvalidInput(format!(
                "{} plane {index} has no layout at {size}",
                format.name()
            ))
        })?;
        plane.check(extent.x, extent.y, &format!("{} plane {index}", format.name()))?;
    }
    Ok(())
}

fn copy_plane(src: &Plane, size: Vec2<usize>, dst: &mut [u8], dst_stride: usize) {
    for y in 0..size.y {
        dst[y * dst_stride..y * dst_stride + size.x].copy_from_slice(src.row(y, size.x));
    }
}

/// Planar I420 input: a straight copy honouring both strides.
pub fn yu12_to_yuv420(
    size: Vec2<usize>,
    planes: &[Plane],
    dst: &mut Yuv420Image,
) -> Result<(), ImageError> {
    check_target(size, dst)?;
    check_planes(PixelFormat::Yu12, size, planes)?;
    let chroma = size.half_ceil();

    let strides = [dst.stride(0), dst.stride(1), dst.stride(2)];
    let [y, u, v] = dst.planes_mut();
    copy_plane(&planes[0], size, y, strides[0]);
    copy_plane(&planes[1], chroma, u, strides[1]);
    copy_plane(&planes[2], chroma, v, strides[2]);
    Ok(())
}

/// Semi-planar NV12 input: luma copy, interleaved UV split into two planes.
pub fn nv12_to_yuv420(
    size: Vec2<usize>,
    planes: &[Plane],
    dst: &mut Yuv420Image,
) -> Result<(), ImageError> {
    check_target(size, dst)?;
    check_planes(PixelFormat::Nv12, size, planes)?;
    let chroma = size.half_ceil();

    let strides = [dst.stride(0), dst.stride(1), dst.stride(2)];
    let [y, u, v] = dst.planes_mut();
    copy_plane(&planes[0], size, y, strides[0]);
    for row in 0..chroma.y {
        let src = planes[1].row(row, chroma.x * 2);
        let u_row = &mut u[row * strides[1]..row * strides[1] + chroma.x];
        let v_row = &mut v[row * strides[2]..row * strides[2] + chroma.x];
        for (i, pair) in src.chunks_exact(2).enumerate() {
            u_row[i] = pair[0];
            v_row[i] = pair[1];
        }
    }
    Ok(())
}

/// Packed 4:2:2 YUYV input (`[Y0, U, Y1, V]` per pixel pair). Chroma is
/// already halved horizontally; vertically each output sample is the mean of
/// two source rows.
pub fn yuyv_to_yuv420(
    size: Vec2<usize>,
    planes: &[Plane],
    dst: &mut Yuv420Image,
) -> Result<(), ImageError> {
    check_target(size, dst)?;
    check_planes(PixelFormat::Yuyv, size, planes)?;
    let chroma = size.half_ceil();
    let row_bytes = chroma.x * 4;
    let src = planes[0];

    let strides = [dst.stride(0), dst.stride(1), dst.stride(2)];
    let [y, u, v] = dst.planes_mut();
    for row in 0..size.y {
        let line = src.row(row, row_bytes);
        let out = &mut y[row * strides[0]..row * strides[0] + size.x];
        for (x, pixel) in out.iter_mut().enumerate() {
            *pixel = line[x * 2];
        }
    }
    for row in 0..chroma.y {
        let top = src.row(row * 2, row_bytes);
        let bottom = src.row((row * 2 + 1).min(size.y - 1), row_bytes);
        for x in 0..chroma.x {
            let i = x * 4;
            u[row * strides[1] + x] = ((top[i + 1] as u16 + bottom[i + 1] as u16 + 1) / 2) as u8;
            v[row * strides[2] + x] = ((top[i + 3] as u16 + bottom[i + 3] as u16 + 1) / 2) as u8;
        }
    }
    Ok(())
}

/// Packed RGB input of any [`RgbLayout`]. Luma per pixel, chroma from the
/// mean colour of each 2x2 block (edge blocks use the pixels they have).
pub fn rgb_to_yuv420(
    size: Vec2<usize>,
    layout: RgbLayout,
    plane: &Plane,
    dst: &mut Yuv420Image,
) -> Result<(), ImageError> {
    check_target(size, dst)?;
    let row_bytes = size
        .x
        .checked_mul(layout.bytes_per_pixel)
        .ok_or_else(|| ImageError::InvalidInput(format!("rgb rows of {size} overflow")))?;
    plane.check(row_bytes, size.y, "rgb")?;

    let bpp = layout.bytes_per_pixel;
    let chroma = size.half_ceil();
    let strides = [dst.stride(0), dst.stride(1), dst.stride(2)];
    let [y, u, v] = dst.planes_mut();
    for row in 0..size.y {
        let line = plane.row(row, row_bytes);
        let out = &mut y[row * strides[0]..row * strides[0] + size.x];
        for (pixel, src) in out.iter_mut().zip(line.chunks_exact(bpp)) {
            *pixel = rgb_to_luma(src[layout.r], src[layout.g], src[layout.b]);
        }
    }
    for cy in 0..chroma.y {
        for cx in 0..chroma.x {
            let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
            for row in cy * 2..(cy * 2 + 2).min(size.y) {
                let line = plane.row(row, row_bytes);
                for x in cx * 2..(cx * 2 + 2).min(size.x) {
                    let p = &line[x * bpp..x * bpp + bpp];
                    r += p[layout.r] as u32;
                    g += p[layout.g] as u32;
                    b += p[layout.b] as u32;
                    n += 1;
                }
            }
            let (cu, cv) = rgb_to_chroma(
                ((r + n / 2) / n) as u8,
                ((g + n / 2) / n) as u8,
                ((b + n / 2) / n) as u8,
            );
            u[cy * strides[1] + cx] = cu;
            v[cy * strides[2] + cx] = cv;
        }
    }
    Ok(())
}
