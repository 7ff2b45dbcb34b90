use base::Vec2;

// fourcc codes
pub(crate) const FOURCC_YU12: u32 = u32::from_le_bytes(*b"YU12");
pub(crate) const FOURCC_NV12: u32 = u32::from_le_bytes(*b"NV12");
pub(crate) const FOURCC_YUYV: u32 = u32::from_le_bytes(*b"YUYV");
pub(crate) const FOURCC_RGB8: u32 = u32::from_le_bytes(*b"RGB8");
pub(crate) const FOURCC_ARGB8: u32 = u32::from_le_bytes(*b"ARGB");
pub(crate) const FOURCC_BGRA8: u32 = u32::from_le_bytes(*b"BGRA");
pub(crate) const FOURCC_MJPG: u32 = u32::from_le_bytes(*b"MJPG");
pub(crate) const FOURCC_SRGGB10P: u32 = u32::from_le_bytes(*b"pRAA");

/// Convert a fourcc code to a readable 4-character string.
pub fn fourcc_to_string(fourcc: u32) -> String {
    String::from_utf8_lossy(&fourcc.to_le_bytes()).into_owned()
}

/// Host pixel layouts a decoder can hand over.
///
/// `Yu12` (I420, ffmpeg's `yuv420p`) is the canonical recording format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Yu12,
    Nv12,
    Yuyv,
    Rgb8,
    Argb8,
    Bgra8,
    Jpeg,
    Srggb10p,
}

impl PixelFormat {
    /// The format every recorded frame is converted to.
    pub const CANONICAL: PixelFormat = PixelFormat::Yu12;

    pub fn from_fourcc(fourcc: u32) -> Option<Self> {
        match fourcc {
            FOURCC_YU12 => Some(PixelFormat::Yu12),
            FOURCC_NV12 => Some(PixelFormat::Nv12),
            FOURCC_YUYV => Some(PixelFormat::Yuyv),
            FOURCC_RGB8 => Some(PixelFormat::Rgb8),
            FOURCC_ARGB8 => Some(PixelFormat::Argb8),
            FOURCC_BGRA8 => Some(PixelFormat::Bgra8),
            FOURCC_MJPG => Some(PixelFormat::Jpeg),
            FOURCC_SRGGB10P => Some(PixelFormat::Srggb10p),
            _ => None,
        }
    }

    pub fn as_fourcc(&self) -> u32 {
        match self {
            PixelFormat::Yu12 => FOURCC_YU12,
            PixelFormat::Nv12 => FOURCC_NV12,
            PixelFormat::Yuyv => FOURCC_YUYV,
            PixelFormat::Rgb8 => FOURCC_RGB8,
            PixelFormat::Argb8 => FOURCC_ARGB8,
            PixelFormat::Bgra8 => FOURCC_BGRA8,
            PixelFormat::Jpeg => FOURCC_MJPG,
            PixelFormat::Srggb10p => FOURCC_SRGGB10P,
        }
    }

    /// ffmpeg `-pix_fmt` style name.
    pub fn name(&self) -> &'static str {
        match self {
            PixelFormat::Yu12 => "yuv420p",
            PixelFormat::Nv12 => "nv12",
            PixelFormat::Yuyv => "yuyv422",
            PixelFormat::Rgb8 => "rgb24",
            PixelFormat::Argb8 => "argb",
            PixelFormat::Bgra8 => "bgra",
            PixelFormat::Jpeg => "mjpeg",
            PixelFormat::Srggb10p => "bayer_rggb10p",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            PixelFormat::Yu12,
            PixelFormat::Nv12,
            PixelFormat::Yuyv,
            PixelFormat::Rgb8,
            PixelFormat::Argb8,
            PixelFormat::Bgra8,
            PixelFormat::Jpeg,
            PixelFormat::Srggb10p,
        ]
        .into_iter()
        .find(|format| format.name() == name)
    }

    pub fn plane_count(&self) -> usize {
        match self {
            PixelFormat::Yu12 => 3,
            PixelFormat::Nv12 => 2,
            _ => 1,
        }
    }

    /// Bytes per row (`x`) and number of rows (`y`) of plane `index` for an
    /// image of `size`, without padding. `None` for compressed formats,
    /// planes the format does not have and row widths that overflow.
    pub fn plane_extent(&self, size: Vec2<usize>, index: usize) -> Option<Vec2<usize>> {
        let chroma = size.half_ceil();
        let row_bytes = match (self, index) {
            (PixelFormat::Yu12 | PixelFormat::Nv12, 0) => size.x,
            (PixelFormat::Yu12, 1 | 2) => return Some(chroma),
            (PixelFormat::Nv12, 1) => return Some(Vec2::new(chroma.x.checked_mul(2)?, chroma.y)),
            (PixelFormat::Yuyv, 0) => chroma.x.checked_mul(4)?,
            (PixelFormat::Rgb8, 0) => size.x.checked_mul(3)?,
            (PixelFormat::Argb8 | PixelFormat::Bgra8, 0) => size.x.checked_mul(4)?,
            (PixelFormat::Srggb10p, 0) => size.x.div_ceil(4).checked_mul(5)?,
            _ => return None,
        };
        Some(Vec2::new(row_bytes, size.y))
    }
}

// BT.601 full-range YUV-to-RGB for a single pixel (fixed-point, shift 8)
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let r = (y + ((359 * v) >> 8)).clamp(0, 255) as u8;
    let g = (y - ((88 * u + 183 * v) >> 8)).clamp(0, 255) as u8;
    let b = (y + ((454 * u) >> 8)).clamp(0, 255) as u8;
    (r, g, b)
}

/// Luma of one pixel, inverse of [`yuv_to_rgb`].
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32 + 128) >> 8) as u8
}

/// Chroma (U, V) of one (averaged) pixel, inverse of [`yuv_to_rgb`].
pub fn rgb_to_chroma(r: u8, g: u8, b: u8) -> (u8, u8) {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let u = (((-43 * r - 85 * g + 128 * b + 128) >> 8) + 128).clamp(0, 255) as u8;
    let v = (((128 * r - 107 * g - 21 * b + 128) >> 8) + 128).clamp(0, 255) as u8;
    (u, v)
}
