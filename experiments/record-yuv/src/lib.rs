use {
    anyhow::{Context, bail},
    base::Vec2,
    image::{PixelFormat, Plane},
    recorder::{RecorderConfig, VideoFrame},
    std::path::PathBuf,
};

/// Command line:
/// `record_yuv [output dir] [WIDTHxHEIGHT] [frames] [fps] [log dir]`.
///
/// Without a log dir, logs go to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config: RecorderConfig,
    pub frames: u64,
    pub log_dir: Option<PathBuf>,
}

impl Args {
    pub fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut config = RecorderConfig::default().with_stem("pattern");
        let mut frames = 300;
        let mut args = args.into_iter();
        if let Some(dir) = args.next() {
            config = config.with_output_dir(dir);
        }
        if let Some(size) = args.next() {
            let size = parse_size(&size)?;
            config = config.with_width(size.x as u32).with_height(size.y as u32);
        }
        if let Some(count) = args.next() {
            frames = count
                .parse()
                .with_context(|| format!("frame count is not a number: {count}"))?;
        }
        if let Some(fps) = args.next() {
            let fps = fps
                .parse()
                .with_context(|| format!("fps is not a number: {fps}"))?;
            config = config.with_fps(fps);
        }
        let log_dir = args.next().map(PathBuf::from);
        if args.next().is_some() {
            bail!("usage: record_yuv [output dir] [WIDTHxHEIGHT] [frames] [fps] [log dir]");
        }
        Ok(Self {
            config,
            frames,
            log_dir,
        })
    }
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_size(text: &str) -> anyhow::Result<Vec2<usize>> {
    let (w, h) = text
        .split_once('x')
        .with_context(|| format!("size must look like 1280x720, got {text}"))?;
    let w = w.parse().with_context(|| format!("bad width in {text}"))?;
    let h = h.parse().with_context(|| format!("bad height in {text}"))?;
    if w == 0 || h == 0 {
        bail!("size must not be empty, got {text}");
    }
    Ok(Vec2::new(w, h))
}

/// Synthetic source standing in for a decoder: a diagonal gradient that
/// scrolls one pixel per frame. Switches from NV12 to RGB halfway through so
/// the recorder sees a format change.
pub struct Pattern {
    size: Vec2<usize>,
    switch_at: u64,
}

/// Owned pixels of one pattern frame.
pub enum PatternFrame {
    Nv12 { size: Vec2<usize>, y: Vec<u8>, uv: Vec<u8> },
    Rgb8 { size: Vec2<usize>, rgb: Vec<u8> },
}

impl Pattern {
    pub fn new(size: Vec2<usize>, frames: u64) -> Self {
        Self {
            size,
            switch_at: frames / 2,
        }
    }

    pub fn frame(&self, index: u64) -> PatternFrame {
        let size = self.size;
        let shift = index as usize;
        let value = |x: usize, y: usize| ((x + y + shift) & 0xFF) as u8;
        if index < self.switch_at {
            let chroma = size.half_ceil();
            let mut y = Vec::with_capacity(size.area());
            for row in 0..size.y {
                y.extend((0..size.x).map(|x| value(x, row)));
            }
            let mut uv = Vec::with_capacity(chroma.area() * 2);
            for row in 0..chroma.y {
                for x in 0..chroma.x {
                    uv.push(value(x, row));
                    uv.push(255 - value(x, row));
                }
            }
            PatternFrame::Nv12 { size, y, uv }
        } else {
            let mut rgb = Vec::with_capacity(size.area() * 3);
            for row in 0..size.y {
                for x in 0..size.x {
                    let v = value(x, row);
                    rgb.extend_from_slice(&[v, 255 - v, (row & 0xFF) as u8]);
                }
            }
            PatternFrame::Rgb8 { size, rgb }
        }
    }
}

impl PatternFrame {
    pub fn format(&self) -> PixelFormat {
        match self {
            PatternFrame::Nv12 { .. } => PixelFormat::Nv12,
            PatternFrame::Rgb8 { .. } => PixelFormat::Rgb8,
        }
    }

    /// Borrow as a frame the recorder accepts.
    pub fn as_frame(&self) -> VideoFrame<'_> {
        match self {
            PatternFrame::Nv12 { size, y, uv } => VideoFrame::host(
                *size,
                PixelFormat::Nv12,
                vec![Plane::new(y, size.x), Plane::new(uv, size.half_ceil().x * 2)],
            ),
            PatternFrame::Rgb8 { size, rgb } => {
                VideoFrame::host(*size, PixelFormat::Rgb8, vec![Plane::new(rgb, size.x * 3)])
            }
        }
    }
}
