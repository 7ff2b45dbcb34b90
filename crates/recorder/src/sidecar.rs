use {
    crate::*,
    base::Vec2,
    image::PixelFormat,
    std::{
        ffi::OsString,
        fs,
        io,
        path::{Path, PathBuf},
    },
};

// appended to the raw stream's file name
const SIDECAR_SUFFIX: &str = ".meta";

/// Parameters needed to reinterpret a raw stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidecar {
    pub size: Vec2<usize>,
    pub fps: u32,
    pub format: PixelFormat,
}

impl Sidecar {
    pub fn new(size: Vec2<usize>, fps: u32) -> Self {
        Self {
            size,
            fps,
            format: PixelFormat::CANONICAL,
        }
    }

    /// `<raw path>.meta`
    pub fn path_for(raw_path: &Path) -> PathBuf {
        let mut name = OsString::from(raw_path.as_os_str());
        name.push(SIDECAR_SUFFIX);
        PathBuf::from(name)
    }

    /// Bytes of one frame in the raw stream.
    pub fn frame_byte_size(&self) -> usize {
        image::Yuv420Image::frame_byte_size(self.size)
    }

    pub fn render(&self, raw_path: &Path) -> String {
        let (w, h, fps, format) = (self.size.x, self.size.y, self.fps, self.format.name());
        format!(
            "width={w}\n\
             height={h}\n\
             fps={fps}\n\
             format={format}\n\
             # To convert to MP4, run:\n\
             # ffmpeg -f rawvideo -pix_fmt {format} -s {w}x{h} -r {fps} -i \"{}\" -c:v libx264 -pix_fmt yuv420p output.mp4\n",
            raw_path.display()
        )
    }

    pub fn write(&self, raw_path: &Path) -> io::Result<PathBuf> {
        let path = Self::path_for(raw_path);
        fs::write(&path, self.render(raw_path))?;
        Ok(path)
    }

    /// Read back `key=value` lines; comments and blank lines are skipped,
    /// unknown keys ignored.
    pub fn parse(text: &str) -> Result<Self, RecorderError> {
        let (mut width, mut height, mut fps, mut format) = (None, None, None, None);
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(RecorderError::Sidecar(format!("malformed line: {line}")));
            };
            let value = value.trim();
            match key.trim() {
                "width" => width = Some(parse_number(key, value)?),
                "height" => height = Some(parse_number(key, value)?),
                "fps" => fps = Some(parse_number(key, value)?),
                "format" => {
                    format = Some(PixelFormat::from_name(value).ok_or_else(|| {
                        RecorderError::Sidecar(format!("unknown format: {value}"))
                    })?)
                }
                _ => {}
            }
        }
        let missing = |key: &str| RecorderError::Sidecar(format!("missing {key}"));
        Ok(Self {
            size: Vec2::new(
                width.ok_or_else(|| missing("width"))? as usize,
                height.ok_or_else(|| missing("height"))? as usize,
            ),
            fps: fps.ok_or_else(|| missing("fps"))?,
            format: format.ok_or_else(|| missing("format"))?,
        })
    }

    pub fn read(raw_path: &Path) -> Result<Self, RecorderError> {
        let text = fs::read_to_string(Self::path_for(raw_path))
            .map_err(|err| RecorderError::Sidecar(err.to_string()))?;
        Self::parse(&text)
    }
}

fn parse_number(key: &str, value: &str) -> Result<u32, RecorderError> {
    value
        .parse()
        .map_err(|_| RecorderError::Sidecar(format!("{key} is not a number: {value}")))
}
