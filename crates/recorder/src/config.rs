use {
    base::{Vec2, format_file_timestamp},
    std::path::{Path, PathBuf},
};

/// Session parameters for a [`VideoRecorder`](crate::VideoRecorder).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecorderConfig {
    output_dir: PathBuf,
    stem: String,
    width: u32,
    height: u32,
    fps: u32,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("recordings"),
            stem: "capture".to_string(),
            width: 1920,
            height: 1080,
            fps: 60,
        }
    }
}

impl RecorderConfig {
    /// Set the directory recordings are written to.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set the file name prefix used by [`RecorderConfig::timestamped_path`].
    pub fn with_stem(mut self, stem: impl Into<String>) -> Self {
        self.stem = stem.into();
        self
    }

    /// Set the output width in pixels.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the output height in pixels.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Set the frames per second recorded in the sidecar.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    // Getters
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn size(&self) -> Vec2<usize> {
        Vec2::new(self.width as usize, self.height as usize)
    }

    /// `<output_dir>/<stem>-<YYYY-MM-DDTHH-MM-SS>.yuv`
    pub fn timestamped_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}-{}.yuv", self.stem, format_file_timestamp()))
    }
}
