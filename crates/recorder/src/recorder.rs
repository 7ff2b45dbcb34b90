use {
    crate::{persist::Persister, transfer::make_resident, *},
    base::Vec2,
    image::{ImageError, PixelFormat, Yuv420Image},
    log::{debug, error, info, warn},
    std::{
        fs::{self, File},
        io::{BufWriter, Write},
        path::{Path, PathBuf},
        sync::{Mutex, MutexGuard},
    },
};

// resources that exist only while recording
struct Session {
    persister: Persister<Box<dyn Write + Send>>,
    canonical: Yuv420Image,
    context: Option<ConversionContext>,
    last_input_format: Option<PixelFormat>,
}

#[derive(Default)]
struct RecorderState {
    session: Option<Session>,
    output_path: Option<PathBuf>,
    size: Vec2<usize>,
    fps: u32,
    frame_count: u64,
    context_builds: u64,
}

/// Sink that converts decoded frames to planar 4:2:0 and appends them to a
/// raw file, next to a `.meta` sidecar describing the stream.
///
/// Every operation takes the same lock for its whole duration, so the
/// recorder can be shared (e.g. in an `Arc`) between the decode thread and a
/// teardown path.
#[derive(Default)]
pub struct VideoRecorder {
    state: Mutex<RecorderState>,
}

impl VideoRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RecorderState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start a session writing to `path` at a fixed output size.
    pub fn initialize(
        &self,
        path: impl AsRef<Path>,
        width: u32,
        height: u32,
        fps: u32,
    ) -> Result<(), RecorderError> {
        let path = path.as_ref();
        let mut state = self.lock();

        if state.session.is_some() {
            warn!("recorder: already recording");
            return Err(RecorderError::AlreadyRecording);
        }
        if width == 0 || height == 0 || fps == 0 {
            warn!("recorder: invalid parameters {}x{} @ {} fps", width, height, fps);
            return Err(RecorderError::InvalidConfig(format!(
                "{width}x{height} @ {fps} fps"
            )));
        }

        let file = match open_output(path) {
            Ok(file) => file,
            Err(err) => {
                error!("recorder: could not open output file {}: {}", path.display(), err);
                return Err(RecorderError::Open(err));
            }
        };

        let size = Vec2::new(width as usize, height as usize);
        let canonical = match Yuv420Image::try_new(size) {
            Ok(image) => image,
            Err(ImageError::Allocation(err)) => {
                error!("recorder: could not allocate {} frame buffer: {}", size, err);
                return Err(RecorderError::Allocation(err));
            }
            Err(err) => {
                warn!("recorder: unusable output size {}: {}", size, err);
                return Err(RecorderError::InvalidConfig(err.to_string()));
            }
        };

        match Sidecar::new(size, fps).write(path) {
            Ok(meta) => debug!("recorder: wrote {}", meta.display()),
            Err(err) => warn!("recorder: could not write sidecar for {}: {}", path.display(), err),
        }

        state.session = Some(Session {
            persister: Persister::new(Box::new(BufWriter::new(file))),
            canonical,
            context: None,
            last_input_format: None,
        });
        state.output_path = Some(path.to_path_buf());
        state.size = size;
        state.fps = fps;
        state.frame_count = 0;
        state.context_builds = 0;

        info!(
            "recorder: started recording {} to {} ({} @ {} fps)",
            PixelFormat::CANONICAL.name(),
            path.display(),
            size,
            fps
        );
        Ok(())
    }

    /// Start a session from a config, at its timestamped path. Returns the
    /// path chosen.
    pub fn initialize_with(&self, config: &RecorderConfig) -> Result<PathBuf, RecorderError> {
        let path = config.timestamped_path();
        self.initialize(&path, config.width(), config.height(), config.fps())?;
        Ok(path)
    }

    /// Download (if needed), convert and append one frame.
    pub fn write_frame(&self, frame: &VideoFrame<'_>) -> Result<(), RecorderError> {
        let mut guard = self.lock();
        let state = &mut *guard;

        let Some(session) = state.session.as_mut() else {
            warn!("recorder: write_frame called while not recording");
            return Err(RecorderError::NotRecording);
        };
        if frame.is_empty() {
            warn!("recorder: dropping empty {} frame", frame.format.name());
            return Err(RecorderError::InvalidFrame(format!(
                "empty {} frame of {}",
                frame.format.name(),
                frame.size
            )));
        }

        let resident = make_resident(frame).map_err(|err| {
            error!("recorder: failed to transfer device frame: {}", err);
            RecorderError::Transfer(err)
        })?;

        let format = resident.format();
        if session.context.is_none() || session.last_input_format != Some(format) {
            session.context = None;
            let context = ConversionContext::new(format, state.size).map_err(|err| {
                error!(
                    "recorder: could not create conversion context for {}: {}",
                    format.name(),
                    err
                );
                RecorderError::Convert(err)
            })?;
            debug!(
                "recorder: conversion context {:?} -> {}",
                session.last_input_format.map(|f| f.name()),
                format.name()
            );
            session.context = Some(context);
            session.last_input_format = Some(format);
            state.context_builds += 1;
        }

        if let Some(context) = session.context.as_mut() {
            context
                .convert(resident.size(), &resident.planes(), &mut session.canonical)
                .map_err(|err| {
                    error!("recorder: could not convert {} frame: {}", format.name(), err);
                    RecorderError::Convert(err)
                })?;
        }
        drop(resident);

        session.persister.write_image(&session.canonical).map_err(|err| {
            error!("recorder: could not write frame {}: {}", state.frame_count, err);
            RecorderError::Write(err)
        })?;
        state.frame_count += 1;
        Ok(())
    }

    /// Close the output and release every session resource. Does nothing if
    /// not recording.
    pub fn finalize(&self) {
        let mut state = self.lock();
        let Some(mut session) = state.session.take() else {
            return;
        };
        if let Err(err) = session.persister.flush() {
            error!("recorder: could not flush output: {}", err);
        }
        drop(session);

        info!(
            "recorder: stopped recording. total frames: {}, output: {}",
            state.frame_count,
            state
                .output_path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        );
    }

    pub fn is_recording(&self) -> bool {
        self.lock().session.is_some()
    }

    /// Path of the current or most recent session.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.lock().output_path.clone()
    }

    pub fn sidecar_path(&self) -> Option<PathBuf> {
        self.lock().output_path.as_deref().map(Sidecar::path_for)
    }

    /// Frames written in the current or most recent session.
    pub fn frame_count(&self) -> u64 {
        self.lock().frame_count
    }

    /// Input format the conversion context was last built for.
    pub fn last_input_format(&self) -> Option<PixelFormat> {
        self.lock()
            .session
            .as_ref()
            .and_then(|session| session.last_input_format)
    }

    /// Conversion contexts built in the current or most recent session.
    pub fn context_builds(&self) -> u64 {
        self.lock().context_builds
    }

    /// Output size of the current or most recent session.
    pub fn size(&self) -> Vec2<usize> {
        self.lock().size
    }

    pub fn fps(&self) -> u32 {
        self.lock().fps
    }
}

impl Drop for VideoRecorder {
    fn drop(&mut self) {
        self.finalize();
    }
}

fn open_output(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}
