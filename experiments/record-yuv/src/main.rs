use {
    base::Vec2,
    log::{info, warn},
    record_yuv::{Args, Pattern},
    recorder::VideoRecorder,
    std::{sync::Arc, time::Duration},
};

// the pattern is generated at a fixed size and scaled to the requested one
const INPUT_SIZE: Vec2<usize> = Vec2 { x: 640, y: 360 };

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    match &args.log_dir {
        Some(dir) => base::init_file_logger(dir)?,
        None => base::init_stdout_logger(),
    }

    let recorder = Arc::new(VideoRecorder::new());
    let path = recorder.initialize_with(&args.config)?;
    info!(
        "recording {} pattern frames of {} into {}",
        args.frames,
        INPUT_SIZE,
        path.display()
    );

    let pattern = Arc::new(Pattern::new(INPUT_SIZE, args.frames));
    let mut interval = tokio::time::interval(Duration::from_secs_f64(1.0 / args.config.fps() as f64));
    let mut index = 0;
    while index < args.frames {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted after {} frames", index);
                break;
            }
            _ = interval.tick() => {
                let recorder = Arc::clone(&recorder);
                let pattern = Arc::clone(&pattern);
                // conversion and the blocking write stay off the runtime threads
                let result = tokio::task::spawn_blocking(move || {
                    let frame = pattern.frame(index);
                    recorder.write_frame(&frame.as_frame())
                })
                .await?;
                if let Err(err) = result {
                    warn!("frame {} dropped: {}", index, err);
                }
                index += 1;
            }
        }
    }

    recorder.finalize();
    if let Some(meta) = recorder.sidecar_path() {
        info!("stream parameters in {}", meta.display());
    }
    Ok(())
}
