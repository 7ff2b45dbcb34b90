use {
    base::Vec2,
    image::PixelFormat,
    recorder::{DeviceSurface, HostFrame, RecorderError, TransferError, VideoFrame, VideoRecorder},
    std::{
        fs,
        path::PathBuf,
        sync::atomic::{AtomicUsize, Ordering},
    },
};

fn test_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("recorder-device-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    dir.join("out.yuv")
}

fn cleanup(path: &PathBuf) {
    if let Some(dir) = path.parent() {
        fs::remove_dir_all(dir).ok();
    }
}

// downloads as NV12 filled with a flat colour
struct FlatSurface {
    y: u8,
    u: u8,
    v: u8,
    downloads: AtomicUsize,
}

impl FlatSurface {
    fn new(y: u8, u: u8, v: u8) -> Self {
        Self {
            y,
            u,
            v,
            downloads: AtomicUsize::new(0),
        }
    }
}

impl DeviceSurface for FlatSurface {
    fn sw_format(&self) -> PixelFormat {
        PixelFormat::Nv12
    }

    fn transfer_to(&self, dst: &mut HostFrame) -> Result<(), TransferError> {
        self.downloads.fetch_add(1, Ordering::Relaxed);
        dst.plane_mut(0).fill(self.y);
        for pair in dst.plane_mut(1).chunks_exact_mut(2) {
            pair[0] = self.u;
            pair[1] = self.v;
        }
        Ok(())
    }
}

struct LostSurface;

impl DeviceSurface for LostSurface {
    fn sw_format(&self) -> PixelFormat {
        PixelFormat::Nv12
    }

    fn transfer_to(&self, _dst: &mut HostFrame) -> Result<(), TransferError> {
        Err(TransferError::Device("device lost".to_string()))
    }
}

// replaces the target with a frame of the wrong size
struct ShrinkingSurface;

impl DeviceSurface for ShrinkingSurface {
    fn sw_format(&self) -> PixelFormat {
        PixelFormat::Nv12
    }

    fn transfer_to(&self, dst: &mut HostFrame) -> Result<(), TransferError> {
        *dst = HostFrame::allocate(Vec2::new(2, 2), PixelFormat::Nv12)?;
        Ok(())
    }
}

// claims a compressed layout, which has no host planes to download into
struct CompressedSurface;

impl DeviceSurface for CompressedSurface {
    fn sw_format(&self) -> PixelFormat {
        PixelFormat::Jpeg
    }

    fn transfer_to(&self, _dst: &mut HostFrame) -> Result<(), TransferError> {
        Ok(())
    }
}

#[test]
fn test_device_frame_is_downloaded_and_recorded() {
    let path = test_path("download");
    let recorder = VideoRecorder::new();
    recorder.initialize(&path, 6, 4, 30).unwrap();

    let surface = FlatSurface::new(42, 100, 150);
    let frame = VideoFrame::device(Vec2::new(6, 4), &surface);
    assert!(frame.is_device_resident());
    assert_eq!(frame.format, PixelFormat::Nv12);

    recorder.write_frame(&frame).unwrap();
    recorder.write_frame(&frame).unwrap();
    assert_eq!(surface.downloads.load(Ordering::Relaxed), 2);
    assert_eq!(recorder.frame_count(), 2);
    assert_eq!(recorder.last_input_format(), Some(PixelFormat::Nv12));
    recorder.finalize();

    let data = fs::read(&path).unwrap();
    assert_eq!(data.len(), 2 * (24 + 2 * 6));
    assert!(data[..24].iter().all(|&b| b == 42));
    assert!(data[24..30].iter().all(|&b| b == 100));
    assert!(data[30..36].iter().all(|&b| b == 150));
    cleanup(&path);
}

#[test]
fn test_device_frame_is_scaled_like_host_frames() {
    let path = test_path("download-scaled");
    let recorder = VideoRecorder::new();
    recorder.initialize(&path, 4, 4, 30).unwrap();

    let surface = FlatSurface::new(200, 60, 70);
    recorder.write_frame(&VideoFrame::device(Vec2::new(10, 6), &surface)).unwrap();
    recorder.finalize();

    let data = fs::read(&path).unwrap();
    let expected = [vec![200u8; 16], vec![60; 4], vec![70; 4]].concat();
    assert_eq!(data.len(), expected.len());
    assert!(data.iter().zip(&expected).all(|(&got, &want)| got.abs_diff(want) <= 1));
    cleanup(&path);
}

#[test]
fn test_failed_download_writes_nothing() {
    let path = test_path("lost");
    let recorder = VideoRecorder::new();
    recorder.initialize(&path, 4, 4, 30).unwrap();

    let good = FlatSurface::new(1, 2, 3);
    recorder.write_frame(&VideoFrame::device(Vec2::new(4, 4), &good)).unwrap();
    let len = fs::metadata(&path).unwrap().len();

    let result = recorder.write_frame(&VideoFrame::device(Vec2::new(4, 4), &LostSurface));
    assert!(matches!(result, Err(RecorderError::Transfer(TransferError::Device(_)))));
    assert_eq!(recorder.frame_count(), 1);
    assert_eq!(fs::metadata(&path).unwrap().len(), len);
    assert!(recorder.is_recording());

    recorder.write_frame(&VideoFrame::device(Vec2::new(4, 4), &good)).unwrap();
    assert_eq!(recorder.frame_count(), 2);
    recorder.finalize();
    cleanup(&path);
}

#[test]
fn test_download_with_wrong_layout_is_rejected() {
    let path = test_path("mismatch");
    let recorder = VideoRecorder::new();
    recorder.initialize(&path, 4, 4, 30).unwrap();

    let shrunk = recorder.write_frame(&VideoFrame::device(Vec2::new(8, 8), &ShrinkingSurface));
    assert!(matches!(shrunk, Err(RecorderError::Transfer(TransferError::Mismatch(_)))));

    let compressed = recorder.write_frame(&VideoFrame::device(Vec2::new(8, 8), &CompressedSurface));
    assert!(matches!(compressed, Err(RecorderError::Transfer(TransferError::Mismatch(_)))));

    assert_eq!(recorder.frame_count(), 0);
    assert_eq!(recorder.context_builds(), 0);
    recorder.finalize();
    cleanup(&path);
}

#[test]
fn test_oversized_device_frame_fails_without_output() {
    let path = test_path("oversized");
    let recorder = VideoRecorder::new();
    recorder.initialize(&path, 4, 4, 30).unwrap();

    let surface = FlatSurface::new(1, 2, 3);
    for size in [Vec2::new(1 << 33, 1 << 33), Vec2::new(1 << 31, 1 << 31)] {
        let result = recorder.write_frame(&VideoFrame::device(size, &surface));
        assert!(matches!(
            result,
            Err(RecorderError::Transfer(
                TransferError::Mismatch(_) | TransferError::Allocation(_)
            ))
        ));
    }
    assert_eq!(surface.downloads.load(Ordering::Relaxed), 0);
    assert_eq!(recorder.frame_count(), 0);
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    recorder.finalize();
    cleanup(&path);
}

#[test]
fn test_host_frame_allocation_is_padded() {
    let frame = HostFrame::allocate(Vec2::new(6, 3), PixelFormat::Nv12).unwrap();
    assert_eq!(frame.plane_count(), 2);
    assert_eq!(frame.stride(0), 32);
    assert_eq!(frame.stride(1), 32);

    let planes = frame.planes();
    assert_eq!(planes[0].data.len(), 32 * 3);
    assert_eq!(planes[1].data.len(), 32 * 2);

    let view = frame.as_frame();
    assert!(!view.is_device_resident());
    assert_eq!(view.size, Vec2::new(6, 3));
    assert_eq!(view.format, PixelFormat::Nv12);
}
