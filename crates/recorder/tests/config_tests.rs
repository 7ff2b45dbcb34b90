use {
    base::Vec2,
    recorder::{RecorderConfig, RecorderError, VideoRecorder},
    std::{fs, path::Path},
};

#[test]
fn test_defaults() {
    let config = RecorderConfig::default();
    assert_eq!(config.output_dir(), Path::new("recordings"));
    assert_eq!(config.stem(), "capture");
    assert_eq!(config.size(), Vec2::new(1920, 1080));
    assert_eq!(config.fps(), 60);
}

#[test]
fn test_builder() {
    let config = RecorderConfig::default()
        .with_output_dir("/var/tmp/rec")
        .with_stem("cam0")
        .with_width(640)
        .with_height(360)
        .with_fps(15);
    assert_eq!((config.width(), config.height(), config.fps()), (640, 360, 15));

    let path = config.timestamped_path();
    assert_eq!(path.parent(), Some(Path::new("/var/tmp/rec")));
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("cam0-"));
    assert!(name.ends_with(".yuv"));
    // cam0-YYYY-MM-DDTHH-MM-SS.yuv
    assert_eq!(name.len(), "cam0-".len() + 19 + ".yuv".len());
    assert!(!name.contains(':'));
}

#[test]
fn test_initialize_with_config() {
    let dir = std::env::temp_dir().join(format!("recorder-config-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let config = RecorderConfig::default()
        .with_output_dir(&dir)
        .with_width(8)
        .with_height(8)
        .with_fps(5);

    let recorder = VideoRecorder::new();
    let path = recorder.initialize_with(&config).unwrap();
    assert!(path.starts_with(&dir));
    assert_eq!(recorder.output_path(), Some(path.clone()));
    assert_eq!(recorder.size(), Vec2::new(8, 8));
    assert!(path.exists());

    recorder.finalize();
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_initialize_with_invalid_config() {
    let config = RecorderConfig::default().with_fps(0);
    let recorder = VideoRecorder::new();
    assert!(matches!(
        recorder.initialize_with(&config),
        Err(RecorderError::InvalidConfig(_))
    ));
}
