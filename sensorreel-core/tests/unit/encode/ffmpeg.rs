use super::*;

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_premul_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_half_black_over_white_is_mid_grey() {
    let src = vec![0u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [255, 255, 255, 255]).unwrap();
    assert_eq!(dst, vec![127, 127, 127, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &[0; 4], [0, 0, 0, 255]).is_err());
}

#[test]
fn ffmpeg_args_read_numbered_frames_and_write_h264() {
    let args = ffmpeg_args(30, Path::new("out/fusion"), Path::new("out/fusion.mp4"));
    let args: Vec<String> = args
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    let input = Path::new("out/fusion")
        .join("%06d.png")
        .to_string_lossy()
        .into_owned();
    assert_eq!(&args[..5], &["-y", "-framerate", "30", "-i", input.as_str()]);
    let pair = |flag: &str| {
        let i = args.iter().position(|a| a == flag).unwrap();
        args[i + 1].clone()
    };
    assert_eq!(pair("-c:v"), "libx264");
    assert_eq!(pair("-profile:v"), "high");
    assert_eq!(pair("-crf"), "20");
    assert_eq!(pair("-pix_fmt"), "yuv420p");
    assert_eq!(pair("-loglevel"), "error");
    assert_eq!(args.last().unwrap(), "out/fusion.mp4");
}

#[test]
fn ensure_parent_dir_creates_missing_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("a/b/video.mp4");
    ensure_parent_dir(&out).unwrap();
    assert!(tmp.path().join("a/b").is_dir());
}

#[test]
fn assemble_video_rejects_zero_fps() {
    let tmp = tempfile::tempdir().unwrap();
    let err = assemble_video(tmp.path(), 0, &tmp.path().join("x.mp4")).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}
