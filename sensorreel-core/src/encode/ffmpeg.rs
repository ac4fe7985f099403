use std::{
    ffi::OsString,
    path::Path,
    process::{Command, Stdio},
};

use crate::foundation::error::{ReelError, ReelResult};

/// Printf-style name of the numbered frame files ffmpeg reads.
pub const FRAME_PATTERN: &str = "%06d.png";

/// Arguments for turning `frame_dir/%06d.png` into an H.264 MP4 at `out`.
pub fn ffmpeg_args(fps: u32, frame_dir: &Path, out: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-y".into(),
        "-framerate".into(),
        fps.to_string().into(),
        "-i".into(),
        frame_dir.join(FRAME_PATTERN).into_os_string(),
    ];
    // yuv420p for broad player compatibility
    args.extend(
        [
            "-c:v",
            "libx264",
            "-profile:v",
            "high",
            "-crf",
            "20",
            "-pix_fmt",
            "yuv420p",
            "-hide_banner",
            "-loglevel",
            "error",
        ]
        .map(OsString::from),
    );
    args.push(out.as_os_str().to_owned());
    args
}

/// Run the system `ffmpeg` over the numbered PNGs in `frame_dir`.
#[tracing::instrument(skip_all, fields(dir = %frame_dir.display(), out = %out.display()))]
pub fn assemble_video(frame_dir: &Path, fps: u32, out: &Path) -> ReelResult<()> {
    if fps == 0 {
        return Err(ReelError::validation("fps must be non-zero"));
    }
    ensure_parent_dir(out)?;
    if !is_ffmpeg_on_path() {
        return Err(ReelError::encode(
            "ffmpeg is required for MP4 assembly, but was not found on PATH",
        ));
    }

    let output = Command::new("ffmpeg")
        .args(ffmpeg_args(fps, frame_dir, out))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            ReelError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReelError::encode(format!(
            "ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    tracing::info!("video assembled");
    Ok(())
}

/// Composite premultiplied RGBA8 over an opaque background color.
pub(crate) fn flatten_premul_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src_premul: &[u8],
    bg_rgba: [u8; 4],
) -> ReelResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(ReelError::validation(
            "flatten_premul_over_bg_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = u16::from(bg_rgba[0]);
    let bg_g = u16::from(bg_rgba[1]);
    let bg_b = u16::from(bg_rgba[2]);

    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255 - a;
        d[0] = (u16::from(s[0]) + mul_div255(bg_r, inv)).min(255) as u8;
        d[1] = (u16::from(s[1]) + mul_div255(bg_g, inv)).min(255) as u8;
        d[2] = (u16::from(s[2]) + mul_div255(bg_b, inv)).min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
