use std::{
    path::{Path, PathBuf},
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
};

use anyhow::Context;

use crate::{
    encode::ffmpeg::flatten_premul_over_bg_to_opaque_rgba8,
    foundation::error::{ReelError, ReelResult},
    render::canvas::FrameRGBA,
};

/// Path of frame `idx` inside `dir`: six zero-padded digits plus `.png`.
pub fn frame_path(dir: &Path, idx: u64) -> PathBuf {
    dir.join(format!("{idx:06}.png"))
}

/// Counters reported by [`FrameWriter::finish`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Frames written successfully.
    pub written: u64,
    /// Highest number of frames in flight at once.
    pub peak_in_flight: usize,
}

#[derive(Debug, Default)]
struct State {
    in_flight: usize,
    stats: WriterStats,
    first_error: Option<String>,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<State>,
    idle: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Writes numbered PNG frames on a worker pool, keeping at most `cap` frames in flight.
///
/// [`FrameWriter::submit`] blocks the caller while the cap is reached, so frames are produced no
/// faster than they can be written. The first write failure is reported by the next `submit` or by
/// `finish`.
pub struct FrameWriter {
    dir: PathBuf,
    background: [u8; 4],
    cap: usize,
    pool: rayon::ThreadPool,
    shared: Arc<Shared>,
}

impl std::fmt::Debug for FrameWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameWriter")
            .field("dir", &self.dir)
            .field("cap", &self.cap)
            .finish_non_exhaustive()
    }
}

impl FrameWriter {
    /// Writer into `dir` (created if missing), flattening frames over `background`.
    pub fn new(dir: impl Into<PathBuf>, background: [u8; 4], cap: usize) -> ReelResult<Self> {
        if cap == 0 {
            return Err(ReelError::validation("frame writer cap must be >= 1"));
        }
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create frame directory '{}'", dir.display()))?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(cap)
            .thread_name(|i| format!("sensorreel-png-{i}"))
            .build()
            .map_err(|e| ReelError::encode(format!("failed to build rayon thread pool: {e}")))?;

        Ok(Self {
            dir,
            background,
            cap,
            pool,
            shared: Arc::new(Shared::default()),
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Maximum number of frames in flight.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Queue frame `idx` for writing, blocking while `cap` frames are already in flight.
    pub fn submit(&self, idx: u64, frame: FrameRGBA) -> ReelResult<()> {
        {
            let mut state = self.shared.lock();
            while state.in_flight >= self.cap {
                state = self
                    .shared
                    .idle
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }
            if let Some(err) = &state.first_error {
                return Err(ReelError::encode(err.clone()));
            }
            state.in_flight += 1;
            state.stats.peak_in_flight = state.stats.peak_in_flight.max(state.in_flight);
        }

        let path = frame_path(&self.dir, idx);
        let background = self.background;
        let shared = Arc::clone(&self.shared);
        self.pool.spawn(move || {
            let res = write_png(&path, &frame, background);
            let mut state = shared.lock();
            state.in_flight -= 1;
            match res {
                Ok(()) => state.stats.written += 1,
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "frame write failed");
                    state.first_error.get_or_insert_with(|| e.to_string());
                }
            }
            drop(state);
            shared.idle.notify_all();
        });
        Ok(())
    }

    /// Wait for every queued frame; fails if any write failed.
    pub fn finish(&self) -> ReelResult<WriterStats> {
        let state = self.wait_idle();
        if let Some(err) = &state.first_error {
            return Err(ReelError::encode(err.clone()));
        }
        Ok(state.stats)
    }

    fn wait_idle(&self) -> MutexGuard<'_, State> {
        let mut state = self.shared.lock();
        while state.in_flight > 0 {
            state = self
                .shared
                .idle
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        state
    }
}

impl Drop for FrameWriter {
    fn drop(&mut self) {
        drop(self.wait_idle());
    }
}

fn write_png(path: &Path, frame: &FrameRGBA, background: [u8; 4]) -> ReelResult<()> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(ReelError::encode(format!(
            "frame buffer holds {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    let mut opaque = vec![0u8; frame.data.len()];
    flatten_premul_over_bg_to_opaque_rgba8(&mut opaque, &frame.data, background)?;
    image::save_buffer_with_format(
        path,
        &opaque,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/writer.rs"]
mod tests;
