use std::path::PathBuf;

use anyhow::Context;

use crate::{
    actor::{Actor, ActorId, ActorList},
    encode::{
        ffmpeg::assemble_video,
        writer::{FrameWriter, frame_path},
    },
    foundation::{
        color::Color,
        error::{ReelError, ReelResult},
        geometry::{Point, Rect},
    },
    render::{
        canvas::{Canvas, FrameRGBA, TextStyle},
        cpu::CpuCanvas,
        text::FontBook,
    },
    scene::{
        camera::Camera,
        config::{RunOpts, SceneConfig},
    },
};

/// What a [`Scene::run`] produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Ticks simulated after the initial step.
    pub ticks: u64,
    /// Frames rendered from the simulation.
    pub rendered: u64,
    /// Trailing copies of the last frame.
    pub frozen: u64,
    /// Highest number of frame writes in flight at once.
    pub peak_in_flight: usize,
    /// Directory holding the numbered frames.
    pub frame_dir: PathBuf,
}

impl RunReport {
    /// Files in the frame directory.
    pub fn total_frames(&self) -> u64 {
        self.rendered + self.frozen
    }
}

/// Owns the actor tree, the ego and the camera, and drives the tick/render loop.
///
/// Each tick steps the ego first with the viewport around its current position, recomputes the
/// viewport from the ego's new position, then steps the rest of the tree with that viewport.
/// Time is `tick * dt` whether or not the tick is rendered, so rendering a sub-range never changes
/// what the simulation computes.
///
/// A scene runs once: [`Scene::run`] and [`Scene::simulate`] both refuse a second call.
pub struct Scene {
    cfg: SceneConfig,
    root: ActorList,
    ego: Option<ActorId>,
    camera: Camera,
    tick: u64,
    time: f64,
    view: Option<Rect>,
    fonts: Option<FontBook>,
    started: bool,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.cfg.name)
            .field("actors", &self.root.len())
            .field("ego", &self.ego)
            .field("tick", &self.tick)
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Empty scene with a lock-x camera.
    pub fn new(cfg: SceneConfig) -> ReelResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            root: ActorList::new(),
            ego: None,
            camera: Camera::default(),
            tick: 0,
            time: 0.0,
            view: None,
            fonts: None,
            started: false,
        })
    }

    /// Settings.
    pub fn config(&self) -> &SceneConfig {
        &self.cfg
    }

    /// Add a top-level actor.
    pub fn add_actor<A: Actor>(&mut self, actor: A) -> ActorId {
        self.root.push(actor)
    }

    /// Add an already boxed top-level actor.
    pub fn add_boxed(&mut self, actor: Box<dyn Actor>) -> ActorId {
        self.root.push_boxed(actor)
    }

    /// Make the top-level actor `id` the ego. The camera state is cleared.
    pub fn set_ego(&mut self, id: ActorId) -> ReelResult<()> {
        if !self.root.iter().any(|a| a.id() == id) {
            return Err(ReelError::validation(format!(
                "ego {id} must be a top-level actor of the scene"
            )));
        }
        self.ego = Some(id);
        self.root.hold_out(Some(id));
        self.camera.reset();
        self.view = None;
        Ok(())
    }

    /// Current ego.
    pub fn ego(&self) -> Option<ActorId> {
        self.ego
    }

    /// Camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Camera, mutably. Changing it does not reset the ego.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Use `fonts` for text instead of loading them at run time.
    pub fn set_fonts(&mut self, fonts: FontBook) {
        self.fonts = Some(fonts);
    }

    /// Root of the actor tree.
    pub fn root(&self) -> &ActorList {
        &self.root
    }

    /// Depth-first lookup.
    pub fn find(&self, id: ActorId) -> Option<&(dyn Actor + 'static)> {
        self.root.find(id)
    }

    /// Depth-first lookup, mutably.
    pub fn find_mut(&mut self, id: ActorId) -> Option<&mut (dyn Actor + 'static)> {
        self.root.find_mut(id)
    }

    /// Ticks stepped since the initial step.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated time of the last step.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Viewport of the last step.
    pub fn view(&self) -> Option<Rect> {
        self.view
    }

    fn step_at(&mut self, time: f64) -> ReelResult<()> {
        let ego_id = self
            .ego
            .ok_or_else(|| ReelError::uninitialized("scene has no ego"))?;
        let ego = self
            .root
            .find_mut(ego_id)
            .ok_or_else(|| ReelError::uninitialized(format!("ego {ego_id} left the scene")))?;

        let previous = self.camera.view(ego)?;
        ego.step(time, previous)?;
        let view = self.camera.view(ego)?;

        (&mut self.root as &mut dyn Actor).step(time, view)?;
        self.time = time;
        self.view = Some(view);
        Ok(())
    }

    /// Advance one tick.
    pub fn step_tick(&mut self) -> ReelResult<()> {
        self.tick += 1;
        let time = self.tick as f64 * self.cfg.dt();
        self.step_at(time)
    }

    fn begin(&mut self) -> ReelResult<()> {
        if self.started {
            return Err(ReelError::validation(format!(
                "scene '{}' has already run",
                self.cfg.name
            )));
        }
        self.started = true;
        self.step_at(0.0)
    }

    /// Run the whole simulation without rendering anything.
    pub fn simulate(&mut self) -> ReelResult<()> {
        self.begin()?;
        for _ in 0..self.cfg.total_ticks() {
            self.step_tick()?;
        }
        Ok(())
    }

    /// Paint the tree at the current viewport.
    pub fn render_frame(&mut self) -> ReelResult<FrameRGBA> {
        let view = self
            .view
            .ok_or_else(|| ReelError::uninitialized("scene has not been stepped yet"))?;
        let mut canvas =
            CpuCanvas::new(self.cfg.width, self.cfg.height, view, self.fonts.as_mut())?;
        (&self.root as &dyn Actor).plot(&mut canvas)?;
        if self.cfg.debug {
            let at = Point::new(view.center().x - 1.0, view.righttop.y - 0.8);
            let style = TextStyle {
                color: Color::BLACK,
                size: 28.0,
                ..TextStyle::default()
            };
            canvas.text(at, &format!("{:.1} s", self.time), &style)?;
        }
        Ok(canvas.finish())
    }

    fn load_fonts(&mut self) -> ReelResult<()> {
        if self.fonts.is_some() {
            return Ok(());
        }
        if let Some(path) = &self.cfg.font_path {
            self.fonts = Some(FontBook::from_path(path)?);
            return Ok(());
        }
        match FontBook::system_sans() {
            Ok(fonts) => self.fonts = Some(fonts),
            Err(err) => tracing::warn!(%err, "no system font found; text will be skipped"),
        }
        Ok(())
    }

    /// Simulate every tick, rendering the ticks inside the window of `opts` into
    /// `<out_root>/<name>/`, then append the freeze frames.
    ///
    /// The frame directory is recreated empty. Frames are numbered from 0 without gaps. Returns
    /// once every frame is on disk.
    #[tracing::instrument(skip_all, fields(scene = %self.cfg.name))]
    pub fn run(&mut self, opts: &RunOpts) -> ReelResult<RunReport> {
        let total = self.cfg.total_ticks();
        let (start, end) = opts.tick_range(self.cfg.fps, total)?;
        let freeze = opts.freeze_frames(self.cfg.fps)?;
        self.load_fonts()?;
        // frames of an earlier run survive a refused start
        self.begin()?;

        let dir = self.cfg.frame_dir();
        if dir.exists() {
            std::fs::remove_dir_all(&dir)
                .with_context(|| format!("failed to clear frame directory '{}'", dir.display()))?;
        }
        let writer = FrameWriter::new(
            &dir,
            self.cfg.background.to_rgba8(),
            self.cfg.max_in_flight,
        )?;

        tracing::info!(total, start, end, freeze, "run started");
        let mut next = 0u64;
        for i in 0..total {
            if (start..end).contains(&i) {
                if i == start {
                    tracing::debug!(tick = i, time = self.time, "rendering window opened");
                }
                let frame = self.render_frame()?;
                writer.submit(next, frame)?;
                next += 1;
            }
            self.step_tick()?;
        }
        let stats = writer.finish()?;
        tracing::debug!(tick = self.tick, time = self.time, "rendering window closed");

        let mut frozen = 0;
        if freeze > 0 {
            if next == 0 {
                tracing::warn!("freeze requested but no frame was rendered");
            } else {
                let last = frame_path(&dir, next - 1);
                for k in 0..freeze {
                    let target = frame_path(&dir, next + k);
                    std::fs::copy(&last, &target).with_context(|| {
                        format!("failed to copy '{}' to '{}'", last.display(), target.display())
                    })?;
                }
                frozen = freeze;
            }
        }

        let report = RunReport {
            ticks: self.tick,
            rendered: stats.written,
            frozen,
            peak_in_flight: stats.peak_in_flight,
            frame_dir: dir,
        };
        tracing::info!(
            rendered = report.rendered,
            frozen = report.frozen,
            peak_in_flight = report.peak_in_flight,
            "run finished"
        );
        Ok(report)
    }

    /// Assemble `<out_root>/<name>.mp4` from the frame directory. Requires `ffmpeg` on `PATH`.
    #[tracing::instrument(skip_all, fields(scene = %self.cfg.name))]
    pub fn to_video(&self) -> ReelResult<PathBuf> {
        let out = self.cfg.video_path();
        assemble_video(&self.cfg.frame_dir(), self.cfg.fps, &out)?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/driver.rs"]
mod tests;
