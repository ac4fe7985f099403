//! sensorreel is a deterministic, frame-by-frame animation runtime for explainer videos about
//! sensor-fusion attacks on vehicle localization.
//!
//! A [`Scene`] owns a tree of [`Actor`]s rooted in an [`ActorList`]. Every tick the scene advances
//! the simulated clock by a fixed step, moves the ego vehicle, lets the [`Camera`] compute the
//! viewport around it, and steps the rest of the tree with that `(time, view)`. Each actor runs its
//! own update and then its attached [`Callback`]s, which drive visibility, opacity, color, text and
//! scale over time windows.
//!
//! # Pipeline overview
//!
//! 1. **Step**: `Scene` ticks the ego, the camera and the tree (single thread, strict order)
//! 2. **Paint**: the tree paints itself in priority order into a [`Canvas`] (`CpuCanvas` on
//!    `vello_cpu`)
//! 3. **Write**: frames are flattened over the background and written as numbered PNGs by a
//!    bounded worker pool ([`FrameWriter`])
//! 4. **Encode** (optional): the system `ffmpeg` assembles the numbered frames into an MP4
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: time is `tick * dt`, noise is seeded, and rendering a sub-range of ticks
//!   never changes simulation state.
//! - **Explicit canvas**: painting receives a `&mut dyn Canvas`; there is no ambient drawing state.
//! - **Premultiplied RGBA8** out of the renderer; the writer flattens over the scene background.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod actor;
mod animation;
mod assets;
mod content;
mod encode;
mod foundation;
mod render;
mod scene;

pub use actor::feed::Feed;
pub use actor::{Actor, ActorCore, ActorId, ActorList, ColorTarget, DEFAULT_PRIORITY};
pub use animation::callback::{
    Action, Callback, CallbackKind, DEFAULT_FADE, FadeInOut, REVEAL_MARKER, Recolor,
};
pub use animation::period::Period;
pub use animation::ramp::ColorRamp;
pub use assets::decode::{decode_image, parse_svg, rasterize_svg};
pub use assets::texture::{SVG_RASTER_SCALE, Texture};
pub use content::Placement;
pub use content::controller::{ConstantVelocity, Controller, PidController};
pub use content::diagram::{ARROW_HALF_WIDTH, ARROW_LENGTH, Mux, PolyLine};
pub use content::road::{ROAD_PRIORITY, Road};
pub use content::sprite::{SPRITE_PRIORITY, Sprite};
pub use content::text::{
    ANNOTATION_PRIORITY, Legend, TYPING_SECONDS_PER_TOKEN, Text, TextEntry, TextList,
};
pub use content::trajectory::{
    DEFAULT_ANIMATION_TIME, DEFAULT_SAMPLE_PERIOD, DriftAttack, FRESH_MARKER_BOOST, Sample,
    Sampler, Trajectory, lane_detection,
};
pub use content::vehicle::{MAX_SPEED, VEHICLE_PRIORITY, VEHICLE_SIZE, Vehicle};
pub use encode::ffmpeg::{
    FRAME_PATTERN, assemble_video, ensure_parent_dir, ffmpeg_args, is_ffmpeg_on_path,
};
pub use encode::writer::{FrameWriter, WriterStats, frame_path};
pub use foundation::color::Color;
pub use foundation::error::{ReelError, ReelResult};
pub use foundation::geometry::{Line, Point, Rect};
pub use render::canvas::{
    Canvas, DrawCall, FrameRGBA, LinePattern, LineStyle, MarkerShape, MarkerStyle,
    RecordingCanvas, TextStyle,
};
pub use render::cpu::CpuCanvas;
pub use render::text::{FontBook, TextBrush};
pub use scene::camera::{Camera, CameraPolicy, DEFAULT_EGO_OFFSET, DEFAULT_VIEW_SIZE};
pub use scene::config::{DEFAULT_MAX_IN_FLIGHT, RunOpts, SceneConfig};
pub use scene::driver::{RunReport, Scene};
