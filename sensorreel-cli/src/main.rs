use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sensorreel::{RunOpts, SceneConfig};
use tracing_subscriber::EnvFilter;

mod scenes;

use scenes::Demo;

#[derive(Parser, Debug)]
#[command(name = "sensorreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a demo scene to numbered PNG frames and, optionally, an MP4.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Demo scene to render.
    #[arg(long, value_enum)]
    scene: Demo,

    /// Scene config JSON; flags below override it. Its name and duration are replaced by the
    /// demo's own.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root output directory.
    #[arg(long)]
    out_root: Option<PathBuf>,

    /// Frames per simulated second.
    #[arg(long)]
    fps: Option<u32>,

    /// First rendered second.
    #[arg(long, default_value_t = 0.0)]
    start: f64,

    /// End of the rendered range in seconds (defaults to the scene end).
    #[arg(long)]
    end: Option<f64>,

    /// Seconds to hold the last frame (defaults per scene).
    #[arg(long)]
    freeze: Option<f64>,

    /// Paint the current time on every frame.
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Keep the frames but skip ffmpeg.
    #[arg(long, default_value_t = false)]
    no_video: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn scene_config(args: &RenderArgs) -> anyhow::Result<SceneConfig> {
    let mut cfg = match &args.config {
        Some(path) => SceneConfig::from_json_path(path)
            .with_context(|| format!("load scene config '{}'", path.display()))?,
        None => SceneConfig::default(),
    };
    if let Some(out_root) = &args.out_root {
        cfg.out_root.clone_from(out_root);
    }
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    cfg.debug |= args.debug;
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = scene_config(&args)?;
    let mut scene = args.scene.build(cfg)?;

    let opts = RunOpts {
        start_time: Some(args.start),
        end_time: args.end,
        freeze_secs: Some(args.freeze.unwrap_or(args.scene.default_freeze())),
    };
    let report = scene.run(&opts)?;
    eprintln!(
        "wrote {} frames to {}",
        report.total_frames(),
        report.frame_dir.display()
    );

    if !args.no_video {
        let video = scene.to_video()?;
        eprintln!("wrote {}", video.display());
    }
    Ok(())
}
