use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use panoview::{
    CpuRenderer, DeviceProbe, EquirectFrame, HeadlessControls, ManualScheduler, PanoError, Pose,
    SimulatedHmd, StillVideo, SurfaceSize, UiAction, VideoSource, Viewer, ViewerConfig,
    ViewerParts,
};

/// Video size used by `simulate`, which has no input image.
const SIMULATED_VIDEO: SurfaceSize = SurfaceSize {
    width: 640,
    height: 320,
};

#[derive(Parser, Debug)]
#[command(name = "panoview", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one view of an equirectangular image as a PNG.
    Frame(FrameArgs),
    /// Run the animation loop against a simulated headset and print frame statistics.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input equirectangular image (PNG or JPEG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Render side-by-side stereo as if presenting to the headset.
    #[arg(long)]
    stereo: bool,

    /// Head pose JSON (`{"orientation": [x, y, z, w], "position": [x, y, z]}`).
    #[arg(long)]
    pose: Option<PathBuf>,

    /// Viewer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width; defaults to the image width.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Surface height; defaults to the image height.
    #[arg(long, requires = "width")]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Number of refresh callbacks to run.
    #[arg(long)]
    frames: u64,

    #[arg(long)]
    stereo: bool,

    /// Head yaw added on every pose query, in degrees.
    #[arg(long = "yaw-step-deg", default_value_t = 1.0)]
    yaw_step_deg: f32,

    /// Viewer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

type CliViewer = Viewer<CpuRenderer, SimulatedHmd, StillVideo, HeadlessControls, ManualScheduler>;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PANOVIEW_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<ViewerConfig> {
    let Some(path) = path else {
        return Ok(ViewerConfig::default());
    };
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let config = ViewerConfig::from_json_reader(BufReader::new(f))
        .with_context(|| format!("load config '{}'", path.display()))?;
    Ok(config)
}

fn read_pose(path: &Path) -> anyhow::Result<Pose> {
    let f = File::open(path).with_context(|| format!("open pose '{}'", path.display()))?;
    let pose: Pose =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse pose JSON")?;
    Ok(pose)
}

fn build_viewer(
    config: ViewerConfig,
    device: SimulatedHmd,
    video: StillVideo,
) -> anyhow::Result<CliViewer> {
    let renderer = CpuRenderer::new(video.dimensions(), config.clear_rgba);
    let viewer = Viewer::new(
        config,
        ViewerParts {
            renderer,
            device: DeviceProbe::Available(device),
            video,
            controls: HeadlessControls::new(),
            scheduler: ManualScheduler::new(),
        },
    )?;
    Ok(viewer)
}

fn enter_stereo(viewer: &mut CliViewer) -> anyhow::Result<()> {
    viewer.handle_action(UiAction::EnterPresentation);
    if !viewer.presentation_state().is_presenting() {
        return Err(PanoError::capability("simulated headset refused to present").into());
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let equirect = EquirectFrame::open(&args.in_path)?;

    let size = match (args.width, args.height) {
        (Some(w), Some(h)) => SurfaceSize::new(w, h),
        _ => SurfaceSize::new(equirect.width, equirect.height),
    };
    if size.width == 0 || size.height == 0 {
        anyhow::bail!("surface width/height must be non-zero");
    }

    let mut device = SimulatedHmd::default();
    if let Some(path) = args.pose.as_deref() {
        device = device.hold_pose(read_pose(path)?);
    }

    let mut viewer = build_viewer(config, device, StillVideo::new(size))?;
    viewer.renderer_mut().set_video_frame(equirect);
    if args.stereo {
        enter_stereo(&mut viewer)?;
    }

    let kind = viewer.render_frame();
    tracing::info!(?kind, size = ?viewer.surface_size(), "frame rendered");

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    viewer.renderer().write_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let device = SimulatedHmd::default().with_yaw_step_degrees(args.yaw_step_deg);

    let mut viewer = build_viewer(config, device, StillVideo::new(SIMULATED_VIDEO))?;
    if args.stereo {
        enter_stereo(&mut viewer)?;
    }

    if args.frames > 0 {
        viewer.start_animation();
        for _ in 1..args.frames {
            if !viewer.scheduler_mut().fire() {
                break;
            }
            viewer.on_animation_frame();
        }
        viewer.stop_animation();
    }

    let stats = viewer.stats();
    println!(
        "{}",
        serde_json::to_string_pretty(&stats).with_context(|| "serialize frame stats")?
    );
    Ok(())
}
