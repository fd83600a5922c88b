use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use serpentine::{
    AnimationClock, Backdrop, BackdropParams, CpuRenderer, RenderSettings, render_ticks,
    scene_to_svg,
};

#[derive(Parser, Debug)]
#[command(name = "serpentine", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the backdrop as an SVG document.
    Svg(SvgArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a run of consecutive ticks as numbered PNGs.
    Sequence(SequenceArgs),
}

#[derive(Parser, Debug)]
struct SvgArgs {
    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Clock ticks to advance before composing (one tick = 50 ms).
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Emit the static pre-hydration snapshot (no particles, no motion).
    #[arg(long)]
    pre_hydration: bool,

    /// Optional backdrop parameters JSON.
    #[arg(long)]
    params: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Clock ticks to advance before composing (one tick = 50 ms).
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Output raster width in pixels.
    #[arg(long, default_value_t = 1440)]
    width: u32,

    /// Output raster height in pixels.
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Render the static pre-hydration snapshot.
    #[arg(long)]
    pre_hydration: bool,

    /// Optional backdrop parameters JSON.
    #[arg(long)]
    params: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of consecutive ticks to render.
    #[arg(long)]
    ticks: u64,

    /// Output raster width in pixels.
    #[arg(long, default_value_t = 1440)]
    width: u32,

    /// Output raster height in pixels.
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Optional backdrop parameters JSON.
    #[arg(long)]
    params: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Svg(args) => cmd_svg(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
    }
}

fn read_params(path: Option<&Path>) -> anyhow::Result<BackdropParams> {
    let Some(path) = path else {
        return Ok(BackdropParams::default());
    };
    let f = File::open(path).with_context(|| format!("open params '{}'", path.display()))?;
    let r = BufReader::new(f);
    let params: BackdropParams =
        serde_json::from_reader(r).with_context(|| "parse params JSON")?;
    Ok(params)
}

fn make_backdrop(params: BackdropParams, pre_hydration: bool) -> anyhow::Result<Backdrop> {
    let mut backdrop = Backdrop::new(params)?;
    if !pre_hydration {
        backdrop.hydrate();
    }
    Ok(backdrop)
}

fn clock_after(ticks: u64) -> AnimationClock {
    let mut clock = AnimationClock::new();
    for _ in 0..ticks {
        clock.tick();
    }
    clock
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let params = read_params(args.params.as_deref())?;
    let backdrop = make_backdrop(params, args.pre_hydration)?;
    let scene = backdrop.scene(clock_after(args.ticks));

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, scene_to_svg(&scene))
        .with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let params = read_params(args.params.as_deref())?;
    let backdrop = make_backdrop(params, args.pre_hydration)?;
    let scene = backdrop.scene(clock_after(args.ticks));

    let mut renderer = CpuRenderer::new(RenderSettings {
        width: args.width,
        height: args.height,
    })?;
    let frame = renderer.render(&scene)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let params = read_params(args.params.as_deref())?;
    let backdrop = make_backdrop(params, false)?;

    let frames = render_ticks(
        &backdrop,
        args.ticks,
        RenderSettings {
            width: args.width,
            height: args.height,
        },
    )?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for (k, frame) in frames.iter().enumerate() {
        let path = args.out_dir.join(format!("frame_{k:04}.png"));
        image::save_buffer_with_format(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
    }

    eprintln!("wrote {} frames to {}", frames.len(), args.out_dir.display());
    Ok(())
}
