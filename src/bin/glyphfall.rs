use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use glyphfall::{
    PreviewRenderer, PreviewSettings, SamplingParams, Scene, SceneConfig, SvgTextRasterizer,
    TargetPoint,
};

#[derive(Parser, Debug)]
#[command(name = "glyphfall", version)]
struct Cli {
    /// Scene config JSON. Defaults are used for anything it leaves out.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the scene seed (also settable with GLYPHFALL_SEED).
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rasterize a message and print its sampled target points.
    Sample(SampleArgs),
    /// Simulate the scene up to a time and render that frame as a PNG.
    Frame(FrameArgs),
    /// Simulate the scene and render every frame as numbered PNGs.
    Sequence(SequenceArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Message to rasterize.
    text: String,

    /// Sampling stride in pixels (overrides the config).
    #[arg(long)]
    stride: Option<u32>,

    /// Alpha threshold a pixel must exceed (overrides the config).
    #[arg(long)]
    threshold: Option<u8>,

    /// Write the targets as JSON here instead of printing a summary.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scene time of the rendered frame, in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Simulation rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Times at which to fire the double-click action.
    #[arg(long = "trigger-at", value_delimiter = ',')]
    trigger_at: Vec<f64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    /// Number of frames to render.
    #[arg(long)]
    frames: u32,

    /// Simulation and output rate.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Times at which to fire the double-click action.
    #[arg(long = "trigger-at", value_delimiter = ',')]
    trigger_at: Vec<f64>,

    /// Output directory; frames are written as `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glyphfall=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.seed)?;
    match cli.cmd {
        Command::Sample(args) => cmd_sample(config, args),
        Command::Frame(args) => cmd_frame(config, args),
        Command::Sequence(args) => cmd_sequence(config, args),
    }
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> anyhow::Result<SceneConfig> {
    let mut config = match path {
        Some(p) => SceneConfig::from_path(p)?,
        None => SceneConfig::default(),
    };
    config.apply_env_overrides();
    if let Some(seed) = seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn cmd_sample(config: SceneConfig, args: SampleArgs) -> anyhow::Result<()> {
    let formation = &config.formation;
    let params = SamplingParams {
        stride: args.stride.unwrap_or(formation.sampling.stride),
        alpha_threshold: args.threshold.unwrap_or(formation.sampling.alpha_threshold),
        ..formation.sampling
    };

    let rasterizer = SvgTextRasterizer::with_font_dirs(&config.assets.font_dirs);
    let grid = glyphfall::MessageRasterizer::rasterize(
        &rasterizer,
        &args.text,
        formation.canvas,
        &formation.style,
    )?;
    let targets: Vec<TargetPoint> = glyphfall::sample_targets(&grid, &params)?;

    match args.out {
        Some(out) => {
            ensure_parent(&out)?;
            let f = std::fs::File::create(&out)
                .with_context(|| format!("create '{}'", out.display()))?;
            serde_json::to_writer_pretty(std::io::BufWriter::new(f), &targets)
                .context("write targets JSON")?;
            eprintln!("wrote {} targets to {}", targets.len(), out.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(
                stdout,
                "{} targets ({} covered pixels, stride {}, threshold {})",
                targets.len(),
                grid.covered(params.alpha_threshold),
                params.stride,
                params.alpha_threshold
            )?;
        }
    }
    Ok(())
}

/// Upper bound on the frames `frame` simulates before rendering.
const MAX_SIMULATED_FRAMES: f64 = u32::MAX as f64;

fn cmd_frame(config: SceneConfig, args: FrameArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "--fps must be a positive number"
    );
    anyhow::ensure!(
        args.time.is_finite() && args.time >= 0.0,
        "--time must be a non-negative number"
    );
    let frames = (args.time * args.fps).round();
    anyhow::ensure!(
        frames <= MAX_SIMULATED_FRAMES,
        "--time {} at --fps {} needs too many frames",
        args.time,
        args.fps
    );
    let frames = frames as u64;

    let mut scene = Scene::new(config)?;
    let mut renderer = PreviewRenderer::new(&scene, PreviewSettings::default())?;
    let mut triggers = Triggers::new(args.trigger_at);
    for i in 0..=frames {
        let now = (i as f64 / args.fps).min(args.time);
        step(&mut scene, &mut triggers, now)?;
    }

    let frame = renderer.render(&scene)?;
    glyphfall::write_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(config: SceneConfig, args: SequenceArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "--fps must be a positive number"
    );

    let mut scene = Scene::new(config)?;
    let mut renderer = PreviewRenderer::new(&scene, PreviewSettings::default())?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut triggers = Triggers::new(args.trigger_at);
    for i in 0..args.frames {
        let now = f64::from(i) / args.fps;
        step(&mut scene, &mut triggers, now)?;
        let frame = renderer.render(&scene)?;
        let path = args.out_dir.join(format!("frame_{i:05}.png"));
        glyphfall::write_png(&frame, &path)?;
    }
    eprintln!(
        "wrote {} frames to {}",
        args.frames,
        args.out_dir.display()
    );
    Ok(())
}

/// Pending double-click times, fired in order.
struct Triggers {
    pending: Vec<f64>,
}

impl Triggers {
    fn new(mut times: Vec<f64>) -> Self {
        times.retain(|t| t.is_finite());
        times.sort_by(|a, b| b.total_cmp(a));
        Self { pending: times }
    }

    /// Pop every trigger due at `now`.
    fn due(&mut self, now: f64) -> usize {
        let mut n = 0;
        while self.pending.last().is_some_and(|&t| t <= now) {
            self.pending.pop();
            n += 1;
        }
        n
    }
}

fn step(scene: &mut Scene, triggers: &mut Triggers, now: f64) -> anyhow::Result<()> {
    for _ in 0..triggers.due(now) {
        let outcome = scene.trigger_formation(now)?;
        tracing::info!(now, ?outcome, "trigger");
    }
    scene.tick(now)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
