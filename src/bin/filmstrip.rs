use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "filmstrip", version)]
struct Cli {
    /// Log player activity to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a manifest listing the frame images of a directory in natural order.
    Manifest(ManifestArgs),
    /// Play a sequence headlessly up to a scroll position and save the displayed frame as a PNG.
    Scrub(ScrubArgs),
}

#[derive(Parser, Debug)]
struct ManifestArgs {
    /// Directory holding the frame images.
    #[arg(long)]
    dir: PathBuf,

    /// Output manifest path (defaults to `<dir>/manifest.json`).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    /// Directory the manifest and frames are served from.
    #[arg(long)]
    root: PathBuf,

    /// Scroll progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Player options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum animation frames to play before capturing.
    #[arg(long, default_value_t = 600)]
    ticks: usize,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 800.0)]
    viewport: f64,

    /// Container height beyond the viewport, in viewports.
    #[arg(long, default_value_t = 2.0)]
    scrub_factor: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Manifest(args) => cmd_manifest(args),
        Command::Scrub(args) => cmd_scrub(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_manifest(args: ManifestArgs) -> anyhow::Result<()> {
    let manifest = filmstrip::manifest::generate::scan_frames_dir(&args.dir)?;
    let out = args.out.unwrap_or_else(|| args.dir.join("manifest.json"));
    filmstrip::manifest::generate::write_manifest(&manifest, &out)?;
    eprintln!("wrote {} ({} frames)", out.display(), manifest.len());
    Ok(())
}

fn cmd_scrub(args: ScrubArgs) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&args.progress) {
        anyhow::bail!("--progress must be in [0, 1], got {}", args.progress);
    }
    let opts = match &args.config {
        Some(path) => filmstrip::PlayerOpts::from_path(path)?,
        None => filmstrip::PlayerOpts::default(),
    };

    let spawner = filmstrip::QueuedSpawner::new();
    let frames = filmstrip::QueuedFrames::new();
    let surface = filmstrip::RecordingSurface::new();
    let geometry = filmstrip::SharedGeometry::new(filmstrip::ScrollGeometry::at_progress(
        args.viewport,
        args.scrub_factor,
        args.progress,
    ));
    let host = filmstrip::PlayerHost {
        container: Box::new(geometry),
        scheduler: Box::new(frames.clone()),
        surface: Box::new(surface.clone()),
    };
    let player = filmstrip::ScrollPlayer::new(
        opts,
        Arc::new(filmstrip::FsSource::new(&args.root)),
        Arc::new(spawner.clone()),
        host,
    )?;

    player.mount()?;
    spawner.run_until_idle();
    let manifest = player
        .manifest()
        .with_context(|| format!("no playable manifest under '{}'", args.root.display()))?;

    player.set_visible(true);
    let mut now_ms = 0.0;
    for _ in 0..args.ticks {
        if frames.take_pending().is_none() {
            break;
        }
        spawner.run_until_idle();
        now_ms += 1000.0 / 60.0;
        player.on_frame(now_ms);
    }
    player.unmount();

    let (index, frame) = surface
        .current_frame()
        .context("no frame was displayed (all frame loads failed?)")?;
    let mut img = frame
        .decode_rgba8()
        .with_context(|| format!("decode frame {index}"))?;
    surface.style().unwrap_or_default().apply_rgba8(&mut img);

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    let progress = player.progress();
    eprintln!(
        "wrote {} (frame {}/{}, progress {:.4})",
        args.out.display(),
        index,
        manifest.len(),
        progress.current
    );
    Ok(())
}
