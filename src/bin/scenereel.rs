use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scenereel", version, about = "Inspect scene timelines and crossfades")]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the scenes visible at one frame as JSON.
    Frame(FrameArgs),
    /// Print every scene window and crossfade overlap.
    Windows(WindowsArgs),
    /// Print per-frame scene opacities over a frame range.
    Scan(ScanArgs),
    /// Write a built-in composition as JSON.
    Preset(PresetArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct WindowsArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ScanArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive); defaults to the composition duration.
    #[arg(long)]
    end: Option<u64>,

    /// Evaluate frames on a rayon pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct PresetArgs {
    /// Preset id, e.g. IceCubePromo.
    name: String,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    scenereel::init_logging(cli.verbose);

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Windows(args) => cmd_windows(args),
        Command::Scan(args) => cmd_scan(args),
        Command::Preset(args) => cmd_preset(args),
    }
}

fn read_comp_json(path: &Path) -> anyhow::Result<scenereel::Composition> {
    scenereel::Composition::load(path)
        .with_context(|| format!("load composition '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = read_comp_json(&args.in_path)?;
    let frame = scenereel::FrameIndex(args.frame);
    if frame.0 >= comp.duration.0 {
        tracing::warn!(
            frame = frame.0,
            duration = comp.duration.0,
            "frame is past the composition duration"
        );
    }

    let out = scenereel::FrameScenes {
        frame,
        scenes: comp.active_scenes(frame),
    };
    let json = serde_json::to_string_pretty(&out).context("serialize active scenes")?;
    println!("{json}");
    Ok(())
}

fn cmd_windows(args: WindowsArgs) -> anyhow::Result<()> {
    let comp = read_comp_json(&args.in_path)?;
    let timeline = &comp.timeline;

    let mut stdout = std::io::stdout().lock();
    writeln!(
        stdout,
        "{}: {} frames @ {} fps, {} scenes",
        comp.id,
        comp.duration.0,
        comp.fps.as_f64(),
        timeline.len()
    )?;
    for (i, scene) in timeline.scenes.iter().enumerate() {
        let window = scene.window();
        writeln!(
            stdout,
            "  [{i}] {:<16} {:>5}..{:<5} fade_in={} fade_out={}",
            scene.name, window.start.0, window.end.0, scene.fade_in, scene.fade_out
        )?;
    }
    for xf in timeline.overlaps() {
        writeln!(
            stdout,
            "  crossfade {} -> {}: {}..{} ({} frames)",
            timeline.scenes[xf.outgoing].name,
            timeline.scenes[xf.incoming].name,
            xf.range.start.0,
            xf.range.end.0,
            xf.range.len_frames()
        )?;
    }
    Ok(())
}

fn cmd_scan(args: ScanArgs) -> anyhow::Result<()> {
    let comp = read_comp_json(&args.in_path)?;
    let end = args.end.unwrap_or(comp.duration.0);
    let range = scenereel::FrameRange::new(
        scenereel::FrameIndex(args.start),
        scenereel::FrameIndex(end),
    )?;

    let frames = if args.parallel {
        scenereel::evaluate_frames_parallel(&comp.timeline, range, args.threads)?
    } else {
        scenereel::evaluate_frames(&comp.timeline, range)
    };

    let mut stdout = std::io::stdout().lock();
    for fs in frames {
        let layers = fs
            .scenes
            .iter()
            .map(|a| format!("{}@{:.3}", a.scene.name, a.opacity))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(stdout, "{:>6} {layers}", fs.frame.0)?;
    }
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let comp = scenereel::presets::preset(&args.name)?;
    let json = comp.to_json_pretty()?;

    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&path, json)
                .with_context(|| format!("write preset '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
