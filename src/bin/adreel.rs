use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "adreel", version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a composition.
    Validate(ValidateArgs),
    /// List scenes active at a frame with their local frames.
    Scenes(ScenesArgs),
    /// Resolve a single frame to JSON.
    Frame(FrameArgs),
    /// Resolve a frame range to JSON lines.
    Eval(EvalArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ScenesArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Global frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Global frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON-lines path.
    #[arg(long)]
    out: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// End frame (exclusive); defaults to the composition duration.
    #[arg(long)]
    end: Option<u64>,

    /// Evaluate chunks in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for parallel evaluation.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Scenes(args) => cmd_scenes(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Eval(args) => cmd_eval(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_comp_json(path: &Path) -> anyhow::Result<adreel::Composition> {
    let f = File::open(path).with_context(|| format!("open composition '{}'", path.display()))?;
    let comp = adreel::Composition::from_reader(BufReader::new(f))
        .with_context(|| format!("load composition '{}'", path.display()))?;
    Ok(comp)
}

fn create_out(path: &Path) -> anyhow::Result<BufWriter<File>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(BufWriter::new(f))
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let comp = read_comp_json(&args.in_path)?;
    println!(
        "ok: {} scenes, {} frames at {}/{} fps, {}x{}",
        comp.scenes.len(),
        comp.duration_frames(),
        comp.fps.num,
        comp.fps.den,
        comp.canvas.width,
        comp.canvas.height
    );
    Ok(())
}

fn cmd_scenes(args: ScenesArgs) -> anyhow::Result<()> {
    let comp = read_comp_json(&args.in_path)?;
    let frame = adreel::FrameIndex(args.frame);
    for active in comp.resolve_active_scenes(frame) {
        let phase = active.scene.phase(active.local_frame);
        println!("{}\t{}\t{:?}", active.scene.id, active.local_frame, phase);
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = read_comp_json(&args.in_path)?;
    let state = adreel::Evaluator::eval_frame(&comp, adreel::FrameIndex(args.frame))?;

    match &args.out {
        Some(path) => {
            let mut w = create_out(path)?;
            serde_json::to_writer_pretty(&mut w, &state).context("serialize frame state")?;
            w.flush()
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, &state).context("serialize frame state")?;
            writeln!(lock).context("write stdout")?;
        }
    }
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let comp = read_comp_json(&args.in_path)?;
    let end = args.end.unwrap_or_else(|| comp.duration_frames());
    let range = adreel::FrameRange::new(adreel::FrameIndex(args.start), adreel::FrameIndex(end))?;
    let threading = adreel::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };

    let mut sink = adreel::JsonLinesSink::new(create_out(&args.out)?);
    let stats = adreel::evaluate_into(&comp, range, &threading, &mut sink)?;
    tracing::info!(
        frames = stats.frames_total,
        static_frames = stats.frames_static,
        particles = stats.particles_total,
        "evaluation finished"
    );
    eprintln!("wrote {} frames to {}", sink.written(), args.out.display());
    Ok(())
}
