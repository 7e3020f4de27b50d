use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lumina", version, about = "LED suit choreography compiler")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a starter project (five suits, two sample cues).
    Init(InitArgs),
    /// Compile a project JSON into a playback artifact.
    Compile(CompileArgs),
    /// Recover the project JSON embedded in an artifact.
    Import(ImportArgs),
    /// Print the resolved color of every LED of one suit at one instant.
    Frame(FrameArgs),
    /// Print the overlap lane of every cue on one suit.
    Lanes(LanesArgs),
    /// Dump the built-in channel layout as JSON.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct InitArgs {
    /// Output project JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Write the default suits without sample cues.
    #[arg(long, default_value_t = false)]
    empty: bool,
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output artifact path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the packed little-endian event stream here.
    #[arg(long)]
    binary: Option<PathBuf>,

    /// Channel layout JSON (defaults to the built-in 541-LED layout).
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Sampling period in milliseconds.
    #[arg(long, default_value_t = lumina::SAMPLE_STEP_MS)]
    step_ms: u32,

    /// Resolve samples in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Samples per parallel batch.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct ImportArgs {
    /// Input artifact.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output project JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Suit id.
    #[arg(long)]
    suit: u8,

    /// Time in milliseconds.
    #[arg(long)]
    time: f64,

    /// Channel layout JSON (defaults to the built-in 541-LED layout).
    #[arg(long)]
    layout: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LanesArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Suit id.
    #[arg(long)]
    suit: u8,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Init(args) => cmd_init(args),
        Command::Compile(args) => cmd_compile(args),
        Command::Import(args) => cmd_import(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Lanes(args) => cmd_lanes(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let project = if args.empty {
        lumina::Project::with_default_suits(30_000)
    } else {
        lumina::Project::demo()
    };
    let json = serde_json::to_string_pretty(&project).context("serialize project")?;
    write_output(&args.out, json.as_bytes())?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let project = lumina::Project::from_path(&args.in_path)?;
    let layout = load_layout(args.layout.as_deref())?;
    let opts = lumina::CompileOpts {
        sample_step_ms: args.step_ms,
        parallel: args.parallel,
        threads: args.threads,
        chunk_size: args.chunk_size,
    };

    let show = lumina::compile_show_with_layout(&project, &layout, &opts)?;
    tracing::info!(
        samples = show.stats.samples,
        events = show.stats.events,
        orphan_cues = show.stats.orphan_cues,
        "compiled show"
    );

    let text = lumina::render_artifact(&show)?;
    write_output(&args.out, text.as_bytes())?;
    eprintln!("wrote {}", args.out.display());
    println!("sha256: {}", sha256_hex(text.as_bytes()));

    if let Some(path) = &args.binary {
        let bytes = lumina::encode_events_le(&show.events);
        write_output(path, &bytes)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_import(args: ImportArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read artifact '{}'", args.in_path.display()))?;
    let project = lumina::extract_project(&text)
        .with_context(|| format!("import '{}'", args.in_path.display()))?;
    let json = serde_json::to_string_pretty(&project).context("serialize project")?;
    write_output(&args.out, json.as_bytes())?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let project = lumina::Project::from_path(&args.in_path)?;
    let layout = load_layout(args.layout.as_deref())?;
    let suit = project
        .suit(args.suit)
        .with_context(|| format!("suit {} is not part of the project", args.suit))?;

    let compositor = lumina::Compositor::new(&layout);
    let states = compositor.resolve_suit(suit, &project.cues, args.time);
    for (led, state) in (0u16..).zip(&states) {
        let pos = layout.position(led, lumina::Pose::HandsDown);
        let status = if state.is_idle() { "idle" } else { "lit" };
        println!(
            "{led}\t{}\t{:.3}\t{:.3}\t{}\t{status}",
            layout.part_at(led).unwrap_or("-"),
            pos.x,
            pos.y,
            state.display_rgb(),
        );
    }
    Ok(())
}

fn cmd_lanes(args: LanesArgs) -> anyhow::Result<()> {
    let project = lumina::Project::from_path(&args.in_path)?;
    let lanes = lumina::assign_suit_lanes(&project, args.suit);
    println!(
        "{}",
        serde_json::to_string_pretty(&lanes).context("serialize lanes")?
    );
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(lumina::ChannelLayout::standard())
        .context("serialize layout")?;
    match args.out {
        Some(path) => {
            write_output(&path, json.as_bytes())?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn load_layout(path: Option<&Path>) -> anyhow::Result<lumina::ChannelLayout> {
    let Some(path) = path else {
        return Ok(lumina::ChannelLayout::standard().clone());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read layout '{}'", path.display()))?;
    lumina::ChannelLayout::from_json_str(&s)
        .with_context(|| format!("parse layout '{}'", path.display()))
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(64);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
