use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use geoquad::{MapScene, SceneSession, SceneSessionOpts};

#[derive(Parser, Debug)]
#[command(name = "geoquad", version)]
struct Cli {
    /// Log pipeline events to stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene as an SVG document.
    Svg(RenderArgs),
    /// Render a scene as a PNG image.
    Png(RenderArgs),
    /// Print the draw requests of a scene as JSON.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Directory image references are resolved against (defaults to the scene's directory).
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory image references are resolved against (defaults to the scene's directory).
    #[arg(long)]
    assets: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Svg(args) => cmd_svg(args),
        Command::Png(args) => cmd_png(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load(
    in_path: &Path,
    assets: Option<PathBuf>,
    opts: SceneSessionOpts,
) -> anyhow::Result<SceneSession> {
    let scene = MapScene::from_path(in_path)?;
    let assets_root = assets.unwrap_or_else(|| {
        in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    });
    let mut session = SceneSession::new(&scene, assets_root, opts)?;
    session
        .update()
        .with_context(|| format!("build scene '{}'", in_path.display()))?;
    Ok(session)
}

fn create_parent(out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_svg(args: RenderArgs) -> anyhow::Result<()> {
    let session = load(&args.in_path, args.assets, SceneSessionOpts::default())?;
    create_parent(&args.out)?;
    std::fs::write(&args.out, session.svg()?)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_png(args: RenderArgs) -> anyhow::Result<()> {
    let session = load(&args.in_path, args.assets, SceneSessionOpts::default())?;
    let frame = session.rasterize()?;
    frame.write_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let session = load(
        &args.in_path,
        args.assets,
        SceneSessionOpts {
            record_requests: true,
        },
    )?;
    let json = serde_json::to_string_pretty(&session.requests()?).context("serialize requests")?;
    println!("{json}");
    Ok(())
}
