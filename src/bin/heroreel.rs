use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use heroreel::{AssetsDef, FsProbeHost, HeroController, HeroInput, LandingConfig, Millis, Scenario};

#[derive(Parser, Debug)]
#[command(name = "heroreel", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario and write the trace as JSON.
    Simulate(SimulateArgs),
    /// Probe the configured hero assets on disk and report readiness.
    Probe(ProbeArgs),
    /// Validate a landing configuration.
    CheckConfig(CheckConfigArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Landing configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output trace path. Writes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Directory relative asset sources resolve against.
    #[arg(long)]
    root: PathBuf,

    /// Landing configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckConfigArgs {
    /// Landing configuration JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Probe(args) => cmd_probe(args),
        Command::CheckConfig(args) => cmd_check_config(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<LandingConfig> {
    match path {
        Some(p) => LandingConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(LandingConfig::default()),
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let scenario = Scenario::from_path(&args.in_path)
        .with_context(|| format!("load scenario '{}'", args.in_path.display()))?;
    let trace = heroreel::session::run(&config, &scenario)?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = std::fs::File::create(out)
                .with_context(|| format!("create trace '{}'", out.display()))?;
            serde_json::to_writer_pretty(f, &trace)
                .with_context(|| format!("write trace '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &trace).context("write trace")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut hero = HeroController::mount(&config.hero, FsProbeHost::new(&args.root))?;
    let events = hero.host_mut().drain();
    for (index, event) in events {
        hero.handle(HeroInput::Probe { index, event }, Millis::ZERO)?;
    }

    let assets: Vec<_> = hero
        .pool()
        .sources()
        .iter()
        .zip(hero.tracker().statuses())
        .enumerate()
        .map(|(index, (source, status))| {
            serde_json::json!({ "index": index, "source": source, "status": status })
        })
        .collect();
    let report = serde_json::json!({
        "ready": !hero.is_loading(),
        "settled": hero.tracker().settled(),
        "assets": assets,
    });

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report).context("write probe report")?;
    writeln!(stdout)?;
    Ok(())
}

fn cmd_check_config(args: CheckConfigArgs) -> anyhow::Result<()> {
    let mut config = LandingConfig::from_path(&args.in_path)
        .with_context(|| format!("load config '{}'", args.in_path.display()))?;
    config.validate()?;
    let pool = config.hero.assets.build()?;
    eprintln!(
        "ok: {} assets, {} transition",
        pool.len(),
        config.hero.transition.total()
    );

    config.hero.assets = AssetsDef::List {
        sources: pool.sources().to_vec(),
    };
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &config).context("write config")?;
    writeln!(stdout)?;
    Ok(())
}
