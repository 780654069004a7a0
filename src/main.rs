use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nicowatch::{Monitor, Overrides, Replay, Settings, TerminalSink, Theme};
use nicowatch_provider::nicovideo::NicovideoProvider;

#[derive(Parser, Debug)]
#[command(name = "nicowatch", version)]
#[command(about = "Monitor a nicovideo item's counters and replay the history")]
struct Args {
    /// Content id to monitor, or to filter by when replaying (e.g. sm9)
    #[arg(short, long, value_name = "ID")]
    video: Option<String>,

    /// Replay the log file instead of monitoring
    #[arg(short, long)]
    readlog: bool,

    /// Poll interval in seconds (ignored with --readlog) [default: 10]
    #[arg(short, long, value_name = "SECONDS")]
    interval: Option<u64>,

    /// Log file (JSON); logging is off without one
    #[arg(short, long)]
    log: Option<PathBuf>,

    /// Ticks to run, or records to show with --readlog; -1 for no limit [default: -1]
    #[arg(short, long, allow_negative_numbers = true)]
    count: Option<i64>,

    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Derive speed from capture timestamps when replaying
    #[arg(long)]
    derive_speed: bool,

    /// Plain output without colors
    #[arg(long)]
    no_color: bool,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            interval: self.interval,
            count: self.count,
            log: self.log.clone(),
            derive_speed: self.derive_speed.then_some(true),
            color: self.no_color.then_some(false),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = Settings::load(args.config.as_deref(), &args.overrides())
        .context("Failed to load settings")?;
    let theme = settings.color.then(Theme::auto_detect);
    let mut sink = TerminalSink::stdout(theme);

    if args.readlog {
        let config = settings.replay_config(None, args.video.clone())?;
        Replay::new(config).run(&mut sink)?;
        return Ok(());
    }

    let Some(video) = args.video.clone() else {
        bail!("--video is required unless --readlog is given");
    };
    let config = settings.monitor_config(video)?;
    let provider = NicovideoProvider::builder()
        .build()
        .context("Failed to create HTTP client")?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(async {
        let mut monitor = Monitor::new(config, provider, sink)?;
        monitor.run().await
    })?;

    Ok(())
}

/// Log to stderr so diagnostics never mix with the frames on stdout.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "nicowatch=debug,nicowatch_provider=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
