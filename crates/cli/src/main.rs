//! Pacer CLI - throttled progress demos.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pacer_progress::{Progress, ProgressBar, ProgressConfig};
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "pacer")]
#[command(about = "Throttled progress reporting demos", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonArgs {
    /// Ratio denominator
    #[arg(long, global = true, default_value = "100")]
    limit: i64,

    /// Starting value
    #[arg(long, global = true, default_value = "0", allow_negative_numbers = true)]
    start: i64,

    /// Digits after the decimal point
    #[arg(long, global = true, default_value = "2", allow_negative_numbers = true)]
    digits: i32,

    /// Print state snapshots as JSON instead of rendered lines
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Notify every N percentage points
    Percent {
        /// Step in percentage points
        #[arg(long, default_value = "5.0")]
        delta: f64,
    },
    /// Notify every N units
    Steps {
        /// Step in units
        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        delta: i64,
    },
    /// Notify at most once per interval
    Time {
        /// Interval in milliseconds
        #[arg(long, default_value = "1000", allow_negative_numbers = true)]
        millis: i64,
        /// Pause between updates in milliseconds
        #[arg(long, default_value = "100")]
        sleep_ms: u64,
    },
    /// Notify at a target rate
    Rate {
        /// Notifications per second
        #[arg(long, default_value = "3.0")]
        ops: f64,
        /// Pause between updates in milliseconds
        #[arg(long, default_value = "100")]
        sleep_ms: u64,
    },
    /// Render a progress bar on every update
    Bar {
        /// Bar width in characters
        #[arg(long, default_value = "25")]
        width: usize,
        /// Fill character
        #[arg(long, default_value = "=")]
        fill: char,
        /// Text before the bar
        #[arg(long, default_value = "[")]
        prefix: String,
        /// Text after the bar
        #[arg(long, default_value = "]")]
        suffix: String,
        /// Pause between updates in milliseconds
        #[arg(long, default_value = "0")]
        sleep_ms: u64,
    },
    /// Build the counter from a JSON config file
    Run {
        /// Path to the config
        #[arg(long)]
        config: PathBuf,
        /// Pause between updates in milliseconds
        #[arg(long, default_value = "0")]
        sleep_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.common.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let common = &cli.common;
    let base = || Progress::new(common.limit, common.start).with_digits(common.digits);

    let (progress, sleep_ms) = match cli.command {
        Commands::Percent { delta } => (base()?.by_percent_delta(delta), 0),
        Commands::Steps { delta } => (base()?.by_current_delta(delta), 0),
        Commands::Time { millis, sleep_ms } => (base()?.by_time_delta(millis), sleep_ms),
        Commands::Rate { ops, sleep_ms } => (base()?.by_outputs_per_second(ops), sleep_ms),
        Commands::Bar {
            width,
            fill,
            prefix,
            suffix,
            sleep_ms,
        } => {
            let bar = ProgressBar::new(width, fill, prefix, suffix);
            (base()?.use_progress_bar(bar), sleep_ms)
        }
        Commands::Run { config, sleep_ms } => (ProgressConfig::load(&config)?.build()?, sleep_ms),
    };

    let notified = drive(progress, Duration::from_millis(sleep_ms), common.json).await;
    info!("Finished with {} notifications", notified);

    Ok(())
}

/// Step the counter from its current value to its limit one unit at a time,
/// printing each notification. Returns how many notifications fired.
async fn drive(mut progress: Progress, pause: Duration, json: bool) -> usize {
    let steps = progress.limit().saturating_sub(progress.current()).max(0);
    let mut notified = 0;

    for _ in 0..steps {
        progress.increment(|p| {
            notified += 1;
            emit(p, json);
        });

        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
    }

    notified
}

fn emit(progress: &Progress, json: bool) {
    if !json {
        println!("{}", progress);
        return;
    }

    match serde_json::to_string(progress.state()) {
        Ok(line) => println!("{}", line),
        Err(e) => warn!("Failed to serialize progress: {}", e),
    }
}
