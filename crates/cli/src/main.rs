//! beatstream CLI
//!
//! Single-pass ECG beat detection and heart-rate variability from CSV recordings.

mod commands;
mod error;
mod output;

use beatstream_config::BeatstreamConfig;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use commands::{CalibrateCommand, Context, HrvCommand, LengthCommand, PeaksCommand};
use error::{CliError, CliResult};
use output::OutputFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "beatstream",
    version,
    about = "beatstream - streaming ECG beat detection",
    long_about = "Detects heart beats in ECG recordings with a push-based streaming pipeline.\n\n\
                  Features:\n\
                  - Curve-length transform of raw samples\n\
                  - Threshold calibration on a training recording\n\
                  - Beat detection with a refractory cooldown\n\
                  - Heart-rate variability statistics"
)]
struct Cli {
    /// Output format
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        value_name = "FORMAT",
        help = "Output format (text, json, yaml)"
    )]
    output: Option<OutputFormat>,

    /// Verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    verbose: bool,

    /// Configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "BEATSTREAM_CONFIG",
        value_name = "FILE",
        help = "Path to configuration file"
    )]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Threshold calibration
    #[command(name = "calibrate", about = "Calibrate the detection threshold on a training recording")]
    Calibrate(CalibrateCommand),

    /// Curve-length transform
    #[command(name = "length", about = "Print the curve-length signal of a recording")]
    Length(LengthCommand),

    /// Beat detection
    #[command(name = "peaks", about = "Detect beats in a recording")]
    Peaks(PeaksCommand),

    /// Heart-rate variability
    #[command(name = "hrv", about = "Compute heart rate and HRV statistics")]
    Hrv(HrvCommand),

    /// Generate shell completions
    #[command(name = "completions", about = "Generate shell completions")]
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        use clap_complete::generate;
        let mut cmd = build_cli();
        let bin_name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
        return Ok(());
    }

    // Load configuration
    let config = BeatstreamConfig::load(cli.config.clone())?;
    config.validate()?;

    // Initialize tracing
    init_tracing(cli.verbose, &config);

    let ctx = Context {
        config,
        output: cli.output.unwrap_or_default(),
    };

    // If no command provided, show help
    let Some(command) = cli.command else {
        Cli::command().print_help().map_err(CliError::Io)?;
        return Ok(());
    };

    match command {
        Commands::Calibrate(command) => command.execute(&ctx),
        Commands::Length(command) => command.execute(&ctx),
        Commands::Peaks(command) => command.execute(&ctx),
        Commands::Hrv(command) => command.execute(&ctx),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Initialize tracing/logging
///
/// Logs go to stderr so structured output on stdout stays parseable.
fn init_tracing(verbose: bool, config: &BeatstreamConfig) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("processor=debug,beatstream=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.observability.log_level))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.observability.json_logging {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn build_cli() -> clap::Command {
    <Cli as CommandFactory>::command()
}
