//! CLI command implementations

pub mod calibrate;
pub mod hrv;
pub mod length;
pub mod peaks;

pub use calibrate::CalibrateCommand;
pub use hrv::HrvCommand;
pub use length::LengthCommand;
pub use peaks::PeaksCommand;

use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use beatstream_config::BeatstreamConfig;
use clap::Args;
use processor::pipeline::{Collector, Query, StreamExecutor};
use processor::source::EcgCsvSource;
use processor::{ExecutorStats, ProcessorError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Shared state handed to every command
pub struct Context {
    pub config: BeatstreamConfig,
    pub output: OutputFormat,
}

/// Where the detection threshold comes from
#[derive(Debug, Clone, Args)]
pub struct ThresholdArgs {
    /// Fixed detection threshold, skips calibration
    #[arg(short, long, value_name = "VALUE")]
    pub threshold: Option<f64>,

    /// Training recording used to calibrate the threshold
    #[arg(long, value_name = "FILE", conflicts_with = "threshold")]
    pub training: Option<PathBuf>,
}

impl ThresholdArgs {
    /// Use the explicit threshold, or calibrate on the training recording
    pub fn resolve(&self, ctx: &Context) -> CliResult<f64> {
        if let Some(threshold) = self.threshold {
            info!(threshold, "Using fixed detection threshold");
            return Ok(threshold);
        }

        let path = pick_path(
            self.training.as_deref(),
            ctx.config.data.training_path.as_deref(),
            "training recording (use --training, --threshold or data.training_path)",
        )?;
        let samples = processor::read_samples(&path, &ctx.config.processor.source)?;
        let calibration = processor::calibrate(samples, &ctx.config.processor)?;
        Ok(calibration.threshold)
    }
}

/// Prefer the argument, then the configured path
pub(crate) fn pick_path(arg: Option<&Path>, configured: Option<&Path>, what: &str) -> CliResult<PathBuf> {
    arg.or(configured)
        .map(Path::to_path_buf)
        .ok_or_else(|| CliError::MissingInput(what.to_string()))
}

/// Stream the recording at `path` through `query`, collecting its output
pub(crate) fn run_recording<B>(
    name: &str,
    path: &Path,
    ctx: &Context,
    query: &mut dyn Query<i32, B>,
) -> CliResult<(Vec<B>, ExecutorStats)> {
    let source = EcgCsvSource::open(path, &ctx.config.processor.source)?;
    let mut out: Collector<B> = Collector::new();
    let stats = StreamExecutor::new(name).try_run(
        source.map(|sample| sample.map_err(ProcessorError::from)),
        query,
        &mut out,
    )?;
    Ok((out.into_items(), stats))
}
