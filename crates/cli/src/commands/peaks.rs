//! Beat detection command

use super::{pick_path, run_recording, Context, ThresholdArgs};
use crate::error::CliResult;
use crate::output;
use clap::Args;
use colored::Colorize;
use processor::ecg::peaks;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct PeaksCommand {
    /// Recording to analyze, defaults to data.input_path
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub threshold: ThresholdArgs,
}

#[derive(Debug, Serialize)]
pub struct PeakReport {
    pub samples: u64,
    pub threshold: f64,
    pub peaks: Vec<u64>,
}

impl PeaksCommand {
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let report = detect(self.input.as_deref(), &self.threshold, ctx)?;

        output::emit(ctx.output, &report, || {
            let mut text = format!(
                "{} {} beats in {} samples (threshold {:.3})",
                "Detected".bold(),
                report.peaks.len().to_string().green(),
                report.samples,
                report.threshold
            );
            for peak in &report.peaks {
                text.push_str(&format!("\n{}", peak));
            }
            text
        })
    }
}

/// Detect the beats of the input recording
pub(crate) fn detect(
    input: Option<&std::path::Path>,
    threshold: &ThresholdArgs,
    ctx: &Context,
) -> CliResult<PeakReport> {
    let path = pick_path(
        input,
        ctx.config.data.input_path.as_deref(),
        "input recording (pass a FILE or set data.input_path)",
    )?;
    let threshold = threshold.resolve(ctx)?;
    let mut query = peaks(&ctx.config.processor, threshold)?;
    let (peaks, stats) = run_recording("peaks", &path, ctx, &mut query)?;

    Ok(PeakReport {
        samples: stats.items_in,
        threshold,
        peaks,
    })
}
