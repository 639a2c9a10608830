//! Threshold calibration command

use super::{pick_path, Context};
use crate::error::CliResult;
use crate::output;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct CalibrateCommand {
    /// Training recording, defaults to data.training_path
    #[arg(value_name = "FILE")]
    pub training: Option<PathBuf>,
}

impl CalibrateCommand {
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let path = pick_path(
            self.training.as_deref(),
            ctx.config.data.training_path.as_deref(),
            "training recording (pass a FILE or set data.training_path)",
        )?;
        let samples = processor::read_samples(&path, &ctx.config.processor.source)?;
        let calibration = processor::calibrate(samples, &ctx.config.processor)?;

        output::emit(ctx.output, &calibration, || {
            format!(
                "{}\n  {:<14} {}\n  {:<14} {:.3}\n  {:<14} {}",
                "Calibration".bold(),
                "Samples:",
                calibration.samples,
                "Mean length:",
                calibration.mean_length,
                "Threshold:",
                format!("{:.3}", calibration.threshold).green()
            )
        })
    }
}
