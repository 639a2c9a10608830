//! Curve-length transform command

use super::{pick_path, run_recording, Context};
use crate::error::CliResult;
use crate::output;
use clap::Args;
use processor::ecg::curve_length;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct LengthCommand {
    /// Recording to transform, defaults to data.input_path
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct LengthReport {
    pub samples: u64,
    pub lengths: Vec<f64>,
}

impl LengthCommand {
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let report = self.report(ctx)?;

        output::emit(ctx.output, &report, || {
            report
                .lengths
                .iter()
                .map(|length| format!("{:.6}", length))
                .collect::<Vec<_>>()
                .join("\n")
        })
    }

    fn report(&self, ctx: &Context) -> CliResult<LengthReport> {
        let path = pick_path(
            self.input.as_deref(),
            ctx.config.data.input_path.as_deref(),
            "input recording (pass a FILE or set data.input_path)",
        )?;
        let mut query = curve_length(&ctx.config.processor.curve_length)?;
        let (lengths, stats) = run_recording("curve_length", &path, ctx, &mut query)?;

        Ok(LengthReport {
            samples: stats.items_in,
            lengths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_length_output_count() {
        let file = recording_file(100, &[50]);
        let command = LengthCommand {
            input: Some(file.path().to_path_buf()),
        };
        let report = command.report(&context()).unwrap();
        assert_eq!(report.samples, 100);
        assert_eq!(report.lengths.len(), 76);
    }
}
