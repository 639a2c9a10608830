//! Heart-rate variability command

use super::peaks::detect;
use super::{Context, ThresholdArgs};
use crate::error::CliResult;
use crate::output;
use clap::Args;
use colored::Colorize;
use processor::ecg::HrvSummary;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct HrvCommand {
    /// Recording to analyze, defaults to data.input_path
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub threshold: ThresholdArgs,

    /// Include the individual RR intervals in text output
    #[arg(long)]
    pub intervals: bool,
}

#[derive(Debug, Serialize)]
pub struct HrvReport {
    pub samples: u64,
    pub threshold: f64,
    #[serde(flatten)]
    pub summary: HrvSummary,
}

impl HrvCommand {
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let peaks = detect(self.input.as_deref(), &self.threshold, ctx)?;
        let report = HrvReport {
            samples: peaks.samples,
            threshold: peaks.threshold,
            summary: HrvSummary::from_peaks(&peaks.peaks, &ctx.config.processor.heart_rate),
        };

        output::emit(ctx.output, &report, || self.render_text(&report))
    }

    fn render_text(&self, report: &HrvReport) -> String {
        let summary = &report.summary;
        let sdnn = summary
            .sdnn_ms
            .map(|sdnn| format!("{:.2} ms", sdnn))
            .unwrap_or_else(|| "n/a".dimmed().to_string());

        let mut text = format!(
            "{}\n  {:<12} {}\n  {:<12} {}\n  {:<12} {}\n  {:<12} {}\n  {:<12} {}",
            "Heart rate variability".bold(),
            "Beats:",
            summary.beats,
            "Heart rate:",
            format!("{:.1} bpm", summary.heart_rate_avg_bpm).green(),
            "SDNN:",
            sdnn,
            "RMSSD:",
            format!("{:.2} ms", summary.rmssd_ms),
            "pNN50:",
            format!("{:.1} %", summary.pnn50_percent),
        );
        if self.intervals {
            for rr in &summary.rr_intervals_ms {
                text.push_str(&format!("\n  {:.2}", rr));
            }
        }
        text
    }
}
