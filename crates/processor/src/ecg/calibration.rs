//! Offline threshold calibration
//!
//! The detector threshold is `threshold_factor` times the mean curve length
//! of a finite training signal. It is computed once, before streaming, and
//! never adapted afterwards.

use super::curve_length::curve_length;
use crate::aggregation::{AggregateOperator, AverageAggregator};
use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::pipeline::{Collector, QueryExt, StreamExecutor};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Result of a calibration run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Training samples consumed
    pub samples: u64,

    /// Mean curve length, 0.0 when the training signal was too short
    pub mean_length: f64,

    /// Decision threshold handed to the detector
    pub threshold: f64,
}

/// Run the curve-length transform over `training` and derive the threshold
pub fn calibrate<I>(training: I, config: &ProcessorConfig) -> Result<Calibration>
where
    I: IntoIterator<Item = i32>,
{
    config.validate()?;

    let mut query = curve_length(&config.curve_length)?
        .then(AggregateOperator::new(AverageAggregator::new()));
    let mut out: Collector<f64> = Collector::new();
    let stats = StreamExecutor::new("calibration").run(training, &mut query, &mut out);

    let mean_length = match out.items().first() {
        Some(mean) if mean.is_finite() => *mean,
        _ => {
            warn!(
                samples = stats.items_in,
                "Training signal produced no curve-length values, using 0.0"
            );
            0.0
        }
    };
    let threshold = mean_length * config.detector.threshold_factor;

    info!(
        samples = stats.items_in,
        mean_length, threshold, "Calibrated detection threshold"
    );

    Ok(Calibration {
        samples: stats.items_in,
        mean_length,
        threshold,
    })
}

/// Derive the detector threshold from `training`
pub fn calibrate_threshold<I>(training: I, config: &ProcessorConfig) -> Result<f64>
where
    I: IntoIterator<Item = i32>,
{
    Ok(calibrate(training, config)?.threshold)
}
