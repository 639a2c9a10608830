//! Peak detection pipeline
//!
//! ```text
//!          ┌── identity ─────────┐
//! raw ─────┤                     ├── VtlCombiner ──▶ Detect ──▶ peak timestamps
//!          └── curve length ─────┘
//! ```
//!
//! The raw and length branches are paired in lock-step, so the `n`-th raw
//! sample meets the `n`-th length value. The length branch produces fewer
//! items than it consumes; raw samples still unpaired at end-of-stream are
//! dropped.

use super::curve_length::{curve_length, CurveLength};
use super::detect::{Detect, Vtl};
use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::pipeline::{Combiner, Identity, Parallel, Pipeline, QueryExt};
use tracing::info;

/// Pairs raw samples with curve-length values into [`Vtl`] triples
///
/// The timestamp counter belongs to the combiner and restarts at 0 whenever
/// the enclosing query is started.
#[derive(Debug, Clone, Default)]
pub struct VtlCombiner {
    next_timestamp: u64,
}

impl VtlCombiner {
    /// Create a combiner whose first triple has timestamp 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp the next triple will carry
    pub fn next_timestamp(&self) -> u64 {
        self.next_timestamp
    }
}

impl Combiner<i32, f64> for VtlCombiner {
    type Output = Vtl;

    fn combine(&mut self, raw: i32, length: f64) -> Vtl {
        let vtl = Vtl::new(raw, self.next_timestamp, length);
        self.next_timestamp += 1;
        vtl
    }

    fn reset(&mut self) {
        self.next_timestamp = 0;
    }
}

/// Raw samples to synchronized triples
pub type VtlStream = Parallel<i32, Identity<i32>, CurveLength, VtlCombiner, i32, f64>;

/// Raw samples to peak timestamps
pub type PeakDetector = Pipeline<VtlStream, Detect, Vtl>;

/// Build the triple stream for `config`
pub fn vtl_stream(config: &ProcessorConfig) -> Result<VtlStream> {
    Ok(Parallel::new(
        Identity::new(),
        curve_length(&config.curve_length)?,
        VtlCombiner::new(),
    ))
}

/// Build the complete peak detector with a calibrated `threshold`
///
/// Only the curve-length and detector sections are validated; the heart-rate
/// and source settings play no part here.
pub fn peaks(config: &ProcessorConfig, threshold: f64) -> Result<PeakDetector> {
    config.curve_length.validate()?;
    let detect = Detect::new(threshold, &config.detector)?;
    info!(
        threshold,
        cooldown = config.detector.cooldown,
        search_window = config.detector.search_window,
        "Built peak detector"
    );
    Ok(vtl_stream(config)?.then(detect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{collect, Collector, Query};

    #[test]
    fn test_combiner_counts_from_zero() {
        let mut combiner = VtlCombiner::new();
        assert_eq!(combiner.combine(7, 1.5), Vtl::new(7, 0, 1.5));
        assert_eq!(combiner.combine(8, 2.5), Vtl::new(8, 1, 2.5));
        combiner.reset();
        assert_eq!(combiner.next_timestamp(), 0);
    }

    #[test]
    fn test_vtl_stream_pairs_lock_step() {
        let mut stream = vtl_stream(&ProcessorConfig::default()).unwrap();
        let samples: Vec<i32> = (0..60).map(|i| 1024 + i).collect();
        let out = collect(samples, &mut stream);

        assert_eq!(out.len(), 60 - 24);
        for (i, vtl) in out.iter().enumerate() {
            assert_eq!(vtl.timestamp, i as u64);
            assert_eq!(vtl.raw, 1024 + i as i32);
        }
    }

    #[test]
    fn test_timestamps_restart_per_run() {
        let mut stream = vtl_stream(&ProcessorConfig::default()).unwrap();
        collect(vec![1024; 40], &mut stream);
        let out = collect(vec![1024; 30], &mut stream);
        assert_eq!(out.first().map(|v| v.timestamp), Some(0));
    }

    #[test]
    fn test_flat_signal_has_no_peaks() {
        // Flat length is 41 once the window is full; threshold above it
        let mut detector = peaks(&ProcessorConfig::default(), 82.0).unwrap();
        let mut out: Collector<u64> = Collector::new();
        detector.start(&mut out);
        for _ in 0..500 {
            detector.next(1024, &mut out);
        }
        detector.end(&mut out);
        assert!(out.is_empty());
        assert_eq!(out.end_count(), 1);
    }

    #[test]
    fn test_heart_rate_settings_do_not_block_detector() {
        let mut config = ProcessorConfig::default();
        config.heart_rate.sample_period_ms = 0.0;
        assert!(config.validate().is_err());
        assert!(peaks(&config, 200.0).is_ok());

        config.detector.search_window = 0;
        assert!(peaks(&config, 200.0).is_err());

        config.detector.search_window = 40;
        config.curve_length.smoothing_taps = 0;
        assert!(peaks(&config, 200.0).is_err());
    }

    #[test]
    fn test_nan_threshold_rejected() {
        assert!(peaks(&ProcessorConfig::default(), f64::NAN).is_err());
    }
}
