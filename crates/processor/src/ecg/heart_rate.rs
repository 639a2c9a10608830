//! Heart-rate and heart-rate-variability statistics over peak timestamps
//!
//! Every statistic is a push query consuming the detector's output stream:
//! - [`rr_intervals`]: RR interval lengths in milliseconds
//! - [`heart_rate_avg`]: mean instantaneous heart rate in beats per minute
//! - [`sdnn`]: population standard deviation of the RR intervals
//! - [`rmssd`]: root mean square of successive RR differences
//! - [`pnn50`]: percentage of successive RR differences above 50 ms
//!
//! Statistics over too few intervals resolve to NaN, except [`sdnn`], which
//! emits nothing unless at least two intervals exist.

use crate::aggregation::{AggregateOperator, AverageAggregator, StandardDeviationAggregator};
use crate::config::HeartRateConfig;
use crate::pipeline::{collect, FilterOperator, MapOperator, Query, QueryExt, Sink};
use serde::{Deserialize, Serialize};

/// Converts consecutive peak timestamps into RR intervals
///
/// The first peak only primes the query; every later peak emits the gap to
/// its predecessor multiplied by the sample period.
#[derive(Debug, Clone)]
pub struct RrIntervals {
    sample_period_ms: f64,
    previous: Option<u64>,
}

impl RrIntervals {
    /// Create the query for a sample period in milliseconds
    pub fn new(sample_period_ms: f64) -> Self {
        Self {
            sample_period_ms,
            previous: None,
        }
    }
}

impl Query<u64, f64> for RrIntervals {
    fn start(&mut self, _sink: &mut dyn Sink<f64>) {
        self.previous = None;
    }

    fn next(&mut self, timestamp: u64, sink: &mut dyn Sink<f64>) {
        if let Some(previous) = self.previous.replace(timestamp) {
            let samples = timestamp as f64 - previous as f64;
            sink.next(samples * self.sample_period_ms);
        }
    }

    fn end(&mut self, sink: &mut dyn Sink<f64>) {
        sink.end();
    }
}

/// Emits `current - previous` for every item after the first
#[derive(Debug, Clone, Default)]
pub struct SuccessiveDifferences {
    previous: Option<f64>,
}

impl SuccessiveDifferences {
    /// Create an operator with no previous value
    pub fn new() -> Self {
        Self::default()
    }
}

impl Query<f64, f64> for SuccessiveDifferences {
    fn start(&mut self, _sink: &mut dyn Sink<f64>) {
        self.previous = None;
    }

    fn next(&mut self, item: f64, sink: &mut dyn Sink<f64>) {
        if let Some(previous) = self.previous.replace(item) {
            sink.next(item - previous);
        }
    }

    fn end(&mut self, sink: &mut dyn Sink<f64>) {
        sink.end();
    }
}

/// RR intervals in milliseconds
pub fn rr_intervals(config: &HeartRateConfig) -> RrIntervals {
    RrIntervals::new(config.sample_period_ms)
}

/// Mean of `60000 / rr` over all positive intervals, in beats per minute
pub fn heart_rate_avg(config: &HeartRateConfig) -> impl Query<u64, f64> {
    rr_intervals(config)
        .then(FilterOperator::new(|rr: &f64| *rr > 0.0))
        .then(MapOperator::new(|rr: f64| 60_000.0 / rr))
        .then(AggregateOperator::new(AverageAggregator::new()))
}

/// Population standard deviation of the RR intervals, in milliseconds
pub fn sdnn(config: &HeartRateConfig) -> impl Query<u64, f64> {
    rr_intervals(config).then(
        AggregateOperator::new(StandardDeviationAggregator::population()).with_min_count(2),
    )
}

/// Root mean square of successive RR differences, in milliseconds
pub fn rmssd(config: &HeartRateConfig) -> impl Query<u64, f64> {
    rr_intervals(config)
        .then(SuccessiveDifferences::new())
        .then(MapOperator::new(|d: f64| d * d))
        .then(AggregateOperator::new(AverageAggregator::new()))
        .then(MapOperator::new(f64::sqrt))
}

/// Percentage of absolute successive RR differences above the NN50 threshold
pub fn pnn50(config: &HeartRateConfig) -> impl Query<u64, f64> {
    let threshold = config.nn50_threshold_ms;
    rr_intervals(config)
        .then(SuccessiveDifferences::new())
        .then(MapOperator::new(move |d: f64| {
            if d.abs() > threshold {
                100.0
            } else {
                0.0
            }
        }))
        .then(AggregateOperator::new(AverageAggregator::new()))
}

/// All heart-rate statistics of one recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrvSummary {
    /// Number of detected beats
    pub beats: usize,

    /// RR intervals in milliseconds
    pub rr_intervals_ms: Vec<f64>,

    /// Average heart rate in beats per minute
    pub heart_rate_avg_bpm: f64,

    /// SDNN in milliseconds, absent with fewer than two intervals
    pub sdnn_ms: Option<f64>,

    /// RMSSD in milliseconds
    pub rmssd_ms: f64,

    /// pNN50 in percent
    pub pnn50_percent: f64,
}

impl HrvSummary {
    /// Compute every statistic over a finished list of peak timestamps
    pub fn from_peaks(peaks: &[u64], config: &HeartRateConfig) -> Self {
        let single = |mut values: Vec<f64>| values.pop().unwrap_or(f64::NAN);

        Self {
            beats: peaks.len(),
            rr_intervals_ms: collect(peaks.iter().copied(), &mut rr_intervals(config)),
            heart_rate_avg_bpm: single(collect(peaks.iter().copied(), &mut heart_rate_avg(config))),
            sdnn_ms: collect(peaks.iter().copied(), &mut sdnn(config)).pop(),
            rmssd_ms: single(collect(peaks.iter().copied(), &mut rmssd(config))),
            pnn50_percent: single(collect(peaks.iter().copied(), &mut pnn50(config))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> HeartRateConfig {
        HeartRateConfig {
            sample_period_ms: 1.0,
            nn50_threshold_ms: 50.0,
        }
    }

    fn run(query: &mut dyn Query<u64, f64>, peaks: &[u64]) -> Vec<f64> {
        collect(peaks.iter().copied(), query)
    }

    #[test]
    fn test_rr_intervals() {
        let mut query = rr_intervals(&HeartRateConfig::default());
        let out = run(&mut query, &[100, 400, 700]);
        assert_eq!(out.len(), 2);
        assert!((out[0] - 300.0 * 2.78).abs() < 1e-9);

        assert!(run(&mut query, &[5]).is_empty());
    }

    #[test]
    fn test_heart_rate_avg() {
        // 1000 ms and 500 ms intervals: 60 and 120 bpm
        let out = run(&mut heart_rate_avg(&config()), &[0, 1000, 1500]);
        assert_eq!(out, vec![90.0]);

        let empty = run(&mut heart_rate_avg(&config()), &[0]);
        assert!(empty[0].is_nan());
    }

    #[test]
    fn test_heart_rate_avg_skips_zero_intervals() {
        let out = run(&mut heart_rate_avg(&config()), &[0, 0, 1000]);
        assert_eq!(out, vec![60.0]);
    }

    #[test]
    fn test_sdnn_needs_two_intervals() {
        assert!(run(&mut sdnn(&config()), &[0, 800]).is_empty());

        // Intervals 800, 1000 -> population std 100
        let out = run(&mut sdnn(&config()), &[0, 800, 1800]);
        assert_eq!(out.len(), 1);
        assert!((out[0] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rmssd() {
        // Intervals 800, 1000, 700 -> diffs 200, -300
        let out = run(&mut rmssd(&config()), &[0, 800, 1800, 2500]);
        let expected = ((200.0_f64.powi(2) + 300.0_f64.powi(2)) / 2.0).sqrt();
        assert!((out[0] - expected).abs() < 1e-9);

        assert!(run(&mut rmssd(&config()), &[0, 800])[0].is_nan());
    }

    #[test]
    fn test_pnn50() {
        // Intervals 800, 830, 900, 905 -> |diffs| 30, 70, 5
        let out = run(&mut pnn50(&config()), &[0, 800, 1630, 2530, 3435]);
        assert!((out[0] - 100.0 / 3.0).abs() < 1e-9);

        assert!(run(&mut pnn50(&config()), &[0, 800])[0].is_nan());
    }

    #[test]
    fn test_summary() {
        let summary = HrvSummary::from_peaks(&[0, 800, 1800], &config());
        assert_eq!(summary.beats, 3);
        assert_eq!(summary.rr_intervals_ms, vec![800.0, 1000.0]);
        assert!((summary.heart_rate_avg_bpm - 67.5).abs() < 1e-9);
        assert!(summary.sdnn_ms.is_some());
        assert!((summary.rmssd_ms - 200.0).abs() < 1e-9);
        assert_eq!(summary.pnn50_percent, 100.0);
    }

    #[test]
    fn test_summary_without_beats() {
        let summary = HrvSummary::from_peaks(&[], &HeartRateConfig::default());
        assert_eq!(summary.beats, 0);
        assert!(summary.rr_intervals_ms.is_empty());
        assert!(summary.heart_rate_avg_bpm.is_nan());
        assert!(summary.sdnn_ms.is_none());
    }
}
