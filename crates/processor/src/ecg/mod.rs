//! ECG analysis pipelines
//!
//! This module builds the beat detector out of the generic operators:
//! - [`curve_length`]: raw samples to the curve-length signal
//! - [`Detect`]: threshold-triggered peak picker with cooldown
//! - [`peaks`]: the composed raw-samples-to-peak-timestamps query
//! - [`calibrate`]: offline threshold calibration over training data
//! - [`heart_rate`]: RR interval and HRV statistics over detected peaks
//!
//! # Example
//!
//! ```rust
//! use processor::config::ProcessorConfig;
//! use processor::ecg::{calibrate_threshold, peaks};
//! use processor::pipeline::collect;
//!
//! let config = ProcessorConfig::default();
//! let training = vec![1024; 200];
//! let threshold = calibrate_threshold(training, &config)?;
//!
//! let mut detector = peaks(&config, threshold)?;
//! let beats = collect(vec![1024; 500], &mut detector);
//! assert!(beats.is_empty());
//! # Ok::<(), processor::ProcessorError>(())
//! ```

pub mod calibration;
pub mod curve_length;
pub mod detect;
pub mod heart_rate;
pub mod peaks;

pub use calibration::{calibrate, calibrate_threshold, Calibration};
pub use curve_length::{curve_length, segment_length, CurveLength};
pub use detect::{Detect, DetectorState, Vtl};
pub use heart_rate::{
    heart_rate_avg, pnn50, rmssd, rr_intervals, sdnn, HrvSummary, RrIntervals,
    SuccessiveDifferences,
};
pub use peaks::{peaks, vtl_stream, PeakDetector, VtlCombiner, VtlStream};
