//! Configuration types for the stream processor
//!
//! This module provides the parameters of the ECG pipelines: the
//! curve-length transform, the peak detector, heart-rate analytics and the
//! CSV sample source.

use crate::error::{ProcessorError, Result};
use serde::{Deserialize, Serialize};

/// Main processor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Curve-length transform configuration
    #[serde(default)]
    pub curve_length: CurveLengthConfig,

    /// Peak detector configuration
    #[serde(default)]
    pub detector: DetectorConfig,

    /// Heart-rate analytics configuration
    #[serde(default)]
    pub heart_rate: HeartRateConfig,

    /// Sample source configuration
    #[serde(default)]
    pub source: SourceConfig,
}

impl ProcessorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.curve_length.validate()?;
        self.detector.validate()?;
        self.heart_rate.validate()?;
        Ok(())
    }
}

/// Curve-length transform configuration
///
/// ```text
/// adjust: x[n] = raw[n] - dc_offset
/// smooth: y[n] = mean of x over smoothing_taps centered samples
/// deriv:  d[n] = (y[n+1] - y[n-1]) / 2
/// length: l[n] = sum of sqrt(1 + d^2) over length_taps centered samples
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveLengthConfig {
    /// Constant subtracted from every raw sample
    pub dc_offset: i32,

    /// Width of the centered moving average
    pub smoothing_taps: usize,

    /// Width of the centered curve-length window
    pub length_taps: usize,
}

impl Default for CurveLengthConfig {
    fn default() -> Self {
        Self {
            dc_offset: 1024,
            smoothing_taps: 5,
            length_taps: 41,
        }
    }
}

impl CurveLengthConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the DC offset
    pub fn with_dc_offset(mut self, dc_offset: i32) -> Self {
        self.dc_offset = dc_offset;
        self
    }

    /// Set the moving-average width
    pub fn with_smoothing_taps(mut self, taps: usize) -> Self {
        self.smoothing_taps = taps;
        self
    }

    /// Set the curve-length window width
    pub fn with_length_taps(mut self, taps: usize) -> Self {
        self.length_taps = taps;
        self
    }

    /// Validate curve-length configuration
    pub fn validate(&self) -> Result<()> {
        if self.smoothing_taps == 0 {
            return Err(ProcessorError::configuration(
                "smoothing_taps must be greater than 0",
            ));
        }

        if self.length_taps == 0 {
            return Err(ProcessorError::configuration(
                "length_taps must be greater than 0",
            ));
        }

        Ok(())
    }
}

/// Peak detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Items ignored after each detected peak
    pub cooldown: usize,

    /// Items collected after a threshold crossing before picking the peak
    pub search_window: usize,

    /// Threshold as a multiple of the mean training curve length
    pub threshold_factor: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            cooldown: 72,
            search_window: 40,
            threshold_factor: 2.0,
        }
    }
}

impl DetectorConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cooldown length
    pub fn with_cooldown(mut self, cooldown: usize) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Set the search window length
    pub fn with_search_window(mut self, search_window: usize) -> Self {
        self.search_window = search_window;
        self
    }

    /// Set the threshold factor
    pub fn with_threshold_factor(mut self, factor: f64) -> Self {
        self.threshold_factor = factor;
        self
    }

    /// Validate detector configuration
    pub fn validate(&self) -> Result<()> {
        if self.search_window == 0 {
            return Err(ProcessorError::configuration(
                "search_window must be greater than 0",
            ));
        }

        if !(self.threshold_factor > 0.0) {
            return Err(ProcessorError::configuration(
                "threshold_factor must be positive",
            ));
        }

        Ok(())
    }
}

/// Heart-rate analytics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartRateConfig {
    /// Duration of one sample in milliseconds (360 Hz recordings)
    pub sample_period_ms: f64,

    /// Successive-difference threshold for pNN50, in milliseconds
    pub nn50_threshold_ms: f64,
}

impl Default for HeartRateConfig {
    fn default() -> Self {
        Self {
            sample_period_ms: 2.78,
            nn50_threshold_ms: 50.0,
        }
    }
}

impl HeartRateConfig {
    /// Validate heart-rate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.sample_period_ms > 0.0) {
            return Err(ProcessorError::configuration(
                "sample_period_ms must be positive",
            ));
        }

        if self.nn50_threshold_ms < 0.0 {
            return Err(ProcessorError::configuration(
                "nn50_threshold_ms must be non-negative",
            ));
        }

        Ok(())
    }
}

/// CSV sample source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Whether the first record is a header
    pub has_header: bool,

    /// Zero-based column holding the sample value
    pub column: usize,

    /// Field delimiter
    pub delimiter: char,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            has_header: false,
            column: 0,
            delimiter: ',',
        }
    }
}
