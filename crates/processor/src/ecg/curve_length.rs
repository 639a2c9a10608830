//! Curve-length transform of a raw ECG signal
//!
//! ```text
//! raw ──▶ adjust ──▶ smooth (W=5) ──▶ derivative (3-point) ──▶ length (W=41) ──▶ l[n]
//! ```
//!
//! Both windowed stages are [`CenteredSlidingWindow`]s, so the transform
//! withholds `smoothing_taps / 2` and `length_taps / 2` items at the start
//! and the derivative drops one item at each edge. With the default
//! configuration `N` raw samples produce `N - 24` length values.

use crate::config::CurveLengthConfig;
use crate::error::Result;
use crate::pipeline::{MapOperator, Query, QueryExt, Sink};
use crate::window::{CenteredSlidingWindow, ThreePointWindow};
use std::fmt;
use tracing::debug;

/// Arc length of one unit-step segment with slope `d`
#[inline]
pub fn segment_length(d: f64) -> f64 {
    (1.0 + d * d).sqrt()
}

/// Push query turning raw samples into the curve-length signal
pub struct CurveLength {
    config: CurveLengthConfig,
    inner: Box<dyn Query<i32, f64>>,
}

impl CurveLength {
    /// Build the transform
    ///
    /// Fails when either window width is zero.
    pub fn new(config: &CurveLengthConfig) -> Result<Self> {
        let dc_offset = f64::from(config.dc_offset);
        let taps = config.smoothing_taps as f64;

        let adjust = MapOperator::new(move |raw: i32| f64::from(raw) - dc_offset);
        let smooth = CenteredSlidingWindow::new(
            config.smoothing_taps,
            0.0,
            move |agg: &f64, x: &f64| agg + x / taps,
            move |agg: &f64, x: &f64| agg - x / taps,
        )?;
        let derivative = ThreePointWindow::new(|prev: &f64, _: &f64, next: &f64| (next - prev) / 2.0);
        let length = CenteredSlidingWindow::new(
            config.length_taps,
            0.0,
            |agg: &f64, d: &f64| agg + segment_length(*d),
            |agg: &f64, d: &f64| agg - segment_length(*d),
        )?;

        debug!(
            dc_offset = config.dc_offset,
            smoothing_taps = config.smoothing_taps,
            length_taps = config.length_taps,
            "Built curve-length transform"
        );

        Ok(Self {
            config: config.clone(),
            inner: Box::new(adjust.then(smooth).then(derivative).then(length)),
        })
    }

    /// Configuration the transform was built from
    pub fn config(&self) -> &CurveLengthConfig {
        &self.config
    }

    /// Number of length values produced for `samples` raw samples
    pub fn output_len(&self, samples: usize) -> usize {
        samples
            .saturating_sub(self.config.smoothing_taps / 2)
            .saturating_sub(2)
            .saturating_sub(self.config.length_taps / 2)
    }
}

impl fmt::Debug for CurveLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveLength")
            .field("config", &self.config)
            .finish()
    }
}

impl Query<i32, f64> for CurveLength {
    fn start(&mut self, sink: &mut dyn Sink<f64>) {
        self.inner.start(sink);
    }

    fn next(&mut self, item: i32, sink: &mut dyn Sink<f64>) {
        self.inner.next(item, sink);
    }

    fn end(&mut self, sink: &mut dyn Sink<f64>) {
        self.inner.end(sink);
    }
}

/// Build the curve-length transform for `config`
pub fn curve_length(config: &CurveLengthConfig) -> Result<CurveLength> {
    CurveLength::new(config)
}
