//! Threshold-triggered peak picker with a refractory period
//!
//! ```text
//!            length > threshold                 buffer full
//!   Armed ─────────────────────▶ Buffering ─────────────────▶ Cooldown
//!     ▲                                     emit max-raw ts      │
//!     └──────────────────────────────────────────────────────────┘
//!                       cooldown items discarded
//! ```

use crate::config::DetectorConfig;
use crate::error::{ProcessorError, Result};
use std::cmp::Ordering;
use crate::pipeline::{Query, Sink};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// One synchronized sample: raw value, sample index and curve length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vtl {
    /// Raw signal value
    pub raw: i32,

    /// Sample index, starting at 0
    pub timestamp: u64,

    /// Curve length at this sample
    pub length: f64,
}

impl Vtl {
    /// Create a triple
    pub fn new(raw: i32, timestamp: u64, length: f64) -> Self {
        Self {
            raw,
            timestamp,
            length,
        }
    }
}

/// Detector state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    /// Discarding items; the payload is the number still to discard
    Cooldown(usize),
    /// Comparing each item's length against the threshold
    Armed,
    /// Collecting the search window after a threshold crossing
    Buffering,
}

/// Peak detector over a [`Vtl`] stream, emitting peak timestamps
#[derive(Debug, Clone)]
pub struct Detect {
    threshold: f64,
    cooldown_len: usize,
    capacity: usize,
    cooldown: usize,
    buffering: bool,
    buffer: Vec<Vtl>,
    last_peak: Option<Vtl>,
}

impl Detect {
    /// Create a detector with an explicit threshold
    ///
    /// Fails when the configured search window is empty or the threshold is
    /// not a finite number.
    pub fn new(threshold: f64, config: &DetectorConfig) -> Result<Self> {
        config.validate()?;
        if !threshold.is_finite() {
            return Err(ProcessorError::configuration(format!(
                "detection threshold must be finite, got {}",
                threshold
            )));
        }
        Ok(Self::build(threshold, config))
    }

    /// Create a detector with the default cooldown and search window
    pub fn with_threshold(threshold: f64) -> Self {
        Self::build(threshold, &DetectorConfig::default())
    }

    fn build(threshold: f64, config: &DetectorConfig) -> Self {
        Self {
            threshold,
            cooldown_len: config.cooldown,
            capacity: config.search_window,
            cooldown: 0,
            buffering: false,
            buffer: Vec::with_capacity(config.search_window),
            last_peak: None,
        }
    }

    /// Decision threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Current state
    pub fn state(&self) -> DetectorState {
        if self.cooldown > 0 {
            DetectorState::Cooldown(self.cooldown)
        } else if self.buffering {
            DetectorState::Buffering
        } else {
            DetectorState::Armed
        }
    }

    /// Items currently held in the search buffer
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// The triple of the most recently emitted peak
    pub fn last_peak(&self) -> Option<&Vtl> {
        self.last_peak.as_ref()
    }

    fn reset(&mut self) {
        self.cooldown = 0;
        self.buffering = false;
        self.buffer.clear();
        self.last_peak = None;
    }

    /// Emit the first maximum-raw triple of the buffer and enter cooldown
    fn pick_peak(&mut self, sink: &mut dyn Sink<u64>) {
        let mut best: Option<Vtl> = None;
        for vtl in &self.buffer {
            if best.map_or(true, |b| vtl.raw > b.raw) {
                best = Some(*vtl);
            }
        }

        if let Some(peak) = best {
            debug!(
                timestamp = peak.timestamp,
                raw = peak.raw,
                length = peak.length,
                searched = self.buffer.len(),
                "Peak detected"
            );
            self.last_peak = Some(peak);
            sink.next(peak.timestamp);
            self.cooldown = self.cooldown_len;
        }

        self.buffer.clear();
        self.buffering = false;
    }
}

impl Query<Vtl, u64> for Detect {
    fn start(&mut self, _sink: &mut dyn Sink<u64>) {
        self.reset();
        trace!(threshold = self.threshold, "Detector started");
    }

    fn next(&mut self, item: Vtl, sink: &mut dyn Sink<u64>) {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return;
        }

        if !self.buffering {
            // NaN on either side never crosses
            if item.length.partial_cmp(&self.threshold) != Some(Ordering::Greater) {
                return;
            }
            trace!(timestamp = item.timestamp, length = item.length, "Threshold crossed");
            self.buffering = true;
        }

        self.buffer.push(item);
        if self.buffer.len() >= self.capacity {
            self.pick_peak(sink);
        }
    }

    fn end(&mut self, sink: &mut dyn Sink<u64>) {
        if !self.buffer.is_empty() {
            debug!(buffered = self.buffer.len(), "Searching partial buffer at end of stream");
            self.pick_peak(sink);
        }
        sink.end();
    }
}
