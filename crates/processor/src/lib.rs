//! Push-based stream processor for single-pass ECG analytics
//!
//! This crate provides incremental streaming operators and the beat
//! detection pipeline built from them.
//!
//! - [`pipeline`]: the `start`/`next`/`end` push protocol, stateless operators,
//!   sequential and lock-step parallel composition, sinks and the executor
//! - [`window`]: centered sliding window with O(1) insert/retract and the
//!   three-point neighborhood transform
//! - [`join`]: hash-indexed equi-join and nested-loop theta-join over tagged streams
//! - [`aggregation`]: keyed [`GroupBy`] and incremental statistics
//! - [`ecg`]: curve length, peak detection, threshold calibration and HRV
//! - [`source`]: CSV recordings as lazy sample sources
//!
//! Everything runs on the caller's thread. Each `next` call pushes its
//! results through the whole downstream chain before returning.

pub mod aggregation;
pub mod config;
pub mod ecg;
pub mod error;
pub mod join;
pub mod pipeline;
pub mod source;
pub mod window;

// Re-export commonly used types
pub use aggregation::{
    AggregateOperator, Aggregator, AverageAggregator, GroupBy, StandardDeviationAggregator,
};

pub use config::{CurveLengthConfig, DetectorConfig, HeartRateConfig, ProcessorConfig, SourceConfig};

pub use ecg::{
    calibrate, calibrate_threshold, curve_length, peaks, Calibration, CurveLength, Detect,
    HrvSummary, PeakDetector, Vtl, VtlCombiner,
};

pub use error::{ProcessorError, Result as ProcessorResult, SourceError, WindowError};

pub use join::{Either, EquiJoin, ThetaJoin};

pub use pipeline::{
    collect, CombineFn, Combiner, Collector, ExecutorStats, FilterOperator, Identity,
    LoggingSink, MapOperator, Parallel, Pipeline, Query, QueryExt, ScanOperator, Sink,
    StreamExecutor,
};

pub use source::{read_samples, EcgCsvSource};

pub use window::{CenteredSlidingWindow, ThreePointWindow};
