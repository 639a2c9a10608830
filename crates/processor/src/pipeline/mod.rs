//! Push-pipeline protocol and composition
//!
//! This module provides the lifecycle contract shared by every operator and
//! sink, together with the plumbing needed to assemble single-pass pipelines:
//! - [`Query`] / [`Sink`]: `start`, `next`, `end`
//! - Stateless operators (identity, map, filter, scan)
//! - Sequential ([`Pipeline`]) and lock-step parallel ([`Parallel`]) composition
//! - Terminal sinks and a synchronous [`StreamExecutor`]
//!
//! # Example
//!
//! ```rust
//! use processor::pipeline::{collect, FilterOperator, MapOperator, QueryExt};
//!
//! let mut query = MapOperator::new(|raw: i32| raw as f64 - 1024.0)
//!     .then(FilterOperator::new(|x: &f64| *x > 0.0));
//!
//! let out = collect(vec![1000, 1030, 1100], &mut query);
//! assert_eq!(out, vec![6.0, 76.0]);
//! ```

pub mod compose;
pub mod executor;
pub mod operator;
pub mod sink;

pub use compose::{CombineFn, Combiner, Parallel, Pipeline, QueryExt};
pub use executor::{collect, try_collect, ExecutorStats, StreamExecutor};
pub use operator::{FilterOperator, Identity, MapOperator, Query, ScanOperator, Sink};
pub use sink::{Collector, LoggingSink};
