//! Aggregation module
//!
//! - [`GroupBy`]: keyed blocking aggregation emitted in first-seen key order
//! - [`Aggregator`]: incremental statistics ([`AverageAggregator`],
//!   [`StandardDeviationAggregator`]) and [`AggregateOperator`], which runs
//!   any aggregator over a stream and emits its result at end-of-stream
//!
//! # Example
//!
//! ```rust
//! use processor::aggregation::{AggregateOperator, AverageAggregator};
//! use processor::pipeline::collect;
//!
//! let mut mean = AggregateOperator::new(AverageAggregator::new());
//! assert_eq!(collect(vec![10.0, 20.0, 30.0], &mut mean), vec![20.0]);
//! ```

mod aggregator;
mod group_by;
mod operator;
mod stats;

pub use aggregator::Aggregator;
pub use group_by::GroupBy;
pub use operator::AggregateOperator;
pub use stats::{AverageAggregator, Deviation, Moments, StandardDeviationAggregator};
