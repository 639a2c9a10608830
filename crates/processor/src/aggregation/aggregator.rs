use std::fmt::Debug;

/// Incremental statistic over a stream of values
///
/// The result can be read at any point. Too few values resolve to a
/// sentinel (NaN for the numeric statistics here), never to an error.
pub trait Aggregator: Debug {
    type Input;
    type Output;

    /// Absorb one value
    fn update(&mut self, value: Self::Input);

    /// Current result
    fn finalize(&self) -> Self::Output;

    /// Forget every absorbed value
    fn reset(&mut self);

    /// Number of values absorbed since the last reset
    fn count(&self) -> u64;
}
