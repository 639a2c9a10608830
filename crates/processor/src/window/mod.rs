//! Count-based windowing operators
//!
//! # Centered sliding window
//!
//! [`CenteredSlidingWindow`] keeps the last `W` items in a fixed ring buffer
//! and maintains an aggregate incrementally with an `insert` / `remove` pair,
//! so each item costs O(1) instead of the O(W) of recomputing the window.
//!
//! ```text
//! start:     [ n  n | .  .  . ]     n = neutral pre-load (W/2 slots)
//! item 3:    [ n  n | x0 x1 x2 ]    first emission, centered on x0
//! item 6:    [ x3 x4 | x5 x1 x2 ]   x0 overwritten after remove, centered on x3
//! ```
//!
//! Output starts `W / 2` items late and then follows the input one-for-one.
//! The trailing `W / 2` centers are never emitted.
//!
//! # Three-point window
//!
//! [`ThreePointWindow`] applies a stateless function to each
//! (previous, current, next) neighborhood, e.g. a centered derivative.

pub mod centered;
pub mod three_point;

pub use centered::CenteredSlidingWindow;
pub use three_point::ThreePointWindow;
