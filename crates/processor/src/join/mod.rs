//! Streaming joins over two logical sources merged into one physical stream
//!
//! Both joins consume a stream of [`Either`] items: each item belongs to the
//! left or the right source, never both. A matching pair is emitted exactly
//! once, at the moment its second member arrives.
//!
//! - [`EquiJoin`]: key equality, hash-indexed per side
//! - [`ThetaJoin`]: arbitrary predicate, exhaustive nested loop
//!
//! Both retain every item ever seen for the lifetime of the run.

pub mod equi;
pub mod theta;

pub use equi::EquiJoin;
pub use theta::ThetaJoin;

use serde::{Deserialize, Serialize};

/// An item tagged as coming from the left or the right source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Either<L, R> {
    /// Item of the left source
    Left(L),
    /// Item of the right source
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Whether this item belongs to the left source
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Whether this item belongs to the right source
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// The left item, if any
    pub fn left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// The right item, if any
    pub fn right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }
}
