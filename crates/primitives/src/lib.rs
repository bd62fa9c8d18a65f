//! Core types shared by the decoration pipeline: ranges, revisions, and the
//! host-owned document.

/// Host document with a monotonically advancing revision.
pub mod document;
/// Half-open character ranges.
pub mod range;
/// Rope lookups used by node detection rules.
pub mod rope;
/// Ordered, disjoint sets of on-screen ranges.
pub mod visible;

pub use document::{Document, Revision};
pub use range::{CharIdx, RangeError, TextRange};
pub use ropey::{Rope, RopeSlice};
pub use visible::VisibleRanges;
