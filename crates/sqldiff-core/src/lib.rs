//! sqldiff core - line diff engine with side-by-side alignment
//!
//! This library computes line-level edit scripts between two texts and
//! projects them into two vertically synchronized columns for paired
//! rendering.

pub mod align;
pub mod comparison;
pub mod diff;
pub mod equiv;
mod lcs;
mod myers;
pub mod segment;

pub use align::{align, align_texts, AlignedRow, AlignmentResult, RowNumbers, RowStatus};
pub use comparison::{Comparison, ComparisonStatus};
pub use diff::{compute_diff, split_lines, DiffAlgorithm, DiffEngine, DiffResult, DiffStats};
pub use equiv::{is_equivalent, normalize_whitespace};
pub use segment::{DiffKind, DiffSegment};
