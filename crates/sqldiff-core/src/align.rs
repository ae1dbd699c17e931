//! Side-by-side alignment of diff segments
//!
//! Projects the single linear list of [`DiffSegment`]s into two parallel row
//! sequences. Row `i` of the left column and row `i` of the right column are
//! rendered on the same visual line; the side that has no line for an
//! added/removed run receives `Empty` placeholder rows.
//!
//! A removed run followed by an added run is not compacted into shared rows:
//! the removed lines occupy their own rows (blank on the right), then the
//! added lines occupy the following rows (blank on the left).

use crate::diff::compute_diff;
use crate::segment::{DiffKind, DiffSegment};
use serde::{Deserialize, Serialize};

/// Rendering status of a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Unchanged,
    Added,
    Removed,
    /// Blank placeholder opposite an added/removed row
    Empty,
}

impl From<DiffKind> for RowStatus {
    fn from(kind: DiffKind) -> Self {
        match kind {
            DiffKind::Unchanged => RowStatus::Unchanged,
            DiffKind::Added => RowStatus::Added,
            DiffKind::Removed => RowStatus::Removed,
        }
    }
}

/// One visual row in either column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub left: Option<String>,
    pub right: Option<String>,
    pub status: RowStatus,
}

impl AlignedRow {
    pub fn unchanged(line: &str) -> Self {
        Self {
            left: Some(line.to_string()),
            right: Some(line.to_string()),
            status: RowStatus::Unchanged,
        }
    }

    pub fn removed(line: &str) -> Self {
        Self {
            left: Some(line.to_string()),
            right: None,
            status: RowStatus::Removed,
        }
    }

    pub fn added(line: &str) -> Self {
        Self {
            left: None,
            right: Some(line.to_string()),
            status: RowStatus::Added,
        }
    }

    pub fn empty() -> Self {
        Self {
            left: None,
            right: None,
            status: RowStatus::Empty,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.status == RowStatus::Empty
    }

    /// The text shown in this row, whichever side it lives on
    pub fn text(&self) -> Option<&str> {
        self.left.as_deref().or(self.right.as_deref())
    }
}

/// 1-based line numbers for a paired row (None on placeholder sides)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowNumbers {
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// Two equal-length columns of rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub left_rows: Vec<AlignedRow>,
    pub right_rows: Vec<AlignedRow>,
}

impl AlignmentResult {
    /// Number of visual rows (both columns have this length)
    pub fn len(&self) -> usize {
        self.left_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left_rows.is_empty()
    }

    /// Iterate visually paired rows
    pub fn rows(&self) -> impl Iterator<Item = (&AlignedRow, &AlignedRow)> {
        self.left_rows.iter().zip(self.right_rows.iter())
    }

    /// Original/modified line numbers for every row index
    pub fn line_numbers(&self) -> Vec<RowNumbers> {
        let mut left_line = 0;
        let mut right_line = 0;
        self.rows()
            .map(|(left, right)| {
                let mut numbers = RowNumbers::default();
                if left.left.is_some() {
                    left_line += 1;
                    numbers.left = Some(left_line);
                }
                if right.right.is_some() {
                    right_line += 1;
                    numbers.right = Some(right_line);
                }
                numbers
            })
            .collect()
    }

    /// Row indices where a run of added/removed rows begins
    pub fn change_starts(&self) -> Vec<usize> {
        let mut starts = Vec::new();
        let mut in_change = false;
        for (idx, (left, _)) in self.rows().enumerate() {
            let changed = left.status != RowStatus::Unchanged;
            if changed && !in_change {
                starts.push(idx);
            }
            in_change = changed;
        }
        starts
    }
}

/// Align diff segments into two synchronized columns
pub fn align(segments: &[DiffSegment]) -> AlignmentResult {
    let rows: usize = segments.iter().map(DiffSegment::len).sum();
    let mut result = AlignmentResult {
        left_rows: Vec::with_capacity(rows),
        right_rows: Vec::with_capacity(rows),
    };

    for segment in segments {
        for line in &segment.lines {
            match segment.kind {
                DiffKind::Unchanged => {
                    result.left_rows.push(AlignedRow::unchanged(line));
                    result.right_rows.push(AlignedRow::unchanged(line));
                }
                DiffKind::Removed => {
                    result.left_rows.push(AlignedRow::removed(line));
                    result.right_rows.push(AlignedRow::empty());
                }
                DiffKind::Added => {
                    result.left_rows.push(AlignedRow::empty());
                    result.right_rows.push(AlignedRow::added(line));
                }
            }
        }
    }

    result
}

/// Diff two texts and align the result
pub fn align_texts(original: &str, modified: &str) -> AlignmentResult {
    align(&compute_diff(original, modified))
}
