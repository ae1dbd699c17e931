//! Diff segments: maximal runs of lines sharing one classification

use serde::{Deserialize, Serialize};

/// Classification of a run of lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Present in both texts
    Unchanged,
    /// Present only in the modified text
    Added,
    /// Present only in the original text
    Removed,
}

impl DiffKind {
    /// True for lines that belong to the original text
    pub fn in_original(self) -> bool {
        matches!(self, DiffKind::Unchanged | DiffKind::Removed)
    }

    /// True for lines that belong to the modified text
    pub fn in_modified(self) -> bool {
        matches!(self, DiffKind::Unchanged | DiffKind::Added)
    }

    pub fn is_change(self) -> bool {
        !matches!(self, DiffKind::Unchanged)
    }
}

/// A contiguous run of lines with the same [`DiffKind`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: DiffKind,
    pub lines: Vec<String>,
}

impl DiffSegment {
    pub fn new(kind: DiffKind, lines: Vec<String>) -> Self {
        Self { kind, lines }
    }

    pub fn unchanged<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(DiffKind::Unchanged, lines.into_iter().map(Into::into).collect())
    }

    pub fn added<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(DiffKind::Added, lines.into_iter().map(Into::into).collect())
    }

    pub fn removed<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(DiffKind::Removed, lines.into_iter().map(Into::into).collect())
    }

    /// Number of lines in the run
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Accumulates classified lines into maximal segments.
///
/// Removed and added lines seen between two unchanged lines are held back and
/// flushed removed-first, so every change region yields at most one
/// `Removed` segment followed by at most one `Added` segment regardless of
/// the order the edit script produced them in.
#[derive(Debug, Default)]
pub(crate) struct SegmentBuilder {
    segments: Vec<DiffSegment>,
    removed: Vec<String>,
    added: Vec<String>,
}

impl SegmentBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, kind: DiffKind, line: &str) {
        match kind {
            DiffKind::Removed => self.removed.push(line.to_string()),
            DiffKind::Added => self.added.push(line.to_string()),
            DiffKind::Unchanged => {
                self.flush_gap();
                self.append(DiffKind::Unchanged, vec![line.to_string()]);
            }
        }
    }

    pub(crate) fn finish(mut self) -> Vec<DiffSegment> {
        self.flush_gap();
        self.segments
    }

    fn flush_gap(&mut self) {
        if !self.removed.is_empty() {
            let removed = std::mem::take(&mut self.removed);
            self.append(DiffKind::Removed, removed);
        }
        if !self.added.is_empty() {
            let added = std::mem::take(&mut self.added);
            self.append(DiffKind::Added, added);
        }
    }

    fn append(&mut self, kind: DiffKind, mut lines: Vec<String>) {
        match self.segments.last_mut() {
            Some(last) if last.kind == kind => last.lines.append(&mut lines),
            _ => self.segments.push(DiffSegment::new(kind, lines)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_coalesces_runs() {
        let mut builder = SegmentBuilder::new();
        builder.push(DiffKind::Unchanged, "a");
        builder.push(DiffKind::Unchanged, "b");
        builder.push(DiffKind::Removed, "c");
        builder.push(DiffKind::Removed, "d");
        builder.push(DiffKind::Unchanged, "e");

        let segments = builder.finish();
        assert_eq!(
            segments,
            vec![
                DiffSegment::unchanged(["a", "b"]),
                DiffSegment::removed(["c", "d"]),
                DiffSegment::unchanged(["e"]),
            ]
        );
    }

    #[test]
    fn test_builder_orders_removed_before_added() {
        let mut builder = SegmentBuilder::new();
        builder.push(DiffKind::Added, "new1");
        builder.push(DiffKind::Removed, "old1");
        builder.push(DiffKind::Added, "new2");
        builder.push(DiffKind::Removed, "old2");

        let segments = builder.finish();
        assert_eq!(
            segments,
            vec![
                DiffSegment::removed(["old1", "old2"]),
                DiffSegment::added(["new1", "new2"]),
            ]
        );
    }

    #[test]
    fn test_builder_empty() {
        assert!(SegmentBuilder::new().finish().is_empty());
    }

    #[test]
    fn test_kind_membership() {
        assert!(DiffKind::Unchanged.in_original());
        assert!(DiffKind::Unchanged.in_modified());
        assert!(DiffKind::Removed.in_original());
        assert!(!DiffKind::Removed.in_modified());
        assert!(!DiffKind::Added.in_original());
        assert!(DiffKind::Added.is_change());
        assert!(!DiffKind::Unchanged.is_change());
    }
}
