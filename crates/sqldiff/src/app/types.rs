use sqldiff_core::{ComparisonStatus, DiffStats};
use std::time::{Duration, Instant};

/// How long a status line message stays visible
pub(crate) const STATUS_TTL: Duration = Duration::from_secs(4);

/// Lines kept above a change when jumping to it
pub(crate) const CHANGE_CONTEXT: usize = 2;

/// Top-level view (the two tabs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// All comparisons with their match status
    Table,
    /// Editors plus the side-by-side diff of one comparison
    Diff,
}

impl ViewMode {
    pub fn index(self) -> usize {
        match self {
            ViewMode::Table => 0,
            ViewMode::Diff => 1,
        }
    }
}

/// Which part of the diff view receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Scrolling the side-by-side diff
    Diff,
    /// Editing the source pane
    Source,
    /// Editing the target pane
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub(crate) created: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created.elapsed() >= STATUS_TTL
    }
}

/// Cached summary of one catalog entry for the table view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRow {
    pub status: ComparisonStatus,
    pub stats: DiffStats,
}
