//! Line diff engine

use crate::segment::{DiffKind, DiffSegment, SegmentBuilder};
use crate::{lcs, myers};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// One step of a line edit script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edit {
    Keep,
    Remove,
    Add,
}

/// Algorithm used for the changed middle of the two texts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffAlgorithm {
    /// Dynamic-programming LCS table, O(n·m)
    Lcs,
    /// Myers greedy O(ND) search
    Myers,
    /// LCS for small inputs, Myers above [`DiffEngine::LCS_CELL_LIMIT`]
    #[default]
    Auto,
}

/// Line counts of a diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffStats {
    pub fn from_segments(segments: &[DiffSegment]) -> Self {
        segments.iter().fold(Self::default(), |mut stats, segment| {
            match segment.kind {
                DiffKind::Added => stats.insertions += segment.len(),
                DiffKind::Removed => stats.deletions += segment.len(),
                DiffKind::Unchanged => {}
            }
            stats
        })
    }

    pub fn is_empty(&self) -> bool {
        self.insertions == 0 && self.deletions == 0
    }
}

/// Result of diffing two texts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub segments: Vec<DiffSegment>,
    pub stats: DiffStats,
}

impl DiffResult {
    /// Whether any line was added or removed
    pub fn has_changes(&self) -> bool {
        self.segments.iter().any(|s| s.kind.is_change())
    }

    /// Lines of the original text, rebuilt from the segments
    pub fn original_lines(&self) -> Vec<&str> {
        self.lines_where(DiffKind::in_original)
    }

    /// Lines of the modified text, rebuilt from the segments
    pub fn modified_lines(&self) -> Vec<&str> {
        self.lines_where(DiffKind::in_modified)
    }

    fn lines_where(&self, keep: fn(DiffKind) -> bool) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|s| keep(s.kind))
            .flat_map(|s| s.lines.iter().map(String::as_str))
            .collect()
    }
}

/// Main diff engine
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine {
    algorithm: DiffAlgorithm,
}

impl DiffEngine {
    /// Largest LCS table (in cells) `Auto` will build before switching to Myers
    pub const LCS_CELL_LIMIT: usize = 4_000_000;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, algorithm: DiffAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn algorithm(&self) -> DiffAlgorithm {
        self.algorithm
    }

    /// Diff two texts line by line
    pub fn diff_strings(&self, original: &str, modified: &str) -> DiffResult {
        let old_lines = split_lines(original);
        let new_lines = split_lines(modified);
        let segments = self.diff_lines(&old_lines, &new_lines);
        let stats = DiffStats::from_segments(&segments);
        DiffResult { segments, stats }
    }

    /// Diff two pre-split line sequences
    pub fn diff_lines(&self, old_lines: &[&str], new_lines: &[&str]) -> Vec<DiffSegment> {
        let (old_ids, new_ids) = intern(old_lines, new_lines);

        let prefix = old_ids
            .iter()
            .zip(&new_ids)
            .take_while(|(a, b)| a == b)
            .count();
        let suffix = old_ids[prefix..]
            .iter()
            .rev()
            .zip(new_ids[prefix..].iter().rev())
            .take_while(|(a, b)| a == b)
            .count();

        let old_mid = &old_ids[prefix..old_ids.len() - suffix];
        let new_mid = &new_ids[prefix..new_ids.len() - suffix];

        let mut script = vec![Edit::Keep; prefix];
        script.extend(self.middle_script(old_mid, new_mid));
        script.extend(std::iter::repeat(Edit::Keep).take(suffix));

        build_segments(&script, old_lines, new_lines)
    }

    fn middle_script(&self, old: &[u32], new: &[u32]) -> Vec<Edit> {
        if old.is_empty() || new.is_empty() || !shares_line(old, new) {
            let mut script = vec![Edit::Remove; old.len()];
            script.extend(std::iter::repeat(Edit::Add).take(new.len()));
            return script;
        }

        match self.algorithm {
            DiffAlgorithm::Lcs => lcs::edit_script(old, new),
            DiffAlgorithm::Myers => myers::edit_script(old, new),
            DiffAlgorithm::Auto => {
                let cells = (old.len() + 1).saturating_mul(new.len() + 1);
                if cells <= Self::LCS_CELL_LIMIT {
                    lcs::edit_script(old, new)
                } else {
                    myers::edit_script(old, new)
                }
            }
        }
    }
}

/// Diff two texts with the default engine
pub fn compute_diff(original: &str, modified: &str) -> Vec<DiffSegment> {
    DiffEngine::new().diff_strings(original, modified).segments
}

/// Split text into lines on `'\n'`.
///
/// A single trailing empty line left by a final newline is dropped, so
/// `"a\n"` and `"a"` both yield `["a"]` and the empty string yields nothing.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.split('\n').collect()
}

/// Map each distinct line to a small integer so the algorithms compare ids
fn intern<'a>(old_lines: &[&'a str], new_lines: &[&'a str]) -> (Vec<u32>, Vec<u32>) {
    let mut ids: FxHashMap<&'a str, u32> = FxHashMap::default();
    let mut id_of = |line: &'a str| -> u32 {
        let next = ids.len() as u32;
        *ids.entry(line).or_insert(next)
    };
    let old_ids = old_lines.iter().map(|&l| id_of(l)).collect();
    let new_ids = new_lines.iter().map(|&l| id_of(l)).collect();
    (old_ids, new_ids)
}

/// Whether any interned line occurs on both sides
fn shares_line(old: &[u32], new: &[u32]) -> bool {
    let seen: FxHashSet<u32> = old.iter().copied().collect();
    new.iter().any(|id| seen.contains(id))
}

fn build_segments(script: &[Edit], old_lines: &[&str], new_lines: &[&str]) -> Vec<DiffSegment> {
    let mut builder = SegmentBuilder::new();
    let (mut i, mut j) = (0, 0);
    for edit in script {
        match edit {
            Edit::Keep => {
                builder.push(DiffKind::Unchanged, old_lines[i]);
                i += 1;
                j += 1;
            }
            Edit::Remove => {
                builder.push(DiffKind::Removed, old_lines[i]);
                i += 1;
            }
            Edit::Add => {
                builder.push(DiffKind::Added, new_lines[j]);
                j += 1;
            }
        }
    }
    debug_assert_eq!(i, old_lines.len());
    debug_assert_eq!(j, new_lines.len());
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_trailing_newline() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\n\n"), vec!["a", ""]);
        assert_eq!(split_lines("\n"), vec![""]);
        assert_eq!(split_lines("\n\n"), vec!["", ""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_identical_inputs() {
        let segments = compute_diff("SELECT 1\nSELECT 2", "SELECT 1\nSELECT 2");
        assert_eq!(segments, vec![DiffSegment::unchanged(["SELECT 1", "SELECT 2"])]);
    }

    #[test]
    fn test_both_empty() {
        assert!(compute_diff("", "").is_empty());
    }

    #[test]
    fn test_one_side_empty() {
        assert_eq!(compute_diff("", "a\nb"), vec![DiffSegment::added(["a", "b"])]);
        assert_eq!(compute_diff("a\nb\n", ""), vec![DiffSegment::removed(["a", "b"])]);
    }

    #[test]
    fn test_single_line_replacement() {
        let segments = compute_diff("SELECT NVL(x,0)", "SELECT COALESCE(x,0)");
        assert_eq!(
            segments,
            vec![
                DiffSegment::removed(["SELECT NVL(x,0)"]),
                DiffSegment::added(["SELECT COALESCE(x,0)"]),
            ]
        );
    }

    #[test]
    fn test_removed_middle_line() {
        let segments = compute_diff("A\nB\nC", "A\nC");
        assert_eq!(
            segments,
            vec![
                DiffSegment::unchanged(["A"]),
                DiffSegment::removed(["B"]),
                DiffSegment::unchanged(["C"]),
            ]
        );
    }

    #[test]
    fn test_trailing_newline_is_not_a_change() {
        let segments = compute_diff("a\nb\n", "a\nb");
        assert_eq!(segments, vec![DiffSegment::unchanged(["a", "b"])]);
    }

    #[test]
    fn test_whitespace_is_significant() {
        let segments = compute_diff("SELECT 1\n", "SELECT   1");
        assert_eq!(
            segments,
            vec![
                DiffSegment::removed(["SELECT 1"]),
                DiffSegment::added(["SELECT   1"]),
            ]
        );
    }

    #[test]
    fn test_blank_lines_only() {
        let segments = compute_diff("\n\n\n", "\n");
        assert_eq!(
            segments,
            vec![DiffSegment::unchanged([""]), DiffSegment::removed(["", ""])]
        );
    }

    #[test]
    fn test_oracle_to_postgres_query() {
        let oracle = "SELECT\n  e.employee_id,\n  NVL(e.salary, 0) AS salary\nFROM employees e\nWHERE ROWNUM <= 10\nORDER BY e.employee_id";
        let postgres = "SELECT\n  e.employee_id,\n  COALESCE(e.salary, 0) AS salary\nFROM employees e\nORDER BY e.employee_id\nLIMIT 10";

        let result = DiffEngine::new().diff_strings(oracle, postgres);
        assert_eq!(
            result.segments,
            vec![
                DiffSegment::unchanged(["SELECT", "  e.employee_id,"]),
                DiffSegment::removed(["  NVL(e.salary, 0) AS salary"]),
                DiffSegment::added(["  COALESCE(e.salary, 0) AS salary"]),
                DiffSegment::unchanged(["FROM employees e"]),
                DiffSegment::removed(["WHERE ROWNUM <= 10"]),
                DiffSegment::unchanged(["ORDER BY e.employee_id"]),
                DiffSegment::added(["LIMIT 10"]),
            ]
        );
        assert_eq!(result.stats, DiffStats { insertions: 2, deletions: 2 });
        assert!(result.has_changes());
    }

    #[test]
    fn test_reconstruction_helpers() {
        let old = "a\nb\nc\nd";
        let new = "b\nx\nd\ne";
        let result = DiffEngine::new().diff_strings(old, new);
        assert_eq!(result.original_lines(), split_lines(old));
        assert_eq!(result.modified_lines(), split_lines(new));
    }

    #[test]
    fn test_algorithms_agree_on_unchanged_count() {
        let old = "a\nb\nc\na\nb\nb\na";
        let new = "c\nb\na\nb\na\nc";
        let unchanged = |algorithm| {
            DiffEngine::new()
                .with_algorithm(algorithm)
                .diff_strings(old, new)
                .segments
                .iter()
                .filter(|s| s.kind == DiffKind::Unchanged)
                .map(DiffSegment::len)
                .sum::<usize>()
        };
        assert_eq!(unchanged(DiffAlgorithm::Lcs), 4);
        assert_eq!(unchanged(DiffAlgorithm::Myers), 4);
        assert_eq!(unchanged(DiffAlgorithm::Auto), 4);
    }

    #[test]
    fn test_myers_keeps_removed_before_added() {
        let segments = DiffEngine::new()
            .with_algorithm(DiffAlgorithm::Myers)
            .diff_strings("keep\nold1\nold2\nkeep2", "keep\nnew1\nkeep2")
            .segments;
        assert_eq!(
            segments,
            vec![
                DiffSegment::unchanged(["keep"]),
                DiffSegment::removed(["old1", "old2"]),
                DiffSegment::added(["new1"]),
                DiffSegment::unchanged(["keep2"]),
            ]
        );
    }

    #[test]
    fn test_large_disjoint_inputs() {
        let old: String = (0..8000).map(|i| format!("old {i}\n")).collect();
        let new: String = (0..8000).map(|i| format!("new {i}\n")).collect();
        for algorithm in [DiffAlgorithm::Auto, DiffAlgorithm::Myers, DiffAlgorithm::Lcs] {
            let result = DiffEngine::new()
                .with_algorithm(algorithm)
                .diff_strings(&old, &new);
            assert_eq!(result.segments.len(), 2);
            assert_eq!(result.segments[0].kind, DiffKind::Removed);
            assert_eq!(result.segments[1].kind, DiffKind::Added);
            assert_eq!(
                result.stats,
                DiffStats {
                    insertions: 8000,
                    deletions: 8000
                }
            );
        }
    }

    #[test]
    fn test_unchanged_stats_are_empty() {
        let result = DiffEngine::new().diff_strings("x\ny", "x\ny\n");
        assert!(result.stats.is_empty());
        assert!(!result.has_changes());
    }
}
