//! Non-interactive side-by-side output for `--print` and `--json`
//!
//! Each row is `<left cell> │ <right cell>`, where a cell is a right-aligned
//! line number, a `-`/`+` sign and the line text, padded or truncated to the
//! column's display width.

use crossterm::style::Stylize;
use serde::Serialize;
use sqldiff_core::{AlignedRow, AlignmentResult, DiffStats, RowStatus};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SEPARATOR: &str = " │ ";
/// Printer width when it cannot be taken from the terminal
pub const DEFAULT_WIDTH: usize = 120;
/// Narrowest column we will render into
const MIN_COLUMN_WIDTH: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
    /// Total output width in columns
    pub width: usize,
    /// Emit ANSI colors
    pub color: bool,
    pub line_numbers: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            color: false,
            line_numbers: true,
        }
    }
}

impl PrintOptions {
    fn column_width(&self) -> usize {
        (self.width.saturating_sub(SEPARATOR.width()) / 2).max(MIN_COLUMN_WIDTH)
    }
}

/// Render both columns followed by a summary line
pub fn render(alignment: &AlignmentResult, stats: &DiffStats, opts: &PrintOptions) -> String {
    let column = opts.column_width();
    let numbers = alignment.line_numbers();
    let mut out = String::new();

    for ((left, right), nums) in alignment.rows().zip(&numbers) {
        let line = format!(
            "{}{}{}",
            format_cell(left, nums.left, column, opts),
            SEPARATOR,
            format_cell(right, nums.right, column, opts)
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&summary(stats));
    out.push('\n');
    out
}

/// `N insertions(+), M deletions(-)`
pub fn summary(stats: &DiffStats) -> String {
    format!(
        "{} insertions(+), {} deletions(-)",
        stats.insertions, stats.deletions
    )
}

fn format_cell(
    row: &AlignedRow,
    line_number: Option<usize>,
    width: usize,
    opts: &PrintOptions,
) -> String {
    let sign = match row.status {
        RowStatus::Added => '+',
        RowStatus::Removed => '-',
        RowStatus::Unchanged | RowStatus::Empty => ' ',
    };

    let mut cell = String::new();
    if opts.line_numbers {
        match line_number {
            Some(n) => cell.push_str(&format!("{n:>4} ")),
            None => cell.push_str("     "),
        }
    }
    if row.is_placeholder() {
        cell.push(' ');
    } else {
        cell.push(sign);
        cell.push(' ');
        cell.push_str(row.text().unwrap_or_default());
    }

    let cell = fit_width(&cell, width);
    if !opts.color {
        return cell;
    }
    match row.status {
        RowStatus::Added => cell.green().to_string(),
        RowStatus::Removed => cell.red().to_string(),
        RowStatus::Unchanged | RowStatus::Empty => cell,
    }
}

/// Truncate or pad `text` to exactly `width` display columns
pub fn fit_width(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len().max(width));
    let mut used = 0;
    for c in text.chars() {
        // Tabs would break alignment
        let c = if c == '\t' { ' ' } else { c };
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    stats: &'a DiffStats,
    equivalent: bool,
    #[serde(flatten)]
    alignment: &'a AlignmentResult,
}

/// Stats, equivalence and both row columns as pretty-printed JSON
pub fn render_json(
    alignment: &AlignmentResult,
    stats: &DiffStats,
    equivalent: bool,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        stats,
        equivalent,
        alignment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqldiff_core::{align, compute_diff, DiffStats};

    fn render_texts(old: &str, new: &str, width: usize) -> String {
        let segments = compute_diff(old, new);
        let stats = DiffStats::from_segments(&segments);
        let opts = PrintOptions {
            width,
            ..PrintOptions::default()
        };
        render(&align(&segments), &stats, &opts)
    }

    #[test]
    fn test_fit_width_pads_and_truncates() {
        assert_eq!(fit_width("abc", 5), "abc  ");
        assert_eq!(fit_width("abcdef", 4), "abcd");
        assert_eq!(fit_width("", 2), "  ");
    }

    #[test]
    fn test_fit_width_counts_wide_chars() {
        // Each CJK char is two columns; the third does not fit
        assert_eq!(fit_width("名前表", 5), "名前 ");
        assert_eq!(fit_width("名前", 4).width(), 4);
    }

    #[test]
    fn test_render_replacement() {
        let out = render_texts("SELECT 1\nNVL(a, 0)", "SELECT 1\nCOALESCE(a, 0)", 47);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "   1   SELECT 1        │    1   SELECT 1",
                "   2 - NVL(a, 0)       │",
                "                       │    2 + COALESCE(a, 0)",
                "1 insertions(+), 1 deletions(-)",
            ]
        );
    }

    #[test]
    fn test_render_without_line_numbers() {
        let segments = compute_diff("a", "b");
        let stats = DiffStats::from_segments(&segments);
        let opts = PrintOptions {
            width: 23,
            color: false,
            line_numbers: false,
        };
        let out = render(&align(&segments), &stats, &opts);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "- a        │");
        assert_eq!(lines[1], "           │ + b");
    }

    #[test]
    fn test_render_colors_changed_rows() {
        let segments = compute_diff("a", "b");
        let stats = DiffStats::from_segments(&segments);
        let opts = PrintOptions {
            color: true,
            ..PrintOptions::default()
        };
        let out = render(&align(&segments), &stats, &opts);
        // crossterm drops escape codes when NO_COLOR is set
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(out.contains("\u{1b}["));
        }
        assert!(out.contains("- a"));
    }

    #[test]
    fn test_render_empty_inputs() {
        assert_eq!(render_texts("", "", 80), "0 insertions(+), 0 deletions(-)\n");
    }

    #[test]
    fn test_json_report_shape() {
        let segments = compute_diff("SELECT a\nFROM t", "SELECT a FROM t");
        let stats = DiffStats::from_segments(&segments);
        let json = render_json(&align(&segments), &stats, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["equivalent"], true);
        assert_eq!(value["stats"]["insertions"], 1);
        assert_eq!(value["stats"]["deletions"], 2);
        assert_eq!(value["left_rows"].as_array().unwrap().len(), 3);
        assert_eq!(value["right_rows"][2]["status"], "added");
        assert_eq!(value["right_rows"][0]["status"], "empty");
    }
}
