//! Side-by-side diff with synchronized scrolling

use crate::app::App;
use crate::config::ResolvedTheme;
use crate::syntax::{HighlightedLines, SyntaxSpan};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use sqldiff_core::{AlignedRow, RowNumbers, RowStatus};

/// Gutter width with line numbers: "1234 - "
const GUTTER_WIDTH: u16 = 7;
/// Gutter width without line numbers: "- "
const SIGN_WIDTH: u16 = 2;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Render both aligned columns into `area`
pub fn render_split(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![
            Span::raw(" Differences "),
            Span::styled(
                format!("+{}", app.stats.insertions),
                Style::default().fg(app.theme.added),
            ),
            Span::raw(" "),
            Span::styled(
                format!("-{} ", app.stats.deletions),
                Style::default().fg(app.theme.removed),
            ),
        ]))
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.diff_viewport_height = inner.height as usize;
    app.clamp_scroll();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let numbers = app.alignment.line_numbers();
    render_column(frame, app, &numbers, Side::Left, chunks[0]);
    render_column(frame, app, &numbers, Side::Right, chunks[1]);
}

fn render_column(frame: &mut Frame, app: &App, numbers: &[RowNumbers], side: Side, area: Rect) {
    let gutter_width = if app.line_numbers {
        GUTTER_WIDTH
    } else {
        SIGN_WIDTH
    };
    let mut constraints = vec![Constraint::Length(gutter_width), Constraint::Min(0)];
    if side == Side::Left {
        // Separator between the two columns
        constraints.push(Constraint::Length(1));
    }
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let (rows, highlighted) = match side {
        Side::Left => (&app.alignment.left_rows, &app.syntax_cache.source),
        Side::Right => (&app.alignment.right_rows, &app.syntax_cache.target),
    };

    let visible_height = area.height as usize;
    let mut gutter_lines: Vec<Line> = Vec::with_capacity(visible_height);
    let mut content_lines: Vec<Line> = Vec::with_capacity(visible_height);

    for (row, nums) in rows
        .iter()
        .zip(numbers)
        .skip(app.scroll_offset)
        .take(visible_height)
    {
        let line_number = match side {
            Side::Left => nums.left,
            Side::Right => nums.right,
        };
        gutter_lines.push(gutter_line(row, line_number, app.line_numbers, &app.theme));
        content_lines.push(content_line(
            row,
            line_number,
            highlighted,
            app.syntax_enabled,
            &app.theme,
        ));
    }

    frame.render_widget(Paragraph::new(gutter_lines), chunks[0]);
    frame.render_widget(
        Paragraph::new(content_lines).scroll((0, app.horizontal_scroll as u16)),
        chunks[1],
    );

    if side == Side::Left {
        let border = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(app.theme.border));
        frame.render_widget(border, chunks[2]);
    }
}

fn sign(status: RowStatus) -> &'static str {
    match status {
        RowStatus::Added => "+",
        RowStatus::Removed => "-",
        RowStatus::Unchanged | RowStatus::Empty => " ",
    }
}

fn gutter_line(
    row: &AlignedRow,
    line_number: Option<usize>,
    show_numbers: bool,
    theme: &ResolvedTheme,
) -> Line<'static> {
    let sign_style = match row.status {
        RowStatus::Added => Style::default()
            .fg(theme.added)
            .add_modifier(Modifier::BOLD),
        RowStatus::Removed => Style::default()
            .fg(theme.removed)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(theme.line_number),
    };

    let mut spans = Vec::with_capacity(4);
    if show_numbers {
        let num = line_number.map(|n| format!("{:4}", n)).unwrap_or_else(|| " ".repeat(4));
        spans.push(Span::styled(num, Style::default().fg(theme.line_number)));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(sign(row.status), sign_style));
    spans.push(Span::raw(" "));
    Line::from(spans)
}

fn content_line(
    row: &AlignedRow,
    line_number: Option<usize>,
    highlighted: &HighlightedLines,
    syntax: bool,
    theme: &ResolvedTheme,
) -> Line<'static> {
    let Some(text) = row.text() else {
        return Line::default();
    };

    let (fg, bg) = match row.status {
        RowStatus::Added => (theme.added, Some(theme.added_bg)),
        RowStatus::Removed => (theme.removed, Some(theme.removed_bg)),
        _ => (theme.text, None),
    };

    let spans = line_number
        .filter(|_| syntax)
        .and_then(|n| highlighted.get(n - 1))
        .map(|spans| syntax_spans(spans, bg))
        .unwrap_or_else(|| vec![Span::styled(text.to_string(), Style::default().fg(fg))]);

    let line = Line::from(spans);
    match bg {
        Some(bg) => line.style(Style::default().bg(bg)),
        None => line,
    }
}

fn syntax_spans(spans: &[SyntaxSpan], bg: Option<ratatui::style::Color>) -> Vec<Span<'static>> {
    spans
        .iter()
        .map(|span| {
            let style = match bg {
                Some(bg) => span.style.bg(bg),
                None => span.style,
            };
            Span::styled(span.text.clone(), style)
        })
        .collect()
}
