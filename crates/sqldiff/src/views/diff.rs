//! Diff view: source and target editors above the side-by-side diff

use super::render_split;
use crate::app::{App, Focus};
use crate::config::ResolvedTheme;
use crate::syntax::HighlightedLines;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_diff(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_editor_pane(frame, app, Focus::Source, panes[0]);
    render_editor_pane(frame, app, Focus::Target, panes[1]);
    render_split(frame, app, rows[1]);
}

/// One of the two statement editors; `pane` is `Focus::Source` or `Focus::Target`
fn render_editor_pane(frame: &mut Frame, app: &mut App, pane: Focus, area: Rect) {
    let editing = app.focus == pane;
    let (label, role) = match pane {
        Focus::Source => (&app.source_label, "source"),
        _ => (&app.target_label, "target"),
    };
    let title = if editing {
        format!(" {label} ({role}) [editing] ")
    } else {
        format!(" {label} ({role}) ")
    };
    let block = pane_block(title, editing, &app.theme);
    let inner = block.inner(area);

    let (editor, highlighted) = match pane {
        Focus::Source => (&mut app.source_editor, &app.syntax_cache.source),
        _ => (&mut app.target_editor, &app.syntax_cache.target),
    };
    editor.ensure_cursor_visible(inner.height as usize);
    let scroll = editor.scroll();

    let lines = text_lines(
        editor.lines().iter().map(String::as_str),
        highlighted,
        app.syntax_enabled,
        &app.theme,
    );
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);

    if editing && inner.width > 0 && inner.height > 0 {
        let (row, col) = editor.cursor();
        let x = inner.x + (col as u16).min(inner.width - 1);
        let y = inner.y + (row - scroll) as u16;
        frame.set_cursor_position((x, y));
    }
}

fn pane_block(title: String, active: bool, theme: &ResolvedTheme) -> Block<'static> {
    let border = if active {
        theme.border_active
    } else {
        theme.border
    };
    let title_style = if active {
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, title_style))
        .border_style(Style::default().fg(border))
}

fn text_lines<'a>(
    lines: impl Iterator<Item = &'a str>,
    highlighted: &HighlightedLines,
    syntax: bool,
    theme: &ResolvedTheme,
) -> Vec<Line<'static>> {
    lines
        .enumerate()
        .map(|(idx, text)| match highlighted.get(idx).filter(|_| syntax) {
            Some(spans) => Line::from(
                spans
                    .iter()
                    .map(|s| Span::styled(s.text.clone(), s.style))
                    .collect::<Vec<_>>(),
            ),
            None => Line::from(Span::styled(text.to_string(), Style::default().fg(theme.text))),
        })
        .collect()
}
