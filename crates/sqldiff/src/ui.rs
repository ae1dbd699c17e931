//! UI rendering for the TUI

use crate::app::{App, Focus, StatusKind, ViewMode};
use crate::views::{render_diff, render_table};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const TAB_TITLES: [&str; 2] = ["Comparison Table", "Diff Viewer"];

/// Main drawing function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_tabs(frame, app, chunks[0]);
    match app.view_mode {
        ViewMode::Table => render_table(frame, app, chunks[1]),
        ViewMode::Diff => render_diff(frame, app, chunks[1]),
    }
    draw_status_bar(frame, app, chunks[2]);

    if app.show_help {
        draw_help_popover(frame, app);
    }
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let indicator = format!(" {} ", app.theme_mode.label());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(indicator.width() as u16),
        ])
        .split(area);

    let tabs = Tabs::new(TAB_TITLES)
        .select(app.view_mode.index())
        .style(Style::default().fg(app.theme.text_muted))
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("│");
    frame.render_widget(tabs, chunks[0]);

    let indicator = Paragraph::new(Span::styled(
        indicator,
        Style::default().fg(app.theme.accent),
    ))
    .alignment(Alignment::Right);
    frame.render_widget(indicator, chunks[1]);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode = match (app.view_mode, app.focus) {
        (ViewMode::Table, _) => " TABLE ",
        (ViewMode::Diff, Focus::Diff) => " DIFF ",
        (ViewMode::Diff, Focus::Source) => " EDIT SOURCE ",
        (ViewMode::Diff, Focus::Target) => " EDIT TARGET ",
    };

    let mut left_spans = vec![
        Span::styled(
            mode,
            Style::default()
                .fg(app.theme.background)
                .bg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    match &app.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => app.theme.success,
                StatusKind::Error => app.theme.error,
            };
            left_spans.push(Span::styled(status.text.clone(), Style::default().fg(color)));
        }
        None => {
            let scope = match app.view_mode {
                ViewMode::Table => format!("{} comparisons", app.catalog.len()),
                ViewMode::Diff => app.title(),
            };
            left_spans.push(Span::styled(scope, Style::default().fg(app.theme.text_muted)));
        }
    }

    let mut right_spans = Vec::new();
    if app.view_mode == ViewMode::Diff {
        right_spans.push(Span::styled(
            format!("+{}", app.stats.insertions),
            Style::default().fg(app.theme.success),
        ));
        right_spans.push(Span::raw(" "));
        right_spans.push(Span::styled(
            format!("-{}", app.stats.deletions),
            Style::default().fg(app.theme.error),
        ));
        right_spans.push(Span::raw("  "));
        let (marker, color) = if app.equivalent {
            ("≡ equivalent", app.theme.success)
        } else {
            ("≠ differs", app.theme.warning)
        };
        right_spans.push(Span::styled(marker, Style::default().fg(color)));
        right_spans.push(Span::raw("  "));
    }
    right_spans.push(Span::styled("? help ", Style::default().fg(app.theme.text_muted)));

    let left_width: usize = left_spans.iter().map(|s| s.content.width()).sum();
    let right_width: usize = right_spans.iter().map(|s| s.content.width()).sum();
    let pad = (area.width as usize).saturating_sub(left_width + right_width);

    let mut spans = left_spans;
    spans.push(Span::raw(" ".repeat(pad.max(1))));
    spans.extend(right_spans);

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn draw_help_popover(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let popup_width = 48u16.min(area.width.saturating_sub(4));
    let popup_height = 36u16.min(area.height.saturating_sub(2));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let key_style = Style::default().fg(app.theme.accent);
    let label_style = Style::default().fg(app.theme.text);
    let section_style = Style::default().fg(app.theme.primary);

    let help_line = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::styled(format!("  {:<14}", key), key_style),
            Span::styled(desc.to_string(), label_style),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(" Global", section_style)),
        help_line("Tab", "Switch table / diff view"),
        help_line("t", "Toggle dark / light theme"),
        help_line("? / Esc", "Close help"),
        help_line("q / ^C", "Quit"),
        Line::from(""),
        Line::from(Span::styled(" Table", section_style)),
        help_line("j / k / ↑↓", "Select comparison"),
        help_line("g / G", "First / last"),
        help_line("Enter", "Open diff view"),
        Line::from(""),
        Line::from(Span::styled(" Diff", section_style)),
        help_line("j / k", "Scroll"),
        help_line("^D / ^U", "Scroll half-page"),
        help_line("g / G", "Top / bottom"),
        help_line("n / N", "Next / prev change"),
        help_line("H / L", "Scroll left / right"),
        help_line("e / F2 / ^E", "Edit target"),
        help_line("E / F3", "Edit source"),
        help_line("y / ^Y", "Copy target"),
        help_line("r", "Reset both texts"),
        help_line("#", "Toggle line numbers"),
        help_line("s", "Toggle syntax colors"),
        help_line("^S", "Save target"),
        help_line("^O", "Save source"),
        help_line("Esc", "Back to table"),
        Line::from(""),
        Line::from(Span::styled(" Editor", section_style)),
        help_line("Esc", "Stop editing"),
        help_line("F2 / F3", "Switch to target / source"),
        help_line("^S / ^O", "Save target / source"),
        help_line("^Y", "Copy target"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(app.theme.border_active))
        .style(Style::default().bg(app.theme.background));

    let help_block = Paragraph::new(lines).block(block).alignment(Alignment::Left);
    frame.render_widget(help_block, popup_area);
}
