//! Comparison table: one row per catalog entry with its match status

use crate::app::App;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use sqldiff_core::{normalize_whitespace, ComparisonStatus};

pub fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let header_style = Style::default()
        .fg(theme.primary)
        .add_modifier(Modifier::BOLD);

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Name"),
        Cell::from(app.source_label.as_str()),
        Cell::from(app.target_label.as_str()),
        Cell::from("Status"),
    ])
    .style(header_style);

    let rows: Vec<Row> = app
        .catalog
        .comparisons()
        .iter()
        .zip(&app.table_rows)
        .map(|(comparison, row)| {
            let status = match row.status {
                ComparisonStatus::Match => {
                    Span::styled("✓ Match", Style::default().fg(theme.success))
                }
                ComparisonStatus::Differs => Span::styled(
                    format!("± {}/{}", row.stats.insertions, row.stats.deletions),
                    Style::default().fg(theme.warning),
                ),
            };
            Row::new(vec![
                Cell::from(format!("{}", comparison.id)),
                Cell::from(comparison.name.clone()),
                Cell::from(normalize_whitespace(&comparison.source)),
                Cell::from(normalize_whitespace(&comparison.target)),
                Cell::from(Line::from(status)),
            ])
            .style(Style::default().fg(theme.text))
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(22),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(10),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Comparisons ")
        .border_style(Style::default().fg(theme.border));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(theme.border)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut state);
}
