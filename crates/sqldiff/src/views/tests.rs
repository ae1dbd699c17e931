use crate::app::{App, Focus, ViewMode};
use crate::catalog::Catalog;
use crate::ui::draw;
use crate::views::{render_diff, render_split, render_table};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

fn make_app(source: &str, target: &str) -> App {
    let catalog = Catalog::from_pair("pair", source.to_string(), target.to_string());
    let mut app = App::new(catalog);
    app.open_selected();
    app
}

fn render_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal
        .draw(|frame| {
            let area = frame.area();
            match app.view_mode {
                ViewMode::Table => render_table(frame, app, area),
                ViewMode::Diff => render_diff(frame, app, area),
            }
        })
        .expect("draw");
    terminal.backend().buffer().clone()
}

fn render_split_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal
        .draw(|frame| {
            let area = frame.area();
            render_split(frame, app, area);
        })
        .expect("draw");
    terminal.backend().buffer().clone()
}

fn buffer_text(buf: &Buffer) -> Vec<String> {
    let mut lines = Vec::new();
    for y in 0..buf.area.height {
        let mut line = String::new();
        for x in 0..buf.area.width {
            line.push_str(buf[(x, y)].symbol());
        }
        lines.push(line);
    }
    lines
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.match_indices(needle).count()
}

#[test]
fn test_split_places_replacement_on_separate_rows() {
    let mut app = make_app("SELECT 1\nOLDSIDE\nFROM t", "SELECT 1\nNEWSIDE\nFROM t");
    let lines = buffer_text(&render_split_buffer(&mut app, 80, 10));

    let old_row = lines.iter().position(|l| l.contains("OLDSIDE")).expect("old row");
    let new_row = lines.iter().position(|l| l.contains("NEWSIDE")).expect("new row");
    assert_eq!(new_row, old_row + 1, "added row follows the removed row");
    assert!(!lines[old_row].contains("NEWSIDE"));
    assert!(lines[old_row].contains("- OLDSIDE"));
    assert!(lines[new_row].contains("+ NEWSIDE"));

    let text = lines.join("\n");
    assert_eq!(count_occurrences(&text, "SELECT 1"), 2);
    assert_eq!(count_occurrences(&text, "FROM t"), 2);
}

#[test]
fn test_split_line_numbers_skip_placeholders() {
    let mut app = make_app("a\nb", "a\nX\nb");
    let lines = buffer_text(&render_split_buffer(&mut app, 60, 8));
    let added = lines.iter().find(|l| l.contains("+ X")).expect("added row");
    // Left column of the added row is a blank placeholder
    assert!(added.contains("   2 + X"));
    let b_row = lines.iter().find(|l| l.contains("   2   b")).expect("b row");
    assert!(b_row.contains("   3   b"));
}

#[test]
fn test_split_without_line_numbers() {
    let mut app = make_app("a", "b");
    app.line_numbers = false;
    let text = buffer_text(&render_split_buffer(&mut app, 40, 6)).join("\n");
    assert!(text.contains("- a"));
    assert!(text.contains("+ b"));
    assert!(!text.contains("   1"));
}

#[test]
fn test_split_records_viewport_and_scrolls() {
    let source: Vec<String> = (1..=30).map(|i| format!("line{i:02}")).collect();
    let source = source.join("\n");
    let mut app = make_app(&source, &source);

    render_split_buffer(&mut app, 60, 12);
    assert_eq!(app.diff_viewport_height, 10);

    app.scroll_to_bottom();
    let text = buffer_text(&render_split_buffer(&mut app, 60, 12)).join("\n");
    assert!(text.contains("line30"));
    assert!(!text.contains("line20"));
    assert!(text.contains("line21"));
}

#[test]
fn test_horizontal_scroll_shifts_content() {
    let mut app = make_app("abcdefghijXYZ", "abcdefghijXYZ");
    app.horizontal_scroll = 10;
    let text = buffer_text(&render_split_buffer(&mut app, 60, 6)).join("\n");
    assert!(text.contains("XYZ"));
    assert!(!text.contains("abc"));
}

#[test]
fn test_table_shows_status_column() {
    let mut app = App::new(Catalog::builtin());
    let text = buffer_text(&render_buffer(&mut app, 140, 10)).join("\n");
    assert!(text.contains("Employee Query"));
    assert!(text.contains("Department Summary"));
    assert_eq!(count_occurrences(&text, "✓ Match"), 2);
    assert!(text.contains("± 2/2"));
    assert!(text.contains("▶"));
}

#[test]
fn test_diff_view_shows_both_panes() {
    let mut app = make_app("SELECT NVL(x, 0) FROM t", "SELECT COALESCE(x, 0) FROM t");
    let text = buffer_text(&render_buffer(&mut app, 120, 24)).join("\n");
    assert!(text.contains("Oracle SQL (source)"));
    assert!(text.contains("PostgreSQL (target)"));
    assert!(!text.contains("[editing]"));
    // Each statement shows once in its pane and once in the diff
    assert_eq!(count_occurrences(&text, "NVL(x, 0)"), 2);
    assert_eq!(count_occurrences(&text, "COALESCE(x, 0)"), 2);
}

#[test]
fn test_diff_view_edit_mode_updates_render() {
    let mut app = make_app("SELECT 1", "SELECT 1");
    app.focus = Focus::Target;
    app.target_editor.insert_str("X");
    app.on_text_edited();

    let text = buffer_text(&render_buffer(&mut app, 100, 20)).join("\n");
    assert!(text.contains("[editing]"));
    assert!(text.contains("+ XSELECT 1"));
    assert!(text.contains("- SELECT 1"));
}

#[test]
fn test_diff_view_source_edit_mode() {
    let mut app = make_app("SELECT 1", "SELECT 1");
    app.focus = Focus::Source;
    app.source_editor.insert_str("Y");
    app.on_text_edited();

    let text = buffer_text(&render_buffer(&mut app, 100, 20)).join("\n");
    assert!(text.contains("(source) [editing]"));
    assert!(!text.contains("(target) [editing]"));
    assert!(text.contains("- YSELECT 1"));
    assert!(text.contains("+ SELECT 1"));
}

#[test]
fn test_full_draw_with_help() {
    let mut app = App::new(Catalog::builtin());
    app.show_help = true;

    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal.draw(|frame| draw(frame, &mut app)).expect("draw");
    let text = buffer_text(terminal.backend().buffer()).join("\n");

    assert!(text.contains("Comparison Table"));
    assert!(text.contains("Diff Viewer"));
    assert!(text.contains(" Help "));
    assert!(text.contains("Next / prev change"));
    assert!(text.contains(" TABLE "));
}

#[test]
fn test_status_bar_reports_equivalence() {
    let mut app = make_app("SELECT a\nFROM t", "SELECT a FROM t");
    let backend = TestBackend::new(120, 30);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal.draw(|frame| draw(frame, &mut app)).expect("draw");
    let text = buffer_text(terminal.backend().buffer()).join("\n");

    assert!(text.contains("≡ equivalent"));
    assert!(text.contains("+1 -2"));
}
