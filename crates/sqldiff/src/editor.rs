//! Editable text buffer backing the target pane
//!
//! Cursor positions are byte offsets that always sit on grapheme cluster
//! boundaries, so multi-codepoint characters move and delete as one unit.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Soft indent inserted by Tab
const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    lines: Vec<String>,
    row: usize,
    col: usize,
    /// First visible line
    scroll: usize,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new("")
    }
}

impl Editor {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            row: 0,
            col: 0,
            scroll: 0,
        }
    }

    /// Current buffer contents, lines joined with `'\n'`
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace the contents and move the cursor to the start
    pub fn set_text(&mut self, text: &str) {
        *self = Self::new(text);
    }

    /// Cursor as (row, display column)
    pub fn cursor(&self) -> (usize, usize) {
        let line = &self.lines[self.row];
        (self.row, line[..self.col].width())
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Adjust scroll so the cursor row is inside a viewport of `height` rows
    pub fn ensure_cursor_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.row < self.scroll {
            self.scroll = self.row;
        } else if self.row >= self.scroll + height {
            self.scroll = self.row + 1 - height;
        }
    }

    /// Apply a key press; returns true when the text changed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char(c) if !ctrl => {
                self.insert_str(c.encode_utf8(&mut [0; 4]));
                true
            }
            KeyCode::Tab => {
                self.insert_str(INDENT);
                true
            }
            KeyCode::Enter => {
                self.insert_newline();
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Up => {
                self.move_up();
                false
            }
            KeyCode::Down => {
                self.move_down();
                false
            }
            KeyCode::Home => {
                self.col = 0;
                false
            }
            KeyCode::End => {
                self.col = self.lines[self.row].len();
                false
            }
            _ => false,
        }
    }

    pub fn insert_str(&mut self, s: &str) {
        self.lines[self.row].insert_str(self.col, s);
        self.col += s.len();
    }

    pub fn insert_newline(&mut self) {
        let rest = self.lines[self.row].split_off(self.col);
        self.row += 1;
        self.lines.insert(self.row, rest);
        self.col = 0;
    }

    /// Delete the grapheme before the cursor, joining lines at column 0
    pub fn backspace(&mut self) -> bool {
        if self.col > 0 {
            let start = self.prev_boundary();
            self.lines[self.row].replace_range(start..self.col, "");
            self.col = start;
            true
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.lines[self.row].len();
            self.lines[self.row].push_str(&line);
            true
        } else {
            false
        }
    }

    /// Delete the grapheme under the cursor, joining the next line at line end
    pub fn delete(&mut self) -> bool {
        let len = self.lines[self.row].len();
        if self.col < len {
            let end = self.next_boundary();
            self.lines[self.row].replace_range(self.col..end, "");
            true
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col = self.prev_boundary();
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.lines[self.row].len();
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.lines[self.row].len() {
            self.col = self.next_boundary();
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            let graphemes = self.grapheme_col();
            self.row -= 1;
            self.col = self.offset_for_grapheme(graphemes);
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            let graphemes = self.grapheme_col();
            self.row += 1;
            self.col = self.offset_for_grapheme(graphemes);
        }
    }

    fn prev_boundary(&self) -> usize {
        self.lines[self.row][..self.col]
            .grapheme_indices(true)
            .next_back()
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        let line = &self.lines[self.row];
        line[self.col..]
            .graphemes(true)
            .next()
            .map(|g| self.col + g.len())
            .unwrap_or(line.len())
    }

    /// Number of graphemes before the cursor
    fn grapheme_col(&self) -> usize {
        self.lines[self.row][..self.col].graphemes(true).count()
    }

    fn offset_for_grapheme(&self, graphemes: usize) -> usize {
        let line = &self.lines[self.row];
        line.grapheme_indices(true)
            .nth(graphemes)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(editor: &mut Editor, s: &str) {
        for c in s.chars() {
            editor.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_round_trips_text() {
        let text = "SELECT 1\nFROM dual\n";
        assert_eq!(Editor::new(text).text(), text);
        assert_eq!(Editor::new("").text(), "");
    }

    #[test]
    fn test_typing_and_newline() {
        let mut editor = Editor::new("");
        type_str(&mut editor, "SELECT 1");
        assert!(editor.handle_key(key(KeyCode::Enter)));
        type_str(&mut editor, "LIMIT 10");
        assert_eq!(editor.text(), "SELECT 1\nLIMIT 10");
        assert_eq!(editor.cursor(), (1, 8));
    }

    #[test]
    fn test_split_line_in_middle() {
        let mut editor = Editor::new("ab");
        editor.move_right();
        editor.insert_newline();
        assert_eq!(editor.text(), "a\nb");
        assert_eq!(editor.cursor(), (1, 0));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut editor = Editor::new("a\nb");
        editor.move_down();
        assert!(editor.backspace());
        assert_eq!(editor.text(), "ab");
        assert_eq!(editor.cursor(), (0, 1));
        editor.handle_key(key(KeyCode::Home));
        assert!(!editor.backspace());
    }

    #[test]
    fn test_delete_joins_next_line() {
        let mut editor = Editor::new("a\nb");
        editor.handle_key(key(KeyCode::End));
        assert!(editor.delete());
        assert_eq!(editor.text(), "ab");
        editor.handle_key(key(KeyCode::End));
        assert!(!editor.delete());
    }

    #[test]
    fn test_grapheme_aware_editing() {
        // e + combining acute accent is one grapheme
        let mut editor = Editor::new("cafe\u{301}!");
        editor.handle_key(key(KeyCode::End));
        editor.move_left();
        assert!(editor.backspace());
        assert_eq!(editor.text(), "caf!");
    }

    #[test]
    fn test_vertical_movement_clamps() {
        let mut editor = Editor::new("SELECT col\nFROM");
        editor.handle_key(key(KeyCode::End));
        editor.move_down();
        assert_eq!(editor.cursor(), (1, 4));
        editor.move_up();
        assert_eq!(editor.cursor(), (0, 4));
    }

    #[test]
    fn test_wide_chars_cursor_width() {
        let mut editor = Editor::new("名前");
        editor.move_right();
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut editor = Editor::new("x");
        let changed = editor.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(!changed);
        assert_eq!(editor.text(), "x");
    }

    #[test]
    fn test_tab_inserts_indent() {
        let mut editor = Editor::new("x");
        editor.handle_key(key(KeyCode::Tab));
        assert_eq!(editor.text(), "  x");
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut editor = Editor::new("1\n2\n3\n4\n5");
        for _ in 0..4 {
            editor.move_down();
        }
        editor.ensure_cursor_visible(2);
        assert_eq!(editor.scroll(), 3);
        for _ in 0..4 {
            editor.move_up();
        }
        editor.ensure_cursor_visible(2);
        assert_eq!(editor.scroll(), 0);
    }
}
