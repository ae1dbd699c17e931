use super::{App, Focus, ViewMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

impl App {
    /// Dispatch a key press to the help popup, the editor, or the active view
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        if self.view_mode == ViewMode::Diff && self.focus != Focus::Diff {
            self.handle_editor_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => match self.view_mode {
                ViewMode::Table => self.should_quit = true,
                ViewMode::Diff => self.back_to_table(),
            },
            KeyCode::Tab | KeyCode::BackTab => self.toggle_view(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('?') => self.toggle_help(),
            _ => match self.view_mode {
                ViewMode::Table => self.handle_table_key(key),
                ViewMode::Diff => self.handle_diff_key(key),
            },
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::Enter => self.open_selected(),
            _ => {}
        }
    }

    fn handle_diff_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => self.export_target(),
            KeyCode::Char('o') if ctrl => self.export_source(),
            KeyCode::Char('e') if ctrl => self.toggle_edit_focus(Focus::Target),
            KeyCode::Char('y') if ctrl => self.copy_target(),
            KeyCode::Char('d') if ctrl => self.scroll_half_page_down(),
            KeyCode::Char('u') if ctrl => self.scroll_half_page_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::PageDown => self.scroll_half_page_down(),
            KeyCode::PageUp => self.scroll_half_page_up(),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.scroll_to_bottom(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => self.next_change(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('N') => self.prev_change(),
            KeyCode::Char('H') => self.scroll_left(),
            KeyCode::Char('L') => self.scroll_right(),
            KeyCode::Char('e') | KeyCode::Char('i') | KeyCode::F(2) => {
                self.toggle_edit_focus(Focus::Target)
            }
            KeyCode::Char('E') | KeyCode::F(3) => self.toggle_edit_focus(Focus::Source),
            KeyCode::Char('y') => self.copy_target(),
            KeyCode::Char('r') => self.reset_texts(),
            KeyCode::Char('#') => self.toggle_line_numbers(),
            KeyCode::Char('s') => self.toggle_syntax(),
            KeyCode::Enter => self.back_to_table(),
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.focus = Focus::Diff,
            KeyCode::F(2) => self.toggle_edit_focus(Focus::Target),
            KeyCode::F(3) => self.toggle_edit_focus(Focus::Source),
            KeyCode::Char('e') if ctrl => self.toggle_edit_focus(Focus::Target),
            KeyCode::Char('s') if ctrl => self.export_target(),
            KeyCode::Char('o') if ctrl => self.export_source(),
            KeyCode::Char('y') if ctrl => self.copy_target(),
            _ => {
                let changed = self
                    .focused_editor()
                    .is_some_and(|editor| editor.handle_key(key));
                if changed {
                    self.on_text_edited();
                }
            }
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if self.show_help {
            return;
        }
        match (self.view_mode, event.kind) {
            (ViewMode::Table, MouseEventKind::ScrollDown) => self.select_next(),
            (ViewMode::Table, MouseEventKind::ScrollUp) => self.select_prev(),
            (ViewMode::Diff, MouseEventKind::ScrollDown) => self.scroll_down(),
            (ViewMode::Diff, MouseEventKind::ScrollUp) => self.scroll_up(),
            (ViewMode::Diff, MouseEventKind::ScrollRight) => self.scroll_right(),
            (ViewMode::Diff, MouseEventKind::ScrollLeft) => self.scroll_left(),
            _ => {}
        }
    }
}
