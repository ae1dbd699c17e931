//! Application state and logic

use crate::catalog::Catalog;
use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::config::{ExportConfig, ResolvedTheme, State, ThemeConfig, ThemeMode};
use crate::editor::Editor;
use crate::syntax::{SyntaxCache, SyntaxEngine};
use sqldiff_core::{
    align, is_equivalent, AlignmentResult, ComparisonStatus, DiffEngine, DiffStats,
};
use std::path::PathBuf;

mod export;
mod input;
mod navigation;
mod types;


pub use types::{Focus, StatusKind, StatusMessage, TableRow, ViewMode};
use types::CHANGE_CONTEXT;

/// The main application state
pub struct App {
    /// Comparisons listed in the table view
    pub catalog: Catalog,
    /// Cached status per catalog entry
    pub table_rows: Vec<TableRow>,
    /// Current view
    pub view_mode: ViewMode,
    /// Selected row in the table view
    pub selected: usize,
    /// Catalog entry loaded into the diff view
    pub active: Option<usize>,
    /// Source (left) statement
    pub source_editor: Editor,
    /// Target (right) statement
    pub target_editor: Editor,
    /// Texts as loaded, for reset
    loaded_source: String,
    loaded_target: String,
    /// Side-by-side rows for the current source/target
    pub alignment: AlignmentResult,
    /// Added/removed line counts of the current diff
    pub stats: DiffStats,
    /// Source and target are equal once whitespace is normalized
    pub equivalent: bool,
    pub diff_engine: DiffEngine,
    /// Which part of the diff view receives keys
    pub focus: Focus,
    /// First visible row of the side-by-side diff
    pub scroll_offset: usize,
    /// Horizontal scroll offset (for long lines)
    pub horizontal_scroll: usize,
    /// Height of the side-by-side viewport, recorded at render time
    pub diff_viewport_height: usize,
    pub show_help: bool,
    pub should_quit: bool,
    /// Resolved theme colors
    pub theme: ResolvedTheme,
    pub theme_mode: ThemeMode,
    theme_config: ThemeConfig,
    /// Write theme toggles to the state file
    pub persist_theme: bool,
    pub source_label: String,
    pub target_label: String,
    /// Show line numbers in the side-by-side gutters
    pub line_numbers: bool,
    /// SQL syntax coloring
    pub syntax_enabled: bool,
    syntax_engine: Option<SyntaxEngine>,
    pub syntax_cache: SyntaxCache,
    /// Export locations
    pub export: ExportConfig,
    /// When comparing files, Ctrl+O / Ctrl+S save back to these files
    pub source_path: Option<PathBuf>,
    pub target_path: Option<PathBuf>,
    pub clipboard: Box<dyn ClipboardSink>,
    /// Transient message in the status bar
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        let table_rows = catalog
            .comparisons()
            .iter()
            .map(|c| TableRow {
                status: c.status(),
                stats: c.diff().stats,
            })
            .collect();

        Self {
            catalog,
            table_rows,
            view_mode: ViewMode::Table,
            selected: 0,
            active: None,
            source_editor: Editor::default(),
            target_editor: Editor::default(),
            loaded_source: String::new(),
            loaded_target: String::new(),
            alignment: AlignmentResult::default(),
            stats: DiffStats::default(),
            equivalent: true,
            diff_engine: DiffEngine::new(),
            focus: Focus::Diff,
            scroll_offset: 0,
            horizontal_scroll: 0,
            diff_viewport_height: 0,
            show_help: false,
            should_quit: false,
            theme: ResolvedTheme::default(),
            theme_mode: ThemeMode::Dark,
            theme_config: ThemeConfig::default(),
            persist_theme: false,
            source_label: "Oracle SQL".to_string(),
            target_label: "PostgreSQL".to_string(),
            line_numbers: true,
            syntax_enabled: false,
            syntax_engine: None,
            syntax_cache: SyntaxCache::default(),
            export: ExportConfig::default(),
            source_path: None,
            target_path: None,
            clipboard: Box::new(SystemClipboard::default()),
            status: None,
        }
    }

    /// Install a theme config and resolve it for `mode`
    pub fn set_theme(&mut self, config: ThemeConfig, mode: ThemeMode) {
        self.theme_config = config;
        self.apply_theme_mode(mode);
    }

    fn apply_theme_mode(&mut self, mode: ThemeMode) {
        self.theme_mode = mode;
        self.theme = self.theme_config.resolve(mode);
        if let Some(engine) = self.syntax_engine.as_mut() {
            engine.set_theme(&self.theme);
        }
        self.refresh_syntax();
    }

    /// Switch between dark and light, persisting the choice
    pub fn toggle_theme(&mut self) {
        let mode = self.theme_mode.toggled();
        self.apply_theme_mode(mode);
        tracing::debug!(mode = mode.label(), "theme toggled");

        if self.persist_theme {
            let state = State {
                theme_mode: Some(mode),
            };
            if let Err(err) = state.save() {
                tracing::warn!("failed to persist theme: {}", err);
                self.set_status(format!("Theme not saved: {}", err), StatusKind::Error);
            }
        }
    }

    pub fn set_syntax_enabled(&mut self, enabled: bool) {
        self.syntax_enabled = enabled;
        self.refresh_syntax();
    }

    pub fn toggle_syntax(&mut self) {
        self.set_syntax_enabled(!self.syntax_enabled);
    }

    pub fn toggle_line_numbers(&mut self) {
        self.line_numbers = !self.line_numbers;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Start editing `pane`, or stop if it already has focus
    pub fn toggle_edit_focus(&mut self, pane: Focus) {
        self.focus = if self.focus == pane { Focus::Diff } else { pane };
    }

    /// The editor that currently receives keys, if any
    pub fn focused_editor(&mut self) -> Option<&mut Editor> {
        match self.focus {
            Focus::Diff => None,
            Focus::Source => Some(&mut self.source_editor),
            Focus::Target => Some(&mut self.target_editor),
        }
    }

    /// Load the selected table row into the diff view
    pub fn open_selected(&mut self) {
        if self.catalog.get(self.selected).is_some() {
            self.load_comparison(self.selected);
            self.view_mode = ViewMode::Diff;
        }
    }

    /// Load a catalog entry into the editors
    pub fn load_comparison(&mut self, index: usize) {
        let Some(comparison) = self.catalog.get(index) else {
            return;
        };
        tracing::debug!(id = comparison.id, name = %comparison.name, "loading comparison");
        self.loaded_source = comparison.source.clone();
        self.loaded_target = comparison.target.clone();
        self.source_editor.set_text(&comparison.source);
        self.target_editor.set_text(&comparison.target);
        self.active = Some(index);
        self.focus = Focus::Diff;
        self.scroll_offset = 0;
        self.horizontal_scroll = 0;
        self.recompute();
    }

    /// Tab: switch views, loading the selected comparison if none is open
    pub fn toggle_view(&mut self) {
        match self.view_mode {
            ViewMode::Table => {
                if self.active.is_none() {
                    self.load_comparison(self.selected);
                }
                self.view_mode = ViewMode::Diff;
            }
            ViewMode::Diff => self.back_to_table(),
        }
    }

    pub fn back_to_table(&mut self) {
        self.focus = Focus::Diff;
        self.view_mode = ViewMode::Table;
        if let Some(active) = self.active {
            self.selected = active;
        }
    }

    /// Write both editors back to the catalog entry and recompute the diff
    pub fn on_text_edited(&mut self) {
        let source = self.source_editor.text();
        let target = self.target_editor.text();
        if let Some(comparison) = self.active.and_then(|i| self.catalog.get_mut(i)) {
            comparison.source = source;
            comparison.target = target;
        }
        self.recompute();
    }

    /// Restore both texts as they were loaded
    pub fn reset_texts(&mut self) {
        let (source, target) = (self.loaded_source.clone(), self.loaded_target.clone());
        self.source_editor.set_text(&source);
        self.target_editor.set_text(&target);
        self.on_text_edited();
        self.set_status("Reset to loaded text", StatusKind::Info);
    }

    /// Copy the target statement to the system clipboard
    pub fn copy_target(&mut self) {
        let text = self.target_editor.text();
        match self.clipboard.set_text(&text) {
            Ok(()) => self.set_status(
                format!("Copied {} target lines", text.lines().count()),
                StatusKind::Info,
            ),
            Err(err) => {
                tracing::warn!("{}", err);
                self.set_status(err.to_string(), StatusKind::Error);
            }
        }
    }

    /// Rebuild alignment, stats, the active table row and highlighting from
    /// the current texts
    pub fn recompute(&mut self) {
        let source = self.source_editor.text();
        let target = self.target_editor.text();
        let diff = self.diff_engine.diff_strings(&source, &target);
        self.alignment = align(&diff.segments);
        self.stats = diff.stats;
        self.equivalent = is_equivalent(&source, &target);
        if let Some(row) = self.active.and_then(|i| self.table_rows.get_mut(i)) {
            *row = TableRow {
                status: ComparisonStatus::from_equivalent(self.equivalent),
                stats: self.stats,
            };
        }
        tracing::debug!(
            rows = self.alignment.len(),
            insertions = self.stats.insertions,
            deletions = self.stats.deletions,
            "diff recomputed"
        );
        self.refresh_syntax();
        self.clamp_scroll();
    }

    fn refresh_syntax(&mut self) {
        if !self.syntax_enabled {
            self.syntax_cache = SyntaxCache::default();
            return;
        }
        let theme = &self.theme;
        let engine = self.syntax_engine.get_or_insert_with(|| SyntaxEngine::new(theme));
        self.syntax_cache = SyntaxCache::new(
            engine,
            &self.source_editor.text(),
            &self.target_editor.text(),
        );
    }

    /// Title shown above the diff view
    pub fn title(&self) -> String {
        match self.active.and_then(|i| self.catalog.get(i)) {
            Some(comparison) => format!("{} - SQL Diff Viewer", comparison.name),
            None => "SQL Diff Viewer".to_string(),
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage::new(text, kind));
    }

    /// Per-frame housekeeping
    pub fn tick(&mut self) {
        if self.status.as_ref().is_some_and(StatusMessage::is_expired) {
            self.status = None;
        }
    }

    /// Row to scroll to so a change starting at `row` shows some context
    fn scroll_target_for(&self, row: usize) -> usize {
        row.saturating_sub(CHANGE_CONTEXT)
    }
}
