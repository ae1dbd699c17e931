//! Configuration file support for sqldiff
//!
//! Config file location: `~/.config/sqldiff/config.toml` (XDG_CONFIG_HOME)
//!
//! Example config:
//! ```toml
//! catalog = "/srv/sql/comparisons.toml"
//!
//! [ui]
//! theme_mode = "dark"
//! line_numbers = true
//! syntax = true
//! source_label = "Oracle SQL"
//! target_label = "PostgreSQL"
//!
//! [ui.theme.defs]
//! green1 = "#A3BE8C"
//! red1 = "#BF616A"
//!
//! [ui.theme.theme.added]
//! dark = "green1"
//! light = "#2E7D32"
//!
//! [ui.theme.theme.removed]
//! dark = "red1"
//!
//! [export]
//! directory = "."
//! source_file = "oracle_query.sql"
//! target_file = "postgresql_query.sql"
//! ```
//!
//! The theme mode toggled in the viewer is persisted separately in
//! `<state dir>/sqldiff/state.toml`.

use crate::color;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Theme Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn is_light(self) -> bool {
        self == ThemeMode::Light
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}

/// Dark/light color pair for a theme token
#[derive(Debug, Clone, Deserialize)]
pub struct DarkLight {
    pub dark: String,
    #[serde(default)]
    pub light: Option<String>,
}

/// Theme tokens
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeTokens {
    pub text: Option<DarkLight>,
    pub text_muted: Option<DarkLight>,
    pub primary: Option<DarkLight>,
    pub accent: Option<DarkLight>,
    pub success: Option<DarkLight>,
    pub warning: Option<DarkLight>,
    pub error: Option<DarkLight>,
    pub background: Option<DarkLight>,
    pub border: Option<DarkLight>,
    pub border_active: Option<DarkLight>,
    pub added: Option<DarkLight>,
    pub removed: Option<DarkLight>,
    pub line_number: Option<DarkLight>,
    pub syntax_keyword: Option<DarkLight>,
    pub syntax_string: Option<DarkLight>,
    pub syntax_number: Option<DarkLight>,
    pub syntax_comment: Option<DarkLight>,
    pub syntax_function: Option<DarkLight>,
    pub syntax_operator: Option<DarkLight>,
}

/// Theme configuration (defs + tokens)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Named color definitions (e.g., green1 = "#A3BE8C")
    pub defs: HashMap<String, String>,
    /// Theme tokens with dark/light values
    pub theme: ThemeTokens,
}

/// Built-in fallback palette for one mode
struct Palette {
    text: Color,
    text_muted: Color,
    primary: Color,
    accent: Color,
    success: Color,
    warning: Color,
    error: Color,
    background: Color,
    border: Color,
    border_active: Color,
    added: Color,
    removed: Color,
    keyword: Color,
    string: Color,
    number: Color,
    comment: Color,
    function: Color,
}

const DARK: Palette = Palette {
    text: Color::Rgb(0xD8, 0xDE, 0xE9),
    text_muted: Color::Rgb(0x6B, 0x73, 0x80),
    primary: Color::Rgb(0x88, 0xC0, 0xD0),
    accent: Color::Rgb(0x81, 0xA1, 0xC1),
    success: Color::Rgb(0xA3, 0xBE, 0x8C),
    warning: Color::Rgb(0xEB, 0xCB, 0x8B),
    error: Color::Rgb(0xBF, 0x61, 0x6A),
    background: Color::Rgb(0x1E, 0x22, 0x2A),
    border: Color::Rgb(0x3B, 0x42, 0x52),
    border_active: Color::Rgb(0x88, 0xC0, 0xD0),
    added: Color::Rgb(0xA3, 0xBE, 0x8C),
    removed: Color::Rgb(0xBF, 0x61, 0x6A),
    keyword: Color::Rgb(0x81, 0xA1, 0xC1),
    string: Color::Rgb(0xA3, 0xBE, 0x8C),
    number: Color::Rgb(0xB4, 0x8E, 0xAD),
    comment: Color::Rgb(0x61, 0x6E, 0x88),
    function: Color::Rgb(0x88, 0xC0, 0xD0),
};

const LIGHT: Palette = Palette {
    text: Color::Rgb(0x24, 0x29, 0x2E),
    text_muted: Color::Rgb(0x6A, 0x73, 0x7D),
    primary: Color::Rgb(0x03, 0x66, 0xD6),
    accent: Color::Rgb(0x6F, 0x42, 0xC1),
    success: Color::Rgb(0x22, 0x86, 0x3A),
    warning: Color::Rgb(0xB0, 0x88, 0x00),
    error: Color::Rgb(0xCB, 0x24, 0x31),
    background: Color::Rgb(0xFA, 0xFB, 0xFC),
    border: Color::Rgb(0xD1, 0xD5, 0xDA),
    border_active: Color::Rgb(0x03, 0x66, 0xD6),
    added: Color::Rgb(0x22, 0x86, 0x3A),
    removed: Color::Rgb(0xCB, 0x24, 0x31),
    keyword: Color::Rgb(0xD7, 0x3A, 0x49),
    string: Color::Rgb(0x03, 0x2F, 0x62),
    number: Color::Rgb(0x00, 0x5C, 0xC5),
    comment: Color::Rgb(0x6A, 0x73, 0x7D),
    function: Color::Rgb(0x6F, 0x42, 0xC1),
};

/// Resolved theme: concrete ratatui colors
#[derive(Debug, Clone)]
pub struct ResolvedTheme {
    pub mode: ThemeMode,

    // Core UI
    pub text: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub accent: Color,

    // Status
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub background: Color,

    // Borders
    pub border: Color,
    pub border_active: Color,

    // Diff
    pub added: Color,
    pub removed: Color,
    pub added_bg: Color,
    pub removed_bg: Color,
    pub line_number: Color,

    // Syntax
    pub syntax_plain: Color,
    pub syntax_keyword: Color,
    pub syntax_string: Color,
    pub syntax_number: Color,
    pub syntax_comment: Color,
    pub syntax_function: Color,
    pub syntax_operator: Color,
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        ThemeConfig::default().resolve(ThemeMode::Dark)
    }
}

impl ThemeConfig {
    /// Resolve theme config to concrete colors.
    /// In light mode `.light` values win and fall back to `.dark`.
    pub fn resolve(&self, mode: ThemeMode) -> ResolvedTheme {
        let defs = &self.defs;
        let tokens = &self.theme;
        let palette = if mode.is_light() { &LIGHT } else { &DARK };

        let resolve = |token: &Option<DarkLight>, fallback: Color| -> Color {
            token
                .as_ref()
                .and_then(|dl| {
                    if mode.is_light() {
                        dl.light
                            .as_ref()
                            .and_then(|v| color::resolve_color(v, defs))
                            .or_else(|| color::resolve_color(&dl.dark, defs))
                    } else {
                        color::resolve_color(&dl.dark, defs)
                    }
                })
                .unwrap_or(fallback)
        };

        let background = resolve(&tokens.background, palette.background);
        let added = resolve(&tokens.added, palette.added);
        let removed = resolve(&tokens.removed, palette.removed);
        let text = resolve(&tokens.text, palette.text);
        let text_muted = resolve(&tokens.text_muted, palette.text_muted);

        // Row tints need RGB on both ends; the mode's canvas stands in for ANSI backgrounds
        let tint = |fg: Color| {
            color::blend_colors(background, fg, 0.18)
                .or_else(|| color::blend_colors(palette.background, fg, 0.18))
                .unwrap_or(background)
        };

        ResolvedTheme {
            mode,
            text,
            text_muted,
            primary: resolve(&tokens.primary, palette.primary),
            accent: resolve(&tokens.accent, palette.accent),
            success: resolve(&tokens.success, palette.success),
            warning: resolve(&tokens.warning, palette.warning),
            error: resolve(&tokens.error, palette.error),
            background,
            border: resolve(&tokens.border, palette.border),
            border_active: resolve(&tokens.border_active, palette.border_active),
            added,
            removed,
            added_bg: tint(added),
            removed_bg: tint(removed),
            line_number: resolve(&tokens.line_number, color::dim_color(text_muted)),
            syntax_plain: text,
            syntax_keyword: resolve(&tokens.syntax_keyword, palette.keyword),
            syntax_string: resolve(&tokens.syntax_string, palette.string),
            syntax_number: resolve(&tokens.syntax_number, palette.number),
            syntax_comment: resolve(&tokens.syntax_comment, palette.comment),
            syntax_function: resolve(&tokens.syntax_function, palette.function),
            syntax_operator: resolve(&tokens.syntax_operator, text),
        }
    }
}

// ============================================================================
// Application Configuration
// ============================================================================

/// UI configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme mode used when nothing was persisted: "dark" or "light"
    pub theme_mode: Option<ThemeMode>,
    /// Show line numbers in the side-by-side gutters
    pub line_numbers: bool,
    /// SQL syntax coloring in the editor panes and diff rows
    pub syntax: bool,
    /// Heading of the source (left) pane
    pub source_label: String,
    /// Heading of the target (right, editable) pane
    pub target_label: String,
    /// Theme configuration
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_mode: None,
            line_numbers: true,
            syntax: true,
            source_label: "Oracle SQL".to_string(),
            target_label: "PostgreSQL".to_string(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Where exported statements are written
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub directory: PathBuf,
    pub source_file: String,
    pub target_file: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            source_file: "oracle_query.sql".to_string(),
            target_file: "postgresql_query.sql".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn source_path(&self) -> PathBuf {
        self.directory.join(&self.source_file)
    }

    pub fn target_path(&self) -> PathBuf {
        self.directory.join(&self.target_file)
    }
}

/// Root configuration
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Comparison catalog for the table view (built-in samples when unset)
    pub catalog: Option<PathBuf>,
    pub ui: UiConfig,
    pub export: ExportConfig,
}

impl Config {
    /// Get all possible config file paths in priority order
    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("sqldiff").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("sqldiff").join("config.toml"));
        }

        // Platform-specific config dir (~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("sqldiff").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        paths
    }

    /// Get the first existing config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_paths().into_iter().find(|p| p.exists())
    }

    /// Load config from XDG config path.
    /// Returns default config if file doesn't exist or can't be parsed
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| {
                toml::from_str(&content)
                    .map_err(|e| {
                        tracing::warn!(path = %path.display(), "failed to parse config: {}", e);
                        e
                    })
                    .ok()
            })
            .unwrap_or_default()
    }
}

// ============================================================================
// Persisted State
// ============================================================================

#[derive(Error, Debug)]
pub enum StateError {
    #[error("no state directory available on this platform")]
    NoStateDir,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Values remembered between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_mode: Option<ThemeMode>,
}

impl State {
    pub fn state_path() -> Option<PathBuf> {
        dirs::state_dir()
            .or_else(dirs::data_dir)
            .map(|dir| dir.join("sqldiff").join("state.toml"))
    }

    /// Load persisted state; missing or unreadable state is empty
    pub fn load() -> Self {
        Self::state_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "ignoring unreadable state: {}", e);
            Self::default()
        })
    }

    pub fn save(&self) -> Result<(), StateError> {
        let path = Self::state_path().ok_or(StateError::NoStateDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StateError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string(self)?)?;
        Ok(())
    }
}
