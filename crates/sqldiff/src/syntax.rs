//! SQL syntax highlighting (syntect-backed)

use crate::config::ResolvedTheme;
use ratatui::style::{Color as TuiColor, Modifier, Style};
use std::str::FromStr;
use syntect::{
    easy::HighlightLines,
    highlighting::{
        Color, FontStyle, ScopeSelectors, Style as SynStyle, StyleModifier, Theme, ThemeItem,
        ThemeSettings,
    },
    parsing::{SyntaxReference, SyntaxSet},
};

#[derive(Clone, Debug, PartialEq)]
pub struct SyntaxSpan {
    pub text: String,
    pub style: Style,
}

/// Highlighted lines of one text, indexed by 0-based line number
pub type HighlightedLines = Vec<Vec<SyntaxSpan>>;

pub struct SyntaxEngine {
    syntax_set: SyntaxSet,
    theme: Theme,
    plain: TuiColor,
}

impl SyntaxEngine {
    pub fn new(theme: &ResolvedTheme) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme: build_theme(theme),
            plain: theme.syntax_plain,
        }
    }

    /// Rebuild the highlighting theme after a UI theme change
    pub fn set_theme(&mut self, theme: &ResolvedTheme) {
        self.theme = build_theme(theme);
        self.plain = theme.syntax_plain;
    }

    /// Highlight every `'\n'`-separated line of `content`
    pub fn highlight(&self, content: &str) -> HighlightedLines {
        let mut highlighter = HighlightLines::new(self.sql_syntax(), &self.theme);
        let mut out = Vec::new();

        for line in content.split('\n') {
            let with_ending = format!("{line}\n");
            let ranges = highlighter
                .highlight_line(&with_ending, &self.syntax_set)
                .unwrap_or_default();
            let mut spans = Vec::new();
            for (style, text) in ranges {
                let text = text.strip_suffix('\n').unwrap_or(text);
                if text.is_empty() {
                    continue;
                }
                spans.push(SyntaxSpan {
                    text: text.to_string(),
                    style: syntect_style_to_tui(style),
                });
            }
            if spans.is_empty() {
                spans.push(SyntaxSpan {
                    text: String::new(),
                    style: Style::default().fg(self.plain),
                });
            }
            out.push(spans);
        }

        out
    }

    fn sql_syntax(&self) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_extension("sql")
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

/// Highlighted source and target texts, rebuilt whenever either changes
#[derive(Clone, Debug, Default)]
pub struct SyntaxCache {
    pub source: HighlightedLines,
    pub target: HighlightedLines,
}

impl SyntaxCache {
    pub fn new(engine: &SyntaxEngine, source: &str, target: &str) -> Self {
        Self {
            source: engine.highlight(source),
            target: engine.highlight(target),
        }
    }
}

fn build_theme(theme: &ResolvedTheme) -> Theme {
    let mut t = Theme {
        settings: ThemeSettings {
            foreground: Some(to_syntect(theme.syntax_plain)),
            ..ThemeSettings::default()
        },
        ..Theme::default()
    };

    t.scopes = vec![
        theme_item("comment, punctuation.definition.comment", theme.syntax_comment),
        theme_item("string, punctuation.definition.string", theme.syntax_string),
        theme_item(
            "keyword, keyword.other, keyword.control, storage.type, storage.modifier",
            theme.syntax_keyword,
        ),
        theme_item("constant.numeric, constant.language", theme.syntax_number),
        theme_item(
            "support.function, entity.name.function, meta.function-call",
            theme.syntax_function,
        ),
        theme_item("keyword.operator", theme.syntax_operator),
    ];
    t
}

fn theme_item(selector: &str, color: TuiColor) -> ThemeItem {
    ThemeItem {
        scope: ScopeSelectors::from_str(selector).unwrap_or_default(),
        style: StyleModifier {
            foreground: Some(to_syntect(color)),
            background: None,
            font_style: None,
        },
    }
}

fn syntect_style_to_tui(style: SynStyle) -> Style {
    let mut out = Style::default().fg(to_tui(style.foreground));
    if style.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    out
}

fn to_syntect(color: TuiColor) -> Color {
    let (r, g, b) = match color {
        TuiColor::Rgb(r, g, b) => (r, g, b),
        TuiColor::Black => (0, 0, 0),
        TuiColor::Red => (205, 0, 0),
        TuiColor::Green => (0, 205, 0),
        TuiColor::Yellow => (205, 205, 0),
        TuiColor::Blue => (0, 0, 238),
        TuiColor::Magenta => (205, 0, 205),
        TuiColor::Cyan => (0, 205, 205),
        TuiColor::Gray => (229, 229, 229),
        TuiColor::DarkGray => (127, 127, 127),
        TuiColor::LightRed => (255, 0, 0),
        TuiColor::LightGreen => (0, 255, 0),
        TuiColor::LightYellow => (255, 255, 0),
        TuiColor::LightBlue => (92, 92, 255),
        TuiColor::LightMagenta => (255, 0, 255),
        TuiColor::LightCyan => (0, 255, 255),
        _ => (255, 255, 255),
    };
    Color { r, g, b, a: 0xFF }
}

fn to_tui(color: Color) -> TuiColor {
    TuiColor::Rgb(color.r, color.g, color.b)
}
