//! Mapping from configured class names to terminal styles and glyphs.
//!
//! Dropdown configuration speaks in class lists (`["btn", "btn-primary"]`,
//! `["fa", "fa-check-square-o"]`). A [`StyleSheet`] turns a class list into a
//! [`Style`] by patching the styles of its known classes in order, and into a
//! glyph by taking the last class that names an icon. Unknown classes are
//! ignored, so layout-only classes such as `d-flex` or `col-6` cost nothing.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

/// Class-to-style and class-to-glyph tables.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    styles: HashMap<String, Style>,
    glyphs: HashMap<String, String>,
    highlight: Style,
}

impl Default for StyleSheet {
    fn default() -> Self {
        let styles = [
            ("btn-default", Style::default().fg(Color::White)),
            (
                "btn-primary",
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            ("btn-secondary", Style::default().fg(Color::Gray)),
            ("text-muted", Style::default().fg(Color::DarkGray)),
            (
                "font-weight-bold",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            (
                "font-italic",
                Style::default().add_modifier(Modifier::ITALIC),
            ),
            ("fa-check-square-o", Style::default().fg(Color::Green)),
        ];
        let glyphs = [
            ("fa-angle-down", "▾"),
            ("fa-angle-up", "▴"),
            ("fa-caret-down", "▼"),
            ("fa-check-square-o", "[x]"),
            ("fa-check-square", "[x]"),
            ("fa-square-o", "[ ]"),
            ("fa-check", "✓"),
        ];

        Self {
            styles: styles
                .into_iter()
                .map(|(class, style)| (class.to_string(), style))
                .collect(),
            glyphs: glyphs
                .into_iter()
                .map(|(class, glyph)| (class.to_string(), glyph.to_string()))
                .collect(),
            highlight: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl StyleSheet {
    /// The built-in tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables with no entries at all.
    pub fn empty() -> Self {
        Self {
            styles: HashMap::new(),
            glyphs: HashMap::new(),
            highlight: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// Add or replace the style of a class.
    pub fn with_style(mut self, class: impl Into<String>, style: Style) -> Self {
        self.styles.insert(class.into(), style);
        self
    }

    /// Add or replace the glyph an icon class renders as.
    pub fn with_glyph(mut self, class: impl Into<String>, glyph: impl Into<String>) -> Self {
        self.glyphs.insert(class.into(), glyph.into());
        self
    }

    /// Style of the row the keyboard highlight is on.
    pub fn with_highlight(mut self, style: Style) -> Self {
        self.highlight = style;
        self
    }

    pub fn highlight(&self) -> Style {
        self.highlight
    }

    /// Combined style of a class list; later classes win.
    pub fn style(&self, classes: &[String]) -> Style {
        classes
            .iter()
            .filter_map(|class| self.styles.get(class))
            .fold(Style::default(), |acc, style| acc.patch(*style))
    }

    /// Glyph of the last icon class in the list.
    pub fn glyph(&self, classes: &[String]) -> Option<&str> {
        classes
            .iter()
            .rev()
            .find_map(|class| self.glyphs.get(class))
            .map(String::as_str)
    }
}
