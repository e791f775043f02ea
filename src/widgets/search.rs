//! Incremental search input.
//!
//! The bar is inert until activated; while active every keystroke updates
//! the query immediately. Matching is a case-insensitive substring test the
//! host applies to whatever it filters.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::ui::style;

/// Live input state for a [`SearchBar`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    active: bool,
    query: String,
}

impl SearchState {
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Begin editing. The existing query stays put so a reopened search
    /// continues where it left off.
    pub const fn start(&mut self) {
        self.active = true;
    }

    /// Stop editing without touching the query.
    pub const fn stop(&mut self) {
        self.active = false;
    }

    pub fn insert(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn backspace(&mut self) {
        self.query.pop();
    }

    /// Clear the query and stop editing.
    pub fn clear(&mut self) {
        self.query.clear();
        self.active = false;
    }
}

/// A one-row search input with a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBar {
    placeholder: String,
}

impl SearchBar {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    /// Case-insensitive substring match; an empty query matches everything.
    pub fn matches(query: &str, haystack: &str) -> bool {
        query.is_empty() || haystack.to_lowercase().contains(&query.to_lowercase())
    }

    /// Render the input row.
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let mut spans = vec![Span::styled("/ ", style::hint_style())];
        if state.query().is_empty() && !state.is_active() {
            spans.push(Span::styled(self.placeholder.clone(), style::hint_style()));
        } else {
            spans.push(Span::raw(state.query().to_string()));
        }
        if state.is_active() {
            spans.push(Span::styled("█", style::chip_style(true)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
