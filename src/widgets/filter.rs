//! Multi-select filter chips.
//!
//! Filters render as a single row of chips. Selection lives with the host
//! as a plain list of values; toggling is a pure function so hosts can
//! mirror the selection into the shared UI state.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::ui::style;

use super::{Outcome, point_in_rect};

/// One selectable filter chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub count: Option<usize>,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            count: None,
        }
    }

    pub const fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    fn chip_text(&self) -> String {
        match self.count {
            Some(count) => format!(" {} ({count}) ", self.label),
            None => format!(" {} ", self.label),
        }
    }
}

/// A row of filter chips over a host-owned selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    options: Vec<FilterOption>,
}

impl ContentFilter {
    pub const fn new(options: Vec<FilterOption>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    /// Toggle `value` in a selection: remove it when present, append it
    /// otherwise. Other entries keep their order.
    pub fn toggle_value(selected: &[String], value: &str) -> Vec<String> {
        if selected.iter().any(|v| v == value) {
            selected.iter().filter(|v| *v != value).cloned().collect()
        } else {
            let mut next = selected.to_vec();
            next.push(value.to_string());
            next
        }
    }

    /// Render the chip row into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, selected: &[String]) {
        let mut spans = Vec::with_capacity(self.options.len() * 2);
        for (i, option) in self.options.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let is_selected = selected.iter().any(|v| *v == option.value);
            spans.push(Span::styled(
                option.chip_text(),
                style::chip_style(is_selected),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// The option value under a point on the chip row, if any.
    pub fn value_at(&self, area: Rect, col: u16, row: u16) -> Option<&str> {
        if !point_in_rect(col, row, area) {
            return None;
        }
        let mut x = area.x;
        for (i, option) in self.options.iter().enumerate() {
            if i > 0 {
                x += 1;
            }
            let width = option.chip_text().width() as u16;
            let chip = Rect {
                x,
                y: area.y,
                width,
                height: 1,
            };
            if point_in_rect(col, row, chip) {
                return Some(&option.value);
            }
            x += width;
        }
        None
    }

    /// Route a click on the chip row, toggling the hit chip in `selected`.
    pub fn handle_click(
        &self,
        area: Rect,
        col: u16,
        row: u16,
        selected: &mut Vec<String>,
    ) -> Outcome {
        match self.value_at(area, col, row) {
            Some(value) => {
                *selected = Self::toggle_value(selected, value);
                Outcome::Consumed
            }
            None => Outcome::Ignored,
        }
    }
}
