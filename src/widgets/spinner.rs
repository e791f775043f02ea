//! Tick-driven loading indicators.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::ui::style;

const DOT_FRAMES: [&str; 3] = [".  ", ".. ", "..."];

/// An animated trailing-dots indicator. The host drives it from its tick
/// event; each tick advances one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingDots {
    frame: usize,
}

impl LoadingDots {
    pub const fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub const fn text(&self) -> &'static str {
        DOT_FRAMES[self.frame % DOT_FRAMES.len()]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Paragraph::new(Line::styled(self.text(), style::hint_style())),
            area,
        );
    }
}

/// A labelled loading line, e.g. `Loading document...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingIndicator {
    label: String,
}

impl LoadingIndicator {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, dots: &LoadingDots) {
        let line = Line::from(vec![
            Span::styled(self.label.clone(), style::hint_style()),
            Span::styled(dots.text(), style::hint_style()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
