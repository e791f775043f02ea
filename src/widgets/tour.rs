//! Step-by-step guided tour overlay.
//!
//! The tour is a centered modal walking through a fixed list of steps.
//! Opening always restarts at the first step. The previous control is
//! dimmed on the first step and clicking it keeps the index at zero; on
//! the last step the advance control reads
//! `Finish` and closes the tour. A tour with no steps renders nothing and
//! ignores input.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::markdown;
use crate::ui::style;

use super::{Outcome, centered_rect, point_in_rect};

const PREVIOUS_LABEL: &str = "‹ Previous";
const NEXT_LABEL: &str = "Next ›";
const FINISH_LABEL: &str = "Finish";
const PANEL_WIDTH: u16 = 56;

/// One tour step: a title and a markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourStep {
    pub title: String,
    pub body: String,
}

impl TourStep {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Where a click landed while the tour is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourClick {
    Backdrop,
    Panel,
    Previous,
    Advance,
}

/// Open/position state for a [`GuidedTour`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TourState {
    open: bool,
    index: usize,
}

impl TourState {
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    /// Open the tour, restarting from the first step.
    pub const fn open(&mut self) {
        self.open = true;
        self.index = 0;
    }

    pub const fn close(&mut self) {
        self.open = false;
    }
}

/// A guided tour over a fixed step list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuidedTour {
    steps: Vec<TourStep>,
}

impl GuidedTour {
    pub const fn new(steps: Vec<TourStep>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current<'a>(&'a self, state: &TourState) -> Option<&'a TourStep> {
        if state.is_open() {
            self.steps.get(state.index())
        } else {
            None
        }
    }

    pub fn is_first(state: &TourState) -> bool {
        state.index() == 0
    }

    pub fn is_last(&self, state: &TourState) -> bool {
        state.index() + 1 >= self.len()
    }

    /// Advance one step; on the last step this finishes and closes.
    pub fn advance(&self, state: &mut TourState) {
        if !state.is_open() || self.is_empty() {
            return;
        }
        if self.is_last(state) {
            state.close();
        } else {
            state.index += 1;
        }
    }

    /// Step back, stopping at the first step.
    pub fn previous(state: &mut TourState) {
        if state.is_open() {
            state.index = state.index.saturating_sub(1);
        }
    }

    fn advance_label(&self, state: &TourState) -> &'static str {
        if self.is_last(state) {
            FINISH_LABEL
        } else {
            NEXT_LABEL
        }
    }

    fn body_lines(&self, state: &TourState, width: u16) -> Vec<Line<'static>> {
        self.current(state)
            .map(|step| markdown::render_markdown(&step.body, width).lines)
            .unwrap_or_default()
    }

    /// The modal rect for the current step.
    pub fn popup_rect(&self, frame_area: Rect, state: &TourState) -> Rect {
        let width = PANEL_WIDTH.min(frame_area.width.saturating_sub(4));
        // Title, blank, body, blank, buttons, plus borders.
        let body = self.body_lines(state, width.saturating_sub(4)).len() as u16;
        let height = (body + 7).min(frame_area.height);
        centered_rect(width, height, frame_area)
    }

    /// The previous control's hit box. Present on every step; clicking it
    /// on the first step leaves the index unchanged.
    pub fn previous_rect(&self, panel: Rect) -> Rect {
        Rect {
            x: panel.x + 2,
            y: panel.y + panel.height.saturating_sub(2),
            width: PREVIOUS_LABEL.width() as u16,
            height: 1,
        }
    }

    /// The advance (next/finish) control's hit box.
    pub fn advance_rect(&self, panel: Rect, state: &TourState) -> Rect {
        let label_w = self.advance_label(state).width() as u16;
        Rect {
            x: (panel.x + panel.width).saturating_sub(label_w + 2),
            y: panel.y + panel.height.saturating_sub(2),
            width: label_w,
            height: 1,
        }
    }

    /// Classify a click while the tour is open.
    pub fn classify_click(
        &self,
        frame_area: Rect,
        col: u16,
        row: u16,
        state: &TourState,
    ) -> TourClick {
        let panel = self.popup_rect(frame_area, state);
        if point_in_rect(col, row, self.previous_rect(panel)) {
            return TourClick::Previous;
        }
        if point_in_rect(col, row, self.advance_rect(panel, state)) {
            TourClick::Advance
        } else if point_in_rect(col, row, panel) {
            TourClick::Panel
        } else {
            TourClick::Backdrop
        }
    }

    /// Route a click while the tour is open.
    pub fn handle_click(
        &self,
        frame_area: Rect,
        col: u16,
        row: u16,
        state: &mut TourState,
    ) -> Outcome {
        if !state.is_open() || self.is_empty() {
            return Outcome::Ignored;
        }
        match self.classify_click(frame_area, col, row, state) {
            TourClick::Backdrop => state.close(),
            TourClick::Previous => Self::previous(state),
            TourClick::Advance => self.advance(state),
            TourClick::Panel => {}
        }
        Outcome::Consumed
    }

    /// One marker per step, the current one filled.
    fn progress_markers(&self, state: &TourState) -> Line<'static> {
        let mut spans = Vec::with_capacity(self.len() * 2);
        for i in 0..self.len() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            if i == state.index() {
                spans.push(Span::styled("●", style::chip_style(true)));
            } else {
                spans.push(Span::styled("○", style::hint_style()));
            }
        }
        Line::from(spans).centered()
    }

    /// Render the tour modal over the whole frame.
    pub fn render(&self, frame: &mut Frame, state: &TourState) {
        let Some(step) = self.current(state) else {
            return;
        };
        let panel = self.popup_rect(frame.area(), state);
        let counter = format!(" Step {} of {} ", state.index() + 1, self.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(counter)
            .padding(Padding::horizontal(1))
            .style(style::overlay_style());
        let inner = block.inner(panel);
        frame.render_widget(Clear, panel);
        frame.render_widget(block, panel);

        let mut lines = vec![
            Line::styled(step.title.clone(), style::heading_style(1)),
            Line::raw(""),
        ];
        lines.extend(self.body_lines(state, inner.width));
        lines.push(Line::raw(""));
        lines.push(self.progress_markers(state));
        frame.render_widget(Paragraph::new(lines), inner);

        let previous_style = if Self::is_first(state) {
            style::hint_style().add_modifier(Modifier::DIM)
        } else {
            style::hint_style()
        };
        let mut buttons = vec![Span::styled(PREVIOUS_LABEL, previous_style), Span::raw("  ")];
        let used = buttons.iter().map(|s| s.content.width()).sum::<usize>()
            + self.advance_label(state).width();
        let pad = (inner.width as usize).saturating_sub(used);
        buttons.push(Span::raw(" ".repeat(pad)));
        buttons.push(Span::styled(
            self.advance_label(state),
            style::chip_style(true),
        ));
        let button_row = Rect {
            y: panel.y + panel.height.saturating_sub(2),
            height: 1,
            ..inner
        };
        frame.render_widget(Paragraph::new(Line::from(buttons)), button_row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GuidedTour {
        GuidedTour::new(vec![
            TourStep::new("Welcome", "First step body."),
            TourStep::new("Sections", "Second step body."),
            TourStep::new("Done", "Last step body."),
        ])
    }

    #[test]
    fn test_open_resets_to_first_step() {
        let tour = sample();
        let mut state = TourState::default();
        state.open();
        tour.advance(&mut state);
        state.close();
        state.open();
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn test_advance_walks_forward() {
        let tour = sample();
        let mut state = TourState::default();
        state.open();
        tour.advance(&mut state);
        assert_eq!(state.index(), 1);
        assert!(!tour.is_last(&state));
        tour.advance(&mut state);
        assert!(tour.is_last(&state));
    }

    #[test]
    fn test_finish_on_last_step_closes() {
        let tour = sample();
        let mut state = TourState::default();
        state.open();
        tour.advance(&mut state);
        tour.advance(&mut state);
        tour.advance(&mut state);
        assert!(!state.is_open());
    }

    #[test]
    fn test_previous_saturates_at_first_step() {
        let tour = sample();
        let mut state = TourState::default();
        state.open();
        GuidedTour::previous(&mut state);
        assert_eq!(state.index(), 0);
        tour.advance(&mut state);
        GuidedTour::previous(&mut state);
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn test_previous_click_on_first_step_keeps_index_zero() {
        let tour = sample();
        let mut state = TourState::default();
        state.open();
        let frame = Rect::new(0, 0, 100, 40);
        let panel = tour.popup_rect(frame, &state);
        let prev = tour.previous_rect(panel);
        assert_eq!(
            tour.classify_click(frame, prev.x, prev.y, &state),
            TourClick::Previous
        );
        assert_eq!(tour.handle_click(frame, prev.x, prev.y, &mut state), Outcome::Consumed);
        assert!(state.is_open());
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn test_empty_tour_ignores_input_and_renders_nothing() {
        let tour = GuidedTour::default();
        let mut state = TourState::default();
        state.open();
        assert!(tour.current(&state).is_none());
        let frame = Rect::new(0, 0, 100, 40);
        assert_eq!(tour.handle_click(frame, 50, 20, &mut state), Outcome::Ignored);
    }

    #[test]
    fn test_backdrop_click_closes() {
        let tour = sample();
        let mut state = TourState::default();
        state.open();
        let frame = Rect::new(0, 0, 100, 40);
        assert_eq!(tour.handle_click(frame, 0, 0, &mut state), Outcome::Consumed);
        assert!(!state.is_open());
    }

    #[test]
    fn test_advance_click_moves_to_next_step() {
        let tour = sample();
        let mut state = TourState::default();
        state.open();
        let frame = Rect::new(0, 0, 100, 40);
        let panel = tour.popup_rect(frame, &state);
        let advance = tour.advance_rect(panel, &state);
        tour.handle_click(frame, advance.x, advance.y, &mut state);
        assert_eq!(state.index(), 1);
        assert!(state.is_open());
    }

    #[test]
    fn test_panel_click_is_swallowed() {
        let tour = sample();
        let mut state = TourState::default();
        state.open();
        let frame = Rect::new(0, 0, 100, 40);
        let panel = tour.popup_rect(frame, &state);
        tour.handle_click(frame, panel.x + 2, panel.y + 1, &mut state);
        assert!(state.is_open());
        assert_eq!(state.index(), 0);
    }
}
