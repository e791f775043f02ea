//! Collapsible section headers with caret markers.
//!
//! A disclosure owns a one-row header; the body renders only while open.
//! Clicking anywhere on the header row toggles it. Hosts that track
//! expansion centrally can mirror toggles into the shared UI state with the
//! section id.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::ui::style;

use super::{Outcome, point_in_rect};

/// Open/closed state for a [`ProgressiveDisclosure`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisclosureState {
    open: bool,
}

impl DisclosureState {
    pub const fn new(open: bool) -> Self {
        Self { open }
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn toggle(&mut self) -> Outcome {
        self.open = !self.open;
        Outcome::Consumed
    }

    pub const fn set_open(&mut self, open: bool) {
        self.open = open;
    }
}

/// A titled section that reveals its body on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressiveDisclosure {
    title: String,
    default_open: bool,
}

impl ProgressiveDisclosure {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            default_open: false,
        }
    }

    /// Start open when the host first builds state for this section.
    pub const fn default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The initial state this disclosure asks for.
    pub const fn initial_state(&self) -> DisclosureState {
        DisclosureState::new(self.default_open)
    }

    /// Rows the header occupies.
    pub const HEADER_HEIGHT: u16 = 1;

    /// Total rows needed: the header plus the body when open.
    pub const fn total_height(&self, body_height: u16, state: &DisclosureState) -> u16 {
        if state.is_open() {
            Self::HEADER_HEIGHT + body_height
        } else {
            Self::HEADER_HEIGHT
        }
    }

    fn caret(state: &DisclosureState) -> &'static str {
        if state.is_open() { "▾" } else { "▸" }
    }

    /// The header row rect within `area`.
    pub const fn header_rect(area: Rect) -> Rect {
        Rect {
            height: Self::HEADER_HEIGHT,
            ..area
        }
    }

    /// Render the header and, while open, the body via `body`.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &DisclosureState,
        body: impl FnOnce(&mut Frame, Rect),
    ) {
        let header = Line::from(vec![
            Span::styled(format!("{} ", Self::caret(state)), style::hint_style()),
            Span::styled(self.title.clone(), style::heading_style(2)),
        ]);
        frame.render_widget(Paragraph::new(header), Self::header_rect(area));

        if state.is_open() && area.height > Self::HEADER_HEIGHT {
            let body_area = Rect {
                y: area.y + Self::HEADER_HEIGHT,
                height: area.height - Self::HEADER_HEIGHT,
                ..area
            };
            body(frame, body_area);
        }
    }

    /// Route a click: anywhere on the header row toggles the section.
    pub fn handle_click(area: Rect, col: u16, row: u16, state: &mut DisclosureState) -> Outcome {
        if point_in_rect(col, row, Self::header_rect(area)) {
            state.toggle()
        } else {
            Outcome::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_by_default() {
        let disclosure = ProgressiveDisclosure::new("Details");
        assert!(!disclosure.initial_state().is_open());
    }

    #[test]
    fn test_default_open_starts_open() {
        let disclosure = ProgressiveDisclosure::new("Details").default_open(true);
        assert!(disclosure.initial_state().is_open());
    }

    #[test]
    fn test_header_click_toggles() {
        let area = Rect::new(0, 10, 40, 6);
        let mut state = DisclosureState::default();
        assert_eq!(
            ProgressiveDisclosure::handle_click(area, 5, 10, &mut state),
            Outcome::Consumed
        );
        assert!(state.is_open());
        ProgressiveDisclosure::handle_click(area, 5, 10, &mut state);
        assert!(!state.is_open());
    }

    #[test]
    fn test_body_click_does_not_toggle() {
        let area = Rect::new(0, 10, 40, 6);
        let mut state = DisclosureState::new(true);
        assert_eq!(
            ProgressiveDisclosure::handle_click(area, 5, 12, &mut state),
            Outcome::Ignored
        );
        assert!(state.is_open());
    }

    #[test]
    fn test_total_height_tracks_open_state() {
        let disclosure = ProgressiveDisclosure::new("Details");
        let mut state = DisclosureState::default();
        assert_eq!(disclosure.total_height(4, &state), 1);
        state.toggle();
        assert_eq!(disclosure.total_height(4, &state), 5);
    }
}
