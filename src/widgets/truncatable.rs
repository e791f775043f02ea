//! Collapsible content viewer with an optional fullscreen overlay.
//!
//! Content longer than a threshold is cut to a plain character-count slice
//! plus `"..."` until expanded. A separate fullscreen state shows the full,
//! untruncated content in a centered overlay: JSON content as preformatted
//! literal text, everything else through the markdown pipeline.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::markdown;
use crate::ui::style;

use super::{Outcome, centered_rect, point_in_rect};

/// Content fed to [`TruncatableText`]: either plain text or a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Json(serde_json::Value),
}

impl Content {
    /// Build JSON content from any serializable value.
    ///
    /// # Errors
    ///
    /// Fails if the value cannot be represented as JSON (for example a
    /// map with non-string keys).
    pub fn from_serialize<T: serde::Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self::Json)
    }

    /// Serialize to the string the widget operates on.
    ///
    /// Structured JSON values (objects, arrays) serialize to their JSON
    /// text; scalars coerce to their plain string form (a JSON string is
    /// used verbatim, numbers/bools/null use their display form).
    pub fn serialized(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Json(value) => match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<serde_json::Value> for Content {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// Default truncation threshold for JSON content, in characters.
pub const JSON_THRESHOLD: usize = 1000;
/// Default truncation threshold for plain/markdown content, in characters.
pub const TEXT_THRESHOLD: usize = 500;

/// Per-instance view state for [`TruncatableText`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TruncatableState {
    expanded: bool,
    fullscreen: bool,
    fullscreen_scroll: usize,
}

impl TruncatableState {
    /// Toggle inline expansion. Always consumes the triggering event so the
    /// gesture does not reach enclosing handlers.
    pub const fn toggle_expanded(&mut self) -> Outcome {
        self.expanded = !self.expanded;
        Outcome::Consumed
    }

    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub const fn open_fullscreen(&mut self) {
        self.fullscreen = true;
        self.fullscreen_scroll = 0;
    }

    pub const fn close_fullscreen(&mut self) {
        self.fullscreen = false;
    }

    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub const fn fullscreen_scroll(&self) -> usize {
        self.fullscreen_scroll
    }

    pub const fn scroll_fullscreen_up(&mut self, n: usize) {
        self.fullscreen_scroll = self.fullscreen_scroll.saturating_sub(n);
    }

    pub fn scroll_fullscreen_down(&mut self, n: usize, max: usize) {
        self.fullscreen_scroll = (self.fullscreen_scroll + n).min(max);
    }
}

/// Truncatable content viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct TruncatableText {
    content: Content,
    is_json: bool,
    json_threshold: usize,
    text_threshold: usize,
    show_fullscreen: bool,
}

impl TruncatableText {
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
            is_json: false,
            json_threshold: JSON_THRESHOLD,
            text_threshold: TEXT_THRESHOLD,
            show_fullscreen: true,
        }
    }

    /// Build a JSON-mode widget from any serializable value.
    ///
    /// # Errors
    ///
    /// Fails if the value cannot be represented as JSON.
    pub fn structured<T: serde::Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(Content::from_serialize(value)?).is_json(true))
    }

    /// Treat the content as JSON: use the JSON threshold and render the
    /// fullscreen view as preformatted literal text.
    pub const fn is_json(mut self, is_json: bool) -> Self {
        self.is_json = is_json;
        self
    }

    pub const fn json_threshold(mut self, threshold: usize) -> Self {
        self.json_threshold = threshold;
        self
    }

    pub const fn text_threshold(mut self, threshold: usize) -> Self {
        self.text_threshold = threshold;
        self
    }

    /// Hide the fullscreen control.
    pub const fn show_fullscreen(mut self, show: bool) -> Self {
        self.show_fullscreen = show;
        self
    }

    const fn threshold(&self) -> usize {
        if self.is_json {
            self.json_threshold
        } else {
            self.text_threshold
        }
    }

    /// The serialized content string the widget displays.
    pub fn serialized(&self) -> String {
        self.content.serialized()
    }

    /// Whether the content exceeds the applicable threshold.
    pub fn should_truncate(&self) -> bool {
        self.serialized().chars().count() > self.threshold()
    }

    /// The content to display inline: the full string, or a character-count
    /// slice plus `"..."` when truncated and not expanded.
    pub fn display_content(&self, state: &TruncatableState) -> String {
        let content = self.serialized();
        if self.should_truncate() && !state.is_expanded() {
            let cut: String = content.chars().take(self.threshold()).collect();
            format!("{cut}...")
        } else {
            content
        }
    }

    /// Rendered inline lines at the given width (without the control row).
    pub fn content_lines(&self, width: u16, state: &TruncatableState) -> Vec<Line<'static>> {
        let display = self.display_content(state);
        if self.is_json {
            markdown::literal_lines(&display, width)
        } else {
            markdown::render_markdown(&display, width).lines
        }
    }

    /// Total inline height: content plus one control row when truncatable.
    pub fn inline_height(&self, width: u16, state: &TruncatableState) -> usize {
        self.content_lines(width, state).len() + usize::from(self.should_truncate())
    }

    /// Render the inline view into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &TruncatableState) {
        let lines = self.content_lines(area.width, state);
        let content_area = Rect {
            height: area
                .height
                .saturating_sub(u16::from(self.should_truncate())),
            ..area
        };
        frame.render_widget(Paragraph::new(lines), content_area);

        if self.should_truncate() && area.height > content_area.height {
            let controls = Line::from(self.control_spans(state)).right_aligned();
            let controls_area = Rect {
                y: area.y + area.height - 1,
                height: 1,
                ..area
            };
            frame.render_widget(Paragraph::new(controls), controls_area);
        }
    }

    fn control_spans(&self, state: &TruncatableState) -> Vec<Span<'static>> {
        let mut spans = vec![Span::styled(
            Self::expand_label(state).to_string(),
            style::hint_style(),
        )];
        if self.show_fullscreen {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                FULLSCREEN_LABEL.to_string(),
                style::hint_style(),
            ));
        }
        spans
    }

    const fn expand_label(state: &TruncatableState) -> &'static str {
        if state.is_expanded() {
            "▲ less"
        } else {
            "▼ more"
        }
    }

    /// Hit box of the expand/collapse control on the control row.
    pub fn expand_control_rect(&self, area: Rect, state: &TruncatableState) -> Option<Rect> {
        if !self.should_truncate() {
            return None;
        }
        let expand_w = Self::expand_label(state).width() as u16;
        let full_w = if self.show_fullscreen {
            FULLSCREEN_LABEL.width() as u16 + 2
        } else {
            0
        };
        let x = (area.x + area.width).saturating_sub(expand_w + full_w);
        Some(Rect {
            x,
            y: area.y + area.height.saturating_sub(1),
            width: expand_w,
            height: 1,
        })
    }

    /// Hit box of the fullscreen control on the control row.
    pub fn fullscreen_control_rect(&self, area: Rect) -> Option<Rect> {
        if !self.should_truncate() || !self.show_fullscreen {
            return None;
        }
        let full_w = FULLSCREEN_LABEL.width() as u16;
        Some(Rect {
            x: (area.x + area.width).saturating_sub(full_w),
            y: area.y + area.height.saturating_sub(1),
            width: full_w,
            height: 1,
        })
    }

    /// The fullscreen panel rect: 80% of the frame in each dimension.
    pub fn fullscreen_panel_rect(frame_area: Rect) -> Rect {
        centered_rect(
            frame_area.width * 4 / 5,
            frame_area.height * 4 / 5,
            frame_area,
        )
    }

    /// The close control in the panel's top-right corner.
    pub const fn fullscreen_close_rect(panel: Rect) -> Rect {
        Rect {
            x: panel.x + panel.width.saturating_sub(4),
            y: panel.y,
            width: 3,
            height: 1,
        }
    }

    /// Lines shown in the fullscreen view: always the full content.
    pub fn fullscreen_lines(&self, width: u16) -> Vec<Line<'static>> {
        let content = self.serialized();
        if self.is_json {
            markdown::literal_lines(&content, width)
        } else {
            markdown::render_markdown(&content, width).lines
        }
    }

    /// Maximum fullscreen scroll offset for the current frame size.
    pub fn fullscreen_max_scroll(&self, frame_area: Rect) -> usize {
        let panel = Self::fullscreen_panel_rect(frame_area);
        let inner_height = panel.height.saturating_sub(2) as usize;
        self.fullscreen_lines(panel.width.saturating_sub(4))
            .len()
            .saturating_sub(inner_height)
    }

    /// Render the fullscreen overlay over the whole frame.
    pub fn render_fullscreen(&self, frame: &mut Frame, state: &TruncatableState) {
        if !state.is_fullscreen() {
            return;
        }
        let area = frame.area();
        let panel = Self::fullscreen_panel_rect(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1))
            .style(style::overlay_style());
        let inner = block.inner(panel);
        frame.render_widget(Clear, panel);
        frame.render_widget(block, panel);

        let lines = self.fullscreen_lines(inner.width);
        let max_scroll = lines.len().saturating_sub(inner.height as usize);
        let scroll = state.fullscreen_scroll().min(max_scroll);
        let end = (scroll + inner.height as usize).min(lines.len());
        frame.render_widget(Paragraph::new(lines[scroll..end].to_vec()), inner);

        let close = Self::fullscreen_close_rect(panel);
        frame.render_widget(
            Paragraph::new(Line::styled("[✕]", style::hint_style())),
            close,
        );
    }

    /// Route a click while the fullscreen overlay is open.
    ///
    /// Backdrop and close control close the overlay; clicks inside the
    /// content panel are swallowed without closing.
    pub fn handle_fullscreen_click(
        frame_area: Rect,
        col: u16,
        row: u16,
        state: &mut TruncatableState,
    ) -> Outcome {
        if !state.is_fullscreen() {
            return Outcome::Ignored;
        }
        let panel = Self::fullscreen_panel_rect(frame_area);
        if point_in_rect(col, row, Self::fullscreen_close_rect(panel)) {
            state.close_fullscreen();
        } else if !point_in_rect(col, row, panel) {
            state.close_fullscreen();
        }
        Outcome::Consumed
    }
}

const FULLSCREEN_LABEL: &str = "⛶ full";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_short_content_displays_unchanged() {
        let widget = TruncatableText::new("hello world");
        let state = TruncatableState::default();
        assert!(!widget.should_truncate());
        assert_eq!(widget.display_content(&state), "hello world");
    }

    #[test]
    fn test_long_content_truncates_with_ellipsis() {
        let content = "x".repeat(600);
        let widget = TruncatableText::new(content.clone());
        let state = TruncatableState::default();
        assert!(widget.should_truncate());
        let display = widget.display_content(&state);
        assert_eq!(display, format!("{}...", &content[..500]));
    }

    #[test]
    fn test_content_at_threshold_is_not_truncated() {
        let content = "y".repeat(500);
        let widget = TruncatableText::new(content.clone());
        assert!(!widget.should_truncate());
        assert_eq!(
            widget.display_content(&TruncatableState::default()),
            content
        );
    }

    #[test]
    fn test_expand_shows_full_content() {
        let content = "z".repeat(600);
        let widget = TruncatableText::new(content.clone());
        let mut state = TruncatableState::default();
        assert_eq!(state.toggle_expanded(), Outcome::Consumed);
        assert_eq!(widget.display_content(&state), content);
    }

    #[test]
    fn test_expand_toggle_round_trip_restores_truncation() {
        let widget = TruncatableText::new("a".repeat(600));
        let mut state = TruncatableState::default();
        let truncated = widget.display_content(&state);
        state.toggle_expanded();
        state.toggle_expanded();
        assert_eq!(widget.display_content(&state), truncated);
    }

    #[test]
    fn test_json_threshold_applies_to_json_content() {
        let content = "j".repeat(600);
        let widget = TruncatableText::new(content.clone()).is_json(true);
        // 600 chars is under the 1000-char JSON threshold.
        assert!(!widget.should_truncate());

        let widget = TruncatableText::new("j".repeat(1100)).is_json(true);
        assert!(widget.should_truncate());
    }

    #[test]
    fn test_structured_content_serializes_as_json() {
        let value = json!({"name": "docent", "count": 2});
        let widget = TruncatableText::new(value.clone());
        assert_eq!(widget.serialized(), value.to_string());
    }

    #[test]
    fn test_structured_builds_json_mode_from_serialize() {
        #[derive(serde::Serialize)]
        struct Payload {
            count: u32,
            name: &'static str,
        }
        let widget = TruncatableText::structured(&Payload {
            count: 3,
            name: "alpha",
        })
        .unwrap();
        assert_eq!(widget.serialized(), r#"{"count":3,"name":"alpha"}"#);
        assert_eq!(
            widget.serialized(),
            Content::from_serialize(&Payload {
                count: 3,
                name: "alpha",
            })
            .unwrap()
            .serialized()
        );
    }

    #[test]
    fn test_scalar_content_coerces_unchanged() {
        assert_eq!(Content::from(json!("plain")).serialized(), "plain");
        assert_eq!(Content::from(json!(42)).serialized(), "42");
        assert_eq!(Content::from(json!(true)).serialized(), "true");
        assert_eq!(Content::from(json!(null)).serialized(), "null");
    }

    #[test]
    fn test_fullscreen_shows_full_content_even_when_collapsed() {
        let content = "m".repeat(600);
        let widget = TruncatableText::new(content.clone());
        let lines = widget.fullscreen_lines(80);
        let joined: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.as_ref()))
            .collect::<Vec<_>>()
            .join("");
        assert!(joined.replace(' ', "").contains(&content[..100]));
        assert!(!joined.contains("..."));
    }

    #[test]
    fn test_fullscreen_click_routing() {
        let area = Rect::new(0, 0, 100, 50);
        let mut state = TruncatableState::default();
        state.open_fullscreen();

        // Click inside the panel: stays open.
        let panel = TruncatableText::fullscreen_panel_rect(area);
        let outcome = TruncatableText::handle_fullscreen_click(
            area,
            panel.x + 2,
            panel.y + 2,
            &mut state,
        );
        assert_eq!(outcome, Outcome::Consumed);
        assert!(state.is_fullscreen());

        // Click on the backdrop: closes.
        TruncatableText::handle_fullscreen_click(area, 0, 0, &mut state);
        assert!(!state.is_fullscreen());
    }

    #[test]
    fn test_fullscreen_close_control_closes() {
        let area = Rect::new(0, 0, 100, 50);
        let mut state = TruncatableState::default();
        state.open_fullscreen();
        let panel = TruncatableText::fullscreen_panel_rect(area);
        let close = TruncatableText::fullscreen_close_rect(panel);
        TruncatableText::handle_fullscreen_click(area, close.x, close.y, &mut state);
        assert!(!state.is_fullscreen());
    }

    #[test]
    fn test_ignored_when_not_fullscreen() {
        let area = Rect::new(0, 0, 100, 50);
        let mut state = TruncatableState::default();
        let outcome = TruncatableText::handle_fullscreen_click(area, 0, 0, &mut state);
        assert_eq!(outcome, Outcome::Ignored);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn truncation_matches_char_slice(
                content in "[a-zA-Z0-9 ]{0,800}",
                threshold in 1usize..600,
            ) {
                let widget = TruncatableText::new(content.clone()).text_threshold(threshold);
                let state = TruncatableState::default();
                let display = widget.display_content(&state);
                if content.chars().count() <= threshold {
                    prop_assert_eq!(display, content);
                } else {
                    let expected: String = content.chars().take(threshold).collect();
                    prop_assert_eq!(display, format!("{expected}..."));
                }
            }

            #[test]
            fn double_toggle_is_identity(content in ".{0,200}", toggles in 0usize..6) {
                let widget = TruncatableText::new(content).text_threshold(50);
                let mut state = TruncatableState::default();
                let initial = widget.display_content(&state);
                for _ in 0..(toggles * 2) {
                    state.toggle_expanded();
                }
                prop_assert_eq!(widget.display_content(&state), initial);
            }
        }
    }
}
