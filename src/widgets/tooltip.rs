//! Contextual help tooltips anchored to a trigger glyph.
//!
//! The trigger renders as a dim `(?)` marker; while it is hovered or
//! focused the tooltip body pops up beside it at the configured
//! [`Placement`], clamped so it never leaves the frame.

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::markdown;
use crate::ui::style;

use super::Placement;

/// Widest the tooltip body will grow, borders included.
const MAX_BODY_WIDTH: u16 = 34;

/// The glyph the tooltip anchors to.
pub const TRIGGER: &str = "(?)";

/// A help tooltip with a placement relative to its trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpTooltip {
    text: String,
    placement: Placement,
}

impl HelpTooltip {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placement: Placement::default(),
        }
    }

    pub const fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render the trigger glyph, highlighted while the tooltip is shown.
    pub fn render_trigger(frame: &mut Frame, rect: Rect, active: bool) {
        let line = if active {
            Line::styled(TRIGGER, style::chip_style(true))
        } else {
            Line::styled(TRIGGER, style::hint_style())
        };
        frame.render_widget(Paragraph::new(line), rect);
    }

    fn body_lines(&self, width: u16) -> Vec<Line<'static>> {
        markdown::literal_lines(&self.text, width)
    }

    /// Compute the popup rect for a trigger, clamped into the frame.
    pub fn overlay_rect(&self, trigger: Rect, frame_area: Rect) -> Rect {
        let body_width = MAX_BODY_WIDTH.min(frame_area.width.saturating_sub(2));
        let inner_width = body_width.saturating_sub(2);
        let height = (self.body_lines(inner_width).len() as u16 + 2)
            .min(frame_area.height);

        let (x, y) = match self.placement {
            Placement::Right => (trigger.x + trigger.width + 1, trigger.y),
            Placement::Left => (
                trigger.x.saturating_sub(body_width + 1),
                trigger.y,
            ),
            Placement::Top => (trigger.x, trigger.y.saturating_sub(height)),
            Placement::Bottom => (trigger.x, trigger.y + trigger.height),
        };

        let x = x.min((frame_area.x + frame_area.width).saturating_sub(body_width));
        let y = y.min((frame_area.y + frame_area.height).saturating_sub(height));
        Rect {
            x: x.max(frame_area.x),
            y: y.max(frame_area.y),
            width: body_width,
            height,
        }
    }

    /// Render the tooltip popup beside `trigger`.
    pub fn render(&self, frame: &mut Frame, trigger: Rect) {
        let rect = self.overlay_rect(trigger, frame.area());
        let block = Block::default()
            .borders(Borders::ALL)
            .style(style::overlay_style());
        let inner = block.inner(rect);
        frame.render_widget(Clear, rect);
        frame.render_widget(block, rect);
        frame.render_widget(Paragraph::new(self.body_lines(inner.width)), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_area() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn test_right_placement_sits_beside_trigger() {
        let tooltip = HelpTooltip::new("short help");
        let trigger = Rect::new(10, 5, 3, 1);
        let rect = tooltip.overlay_rect(trigger, frame_area());
        assert_eq!(rect.x, 14);
        assert_eq!(rect.y, 5);
    }

    #[test]
    fn test_bottom_placement_sits_below_trigger() {
        let tooltip = HelpTooltip::new("short help").placement(Placement::Bottom);
        let trigger = Rect::new(10, 5, 3, 1);
        let rect = tooltip.overlay_rect(trigger, frame_area());
        assert_eq!(rect.y, 6);
        assert_eq!(rect.x, 10);
    }

    #[test]
    fn test_top_placement_sits_above_trigger() {
        let tooltip = HelpTooltip::new("short help").placement(Placement::Top);
        let trigger = Rect::new(10, 20, 3, 1);
        let rect = tooltip.overlay_rect(trigger, frame_area());
        assert_eq!(rect.y + rect.height, 20);
    }

    #[test]
    fn test_popup_clamps_to_frame_edges() {
        let tooltip = HelpTooltip::new("clamped help text");
        let trigger = Rect::new(115, 38, 3, 1);
        let rect = tooltip.overlay_rect(trigger, frame_area());
        assert!(rect.x + rect.width <= 120);
        assert!(rect.y + rect.height <= 40);
    }

    #[test]
    fn test_left_placement_near_origin_stays_in_frame() {
        let tooltip = HelpTooltip::new("help").placement(Placement::Left);
        let trigger = Rect::new(1, 1, 3, 1);
        let rect = tooltip.overlay_rect(trigger, frame_area());
        assert_eq!(rect.x, 0);
    }

    #[test]
    fn test_long_text_wraps_into_multiple_rows() {
        let tooltip = HelpTooltip::new("w".repeat(200));
        let trigger = Rect::new(0, 0, 3, 1);
        let rect = tooltip.overlay_rect(trigger, frame_area());
        assert!(rect.height > 3);
    }
}
