//! Clickable image thumbnails and the fullscreen image overlay.
//!
//! Images render through the terminal's best available protocol when a
//! decoded [`StatefulProtocol`] is supplied, and fall back to a styled
//! `[Image: label]` placeholder otherwise. Clicking a thumbnail opens a
//! near-fullscreen overlay; clicking the backdrop or close control closes
//! it, while clicks on the image panel itself are swallowed.

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use ratatui_image::protocol::StatefulProtocol;
use ratatui_image::StatefulImage;

use crate::ui::style;

use super::{Outcome, centered_rect, point_in_rect};

/// View state for a [`ClickableImage`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageState {
    fullscreen: bool,
}

impl ImageState {
    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub const fn open_fullscreen(&mut self) {
        self.fullscreen = true;
    }

    pub const fn close_fullscreen(&mut self) {
        self.fullscreen = false;
    }
}

/// An image that expands to a fullscreen overlay on click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickableImage {
    alt: String,
    src: String,
}

impl ClickableImage {
    pub fn new(alt: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            alt: alt.into(),
            src: src.into(),
        }
    }

    pub fn alt(&self) -> &str {
        &self.alt
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    fn placeholder_label(&self) -> String {
        if self.alt.is_empty() {
            "[Image]".to_string()
        } else {
            format!("[Image: {}]", self.alt)
        }
    }

    /// Render the thumbnail into `area`.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        protocol: Option<&mut StatefulProtocol>,
    ) {
        if let Some(protocol) = protocol {
            frame.render_stateful_widget(StatefulImage::default(), area, protocol);
        } else {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    self.placeholder_label(),
                    style::image_placeholder_style(),
                )),
                area,
            );
        }
    }

    /// The fullscreen panel rect: 90% of the frame in each dimension.
    pub fn fullscreen_rect(frame_area: Rect) -> Rect {
        centered_rect(
            frame_area.width * 9 / 10,
            frame_area.height * 9 / 10,
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

    /// Render the fullscreen overlay over the whole frame.
    pub fn render_fullscreen(
        &self,
        frame: &mut Frame,
        protocol: Option<&mut StatefulProtocol>,
        state: &ImageState,
    ) {
        if !state.is_fullscreen() {
            return;
        }
        let area = frame.area();
        let panel = Self::fullscreen_rect(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.alt))
            .style(style::overlay_style());
        let inner = block.inner(panel);
        frame.render_widget(Clear, panel);
        frame.render_widget(block, panel);

        if let Some(protocol) = protocol {
            frame.render_stateful_widget(StatefulImage::default(), inner, protocol);
        } else {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    self.placeholder_label(),
                    style::image_placeholder_style(),
                ))
                .centered(),
                inner,
            );
        }

        frame.render_widget(
            Paragraph::new(Line::styled("[✕]", style::hint_style())),
            Self::fullscreen_close_rect(panel),
        );
    }

    /// Route a click on the thumbnail: inside `area` opens the overlay.
    pub fn handle_click(area: Rect, col: u16, row: u16, state: &mut ImageState) -> Outcome {
        if point_in_rect(col, row, area) {
            state.open_fullscreen();
            Outcome::Consumed
        } else {
            Outcome::Ignored
        }
    }

    /// Route a click while the overlay is open: backdrop and the close
    /// control close it, clicks on the panel are swallowed.
    pub fn handle_fullscreen_click(
        frame_area: Rect,
        col: u16,
        row: u16,
        state: &mut ImageState,
    ) -> Outcome {
        if !state.is_fullscreen() {
            return Outcome::Ignored;
        }
        let panel = Self::fullscreen_rect(frame_area);
        if point_in_rect(col, row, Self::fullscreen_close_rect(panel))
            || !point_in_rect(col, row, panel)
        {
            state.close_fullscreen();
        }
        Outcome::Consumed
    }
}
