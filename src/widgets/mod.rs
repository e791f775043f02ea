//! The presentational widget toolkit.
//!
//! Each widget is a standalone struct with a fixed prop contract; stateful
//! widgets pair with a small state struct owned by the host. Widgets render
//! through a [`ratatui::Frame`] and expose the rects of their interactive
//! regions so the host can route mouse events.

pub mod disclosure;
pub mod filter;
pub mod image;
pub mod search;
pub mod spinner;
pub mod tooltip;
pub mod tour;
pub mod truncatable;

pub use disclosure::{DisclosureState, ProgressiveDisclosure};
pub use filter::{ContentFilter, FilterOption};
pub use image::{ClickableImage, ImageState};
pub use search::{SearchBar, SearchState};
pub use spinner::{LoadingDots, LoadingIndicator};
pub use tooltip::HelpTooltip;
pub use tour::{GuidedTour, TourClick, TourState, TourStep};
pub use truncatable::{Content, TruncatableState, TruncatableText};

use ratatui::layout::Rect;

/// Where an overlay sits relative to its trigger area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
    Top,
    #[default]
    Right,
    Bottom,
    Left,
}

/// Whether a widget consumed an input event.
///
/// `Consumed` means the host must not forward the same gesture to enclosing
/// handlers (the stop-propagation contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Consumed,
    Ignored,
}

/// True if a terminal cell lies inside a rect.
pub(crate) const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// A rect of the given size centered in `area`, clamped to fit.
pub(crate) const fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = if width < area.width { width } else { area.width };
    let h = if height < area.height {
        height
    } else {
        area.height
    };
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_rect_edges() {
        let rect = Rect::new(2, 3, 4, 2);
        assert!(point_in_rect(2, 3, rect));
        assert!(point_in_rect(5, 4, rect));
        assert!(!point_in_rect(6, 3, rect));
        assert!(!point_in_rect(2, 5, rect));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 10);
        let rect = centered_rect(100, 100, area);
        assert_eq!(rect, area);
    }

    #[test]
    fn test_centered_rect_centers() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect(10, 4, area);
        assert_eq!(rect, Rect::new(5, 3, 10, 4));
    }
}
