//! Screen layout shared by rendering and mouse hit-testing.
//!
//! [`compute`] resolves the chrome rows and a slot per visible section,
//! stacking sections from `top_section` until the body runs out of rows.
//! Input handling recomputes the same layout to map clicks back to
//! sections, controls, and images.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::Model;

/// Rows reserved for each inline image thumbnail.
pub const IMAGE_ROWS: u16 = 8;
/// Columns section bodies are indented under their header.
pub const SECTION_INDENT: u16 = 2;

/// Layout of one rendered section.
pub struct SectionSlot {
    /// Index into `model.sections`
    pub index: usize,
    /// Header plus body
    pub area: Rect,
    /// The truncatable-text area (zero height while closed)
    pub text: Rect,
    /// Image thumbnail rects, by image index
    pub images: Vec<(usize, Rect)>,
}

/// The resolved screen layout for one frame.
pub struct ScreenLayout {
    pub chips: Rect,
    pub help_trigger: Rect,
    pub search: Rect,
    pub body: Rect,
    pub status: Rect,
    pub sections: Vec<SectionSlot>,
}

pub fn compute(model: &Model, area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let chips_row = chunks[0];
    let help_trigger = Rect {
        x: (chips_row.x + chips_row.width).saturating_sub(3),
        width: 3.min(chips_row.width),
        ..chips_row
    };
    let chips = Rect {
        width: chips_row.width.saturating_sub(4),
        ..chips_row
    };
    let body = chunks[2];

    let mut sections = Vec::new();
    let mut y = body.y;
    let bottom = body.y + body.height;
    for &index in model.visible_sections().iter().skip(model.top_section) {
        if y >= bottom {
            break;
        }
        let section = &model.sections[index];
        let inner_w = body.width.saturating_sub(SECTION_INDENT);

        let text_h = if section.disclosure_state.is_open() {
            section.text.inline_height(inner_w, &section.text_state) as u16
        } else {
            0
        };
        let images_h = if section.disclosure_state.is_open() {
            section.images.len() as u16 * IMAGE_ROWS
        } else {
            0
        };
        let total = section
            .disclosure
            .total_height(text_h + images_h, &section.disclosure_state);
        let height = total.min(bottom - y);
        let slot_area = Rect::new(body.x, y, body.width, height);

        let text = Rect::new(
            body.x + SECTION_INDENT,
            y + 1,
            inner_w,
            text_h.min(height.saturating_sub(1)),
        );
        let mut images = Vec::new();
        let mut img_y = text.y + text.height;
        for (j, _) in section.images.iter().enumerate() {
            if img_y >= bottom || !section.disclosure_state.is_open() {
                break;
            }
            let h = IMAGE_ROWS.min(bottom - img_y);
            images.push((j, Rect::new(text.x, img_y, inner_w, h)));
            img_y += h;
        }

        sections.push(SectionSlot {
            index,
            area: slot_area,
            text,
            images,
        });
        // Blank separator row between sections.
        y += height + 1;
    }

    ScreenLayout {
        chips,
        help_trigger,
        search: chunks[1],
        body,
        status: chunks[3],
        sections,
    }
}
