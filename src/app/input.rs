use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::model::{Overlay, TooltipTarget};
use crate::app::{App, Message, Model};
use crate::ui;
use crate::widgets::{ClickableImage, TourClick, TruncatableText, point_in_rect};

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Message::Quit);
        }

        match model.active_overlay() {
            Overlay::Tour => {
                return match key.code {
                    KeyCode::Esc => Some(Message::CloseTour),
                    KeyCode::Left | KeyCode::Char('p') => Some(Message::TourPrevious),
                    KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ' | 'n') => {
                        Some(Message::TourAdvance)
                    }
                    _ => None,
                };
            }
            Overlay::ImageFullscreen(..) => {
                return match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => Some(Message::CloseOverlay),
                    _ => None,
                };
            }
            Overlay::TextFullscreen(_) => {
                return match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => Some(Message::CloseOverlay),
                    KeyCode::Up | KeyCode::Char('k') => Some(Message::ScrollUp(1)),
                    KeyCode::Down | KeyCode::Char('j') => Some(Message::ScrollDown(1)),
                    KeyCode::PageUp => Some(Message::ScrollUp(10)),
                    KeyCode::PageDown => Some(Message::ScrollDown(10)),
                    _ => None,
                };
            }
            Overlay::None => {}
        }

        if model.search.is_active() {
            return match key.code {
                KeyCode::Esc => Some(Message::ClearSearch),
                KeyCode::Enter => Some(Message::SearchSubmit),
                KeyCode::Backspace => Some(Message::SearchBackspace),
                KeyCode::Char(c) => Some(Message::SearchChar(c)),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('/') => Some(Message::StartSearch),
            KeyCode::F(1) | KeyCode::Char('?') => Some(Message::OpenTour),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::ScrollUp(1)),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::ScrollDown(1)),
            KeyCode::PageUp => Some(Message::ScrollUp(5)),
            KeyCode::PageDown => Some(Message::ScrollDown(5)),
            KeyCode::Home | KeyCode::Char('g') => Some(Message::GoToTop),
            KeyCode::End | KeyCode::Char('G') => Some(Message::GoToBottom),
            KeyCode::Char('r') => Some(Message::Reload),
            KeyCode::Enter => {
                // Toggle the section currently at the top of the list.
                let visible = model.visible_sections();
                visible
                    .get(model.top_section)
                    .copied()
                    .map(Message::ToggleSection)
            }
            KeyCode::Esc => {
                if model.search.query().is_empty() {
                    None
                } else {
                    Some(Message::ClearSearch)
                }
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let area = Rect::new(0, 0, model.frame_size.0, model.frame_size.1);
        let (col, row) = (mouse.column, mouse.row);

        match model.active_overlay() {
            Overlay::Tour => {
                if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
                    let state = &model.tour_state;
                    return match model.tour.classify_click(area, col, row, state) {
                        TourClick::Previous => Some(Message::TourPrevious),
                        TourClick::Advance => Some(Message::TourAdvance),
                        TourClick::Backdrop => Some(Message::CloseTour),
                        TourClick::Panel => None,
                    };
                }
                return None;
            }
            Overlay::ImageFullscreen(..) => {
                if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
                    let panel = ClickableImage::fullscreen_rect(area);
                    let close = ClickableImage::fullscreen_close_rect(panel);
                    if point_in_rect(col, row, close) || !point_in_rect(col, row, panel) {
                        return Some(Message::CloseOverlay);
                    }
                }
                return None;
            }
            Overlay::TextFullscreen(_) => {
                return match mouse.kind {
                    MouseEventKind::Up(MouseButton::Left) => {
                        let panel = TruncatableText::fullscreen_panel_rect(area);
                        let close = TruncatableText::fullscreen_close_rect(panel);
                        if point_in_rect(col, row, close) || !point_in_rect(col, row, panel) {
                            Some(Message::CloseOverlay)
                        } else {
                            None
                        }
                    }
                    MouseEventKind::ScrollUp => Some(Message::ScrollUp(3)),
                    MouseEventKind::ScrollDown => Some(Message::ScrollDown(3)),
                    _ => None,
                };
            }
            Overlay::None => {}
        }

        let screen = ui::compute_layout(model, area);

        if matches!(mouse.kind, MouseEventKind::Moved) {
            let target = if point_in_rect(col, row, screen.help_trigger) {
                Some(TooltipTarget::Help)
            } else if point_in_rect(col, row, screen.chips) {
                Some(TooltipTarget::Filters)
            } else if point_in_rect(col, row, screen.search) {
                Some(TooltipTarget::Search)
            } else {
                None
            };
            if target == model.hovered {
                return None;
            }
            return Some(Message::Hover(target));
        }

        if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
            if point_in_rect(col, row, screen.help_trigger) {
                return Some(Message::OpenTour);
            }
            if let Some(value) = model.filter.value_at(screen.chips, col, row) {
                return Some(Message::ToggleFilter(value.to_string()));
            }
            if point_in_rect(col, row, screen.search) {
                return Some(Message::StartSearch);
            }
            for slot in &screen.sections {
                let section = &model.sections[slot.index];
                if slot.text.height > 0 {
                    if let Some(rect) = section
                        .text
                        .expand_control_rect(slot.text, &section.text_state)
                    {
                        if point_in_rect(col, row, rect) {
                            return Some(Message::ToggleExpand(slot.index));
                        }
                    }
                    if let Some(rect) = section.text.fullscreen_control_rect(slot.text) {
                        if point_in_rect(col, row, rect) {
                            return Some(Message::OpenTextFullscreen(slot.index));
                        }
                    }
                }
                for (j, rect) in &slot.images {
                    if point_in_rect(col, row, *rect) {
                        return Some(Message::OpenImage(slot.index, *j));
                    }
                }
                if point_in_rect(col, row, slot.area) && row == slot.area.y {
                    return Some(Message::ToggleSection(slot.index));
                }
            }
            return None;
        }

        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(1)),
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(1)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn model() -> Model {
        let doc = "# Alpha\n\nAlpha body text.\n\n# Beta\n\nBeta body text.\n";
        let mut model = Model::new(PathBuf::from("doc.md"), doc, (80, 24));
        model.frame_size = (80, 24);
        model
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(col: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_base_keys() {
        let model = model();
        assert_eq!(App::handle_key(key(KeyCode::Char('q')), &model), Some(Message::Quit));
        assert_eq!(
            App::handle_key(key(KeyCode::Char('/')), &model),
            Some(Message::StartSearch)
        );
        assert_eq!(
            App::handle_key(key(KeyCode::Char('?')), &model),
            Some(Message::OpenTour)
        );
        assert_eq!(
            App::handle_key(key(KeyCode::Enter), &model),
            Some(Message::ToggleSection(0))
        );
    }

    #[test]
    fn test_search_captures_characters() {
        let mut model = model();
        model.search.start();
        assert_eq!(
            App::handle_key(key(KeyCode::Char('q')), &model),
            Some(Message::SearchChar('q'))
        );
        assert_eq!(
            App::handle_key(key(KeyCode::Esc), &model),
            Some(Message::ClearSearch)
        );
    }

    #[test]
    fn test_tour_takes_key_precedence() {
        let mut model = model();
        model.tour_state.open();
        assert_eq!(
            App::handle_key(key(KeyCode::Enter), &model),
            Some(Message::TourAdvance)
        );
        assert_eq!(
            App::handle_key(key(KeyCode::Esc), &model),
            Some(Message::CloseTour)
        );
        assert_eq!(App::handle_key(key(KeyCode::Char('/')), &model), None);
    }

    #[test]
    fn test_click_on_section_header_toggles() {
        let model = model();
        let area = Rect::new(0, 0, 80, 24);
        let screen = ui::compute_layout(&model, area);
        let header = screen.sections[0].area;
        assert_eq!(
            App::handle_mouse(click(header.x + 2, header.y), &model),
            Some(Message::ToggleSection(0))
        );
    }

    #[test]
    fn test_click_on_chip_toggles_filter() {
        let model = model();
        assert_eq!(
            App::handle_mouse(click(1, 0), &model),
            Some(Message::ToggleFilter("text".to_string()))
        );
    }

    #[test]
    fn test_click_on_help_trigger_opens_tour() {
        let model = model();
        assert_eq!(
            App::handle_mouse(click(78, 0), &model),
            Some(Message::OpenTour)
        );
    }

    #[test]
    fn test_backdrop_click_closes_tour() {
        let mut model = model();
        model.tour_state.open();
        assert_eq!(
            App::handle_mouse(click(0, 23), &model),
            Some(Message::CloseTour)
        );
    }

    #[test]
    fn test_hover_reports_target_changes_only() {
        let mut model = model();
        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 1,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            App::handle_mouse(moved, &model),
            Some(Message::Hover(Some(TooltipTarget::Filters)))
        );
        model.hovered = Some(TooltipTarget::Filters);
        assert_eq!(App::handle_mouse(moved, &model), None);
    }
}
