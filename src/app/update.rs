use ratatui::layout::Rect;

use crate::app::Model;
use crate::app::model::{Overlay, TooltipTarget};
use crate::widgets::{ContentFilter, GuidedTour};

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Scroll the section list (or an open fullscreen view) up
    ScrollUp(usize),
    /// Scroll the section list (or an open fullscreen view) down
    ScrollDown(usize),
    /// Jump to the first section
    GoToTop,
    /// Jump to the last section
    GoToBottom,

    // Sections
    /// Toggle a disclosure open/closed
    ToggleSection(usize),
    /// Toggle inline expansion of a section body
    ToggleExpand(usize),
    /// Open the fullscreen text view for a section
    OpenTextFullscreen(usize),
    /// Open the fullscreen view of a section image
    OpenImage(usize, usize),
    /// Close the topmost overlay
    CloseOverlay,

    // Filters and search
    /// Toggle a content-kind filter chip
    ToggleFilter(String),
    /// Activate the search input
    StartSearch,
    /// Append a character to the query
    SearchChar(char),
    /// Delete the last query character
    SearchBackspace,
    /// Leave search input, keeping the query applied
    SearchSubmit,
    /// Clear the query and leave search input
    ClearSearch,

    // Tour
    OpenTour,
    CloseTour,
    TourAdvance,
    TourPrevious,

    // Chrome
    /// Hover target changed (tooltips)
    Hover(Option<TooltipTarget>),
    /// Reload the file from disk
    Reload,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Animation tick
    Tick,

    // Application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. File I/O
/// and image decoding happen in the side-effect pass afterwards.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::ScrollUp(n) => scroll(&mut model, n, true),
        Message::ScrollDown(n) => scroll(&mut model, n, false),
        Message::GoToTop => model.top_section = 0,
        Message::GoToBottom => {
            model.top_section = model.visible_sections().len().saturating_sub(1);
        }

        Message::ToggleSection(i) => {
            if let Some(section) = model.sections.get_mut(i) {
                section.disclosure_state.toggle();
                let id = section.id.clone();
                model.store.with(|s| s.toggle_section(&id));
            }
        }
        Message::ToggleExpand(i) => {
            if let Some(section) = model.sections.get_mut(i) {
                section.text_state.toggle_expanded();
            }
        }
        Message::OpenTextFullscreen(i) => {
            if let Some(section) = model.sections.get_mut(i) {
                section.text_state.open_fullscreen();
            }
        }
        Message::OpenImage(i, j) => {
            if let Some((_, state)) = model
                .sections
                .get_mut(i)
                .and_then(|s| s.images.get_mut(j))
            {
                state.open_fullscreen();
            }
        }
        Message::CloseOverlay => close_topmost(&mut model),

        Message::ToggleFilter(value) => {
            model.store.with(|s| {
                s.active_filters = ContentFilter::toggle_value(&s.active_filters, &value);
            });
            model.clamp_top_section();
        }
        Message::StartSearch => model.search.start(),
        Message::SearchChar(c) => {
            model.search.insert(c);
            sync_query(&mut model);
        }
        Message::SearchBackspace => {
            model.search.backspace();
            sync_query(&mut model);
        }
        Message::SearchSubmit => model.search.stop(),
        Message::ClearSearch => {
            model.search.clear();
            sync_query(&mut model);
        }

        Message::OpenTour => {
            if !model.tour.is_empty() {
                model.tour_state.open();
                model.store.with(|s| s.is_tour_open = true);
            }
        }
        Message::CloseTour => {
            model.tour_state.close();
            model.store.with(|s| s.is_tour_open = false);
        }
        Message::TourAdvance => {
            model.tour.advance(&mut model.tour_state);
            let open = model.tour_state.is_open();
            model.store.with(|s| s.is_tour_open = open);
        }
        Message::TourPrevious => GuidedTour::previous(&mut model.tour_state),

        Message::Hover(target) => model.hovered = target,
        Message::Reload => model.loading = true,

        Message::Resize(w, h) => model.frame_size = (w, h),
        Message::Tick => model.spinner.tick(),

        Message::Quit => model.should_quit = true,
    }
    model
}

fn scroll(model: &mut Model, n: usize, up: bool) {
    if let Overlay::TextFullscreen(i) = model.active_overlay() {
        let frame = Rect::new(0, 0, model.frame_size.0, model.frame_size.1);
        if let Some(section) = model.sections.get_mut(i) {
            if up {
                section.text_state.scroll_fullscreen_up(n);
            } else {
                let max = section.text.fullscreen_max_scroll(frame);
                section.text_state.scroll_fullscreen_down(n, max);
            }
        }
        return;
    }
    if up {
        model.top_section = model.top_section.saturating_sub(n);
    } else {
        let last = model.visible_sections().len().saturating_sub(1);
        model.top_section = (model.top_section + n).min(last);
    }
}

fn close_topmost(model: &mut Model) {
    match model.active_overlay() {
        Overlay::Tour => {
            model.tour_state.close();
            model.store.with(|s| s.is_tour_open = false);
        }
        Overlay::ImageFullscreen(i, j) => {
            if let Some((_, state)) = model
                .sections
                .get_mut(i)
                .and_then(|s| s.images.get_mut(j))
            {
                state.close_fullscreen();
            }
        }
        Overlay::TextFullscreen(i) => {
            if let Some(section) = model.sections.get_mut(i) {
                section.text_state.close_fullscreen();
            }
        }
        Overlay::None => {}
    }
}

fn sync_query(model: &mut Model) {
    let query = model.search.query().to_string();
    model.store.with(|s| s.search_query = query);
    model.clamp_top_section();
}
