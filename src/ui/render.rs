use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::app::model::{Overlay, TooltipTarget};
use crate::timefmt;
use crate::widgets::HelpTooltip;

use super::{layout, style};

/// Render the complete UI.
pub fn view(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let screen = layout::compute(model, area);
    let overlay = model.active_overlay();
    let filters = model.store.with(|s| s.active_filters.clone());

    let Model {
        sections,
        image_protocols,
        images_enabled,
        filter,
        search_bar,
        search,
        tour,
        tour_state,
        spinner,
        loading,
        modified,
        file_path,
        hovered,
        ..
    } = model;
    let hovered = *hovered;

    filter.render(frame, screen.chips, &filters);
    HelpTooltip::render_trigger(
        frame,
        screen.help_trigger,
        matches!(hovered, Some(TooltipTarget::Help)),
    );
    search_bar.render(frame, screen.search, search);

    for slot in &screen.sections {
        let section = &sections[slot.index];
        section.disclosure.render(
            frame,
            slot.area,
            &section.disclosure_state,
            |f, _body| {
                if slot.text.height > 0 {
                    section.text.render(f, slot.text, &section.text_state);
                }
                for (j, rect) in &slot.images {
                    let (image, _) = &section.images[*j];
                    let protocol = if *images_enabled {
                        image_protocols.get_mut(image.src())
                    } else {
                        None
                    };
                    image.render(f, *rect, protocol);
                }
            },
        );
    }

    render_status(
        frame,
        screen.status,
        file_path,
        *modified,
        *loading,
        spinner,
    );

    if let Some(target) = hovered {
        let trigger = match target {
            TooltipTarget::Filters => screen.chips,
            TooltipTarget::Search => screen.search,
            TooltipTarget::Help => screen.help_trigger,
        };
        target.tooltip().render(frame, trigger);
    }

    match overlay {
        Overlay::TextFullscreen(i) => {
            let section = &sections[i];
            section.text.render_fullscreen(frame, &section.text_state);
        }
        Overlay::ImageFullscreen(i, j) => {
            let (image, state) = &sections[i].images[j];
            let protocol = if *images_enabled {
                image_protocols.get_mut(image.src())
            } else {
                None
            };
            image.render_fullscreen(frame, protocol, state);
        }
        Overlay::Tour => tour.render(frame, tour_state),
        Overlay::None => {}
    }
}

fn render_status(
    frame: &mut Frame,
    area: Rect,
    file_path: &std::path::Path,
    modified: Option<std::time::SystemTime>,
    loading: bool,
    spinner: &crate::widgets::LoadingDots,
) {
    let name = file_path
        .file_name()
        .map_or_else(|| file_path.display().to_string(), |n| {
            n.to_string_lossy().into_owned()
        });
    let mut spans = vec![Span::styled(name, style::heading_style(2))];
    if let Some(mtime) = modified {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("modified {}", timefmt::relative_time_string(mtime)),
            style::hint_style(),
        ));
    }
    if loading {
        spans.push(Span::raw("  loading"));
        spans.push(Span::styled(spinner.text().to_string(), style::hint_style()));
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        "q quit  / search  ? tour",
        style::hint_style(),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn render_to_text(model: &mut Model, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| view(model, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn model() -> Model {
        let doc = "# Alpha\n\nAlpha body text.\n\n# Beta\n\nBeta body text.\n";
        Model::new(PathBuf::from("doc.md"), doc, (80, 24))
    }

    #[test]
    fn test_view_shows_chrome_and_section_headers() {
        let mut model = model();
        let text = render_to_text(&mut model, 80, 24);
        assert!(text.contains("Text"));
        assert!(text.contains("Alpha"));
        assert!(text.contains("Beta"));
        assert!(text.contains("doc.md"));
        assert!(text.contains("(?)"));
    }

    #[test]
    fn test_loading_indicator_visible_in_status_bar() {
        let mut model = model();
        model = crate::app::update(model, crate::app::Message::Reload);
        assert!(model.loading);
        let text = render_to_text(&mut model, 80, 24);
        assert!(text.contains("loading"));
        assert!(text.contains(model.spinner.text()));
    }

    #[test]
    fn test_open_section_shows_body() {
        let mut model = model();
        model.sections[0].disclosure_state.set_open(true);
        let text = render_to_text(&mut model, 80, 24);
        assert!(text.contains("Alpha body text."));
        assert!(!text.contains("Beta body text."));
    }

    #[test]
    fn test_tour_overlay_draws_on_top() {
        let mut model = model();
        model.tour_state.open();
        let text = render_to_text(&mut model, 80, 24);
        assert!(text.contains("Step 1 of"));
        assert!(text.contains("Welcome"));
    }

    #[test]
    fn test_search_query_filters_rendered_sections() {
        let mut model = model();
        model.search.start();
        for c in "beta".chars() {
            model.search.insert(c);
        }
        model.store.with(|s| s.search_query = "beta".to_string());
        let text = render_to_text(&mut model, 80, 24);
        assert!(text.contains("Beta"));
        assert!(!text.contains("Alpha"));
    }

    #[test]
    fn test_fullscreen_text_overlay() {
        let mut model = model();
        model.sections[0].disclosure_state.set_open(true);
        model.sections[0].text_state.open_fullscreen();
        let text = render_to_text(&mut model, 80, 24);
        assert!(text.contains("[✕]"));
    }
}
