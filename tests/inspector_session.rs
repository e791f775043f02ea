//! End-to-end checks through the public API: a model driven by messages,
//! rendered to a test backend, with the shared store observed from outside.

use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use docent::app::{Message, Model, update};
use docent::state::{StateError, UiStateProvider};
use docent::ui;
use docent::widgets::{Content, TruncatableText};

const DOC: &str = "\
# Getting Started

Install the binary and point it at a markdown file.

```sh
docent README.md
```

# Reference

| key | action |
|-----|--------|
| q   | quit   |
";

fn buffer_text(model: &mut Model) -> String {
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::view(model, frame)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(ratatui::buffer::Cell::symbol)
        .collect()
}

#[test]
fn session_filter_search_and_tour() {
    let mut model = Model::new(PathBuf::from("guide.md"), DOC, (100, 30));
    let handle = model.ui_handle();

    // Filter down to sections containing tables.
    model = update(model, Message::ToggleFilter("table".to_string()));
    assert_eq!(handle.active_filters().unwrap(), vec!["table".to_string()]);
    let text = buffer_text(&mut model);
    assert!(text.contains("Reference"));
    assert!(!text.contains("Getting Started"));

    // Clear the filter through a second toggle, then search instead.
    model = update(model, Message::ToggleFilter("table".to_string()));
    model = update(model, Message::StartSearch);
    for c in "install".chars() {
        model = update(model, Message::SearchChar(c));
    }
    assert_eq!(handle.search_query().unwrap(), "install");
    let text = buffer_text(&mut model);
    assert!(text.contains("Getting Started"));
    assert!(!text.contains("Reference"));

    // The tour draws over everything and mirrors its flag into the store.
    model = update(model, Message::ClearSearch);
    model = update(model, Message::OpenTour);
    assert!(handle.is_tour_open().unwrap());
    let text = buffer_text(&mut model);
    assert!(text.contains("Step 1 of"));
}

#[test]
fn session_expand_and_fullscreen() {
    let mut model = Model::new(PathBuf::from("guide.md"), DOC, (100, 30));

    model = update(model, Message::ToggleSection(0));
    let text = buffer_text(&mut model);
    assert!(text.contains("Install the binary"));

    model = update(model, Message::OpenTextFullscreen(0));
    let text = buffer_text(&mut model);
    assert!(text.contains("[✕]"));

    model = update(model, Message::CloseOverlay);
    let text = buffer_text(&mut model);
    assert!(!text.contains("[✕]"));
}

#[test]
fn store_handle_fails_after_provider_drop() {
    let provider = UiStateProvider::new();
    let handle = provider.handle();
    handle.set_search_query("still alive").unwrap();
    drop(provider);

    assert!(matches!(
        handle.search_query(),
        Err(StateError::OutsideProvider)
    ));
    assert!(matches!(
        handle.set_tour_open(true),
        Err(StateError::OutsideProvider)
    ));
    // Failure is persistent, not one-shot.
    assert!(handle.active_filters().is_err());
}

#[test]
fn truncatable_json_contract_via_public_api() {
    let value = serde_json::json!({"steps": ["install", "run"], "count": 2});
    let widget = TruncatableText::new(Content::Json(value.clone()));
    assert_eq!(widget.serialized(), value.to_string());
    assert!(!widget.should_truncate());

    #[derive(serde::Serialize)]
    struct Summary {
        count: usize,
        steps: Vec<&'static str>,
    }
    let structured = TruncatableText::structured(&Summary {
        count: 2,
        steps: vec!["install", "run"],
    })
    .unwrap();
    assert_eq!(structured.serialized(), value.to_string());
}
