// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. tour::TourStep)
    clippy::module_name_repetitions
)]

//! # Docent
//!
//! Presentational widgets for ratatui terminals, plus a demo
//! "document inspector" that hosts all of them.
//!
//! The widget set:
//! - [`widgets::TruncatableText`]: collapsible content viewer with fullscreen
//! - [`widgets::ClickableImage`]: thumbnail that opens a fullscreen overlay
//! - [`widgets::HelpTooltip`]: placement-aware hint overlay
//! - [`widgets::ProgressiveDisclosure`]: collapsible section
//! - [`widgets::ContentFilter`]: multi-select toggle chips
//! - [`widgets::GuidedTour`]: sequential step overlay
//! - [`widgets::SearchBar`]: live search input
//! - [`widgets::LoadingDots`]: tick-driven activity indicator
//!
//! Cross-cutting state (active filters, search query, tour open flag,
//! expanded sections) lives in a shared store ([`state::UiStateProvider`])
//! handed to consumers as a [`state::UiStateHandle`].
//!
//! ## Architecture
//!
//! The demo application uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`widgets`]: The widget toolkit
//! - [`state`]: Shared UI-state store
//! - [`markdown`]: Markdown to styled terminal lines
//! - [`timefmt`]: Relative-time formatting
//! - [`app`]: Demo application loop and state
//! - [`ui`]: Frame composition and styling
//! - [`config`]: Flag-file configuration

pub mod app;
pub mod config;
pub mod markdown;
pub mod state;
pub mod timefmt;
pub mod ui;
pub mod widgets;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::state::{UiStateHandle, UiStateProvider};
    pub use crate::widgets::{
        ContentFilter, GuidedTour, HelpTooltip, ProgressiveDisclosure, SearchBar, TruncatableText,
    };
}
