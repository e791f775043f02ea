//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
pub(crate) mod model;
mod update;

pub use model::{Model, Overlay, Section, TooltipTarget};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: PathBuf,
    images_enabled: bool,
    start_expanded: bool,
    open_tour: bool,
    initial_filters: Vec<String>,
}

impl App {
    /// Create a new application for the given file.
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            images_enabled: true,
            start_expanded: false,
            open_tour: false,
            initial_filters: Vec::new(),
        }
    }

    /// Enable or disable inline image rendering.
    pub fn with_images_enabled(mut self, enabled: bool) -> Self {
        self.images_enabled = enabled;
        self
    }

    /// Start with every section expanded.
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.start_expanded = expanded;
        self
    }

    /// Open the guided tour on startup.
    pub fn with_tour(mut self, open: bool) -> Self {
        self.open_tour = open;
        self
    }

    /// Pre-select content-kind filters.
    pub fn with_filters(mut self, filters: Vec<String>) -> Self {
        self.initial_filters = filters;
        self
    }
}
