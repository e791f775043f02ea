//! Frame composition: layout, rendering, and styling.

pub mod layout;
pub mod render;
pub mod style;

pub use layout::{ScreenLayout, compute as compute_layout};
pub use render::view;
