//! Theming and color definitions.
//!
//! Semantic ANSI colors so the widgets respect the terminal's palette.

use ratatui::style::{Color, Modifier, Style};

use crate::markdown::InlineStyle;

/// Accent color used for active controls and the current tour marker.
pub const ACCENT: Color = Color::Cyan;

/// Style for a markdown heading at the given level.
pub fn heading_style(level: u8) -> Style {
    match level {
        1 => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        2 => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        3 => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        4 => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        5 => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    }
}

/// Style for code block lines.
pub fn code_block_style() -> Style {
    Style::default()
        .fg(Color::Indexed(245))
        .add_modifier(Modifier::DIM)
}

/// Style for block quote lines.
pub fn quote_style() -> Style {
    Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::ITALIC)
}

/// Style for image placeholder lines.
pub fn image_placeholder_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::ITALIC)
}

/// Style for dim hint text (overlay footers, control hints).
pub fn hint_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}

/// Base style for overlay popups (tour, fullscreen viewers, tooltips).
pub fn overlay_style() -> Style {
    Style::default().bg(Color::Black).fg(Color::White)
}

/// Style for a filter chip, selected or not.
pub fn chip_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .bg(ACCENT)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

/// Merge inline markdown styling into a base style.
pub fn inline_style(base: Style, inline: InlineStyle) -> Style {
    let mut style = base;
    if inline.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if inline.link {
        style = style
            .fg(Color::LightBlue)
            .add_modifier(Modifier::UNDERLINED);
    }
    if inline.code {
        style = style.fg(Color::Red).add_modifier(Modifier::BOLD);
    }
    style
}
