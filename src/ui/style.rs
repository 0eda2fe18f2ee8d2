//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use crate::markup::Segment;

/// Style for the contents of `segment`, layered on top of `base`.
///
/// Nested segments accumulate: italic inside bold renders both.
pub fn style_for_segment(base: Style, segment: &Segment) -> Style {
    match segment {
        Segment::Text { .. } => base,
        Segment::Bold { .. } => base.add_modifier(Modifier::BOLD),
        Segment::Italic { .. } => base.add_modifier(Modifier::ITALIC),
        Segment::Link { .. } => base
            .fg(Color::LightBlue)
            .add_modifier(Modifier::UNDERLINED),
    }
}

pub fn abbreviation_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().bg(Color::Indexed(237))
}

/// Secondary text: payload dumps, hints, separators.
pub fn dim_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}

pub fn heading_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}
