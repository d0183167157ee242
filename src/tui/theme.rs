// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

//! Fixed tier palette for the terminal surface.

use ratatui::style::{Color, Modifier, Style};

use crate::model::{Rgb, Tier};

pub(crate) const MINIMAP_BG: Rgb = Rgb {
    r: 0xe0,
    g: 0xe0,
    b: 0xe0,
};

pub(crate) fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

pub(crate) fn tier_color(tier: Tier) -> Color {
    color(tier.color())
}

/// Highlight fill for one cell. The terminal cannot blend alpha, so base emphasis renders dim
/// and active emphasis renders bold.
pub(crate) fn highlight_style(tier: Tier, active: bool) -> Style {
    let style = Style::default().bg(tier_color(tier)).fg(Color::Black);
    if active {
        style.add_modifier(Modifier::BOLD)
    } else {
        style.add_modifier(Modifier::DIM)
    }
}

pub(crate) fn tooltip_border_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub(crate) fn footer_hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
