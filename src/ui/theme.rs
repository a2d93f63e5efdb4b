//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme. Change colours here.
pub struct Theme;

impl Theme {
    // ── cards ──────────────────────────────────────────────────
    pub fn username_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn description_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn counter_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn like_style() -> Style {
        Style::default().fg(Color::Rgb(255, 0, 80))
    }

    pub fn position_style(active: bool) -> Style {
        if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn progress_style() -> Style {
        Style::default().fg(Color::Rgb(255, 0, 80))
    }

    pub fn loading_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn error_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::LightRed)
    }

    /// Map a card's placeholder colour (`"skyblue"`, `"#ff8800"`) to a
    /// terminal colour.  Unknown names fall back to dark grey.
    pub fn card_color(name: &str) -> Color {
        if let Some(hex) = name.strip_prefix('#') {
            if let Some(color) = parse_hex(hex) {
                return color;
            }
        }
        match name.to_ascii_lowercase().as_str() {
            "green" => Color::Rgb(0, 128, 0),
            "blue" => Color::Rgb(0, 0, 255),
            "skyblue" => Color::Rgb(135, 206, 235),
            "orange" => Color::Rgb(255, 165, 0),
            "purple" => Color::Rgb(128, 0, 128),
            "crimson" => Color::Rgb(220, 20, 60),
            "teal" => Color::Rgb(0, 128, 128),
            "black" => Color::Black,
            "white" => Color::White,
            "red" => Color::Red,
            _ => Color::DarkGray,
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}
