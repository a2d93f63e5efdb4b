//! "Loading more videos..." placeholder: a full-pane slide with a spinner,
//! positioned like a card one screen below the current item.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const LABEL: &str = "Loading more videos...";

pub struct LoadingPlaceholder {
    /// Whether a fetch is in flight.
    pub visible: bool,
    /// Row offset of the slide's top relative to the pane's top.
    pub offset: i32,
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
}

impl Widget for LoadingPlaceholder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.height == 0 || area.width < 4 {
            return;
        }

        let top = area.y as i32 + self.offset;
        let bottom = top + area.height as i32;
        let pane_top = area.y as i32;
        let pane_bottom = pane_top + area.height as i32;

        // Black backdrop for the visible slice of the slide.
        let visible_top = top.max(pane_top);
        let visible_bottom = bottom.min(pane_bottom);
        if visible_top >= visible_bottom {
            return;
        }
        buf.set_style(
            Rect::new(
                area.x,
                visible_top as u16,
                area.width,
                (visible_bottom - visible_top) as u16,
            ),
            Theme::loading_style(),
        );

        let middle = top + area.height as i32 / 2;
        let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
        let rows = [(middle - 1, frame.to_string()), (middle + 1, LABEL.to_string())];
        for (row, text) in rows {
            if row < pane_top || row >= pane_bottom {
                continue;
            }
            let width = text.chars().count() as u16;
            let x = area.x + area.width.saturating_sub(width) / 2;
            let line = Line::from(Span::styled(text, Theme::loading_style()));
            buf.set_line(x, row as u16, &line, area.width.min(width));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn offscreen_placeholder_draws_nothing() {
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        LoadingPlaceholder { visible: true, offset: 10, tick: 0 }.render(area, &mut buf);
        assert!((0..10).all(|y| row_text(&buf, y).trim().is_empty()));
    }

    #[test]
    fn onscreen_placeholder_shows_label() {
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        LoadingPlaceholder { visible: true, offset: 0, tick: 0 }.render(area, &mut buf);
        assert!(row_text(&buf, 6).contains("Loading more videos..."));
    }
}
