//! Help overlay listing key bindings and pointer gestures.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::config::{Action, AppConfig};

/// Gesture rows shown under the key bindings.
const GESTURES: &[(&str, &str)] = &[
    ("Drag up / down", "swipe"),
    ("Scroll wheel", "one step per notch"),
    ("Click", "play / pause"),
];

pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // actions + gestures + 2 blanks + heading + hint + 2 border
        let height = (Action::ALL.len() + GESTURES.len()) as u16 + 7;
        let popup = centered_fixed(48, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Controls ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let label_style = Style::default().fg(Color::White);
        let key_style = Style::default().fg(Color::Yellow);
        let dim = Style::default().fg(Color::DarkGray);
        let inner_width = inner.width as usize;

        // Fixed-width columns: label left-aligned, keys right-aligned.
        let row = |label: &str, keys: String| {
            let label_col = format!("   {label:<20}");
            let keys_width = inner_width.saturating_sub(label_col.chars().count() + 1).max(1);
            Line::from(vec![
                Span::styled(label_col, label_style),
                Span::styled(format!("{keys:>keys_width$}"), key_style),
            ])
        };

        let mut lines = vec![Line::raw("")];
        for &action in Action::ALL {
            lines.push(row(action.label(), self.config.display_bindings(action)));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("   Mouse", dim)));
        for &(gesture, effect) in GESTURES {
            lines.push(row(gesture, effect.to_string()));
        }
        lines.push(Line::from(Span::styled("  any key: close", dim)));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_clamped_to_small_terminals() {
        let area = Rect::new(0, 0, 20, 6);
        assert_eq!(centered_fixed(48, 15, area), Rect::new(0, 0, 20, 6));
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_fixed(48, 16, area), Rect::new(26, 12, 48, 16));
    }

    #[test]
    fn lists_every_action() {
        let config = AppConfig::default();
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        HelpPopup { config: &config }.render(area, &mut buf);
        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        for &action in Action::ALL {
            assert!(text.contains(action.label()), "missing {}", action.label());
        }
    }
}
