//! Custom Ratatui widget that renders the feed as full-pane cards stacked
//! vertically, each translated by its slide offset and clipped to the pane.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::{
    item::{format_count, VideoItem},
    playback::PlaybackTable,
    transition,
};

use super::theme::Theme;

/// Neighbours either side of the current item that can still be on screen
/// while a slide animation settles.
const RENDER_WINDOW: usize = 3;

/// The feed widget, created fresh each frame.
pub struct FeedWidget<'a> {
    items: &'a [VideoItem],
    current_index: usize,
    playback: &'a PlaybackTable,
    drag_offset: f64,
    is_dragging: bool,
    /// Extra displacement from the slide animation.
    settle_offset: f64,
}

impl<'a> FeedWidget<'a> {
    pub fn new(items: &'a [VideoItem], current_index: usize, playback: &'a PlaybackTable) -> Self {
        Self {
            items,
            current_index,
            playback,
            drag_offset: 0.0,
            is_dragging: false,
            settle_offset: 0.0,
        }
    }

    pub fn drag(mut self, is_dragging: bool, offset: f64) -> Self {
        self.is_dragging = is_dragging;
        self.drag_offset = offset;
        self
    }

    pub fn settle_offset(mut self, offset: f64) -> Self {
        self.settle_offset = offset;
        self
    }

    /// On-screen row offset of item `index` relative to the pane top.
    pub fn row_offset(&self, index: usize, container_height: f64) -> i32 {
        let offset = transition::item_offset(
            index,
            self.current_index,
            self.drag_offset,
            container_height,
            self.is_dragging,
        );
        (offset + self.settle_offset).round() as i32
    }

    fn card_lines(&self, index: usize, item: &VideoItem, height: u16, width: u16) -> Vec<Line<'static>> {
        let active = index == self.current_index;
        let mut lines: Vec<Line<'static>> = vec![Line::raw(""); height as usize];
        if height == 0 {
            return lines;
        }

        let position = format!(" {} / {} ", index + 1, self.items.len());
        let pad = (width as usize).saturating_sub(position.chars().count() + 1);
        lines[0] = Line::from(vec![
            Span::raw(" ".repeat(pad)),
            Span::styled(position, Theme::position_style(active)),
        ]);

        let handle = self.playback.get(index);
        if height >= 3 {
            let glyph = if handle.playing { "▶" } else { "❚❚" };
            let pad = (width as usize).saturating_sub(glyph.chars().count()) / 2;
            lines[height as usize / 2] = Line::from(vec![
                Span::raw(" ".repeat(pad)),
                Span::styled(glyph.to_string(), Theme::username_style()),
            ]);
        }
        if height >= 6 {
            // Media source name above the glyph; terminals cannot show the clip.
            let source = item.video_url.rsplit('/').next().unwrap_or_default();
            let source = truncate(source, (width as usize).saturating_sub(4));
            let pad = (width as usize).saturating_sub(source.chars().count()) / 2;
            lines[height as usize / 2 - 1] = Line::from(vec![
                Span::raw(" ".repeat(pad)),
                Span::styled(source, Theme::counter_style()),
            ]);
        }

        // Overlay pinned to the bottom of the card.
        let text_width = (width as usize).saturating_sub(4);
        let progress_width = (width as usize).saturating_sub(2);
        let filled = (self.playback.progress(index) * progress_width as f64).round() as usize;
        let overlay = [
            Line::from(Span::styled(
                format!("  @{}", item.username),
                Theme::username_style(),
            )),
            Line::from(Span::styled(
                format!("  {}", truncate(&item.description, text_width)),
                Theme::description_style(),
            )),
            Line::from(vec![
                Span::styled("  ♥ ", Theme::like_style()),
                Span::styled(format_count(item.likes), Theme::counter_style()),
                Span::styled("   ✉ ", Theme::counter_style()),
                Span::styled(format_count(item.comments), Theme::counter_style()),
                Span::styled("   ↗ ", Theme::counter_style()),
                Span::styled(format_count(item.shares), Theme::counter_style()),
            ]),
            Line::from(vec![
                Span::raw(" "),
                Span::styled("━".repeat(filled.min(progress_width)), Theme::progress_style()),
                Span::styled(
                    "─".repeat(progress_width.saturating_sub(filled)),
                    Theme::counter_style(),
                ),
            ]),
        ];
        // Leave the position label alone on very short panes.
        let first = (height as usize).saturating_sub(overlay.len() + 1).max(1);
        for (row, line) in (first..height as usize).zip(overlay) {
            lines[row] = line;
        }
        lines
    }
}

impl Widget for FeedWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 || self.items.is_empty() {
            return;
        }
        let height = area.height as f64;
        let pane_top = area.y as i32;
        let pane_bottom = pane_top + area.height as i32;

        let first = self.current_index.saturating_sub(RENDER_WINDOW);
        let last = (self.current_index + RENDER_WINDOW).min(self.items.len() - 1);

        for index in first..=last {
            let item = &self.items[index];
            let top = pane_top + self.row_offset(index, height);
            if top >= pane_bottom || top + area.height as i32 <= pane_top {
                continue;
            }

            let background = Style::default().bg(Theme::card_color(&item.color));
            let lines = self.card_lines(index, item, area.height, area.width);
            for (row, line) in lines.iter().enumerate() {
                let y = top + row as i32;
                if y < pane_top || y >= pane_bottom {
                    continue;
                }
                let y = y as u16;
                buf.set_style(Rect::new(area.x, y, area.width, 1), background);
                buf.set_line(area.x, y, line, area.width);
            }
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<VideoItem> {
        (1..=n)
            .map(|i| VideoItem {
                id: i.to_string(),
                video_url: format!("https://example.com/video{i}.mp4"),
                color: "blue".into(),
                username: format!("user{i}"),
                description: format!("video number {i}"),
                likes: 1204,
                comments: 85,
                shares: 42,
            })
            .collect()
    }

    fn screen(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn resting_feed_shows_only_current_card() {
        let items = items(3);
        let playback = PlaybackTable::default();
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        FeedWidget::new(&items, 1, &playback).render(area, &mut buf);

        let text = screen(&buf).join("\n");
        assert!(text.contains("@user2"));
        assert!(text.contains("2 / 3"));
        assert!(!text.contains("@user1"));
        assert!(!text.contains("@user3"));
        assert!(text.contains("1.2K"));
        assert!(text.contains("video2.mp4"));
    }

    #[test]
    fn dragging_up_reveals_next_card() {
        let items = items(3);
        let playback = PlaybackTable::default();
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        FeedWidget::new(&items, 0, &playback)
            .drag(true, -4.0)
            .render(area, &mut buf);

        let rows = screen(&buf);
        // The next card's position label sits on its first row.
        assert!(rows[8].contains("2 / 3"));
        assert!(rows.join("\n").contains("@user1"));
    }

    #[test]
    fn row_offsets_include_settle_animation() {
        let items = items(3);
        let playback = PlaybackTable::default();
        let widget = FeedWidget::new(&items, 1, &playback).settle_offset(5.0);
        assert_eq!(widget.row_offset(1, 20.0), 5);
        assert_eq!(widget.row_offset(2, 20.0), 25);
        assert_eq!(widget.row_offset(0, 20.0), -15);
    }

    #[test]
    fn long_descriptions_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
