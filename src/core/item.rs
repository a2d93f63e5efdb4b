//! The unit of the feed: one short video and its display metadata.

/// A single entry in the feed.
///
/// Items are immutable once created.  The counters are display-only; nothing
/// in the feed mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoItem {
    /// Unique identifier, used for de-duplication when pages are merged.
    pub id: String,
    pub video_url: String,
    /// Placeholder colour shown behind the card (a CSS-style name or `#rrggbb`).
    pub color: String,
    pub username: String,
    pub description: String,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

/// Compact counter formatting for the card overlay (`1204` → `"1.2K"`).
pub fn format_count(n: u64) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=999_999 => format!("{:.1}K", n as f64 / 1_000.0),
        _ => format!("{:.1}M", n as f64 / 1_000_000.0),
    }
}
