//! Feed state: the ordered item list, the cursor, and navigation.
//!
//! The list only ever grows at the end.  The cursor moves by one step at a
//! time and every move is bounds-checked, so out-of-range navigation is a
//! silent no-op rather than an error.

use std::collections::HashSet;

use super::item::VideoItem;
use super::pagination::{LoadRequest, PaginationTrigger};
use super::playback::PlaybackTable;

/// A discrete navigation step produced by any input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Previous,
}

/// The feed and its cursor.
///
/// Invariant: `current_index < items.len()` whenever the feed is non-empty,
/// and `current_index == 0` when it is empty.
#[derive(Debug)]
pub struct FeedState {
    items: Vec<VideoItem>,
    current_index: usize,
    pub playback: PlaybackTable,
    pub pagination: PaginationTrigger,
}

impl FeedState {
    pub fn new(items: Vec<VideoItem>, pagination: PaginationTrigger) -> Self {
        Self {
            items,
            current_index: 0,
            playback: PlaybackTable::default(),
            pagination,
        }
    }

    pub fn items(&self) -> &[VideoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn can_go_next(&self) -> bool {
        self.current_index + 1 < self.items.len()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }

    /// Start playback of the first item and run the initial proximity check.
    pub fn start(&mut self) -> Option<LoadRequest> {
        if !self.items.is_empty() {
            self.playback.play(self.current_index);
        }
        self.check_load_more()
    }

    /// Advance one item.  A no-op on the last item.  Returns a load request
    /// when the new position is close enough to the end.
    pub fn go_next(&mut self) -> Option<LoadRequest> {
        if !self.can_go_next() {
            return None;
        }
        self.playback.pause(self.current_index);
        self.current_index += 1;
        self.playback.play(self.current_index);
        tracing::debug!(index = self.current_index, len = self.len(), "feed: next");
        self.check_load_more()
    }

    /// Step back one item.  A no-op on the first item.  Returns `true` if the
    /// cursor moved.
    pub fn go_previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.playback.pause(self.current_index);
        self.current_index -= 1;
        self.playback.play(self.current_index);
        tracing::debug!(index = self.current_index, len = self.len(), "feed: previous");
        true
    }

    /// Dispatch a command from any input channel.
    pub fn apply(&mut self, command: NavCommand) -> Option<LoadRequest> {
        match command {
            NavCommand::Next => self.go_next(),
            NavCommand::Previous => {
                self.go_previous();
                None
            }
        }
    }

    pub fn check_load_more(&mut self) -> Option<LoadRequest> {
        self.pagination.check(self.current_index, self.items.len())
    }

    /// Merge a page into the feed, skipping ids already present.  Incoming
    /// order is preserved.  Always clears the in-flight guard.  Returns the
    /// number of items actually appended.
    pub fn append_items(&mut self, new_items: Vec<VideoItem>) -> usize {
        self.pagination.settle();

        let mut seen: HashSet<String> = self.items.iter().map(|v| v.id.clone()).collect();
        let before = self.items.len();
        for item in new_items {
            // `insert` also drops repeats inside the incoming batch.
            if seen.insert(item.id.clone()) {
                self.items.push(item);
            }
        }
        let added = self.items.len() - before;
        tracing::info!(added, total = self.items.len(), "feed: merged page");
        added
    }

    /// A fetch failed: clear the guard and leave the list untouched.
    pub fn load_failed(&mut self) {
        self.pagination.settle();
    }

    /// Flip play/pause on the current item.
    pub fn toggle_current(&mut self) -> Option<bool> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.playback.toggle(self.current_index))
    }
}
