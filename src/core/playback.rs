//! Per-item playback handles, keyed by feed index.
//!
//! Items are addressed by their position in the feed rather than by looking
//! players up through their id strings.  A handle only exists once an item
//! has been played at least once.

use std::collections::HashMap;
use std::time::Duration;

/// Looping length used for every item; the feed carries no real media.
pub const CLIP_LENGTH: Duration = Duration::from_secs(15);

/// Playback state of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerHandle {
    pub playing: bool,
    /// Position within the clip.
    pub position: Duration,
}

#[derive(Debug, Default)]
pub struct PlaybackTable {
    handles: HashMap<usize, PlayerHandle>,
}

impl PlaybackTable {
    /// Restart `index` from the beginning and mark it playing.
    pub fn play(&mut self, index: usize) {
        let handle = self.handles.entry(index).or_default();
        handle.position = Duration::ZERO;
        handle.playing = true;
    }

    pub fn pause(&mut self, index: usize) {
        if let Some(handle) = self.handles.get_mut(&index) {
            handle.playing = false;
        }
    }

    /// Flip play/pause without rewinding.  Returns the new playing state.
    pub fn toggle(&mut self, index: usize) -> bool {
        let handle = self.handles.entry(index).or_default();
        handle.playing = !handle.playing;
        handle.playing
    }

    /// Move a playing handle forward by `dt`, looping at [`CLIP_LENGTH`].
    pub fn advance(&mut self, index: usize, dt: Duration) {
        if let Some(handle) = self.handles.get_mut(&index) {
            if handle.playing {
                let nanos = (handle.position + dt).as_nanos() % CLIP_LENGTH.as_nanos();
                handle.position = Duration::from_nanos(nanos as u64);
            }
        }
    }

    pub fn get(&self, index: usize) -> PlayerHandle {
        self.handles.get(&index).copied().unwrap_or_default()
    }

    pub fn is_playing(&self, index: usize) -> bool {
        self.get(index).playing
    }

    /// Fraction of the clip elapsed, in `[0, 1)`.
    pub fn progress(&self, index: usize) -> f64 {
        self.get(index).position.as_secs_f64() / CLIP_LENGTH.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_rewinds_to_start() {
        let mut table = PlaybackTable::default();
        table.play(0);
        table.advance(0, Duration::from_secs(4));
        assert_eq!(table.get(0).position, Duration::from_secs(4));

        table.pause(0);
        table.play(0);
        assert!(table.is_playing(0));
        assert_eq!(table.get(0).position, Duration::ZERO);
    }

    #[test]
    fn paused_handles_do_not_advance() {
        let mut table = PlaybackTable::default();
        table.play(2);
        table.pause(2);
        table.advance(2, Duration::from_secs(3));
        assert_eq!(table.get(2).position, Duration::ZERO);
    }

    #[test]
    fn position_loops_at_clip_length() {
        let mut table = PlaybackTable::default();
        table.play(1);
        table.advance(1, CLIP_LENGTH + Duration::from_secs(2));
        assert_eq!(table.get(1).position, Duration::from_secs(2));
    }

    #[test]
    fn toggle_keeps_position() {
        let mut table = PlaybackTable::default();
        table.play(0);
        table.advance(0, Duration::from_secs(1));
        assert!(!table.toggle(0));
        assert!(table.toggle(0));
        assert_eq!(table.get(0).position, Duration::from_secs(1));
    }

    #[test]
    fn unknown_index_is_paused() {
        let table = PlaybackTable::default();
        assert!(!table.is_playing(7));
        assert_eq!(table.progress(7), 0.0);
    }
}
