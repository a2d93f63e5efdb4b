//! Input handling: maps key/mouse events and fetch results to state
//! mutations.
//!
//! All three input channels funnel into [`navigate`], so `current_index` has
//! exactly one writer and commands apply in delivery order.

use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::{feed::NavCommand, gesture::ReleaseOutcome};
use crate::ui::layout::point_in_rect;

use super::feed_runtime::FeedUpdate;
use super::state::{AppState, StatusMessage};

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.teardown();
        return;
    }

    let action = state.config.match_key(key);

    if state.show_help {
        match action {
            Some(Action::Quit) => state.teardown(),
            _ => state.show_help = false,
        }
        return;
    }

    let Some(action) = action else {
        return;
    };

    match action {
        Action::Next => key_navigate(state, NavCommand::Next, now),
        Action::Previous => key_navigate(state, NavCommand::Previous, now),
        Action::TogglePlay => toggle_play(state),
        Action::Help => state.show_help = true,
        Action::Quit => state.teardown(),
    }
}

fn key_navigate(state: &mut AppState, intent: NavCommand, now: Instant) {
    if let Some(command) = state.gestures.key(intent, now, &state.feed) {
        navigate(state, command);
    }
}

/// Process a mouse event: left-button drag is the swipe channel, the wheel
/// is the scroll channel.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if state.show_help {
        if matches!(mouse.kind, MouseEventKind::Down(_)) {
            state.show_help = false;
        }
        return;
    }

    let height = state.container_height();
    let notch = state.config.wheel_notch_delta;
    let y = mouse.row as f64;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(state.feed_area, mouse.column, mouse.row) {
                state.gestures.touch_start(y);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            state.gestures.touch_move(y, height);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            release_drag(state);
        }
        MouseEventKind::ScrollDown => {
            wheel(state, notch, now);
        }
        MouseEventKind::ScrollUp => {
            wheel(state, -notch, now);
        }
        _ => {}
    }
}

fn release_drag(state: &mut AppState) {
    let released_at = state.gestures.drag_offset();
    let height = state.container_height();
    let Some(outcome) = state.gestures.touch_end(height, &state.feed) else {
        return;
    };
    match outcome {
        ReleaseOutcome::Navigate(command) => {
            state.smooth.nudge(released_at);
            navigate(state, command);
        }
        ReleaseOutcome::SnapBack => state.smooth.nudge(released_at),
        ReleaseOutcome::Tap => toggle_play(state),
    }
}

fn wheel(state: &mut AppState, delta_y: f64, now: Instant) {
    if let Some(command) = state.gestures.wheel(delta_y, now, &state.feed) {
        navigate(state, command);
    }
}

/// The single consumer of navigation commands.
pub fn navigate(state: &mut AppState, command: NavCommand) {
    if let Some(request) = state.feed.apply(command) {
        state.pending_load = Some(request);
    }
    let (current, height) = (state.feed.current_index(), state.container_height());
    state.smooth.set_target(current, height);
    if matches!(state.status_message, Some(StatusMessage::Info(_))) {
        state.status_message = None;
    }
}

fn toggle_play(state: &mut AppState) {
    if let Some(playing) = state.feed.toggle_current() {
        tracing::debug!(index = state.feed.current_index(), playing, "playback: toggle");
    }
}

/// Merge a fetch result.  Results from an older session are dropped.
pub fn apply_feed_update(state: &mut AppState, update: FeedUpdate) {
    if update.generation() != state.generation {
        tracing::debug!(
            stale = update.generation(),
            live = state.generation,
            "fetch: ignoring stale result"
        );
        return;
    }

    match update {
        FeedUpdate::Loaded { offset, items, .. } => {
            let added = state.feed.append_items(items);
            tracing::debug!(offset, added, "fetch: merged");
            state.status_message = if added == 0 {
                Some(StatusMessage::Info("No new videos".into()))
            } else {
                None
            };
        }
        FeedUpdate::Failed { error, .. } => {
            tracing::warn!("fetch failed: {error}");
            state.feed.load_failed();
            state.status_message = Some(StatusMessage::Error(format!(
                "Couldn't load more videos: {error}"
            )));
        }
    }
}

/// Per-frame housekeeping: slide easing, playback clock, spinner.
pub fn on_tick(state: &mut AppState, dt: Duration) {
    state.smooth.tick();
    let current = state.feed.current_index();
    state.feed.playback.advance(current, dt);
    state.tick = state.tick.wrapping_add(1);
}
