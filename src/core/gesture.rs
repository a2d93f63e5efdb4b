//! Gesture interpretation: turns raw drag / wheel / key input into discrete
//! [`NavCommand`]s.
//!
//! Each channel keeps its own state: the drag channel has a per-gesture
//! [`DragSession`], while wheel and keys each own a [`Cooldown`].  A user can
//! mix all three in one session without one channel swallowing another's
//! input.  Time is passed in by the caller so every decision is testable.

use std::time::{Duration, Instant};

use super::feed::{FeedState, NavCommand};
use super::transition::sanitize;

// ───────────────────────────────────────── tunables ──────────

/// Thresholds and cooldowns for every input channel.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Drag is clamped to `± max_drag_fraction × height`.
    pub max_drag_fraction: f64,
    /// Release beyond `± navigate_fraction × height` navigates.
    pub navigate_fraction: f64,
    /// Minimum `|deltaY|` for a wheel event to count.
    pub wheel_threshold: f64,
    pub wheel_cooldown: Duration,
    pub key_cooldown: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            max_drag_fraction: 0.4,
            navigate_fraction: 0.2,
            wheel_threshold: 50.0,
            wheel_cooldown: Duration::from_millis(500),
            key_cooldown: Duration::from_millis(300),
        }
    }
}

// ───────────────────────────────────────── cooldown ──────────

/// A restartable timer window.  Starting it again replaces the previous
/// deadline, so stale windows never stack.
#[derive(Debug, Clone)]
pub struct Cooldown {
    window: Duration,
    until: Option<Instant>,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            until: None,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    pub fn start(&mut self, now: Instant) {
        self.until = Some(now + self.window);
    }

    pub fn cancel(&mut self) {
        self.until = None;
    }
}

// ───────────────────────────────────────── drag ──────────────

/// Transient state for one pointer-down → pointer-up gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub start_y: f64,
    pub current_y: f64,
    /// Clamped displacement used for rendering and the release decision.
    pub offset: f64,
    /// Whether any move arrived since the pointer went down.
    pub moved: bool,
}

/// What a pointer release resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Navigate(NavCommand),
    /// Released inside the threshold (or at a boundary); slide back.
    SnapBack,
    /// Released without ever moving.
    Tap,
}

// ───────────────────────────────────────── interpreter ───────

#[derive(Debug)]
pub struct GestureInterpreter {
    config: GestureConfig,
    drag: Option<DragSession>,
    wheel: Cooldown,
    keys: Cooldown,
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            wheel: Cooldown::new(config.wheel_cooldown),
            keys: Cooldown::new(config.key_cooldown),
            drag: None,
            config,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Live drag displacement, `0.0` outside a gesture.
    pub fn drag_offset(&self) -> f64 {
        self.drag.map_or(0.0, |d| d.offset)
    }

    // ── touch / pointer drag ─────────────────────────────────────

    pub fn touch_start(&mut self, y: f64) {
        self.drag = Some(DragSession {
            start_y: y,
            current_y: y,
            offset: 0.0,
            moved: false,
        });
    }

    /// Update the drag, clamping so the slide never travels past
    /// `max_drag_fraction` of a screen.  Ignored outside a gesture.
    pub fn touch_move(&mut self, y: f64, container_height: f64) {
        let max_drag = sanitize(self.config.max_drag_fraction * sanitize(container_height));
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.current_y = y;
        drag.moved = true;
        let raw = drag.current_y - drag.start_y;
        drag.offset = if raw.is_finite() {
            raw.clamp(-max_drag, max_drag)
        } else {
            0.0
        };
    }

    /// End the gesture.  Returns `None` when no gesture was active.
    ///
    /// Thresholds are strict: an offset exactly at `± navigate_fraction × H`
    /// snaps back.  At most one navigation per gesture.
    pub fn touch_end(&mut self, container_height: f64, feed: &FeedState) -> Option<ReleaseOutcome> {
        let drag = self.drag.take()?;
        if !drag.moved {
            return Some(ReleaseOutcome::Tap);
        }

        let threshold = self.config.navigate_fraction * sanitize(container_height);
        let outcome = if drag.offset < -threshold && feed.can_go_next() {
            ReleaseOutcome::Navigate(NavCommand::Next)
        } else if drag.offset > threshold && feed.can_go_previous() {
            ReleaseOutcome::Navigate(NavCommand::Previous)
        } else {
            ReleaseOutcome::SnapBack
        };
        tracing::debug!(offset = drag.offset, threshold, ?outcome, "gesture: release");
        Some(outcome)
    }

    /// Abandon an in-progress drag without deciding anything.
    pub fn touch_cancel(&mut self) {
        self.drag = None;
    }

    // ── wheel ────────────────────────────────────────────────────

    /// Events inside the cooldown are dropped outright, without accumulating
    /// their delta.  A qualifying event starts a new cooldown even when the
    /// feed is already at the boundary.
    pub fn wheel(&mut self, delta_y: f64, now: Instant, feed: &FeedState) -> Option<NavCommand> {
        if self.wheel.is_active(now) {
            return None;
        }
        if delta_y.is_nan() || delta_y.abs() < self.config.wheel_threshold {
            return None;
        }
        self.wheel.start(now);

        if delta_y > 0.0 && feed.can_go_next() {
            Some(NavCommand::Next)
        } else if delta_y < 0.0 && feed.can_go_previous() {
            Some(NavCommand::Previous)
        } else {
            None
        }
    }

    // ── keyboard ─────────────────────────────────────────────────

    /// `intent` is the already-resolved next/previous key.  Same cooldown
    /// pattern as the wheel, with its own window.
    pub fn key(&mut self, intent: NavCommand, now: Instant, feed: &FeedState) -> Option<NavCommand> {
        if self.keys.is_active(now) {
            return None;
        }
        self.keys.start(now);

        match intent {
            NavCommand::Next if feed.can_go_next() => Some(NavCommand::Next),
            NavCommand::Previous if feed.can_go_previous() => Some(NavCommand::Previous),
            _ => None,
        }
    }

    /// Drop all pending timers and any live drag (teardown).
    pub fn reset(&mut self) {
        self.drag = None;
        self.wheel.cancel();
        self.keys.cancel();
    }
}
