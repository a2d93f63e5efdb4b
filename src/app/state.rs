//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! The event loop is the only writer, which keeps `current_index` and the
//! item list single-writer without any locking.

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    feed::FeedState, gesture::GestureInterpreter, item::VideoItem, pagination::LoadRequest,
    pagination::PaginationTrigger,
};
use crate::ui::smooth_scroll::SmoothScroll;

/// Damping for the slide easing, tuned for the frame rate in `main`.
const SLIDE_SPEED: f64 = 0.35;

/// A transient message in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Top-level application state.
pub struct AppState {
    pub feed: FeedState,
    pub gestures: GestureInterpreter,
    /// Slide easing applied on top of the resting offsets.
    pub smooth: SmoothScroll,
    pub config: AppConfig,
    /// Feed pane from the last layout pass.  Zero-sized until measured.
    pub feed_area: Rect,
    /// A page request waiting to be handed to the fetch runtime.
    pub pending_load: Option<LoadRequest>,
    /// Session id stamped on fetches; bumped on teardown so late results
    /// are ignored.
    pub generation: u64,
    pub status_message: Option<StatusMessage>,
    pub show_help: bool,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Monotonic frame counter (drives the spinner).
    pub tick: u64,
}

impl AppState {
    pub fn new(items: Vec<VideoItem>, config: AppConfig) -> Self {
        let feed = FeedState::new(items, PaginationTrigger::new(config.load_threshold));
        Self {
            feed,
            gestures: GestureInterpreter::new(config.gesture.clone()),
            smooth: SmoothScroll::new(SLIDE_SPEED),
            config,
            feed_area: Rect::default(),
            pending_load: None,
            generation: 1,
            status_message: None,
            show_help: false,
            should_quit: false,
            tick: 0,
        }
    }

    /// Play the first item and run the initial proximity check.
    pub fn start(&mut self) {
        if let Some(request) = self.feed.start() {
            self.pending_load = Some(request);
        }
    }

    /// Container height in rows; `0.0` before the first layout.
    pub fn container_height(&self) -> f64 {
        self.feed_area.height as f64
    }

    /// Stop accepting work: cancel timers and drags, and invalidate any
    /// fetch still in flight.
    pub fn teardown(&mut self) {
        self.gestures.reset();
        self.pending_load = None;
        self.generation = self.generation.wrapping_add(1);
        self.should_quit = true;
    }
}
