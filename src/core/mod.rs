//! Core feed logic – navigation, gestures, slide offsets, and pagination.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type is `Send + Sync` so it can be shared across async tasks.

pub mod error;
pub mod feed;
pub mod gesture;
pub mod item;
pub mod mock;
pub mod pagination;
pub mod playback;
pub mod transition;
