//! Application orchestration: state management, event loop plumbing, input
//! handling, and background page fetches.

pub mod event;
pub mod feed_runtime;
pub mod handler;
pub mod state;
