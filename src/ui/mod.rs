//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* feed state and turns it into cells on the
//! terminal.  No data fetching happens here.

pub mod feed_widget;
pub mod layout;
pub mod popup;
pub mod smooth_scroll;
pub mod spinner;
pub mod theme;
