//! Terminal event abstraction.
//!
//! A background task polls crossterm and forwards events over a channel so
//! the main loop can `select!` over input, fetch results, and frame ticks.
//! Events are forwarded strictly in delivery order.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Spawns the reader task.  `poll_interval` bounds how long the task takes
/// to notice that the receiver is gone.
pub fn spawn_event_reader(poll_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    // crossterm's poll/read block, so keep them off the async workers.
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            let has_event = match event::poll(poll_interval) {
                Ok(ready) => ready,
                Err(err) => {
                    tracing::warn!("terminal poll failed: {err}");
                    std::thread::sleep(poll_interval);
                    continue;
                }
            };
            if !has_event {
                continue;
            }
            let app_event = match event::read() {
                Ok(CtEvent::Key(k)) => AppEvent::Key(k),
                Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!("terminal read failed: {err}");
                    continue;
                }
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}
