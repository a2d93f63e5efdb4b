//! A vertical swipe feed for the terminal.
//!
//! Drag with the mouse, scroll the wheel, or use the arrow keys to move one
//! video at a time.  New pages are fetched in the background as the cursor
//! approaches the end of the list.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Stderr};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::time::MissedTickBehavior;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    feed_runtime::{spawn_fetch, FeedUpdate},
    handler,
    state::{AppState, StatusMessage},
};
use crate::config::AppConfig;
use crate::core::{
    mock::{seed_items, FeedProvider, MockProvider},
    transition,
};
use crate::ui::{
    feed_widget::FeedWidget, layout::AppLayout, popup::HelpPopup, spinner::LoadingPlaceholder,
    theme::Theme,
};

/// 20 fps; the slide easing is tuned for this.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), version, about = "Swipe feed: short videos, one screen at a time")]
struct Cli {
    /// Items requested per page (overrides the config file).
    #[arg(long)]
    page_size: Option<usize>,

    /// Simulated network latency in milliseconds.
    #[arg(long)]
    fetch_delay_ms: Option<u64>,

    /// Prefetch when this many items from the end.
    #[arg(long)]
    load_threshold: Option<usize>,

    /// Probability (0–1) that a simulated fetch fails.
    #[arg(long, default_value_t = 0.0)]
    fail_rate: f64,

    /// Seed for generated pages (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    dump_config: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(n) = self.page_size {
            config.page_size = crate::config::clamp_page_size(n);
        }
        if let Some(ms) = self.fetch_delay_ms {
            config.fetch_delay = crate::config::clamp_fetch_delay(ms);
        }
        if let Some(n) = self.load_threshold {
            config.load_threshold = crate::config::clamp_load_threshold(n);
        }
    }
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── rendering ─────────

fn render(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());
    state.feed_area = layout.feed_area;
    let height = state.container_height();
    let current = state.feed.current_index();

    let feed = FeedWidget::new(state.feed.items(), current, &state.feed.playback)
        .drag(state.gestures.is_dragging(), state.gestures.drag_offset())
        .settle_offset(state.smooth.offset());

    // One screen below the current card, underneath any neighbouring card.
    let placeholder = LoadingPlaceholder {
        visible: state.feed.pagination.is_in_flight(),
        offset: feed.row_offset(current, height) + transition::loading_offset(height).round() as i32,
        tick: state.tick,
    };
    frame.render_widget(placeholder, layout.feed_area);
    frame.render_widget(feed, layout.feed_area);

    render_status(frame, state, layout.status_area);

    if state.show_help {
        frame.render_widget(HelpPopup { config: &state.config }, frame.area());
    }
}

fn render_status(frame: &mut Frame, state: &AppState, area: Rect) {
    let hint = state.config.status_bar_hint();
    let (text, style) = match &state.status_message {
        Some(StatusMessage::Info(msg)) => (msg.as_str(), Theme::status_bar_style()),
        Some(StatusMessage::Error(msg)) => (msg.as_str(), Theme::error_style()),
        None => (hint.as_str(), Theme::status_bar_style()),
    };
    frame.render_widget(Paragraph::new(format!(" {text}")).style(style), area);

    let mut position = if state.feed.is_empty() {
        "0 / 0".to_string()
    } else {
        format!("{} / {}", state.feed.current_index() + 1, state.feed.len())
    };
    if state.feed.pagination.is_in_flight() {
        position.push_str("  loading…");
    }
    frame.render_widget(
        Paragraph::new(format!("{position} "))
            .style(style)
            .alignment(Alignment::Right),
        area,
    );
}

// ───────────────────────────────────────── event loop ────────

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    state: &mut AppState,
    provider: Arc<dyn FeedProvider>,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let (feed_tx, mut feed_rx) = tokio::sync::mpsc::unbounded_channel::<FeedUpdate>();
    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| render(frame, state))?;

        // Hand any page request to the runtime after drawing, so the
        // loading placeholder is already visible.
        if let Some(request) = state.pending_load.take() {
            spawn_fetch(
                feed_tx.clone(),
                Arc::clone(&provider),
                state.generation,
                request,
                state.config.page_size,
                state.config.fetch_delay,
            );
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                let now = Instant::now();
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k, now),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m, now),
                    AppEvent::Resize(w, h) => {
                        state.feed_area = AppLayout::from_area(Rect::new(0, 0, w, h)).feed_area;
                    }
                }
            }

            Some(update) = feed_rx.recv() => {
                handler::apply_feed_update(state, update);
            }

            _ = frames.tick() => {
                let now = Instant::now();
                handler::on_tick(state, now.duration_since(last_frame));
                last_frame = now;
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let mut config = AppConfig::load();
    cli.apply_overrides(&mut config);

    if cli.dump_config {
        print!("{}", config.serialise());
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, fail_rate = cli.fail_rate, "starting feed");
    let provider: Arc<dyn FeedProvider> = Arc::new(MockProvider::new(seed, cli.fail_rate));

    let mut state = AppState::new(seed_items(), config);
    state.start();

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state, provider).await;
    if !state.should_quit {
        state.teardown();
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
