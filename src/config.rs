//! User configuration: key bindings, gesture tunables, and paging settings.
//!
//! Stored as a simple `key = value` text file at
//! `$XDG_CONFIG_HOME/swipe-feed/config.toml` (default `~/.config/swipe-feed/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::error::FeedError;
use crate::core::gesture::GestureConfig;
use crate::core::pagination::DEFAULT_LOAD_THRESHOLD;

// ───────────────────────────────────────── actions ───────────

/// All bindable user actions in the feed view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Next,
    Previous,
    TogglePlay,
    Help,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::Next,
        Action::Previous,
        Action::TogglePlay,
        Action::Help,
        Action::Quit,
    ];

    /// Human-readable label for the help overlay.
    pub fn label(self) -> &'static str {
        match self {
            Action::Next => "Next Video",
            Action::Previous => "Previous Video",
            Action::TogglePlay => "Play / Pause",
            Action::Help => "Toggle Help",
            Action::Quit => "Quit",
        }
    }

    fn config_key(self) -> &'static str {
        match self {
            Action::Next => "next",
            Action::Previous => "previous",
            Action::TogglePlay => "toggle_play",
            Action::Help => "help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared; platform modifiers are ignored.
    /// SHIFT is ignored for characters since the character already carries it.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = match self.code {
            KeyCode::Char(_) => MODIFIER_MASK - KeyModifiers::SHIFT,
            _ => MODIFIER_MASK,
        };
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short form for the status bar and help overlay (`"↓"`, `"Ctrl+c"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    /// Config-file form (`"Down"`, `"Ctrl+c"`).
    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, pretty: bool) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match (self.code, pretty) {
            (KeyCode::Char(' '), _) => "Space".into(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::Up, false) => "Up".into(),
            (KeyCode::Down, false) => "Down".into(),
            (KeyCode::Left, _) => "Left".into(),
            (KeyCode::Right, _) => "Right".into(),
            (KeyCode::Enter, _) => "Enter".into(),
            (KeyCode::Esc, _) => "Esc".into(),
            (KeyCode::Tab, _) => "Tab".into(),
            (KeyCode::Home, _) => "Home".into(),
            (KeyCode::End, _) => "End".into(),
            (KeyCode::PageUp, _) => "PageUp".into(),
            (KeyCode::PageDown, _) => "PageDown".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        });
        s
    }
}

impl FromStr for KeyBind {
    type Err = FeedError;

    /// Parse `"Ctrl+c"`, `"Down"`, `"j"`, `"Space"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FeedError::InvalidConfig {
            key: "binding".into(),
            value: s.to_string(),
        };
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last().ok_or_else(invalid)?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return Err(invalid()),
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            f if f.starts_with('f') && f.len() > 1 => {
                KeyCode::F(f[1..].parse().map_err(|_| invalid())?)
            }
            // Single characters keep their case (`?`, `J`).
            _ if key_part.chars().count() == 1 => {
                KeyCode::Char(key_part.chars().next().ok_or_else(invalid)?)
            }
            _ => return Err(invalid()),
        };

        Ok(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub gesture: GestureConfig,
    /// Delta reported per wheel notch (terminals only report notches).
    pub wheel_notch_delta: f64,
    /// Items from the end that trigger a prefetch.
    pub load_threshold: usize,
    /// Items requested per page.
    pub page_size: usize,
    /// Simulated network latency of the mock provider.
    pub fetch_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            gesture: GestureConfig::default(),
            wheel_notch_delta: 100.0,
            load_threshold: DEFAULT_LOAD_THRESHOLD,
            page_size: 5,
            fetch_delay: Duration::from_millis(1500),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Next, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Previous, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(TogglePlay, vec![KeyBind::new(Char(' '), n)]);
        m.insert(Help, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action bound to a key event.  When several bindings match,
    /// the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, bind)| bind.matches(event))
            .max_by_key(|(_, bind)| bind.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// Format the binding list for an action (e.g. `"↓/j"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: swipe | drag or scroll | {}: play/pause | {}: help | {}: quit",
            self.short_binding(Action::Previous),
            self.short_binding(Action::Next),
            self.short_binding(Action::TogglePlay),
            self.short_binding(Action::Help),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) => {
                if path.exists() {
                    tracing::warn!("unreadable config {}: {err}", path.display());
                }
                Self::default()
            }
        }
    }

    /// Parse the config format.  Bad lines are logged and skipped; numeric
    /// values are clamped into their sane ranges.
    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if let Err(err) = config.apply_entry(key.trim(), value.trim()) {
                tracing::warn!("config: {err}");
            }
        }

        config
    }

    fn apply_entry(&mut self, key: &str, value: &str) -> Result<(), FeedError> {
        let g = &mut self.gesture;
        match key {
            "load_threshold" => self.load_threshold = clamp_load_threshold(parse_num(key, value)?),
            "page_size" => self.page_size = clamp_page_size(parse_num(key, value)?),
            "fetch_delay_ms" => self.fetch_delay = clamp_fetch_delay(parse_num(key, value)?),
            "max_drag_fraction" => g.max_drag_fraction = parse_finite(key, value)?.clamp(0.05, 1.0),
            "navigate_fraction" => g.navigate_fraction = parse_finite(key, value)?.clamp(0.01, 1.0),
            "wheel_threshold" => g.wheel_threshold = parse_finite(key, value)?.clamp(1.0, 1000.0),
            "wheel_notch_delta" => {
                self.wheel_notch_delta = parse_finite(key, value)?.clamp(1.0, 1000.0)
            }
            "wheel_cooldown_ms" => {
                g.wheel_cooldown = Duration::from_millis(parse_num::<u64>(key, value)?.min(5_000))
            }
            "key_cooldown_ms" => {
                g.key_cooldown = Duration::from_millis(parse_num::<u64>(key, value)?.min(5_000))
            }
            _ => {
                // Unknown keys are ignored so older binaries accept newer files.
                let Some(action) = Action::from_config_key(key) else {
                    return Ok(());
                };
                let parsed = value
                    .split(',')
                    .map(|part| part.trim().trim_matches('"').parse::<KeyBind>())
                    .collect::<Result<Vec<_>, _>>()?;
                if !parsed.is_empty() {
                    self.bindings.insert(action, parsed);
                }
            }
        }
        Ok(())
    }

    /// Serialise in the same format [`AppConfig::parse`] reads.
    pub fn serialise(&self) -> String {
        let g = &self.gesture;
        let mut lines = vec![
            "# swipe-feed configuration".to_string(),
            String::new(),
            "# Paging".to_string(),
            format!("load_threshold = {}", self.load_threshold),
            format!("page_size = {}", self.page_size),
            format!("fetch_delay_ms = {}", self.fetch_delay.as_millis()),
            String::new(),
            "# Gestures".to_string(),
            format!("max_drag_fraction = {}", g.max_drag_fraction),
            format!("navigate_fraction = {}", g.navigate_fraction),
            format!("wheel_threshold = {}", g.wheel_threshold),
            format!("wheel_notch_delta = {}", self.wheel_notch_delta),
            format!("wheel_cooldown_ms = {}", g.wheel_cooldown.as_millis()),
            format!("key_cooldown_ms = {}", g.key_cooldown.as_millis()),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn parse_num<T: FromStr>(key: &str, value: &str) -> Result<T, FeedError> {
    value.parse().map_err(|_| invalid(key, value))
}

/// `f64` parse that also rejects `NaN` and infinities, which slip through
/// `clamp`.
fn parse_finite(key: &str, value: &str) -> Result<f64, FeedError> {
    let n: f64 = parse_num(key, value)?;
    if n.is_finite() {
        Ok(n)
    } else {
        Err(invalid(key, value))
    }
}

fn invalid(key: &str, value: &str) -> FeedError {
    FeedError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    }
}

pub fn clamp_load_threshold(n: usize) -> usize {
    n.min(20)
}

pub fn clamp_page_size(n: usize) -> usize {
    n.clamp(1, 100)
}

pub fn clamp_fetch_delay(ms: u64) -> Duration {
    Duration::from_millis(ms.min(60_000))
}

/// Return the config file path (`$XDG_CONFIG_HOME/swipe-feed/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("swipe-feed").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_bindings_cover_arrows() {
        let config = AppConfig::default();
        assert_eq!(config.match_key(key(KeyCode::Down)), Some(Action::Next));
        assert_eq!(config.match_key(key(KeyCode::Up)), Some(Action::Previous));
        assert_eq!(config.match_key(key(KeyCode::Char(' '))), Some(Action::TogglePlay));
        assert_eq!(config.match_key(key(KeyCode::Left)), None);
    }

    #[test]
    fn parses_tunables_and_bindings() {
        let config = AppConfig::parse(
            "# comment\n\
             load_threshold = 3\n\
             wheel_cooldown_ms = 250\n\
             navigate_fraction = 0.25\n\
             next = n, Ctrl+Down\n",
        );
        assert_eq!(config.load_threshold, 3);
        assert_eq!(config.gesture.wheel_cooldown, Duration::from_millis(250));
        assert_eq!(config.gesture.navigate_fraction, 0.25);
        assert_eq!(config.match_key(key(KeyCode::Char('n'))), Some(Action::Next));
        assert_eq!(
            config.match_key(KeyEvent::new(KeyCode::Down, KeyModifiers::CONTROL)),
            Some(Action::Next)
        );
        // Overridden, so plain Down is no longer bound.
        assert_eq!(config.match_key(key(KeyCode::Down)), None);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = AppConfig::parse("page_size = 0\nmax_drag_fraction = 7\nkey_cooldown_ms = 99999\n");
        assert_eq!(config.page_size, 1);
        assert_eq!(config.gesture.max_drag_fraction, 1.0);
        assert_eq!(config.gesture.key_cooldown, Duration::from_millis(5_000));
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = AppConfig::parse("wheel_threshold = lots\nquit = Hyper+q\nmystery = 1\n");
        let defaults = AppConfig::default();
        assert_eq!(config.gesture.wheel_threshold, defaults.gesture.wheel_threshold);
        assert_eq!(config.match_key(key(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn non_finite_values_keep_defaults() {
        let config = AppConfig::parse(
            "max_drag_fraction = NaN\n\
             navigate_fraction = nan\n\
             wheel_threshold = inf\n\
             wheel_notch_delta = -inf\n",
        );
        let defaults = AppConfig::default();
        assert_eq!(config.gesture, defaults.gesture);
        assert_eq!(config.wheel_notch_delta, defaults.wheel_notch_delta);
        assert!(parse_finite("wheel_threshold", "NaN").is_err());
        assert_eq!(parse_finite("wheel_threshold", "12.5"), Ok(12.5));
    }

    #[test]
    fn overrides_share_the_file_clamps() {
        assert_eq!(clamp_load_threshold(usize::MAX), 20);
        assert_eq!(clamp_page_size(0), 1);
        assert_eq!(clamp_fetch_delay(u64::MAX), Duration::from_millis(60_000));
    }

    #[test]
    fn serialise_parses_back_to_same_values() {
        let mut config = AppConfig::default();
        config.page_size = 8;
        config.gesture.wheel_threshold = 30.0;
        let reparsed = AppConfig::parse(&config.serialise());
        assert_eq!(reparsed.page_size, 8);
        assert_eq!(reparsed.gesture, config.gesture);
        assert_eq!(reparsed.bindings, config.bindings);
    }

    #[test]
    fn keybind_parsing() {
        assert_eq!(
            "Alt+Up".parse::<KeyBind>().unwrap(),
            KeyBind::new(KeyCode::Up, KeyModifiers::ALT)
        );
        assert_eq!(
            "?".parse::<KeyBind>().unwrap(),
            KeyBind::new(KeyCode::Char('?'), KeyModifiers::NONE)
        );
        assert!("F".parse::<KeyBind>().is_ok());
        assert!("Fx".parse::<KeyBind>().is_err());
        assert!("Meta+x".parse::<KeyBind>().is_err());
    }
}
