//! Host platform UI-mode detection
//!
//! Queried exactly once at startup; the answer gates which top-level
//! layout the shell renders for the rest of the session.

use std::env;

const UI_MODE_ENV: &str = "TV_SHELL_MODE";

/// Terminals this wide are treated as a 10-foot display
const TELEVISION_MIN_WIDTH: u16 = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiMode {
    /// Rail + routed content + strip
    Television,
    /// Strip-only fallback for small terminals
    Compact,
}

/// One-shot TV-class device query: explicit env override first, then
/// a terminal-size heuristic.
pub fn detect_ui_mode() -> UiMode {
    if let Ok(value) = env::var(UI_MODE_ENV) {
        if let Some(mode) = mode_from_env_value(&value) {
            tracing::info!(value = %value, mode = ?mode, "UI mode forced via {}", UI_MODE_ENV);
            return mode;
        }
        tracing::warn!(value = %value, "Unrecognized {} value, falling back to detection", UI_MODE_ENV);
    }

    match crossterm::terminal::size() {
        Ok((width, _)) if width >= TELEVISION_MIN_WIDTH => UiMode::Television,
        Ok(_) => UiMode::Compact,
        Err(e) => {
            tracing::warn!(error = %e, "Could not query terminal size, assuming television");
            UiMode::Television
        }
    }
}

fn mode_from_env_value(value: &str) -> Option<UiMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "tv" | "television" | "true" | "on" => Some(UiMode::Television),
        "0" | "compact" | "false" | "off" => Some(UiMode::Compact),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_values_map_to_modes() {
        assert_eq!(mode_from_env_value("1"), Some(UiMode::Television));
        assert_eq!(mode_from_env_value(" TV "), Some(UiMode::Television));
        assert_eq!(mode_from_env_value("compact"), Some(UiMode::Compact));
        assert_eq!(mode_from_env_value("0"), Some(UiMode::Compact));
        assert_eq!(mode_from_env_value("widescreen"), None);
    }
}
