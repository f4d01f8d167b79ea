//! Core type definitions for the TV shell

use std::time::Instant;

/// Screens reachable through the navigation collaborator.
///
/// The shell owns a stack of these; controllers push and pop but the
/// individual screens never inspect the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    NowPlaying,
    Queue,
    Account,
    Integrations,
    Settings,
}

impl Route {
    pub fn title(self) -> &'static str {
        match self {
            Route::NowPlaying => "Now Playing",
            Route::Queue => "Queue",
            Route::Account => "Account",
            Route::Integrations => "Integrations",
            Route::Settings => "Settings",
        }
    }
}

/// Top-level entries on the navigation rail, in display order.
pub const RAIL_ROUTES: [Route; 3] = [Route::NowPlaying, Route::Queue, Route::Account];

/// Which pane of the TV layout currently owns the D-pad
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusPane {
    Rail,
    Content,
}

/// Repeat mode state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatState {
    Off,
    All,
    One,
}

impl RepeatState {
    /// Cycle order used by the double-press-down gesture: off → all → one → off
    pub fn next(self) -> Self {
        match self {
            RepeatState::Off => RepeatState::All,
            RepeatState::All => RepeatState::One,
            RepeatState::One => RepeatState::Off,
        }
    }
}

/// Rows of the account/settings menu, in display order.
///
/// Every row is reachable by Up/Down alone; there is no pointer path
/// to any of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountRow {
    Session,
    Sync,
    Integrations,
    Settings,
}

impl AccountRow {
    pub const ALL: [AccountRow; 4] = [
        AccountRow::Session,
        AccountRow::Sync,
        AccountRow::Integrations,
        AccountRow::Settings,
    ];
}

/// Signed-in state mirrored from the auth layer
#[derive(Clone, Debug, Default)]
pub struct SessionInfo {
    pub signed_in: bool,
    pub display_name: String,
}

/// UI state for the shell
#[derive(Clone)]
pub struct UiState {
    pub route_stack: Vec<Route>,
    pub focus_pane: FocusPane,
    pub rail_selected: usize,
    pub account_selected: usize,
    pub queue_overlay: bool,
    pub session: SessionInfo,
    pub sync_enabled: bool,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl UiState {
    /// The route whose screen the content area currently renders
    pub fn current_route(&self) -> Route {
        self.route_stack.last().copied().unwrap_or(Route::NowPlaying)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            route_stack: vec![Route::NowPlaying],
            focus_pane: FocusPane::Content,
            rail_selected: 0,
            account_selected: 0,
            queue_overlay: false,
            session: SessionInfo::default(),
            sync_enabled: true,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_cycles_off_all_one_off() {
        let mut state = RepeatState::Off;
        state = state.next();
        assert_eq!(state, RepeatState::All);
        state = state.next();
        assert_eq!(state, RepeatState::One);
        state = state.next();
        assert_eq!(state, RepeatState::Off);
    }

    #[test]
    fn empty_route_stack_falls_back_to_player() {
        let ui = UiState {
            route_stack: Vec::new(),
            ..UiState::default()
        };
        assert_eq!(ui.current_route(), Route::NowPlaying);
    }
}
