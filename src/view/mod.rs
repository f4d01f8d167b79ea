//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: TV layout chrome (navigation rail, now-playing strip)
//! - `now_playing`: Full-screen player rendering
//! - `queue`: Queue screen rendering
//! - `account`: Account/settings menu rendering
//! - `overlays`: Modal overlays (error, queue overlay, help)

mod utils;
mod layout;
mod now_playing;
mod queue;
mod account;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{HoldDirection, PlaybackInfo, QueueState, Route, UiState};
use crate::platform::UiMode;

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        mode: UiMode,
        playback: &PlaybackInfo,
        ui_state: &UiState,
        queue: &QueueState,
        hold: Option<(HoldDirection, f64)>,
    ) {
        match mode {
            UiMode::Television => Self::render_television(frame, playback, ui_state, queue, hold),
            UiMode::Compact => Self::render_compact(frame, playback, hold),
        }

        // Queue overlay above the player (single-Up gesture)
        if ui_state.queue_overlay {
            overlays::render_queue_overlay(frame, queue);
        }

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }

    /// Full TV layout: side rail, routed content area, bottom strip
    fn render_television(
        frame: &mut Frame,
        playback: &PlaybackInfo,
        ui_state: &UiState,
        queue: &QueueState,
        hold: Option<(HoldDirection, f64)>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Rail + content
                Constraint::Length(3), // Now-playing strip
            ])
            .split(frame.area());

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(20), // Navigation rail
                Constraint::Min(0),     // Routed content
            ])
            .split(chunks[0]);

        layout::render_rail(frame, main_chunks[0], ui_state);

        let content_area = main_chunks[1];
        match ui_state.current_route() {
            Route::NowPlaying => now_playing::render_player(frame, content_area, playback, hold),
            Route::Queue => queue::render_queue(frame, content_area, queue, "Queue"),
            Route::Account => account::render_account(frame, content_area, ui_state),
            route @ (Route::Integrations | Route::Settings) => {
                account::render_inherited_screen(frame, content_area, route)
            }
        }

        layout::render_strip(frame, chunks[1], playback);
    }

    /// Non-TV fallback: the player plus the strip, no rail
    fn render_compact(
        frame: &mut Frame,
        playback: &PlaybackInfo,
        hold: Option<(HoldDirection, f64)>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Player
                Constraint::Length(3), // Now-playing strip
            ])
            .split(frame.area());

        now_playing::render_player(frame, chunks[0], playback, hold);
        layout::render_strip(frame, chunks[1], playback);
    }
}
