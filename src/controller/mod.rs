//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that routes D-pad
//! input to the focused screen and issues playback commands against
//! the shared player connection. It is organized into submodules by
//! responsibility:
//!
//! - `input`: Top-level key routing (overlays, rail, content)
//! - `player_keys`: Now-playing screen D-pad handling and gesture dispatch
//! - `queue_keys`: Queue screen multi-zone focus handling
//! - `account_keys`: Account/settings menu handling
//! - `playback`: Playback control methods

mod input;
mod playback;
mod player_keys;
mod queue_keys;
mod account_keys;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self { model }
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        let error_str = error.to_string();

        // Handle common Spotify API errors
        if error_str.contains("404") {
            "No active device found. Start playing on Spotify and try again.".to_string()
        } else if error_str.contains("403") {
            "Action forbidden. Check your Spotify Premium status.".to_string()
        } else if error_str.contains("401") {
            "Authentication expired. Please restart the app.".to_string()
        } else if error_str.contains("429") {
            "Rate limited. Please wait a moment.".to_string()
        } else if error_str.contains("Player command failed") {
            "No active playback. Start playing a song first.".to_string()
        } else {
            format!("Error: {}", error_str)
        }
    }
}
