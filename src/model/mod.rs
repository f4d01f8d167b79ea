//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (routes, repeat state, UI state)
//! - `playback`: Playback-related state (track metadata, timing, player flags)
//! - `gesture`: Timed D-pad gesture disambiguation for the player screen
//! - `queue`: Queue snapshot and the multi-zone row focus model
//! - `cache`: Liked songs cache for fast lookup
//! - `spotify_client`: Spotify API client wrapper (the player connection)
//! - `app_model`: Main application model with state management methods

mod types;
mod playback;
mod gesture;
mod queue;
mod cache;
mod spotify_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{
    AccountRow, FocusPane, RepeatState, Route, SessionInfo, UiState, RAIL_ROUTES,
};

pub use playback::{
    PlaybackInfo, TrackMetadata,
};

pub use gesture::{HoldDirection, PlayerAction};

pub use queue::{FocusZone, QueueRequest, QueueState, QueueTrack};

pub use spotify_client::SpotifyClient;

pub use app_model::AppModel;
