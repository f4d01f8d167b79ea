//! Main application model with state management
//!
//! All transient UI state lives here: route stack, focus positions,
//! gesture timers, queue snapshot. Playback facts are mirrored from
//! the player connection and never forked; every setter below is
//! overwritten by the next observed snapshot.

use std::sync::Arc;
use std::collections::HashSet;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::sync::RwLock;
use rspotify::model::CurrentPlaybackContext;

use super::gesture::{GestureArbiter, HoldDirection, PlayerAction};
use super::playback::{PlaybackInfo, PlaybackSettings, PlaybackTiming, TrackMetadata};
use super::queue::{QueueRequest, QueueState, QueueTrack};
use super::spotify_client::SpotifyClient;
use super::types::{AccountRow, FocusPane, RepeatState, Route, SessionInfo, UiState, RAIL_ROUTES};

/// Main application model containing all state
pub struct AppModel {
    pub spotify: Option<SpotifyClient>,
    track_metadata: Arc<Mutex<TrackMetadata>>,
    playback_timing: Arc<Mutex<PlaybackTiming>>,
    playback_settings: Arc<Mutex<PlaybackSettings>>,
    pub ui_state: Arc<Mutex<UiState>>,
    queue_state: Arc<Mutex<QueueState>>,
    gestures: Arc<Mutex<GestureArbiter>>,
    pub should_quit: Arc<Mutex<bool>>,
    queue_skip_list: Arc<RwLock<HashSet<String>>>,
}

impl AppModel {
    /// `holds_enabled` reflects whether the terminal reports key
    /// releases; it is queried once at startup.
    pub fn new(holds_enabled: bool) -> Self {
        Self {
            spotify: None,
            track_metadata: Arc::new(Mutex::new(TrackMetadata::default())),
            playback_timing: Arc::new(Mutex::new(PlaybackTiming::default())),
            playback_settings: Arc::new(Mutex::new(PlaybackSettings::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            queue_state: Arc::new(Mutex::new(QueueState::default())),
            gestures: Arc::new(Mutex::new(GestureArbiter::new(holds_enabled))),
            should_quit: Arc::new(Mutex::new(false)),
            queue_skip_list: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    pub fn set_spotify_client(&mut self, client: SpotifyClient) {
        self.spotify = Some(client);
    }

    pub async fn get_spotify_client(&self) -> Option<SpotifyClient> {
        self.spotify.clone()
    }

    // ========================================================================
    // Playback state
    // ========================================================================

    pub async fn update_playback_position(&self, position_ms: u32, is_playing: bool) {
        let mut timing = self.playback_timing.lock().await;
        timing.update_position(position_ms, is_playing);
    }

    pub async fn set_playing(&self, is_playing: bool) {
        let mut timing = self.playback_timing.lock().await;
        timing.position_ms = timing.current_position_ms();
        timing.is_playing = is_playing;
        timing.last_update = Instant::now();
    }

    pub async fn update_from_playback_context(&self, playback: &CurrentPlaybackContext) {
        let track = TrackMetadata::from_playback(playback);
        let progress_ms = playback
            .progress
            .map(|d| d.num_milliseconds() as u32)
            .unwrap_or(0);
        let is_playing = playback.is_playing;

        *self.track_metadata.lock().await = track.clone();

        let mut timing = self.playback_timing.lock().await;
        timing.position_ms = progress_ms;
        timing.duration_ms = track.duration_ms;
        timing.is_playing = is_playing;
        timing.last_update = Instant::now();
        drop(timing);

        let mut settings = self.playback_settings.lock().await;
        settings.device_name = playback.device.name.clone();
        settings.shuffle = playback.shuffle_state;
        settings.repeat = match playback.repeat_state {
            rspotify::model::RepeatState::Off => RepeatState::Off,
            rspotify::model::RepeatState::Track => RepeatState::One,
            rspotify::model::RepeatState::Context => RepeatState::All,
        };
        settings.apply_disallows(&playback.actions.disallows);
    }

    pub async fn get_playback_info(&self) -> PlaybackInfo {
        let track = self.track_metadata.lock().await.clone();
        let timing = self.playback_timing.lock().await;
        let settings = self.playback_settings.lock().await.clone();

        PlaybackInfo {
            track,
            progress_ms: timing.current_position_ms(),
            duration_ms: timing.duration_ms,
            is_playing: timing.is_playing,
            settings,
        }
    }

    pub async fn is_playing(&self) -> bool {
        self.playback_timing.lock().await.is_playing
    }

    /// Extrapolated position and duration, for relative seeks
    pub async fn current_position(&self) -> (u32, u32) {
        let timing = self.playback_timing.lock().await;
        (timing.current_position_ms(), timing.duration_ms)
    }

    pub async fn current_track(&self) -> TrackMetadata {
        self.track_metadata.lock().await.clone()
    }

    pub async fn get_shuffle_state(&self) -> bool {
        self.playback_settings.lock().await.shuffle
    }

    pub async fn set_shuffle(&self, shuffle: bool) {
        let mut settings = self.playback_settings.lock().await;
        settings.shuffle = shuffle;
    }

    pub async fn get_repeat_state(&self) -> RepeatState {
        self.playback_settings.lock().await.repeat
    }

    pub async fn set_repeat(&self, repeat: RepeatState) {
        let mut settings = self.playback_settings.lock().await;
        settings.repeat = repeat;
    }

    pub async fn set_liked(&self, liked: bool) {
        let mut settings = self.playback_settings.lock().await;
        settings.liked = liked;
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Routes & rail focus
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn current_route(&self) -> Route {
        self.ui_state.lock().await.current_route()
    }

    /// Push a route and reset the target screen's transient state;
    /// nothing survives navigation away and back.
    pub async fn push_route(&self, route: Route) {
        {
            let mut ui = self.ui_state.lock().await;
            if ui.current_route() == route {
                return;
            }
            ui.route_stack.push(route);
            ui.focus_pane = FocusPane::Content;
            if route == Route::Account {
                ui.account_selected = 0;
            }
        }
        match route {
            Route::NowPlaying => self.reset_gestures().await,
            Route::Queue => {
                let mut queue = self.queue_state.lock().await;
                let len = queue.len();
                let row = queue.current_index.unwrap_or(0);
                queue.nav = super::queue::QueueNav::enter_at(row, len);
            }
            _ => {}
        }
    }

    /// Pop one level; returns false at the root of the stack
    pub async fn pop_route(&self) -> bool {
        let mut ui = self.ui_state.lock().await;
        if ui.route_stack.len() > 1 {
            ui.route_stack.pop();
            true
        } else {
            false
        }
    }

    pub async fn focus_pane(&self) -> FocusPane {
        self.ui_state.lock().await.focus_pane
    }

    pub async fn set_focus_pane(&self, pane: FocusPane) {
        self.ui_state.lock().await.focus_pane = pane;
    }

    pub async fn rail_move_up(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.rail_selected = ui.rail_selected.saturating_sub(1);
    }

    pub async fn rail_move_down(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.rail_selected = (ui.rail_selected + 1).min(RAIL_ROUTES.len() - 1);
    }

    pub async fn rail_selected_route(&self) -> Route {
        let ui = self.ui_state.lock().await;
        RAIL_ROUTES[ui.rail_selected.min(RAIL_ROUTES.len() - 1)]
    }

    /// Replace the whole stack with a rail destination
    pub async fn activate_rail_route(&self, route: Route) {
        {
            let mut ui = self.ui_state.lock().await;
            ui.route_stack.clear();
            ui.route_stack.push(route);
            ui.queue_overlay = false;
            ui.focus_pane = FocusPane::Content;
            if route == Route::Account {
                ui.account_selected = 0;
            }
        }
        if route == Route::NowPlaying {
            self.reset_gestures().await;
        }
    }

    // ========================================================================
    // Queue overlay & account menu
    // ========================================================================

    pub async fn open_queue_overlay(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.queue_overlay = true;
        drop(ui);

        let mut queue = self.queue_state.lock().await;
        let len = queue.len();
        let row = queue.current_index.unwrap_or(0);
        queue.nav = super::queue::QueueNav::enter_at(row, len);
    }

    pub async fn close_queue_overlay(&self) -> bool {
        let mut ui = self.ui_state.lock().await;
        let was_open = ui.queue_overlay;
        ui.queue_overlay = false;
        was_open
    }

    pub async fn is_queue_overlay_open(&self) -> bool {
        self.ui_state.lock().await.queue_overlay
    }

    /// Whether the queue screen is on display, as a route or overlay
    pub async fn is_queue_visible(&self) -> bool {
        let ui = self.ui_state.lock().await;
        ui.queue_overlay || ui.current_route() == Route::Queue
    }

    pub async fn account_move_up(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.account_selected = ui.account_selected.saturating_sub(1);
    }

    pub async fn account_move_down(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.account_selected = (ui.account_selected + 1).min(AccountRow::ALL.len() - 1);
    }

    pub async fn selected_account_row(&self) -> AccountRow {
        let ui = self.ui_state.lock().await;
        AccountRow::ALL[ui.account_selected.min(AccountRow::ALL.len() - 1)]
    }

    pub async fn set_session(&self, session: SessionInfo) {
        self.ui_state.lock().await.session = session;
    }

    pub async fn toggle_sync(&self) -> bool {
        let mut ui = self.ui_state.lock().await;
        ui.sync_enabled = !ui.sync_enabled;
        ui.sync_enabled
    }

    // ========================================================================
    // Errors & help
    // ========================================================================

    pub async fn set_error(&self, message: String) {
        let mut ui = self.ui_state.lock().await;
        ui.error_message = Some(message);
        ui.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.error_message = None;
        ui.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut ui = self.ui_state.lock().await;
        if let Some(timestamp) = ui.error_timestamp {
            if timestamp.elapsed().as_secs() >= 5 {
                ui.error_message = None;
                ui.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Gestures (now-playing screen)
    // ========================================================================

    pub async fn gesture_press_center(&self) -> PlayerAction {
        self.gestures.lock().await.press_center()
    }

    pub async fn gesture_press_up(&self, now: Instant) -> Option<PlayerAction> {
        self.gestures.lock().await.press_up(now)
    }

    pub async fn gesture_press_down(&self, now: Instant) -> Option<PlayerAction> {
        self.gestures.lock().await.press_down(now)
    }

    pub async fn gesture_press_horizontal(
        &self,
        direction: HoldDirection,
        now: Instant,
    ) -> Option<PlayerAction> {
        self.gestures.lock().await.press_horizontal(direction, now)
    }

    pub async fn gesture_release_horizontal(&self, direction: HoldDirection) {
        self.gestures.lock().await.release_horizontal(direction);
    }

    pub async fn tick_gestures(&self, now: Instant) -> Vec<PlayerAction> {
        self.gestures.lock().await.tick(now)
    }

    pub async fn hold_progress(&self, now: Instant) -> Option<(HoldDirection, f64)> {
        self.gestures.lock().await.hold_progress(now)
    }

    pub async fn reset_gestures(&self) {
        self.gestures.lock().await.reset();
    }

    // ========================================================================
    // Queue snapshot & focus
    // ========================================================================

    pub async fn get_queue_state(&self) -> QueueState {
        self.queue_state.lock().await.clone()
    }

    pub async fn set_queue_loading(&self, loading: bool) {
        self.queue_state.lock().await.loading = loading;
    }

    pub async fn set_queue(&self, tracks: Vec<QueueTrack>, current_index: Option<usize>) {
        let mut queue = self.queue_state.lock().await;
        queue.replace(tracks, current_index);
    }

    /// Refresh the snapshot without stealing focus, clamping it into
    /// the new range
    pub async fn update_queue_in_place(&self, tracks: Vec<QueueTrack>, current_index: Option<usize>) {
        let mut queue = self.queue_state.lock().await;
        queue.current_index = current_index.filter(|&i| i < tracks.len());
        queue.tracks = tracks;
        let len = queue.len();
        queue.nav.clamp(len);
        queue.loading = false;
    }

    pub async fn queue_up(&self) -> Option<QueueRequest> {
        let mut queue = self.queue_state.lock().await;
        let len = queue.len();
        queue.nav.up(len)
    }

    pub async fn queue_down(&self) -> Option<QueueRequest> {
        let mut queue = self.queue_state.lock().await;
        let len = queue.len();
        queue.nav.down(len)
    }

    pub async fn queue_left(&self) {
        self.queue_state.lock().await.nav.left();
    }

    pub async fn queue_right(&self) {
        self.queue_state.lock().await.nav.right();
    }

    pub async fn queue_activate(&self) -> Option<QueueRequest> {
        let mut queue = self.queue_state.lock().await;
        let len = queue.len();
        queue.nav.activate(len)
    }

    /// Back press on the queue screen; true when consumed by exiting
    /// drag mode
    pub async fn queue_back(&self) -> bool {
        self.queue_state.lock().await.nav.back()
    }

    pub async fn queue_track_at(&self, row: usize) -> Option<QueueTrack> {
        self.queue_state.lock().await.tracks.get(row).cloned()
    }

    pub async fn queue_is_current_row(&self, row: usize) -> bool {
        self.queue_state.lock().await.is_current_row(row)
    }

    pub async fn move_queue_row(&self, from: usize, to: usize) {
        self.queue_state.lock().await.move_row(from, to);
    }

    pub async fn remove_from_queue_view(&self, index: usize) -> Option<String> {
        self.queue_state.lock().await.remove_row(index)
    }

    // ========================================================================
    // Queue skip list (remove emulation)
    // ========================================================================

    pub async fn add_to_queue_skip_list(&self, uri: String) {
        let mut skip_list = self.queue_skip_list.write().await;
        skip_list.insert(uri);
    }

    pub async fn is_in_queue_skip_list(&self, uri: &str) -> bool {
        let skip_list = self.queue_skip_list.read().await;
        skip_list.contains(uri)
    }

    pub async fn remove_from_queue_skip_list(&self, uri: &str) {
        let mut skip_list = self.queue_skip_list.write().await;
        skip_list.remove(uri);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::queue::FocusZone;

    fn track(name: &str) -> QueueTrack {
        QueueTrack {
            id: name.to_lowercase(),
            uri: format!("spotify:track:{}", name.to_lowercase()),
            name: name.to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            duration_ms: 180_000,
            liked: false,
        }
    }

    #[tokio::test]
    async fn entering_queue_focuses_current_track_row() {
        let model = AppModel::new(true);
        model
            .set_queue(vec![track("A"), track("B"), track("C")], Some(1))
            .await;
        model.push_route(Route::Queue).await;

        let queue = model.get_queue_state().await;
        assert_eq!(queue.nav.row, 1);
        assert_eq!(queue.nav.zone, FocusZone::Content);
    }

    #[tokio::test]
    async fn remove_scenario_keeps_focus_and_index_valid() {
        // Queue [A, B, C], B playing. Remove row 0: queue becomes
        // [B, C], index shifts to 0, focus stays within bounds.
        let model = AppModel::new(true);
        model
            .set_queue(vec![track("A"), track("B"), track("C")], Some(1))
            .await;
        model.push_route(Route::Queue).await;

        let uri = model.remove_from_queue_view(0).await;
        assert_eq!(uri.as_deref(), Some("spotify:track:a"));

        let queue = model.get_queue_state().await;
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current_index, Some(0));
        assert!(queue.nav.row <= 1);
    }

    #[tokio::test]
    async fn in_place_refresh_clamps_focus_after_external_shrink() {
        let model = AppModel::new(true);
        model
            .set_queue(
                vec![track("A"), track("B"), track("C"), track("D")],
                Some(3),
            )
            .await;

        model
            .update_queue_in_place(vec![track("A"), track("B")], Some(0))
            .await;

        let queue = model.get_queue_state().await;
        assert_eq!(queue.len(), 2);
        assert!(queue.nav.row <= 1);
    }

    #[tokio::test]
    async fn reopening_queue_resets_drag_state() {
        let model = AppModel::new(true);
        model
            .set_queue(vec![track("A"), track("B")], Some(0))
            .await;

        model.open_queue_overlay().await;
        model.queue_right().await;
        assert_eq!(model.queue_activate().await, None); // enters drag
        assert!(model.get_queue_state().await.nav.dragging.is_some());

        model.close_queue_overlay().await;
        model.open_queue_overlay().await;
        assert!(model.get_queue_state().await.nav.dragging.is_none());
    }

    #[tokio::test]
    async fn back_at_stack_root_is_reported() {
        let model = AppModel::new(true);
        assert!(!model.pop_route().await);

        model.push_route(Route::Account).await;
        assert!(model.pop_route().await);
        assert_eq!(model.current_route().await, Route::NowPlaying);
    }

    #[tokio::test]
    async fn rail_selection_clamps_to_entries() {
        let model = AppModel::new(true);
        model.rail_move_up().await;
        assert_eq!(model.rail_selected_route().await, RAIL_ROUTES[0]);

        for _ in 0..10 {
            model.rail_move_down().await;
        }
        assert_eq!(
            model.rail_selected_route().await,
            RAIL_ROUTES[RAIL_ROUTES.len() - 1]
        );
    }
}
