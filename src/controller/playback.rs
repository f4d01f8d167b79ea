//! Playback control methods
//!
//! Thin command layer over the player connection. Commands are
//! fire-and-forget: one request per input event, failures land in
//! the error overlay and nothing is retried or buffered.

use crate::model::{QueueTrack, Route};

use super::AppController;

impl AppController {
    pub async fn toggle_playback(&self) {
        let model = self.model.lock().await;
        let is_playing = model.is_playing().await;
        tracing::debug!(is_playing, "Toggling playback");

        if let Some(spotify) = &model.spotify {
            let result = if is_playing {
                spotify.pause().await
            } else {
                spotify.play().await
            };

            match result {
                Ok(()) => {
                    model.set_playing(!is_playing).await;
                    tracing::info!(action = if is_playing { "paused" } else { "resumed" }, "Playback toggled");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Toggle playback failed");
                    let error_msg = Self::format_error(&e);
                    model.set_error(error_msg).await;
                }
            }
        }
    }

    pub async fn next_track(&self) {
        tracing::debug!("Skipping to next track");
        let model = self.model.lock().await;

        if let Some(spotify) = &model.spotify {
            if let Err(e) = spotify.next_track().await {
                tracing::error!(error = %e, "Next track failed");
                let error_msg = Self::format_error(&e);
                model.set_error(error_msg).await;
            } else {
                tracing::info!("Skipped to next track");
            }
        }
    }

    pub async fn previous_track(&self) {
        tracing::debug!("Skipping to previous track");
        let model = self.model.lock().await;

        if let Some(spotify) = &model.spotify {
            if let Err(e) = spotify.previous_track().await {
                tracing::error!(error = %e, "Previous track failed");
                let error_msg = Self::format_error(&e);
                model.set_error(error_msg).await;
            }
        }
    }

    /// Seek by a signed offset from the extrapolated position,
    /// clamped into the track
    pub async fn seek_relative(&self, delta_ms: i64) {
        let model = self.model.lock().await;
        let (position_ms, duration_ms) = model.current_position().await;

        let target_ms = (position_ms as i64 + delta_ms)
            .clamp(0, duration_ms.max(1) as i64 - 1) as u32;
        tracing::debug!(position_ms, delta_ms, target_ms, "Relative seek");

        if let Some(spotify) = &model.spotify {
            if let Err(e) = spotify.seek_to(target_ms).await {
                tracing::error!(error = %e, "Seek failed");
                let error_msg = Self::format_error(&e);
                model.set_error(error_msg).await;
            } else {
                // Reflect the jump immediately instead of waiting a poll
                let is_playing = model.is_playing().await;
                model.update_playback_position(target_ms, is_playing).await;
            }
        }
    }

    pub async fn toggle_shuffle(&self) {
        let model = self.model.lock().await;

        if let Some(spotify) = &model.spotify {
            let current_shuffle = model.get_shuffle_state().await;
            let new_shuffle = !current_shuffle;

            if let Err(e) = spotify.set_shuffle(new_shuffle).await {
                let error_msg = Self::format_error(&e);
                model.set_error(error_msg).await;
            } else {
                model.set_shuffle(new_shuffle).await;
                drop(model);
                // delay is needed because Spotify API needs to propagate the change
                tokio::time::sleep(std::time::Duration::from_millis(250)).await;
                self.refresh_queue_if_visible().await;
            }
        }
    }

    pub async fn cycle_repeat(&self) {
        let model = self.model.lock().await;

        if let Some(spotify) = &model.spotify {
            let current_repeat = model.get_repeat_state().await;
            let new_repeat = current_repeat.next();

            if let Err(e) = spotify.set_repeat(new_repeat).await {
                let error_msg = Self::format_error(&e);
                model.set_error(error_msg).await;
            } else {
                model.set_repeat(new_repeat).await;
            }
        }
    }

    /// Like/unlike the currently playing track
    pub async fn toggle_like_current(&self) {
        let model = self.model.lock().await;
        let track = model.current_track().await;

        let Some(track_id) = track.track_id().map(str::to_string) else {
            tracing::warn!("Cannot toggle liked status: no track playing");
            return;
        };

        if let Some(spotify) = &model.spotify {
            match spotify.toggle_liked_song(&track_id).await {
                Ok(new_liked_status) => {
                    model.set_liked(new_liked_status).await;

                    let status = if new_liked_status { "added to" } else { "removed from" };
                    tracing::info!(track_id, status, "Track liked status toggled");
                }
                Err(e) => {
                    let error_msg = Self::format_error(&e);
                    model.set_error(error_msg).await;
                }
            }
        }
    }

    // ========================================================================
    // Queue
    // ========================================================================

    /// Fetch the queue and show it as an overlay over the player
    /// (single-Up gesture)
    pub async fn open_queue_over_player(&self) {
        if self.load_queue().await {
            let model = self.model.lock().await;
            model.reset_gestures().await;
            model.open_queue_overlay().await;
        }
    }

    /// Fetch the queue for the rail-selected queue screen
    pub async fn show_queue_screen(&self) {
        self.load_queue().await;
    }

    /// Fetch the queue into the model. The visible list is the
    /// currently playing track followed by the upcoming entries,
    /// minus anything on the skip list.
    async fn load_queue(&self) -> bool {
        let model = self.model.lock().await;
        model.set_queue_loading(true).await;

        if let Some(spotify) = &model.spotify {
            match spotify.get_queue().await {
                Ok((currently_playing, upcoming)) => {
                    let (tracks, current_index) =
                        Self::assemble_queue_rows(currently_playing, upcoming, &model).await;
                    model.set_queue(tracks, current_index).await;
                    true
                }
                Err(e) => {
                    model.set_queue_loading(false).await;
                    let error_msg = Self::format_error(&e);
                    model.set_error(error_msg).await;
                    false
                }
            }
        } else {
            model.set_queue_loading(false).await;
            false
        }
    }

    /// Refresh the queue snapshot in place while it is on display
    pub async fn refresh_queue_if_visible(&self) {
        let model = self.model.lock().await;

        if !model.is_queue_visible().await {
            return;
        }

        if let Some(spotify) = &model.spotify {
            match spotify.get_queue().await {
                Ok((currently_playing, upcoming)) => {
                    let (tracks, current_index) =
                        Self::assemble_queue_rows(currently_playing, upcoming, &model).await;
                    model.update_queue_in_place(tracks, current_index).await;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Failed to refresh queue");
                }
            }
        }
    }

    async fn assemble_queue_rows(
        currently_playing: Option<QueueTrack>,
        upcoming: Vec<QueueTrack>,
        model: &crate::model::AppModel,
    ) -> (Vec<QueueTrack>, Option<usize>) {
        let mut tracks = Vec::with_capacity(upcoming.len() + 1);
        let current_index = currently_playing.is_some().then_some(0);
        tracks.extend(currently_playing);
        for track in upcoming {
            if !model.is_in_queue_skip_list(&track.uri).await {
                tracks.push(track);
            }
        }
        (tracks, current_index)
    }

    /// Center press on a row's content zone: jump playback there and
    /// close the queue view
    pub async fn play_queue_row(&self, row: usize) {
        let model = self.model.lock().await;

        let Some(track) = model.queue_track_at(row).await else {
            return;
        };

        if let Some(spotify) = &model.spotify {
            if model.queue_is_current_row(row).await {
                tracing::debug!(row, "Row is already playing");
            } else if let Err(e) = spotify.play_track(&track.uri).await {
                let error_msg = Self::format_error(&e);
                model.set_error(error_msg).await;
                return;
            }

            if !model.close_queue_overlay().await && !model.pop_route().await {
                // Queue was the root route; land on the player
                model.activate_rail_route(Route::NowPlaying).await;
            }
            drop(model);
            self.refresh_playback().await;
        }
    }

    /// Center press on a row's remove zone. The Web API cannot drop a
    /// queue entry, so the row leaves the visible queue and its URI
    /// goes on the skip list; if it was the playing row, skip past it.
    pub async fn remove_queue_row(&self, row: usize) {
        let model = self.model.lock().await;

        let was_current = model.queue_is_current_row(row).await;
        let Some(uri) = model.remove_from_queue_view(row).await else {
            return;
        };

        model.add_to_queue_skip_list(uri.clone()).await;
        tracing::info!(row, uri = %uri, "Removed track from queue view");

        if was_current {
            if let Some(spotify) = &model.spotify {
                if let Err(e) = spotify.next_track().await {
                    let error_msg = Self::format_error(&e);
                    model.set_error(error_msg).await;
                }
            }
        }
    }

    // ========================================================================
    // Polling
    // ========================================================================

    /// One tick of the position-polling cadence: pull the playback
    /// context and mirror it into the model
    pub async fn refresh_playback(&self) {
        let model = self.model.lock().await;

        if let Some(spotify) = &model.spotify {
            match spotify.get_current_playback().await {
                Ok(Some(playback)) => {
                    model.update_from_playback_context(&playback).await;

                    let track = model.current_track().await;

                    // A removed entry that started playing anyway gets
                    // skipped past on the next poll tick
                    if !track.uri.is_empty() && model.is_in_queue_skip_list(&track.uri).await {
                        tracing::info!(uri = %track.uri, "Track was removed from the queue, auto-skipping");
                        model.remove_from_queue_skip_list(&track.uri).await;
                        if let Err(e) = spotify.next_track().await {
                            tracing::warn!(error = %e, "Failed to auto-skip removed track");
                        }
                        return;
                    }

                    if let Some(track_id) = track.track_id() {
                        let liked = spotify.is_liked(track_id).await;
                        model.set_liked(liked).await;
                    } else {
                        model.set_liked(false).await;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "Playback poll failed");
                }
            }
        }
    }
}
