//! Spotify Web API wrapper, the shared player-connection object
//!
//! Every screen reads playback state from here and issues commands
//! back through here; nothing else in the shell talks to the network.
//! Commands are fire-and-forget: one request, no retries, errors
//! bubble up as `anyhow::Error` for the caller to surface.

use std::sync::Arc;
use anyhow::Result;
use rspotify::{
    model::{CurrentPlaybackContext, PlayableId, PlayableItem, TrackId},
    prelude::*,
    AuthCodePkceSpotify,
};

use super::cache::LikedSongsCache;
use super::queue::QueueTrack;
use super::types::RepeatState;

/// Spotify API client with liked-songs caching and token refresh
#[derive(Clone)]
pub struct SpotifyClient {
    client: Arc<AuthCodePkceSpotify>,
    liked_songs_cache: LikedSongsCache,
}

impl SpotifyClient {
    pub fn new(client: AuthCodePkceSpotify) -> Self {
        Self {
            client: Arc::new(client),
            liked_songs_cache: LikedSongsCache::new(),
        }
    }

    pub async fn token_needs_refresh(&self) -> bool {
        let token_guard = match self.client.token.lock().await {
            Ok(guard) => guard,
            Err(_) => return false,
        };
        if let Some(token) = token_guard.as_ref() {
            if let Some(expires_at) = token.expires_at {
                let remaining = expires_at - chrono::Utc::now();
                // Refresh if less than 5 minutes remaining
                return remaining.num_seconds() < 300;
            }
        }
        false
    }

    pub async fn refresh_token_if_needed(&self) -> Result<bool> {
        if !self.token_needs_refresh().await {
            return Ok(false);
        }

        tracing::info!("Token expiring soon, refreshing...");
        match self.client.refresh_token().await {
            Ok(()) => {
                tracing::info!("Token refreshed successfully");
                Ok(true)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to refresh token");
                Err(e.into())
            }
        }
    }

    pub async fn init_liked_songs_cache(&self) -> Result<()> {
        // Cache file may not exist yet on first run
        let _ = self.liked_songs_cache.load_from_disk().await;
        Ok(())
    }

    pub async fn refresh_liked_songs_cache(&self) -> Result<()> {
        use futures::StreamExt;
        use futures::TryStreamExt;

        tracing::debug!("Refreshing liked songs cache from API");

        let tracks_stream = self.client.current_user_saved_tracks(None);
        let saved_tracks: Vec<_> = tracks_stream
            .take(1000) // Reasonable limit
            .try_collect()
            .await?;

        let track_ids: Vec<String> = saved_tracks
            .into_iter()
            .filter_map(|saved| saved.track.id.map(|id| id.id().to_string()))
            .collect();

        tracing::info!(count = track_ids.len(), "Liked songs cache refreshed");

        self.liked_songs_cache.update(track_ids).await;
        let _ = self.liked_songs_cache.save_to_disk().await;

        Ok(())
    }

    pub async fn is_liked(&self, track_id: &str) -> bool {
        self.liked_songs_cache.is_liked(track_id).await
    }

    pub async fn add_to_liked_songs(&self, track_id: &str) -> Result<()> {
        if track_id.is_empty() {
            return Err(anyhow::anyhow!("Track ID is empty"));
        }

        tracing::debug!(track_id, "Adding track to liked songs");
        let id = TrackId::from_id(track_id)?;
        self.client.current_user_saved_tracks_add([id]).await?;

        self.liked_songs_cache.add(track_id.to_string()).await;
        let _ = self.liked_songs_cache.save_to_disk().await;

        tracing::info!(track_id, "Added track to liked songs");
        Ok(())
    }

    pub async fn remove_from_liked_songs(&self, track_id: &str) -> Result<()> {
        if track_id.is_empty() {
            return Err(anyhow::anyhow!("Track ID is empty"));
        }

        tracing::debug!(track_id, "Removing track from liked songs");
        let id = TrackId::from_id(track_id)?;
        self.client.current_user_saved_tracks_delete([id]).await?;

        self.liked_songs_cache.remove(track_id).await;
        let _ = self.liked_songs_cache.save_to_disk().await;

        tracing::info!(track_id, "Removed track from liked songs");
        Ok(())
    }

    pub async fn toggle_liked_song(&self, track_id: &str) -> Result<bool> {
        let is_liked = self.liked_songs_cache.is_liked(track_id).await;

        if is_liked {
            self.remove_from_liked_songs(track_id).await?;
            Ok(false)
        } else {
            self.add_to_liked_songs(track_id).await?;
            Ok(true)
        }
    }

    pub async fn get_current_playback(&self) -> Result<Option<CurrentPlaybackContext>> {
        tracing::trace!("Fetching current playback state");
        let result = self.client.current_playback(None, None::<Vec<_>>).await?;
        if let Some(ref playback) = result {
            tracing::trace!(
                is_playing = playback.is_playing,
                device = ?playback.device.name,
                "Got playback state"
            );
        }
        Ok(result)
    }

    pub async fn get_display_name(&self) -> Result<String> {
        let user = self.client.me().await?;
        Ok(user.display_name.unwrap_or_else(|| user.id.id().to_string()))
    }

    async fn get_device_id(&self) -> Option<String> {
        if let Ok(devices) = self.client.device().await {
            let active_device = devices.iter().find(|d| d.is_active);
            if let Some(device) = active_device {
                tracing::debug!(device_name = %device.name, device_id = ?device.id, "Found active device");
                return device.id.clone();
            }
            tracing::debug!(available_devices = devices.len(), "No active device found");
            None
        } else {
            tracing::debug!("Failed to get devices list");
            None
        }
    }

    pub async fn play(&self) -> Result<()> {
        let device_id = self.get_device_id().await;
        tracing::debug!(device_id = ?device_id, "API: resume_playback");
        self.client
            .resume_playback(device_id.as_deref(), None)
            .await?;
        Ok(())
    }

    pub async fn pause(&self) -> Result<()> {
        let device_id = self.get_device_id().await;
        tracing::debug!(device_id = ?device_id, "API: pause_playback");
        self.client.pause_playback(device_id.as_deref()).await?;
        Ok(())
    }

    pub async fn next_track(&self) -> Result<()> {
        let device_id = self.get_device_id().await;
        tracing::debug!(device_id = ?device_id, "API: next_track");
        self.client.next_track(device_id.as_deref()).await?;
        Ok(())
    }

    pub async fn previous_track(&self) -> Result<()> {
        let device_id = self.get_device_id().await;
        tracing::debug!(device_id = ?device_id, "API: previous_track");
        self.client.previous_track(device_id.as_deref()).await?;
        Ok(())
    }

    pub async fn seek_to(&self, position_ms: u32) -> Result<()> {
        let device_id = self.get_device_id().await;
        tracing::debug!(position_ms, device_id = ?device_id, "API: seek_track");
        self.client
            .seek_track(
                chrono::Duration::milliseconds(position_ms as i64),
                device_id.as_deref(),
            )
            .await?;
        Ok(())
    }

    pub async fn set_shuffle(&self, state: bool) -> Result<()> {
        let device_id = self.get_device_id().await;
        tracing::debug!(state, device_id = ?device_id, "API: set_shuffle");
        self.client.shuffle(state, device_id.as_deref()).await?;
        Ok(())
    }

    pub async fn set_repeat(&self, state: RepeatState) -> Result<()> {
        let device_id = self.get_device_id().await;
        tracing::debug!(state = ?state, device_id = ?device_id, "API: set_repeat");
        let repeat_state = match state {
            RepeatState::Off => rspotify::model::RepeatState::Off,
            RepeatState::All => rspotify::model::RepeatState::Context,
            RepeatState::One => rspotify::model::RepeatState::Track,
        };
        self.client.repeat(repeat_state, device_id.as_deref()).await?;
        Ok(())
    }

    /// Fetch the play queue: the currently playing track plus the
    /// upcoming entries, in order
    pub async fn get_queue(&self) -> Result<(Option<QueueTrack>, Vec<QueueTrack>)> {
        let queue_result = self.client.current_user_queue().await?;

        let currently_playing = match queue_result.currently_playing {
            Some(item) => self.queue_track_from_item(item).await,
            None => None,
        };

        let mut queue_tracks = Vec::new();
        for item in queue_result.queue {
            if let Some(track) = self.queue_track_from_item(item).await {
                queue_tracks.push(track);
            }
        }

        tracing::debug!(upcoming = queue_tracks.len(), "Fetched play queue");
        Ok((currently_playing, queue_tracks))
    }

    async fn queue_track_from_item(&self, item: PlayableItem) -> Option<QueueTrack> {
        if let PlayableItem::Track(track) = item {
            let track_id = track.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default();
            if track_id.is_empty() {
                return None;
            }
            Some(QueueTrack {
                uri: format!("spotify:track:{}", track_id),
                liked: self.liked_songs_cache.is_liked(&track_id).await,
                id: track_id,
                name: track.name.clone(),
                artist: track.artists.first().map(|a| a.name.clone()).unwrap_or_default(),
                album: track.album.name.clone(),
                duration_ms: track.duration.num_milliseconds() as u32,
            })
        } else {
            None
        }
    }

    /// Jump playback to a specific queue entry. The Web API has no
    /// seek-to-queue-index, so the entry is started directly by URI.
    pub async fn play_track(&self, uri: &str) -> Result<()> {
        let device_id = self.get_device_id().await;
        tracing::debug!(uri, device_id = ?device_id, "API: play_track");

        // Extract track ID from URI (format: spotify:track:ID)
        let track_id = uri.split(':').next_back().unwrap_or(uri);

        self.client
            .start_uris_playback(
                [PlayableId::Track(TrackId::from_id(track_id)?)],
                device_id.as_deref(),
                None,
                None,
            )
            .await?;
        Ok(())
    }
}
