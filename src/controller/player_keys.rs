//! Now-playing screen D-pad handling
//!
//! Every D-pad press on the player screen goes through the gesture
//! arbiter; the actions it emits (immediately or when a timer
//! matures) are dispatched to the player connection here.

use std::time::Instant;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::model::{HoldDirection, PlayerAction};
use super::AppController;

impl AppController {
    pub(crate) async fn handle_player_key(&self, key: KeyEvent, now: Instant) -> Result<()> {
        let model = self.model.lock().await;

        let action = match key.code {
            KeyCode::Enter => Some(model.gesture_press_center().await),
            KeyCode::Up => model.gesture_press_up(now).await,
            KeyCode::Down => model.gesture_press_down(now).await,
            KeyCode::Left => {
                model
                    .gesture_press_horizontal(HoldDirection::Left, now)
                    .await
            }
            KeyCode::Right => {
                model
                    .gesture_press_horizontal(HoldDirection::Right, now)
                    .await
            }
            KeyCode::Esc | KeyCode::Backspace => {
                drop(model);
                return self.handle_back().await;
            }
            _ => None,
        };
        drop(model);

        if let Some(action) = action {
            self.dispatch_player_action(action).await;
        }
        Ok(())
    }

    /// Mature pending gesture timers. Called once per event-loop
    /// iteration while the player screen is on display; both presses
    /// and maturation run on that loop, so a second press always wins
    /// over its timer.
    pub async fn tick_gestures(&self, now: Instant) {
        let model = self.model.lock().await;

        if model.current_route().await != crate::model::Route::NowPlaying
            || model.is_queue_overlay_open().await
        {
            return;
        }

        let due = model.tick_gestures(now).await;
        drop(model);

        for action in due {
            self.dispatch_player_action(action).await;
        }
    }

    pub(crate) async fn dispatch_player_action(&self, action: PlayerAction) {
        tracing::debug!(action = ?action, "Dispatching player action");
        match action {
            PlayerAction::TogglePlayback => self.toggle_playback().await,
            PlayerAction::SeekRelative(delta_ms) => self.seek_relative(delta_ms).await,
            PlayerAction::SkipPrevious => self.previous_track().await,
            PlayerAction::SkipNext => self.next_track().await,
            PlayerAction::OpenQueue => self.open_queue_over_player().await,
            PlayerAction::ToggleLike => self.toggle_like_current().await,
            PlayerAction::ToggleShuffle => self.toggle_shuffle().await,
            PlayerAction::CycleRepeat => self.cycle_repeat().await,
        }
    }
}
