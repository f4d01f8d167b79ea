//! Top-level key event routing
//!
//! The shell is D-pad-only: arrows, Enter (center), Esc/Backspace
//! (back) and the media keys carry the whole interaction model.
//! Dispatch order is overlays first (error, help, queue overlay),
//! then the pane that owns focus (rail or content), then globals.

use std::time::Instant;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MediaKeyCode};

use crate::model::{FocusPane, Route};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        let now = Instant::now();

        // Key releases only matter to the hold-to-skip gesture
        if key.kind == KeyEventKind::Release {
            self.handle_key_release(key).await;
            return Ok(());
        }
        // Key repeat is ignored; held keys are tracked by press/release
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_error().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Global keybindings that work everywhere
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
                return Ok(());
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
                return Ok(());
            }
            KeyCode::Media(MediaKeyCode::PlayPause)
            | KeyCode::Media(MediaKeyCode::Play)
            | KeyCode::Media(MediaKeyCode::Pause) => {
                drop(model);
                self.toggle_playback().await;
                return Ok(());
            }
            _ => {}
        }

        // The queue overlay captures the D-pad while open
        if model.is_queue_overlay_open().await {
            drop(model);
            return self.handle_queue_key(key).await;
        }

        if model.focus_pane().await == FocusPane::Rail {
            drop(model);
            return self.handle_rail_key(key).await;
        }

        let route = model.current_route().await;
        drop(model);

        match route {
            Route::NowPlaying => self.handle_player_key(key, now).await,
            Route::Queue => self.handle_queue_key(key).await,
            Route::Account => self.handle_account_key(key).await,
            // Inherited screens: only Back does anything
            Route::Integrations | Route::Settings => match key.code {
                KeyCode::Esc | KeyCode::Backspace => self.handle_back().await,
                _ => Ok(()),
            },
        }
    }

    async fn handle_key_release(&self, key: KeyEvent) {
        use crate::model::HoldDirection;

        let model = self.model.lock().await;
        match key.code {
            KeyCode::Left => model.gesture_release_horizontal(HoldDirection::Left).await,
            KeyCode::Right => model.gesture_release_horizontal(HoldDirection::Right).await,
            _ => {}
        }
    }

    async fn handle_rail_key(&self, key: KeyEvent) -> Result<()> {
        let model = self.model.lock().await;
        match key.code {
            KeyCode::Up => {
                model.rail_move_up().await;
            }
            KeyCode::Down => {
                model.rail_move_down().await;
            }
            KeyCode::Enter | KeyCode::Right => {
                let route = model.rail_selected_route().await;
                model.activate_rail_route(route).await;
                if route == Route::Queue {
                    drop(model);
                    self.show_queue_screen().await;
                }
            }
            KeyCode::Esc | KeyCode::Backspace => {
                // Backing out of the rail leaves the shell
                model.set_should_quit(true).await;
            }
            _ => {}
        }
        Ok(())
    }

    /// Shared back behavior: drag exit and overlay close are handled
    /// by the screen handlers before this is reached. Pops one route,
    /// then retreats to the rail, then quits.
    pub(crate) async fn handle_back(&self) -> Result<()> {
        let model = self.model.lock().await;
        if model.pop_route().await {
            return Ok(());
        }
        if model.focus_pane().await == FocusPane::Content {
            // Minimizing the screen discards its pending gestures
            model.set_focus_pane(FocusPane::Rail).await;
            model.reset_gestures().await;
            return Ok(());
        }
        model.set_should_quit(true).await;
        Ok(())
    }
}
