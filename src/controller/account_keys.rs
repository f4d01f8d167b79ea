//! Account/settings menu handling
//!
//! A plain vertical list: every row is focusable by Up/Down alone
//! and actioned with Enter. There is no pointer path to any row.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::model::{AccountRow, FocusPane, Route, SessionInfo};
use super::AppController;

impl AppController {
    pub(crate) async fn handle_account_key(&self, key: KeyEvent) -> Result<()> {
        let model = self.model.lock().await;

        match key.code {
            KeyCode::Up => {
                model.account_move_up().await;
            }
            KeyCode::Down => {
                model.account_move_down().await;
            }
            KeyCode::Left => {
                model.set_focus_pane(FocusPane::Rail).await;
            }
            KeyCode::Enter => {
                let row = model.selected_account_row().await;
                drop(model);
                self.activate_account_row(row).await;
            }
            KeyCode::Esc | KeyCode::Backspace => {
                drop(model);
                return self.handle_back().await;
            }
            _ => {}
        }
        Ok(())
    }

    async fn activate_account_row(&self, row: AccountRow) {
        let model = self.model.lock().await;
        match row {
            AccountRow::Session => {
                let session = model.get_ui_state().await.session;
                if session.signed_in {
                    tracing::info!(user = %session.display_name, "Logging out");
                    if let Err(e) = crate::auth::clear_session() {
                        tracing::warn!(error = %e, "Could not remove cached session");
                    }
                    model.set_session(SessionInfo::default()).await;
                } else {
                    // The OAuth flow needs the raw terminal; it only
                    // runs before the TUI starts
                    model
                        .set_error("Sign-in runs at startup. Quit and relaunch to sign in.".to_string())
                        .await;
                }
            }
            AccountRow::Sync => {
                let enabled = model.toggle_sync().await;
                tracing::info!(enabled, "Library sync toggled");
            }
            AccountRow::Integrations => {
                model.push_route(Route::Integrations).await;
            }
            AccountRow::Settings => {
                model.push_route(Route::Settings).await;
            }
        }
    }
}
