//! Queue screen multi-zone focus handling
//!
//! Arrow keys move the (row, zone) focus pair, or the row itself in
//! drag mode; Enter acts on the focused zone. The focus model lives
//! in the model layer; this handler only forwards its requests to
//! the player connection.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::model::QueueRequest;
use super::AppController;

impl AppController {
    pub(crate) async fn handle_queue_key(&self, key: KeyEvent) -> Result<()> {
        let model = self.model.lock().await;

        let request = match key.code {
            KeyCode::Up => model.queue_up().await,
            KeyCode::Down => model.queue_down().await,
            KeyCode::Left => {
                model.queue_left().await;
                None
            }
            KeyCode::Right => {
                model.queue_right().await;
                None
            }
            KeyCode::Enter => model.queue_activate().await,
            KeyCode::Esc | KeyCode::Backspace => {
                // Drag exit wins over closing the view
                if model.queue_back().await {
                    return Ok(());
                }
                if model.close_queue_overlay().await {
                    return Ok(());
                }
                drop(model);
                return self.handle_back().await;
            }
            _ => None,
        };
        drop(model);

        if let Some(request) = request {
            self.handle_queue_request(request).await;
        }
        Ok(())
    }

    async fn handle_queue_request(&self, request: QueueRequest) {
        match request {
            QueueRequest::Play(row) => self.play_queue_row(row).await,
            QueueRequest::Remove(row) => self.remove_queue_row(row).await,
            QueueRequest::Move { from, to } => {
                // The Web API cannot reorder the queue; the visible
                // snapshot is the collaborator's view to mutate
                tracing::info!(from, to, "Reordering queue view");
                let model = self.model.lock().await;
                model.move_queue_row(from, to).await;
            }
        }
    }
}
