//! Account/settings menu rendering
//!
//! Every row is part of the same focus-traversable list; the menu
//! never renders an element that Up/Down cannot reach.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{AccountRow, Route, UiState};
use super::utils::render_scrollable_list;

pub fn render_account(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let session = &ui_state.session;

    let items: Vec<ListItem> = AccountRow::ALL
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let label = match row {
                AccountRow::Session => {
                    if session.signed_in {
                        format!("{}  (Enter to log out)", session.display_name)
                    } else {
                        "Sign in".to_string()
                    }
                }
                AccountRow::Sync => {
                    if ui_state.sync_enabled {
                        "Library sync: On".to_string()
                    } else {
                        "Library sync: Off".to_string()
                    }
                }
                AccountRow::Integrations => "Integrations".to_string(),
                AccountRow::Settings => "Settings".to_string(),
            };

            let style = if i == ui_state.account_selected {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(label).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Account ")
        .padding(Padding::horizontal(1));

    render_scrollable_list(frame, area, items, ui_state.account_selected, block);
}

/// Placeholder panels for the screens inherited from the main app
pub fn render_inherited_screen(frame: &mut Frame, area: Rect, route: Route) {
    let text = match route {
        Route::Integrations => "Connected integrations are managed in the main app.",
        Route::Settings => "Playback and appearance settings are managed in the main app.",
        _ => "",
    };

    let panel = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", route.title()))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(panel, area);
}
