//! Layout rendering (navigation rail, bottom now-playing strip)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, List, ListItem, Padding},
    Frame,
};

use crate::model::{FocusPane, PlaybackInfo, RepeatState, UiState, RAIL_ROUTES};
use super::utils::format_duration;

pub fn render_rail(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let rail_focused = ui_state.focus_pane == FocusPane::Rail;
    let current = ui_state.current_route();

    let items: Vec<ListItem> = RAIL_ROUTES
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let style = if i == ui_state.rail_selected && rail_focused {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if *route == current {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(route.title()).style(style)
        })
        .collect();

    let border_style = if rail_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let rail = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Menu ")
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );
    frame.render_widget(rail, area);
}

pub fn render_strip(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let status_text = if playback.track.name == "No track playing" {
        " No track playing".to_string()
    } else if playback.is_playing {
        format!(
            " ▶ {} | {} ({})",
            playback.track.name, playback.track.artist, playback.track.album
        )
    } else {
        format!(
            "⏸  {} | {} ({})",
            playback.track.name, playback.track.artist, playback.track.album
        )
    };

    let shuffle_text = if playback.settings.shuffle { "Shuffle: On" } else { "Shuffle: Off" };
    let repeat_text = match playback.settings.repeat {
        RepeatState::Off => "Repeat: Off",
        RepeatState::All => "Repeat: All",
        RepeatState::One => "Repeat: One",
    };
    let liked_text = if playback.settings.liked { "♥" } else { "♡" };

    let time_str = format!(
        "{} / {}",
        format_duration(playback.progress_ms),
        format_duration(playback.duration_ms)
    );

    let progress_ratio = if playback.duration_ms > 0 {
        (playback.progress_ms as f64 / playback.duration_ms as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let title = format!("{} ", status_text);
    let controls_info = format!(" {} | {} | {} ", liked_text, shuffle_text, repeat_text);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress_ratio)
        .label(time_str);

    frame.render_widget(gauge, area);
}
