//! Full-screen now-playing rendering
//!
//! Big track info, the progress gauge, and (while Left/Right is
//! held) a second gauge filling toward the skip threshold.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
    Frame,
};

use crate::model::{HoldDirection, PlaybackInfo, RepeatState};
use super::utils::format_duration;

pub fn render_player(
    frame: &mut Frame,
    area: Rect,
    playback: &PlaybackInfo,
    hold: Option<(HoldDirection, f64)>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(7),    // Track info
            Constraint::Length(3), // Progress
            Constraint::Length(3), // Hold-to-skip gauge
            Constraint::Length(1), // D-pad hint
        ])
        .split(area);

    render_track_info(frame, chunks[0], playback);
    render_progress(frame, chunks[1], playback);
    render_hold_gauge(frame, chunks[2], hold);

    let hint = Paragraph::new(
        " ↑↑ like   ↑ queue   ↓↓ repeat   ↓ shuffle   ←/→ seek (hold to skip)   ⏎ play/pause",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, chunks[3]);
}

fn render_track_info(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let state_icon = if playback.is_playing { "▶" } else { "⏸" };
    let liked_icon = if playback.settings.liked { "♥" } else { "♡" };
    let shuffle_text = if playback.settings.shuffle { "🔀 on" } else { "🔀 off" };
    let repeat_text = match playback.settings.repeat {
        RepeatState::Off => "🔁 off",
        RepeatState::All => "🔁 all",
        RepeatState::One => "🔂 one",
    };

    let artists = if playback.track.artists.is_empty() {
        playback.track.artist.clone()
    } else {
        playback.track.artists.join(", ")
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} {}", state_icon, playback.track.name),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(artists, Style::default().fg(Color::White))),
        Line::from(Span::styled(
            playback.track.album.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(liked_icon, Style::default().fg(Color::Red)),
            Span::raw("   "),
            Span::styled(shuffle_text, Style::default().fg(Color::Cyan)),
            Span::raw("   "),
            Span::styled(repeat_text, Style::default().fg(Color::Cyan)),
        ]),
    ];

    if !playback.settings.device_name.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("on {}", playback.settings.device_name),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let info = Paragraph::new(lines).centered().block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Now Playing ")
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(info, area);
}

fn render_progress(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let progress_ratio = if playback.duration_ms > 0 {
        (playback.progress_ms as f64 / playback.duration_ms as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let time_str = format!(
        "{} / {}",
        format_duration(playback.progress_ms),
        format_duration(playback.duration_ms)
    );

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress_ratio)
        .label(time_str);
    frame.render_widget(gauge, area);
}

fn render_hold_gauge(frame: &mut Frame, area: Rect, hold: Option<(HoldDirection, f64)>) {
    let Some((direction, ratio)) = hold else {
        return;
    };

    let label = match direction {
        HoldDirection::Left => "Hold for previous track",
        HoldDirection::Right => "Hold for next track",
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, area);
}
