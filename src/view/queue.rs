//! Queue screen rendering
//!
//! One list row per queue entry, each carrying its three focus
//! zones: the track itself, the drag handle, and the remove button.
//! The focused zone of the focused row is the only highlighted
//! element; a dragged row is marked across its whole width.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

use crate::model::{FocusZone, QueueState};
use super::utils::{format_duration, truncate_string};

pub fn render_queue(frame: &mut Frame, area: Rect, queue: &QueueState, title: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .padding(Padding::horizontal(1));

    if queue.loading {
        let loading = Paragraph::new("Loading queue...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    if queue.is_empty() {
        let empty = Paragraph::new("Queue is empty")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    // Width left for the title/artist cell after marker, handle,
    // remove and duration cells
    let content_width = (area.width as usize).saturating_sub(24);

    let items: Vec<ListItem> = queue
        .tracks
        .iter()
        .enumerate()
        .map(|(row, track)| {
            let focused_row = row == queue.nav.row;
            let dragging = queue.nav.is_dragging_row(row);
            let is_current = queue.is_current_row(row);

            let marker = if is_current { "▶ " } else { "  " };
            let text = truncate_string(
                &format!("{} — {}", track.name, track.artist),
                content_width,
            );
            let liked = if track.liked { "♥" } else { " " };
            let duration = format_duration(track.duration_ms);

            let zone_style = |zone: FocusZone| {
                if dragging && zone == FocusZone::DragHandle {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else if focused_row && queue.nav.zone == zone && !dragging {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else if is_current && zone == FocusZone::Content {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::White)
                }
            };

            let row_style = if dragging {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            let handle = if dragging { " ↕ " } else { " ≡ " };

            let line = Line::from(vec![
                Span::raw(marker),
                Span::styled(text, zone_style(FocusZone::Content)),
                Span::raw("  "),
                Span::styled(handle, zone_style(FocusZone::DragHandle)),
                Span::raw(" "),
                Span::styled(" ✕ ", zone_style(FocusZone::Remove)),
                Span::raw("  "),
                Span::styled(liked, Style::default().fg(Color::Red)),
                Span::raw(" "),
                Span::styled(duration, Style::default().fg(Color::DarkGray)),
            ]);

            ListItem::new(line).style(row_style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by span styles

    // Selection drives scrolling so the focused row stays visible
    let mut list_state = ListState::default();
    list_state.select(Some(queue.nav.row));

    frame.render_stateful_widget(list, area, &mut list_state);
}
