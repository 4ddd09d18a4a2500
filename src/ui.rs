//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, SessionPhase};
use crate::config::UiSettings;
use crate::speech::render_announcement;

fn controls_text() -> String {
    [
        "[j/k] up/down",
        "[gg/G] top/bottom",
        "[enter] announce track",
        "[p] start session",
        "[s] stop",
        "[space] pause",
        "[K] metadata",
        "[q] quit",
    ]
    .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Format an optional duration, rounding up partial seconds.
fn format_duration_mmss_ceil(d: Option<Duration>) -> String {
    let Some(d) = d else {
        return "-".to_string();
    };

    let mut total_secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        total_secs = total_secs.saturating_add(1);
    }

    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" jockey ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        let phase_text = match app.phase {
            SessionPhase::Stopped => "Stopped".to_string(),
            SessionPhase::Announcing => {
                // Show what is being said while it is being said.
                match app.announcing.and_then(|i| app.tracks.get(i)) {
                    Some(track) => format!("Announcing: {}", render_announcement(track)),
                    None => "Announcing".to_string(),
                }
            }
            SessionPhase::Playing => "Playing".to_string(),
            SessionPhase::Paused => "Paused".to_string(),
        };
        parts.push(phase_text);

        if let Some(ref h) = app.playback_handle {
            if let Ok(info) = h.lock() {
                if let Some(idx) = info.index {
                    if let Some(track) = app.tracks.get(idx) {
                        let total = track
                            .duration
                            .map(|d| format!(" / {}", format_mmss(d)))
                            .unwrap_or_default();
                        parts.push(format!(
                            "Song: {} [{}{}]",
                            track.display,
                            format_mmss(info.elapsed),
                            total
                        ));
                    }
                }
                if let Some(n) = &info.notice {
                    parts.push(format!("!) {n}"));
                }
            }
        }

        if let Some(n) = &app.notice {
            parts.push(format!("!) {n}"));
        }

        if app.follow_playback {
            parts.push("CURSOR: Follow".to_string());
        } else {
            parts.push("CURSOR: Free-roam".to_string());
        }

        if let Some(dir) = &app.current_dir {
            parts.push(format!("Dir: {}", dir));
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Track list: window the visible slice around the selection so long
    // catalogs do not allocate one ListItem per track.
    {
        let total = app.tracks.len();
        let list_height = chunks[2].height as usize;
        let sel_pos = app.selected.min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = app.tracks[start..end]
            .iter()
            .map(|t| ListItem::new(t.display.as_str()))
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Overlay metadata popup (keeps list visible under it)
    if app.metadata_window {
        let list_area = chunks[2];
        let popup_area = centered_rect_sized(72, 9, list_area);
        frame.render_widget(Clear, popup_area);

        let track = app.tracks.get(app.selected);
        let meta = if let Some(track) = track {
            format!(
                "Title: {}\nArtist: {}\nAlbum: {}\nDuration: {}\nAnnounced as: {}\nPath: {}",
                track.title,
                track.artist.as_deref().unwrap_or("-"),
                track.album.as_deref().unwrap_or("-"),
                format_duration_mmss_ceil(track.duration),
                render_announcement(track),
                track.path.display()
            )
        } else {
            "No track selected".to_string()
        };
        let meta_paragraph = Paragraph::new(meta)
            .block(
                Block::default()
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    })
                    .borders(Borders::ALL)
                    .title(" metadata (K closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(meta_paragraph, popup_area);
    }

    let footer = Paragraph::new(controls_text()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" controls ")
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(footer, chunks[3]);
}
