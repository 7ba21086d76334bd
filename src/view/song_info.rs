//! Song-info screen rendering

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{PlaybackState, Track};
use super::utils::format_duration;

pub fn detail_lines(track: &Track, playback: &PlaybackState) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let released = track
        .release_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    let cover = if track.has_cover() { track.cover_url.clone() } else { "No artwork".to_string() };
    let state = if playback.is_playing { "Playing" } else { "Paused" };

    vec![
        Line::from(Span::styled(
            track.title.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(track.artist.name.clone()),
        Line::from(""),
        Line::from(vec![Span::styled("Album     ", label), Span::raw(track.album_name().to_string())]),
        Line::from(vec![Span::styled("Released  ", label), Span::raw(released)]),
        Line::from(vec![Span::styled("Length    ", label), Span::raw(format_duration(track.duration_ms))]),
        Line::from(vec![Span::styled("Artwork   ", label), Span::raw(cover)]),
        Line::from(""),
        Line::from(Span::styled(state, Style::default().fg(Color::Cyan))),
    ]
}

pub fn render_song_info(frame: &mut Frame, area: Rect, track: Option<&Track>, playback: &PlaybackState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Now Playing (Esc to go back) ")
        .padding(Padding::uniform(1))
        .border_style(Style::default().fg(Color::Green));

    let paragraph = match track {
        Some(track) => Paragraph::new(detail_lines(track, playback)),
        None => Paragraph::new("Loading track...").style(Style::default().fg(Color::Yellow)),
    };

    frame.render_widget(paragraph.alignment(Alignment::Center).block(block), area);
}
