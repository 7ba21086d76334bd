//! Progress bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::{PlaybackState, Track};
use super::utils::format_duration;

const CONTROLS_HINT: &str = " Space play/pause | ←/→ seek | s stop ";

pub fn now_playing_title(playback: &PlaybackState, track: Option<&Track>) -> String {
    match track {
        None => " No track playing".to_string(),
        Some(track) => {
            let icon = if playback.is_playing { " ▶" } else { "⏸ " };
            format!("{} {} | {} ({}) ", icon, track.title, track.artist.name, track.album_name())
        }
    }
}

pub fn render_progress_bar(
    frame: &mut Frame,
    area: Rect,
    playback: &PlaybackState,
    track: Option<&Track>,
) {
    let time_str = format!(
        "{} / {}",
        format_duration(playback.position_ms),
        format_duration(playback.duration_ms)
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(now_playing_title(playback, track))
                .title_bottom(Line::from(CONTROLS_HINT).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(playback.progress_ratio())
        .label(time_str);

    frame.render_widget(gauge, area);
}
