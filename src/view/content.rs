//! Main content area rendering (track results)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, SearchState, Track, UiState};
use super::utils::{border_style, calculate_num_width, format_duration, render_scrollable_list, truncate_string};

const EMPTY_HINT: &str = "Type in search and press Enter to find music\n\nUse Tab to navigate between sections\nUse ↑/↓ to select items\nPress Enter to open";

pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    search: &SearchState,
    current_track_id: Option<&str>,
) {
    let is_focused = ui_state.active_section == ActiveSection::Results;
    let title = format!(" Tracks ({}) ", search.results.len());

    if search.is_loading && search.results.is_empty() {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border_style(is_focused)),
            );
        frame.render_widget(loading, area);
        return;
    }

    if search.results.is_empty() {
        let content = Paragraph::new(EMPTY_HINT)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .padding(Padding::horizontal(1))
                    .border_style(border_style(is_focused)),
            );
        frame.render_widget(content, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let items = track_items(
        &search.results,
        ui_state.result_selected,
        is_focused,
        current_track_id,
        content_width,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    // +1 for header row
    render_scrollable_list(frame, area, items, ui_state.result_selected + 1, block);
}

fn track_items(
    tracks: &[Track],
    selected: usize,
    is_focused: bool,
    current_track_id: Option<&str>,
    content_width: usize,
) -> Vec<ListItem<'static>> {
    let num_width = calculate_num_width(tracks.len());
    let duration_width = 8;
    let fixed_width = 1 + num_width + 3 + 3 + 3 + duration_width;
    let remaining_width = content_width.saturating_sub(fixed_width);
    let title_width = (remaining_width * 55) / 100;
    let artist_width = remaining_width.saturating_sub(title_width);

    let mut items = vec![
        ListItem::new(format!(
            " {:<num_width$}   {:<title_width$}   {:<artist_width$}   {}",
            "#", "Title", "Artist", "Duration",
        ))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    ];

    items.extend(tracks.iter().enumerate().map(|(i, track)| {
        let is_playing = current_track_id == Some(track.id.as_str());
        let style = if i == selected && is_focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if is_playing {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if i == selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let playing_indicator = if is_playing { "▶" } else { " " };
        let track_num = format!("{}{:<num_width$}", playing_indicator, i + 1);

        ListItem::new(format!(
            "{}   {}   {}   {}",
            track_num,
            truncate_string(&track.title, title_width),
            truncate_string(&track.artist.name, artist_width),
            format_duration(track.duration_ms),
        ))
        .style(style)
    }));

    items
}
