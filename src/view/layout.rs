//! Layout rendering (top bar, sidebar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, Mood, Playlist, SearchState, UiState};
use super::utils::{border_style, item_style, render_scrollable_list};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, search: &SearchState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(14), // Loading indicator
        ])
        .split(area);

    let is_focused = ui_state.active_section == ActiveSection::Search;
    let search_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if search.query.is_empty() {
        "Type to search..."
    } else {
        &search.query
    };

    let search_box = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(border_style(is_focused)),
        );
    frame.render_widget(search_box, chunks[0]);

    let (status, color) = if search.is_loading {
        ("Loading...", Color::Yellow)
    } else {
        ("Ready", Color::Cyan)
    };
    let indicator = Paragraph::new(status)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title(" Jamendo "));
    frame.render_widget(indicator, chunks[1]);
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, ui_state: &UiState, playlists: &[Playlist]) {
    let moods = Mood::presets();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(moods.len() as u16 + 2), // Moods + borders
            Constraint::Min(0),                         // Playlists (fills remaining space)
        ])
        .split(area);

    let moods_focused = ui_state.active_section == ActiveSection::Moods;
    let mood_items: Vec<ListItem> = moods
        .iter()
        .enumerate()
        .map(|(i, mood)| {
            ListItem::new(mood.name).style(item_style(i == ui_state.mood_selected, moods_focused))
        })
        .collect();

    let mood_list = List::new(mood_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Moods ")
            .padding(Padding::horizontal(1))
            .border_style(border_style(moods_focused)),
    );
    frame.render_widget(mood_list, chunks[0]);

    let playlists_focused = ui_state.active_section == ActiveSection::Playlists;
    let playlist_items: Vec<ListItem> = playlists
        .iter()
        .enumerate()
        .map(|(i, playlist)| {
            ListItem::new(playlist.name.clone())
                .style(item_style(i == ui_state.playlist_selected, playlists_focused))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Playlists ")
        .padding(Padding::horizontal(1))
        .border_style(border_style(playlists_focused));

    render_scrollable_list(frame, chunks[1], playlist_items, ui_state.playlist_selected, block);
}
