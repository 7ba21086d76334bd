//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, Mood, Route};
use super::AppController;

pub const SEEK_STEP_MS: i64 = 10_000;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Ctrl+Q quits from anywhere, including while typing
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.ui.lock().await.should_quit = true;
            return Ok(());
        }

        // Error banners swallow the next Esc/Enter
        let has_status = self.ui.lock().await.status_message.is_some();
        let has_error = has_status || self.home().snapshot().error_message.is_some();
        if has_error && matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            self.clear_status().await;
            self.home().clear_error();
            return Ok(());
        }

        let ui_state = self.ui_state().await;

        if let Route::SongInfo { .. } = ui_state.route {
            return self.handle_song_info_key(key).await;
        }

        // Handle search input when in search section
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab => {
                    self.cycle_section(key.modifiers.contains(KeyModifiers::SHIFT)).await;
                    return Ok(());
                }
                KeyCode::BackTab => {
                    self.cycle_section(true).await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    self.perform_search().await;
                    return Ok(());
                }
                KeyCode::Esc => {
                    self.home().update_query(String::new());
                    return Ok(());
                }
                KeyCode::Backspace => {
                    self.home().pop_query_char();
                    return Ok(());
                }
                KeyCode::Char(c) => {
                    self.home().push_query_char(c);
                    return Ok(());
                }
                _ => {}
            }
        }

        // Global keybindings
        match key.code {
            KeyCode::Tab => {
                self.cycle_section(key.modifiers.contains(KeyModifiers::SHIFT)).await;
            }
            KeyCode::BackTab => {
                self.cycle_section(true).await;
            }
            KeyCode::Up => {
                self.ui.lock().await.move_up();
            }
            KeyCode::Down => {
                let len = self.focused_len(ui_state.active_section);
                self.ui.lock().await.move_down(len);
            }
            KeyCode::Enter => match ui_state.active_section {
                ActiveSection::Moods => self.load_selected_mood().await,
                ActiveSection::Playlists => self.open_selected_playlist().await,
                ActiveSection::Results => self.open_selected_result().await,
                ActiveSection::Search => {}
            },
            KeyCode::Esc => {
                self.ui.lock().await.active_section = ActiveSection::Search;
            }
            KeyCode::Char('/') => {
                self.ui.lock().await.active_section = ActiveSection::Search;
            }
            _ => self.handle_player_key(key).await,
        }
        Ok(())
    }

    async fn handle_song_info_key(&self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.navigate_back().await,
            _ => self.handle_player_key(key).await,
        }
        Ok(())
    }

    /// Player keys shared by both screens
    async fn handle_player_key(&self, key: KeyEvent) {
        match key.code {
            // Play/Pause toggle
            KeyCode::Char(' ') => self.toggle_playback().await,
            KeyCode::Char('s') | KeyCode::Char('S') => self.stop_playback().await,
            KeyCode::Left => self.seek_relative(-SEEK_STEP_MS).await,
            KeyCode::Right => self.seek_relative(SEEK_STEP_MS).await,
            _ => {}
        }
    }

    async fn cycle_section(&self, backward: bool) {
        let mut ui = self.ui.lock().await;
        ui.active_section = if backward {
            ui.active_section.prev()
        } else {
            ui.active_section.next()
        };
    }

    fn focused_len(&self, section: ActiveSection) -> usize {
        match section {
            ActiveSection::Moods => Mood::presets().len(),
            ActiveSection::Playlists => self.home().playlists().len(),
            ActiveSection::Results => self.home().snapshot().results.len(),
            ActiveSection::Search => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyEventState;

    use crate::audio::fake::FakePlayer;
    use super::super::tests::controller_with;
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn typing_edits_the_query() {
        let controller = controller_with(Arc::new(FakePlayer::default()));

        for c in "lofix".chars() {
            controller.handle_key_event(press(KeyCode::Char(c))).await.unwrap();
        }
        controller.handle_key_event(press(KeyCode::Backspace)).await.unwrap();

        assert_eq!(controller.home().snapshot().query, "lofi");
    }

    #[tokio::test]
    async fn release_events_are_ignored() {
        let controller = controller_with(Arc::new(FakePlayer::default()));
        let mut key = press(KeyCode::Char('a'));
        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;

        controller.handle_key_event(key).await.unwrap();

        assert!(controller.home().snapshot().query.is_empty());
    }

    #[tokio::test]
    async fn tab_cycles_sections() {
        let controller = controller_with(Arc::new(FakePlayer::default()));

        controller.handle_key_event(press(KeyCode::Tab)).await.unwrap();
        assert_eq!(controller.ui_state().await.active_section, ActiveSection::Moods);

        controller.handle_key_event(press(KeyCode::BackTab)).await.unwrap();
        assert_eq!(controller.ui_state().await.active_section, ActiveSection::Search);
    }

    #[tokio::test]
    async fn mood_selection_is_bounded() {
        let controller = controller_with(Arc::new(FakePlayer::default()));
        controller.handle_key_event(press(KeyCode::Tab)).await.unwrap();

        for _ in 0..20 {
            controller.handle_key_event(press(KeyCode::Down)).await.unwrap();
        }

        assert_eq!(controller.ui_state().await.mood_selected, Mood::presets().len() - 1);
    }

    #[tokio::test]
    async fn ctrl_q_quits_while_typing() {
        let controller = controller_with(Arc::new(FakePlayer::default()));

        controller
            .handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL))
            .await
            .unwrap();

        assert!(controller.should_quit().await);
        assert!(controller.home().snapshot().query.is_empty());
    }
}
