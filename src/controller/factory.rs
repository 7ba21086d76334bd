//! State-holder factory

use std::sync::Arc;

use crate::error::FactoryError;
use crate::model::{Route, TrackStore};

use super::home::HomeState;
use super::playback::PlaybackController;
use super::song_info::SongInfoState;

/// A screen's state holder
#[derive(Clone)]
pub enum StateHolder {
    Home(HomeState),
    SongInfo(SongInfoState),
}

/// Builds the state holders once and hands out the shared instance per route.
#[derive(Clone)]
pub struct StateHolderFactory {
    home: HomeState,
    song_info: SongInfoState,
}

impl StateHolderFactory {
    pub fn new(store: TrackStore, player: Arc<PlaybackController>) -> Self {
        Self {
            home: HomeState::new(store),
            song_info: SongInfoState::new(player),
        }
    }

    pub fn home(&self) -> HomeState {
        self.home.clone()
    }

    pub fn song_info(&self) -> SongInfoState {
        self.song_info.clone()
    }

    pub fn for_route(&self, route: &Route) -> StateHolder {
        match route {
            Route::Home => StateHolder::Home(self.home()),
            Route::SongInfo { .. } => StateHolder::SongInfo(self.song_info()),
        }
    }

    /// Resolve a route string, failing for anything the navigation graph lacks
    pub fn create(&self, route: &str) -> Result<StateHolder, FactoryError> {
        let route: Route = route.parse()?;
        Ok(self.for_route(&route))
    }
}
