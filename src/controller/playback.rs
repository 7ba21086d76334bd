//! Playback controller: Idle / Playing / Paused over a [`MediaPlayer`],
//! with a cancellable position sampler.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::audio::MediaPlayer;
use crate::error::PlayerError;
use crate::model::{PlaybackState, PlayerStatus, Track};

#[derive(Default)]
struct Session {
    status: PlayerStatus,
    url: Option<String>,
    sampler: Option<CancellationToken>,
    released: bool,
}

impl Session {
    fn cancel_sampler(&mut self) {
        if let Some(token) = self.sampler.take() {
            token.cancel();
        }
    }

    fn ensure_live(&self) -> Result<(), PlayerError> {
        if self.released {
            Err(PlayerError::Released)
        } else {
            Ok(())
        }
    }
}

pub struct PlaybackController {
    player: Arc<dyn MediaPlayer>,
    state_tx: Arc<watch::Sender<PlaybackState>>,
    session: Arc<Mutex<Session>>,
    // Parent of every sampler token; cancelled on release and drop
    root: CancellationToken,
    sample_interval: Duration,
}

impl PlaybackController {
    pub fn new(player: Arc<dyn MediaPlayer>, sample_interval: Duration) -> Self {
        let (state_tx, _) = watch::channel(PlaybackState::default());
        Self {
            player,
            state_tx: Arc::new(state_tx),
            session: Arc::new(Mutex::new(Session::default())),
            root: CancellationToken::new(),
            sample_interval,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state_tx.subscribe()
    }

    pub fn snapshot(&self) -> PlaybackState {
        *self.state_tx.borrow()
    }

    pub fn is_playing(&self) -> bool {
        self.state_tx.borrow().is_playing
    }

    pub async fn status(&self) -> PlayerStatus {
        self.session.lock().await.status
    }

    pub async fn current_url(&self) -> Option<String> {
        self.session.lock().await.url.clone()
    }

    pub async fn play(&self, url: &str) -> Result<(), PlayerError> {
        self.start(url, 0).await
    }

    /// Like [`play`](Self::play), using the catalog duration when the stream
    /// does not report one.
    pub async fn play_track(&self, track: &Track) -> Result<(), PlayerError> {
        self.start(&track.audio_url, track.duration_ms).await
    }

    async fn start(&self, url: &str, fallback_duration_ms: u64) -> Result<(), PlayerError> {
        let mut session = self.session.lock().await;
        session.ensure_live()?;

        let same_stream = session.url.as_deref() == Some(url);
        match session.status {
            PlayerStatus::Playing if same_stream => {
                tracing::debug!(url, "Already playing");
                return Ok(());
            }
            PlayerStatus::Paused if same_stream => {
                self.player.play();
                session.status = PlayerStatus::Playing;
                self.state_tx.send_modify(|state| state.is_playing = true);
                self.spawn_sampler(&mut session);
                tracing::info!(url, "Playback resumed");
                return Ok(());
            }
            _ => {}
        }

        session.cancel_sampler();

        let loaded = async {
            self.player.load(url)?;
            self.player.prepare().await
        };
        if let Err(e) = loaded.await {
            tracing::error!(url, error = %e, "Failed to load stream");
            self.player.stop();
            session.status = PlayerStatus::Idle;
            session.url = None;
            self.state_tx.send_replace(PlaybackState::default());
            return Err(e);
        }

        self.player.play();
        let duration_ms = self
            .player
            .duration_ms()
            .filter(|d| *d > 0)
            .unwrap_or(fallback_duration_ms);

        session.status = PlayerStatus::Playing;
        session.url = Some(url.to_string());
        self.state_tx.send_replace(PlaybackState {
            is_playing: true,
            position_ms: 0,
            duration_ms,
        });
        self.spawn_sampler(&mut session);

        tracing::info!(url, duration_ms, "Playback started");
        Ok(())
    }

    pub async fn pause(&self) -> Result<(), PlayerError> {
        let mut session = self.session.lock().await;
        session.ensure_live()?;

        if session.status != PlayerStatus::Playing {
            tracing::debug!(status = ?session.status, "Pause ignored");
            return Ok(());
        }

        session.cancel_sampler();
        self.player.pause();
        session.status = PlayerStatus::Paused;
        self.state_tx.send_modify(|state| state.is_playing = false);

        tracing::info!(position_ms = self.state_tx.borrow().position_ms, "Playback paused");
        Ok(())
    }

    pub async fn stop(&self) -> Result<(), PlayerError> {
        let mut session = self.session.lock().await;
        session.ensure_live()?;

        session.cancel_sampler();
        self.player.stop();
        session.status = PlayerStatus::Idle;
        session.url = None;
        self.state_tx.send_replace(PlaybackState::default());

        tracing::info!("Playback stopped");
        Ok(())
    }

    /// Jump to `position_ms` and publish it right away, ahead of the next sample.
    pub async fn seek_to(&self, position_ms: u64) -> Result<(), PlayerError> {
        let session = self.session.lock().await;
        session.ensure_live()?;

        self.player.seek_to(position_ms);
        self.state_tx.send_modify(|state| state.position_ms = position_ms);

        tracing::debug!(position_ms, status = ?session.status, "Seeked");
        Ok(())
    }

    /// Stop sampling and free the underlying player. Valid once.
    pub async fn release(&self) -> Result<(), PlayerError> {
        let mut session = self.session.lock().await;
        if session.released {
            tracing::warn!("Playback controller released twice");
            return Err(PlayerError::Released);
        }

        session.released = true;
        session.cancel_sampler();
        self.root.cancel();
        self.player.release();
        session.status = PlayerStatus::Idle;
        session.url = None;
        self.state_tx.send_modify(|state| state.is_playing = false);

        tracing::info!("Playback controller released");
        Ok(())
    }

    fn spawn_sampler(&self, session: &mut Session) {
        session.cancel_sampler();
        let token = self.root.child_token();
        session.sampler = Some(token.clone());

        tokio::spawn(run_sampler(
            Arc::clone(&self.player),
            Arc::clone(&self.state_tx),
            Arc::clone(&self.session),
            token,
            self.sample_interval,
        ));
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

async fn run_sampler(
    player: Arc<dyn MediaPlayer>,
    state_tx: Arc<watch::Sender<PlaybackState>>,
    session: Arc<Mutex<Session>>,
    token: CancellationToken,
    period: Duration,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        if player.is_finished() {
            let mut session = session.lock().await;
            if token.is_cancelled() {
                break;
            }
            session.sampler = None;
            session.status = PlayerStatus::Idle;
            session.url = None;
            player.stop();
            state_tx.send_modify(|state| {
                state.is_playing = false;
                state.position_ms = state.position_ms.max(state.duration_ms);
            });
            tracing::info!("End of track");
            break;
        }

        let position_ms = player.current_position_ms();
        // Checked under the channel lock: nothing is published once cancelled
        state_tx.send_if_modified(|state| {
            if token.is_cancelled() || state.position_ms == position_ms {
                return false;
            }
            state.position_ms = position_ms;
            true
        });
    }

    tracing::trace!("Position sampler stopped");
}
