//! Media player boundary and the rodio-backed implementation

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::error::PlayerError;

const OUTPUT_THREAD_NAME: &str = "audio-output";

/// What the playback controller needs from a platform media player.
///
/// `load` only records the URI; `prepare` does the I/O.
#[async_trait]
pub trait MediaPlayer: Send + Sync {
    fn load(&self, uri: &str) -> Result<(), PlayerError>;
    async fn prepare(&self) -> Result<(), PlayerError>;
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
    fn seek_to(&self, position_ms: u64);
    fn current_position_ms(&self) -> u64;
    /// `None` when the stream does not advertise its length
    fn duration_ms(&self) -> Option<u64>;
    fn is_playing(&self) -> bool;
    /// The loaded stream has played to its end
    fn is_finished(&self) -> bool;
    fn release(&self);
}

#[derive(Default)]
struct LoadedStream {
    uri: Option<String>,
    sink: Option<Arc<Sink>>,
    duration: Option<Duration>,
}

/// The output device, opened on first use
struct Output {
    handle: OutputStreamHandle,
    // Dropping the sender ends the output thread, which drops the stream
    _shutdown: mpsc::Sender<()>,
}

/// Streams a remote audio file: downloads it, decodes it with rodio and
/// plays it through the default output device.
///
/// The device is opened lazily by `prepare`, so a machine without audio can
/// still browse the catalog; playback then fails with [`PlayerError::Output`].
pub struct AudioBackend {
    http: reqwest::Client,
    output: Mutex<Option<Output>>,
    released: AtomicBool,
    current: Mutex<LoadedStream>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn open_output() -> Result<Output, PlayerError> {
    let (handle_tx, handle_rx) = mpsc::channel::<Result<OutputStreamHandle, String>>();
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    // rodio's OutputStream is not Send, so it lives on its own thread
    std::thread::Builder::new()
        .name(OUTPUT_THREAD_NAME.to_string())
        .spawn(move || match OutputStream::try_default() {
            Ok((stream, handle)) => {
                if handle_tx.send(Ok(handle)).is_ok() {
                    // Blocks until the backend is released or dropped
                    let _ = shutdown_rx.recv();
                }
                drop(stream);
                tracing::debug!("Audio output stream closed");
            }
            Err(e) => {
                let _ = handle_tx.send(Err(e.to_string()));
            }
        })
        .map_err(|e| PlayerError::Output(e.to_string()))?;

    let handle = handle_rx
        .recv()
        .map_err(|e| PlayerError::Output(e.to_string()))?
        .map_err(PlayerError::Output)?;

    tracing::info!("Audio output opened");
    Ok(Output {
        handle,
        _shutdown: shutdown_tx,
    })
}

impl AudioBackend {
    pub fn new() -> Result<Self, PlayerError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("spotify-clone/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::info!("Audio backend initialized");

        Ok(Self {
            http,
            output: Mutex::new(None),
            released: AtomicBool::new(false),
            current: Mutex::new(LoadedStream::default()),
        })
    }

    pub fn has_output(&self) -> bool {
        lock(&self.output).is_some()
    }

    fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    /// Output handle, opening the device when this is the first stream.
    /// A failed open is retried on the next call.
    fn output_handle(&self) -> Result<OutputStreamHandle, PlayerError> {
        let mut output = lock(&self.output);
        if self.is_released() {
            return Err(PlayerError::Released);
        }
        if let Some(output) = output.as_ref() {
            return Ok(output.handle.clone());
        }
        let opened = open_output().inspect_err(|e| {
            tracing::error!(error = %e, "No audio output device");
        })?;
        let handle = opened.handle.clone();
        *output = Some(opened);
        Ok(handle)
    }

    fn sink(&self) -> Option<Arc<Sink>> {
        lock(&self.current).sink.clone()
    }
}

#[async_trait]
impl MediaPlayer for AudioBackend {
    fn load(&self, uri: &str) -> Result<(), PlayerError> {
        if self.is_released() {
            return Err(PlayerError::Released);
        }
        let mut current = lock(&self.current);
        if let Some(sink) = current.sink.take() {
            sink.stop();
        }
        current.uri = Some(uri.to_string());
        current.duration = None;
        Ok(())
    }

    async fn prepare(&self) -> Result<(), PlayerError> {
        let uri = lock(&self.current).uri.clone().ok_or(PlayerError::NothingLoaded)?;

        tracing::debug!(%uri, "Fetching audio stream");
        let bytes = self
            .http
            .get(&uri)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        tracing::debug!(%uri, size = bytes.len(), "Audio stream downloaded");

        let decoder = Decoder::new(Cursor::new(bytes.to_vec()))?;
        let duration = decoder.total_duration();

        let sink = Sink::try_new(&self.output_handle()?)?;
        sink.pause();
        sink.append(decoder);

        let mut current = lock(&self.current);
        if current.uri.as_deref() != Some(uri.as_str()) {
            // Another load replaced this one while we were downloading
            sink.stop();
            return Ok(());
        }
        current.sink = Some(Arc::new(sink));
        current.duration = duration;
        Ok(())
    }

    fn play(&self) {
        if let Some(sink) = self.sink() {
            sink.play();
        }
    }

    fn pause(&self) {
        if let Some(sink) = self.sink() {
            sink.pause();
        }
    }

    fn stop(&self) {
        let mut current = lock(&self.current);
        if let Some(sink) = current.sink.take() {
            sink.stop();
        }
        current.uri = None;
        current.duration = None;
    }

    fn seek_to(&self, position_ms: u64) {
        // try_seek waits on the output thread; the stream lock is not held
        if let Some(sink) = self.sink() {
            if let Err(e) = sink.try_seek(Duration::from_millis(position_ms)) {
                tracing::warn!(position_ms, error = %e, "Seek failed");
            }
        }
    }

    fn current_position_ms(&self) -> u64 {
        lock(&self.current)
            .sink
            .as_ref()
            .map(|sink| sink.get_pos().as_millis() as u64)
            .unwrap_or(0)
    }

    fn duration_ms(&self) -> Option<u64> {
        lock(&self.current).duration.map(|d| d.as_millis() as u64)
    }

    fn is_playing(&self) -> bool {
        lock(&self.current)
            .sink
            .as_ref()
            .is_some_and(|sink| !sink.is_paused() && !sink.empty())
    }

    fn is_finished(&self) -> bool {
        lock(&self.current).sink.as_ref().is_some_and(|sink| sink.empty())
    }

    fn release(&self) {
        self.stop();
        if !self.released.swap(true, Ordering::SeqCst) {
            lock(&self.output).take();
            tracing::info!("Audio backend released");
        }
    }
}

impl Drop for AudioBackend {
    fn drop(&mut self) {
        self.release();
    }
}
