//! Duplex text-in / audio-out session over `/v1/tts/live`.
//!
//! Sending and receiving run concurrently: a sender task forwards the
//! caller's text while a reader task decodes audio frames, so audio for
//! early text arrives before the text stream is exhausted.

use std::time::Duration;

use async_stream::stream;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, Stream, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use super::events::{ClientEvent, FinishReason, ServerEvent, TextInput};
use crate::error::{FishAudioError, Result};
use crate::stream::AudioStream;
use crate::transport::websocket::{self, TtsWebSocket};
use crate::transport::{HttpTransport, WebSocketOptions};
use crate::types::{Model, TtsRequest};

pub(crate) const LIVE_PATH: &str = "/v1/tts/live";

const ENDED_WITH_ERROR: &str = "WebSocket stream ended with error";
const DISCONNECTED: &str = "WebSocket disconnected unexpectedly";

type FrameSender = mpsc::Sender<Result<ServerEvent>>;

/// Handles to the background tasks of one session. Dropping it tears the
/// session down.
struct SessionTasks {
    stop_tx: watch::Sender<bool>,
    sender: Option<JoinHandle<()>>,
    reader: JoinHandle<()>,
}

impl SessionTasks {
    /// Let the sender close the socket and wait for it.
    async fn finish(&mut self) -> Result<()> {
        let _ = self.stop_tx.send(true);
        match self.sender.take() {
            Some(sender) => sender.await.map_err(|error| {
                FishAudioError::WebSocket(format!("Live TTS sender failed: {error}"))
            }),
            None => Ok(()),
        }
    }
}

impl Drop for SessionTasks {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(sender) = self.sender.take() {
            sender.abort();
        }
        self.reader.abort();
    }
}

/// Connect, send the `start` frame and begin streaming `text`.
///
/// The handshake happens before this returns, so auth failures surface here
/// rather than on the first poll of the audio stream.
pub(crate) async fn open<S>(
    transport: &HttpTransport,
    model: Model,
    request: TtsRequest,
    text: S,
    options: WebSocketOptions,
) -> Result<AudioStream>
where
    S: Stream + Send + 'static,
    S::Item: Into<TextInput>,
{
    let session = short_session_id();
    let socket = websocket::connect(transport, LIVE_PATH, &model.to_string(), &options).await?;
    info!(session = %session, model = %model, format = %request.format, "Live TTS session opened");

    let (sink, source) = socket.split();
    let (frames_tx, mut frames_rx) = mpsc::channel(options.queue_size.max(1));
    let (stop_tx, stop_rx) = watch::channel(false);

    let sender = tokio::spawn(run_sender(
        sink,
        request,
        text,
        stop_rx,
        frames_tx.clone(),
        options.ping_interval(),
        session.clone(),
    ));
    let reader = tokio::spawn(run_reader(
        source,
        frames_tx,
        options.idle_limit(),
        session.clone(),
    ));

    let mut tasks = SessionTasks {
        stop_tx,
        sender: Some(sender),
        reader,
    };

    let audio = stream! {
        let mut chunks = 0usize;
        loop {
            match frames_rx.recv().await {
                Some(Ok(ServerEvent::Audio(audio))) => {
                    chunks += 1;
                    yield Ok(audio);
                }
                Some(Ok(ServerEvent::Finish(FinishReason::Stop))) => {
                    let joined = tasks.finish().await;
                    if let Err(error) = &joined {
                        warn!(session = %session, error = %error, "Live TTS sender aborted");
                    }
                    // The reader is done; anything left came from the sender.
                    let queued = std::iter::from_fn(|| frames_rx.try_recv().ok())
                        .find_map(|pending| pending.err());
                    if let Some(error) = queued.or(joined.err()) {
                        yield Err(error);
                        break;
                    }
                    info!(session = %session, chunks, "Live TTS session finished");
                    break;
                }
                Some(Ok(ServerEvent::Finish(FinishReason::Error))) => {
                    warn!(session = %session, "Live TTS session finished with error");
                    yield Err(FishAudioError::WebSocket(ENDED_WITH_ERROR.into()));
                    break;
                }
                Some(Ok(ServerEvent::Unknown(event))) => {
                    debug!(session = %session, event = %event, "Ignoring live TTS frame");
                }
                Some(Err(error)) => {
                    warn!(session = %session, error = %error, "Live TTS session failed");
                    yield Err(error);
                    break;
                }
                None => {
                    yield Err(FishAudioError::WebSocket(DISCONNECTED.into()));
                    break;
                }
            }
        }
    };

    Ok(AudioStream::new(audio))
}

async fn run_sender<S>(
    mut sink: SplitSink<TtsWebSocket, Message>,
    request: TtsRequest,
    text: S,
    mut stop_rx: watch::Receiver<bool>,
    frames_tx: FrameSender,
    ping_interval: Option<Duration>,
    session: String,
) where
    S: Stream + Send + 'static,
    S::Item: Into<TextInput>,
{
    let result = drive_sender(&mut sink, request, text, &mut stop_rx, ping_interval, &session).await;
    if let Err(error) = result {
        warn!(session = %session, error = %error, "Live TTS sender failed");
        let _ = frames_tx.send(Err(error)).await;
    }
}

async fn drive_sender<S>(
    sink: &mut SplitSink<TtsWebSocket, Message>,
    request: TtsRequest,
    text: S,
    stop_rx: &mut watch::Receiver<bool>,
    ping_interval: Option<Duration>,
    session: &str,
) -> Result<()>
where
    S: Stream + Send + 'static,
    S::Item: Into<TextInput>,
{
    send_event(sink, &ClientEvent::Start { request }).await?;

    let mut heartbeat = ping_interval.map(|period| {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });
    let text = text.map(|item| -> TextInput { item.into() });
    tokio::pin!(text);
    let mut text_done = false;

    loop {
        tokio::select! {
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
            }
            _ = next_tick(&mut heartbeat) => {
                sink.send(Message::Ping(Default::default()))
                    .await
                    .map_err(|error| FishAudioError::WebSocket(format!("WebSocket ping failed: {error}")))?;
            }
            item = text.next(), if !text_done => match item {
                Some(input) => send_event(sink, &ClientEvent::from(input)).await?,
                None => {
                    text_done = true;
                    send_event(sink, &ClientEvent::Close).await?;
                    debug!(session = %session, "Live TTS text stream exhausted");
                }
            },
        }
    }

    let _ = sink.send(Message::Close(None)).await;
    let _ = sink.close().await;
    Ok(())
}

async fn next_tick(heartbeat: &mut Option<Interval>) {
    match heartbeat {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn send_event(
    sink: &mut SplitSink<TtsWebSocket, Message>,
    event: &ClientEvent,
) -> Result<()> {
    let payload = event.encode()?;
    sink.send(Message::binary(payload))
        .await
        .map_err(|error| FishAudioError::WebSocket(format!("WebSocket send failed: {error}")))
}

async fn run_reader(
    mut source: SplitStream<TtsWebSocket>,
    frames_tx: FrameSender,
    idle_limit: Option<Duration>,
    session: String,
) {
    loop {
        let next = match idle_limit {
            Some(limit) => match time::timeout(limit, source.next()).await {
                Ok(next) => next,
                Err(_) => {
                    warn!(session = %session, "Live TTS keepalive timed out");
                    let _ = frames_tx
                        .send(Err(FishAudioError::WebSocket(format!(
                            "{DISCONNECTED}: keepalive timed out"
                        ))))
                        .await;
                    return;
                }
            },
            None => source.next().await,
        };

        let event = match next {
            Some(Ok(Message::Binary(payload))) => ServerEvent::decode(&payload),
            Some(Ok(Message::Close(_))) | None => {
                Err(FishAudioError::WebSocket(DISCONNECTED.into()))
            }
            Some(Ok(_)) => continue,
            Some(Err(error)) => Err(FishAudioError::WebSocket(format!(
                "{DISCONNECTED}: {error}"
            ))),
        };

        let last = matches!(event, Ok(ServerEvent::Finish(_)) | Err(_));
        if frames_tx.send(event).await.is_err() || last {
            return;
        }
    }
}

fn short_session_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
