//! Shared test helpers: client construction and a scripted live TTS server.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use fishaudio::{ClientConfig, FishAudio};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::{timeout, Duration};
use tokio_tungstenite::{
    accept_hdr_async,
    tungstenite::{
        handshake::server::{Request, Response},
        Message,
    },
};

pub const TEST_KEY: &str = "test-key";

pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig::new(TEST_KEY)
        .expect("test key should be accepted")
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(5))
}

pub fn test_client(base_url: &str) -> FishAudio {
    FishAudio::with_config(test_config(base_url)).expect("client should build")
}

/// A frame the scripted server sends back.
#[derive(Debug, Clone)]
pub enum Reply {
    Audio(Vec<u8>),
    Finish(&'static str),
    /// A frame with an event name the client does not know.
    Event(&'static str),
    /// Drop the TCP connection without a close handshake.
    Disconnect,
}

/// What the server saw during one session.
#[derive(Debug, Default)]
pub struct Observation {
    pub path: String,
    pub auth_header: String,
    pub model_header: String,
    pub frames: Vec<Value>,
}

impl Observation {
    pub fn events(&self) -> Vec<String> {
        self.frames
            .iter()
            .map(|frame| frame["event"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

#[derive(Serialize)]
struct AudioFrame<'a> {
    event: &'a str,
    #[serde(with = "serde_bytes")]
    audio: &'a [u8],
}

#[derive(Serialize)]
struct FinishFrame<'a> {
    event: &'a str,
    reason: &'a str,
}

#[derive(Serialize)]
struct BareFrame<'a> {
    event: &'a str,
}

pub fn encode_reply(reply: &Reply) -> Vec<u8> {
    match reply {
        Reply::Audio(audio) => rmp_serde::to_vec_named(&AudioFrame {
            event: "audio",
            audio,
        }),
        Reply::Finish(reason) => rmp_serde::to_vec_named(&FinishFrame {
            event: "finish",
            reason,
        }),
        Reply::Event(event) => rmp_serde::to_vec_named(&BareFrame { event }),
        Reply::Disconnect => unreachable!("disconnect has no payload"),
    }
    .expect("reply should encode")
}

/// Serve a single live session on a random local port.
///
/// The server records every client frame up to and including `stop`, then
/// plays `replies` in order.
pub async fn spawn_live_server(replies: Vec<Reply>) -> (SocketAddr, JoinHandle<Observation>) {
    spawn_scripted_live_server("stop", Vec::new(), replies).await
}

/// Like [`spawn_live_server`], but also plays `early` as soon as the first
/// client frame with event `trigger` arrives, while still reading the rest.
pub async fn spawn_scripted_live_server(
    trigger: &'static str,
    early: Vec<Reply>,
    replies: Vec<Reply>,
) -> (SocketAddr, JoinHandle<Observation>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let address = listener
        .local_addr()
        .expect("local addr should be available");

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("server should accept");
        let captured = Arc::new(Mutex::new(Observation::default()));
        let captured_inner = Arc::clone(&captured);
        let mut ws = accept_hdr_async(stream, move |req: &Request, response: Response| {
            let header = |name: &str| {
                req.headers()
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string()
            };
            let mut observation = captured_inner.lock().expect("lock should not poison");
            observation.path = req.uri().path().to_string();
            observation.auth_header = header("authorization");
            observation.model_header = header("model");
            Ok(response)
        })
        .await
        .expect("handshake should succeed");

        let mut frames = Vec::new();
        let mut early = Some(early);
        loop {
            match timeout(Duration::from_secs(5), ws.next()).await {
                Ok(Some(Ok(Message::Binary(payload)))) => {
                    let frame: Value =
                        rmp_serde::from_slice(&payload).expect("client frame should decode");
                    let event = frame["event"].as_str().unwrap_or_default().to_string();
                    frames.push(frame);
                    if event == trigger {
                        if let Some(early) = early.take() {
                            for reply in &early {
                                ws.send(Message::binary(encode_reply(reply)))
                                    .await
                                    .expect("early reply should send");
                            }
                        }
                    }
                    if event == "stop" {
                        break;
                    }
                }
                Ok(Some(Ok(_))) => {}
                _ => break,
            }
        }

        let mut disconnect = false;
        for reply in &replies {
            if matches!(reply, Reply::Disconnect) {
                disconnect = true;
                break;
            }
            ws.send(Message::binary(encode_reply(reply)))
                .await
                .expect("reply should send");
        }

        if disconnect {
            drop(ws);
        } else {
            let _ = timeout(Duration::from_secs(1), async {
                while let Some(Ok(message)) = ws.next().await {
                    if message.is_close() {
                        break;
                    }
                }
            })
            .await;
        }

        let mut observation = std::mem::take(&mut *captured.lock().expect("lock should not poison"));
        observation.frames = frames;
        observation
    });

    (address, handle)
}
