//! Fish Audio client for Rust.
//!
//! Text-to-speech over HTTP and a duplex WebSocket, speech recognition,
//! voice model management and wallet lookups against the Fish Audio API.
//!
//! # Quick Start
//!
//! ```no_run
//! use fishaudio::prelude::*;
//! use futures::StreamExt;
//!
//! # async fn example() -> fishaudio::Result<()> {
//! let client = FishAudio::from_env()?;
//! let params = TtsParams::builder().format(AudioFormat::Wav).build();
//!
//! let text = futures::stream::iter(vec![
//!     TextInput::from("Streaming text "),
//!     TextInput::from("as it is produced."),
//!     TextInput::from(FlushEvent),
//! ]);
//! let mut audio = client.tts().stream_websocket(text, &params, None).await?;
//! while let Some(chunk) = audio.next().await {
//!     println!("{} bytes", chunk?.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod prelude;
pub mod realtime;
pub mod resources;
pub mod stream;
pub mod transport;
pub mod types;
pub mod utils;

#[cfg(feature = "blocking")]
pub mod blocking;

pub use client::FishAudio;
pub use config::ClientConfig;
pub use error::{FishAudioError, Result};
pub use realtime::{FlushEvent, TextEvent, TextInput};
pub use stream::AudioStream;
pub use transport::{RequestOptions, WebSocketOptions};
pub use types::{AudioFormat, LatencyMode, Model, Prosody, ReferenceAudio, TtsConfig, TtsParams};
