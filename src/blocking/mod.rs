//! Synchronous mirror of the async client.
//!
//! ```no_run
//! use fishaudio::blocking::FishAudio;
//! use fishaudio::TtsParams;
//!
//! # fn main() -> fishaudio::Result<()> {
//! let client = FishAudio::from_env()?;
//! let audio = client
//!     .tts()
//!     .stream_websocket(["Hello, ", "world!"], &TtsParams::default(), None)?
//!     .collect_audio()?;
//! fishaudio::utils::save(&audio, "hello.mp3")?;
//! # Ok(())
//! # }
//! ```

mod client;
mod stream;

pub use client::{AccountClient, AsrClient, FishAudio, TtsClient, VoicesClient};
pub use stream::{stream, stream_with, BlockingAudioStream};
