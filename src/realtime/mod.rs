//! Live streaming TTS over WebSocket.

pub mod events;
pub(crate) mod session;

pub use events::{ClientEvent, FinishReason, FlushEvent, ServerEvent, TextEvent, TextInput};
