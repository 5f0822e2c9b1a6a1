//! Namespaced API clients exposed by [`crate::FishAudio`].

pub mod account;
pub mod asr;
pub mod tts;
pub mod voices;

pub use account::AccountClient;
pub use asr::AsrClient;
pub use tts::TtsClient;
pub use voices::VoicesClient;
