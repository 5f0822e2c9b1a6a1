//! Request and response models.

pub mod account;
pub mod asr;
pub mod shared;
pub mod tts;
pub mod voices;

pub use account::*;
pub use asr::*;
pub use shared::*;
pub use tts::*;
pub use voices::*;
