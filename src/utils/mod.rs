//! Helpers for saving and playing synthesized audio.

pub mod player;
mod save;

pub use player::{find_executable, play, stream, stream_with, PlayOptions};
pub use save::{save, save_stream};
