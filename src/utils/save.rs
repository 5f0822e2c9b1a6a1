use std::path::Path;

use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::stream::AudioStream;

/// Write audio bytes to `path`, replacing any existing file.
pub fn save(audio: &[u8], path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, audio)?;
    Ok(())
}

/// Write chunks to `path` as they arrive and return the byte count.
///
/// On a stream error the partial file is left in place.
pub async fn save_stream(mut audio: AudioStream, path: impl AsRef<Path>) -> Result<u64> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written = 0u64;
    while let Some(chunk) = audio.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}
