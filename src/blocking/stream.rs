use std::fmt;
use std::io::Write;
use std::process::Stdio;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use tokio::runtime::Runtime;

use crate::error::{FishAudioError, Result};
use crate::stream::AudioStream;
use crate::utils::{find_executable, PlayOptions};

/// Iterator over audio chunks, pulled through the client's runtime.
pub struct BlockingAudioStream {
    inner: AudioStream,
    runtime: Arc<Runtime>,
}

impl BlockingAudioStream {
    pub(crate) fn new(inner: AudioStream, runtime: Arc<Runtime>) -> Self {
        Self { inner, runtime }
    }

    /// Read every remaining chunk into one buffer.
    pub fn collect_audio(self) -> Result<Bytes> {
        let Self { inner, runtime } = self;
        runtime.block_on(inner.collect_audio())
    }
}

impl Iterator for BlockingAudioStream {
    type Item = Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        self.runtime.block_on(self.inner.next())
    }
}

impl fmt::Debug for BlockingAudioStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingAudioStream").finish_non_exhaustive()
    }
}

/// Play chunks through mpv as they arrive and return the full audio.
pub fn stream<I>(audio: I) -> Result<Bytes>
where
    I: IntoIterator<Item = Result<Bytes>>,
{
    stream_with(audio, &PlayOptions::mpv())
}

pub fn stream_with<I>(audio: I, options: &PlayOptions) -> Result<Bytes>
where
    I: IntoIterator<Item = Result<Bytes>>,
{
    let program =
        find_executable(&options.program).ok_or_else(|| FishAudioError::Dependency {
            dependency: options.program.clone(),
            install_command: options.install_hint.clone(),
        })?;

    let mut child = std::process::Command::new(program)
        .args(&options.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| FishAudioError::Playback("player stdin unavailable".into()))?;

    let mut buffer = BytesMut::new();
    let mut outcome = Ok(());
    for chunk in audio {
        let chunk = match chunk {
            Ok(chunk) if chunk.is_empty() => continue,
            Ok(chunk) => chunk,
            Err(error) => {
                outcome = Err(error);
                break;
            }
        };
        buffer.extend_from_slice(&chunk);
        if let Err(error) = stdin.write_all(&chunk).and_then(|_| stdin.flush()) {
            outcome = Err(error.into());
            break;
        }
    }

    drop(stdin);
    child.wait()?;
    outcome.map(|_| buffer.freeze())
}
