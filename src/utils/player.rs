//! Playback through external players found on `PATH`.

use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{FishAudioError, Result};
use crate::stream::AudioStream;

const FFMPEG_INSTALL: &str = "brew install ffmpeg  # macOS\n\
sudo apt install ffmpeg  # Linux\n\
https://ffmpeg.org/download.html  # Windows";

const MPV_INSTALL: &str = "brew install mpv  # macOS\n\
sudo apt install mpv  # Linux\n\
https://mpv.io/installation/  # Windows";

/// External player invocation; audio is written to its stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOptions {
    pub program: String,
    pub args: Vec<String>,
    /// Shown in the dependency error when `program` is missing.
    pub install_hint: String,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self::ffplay()
    }
}

impl PlayOptions {
    /// `ffplay -autoexit -nodisp -`
    pub fn ffplay() -> Self {
        Self {
            program: "ffplay".into(),
            args: vec!["-autoexit".into(), "-nodisp".into(), "-".into()],
            install_hint: FFMPEG_INSTALL.into(),
        }
    }

    /// `mpv --no-cache --no-terminal -- fd://0`
    pub fn mpv() -> Self {
        Self {
            program: "mpv".into(),
            args: vec![
                "--no-cache".into(),
                "--no-terminal".into(),
                "--".into(),
                "fd://0".into(),
            ],
            install_hint: MPV_INSTALL.into(),
        }
    }

    pub fn custom(program: impl Into<String>, args: Vec<String>) -> Self {
        let program = program.into();
        Self {
            install_hint: format!("Install {program} and make sure it is on PATH"),
            program,
            args,
        }
    }

    fn resolve(&self) -> Result<PathBuf> {
        find_executable(&self.program).ok_or_else(|| FishAudioError::Dependency {
            dependency: self.program.clone(),
            install_command: self.install_hint.clone(),
        })
    }
}

/// Look `program` up on `PATH`.
pub fn find_executable(program: &str) -> Option<PathBuf> {
    let candidate = PathBuf::from(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then_some(candidate);
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths).find_map(|dir| {
        let path = dir.join(program);
        if path.is_file() {
            return Some(path);
        }
        let exe = dir.join(format!("{program}.exe"));
        exe.is_file().then_some(exe)
    })
}

/// Play a complete audio file and block until the player exits.
pub fn play(audio: &[u8], options: &PlayOptions) -> Result<()> {
    let program = options.resolve()?;
    debug!(player = %program.display(), bytes = audio.len(), "Playing audio");

    let mut child = std::process::Command::new(&program)
        .args(&options.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        // A player that exits early closes the pipe; its exit status says why.
        if let Err(error) = stdin.write_all(audio) {
            if error.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(error.into());
            }
        }
    }
    let status = child.wait()?;
    if !status.success() {
        return Err(FishAudioError::Playback(format!(
            "{} exited with {status}",
            options.program
        )));
    }
    Ok(())
}

/// Play chunks through mpv as they arrive and return the full audio.
pub async fn stream(audio: AudioStream) -> Result<Bytes> {
    stream_with(audio, &PlayOptions::mpv()).await
}

/// Like [`stream`] with a different player.
pub async fn stream_with(mut audio: AudioStream, options: &PlayOptions) -> Result<Bytes> {
    let program = options.resolve()?;
    debug!(player = %program.display(), "Streaming audio to player");

    let mut child = tokio::process::Command::new(&program)
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
    while let Some(chunk) = audio.next().await {
        let chunk = match chunk {
            Ok(chunk) if chunk.is_empty() => continue,
            Ok(chunk) => chunk,
            Err(error) => {
                outcome = Err(error);
                break;
            }
        };
        buffer.extend_from_slice(&chunk);
        if let Err(error) = write_chunk(&mut stdin, &chunk).await {
            outcome = Err(error);
            break;
        }
    }

    drop(stdin);
    child.wait().await?;
    outcome.map(|_| buffer.freeze())
}

async fn write_chunk(stdin: &mut tokio::process::ChildStdin, chunk: &[u8]) -> Result<()> {
    stdin.write_all(chunk).await?;
    stdin.flush().await?;
    Ok(())
}
