//! Audio chunk stream returned by synthesis calls.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};

use crate::error::Result;

/// A stream of encoded audio chunks.
///
/// Chunks arrive in order; concatenating them yields a playable file in the
/// requested format. Use [`AudioStream::collect_audio`] to do exactly that.
pub struct AudioStream {
    inner: BoxStream<'static, Result<Bytes>>,
}

impl AudioStream {
    pub fn new(stream: impl Stream<Item = Result<Bytes>> + Send + 'static) -> Self {
        Self {
            inner: stream.boxed(),
        }
    }

    /// Drain the stream into one buffer, stopping at the first error.
    pub async fn collect_audio(mut self) -> Result<Bytes> {
        let mut buffer = BytesMut::new();
        while let Some(chunk) = self.inner.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer.freeze())
    }
}

impl Stream for AudioStream {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl fmt::Debug for AudioStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioStream").finish_non_exhaustive()
    }
}
