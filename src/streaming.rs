use bytes::{Bytes, BytesMut};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::debug;

/// Stateful splitter turning upstream byte chunks into framed lines.
///
/// Lines are delimited by `\n` (a trailing `\r` is stripped), empty lines
/// are dropped, and every emitted line carries exactly one trailing `\n`.
/// Partial lines are carried across chunk boundaries.
pub struct LineFramer {
    buffer: BytesMut,
}

impl LineFramer {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(8192),
        }
    }

    /// Feed new data and extract the lines it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Bytes> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();

        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let mut line = self.buffer.split_to(pos + 1);
            line.truncate(pos);

            if line.last() == Some(&b'\r') {
                line.truncate(line.len() - 1);
            }

            if !line.is_empty() {
                line.extend_from_slice(b"\n");
                lines.push(line.freeze());
            }
        }

        lines
    }

    /// Flush a final line left without a terminator when upstream closes.
    pub fn finish(&mut self) -> Option<Bytes> {
        if self.buffer.is_empty() {
            return None;
        }

        let mut line = self.buffer.split();

        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
            if line.is_empty() {
                return None;
            }
        }

        line.extend_from_slice(b"\n");
        Some(line.freeze())
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for the body stream of an upstream response
pub type UpstreamStream = Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>;

/// Pull-based relay forwarding upstream lines as soon as they complete.
///
/// Nothing beyond the current partial line is buffered; ordering is exactly
/// the upstream's. The relay ends when upstream closes (after flushing any
/// unterminated tail) and injects no terminator of its own. Dropping the
/// relay, which is what a downstream disconnect does, drops the upstream
/// stream with it and releases the connection.
pub struct LineRelay<S> {
    upstream: S,
    framer: LineFramer,
    done: bool,
}

impl LineRelay<UpstreamStream> {
    pub fn from_response(response: reqwest::Response) -> Self {
        let upstream: UpstreamStream = Box::pin(response.bytes_stream());
        Self::new(upstream)
    }
}

impl<S> LineRelay<S> {
    pub fn new(upstream: S) -> Self {
        Self {
            upstream,
            framer: LineFramer::new(),
            done: false,
        }
    }
}

impl<S, E> Stream for LineRelay<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::error::Error + Send + Sync + 'static,
{
    type Item = std::io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.done {
                return Poll::Ready(None);
            }

            match Pin::new(&mut this.upstream).poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    let lines = this.framer.feed(&chunk);
                    if lines.is_empty() {
                        // Chunk ended mid-line; keep pulling
                        continue;
                    }

                    let mut out = BytesMut::with_capacity(lines.iter().map(|l| l.len()).sum());
                    for line in lines {
                        out.extend_from_slice(&line);
                    }
                    return Poll::Ready(Some(Ok(out.freeze())));
                }
                Poll::Ready(Some(Err(e))) => {
                    this.done = true;
                    return Poll::Ready(Some(Err(std::io::Error::other(e))));
                }
                Poll::Ready(None) => {
                    this.done = true;
                    match this.framer.finish() {
                        Some(tail) => return Poll::Ready(Some(Ok(tail))),
                        None => return Poll::Ready(None),
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl<S> Drop for LineRelay<S> {
    fn drop(&mut self) {
        if !self.done {
            debug!("Relay dropped before upstream finished; releasing upstream connection");
        }
    }
}
