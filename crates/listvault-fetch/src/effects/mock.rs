//! In-memory [`HttpClient`] with scripted per-URL replies and call counters.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use futures_util::{StreamExt, stream};

use crate::effects::http::{ByteStream, HttpClient};
use crate::error::TransportError;

/// One scripted response.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with the whole body in one chunk.
    Body(Bytes),
    /// 200 with the body split into the given chunks.
    Chunks(Vec<Bytes>),
    /// 200 with the chunk repeated forever.
    Endless(Bytes),
    /// A non-2xx status.
    Status(u16),
    /// The connection could not be established.
    ConnectError,
    /// The client gave up waiting.
    Timeout,
    /// A redirect pointed somewhere that failed admission.
    RedirectRefused,
    /// 200, some bytes, then the server drops the connection.
    Disconnect { after: Bytes },
    /// The request never completes.
    Hang,
    /// 200, some bytes, then the body never ends or errors.
    Stall { after: Bytes },
}

impl Reply {
    pub fn text(body: &str) -> Self { Reply::Body(Bytes::copy_from_slice(body.as_bytes())) }
}

/// Scripted client for tests.
///
/// The n-th request to a URL receives the n-th scripted reply; the last reply
/// repeats once the script runs out. Unscripted URLs get a 404.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    routes:        HashMap<String, Vec<Reply>>,
    calls:         Mutex<HashMap<String, usize>>,
    chunks_served: Arc<AtomicUsize>,
}

impl ScriptedClient {
    pub fn new() -> Self { Self::default() }

    pub fn route(self, url: impl Into<String>, reply: Reply) -> Self {
        self.route_sequence(url, vec![reply])
    }

    pub fn route_sequence(mut self, url: impl Into<String>, replies: Vec<Reply>) -> Self {
        self.routes.insert(url.into(), replies);
        self
    }

    /// Requests made for `url` so far.
    pub fn calls(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).values().sum()
    }

    /// Body chunks pulled by consumers across all streams.
    pub fn chunks_served(&self) -> usize { self.chunks_served.load(Ordering::SeqCst) }

    fn next_reply(&self, url: &str) -> Reply {
        let index = {
            let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
            let count = calls.entry(url.to_string()).or_default();
            *count += 1;
            *count - 1
        };
        self.routes
            .get(url)
            .and_then(|replies| replies.get(index).or(replies.last()))
            .cloned()
            .unwrap_or(Reply::Status(404))
    }

    fn counted<S>(&self, chunks: S) -> ByteStream
    where
        S: futures_util::Stream<Item = Bytes> + Send + 'static,
    {
        let served = Arc::clone(&self.chunks_served);
        Box::pin(chunks.map(move |chunk| {
            served.fetch_add(1, Ordering::SeqCst);
            Ok(chunk)
        }))
    }
}

impl HttpClient for ScriptedClient {
    async fn get(&self, url: &str) -> Result<ByteStream, TransportError> {
        match self.next_reply(url) {
            Reply::Body(body) => Ok(self.counted(stream::iter([body]))),
            Reply::Chunks(chunks) => Ok(self.counted(stream::iter(chunks))),
            Reply::Endless(chunk) => Ok(self.counted(stream::repeat(chunk))),
            Reply::Status(code) => Err(TransportError::Status(code)),
            Reply::ConnectError => Err(TransportError::Connect("connection refused".into())),
            Reply::Timeout => Err(TransportError::Timeout),
            Reply::RedirectRefused => {
                Err(TransportError::Redirect("redirect target refused".into()))
            }
            Reply::Disconnect { after } => Ok(Box::pin(stream::iter([
                Ok(after),
                Err(TransportError::Disconnected("server disconnected".into())),
            ]))),
            Reply::Hang => std::future::pending().await,
            Reply::Stall { after } => {
                Ok(self.counted(stream::iter([after]).chain(stream::pending())))
            }
        }
    }
}
