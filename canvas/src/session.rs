//! Per-connection session wiring.
//!
//! DESIGN
//! ======
//! Each accepted WebSocket runs one session with two tasks and one shared
//! sink:
//! - The *user task* (this module's [`run`] future) sends the configuration
//!   frame, then drives the user entry function with an owned
//!   [`Context`].
//! - The *reader task* decodes inbound messages: input events go to a
//!   bounded channel (blocking send — backpressure, never drops), replies
//!   fulfill the pending query slot.
//! - The *writer* is not a task: flush and query emission send through a
//!   mutex-serialized sink, so a flush returns only once its message has
//!   been handed to the transport.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → send version byte + Config as the first frame
//! 2. Spawn reader, run user entry with a fresh [`Context`]
//! 3. Any of {entry returns, EOF, read/write error, decode error} →
//!    cancellation token fires (it is never reset), event channel closes,
//!    socket closes

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use wire::PROTOCOL_VERSION;
use wire::event::{Event, Inbound, Reply};

use crate::context::Context;
use crate::error::SessionError;
use crate::handle::ImageState;
use crate::options::Options;

/// Boxed future returned by the user entry function.
pub(crate) type EntryFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased user entry function, shared by every session of a server.
pub(crate) type EntryFn = Arc<dyn Fn(Context) -> EntryFuture + Send + Sync>;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// SHARED STATE
// =============================================================================

/// State shared between the context, the reader task, and image handles.
pub(crate) struct Shared {
    /// Broadcast quit signal. Cancelled exactly once, never reset.
    pub(crate) quit: CancellationToken,
    /// Last observed canvas dimensions (initialized from the options,
    /// updated by resize events before they are delivered).
    size: Mutex<(u32, u32)>,
    /// Completion slot for the one in-flight synchronous query.
    pending_reply: Mutex<Option<oneshot::Sender<Reply>>>,
    /// Image loads awaiting their outcome reply, keyed by image ID.
    pending_images: Mutex<HashMap<u32, Arc<ImageState>>>,
}

impl Shared {
    pub(crate) fn new(quit: CancellationToken, width: u32, height: u32) -> Self {
        Self {
            quit,
            size: Mutex::new((width, height)),
            pending_reply: Mutex::new(None),
            pending_images: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn size(&self) -> (u32, u32) {
        match self.size.lock() {
            Ok(size) => *size,
            Err(_) => (0, 0),
        }
    }

    fn set_size(&self, width: i32, height: i32) {
        if let Ok(mut size) = self.size.lock() {
            *size = (width.max(0) as u32, height.max(0) as u32);
        }
    }

    /// Arm the query completion slot. The context's `&mut self` receivers
    /// guarantee a single query in flight, so an occupied slot can only be
    /// a stale sender from an aborted query; replacing it drops that
    /// sender, which its receiver observes as `Closed`.
    pub(crate) fn set_pending_reply(&self, tx: oneshot::Sender<Reply>) {
        if let Ok(mut slot) = self.pending_reply.lock() {
            *slot = Some(tx);
        }
    }

    pub(crate) fn clear_pending_reply(&self) {
        if let Ok(mut slot) = self.pending_reply.lock() {
            *slot = None;
        }
    }

    pub(crate) fn register_pending_image(&self, id: u32, state: Arc<ImageState>) {
        if let Ok(mut map) = self.pending_images.lock() {
            map.insert(id, state);
        }
    }

    /// Deliver a reply to whoever is waiting for it.
    pub(crate) fn route_reply(&self, reply: Reply, session_id: u64) {
        if let Reply::ImageLoaded { id, ok, width, height } = reply {
            let state = match self.pending_images.lock() {
                Ok(mut map) => map.remove(&id),
                Err(_) => None,
            };
            match state {
                Some(state) => {
                    if !ok {
                        warn!(session_id, image_id = id, "browser failed to load image");
                    }
                    state.fulfill(ok, width, height);
                }
                None => warn!(session_id, image_id = id, "image-loaded reply for unknown image"),
            }
            return;
        }

        let sender = match self.pending_reply.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        match sender {
            Some(tx) => {
                if tx.send(reply).is_err() {
                    warn!(session_id, "query abandoned before its reply arrived");
                }
            }
            None => warn!(session_id, ?reply, "reply event with no pending query"),
        }
    }
}

// =============================================================================
// WRITER
// =============================================================================

enum SinkKind {
    Ws(SplitSink<WebSocket, Message>),
    #[cfg(test)]
    Mock(mpsc::UnboundedSender<Vec<u8>>),
}

/// The serialized outbound half. The only shared mutable resource of a
/// session; every command frame flows through [`Writer::send`].
pub(crate) struct Writer {
    sink: tokio::sync::Mutex<SinkKind>,
    quit: CancellationToken,
}

impl Writer {
    fn new(sink: SinkKind, quit: CancellationToken) -> Self {
        Self { sink: tokio::sync::Mutex::new(sink), quit }
    }

    /// Send one binary message. A transport error fires the quit signal and
    /// is terminal for the session.
    pub(crate) async fn send(&self, bytes: Vec<u8>) -> Result<(), SessionError> {
        if self.quit.is_cancelled() {
            return Err(SessionError::Closed);
        }
        let mut sink = self.sink.lock().await;
        match &mut *sink {
            SinkKind::Ws(ws) => {
                if let Err(e) = ws.send(Message::Binary(bytes.into())).await {
                    warn!(error = %e, "outbound send failed");
                    self.quit.cancel();
                    return Err(SessionError::Closed);
                }
                Ok(())
            }
            #[cfg(test)]
            SinkKind::Mock(tx) => {
                if tx.send(bytes).is_err() {
                    self.quit.cancel();
                    return Err(SessionError::Closed);
                }
                Ok(())
            }
        }
    }

    async fn close(&self) {
        let mut sink = self.sink.lock().await;
        match &mut *sink {
            SinkKind::Ws(ws) => {
                if let Err(e) = ws.close().await {
                    tracing::debug!(error = %e, "close after shutdown failed");
                }
            }
            #[cfg(test)]
            SinkKind::Mock(_) => {}
        }
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Run one session to completion. Future of the per-connection task spawned
/// by the WebSocket upgrade.
pub(crate) async fn run(socket: WebSocket, options: Options, entry: EntryFn) {
    let session_id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);

    let (sink, stream) = socket.split();
    let quit = CancellationToken::new();
    let writer = Arc::new(Writer::new(SinkKind::Ws(sink), quit.clone()));
    let shared = Arc::new(Shared::new(quit, options.width, options.height));

    // First outbound frame: version byte, then the configuration command.
    let mut first = vec![PROTOCOL_VERSION];
    options.config_command().encode(&mut first);
    if writer.send(first).await.is_err() {
        warn!(session_id, "could not send configuration; dropping session");
        return;
    }
    info!(session_id, width = options.width, height = options.height, "session connected");

    let (events_tx, events_rx) = mpsc::channel(options.event_capacity);
    let reader = tokio::spawn(read_loop(stream, events_tx, Arc::clone(&shared), session_id));

    let ctx = Context::new(Arc::clone(&writer), events_rx, Arc::clone(&shared));
    entry(ctx).await;

    // Entry returned (voluntarily or after observing quit): tear down.
    shared.quit.cancel();
    writer.close().await;
    if reader.await.is_err() {
        warn!(session_id, "reader task did not shut down cleanly");
    }
    info!(session_id, "session closed");
}

/// Decode inbound messages until the transport or the session ends.
async fn read_loop(
    mut stream: SplitStream<WebSocket>,
    events: mpsc::Sender<Event>,
    shared: Arc<Shared>,
    session_id: u64,
) {
    'outer: loop {
        let msg = tokio::select! {
            () = shared.quit.cancelled() => break,
            msg = stream.next() => msg,
        };
        let Some(msg) = msg else {
            info!(session_id, "client disconnected");
            break;
        };
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                warn!(session_id, error = %e, "inbound read failed");
                break;
            }
        };
        match msg {
            Message::Binary(bytes) => {
                let frames = match Inbound::decode_all(&bytes) {
                    Ok(frames) => frames,
                    Err(e) => {
                        error!(session_id, error = %e, "inbound decode failed; closing session");
                        break;
                    }
                };
                for frame in frames {
                    match frame {
                        Inbound::Event(event) => {
                            if let Event::Resize { width, height } = &event {
                                shared.set_size(*width, *height);
                            }
                            // Bounded channel, blocking send: a slow consumer
                            // stalls this loop instead of losing events.
                            if events.send(event).await.is_err() {
                                // Receiver gone — the entry function returned.
                                break 'outer;
                            }
                        }
                        Inbound::Reply(reply) => shared.route_reply(reply, session_id),
                    }
                }
            }
            Message::Close(_) => {
                info!(session_id, "client sent close");
                break;
            }
            // Pings/pongs are handled by axum; text frames are not part of
            // the protocol.
            _ => {}
        }
    }
    shared.quit.cancel();
}

// =============================================================================
// TEST SUPPORT
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A context wired to an in-memory sink and a hand-fed event channel,
    /// for exercising buffering and query logic without a socket.
    pub(crate) fn mock_context() -> MockSession {
        let quit = CancellationToken::new();
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let writer = Arc::new(Writer::new(SinkKind::Mock(out_tx), quit.clone()));
        let shared = Arc::new(Shared::new(quit, 100, 80));
        let (events_tx, events_rx) = mpsc::channel(16);
        let ctx = Context::new(writer, events_rx, Arc::clone(&shared));
        MockSession { ctx, outbound: out_rx, events: events_tx, shared }
    }

    pub(crate) struct MockSession {
        pub(crate) ctx: Context,
        /// Messages the context flushed, one `Vec<u8>` per transport message.
        pub(crate) outbound: mpsc::UnboundedReceiver<Vec<u8>>,
        pub(crate) events: mpsc::Sender<Event>,
        pub(crate) shared: Arc<Shared>,
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
