//! Error types for sessions and the listener.
//!
//! Buffered drawing calls never fail; everything surfaces at flush, at a
//! query, or at the listener. Transport internals are deliberately not
//! carried: by the time user code sees [`SessionError::Closed`] the session
//! is over and the quit signal has fired, so there is nothing to retry.

use wire::ResourceKind;

/// Terminal error for one session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The transport is down or the session has shut down. Terminal.
    #[error("session closed")]
    Closed,
    /// The per-session `u32` ID counter for a resource kind wrapped.
    /// Treated as fatal rather than reusing IDs.
    #[error("resource id space exhausted for {kind:?}")]
    IdSpaceExhausted { kind: ResourceKind },
    /// The browser answered a query with the wrong reply kind. Indicates a
    /// shim bug or a version mismatch that slipped past the handshake.
    #[error("unexpected reply to {query} query")]
    UnexpectedReply { query: &'static str },
}

/// Error starting or running the listener.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
