//! Handles for browser-resident resources.
//!
//! A handle owns nothing but a kind-tagged ID; the browser owns the actual
//! object. Dropping a handle queues a release command so the browser may
//! free it — the context drains the queue into the command stream, which
//! keeps the release ordered after every prior use of the ID.

use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;
use wire::ResourceKind;

// =============================================================================
// RELEASE QUEUE
// =============================================================================

/// IDs dropped since the context last appended a command. Shared between
/// every handle of a session and its context; pushed from `Drop` (sync),
/// drained on the context's thread.
#[derive(Debug, Default)]
pub(crate) struct ReleaseQueue(Mutex<Vec<(ResourceKind, u32)>>);

impl ReleaseQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, kind: ResourceKind, id: u32) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push((kind, id));
        }
    }

    /// Take everything queued so far, in drop order.
    pub(crate) fn drain(&self) -> Vec<(ResourceKind, u32)> {
        match self.0.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        }
    }
}

// =============================================================================
// IMAGE LOAD STATE
// =============================================================================

/// Load outcome shared between an [`Image`] handle and the session reader.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LoadState {
    pub(crate) done: bool,
    pub(crate) ok: bool,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

#[derive(Debug, Default)]
pub(crate) struct ImageState {
    inner: Mutex<LoadState>,
    notify: tokio::sync::Notify,
}

impl ImageState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record the image-loaded reply and wake any waiter.
    pub(crate) fn fulfill(&self, ok: bool, width: u32, height: u32) {
        if let Ok(mut state) = self.inner.lock() {
            *state = LoadState { done: true, ok, width, height };
        }
        self.notify.notify_waiters();
    }

    pub(crate) fn snapshot(&self) -> LoadState {
        match self.inner.lock() {
            Ok(state) => *state,
            Err(_) => LoadState::default(),
        }
    }
}

// =============================================================================
// HANDLES
// =============================================================================

/// A remote image created by [`Context::load_image`](crate::Context::load_image).
///
/// The handle is usable for draw-image calls immediately; the browser falls
/// back to skipping draws until the fetch completes. Dimensions read zero
/// until the load reply arrives.
#[derive(Debug)]
pub struct Image {
    id: u32,
    state: Arc<ImageState>,
    quit: CancellationToken,
    releases: Arc<ReleaseQueue>,
}

impl Image {
    pub(crate) fn new(
        id: u32,
        state: Arc<ImageState>,
        quit: CancellationToken,
        releases: Arc<ReleaseQueue>,
    ) -> Self {
        Self { id, state, quit, releases }
    }

    /// Protocol ID of this image.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Pixel width, or 0 before the load reply (or after a failed load).
    #[must_use]
    pub fn width(&self) -> u32 {
        self.state.snapshot().width
    }

    /// Pixel height, or 0 before the load reply (or after a failed load).
    #[must_use]
    pub fn height(&self) -> u32 {
        self.state.snapshot().height
    }

    /// Whether the load reply has arrived, successful or not.
    #[must_use]
    pub fn loaded(&self) -> bool {
        self.state.snapshot().done
    }

    /// Wait for the load reply. Returns whether the browser loaded the
    /// image; resolves `false` without waiting further if the session ends
    /// first.
    pub async fn wait(&self) -> bool {
        loop {
            let notified = self.state.notify.notified();
            let state = self.state.snapshot();
            if state.done {
                return state.ok;
            }
            tokio::select! {
                () = notified => {}
                () = self.quit.cancelled() => {
                    let state = self.state.snapshot();
                    return state.done && state.ok;
                }
            }
        }
    }
}

impl Drop for Image {
    fn drop(&mut self) {
        self.releases.push(ResourceKind::Image, self.id);
    }
}

/// A remote linear or radial gradient.
#[derive(Debug)]
pub struct Gradient {
    id: u32,
    releases: Arc<ReleaseQueue>,
}

impl Gradient {
    pub(crate) fn new(id: u32, releases: Arc<ReleaseQueue>) -> Self {
        Self { id, releases }
    }

    /// Protocol ID of this gradient.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Drop for Gradient {
    fn drop(&mut self) {
        self.releases.push(ResourceKind::Gradient, self.id);
    }
}

/// A remote fill/stroke pattern built from an [`Image`].
#[derive(Debug)]
pub struct Pattern {
    id: u32,
    releases: Arc<ReleaseQueue>,
}

impl Pattern {
    pub(crate) fn new(id: u32, releases: Arc<ReleaseQueue>) -> Self {
        Self { id, releases }
    }

    /// Protocol ID of this pattern.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Drop for Pattern {
    fn drop(&mut self) {
        self.releases.push(ResourceKind::Pattern, self.id);
    }
}

/// A remote pixel buffer created by
/// [`Context::create_image_data`](crate::Context::create_image_data).
#[derive(Debug)]
pub struct ImageData {
    id: u32,
    width: u32,
    height: u32,
    releases: Arc<ReleaseQueue>,
}

impl ImageData {
    pub(crate) fn new(id: u32, width: u32, height: u32, releases: Arc<ReleaseQueue>) -> Self {
        Self { id, width, height, releases }
    }

    /// Protocol ID of this pixel buffer.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for ImageData {
    fn drop(&mut self) {
        self.releases.push(ResourceKind::ImageData, self.id);
    }
}

#[cfg(test)]
#[path = "handle_test.rs"]
mod tests;
