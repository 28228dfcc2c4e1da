//! Remote 2D canvas: draw on a browser from native Rust code.
//!
//! A drawing program calls [`serve`] with an entry function. Each browser
//! that connects gets its own [`Context`] — a 2D drawing surface whose calls
//! are encoded into a compact binary command stream, batched in memory, and
//! shipped to the browser as one WebSocket message per [`Context::flush`].
//! Input events (mouse, keyboard, touch, resize) flow back and are consumed
//! from the context's event channel, so the program can treat the remote
//! canvas like a local window.
//!
//! ```no_run
//! use canvas::{Color, Context, EventMask, Options};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), canvas::ServeError> {
//!     let options = Options::default()
//!         .with_title("demo")
//!         .with_size(300, 200)
//!         .with_event_mask(EventMask::MOUSE_DOWN);
//!     canvas::serve("127.0.0.1:8080", options, |mut ctx: Context| async move {
//!         ctx.set_fill_color(Color::rgb(200, 0, 0));
//!         ctx.fill_rect(10.0, 10.0, 50.0, 50.0);
//!         if ctx.flush().await.is_err() {
//!             return;
//!         }
//!         while let Some(event) = ctx.next_event().await {
//!             tracing::info!(?event, "input");
//!         }
//!     })
//!     .await
//! }
//! ```
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`context`]  | The drawing API: buffered commands, queries, flush |
//! | [`handle`]   | Owned handles for images, gradients, patterns, pixel buffers |
//! | [`options`]  | Per-server configuration |
//! | [`server`]   | HTTP listener, static assets, WebSocket upgrade |
//! | [`error`]    | Error types |
//!
//! ## Backpressure
//!
//! Input events are delivered through a bounded channel
//! ([`Options::with_event_capacity`], default 16). When the consumer falls
//! behind, the session's reader blocks rather than dropping events, which
//! preserves ordering at the cost of letting a slow consumer stall inbound
//! processing.

pub mod context;
pub mod error;
pub mod handle;
pub mod options;
pub mod server;

mod registry;
mod session;

pub use context::{Context, Pixels};
pub use error::{ServeError, SessionError};
pub use handle::{Gradient, Image, ImageData, Pattern};
pub use options::Options;
pub use server::{app, serve};

// Wire-level types that appear in the public drawing API.
pub use wire::event::MouseData;
pub use wire::{
    Color, CompositeOperation, Cursor, Event, EventMask, FillRule, LineCap, LineJoin, Modifiers,
    Repetition, SmoothingQuality, TextAlign, TextBaseline, TextDirection, TextMetrics, TouchPoint,
};
