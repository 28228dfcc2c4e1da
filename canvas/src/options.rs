//! Per-server configuration.
//!
//! One `Options` value configures every session a server accepts: the
//! canvas geometry and chrome the browser shim applies on connect, which
//! input events it forwards, and how the static assets are served.

use std::path::PathBuf;

use wire::command::Command;
use wire::{Color, Cursor, EventMask};

/// Configuration for [`serve`](crate::serve).
///
/// Built with [`Options::default`] plus `with_*` methods:
///
/// ```
/// use canvas::{Color, EventMask, Options};
///
/// let options = Options::default()
///     .with_title("sketchpad")
///     .with_size(1024, 768)
///     .with_background(Color::WHITE)
///     .with_event_mask(EventMask::MOUSE | EventMask::KEYBOARD);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Page title shown by the browser tab.
    pub title: String,
    /// Initial canvas width in device-independent pixels.
    pub width: u32,
    /// Initial canvas height in device-independent pixels.
    pub height: u32,
    /// Color the shim paints before the first commands arrive.
    pub background: Color,
    /// Input event kinds the shim forwards. Defaults to none; mouse move in
    /// particular is opt-in because of its frequency.
    pub event_mask: EventMask,
    /// Initial pointer cursor over the canvas.
    pub cursor: Cursor,
    /// Capacity of the per-session input event channel. When it fills, the
    /// session reader blocks (events are never dropped).
    pub event_capacity: usize,
    /// Serve static assets from this directory instead of the embedded
    /// page and shim. The directory must provide `index.html` and
    /// `canvas.js`.
    pub asset_dir: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            title: "Canvas".to_owned(),
            width: 800,
            height: 600,
            background: Color::WHITE,
            event_mask: EventMask::NONE,
            cursor: Cursor::Default,
            event_capacity: 16,
            asset_dir: None,
        }
    }
}

impl Options {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_event_mask(mut self, event_mask: EventMask) -> Self {
        self.event_mask = event_mask;
        self
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    #[must_use]
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = Some(dir.into());
        self
    }

    /// The configuration command sent as a session's first frame.
    pub(crate) fn config_command(&self) -> Command {
        Command::Config {
            width: self.width,
            height: self.height,
            title: self.title.clone(),
            background: self.background,
            event_mask: self.event_mask.bits(),
            cursor: self.cursor,
        }
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod tests;
