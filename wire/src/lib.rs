//! Binary wire protocol for the remote canvas.
//!
//! This crate owns the wire representation shared by the server and the
//! browser shim: command frames flowing server→client and event frames
//! flowing client→server. Both sides must agree on the opcode tables and
//! argument encodings defined here, so the numbering is stable and densely
//! packed (the shim dispatches through a flat array indexed by opcode).
//!
//! ## Encoding rules
//!
//! All multi-byte values are big-endian. Commands and events carry no length
//! prefix; the length of a frame is implicit in its opcode. Primitives:
//!
//! | Type   | Encoding |
//! |--------|----------|
//! | `u8`/`u16`/`u32`/`i32` | fixed width, big-endian |
//! | `f64`  | IEEE 754 binary64, big-endian |
//! | bool   | one byte, 0 or 1 |
//! | string | `u32` byte length, then UTF-8 bytes |
//! | blob   | `u32` byte length, then raw bytes |
//! | color  | four bytes `R,G,B,A`, sRGB, alpha 0–255 |
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`codec`]   | Bounds-checked [`codec::Reader`] and primitive encoders |
//! | [`command`] | [`Command`] — server→client drawing instructions |
//! | [`event`]   | [`Event`] / [`Reply`] — client→server input and query replies |
//! | [`types`]   | Colors, style enums, modifier and event masks |

pub mod codec;
pub mod command;
pub mod event;
pub mod types;

pub use codec::Reader;
pub use command::Command;
pub use event::{Event, Inbound, Reply, TouchPoint};
pub use types::{
    Color, CompositeOperation, Cursor, EventMask, FillRule, LineCap, LineJoin, Modifiers,
    Repetition, ResourceKind, SmoothingQuality, TextAlign, TextBaseline, TextDirection,
    TextMetrics,
};

/// Protocol version, sent as the first byte of the first outbound frame.
/// The browser shim closes the transport on mismatch.
pub const PROTOCOL_VERSION: u8 = 1;

/// Error returned when decoding a command or event frame.
///
/// Any decode failure is fatal to the session that produced it: the stream
/// has no framing to resynchronize on past a bad opcode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The frame ended before the current field was complete.
    #[error("frame truncated at offset {at}: needed {needed} more byte(s)")]
    Truncated { at: usize, needed: usize },
    /// The command opcode is not in the table.
    #[error("unknown command opcode {0}")]
    UnknownCommand(u8),
    /// The event opcode is not in the table.
    #[error("unknown event opcode {0}")]
    UnknownEvent(u8),
    /// An enum field carried an out-of-range value.
    #[error("invalid {what} value {value}")]
    InvalidEnum { what: &'static str, value: u8 },
    /// A string field was not valid UTF-8.
    #[error("invalid utf-8 in string field")]
    InvalidUtf8,
}
