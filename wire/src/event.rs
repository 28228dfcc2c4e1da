//! Event frames: input and query replies sent client→server.
//!
//! Events split into two categories. [`Event`] values are input the user's
//! drawing program consumes from the session's event channel; [`Reply`]
//! values answer a synchronous query and never reach user code. The session
//! reader tells them apart through [`Inbound::decode`].
//!
//! The shim emits one event per transport message, but the decoder accepts
//! several back to back (loop until the reader is empty).

use crate::CodecError;
use crate::codec::{
    Reader, put_blob, put_bool, put_f64, put_i32, put_str, put_u8, put_u32,
};
use crate::types::{Modifiers, TextMetrics};

/// Stable event opcodes.
pub mod op {
    pub const RESIZE: u8 = 0;
    pub const MOUSE_MOVE: u8 = 1;
    pub const MOUSE_DOWN: u8 = 2;
    pub const MOUSE_UP: u8 = 3;
    pub const MOUSE_ENTER: u8 = 4;
    pub const MOUSE_LEAVE: u8 = 5;
    pub const MOUSE_OVER: u8 = 6;
    pub const MOUSE_OUT: u8 = 7;
    pub const CLICK: u8 = 8;
    pub const DBL_CLICK: u8 = 9;
    pub const AUX_CLICK: u8 = 10;
    pub const CONTEXT_MENU: u8 = 11;
    pub const WHEEL: u8 = 12;
    pub const KEY_DOWN: u8 = 13;
    pub const KEY_UP: u8 = 14;
    pub const KEY_PRESS: u8 = 15;
    pub const TOUCH_START: u8 = 16;
    pub const TOUCH_MOVE: u8 = 17;
    pub const TOUCH_END: u8 = 18;
    pub const TOUCH_CANCEL: u8 = 19;
    pub const FOCUS: u8 = 20;
    pub const BLUR: u8 = 21;
    pub const IMAGE_LOADED: u8 = 22;
    pub const TEXT_METRICS: u8 = 23;
    pub const IMAGE_DATA: u8 = 24;
    pub const POINT_IN_PATH: u8 = 25;
    pub const POINT_IN_STROKE: u8 = 26;
}

/// Position and identity of one active touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub id: i32,
    pub x: i32,
    pub y: i32,
}

/// Pointer state shared by every mouse-family event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseData {
    pub x: i32,
    pub y: i32,
    /// DOM `buttons` bitmask: bit 0 primary, bit 1 secondary, bit 2 middle.
    pub buttons: u8,
    pub modifiers: Modifiers,
}

/// An input event delivered to the drawing program.
///
/// A closed sum over the input half of the event opcode table; the session
/// delivers these in the order the browser observed them.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The canvas changed size (initial layout or window resize).
    Resize { width: i32, height: i32 },
    MouseMove(MouseData),
    MouseDown(MouseData),
    MouseUp(MouseData),
    MouseEnter(MouseData),
    MouseLeave(MouseData),
    MouseOver(MouseData),
    MouseOut(MouseData),
    Click(MouseData),
    DblClick(MouseData),
    AuxClick(MouseData),
    ContextMenu(MouseData),
    Wheel {
        x: i32,
        y: i32,
        delta_x: f64,
        delta_y: f64,
        delta_z: f64,
        /// DOM `deltaMode`: 0 pixels, 1 lines, 2 pages.
        delta_mode: u8,
        modifiers: Modifiers,
    },
    KeyDown { key: String, code: String, modifiers: Modifiers, repeat: bool },
    KeyUp { key: String, code: String, modifiers: Modifiers, repeat: bool },
    KeyPress { key: String, code: String, modifiers: Modifiers, repeat: bool },
    TouchStart(Vec<TouchPoint>),
    TouchMove(Vec<TouchPoint>),
    TouchEnd(Vec<TouchPoint>),
    TouchCancel(Vec<TouchPoint>),
    Focus,
    Blur,
}

/// A reply to a synchronous query, consumed by the draw context.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Outcome of a load-image command. `ok: false` means the fetch failed
    /// browser-side (404, decode error); dimensions are zero in that case.
    ImageLoaded { id: u32, ok: bool, width: u32, height: u32 },
    TextMetrics(TextMetrics),
    ImageData { width: u32, height: u32, pixels: Vec<u8> },
    PointInPath(bool),
    PointInStroke(bool),
}

/// One decoded inbound frame: either input for the user or a query reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Event(Event),
    Reply(Reply),
}

fn mouse(r: &mut Reader<'_>) -> Result<MouseData, CodecError> {
    Ok(MouseData {
        x: r.i32()?,
        y: r.i32()?,
        buttons: r.u8()?,
        modifiers: Modifiers::from_byte(r.u8()?),
    })
}

fn key(r: &mut Reader<'_>) -> Result<(String, String, Modifiers, bool), CodecError> {
    Ok((r.string()?, r.string()?, Modifiers::from_byte(r.u8()?), r.bool()?))
}

fn touches(r: &mut Reader<'_>) -> Result<Vec<TouchPoint>, CodecError> {
    let count = r.u8()? as usize;
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        points.push(TouchPoint { id: r.i32()?, x: r.i32()?, y: r.i32()? });
    }
    Ok(points)
}

fn put_mouse(buf: &mut Vec<u8>, m: &MouseData) {
    put_i32(buf, m.x);
    put_i32(buf, m.y);
    put_u8(buf, m.buttons);
    put_u8(buf, m.modifiers.to_byte());
}

fn put_key(buf: &mut Vec<u8>, key: &str, code: &str, modifiers: Modifiers, repeat: bool) {
    put_str(buf, key);
    put_str(buf, code);
    put_u8(buf, modifiers.to_byte());
    put_bool(buf, repeat);
}

fn put_touches(buf: &mut Vec<u8>, points: &[TouchPoint]) {
    put_u8(buf, points.len() as u8);
    for p in points {
        put_i32(buf, p.id);
        put_i32(buf, p.x);
        put_i32(buf, p.y);
    }
}

impl Inbound {
    /// Decode one inbound frame, leaving the reader at the next.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownEvent`] for an opcode outside the table,
    /// or the underlying field error for malformed arguments.
    pub fn decode(r: &mut Reader<'_>) -> Result<Inbound, CodecError> {
        let opcode = r.u8()?;
        let inbound = match opcode {
            op::RESIZE => Inbound::Event(Event::Resize { width: r.i32()?, height: r.i32()? }),
            op::MOUSE_MOVE => Inbound::Event(Event::MouseMove(mouse(r)?)),
            op::MOUSE_DOWN => Inbound::Event(Event::MouseDown(mouse(r)?)),
            op::MOUSE_UP => Inbound::Event(Event::MouseUp(mouse(r)?)),
            op::MOUSE_ENTER => Inbound::Event(Event::MouseEnter(mouse(r)?)),
            op::MOUSE_LEAVE => Inbound::Event(Event::MouseLeave(mouse(r)?)),
            op::MOUSE_OVER => Inbound::Event(Event::MouseOver(mouse(r)?)),
            op::MOUSE_OUT => Inbound::Event(Event::MouseOut(mouse(r)?)),
            op::CLICK => Inbound::Event(Event::Click(mouse(r)?)),
            op::DBL_CLICK => Inbound::Event(Event::DblClick(mouse(r)?)),
            op::AUX_CLICK => Inbound::Event(Event::AuxClick(mouse(r)?)),
            op::CONTEXT_MENU => Inbound::Event(Event::ContextMenu(mouse(r)?)),
            op::WHEEL => Inbound::Event(Event::Wheel {
                x: r.i32()?,
                y: r.i32()?,
                delta_x: r.f64()?,
                delta_y: r.f64()?,
                delta_z: r.f64()?,
                delta_mode: r.u8()?,
                modifiers: Modifiers::from_byte(r.u8()?),
            }),
            op::KEY_DOWN => {
                let (key, code, modifiers, repeat) = key(r)?;
                Inbound::Event(Event::KeyDown { key, code, modifiers, repeat })
            }
            op::KEY_UP => {
                let (key, code, modifiers, repeat) = key(r)?;
                Inbound::Event(Event::KeyUp { key, code, modifiers, repeat })
            }
            op::KEY_PRESS => {
                let (key, code, modifiers, repeat) = key(r)?;
                Inbound::Event(Event::KeyPress { key, code, modifiers, repeat })
            }
            op::TOUCH_START => Inbound::Event(Event::TouchStart(touches(r)?)),
            op::TOUCH_MOVE => Inbound::Event(Event::TouchMove(touches(r)?)),
            op::TOUCH_END => Inbound::Event(Event::TouchEnd(touches(r)?)),
            op::TOUCH_CANCEL => Inbound::Event(Event::TouchCancel(touches(r)?)),
            op::FOCUS => Inbound::Event(Event::Focus),
            op::BLUR => Inbound::Event(Event::Blur),
            op::IMAGE_LOADED => Inbound::Reply(Reply::ImageLoaded {
                id: r.u32()?,
                ok: r.bool()?,
                width: r.u32()?,
                height: r.u32()?,
            }),
            op::TEXT_METRICS => Inbound::Reply(Reply::TextMetrics(TextMetrics {
                width: r.f64()?,
                actual_bounding_box_left: r.f64()?,
                actual_bounding_box_right: r.f64()?,
                actual_bounding_box_ascent: r.f64()?,
                actual_bounding_box_descent: r.f64()?,
                font_bounding_box_ascent: r.f64()?,
                font_bounding_box_descent: r.f64()?,
            })),
            op::IMAGE_DATA => Inbound::Reply(Reply::ImageData {
                width: r.u32()?,
                height: r.u32()?,
                pixels: r.blob()?,
            }),
            op::POINT_IN_PATH => Inbound::Reply(Reply::PointInPath(r.bool()?)),
            op::POINT_IN_STROKE => Inbound::Reply(Reply::PointInStroke(r.bool()?)),
            unknown => return Err(CodecError::UnknownEvent(unknown)),
        };
        Ok(inbound)
    }

    /// Decode every frame in one transport message.
    ///
    /// The reference shim sends one event per message, but batches are
    /// permitted on the wire and handled here.
    ///
    /// # Errors
    ///
    /// Returns the first decode error; partially decoded frames before the
    /// error are discarded by the caller (decode errors are session-fatal).
    pub fn decode_all(bytes: &[u8]) -> Result<Vec<Inbound>, CodecError> {
        let mut r = Reader::new(bytes);
        let mut frames = Vec::new();
        while !r.is_empty() {
            frames.push(Inbound::decode(&mut r)?);
        }
        Ok(frames)
    }

    /// Append this frame's encoding to `buf`. Mirror of [`Inbound::decode`];
    /// the canonical producer is the browser shim, this side exists for
    /// tests and native clients.
    pub fn encode(&self, buf: &mut Vec<u8>) {
        match self {
            Inbound::Event(event) => event.encode(buf),
            Inbound::Reply(reply) => reply.encode(buf),
        }
    }
}

impl Event {
    /// The wire opcode for this event.
    #[must_use]
    pub fn opcode(&self) -> u8 {
        match self {
            Event::Resize { .. } => op::RESIZE,
            Event::MouseMove(_) => op::MOUSE_MOVE,
            Event::MouseDown(_) => op::MOUSE_DOWN,
            Event::MouseUp(_) => op::MOUSE_UP,
            Event::MouseEnter(_) => op::MOUSE_ENTER,
            Event::MouseLeave(_) => op::MOUSE_LEAVE,
            Event::MouseOver(_) => op::MOUSE_OVER,
            Event::MouseOut(_) => op::MOUSE_OUT,
            Event::Click(_) => op::CLICK,
            Event::DblClick(_) => op::DBL_CLICK,
            Event::AuxClick(_) => op::AUX_CLICK,
            Event::ContextMenu(_) => op::CONTEXT_MENU,
            Event::Wheel { .. } => op::WHEEL,
            Event::KeyDown { .. } => op::KEY_DOWN,
            Event::KeyUp { .. } => op::KEY_UP,
            Event::KeyPress { .. } => op::KEY_PRESS,
            Event::TouchStart(_) => op::TOUCH_START,
            Event::TouchMove(_) => op::TOUCH_MOVE,
            Event::TouchEnd(_) => op::TOUCH_END,
            Event::TouchCancel(_) => op::TOUCH_CANCEL,
            Event::Focus => op::FOCUS,
            Event::Blur => op::BLUR,
        }
    }

    /// Append this event's complete encoding to `buf`.
    pub fn encode(&self, buf: &mut Vec<u8>) {
        put_u8(buf, self.opcode());
        match self {
            Event::Resize { width, height } => {
                put_i32(buf, *width);
                put_i32(buf, *height);
            }
            Event::MouseMove(m)
            | Event::MouseDown(m)
            | Event::MouseUp(m)
            | Event::MouseEnter(m)
            | Event::MouseLeave(m)
            | Event::MouseOver(m)
            | Event::MouseOut(m)
            | Event::Click(m)
            | Event::DblClick(m)
            | Event::AuxClick(m)
            | Event::ContextMenu(m) => put_mouse(buf, m),
            Event::Wheel { x, y, delta_x, delta_y, delta_z, delta_mode, modifiers } => {
                put_i32(buf, *x);
                put_i32(buf, *y);
                put_f64(buf, *delta_x);
                put_f64(buf, *delta_y);
                put_f64(buf, *delta_z);
                put_u8(buf, *delta_mode);
                put_u8(buf, modifiers.to_byte());
            }
            Event::KeyDown { key, code, modifiers, repeat }
            | Event::KeyUp { key, code, modifiers, repeat }
            | Event::KeyPress { key, code, modifiers, repeat } => {
                put_key(buf, key, code, *modifiers, *repeat);
            }
            Event::TouchStart(points)
            | Event::TouchMove(points)
            | Event::TouchEnd(points)
            | Event::TouchCancel(points) => put_touches(buf, points),
            Event::Focus | Event::Blur => {}
        }
    }

    /// Encode into a fresh buffer.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }
}

impl Reply {
    /// The wire opcode for this reply.
    #[must_use]
    pub fn opcode(&self) -> u8 {
        match self {
            Reply::ImageLoaded { .. } => op::IMAGE_LOADED,
            Reply::TextMetrics(_) => op::TEXT_METRICS,
            Reply::ImageData { .. } => op::IMAGE_DATA,
            Reply::PointInPath(_) => op::POINT_IN_PATH,
            Reply::PointInStroke(_) => op::POINT_IN_STROKE,
        }
    }

    /// Append this reply's complete encoding to `buf`.
    pub fn encode(&self, buf: &mut Vec<u8>) {
        put_u8(buf, self.opcode());
        match self {
            Reply::ImageLoaded { id, ok, width, height } => {
                put_u32(buf, *id);
                put_bool(buf, *ok);
                put_u32(buf, *width);
                put_u32(buf, *height);
            }
            Reply::TextMetrics(m) => {
                for v in [
                    m.width,
                    m.actual_bounding_box_left,
                    m.actual_bounding_box_right,
                    m.actual_bounding_box_ascent,
                    m.actual_bounding_box_descent,
                    m.font_bounding_box_ascent,
                    m.font_bounding_box_descent,
                ] {
                    put_f64(buf, v);
                }
            }
            Reply::ImageData { width, height, pixels } => {
                put_u32(buf, *width);
                put_u32(buf, *height);
                put_blob(buf, pixels);
            }
            Reply::PointInPath(result) | Reply::PointInStroke(result) => {
                put_bool(buf, *result);
            }
        }
    }

    /// Encode into a fresh buffer.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }
}

#[cfg(test)]
#[path = "event_test.rs"]
mod tests;
