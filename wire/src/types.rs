//! Protocol-level value types: colors, style enums, masks.
//!
//! Every enum here is serialized as a single `u8` with the numeric mapping
//! fixed by its discriminants. The browser shim carries mirror tables keyed
//! by the same numbers, so variants must never be renumbered — new values
//! are appended.

use crate::CodecError;

// =============================================================================
// COLOR
// =============================================================================

/// An sRGB color with 8-bit channels. On the wire: four bytes `R,G,B,A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque color from RGB channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

// =============================================================================
// STYLE ENUMS
// =============================================================================

/// Line endcap style (`lineCap`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LineCap {
    #[default]
    Butt = 0,
    Round = 1,
    Square = 2,
}

impl TryFrom<u8> for LineCap {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, CodecError> {
        match value {
            0 => Ok(Self::Butt),
            1 => Ok(Self::Round),
            2 => Ok(Self::Square),
            _ => Err(CodecError::InvalidEnum { what: "line cap", value }),
        }
    }
}

/// Line corner style (`lineJoin`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LineJoin {
    #[default]
    Miter = 0,
    Round = 1,
    Bevel = 2,
}

impl TryFrom<u8> for LineJoin {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, CodecError> {
        match value {
            0 => Ok(Self::Miter),
            1 => Ok(Self::Round),
            2 => Ok(Self::Bevel),
            _ => Err(CodecError::InvalidEnum { what: "line join", value }),
        }
    }
}

/// Path winding rule for fill, clip, and point-in-path tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FillRule {
    #[default]
    NonZero = 0,
    EvenOdd = 1,
}

impl TryFrom<u8> for FillRule {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, CodecError> {
        match value {
            0 => Ok(Self::NonZero),
            1 => Ok(Self::EvenOdd),
            _ => Err(CodecError::InvalidEnum { what: "fill rule", value }),
        }
    }
}

/// Horizontal text alignment (`textAlign`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TextAlign {
    #[default]
    Start = 0,
    End = 1,
    Left = 2,
    Right = 3,
    Center = 4,
}

impl TryFrom<u8> for TextAlign {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, CodecError> {
        match value {
            0 => Ok(Self::Start),
            1 => Ok(Self::End),
            2 => Ok(Self::Left),
            3 => Ok(Self::Right),
            4 => Ok(Self::Center),
            _ => Err(CodecError::InvalidEnum { what: "text align", value }),
        }
    }
}

/// Vertical text anchor (`textBaseline`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TextBaseline {
    #[default]
    Alphabetic = 0,
    Top = 1,
    Hanging = 2,
    Middle = 3,
    Ideographic = 4,
    Bottom = 5,
}

impl TryFrom<u8> for TextBaseline {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, CodecError> {
        match value {
            0 => Ok(Self::Alphabetic),
            1 => Ok(Self::Top),
            2 => Ok(Self::Hanging),
            3 => Ok(Self::Middle),
            4 => Ok(Self::Ideographic),
            5 => Ok(Self::Bottom),
            _ => Err(CodecError::InvalidEnum { what: "text baseline", value }),
        }
    }
}

/// Text direction (`direction`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TextDirection {
    #[default]
    Inherit = 0,
    Ltr = 1,
    Rtl = 2,
}

impl TryFrom<u8> for TextDirection {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, CodecError> {
        match value {
            0 => Ok(Self::Inherit),
            1 => Ok(Self::Ltr),
            2 => Ok(Self::Rtl),
            _ => Err(CodecError::InvalidEnum { what: "text direction", value }),
        }
    }
}

/// Image scaling quality (`imageSmoothingQuality`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SmoothingQuality {
    #[default]
    Low = 0,
    Medium = 1,
    High = 2,
}

impl TryFrom<u8> for SmoothingQuality {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, CodecError> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            _ => Err(CodecError::InvalidEnum { what: "smoothing quality", value }),
        }
    }
}

/// Pattern tiling mode (`createPattern` repetition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Repetition {
    #[default]
    Repeat = 0,
    RepeatX = 1,
    RepeatY = 2,
    NoRepeat = 3,
}

impl TryFrom<u8> for Repetition {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, CodecError> {
        match value {
            0 => Ok(Self::Repeat),
            1 => Ok(Self::RepeatX),
            2 => Ok(Self::RepeatY),
            3 => Ok(Self::NoRepeat),
            _ => Err(CodecError::InvalidEnum { what: "repetition", value }),
        }
    }
}

/// Compositing and blending mode (`globalCompositeOperation`).
///
/// Ordering matches the CSS compositing spec listing; the shim's keyword
/// table is indexed by these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum CompositeOperation {
    #[default]
    SourceOver = 0,
    SourceIn = 1,
    SourceOut = 2,
    SourceAtop = 3,
    DestinationOver = 4,
    DestinationIn = 5,
    DestinationOut = 6,
    DestinationAtop = 7,
    Lighter = 8,
    Copy = 9,
    Xor = 10,
    Multiply = 11,
    Screen = 12,
    Overlay = 13,
    Darken = 14,
    Lighten = 15,
    ColorDodge = 16,
    ColorBurn = 17,
    HardLight = 18,
    SoftLight = 19,
    Difference = 20,
    Exclusion = 21,
    Hue = 22,
    Saturation = 23,
    Color = 24,
    Luminosity = 25,
}

impl TryFrom<u8> for CompositeOperation {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, CodecError> {
        match value {
            0 => Ok(Self::SourceOver),
            1 => Ok(Self::SourceIn),
            2 => Ok(Self::SourceOut),
            3 => Ok(Self::SourceAtop),
            4 => Ok(Self::DestinationOver),
            5 => Ok(Self::DestinationIn),
            6 => Ok(Self::DestinationOut),
            7 => Ok(Self::DestinationAtop),
            8 => Ok(Self::Lighter),
            9 => Ok(Self::Copy),
            10 => Ok(Self::Xor),
            11 => Ok(Self::Multiply),
            12 => Ok(Self::Screen),
            13 => Ok(Self::Overlay),
            14 => Ok(Self::Darken),
            15 => Ok(Self::Lighten),
            16 => Ok(Self::ColorDodge),
            17 => Ok(Self::ColorBurn),
            18 => Ok(Self::HardLight),
            19 => Ok(Self::SoftLight),
            20 => Ok(Self::Difference),
            21 => Ok(Self::Exclusion),
            22 => Ok(Self::Hue),
            23 => Ok(Self::Saturation),
            24 => Ok(Self::Color),
            25 => Ok(Self::Luminosity),
            _ => Err(CodecError::InvalidEnum { what: "composite operation", value }),
        }
    }
}

/// Pointer cursor shown over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Cursor {
    #[default]
    Default = 0,
    Auto = 1,
    None = 2,
    Pointer = 3,
    Crosshair = 4,
    Move = 5,
    Text = 6,
    Wait = 7,
    Grab = 8,
    Grabbing = 9,
    NotAllowed = 10,
}

impl TryFrom<u8> for Cursor {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, CodecError> {
        match value {
            0 => Ok(Self::Default),
            1 => Ok(Self::Auto),
            2 => Ok(Self::None),
            3 => Ok(Self::Pointer),
            4 => Ok(Self::Crosshair),
            5 => Ok(Self::Move),
            6 => Ok(Self::Text),
            7 => Ok(Self::Wait),
            8 => Ok(Self::Grab),
            9 => Ok(Self::Grabbing),
            10 => Ok(Self::NotAllowed),
            _ => Err(CodecError::InvalidEnum { what: "cursor", value }),
        }
    }
}

/// Kind tag for browser-resident resources addressed by ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ResourceKind {
    Image = 0,
    Gradient = 1,
    Pattern = 2,
    ImageData = 3,
}

impl TryFrom<u8> for ResourceKind {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, CodecError> {
        match value {
            0 => Ok(Self::Image),
            1 => Ok(Self::Gradient),
            2 => Ok(Self::Pattern),
            3 => Ok(Self::ImageData),
            _ => Err(CodecError::InvalidEnum { what: "resource kind", value }),
        }
    }
}

// =============================================================================
// MODIFIERS
// =============================================================================

/// Keyboard modifier keys held during an input event.
///
/// On the wire: one byte, bit 0 = alt, bit 1 = ctrl, bit 2 = meta,
/// bit 3 = shift. Unknown bits are ignored on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    const ALT: u8 = 1;
    const CTRL: u8 = 1 << 1;
    const META: u8 = 1 << 2;
    const SHIFT: u8 = 1 << 3;

    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        Self {
            alt: byte & Self::ALT != 0,
            ctrl: byte & Self::CTRL != 0,
            meta: byte & Self::META != 0,
            shift: byte & Self::SHIFT != 0,
        }
    }

    #[must_use]
    pub fn to_byte(self) -> u8 {
        let mut byte = 0;
        if self.alt {
            byte |= Self::ALT;
        }
        if self.ctrl {
            byte |= Self::CTRL;
        }
        if self.meta {
            byte |= Self::META;
        }
        if self.shift {
            byte |= Self::SHIFT;
        }
        byte
    }
}

// =============================================================================
// EVENT MASK
// =============================================================================

/// Which input event kinds the browser shim should listen for.
///
/// Sent in the Config command; the shim attaches DOM listeners only for
/// enabled kinds. Mouse move is opt-in because of its frequency. Resize,
/// focus handling for replies, and query replies are always delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventMask(u32);

impl EventMask {
    pub const NONE: EventMask = EventMask(0);
    pub const MOUSE_MOVE: EventMask = EventMask(1);
    pub const MOUSE_DOWN: EventMask = EventMask(1 << 1);
    pub const MOUSE_UP: EventMask = EventMask(1 << 2);
    pub const MOUSE_ENTER: EventMask = EventMask(1 << 3);
    pub const MOUSE_LEAVE: EventMask = EventMask(1 << 4);
    pub const MOUSE_OVER: EventMask = EventMask(1 << 5);
    pub const MOUSE_OUT: EventMask = EventMask(1 << 6);
    pub const CLICK: EventMask = EventMask(1 << 7);
    pub const DBL_CLICK: EventMask = EventMask(1 << 8);
    pub const AUX_CLICK: EventMask = EventMask(1 << 9);
    pub const CONTEXT_MENU: EventMask = EventMask(1 << 10);
    pub const WHEEL: EventMask = EventMask(1 << 11);
    pub const KEY_DOWN: EventMask = EventMask(1 << 12);
    pub const KEY_UP: EventMask = EventMask(1 << 13);
    pub const KEY_PRESS: EventMask = EventMask(1 << 14);
    pub const TOUCH_START: EventMask = EventMask(1 << 15);
    pub const TOUCH_MOVE: EventMask = EventMask(1 << 16);
    pub const TOUCH_END: EventMask = EventMask(1 << 17);
    pub const TOUCH_CANCEL: EventMask = EventMask(1 << 18);
    pub const FOCUS: EventMask = EventMask(1 << 19);
    pub const BLUR: EventMask = EventMask(1 << 20);

    /// All mouse events except move.
    pub const MOUSE_BUTTONS: EventMask = EventMask(
        Self::MOUSE_DOWN.0
            | Self::MOUSE_UP.0
            | Self::CLICK.0
            | Self::DBL_CLICK.0
            | Self::AUX_CLICK.0
            | Self::CONTEXT_MENU.0,
    );
    /// Every mouse event, including move, crossing, and wheel.
    pub const MOUSE: EventMask = EventMask(
        Self::MOUSE_BUTTONS.0
            | Self::MOUSE_MOVE.0
            | Self::MOUSE_ENTER.0
            | Self::MOUSE_LEAVE.0
            | Self::MOUSE_OVER.0
            | Self::MOUSE_OUT.0
            | Self::WHEEL.0,
    );
    pub const KEYBOARD: EventMask =
        EventMask(Self::KEY_DOWN.0 | Self::KEY_UP.0 | Self::KEY_PRESS.0);
    pub const TOUCH: EventMask = EventMask(
        Self::TOUCH_START.0 | Self::TOUCH_MOVE.0 | Self::TOUCH_END.0 | Self::TOUCH_CANCEL.0,
    );
    pub const ALL: EventMask =
        EventMask(Self::MOUSE.0 | Self::KEYBOARD.0 | Self::TOUCH.0 | Self::FOCUS.0 | Self::BLUR.0);

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Whether every bit in `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: EventMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for EventMask {
    type Output = EventMask;

    fn bitor(self, rhs: EventMask) -> EventMask {
        EventMask(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventMask {
    fn bitor_assign(&mut self, rhs: EventMask) {
        self.0 |= rhs.0;
    }
}

// =============================================================================
// TEXT METRICS
// =============================================================================

/// Measurement of a text run, mirroring the browser's `TextMetrics`.
/// Carried by the measure-text reply.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Advance width of the text.
    pub width: f64,
    pub actual_bounding_box_left: f64,
    pub actual_bounding_box_right: f64,
    pub actual_bounding_box_ascent: f64,
    pub actual_bounding_box_descent: f64,
    pub font_bounding_box_ascent: f64,
    pub font_bounding_box_descent: f64,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
