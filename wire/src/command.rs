//! Command frames: drawing instructions sent server→client.
//!
//! A command is `opcode:u8` followed by its opcode-specific arguments; there
//! is no per-command length prefix. One outbound transport message carries
//! the concatenation of every command buffered since the previous flush.
//!
//! The numbering in [`op`] is part of the external interface — the browser
//! shim dispatches through a flat array indexed by these values — so opcodes
//! are dense and append-only.

use crate::CodecError;
use crate::codec::{
    Reader, put_blob, put_bool, put_color, put_f64, put_i32, put_str, put_u8, put_u32,
};
use crate::types::{
    Color, CompositeOperation, Cursor, FillRule, LineCap, LineJoin, Repetition, ResourceKind,
    SmoothingQuality, TextAlign, TextBaseline, TextDirection,
};

/// Stable command opcodes.
pub mod op {
    pub const CONFIG: u8 = 0;
    pub const SAVE: u8 = 1;
    pub const RESTORE: u8 = 2;
    pub const FILL_STYLE_COLOR: u8 = 3;
    pub const FILL_STYLE_GRADIENT: u8 = 4;
    pub const FILL_STYLE_PATTERN: u8 = 5;
    pub const STROKE_STYLE_COLOR: u8 = 6;
    pub const STROKE_STYLE_GRADIENT: u8 = 7;
    pub const STROKE_STYLE_PATTERN: u8 = 8;
    pub const LINE_WIDTH: u8 = 9;
    pub const LINE_CAP: u8 = 10;
    pub const LINE_JOIN: u8 = 11;
    pub const MITER_LIMIT: u8 = 12;
    pub const LINE_DASH: u8 = 13;
    pub const LINE_DASH_OFFSET: u8 = 14;
    pub const GLOBAL_ALPHA: u8 = 15;
    pub const GLOBAL_COMPOSITE_OPERATION: u8 = 16;
    pub const SHADOW_COLOR: u8 = 17;
    pub const SHADOW_BLUR: u8 = 18;
    pub const SHADOW_OFFSET_X: u8 = 19;
    pub const SHADOW_OFFSET_Y: u8 = 20;
    pub const IMAGE_SMOOTHING_ENABLED: u8 = 21;
    pub const IMAGE_SMOOTHING_QUALITY: u8 = 22;
    pub const FILTER: u8 = 23;
    pub const TRANSLATE: u8 = 24;
    pub const SCALE: u8 = 25;
    pub const ROTATE: u8 = 26;
    pub const TRANSFORM: u8 = 27;
    pub const SET_TRANSFORM: u8 = 28;
    pub const RESET_TRANSFORM: u8 = 29;
    pub const CLEAR_RECT: u8 = 30;
    pub const FILL_RECT: u8 = 31;
    pub const STROKE_RECT: u8 = 32;
    pub const BEGIN_PATH: u8 = 33;
    pub const CLOSE_PATH: u8 = 34;
    pub const MOVE_TO: u8 = 35;
    pub const LINE_TO: u8 = 36;
    pub const QUADRATIC_CURVE_TO: u8 = 37;
    pub const BEZIER_CURVE_TO: u8 = 38;
    pub const ARC: u8 = 39;
    pub const ARC_TO: u8 = 40;
    pub const ELLIPSE: u8 = 41;
    pub const RECT: u8 = 42;
    pub const FILL: u8 = 43;
    pub const STROKE: u8 = 44;
    pub const CLIP: u8 = 45;
    pub const IS_POINT_IN_PATH: u8 = 46;
    pub const IS_POINT_IN_STROKE: u8 = 47;
    pub const FONT: u8 = 48;
    pub const TEXT_ALIGN: u8 = 49;
    pub const TEXT_BASELINE: u8 = 50;
    pub const DIRECTION: u8 = 51;
    pub const FILL_TEXT: u8 = 52;
    pub const STROKE_TEXT: u8 = 53;
    pub const MEASURE_TEXT: u8 = 54;
    pub const LOAD_IMAGE: u8 = 55;
    pub const DRAW_IMAGE: u8 = 56;
    pub const DRAW_IMAGE_SCALED: u8 = 57;
    pub const DRAW_IMAGE_SUB: u8 = 58;
    pub const CREATE_IMAGE_DATA: u8 = 59;
    pub const PUT_IMAGE_DATA: u8 = 60;
    pub const GET_IMAGE_DATA: u8 = 61;
    pub const CREATE_LINEAR_GRADIENT: u8 = 62;
    pub const CREATE_RADIAL_GRADIENT: u8 = 63;
    pub const ADD_COLOR_STOP: u8 = 64;
    pub const CREATE_PATTERN: u8 = 65;
    pub const RELEASE_RESOURCE: u8 = 66;
    pub const SET_CURSOR: u8 = 67;
    pub const REQUEST_POINTER_CAPTURE: u8 = 68;
    pub const RELEASE_POINTER_CAPTURE: u8 = 69;
}

/// One drawing instruction. The closed sum over the command opcode table.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Session configuration, sent once after the version byte.
    Config {
        width: u32,
        height: u32,
        title: String,
        background: Color,
        event_mask: u32,
        cursor: Cursor,
    },
    Save,
    Restore,
    FillStyleColor(Color),
    FillStyleGradient(u32),
    FillStylePattern(u32),
    StrokeStyleColor(Color),
    StrokeStyleGradient(u32),
    StrokeStylePattern(u32),
    LineWidth(f64),
    LineCap(LineCap),
    LineJoin(LineJoin),
    MiterLimit(f64),
    LineDash(Vec<f64>),
    LineDashOffset(f64),
    GlobalAlpha(f64),
    GlobalCompositeOperation(CompositeOperation),
    ShadowColor(Color),
    ShadowBlur(f64),
    ShadowOffsetX(f64),
    ShadowOffsetY(f64),
    ImageSmoothingEnabled(bool),
    ImageSmoothingQuality(SmoothingQuality),
    Filter(String),
    Translate { x: f64, y: f64 },
    Scale { x: f64, y: f64 },
    Rotate(f64),
    Transform { a: f64, b: f64, c: f64, d: f64, e: f64, f: f64 },
    SetTransform { a: f64, b: f64, c: f64, d: f64, e: f64, f: f64 },
    ResetTransform,
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    StrokeRect { x: f64, y: f64, w: f64, h: f64 },
    BeginPath,
    ClosePath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadraticCurveTo { cpx: f64, cpy: f64, x: f64, y: f64 },
    BezierCurveTo { cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64 },
    Arc { x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64, anticlockwise: bool },
    ArcTo { x1: f64, y1: f64, x2: f64, y2: f64, radius: f64 },
    Ellipse {
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    },
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Fill(FillRule),
    Stroke,
    Clip(FillRule),
    /// Query: hit-test the current path. Answered by a point-in-path reply.
    IsPointInPath { x: f64, y: f64, rule: FillRule },
    /// Query: hit-test the current path's stroke.
    IsPointInStroke { x: f64, y: f64 },
    Font(String),
    TextAlign(TextAlign),
    TextBaseline(TextBaseline),
    Direction(TextDirection),
    FillText { text: String, x: f64, y: f64 },
    StrokeText { text: String, x: f64, y: f64 },
    /// Query: measure a text run. Answered by a text-metrics reply.
    MeasureText(String),
    /// Start an asynchronous image fetch browser-side. Outcome arrives as an
    /// image-loaded reply carrying this ID.
    LoadImage { id: u32, url: String },
    DrawImage { id: u32, dx: f64, dy: f64 },
    DrawImageScaled { id: u32, dx: f64, dy: f64, dw: f64, dh: f64 },
    DrawImageSub {
        id: u32,
        sx: f64,
        sy: f64,
        sw: f64,
        sh: f64,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    },
    /// Upload RGBA pixels as a browser-side ImageData object.
    CreateImageData { id: u32, width: u32, height: u32, pixels: Vec<u8> },
    PutImageData { id: u32, dx: f64, dy: f64 },
    /// Query: read back a pixel rectangle. Answered by an image-data reply.
    GetImageData { sx: i32, sy: i32, sw: u32, sh: u32 },
    CreateLinearGradient { id: u32, x0: f64, y0: f64, x1: f64, y1: f64 },
    CreateRadialGradient { id: u32, x0: f64, y0: f64, r0: f64, x1: f64, y1: f64, r1: f64 },
    AddColorStop { id: u32, offset: f64, color: Color },
    CreatePattern { id: u32, image_id: u32, repetition: Repetition },
    /// Allow the browser to free the object behind a handle.
    ReleaseResource { kind: ResourceKind, id: u32 },
    SetCursor(Cursor),
    /// Capture the active pointer so drags keep reporting outside the
    /// canvas. Ignored by shims on platforms without pointer capture.
    RequestPointerCapture,
    ReleasePointerCapture,
}

impl Command {
    /// The wire opcode for this command.
    #[must_use]
    pub fn opcode(&self) -> u8 {
        match self {
            Command::Config { .. } => op::CONFIG,
            Command::Save => op::SAVE,
            Command::Restore => op::RESTORE,
            Command::FillStyleColor(_) => op::FILL_STYLE_COLOR,
            Command::FillStyleGradient(_) => op::FILL_STYLE_GRADIENT,
            Command::FillStylePattern(_) => op::FILL_STYLE_PATTERN,
            Command::StrokeStyleColor(_) => op::STROKE_STYLE_COLOR,
            Command::StrokeStyleGradient(_) => op::STROKE_STYLE_GRADIENT,
            Command::StrokeStylePattern(_) => op::STROKE_STYLE_PATTERN,
            Command::LineWidth(_) => op::LINE_WIDTH,
            Command::LineCap(_) => op::LINE_CAP,
            Command::LineJoin(_) => op::LINE_JOIN,
            Command::MiterLimit(_) => op::MITER_LIMIT,
            Command::LineDash(_) => op::LINE_DASH,
            Command::LineDashOffset(_) => op::LINE_DASH_OFFSET,
            Command::GlobalAlpha(_) => op::GLOBAL_ALPHA,
            Command::GlobalCompositeOperation(_) => op::GLOBAL_COMPOSITE_OPERATION,
            Command::ShadowColor(_) => op::SHADOW_COLOR,
            Command::ShadowBlur(_) => op::SHADOW_BLUR,
            Command::ShadowOffsetX(_) => op::SHADOW_OFFSET_X,
            Command::ShadowOffsetY(_) => op::SHADOW_OFFSET_Y,
            Command::ImageSmoothingEnabled(_) => op::IMAGE_SMOOTHING_ENABLED,
            Command::ImageSmoothingQuality(_) => op::IMAGE_SMOOTHING_QUALITY,
            Command::Filter(_) => op::FILTER,
            Command::Translate { .. } => op::TRANSLATE,
            Command::Scale { .. } => op::SCALE,
            Command::Rotate(_) => op::ROTATE,
            Command::Transform { .. } => op::TRANSFORM,
            Command::SetTransform { .. } => op::SET_TRANSFORM,
            Command::ResetTransform => op::RESET_TRANSFORM,
            Command::ClearRect { .. } => op::CLEAR_RECT,
            Command::FillRect { .. } => op::FILL_RECT,
            Command::StrokeRect { .. } => op::STROKE_RECT,
            Command::BeginPath => op::BEGIN_PATH,
            Command::ClosePath => op::CLOSE_PATH,
            Command::MoveTo { .. } => op::MOVE_TO,
            Command::LineTo { .. } => op::LINE_TO,
            Command::QuadraticCurveTo { .. } => op::QUADRATIC_CURVE_TO,
            Command::BezierCurveTo { .. } => op::BEZIER_CURVE_TO,
            Command::Arc { .. } => op::ARC,
            Command::ArcTo { .. } => op::ARC_TO,
            Command::Ellipse { .. } => op::ELLIPSE,
            Command::Rect { .. } => op::RECT,
            Command::Fill(_) => op::FILL,
            Command::Stroke => op::STROKE,
            Command::Clip(_) => op::CLIP,
            Command::IsPointInPath { .. } => op::IS_POINT_IN_PATH,
            Command::IsPointInStroke { .. } => op::IS_POINT_IN_STROKE,
            Command::Font(_) => op::FONT,
            Command::TextAlign(_) => op::TEXT_ALIGN,
            Command::TextBaseline(_) => op::TEXT_BASELINE,
            Command::Direction(_) => op::DIRECTION,
            Command::FillText { .. } => op::FILL_TEXT,
            Command::StrokeText { .. } => op::STROKE_TEXT,
            Command::MeasureText(_) => op::MEASURE_TEXT,
            Command::LoadImage { .. } => op::LOAD_IMAGE,
            Command::DrawImage { .. } => op::DRAW_IMAGE,
            Command::DrawImageScaled { .. } => op::DRAW_IMAGE_SCALED,
            Command::DrawImageSub { .. } => op::DRAW_IMAGE_SUB,
            Command::CreateImageData { .. } => op::CREATE_IMAGE_DATA,
            Command::PutImageData { .. } => op::PUT_IMAGE_DATA,
            Command::GetImageData { .. } => op::GET_IMAGE_DATA,
            Command::CreateLinearGradient { .. } => op::CREATE_LINEAR_GRADIENT,
            Command::CreateRadialGradient { .. } => op::CREATE_RADIAL_GRADIENT,
            Command::AddColorStop { .. } => op::ADD_COLOR_STOP,
            Command::CreatePattern { .. } => op::CREATE_PATTERN,
            Command::ReleaseResource { .. } => op::RELEASE_RESOURCE,
            Command::SetCursor(_) => op::SET_CURSOR,
            Command::RequestPointerCapture => op::REQUEST_POINTER_CAPTURE,
            Command::ReleasePointerCapture => op::RELEASE_POINTER_CAPTURE,
        }
    }

    /// Append this command's complete encoding to `buf`.
    pub fn encode(&self, buf: &mut Vec<u8>) {
        put_u8(buf, self.opcode());
        match self {
            Command::Config { width, height, title, background, event_mask, cursor } => {
                put_u32(buf, *width);
                put_u32(buf, *height);
                put_str(buf, title);
                put_color(buf, *background);
                put_u32(buf, *event_mask);
                put_u8(buf, *cursor as u8);
            }
            Command::Save
            | Command::Restore
            | Command::ResetTransform
            | Command::BeginPath
            | Command::ClosePath
            | Command::Stroke
            | Command::RequestPointerCapture
            | Command::ReleasePointerCapture => {}
            Command::FillStyleColor(color)
            | Command::StrokeStyleColor(color)
            | Command::ShadowColor(color) => put_color(buf, *color),
            Command::FillStyleGradient(id)
            | Command::FillStylePattern(id)
            | Command::StrokeStyleGradient(id)
            | Command::StrokeStylePattern(id) => put_u32(buf, *id),
            Command::LineWidth(v)
            | Command::MiterLimit(v)
            | Command::LineDashOffset(v)
            | Command::GlobalAlpha(v)
            | Command::ShadowBlur(v)
            | Command::ShadowOffsetX(v)
            | Command::ShadowOffsetY(v)
            | Command::Rotate(v) => put_f64(buf, *v),
            Command::LineCap(cap) => put_u8(buf, *cap as u8),
            Command::LineJoin(join) => put_u8(buf, *join as u8),
            Command::LineDash(segments) => {
                put_u32(buf, segments.len() as u32);
                for segment in segments {
                    put_f64(buf, *segment);
                }
            }
            Command::GlobalCompositeOperation(op) => put_u8(buf, *op as u8),
            Command::ImageSmoothingEnabled(enabled) => put_bool(buf, *enabled),
            Command::ImageSmoothingQuality(quality) => put_u8(buf, *quality as u8),
            Command::Filter(value) | Command::Font(value) | Command::MeasureText(value) => {
                put_str(buf, value);
            }
            Command::Translate { x, y }
            | Command::Scale { x, y }
            | Command::MoveTo { x, y }
            | Command::LineTo { x, y } => {
                put_f64(buf, *x);
                put_f64(buf, *y);
            }
            Command::Transform { a, b, c, d, e, f }
            | Command::SetTransform { a, b, c, d, e, f } => {
                for v in [a, b, c, d, e, f] {
                    put_f64(buf, *v);
                }
            }
            Command::ClearRect { x, y, w, h }
            | Command::FillRect { x, y, w, h }
            | Command::StrokeRect { x, y, w, h }
            | Command::Rect { x, y, w, h } => {
                for v in [x, y, w, h] {
                    put_f64(buf, *v);
                }
            }
            Command::QuadraticCurveTo { cpx, cpy, x, y } => {
                for v in [cpx, cpy, x, y] {
                    put_f64(buf, *v);
                }
            }
            Command::BezierCurveTo { cp1x, cp1y, cp2x, cp2y, x, y } => {
                for v in [cp1x, cp1y, cp2x, cp2y, x, y] {
                    put_f64(buf, *v);
                }
            }
            Command::Arc { x, y, radius, start_angle, end_angle, anticlockwise } => {
                for v in [x, y, radius, start_angle, end_angle] {
                    put_f64(buf, *v);
                }
                put_bool(buf, *anticlockwise);
            }
            Command::ArcTo { x1, y1, x2, y2, radius } => {
                for v in [x1, y1, x2, y2, radius] {
                    put_f64(buf, *v);
                }
            }
            Command::Ellipse {
                x,
                y,
                radius_x,
                radius_y,
                rotation,
                start_angle,
                end_angle,
                anticlockwise,
            } => {
                for v in [x, y, radius_x, radius_y, rotation, start_angle, end_angle] {
                    put_f64(buf, *v);
                }
                put_bool(buf, *anticlockwise);
            }
            Command::Fill(rule) | Command::Clip(rule) => put_u8(buf, *rule as u8),
            Command::IsPointInPath { x, y, rule } => {
                put_f64(buf, *x);
                put_f64(buf, *y);
                put_u8(buf, *rule as u8);
            }
            Command::IsPointInStroke { x, y } => {
                put_f64(buf, *x);
                put_f64(buf, *y);
            }
            Command::TextAlign(align) => put_u8(buf, *align as u8),
            Command::TextBaseline(baseline) => put_u8(buf, *baseline as u8),
            Command::Direction(direction) => put_u8(buf, *direction as u8),
            Command::FillText { text, x, y } | Command::StrokeText { text, x, y } => {
                put_str(buf, text);
                put_f64(buf, *x);
                put_f64(buf, *y);
            }
            Command::LoadImage { id, url } => {
                put_u32(buf, *id);
                put_str(buf, url);
            }
            Command::DrawImage { id, dx, dy } => {
                put_u32(buf, *id);
                put_f64(buf, *dx);
                put_f64(buf, *dy);
            }
            Command::DrawImageScaled { id, dx, dy, dw, dh } => {
                put_u32(buf, *id);
                for v in [dx, dy, dw, dh] {
                    put_f64(buf, *v);
                }
            }
            Command::DrawImageSub { id, sx, sy, sw, sh, dx, dy, dw, dh } => {
                put_u32(buf, *id);
                for v in [sx, sy, sw, sh, dx, dy, dw, dh] {
                    put_f64(buf, *v);
                }
            }
            Command::CreateImageData { id, width, height, pixels } => {
                put_u32(buf, *id);
                put_u32(buf, *width);
                put_u32(buf, *height);
                put_blob(buf, pixels);
            }
            Command::PutImageData { id, dx, dy } => {
                put_u32(buf, *id);
                put_f64(buf, *dx);
                put_f64(buf, *dy);
            }
            Command::GetImageData { sx, sy, sw, sh } => {
                put_i32(buf, *sx);
                put_i32(buf, *sy);
                put_u32(buf, *sw);
                put_u32(buf, *sh);
            }
            Command::CreateLinearGradient { id, x0, y0, x1, y1 } => {
                put_u32(buf, *id);
                for v in [x0, y0, x1, y1] {
                    put_f64(buf, *v);
                }
            }
            Command::CreateRadialGradient { id, x0, y0, r0, x1, y1, r1 } => {
                put_u32(buf, *id);
                for v in [x0, y0, r0, x1, y1, r1] {
                    put_f64(buf, *v);
                }
            }
            Command::AddColorStop { id, offset, color } => {
                put_u32(buf, *id);
                put_f64(buf, *offset);
                put_color(buf, *color);
            }
            Command::CreatePattern { id, image_id, repetition } => {
                put_u32(buf, *id);
                put_u32(buf, *image_id);
                put_u8(buf, *repetition as u8);
            }
            Command::ReleaseResource { kind, id } => {
                put_u8(buf, *kind as u8);
                put_u32(buf, *id);
            }
            Command::SetCursor(cursor) => put_u8(buf, *cursor as u8),
        }
    }

    /// Encode into a fresh buffer. Convenience for tests and single-command
    /// frames.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }

    /// Decode one command from the reader, leaving it positioned at the next.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownCommand`] for an opcode outside the
    /// table, or the underlying field error for malformed arguments.
    pub fn decode(r: &mut Reader<'_>) -> Result<Command, CodecError> {
        let opcode = r.u8()?;
        let command = match opcode {
            op::CONFIG => Command::Config {
                width: r.u32()?,
                height: r.u32()?,
                title: r.string()?,
                background: r.color()?,
                event_mask: r.u32()?,
                cursor: Cursor::try_from(r.u8()?)?,
            },
            op::SAVE => Command::Save,
            op::RESTORE => Command::Restore,
            op::FILL_STYLE_COLOR => Command::FillStyleColor(r.color()?),
            op::FILL_STYLE_GRADIENT => Command::FillStyleGradient(r.u32()?),
            op::FILL_STYLE_PATTERN => Command::FillStylePattern(r.u32()?),
            op::STROKE_STYLE_COLOR => Command::StrokeStyleColor(r.color()?),
            op::STROKE_STYLE_GRADIENT => Command::StrokeStyleGradient(r.u32()?),
            op::STROKE_STYLE_PATTERN => Command::StrokeStylePattern(r.u32()?),
            op::LINE_WIDTH => Command::LineWidth(r.f64()?),
            op::LINE_CAP => Command::LineCap(LineCap::try_from(r.u8()?)?),
            op::LINE_JOIN => Command::LineJoin(LineJoin::try_from(r.u8()?)?),
            op::MITER_LIMIT => Command::MiterLimit(r.f64()?),
            op::LINE_DASH => {
                let count = r.u32()? as usize;
                let mut segments = Vec::with_capacity(count.min(1024));
                for _ in 0..count {
                    segments.push(r.f64()?);
                }
                Command::LineDash(segments)
            }
            op::LINE_DASH_OFFSET => Command::LineDashOffset(r.f64()?),
            op::GLOBAL_ALPHA => Command::GlobalAlpha(r.f64()?),
            op::GLOBAL_COMPOSITE_OPERATION => {
                Command::GlobalCompositeOperation(CompositeOperation::try_from(r.u8()?)?)
            }
            op::SHADOW_COLOR => Command::ShadowColor(r.color()?),
            op::SHADOW_BLUR => Command::ShadowBlur(r.f64()?),
            op::SHADOW_OFFSET_X => Command::ShadowOffsetX(r.f64()?),
            op::SHADOW_OFFSET_Y => Command::ShadowOffsetY(r.f64()?),
            op::IMAGE_SMOOTHING_ENABLED => Command::ImageSmoothingEnabled(r.bool()?),
            op::IMAGE_SMOOTHING_QUALITY => {
                Command::ImageSmoothingQuality(SmoothingQuality::try_from(r.u8()?)?)
            }
            op::FILTER => Command::Filter(r.string()?),
            op::TRANSLATE => Command::Translate { x: r.f64()?, y: r.f64()? },
            op::SCALE => Command::Scale { x: r.f64()?, y: r.f64()? },
            op::ROTATE => Command::Rotate(r.f64()?),
            op::TRANSFORM => Command::Transform {
                a: r.f64()?,
                b: r.f64()?,
                c: r.f64()?,
                d: r.f64()?,
                e: r.f64()?,
                f: r.f64()?,
            },
            op::SET_TRANSFORM => Command::SetTransform {
                a: r.f64()?,
                b: r.f64()?,
                c: r.f64()?,
                d: r.f64()?,
                e: r.f64()?,
                f: r.f64()?,
            },
            op::RESET_TRANSFORM => Command::ResetTransform,
            op::CLEAR_RECT => {
                Command::ClearRect { x: r.f64()?, y: r.f64()?, w: r.f64()?, h: r.f64()? }
            }
            op::FILL_RECT => {
                Command::FillRect { x: r.f64()?, y: r.f64()?, w: r.f64()?, h: r.f64()? }
            }
            op::STROKE_RECT => {
                Command::StrokeRect { x: r.f64()?, y: r.f64()?, w: r.f64()?, h: r.f64()? }
            }
            op::BEGIN_PATH => Command::BeginPath,
            op::CLOSE_PATH => Command::ClosePath,
            op::MOVE_TO => Command::MoveTo { x: r.f64()?, y: r.f64()? },
            op::LINE_TO => Command::LineTo { x: r.f64()?, y: r.f64()? },
            op::QUADRATIC_CURVE_TO => Command::QuadraticCurveTo {
                cpx: r.f64()?,
                cpy: r.f64()?,
                x: r.f64()?,
                y: r.f64()?,
            },
            op::BEZIER_CURVE_TO => Command::BezierCurveTo {
                cp1x: r.f64()?,
                cp1y: r.f64()?,
                cp2x: r.f64()?,
                cp2y: r.f64()?,
                x: r.f64()?,
                y: r.f64()?,
            },
            op::ARC => Command::Arc {
                x: r.f64()?,
                y: r.f64()?,
                radius: r.f64()?,
                start_angle: r.f64()?,
                end_angle: r.f64()?,
                anticlockwise: r.bool()?,
            },
            op::ARC_TO => Command::ArcTo {
                x1: r.f64()?,
                y1: r.f64()?,
                x2: r.f64()?,
                y2: r.f64()?,
                radius: r.f64()?,
            },
            op::ELLIPSE => Command::Ellipse {
                x: r.f64()?,
                y: r.f64()?,
                radius_x: r.f64()?,
                radius_y: r.f64()?,
                rotation: r.f64()?,
                start_angle: r.f64()?,
                end_angle: r.f64()?,
                anticlockwise: r.bool()?,
            },
            op::RECT => Command::Rect { x: r.f64()?, y: r.f64()?, w: r.f64()?, h: r.f64()? },
            op::FILL => Command::Fill(FillRule::try_from(r.u8()?)?),
            op::STROKE => Command::Stroke,
            op::CLIP => Command::Clip(FillRule::try_from(r.u8()?)?),
            op::IS_POINT_IN_PATH => Command::IsPointInPath {
                x: r.f64()?,
                y: r.f64()?,
                rule: FillRule::try_from(r.u8()?)?,
            },
            op::IS_POINT_IN_STROKE => Command::IsPointInStroke { x: r.f64()?, y: r.f64()? },
            op::FONT => Command::Font(r.string()?),
            op::TEXT_ALIGN => Command::TextAlign(TextAlign::try_from(r.u8()?)?),
            op::TEXT_BASELINE => Command::TextBaseline(TextBaseline::try_from(r.u8()?)?),
            op::DIRECTION => Command::Direction(TextDirection::try_from(r.u8()?)?),
            op::FILL_TEXT => {
                Command::FillText { text: r.string()?, x: r.f64()?, y: r.f64()? }
            }
            op::STROKE_TEXT => {
                Command::StrokeText { text: r.string()?, x: r.f64()?, y: r.f64()? }
            }
            op::MEASURE_TEXT => Command::MeasureText(r.string()?),
            op::LOAD_IMAGE => Command::LoadImage { id: r.u32()?, url: r.string()? },
            op::DRAW_IMAGE => Command::DrawImage { id: r.u32()?, dx: r.f64()?, dy: r.f64()? },
            op::DRAW_IMAGE_SCALED => Command::DrawImageScaled {
                id: r.u32()?,
                dx: r.f64()?,
                dy: r.f64()?,
                dw: r.f64()?,
                dh: r.f64()?,
            },
            op::DRAW_IMAGE_SUB => Command::DrawImageSub {
                id: r.u32()?,
                sx: r.f64()?,
                sy: r.f64()?,
                sw: r.f64()?,
                sh: r.f64()?,
                dx: r.f64()?,
                dy: r.f64()?,
                dw: r.f64()?,
                dh: r.f64()?,
            },
            op::CREATE_IMAGE_DATA => Command::CreateImageData {
                id: r.u32()?,
                width: r.u32()?,
                height: r.u32()?,
                pixels: r.blob()?,
            },
            op::PUT_IMAGE_DATA => {
                Command::PutImageData { id: r.u32()?, dx: r.f64()?, dy: r.f64()? }
            }
            op::GET_IMAGE_DATA => Command::GetImageData {
                sx: r.i32()?,
                sy: r.i32()?,
                sw: r.u32()?,
                sh: r.u32()?,
            },
            op::CREATE_LINEAR_GRADIENT => Command::CreateLinearGradient {
                id: r.u32()?,
                x0: r.f64()?,
                y0: r.f64()?,
                x1: r.f64()?,
                y1: r.f64()?,
            },
            op::CREATE_RADIAL_GRADIENT => Command::CreateRadialGradient {
                id: r.u32()?,
                x0: r.f64()?,
                y0: r.f64()?,
                r0: r.f64()?,
                x1: r.f64()?,
                y1: r.f64()?,
                r1: r.f64()?,
            },
            op::ADD_COLOR_STOP => Command::AddColorStop {
                id: r.u32()?,
                offset: r.f64()?,
                color: r.color()?,
            },
            op::CREATE_PATTERN => Command::CreatePattern {
                id: r.u32()?,
                image_id: r.u32()?,
                repetition: Repetition::try_from(r.u8()?)?,
            },
            op::RELEASE_RESOURCE => Command::ReleaseResource {
                kind: ResourceKind::try_from(r.u8()?)?,
                id: r.u32()?,
            },
            op::SET_CURSOR => Command::SetCursor(Cursor::try_from(r.u8()?)?),
            op::REQUEST_POINTER_CAPTURE => Command::RequestPointerCapture,
            op::RELEASE_POINTER_CAPTURE => Command::ReleasePointerCapture,
            unknown => return Err(CodecError::UnknownCommand(unknown)),
        };
        Ok(command)
    }

    /// Whether this command expects a reply event.
    #[must_use]
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            Command::IsPointInPath { .. }
                | Command::IsPointInStroke { .. }
                | Command::MeasureText(_)
                | Command::GetImageData { .. }
        )
    }
}

#[cfg(test)]
#[path = "command_test.rs"]
mod tests;
