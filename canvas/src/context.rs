//! The draw context: a remote 2D drawing surface.
//!
//! DESIGN
//! ======
//! Methods fall into five groups:
//! - *Mutating* calls append one encoded command to an in-memory buffer and
//!   return immediately; nothing reaches the browser until [`Context::flush`].
//! - *Resource-creating* calls additionally allocate an ID and hand back an
//!   owned handle; dropping the handle queues a release command.
//! - *Queries* flush, then suspend the caller until the browser's reply is
//!   routed back by the session reader. Taking `&mut self` makes a second
//!   concurrent query unrepresentable, which is the serialization the
//!   protocol requires.
//! - [`Context::flush`] ships the buffer as one transport message.
//! - *Session controls* expose the input event channel, the quit signal,
//!   and the current canvas size.
//!
//! The context is owned by the entry function's task and is not shared;
//! the mutex-serialized writer inside the session is the only concurrency
//! boundary commands cross.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use wire::command::Command;
use wire::event::{Event, Reply};
use wire::{
    Color, CompositeOperation, Cursor, FillRule, LineCap, LineJoin, Repetition, ResourceKind,
    SmoothingQuality, TextAlign, TextBaseline, TextDirection, TextMetrics,
};

use crate::error::SessionError;
use crate::handle::{Gradient, Image, ImageData, ImageState, Pattern, ReleaseQueue};
use crate::registry::Registry;
use crate::session::{Shared, Writer};

/// A rectangle of RGBA pixels read back from the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixels {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, four bytes per pixel.
    pub data: Vec<u8>,
}

/// Drawing surface for one session. See the [module docs](self).
pub struct Context {
    buf: Vec<u8>,
    writer: Arc<Writer>,
    events: mpsc::Receiver<Event>,
    shared: Arc<Shared>,
    registry: Registry,
    releases: Arc<ReleaseQueue>,
}

impl Context {
    pub(crate) fn new(
        writer: Arc<Writer>,
        events: mpsc::Receiver<Event>,
        shared: Arc<Shared>,
    ) -> Self {
        Self {
            buf: Vec::new(),
            writer,
            events,
            shared,
            registry: Registry::new(),
            releases: Arc::new(ReleaseQueue::new()),
        }
    }

    /// Append one command, after any releases queued by dropped handles.
    /// Draining first keeps release commands in program order: a handle
    /// dropped before this call is released before it.
    fn append(&mut self, command: &Command) {
        self.drain_releases();
        command.encode(&mut self.buf);
    }

    fn drain_releases(&mut self) {
        for (kind, id) in self.releases.drain() {
            if self.registry.release(kind, id) {
                Command::ReleaseResource { kind, id }.encode(&mut self.buf);
            }
        }
    }

    // =========================================================================
    // STATE STACK
    // =========================================================================

    /// Push the full drawing state (styles, transform, clip) onto the
    /// browser's state stack.
    pub fn save(&mut self) {
        self.append(&Command::Save);
    }

    /// Pop the most recently saved drawing state.
    pub fn restore(&mut self) {
        self.append(&Command::Restore);
    }

    // =========================================================================
    // FILL & STROKE STYLES
    // =========================================================================

    pub fn set_fill_color(&mut self, color: Color) {
        self.append(&Command::FillStyleColor(color));
    }

    pub fn set_fill_gradient(&mut self, gradient: &Gradient) {
        self.append(&Command::FillStyleGradient(gradient.id()));
    }

    pub fn set_fill_pattern(&mut self, pattern: &Pattern) {
        self.append(&Command::FillStylePattern(pattern.id()));
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.append(&Command::StrokeStyleColor(color));
    }

    pub fn set_stroke_gradient(&mut self, gradient: &Gradient) {
        self.append(&Command::StrokeStyleGradient(gradient.id()));
    }

    pub fn set_stroke_pattern(&mut self, pattern: &Pattern) {
        self.append(&Command::StrokeStylePattern(pattern.id()));
    }

    // =========================================================================
    // LINE STYLE
    // =========================================================================

    pub fn set_line_width(&mut self, width: f64) {
        self.append(&Command::LineWidth(width));
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.append(&Command::LineCap(cap));
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.append(&Command::LineJoin(join));
    }

    pub fn set_miter_limit(&mut self, limit: f64) {
        self.append(&Command::MiterLimit(limit));
    }

    /// Set the dash pattern. An empty slice turns dashing off.
    pub fn set_line_dash(&mut self, segments: &[f64]) {
        self.append(&Command::LineDash(segments.to_vec()));
    }

    pub fn set_line_dash_offset(&mut self, offset: f64) {
        self.append(&Command::LineDashOffset(offset));
    }

    // =========================================================================
    // COMPOSITING, SHADOWS, FILTERS
    // =========================================================================

    /// Set the global alpha applied to all subsequent drawing, 0.0–1.0.
    pub fn set_global_alpha(&mut self, alpha: f64) {
        self.append(&Command::GlobalAlpha(alpha));
    }

    pub fn set_global_composite_operation(&mut self, operation: CompositeOperation) {
        self.append(&Command::GlobalCompositeOperation(operation));
    }

    pub fn set_shadow_color(&mut self, color: Color) {
        self.append(&Command::ShadowColor(color));
    }

    pub fn set_shadow_blur(&mut self, blur: f64) {
        self.append(&Command::ShadowBlur(blur));
    }

    pub fn set_shadow_offset_x(&mut self, offset: f64) {
        self.append(&Command::ShadowOffsetX(offset));
    }

    pub fn set_shadow_offset_y(&mut self, offset: f64) {
        self.append(&Command::ShadowOffsetY(offset));
    }

    pub fn set_image_smoothing_enabled(&mut self, enabled: bool) {
        self.append(&Command::ImageSmoothingEnabled(enabled));
    }

    pub fn set_image_smoothing_quality(&mut self, quality: SmoothingQuality) {
        self.append(&Command::ImageSmoothingQuality(quality));
    }

    /// Set the CSS filter string applied to subsequent drawing, e.g.
    /// `"blur(2px)"`. The string is passed to the browser verbatim.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.append(&Command::Filter(filter.into()));
    }

    // =========================================================================
    // TRANSFORMS
    // =========================================================================

    pub fn translate(&mut self, x: f64, y: f64) {
        self.append(&Command::Translate { x, y });
    }

    pub fn scale(&mut self, x: f64, y: f64) {
        self.append(&Command::Scale { x, y });
    }

    /// Rotate the coordinate system clockwise by `angle` radians.
    pub fn rotate(&mut self, angle: f64) {
        self.append(&Command::Rotate(angle));
    }

    /// Multiply the current transform by the matrix `[a b c d e f]`.
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.append(&Command::Transform { a, b, c, d, e, f });
    }

    /// Replace the current transform with the matrix `[a b c d e f]`.
    pub fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.append(&Command::SetTransform { a, b, c, d, e, f });
    }

    pub fn reset_transform(&mut self) {
        self.append(&Command::ResetTransform);
    }

    // =========================================================================
    // RECTANGLES
    // =========================================================================

    pub fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.append(&Command::ClearRect { x, y, w, h });
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.append(&Command::FillRect { x, y, w, h });
    }

    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.append(&Command::StrokeRect { x, y, w, h });
    }

    // =========================================================================
    // PATH CONSTRUCTION
    // =========================================================================

    pub fn begin_path(&mut self) {
        self.append(&Command::BeginPath);
    }

    pub fn close_path(&mut self) {
        self.append(&Command::ClosePath);
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.append(&Command::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.append(&Command::LineTo { x, y });
    }

    pub fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.append(&Command::QuadraticCurveTo { cpx, cpy, x, y });
    }

    pub fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.append(&Command::BezierCurveTo { cp1x, cp1y, cp2x, cp2y, x, y });
    }

    pub fn arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        self.append(&Command::Arc { x, y, radius, start_angle, end_angle, anticlockwise });
    }

    pub fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) {
        self.append(&Command::ArcTo { x1, y1, x2, y2, radius });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        self.append(&Command::Ellipse {
            x,
            y,
            radius_x,
            radius_y,
            rotation,
            start_angle,
            end_angle,
            anticlockwise,
        });
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.append(&Command::Rect { x, y, w, h });
    }

    // =========================================================================
    // PATH OPERATIONS
    // =========================================================================

    /// Fill the current path with the non-zero winding rule.
    pub fn fill(&mut self) {
        self.append(&Command::Fill(FillRule::NonZero));
    }

    pub fn fill_with_rule(&mut self, rule: FillRule) {
        self.append(&Command::Fill(rule));
    }

    pub fn stroke(&mut self) {
        self.append(&Command::Stroke);
    }

    /// Clip subsequent drawing to the current path (non-zero winding).
    pub fn clip(&mut self) {
        self.append(&Command::Clip(FillRule::NonZero));
    }

    pub fn clip_with_rule(&mut self, rule: FillRule) {
        self.append(&Command::Clip(rule));
    }

    // =========================================================================
    // TEXT
    // =========================================================================

    /// Set the font as a CSS font shorthand, e.g. `"16px sans-serif"`.
    pub fn set_font(&mut self, font: impl Into<String>) {
        self.append(&Command::Font(font.into()));
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.append(&Command::TextAlign(align));
    }

    pub fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.append(&Command::TextBaseline(baseline));
    }

    pub fn set_direction(&mut self, direction: TextDirection) {
        self.append(&Command::Direction(direction));
    }

    pub fn fill_text(&mut self, text: impl Into<String>, x: f64, y: f64) {
        self.append(&Command::FillText { text: text.into(), x, y });
    }

    pub fn stroke_text(&mut self, text: impl Into<String>, x: f64, y: f64) {
        self.append(&Command::StrokeText { text: text.into(), x, y });
    }

    // =========================================================================
    // IMAGES
    // =========================================================================

    /// Start loading an image from `url` (resolved by the browser, so
    /// relative URLs are relative to the served page).
    ///
    /// The handle is usable immediately; draw-image calls issued before the
    /// load completes are skipped browser-side. Await [`Image::wait`] to
    /// observe the outcome, or poll [`Image::loaded`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IdSpaceExhausted`] if the image ID counter
    /// wraps.
    pub fn load_image(&mut self, url: impl Into<String>) -> Result<Image, SessionError> {
        let id = self.registry.alloc(ResourceKind::Image)?;
        let state = Arc::new(ImageState::new());
        self.shared.register_pending_image(id, Arc::clone(&state));
        self.append(&Command::LoadImage { id, url: url.into() });
        Ok(Image::new(id, state, self.shared.quit.clone(), Arc::clone(&self.releases)))
    }

    /// Draw an image at its natural size.
    pub fn draw_image(&mut self, image: &Image, dx: f64, dy: f64) {
        self.append(&Command::DrawImage { id: image.id(), dx, dy });
    }

    /// Draw an image scaled into the destination rectangle.
    pub fn draw_image_scaled(&mut self, image: &Image, dx: f64, dy: f64, dw: f64, dh: f64) {
        self.append(&Command::DrawImageScaled { id: image.id(), dx, dy, dw, dh });
    }

    /// Draw a sub-rectangle of an image into a destination rectangle (the
    /// nine-argument `drawImage` form).
    #[allow(clippy::too_many_arguments)]
    pub fn draw_image_sub(
        &mut self,
        image: &Image,
        sx: f64,
        sy: f64,
        sw: f64,
        sh: f64,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    ) {
        self.append(&Command::DrawImageSub { id: image.id(), sx, sy, sw, sh, dx, dy, dw, dh });
    }

    /// Upload a buffer of row-major RGBA pixels (four bytes per pixel) as a
    /// browser-side `ImageData` object. `pixels` should hold
    /// `width * height * 4` bytes; the browser ignores a malformed buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IdSpaceExhausted`] if the ID counter wraps.
    pub fn create_image_data(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<ImageData, SessionError> {
        let id = self.registry.alloc(ResourceKind::ImageData)?;
        self.append(&Command::CreateImageData { id, width, height, pixels: pixels.to_vec() });
        Ok(ImageData::new(id, width, height, Arc::clone(&self.releases)))
    }

    /// Blit a previously created pixel buffer at `(dx, dy)`, bypassing the
    /// transform, clip, and compositing state.
    pub fn put_image_data(&mut self, image_data: &ImageData, dx: f64, dy: f64) {
        self.append(&Command::PutImageData { id: image_data.id(), dx, dy });
    }

    // =========================================================================
    // GRADIENTS & PATTERNS
    // =========================================================================

    /// Create a gradient along the line `(x0,y0)`–`(x1,y1)`. Add stops with
    /// [`Context::add_color_stop`], then select it with
    /// [`Context::set_fill_gradient`] or [`Context::set_stroke_gradient`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IdSpaceExhausted`] if the ID counter wraps.
    pub fn create_linear_gradient(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
    ) -> Result<Gradient, SessionError> {
        let id = self.registry.alloc(ResourceKind::Gradient)?;
        self.append(&Command::CreateLinearGradient { id, x0, y0, x1, y1 });
        Ok(Gradient::new(id, Arc::clone(&self.releases)))
    }

    /// Create a gradient between the circles `(x0,y0,r0)` and `(x1,y1,r1)`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IdSpaceExhausted`] if the ID counter wraps.
    #[allow(clippy::too_many_arguments)]
    pub fn create_radial_gradient(
        &mut self,
        x0: f64,
        y0: f64,
        r0: f64,
        x1: f64,
        y1: f64,
        r1: f64,
    ) -> Result<Gradient, SessionError> {
        let id = self.registry.alloc(ResourceKind::Gradient)?;
        self.append(&Command::CreateRadialGradient { id, x0, y0, r0, x1, y1, r1 });
        Ok(Gradient::new(id, Arc::clone(&self.releases)))
    }

    /// Add a color stop at `offset` (0.0–1.0) to a gradient.
    pub fn add_color_stop(&mut self, gradient: &Gradient, offset: f64, color: Color) {
        self.append(&Command::AddColorStop { id: gradient.id(), offset, color });
    }

    /// Create a repeating pattern from a loaded image.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IdSpaceExhausted`] if the ID counter wraps.
    pub fn create_pattern(
        &mut self,
        image: &Image,
        repetition: Repetition,
    ) -> Result<Pattern, SessionError> {
        let id = self.registry.alloc(ResourceKind::Pattern)?;
        self.append(&Command::CreatePattern { id, image_id: image.id(), repetition });
        Ok(Pattern::new(id, Arc::clone(&self.releases)))
    }

    // =========================================================================
    // CURSOR & POINTER
    // =========================================================================

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.append(&Command::SetCursor(cursor));
    }

    /// Capture the active pointer so a drag keeps reporting after it leaves
    /// the canvas. Ignored when no pointer is down.
    pub fn request_pointer_capture(&mut self) {
        self.append(&Command::RequestPointerCapture);
    }

    pub fn release_pointer_capture(&mut self) {
        self.append(&Command::ReleasePointerCapture);
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Emit a query command and suspend until its reply is routed back.
    ///
    /// The buffer is flushed first (with the query at its tail) so the
    /// browser sees every prior command before answering, and nothing else
    /// can reach the transport while the caller is suspended here.
    async fn query(&mut self, command: Command) -> Result<Reply, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.shared.set_pending_reply(tx);
        self.append(&command);
        if let Err(e) = self.flush().await {
            self.shared.clear_pending_reply();
            return Err(e);
        }
        tokio::select! {
            reply = rx => reply.map_err(|_| SessionError::Closed),
            () = self.shared.quit.cancelled() => {
                self.shared.clear_pending_reply();
                Err(SessionError::Closed)
            }
        }
    }

    /// Measure `text` with the current font and text settings.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the session ends before the
    /// browser answers.
    pub async fn measure_text(
        &mut self,
        text: impl Into<String>,
    ) -> Result<TextMetrics, SessionError> {
        match self.query(Command::MeasureText(text.into())).await? {
            Reply::TextMetrics(metrics) => Ok(metrics),
            _ => Err(SessionError::UnexpectedReply { query: "measure-text" }),
        }
    }

    /// Whether `(x, y)` lies inside the current path under `rule`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the session ends before the
    /// browser answers.
    pub async fn is_point_in_path(
        &mut self,
        x: f64,
        y: f64,
        rule: FillRule,
    ) -> Result<bool, SessionError> {
        match self.query(Command::IsPointInPath { x, y, rule }).await? {
            Reply::PointInPath(result) => Ok(result),
            _ => Err(SessionError::UnexpectedReply { query: "is-point-in-path" }),
        }
    }

    /// Whether `(x, y)` lies on the stroke of the current path.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the session ends before the
    /// browser answers.
    pub async fn is_point_in_stroke(&mut self, x: f64, y: f64) -> Result<bool, SessionError> {
        match self.query(Command::IsPointInStroke { x, y }).await? {
            Reply::PointInStroke(result) => Ok(result),
            _ => Err(SessionError::UnexpectedReply { query: "is-point-in-stroke" }),
        }
    }

    /// Read back the RGBA pixels of the rectangle `(sx, sy, sw, sh)`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the session ends before the
    /// browser answers.
    pub async fn get_image_data(
        &mut self,
        sx: i32,
        sy: i32,
        sw: u32,
        sh: u32,
    ) -> Result<Pixels, SessionError> {
        match self.query(Command::GetImageData { sx, sy, sw, sh }).await? {
            Reply::ImageData { width, height, pixels } => {
                Ok(Pixels { width, height, data: pixels })
            }
            _ => Err(SessionError::UnexpectedReply { query: "get-image-data" }),
        }
    }

    // =========================================================================
    // FLUSH
    // =========================================================================

    /// Send everything buffered since the last flush as one transport
    /// message. A no-op when nothing is buffered.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the transport is down; the quit
    /// signal has fired by then and the session is over.
    pub async fn flush(&mut self) -> Result<(), SessionError> {
        self.drain_releases();
        if self.buf.is_empty() {
            return Ok(());
        }
        let message = std::mem::take(&mut self.buf);
        self.writer.send(message).await
    }

    // =========================================================================
    // SESSION CONTROLS
    // =========================================================================

    /// Receive the next input event. Resolves `None` once the session has
    /// shut down and all delivered events were consumed. Events arrive in
    /// the order the browser observed them.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events.recv().await
    }

    /// Receive an already-delivered event without waiting.
    pub fn try_next_event(&mut self) -> Option<Event> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(_) => None,
        }
    }

    /// The session's quit signal. Cancelled when either side closes the
    /// transport or an unrecoverable error occurs; never reset. Clone it
    /// into `select!` arms of animation loops.
    #[must_use]
    pub fn quit(&self) -> CancellationToken {
        self.shared.quit.clone()
    }

    /// Whether the quit signal has fired.
    #[must_use]
    pub fn is_quit(&self) -> bool {
        self.shared.quit.is_cancelled()
    }

    /// Current canvas size in device-independent pixels: the most recent
    /// resize event, or the configured size before the first resize.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.shared.size()
    }

    /// Bytes currently buffered and not yet flushed.
    #[must_use]
    pub fn pending_bytes(&self) -> usize {
        self.buf.len()
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
