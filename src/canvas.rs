use std::sync::Arc;

use anyhow::Context as _;
use kurbo::Shape as _;

use crate::{
    core::{Affine, BezPath, Circle, Point, Rect, Surface},
    error::{EaselError, EaselResult},
};

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Scale this color's alpha by `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        let a = (f64::from(self.a) * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// HSL to RGB, hue in degrees, saturation/lightness in `[0, 1]`.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(360.0);
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0..60 => (c, x, 0.0),
            60..120 => (x, c, 0.0),
            120..180 => (0.0, c, x),
            180..240 => (0.0, x, c),
            240..300 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(to8(r), to8(g), to8(b))
    }

    fn to_peniko(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// A loaded font usable for dial numerals, labels and placeholder text.
#[derive(Clone)]
pub struct Typeface {
    data: vello_cpu::peniko::FontData,
    bytes: Arc<Vec<u8>>,
}

impl Typeface {
    pub fn from_bytes(bytes: Vec<u8>) -> EaselResult<Self> {
        if bytes.is_empty() {
            return Err(EaselError::render("typeface bytes must be non-empty"));
        }
        let bytes = Arc::new(bytes);
        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
            0,
        );
        Ok(Self { data, bytes })
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> EaselResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read typeface '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface")
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TextBrushRgba8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

/// Stateful Parley wrapper shaping plain text from raw font bytes.
struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl TextEngine {
    fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    fn layout_plain(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> EaselResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(EaselError::render("text size_px must be finite and > 0"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            EaselError::render("no font families registered from typeface bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| EaselError::render("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Canvas-style immediate-mode drawing surface.
///
/// A `Sketch` is created fresh per invocation or frame tick, drawn into by an
/// art module, and flushed onto the owning stage's pixmap with [`finish`].
/// Transform state composes like the 2D canvas it replaces: `save`/`restore`
/// bracket local changes, `translate`/`rotate`/`scale` post-multiply.
///
/// [`finish`]: Sketch::finish
pub struct Sketch {
    ctx: vello_cpu::RenderContext,
    surface: Surface,
    transform: Affine,
    saved: Vec<Affine>,
    stroke_width: f64,
    typeface: Option<Typeface>,
    text: Option<TextEngine>,
}

impl Sketch {
    pub fn new(surface: Surface) -> EaselResult<Self> {
        Self::with_typeface(surface, None)
    }

    pub fn with_typeface(surface: Surface, typeface: Option<Typeface>) -> EaselResult<Self> {
        let width: u16 = surface
            .width
            .try_into()
            .map_err(|_| EaselError::render("surface width exceeds u16"))?;
        let height: u16 = surface
            .height
            .try_into()
            .map_err(|_| EaselError::render("surface height exceeds u16"))?;

        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            surface,
            transform: Affine::IDENTITY,
            saved: Vec::new(),
            stroke_width: 1.0,
            typeface,
            text: None,
        })
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn width(&self) -> f64 {
        self.surface.width_f64()
    }

    pub fn height(&self) -> f64 {
        self.surface.height_f64()
    }

    pub fn has_typeface(&self) -> bool {
        self.typeface.is_some()
    }

    // --- transform stack ---

    pub fn save(&mut self) {
        self.saved.push(self.transform);
    }

    pub fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.transform = t;
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform * Affine::translate((dx, dy));
    }

    pub fn rotate(&mut self, radians: f64) {
        self.transform = self.transform * Affine::rotate(radians);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.transform = self.transform * Affine::scale_non_uniform(sx, sy);
    }

    // --- stroke state ---

    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = width.max(0.0);
    }

    // --- drawing ---

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.apply_transform();
        self.ctx.set_paint(color.to_peniko());
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(x, y, x + w, y + h));
    }

    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        let path = Rect::new(x, y, x + w, y + h).to_path(0.1);
        self.stroke_path(&path, color);
    }

    pub fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.apply_transform();
        self.ctx.set_paint(color.to_peniko());
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    pub fn stroke_path(&mut self, path: &BezPath, color: Color) {
        self.apply_transform();
        self.ctx.set_paint(color.to_peniko());
        self.ctx
            .set_stroke(vello_cpu::kurbo::Stroke::new(self.stroke_width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let path = Circle::new((cx, cy), radius.max(0.0)).to_path(0.1);
        self.fill_path(&path, color);
    }

    pub fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let path = Circle::new((cx, cy), radius.max(0.0)).to_path(0.1);
        self.stroke_path(&path, color);
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        let mut path = BezPath::new();
        path.move_to(Point::new(x1, y1));
        path.line_to(Point::new(x2, y2));
        self.stroke_path(&path, color);
    }

    /// Draw `text` centered on `(x, y)` (both axes), upright in the current
    /// transform. A sketch without a typeface skips text silently; dial
    /// numerals and labels are decoration, not structure.
    pub fn fill_text(&mut self, text: &str, x: f64, y: f64, size: f64, color: Color) {
        if let Err(err) = self.try_fill_text(text, x, y, size, color) {
            tracing::debug!(%err, text, "text layout failed; skipping");
        }
    }

    fn try_fill_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        size: f64,
        color: Color,
    ) -> EaselResult<()> {
        let Some(typeface) = self.typeface.clone() else {
            return Ok(());
        };
        let engine = self.text.get_or_insert_with(TextEngine::new);

        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout = engine.layout_plain(text, &typeface.bytes, size as f32, brush)?;

        let (w, h) = (f64::from(layout.width()), f64::from(layout.height()));
        let placed = self.transform * Affine::translate((x - w / 2.0, y - h / 2.0));
        self.ctx.set_transform(affine_to_cpu(placed));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(
                    Color::rgba(brush.r, brush.g, brush.b, brush.a).to_peniko(),
                );

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&typeface.data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    /// Flush all recorded drawing onto `pixmap`, compositing over whatever
    /// the pixmap already holds (animated pieces rely on this for trails).
    pub fn finish(mut self, pixmap: &mut vello_cpu::Pixmap) -> EaselResult<()> {
        if usize::from(pixmap.width()) != self.surface.width as usize
            || usize::from(pixmap.height()) != self.surface.height as usize
        {
            return Err(EaselError::render("sketch/pixmap size mismatch"));
        }
        self.ctx.flush();
        self.ctx.render_to_pixmap(pixmap);
        Ok(())
    }

    fn apply_transform(&mut self) {
        self.ctx.set_transform(affine_to_cpu(self.transform));
    }
}

pub(crate) fn new_pixmap(surface: Surface) -> EaselResult<vello_cpu::Pixmap> {
    let width: u16 = surface
        .width
        .try_into()
        .map_err(|_| EaselError::render("surface width exceeds u16"))?;
    let height: u16 = surface
        .height
        .try_into()
        .map_err(|_| EaselError::render("surface height exceeds u16"))?;
    Ok(vello_cpu::Pixmap::new(width, height))
}

pub(crate) fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, color: Color) {
    let premul = premul_rgba8(color);
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&premul);
    }
}

fn premul_rgba8(c: Color) -> [u8; 4] {
    let a = u16::from(c.a);
    let premul = |v: u8| -> u8 { ((u16::from(v) * a + 127) / 255) as u8 };
    [premul(c.r), premul(c.g), premul(c.b), c.a]
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
