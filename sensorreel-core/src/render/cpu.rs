use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use kurbo::Shape;

use crate::{
    assets::texture::Texture,
    foundation::{
        color::Color,
        error::{ReelError, ReelResult},
        geometry::{Point, Rect},
    },
    render::{
        canvas::{Canvas, FrameRGBA, LineStyle, MarkerShape, MarkerStyle, TextStyle},
        text::{FontBook, TextBrush},
    },
};

static WARNED_NO_FONT: AtomicBool = AtomicBool::new(false);

/// [`Canvas`] rasterized on the CPU with `vello_cpu`.
///
/// World coordinates (y up) are mapped linearly onto a `width x height` pixel grid (y down) covering
/// the view rectangle. Text needs a [`FontBook`]; without one, text calls are skipped.
pub struct CpuCanvas<'f> {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    view: Rect,
    fonts: Option<&'f mut FontBook>,
    layers: usize,
    images: HashMap<usize, vello_cpu::Image>,
}

impl std::fmt::Debug for CpuCanvas<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuCanvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("view", &self.view)
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}

impl<'f> CpuCanvas<'f> {
    /// Transparent canvas of `width x height` pixels showing `view`.
    pub fn new(
        width: u32,
        height: u32,
        view: Rect,
        fonts: Option<&'f mut FontBook>,
    ) -> ReelResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| ReelError::render("canvas width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| ReelError::render("canvas height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(ReelError::render("canvas size must be non-zero"));
        }
        let (vw, vh) = (view.width(), view.height());
        if vw.is_nan() || vh.is_nan() || vw <= 0.0 || vh <= 0.0 {
            return Err(ReelError::render(format!(
                "view must have a positive area, got {view:?}"
            )));
        }

        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: w,
            height: h,
            view,
            fonts,
            layers: 0,
            images: HashMap::new(),
        })
    }

    /// Rasterize everything drawn so far.
    pub fn finish(mut self) -> FrameRGBA {
        while self.layers > 0 {
            self.pop_opacity();
        }
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
        }
    }

    fn px_per_unit(&self) -> (f64, f64) {
        (
            f64::from(self.width) / self.view.width(),
            f64::from(self.height) / self.view.height(),
        )
    }

    fn to_px(&self, p: Point) -> kurbo::Point {
        let (sx, sy) = self.px_per_unit();
        let lb = self.view.leftbottom;
        kurbo::Point::new((p.x - lb.x) * sx, f64::from(self.height) - (p.y - lb.y) * sy)
    }

    fn set_color(&mut self, color: Color) {
        let [r, g, b, a] = color.to_rgba8();
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    }

    fn reset_transforms(&mut self) {
        self.ctx.set_transform(kurbo::Affine::IDENTITY);
        self.ctx.set_paint_transform(kurbo::Affine::IDENTITY);
    }

    fn stroke_px(&mut self, path: &kurbo::BezPath, color: Color, width: f64) {
        self.reset_transforms();
        self.set_color(color);
        self.ctx.set_stroke(
            kurbo::Stroke::new(width.max(0.0))
                .with_caps(kurbo::Cap::Round)
                .with_join(kurbo::Join::Round),
        );
        self.ctx.stroke_path(path);
    }

    fn image_paint(&mut self, texture: &Texture) -> ReelResult<vello_cpu::Image> {
        let key = Arc::as_ptr(&texture.rgba8_premul) as usize;
        if let Some(img) = self.images.get(&key) {
            return Ok(img.clone());
        }
        let pixmap = texture_to_pixmap(texture)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.images.insert(key, paint.clone());
        Ok(paint)
    }
}

impl Canvas for CpuCanvas<'_> {
    fn view(&self) -> Rect {
        self.view
    }

    fn push_opacity(&mut self, alpha: f64) {
        self.ctx.push_opacity_layer(alpha.clamp(0.0, 1.0) as f32);
        self.layers += 1;
    }

    fn pop_opacity(&mut self) {
        if self.layers > 0 {
            self.ctx.pop_layer();
            self.layers -= 1;
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> ReelResult<()> {
        let a = self.to_px(rect.leftbottom);
        let b = self.to_px(rect.righttop);
        self.reset_transforms();
        self.set_color(color);
        self.ctx.fill_rect(&kurbo::Rect::from_points(a, b));
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) -> ReelResult<()> {
        if points.len() < 3 {
            return Ok(());
        }
        let mut path = kurbo::BezPath::new();
        for (i, p) in points.iter().enumerate() {
            let q = self.to_px(*p);
            if i == 0 {
                path.move_to(q);
            } else {
                path.line_to(q);
            }
        }
        path.close_path();

        self.reset_transforms();
        self.set_color(color);
        self.ctx.fill_path(&path);
        Ok(())
    }

    fn stroke_path(&mut self, points: &[Point], style: &LineStyle) -> ReelResult<()> {
        if points.len() < 2 || style.width <= 0.0 {
            return Ok(());
        }
        let px: Vec<kurbo::Point> = points.iter().map(|p| self.to_px(*p)).collect();

        let mut path = kurbo::BezPath::new();
        match style.pattern.runs(style.width) {
            None => {
                path.move_to(px[0]);
                for q in &px[1..] {
                    path.line_to(*q);
                }
            }
            Some((on, off)) => {
                for (a, b) in dash_segments(&px, on, off) {
                    path.move_to(a);
                    path.line_to(b);
                }
            }
        }
        self.stroke_px(&path, style.color, style.width);
        Ok(())
    }

    fn marker(&mut self, at: Point, style: &MarkerStyle, scale: f64) -> ReelResult<()> {
        let half = 0.5 * style.size * scale.max(0.0);
        if half <= 0.0 {
            return Ok(());
        }
        let c = self.to_px(at);
        match style.shape {
            MarkerShape::Plus => {
                let mut path = kurbo::BezPath::new();
                path.move_to((c.x - half, c.y));
                path.line_to((c.x + half, c.y));
                path.move_to((c.x, c.y - half));
                path.line_to((c.x, c.y + half));
                self.stroke_px(&path, style.color, style.line_width);
            }
            MarkerShape::Cross => {
                let mut path = kurbo::BezPath::new();
                path.move_to((c.x - half, c.y - half));
                path.line_to((c.x + half, c.y + half));
                path.move_to((c.x - half, c.y + half));
                path.line_to((c.x + half, c.y - half));
                self.stroke_px(&path, style.color, style.line_width);
            }
            MarkerShape::Circle => {
                self.reset_transforms();
                self.set_color(style.color);
                self.ctx
                    .fill_path(&kurbo::Circle::new(c, half).to_path(0.1));
            }
            MarkerShape::Square => {
                self.reset_transforms();
                self.set_color(style.color);
                self.ctx.fill_rect(&kurbo::Rect::new(
                    c.x - half,
                    c.y - half,
                    c.x + half,
                    c.y + half,
                ));
            }
        }
        Ok(())
    }

    fn text(&mut self, at: Point, content: &str, style: &TextStyle) -> ReelResult<()> {
        if content.is_empty() {
            return Ok(());
        }
        let anchor = self.to_px(at);

        let Some(fonts) = self.fonts.as_deref_mut() else {
            if !WARNED_NO_FONT.swap(true, Ordering::Relaxed) {
                tracing::warn!("no font loaded, text is not rendered");
            }
            return Ok(());
        };
        let brush = TextBrush::from(style.color.to_rgba8());
        let layout = fonts.layout(content, style.size as f32, brush)?;
        let font = fonts.font().clone();

        let w = f64::from(layout.width());
        let h = f64::from(layout.height());
        let top_left = kurbo::Point::new(anchor.x, anchor.y - h);

        if style.boxed {
            let pad = 0.3 * style.size;
            let frame = kurbo::Rect::new(
                top_left.x - pad,
                top_left.y - pad,
                top_left.x + w + pad,
                anchor.y + pad,
            );
            self.reset_transforms();
            self.set_color(style.box_fill);
            self.ctx.fill_rect(&frame);
            self.stroke_px(&frame.to_path(0.1), style.box_edge, 1.5);
        }

        self.reset_transforms();
        self.ctx
            .set_transform(kurbo::Affine::translate(top_left.to_vec2()));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.reset_transforms();
        Ok(())
    }

    fn image(&mut self, rect: Rect, texture: &Texture, rotation_deg: f64) -> ReelResult<()> {
        if texture.width == 0 || texture.height == 0 {
            return Ok(());
        }
        let a = self.to_px(rect.leftbottom);
        let b = self.to_px(rect.righttop);
        let rw = (b.x - a.x).abs();
        let rh = (b.y - a.y).abs();
        if rw <= 0.0 || rh <= 0.0 || !rotation_deg.is_finite() {
            return Ok(());
        }
        let paint = self.image_paint(texture)?;
        let tw = f64::from(texture.width);
        let th = f64::from(texture.height);
        let centre = a.midpoint(b);

        // y points down in pixel space, so a counter-clockwise turn is a negative angle
        let transform = kurbo::Affine::translate(centre.to_vec2())
            * kurbo::Affine::rotate(-rotation_deg.to_radians())
            * kurbo::Affine::translate((-0.5 * rw, -0.5 * rh))
            * kurbo::Affine::scale_non_uniform(rw / tw, rh / th);

        self.reset_transforms();
        self.ctx.set_transform(transform);
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&kurbo::Rect::new(0.0, 0.0, tw, th));
        self.reset_transforms();
        Ok(())
    }
}

/// Split a polyline into `on`-long dashes separated by `off`-long gaps.
///
/// The dash phase carries over vertices. Non-positive `on` yields nothing; non-positive `off`
/// yields the segments unchanged.
pub(crate) fn dash_segments(
    points: &[kurbo::Point],
    on: f64,
    off: f64,
) -> Vec<(kurbo::Point, kurbo::Point)> {
    let mut out = Vec::new();
    if !on.is_finite() || on <= 0.0 {
        return out;
    }
    if !off.is_finite() || off <= 0.0 {
        return points.windows(2).map(|w| (w[0], w[1])).collect();
    }

    let period = on + off;
    let mut phase = 0.0_f64;
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let len = a.distance(b);
        if len <= 0.0 {
            continue;
        }
        let mut s = 0.0;
        while s < len {
            let in_dash = phase < on;
            let left = if in_dash { on - phase } else { period - phase };
            let step = left.min(len - s);
            if in_dash {
                out.push((a.lerp(b, s / len), a.lerp(b, (s + step) / len)));
            }
            s += step;
            phase += step;
            if phase >= period {
                phase -= period;
            }
        }
    }
    out
}

fn texture_to_pixmap(texture: &Texture) -> ReelResult<vello_cpu::Pixmap> {
    let w: u16 = texture
        .width
        .try_into()
        .map_err(|_| ReelError::render("texture width exceeds u16"))?;
    let h: u16 = texture
        .height
        .try_into()
        .map_err(|_| ReelError::render("texture height exceeds u16"))?;

    let mut may_have_opacities = false;
    let pixels = texture
        .rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect::<Vec<_>>();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
