use crate::{
    assets::texture::Texture,
    foundation::{
        color::Color,
        error::ReelResult,
        geometry::{Point, Rect},
    },
};

/// A rendered frame (RGBA8, premultiplied alpha).
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

/// Stroke dash pattern. Lengths are in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LinePattern {
    /// Continuous stroke.
    Solid,
    /// Alternating `on`/`off` runs.
    Dashed {
        /// Painted run length.
        on: f64,
        /// Gap length.
        off: f64,
    },
    /// Short dots.
    Dotted,
}

impl LinePattern {
    /// `(on, off)` run lengths for a stroke of `width` pixels, `None` when solid.
    pub fn runs(&self, width: f64) -> Option<(f64, f64)> {
        match *self {
            Self::Solid => None,
            Self::Dashed { on, off } => Some((on, off)),
            Self::Dotted => Some((width.max(1.0), width.max(1.0) * 1.65)),
        }
    }
}

/// Stroke style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f64,
    /// Dash pattern.
    pub pattern: LinePattern,
}

impl LineStyle {
    /// Solid stroke.
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            pattern: LinePattern::Solid,
        }
    }

    /// Dotted stroke.
    pub fn dotted(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            pattern: LinePattern::Dotted,
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::solid(Color::BLACK, 2.0)
    }
}

/// Marker glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    /// `+`
    Plus,
    /// `x`
    Cross,
    /// Filled disc.
    Circle,
    /// Filled square.
    Square,
}

/// Marker style. `size` is the glyph extent in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    /// Glyph.
    pub shape: MarkerShape,
    /// Color.
    pub color: Color,
    /// Extent in pixels.
    pub size: f64,
    /// Stroke width for line glyphs.
    pub line_width: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            shape: MarkerShape::Plus,
            color: Color::GREY,
            size: 10.0,
            line_width: 2.0,
        }
    }
}

/// Text style. `size` is in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Glyph color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f64,
    /// Draw a filled, outlined box behind the text.
    pub boxed: bool,
    /// Box fill.
    pub box_fill: Color,
    /// Box outline.
    pub box_edge: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 24.0,
            boxed: false,
            box_fill: Color::WHITE,
            box_edge: Color::BLACK,
        }
    }
}

/// Drawing capability handed explicitly to [`crate::Actor::paint`].
///
/// Coordinates are world units (metres, y up). Implementations clip to [`Canvas::view`].
pub trait Canvas {
    /// World rectangle mapped onto the canvas.
    fn view(&self) -> Rect;

    /// Multiply everything drawn until the matching [`Canvas::pop_opacity`] by `alpha`.
    fn push_opacity(&mut self, alpha: f64);

    /// Close the innermost opacity layer.
    fn pop_opacity(&mut self);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> ReelResult<()>;

    /// Fill a closed polygon.
    fn fill_polygon(&mut self, points: &[Point], color: Color) -> ReelResult<()>;

    /// Stroke an open polyline.
    fn stroke_path(&mut self, points: &[Point], style: &LineStyle) -> ReelResult<()>;

    /// Draw a marker centred on `at`, its size multiplied by `scale`.
    fn marker(&mut self, at: Point, style: &MarkerStyle, scale: f64) -> ReelResult<()>;

    /// Draw text with its bottom-left corner at `at`.
    fn text(&mut self, at: Point, content: &str, style: &TextStyle) -> ReelResult<()>;

    /// Draw `texture` stretched over `rect`, rotated counter-clockwise by `rotation_deg` about the
    /// rect centre.
    fn image(&mut self, rect: Rect, texture: &Texture, rotation_deg: f64) -> ReelResult<()>;
}

/// One call captured by [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// [`Canvas::fill_rect`]
    FillRect {
        /// Rectangle.
        rect: Rect,
        /// Fill color.
        color: Color,
        /// Effective layer opacity.
        opacity: f64,
    },
    /// [`Canvas::fill_polygon`]
    FillPolygon {
        /// Vertices.
        points: Vec<Point>,
        /// Fill color.
        color: Color,
        /// Effective layer opacity.
        opacity: f64,
    },
    /// [`Canvas::stroke_path`]
    Stroke {
        /// Vertices.
        points: Vec<Point>,
        /// Style.
        style: LineStyle,
        /// Effective layer opacity.
        opacity: f64,
    },
    /// [`Canvas::marker`]
    Marker {
        /// Centre.
        at: Point,
        /// Style.
        style: MarkerStyle,
        /// Size multiplier.
        scale: f64,
        /// Effective layer opacity.
        opacity: f64,
    },
    /// [`Canvas::text`]
    Text {
        /// Anchor.
        at: Point,
        /// Content.
        content: String,
        /// Style.
        style: TextStyle,
        /// Effective layer opacity.
        opacity: f64,
    },
    /// [`Canvas::image`]
    Image {
        /// Target rectangle.
        rect: Rect,
        /// Texture size in pixels.
        size: (u32, u32),
        /// Rotation in degrees.
        rotation_deg: f64,
        /// Effective layer opacity.
        opacity: f64,
    },
}

/// Canvas that records draw calls instead of rasterizing them.
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    view: Rect,
    layers: Vec<f64>,
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    /// Empty recording over `view`.
    pub fn new(view: Rect) -> Self {
        Self {
            view,
            layers: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Captured calls, in order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Contents of every captured text call, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    fn opacity(&self) -> f64 {
        self.layers.iter().product()
    }
}

impl Canvas for RecordingCanvas {
    fn view(&self) -> Rect {
        self.view
    }

    fn push_opacity(&mut self, alpha: f64) {
        self.layers.push(alpha);
    }

    fn pop_opacity(&mut self) {
        self.layers.pop();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> ReelResult<()> {
        let opacity = self.opacity();
        self.calls.push(DrawCall::FillRect {
            rect,
            color,
            opacity,
        });
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) -> ReelResult<()> {
        let opacity = self.opacity();
        self.calls.push(DrawCall::FillPolygon {
            points: points.to_vec(),
            color,
            opacity,
        });
        Ok(())
    }

    fn stroke_path(&mut self, points: &[Point], style: &LineStyle) -> ReelResult<()> {
        let opacity = self.opacity();
        self.calls.push(DrawCall::Stroke {
            points: points.to_vec(),
            style: *style,
            opacity,
        });
        Ok(())
    }

    fn marker(&mut self, at: Point, style: &MarkerStyle, scale: f64) -> ReelResult<()> {
        let opacity = self.opacity();
        self.calls.push(DrawCall::Marker {
            at,
            style: *style,
            scale,
            opacity,
        });
        Ok(())
    }

    fn text(&mut self, at: Point, content: &str, style: &TextStyle) -> ReelResult<()> {
        let opacity = self.opacity();
        self.calls.push(DrawCall::Text {
            at,
            content: content.to_owned(),
            style: *style,
            opacity,
        });
        Ok(())
    }

    fn image(&mut self, rect: Rect, texture: &Texture, rotation_deg: f64) -> ReelResult<()> {
        let opacity = self.opacity();
        self.calls.push(DrawCall::Image {
            rect,
            size: (texture.width, texture.height),
            rotation_deg,
            opacity,
        });
        Ok(())
    }
}
