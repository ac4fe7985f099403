use crate::{
    actor::{Actor, ActorCore, ActorList, ColorTarget},
    animation::{
        callback::{Callback, FadeInOut},
        period::Period,
    },
    content::Placement,
    foundation::{
        color::Color,
        error::ReelResult,
        geometry::Point,
    },
    render::canvas::{Canvas, MarkerStyle, TextStyle},
};

/// Annotations paint above the scene.
pub const ANNOTATION_PRIORITY: i32 = 120;

/// Seconds spent typing each token when a [`TextList`] entry is typed out.
pub const TYPING_SECONDS_PER_TOKEN: f64 = 0.05;

/// A line (or several, separated by `\n`) of text anchored at its bottom-left corner.
#[derive(Clone, Debug)]
pub struct Text {
    core: ActorCore,
    content: String,
    at: Point,
    /// Anchor interpretation.
    pub placement: Placement,
    /// Style.
    pub style: TextStyle,
}

impl Text {
    /// Screen-placed text.
    pub fn new(content: impl Into<String>, at: Point) -> Self {
        Self {
            core: ActorCore::new(ANNOTATION_PRIORITY),
            content: content.into(),
            at,
            placement: Placement::Screen,
            style: TextStyle::default(),
        }
    }

    /// Font size in pixels.
    pub fn with_size(mut self, size: f64) -> Self {
        self.style.size = size;
        self
    }

    /// Glyph color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    /// Draw inside a box.
    pub fn boxed(mut self) -> Self {
        self.style.boxed = true;
        self
    }

    /// Anchor interpretation.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Displayed content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Actor for Text {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn paint(&self, canvas: &mut dyn Canvas) -> ReelResult<()> {
        let at = self.placement.resolve(self.at, canvas.view());
        canvas.text(at, &self.content, &self.style)
    }

    fn set_content(&mut self, content: &str) {
        content.clone_into(&mut self.content);
    }

    fn recolor(&mut self, target: ColorTarget, color: Color) {
        match target {
            ColorTarget::Text => self.style.color = color,
            ColorTarget::Fill => self.style.box_fill = color,
            ColorTarget::Line => self.style.box_edge = color,
            ColorTarget::Marker => {}
        }
    }
}

/// Legend entry: a marker followed by a label.
#[derive(Clone, Debug)]
pub struct Legend {
    core: ActorCore,
    label: String,
    at: Point,
    /// Anchor interpretation.
    pub placement: Placement,
    /// Marker style, usually copied from the trajectory it explains.
    pub marker: MarkerStyle,
    /// Marker size multiplier.
    pub marker_scale: f64,
    /// Label style.
    pub text: TextStyle,
}

impl Legend {
    /// Screen-placed legend with `marker` centred on `at`.
    pub fn new(label: impl Into<String>, at: Point, marker: MarkerStyle) -> Self {
        Self {
            core: ActorCore::new(ANNOTATION_PRIORITY),
            label: label.into(),
            at,
            placement: Placement::Screen,
            marker,
            marker_scale: 2.0,
            text: TextStyle {
                size: 28.0,
                ..TextStyle::default()
            },
        }
    }

    /// Label color.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text.color = color;
        self
    }

    /// Marker color.
    pub fn with_marker_color(mut self, color: Color) -> Self {
        self.marker.color = color;
        self
    }

    /// Label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Actor for Legend {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn paint(&self, canvas: &mut dyn Canvas) -> ReelResult<()> {
        let at = self.placement.resolve(self.at, canvas.view());
        canvas.marker(at, &self.marker, self.marker_scale)?;
        canvas.text(at + Point::new(0.6, -0.25), &self.label, &self.text)
    }

    fn set_content(&mut self, content: &str) {
        content.clone_into(&mut self.label);
    }

    fn recolor(&mut self, target: ColorTarget, color: Color) {
        match target {
            ColorTarget::Text => self.text.color = color,
            ColorTarget::Marker => self.marker.color = color,
            ColorTarget::Line | ColorTarget::Fill => {}
        }
    }
}

/// One [`TextList`] entry.
#[derive(Clone, Debug, PartialEq)]
pub struct TextEntry {
    /// Tokens revealed one by one when typing; concatenated otherwise.
    pub tokens: Vec<String>,
    /// Visibility window.
    pub period: Period,
}

impl TextEntry {
    /// Entry whose tokens are the characters of `text`.
    pub fn chars(text: &str, start: f64, end: f64) -> Self {
        Self::tokens(text.chars().map(String::from), start, end)
    }

    /// Entry with explicit tokens.
    pub fn tokens<I, S>(tokens: I, start: f64, end: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            period: Period::new(start, end),
        }
    }

    /// Full text.
    pub fn text(&self) -> String {
        self.tokens.concat()
    }
}

/// Sequence of texts shown one after another at the same anchor.
///
/// Each entry fades in and out over its own window. With typing enabled the entry is also revealed
/// token by token, at [`TYPING_SECONDS_PER_TOKEN`] per token, capped at the window length.
#[derive(Clone, Debug)]
pub struct TextList {
    at: Point,
    entries: Vec<TextEntry>,
    typing: bool,
    style: TextStyle,
}

impl TextList {
    /// Empty list anchored at `at` (screen placement), typing enabled.
    pub fn new(at: Point) -> Self {
        Self {
            at,
            entries: Vec::new(),
            typing: true,
            style: TextStyle::default(),
        }
    }

    /// Append an entry.
    pub fn entry(mut self, entry: TextEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Enable or disable the typing effect.
    pub fn typing(mut self, typing: bool) -> Self {
        self.typing = typing;
        self
    }

    /// Font size in pixels for every entry.
    pub fn size(mut self, size: f64) -> Self {
        self.style.size = size;
        self
    }

    /// Build the composite actor.
    pub fn build(self) -> ActorList {
        let mut list = ActorList::new().with_priority(ANNOTATION_PRIORITY);
        for entry in self.entries {
            let Period { start, end } = entry.period;
            let mut text =
                Text::new(entry.text(), self.at).with_callback(FadeInOut::new(start, end));
            text.style = self.style;

            if self.typing && !entry.tokens.is_empty() {
                let typing_time =
                    (entry.tokens.len() as f64 * TYPING_SECONDS_PER_TOKEN).min(end - start);
                text.add_callback(Callback::text_reveal(
                    Period::lasting(start, typing_time),
                    entry.tokens,
                ));
            }
            list.push(text);
        }
        list
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/text.rs"]
mod tests;
