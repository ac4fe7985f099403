use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{ReelError, ReelResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<[u8; 4]> for TextBrush {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// One registered font plus the Parley contexts used to shape text with it.
pub struct FontBook {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl FontBook {
    /// Register a TrueType/OpenType font from memory.
    pub fn from_bytes(font_bytes: Vec<u8>, face_index: u32) -> ReelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ReelError::validation("no font families registered from font bytes")
        })?;

        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ReelError::validation("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes),
            face_index,
        );

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font,
        })
    }

    /// Load a font file.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read font '{}'", path.display()))?;
        Self::from_bytes(bytes, 0)
    }

    /// First sans-serif face found among the system fonts.
    pub fn system_sans() -> ReelResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        let query = usvg::fontdb::Query {
            families: &[usvg::fontdb::Family::SansSerif],
            ..Default::default()
        };
        let id = db
            .query(&query)
            .ok_or_else(|| ReelError::validation("no sans-serif system font found"))?;
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| ReelError::validation("system font face data unavailable"))?;
        Self::from_bytes(bytes, index)
    }

    /// Registered family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape and lay out plain text.
    pub(crate) fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrush,
    ) -> ReelResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ReelError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
