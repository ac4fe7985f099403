use crate::{
    actor::{Actor, ActorCore},
    assets::texture::Texture,
    content::Placement,
    foundation::{
        error::ReelResult,
        geometry::{Point, Rect},
    },
    render::canvas::Canvas,
};

/// Sprites paint above vehicles but below text.
pub const SPRITE_PRIORITY: i32 = 110;

/// A texture stretched over a rectangle centred on `at`.
///
/// The rectangle is multiplied by the core `scale`, so a grow callback pops the sprite in.
#[derive(Clone, Debug)]
pub struct Sprite {
    core: ActorCore,
    texture: Texture,
    at: Point,
    size: Point,
    /// Counter-clockwise rotation in degrees.
    pub rotation_deg: f64,
    /// Anchor interpretation.
    pub placement: Placement,
}

impl Sprite {
    /// Screen-placed sprite of `size` metres.
    pub fn new(texture: Texture, at: Point, size: Point) -> Self {
        Self {
            core: ActorCore::new(SPRITE_PRIORITY),
            texture,
            at,
            size,
            rotation_deg: 0.0,
            placement: Placement::Screen,
        }
    }

    /// Counter-clockwise rotation in degrees.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation_deg = degrees;
        self
    }

    /// Anchor interpretation.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Rectangle covered under `view`, `None` while collapsed.
    pub fn rect(&self, view: Rect) -> Option<Rect> {
        let scale = self.core.scale;
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let centre = self.placement.resolve(self.at, view);
        Some(Rect::centered(centre, self.size * scale))
    }
}

impl Actor for Sprite {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn paint(&self, canvas: &mut dyn Canvas) -> ReelResult<()> {
        match self.rect(canvas.view()) {
            Some(rect) => canvas.image(rect, &self.texture, self.rotation_deg),
            None => Ok(()),
        }
    }

    fn position(&self) -> Option<Point> {
        Some(self.at)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/sprite.rs"]
mod tests;
