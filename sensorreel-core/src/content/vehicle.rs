use std::any::Any;

use crate::{
    actor::{Actor, ActorCore, feed::Feed},
    assets::texture::Texture,
    content::controller::Controller,
    foundation::{
        color::Color,
        error::{ReelError, ReelResult},
        geometry::{Point, Rect},
    },
    render::canvas::Canvas,
};

/// Vehicles step before everything else at the same tick and paint on top of the road.
pub const VEHICLE_PRIORITY: i32 = 99;

/// Per-axis speed clamp in m/s.
pub const MAX_SPEED: Point = Point::new(30.0, 5.0);

/// Footprint used when painting, in metres.
pub const VEHICLE_SIZE: Point = Point::new(4.0, 3.0);

/// A car moved by a [`Controller`].
///
/// Every tick the velocity is clamped to [`MAX_SPEED`] and integrated over the time elapsed since
/// the previous tick. The new position is published on [`Vehicle::feed`].
pub struct Vehicle {
    core: ActorCore,
    pos: Point,
    heading_deg: f64,
    controller: Box<dyn Controller>,
    last_time: Option<f64>,
    feed: Feed,
    texture: Option<Texture>,
    rotate_texture: bool,
    fill: Color,
}

impl Vehicle {
    /// Vehicle at `pos` driven by `controller`.
    pub fn new(pos: Point, controller: impl Controller) -> Self {
        let feed = Feed::new();
        feed.publish(pos);
        Self {
            core: ActorCore::new(VEHICLE_PRIORITY),
            pos,
            heading_deg: 0.0,
            controller: Box::new(controller),
            last_time: None,
            feed,
            texture: None,
            rotate_texture: false,
            fill: Color::rgb(0.2, 0.2, 0.2),
        }
    }

    /// Paint with `texture` instead of a plain box.
    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Rotate the texture with the heading.
    pub fn rotating_texture(mut self) -> Self {
        self.rotate_texture = true;
        self
    }

    /// Box color used when there is no texture.
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Current position.
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Heading in degrees, counter-clockwise from +x.
    pub fn heading_deg(&self) -> f64 {
        self.heading_deg
    }

    /// Channel carrying the latest position.
    pub fn feed(&self) -> Feed {
        self.feed.clone()
    }

    /// The controller, downcast to its concrete type.
    pub fn controller_as<C: Controller>(&mut self) -> Option<&mut C> {
        (self.controller.as_mut() as &mut dyn Any).downcast_mut::<C>()
    }
}

impl Actor for Vehicle {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn update(&mut self, time: f64, _view: Rect) -> ReelResult<()> {
        let dt = self.last_time.map_or(0.0, |last| (time - last).max(0.0));
        self.last_time = Some(time);

        let v = self.controller.velocity(time)?;
        let v = Point::new(
            v.x.clamp(-MAX_SPEED.x, MAX_SPEED.x),
            v.y.clamp(-MAX_SPEED.y, MAX_SPEED.y),
        );
        let next = self.pos + v * dt;
        if !next.is_finite() {
            return Err(ReelError::validation(format!(
                "vehicle position diverged at t={time}: {next}"
            )));
        }
        self.pos = next;
        self.heading_deg = v.y.atan2(v.x).to_degrees();
        self.feed.publish(self.pos);
        Ok(())
    }

    fn paint(&self, canvas: &mut dyn Canvas) -> ReelResult<()> {
        let rect = Rect::centered(self.pos, VEHICLE_SIZE);
        match &self.texture {
            Some(texture) => {
                let rotation = if self.rotate_texture {
                    self.heading_deg
                } else {
                    0.0
                };
                canvas.image(rect, texture, rotation)
            }
            None => canvas.fill_rect(rect, self.fill),
        }
    }

    fn position(&self) -> Option<Point> {
        Some(self.pos)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/vehicle.rs"]
mod tests;
