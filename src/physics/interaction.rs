use bevy::log::debug;
use bevy::math::Vec2;

use super::world::{BodyId, World, WorldBounds};

impl World {
    /// Grab the first body, in storage order, whose center lies within one
    /// radius of `pointer`. Overlapping candidates are not ranked by distance.
    /// Ignored while another body is held, so at most one body is ever held.
    pub fn press(&mut self, pointer: Vec2) -> Option<BodyId> {
        if let Some(id) = self.grabbed {
            if self.bodies.get(id).is_some() {
                return None;
            }
            self.grabbed = None;
        }
        let radius = self.config.radius;
        let id = self
            .bodies
            .iter()
            .position(|b| b.position.distance(pointer) < radius)?;
        self.bodies[id].held = true;
        self.grabbed = Some(id);
        debug!("grabbed body {id}");
        Some(id)
    }

    /// Move the grabbed body to `pointer`, clamped to the world rectangle.
    pub fn drag(&mut self, pointer: Vec2) {
        let target = clamp_to_bounds(pointer, self.bounds);
        let Some(body) = self.grabbed.and_then(|id| self.bodies.get_mut(id)) else {
            return;
        };
        body.velocity = Vec2::ZERO;
        body.position = target;
    }

    pub fn release(&mut self) {
        let Some(id) = self.grabbed.take() else {
            return;
        };
        if let Some(body) = self.bodies.get_mut(id) {
            body.held = false;
            debug!("released body {id} at {}", body.position);
        }
    }

    pub fn grabbed(&self) -> Option<BodyId> {
        self.grabbed
    }
}

/// Per-axis clamp into `[0, bounds]`. Values are checked against zero first,
/// so a negative bound never panics.
pub fn clamp_to_bounds(pointer: Vec2, bounds: WorldBounds) -> Vec2 {
    let max = bounds.as_vec2();
    Vec2::new(clamp_axis(pointer.x, max.x), clamp_axis(pointer.y, max.y))
}

fn clamp_axis(value: f32, max: f32) -> f32 {
    if value < 0.0 {
        0.0
    } else if value > max {
        max
    } else {
        value
    }
}
