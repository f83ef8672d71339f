use bevy::math::Vec2;

use super::config::WorldConfig;
use super::world::{Body, World, WorldBounds};

impl World {
    /// Semi-implicit Euler over every free body, then boundary confinement
    /// over every body.
    pub fn integrate(&mut self) {
        let net = self.net_force();
        for body in &mut self.bodies {
            if !body.held {
                advance(body, net);
            }
            confine(body, self.bounds, &self.config);
        }
    }
}

/// Velocity first, then position.
pub fn advance(body: &mut Body, net_force: Vec2) {
    body.velocity += net_force;
    body.position += body.velocity;
}

/// Keep `body` inside `bounds` inset by half a radius.
///
/// The floor bounces with `damping`, the ceiling absorbs, and both side walls
/// bounce with `damping²`. An edge only acts when the body is moving into it.
pub fn confine(body: &mut Body, bounds: WorldBounds, config: &WorldConfig) {
    let inset = config.half_radius();
    let d = config.damping;
    let max = bounds.as_vec2() - Vec2::splat(inset);
    let (p, v) = (&mut body.position, &mut body.velocity);

    if p.y >= max.y && v.y > 0.0 {
        v.y *= -d;
        p.y = max.y;
    }
    if p.y <= inset && v.y < 0.0 {
        v.y = 0.0;
        p.y = inset;
    }
    if p.x <= inset && v.x < 0.0 {
        v.x *= -d * d;
        p.x = inset;
    }
    if p.x >= max.x && v.x > 0.0 {
        v.x *= -d * d;
        p.x = max.x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::IVec2;

    const BOUNDS: IVec2 = IVec2::new(600, 600);

    fn body(position: Vec2, velocity: Vec2) -> Body {
        Body {
            position,
            velocity,
            held: false,
        }
    }

    #[test]
    fn floor_bounces_with_single_damping() {
        let mut b = body(Vec2::new(300.0, 595.0), Vec2::new(0.0, 2.0));
        confine(&mut b, BOUNDS, &WorldConfig::default());
        assert!((b.velocity.y - -0.9).abs() < 1e-6);
        assert_eq!(b.position.y, 584.0);
    }

    #[test]
    fn ceiling_absorbs() {
        let mut b = body(Vec2::new(300.0, 4.0), Vec2::new(1.0, -7.0));
        confine(&mut b, BOUNDS, &WorldConfig::default());
        assert_eq!(b.velocity, Vec2::new(1.0, 0.0));
        assert_eq!(b.position.y, 16.0);
    }

    #[test]
    fn side_walls_bounce_with_squared_damping() {
        let cfg = WorldConfig::default();
        let d2 = cfg.damping * cfg.damping;

        let mut left = body(Vec2::new(10.0, 300.0), Vec2::new(-4.0, 0.0));
        confine(&mut left, BOUNDS, &cfg);
        assert!((left.velocity.x - 4.0 * d2).abs() < 1e-6);
        assert_eq!(left.position.x, 16.0);

        let mut right = body(Vec2::new(599.0, 300.0), Vec2::new(4.0, 0.0));
        confine(&mut right, BOUNDS, &cfg);
        assert!((right.velocity.x - -4.0 * d2).abs() < 1e-6);
        assert_eq!(right.position.x, 584.0);
    }

    #[test]
    fn undamped_floor_reflects_fully() {
        let cfg = WorldConfig::default().with_damping(1.0);
        let mut b = body(Vec2::new(300.0, 590.0), Vec2::new(0.0, 5.0));
        confine(&mut b, BOUNDS, &cfg);
        assert_eq!(b.velocity.y, -5.0);
    }

    #[test]
    fn edges_ignore_bodies_moving_inward() {
        let mut b = body(Vec2::new(700.0, 700.0), Vec2::new(-1.0, -1.0));
        confine(&mut b, BOUNDS, &WorldConfig::default());
        assert_eq!(b.position, Vec2::new(700.0, 700.0));
        assert_eq!(b.velocity, Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn advance_updates_velocity_before_position() {
        let mut b = body(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        advance(&mut b, Vec2::new(0.0, 2.0));
        assert_eq!(b.velocity, Vec2::new(1.0, 2.0));
        assert_eq!(b.position, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn held_bodies_skip_forces() {
        let mut world = World::new(IVec2::new(800, 600));
        world.bodies_mut()[0].held = true;
        world.bodies_mut()[0].velocity = Vec2::new(3.0, 0.0);
        world.integrate();
        let held = world.bodies()[0];
        assert_eq!(held.position, Vec2::new(200.0, 300.0));
        assert_eq!(held.velocity, Vec2::new(3.0, 0.0));
        assert_eq!(world.bodies()[1].velocity, Vec2::new(0.0, 0.5));
    }

    #[test]
    fn held_bodies_are_still_confined() {
        let mut world = World::new(IVec2::new(800, 600));
        let b = &mut world.bodies_mut()[0];
        b.held = true;
        b.position = Vec2::new(200.0, 650.0);
        b.velocity = Vec2::new(0.0, 1.0);
        world.integrate();
        assert_eq!(world.bodies()[0].position.y, 584.0);
    }
}
