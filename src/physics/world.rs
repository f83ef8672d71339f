use bevy::color::Color;
use bevy::log::{debug, info};
use bevy::math::{IVec2, Vec2};

use super::config::WorldConfig;

/// Index of a body in [`World::bodies`]. Stable for the lifetime of a run.
pub type BodyId = usize;

/// Integer width/height of the confinement rectangle.
pub type WorldBounds = IVec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Set while the pointer owns this body. Held bodies skip integration
    /// and are never pushed by collisions.
    pub held: bool,
}

impl Body {
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

/// A named constant contribution added to every free body's velocity each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceGenerator {
    pub name: String,
    pub vector: Vec2,
}

impl ForceGenerator {
    pub fn new(name: impl Into<String>, vector: Vec2) -> Self {
        Self {
            name: name.into(),
            vector,
        }
    }
}

/// Owns every body and force in the simulation, plus the grab slot used by
/// the pointer.
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) bodies: Vec<Body>,
    pub(crate) forces: Vec<ForceGenerator>,
    pub(crate) bounds: WorldBounds,
    pub(crate) config: WorldConfig,
    pub(crate) grabbed: Option<BodyId>,
}

impl World {
    pub fn new(bounds: WorldBounds) -> Self {
        Self::with_config(bounds, WorldConfig::default())
    }

    pub fn with_config(bounds: WorldBounds, config: WorldConfig) -> Self {
        let mut world = Self {
            bodies: Vec::new(),
            forces: Vec::new(),
            bounds,
            config,
            grabbed: None,
        };
        world.populate();
        info!(
            "world created: {}x{}, {} bodies",
            bounds.x,
            bounds.y,
            world.bodies.len()
        );
        world
    }

    /// An empty world: no bodies, no forces.
    pub fn empty(bounds: WorldBounds, config: WorldConfig) -> Self {
        Self {
            bodies: Vec::new(),
            forces: Vec::new(),
            bounds,
            config,
            grabbed: None,
        }
    }

    fn populate(&mut self) {
        let size = self.bounds.as_vec2();
        self.bodies = vec![
            Body::at_rest(Vec2::new(size.x * 0.25, size.y * 0.5)),
            Body::at_rest(Vec2::new(size.x * 0.75, size.y * 0.5)),
        ];
        self.forces = vec![
            ForceGenerator::new("Gravity", Vec2::new(0.0, 0.5)),
            ForceGenerator::new("Wind", Vec2::ZERO),
        ];
    }

    /// Restore the starting population and forces for the current bounds.
    pub fn reset(&mut self) {
        self.grabbed = None;
        self.populate();
        info!("world reset: {} bodies", self.bodies.len());
    }

    /// Bodies left outside the new rectangle are pulled back by the next tick.
    pub fn resize(&mut self, bounds: WorldBounds) {
        if bounds != self.bounds {
            debug!("world resized to {}x{}", bounds.x, bounds.y);
        }
        self.bounds = bounds;
    }

    pub fn spawn_body(&mut self, position: Vec2) -> BodyId {
        self.bodies.push(Body::at_rest(position));
        let id = self.bodies.len() - 1;
        debug!("spawned body {id} at {position}");
        id
    }

    /// One simulation step: integrate, then resolve contacts. Returns the
    /// number of contacts resolved.
    pub fn tick(&mut self) -> usize {
        self.integrate();
        self.resolve_collisions()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Direct write access for inspectors. Values are not validated.
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    pub fn forces(&self) -> &[ForceGenerator] {
        &self.forces
    }

    pub fn forces_mut(&mut self) -> &mut [ForceGenerator] {
        &mut self.forces
    }

    pub fn net_force(&self) -> Vec2 {
        self.forces.iter().map(|f| f.vector).sum()
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut WorldConfig {
        &mut self.config
    }

    /// Position and color of every body, in storage order.
    pub fn drawables(&self) -> impl Iterator<Item = (Vec2, Color)> + '_ {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (b.position, self.config.color_for(i)))
    }
}
