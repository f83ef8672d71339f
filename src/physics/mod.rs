//! Window-independent ball simulation.
//!
//! A [`World`] owns a fixed set of equal-radius balls and a set of constant
//! forces. [`World::tick`] integrates the free balls, confines every ball to
//! the bounds and resolves contacts. Pointer input goes through
//! [`World::press`], [`World::drag`] and [`World::release`], which may be
//! called between any two ticks.
//!
//! Coordinates are top-left origin with Y growing downward; velocities are in
//! world units per tick.

pub mod collision;
pub mod config;
pub mod integrator;
pub mod interaction;
pub mod world;

pub use collision::{reflect, Contact};
pub use config::{WorldConfig, DEFAULT_DAMPING, DEFAULT_RADIUS};
pub use integrator::confine;
pub use interaction::clamp_to_bounds;
pub use world::{Body, BodyId, ForceGenerator, World, WorldBounds};
