//! Draggable bouncing balls.
//!
//! [`physics`] is the simulation and can be driven without a window;
//! [`domain`] wires it into a Bevy app.

pub mod domain;
pub mod physics;
