//! Bevy host around the physics core, split by discipline.
//! - `controls`: pointer, touch and keyboard input.
//! - `presentation`: egui inspector, help and diagnostics windows.
//! - `simulation`: the world resource, tick scheduling and ball meshes.

pub mod controls;
pub mod presentation;
pub mod simulation;

pub use controls::InputPlugin;
pub use presentation::UiPlugin;
pub use simulation::{SimPlugin, SimSet};
