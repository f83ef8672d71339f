use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy_egui::egui;

use crate::domain::simulation::SimStats;
use crate::physics::World;

pub fn show_diagnostics_panel(
    ctx: &mut egui::Context,
    diagnostics: &DiagnosticsStore,
    stats: &SimStats,
    world: &World,
) {
    egui::Window::new("Diagnostics").show(ctx, |ui| {
        let fps = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|d| d.smoothed());
        if let Some(value) = fps {
            ui.label(format!("FPS: {:.1}", value));
        }
        ui.label(format!("Ticks: {}", stats.ticks));
        ui.label(format!("Contacts last tick: {}", stats.contacts));
        let bounds = world.bounds();
        ui.label(format!("Bounds: {} x {}", bounds.x, bounds.y));
        match world.grabbed() {
            Some(id) => ui.label(format!("Holding ball {id}")),
            None => ui.label("Holding nothing"),
        };
    });
}
