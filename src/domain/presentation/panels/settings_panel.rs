use bevy::math::Vec2;
use bevy_egui::egui;

use crate::domain::simulation::{SimSettings, SimStats};
use crate::physics::World;

/// Inspector for every body and force. Values typed here are written
/// straight into the world without validation.
pub fn show_settings_panel(
    ctx: &mut egui::Context,
    settings: &mut SimSettings,
    stats: &SimStats,
    world: &mut World,
) {
    egui::Window::new("Settings").show(ctx, |ui| {
        ui.label(format!("Balls: {}", stats.bodies));
        ui.checkbox(&mut settings.running, "Running");

        ui.separator();

        let config = world.config_mut();
        ui.add(egui::Slider::new(&mut config.radius, 4.0..=96.0).text("Radius"));
        ui.add(egui::Slider::new(&mut config.damping, 0.0..=1.0).text("Damping"));

        ui.separator();

        for (i, body) in world.bodies_mut().iter_mut().enumerate() {
            ui.push_id(("ball", i), |ui| {
                let title = if body.held {
                    format!("Ball {i} (held)")
                } else {
                    format!("Ball {i}")
                };
                ui.label(title);
                drag_vec2(ui, "Position", &mut body.position, 1.0);
                drag_vec2(ui, "Velocity", &mut body.velocity, 0.1);
            });
        }

        ui.separator();

        for (i, force) in world.forces_mut().iter_mut().enumerate() {
            ui.push_id(("force", i), |ui| {
                ui.weak(force.name.as_str());
                drag_vec2(ui, "Force", &mut force.vector, 0.01);
            });
        }
    });
}

fn drag_vec2(ui: &mut egui::Ui, label: &str, value: &mut Vec2, speed: f64) {
    ui.horizontal(|ui| {
        ui.add(egui::DragValue::new(&mut value.x).speed(speed));
        ui.add(egui::DragValue::new(&mut value.y).speed(speed));
        ui.label(label);
    });
}
