use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin};

use crate::domain::controls::Keybinds;
use crate::domain::simulation::{PhysicsWorld, SimSet, SimSettings, SimStats};

mod panels;

use panels::{show_diagnostics_panel, show_help_panel, show_settings_panel};

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Update, ui_system.in_set(SimSet::Input));
    }
}

/// Panels edit the world directly; running in the input set keeps those
/// writes ahead of the tick.
fn ui_system(
    mut contexts: EguiContexts,
    mut settings: ResMut<SimSettings>,
    stats: Res<SimStats>,
    mut world: ResMut<PhysicsWorld>,
    keybinds: Res<Keybinds>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    show_settings_panel(ctx, &mut settings, &stats, &mut world);
    show_help_panel(ctx, &settings, &keybinds);
    if settings.show_diagnostics {
        show_diagnostics_panel(ctx, &diagnostics, &stats, &world);
    }
}
