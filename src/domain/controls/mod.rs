use bevy::input::mouse::MouseButtonInput;
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow, WindowFocused, WindowMode};
use bevy_egui::EguiContexts;

use crate::domain::simulation::{PhysicsWorld, ResetEvent, SimSet, SimSettings, SpawnBall};
use crate::physics;

#[derive(Resource)]
pub struct Keybinds {
    pub pause: KeyCode,
    pub reset: KeyCode,
    pub spawn: KeyCode,
    pub fullscreen: KeyCode,
    pub quit: KeyCode,
    pub help: KeyCode,
    pub diagnostics: KeyCode,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            pause: KeyCode::Space,
            reset: KeyCode::KeyR,
            spawn: KeyCode::KeyN,
            fullscreen: KeyCode::KeyF,
            quit: KeyCode::Escape,
            help: KeyCode::KeyH,
            diagnostics: KeyCode::F3,
        }
    }
}

/// Which pointer currently owns the world's grab slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch(u64),
}

/// Routes press/drag/release from several pointers into the single grab
/// slot. Only the pointer that grabbed may move or release the body.
#[derive(Resource, Debug, Default)]
pub struct PointerOwner(Option<PointerSource>);

impl PointerOwner {
    pub fn owner(&self) -> Option<PointerSource> {
        self.0
    }

    pub fn press(&mut self, source: PointerSource, world: &mut physics::World, at: Vec2) {
        if self.0.is_some() {
            return;
        }
        if world.press(at).is_some() {
            self.0 = Some(source);
        }
    }

    pub fn drag(&self, source: PointerSource, world: &mut physics::World, at: Vec2) {
        if self.0 == Some(source) {
            world.drag(at);
        }
    }

    pub fn release(&mut self, source: PointerSource, world: &mut physics::World) {
        if self.0 == Some(source) {
            world.release();
            self.0 = None;
        }
    }

    /// Drop the grab whoever owns it.
    pub fn cancel(&mut self, world: &mut physics::World) {
        world.release();
        self.0 = None;
    }
}

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Keybinds>()
            .init_resource::<PointerOwner>()
            .add_systems(
                Update,
                (
                    (mouse_drag, touch_drag, release_on_focus_loss).chain(),
                    pause_toggle,
                    reset_trigger,
                    spawn_trigger,
                    fullscreen_toggle,
                    escape,
                    help_toggle,
                    diagnostics_toggle,
                )
                    .in_set(SimSet::Input),
            );
    }
}

fn pointer_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .try_ctx_mut()
        .is_some_and(|ctx| ctx.is_pointer_over_area() || ctx.is_using_pointer())
}

/// Left button grabs, cursor motion drags, release lets go. Window
/// coordinates are already top-left origin with Y down, same as the world.
fn mouse_drag(
    mut contexts: EguiContexts,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut mousebtn_evr: EventReader<MouseButtonInput>,
    mut cursor_evr: EventReader<CursorMoved>,
    mut owner: ResMut<PointerOwner>,
    mut world: ResMut<PhysicsWorld>,
) {
    let over_ui = pointer_over_ui(&mut contexts);
    let mut released = false;

    for ev in mousebtn_evr.read() {
        if ev.button != MouseButton::Left {
            continue;
        }
        match ev.state {
            ButtonState::Pressed => {
                if over_ui {
                    continue;
                }
                let Ok(win) = windows.get_single() else {
                    continue;
                };
                let Some(cursor) = win.cursor_position() else {
                    continue;
                };
                owner.press(PointerSource::Mouse, &mut world, cursor);
            }
            ButtonState::Released => released = true,
        }
    }

    for ev in cursor_evr.read() {
        owner.drag(PointerSource::Mouse, &mut world, ev.position);
    }

    if released {
        owner.release(PointerSource::Mouse, &mut world);
    }
}

fn touch_drag(
    mut contexts: EguiContexts,
    mut touch_evr: EventReader<TouchInput>,
    mut owner: ResMut<PointerOwner>,
    mut world: ResMut<PhysicsWorld>,
) {
    let over_ui = pointer_over_ui(&mut contexts);

    for ev in touch_evr.read() {
        let source = PointerSource::Touch(ev.id);
        match ev.phase {
            TouchPhase::Started if !over_ui => owner.press(source, &mut world, ev.position),
            TouchPhase::Moved => owner.drag(source, &mut world, ev.position),
            TouchPhase::Ended | TouchPhase::Canceled => owner.release(source, &mut world),
            _ => {}
        }
    }
}

fn release_on_focus_loss(
    mut focus_evr: EventReader<WindowFocused>,
    mut owner: ResMut<PointerOwner>,
    mut world: ResMut<PhysicsWorld>,
) {
    if focus_evr.read().any(|ev| !ev.focused) {
        owner.cancel(&mut world);
    }
}

fn pause_toggle(
    mut settings: ResMut<SimSettings>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.pause) {
        settings.running = !settings.running;
        debug!("simulation running: {}", settings.running);
    }
}

fn reset_trigger(
    mut ev_reset: EventWriter<ResetEvent>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.reset) {
        ev_reset.send(ResetEvent);
    }
}

fn spawn_trigger(
    mut ev_spawn: EventWriter<SpawnBall>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.spawn) {
        ev_spawn.send(SpawnBall);
    }
}

fn fullscreen_toggle(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if !keys.just_pressed(keybinds.fullscreen) {
        return;
    }
    let Ok(mut win) = windows.get_single_mut() else {
        return;
    };
    win.mode = match win.mode {
        WindowMode::Windowed => WindowMode::BorderlessFullscreen,
        _ => WindowMode::Windowed,
    };
    debug!("window mode: {:?}", win.mode);
}

/// Escape leaves fullscreen first and quits from a windowed window.
fn escape(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut exit: EventWriter<AppExit>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if !keys.just_pressed(keybinds.quit) {
        return;
    }
    let Ok(mut win) = windows.get_single_mut() else {
        return;
    };
    if win.mode == WindowMode::Windowed {
        info!("quit requested");
        exit.send(AppExit::Success);
    } else {
        win.mode = WindowMode::Windowed;
    }
}

fn help_toggle(
    mut settings: ResMut<SimSettings>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.help) {
        settings.show_help = !settings.show_help;
    }
}

fn diagnostics_toggle(
    mut settings: ResMut<SimSettings>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.diagnostics) {
        settings.show_diagnostics = !settings.show_diagnostics;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FINGER: PointerSource = PointerSource::Touch(3);

    fn world() -> physics::World {
        physics::World::new(IVec2::new(800, 600))
    }

    #[test]
    fn mouse_press_during_touch_grab_is_ignored() {
        let mut w = world();
        let mut owner = PointerOwner::default();
        owner.press(FINGER, &mut w, Vec2::new(200.0, 300.0));
        owner.press(PointerSource::Mouse, &mut w, Vec2::new(600.0, 300.0));

        assert_eq!(owner.owner(), Some(FINGER));
        assert_eq!(w.grabbed(), Some(0));
        assert!(!w.bodies()[1].held);
    }

    #[test]
    fn mouse_cannot_drag_or_release_a_touch_grab() {
        let mut w = world();
        let mut owner = PointerOwner::default();
        owner.press(FINGER, &mut w, Vec2::new(200.0, 300.0));
        owner.drag(PointerSource::Mouse, &mut w, Vec2::new(10.0, 10.0));
        owner.release(PointerSource::Mouse, &mut w);

        assert_eq!(w.bodies()[0].position, Vec2::new(200.0, 300.0));
        assert!(w.bodies()[0].held);

        owner.drag(FINGER, &mut w, Vec2::new(250.0, 250.0));
        owner.release(FINGER, &mut w);
        assert_eq!(w.bodies()[0].position, Vec2::new(250.0, 250.0));
        assert!(!w.bodies()[0].held);
        assert_eq!(owner.owner(), None);
    }

    #[test]
    fn missed_press_leaves_slot_free() {
        let mut w = world();
        let mut owner = PointerOwner::default();
        owner.press(FINGER, &mut w, Vec2::new(400.0, 100.0));
        assert_eq!(owner.owner(), None);

        owner.press(PointerSource::Mouse, &mut w, Vec2::new(600.0, 300.0));
        assert_eq!(owner.owner(), Some(PointerSource::Mouse));
        assert_eq!(w.grabbed(), Some(1));
    }

    #[test]
    fn cancel_drops_any_grab() {
        let mut w = world();
        let mut owner = PointerOwner::default();
        owner.press(FINGER, &mut w, Vec2::new(200.0, 300.0));
        owner.cancel(&mut w);
        assert_eq!(owner.owner(), None);
        assert!(w.bodies().iter().all(|b| !b.held));
    }
}
