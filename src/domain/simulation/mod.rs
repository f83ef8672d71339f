use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{PrimaryWindow, WindowResized};
use rand::Rng;

use crate::physics;

/// Used until the primary window reports a size.
const FALLBACK_BOUNDS: IVec2 = IVec2::new(1280, 720);

/// Systems that touch the world run in this order every frame, so input,
/// inspector edits and the physics tick never interleave.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    Input,
    Physics,
    Render,
}

pub struct SimPlugin;
impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimSettings>()
            .init_resource::<SimStats>()
            .add_event::<ResetEvent>()
            .add_event::<SpawnBall>()
            .configure_sets(
                Update,
                (SimSet::Input, SimSet::Physics, SimSet::Render).chain(),
            )
            .add_systems(Startup, setup_world)
            .add_systems(
                Update,
                (sync_bounds, handle_reset, spawn_balls, step_world)
                    .chain()
                    .in_set(SimSet::Physics),
            )
            .add_systems(
                Update,
                (sync_ball_meshes, update_render)
                    .chain()
                    .in_set(SimSet::Render),
            );
    }
}

#[derive(Resource, Deref, DerefMut)]
pub struct PhysicsWorld(pub physics::World);

#[derive(Resource, Clone)]
pub struct SimSettings {
    pub running: bool,
    pub show_help: bool,
    pub show_diagnostics: bool,
    /// Upper bound on bodies added with the spawn key.
    pub spawn_limit: usize,
}
impl Default for SimSettings {
    fn default() -> Self {
        Self {
            running: true,
            show_help: true,
            show_diagnostics: false,
            spawn_limit: 64,
        }
    }
}

#[derive(Resource, Default)]
pub struct SimStats {
    pub bodies: usize,
    pub contacts: usize,
    pub ticks: u64,
}

#[derive(Event, Default)]
pub struct ResetEvent;

/// Append a ball at a random spot inside the bounds.
#[derive(Event, Default)]
pub struct SpawnBall;

/// Links a mesh entity to the body at this index.
#[derive(Component)]
pub struct BallSprite(pub physics::BodyId);

/// Unit circle shared by every ball; scaled by the world radius.
#[derive(Resource)]
struct BallMesh(Handle<Mesh>);

pub fn window_bounds(window: &Window) -> IVec2 {
    IVec2::new(window.width() as i32, window.height() as i32)
}

/// World space is top-left origin with Y down; the 2D camera is centered
/// with Y up.
pub fn to_render(position: Vec2, bounds: IVec2, depth: f32) -> Vec3 {
    let half = bounds.as_vec2() * 0.5;
    Vec3::new(position.x - half.x, half.y - position.y, depth)
}

/// Uniform point inside `bounds` inset by `inset` on every side. Collapses to
/// the center on an axis too small for the inset.
pub fn random_point_inside(rng: &mut impl Rng, bounds: IVec2, inset: f32) -> Vec2 {
    let size = bounds.as_vec2();
    let mut axis = |extent: f32| {
        let (lo, hi) = (inset, extent - inset);
        if lo < hi {
            rng.gen_range(lo..hi)
        } else {
            extent * 0.5
        }
    };
    let x = axis(size.x);
    let y = axis(size.y);
    Vec2::new(x, y)
}

fn setup_world(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let bounds = windows
        .get_single()
        .map(window_bounds)
        .unwrap_or(FALLBACK_BOUNDS);
    commands.insert_resource(PhysicsWorld(physics::World::new(bounds)));
    commands.insert_resource(BallMesh(meshes.add(Circle::new(1.0))));
}

fn sync_bounds(mut resized: EventReader<WindowResized>, mut world: ResMut<PhysicsWorld>) {
    if let Some(ev) = resized.read().last() {
        world.resize(IVec2::new(ev.width as i32, ev.height as i32));
    }
}

fn handle_reset(mut ev_reset: EventReader<ResetEvent>, mut world: ResMut<PhysicsWorld>) {
    if ev_reset.read().count() > 0 {
        world.reset();
    }
}

fn spawn_balls(
    mut ev_spawn: EventReader<SpawnBall>,
    mut world: ResMut<PhysicsWorld>,
    settings: Res<SimSettings>,
) {
    let mut rng = rand::thread_rng();
    for _ in ev_spawn.read() {
        if world.bodies().len() >= settings.spawn_limit {
            warn!("spawn limit of {} bodies reached", settings.spawn_limit);
            break;
        }
        let at = random_point_inside(&mut rng, world.bounds(), world.config().half_radius());
        world.spawn_body(at);
    }
}

fn step_world(
    settings: Res<SimSettings>,
    mut stats: ResMut<SimStats>,
    mut world: ResMut<PhysicsWorld>,
) {
    stats.bodies = world.bodies().len();
    if !settings.running {
        return;
    }
    stats.contacts = world.tick();
    stats.ticks += 1;
}

/// One mesh entity per body: spawn the missing ones, drop strays.
fn sync_ball_meshes(
    mut commands: Commands,
    world: Res<PhysicsWorld>,
    mesh: Option<Res<BallMesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    balls: Query<(Entity, &BallSprite)>,
) {
    let Some(mesh) = mesh else {
        return;
    };
    let mut present = vec![false; world.bodies().len()];
    for (entity, ball) in &balls {
        match present.get_mut(ball.0) {
            Some(seen) if !*seen => *seen = true,
            _ => commands.entity(entity).despawn(),
        }
    }

    let radius = world.config().radius;
    for (index, (position, color)) in world.drawables().enumerate() {
        if present[index] {
            continue;
        }
        commands.spawn((
            BallSprite(index),
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(mesh.0.clone()),
                material: materials.add(color),
                transform: Transform::from_translation(to_render(
                    position,
                    world.bounds(),
                    ball_depth(index),
                ))
                .with_scale(Vec3::new(radius, radius, 1.0)),
                ..default()
            },
        ));
    }
}

fn update_render(world: Res<PhysicsWorld>, mut balls: Query<(&BallSprite, &mut Transform)>) {
    let radius = world.config().radius;
    for (ball, mut t) in &mut balls {
        let Some(translation) = ball_translation(&world, ball.0) else {
            continue;
        };
        t.translation = translation;
        t.scale = Vec3::new(radius, radius, 1.0);
    }
}

/// Camera-space position of body `id`, or `None` once the body is gone.
fn ball_translation(world: &physics::World, id: physics::BodyId) -> Option<Vec3> {
    let body = world.body(id)?;
    Some(to_render(body.position, world.bounds(), ball_depth(id)))
}

// Later bodies draw on top.
fn ball_depth(index: usize) -> f32 {
    1.0 + index as f32 * 0.001
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn corners_map_to_centered_camera_space() {
        let bounds = IVec2::new(800, 600);
        assert_eq!(
            to_render(Vec2::ZERO, bounds, 0.0),
            Vec3::new(-400.0, 300.0, 0.0)
        );
        assert_eq!(
            to_render(Vec2::new(800.0, 600.0), bounds, 0.0),
            Vec3::new(400.0, -300.0, 0.0)
        );
        assert_eq!(
            to_render(Vec2::new(400.0, 300.0), bounds, 2.0),
            Vec3::new(0.0, 0.0, 2.0)
        );
    }

    #[test]
    fn ball_translation_tracks_body_and_skips_missing() {
        let mut world = physics::World::new(IVec2::new(800, 600));
        world.bodies_mut()[1].position = Vec2::new(400.0, 0.0);
        assert_eq!(
            ball_translation(&world, 1),
            Some(Vec3::new(0.0, 300.0, ball_depth(1)))
        );
        assert_eq!(ball_translation(&world, 2), None);
    }

    #[test]
    fn random_points_respect_inset() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = IVec2::new(300, 200);
        for _ in 0..500 {
            let p = random_point_inside(&mut rng, bounds, 16.0);
            assert!((16.0..284.0).contains(&p.x), "x out of range: {p}");
            assert!((16.0..184.0).contains(&p.y), "y out of range: {p}");
        }
    }

    #[test]
    fn random_point_collapses_on_tiny_axis() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = random_point_inside(&mut rng, IVec2::new(20, 400), 16.0);
        assert_eq!(p.x, 10.0);
    }
}
