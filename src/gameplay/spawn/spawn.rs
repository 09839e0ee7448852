use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::state::AppState;
use crate::core::components::{BallRadius, BodyVisual, GameplayEntity, MarkerKind, Player, Wall};
use crate::core::config::{ArenaConfig, GameConfig};
use crate::physics::categories::CollisionCategory;
use crate::rendering::materials::materials::MarkerVisuals;

/// Fixed seed for reproducible marker placement (CLI `--seed`, tests).
#[derive(Resource, Debug, Clone, Copy)]
pub struct RngSeed(pub u64);

#[derive(Resource, Debug, Deref, DerefMut)]
pub struct GameRng(pub StdRng);

impl FromWorld for GameRng {
    fn from_world(world: &mut World) -> Self {
        match world.get_resource::<RngSeed>() {
            Some(seed) => GameRng(StdRng::seed_from_u64(seed.0)),
            None => GameRng(StdRng::from_entropy()),
        }
    }
}

const PLAYER_Z: f32 = 2.0;
const MARKER_Z: f32 = 1.0;

pub struct BallSpawnPlugin;

impl Plugin for BallSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameRng>()
            .add_systems(OnEnter(AppState::Playing), spawn_level);
    }
}

/// Uniform position inside the arena's marker rectangle.
pub fn random_marker_position(rng: &mut impl Rng, arena: &ArenaConfig) -> Vec2 {
    fn sample(rng: &mut impl Rng, a: f32, b: f32) -> f32 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if (hi - lo) < f32::EPSILON {
            lo
        } else {
            rng.gen_range(lo..=hi)
        }
    }
    Vec2::new(
        sample(rng, arena.spawn_x.min, arena.spawn_x.max),
        sample(rng, arena.spawn_y.min, arena.spawn_y.max),
    )
}

fn attach_circle_visual(
    commands: &mut Commands,
    parent: Entity,
    radius: f32,
    material: Handle<ColorMaterial>,
    visuals: &MarkerVisuals,
) {
    commands.entity(parent).with_children(|p| {
        p.spawn((
            BodyVisual,
            Mesh2d(visuals.circle.clone()),
            MeshMaterial2d(material),
            Transform::from_scale(Vec3::splat(radius * 2.0)),
        ));
    });
}

pub fn spawn_player(
    commands: &mut Commands,
    cfg: &GameConfig,
    visuals: Option<&MarkerVisuals>,
) -> Entity {
    let radius = cfg.player.radius;
    let start = cfg.player.start.as_vec2();
    let entity = commands
        .spawn((
            Player,
            BallRadius(radius),
            GameplayEntity,
            Transform::from_translation(start.extend(PLAYER_Z)),
            Visibility::default(),
            RigidBody::Dynamic,
            Collider::ball(radius),
            LockedAxes::ROTATION_LOCKED,
            Damping {
                linear_damping: cfg.player.linear_damping,
                angular_damping: 0.0,
            },
            Restitution::coefficient(cfg.player.restitution),
            Velocity::zero(),
            CollisionCategory::Player.collision_groups(),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id();
    if let Some(v) = visuals {
        attach_circle_visual(commands, entity, radius, v.player.clone(), v);
    }
    debug!(target: "spawn", "player {:?} at ({:.1}, {:.1})", entity, start.x, start.y);
    entity
}

/// Fixed, contact-only marker; the sensor never blocks the player.
pub fn spawn_marker(
    commands: &mut Commands,
    kind: MarkerKind,
    position: Vec2,
    cfg: &GameConfig,
    visuals: Option<&MarkerVisuals>,
) -> Entity {
    let radius = match kind {
        MarkerKind::Star => cfg.markers.star_radius,
        MarkerKind::Skull => cfg.markers.skull_radius,
        MarkerKind::Finish => cfg.markers.finish_radius,
    };
    let entity = commands
        .spawn((
            kind,
            BallRadius(radius),
            GameplayEntity,
            Transform::from_translation(position.extend(MARKER_Z)),
            Visibility::default(),
            RigidBody::Fixed,
            Collider::ball(radius),
            Sensor,
            CollisionCategory::for_marker(kind).collision_groups(),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id();
    if let Some(v) = visuals {
        attach_circle_visual(commands, entity, radius, v.material_for(kind), v);
    }
    debug!(target: "spawn", "{} {:?} at ({:.1}, {:.1})", kind.label(), entity, position.x, position.y);
    entity
}

pub fn spawn_star(
    commands: &mut Commands,
    rng: &mut GameRng,
    cfg: &GameConfig,
    visuals: Option<&MarkerVisuals>,
) -> Entity {
    let pos = random_marker_position(&mut rng.0, &cfg.arena);
    spawn_marker(commands, MarkerKind::Star, pos, cfg, visuals)
}

pub fn spawn_skull(
    commands: &mut Commands,
    rng: &mut GameRng,
    cfg: &GameConfig,
    visuals: Option<&MarkerVisuals>,
) -> Entity {
    let pos = random_marker_position(&mut rng.0, &cfg.arena);
    spawn_marker(commands, MarkerKind::Skull, pos, cfg, visuals)
}

pub fn spawn_finish(
    commands: &mut Commands,
    cfg: &GameConfig,
    visuals: Option<&MarkerVisuals>,
) -> Entity {
    spawn_marker(
        commands,
        MarkerKind::Finish,
        cfg.markers.finish_position.as_vec2(),
        cfg,
        visuals,
    )
}

/// Four solid walls just outside the arena rectangle.
pub fn spawn_arena_walls(
    commands: &mut Commands,
    cfg: &GameConfig,
    visuals: Option<&MarkerVisuals>,
) -> Vec<Entity> {
    let half = Vec2::new(cfg.arena.width, cfg.arena.height) * 0.5;
    let t = cfg.arena.wall_thickness.max(1.0);
    let segments = [
        (Vec2::new(0.0, half.y + t * 0.5), Vec2::new(cfg.arena.width + 2.0 * t, t)),
        (Vec2::new(0.0, -half.y - t * 0.5), Vec2::new(cfg.arena.width + 2.0 * t, t)),
        (Vec2::new(-half.x - t * 0.5, 0.0), Vec2::new(t, cfg.arena.height)),
        (Vec2::new(half.x + t * 0.5, 0.0), Vec2::new(t, cfg.arena.height)),
    ];
    let mut out = Vec::with_capacity(segments.len());
    for (center, size) in segments {
        let e = commands
            .spawn((
                Wall,
                GameplayEntity,
                Transform::from_translation(center.extend(0.0)),
                Visibility::default(),
                RigidBody::Fixed,
                Collider::cuboid(size.x * 0.5, size.y * 0.5),
                CollisionCategory::Wall.collision_groups(),
            ))
            .id();
        if let Some(v) = visuals {
            commands.entity(e).with_children(|p| {
                p.spawn((
                    BodyVisual,
                    Mesh2d(v.square.clone()),
                    MeshMaterial2d(v.wall.clone()),
                    Transform::from_scale(size.extend(1.0)),
                ));
            });
        }
        out.push(e);
    }
    out
}

/// Initial scene: one star, one skull, the finish, the player and the walls.
pub fn spawn_level(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    visuals: Option<Res<MarkerVisuals>>,
) {
    let visuals = visuals.as_deref();
    spawn_star(&mut commands, &mut rng, &cfg, visuals);
    spawn_skull(&mut commands, &mut rng, &cfg, visuals);
    spawn_finish(&mut commands, &cfg, visuals);
    spawn_player(&mut commands, &cfg, visuals);
    if cfg.arena.walls {
        spawn_arena_walls(&mut commands, &cfg, visuals);
    }
    info!(target: "spawn", "level ready");
}
