//! Projectile - the bubble in flight.
//!
//! The projectile rises straight up on a fixed tick until it touches a grid
//! bubble or the top wall, then snaps into the nearest empty cell. The tick
//! duration and per-tick step are the classic 30 ms / 5 px.

use std::time::Duration;

use bevy::prelude::*;

use super::{
    bubble::{BubbleColor, GameAssets, spawn_bubble},
    cell::{BOTTOM_WALL, BUBBLE_RADIUS, CELL_SIZE, GridCoord, TOP_WALL},
    grid::BubbleGrid,
};
use crate::{PausableSystems, audio::sound_effect, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Projectile>();
    app.add_message::<FireProjectile>();
    app.add_message::<BubbleLanded>();

    // The ascent runs on the fixed-tick schedule.
    app.insert_resource(Time::<Fixed>::from_duration(Duration::from_millis(
        TICK_MILLIS,
    )));

    app.add_systems(
        Update,
        spawn_projectile
            .in_set(PausableSystems)
            .run_if(in_state(Screen::Gameplay)),
    );

    app.add_systems(
        FixedUpdate,
        (move_projectile, check_collision)
            .chain()
            .in_set(PausableSystems)
            .run_if(in_state(Screen::Gameplay)),
    );
}

/// Duration of one simulation tick in milliseconds.
const TICK_MILLIS: u64 = 30;

/// Distance the projectile rises per tick, in pixels.
const ASCENT_STEP: f32 = 5.0;

/// Center-to-center distance at which a projectile touches a grid bubble.
/// Two 25 px radii, so exactly one cell width; a distance of exactly this
/// value is not a collision.
pub const COLLISION_DISTANCE: f32 = BUBBLE_RADIUS * 2.0;

/// The projectile starts resting on the bottom edge of the field.
const SPAWN_Y: f32 = BOTTOM_WALL + BUBBLE_RADIUS;

/// Message to fire a projectile.
#[derive(Message, Debug, Clone)]
pub struct FireProjectile {
    /// World x position the projectile rises along.
    pub x: f32,
    /// The bubble color.
    pub color: BubbleColor,
}

/// Message sent when a bubble lands on the grid.
/// Used to trigger cluster detection and the game-over check.
#[derive(Message, Debug, Clone)]
pub struct BubbleLanded {
    pub coord: GridCoord,
    pub color: BubbleColor,
}

/// Component marking an entity as the active projectile.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    /// The bubble color.
    pub color: BubbleColor,
}

/// Spawn a projectile when the fire message is received.
fn spawn_projectile(
    mut commands: Commands,
    mut fire_events: MessageReader<FireProjectile>,
    game_assets: Res<GameAssets>,
) {
    for event in fire_events.read() {
        commands.spawn(sound_effect(game_assets.shoot_sound.clone()));

        commands.spawn((
            Name::new("Projectile"),
            Projectile { color: event.color },
            Sprite {
                image: game_assets.image_for(event.color),
                custom_size: Some(Vec2::splat(CELL_SIZE)),
                ..default()
            },
            Transform::from_translation(Vec3::new(event.x, SPAWN_Y, 5.0)),
            DespawnOnExit(Screen::Gameplay),
        ));

        info!("Spawned {:?} projectile at x={}", event.color, event.x);
    }
}

/// Advance the projectile one tick upward.
fn move_projectile(mut query: Query<&mut Transform, With<Projectile>>) {
    for mut transform in &mut query {
        transform.translation.y += ASCENT_STEP;
    }
}

/// True if the projectile at `pos` touches any grid bubble.
///
/// Grid bubbles are always cell-aligned, so their centers derive from their
/// cell addresses.
pub fn hits_grid(pos: Vec2, grid: &BubbleGrid) -> bool {
    grid.coords()
        .any(|coord| coord.to_world().distance(pos) < COLLISION_DISTANCE)
}

/// Test the projectile against the grid and the top wall, landing it on hit.
fn check_collision(
    mut commands: Commands,
    mut grid: ResMut<BubbleGrid>,
    projectile_query: Query<(Entity, &Transform, &Projectile)>,
    mut landed_events: MessageWriter<BubbleLanded>,
    game_assets: Res<GameAssets>,
) {
    let Ok((entity, transform, projectile)) = projectile_query.single() else {
        return;
    };

    let pos = transform.translation.truncate();
    let at_top_wall = pos.y + BUBBLE_RADIUS >= TOP_WALL;

    if !at_top_wall && !hits_grid(pos, &grid) {
        return;
    }

    commands.entity(entity).despawn();

    let Some(coord) = grid.closest_empty_cell(pos) else {
        // The grid is packed solid; nowhere to land.
        warn!("No empty cell near {:?}, dropping projectile", pos);
        return;
    };

    let new_entity = spawn_bubble(&mut commands, &game_assets, coord, projectile.color);
    grid.insert(coord, new_entity, projectile.color);

    info!("Bubble landed at {} with color {:?}", coord, projectile.color);

    landed_events.write(BubbleLanded {
        coord,
        color: projectile.color,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_bubble_at(col: i32, row: i32) -> BubbleGrid {
        let mut grid = BubbleGrid::default();
        grid.insert(GridCoord::new(col, row), Entity::PLACEHOLDER, BubbleColor::Red);
        grid
    }

    #[test]
    fn test_no_collision_on_empty_grid() {
        let grid = BubbleGrid::default();
        assert!(!hits_grid(Vec2::ZERO, &grid));
    }

    #[test]
    fn test_collision_inside_threshold() {
        let grid = grid_with_bubble_at(4, 4);
        let center = GridCoord::new(4, 4).to_world();
        assert!(hits_grid(center + Vec2::new(0.0, -49.9), &grid));
    }

    #[test]
    fn test_no_collision_at_exact_threshold() {
        let grid = grid_with_bubble_at(4, 4);
        let center = GridCoord::new(4, 4).to_world();
        // Exactly one cell width apart: touching cells, not a collision.
        assert!(!hits_grid(center + Vec2::new(0.0, -COLLISION_DISTANCE), &grid));
        assert!(!hits_grid(center + Vec2::new(COLLISION_DISTANCE, 0.0), &grid));
    }

    #[test]
    fn test_collision_is_euclidean() {
        let grid = grid_with_bubble_at(4, 4);
        let center = GridCoord::new(4, 4).to_world();
        // 40 px on both axes is ~56.6 px away: no hit.
        assert!(!hits_grid(center + Vec2::new(40.0, -40.0), &grid));
        // 30 px on both axes is ~42.4 px away: hit.
        assert!(hits_grid(center + Vec2::new(30.0, -30.0), &grid));
    }
}
