//! The main game module for the bubble shooter.
//!
//! This module contains all the gameplay logic including:
//! - Square grid coordinates and field dimensions
//! - Bubble entities and colors
//! - Click-to-fire input
//! - Fixed-tick projectile ascent and collision
//! - Cluster detection and popping
//! - Score and game-over handling

mod bubble;
pub(crate) mod cell;
mod cluster;
mod debug;
mod grid;
mod polish;
mod projectile;
mod shooter;
mod state;

use bevy::prelude::*;

pub use state::GameScore;

pub(crate) fn plugin(app: &mut App) {
    app.add_plugins((
        grid::plugin,
        bubble::plugin,
        shooter::plugin,
        projectile::plugin,
        cluster::plugin,
        state::plugin,
        polish::plugin,
        debug::plugin,
    ));
}

/// System to spawn the game level when entering gameplay.
/// Called from `screens/gameplay.rs` on `OnEnter(Screen::Gameplay)`.
pub fn spawn_game(mut commands: Commands) {
    commands.spawn((
        Name::new("Game"),
        Transform::default(),
        Visibility::default(),
        DespawnOnExit(crate::screens::Screen::Gameplay),
    ));

    // Field backdrop, behind the bubbles.
    commands.spawn((
        Name::new("Field Backdrop"),
        Sprite {
            color: Color::srgb(0.08, 0.08, 0.12),
            custom_size: Some(Vec2::new(cell::FIELD_WIDTH, cell::FIELD_HEIGHT)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, -1.0),
        DespawnOnExit(crate::screens::Screen::Gameplay),
    ));

    info!("Game spawned - bubble shooter ready!");
}
