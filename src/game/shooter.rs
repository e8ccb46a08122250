//! Firing bubbles into the field.
//!
//! A pointer click over the play field launches a bubble straight up from
//! the bottom edge at the clicked x position. Only one projectile may be in
//! flight at a time; clicks during a flight are ignored.

use bevy::{prelude::*, window::PrimaryWindow};

use super::{
    bubble::BubbleColor,
    cell::{BUBBLE_RADIUS, LEFT_WALL, RIGHT_WALL},
    projectile::{FireProjectile, Projectile},
};
use crate::{AppSystems, PausableSystems, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        handle_fire_input
            .in_set(AppSystems::RecordInput)
            .in_set(PausableSystems)
            .run_if(in_state(Screen::Gameplay)),
    );
}

/// Handle fire input (mouse click or spacebar).
fn handle_fire_input(
    mouse_input: Res<ButtonInput<MouseButton>>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    projectile_query: Query<&Projectile>,
    mut fire_events: MessageWriter<FireProjectile>,
) {
    let fire_pressed =
        mouse_input.just_pressed(MouseButton::Left) || keyboard_input.just_pressed(KeyCode::Space);

    if !fire_pressed {
        return;
    }

    // One projectile at a time.
    if !projectile_query.is_empty() {
        return;
    }

    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    // Get cursor position in world coordinates.
    let Some(cursor_pos) = window
        .cursor_position()
        .and_then(|p| camera.viewport_to_world_2d(camera_transform, p).ok())
    else {
        return;
    };

    // The shot rises straight up from the bottom edge at the clicked x.
    let x = cursor_pos
        .x
        .clamp(LEFT_WALL + BUBBLE_RADIUS, RIGHT_WALL - BUBBLE_RADIUS);
    let color = BubbleColor::random();

    fire_events.write(FireProjectile { x, color });

    info!("Fired {:?} bubble at x={}", color, x);
}
