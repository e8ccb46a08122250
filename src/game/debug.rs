//! Debug visualization for the grid.
//!
//! Toggle with the 'D' key during gameplay. Shows cell outlines for all
//! valid positions with occupied cells highlighted. The field border and the
//! game-over line are always drawn.

use bevy::{color::palettes::css, input::common_conditions::input_just_pressed, prelude::*};

use super::{
    cell::{BOTTOM_WALL, CELL_SIZE, GridCoord, LEFT_WALL, RIGHT_WALL, TOP_WALL},
    grid::BubbleGrid,
};
use crate::screens::Screen;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<DebugGridVisible>();

    app.add_systems(
        Update,
        toggle_debug.run_if(in_state(Screen::Gameplay).and(input_just_pressed(KeyCode::KeyD))),
    );

    app.add_systems(
        Update,
        draw_debug_grid.run_if(in_state(Screen::Gameplay).and(debug_visible)),
    );

    app.add_systems(Update, draw_field.run_if(in_state(Screen::Gameplay)));
}

/// Resource to track if debug visualization is visible.
#[derive(Resource, Default)]
pub struct DebugGridVisible(pub bool);

fn debug_visible(debug: Res<DebugGridVisible>) -> bool {
    debug.0
}

fn toggle_debug(mut debug: ResMut<DebugGridVisible>) {
    debug.0 = !debug.0;
    let state = if debug.0 { "ON" } else { "OFF" };
    info!("Debug grid: {}", state);
}

/// Draw the cell grid using Bevy's Gizmos.
fn draw_debug_grid(mut gizmos: Gizmos, grid: Res<BubbleGrid>) {
    let bounds = &grid.bounds;

    for row in 0..bounds.rows {
        for col in 0..bounds.cols {
            let coord = GridCoord::new(col, row);

            let color = if grid.is_occupied(coord) {
                css::LIMEGREEN.with_alpha(0.5)
            } else if row == bounds.rows - 1 {
                // The game-over row.
                css::INDIAN_RED.with_alpha(0.3)
            } else {
                css::WHITE.with_alpha(0.15)
            };

            gizmos.rect_2d(
                Isometry2d::from_translation(coord.to_world()),
                Vec2::splat(CELL_SIZE),
                color,
            );
        }
    }
}

/// Draw the field border and the game-over line (always visible).
fn draw_field(mut gizmos: Gizmos) {
    let wall_color = css::ORANGE.with_alpha(0.8);
    let danger_color = css::RED.with_alpha(0.6);

    gizmos.rect_2d(
        Isometry2d::IDENTITY,
        Vec2::new(RIGHT_WALL - LEFT_WALL, TOP_WALL - BOTTOM_WALL),
        wall_color,
    );

    // Bubbles resting below this line end the game.
    let danger_y = BOTTOM_WALL + CELL_SIZE;
    gizmos.line_2d(
        Vec2::new(LEFT_WALL, danger_y),
        Vec2::new(RIGHT_WALL, danger_y),
        danger_color,
    );
}
