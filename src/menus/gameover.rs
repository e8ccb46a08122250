//! The game over menu, shown when bubbles reach the bottom of the field.

use bevy::prelude::*;

use crate::{game::GameScore, menus::Menu, screens::Screen, theme::widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::GameOver), spawn_gameover_menu);
}

fn spawn_gameover_menu(mut commands: Commands, score: Res<GameScore>) {
    commands.spawn((
        widget::ui_root("Game Over Menu"),
        GlobalZIndex(2),
        DespawnOnExit(Menu::GameOver),
        children![
            widget::header("Game Over"),
            widget::label(format!("Final score: {}", score.score)),
            widget::button("Play again", restart_game),
            widget::button("Quit to title", quit_to_title),
        ],
    ));
}

/// Bounce through the loading screen so the gameplay screen is re-entered
/// with a fresh grid and score.
fn restart_game(_: On<Pointer<Click>>, mut next_screen: ResMut<NextState<Screen>>) {
    next_screen.set(Screen::Loading);
}

fn quit_to_title(_: On<Pointer<Click>>, mut next_screen: ResMut<NextState<Screen>>) {
    next_screen.set(Screen::Title);
}
