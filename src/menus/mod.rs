//! The game's menus and transitions between them.

mod gameover;
mod main;
mod pause;
mod settings;

use bevy::prelude::*;

pub(crate) fn plugin(app: &mut App) {
    app.init_state::<Menu>();

    app.add_plugins((
        gameover::plugin,
        main::plugin,
        pause::plugin,
        settings::plugin,
    ));
}

#[derive(States, Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Menu {
    #[default]
    None,
    Main,
    Settings,
    Pause,
    GameOver,
}
