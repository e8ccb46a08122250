//! Bubble entities - the main game objects.
//!
//! Bubbles rest on the square grid and come in five colors. When 3+ of the
//! same color touch along the axes, they pop!

use bevy::prelude::*;
use rand::Rng;

use super::{
    cell::{CELL_SIZE, GridCoord},
    grid::BubbleGrid,
};
use crate::{asset_tracking::LoadResource, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Bubble>();
    app.register_type::<BubbleColor>();

    app.load_resource::<GameAssets>();

    // Spawn the initial bubbles when entering gameplay.
    app.add_systems(OnEnter(Screen::Gameplay), spawn_initial_bubbles);

    // Cleanup bubbles when leaving gameplay (entities despawn via
    // `DespawnOnExit`, the grid map is cleared here).
    app.add_systems(OnExit(Screen::Gameplay), cleanup_bubbles);
}

/// Holds handles for the game's images and sound effects.
#[derive(Resource, Asset, Clone, Reflect)]
#[reflect(Resource)]
pub struct GameAssets {
    #[dependency]
    red_image: Handle<Image>,
    #[dependency]
    blue_image: Handle<Image>,
    #[dependency]
    green_image: Handle<Image>,
    #[dependency]
    yellow_image: Handle<Image>,
    #[dependency]
    purple_image: Handle<Image>,
    #[dependency]
    pub shoot_sound: Handle<AudioSource>,
    #[dependency]
    pub pop_sound: Handle<AudioSource>,
    #[dependency]
    pub game_over_sound: Handle<AudioSource>,
}

impl FromWorld for GameAssets {
    fn from_world(world: &mut World) -> Self {
        let assets = world.resource::<AssetServer>();
        Self {
            red_image: assets.load("images/bubbles/red.png"),
            blue_image: assets.load("images/bubbles/blue.png"),
            green_image: assets.load("images/bubbles/green.png"),
            yellow_image: assets.load("images/bubbles/yellow.png"),
            purple_image: assets.load("images/bubbles/purple.png"),
            shoot_sound: assets.load("audio/sound_effects/shoot.ogg"),
            pop_sound: assets.load("audio/sound_effects/pop.ogg"),
            game_over_sound: assets.load("audio/sound_effects/game_over.ogg"),
        }
    }
}

impl GameAssets {
    /// Get the image for a bubble color.
    pub fn image_for(&self, color: BubbleColor) -> Handle<Image> {
        match color {
            BubbleColor::Red => self.red_image.clone(),
            BubbleColor::Blue => self.blue_image.clone(),
            BubbleColor::Green => self.green_image.clone(),
            BubbleColor::Yellow => self.yellow_image.clone(),
            BubbleColor::Purple => self.purple_image.clone(),
        }
    }
}

/// The different bubble colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Component, Reflect, Default)]
#[reflect(Component)]
pub enum BubbleColor {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl BubbleColor {
    /// Get a random bubble color.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        match rng.random_range(0..5) {
            0 => BubbleColor::Red,
            1 => BubbleColor::Blue,
            2 => BubbleColor::Green,
            3 => BubbleColor::Yellow,
            _ => BubbleColor::Purple,
        }
    }

    /// The render color matching this bubble's sprite.
    pub fn tint(self) -> Color {
        match self {
            BubbleColor::Red => Color::srgb(0.95, 0.3, 0.3),
            BubbleColor::Blue => Color::srgb(0.3, 0.5, 0.95),
            BubbleColor::Green => Color::srgb(0.3, 0.85, 0.4),
            BubbleColor::Yellow => Color::srgb(0.95, 0.85, 0.25),
            BubbleColor::Purple => Color::srgb(0.7, 0.4, 0.9),
        }
    }

    /// Get all possible bubble colors.
    #[allow(dead_code)]
    pub const ALL: [BubbleColor; 5] = [
        BubbleColor::Red,
        BubbleColor::Blue,
        BubbleColor::Green,
        BubbleColor::Yellow,
        BubbleColor::Purple,
    ];
}

/// Marker component for resting bubble entities.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Bubble {
    /// The bubble's color.
    pub color: BubbleColor,
    /// The cell where this bubble rests.
    pub coord: GridCoord,
}

/// Number of rows to fill at the start of the game.
const INITIAL_ROWS: i32 = 5;

/// Number of columns to fill at the start of the game.
const INITIAL_COLS: i32 = 10;

/// Spawn the initial bubbles at the top of the grid.
fn spawn_initial_bubbles(
    mut commands: Commands,
    mut grid: ResMut<BubbleGrid>,
    game_assets: Res<GameAssets>,
) {
    grid.clear();

    for row in 0..INITIAL_ROWS {
        for col in 0..INITIAL_COLS {
            let coord = GridCoord::new(col, row);
            let color = BubbleColor::random();

            let entity = spawn_bubble(&mut commands, &game_assets, coord, color);
            grid.insert(coord, entity, color);
        }
    }

    info!("Spawned {} initial bubbles", grid.len());
}

/// Spawn a single resting bubble at the given cell with the given color.
pub fn spawn_bubble(
    commands: &mut Commands,
    game_assets: &GameAssets,
    coord: GridCoord,
    color: BubbleColor,
) -> Entity {
    commands
        .spawn((
            Name::new(format!("Bubble {:?} at {}", color, coord)),
            Bubble { color, coord },
            Sprite {
                image: game_assets.image_for(color),
                custom_size: Some(Vec2::splat(CELL_SIZE)),
                ..default()
            },
            Transform::from_translation(coord.to_world().extend(0.0)),
            DespawnOnExit(Screen::Gameplay),
        ))
        .id()
}

/// Drop all grid entries when leaving gameplay.
fn cleanup_bubbles(mut grid: ResMut<BubbleGrid>) {
    grid.clear();
    info!("Cleared bubble grid");
}
