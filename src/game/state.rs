//! Game state management - score and the game-over condition.
//!
//! Score increases by exactly the size of each popped cluster. The game ends
//! when a resting bubble reaches the bottom row of the field, checked only
//! when a bubble lands (after cluster resolution), never continuously.

use bevy::prelude::*;

use super::{
    bubble::GameAssets,
    cluster::{ClusterPopped, ClusterSystems},
    grid::BubbleGrid,
    projectile::BubbleLanded,
};
use crate::{Pause, PausableSystems, audio::sound_effect, menus::Menu, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<GameScore>();
    app.register_type::<GameScore>();
    app.register_type::<ScoreLabel>();

    app.add_systems(OnEnter(Screen::Gameplay), (reset_score, spawn_score_ui));

    app.add_systems(
        Update,
        (
            update_score.after(ClusterSystems),
            check_game_over.after(ClusterSystems),
        )
            .in_set(PausableSystems)
            .run_if(in_state(Screen::Gameplay)),
    );

    // Not pausable, so the label still reflects the final score on the
    // game-over frame.
    app.add_systems(
        Update,
        update_score_label
            .after(update_score)
            .run_if(in_state(Screen::Gameplay).and(resource_changed::<GameScore>)),
    );
}

/// Resource tracking the current score. Monotonically non-decreasing within
/// a round.
#[derive(Resource, Debug, Default, Reflect)]
#[reflect(Resource)]
pub struct GameScore {
    pub score: u32,
}

/// Marker for the score text element.
#[derive(Component, Reflect)]
#[reflect(Component)]
struct ScoreLabel;

/// Reset score when starting a new round.
fn reset_score(mut score: ResMut<GameScore>) {
    score.score = 0;
}

/// Spawn the score display in the top-left corner of the field.
fn spawn_score_ui(mut commands: Commands) {
    commands.spawn((
        Name::new("Score Display"),
        Text::new("Score: 0"),
        TextFont::from_font_size(28.0),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        ScoreLabel,
        DespawnOnExit(Screen::Gameplay),
    ));
}

/// Add the size of each popped cluster to the score.
fn update_score(mut score: ResMut<GameScore>, mut cluster_events: MessageReader<ClusterPopped>) {
    for event in cluster_events.read() {
        score.score += event.count as u32;
        info!("Popped {} bubbles, score is now {}", event.count, score.score);
    }
}

/// Keep the score display in sync.
fn update_score_label(score: Res<GameScore>, mut label: Single<&mut Text, With<ScoreLabel>>) {
    label.0 = format!("Score: {}", score.score);
}

/// End the round if a landing left a bubble in the bottom row.
///
/// Pausing the gameplay systems makes further pointer input inert; the round
/// can only be left through the game-over menu.
fn check_game_over(
    mut commands: Commands,
    grid: Res<BubbleGrid>,
    mut landed_events: MessageReader<BubbleLanded>,
    mut next_menu: ResMut<NextState<Menu>>,
    mut next_pause: ResMut<NextState<Pause>>,
    score: Res<GameScore>,
    game_assets: Res<GameAssets>,
) {
    let landed = landed_events.read().count() > 0;
    if !landed || !grid.bottom_row_reached() {
        return;
    }

    info!("GAME OVER! Final score: {}", score.score);

    commands.spawn(sound_effect(game_assets.game_over_sound.clone()));
    next_menu.set(Menu::GameOver);
    next_pause.set(Pause(true));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_starts_at_zero() {
        assert_eq!(GameScore::default().score, 0);
    }

    #[test]
    fn test_score_adds_cluster_size() {
        let mut score = GameScore::default();
        for count in [3u32, 5, 4] {
            score.score += count;
        }
        assert_eq!(score.score, 12);
    }
}
