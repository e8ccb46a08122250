//! Game polish/juice effects - floating score text on cluster pops.

use bevy::prelude::*;

use super::cluster::ClusterPopped;
use crate::{PausableSystems, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (spawn_pop_text, animate_pop_text)
            .in_set(PausableSystems)
            .run_if(in_state(Screen::Gameplay)),
    );
}

/// Component for floating score text.
#[derive(Component)]
struct PopText {
    /// Time elapsed.
    timer: f32,
    /// Total duration.
    duration: f32,
    /// Starting position.
    start_y: f32,
    /// Float distance.
    float_distance: f32,
    /// Base text color, taken from the popped cluster.
    color: Color,
}

/// Spawn floating "+k" text at the center of each popped cluster.
fn spawn_pop_text(mut commands: Commands, mut cluster_events: MessageReader<ClusterPopped>) {
    for event in cluster_events.read() {
        if event.coords.is_empty() {
            continue;
        }

        let sum: Vec2 = event
            .coords
            .iter()
            .map(|coord| coord.to_world())
            .fold(Vec2::ZERO, |acc, pos| acc + pos);
        let center_pos = sum / event.coords.len() as f32;
        let color = event.color.tint();

        commands.spawn((
            Name::new("Pop Text"),
            PopText {
                timer: 0.0,
                duration: 0.8,
                start_y: center_pos.y,
                float_distance: 50.0,
                color,
            },
            Text2d::new(format!("+{}", event.count)),
            TextFont {
                font_size: 32.0,
                ..default()
            },
            TextColor(color),
            Transform::from_translation(center_pos.extend(10.0)),
            DespawnOnExit(Screen::Gameplay),
        ));
    }
}

/// Float the text upward and fade it out.
fn animate_pop_text(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut PopText, &mut TextColor)>,
) {
    for (entity, mut transform, mut pop, mut color) in &mut query {
        pop.timer += time.delta_secs();
        let progress = (pop.timer / pop.duration).min(1.0);

        transform.translation.y = pop.start_y + pop.float_distance * progress;

        // Fade out in the last 30%.
        let alpha = if progress > 0.7 {
            1.0 - (progress - 0.7) / 0.3
        } else {
            1.0
        };
        color.0 = pop.color.with_alpha(alpha);

        if progress >= 1.0 {
            commands.entity(entity).despawn();
        }
    }
}
