//! A splash screen that plays briefly at startup.

use bevy::{
    image::{ImageLoaderSettings, ImageSampler},
    input::common_conditions::input_just_pressed,
    prelude::*,
};

use crate::{AppSystems, screens::Screen, theme::widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::Splash), spawn_splash_screen);

    app.register_type::<SplashTimer>();
    app.add_systems(
        Update,
        (
            tick_splash_timer.in_set(AppSystems::TickTimers),
            enter_title_screen
                .run_if(splash_timer_finished)
                .in_set(AppSystems::Update),
        )
            .run_if(in_state(Screen::Splash)),
    );

    // Allow skipping the splash screen.
    app.add_systems(
        Update,
        enter_title_screen.run_if(
            in_state(Screen::Splash).and(
                input_just_pressed(MouseButton::Left).or(input_just_pressed(KeyCode::Escape)),
            ),
        ),
    );
}

const SPLASH_DURATION_SECS: f32 = 1.8;
const SPLASH_BACKGROUND_COLOR: Color = Color::srgb(0.157, 0.157, 0.157);

fn spawn_splash_screen(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        widget::ui_root("Splash Screen"),
        BackgroundColor(SPLASH_BACKGROUND_COLOR),
        DespawnOnExit(Screen::Splash),
        children![(
            Name::new("Splash image"),
            Node {
                margin: UiRect::all(Val::Auto),
                width: Val::Percent(70.0),
                ..default()
            },
            ImageNode::new(asset_server.load_with_settings(
                // This should be an embedded asset for instant loading, but that is
                // currently not possible under Bevy's default compression setup.
                "images/splash.png",
                |settings: &mut ImageLoaderSettings| {
                    // Make an exception for the splash image in case
                    // `ImagePlugin::default_nearest()` is used for pixel art.
                    settings.sampler = ImageSampler::linear();
                },
            )),
        )],
    ));

    commands.insert_resource(SplashTimer::default());
}

#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource)]
struct SplashTimer(Timer);

impl Default for SplashTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(SPLASH_DURATION_SECS, TimerMode::Once))
    }
}

fn tick_splash_timer(time: Res<Time>, mut timer: ResMut<SplashTimer>) {
    timer.0.tick(time.delta());
}

fn splash_timer_finished(timer: Res<SplashTimer>) -> bool {
    timer.0.just_finished()
}

fn enter_title_screen(mut next_screen: ResMut<NextState<Screen>>) {
    next_screen.set(Screen::Title);
}
