//! Persisted player settings.
//!
//! Currently just the master volume. Saved to a local JSON file in the
//! user's data directory, loaded once at startup and written back whenever
//! the in-game volume changes.

use bevy::{audio::Volume, prelude::*};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub(crate) fn plugin(app: &mut App) {
    app.add_systems(Startup, load_settings);
    app.add_systems(
        Update,
        save_settings.run_if(resource_changed::<GlobalVolume>),
    );
}

/// Player-adjustable settings, stored on disk as JSON.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GameSettings {
    pub master_volume: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self { master_volume: 1.0 }
    }
}

impl GameSettings {
    /// Get the file path for storing settings.
    fn file_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("bubblepop").join("settings.json"))
    }

    /// Load settings from disk, falling back to defaults on any failure.
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            warn!("Could not determine data directory for settings");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk.
    pub fn save(&self) {
        let Some(path) = Self::file_path() else {
            warn!("Could not determine data directory for saving settings");
            return;
        };

        if let Some(parent) = path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warn!("Failed to create settings directory: {}", e);
            return;
        }

        match serde_json::to_string_pretty(self) {
            Ok(json) => match fs::write(&path, json) {
                Ok(()) => info!("Saved settings to {:?}", path),
                Err(e) => warn!("Failed to write settings: {}", e),
            },
            Err(e) => warn!("Failed to serialize settings: {}", e),
        }
    }
}

/// Load settings on startup and apply them to the global volume.
fn load_settings(mut commands: Commands, mut global_volume: ResMut<GlobalVolume>) {
    let settings = GameSettings::load();
    global_volume.volume = Volume::Linear(settings.master_volume);
    commands.insert_resource(settings);
}

/// Write the current volume back to disk when it changes.
fn save_settings(global_volume: Res<GlobalVolume>, mut settings: ResMut<GameSettings>) {
    let linear = global_volume.volume.to_linear();
    if (settings.master_volume - linear).abs() < f32::EPSILON {
        return;
    }
    settings.master_volume = linear;
    settings.save();
}
