//! Player preferences
//!
//! Persisted separately from the high score table. The single volume scalar
//! covers the music loop and every sound cue.

use serde::{Deserialize, Serialize};

use crate::persistence;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Settings {
    /// Shared volume for music and cues (0.0 - 1.0)
    pub volume: f32,
    /// Background music on/off
    pub music: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 0.5,
            music: true,
        }
    }
}

impl Settings {
    const FILE_NAME: &'static str = "breakwall.settings.json";

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        match persistence::load_json(&persistence::data_path(Self::FILE_NAME)) {
            Some(settings) => settings,
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write-through on every change
    pub fn save(&self) {
        persistence::save_json(&persistence::data_path(Self::FILE_NAME), self);
    }
}
