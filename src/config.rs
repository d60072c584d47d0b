use std::io::ErrorKind;

use serde::{Deserialize, Serialize};

use crate::input::SWIPE_THRESHOLD;
use crate::score::Difficulty;

pub const SETTINGS_FILE: &str = "torus_snake.yaml";

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub swipe_threshold: i32,
    /// Gesture distance units per terminal column.
    pub units_per_column: i32,
    /// Gesture distance units per terminal row; rows are about twice as tall.
    pub units_per_row: i32,
    pub high_score_file: String,
    pub log_file: Option<String>,
    pub log_prefix: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            difficulty: Difficulty::default(),
            swipe_threshold: SWIPE_THRESHOLD,
            units_per_column: 8,
            units_per_row: 16,
            high_score_file: "torus_snake_scores.yaml".to_string(),
            log_file: None,
            log_prefix: None,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<(), String> {
        if self.swipe_threshold <= 0 {
            return Err("Swipe threshold must be positive".to_string());
        }
        if self.units_per_column <= 0 || self.units_per_row <= 0 {
            return Err("Gesture units per column and row must be positive".to_string());
        }
        if self.high_score_file.trim().is_empty() {
            return Err("High score file must not be empty".to_string());
        }
        Ok(())
    }
}

impl Settings {
    pub fn from_yaml(content: &str) -> Result<Settings, String> {
        let settings: Settings = serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Failed to deserialize settings: {}", e))?;
        settings
            .validate()
            .map_err(|e| format!("Settings validation error: {}", e))?;
        Ok(settings)
    }

    /// A missing file means defaults; any other problem is an error.
    pub fn load(file_path: &str) -> Result<Settings, String> {
        match std::fs::read_to_string(file_path) {
            Ok(content) if content.trim().is_empty() => Ok(Settings::default()),
            Ok(content) => Settings::from_yaml(&content),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Ok(Settings::default()),
                _ => Err(format!("Failed to read settings file: {}", err)),
            },
        }
    }
}
