use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scene: SceneTuning,
    #[serde(default)]
    pub key_bindings: KeyBindings,
}

/// Sizes and speeds of the scene. Distances are in canvas units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTuning {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub door_speed: f64,
    pub actor_speeds: [f64; 2],
    /// Sensor half-width as a multiple of the door width.
    pub sensor_factor: f64,
    /// How far past the right canvas edge the outside resting point lies.
    pub offscreen_margin: f64,
    pub frame_ms: u64,
}

impl Default for SceneTuning {
    fn default() -> Self {
        SceneTuning {
            canvas_width: 900.0,
            canvas_height: 300.0,
            door_speed: 1.0,
            actor_speeds: [1.5, 2.0],
            sensor_factor: 1.0,
            offscreen_margin: 50.0,
            frame_ms: 33,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("canvas must have a positive size, got {width}x{height}")]
    Canvas { width: f64, height: f64 },
    #[error("{what} speed must be positive, got {value}")]
    Speed { what: &'static str, value: f64 },
    #[error("sensor factor {0} is below 0.5, figures could never rest inside the sensor band")]
    SensorTooNarrow(f64),
    #[error("offscreen margin must not be negative, got {0}")]
    Margin(f64),
    #[error("frame duration must be at least 1 ms")]
    FrameDuration,
}

impl SceneTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(ConfigError::Canvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if !(self.door_speed > 0.0) {
            return Err(ConfigError::Speed {
                what: "door",
                value: self.door_speed,
            });
        }
        if let Some(&value) = self.actor_speeds.iter().find(|s| !(**s > 0.0)) {
            return Err(ConfigError::Speed {
                what: "figure",
                value,
            });
        }
        // The inside resting point is half a door width left of center.
        if !(self.sensor_factor >= 0.5) {
            return Err(ConfigError::SensorTooNarrow(self.sensor_factor));
        }
        if !(self.offscreen_margin >= 0.0) {
            return Err(ConfigError::Margin(self.offscreen_margin));
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::FrameDuration);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub quit: String,
    pub toggle: String,
    pub time_control: String,
    pub system_time: String,
    pub apply: String,
    pub cancel: String,
    pub fullscreen: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            quit: "q".into(),
            toggle: "Space".into(),
            time_control: "t".into(),
            system_time: "s".into(),
            apply: "Enter".into(),
            cancel: "Esc".into(),
            fullscreen: "F11".into(),
        }
    }
}

impl AppConfig {
    /// Load the user config, falling back to defaults when it is missing or invalid.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("invalid config {} ({e:#}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Load and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.scene.validate()?;
        Ok(config)
    }

    fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("barn-door");
        path.push("config.json");
        path
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        if !event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        return rest
            .chars()
            .next()
            .is_some_and(|c| event.code == KeyCode::Char(c));
    }

    // Plain bindings never fire with Ctrl or Alt held.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        || event.modifiers.contains(KeyModifiers::ALT)
    {
        return false;
    }

    match binding {
        "Right" => event.code == KeyCode::Right,
        "Left" => event.code == KeyCode::Left,
        "Up" => event.code == KeyCode::Up,
        "Down" => event.code == KeyCode::Down,
        "Enter" => event.code == KeyCode::Enter,
        "Esc" => event.code == KeyCode::Esc,
        "Space" => event.code == KeyCode::Char(' '),
        "Tab" => event.code == KeyCode::Tab,
        s => {
            if let Some(rest) = s.strip_prefix('F') {
                if let Ok(n) = rest.parse::<u8>() {
                    return event.code == KeyCode::F(n);
                }
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    event.code == KeyCode::Char(c)
                        || event.code == KeyCode::Char(c.to_ascii_uppercase())
                }
                _ => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SceneTuning::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = AppConfig::from_json(r#"{"scene":{"door_speed":2.5}}"#).unwrap();
        assert_eq!(config.scene.door_speed, 2.5);
        assert_eq!(config.scene.actor_speeds, [1.5, 2.0]);
        assert_eq!(config.key_bindings.toggle, "Space");
    }

    #[test]
    fn rejects_bad_tuning() {
        let err = AppConfig::from_json(r#"{"scene":{"actor_speeds":[1.0,0.0]}}"#).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::Speed {
                what: "figure",
                value: 0.0
            })
        );

        let narrow = SceneTuning {
            sensor_factor: 0.25,
            ..SceneTuning::default()
        };
        assert_eq!(narrow.validate(), Err(ConfigError::SensorTooNarrow(0.25)));

        let flat = SceneTuning {
            canvas_height: 0.0,
            ..SceneTuning::default()
        };
        assert!(matches!(flat.validate(), Err(ConfigError::Canvas { .. })));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(AppConfig::from_json("{scene").is_err());
    }

    #[test]
    fn binding_matching() {
        assert!(matches_binding("Space", &key(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(matches_binding("t", &key(KeyCode::Char('T'), KeyModifiers::SHIFT)));
        assert!(!matches_binding("t", &key(KeyCode::Char('t'), KeyModifiers::ALT)));
        assert!(matches_binding("Ctrl-c", &key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!matches_binding("Ctrl-c", &key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(matches_binding("F11", &key(KeyCode::F(11), KeyModifiers::NONE)));
        assert!(!matches_binding("Esc", &key(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
