//! # Configuration
//!
//! Tunables for the sandbox, loaded from a JSON file. Every field has a default equal
//! to the constants the game was designed around, so an empty object (or no file at
//! all) reproduces the stock behaviour.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine_state::voxels::block::block_type::BlockType;

/// Errors that can occur while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid JSON for `SandboxConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of the range the simulation can work with.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Constants driving the player controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Velocity added per step for each held movement key.
    pub move_speed: f32,
    /// Vertical velocity set when jumping from the ground.
    pub jump_impulse: f32,
    /// Vertical velocity removed every step.
    pub gravity: f32,
    /// Horizontal offset of the four collision samples.
    pub player_radius: f32,
    /// Height of the eye (and camera) above the resting surface.
    pub eye_height: f32,
    /// Factor applied to horizontal velocity every step.
    pub damping: f32,
    /// Highest cell the ground scan inspects.
    pub ground_scan_top: i32,
    /// Optional cap on downward speed. `None` keeps gravity unbounded.
    pub max_fall_speed: Option<f32>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.1,
            jump_impulse: 0.2,
            gravity: 0.01,
            player_radius: 0.3,
            eye_height: 1.8,
            damping: 0.8,
            ground_scan_top: 10,
            max_fall_speed: None,
        }
    }
}

/// Mouse-look settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Radians of rotation per unit of pointer movement.
    pub sensitivity: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self { sensitivity: 0.002 }
    }
}

/// Picking and block interaction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Maximum pick distance at which blocks can be placed or removed.
    pub reach: f32,
    /// How far the pick resolver searches along the ray.
    pub pick_horizon: f32,
    /// Page opened when the sign is clicked.
    pub info_url: String,
    /// Whether the clickable sign is part of the scene.
    pub show_sign: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            reach: 5.0,
            pick_horizon: 64.0,
            info_url: "./bloxd-site.html".to_string(),
            show_sign: true,
        }
    }
}

/// Terrain generation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainMethod {
    /// Each column gets a uniformly random height.
    Random,
    /// Column heights follow Perlin noise.
    Perlin,
    /// Every column has the maximum height.
    Flat,
    /// No terrain at all.
    Empty,
}

impl std::str::FromStr for TerrainMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(TerrainMethod::Random),
            "perlin" => Ok(TerrainMethod::Perlin),
            "flat" => Ok(TerrainMethod::Flat),
            "empty" => Ok(TerrainMethod::Empty),
            other => Err(ConfigError::Invalid(format!(
                "unknown terrain method `{other}` (expected random, perlin, flat or empty)"
            ))),
        }
    }
}

/// Terrain generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Generation strategy.
    pub method: TerrainMethod,
    /// Half extent of the generated square; columns span `[-size, size)` on X and Z.
    pub size: i32,
    /// Tallest column, in blocks.
    pub max_height: i32,
    /// Seed for the random and Perlin strategies.
    pub seed: u64,
    /// Scale applied to world coordinates before sampling Perlin noise.
    pub perlin_scale: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            method: TerrainMethod::Random,
            size: 20,
            max_height: 3,
            seed: 0x5EED,
            perlin_scale: 0.08,
        }
    }
}

/// Top-level sandbox configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Player controller constants.
    pub physics: PhysicsConfig,
    /// Mouse-look settings.
    pub look: LookConfig,
    /// Picking and interaction settings.
    pub interaction: InteractionConfig,
    /// Terrain generation settings.
    pub terrain: TerrainConfig,
    /// Initial eye position of the player.
    pub spawn: [f32; 3],
    /// Block type placed before the player picks another one.
    pub selected_block: BlockType,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            look: LookConfig::default(),
            interaction: InteractionConfig::default(),
            terrain: TerrainConfig::default(),
            spawn: [0.0, 10.0, 0.0],
            selected_block: BlockType::GRASS,
        }
    }
}

impl SandboxConfig {
    /// Loads, sanitizes and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses, sanitizes and validates a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str::<SandboxConfig>(raw)?.sanitized();
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamps recoverable out-of-range values into range.
    pub fn sanitized(mut self) -> Self {
        self.physics.damping = self.physics.damping.clamp(0.0, 1.0);
        self.terrain.size = self.terrain.size.max(0);
        self.terrain.max_height = self.terrain.max_height.max(1);
        self
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let physics = &self.physics;
        let non_negative = [
            ("physics.move_speed", physics.move_speed),
            ("physics.jump_impulse", physics.jump_impulse),
            ("physics.gravity", physics.gravity),
            ("physics.eye_height", physics.eye_height),
            ("physics.damping", physics.damping),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        if !physics.player_radius.is_finite() || !(0.0..1.0).contains(&physics.player_radius) {
            return Err(ConfigError::Invalid(format!(
                "physics.player_radius must be in [0, 1) (got {})",
                physics.player_radius
            )));
        }

        if let Some(cap) = physics.max_fall_speed {
            if !cap.is_finite() || cap <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "physics.max_fall_speed must be positive (got {cap})"
                )));
            }
        }

        if !self.look.sensitivity.is_finite() {
            return Err(ConfigError::Invalid("look.sensitivity must be finite".into()));
        }

        let interaction = &self.interaction;
        if !interaction.reach.is_finite() || interaction.reach <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "interaction.reach must be positive (got {})",
                interaction.reach
            )));
        }
        if !interaction.pick_horizon.is_finite() || interaction.pick_horizon < interaction.reach {
            return Err(ConfigError::Invalid(format!(
                "interaction.pick_horizon must be at least the reach (got {})",
                interaction.pick_horizon
            )));
        }

        if !self.terrain.perlin_scale.is_finite() || self.terrain.perlin_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "terrain.perlin_scale must be positive (got {})",
                self.terrain.perlin_scale
            )));
        }

        if self.spawn.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid("spawn must be finite".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = SandboxConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SandboxConfig::default());
        assert_eq!(config.physics.gravity, 0.01);
        assert_eq!(config.interaction.reach, 5.0);
        assert_eq!(config.spawn, [0.0, 10.0, 0.0]);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = SandboxConfig::from_json_str(
            r#"{ "physics": { "gravity": 0.02, "max_fall_speed": 0.9 },
                 "terrain": { "method": "perlin" },
                 "selected_block": "stone" }"#,
        )
        .unwrap();
        assert_eq!(config.physics.gravity, 0.02);
        assert_eq!(config.physics.max_fall_speed, Some(0.9));
        assert_eq!(config.physics.jump_impulse, 0.2);
        assert_eq!(config.terrain.method, TerrainMethod::Perlin);
        assert_eq!(config.terrain.size, 20);
        assert_eq!(config.selected_block, BlockType::STONE);
    }

    #[test]
    fn test_json_round_trip() {
        let config = SandboxConfig::default();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(SandboxConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_sanitize_clamps_damping_and_size() {
        let config =
            SandboxConfig::from_json_str(r#"{ "physics": { "damping": 1.5 }, "terrain": { "size": -4 } }"#)
                .unwrap();
        assert_eq!(config.physics.damping, 1.0);
        assert_eq!(config.terrain.size, 0);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = SandboxConfig::from_json_str(r#"{ "interaction": { "reach": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err =
            SandboxConfig::from_json_str(r#"{ "physics": { "player_radius": 2.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err =
            SandboxConfig::from_json_str(r#"{ "physics": { "max_fall_speed": -1 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_errors_are_reported() {
        let err = SandboxConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("voxel-sandbox-config-that-does-not-exist.json");
        let err = SandboxConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "voxel-sandbox-config-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "look": { "sensitivity": 0.004 } }"#).unwrap();
        let config = SandboxConfig::load(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.look.sensitivity, 0.004);
    }

    #[test]
    fn test_terrain_method_from_str() {
        assert_eq!("Perlin".parse::<TerrainMethod>().unwrap(), TerrainMethod::Perlin);
        assert!("mountains".parse::<TerrainMethod>().is_err());
    }
}
