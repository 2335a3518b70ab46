//! # Arena Configuration
//!
//! Everything that shapes an arena, loaded once at session start from TOML.
//! Every field has a default, so a config file only lists what it changes:
//!
//! ```toml
//! world_width = 2400.0
//! seed = 42
//!
//! [obstacles]
//! tree_chance = 0.4
//! ```
//!
//! Validation is a config-time check. `ArenaMap` construction never fails,
//! even for a config that skipped validation.

use std::path::Path;

use arena_procedural::{ObstacleParams, RegionParams, Span, SpawnParams, TerrainParams};
use arena_shared::{DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH, TILE_SIZE};
use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, ArenaResult};
use crate::viewport::ViewportConfig;

/// Full arena configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Arena width in world units.
    pub world_width: f32,
    /// Arena height in world units.
    pub world_height: f32,
    /// Generation seed. A fresh one is drawn when absent.
    pub seed: Option<u64>,
    /// Terrain passes.
    pub terrain: TerrainParams,
    /// Rock and tree placement.
    pub obstacles: ObstacleParams,
    /// Spawn planning.
    pub spawns: SpawnParams,
    /// Client viewport.
    pub viewport: ViewportConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            seed: None,
            terrain: TerrainParams::default(),
            obstacles: ObstacleParams::default(),
            spawns: SpawnParams::default(),
            viewport: ViewportConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// Default config for the given arena size.
    #[must_use]
    pub fn with_size(world_width: f32, world_height: f32) -> Self {
        Self {
            world_width,
            world_height,
            ..Self::default()
        }
    }

    /// Returns a copy with a fixed seed.
    #[must_use]
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses and validates a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `ArenaError::Parse` for malformed TOML and
    /// `ArenaError::InvalidConfig` for out-of-range values.
    pub fn from_toml_str(source: &str) -> ArenaResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ArenaError::Io` if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> ArenaResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ArenaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!("Loaded arena config from {}", path.display());
        Ok(config)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns `ArenaError::Serialize` if a value has no TOML representation.
    pub fn to_toml_string(&self) -> ArenaResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `ArenaError::InvalidConfig` naming the first bad field.
    pub fn validate(&self) -> ArenaResult<()> {
        check_dimension("world_width", self.world_width)?;
        check_dimension("world_height", self.world_height)?;

        check_region("terrain.water", &self.terrain.water)?;
        check_region("terrain.forest", &self.terrain.forest)?;
        check_region("terrain.cave", &self.terrain.cave)?;

        let o = &self.obstacles;
        check_span_usize("obstacles.rock_attempts", o.rock_attempts)?;
        check_non_negative("obstacles.rock_margin", o.rock_margin)?;
        check_span_f32("obstacles.rock_radius", o.rock_radius)?;
        check_span_f32("obstacles.rock_height_ratio", o.rock_height_ratio)?;
        check_probability("obstacles.tree_chance", o.tree_chance)?;
        check_non_negative("obstacles.tree_jitter", o.tree_jitter)?;
        if o.tree_jitter >= TILE_SIZE / 2.0 {
            return Err(ArenaError::InvalidConfig(format!(
                "obstacles.tree_jitter must be below half a tile ({}), got {}",
                TILE_SIZE / 2.0,
                o.tree_jitter
            )));
        }
        check_span_f32("obstacles.tree_radius", o.tree_radius)?;
        check_span_f32("obstacles.tree_height", o.tree_height)?;

        let s = &self.spawns;
        check_finite("spawns.hunter_origin.x", s.hunter_origin.x)?;
        check_finite("spawns.hunter_origin.y", s.hunter_origin.y)?;
        check_finite("spawns.hunter_step.x", s.hunter_step.x)?;
        check_finite("spawns.hunter_step.y", s.hunter_step.y)?;
        check_finite("spawns.monster_inset", s.monster_inset)?;
        check_span_usize("spawns.wildlife_candidates", s.wildlife_candidates)?;
        check_non_negative("spawns.wildlife_margin", s.wildlife_margin)?;
        check_non_negative("spawns.wildlife_radius", s.wildlife_radius)?;

        self.viewport.validate()
    }
}

fn invalid(field: &str, reason: impl std::fmt::Display) -> ArenaError {
    ArenaError::InvalidConfig(format!("{field} {reason}"))
}

fn check_finite(field: &str, value: f32) -> ArenaResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format_args!("must be finite, got {value}")))
    }
}

fn check_dimension(field: &str, value: f32) -> ArenaResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format_args!("must be positive, got {value}")))
    }
}

fn check_non_negative(field: &str, value: f32) -> ArenaResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format_args!("must be non-negative, got {value}")))
    }
}

fn check_probability(field: &str, value: f64) -> ArenaResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format_args!("must be within [0, 1], got {value}")))
    }
}

fn check_span_usize(field: &str, span: Span<usize>) -> ArenaResult<()> {
    if span.is_inverted() {
        Err(invalid(field, format_args!("has min {} > max {}", span.min, span.max)))
    } else {
        Ok(())
    }
}

fn check_span_f32(field: &str, span: Span<f32>) -> ArenaResult<()> {
    check_non_negative(field, span.min)?;
    check_non_negative(field, span.max)?;
    if span.is_inverted() {
        Err(invalid(field, format_args!("has min {} > max {}", span.min, span.max)))
    } else {
        Ok(())
    }
}

fn check_region(field: &str, region: &RegionParams) -> ArenaResult<()> {
    check_span_usize(&format!("{field}.count"), region.count)?;
    check_span_usize(&format!("{field}.radius"), region.radius)?;
    check_probability(&format!("{field}.fill_chance"), region.fill_chance)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../../../data/arena.toml");

    #[test]
    fn test_defaults_are_valid() {
        assert!(ArenaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ArenaConfig::from_toml_str("").unwrap();
        assert_eq!(config, ArenaConfig::default());
    }

    #[test]
    fn test_sample_file_parses() {
        let config = ArenaConfig::from_toml_str(SAMPLE).unwrap();

        assert!((config.world_width - 2000.0).abs() < f32::EPSILON);
        assert!((config.world_height - 1500.0).abs() < f32::EPSILON);
        assert_eq!(config.terrain, TerrainParams::default());
        assert_eq!(config.obstacles, ObstacleParams::default());
        assert_eq!(config.spawns, SpawnParams::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ArenaConfig::from_toml_str(
            r#"
            world_width = 2400.0
            seed = 42

            [obstacles]
            tree_chance = 0.4
            rock_attempts = { min = 5, max = 10 }
            "#,
        )
        .unwrap();

        assert!((config.world_width - 2400.0).abs() < f32::EPSILON);
        assert_eq!(config.seed, Some(42));
        assert!((config.obstacles.tree_chance - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.obstacles.rock_attempts, Span::new(5, 10));
        assert!((config.obstacles.rock_margin - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = ArenaConfig::default().seeded(7);
        let text = config.to_toml_string().unwrap();

        assert_eq!(ArenaConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            "world_width = -5.0",
            "world_height = 0.0",
            "[obstacles]\ntree_chance = 1.5",
            "[obstacles]\ntree_jitter = 25.0",
            "[obstacles]\nrock_radius = { min = 40.0, max = 15.0 }",
            "[spawns]\nwildlife_candidates = { min = 20, max = 10 }",
            "[terrain.forest]\ncount = { min = 3, max = 6 }\nmargin = 3\nradius = { min = 4, max = 8 }\nfill_chance = -0.1",
            "[viewport]\nsmoothing = 0.0",
        ];

        for case in cases {
            let result = ArenaConfig::from_toml_str(case);
            assert!(
                matches!(result, Err(ArenaError::InvalidConfig(_))),
                "accepted: {case:?} -> {result:?}"
            );
        }
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = ArenaConfig::from_toml_str("world_width = \"wide\"");
        assert!(matches!(result, Err(ArenaError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ArenaConfig::load("/definitely/not/here/arena.toml");
        assert!(matches!(result, Err(ArenaError::Io { .. })));
    }
}
