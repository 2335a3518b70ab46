//! # Arena Map
//!
//! One session's arena: terrain, then obstacles checked against terrain, then
//! spawns checked against both. Built once, never mutated afterwards.

use arena_procedural::{ObstacleField, SpawnPlanner, SpawnSet, TerrainGenerator, TerrainGrid, WorldSeed};
use arena_shared::Vec2;
use rand::Rng;

use crate::config::ArenaConfig;
use crate::query::SpatialQuery;
use crate::viewport::{Viewport, ViewportConfig};

/// A generated arena.
#[derive(Clone, Debug, PartialEq)]
pub struct ArenaMap {
    width: f32,
    height: f32,
    seed: Option<WorldSeed>,
    terrain: TerrainGrid,
    obstacles: ObstacleField,
    spawns: SpawnSet,
}

impl ArenaMap {
    /// Builds an arena from `config`.
    ///
    /// Uses the configured seed, or draws a fresh one. Never fails: a
    /// dimension that is not positive becomes an empty axis.
    #[must_use]
    pub fn generate(config: &ArenaConfig) -> Self {
        let seed = config.seed.map_or_else(WorldSeed::random, WorldSeed::new);
        Self::generate_seeded(config, seed)
    }

    /// Builds an arena from `config` with an explicit seed.
    #[must_use]
    pub fn generate_seeded(config: &ArenaConfig, seed: WorldSeed) -> Self {
        let mut map = Self::build(config, &mut seed.rng());
        map.seed = Some(seed);
        map.log_summary();
        map
    }

    /// Builds an arena drawing from a caller-supplied RNG.
    ///
    /// The resulting map has no recorded seed.
    #[must_use]
    pub fn generate_with_rng<R: Rng + ?Sized>(config: &ArenaConfig, rng: &mut R) -> Self {
        let map = Self::build(config, rng);
        map.log_summary();
        map
    }

    /// Assembles a map from already-built parts.
    #[must_use]
    pub fn from_parts(
        width: f32,
        height: f32,
        terrain: TerrainGrid,
        obstacles: ObstacleField,
        spawns: SpawnSet,
    ) -> Self {
        Self {
            width,
            height,
            seed: None,
            terrain,
            obstacles,
            spawns,
        }
    }

    fn build<R: Rng + ?Sized>(config: &ArenaConfig, rng: &mut R) -> Self {
        let width = sanitize_dimension("world_width", config.world_width);
        let height = sanitize_dimension("world_height", config.world_height);

        let terrain = TerrainGenerator::new(config.terrain).generate(width, height, rng);
        let obstacles = ObstacleField::generate(&terrain, width, height, &config.obstacles, rng);
        let spawns = SpawnPlanner::new(config.spawns).plan(&terrain, &obstacles, width, height, rng);

        Self::from_parts(width, height, terrain, obstacles, spawns)
    }

    fn log_summary(&self) {
        let [ground, water, rock, forest, cave] = self.terrain.histogram();
        let seed = self
            .seed
            .map_or_else(|| "external rng".to_string(), |seed| seed.to_string());

        tracing::info!(
            "Arena {}x{} generated: {}x{} tiles (ground {}, water {}, rock {}, forest {}, cave {}), {} rocks, {} trees, {} wildlife, seed {}",
            self.width,
            self.height,
            self.terrain.cols(),
            self.terrain.rows(),
            ground,
            water,
            rock,
            forest,
            cave,
            self.obstacles.rocks().count(),
            self.obstacles.trees().count(),
            self.spawns.wildlife_spawns.len(),
            seed
        );
    }

    /// Arena width in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Arena height in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Seed the arena was built from, if known.
    #[must_use]
    pub const fn seed(&self) -> Option<WorldSeed> {
        self.seed
    }

    /// Terrain grid.
    #[must_use]
    pub const fn terrain(&self) -> &TerrainGrid {
        &self.terrain
    }

    /// Obstacles in insertion order.
    #[must_use]
    pub const fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    /// Spawn points.
    #[must_use]
    pub const fn spawns(&self) -> &SpawnSet {
        &self.spawns
    }

    /// Hunter spawn `index`, if there is one.
    #[must_use]
    pub fn hunter_spawn(&self, index: usize) -> Option<Vec2> {
        self.spawns.hunter_spawns.get(index).copied()
    }

    /// Spatial query view over this arena.
    #[must_use]
    pub const fn query(&self) -> SpatialQuery<'_> {
        SpatialQuery::new(&self.terrain, &self.obstacles, self.width, self.height)
    }

    /// A viewport bounded to this arena.
    #[must_use]
    pub fn viewport(&self, config: &ViewportConfig) -> Viewport {
        let mut viewport = Viewport::from_config(config);
        viewport.set_bounds(self.width, self.height);
        viewport
    }
}

fn sanitize_dimension(name: &str, value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        tracing::warn!("{} is {}, building an empty axis", name, value);
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_procedural::{ObstacleParams, SpawnParams, TerrainParams};

    #[test]
    fn test_reference_dimensions() {
        let map = ArenaMap::generate(&ArenaConfig::default());

        assert_eq!(map.terrain().cols(), 50);
        assert_eq!(map.terrain().rows(), 38);
        assert_eq!(map.hunter_spawn(1), Some(Vec2::new(160.0, 140.0)));
        assert_eq!(map.spawns().monster_spawn, Vec2::new(1850.0, 1350.0));
        assert!(map.seed().is_some());
    }

    #[test]
    fn test_seed_reproduces_map() {
        let config = ArenaConfig::default().seeded(1234);

        let a = ArenaMap::generate(&config);
        let b = ArenaMap::generate_seeded(&config, WorldSeed::new(1234));

        assert_eq!(a, b);
        assert_eq!(a.seed(), Some(WorldSeed::new(1234)));
    }

    #[test]
    fn test_external_rng_has_no_seed() {
        let mut rng = WorldSeed::new(5).rng();
        let map = ArenaMap::generate_with_rng(&ArenaConfig::default(), &mut rng);

        assert!(map.seed().is_none());
        assert_eq!(map.terrain, ArenaMap::generate_seeded(&ArenaConfig::default(), WorldSeed::new(5)).terrain);
    }

    #[test]
    fn test_degenerate_dimensions() {
        for (w, h) in [(0.0, 0.0), (-100.0, 500.0), (f32::NAN, f32::INFINITY)] {
            let map = ArenaMap::generate_seeded(&ArenaConfig::with_size(w, h), WorldSeed::new(9));

            assert!(map.terrain().is_empty());
            assert!(map.obstacles().is_empty());
            assert!(map.spawns().wildlife_spawns.is_empty());
            assert_eq!(map.spawns().hunter_spawns.len(), 4);
            assert_eq!(map.query().tile_at(10.0, 10.0), arena_procedural::TerrainCell::Rock);
        }
    }

    #[test]
    fn test_oversized_world_does_not_panic() {
        let map = ArenaMap::generate_seeded(&ArenaConfig::with_size(1e12, 1e12), WorldSeed::new(9));

        assert!(map.terrain().is_empty());
        assert!(map.obstacles().is_empty());
        assert!(map.spawns().wildlife_spawns.is_empty());
        assert_eq!(map.spawns().hunter_spawns.len(), 4);
        assert_eq!(map.query().tile_at(10.0, 10.0), arena_procedural::TerrainCell::Rock);
    }

    #[test]
    fn test_seed_is_logged_as_hex() {
        assert_eq!(WorldSeed::new(255).to_string(), "0x00000000000000ff");
        let map = ArenaMap::generate_seeded(&ArenaConfig::default(), WorldSeed::new(255));
        assert_eq!(map.seed().map(|seed| seed.to_string()).as_deref(), Some("0x00000000000000ff"));
    }

    #[test]
    fn test_from_parts_and_viewport() {
        let terrain = TerrainGrid::for_world(400.0, 400.0);
        let spawns = SpawnPlanner::new(SpawnParams::default()).plan(
            &terrain,
            &ObstacleField::default(),
            400.0,
            400.0,
            &mut WorldSeed::new(1).rng(),
        );
        let map = ArenaMap::from_parts(400.0, 400.0, terrain, ObstacleField::default(), spawns);

        let mut viewport = map.viewport(&ViewportConfig {
            width: 200.0,
            height: 100.0,
            smoothing: 1.0,
        });
        viewport.follow(Vec2::new(390.0, 390.0));
        viewport.update(1.0 / 60.0);

        assert_eq!(viewport.position(), Vec2::new(200.0, 300.0));
        assert_eq!(map.terrain().cols(), 10);
    }

    #[test]
    fn test_config_params_flow_through() {
        let config = ArenaConfig {
            terrain: TerrainParams::default(),
            obstacles: ObstacleParams {
                rock_attempts: arena_procedural::Span::new(0, 0),
                tree_chance: 0.0,
                ..ObstacleParams::default()
            },
            spawns: SpawnParams {
                hunter_count: 2,
                ..SpawnParams::default()
            },
            ..ArenaConfig::default()
        };
        let map = ArenaMap::generate_seeded(&config, WorldSeed::new(77));

        assert!(map.obstacles().is_empty());
        assert_eq!(map.spawns().hunter_spawns.len(), 2);
        assert_eq!(map.hunter_spawn(2), None);
    }
}
