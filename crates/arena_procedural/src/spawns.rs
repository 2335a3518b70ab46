//! # Spawn Planner
//!
//! Computes where entities appear at session start:
//!
//! - **Hunters**: fixed staggered points near the top-left corner. They do
//!   not look at terrain or obstacles; the layout is the same in every arena.
//! - **Monster**: a fixed inset from the bottom-right corner.
//! - **Wildlife**: a drawn number of uniform candidates. Candidates on Water
//!   or Rock are dropped (no retry). Survivors get a size class weighted by
//!   the terrain they stand on.

use arena_shared::{Vec2, HUNTER_SPAWN_COUNT};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::obstacles::{fits_margin, ObstacleField};
use crate::sampling::{chance, sample_between, Span};
use crate::terrain::{TerrainCell, TerrainGrid};

// ============================================================================
// WILDLIFE
// ============================================================================

/// Wildlife size class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WildlifeSize {
    /// Small critter.
    #[default]
    Small,
    /// Medium beast.
    Medium,
    /// Large beast, mostly found in caves.
    Large,
}

impl WildlifeSize {
    /// Returns the lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Parses a size class name. Unrecognized names are `Small`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "medium" => Self::Medium,
            "large" => Self::Large,
            _ => Self::Small,
        }
    }

    /// Rolls a size class for wildlife standing on `cell`.
    ///
    /// | Terrain | Roll succeeds | Roll fails |
    /// |---------|---------------|------------|
    /// | Forest  | Medium (50%)  | Small      |
    /// | Cave    | Large (30%)   | Medium     |
    /// | other   | Medium (20%)  | Small      |
    pub fn roll<R: Rng + ?Sized>(cell: TerrainCell, rng: &mut R) -> Self {
        match cell {
            TerrainCell::Forest => {
                if chance(rng, 0.5) {
                    Self::Medium
                } else {
                    Self::Small
                }
            }
            TerrainCell::Cave => {
                if chance(rng, 0.3) {
                    Self::Large
                } else {
                    Self::Medium
                }
            }
            _ => {
                if chance(rng, 0.2) {
                    Self::Medium
                } else {
                    Self::Small
                }
            }
        }
    }
}

/// A wildlife spawn point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WildlifeSpawn {
    /// World position.
    pub position: Vec2,
    /// Size class.
    pub size: WildlifeSize,
}

// ============================================================================
// SPAWN SET
// ============================================================================

/// Every spawn point of an arena.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnSet {
    /// Hunter spawns, in team order.
    pub hunter_spawns: Vec<Vec2>,
    /// Monster spawn.
    pub monster_spawn: Vec2,
    /// Wildlife spawns, in placement order.
    pub wildlife_spawns: Vec<WildlifeSpawn>,
}

impl SpawnSet {
    /// Number of wildlife spawns of one size class.
    #[must_use]
    pub fn wildlife_count(&self, size: WildlifeSize) -> usize {
        self.wildlife_spawns.iter().filter(|w| w.size == size).count()
    }
}

// ============================================================================
// PARAMETERS
// ============================================================================

/// Parameters for spawn planning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnParams {
    /// Number of hunter spawns.
    pub hunter_count: usize,
    /// First hunter spawn.
    pub hunter_origin: Vec2,
    /// Offset between consecutive hunter spawns.
    pub hunter_step: Vec2,
    /// Monster spawn distance from the bottom-right corner, per axis.
    pub monster_inset: f32,
    /// Number of wildlife candidates.
    pub wildlife_candidates: Span<usize>,
    /// Distance from the arena edge that wildlife candidates keep.
    pub wildlife_margin: f32,
    /// Also drop wildlife candidates that overlap an obstacle.
    pub reject_inside_obstacles: bool,
    /// Footprint radius used for the obstacle check.
    pub wildlife_radius: f32,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            hunter_count: HUNTER_SPAWN_COUNT,
            hunter_origin: Vec2::new(100.0, 100.0),
            hunter_step: Vec2::new(60.0, 40.0),
            monster_inset: 150.0,
            wildlife_candidates: Span::new(10, 20),
            wildlife_margin: 100.0,
            reject_inside_obstacles: false,
            wildlife_radius: 15.0,
        }
    }
}

// ============================================================================
// PLANNER
// ============================================================================

/// Plans spawns over a finished terrain grid and obstacle field.
#[derive(Clone, Debug, Default)]
pub struct SpawnPlanner {
    params: SpawnParams,
}

impl SpawnPlanner {
    /// Creates a planner with the given parameters.
    #[must_use]
    pub const fn new(params: SpawnParams) -> Self {
        Self { params }
    }

    /// Hunter spawn `index`: `origin + index * step`.
    #[must_use]
    pub fn hunter_spawn(&self, index: usize) -> Vec2 {
        self.params.hunter_origin + self.params.hunter_step * index as f32
    }

    /// Monster spawn: `(world_width - inset, world_height - inset)`.
    #[must_use]
    pub fn monster_spawn(&self, world_width: f32, world_height: f32) -> Vec2 {
        Vec2::new(
            world_width - self.params.monster_inset,
            world_height - self.params.monster_inset,
        )
    }

    /// Computes every spawn point.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        grid: &TerrainGrid,
        obstacles: &ObstacleField,
        world_width: f32,
        world_height: f32,
        rng: &mut R,
    ) -> SpawnSet {
        let hunter_spawns = (0..self.params.hunter_count)
            .map(|i| self.hunter_spawn(i))
            .collect();
        let monster_spawn = self.monster_spawn(world_width, world_height);

        let candidates = self.params.wildlife_candidates.sample(rng);
        if candidates > 0 && !fits_margin(world_width, world_height, self.params.wildlife_margin) {
            tracing::warn!(
                "Wildlife skipped: {}x{} arena too small for margin {}",
                world_width,
                world_height,
                self.params.wildlife_margin
            );
        }
        let wildlife_spawns: Vec<WildlifeSpawn> = (0..candidates)
            .filter_map(|_| self.try_place_wildlife(grid, obstacles, world_width, world_height, &mut *rng))
            .collect();

        tracing::debug!(
            "Spawns: {} hunters, {}/{} wildlife candidates kept",
            self.params.hunter_count,
            wildlife_spawns.len(),
            candidates
        );

        SpawnSet {
            hunter_spawns,
            monster_spawn,
            wildlife_spawns,
        }
    }

    /// One rejection-sampling attempt. No retry on failure.
    fn try_place_wildlife<R: Rng + ?Sized>(
        &self,
        grid: &TerrainGrid,
        obstacles: &ObstacleField,
        world_width: f32,
        world_height: f32,
        rng: &mut R,
    ) -> Option<WildlifeSpawn> {
        let margin = self.params.wildlife_margin;
        let x = sample_between(rng, margin, world_width - margin)?;
        let y = sample_between(rng, margin, world_height - margin)?;

        let cell = grid.tile_at(x, y);
        if !cell.is_walkable() {
            return None;
        }
        if self.params.reject_inside_obstacles
            && obstacles.collision_at(x, y, self.params.wildlife_radius).is_some()
        {
            return None;
        }

        Some(WildlifeSpawn {
            position: Vec2::new(x, y),
            size: WildlifeSize::roll(cell, rng),
        })
    }
}
