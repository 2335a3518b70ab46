//! # Obstacle Field
//!
//! Static circular blockers layered over the terrain grid.
//!
//! - **Rocks**: a drawn number of placement attempts, each a uniform point
//!   inside the arena margin. An attempt is kept only if the tile under its
//!   center is Ground or Forest; rejected attempts are not retried, so the
//!   final count can undershoot.
//! - **Trees**: a sweep over every Forest cell; each one grows a tree with a
//!   fixed chance, jittered around the cell center.
//!
//! Insertion order is rocks first, then trees in row-major cell order.
//! Collision queries are first-match in that order, not nearest-match.

use arena_shared::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sampling::{chance, sample_between, Span};
use crate::terrain::{TerrainCell, TerrainGrid};

// ============================================================================
// OBSTACLE
// ============================================================================

/// Kind of static obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Boulder. Blocks ground movement.
    Rock,
    /// Tree. Decorative for movement, still reported by collision queries.
    Tree,
}

impl ObstacleKind {
    /// Returns the display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rock => "Rock",
            Self::Tree => "Tree",
        }
    }

    /// Returns the character used for overview maps.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Rock => '@',
            Self::Tree => 'T',
        }
    }

    /// Returns true if an obstacle of this kind may be centered on `cell`.
    #[must_use]
    pub const fn can_stand_on(self, cell: TerrainCell) -> bool {
        match self {
            Self::Rock => matches!(cell, TerrainCell::Ground | TerrainCell::Forest),
            Self::Tree => matches!(cell, TerrainCell::Forest),
        }
    }
}

/// A static obstacle with a circular footprint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Rock or tree.
    pub kind: ObstacleKind,
    /// Footprint center in world units.
    pub center: Vec2,
    /// Footprint radius in world units.
    pub radius: f32,
    /// Visual height (renderer only).
    pub height: f32,
    /// Visual RGB color (renderer only).
    pub color: [u8; 3],
}

impl Obstacle {
    /// Creates an obstacle with default visuals for its kind.
    #[must_use]
    pub fn new(kind: ObstacleKind, center: Vec2, radius: f32) -> Self {
        let (height, color) = match kind {
            ObstacleKind::Rock => (radius, [120, 120, 120]),
            ObstacleKind::Tree => (60.0, [40, 130, 45]),
        };
        Self {
            kind,
            center,
            radius,
            height,
            color,
        }
    }

    /// Returns true if a circle of `radius` at `point` overlaps this footprint.
    ///
    /// The test is strict: touching circles do not overlap.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, point: Vec2, radius: f32) -> bool {
        let reach = self.radius + radius;
        reach > 0.0 && self.center.distance_squared(point) < reach * reach
    }
}

// ============================================================================
// PARAMETERS
// ============================================================================

/// Parameters for obstacle placement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleParams {
    /// Number of rock placement attempts.
    pub rock_attempts: Span<usize>,
    /// Distance from the arena edge that rock centers keep.
    pub rock_margin: f32,
    /// Rock radius.
    pub rock_radius: Span<f32>,
    /// Rock height as a multiple of its radius.
    pub rock_height_ratio: Span<f32>,
    /// Chance that a Forest cell grows a tree.
    pub tree_chance: f64,
    /// Maximum offset of a tree from its cell center, per axis.
    pub tree_jitter: f32,
    /// Tree radius.
    pub tree_radius: Span<f32>,
    /// Tree height.
    pub tree_height: Span<f32>,
}

impl Default for ObstacleParams {
    fn default() -> Self {
        Self {
            rock_attempts: Span::new(15, 30),
            rock_margin: 50.0,
            rock_radius: Span::new(15.0, 40.0),
            rock_height_ratio: Span::new(0.5, 1.0),
            tree_chance: 0.3,
            tree_jitter: 10.0,
            tree_radius: Span::new(10.0, 20.0),
            tree_height: Span::new(40.0, 80.0),
        }
    }
}

// ============================================================================
// OBSTACLE FIELD
// ============================================================================

/// Immutable, insertion-ordered list of obstacles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    /// Creates a field with an explicit insertion order.
    #[must_use]
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    /// Places rocks and trees over `grid`.
    pub fn generate<R: Rng + ?Sized>(
        grid: &TerrainGrid,
        world_width: f32,
        world_height: f32,
        params: &ObstacleParams,
        rng: &mut R,
    ) -> Self {
        let mut obstacles = Vec::new();

        let attempts = params.rock_attempts.sample(rng);
        if attempts > 0 && !fits_margin(world_width, world_height, params.rock_margin) {
            tracing::warn!(
                "Rocks skipped: {}x{} arena too small for margin {}",
                world_width,
                world_height,
                params.rock_margin
            );
        }
        for _ in 0..attempts {
            if let Some(rock) = Self::try_place_rock(grid, world_width, world_height, params, rng) {
                obstacles.push(rock);
            }
        }
        let rocks = obstacles.len();

        for (col, row, cell) in grid.iter() {
            if cell != TerrainCell::Forest || !chance(rng, params.tree_chance) {
                continue;
            }
            obstacles.push(Self::grow_tree(grid.tile_center(col, row), params, rng));
        }

        tracing::debug!(
            "Obstacles: {}/{} rock attempts kept, {} trees",
            rocks,
            attempts,
            obstacles.len() - rocks
        );

        Self { obstacles }
    }

    /// One rejection-sampling attempt. No retry on failure.
    fn try_place_rock<R: Rng + ?Sized>(
        grid: &TerrainGrid,
        world_width: f32,
        world_height: f32,
        params: &ObstacleParams,
        rng: &mut R,
    ) -> Option<Obstacle> {
        let margin = params.rock_margin;
        let x = sample_between(rng, margin, world_width - margin)?;
        let y = sample_between(rng, margin, world_height - margin)?;
        let radius = params.rock_radius.sample(rng);

        if !ObstacleKind::Rock.can_stand_on(grid.tile_at(x, y)) {
            return None;
        }

        let shade: u8 = rng.gen_range(90..=150);
        Some(Obstacle {
            kind: ObstacleKind::Rock,
            center: Vec2::new(x, y),
            radius,
            height: radius * params.rock_height_ratio.sample(rng),
            color: [shade, shade, shade.saturating_add(8)],
        })
    }

    fn grow_tree<R: Rng + ?Sized>(cell_center: Vec2, params: &ObstacleParams, rng: &mut R) -> Obstacle {
        let jitter = Span::new(-params.tree_jitter, params.tree_jitter);
        let offset = Vec2::new(jitter.sample(rng), jitter.sample(rng));

        Obstacle {
            kind: ObstacleKind::Tree,
            center: cell_center + offset,
            radius: params.tree_radius.sample(rng),
            height: params.tree_height.sample(rng),
            color: [rng.gen_range(25..=60), rng.gen_range(100..=160), rng.gen_range(25..=60)],
        }
    }

    /// All obstacles in insertion order.
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Iterates all obstacles in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    /// Number of obstacles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Returns true if there are no obstacles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Iterates obstacles of one kind in insertion order.
    pub fn of_kind(&self, kind: ObstacleKind) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles.iter().filter(move |o| o.kind == kind)
    }

    /// Iterates rocks.
    pub fn rocks(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.of_kind(ObstacleKind::Rock)
    }

    /// Iterates trees.
    pub fn trees(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.of_kind(ObstacleKind::Tree)
    }

    /// First obstacle, in insertion order, that a circle of `radius` at
    /// `(x, y)` overlaps.
    #[must_use]
    pub fn collision_at(&self, x: f32, y: f32, radius: f32) -> Option<&Obstacle> {
        let point = Vec2::new(x, y);
        self.obstacles.iter().find(|o| o.overlaps(point, radius))
    }

    /// Like [`collision_at`](Self::collision_at), restricted to one kind.
    #[must_use]
    pub fn collision_at_kind(&self, kind: ObstacleKind, x: f32, y: f32, radius: f32) -> Option<&Obstacle> {
        let point = Vec2::new(x, y);
        self.of_kind(kind).find(|o| o.overlaps(point, radius))
    }
}

/// Returns true if `[margin, dimension - margin)` is non-empty on both axes.
pub(crate) fn fits_margin(world_width: f32, world_height: f32, margin: f32) -> bool {
    world_width - margin > margin && world_height - margin > margin
}

impl<'a> IntoIterator for &'a ObstacleField {
    type Item = &'a Obstacle;
    type IntoIter = std::slice::Iter<'a, Obstacle>;

    fn into_iter(self) -> Self::IntoIter {
        self.obstacles.iter()
    }
}
