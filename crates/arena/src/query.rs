//! # Spatial Queries
//!
//! Read-only lookups over a generated arena, called every tick by movement
//! and gameplay code. Nothing here fails or logs: invalid input degrades to
//! a blocked result (out-of-grid tiles read as Rock, NaN clamps to the lower
//! bound).

use arena_procedural::{Obstacle, ObstacleField, ObstacleKind, TerrainCell, TerrainGrid};
use arena_shared::{Vec2, DEFAULT_ENTITY_RADIUS};

/// Deltas smaller than this on an axis are not applied.
const MOVE_EPSILON: f32 = 0.0001;

// ============================================================================
// MOVER
// ============================================================================

/// Movement capabilities of whatever is asking.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Mover {
    /// Collision radius. `None` uses `DEFAULT_ENTITY_RADIUS`.
    pub radius: Option<f32>,
    /// Flyers cross water.
    pub can_fly: bool,
}

impl Mover {
    /// A ground entity of the given radius.
    #[must_use]
    pub const fn walker(radius: f32) -> Self {
        Self {
            radius: Some(radius),
            can_fly: false,
        }
    }

    /// A flying entity of the given radius.
    #[must_use]
    pub const fn flyer(radius: f32) -> Self {
        Self {
            radius: Some(radius),
            can_fly: true,
        }
    }

    /// Radius used for collision tests.
    #[must_use]
    pub fn effective_radius(&self) -> f32 {
        self.radius
            .filter(|r| r.is_finite())
            .unwrap_or(DEFAULT_ENTITY_RADIUS)
    }
}

// ============================================================================
// SPATIAL QUERY
// ============================================================================

/// Borrowed view over one arena's terrain and obstacles.
#[derive(Clone, Copy, Debug)]
pub struct SpatialQuery<'a> {
    terrain: &'a TerrainGrid,
    obstacles: &'a ObstacleField,
    width: f32,
    height: f32,
}

impl<'a> SpatialQuery<'a> {
    /// Creates a query view over an arena of `width x height` world units.
    #[must_use]
    pub const fn new(terrain: &'a TerrainGrid, obstacles: &'a ObstacleField, width: f32, height: f32) -> Self {
        Self {
            terrain,
            obstacles,
            width,
            height,
        }
    }

    /// Terrain under a world point. Rock outside the grid.
    #[inline]
    #[must_use]
    pub fn tile_at(&self, x: f32, y: f32) -> TerrainCell {
        self.terrain.tile_at(x, y)
    }

    /// Returns true if `mover` may stand at `(x, y)`.
    ///
    /// Water only admits flyers, regardless of obstacles. Elsewhere any rock
    /// overlap blocks, then Rock terrain blocks.
    #[must_use]
    pub fn is_passable(&self, x: f32, y: f32, mover: &Mover) -> bool {
        let tile = self.tile_at(x, y);
        if tile == TerrainCell::Water {
            return mover.can_fly;
        }
        if self
            .obstacles
            .collision_at_kind(ObstacleKind::Rock, x, y, mover.effective_radius())
            .is_some()
        {
            return false;
        }
        tile != TerrainCell::Rock
    }

    /// First obstacle, rocks before trees, overlapping a circle at `(x, y)`.
    #[must_use]
    pub fn collision_at(&self, x: f32, y: f32, radius: f32) -> Option<&'a Obstacle> {
        self.obstacles.collision_at(x, y, radius)
    }

    /// First obstacle of `kind` overlapping a circle at `(x, y)`.
    #[must_use]
    pub fn collision_at_kind(&self, kind: ObstacleKind, x: f32, y: f32, radius: f32) -> Option<&'a Obstacle> {
        self.obstacles.collision_at_kind(kind, x, y, radius)
    }

    /// Clamps a circle center into `[radius, dimension - radius]` per axis.
    ///
    /// An axis narrower than the circle yields its midpoint.
    #[must_use]
    pub fn constrain_to_bounds(&self, x: f32, y: f32, radius: f32) -> Vec2 {
        let radius = if radius.is_finite() { radius } else { 0.0 };
        Vec2::new(
            clamp_axis(x, radius, self.width - radius),
            clamp_axis(y, radius, self.height - radius),
        )
    }

    /// Applies `delta` to `position`, one axis at a time.
    ///
    /// Each axis is committed only if the resulting point is passable, so a
    /// blocked mover slides along the blocker. The result is kept in bounds.
    #[must_use]
    pub fn resolve_move(&self, position: Vec2, delta: Vec2, mover: &Mover) -> Vec2 {
        let mut next = position;

        // X axis
        if delta.x.abs() > MOVE_EPSILON && self.is_passable(next.x + delta.x, next.y, mover) {
            next.x += delta.x;
        }

        // Y axis
        if delta.y.abs() > MOVE_EPSILON && self.is_passable(next.x, next.y + delta.y, mover) {
            next.y += delta.y;
        }

        self.constrain_to_bounds(next.x, next.y, mover.effective_radius())
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
}

fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        return (lo + hi) * 0.5;
    }
    // `max` first so NaN lands on `lo`
    value.max(lo).min(hi)
}
