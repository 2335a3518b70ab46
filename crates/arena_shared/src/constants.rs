//! # Arena Constants
//!
//! Fixed values shared by every arena. Tunable generation parameters live in
//! the `*Params` structs of `arena_procedural`; these are the ones that are
//! part of the layout contract.

// =============================================================================
// GRID
// =============================================================================

/// Edge length of one terrain tile in world units.
pub const TILE_SIZE: f32 = 40.0;

// =============================================================================
// ENTITIES
// =============================================================================

/// Radius assumed for a moving entity that does not declare one.
pub const DEFAULT_ENTITY_RADIUS: f32 = 15.0;

/// Number of fixed hunter spawn points.
pub const HUNTER_SPAWN_COUNT: usize = 4;

// =============================================================================
// ARENA DEFAULTS
// =============================================================================

/// Default arena width in world units.
pub const DEFAULT_WORLD_WIDTH: f32 = 2000.0;

/// Default arena height in world units.
pub const DEFAULT_WORLD_HEIGHT: f32 = 1500.0;

/// Tick rate (updates per second) that per-frame smoothing factors are tuned for.
pub const REFERENCE_TICK_RATE: f32 = 60.0;
