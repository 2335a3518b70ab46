//! # Hunting Grounds Arena
//!
//! One session's arena: built once from an `ArenaConfig`, then queried every
//! tick by movement, gameplay and camera code.
//!
//! ## Architecture
//!
//! ```text
//! ArenaConfig (TOML)
//!       │
//!       ▼
//! ArenaMap::generate ── TerrainGrid ──► ObstacleField ──► SpawnSet
//!       │
//!       ├──► SpatialQuery   tile lookup, passability, collision, clamping
//!       └──► Viewport       smoothed camera per client
//! ```
//!
//! ## Modules
//!
//! - `config`: TOML configuration and validation
//! - `error`: Errors at the configuration boundary
//! - `map`: One-shot arena construction
//! - `query`: Per-tick spatial queries
//! - `viewport`: Frame-rate independent camera smoothing
//!
//! ## Example
//!
//! ```rust
//! use arena::{ArenaConfig, ArenaMap, Mover};
//!
//! let config = ArenaConfig::default().seeded(7);
//! let map = ArenaMap::generate(&config);
//! let query = map.query();
//!
//! assert_eq!(query.tile_at(-10.0, 0.0), arena::TerrainCell::Rock);
//! let p = query.constrain_to_bounds(5000.0, -5.0, 15.0);
//! assert_eq!((p.x, p.y), (1985.0, 15.0));
//! let _ = query.is_passable(400.0, 300.0, &Mover::default());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod map;
pub mod query;
pub mod viewport;

pub use config::ArenaConfig;
pub use error::{ArenaError, ArenaResult};
pub use map::ArenaMap;
pub use query::{Mover, SpatialQuery};
pub use viewport::{Viewport, ViewportConfig};

pub use arena_procedural::{
    Obstacle, ObstacleField, ObstacleKind, SpawnSet, TerrainCell, TerrainGrid, WildlifeSize, WildlifeSpawn,
    WorldSeed,
};
pub use arena_shared::Vec2;
