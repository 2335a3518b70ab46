//! # Arena Procedural Generation
//!
//! Builds the static layout of one hunting-grounds arena.
//!
//! ## Design Principles
//!
//! 1. **Injected randomness**: Every generator takes `&mut impl Rng`; same
//!    seed, same arena
//! 2. **Ordered**: Terrain first, then obstacles validated against terrain,
//!    then spawns validated against both
//! 3. **Bounded**: Single-attempt rejection sampling, no retry loops
//! 4. **Total**: Degenerate sizes produce empty grids, never panics
//!
//! ## Core Components
//!
//! - `TerrainGenerator`: Region-stamped `TerrainGrid`
//! - `ObstacleField`: Rocks and trees, first-match collision
//! - `SpawnPlanner`: Hunter, monster and wildlife spawn points
//! - `WorldSeed`: Reproducible `ChaCha8Rng` streams
//!
//! ## Example
//!
//! ```rust
//! use arena_procedural::{ObstacleField, ObstacleParams, SpawnPlanner, TerrainGenerator, WorldSeed};
//!
//! let mut rng = WorldSeed::new(42).rng();
//! let grid = TerrainGenerator::default().generate(2000.0, 1500.0, &mut rng);
//! let obstacles = ObstacleField::generate(&grid, 2000.0, 1500.0, &ObstacleParams::default(), &mut rng);
//! let spawns = SpawnPlanner::default().plan(&grid, &obstacles, 2000.0, 1500.0, &mut rng);
//!
//! assert_eq!((grid.cols(), grid.rows()), (50, 38));
//! assert_eq!(spawns.hunter_spawns.len(), 4);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod obstacles;
pub mod sampling;
pub mod seed;
pub mod spawns;
pub mod terrain;

pub use obstacles::{Obstacle, ObstacleField, ObstacleKind, ObstacleParams};
pub use sampling::Span;
pub use seed::WorldSeed;
pub use spawns::{SpawnParams, SpawnPlanner, SpawnSet, WildlifeSize, WildlifeSpawn};
pub use terrain::{RegionParams, TerrainCell, TerrainGenerator, TerrainGrid, TerrainParams};
