//! # Arena Shared
//!
//! Common types used by terrain generation, spatial queries and the viewport.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `rand`
//! - Any rendering or window-related crate
//!
//! Generation lives in `arena_procedural`; runtime services live in `arena`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{
    DEFAULT_ENTITY_RADIUS, DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH, HUNTER_SPAWN_COUNT,
    REFERENCE_TICK_RATE, TILE_SIZE,
};
pub use math::Vec2;
