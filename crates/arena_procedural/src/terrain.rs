//! # Terrain Grid
//!
//! The arena floor is a fixed grid of `TILE_SIZE` cells, each holding one
//! `TerrainCell`. Generation starts from all-Ground and stamps filled circles
//! in three ordered passes:
//!
//! 1. **Water** - overwrites anything it covers
//! 2. **Forest** - only claims Ground, each covered cell passes a fill roll,
//!    which leaves a ragged edge
//! 3. **Cave** - only claims Ground, full circle
//!
//! Containment uses squared distances, no square roots. Cells falling outside
//! the grid during a stamp are skipped.
//!
//! The grid is immutable once generated.

use arena_shared::{Vec2, TILE_SIZE};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sampling::{chance, sample_index, Span};

// ============================================================================
// TERRAIN CELL
// ============================================================================

/// Terrain type of one grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TerrainCell {
    /// Open ground.
    #[default]
    Ground = 0,
    /// Water, only fliers can cross.
    Water = 1,
    /// Impassable rock. Also the sentinel for lookups outside the grid.
    Rock = 2,
    /// Forest floor, trees grow here.
    Forest = 3,
    /// Cave floor, home of large wildlife.
    Cave = 4,
}

impl TerrainCell {
    /// All terrain types, in discriminant order.
    pub const ALL: [Self; 5] = [Self::Ground, Self::Water, Self::Rock, Self::Forest, Self::Cave];

    /// Returns true if a non-flying entity can stand on this terrain.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Water | Self::Rock)
    }

    /// Returns the character used for overview maps.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Ground => '.',
            Self::Water => '~',
            Self::Rock => '#',
            Self::Forest => '"',
            Self::Cave => 'o',
        }
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ground => "Ground",
            Self::Water => "Water",
            Self::Rock => "Rock",
            Self::Forest => "Forest",
            Self::Cave => "Cave",
        }
    }
}

// ============================================================================
// TERRAIN GRID
// ============================================================================

/// Row-major grid of terrain cells covering the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainGrid {
    cols: usize,
    rows: usize,
    tile_size: f32,
    cells: Vec<TerrainCell>,
}

impl TerrainGrid {
    /// Creates a grid of `cols x rows` Ground cells.
    ///
    /// A grid too large to allocate comes back empty (`0 x 0`).
    #[must_use]
    pub fn new(cols: usize, rows: usize, tile_size: f32) -> Self {
        let Some(len) = cell_count(cols, rows) else {
            tracing::warn!("{}x{} grid is too large, building an empty grid", cols, rows);
            return Self {
                cols: 0,
                rows: 0,
                tile_size,
                cells: Vec::new(),
            };
        };
        Self {
            cols,
            rows,
            tile_size,
            cells: vec![TerrainCell::Ground; len],
        }
    }

    /// Creates a grid from row-major cells.
    ///
    /// Returns `None` if `cells.len() != cols * rows`.
    #[must_use]
    pub fn from_cells(cols: usize, rows: usize, tile_size: f32, cells: Vec<TerrainCell>) -> Option<Self> {
        (cell_count(cols, rows) == Some(cells.len())).then_some(Self {
            cols,
            rows,
            tile_size,
            cells,
        })
    }

    /// Creates an all-Ground grid that covers a `world_width x world_height` arena.
    #[must_use]
    pub fn for_world(world_width: f32, world_height: f32) -> Self {
        let (cols, rows) = Self::dimensions_for(world_width, world_height, TILE_SIZE);
        Self::new(cols, rows, TILE_SIZE)
    }

    /// Computes `(cols, rows)` for an arena: `ceil(dimension / tile_size)`.
    ///
    /// Non-positive or non-finite inputs give a zero-sized axis.
    #[must_use]
    pub fn dimensions_for(world_width: f32, world_height: f32, tile_size: f32) -> (usize, usize) {
        (
            cells_along(world_width, tile_size),
            cells_along(world_height, tile_size),
        )
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns true if the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw row-major cell slice.
    #[must_use]
    pub fn cells(&self) -> &[TerrainCell] {
        &self.cells
    }

    /// Cell at grid indices, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> Option<TerrainCell> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Converts world coordinates to grid indices by flooring `coord / tile_size`.
    ///
    /// Returns `None` for points outside the grid or non-finite input.
    #[must_use]
    pub fn world_to_tile(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let col = (x / self.tile_size).floor();
        let row = (y / self.tile_size).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as usize, row as usize))
    }

    /// Terrain under a world point. Points outside the grid read as `Rock`.
    #[must_use]
    pub fn tile_at(&self, x: f32, y: f32) -> TerrainCell {
        self.world_to_tile(x, y)
            .and_then(|(col, row)| self.get(col, row))
            .unwrap_or(TerrainCell::Rock)
    }

    /// World-space center of a cell.
    #[must_use]
    pub fn tile_center(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.tile_size,
            (row as f32 + 0.5) * self.tile_size,
        )
    }

    /// Iterates `(col, row, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TerrainCell)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % cols, i / cols, cell))
    }

    /// Number of cells of the given type.
    #[must_use]
    pub fn count(&self, cell: TerrainCell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Per-type cell counts, indexed like `TerrainCell::ALL`.
    #[must_use]
    pub fn histogram(&self) -> [usize; 5] {
        let mut counts = [0; 5];
        for &cell in &self.cells {
            counts[cell as usize] += 1;
        }
        counts
    }

    /// Stamps a filled circle of radius `radius` cells around `(cx, cy)`.
    ///
    /// `claim` is called with the current cell for every in-grid cell inside
    /// the circle and returns the replacement, if any.
    fn stamp_circle<F>(&mut self, cx: usize, cy: usize, radius: usize, mut claim: F)
    where
        F: FnMut(TerrainCell) -> Option<TerrainCell>,
    {
        let r = radius as i64;
        let r_sq = r * r;
        let (cx, cy) = (cx as i64, cy as i64);

        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r_sq {
                    continue;
                }
                let (x, y) = (cx + dx, cy + dy);
                if x < 0 || y < 0 || x >= self.cols as i64 || y >= self.rows as i64 {
                    continue;
                }
                let index = y as usize * self.cols + x as usize;
                if let Some(next) = claim(self.cells[index]) {
                    self.cells[index] = next;
                }
            }
        }
    }
}

/// `cols * rows`, or `None` past what a `Vec` can hold.
fn cell_count(cols: usize, rows: usize) -> Option<usize> {
    cols.checked_mul(rows)
        .filter(|&len| isize::try_from(len).is_ok())
}

fn cells_along(extent: f32, tile_size: f32) -> usize {
    if extent > 0.0 && extent.is_finite() && tile_size > 0.0 {
        (extent / tile_size).ceil() as usize
    } else {
        0
    }
}

// ============================================================================
// GENERATION PARAMETERS
// ============================================================================

/// Parameters for one stamping pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionParams {
    /// How many regions to stamp.
    pub count: Span<usize>,
    /// Minimum distance (cells) between a region center and the grid edge.
    pub margin: usize,
    /// Region radius in cells.
    pub radius: Span<usize>,
    /// Probability that a claimable cell inside the circle is converted.
    pub fill_chance: f64,
}

/// Parameters for the three terrain passes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Water pass (overwrites everything).
    pub water: RegionParams,
    /// Forest pass (claims Ground only).
    pub forest: RegionParams,
    /// Cave pass (claims Ground only).
    pub cave: RegionParams,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            water: RegionParams {
                count: Span::new(2, 4),
                margin: 5,
                radius: Span::new(3, 6),
                fill_chance: 1.0,
            },
            forest: RegionParams {
                count: Span::new(3, 6),
                margin: 3,
                radius: Span::new(4, 8),
                fill_chance: 0.7,
            },
            cave: RegionParams {
                count: Span::new(1, 3),
                margin: 5,
                radius: Span::new(2, 4),
                fill_chance: 1.0,
            },
        }
    }
}

// ============================================================================
// GENERATOR
// ============================================================================

/// How a pass treats cells that are already claimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StampRule {
    /// Replace whatever is there.
    Overwrite,
    /// Only convert cells that are still Ground.
    GroundOnly,
}

/// Builds terrain grids from `TerrainParams`.
#[derive(Clone, Debug, Default)]
pub struct TerrainGenerator {
    params: TerrainParams,
}

impl TerrainGenerator {
    /// Creates a generator with the given parameters.
    #[must_use]
    pub const fn new(params: TerrainParams) -> Self {
        Self { params }
    }

    /// Returns the generation parameters.
    #[must_use]
    pub const fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Generates the terrain for a `world_width x world_height` arena.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        world_width: f32,
        world_height: f32,
        rng: &mut R,
    ) -> TerrainGrid {
        let mut grid = TerrainGrid::for_world(world_width, world_height);
        if grid.is_empty() {
            return grid;
        }

        let water = Self::stamp_pass(&mut grid, &self.params.water, TerrainCell::Water, StampRule::Overwrite, rng);
        let forest = Self::stamp_pass(&mut grid, &self.params.forest, TerrainCell::Forest, StampRule::GroundOnly, rng);
        let cave = Self::stamp_pass(&mut grid, &self.params.cave, TerrainCell::Cave, StampRule::GroundOnly, rng);

        tracing::debug!(
            "Terrain {}x{}: {} water, {} forest, {} cave regions",
            grid.cols(),
            grid.rows(),
            water,
            forest,
            cave
        );

        grid
    }

    /// Runs one pass. Returns the number of regions actually stamped.
    fn stamp_pass<R: Rng + ?Sized>(
        grid: &mut TerrainGrid,
        region: &RegionParams,
        fill: TerrainCell,
        rule: StampRule,
        rng: &mut R,
    ) -> usize {
        let count = region.count.sample(rng);
        let mut stamped = 0;

        for _ in 0..count {
            let center = sample_index(rng, grid.cols(), region.margin)
                .zip(sample_index(rng, grid.rows(), region.margin));
            let Some((cx, cy)) = center else {
                tracing::warn!(
                    "{} region skipped: {}x{} grid too small for margin {}",
                    fill.name(),
                    grid.cols(),
                    grid.rows(),
                    region.margin
                );
                continue;
            };
            let radius = region.radius.sample(rng);

            grid.stamp_circle(cx, cy, radius, |current| {
                let claimable = match rule {
                    StampRule::Overwrite => true,
                    StampRule::GroundOnly => current == TerrainCell::Ground,
                };
                (claimable && chance(&mut *rng, region.fill_chance)).then_some(fill)
            });
            stamped += 1;
        }

        stamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::WorldSeed;

    fn generate(seed: u64) -> TerrainGrid {
        TerrainGenerator::default().generate(2000.0, 1500.0, &mut WorldSeed::new(seed).rng())
    }

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(TerrainGrid::dimensions_for(2000.0, 1500.0, 40.0), (50, 38));
        assert_eq!(TerrainGrid::dimensions_for(40.0, 41.0, 40.0), (1, 2));
        assert_eq!(TerrainGrid::dimensions_for(0.0, 100.0, 40.0), (0, 3));
        assert_eq!(TerrainGrid::dimensions_for(-5.0, f32::NAN, 40.0), (0, 0));
    }

    #[test]
    fn test_tile_lookup_floors() {
        let grid = TerrainGrid::for_world(2000.0, 1500.0);

        assert_eq!(grid.world_to_tile(0.0, 0.0), Some((0, 0)));
        assert_eq!(grid.world_to_tile(39.9, 40.0), Some((0, 1)));
        assert_eq!(grid.world_to_tile(1999.0, 1519.0), Some((49, 37)));
        assert_eq!(grid.world_to_tile(-0.1, 10.0), None);
        assert_eq!(grid.world_to_tile(2000.0, 10.0), None);
        assert_eq!(grid.world_to_tile(f32::NAN, 10.0), None);
    }

    #[test]
    fn test_out_of_grid_reads_rock() {
        let grid = TerrainGrid::for_world(400.0, 400.0);

        assert_eq!(grid.tile_at(200.0, 200.0), TerrainCell::Ground);
        assert_eq!(grid.tile_at(-1.0, 200.0), TerrainCell::Rock);
        assert_eq!(grid.tile_at(200.0, 400.0), TerrainCell::Rock);
        assert_eq!(grid.tile_at(f32::INFINITY, 0.0), TerrainCell::Rock);
    }

    #[test]
    fn test_stamp_circle_clips_to_grid() {
        let mut grid = TerrainGrid::new(5, 5, 40.0);
        grid.stamp_circle(0, 0, 2, |_| Some(TerrainCell::Water));

        // Quarter disc of radius 2: (0,0) (1,0) (2,0) (0,1) (1,1) (0,2)
        assert_eq!(grid.count(TerrainCell::Water), 6);
        assert_eq!(grid.get(2, 0), Some(TerrainCell::Water));
        assert_eq!(grid.get(2, 1), Some(TerrainCell::Ground));
    }

    #[test]
    fn test_generation_determinism() {
        assert_eq!(generate(42), generate(42));
        assert_ne!(generate(42), generate(43));
    }

    #[test]
    fn test_generation_has_every_biome() {
        let grid = generate(42);

        assert!(grid.count(TerrainCell::Water) > 0);
        assert!(grid.count(TerrainCell::Forest) > 0);
        assert!(grid.count(TerrainCell::Ground) > 0);
        // Rock is only ever the out-of-grid sentinel
        assert_eq!(grid.count(TerrainCell::Rock), 0);

        // A cave can be fully buried under earlier passes, but not on every map
        assert!((0..10).any(|seed| generate(seed).count(TerrainCell::Cave) > 0));
    }

    #[test]
    fn test_water_overwrites_and_ground_only_passes_do_not() {
        let mut rng = WorldSeed::new(9).rng();
        let mut grid = TerrainGrid::new(21, 21, 40.0);
        let full = RegionParams {
            count: Span::new(1, 1),
            margin: 10,
            radius: Span::new(3, 3),
            fill_chance: 1.0,
        };

        TerrainGenerator::stamp_pass(&mut grid, &full, TerrainCell::Forest, StampRule::GroundOnly, &mut rng);
        let forest = grid.count(TerrainCell::Forest);
        assert!(forest > 0);

        // margin 10 on a 21-cell axis pins the center to (10, 10) every time
        TerrainGenerator::stamp_pass(&mut grid, &full, TerrainCell::Cave, StampRule::GroundOnly, &mut rng);
        assert_eq!(grid.count(TerrainCell::Cave), 0);
        assert_eq!(grid.count(TerrainCell::Forest), forest);

        TerrainGenerator::stamp_pass(&mut grid, &full, TerrainCell::Water, StampRule::Overwrite, &mut rng);
        assert_eq!(grid.count(TerrainCell::Forest), 0);
        assert_eq!(grid.count(TerrainCell::Water), forest);
    }

    #[test]
    fn test_forest_fill_is_ragged() {
        let mut rng = WorldSeed::new(5).rng();
        let mut grid = TerrainGrid::new(31, 31, 40.0);
        let forest = RegionParams {
            count: Span::new(1, 1),
            margin: 15,
            radius: Span::new(8, 8),
            fill_chance: 0.7,
        };

        TerrainGenerator::stamp_pass(&mut grid, &forest, TerrainCell::Forest, StampRule::GroundOnly, &mut rng);

        // Disc of radius 8 covers 197 cells; 70% fill leaves gaps
        let filled = grid.count(TerrainCell::Forest);
        assert!(filled > 100 && filled < 197, "filled {filled}");
    }

    #[test]
    fn test_tiny_world_skips_regions() {
        let grid = TerrainGenerator::default().generate(120.0, 120.0, &mut WorldSeed::new(1).rng());

        assert_eq!((grid.cols(), grid.rows()), (3, 3));
        assert_eq!(grid.count(TerrainCell::Ground), 9);
    }

    #[test]
    fn test_degenerate_world_is_empty() {
        let grid = TerrainGenerator::default().generate(0.0, -10.0, &mut WorldSeed::new(1).rng());

        assert!(grid.is_empty());
        assert_eq!(grid.tile_at(0.0, 0.0), TerrainCell::Rock);
    }

    #[test]
    fn test_oversized_world_is_empty() {
        let grid = TerrainGenerator::default().generate(1e12, 1e12, &mut WorldSeed::new(1).rng());

        assert!(grid.is_empty());
        assert_eq!((grid.cols(), grid.rows()), (0, 0));
        assert_eq!(grid.tile_at(100.0, 100.0), TerrainCell::Rock);

        assert!(TerrainGrid::new(usize::MAX, 2, 40.0).is_empty());
        assert!(TerrainGrid::from_cells(usize::MAX, 2, 40.0, Vec::new()).is_none());
    }

    #[test]
    fn test_histogram_matches_counts() {
        let grid = generate(77);
        let histogram = grid.histogram();

        for cell in TerrainCell::ALL {
            assert_eq!(histogram[cell as usize], grid.count(cell));
        }
        assert_eq!(histogram.iter().sum::<usize>(), 50 * 38);
    }

    #[test]
    fn test_iter_is_row_major() {
        let grid = TerrainGrid::new(3, 2, 40.0);
        let coords: Vec<(usize, usize)> = grid.iter().map(|(c, r, _)| (c, r)).collect();

        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }
}
