//! # Arena Preview
//!
//! Generates one arena and prints a tile-per-character overview with a
//! summary. Handy for eyeballing a seed or a config change.
//!
//! ```bash
//! arena_preview --seed 42
//! arena_preview --config data/arena.toml --width 2400
//! ```
//!
//! Legend: terrain `.` ground, `~` water, `#` rock, `"` forest, `o` cave;
//! obstacles `@` rock, `T` tree; wildlife `s`/`m`/`l`; hunters `1`..`9`;
//! monster `M`.

use std::path::PathBuf;

use arena::{ArenaConfig, ArenaMap, TerrainCell, TerrainGrid, Vec2, WildlifeSize};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "arena_preview")]
#[command(about = "Generate a hunting-grounds arena and print an ASCII overview")]
struct Args {
    /// Arena width in world units (overrides the config)
    #[arg(short = 'W', long)]
    width: Option<f32>,

    /// Arena height in world units (overrides the config)
    #[arg(short = 'H', long)]
    height: Option<f32>,

    /// Generation seed (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match ArenaConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("✗ {e}");
                std::process::exit(1);
            }
        },
        None => ArenaConfig::default(),
    };
    if let Some(width) = args.width {
        config.world_width = width;
    }
    if let Some(height) = args.height {
        config.world_height = height;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Err(e) = config.validate() {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }

    let map = ArenaMap::generate(&config);

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                    HUNTING GROUNDS ARENA PREVIEW");
    println!("═══════════════════════════════════════════════════════════════════");
    println!();

    for line in render(&map) {
        println!("{line}");
    }

    println!();
    print_summary(&map);
}

/// One string per grid row, obstacles and spawns drawn over the terrain.
fn render(map: &ArenaMap) -> Vec<String> {
    let grid = map.terrain();
    let mut canvas: Vec<Vec<char>> = (0..grid.rows())
        .map(|row| {
            (0..grid.cols())
                .map(|col| grid.get(col, row).unwrap_or(TerrainCell::Rock).glyph())
                .collect()
        })
        .collect();

    for obstacle in map.obstacles() {
        plot(&mut canvas, grid, obstacle.center, obstacle.kind.glyph());
    }
    for wildlife in &map.spawns().wildlife_spawns {
        let glyph = match wildlife.size {
            WildlifeSize::Small => 's',
            WildlifeSize::Medium => 'm',
            WildlifeSize::Large => 'l',
        };
        plot(&mut canvas, grid, wildlife.position, glyph);
    }
    for (i, hunter) in map.spawns().hunter_spawns.iter().enumerate() {
        let glyph = u32::try_from(i + 1)
            .ok()
            .and_then(|n| char::from_digit(n, 10))
            .unwrap_or('H');
        plot(&mut canvas, grid, *hunter, glyph);
    }
    plot(&mut canvas, grid, map.spawns().monster_spawn, 'M');

    canvas.into_iter().map(|row| row.into_iter().collect()).collect()
}

fn plot(canvas: &mut [Vec<char>], grid: &TerrainGrid, point: Vec2, glyph: char) {
    if let Some((col, row)) = grid.world_to_tile(point.x, point.y) {
        canvas[row][col] = glyph;
    }
}

fn print_summary(map: &ArenaMap) {
    let grid = map.terrain();
    let spawns = map.spawns();

    println!("┌─ ARENA ────────────────────────────────────────────────────────┐");
    println!("│ World:       {} x {}", map.width(), map.height());
    println!("│ Grid:        {} x {} tiles", grid.cols(), grid.rows());
    match map.seed() {
        Some(seed) => println!("│ Seed:        {} ({seed})", seed.value()),
        None => println!("│ Seed:        external"),
    }
    println!("└────────────────────────────────────────────────────────────────┘");

    println!("┌─ TERRAIN ──────────────────────────────────────────────────────┐");
    for cell in TerrainCell::ALL {
        println!("│ {:<12} {}", format!("{}:", cell.name()), grid.count(cell));
    }
    println!("└────────────────────────────────────────────────────────────────┘");

    println!("┌─ OBSTACLES ────────────────────────────────────────────────────┐");
    println!("│ Rocks:       {}", map.obstacles().rocks().count());
    println!("│ Trees:       {}", map.obstacles().trees().count());
    println!("└────────────────────────────────────────────────────────────────┘");

    println!("┌─ SPAWNS ───────────────────────────────────────────────────────┐");
    for (i, hunter) in spawns.hunter_spawns.iter().enumerate() {
        println!("│ Hunter {}:    ({}, {})", i + 1, hunter.x, hunter.y);
    }
    println!("│ Monster:     ({}, {})", spawns.monster_spawn.x, spawns.monster_spawn.y);
    for size in [WildlifeSize::Small, WildlifeSize::Medium, WildlifeSize::Large] {
        println!("│ {:<12} {}", format!("{}:", size.name()), spawns.wildlife_count(size));
    }
    println!("└────────────────────────────────────────────────────────────────┘");
}
