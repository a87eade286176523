//! Route between two points over an occupancy grid loaded from JSON.
//!
//! Usage:
//!
//! ```text
//! route <grid.json> <start-x> <start-y> <goal-x> <goal-y>
//! ```
//!
//! The grid document mirrors what a host tool exports after classifying
//! cells against its geometry:
//!
//! ```json
//! {
//!   "cell_size": 1.0,
//!   "origin": { "x": 0.0, "y": 0.0 },
//!   "rows": [[0, 1, 0], [0, 0, 0], [0, 0, 0]]
//! }
//! ```
//!
//! Non-zero cells are blocked. The resulting route is printed one point
//! per line; an unreachable goal prints nothing and exits with status 1.

use std::error::Error;
use std::fs;
use std::process::ExitCode;

use serde::Deserialize;
use taut_core::{OccupancyGrid, Vec2};

#[derive(Deserialize)]
struct GridDoc {
    cell_size: f64,
    #[serde(default)]
    origin: Vec2,
    rows: Vec<Vec<u8>>,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 6 {
        eprintln!("usage: route <grid.json> <start-x> <start-y> <goal-x> <goal-y>");
        return Ok(ExitCode::from(2));
    }

    let doc: GridDoc = serde_json::from_str(&fs::read_to_string(&args[1])?)?;
    let rows: Vec<Vec<bool>> = doc
        .rows
        .iter()
        .map(|row| row.iter().map(|&w| w != 0).collect())
        .collect();
    let grid = OccupancyGrid::from_rows(&rows, doc.cell_size, doc.origin)?;

    let from = Vec2::new(args[2].parse()?, args[3].parse()?);
    let to = Vec2::new(args[4].parse()?, args[5].parse()?);

    log::info!(
        "routing over {}x{} grid (cell size {}) from {} to {}",
        grid.size(),
        grid.size(),
        grid.cell_size(),
        from,
        to
    );

    let path = taut_paths::route(&grid, from, to);
    if path.is_empty() {
        log::warn!("no route found");
        return Ok(ExitCode::FAILURE);
    }

    log::info!("route has {} points", path.len());
    for p in &path {
        println!("{} {}", p.x, p.y);
    }
    Ok(ExitCode::SUCCESS)
}
