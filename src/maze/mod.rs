//! Maze grid, generation, and seeding.

mod generator;
mod grid;

pub use generator::{free_cell, generate, place_cells, seed_cells, Tier};
pub use grid::{CellKind, Maze, EMPTY, REFRESH, WALL};
