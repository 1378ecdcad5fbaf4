//! Floor lattice used for level generation bookkeeping
//!
//! The arena floor minus a 1-unit wall margin is split into `grid_size`²
//! square cells. Cells only exist during generation; runtime collision is
//! done on world-space boxes.

use serde::{Deserialize, Serialize};

use crate::config::{GRID_MARGIN, GameConfig};

/// One cell of the floor lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub z: i32,
}

impl GridCell {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Manhattan distance to another cell
    #[inline]
    pub fn manhattan(&self, other: GridCell) -> i32 {
        (self.x - other.x).abs() + (self.z - other.z).abs()
    }

    /// Chebyshev distance to another cell
    #[inline]
    pub fn chebyshev(&self, other: GridCell) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// The four axis-aligned neighbours (+X, -X, +Z, -Z), unfiltered
    pub fn neighbors4(&self) -> [GridCell; 4] {
        [
            GridCell::new(self.x + 1, self.z),
            GridCell::new(self.x - 1, self.z),
            GridCell::new(self.x, self.z + 1),
            GridCell::new(self.x, self.z - 1),
        ]
    }
}

/// Bidirectional world <-> grid conversion for one arena
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMapper {
    pub grid_size: i32,
    pub cell_size: f32,
    /// World X/Z of the center of cell (0, 0)
    pub origin: f32,
    /// Lower edge of the lattice (origin - cell_size/2)
    span_start: f32,
    /// Width of the lattice (cube_size - 2 * margin)
    span: f32,
}

impl GridMapper {
    pub fn new(cube_size: f32, grid_size: i32) -> Self {
        let grid_size = grid_size.max(1);
        let span = cube_size - 2.0 * GRID_MARGIN;
        let cell_size = span / grid_size as f32;
        let span_start = -cube_size / 2.0 + GRID_MARGIN;
        Self {
            grid_size,
            cell_size,
            origin: span_start + cell_size / 2.0,
            span_start,
            span,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.cube_size, config.grid_size)
    }

    /// Map a world X/Z position to the cell containing it.
    ///
    /// Points outside the lattice snap to the nearest edge cell.
    pub fn world_to_grid(&self, world_x: f32, world_z: f32) -> GridCell {
        GridCell::new(self.axis_to_grid(world_x), self.axis_to_grid(world_z))
    }

    fn axis_to_grid(&self, world: f32) -> i32 {
        // Scale before dividing so exact cell boundaries stay exact
        let cell = ((world - self.span_start) * self.grid_size as f32 / self.span).floor();
        if cell.is_nan() {
            return 0;
        }
        (cell as i32).clamp(0, self.grid_size - 1)
    }

    /// World X/Z of a cell's center
    pub fn grid_to_world(&self, cell: GridCell) -> (f32, f32) {
        (
            self.origin + cell.x as f32 * self.cell_size,
            self.origin + cell.z as f32 * self.cell_size,
        )
    }

    #[inline]
    pub fn in_bounds(&self, cell: GridCell) -> bool {
        (0..self.grid_size).contains(&cell.x) && (0..self.grid_size).contains(&cell.z)
    }

    /// All cells in row-major order (x outer, z inner)
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.grid_size).flat_map(move |x| (0..self.grid_size).map(move |z| GridCell::new(x, z)))
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.grid_size * self.grid_size) as usize
    }
}
