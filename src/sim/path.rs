//! Guaranteed-route carving
//!
//! A greedy random walk from the start cell toward the target cell. The
//! walk prefers steps that close the Manhattan gap but mixes in lateral
//! wiggles so routes are not straight lines. Every cell on the resulting
//! path (plus a ring around both endpoints) is kept obstacle-free.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{GridCell, GridMapper};

/// Chance of adding a single random X-axis sidestep candidate
const LATERAL_STEP_CHANCE: f64 = 0.35;
/// Chance of adding both Z-axis sidestep candidates
const DOUBLE_LATERAL_CHANCE: f64 = 0.2;
/// Walk step cap, in multiples of the cell count
const MAX_STEPS_FACTOR: usize = 6;
/// Recorded path length cap, in multiples of the cell count
const MAX_PATH_FACTOR: usize = 3;

/// A carved route from start to target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Cells in walk order; first is the start, last is the target
    pub cells: Vec<GridCell>,
    /// Whether the walk itself reached the target. When false, the target
    /// was appended after the walk gave up and may not be adjacent to the
    /// previous entry.
    pub arrived: bool,
}

impl Path {
    pub fn start(&self) -> Option<GridCell> {
        self.cells.first().copied()
    }

    pub fn end(&self) -> Option<GridCell> {
        self.cells.last().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Last cell the walk actually stepped on
    fn walk_end(&self) -> Option<GridCell> {
        if self.arrived {
            self.end()
        } else {
            self.cells.iter().rev().nth(1).copied()
        }
    }
}

/// Carve a route from `start` to `target`.
///
/// Always terminates: the walk stops after `cells × 6` steps or once the
/// walk has recorded `cells × 3` entries. If it never lands on `target`, the
/// target is appended as the final entry.
pub fn carve_path<R: Rng + ?Sized>(
    rng: &mut R,
    mapper: &GridMapper,
    start: GridCell,
    target: GridCell,
) -> Path {
    let cell_count = mapper.cell_count();
    let max_steps = cell_count * MAX_STEPS_FACTOR;
    let max_len = cell_count * MAX_PATH_FACTOR;

    let mut cur = start;
    let mut cells = vec![cur];
    let mut visited = HashSet::from([cur]);
    let mut steps = 0;

    while cur != target && steps < max_steps {
        steps += 1;

        let mut candidates = Vec::with_capacity(4);
        let dx = target.x - cur.x;
        let dz = target.z - cur.z;
        if dx != 0 {
            candidates.push(GridCell::new(cur.x + dx.signum(), cur.z));
        }
        if dz != 0 {
            candidates.push(GridCell::new(cur.x, cur.z + dz.signum()));
        }
        if rng.random_bool(LATERAL_STEP_CHANCE) {
            let side = if rng.random_bool(0.5) { 1 } else { -1 };
            candidates.push(GridCell::new(cur.x + side, cur.z));
        }
        if rng.random_bool(DOUBLE_LATERAL_CHANCE) {
            candidates.push(GridCell::new(cur.x, cur.z + 1));
            candidates.push(GridCell::new(cur.x, cur.z - 1));
        }

        candidates.retain(|c| mapper.in_bounds(*c) && !visited.contains(c));

        let next = if candidates.is_empty() {
            // Dead end: any in-bounds neighbour, visited or not
            let fallback: Vec<GridCell> = cur
                .neighbors4()
                .into_iter()
                .filter(|c| mapper.in_bounds(*c))
                .collect();
            if fallback.is_empty() {
                // Single-cell grid: nowhere to go
                break;
            }
            fallback[rng.random_range(0..fallback.len())]
        } else {
            candidates[rng.random_range(0..candidates.len())]
        };

        cur = next;
        visited.insert(cur);
        cells.push(cur);
        if cells.len() >= max_len {
            break;
        }
    }

    let arrived = visited.contains(&target);
    if !arrived {
        log::debug!(
            "Path walk gave up after {} steps at {:?}, appending target {:?}",
            steps,
            cur,
            target
        );
        cells.push(target);
    }

    Path { cells, arrived }
}

/// Cells that must stay obstacle-free: the whole path, a Chebyshev-1 ring
/// around both endpoints, and, if the target was force-appended, the
/// L-shaped bridge from the walk's last cell to the target.
pub fn protected_cells(
    mapper: &GridMapper,
    path: &Path,
    start: GridCell,
    target: GridCell,
) -> HashSet<GridCell> {
    let mut protected: HashSet<GridCell> = path.cells.iter().copied().collect();
    add_neighborhood(&mut protected, mapper, start, 1);
    add_neighborhood(&mut protected, mapper, target, 1);

    if let Some(from) = path.walk_end().filter(|_| !path.arrived) {
        let bridge = bridge_cells(from, target);
        log::warn!(
            "Path did not reach {:?}; protecting {} bridge cells from {:?}",
            target,
            bridge.len(),
            from
        );
        protected.extend(bridge);
    }

    protected
}

fn add_neighborhood(set: &mut HashSet<GridCell>, mapper: &GridMapper, cell: GridCell, radius: i32) {
    for dx in -radius..=radius {
        for dz in -radius..=radius {
            let n = GridCell::new(cell.x + dx, cell.z + dz);
            if mapper.in_bounds(n) {
                set.insert(n);
            }
        }
    }
}

/// Straight run along X, then along Z, from `from` to `to` (both inclusive)
fn bridge_cells(from: GridCell, to: GridCell) -> Vec<GridCell> {
    let mut cells = vec![from];
    let mut cur = from;
    while cur.x != to.x {
        cur.x += (to.x - cur.x).signum();
        cells.push(cur);
    }
    while cur.z != to.z {
        cur.z += (to.z - cur.z).signum();
        cells.push(cur);
    }
    cells
}
