use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cell matrix plus the static geometry of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    config: GameConfig,
    cells: Array2<Cell>,
    mines_placed: bool,
}

impl Grid {
    /// Creates an empty grid. Mines are placed later, on the first reveal.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            cells: Array2::default(config.size().to_nd_index()),
            mines_placed: false,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn total_safe_cells(&self) -> CellCount {
        self.config.total_safe_cells()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.config.contains(coords)
    }

    pub fn has_mines(&self) -> bool {
        self.mines_placed
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.contains(coords).then(|| self.cells[coords.to_nd_index()])
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// All cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(coords, _)| coords)
    }

    /// Seeds mines using `placer`, never on `exclude`, then computes adjacency counts.
    ///
    /// Runs at most once per grid; later calls are ignored.
    ///
    /// The grid always ends up with exactly `config.mines()` mines. Unusable placer output
    /// (out of bounds, duplicate, on `exclude`, or surplus) is dropped, and a short layout is
    /// filled from the first free cells in row-major order.
    pub fn place_mines<P: MinePlacer + ?Sized>(&mut self, placer: &mut P, exclude: Coord2) {
        if self.mines_placed {
            log::warn!("Mines already placed, ignoring second placement");
            return;
        }

        let requested = self.config.mines();
        let mut placed: CellCount = 0;
        for coords in placer.place_mines(self.config, exclude) {
            if placed == requested {
                log::warn!("Placer produced surplus mine at {:?}, dropped", coords);
                continue;
            }
            if coords == exclude || !self.contains(coords) || self[coords].is_mine() {
                log::warn!("Placer produced unusable mine at {:?}, skipped", coords);
                continue;
            }
            self.cell_mut(coords).set_mine();
            placed += 1;
        }

        // double check mine count
        if placed < requested {
            log::warn!(
                "Placed mine count mismatch, actual: {}, requested: {}, filling in",
                placed,
                requested
            );
            for index in 0..usize::from(self.config.total_cells()) {
                if placed == requested {
                    break;
                }
                let coords = self.config.coords_at(index);
                if coords != exclude && !self[coords].is_mine() {
                    self.cell_mut(coords).set_mine();
                    placed += 1;
                }
            }
        }
        self.mines_placed = true;
        log::debug!("Placed {} mines avoiding {:?}", placed, exclude);

        self.compute_adjacency();
    }

    fn compute_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self[coords].is_mine() {
                    continue;
                }
                let count = self
                    .iter_neighbors(coords)
                    .filter(|&pos| self[pos].is_mine())
                    .count() as u8;
                self.cell_mut(coords).set_adjacent_mines(count);
            }
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
