use alloc::vec::Vec;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Chooses where the mines of a fresh grid go.
pub trait MinePlacer {
    /// Returns exactly `config.mines()` distinct in-bounds coordinates, none equal to `exclude`.
    fn place_mines(&mut self, config: GameConfig, exclude: Coord2) -> Vec<Coord2>;
}
