use ndarray::Array2;

use super::*;

/// Predetermined layout, for puzzles, replays and tests.
///
/// If the first-touched cell holds a mine, that mine moves to the first mine-free cell in
/// row-major order so the first reveal stays safe.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinePlacer {
    size: Coord2,
    mines: Vec<Coord2>,
}

impl FixedMinePlacer {
    pub fn new(config: GameConfig, mines: &[Coord2]) -> Result<Self> {
        if mines.len() != usize::from(config.mines()) {
            return Err(GameError::InvalidLayout);
        }

        let mut mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        for &coords in mines {
            if !config.contains(coords) || mask[coords.to_nd_index()] {
                return Err(GameError::InvalidLayout);
            }
            mask[coords.to_nd_index()] = true;
        }

        Ok(Self {
            size: config.size(),
            mines: mines.to_vec(),
        })
    }

    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }
}

impl MinePlacer for FixedMinePlacer {
    fn place_mines(&mut self, config: GameConfig, exclude: Coord2) -> Vec<Coord2> {
        if config.size() != self.size {
            log::warn!(
                "Fixed layout is {:?} but the board is {:?}",
                self.size,
                config.size()
            );
        }

        let mut mines = self.mines.clone();
        if let Some(slot) = mines.iter().position(|&coords| coords == exclude) {
            let free = (0..usize::from(config.total_cells()))
                .map(|i| config.coords_at(i))
                .find(|coords| *coords != exclude && !mines.contains(coords));
            match free {
                Some(coords) => {
                    log::warn!("Moving mine from first touch {:?} to {:?}", exclude, coords);
                    mines[slot] = coords;
                }
                None => log::warn!("No free cell to move mine away from {:?}", exclude),
            }
        }
        mines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::new(3, 3, 2).unwrap()
    }

    #[test]
    fn rejects_bad_layouts() {
        assert_eq!(
            FixedMinePlacer::new(config(), &[(0, 0)]),
            Err(GameError::InvalidLayout)
        );
        assert_eq!(
            FixedMinePlacer::new(config(), &[(0, 0), (0, 0)]),
            Err(GameError::InvalidLayout)
        );
        assert_eq!(
            FixedMinePlacer::new(config(), &[(0, 0), (3, 0)]),
            Err(GameError::InvalidLayout)
        );
    }

    #[test]
    fn keeps_layout_when_first_touch_is_safe() {
        let mut placer = FixedMinePlacer::new(config(), &[(2, 2), (0, 1)]).unwrap();
        assert_eq!(placer.place_mines(config(), (1, 1)), [(2, 2), (0, 1)]);
    }

    #[test]
    fn relocates_mine_under_first_touch() {
        let mut placer = FixedMinePlacer::new(config(), &[(0, 0), (0, 1)]).unwrap();
        assert_eq!(placer.place_mines(config(), (0, 0)), [(0, 2), (0, 1)]);
        // stored layout is untouched for the next game
        assert_eq!(placer.mines(), [(0, 0), (0, 1)]);
    }
}
