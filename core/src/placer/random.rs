use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Uniformly random placement over every cell except the first-touched one.
///
/// Neighbors of the excluded cell may still receive mines. The generator keeps its state
/// between games, so restarting with the same placer yields a new layout.
#[derive(Clone, Debug)]
pub struct RandomMinePlacer {
    rng: SmallRng,
}

impl RandomMinePlacer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place_mines(&mut self, config: GameConfig, exclude: Coord2) -> Vec<Coord2> {
        let total_cells = usize::from(config.total_cells());
        let mines = usize::from(config.mines());

        // sample from the cells with `exclude` cut out, then shift indices past the gap
        let (pool, skip) = if config.contains(exclude) {
            (total_cells - 1, config.linear_index(exclude))
        } else {
            (total_cells, total_cells)
        };

        index::sample(&mut self.rng, pool, mines)
            .into_iter()
            .map(|i| if i >= skip { i + 1 } else { i })
            .map(|i| config.coords_at(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    #[test]
    fn never_places_on_excluded_cell() {
        let config = GameConfig::new(9, 9, 10).unwrap();
        let mut placer = RandomMinePlacer::new(7);

        for _ in 0..200 {
            let mines = placer.place_mines(config, (4, 4));
            assert_eq!(mines.len(), 10);
            assert!(!mines.contains(&(4, 4)));
            assert!(mines.iter().all(|&coords| config.contains(coords)));
            let distinct: BTreeSet<_> = mines.iter().copied().collect();
            assert_eq!(distinct.len(), 10);
        }
    }

    #[test]
    fn fills_every_other_cell_on_densest_board() {
        let config = GameConfig::new(3, 3, 8).unwrap();
        let mut placer = RandomMinePlacer::new(1);

        let mines: BTreeSet<_> = placer.place_mines(config, (1, 2)).into_iter().collect();

        assert_eq!(mines.len(), 8);
        assert!(!mines.contains(&(1, 2)));
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new(16, 30, 99).unwrap();
        let a = RandomMinePlacer::new(42).place_mines(config, (0, 0));
        let b = RandomMinePlacer::new(42).place_mines(config, (0, 0));
        assert_eq!(a, b);
    }

    #[test]
    fn placement_is_roughly_uniform() {
        // 2x2 board, 1 mine, first touch at (0, 0): the other three cells share the mine
        let config = GameConfig::new(2, 2, 1).unwrap();
        let mut placer = RandomMinePlacer::new(3);
        let mut hits = [0u32; 4];

        for _ in 0..3000 {
            let mines = placer.place_mines(config, (0, 0));
            hits[config.linear_index(mines[0])] += 1;
        }

        assert_eq!(hits[0], 0);
        for &count in &hits[1..] {
            assert!((800..1200).contains(&count), "skewed placement: {:?}", hits);
        }
    }
}
