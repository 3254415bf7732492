use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Purely random placement: draws uniform coordinates and keeps those not already holding a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        let size = config.size.max(1);
        let total_cells = square(size);
        let shape = (size, size).to_nd_index();

        // full boards skip sampling entirely
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Minefield already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    total_cells
                );
            }
            return layout_from_mask(Array2::from_elem(shape, true));
        }

        let mut mines: Array2<bool> = Array2::default(shape);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_left = config.mines;
        let mut draws: u64 = 0;

        while mines_left > 0 {
            let coords: Coord2 = (rng.random_range(0..size), rng.random_range(0..size));
            draws += 1;
            let cell = &mut mines[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mines_left -= 1;
            }
        }

        log::debug!(
            "Placed {} mines on {}x{} with {} draws",
            config.mines,
            size,
            size,
            draws
        );
        layout_from_mask(mines)
    }
}

fn layout_from_mask(mask: Array2<bool>) -> MineLayout {
    match MineLayout::from_mine_mask(mask) {
        Ok(layout) => layout,
        Err(err) => unreachable!("generated mask is square: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(size: Coord, mines: CellCount, seed: u64) -> MineLayout {
        RandomLayoutGenerator::new(seed).generate(GameConfig::new(size, mines))
    }

    #[test]
    fn places_requested_mine_count() {
        for seed in 0..20 {
            let layout = generate(15, 40, seed);
            assert_eq!(layout.size(), 15);
            assert_eq!(layout.mine_count(), 40);
        }
    }

    #[test]
    fn full_board_terminates() {
        let layout = generate(3, 9, 7);
        assert_eq!(layout.mine_count(), 9);
        assert_eq!(layout.safe_cell_count(), 0);
    }

    #[test]
    fn overfull_request_fills_board() {
        let config = GameConfig::new_unchecked(2, 10);
        let layout = RandomLayoutGenerator::new(1).generate(config);
        assert_eq!(layout.mine_count(), 4);
    }

    #[test]
    fn one_short_of_full_terminates() {
        let layout = generate(4, 15, 3);
        assert_eq!(layout.mine_count(), 15);
    }

    #[test]
    fn no_mines() {
        assert_eq!(generate(5, 0, 3).mine_count(), 0);
    }

    #[test]
    fn same_seed_same_layout() {
        assert_eq!(generate(10, 20, 42), generate(10, 20, 42));
    }
}
