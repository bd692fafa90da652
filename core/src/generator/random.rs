use super::*;
use ndarray::Array2;

/// Purely random placement: samples a uniform `(row, col)` until enough distinct positions are
/// mined, retrying positions that already hold a mine.
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
    fn generate(self, config: BoardConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        // sampling never terminates without a free cell
        config.validate()?;

        let mut mines: Array2<bool> = Array2::default((config.size, config.size).to_nd_index());
        let mut mines_placed: CellCount = 0;
        let mut retries: u32 = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while mines_placed < config.mines {
            let coords: Coord2 = (
                rng.random_range(0..config.size),
                rng.random_range(0..config.size),
            );
            let cell = &mut mines[coords.to_nd_index()];
            if *cell {
                retries += 1;
                continue;
            }
            *cell = true;
            mines_placed += 1;
        }

        log::trace!(
            "placed {} mines on {}x{} after {} retries",
            mines_placed,
            config.size,
            config.size,
            retries
        );
        Ok(MineLayout::from_mine_mask(mines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn generates_exact_number_of_distinct_mines() {
        for seed in 0..64 {
            let config = BoardConfig::new(6, 5).unwrap();
            let layout = RandomLayoutGenerator::new(seed).generate(config).unwrap();

            assert_eq!(layout.mine_count(), 5);
            assert_eq!(layout.size(), 6);
            assert_eq!(layout.iter_mines().count(), 5);
        }
    }

    #[test]
    fn dense_board_still_fills() {
        let config = BoardConfig::new(6, 35).unwrap();
        let layout = RandomLayoutGenerator::new(7).generate(config).unwrap();

        assert_eq!(layout.mine_count(), 35);
        assert_eq!(layout.safe_cell_count(), 1);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = BoardConfig::new(9, 9).unwrap();
        let a = RandomLayoutGenerator::new(42).generate(config).unwrap();
        let b = RandomLayoutGenerator::new(42).generate(config).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn mines_spread_over_the_whole_board() {
        let config = BoardConfig::new(6, 5).unwrap();
        let mut seen = [[false; 6]; 6];
        for seed in 0..500 {
            let layout = RandomLayoutGenerator::new(seed).generate(config).unwrap();
            for (row, col) in layout.iter_mines() {
                seen[row as usize][col as usize] = true;
            }
        }

        let covered: Vec<_> = seen.iter().flatten().filter(|&&hit| hit).collect();
        assert_eq!(covered.len(), 36);
    }

    #[test]
    fn oversized_config_is_rejected_instead_of_looping() {
        let config = BoardConfig::new_unchecked(3, 9);

        assert_eq!(
            RandomLayoutGenerator::new(0).generate(config),
            Err(GameError::TooManyMines { mines: 9, cells: 9 })
        );
    }
}
