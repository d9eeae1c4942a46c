use super::*;
use ndarray::Array2;

/// Purely random placement: every set of `mines` positions is equally likely.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let side = usize::from(config.side);
        let total_cells = config.total_cells();

        // unchecked configs can carry more mines than cells; degrade to a full
        // mask instead of letting index sampling panic
        if config.mines >= total_cells {
            log::warn!(
                "mine count {} fills the {}-cell board, generating a full mask",
                config.mines,
                total_cells
            );
            return MineLayout::from_mask(Array2::from_elem([side, side], true));
        }

        let mut mines: Array2<bool> = Array2::default([side, side]);

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let picked = rand::seq::index::sample(
            &mut rng,
            usize::from(total_cells),
            usize::from(config.mines),
        );
        for id in picked {
            mines[pos_of(id as CellId, config.side).to_nd_index()] = true;
        }

        let layout = MineLayout::from_mask(mines);
        log::debug!(
            "generated {}x{} layout with {} mines",
            config.side,
            config.side,
            layout.mine_count()
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mines() {
        let config = GameConfig::new(10, 20).unwrap();
        for seed in 0..16 {
            let layout = RandomBoardGenerator::new(seed).generate(config);
            assert_eq!(layout.mine_count(), 20);
            assert_eq!(layout.safe_cell_count(), 80);
        }
    }

    #[test]
    fn same_seed_reproduces_the_layout() {
        let config = GameConfig::new(8, 10).unwrap();
        let first = RandomBoardGenerator::new(42).generate(config);
        let second = RandomBoardGenerator::new(42).generate(config);
        assert_eq!(first, second);
    }

    #[test]
    fn overfull_config_degrades_to_a_full_mask() {
        // bypasses validation on purpose
        let config = GameConfig::new_unchecked(3, 50);
        let layout = RandomBoardGenerator::new(1).generate(config);
        assert_eq!(layout.mine_count(), 9);
        assert_eq!(layout.safe_cell_count(), 0);
    }

    #[test]
    fn zero_mines_yields_an_empty_mask() {
        let config = GameConfig::new(4, 0).unwrap();
        let layout = RandomBoardGenerator::new(7).generate(config);
        assert_eq!(layout.mine_count(), 0);
        assert_eq!(layout.safe_cell_count(), 16);
    }
}
