use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Generation strategy that lays out `1..=n/2` twice and applies a uniform Fisher-Yates shuffle.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffledDeckGenerator {
    seed: u64,
}

impl ShuffledDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub(crate) fn deal(self, tile_count: TileCount) -> Board {
        let pair_count = tile_count / 2;
        let mut values: Vec<PairValue> = (1..=pair_count).chain(1..=pair_count).collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        fisher_yates(&mut values, &mut rng);

        log::debug!(
            "Dealt {} tiles ({} pairs) from seed {}",
            tile_count,
            pair_count,
            self.seed
        );
        Board::from_values_unchecked(&values)
    }
}

impl DeckGenerator for ShuffledDeckGenerator {
    fn generate(self, size: BoardSize) -> Board {
        self.deal(size.tile_count())
    }
}

/// Every permutation of `slice` is equally likely given a uniform `rng`.
fn fisher_yates<T>(slice: &mut [T], rng: &mut SmallRng) {
    for i in (1..slice.len()).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;

    use super::*;

    fn values(board: &Board) -> Vec<PairValue> {
        board.tiles().iter().map(|tile| tile.value).collect()
    }

    #[test]
    fn every_value_appears_exactly_twice() {
        for size in BoardSize::ALL {
            let board = ShuffledDeckGenerator::new(7).generate(size);

            assert_eq!(board.tile_count(), size.tile_count());
            for value in 1..=size.pair_count() {
                let copies = board.tiles().iter().filter(|tile| tile.value == value).count();
                assert_eq!(copies, 2, "value {value} on {size:?}");
            }
        }
    }

    #[test]
    fn tiles_start_face_down_with_positional_ids() {
        let board = ShuffledDeckGenerator::new(42).generate(BoardSize::Large);

        for (index, tile) in board.tiles().iter().enumerate() {
            assert_eq!(usize::from(tile.id), index);
            assert!(!tile.revealed);
            assert!(!tile.matched);
        }
    }

    #[test]
    fn same_seed_deals_same_board() {
        let a = ShuffledDeckGenerator::new(1234).generate(BoardSize::Medium);
        let b = ShuffledDeckGenerator::new(1234).generate(BoardSize::Medium);

        assert_eq!(a, b);
    }

    #[test]
    fn build_deck_rejects_odd_and_zero_counts() {
        assert_eq!(build_deck(0, 1), Err(GameError::InvalidTileCount(0)));
        assert_eq!(build_deck(5, 1), Err(GameError::InvalidTileCount(5)));
        assert_eq!(build_deck(6, 1).unwrap().tile_count(), 6);
        assert_eq!(build_deck(2, 1).unwrap().tiles()[0].value, 1);
    }

    #[test]
    fn shuffle_spreads_arrangements_evenly() {
        // a 4-tile deck has 6 distinct arrangements of {1, 1, 2, 2}
        const TRIALS: u64 = 6000;
        let mut histogram: BTreeMap<Vec<PairValue>, u32> = BTreeMap::new();
        for seed in 0..TRIALS {
            let board = ShuffledDeckGenerator::new(seed).generate(BoardSize::Small);
            *histogram.entry(values(&board)).or_default() += 1;
        }

        assert_eq!(histogram.len(), 6);
        for (arrangement, count) in &histogram {
            assert!(
                (850..=1150).contains(count),
                "{arrangement:?} dealt {count} times out of {TRIALS}"
            );
        }
    }

    #[test]
    fn shuffle_does_not_favour_original_order() {
        const TRIALS: u64 = 4000;
        let pair_count = BoardSize::Medium.pair_count();
        let mut in_place = [0u32; 16];
        for seed in 0..TRIALS {
            let board = ShuffledDeckGenerator::new(seed).generate(BoardSize::Medium);
            for tile in board.tiles() {
                // unshuffled order is 1..=8 followed by 1..=8
                if tile.value == tile.id % pair_count + 1 {
                    in_place[usize::from(tile.id)] += 1;
                }
            }
        }

        // each position keeps its original value with probability 2/16
        for (position, &count) in in_place.iter().enumerate() {
            assert!(
                (380..=620).contains(&count),
                "position {position} kept its value {count} times out of {TRIALS}"
            );
        }
    }
}
