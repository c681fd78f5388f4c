use crate::*;
pub use shuffled::*;

mod shuffled;

pub trait DeckGenerator {
    fn generate(self, size: BoardSize) -> Board;
}

/// Deals a board of `tile_count` tiles shuffled from `seed`.
///
/// Fails with [`GameError::InvalidTileCount`] when the count is zero or odd.
pub fn build_deck(tile_count: TileCount, seed: u64) -> Result<Board> {
    let tile_count = check_tile_count(usize::from(tile_count))?;
    Ok(ShuffledDeckGenerator::new(seed).deal(tile_count))
}
