#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use state::*;
pub use tile::*;
pub use types::*;

mod clock;
mod engine;
mod error;
mod generator;
mod session;
mod state;
mod tile;
mod types;

/// Supported board sizes, cycled through in declaration order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl BoardSize {
    pub const ALL: [BoardSize; 3] = [BoardSize::Small, BoardSize::Medium, BoardSize::Large];

    pub const fn tile_count(self) -> TileCount {
        match self {
            Self::Small => 4,
            Self::Medium => 16,
            Self::Large => 32,
        }
    }

    pub const fn pair_count(self) -> TileCount {
        self.tile_count() / 2
    }

    /// Grid columns a presentation layer lays the board out in.
    pub const fn columns(self) -> TileCount {
        match self {
            Self::Small => 2,
            Self::Medium => 4,
            Self::Large => 8,
        }
    }

    /// The following size in the cycle, wrapping back to the smallest.
    pub const fn next(self) -> Self {
        match self {
            Self::Small => Self::Medium,
            Self::Medium => Self::Large,
            Self::Large => Self::Small,
        }
    }
}

impl TryFrom<TileCount> for BoardSize {
    type Error = GameError;

    fn try_from(tile_count: TileCount) -> Result<Self> {
        BoardSize::ALL
            .into_iter()
            .find(|size| size.tile_count() == tile_count)
            .ok_or(GameError::UnsupportedBoardSize(tile_count))
    }
}

/// Ordered tiles of one deal. Replaced wholesale on every deal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// Builds a board from pair values in position order, so `values[i]` lands on tile `i`.
    ///
    /// Each value in `1..=values.len() / 2` has to appear exactly twice.
    pub fn from_values(values: &[PairValue]) -> Result<Self> {
        let tile_count = check_tile_count(values.len())?;

        let pair_count = usize::from(tile_count / 2);
        let mut seen = alloc::vec![0u8; pair_count];
        for &value in values {
            let slot = usize::from(value)
                .checked_sub(1)
                .and_then(|index| seen.get_mut(index))
                .ok_or(GameError::InvalidPairing)?;
            *slot += 1;
        }
        if seen.iter().any(|&count| count != 2) {
            return Err(GameError::InvalidPairing);
        }

        Ok(Self::from_values_unchecked(values))
    }

    pub(crate) fn from_values_unchecked(values: &[PairValue]) -> Self {
        let tiles = values
            .iter()
            .zip(0..)
            .map(|(&value, id)| Tile::new(id, value))
            .collect();
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile_count(&self) -> TileCount {
        // lengths are validated against TileCount when the board is built
        self.tiles.len() as TileCount
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(usize::from(id))
    }

    /// The other tile carrying the same pair value.
    pub fn partner_of(&self, id: TileId) -> Option<TileId> {
        let value = self.get(id)?.value;
        self.tiles
            .iter()
            .find(|tile| tile.value == value && tile.id != id)
            .map(|tile| tile.id)
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[usize::from(id)]
    }
}

impl Index<TileId> for Board {
    type Output = Tile;

    fn index(&self, id: TileId) -> &Self::Output {
        &self.tiles[usize::from(id)]
    }
}

/// Validates a requested tile count: even, positive and representable.
pub(crate) fn check_tile_count(len: usize) -> Result<TileCount> {
    let tile_count = TileCount::try_from(len).map_err(|_| GameError::TooManyTiles(len))?;
    if tile_count == 0 || tile_count % 2 != 0 {
        return Err(GameError::InvalidTileCount(tile_count));
    }
    Ok(tile_count)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Out of range, already face-up, or two tiles are still waiting to be hidden.
    Ignored,
    /// First tile of a pair turned over.
    Revealed,
    Matched,
    /// The two tiles differ and stay face-up until the hide is applied.
    Mismatch(PendingHide),
    /// The last pair was matched.
    Completed,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            Ignored => false,
            Revealed => true,
            Matched => true,
            Mismatch(_) => true,
            Completed => true,
        }
    }

    pub const fn pending_hide(self) -> Option<PendingHide> {
        match self {
            Self::Mismatch(pending) => Some(pending),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HideOutcome {
    Hidden,
    /// A hide is pending but its deadline has not passed yet.
    NotDue,
    /// Nothing to hide for this generation.
    Stale,
}

impl HideOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Hidden)
    }
}
