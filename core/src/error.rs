use thiserror::Error;

use crate::TileCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Tile count {0} must be even and positive")]
    InvalidTileCount(TileCount),
    #[error("Tile count {0} is not a supported board size")]
    UnsupportedBoardSize(TileCount),
    #[error("Board of {0} tiles is larger than any tile id can address")]
    TooManyTiles(usize),
    #[error("Every pair value must appear on exactly two tiles")]
    InvalidPairing,
}

pub type Result<T> = core::result::Result<T, GameError>;
