use serde::{Deserialize, Serialize};

use crate::{PairValue, TileId};

/// One face-down/face-up unit of the board.
///
/// `revealed` is set while the tile waits in the reveal set for comparison,
/// `matched` once its pair has been found. The two are never both set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub value: PairValue,
    pub revealed: bool,
    pub matched: bool,
}

impl Tile {
    pub const fn new(id: TileId, value: PairValue) -> Self {
        Self {
            id,
            value,
            revealed: false,
            matched: false,
        }
    }

    /// Whether a presentation layer should show the value.
    pub const fn is_face_up(self) -> bool {
        self.revealed || self.matched
    }
}
