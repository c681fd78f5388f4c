use core::ops::Sub;
use serde::{Deserialize, Serialize};

/// Position of a tile on the board, stable for the lifetime of a deal.
pub type TileId = u16;

/// Key shared by the two tiles of a pair, `1..=tile_count / 2`.
pub type PairValue = u16;

/// Count type used for board lengths and set sizes.
pub type TileCount = u16;

/// Number of completed two-tile comparisons.
pub type MoveCount = u32;

/// How long a mismatched pair stays face-up before it is hidden again.
pub const HIDE_DELAY_MS: u64 = 1000;

/// Milliseconds since the Unix epoch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    pub const fn saturating_add_millis(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

impl Sub for Timestamp {
    type Output = u64;

    /// Milliseconds between two instants, clamped at zero.
    fn sub(self, rhs: Self) -> Self::Output {
        self.0.saturating_sub(rhs.0)
    }
}

/// Identifies one deal. Deferred actions tagged with an older generation are ignored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u32);

impl Generation {
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
