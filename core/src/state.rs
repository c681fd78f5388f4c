use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub board: Vec<Tile>,
    pub revealed_ids: Vec<TileId>,
    pub matched_ids: Vec<TileId>,
    pub move_count: MoveCount,
    pub elapsed_seconds: u64,
    pub is_complete: bool,
    pub tile_count: TileCount,
    pub phase: PlayPhase,
    pub generation: Generation,
}

impl EngineState {
    pub fn from_engine(engine: &PlayEngine) -> Self {
        Self {
            board: engine.board().tiles().to_vec(),
            revealed_ids: engine.revealed_ids().to_vec(),
            matched_ids: engine.matched_ids().collect(),
            move_count: engine.move_count(),
            elapsed_seconds: engine.elapsed_secs(),
            is_complete: engine.is_complete(),
            tile_count: engine.tile_count(),
            phase: engine.phase(),
            generation: engine.generation(),
        }
    }

    pub fn is_face_up(&self, id: TileId) -> bool {
        self.board
            .get(usize::from(id))
            .is_some_and(|tile| tile.is_face_up())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_engine_maps_reveal_and_match_sets() {
        let mut engine = PlayEngine::new(Board::from_values(&[1, 2, 2, 1, 3, 3]).unwrap());
        engine.reveal_tile(1, Timestamp(0));
        engine.reveal_tile(2, Timestamp(0));
        engine.reveal_tile(4, Timestamp(0));

        let state = EngineState::from_engine(&engine);

        assert_eq!(state.tile_count, 6);
        assert_eq!(state.revealed_ids, [4]);
        assert_eq!(state.matched_ids, [1, 2]);
        assert_eq!(state.move_count, 1);
        assert!(!state.is_complete);
        assert!(state.is_face_up(1) && state.is_face_up(4));
        assert!(!state.is_face_up(0));
        assert!(!state.is_face_up(40));
    }

    #[test]
    fn serializes_for_presentation() {
        let engine = PlayEngine::new(Board::from_values(&[1, 1]).unwrap());
        let state = EngineState::from_engine(&engine);

        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["tile_count"], 2);
        assert_eq!(json["is_complete"], false);
        assert_eq!(json["phase"], "Ready");
        assert_eq!(json["board"][1]["value"], 1);
        assert_eq!(serde_json::from_value::<EngineState>(json).unwrap(), state);
    }
}
