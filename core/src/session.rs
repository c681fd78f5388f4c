use rand::prelude::*;

use crate::*;

/// Owns one engine together with its board size, clock and seed stream.
///
/// All state lives in this single value; callers drive it one event at a
/// time and receive a fresh [`EngineState`] after each.
#[derive(Debug)]
pub struct Session<C> {
    engine: PlayEngine,
    size: BoardSize,
    seeds: SmallRng,
    clock: C,
}

impl<C: Clock> Session<C> {
    pub fn initialize(size: BoardSize, seed: u64, clock: C) -> Self {
        let mut seeds = SmallRng::seed_from_u64(seed);
        let board = ShuffledDeckGenerator::new(seeds.random()).generate(size);
        log::debug!("Session started with {:?} board, seed {}", size, seed);
        Self {
            engine: PlayEngine::new(board),
            size,
            seeds,
            clock,
        }
    }

    pub fn state(&self) -> EngineState {
        EngineState::from_engine(&self.engine)
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn board_size(&self) -> BoardSize {
        self.size
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The mismatch hide a driver has to schedule, if any.
    pub fn pending_hide(&self) -> Option<PendingHide> {
        self.engine.pending_hide()
    }

    pub fn reveal_tile(&mut self, id: TileId) -> EngineState {
        self.reveal_tile_outcome(id);
        self.state()
    }

    pub fn reveal_tile_outcome(&mut self, id: TileId) -> RevealOutcome {
        let now = self.clock.now();
        self.engine.reveal_tile(id, now)
    }

    /// Re-deals the current board size.
    pub fn reset(&mut self) -> EngineState {
        self.redeal();
        self.state()
    }

    /// Advances to the next board size and deals it.
    pub fn cycle_board_size(&mut self) -> EngineState {
        self.size = self.size.next();
        log::debug!("Board size changed to {:?}", self.size);
        self.redeal();
        self.state()
    }

    pub fn hide_pending(&mut self, token: PendingHide) -> HideOutcome {
        self.engine.hide_pending(token)
    }

    /// Applies a pending hide whose deadline has passed on this session's clock.
    pub fn poll(&mut self) -> HideOutcome {
        let now = self.clock.now();
        self.engine.poll(now)
    }

    fn redeal(&mut self) {
        let board = ShuffledDeckGenerator::new(self.seeds.random()).generate(self.size);
        self.engine.deal(board);
    }
}
