use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayPhase {
    #[default]
    Ready,
    Active,
    Complete,
}

impl PlayPhase {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Where the flip/match cycle currently stands.
///
/// Comparison happens synchronously on the second reveal, so the only
/// observable states are how many tiles wait face-up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipState {
    Idle,
    OneRevealed,
    AwaitingHide,
}

/// Deferred hide of a mismatched pair, tagged with the deal it belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingHide {
    pub generation: Generation,
    pub due_at: Timestamp,
}

impl PendingHide {
    pub fn is_due(&self, now: Timestamp) -> bool {
        now >= self.due_at
    }
}

type RevealSet = SmallVec<[TileId; 2]>;

#[derive(Clone, Debug, PartialEq)]
pub struct PlayEngine {
    board: Board,
    revealed: RevealSet,
    matched: BTreeSet<TileId>,
    move_count: MoveCount,
    clock: SessionClock,
    phase: PlayPhase,
    generation: Generation,
    pending_hide: Option<PendingHide>,
}

impl PlayEngine {
    pub fn new(board: Board) -> Self {
        log::debug!("New engine with {} tiles", board.len());
        Self {
            board,
            revealed: SmallVec::new(),
            matched: BTreeSet::new(),
            move_count: 0,
            clock: SessionClock::default(),
            phase: PlayPhase::default(),
            generation: Generation::default(),
            pending_hide: None,
        }
    }

    /// Replaces the board and every counter at once, starting a new generation.
    pub fn deal(&mut self, board: Board) {
        let generation = self.generation.next();
        *self = Self {
            generation,
            ..Self::new(board)
        };
        log::debug!("Dealt generation {:?}", generation);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tile_count(&self) -> TileCount {
        self.board.tile_count()
    }

    pub fn revealed_ids(&self) -> &[TileId] {
        &self.revealed
    }

    pub fn matched_ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.matched.iter().copied()
    }

    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    pub fn move_count(&self) -> MoveCount {
        self.move_count
    }

    pub fn session_clock(&self) -> SessionClock {
        self.clock
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed_secs()
    }

    pub fn phase(&self) -> PlayPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_complete()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn pending_hide(&self) -> Option<PendingHide> {
        self.pending_hide
    }

    pub fn flip_state(&self) -> FlipState {
        match self.revealed.len() {
            0 => FlipState::Idle,
            1 => FlipState::OneRevealed,
            _ => FlipState::AwaitingHide,
        }
    }

    /// Whether revealing `id` would be accepted right now.
    pub fn can_reveal(&self, id: TileId) -> bool {
        match self.board.get(id) {
            Some(tile) => self.revealed.len() < 2 && !tile.is_face_up(),
            None => false,
        }
    }

    /// Turns a tile face-up and resolves the pair once two are showing.
    ///
    /// A mismatch leaves both tiles in the reveal set until the returned
    /// [`PendingHide`] is applied with [`Self::hide_pending`] or [`Self::poll`].
    pub fn reveal_tile(&mut self, id: TileId, now: Timestamp) -> RevealOutcome {
        if !self.can_reveal(id) {
            log::trace!(
                "Ignored reveal of {} ({:?}, {} tiles)",
                id,
                self.flip_state(),
                self.board.len()
            );
            return RevealOutcome::Ignored;
        }

        self.mark_started(now);
        self.board.tile_mut(id).revealed = true;
        self.revealed.push(id);
        log::trace!("Revealed tile {}", id);

        match *self.revealed.as_slice() {
            [first, second] => self.resolve_pair(first, second, now),
            _ => RevealOutcome::Revealed,
        }
    }

    fn resolve_pair(&mut self, first: TileId, second: TileId, now: Timestamp) -> RevealOutcome {
        self.move_count += 1;

        if self.board[first].value != self.board[second].value {
            let pending = PendingHide {
                generation: self.generation,
                due_at: now.saturating_add_millis(HIDE_DELAY_MS),
            };
            self.pending_hide = Some(pending);
            log::debug!(
                "Mismatch {} / {}, hiding at {:?}",
                first,
                second,
                pending.due_at
            );
            return RevealOutcome::Mismatch(pending);
        }

        for id in [first, second] {
            let tile = self.board.tile_mut(id);
            tile.revealed = false;
            tile.matched = true;
            self.matched.insert(id);
        }
        self.revealed.clear();
        log::debug!(
            "Matched {} / {} ({} of {} tiles)",
            first,
            second,
            self.matched.len(),
            self.board.len()
        );

        // the pair just added counts towards completion
        if self.matched.len() == self.board.len() {
            self.mark_complete(now);
            RevealOutcome::Completed
        } else {
            RevealOutcome::Matched
        }
    }

    /// Hides a mismatched pair. Tokens from an earlier deal are ignored.
    pub fn hide_pending(&mut self, token: PendingHide) -> HideOutcome {
        if token.generation != self.generation || self.pending_hide.is_none() {
            log::trace!(
                "Stale hide for {:?}, current {:?}",
                token.generation,
                self.generation
            );
            return HideOutcome::Stale;
        }

        for &id in &self.revealed {
            self.board.tile_mut(id).revealed = false;
        }
        self.revealed.clear();
        self.pending_hide = None;
        HideOutcome::Hidden
    }

    /// Applies the pending hide once its deadline has passed.
    pub fn poll(&mut self, now: Timestamp) -> HideOutcome {
        match self.pending_hide {
            Some(pending) if pending.is_due(now) => self.hide_pending(pending),
            Some(_) => HideOutcome::NotDue,
            None => HideOutcome::Stale,
        }
    }

    fn mark_started(&mut self, now: Timestamp) {
        if self.phase.is_ready() {
            self.phase = PlayPhase::Active;
            self.clock.mark_started(now);
        }
    }

    fn mark_complete(&mut self, now: Timestamp) {
        self.phase = PlayPhase::Complete;
        self.clock.mark_finished(now);
        log::debug!(
            "Board complete in {} moves, {}s",
            self.move_count,
            self.clock.elapsed_secs()
        );
    }
}
