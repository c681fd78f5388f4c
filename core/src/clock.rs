use alloc::rc::Rc;
use core::cell::Cell;
use serde::{Deserialize, Serialize};

use crate::*;

/// Source of wall-clock time for a [`Session`].
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Rc::new(Cell::new(start.as_millis())),
        }
    }

    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get().saturating_add(millis));
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now.as_millis());
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.now.get())
    }
}

/// Start of the first accepted reveal and the instant the last pair was matched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClock {
    pub started_at: Option<Timestamp>,
    pub finished_at: Option<Timestamp>,
}

impl SessionClock {
    pub const fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Whole seconds between start and finish, 0 until both are known.
    pub fn elapsed_secs(&self) -> u64 {
        match (self.started_at, self.finished_at) {
            (Some(started_at), Some(finished_at)) => (finished_at - started_at) / 1000,
            _ => 0,
        }
    }

    pub(crate) fn mark_started(&mut self, now: Timestamp) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub(crate) fn mark_finished(&mut self, now: Timestamp) {
        if self.finished_at.is_none() {
            self.finished_at = Some(now);
        }
    }
}
