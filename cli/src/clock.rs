use pairs_core::{Clock, Timestamp};
use web_time::{SystemTime, UNIX_EPOCH};

/// Reads the system wall clock.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct WallClock;

impl Clock for WallClock {
    fn now(&self) -> Timestamp {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|since| since.as_millis().try_into().unwrap_or(u64::MAX))
            .unwrap_or_default();
        Timestamp::from_millis(millis)
    }
}

/// Seed derived from the current time, used when none is given on the command line.
pub(crate) fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|since| since.as_nanos() as u64)
        .unwrap_or_default()
}
