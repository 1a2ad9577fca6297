use std::sync::atomic::{AtomicU64, Ordering};

static CLOCK: AtomicU64 = AtomicU64::new(0);

/// Monotonic modification stamp.
///
/// Stamps come from one process-wide counter, so stamps taken by different entities (a feature's
/// data, its build, its style) compare meaningfully. They carry no wall-clock meaning.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Stamp that precedes every stamp handed out by [`Timestamp::now`].
    pub const NEVER: Self = Self(0);

    /// Take a fresh stamp, strictly greater than every earlier one.
    pub fn now() -> Self {
        Self(CLOCK.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Move this stamp to "now".
    pub fn modified(&mut self) {
        *self = Self::now();
    }

    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// Return `true` for [`Timestamp::NEVER`].
    pub fn is_never(self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/time.rs"]
mod tests;
