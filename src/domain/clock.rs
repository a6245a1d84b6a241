// Injectable time source for auto-stamped points and event timestamps

/// Source of "now" in epoch seconds.
///
/// The domain objects capture the current time when a point is added
/// without an explicit timestamp and when an event is constructed.
/// Injecting the clock keeps those paths deterministic in tests.
pub trait Clock: Send + Sync {
    fn epoch_seconds(&self) -> i64;
}

/// Wall clock, used by all the convenience constructors.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_seconds(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn epoch_seconds(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_pinned_instant() {
        let clock = FixedClock(1234567);
        assert_eq!(clock.epoch_seconds(), 1234567);
        assert_eq!(clock.epoch_seconds(), 1234567);
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let a = SystemClock.epoch_seconds();
        let b = SystemClock.epoch_seconds();
        assert!(b >= a);
    }
}
