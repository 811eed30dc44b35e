//! Clock abstraction for platform-agnostic tick counting.

/// Trait for abstracting monotonic tick counters.
///
/// Implement this for whatever clock the host exposes (a performance counter,
/// a hardware timer, the engine's frame clock). The gate queries `now` once per
/// frame tick and `ticks_per_second` whenever it derives a slice length.
pub trait TickSource {
    /// Returns the current tick count.
    ///
    /// Must be monotonically non-decreasing. A clock that jumps backwards is
    /// tolerated: no window rolls over until it catches up again.
    fn now(&self) -> u64;

    /// Number of ticks in one second for this clock.
    fn ticks_per_second(&self) -> u64;
}

#[cfg(feature = "std")]
pub use self::std_clock::StdTickSource;

#[cfg(feature = "std")]
mod std_clock {
    use super::TickSource;
    use std::time::Instant;

    /// Nanosecond tick source backed by [`std::time::Instant`].
    ///
    /// Ticks count from the moment the source was created.
    #[derive(Debug, Clone, Copy)]
    pub struct StdTickSource {
        origin: Instant,
    }

    impl StdTickSource {
        /// Nanoseconds per second.
        pub const TICKS_PER_SECOND: u64 = 1_000_000_000;

        /// Creates a tick source anchored at the current instant.
        pub fn new() -> Self {
            Self {
                origin: Instant::now(),
            }
        }
    }

    impl Default for StdTickSource {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TickSource for StdTickSource {
        fn now(&self) -> u64 {
            // Saturate rather than wrap after ~584 years of uptime.
            u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
        }

        fn ticks_per_second(&self) -> u64 {
            Self::TICKS_PER_SECOND
        }
    }

}
