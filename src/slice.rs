//! Fixed-interval scheduling windows.
//!
//! Provides [`TimeSlice`], a single window `[start, start + length)` on the
//! monotonic clock, and [`SliceAccumulator`], which owns the current window
//! and rolls it forward along a fixed-rate grid anchored at construction.

use crate::types::SliceLength;

/// Whether the current window still owes a physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindowState {
    /// No step attributed to this window yet.
    Pending,
    /// The window's step has been handed out.
    Consumed,
}

/// One fixed-duration scheduling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSlice {
    start_tick: u64,
    slice_length: SliceLength,
    ran_physics: bool,
}

impl TimeSlice {
    /// Creates a pending window opening at `start_tick`.
    #[inline]
    pub fn new(start_tick: u64, slice_length: SliceLength) -> Self {
        Self {
            start_tick,
            slice_length,
            ran_physics: false,
        }
    }

    /// Opening instant of the window.
    #[inline]
    pub fn start_tick(&self) -> u64 {
        self.start_tick
    }

    /// Exclusive upper bound of the window.
    ///
    /// Saturates at `u64::MAX`, where the window simply never closes.
    #[inline]
    pub fn end_tick(&self) -> u64 {
        self.start_tick.saturating_add(self.slice_length.ticks())
    }

    /// Length of the window.
    #[inline]
    pub fn slice_length(&self) -> SliceLength {
        self.slice_length
    }

    /// True once a physics step has been attributed to this window.
    #[inline]
    pub fn ran_physics(&self) -> bool {
        self.ran_physics
    }

    /// Pending/consumed view of the window.
    #[inline]
    pub fn state(&self) -> WindowState {
        if self.ran_physics {
            WindowState::Consumed
        } else {
            WindowState::Pending
        }
    }

    /// The window directly following this one.
    #[inline]
    fn next(&self, slice_length: SliceLength) -> Self {
        Self::new(self.end_tick(), slice_length)
    }
}

/// Owns the current [`TimeSlice`] and decides when a step is owed.
#[derive(Debug, Clone)]
pub struct SliceAccumulator {
    current: TimeSlice,
}

impl SliceAccumulator {
    /// Seeds the first window at `now`.
    pub fn new(now: u64, slice_length: SliceLength) -> Self {
        Self {
            current: TimeSlice::new(now, slice_length),
        }
    }

    /// Rolls the window forward until it contains `now`.
    ///
    /// Each elapsed window is consumed one at a time, chaining the new start
    /// from the previous end so boundaries stay on the grid. `slice_length`
    /// applies to every window opened by this call; the current window keeps
    /// its own length.
    ///
    /// # Returns
    /// The number of rollovers performed. Zero when `now` is still inside the
    /// current window or the clock went backwards.
    pub fn advance_to(&mut self, now: u64, slice_length: SliceLength) -> u64 {
        let mut rollovers = 0;

        while now > self.current.end_tick() {
            self.current = self.current.next(slice_length);
            rollovers += 1;
        }

        rollovers
    }

    /// Returns true exactly once per window.
    ///
    /// The first query in a pending window marks it consumed.
    pub fn is_step_due(&mut self) -> bool {
        if self.current.ran_physics {
            return false;
        }

        self.current.ran_physics = true;
        true
    }

    /// The current window.
    #[inline]
    pub fn current(&self) -> &TimeSlice {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len(ticks: u64) -> SliceLength {
        SliceLength::new(ticks).unwrap()
    }

    #[test]
    fn end_tick_is_derived_from_start_and_length() {
        let slice = TimeSlice::new(250, len(1000));
        assert_eq!(slice.end_tick(), 1250);
        assert_eq!(slice.state(), WindowState::Pending);
    }

    #[test]
    fn end_tick_saturates() {
        let slice = TimeSlice::new(u64::MAX - 10, len(1000));
        assert_eq!(slice.end_tick(), u64::MAX);
    }

    #[test]
    fn step_is_due_once_per_window() {
        let mut acc = SliceAccumulator::new(0, len(1000));

        assert!(acc.is_step_due());
        assert_eq!(acc.current().state(), WindowState::Consumed);
        assert!(!acc.is_step_due());
        assert!(!acc.is_step_due());
    }

    #[test]
    fn now_on_end_tick_stays_in_window() {
        let mut acc = SliceAccumulator::new(0, len(1000));

        // The loop condition is strictly greater-than.
        assert_eq!(acc.advance_to(1000, len(1000)), 0);
        assert_eq!(acc.current().start_tick(), 0);

        assert_eq!(acc.advance_to(1001, len(1000)), 1);
        assert_eq!(acc.current().start_tick(), 1000);
    }

    #[test]
    fn rollover_resets_consumed_window() {
        let mut acc = SliceAccumulator::new(0, len(1000));
        assert!(acc.is_step_due());

        acc.advance_to(1500, len(1000));
        assert!(!acc.current().ran_physics());
        assert!(acc.is_step_due());
    }

    #[test]
    fn catch_up_consumes_every_elapsed_window() {
        let mut acc = SliceAccumulator::new(0, len(1000));

        let rollovers = acc.advance_to(5500, len(1000));

        assert_eq!(rollovers, 5);
        assert_eq!(acc.current().start_tick(), 5000);
        assert_eq!(acc.current().end_tick(), 6000);
    }

    #[test]
    fn backwards_clock_keeps_current_window() {
        let mut acc = SliceAccumulator::new(10_000, len(1000));
        assert!(acc.is_step_due());

        assert_eq!(acc.advance_to(3_000, len(1000)), 0);
        assert_eq!(acc.current().start_tick(), 10_000);
        assert!(!acc.is_step_due());
    }

    #[test]
    fn new_length_applies_to_future_windows_only() {
        let mut acc = SliceAccumulator::new(0, len(1000));

        acc.advance_to(500, len(2000));
        assert_eq!(acc.current().end_tick(), 1000);

        acc.advance_to(1200, len(2000));
        assert_eq!(acc.current().start_tick(), 1000);
        assert_eq!(acc.current().end_tick(), 3000);
    }
}
