//! Shared test infrastructure for physics-pacer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use physics_pacer::{GateConfig, HostHooks, PhysicsGate, ResolvedAddress, TargetRate, TickSource};

// ============================================================================
// Mock Clock
// ============================================================================

/// Mock tick source with controllable time
pub struct MockClock {
    now: Cell<u64>,
    ticks_per_second: u64,
}

impl MockClock {
    /// Clock where 60 Hz maps to exactly 1000 ticks per step
    pub fn new() -> Self {
        Self::with_resolution(60_000)
    }

    pub fn with_resolution(ticks_per_second: u64) -> Self {
        Self {
            now: Cell::new(0),
            ticks_per_second,
        }
    }

    /// Advance time by the given number of ticks
    pub fn advance(&self, ticks: u64) {
        self.now.set(self.now.get() + ticks);
    }

    pub fn set_time(&self, now: u64) {
        self.now.set(now);
    }
}

impl TickSource for MockClock {
    fn now(&self) -> u64 {
        self.now.get()
    }

    fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }
}

// ============================================================================
// Mock Hooks
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    Attach,
    Detach,
}

/// Mock hooking layer that records lifecycle calls into a shared log
pub struct MockHooks<'a> {
    log: &'a HookLog,
}

impl<'a> MockHooks<'a> {
    pub fn new(log: &'a HookLog) -> Self {
        Self { log }
    }
}

impl HostHooks for MockHooks<'_> {
    fn attach(&mut self) {
        self.log.push(HookEvent::Attach);
    }

    fn detach(&mut self) {
        self.log.push(HookEvent::Detach);
    }
}

/// Event log outliving the gate, so drop behavior can be observed
pub struct HookLog {
    events: core::cell::RefCell<heapless::Vec<HookEvent, 32>>,
}

impl HookLog {
    pub fn new() -> Self {
        Self {
            events: core::cell::RefCell::new(heapless::Vec::new()),
        }
    }

    fn push(&self, event: HookEvent) {
        let _ = self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> heapless::Vec<HookEvent, 32> {
        self.events.borrow().clone()
    }

    pub fn is_attached(&self) -> bool {
        self.events.borrow().last() == Some(&HookEvent::Attach)
    }
}

// ============================================================================
// Mock Original Function
// ============================================================================

/// Stand-in for the detour's original function that counts invocations
pub struct OriginalFn {
    calls: Cell<u32>,
    result: ResolvedAddress,
}

impl OriginalFn {
    pub fn new(result: ResolvedAddress) -> Self {
        Self {
            calls: Cell::new(0),
            result,
        }
    }

    pub fn call(&self) -> ResolvedAddress {
        self.calls.set(self.calls.get() + 1);
        self.result
    }

    pub fn calls(&self) -> u32 {
        self.calls.get()
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Framework instance address handed back for suppressed calls
pub const FRAMEWORK: ResolvedAddress = ResolvedAddress(0x1_4000_0000);

/// Address the real bone simulator update returns
pub const SIMULATED: ResolvedAddress = ResolvedAddress(0x2_0000_1000);

pub fn config(rate: u32, enable_on_startup: bool) -> GateConfig {
    GateConfig {
        target_rate: TargetRate(rate),
        enable_on_startup,
    }
}

/// Gate over the mock clock and hooks that hands back `FRAMEWORK` when suppressing
pub fn gate<'a>(
    log: &'a HookLog,
    clock: &'a MockClock,
    config: GateConfig,
) -> PhysicsGate<'a, MockClock, MockHooks<'a>, ResolvedAddress> {
    PhysicsGate::new(MockHooks::new(log), clock, config, FRAMEWORK).unwrap()
}
