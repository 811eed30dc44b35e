#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`TimeSlice`**: One fixed-duration window `[start, start + length)` on the monotonic clock
//! - **`SliceAccumulator`**: Owns the current window and rolls it forward on a drift-free grid
//! - **`PhysicsGate`**: Turns frame ticks into run/skip decisions for the intercepted call
//! - **`HostHooks`**: Trait to implement for your hooking layer (frame subscription + detour)
//! - **`TickSource`**: Trait to implement for your clock
//! - **`GateConfig`**: Target step rate and startup behavior
//! - **`GateAction`**: Commands that can be sent to control a gate
//!
//! Ticks are plain `u64` counts. The step interval is derived from the clock's
//! `ticks_per_second` and the target rate, rounded to the nearest tick.

#[macro_use]
mod fmt;

pub mod time;
pub mod types;
pub mod slice;
pub mod gate;
pub mod command;

pub use command::GateAction;
pub use gate::{GateError, GateState, HostHooks, PhysicsGate};
pub use slice::{SliceAccumulator, TimeSlice, WindowState};
#[cfg(feature = "std")]
pub use time::StdTickSource;
pub use time::TickSource;
pub use types::{
    ConfigError, DEFAULT_TARGET_RATE, GateConfig, ResolvedAddress, SliceLength, TargetRate,
};
