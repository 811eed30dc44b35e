//! Physics gate with enable/disable state and per-frame step decisions.
//!
//! Provides [`PhysicsGate`], which sits between the host's frame notification
//! and the intercepted physics update. Each frame tick advances the slice
//! accumulator and records whether the next intercepted call may run. Also
//! defines the [`HostHooks`] trait for the external hook lifecycle.

use crate::command::GateAction;
use crate::slice::{SliceAccumulator, TimeSlice};
use crate::time::TickSource;
use crate::types::{ConfigError, GateConfig, SliceLength, TargetRate};

/// Trait for the external hooking layer.
///
/// Implement this to subscribe the frame-tick handler and activate the native
/// call hook (`attach`), and to undo both (`detach`). The gate calls each
/// exactly once per state transition.
pub trait HostHooks {
    /// Subscribes to frame ticks and activates the call interception.
    fn attach(&mut self);

    /// Unsubscribes from frame ticks and deactivates the call interception.
    fn detach(&mut self);
}

/// The current state of a physics gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateState {
    /// Hooks detached. The accumulator is not advanced.
    Disabled,
    /// Hooks attached. Frame ticks decide whether physics runs.
    Enabled,
}

/// Errors that can occur during gate operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateError {
    /// Operation called from an invalid state.
    InvalidState {
        /// Human-readable description of the expected state, e.g. "Enabled"
        expected: &'static str,
        /// The actual current state
        actual: GateState,
    },
    /// Configuration was rejected.
    Config(ConfigError),
}

impl core::fmt::Display for GateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GateError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {}, but gate is {:?}",
                    expected, actual
                )
            }
            GateError::Config(err) => {
                write!(f, "configuration error: {}", err)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GateError {}

impl From<ConfigError> for GateError {
    fn from(err: ConfigError) -> Self {
        GateError::Config(err)
    }
}

/// Paces an intercepted physics call to a fixed step rate.
///
/// Frame ticks arrive at the host's rate; the gate lets at most one
/// intercepted call per scheduling window run through to the original
/// function and answers every other call with the neutral value.
///
/// Both handlers must run on the same thread; the gate holds no locks.
///
/// # Type Parameters
/// * `'t` - Lifetime of the tick source reference
/// * `T` - Tick source implementation type
/// * `H` - Hook lifecycle implementation type
/// * `R` - Return type of the intercepted function
pub struct PhysicsGate<'t, T: TickSource, H: HostHooks, R: Copy> {
    hooks: H,
    clock: &'t T,
    state: GateState,
    accumulator: SliceAccumulator,
    target_rate: TargetRate,
    slice_length: SliceLength,
    execute_physics: bool,
    neutral: R,
}

impl<'t, T: TickSource, H: HostHooks, R: Copy> PhysicsGate<'t, T, H, R> {
    /// Creates a gate with its first window opening now.
    ///
    /// `neutral` is returned in place of suppressed calls. It must be a value
    /// the engine treats as "nothing to do" for the intercepted function; for
    /// the bone simulator update this is the framework instance address, not
    /// null.
    ///
    /// Attaches the hooks immediately when `config.enable_on_startup` is set.
    ///
    /// # Errors
    /// The target rate cannot be represented on `clock`.
    pub fn new(
        hooks: H,
        clock: &'t T,
        config: GateConfig,
        neutral: R,
    ) -> Result<Self, ConfigError> {
        let slice_length = config.target_rate.slice_length(clock.ticks_per_second())?;

        let mut gate = Self {
            hooks,
            clock,
            state: GateState::Disabled,
            accumulator: SliceAccumulator::new(clock.now(), slice_length),
            target_rate: config.target_rate,
            slice_length,
            execute_physics: false,
            neutral,
        };

        if config.enable_on_startup {
            gate.attach();
        }

        Ok(gate)
    }

    /// Handles a gate action by dispatching to the appropriate method.
    ///
    /// # Returns
    /// * `Ok(GateState)` - State after the action
    /// * `Err` - Invalid transition or rejected rate
    pub fn handle_action(&mut self, action: GateAction) -> Result<GateState, GateError> {
        match action {
            GateAction::Enable => self.enable()?,
            GateAction::Disable => self.disable()?,
            GateAction::Toggle => {
                self.toggle();
            }
            GateAction::SetTargetRate(rate) => self.set_target_rate(rate)?,
        }

        Ok(self.state)
    }

    /// Attaches the hooks and starts gating.
    ///
    /// Must be called from `Disabled` state. The accumulator is not reseeded:
    /// windows that elapsed while disabled are consumed on the next tick.
    pub fn enable(&mut self) -> Result<(), GateError> {
        if self.state != GateState::Disabled {
            return Err(GateError::InvalidState {
                expected: "Disabled",
                actual: self.state,
            });
        }

        self.attach();
        Ok(())
    }

    /// Detaches the hooks and stops gating.
    ///
    /// Must be called from `Enabled` state. The last decision is kept but is
    /// not consulted until the gate is enabled again.
    pub fn disable(&mut self) -> Result<(), GateError> {
        if self.state != GateState::Enabled {
            return Err(GateError::InvalidState {
                expected: "Enabled",
                actual: self.state,
            });
        }

        self.detach();
        Ok(())
    }

    /// Flips between `Enabled` and `Disabled`, returning the new state.
    pub fn toggle(&mut self) -> GateState {
        match self.state {
            GateState::Enabled => self.detach(),
            GateState::Disabled => self.attach(),
        }
        self.state
    }

    /// Changes the physics step rate.
    ///
    /// The current window keeps its length; the new length applies from the
    /// next rollover. Can be called in any state.
    pub fn set_target_rate(&mut self, rate: TargetRate) -> Result<(), ConfigError> {
        let slice_length = rate.slice_length(self.clock.ticks_per_second())?;

        debug!(
            "physics rate set to {} steps/s ({} ticks per step)",
            rate.steps_per_second(),
            slice_length.ticks()
        );

        self.target_rate = rate;
        self.slice_length = slice_length;
        Ok(())
    }

    /// Frame-tick handler.
    ///
    /// Advances the accumulator to `now` and decides whether the intercepted
    /// call may run until the next tick. Must be called from `Enabled` state.
    ///
    /// # Returns
    /// * `Ok(true)` - A step is due; the next intercepted call passes through
    /// * `Ok(false)` - This window's step was already taken
    /// * `Err` - Invalid state
    pub fn on_frame_tick(&mut self, now: u64) -> Result<bool, GateError> {
        if self.state != GateState::Enabled {
            return Err(GateError::InvalidState {
                expected: "Enabled",
                actual: self.state,
            });
        }

        let rollovers = self.accumulator.advance_to(now, self.slice_length);
        if rollovers > 1 {
            trace!("caught up {} physics windows", rollovers);
        }

        self.execute_physics = self.accumulator.is_step_due();
        Ok(self.execute_physics)
    }

    /// Frame-tick handler reading the current time from the tick source.
    pub fn tick(&mut self) -> Result<bool, GateError> {
        self.on_frame_tick(self.clock.now())
    }

    /// Interception handler.
    ///
    /// Invokes `original` and returns its result when the last frame tick
    /// granted a step; otherwise returns the neutral value without invoking it.
    ///
    /// # Panics
    /// If the gate is disabled. The hooking layer must not route calls here
    /// while detached.
    pub fn on_intercepted_call<F>(&self, original: F) -> R
    where
        F: FnOnce() -> R,
    {
        assert!(
            self.state == GateState::Enabled,
            "intercepted physics call reached a disabled gate"
        );

        if self.execute_physics {
            original()
        } else {
            self.neutral
        }
    }

    /// Returns the current state of the gate.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Returns true if the hooks are attached.
    pub fn is_enabled(&self) -> bool {
        self.state == GateState::Enabled
    }

    /// Returns the decision made by the last frame tick.
    pub fn should_execute(&self) -> bool {
        self.execute_physics
    }

    /// Returns the configured step rate.
    pub fn target_rate(&self) -> TargetRate {
        self.target_rate
    }

    /// Returns the slice length used for the next rollover.
    pub fn slice_length(&self) -> SliceLength {
        self.slice_length
    }

    /// Returns the current scheduling window.
    pub fn current_slice(&self) -> &TimeSlice {
        self.accumulator.current()
    }

    /// Returns the value handed back for suppressed calls.
    pub fn neutral(&self) -> R {
        self.neutral
    }

    fn attach(&mut self) {
        info!("Enabling physics modification");
        self.hooks.attach();
        self.state = GateState::Enabled;
    }

    fn detach(&mut self) {
        info!("Disabling physics modification");
        self.hooks.detach();
        self.state = GateState::Disabled;
    }
}

impl<'t, T: TickSource, H: HostHooks, R: Copy> Drop for PhysicsGate<'t, T, H, R> {
    fn drop(&mut self) {
        if self.state == GateState::Enabled {
            self.hooks.detach();
        }
    }
}
