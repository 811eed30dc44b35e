//! Command-based control for physics gates.

use crate::types::TargetRate;

/// Actions for controlling a gate from a settings surface or chat command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateAction {
    /// Enable pacing.
    Enable,
    /// Disable pacing.
    Disable,
    /// Flip between enabled and disabled.
    Toggle,
    /// Change the physics step rate.
    SetTargetRate(TargetRate),
}
