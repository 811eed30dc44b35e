//! Configuration types and validation.

use core::num::NonZeroU64;

/// Default physics step rate in steps per second.
pub const DEFAULT_TARGET_RATE: u32 = 60;

/// Physics step rate in steps per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TargetRate(pub u32);

impl TargetRate {
    /// Steps per second.
    #[inline]
    pub fn steps_per_second(self) -> u32 {
        self.0
    }

    /// Derives the length of one step interval for a clock running at
    /// `ticks_per_second`.
    ///
    /// The result is `ticks_per_second / rate` rounded half-up to the nearest
    /// tick.
    ///
    /// # Errors
    /// * `ZeroRate` - the rate is zero
    /// * `RateExceedsClock` - the rate exceeds `ticks_per_second`, so a step
    ///   would be shorter than one tick
    pub fn slice_length(self, ticks_per_second: u64) -> Result<SliceLength, ConfigError> {
        if self.0 == 0 {
            return Err(ConfigError::ZeroRate);
        }

        let rate = u64::from(self.0);
        if rate > ticks_per_second {
            return Err(ConfigError::RateExceedsClock {
                rate: self.0,
                ticks_per_second,
            });
        }

        let whole = ticks_per_second / rate;
        let round_up = (ticks_per_second % rate) * 2 >= rate;
        let ticks = whole + u64::from(round_up);

        NonZeroU64::new(ticks)
            .map(SliceLength)
            .ok_or(ConfigError::RateExceedsClock {
                rate: self.0,
                ticks_per_second,
            })
    }
}

impl Default for TargetRate {
    fn default() -> Self {
        TargetRate(DEFAULT_TARGET_RATE)
    }
}

/// Duration of one scheduling window in clock ticks. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SliceLength(NonZeroU64);

#[cfg(feature = "defmt")]
impl defmt::Format for SliceLength {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} ticks", self.ticks())
    }
}

impl SliceLength {
    /// Creates a slice length, returning `None` for zero.
    #[inline]
    pub const fn new(ticks: u64) -> Option<Self> {
        match NonZeroU64::new(ticks) {
            Some(ticks) => Some(SliceLength(ticks)),
            None => None,
        }
    }

    /// Length in ticks.
    #[inline]
    pub const fn ticks(self) -> u64 {
        self.0.get()
    }
}

/// An address resolved by the external signature scanner.
///
/// The gate never dereferences or inspects it; it is only handed back to the
/// engine, typically as the neutral return value of a suppressed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResolvedAddress(pub usize);

/// Gate configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GateConfig {
    /// Physics steps per second.
    pub target_rate: TargetRate,

    /// Enable the gate as soon as it is constructed.
    pub enable_on_startup: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            target_rate: TargetRate::default(),
            enable_on_startup: true,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Target rate of zero steps per second.
    ZeroRate,

    /// Target rate exceeds the clock's ticks per second.
    RateExceedsClock {
        /// Requested steps per second
        rate: u32,
        /// Resolution of the clock in use
        ticks_per_second: u64,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroRate => {
                write!(f, "target rate must be at least one step per second")
            }
            ConfigError::RateExceedsClock {
                rate,
                ticks_per_second,
            } => {
                write!(
                    f,
                    "target rate of {} steps/s exceeds a clock of {} ticks/s",
                    rate, ticks_per_second
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
