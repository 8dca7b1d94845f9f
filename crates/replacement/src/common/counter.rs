//! Saturating Counter.
//!
//! Every learned quantity in the engine (Hawkeye's PC counters, SHiP's SHCT,
//! the dueling PSEL) is an unsigned counter clamped to `[0, max]`. Reaching a
//! bound is the defined behavior, not an error: further steps in the same
//! direction leave the value unchanged.

/// Unsigned counter that saturates at `0` and at `max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SaturatingCounter {
    value: u16,
    max: u16,
}

impl SaturatingCounter {
    /// Creates a counter at zero.
    pub const fn new(max: u16) -> Self {
        Self { value: 0, max }
    }

    /// Creates a counter at its midpoint, `(max + 1) / 2`.
    pub const fn at_midpoint(max: u16) -> Self {
        Self {
            value: Self::midpoint_of(max),
            max,
        }
    }

    /// Creates a counter at `value`, clamped to `max`.
    pub const fn with_value(max: u16, value: u16) -> Self {
        Self {
            value: if value > max { max } else { value },
            max,
        }
    }

    /// Midpoint used for initialisation and for the "friendly" threshold.
    #[inline(always)]
    const fn midpoint_of(max: u16) -> u16 {
        ((max as u32 + 1) / 2) as u16
    }

    /// Current value.
    #[inline(always)]
    pub const fn value(&self) -> u16 {
        self.value
    }

    /// Upper saturation bound.
    #[inline(always)]
    pub const fn max(&self) -> u16 {
        self.max
    }

    /// `(max + 1) / 2`.
    #[inline(always)]
    pub const fn midpoint(&self) -> u16 {
        Self::midpoint_of(self.max)
    }

    /// Steps toward `max`; no-op when saturated.
    #[inline(always)]
    pub const fn increment(&mut self) {
        if self.value < self.max {
            self.value += 1;
        }
    }

    /// Steps toward `0`; no-op when saturated.
    #[inline(always)]
    pub const fn decrement(&mut self) {
        if self.value > 0 {
            self.value -= 1;
        }
    }

    /// Returns `true` when the counter is at or above its midpoint.
    #[inline(always)]
    pub const fn is_at_least_midpoint(&self) -> bool {
        self.value >= self.midpoint()
    }

    /// Returns `true` when the counter sits at `max`.
    #[inline(always)]
    pub const fn is_saturated_high(&self) -> bool {
        self.value == self.max
    }

    /// Returns `true` when the counter sits at `0`.
    #[inline(always)]
    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Moves the counter back to its midpoint.
    pub const fn reset_to_midpoint(&mut self) {
        self.value = self.midpoint();
    }
}
