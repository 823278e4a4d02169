// Copyright 2025 the Groove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction configuration for a range control.

use groove_track::{Direction, Orientation};
use thiserror::Error;

use crate::control::ChangeEvent;

/// Change hook invoked for every accepted mutation, in addition to the
/// event being returned from the mutating call.
pub type OnChange<T> = fn(&ChangeEvent<T>);

/// A configuration the control refuses to be built from.
///
/// Validation happens eagerly in [`crate::RangeControl::new`]; a degenerate
/// configuration never produces a half-working control.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// `min` exceeds `max`.
    #[error("min {min} exceeds max {max}")]
    MinAboveMax {
        /// The configured lower bound.
        min: f64,
        /// The configured upper bound.
        max: f64,
    },
    /// `step` is zero or negative.
    #[error("step {step} is not positive")]
    NonPositiveStep {
        /// The configured step.
        step: f64,
    },
    /// A bound or the step is NaN or infinite.
    #[error("{name} is not finite")]
    NonFiniteBound {
        /// Which field was non-finite.
        name: &'static str,
    },
}

/// Recognized construction options for [`crate::RangeControl`].
///
/// Fields are public and meant to be set directly after
/// [`RangeConfig::new`]:
///
/// ```
/// use groove_range::{Orientation, RangeConfig};
///
/// let mut config: RangeConfig<u32> = RangeConfig::new(0.0, 100.0);
/// config.step = 5.0;
/// config.orientation = Orientation::Vertical;
/// ```
#[derive(Debug)]
pub struct RangeConfig<T> {
    /// Lower bound of the range. Required; must not exceed `max`.
    pub min: f64,
    /// Upper bound of the range. Required.
    pub max: f64,
    /// Externally owned value. Supplying one switches the control to
    /// controlled mode (sticky; see [`crate::RangeControl::sync_external`]).
    pub value: Option<f64>,
    /// Seed value for uncontrolled mode. Defaults to `min` when absent.
    pub default_value: Option<f64>,
    /// Increment for keyboard and click-step adjustments, and the
    /// quantization grid for pointer input. Must be positive.
    pub step: f64,
    /// Track axis.
    pub orientation: Orientation,
    /// Reading direction of a horizontal track. When `None`, the host's
    /// text direction applies (see
    /// [`crate::RangeControl::set_text_direction`]), falling back to
    /// left-to-right.
    pub direction: Option<Direction>,
    /// When true, every pointer and keyboard interaction is a no-op.
    pub disabled: bool,
    /// Hook invoked for every accepted mutation.
    pub on_change: Option<OnChange<T>>,
}

impl<T> RangeConfig<T> {
    /// A configuration over `min..=max` with defaults for everything else:
    /// step 1, horizontal, direction from the host, enabled, uncontrolled.
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            value: None,
            default_value: None,
            step: 1.0,
            orientation: Orientation::Horizontal,
            direction: None,
            disabled: false,
            on_change: None,
        }
    }

    /// Check the numeric invariants: finite bounds and step, `min <= max`,
    /// `step > 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min.is_finite() {
            return Err(ConfigError::NonFiniteBound { name: "min" });
        }
        if !self.max.is_finite() {
            return Err(ConfigError::NonFiniteBound { name: "max" });
        }
        if !self.step.is_finite() {
            return Err(ConfigError::NonFiniteBound { name: "step" });
        }
        if self.min > self.max {
            return Err(ConfigError::MinAboveMax {
                min: self.min,
                max: self.max,
            });
        }
        if self.step <= 0.0 {
            return Err(ConfigError::NonPositiveStep { step: self.step });
        }
        Ok(())
    }
}

impl<T> Clone for RangeConfig<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RangeConfig<T> {}
