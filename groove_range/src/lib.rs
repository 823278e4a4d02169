// Copyright 2025 the Groove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Groove Range: the range-input state machine.
//!
//! ## Overview
//!
//! This crate owns the value of a range control and arbitrates among its
//! four input sources — pointer drag (via [`groove_gesture`]), keyboard,
//! click-step buttons, and tick labels — so that one consistent value and
//! one change-event stream result.
//!
//! - [`RangeConfig`] enumerates the recognized construction options and is
//!   validated eagerly; a degenerate configuration (inverted bounds,
//!   non-positive step) is a [`ConfigError`], not a half-working control.
//! - [`RangeControl`] applies mutations. Every accepted mutation returns
//!   (and forwards to the optional `on_change` hook) exactly one
//!   [`ChangeEvent`]; mutations that compute the current value again are
//!   suppressed.
//! - Controlled vs uncontrolled: supplying an external value — in the
//!   config or later through [`RangeControl::sync_external`] — makes the
//!   caller the source of truth, permanently. Internal mutations then still
//!   emit candidates for the caller to feed back.
//!
//! ## Minimal example
//!
//! ```
//! use groove_range::{Key, RangeConfig, RangeControl, TrackMetrics};
//! use kurbo::{Point, Rect};
//!
//! let mut config: RangeConfig<&str> = RangeConfig::new(0.0, 100.0);
//! config.step = 5.0;
//! config.default_value = Some(50.0);
//! let mut control = RangeControl::new(config, "volume").unwrap();
//!
//! // Keyboard stepping clamps and suppresses no-ops.
//! assert_eq!(control.key(Key::Right).unwrap().value, 55.0);
//! assert_eq!(control.key(Key::End).unwrap().value, 100.0);
//! assert!(control.key(Key::Right).is_none());
//!
//! // Pointer input resolves against metrics captured once at press.
//! let metrics = TrackMetrics::from_rect(Rect::new(0.0, 0.0, 200.0, 16.0));
//! let event = control.press(Point::new(100.0, 8.0), metrics).unwrap();
//! assert_eq!(event.value, 50.0);
//! assert!(control.dragging());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod control;

pub use config::{ConfigError, OnChange, RangeConfig};
pub use control::{
    ChangeEvent, ChangeOrigin, Key, LabelId, RangeControl, RangeSemantics, StepButton,
};

// The geometry vocabulary callers need to configure and feed a control.
pub use groove_track::{Direction, Orientation, TrackMetrics};
