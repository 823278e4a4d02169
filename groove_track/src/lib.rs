// Copyright 2025 the Groove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Groove Track: pure geometry and arithmetic for range controls.
//!
//! Everything here is a stateless free function over plain values, safe to
//! call from any number of concurrent sessions: a pointer coordinate plus a
//! press-time [`TrackMetrics`] snapshot maps to a fraction in `[0, 1]`
//! ([`fraction_from_point`]), and fractions convert to and from stepped,
//! clamped values ([`value_from_fraction`], [`fraction_from_value`]).
//!
//! ## Orientation and direction
//!
//! - [`Orientation::Vertical`]: the fraction is measured from the bottom
//!   edge upward; [`Direction`] has no vertical effect.
//! - [`Orientation::Horizontal`] with [`Direction::LeftToRight`]: measured
//!   from the left edge; with [`Direction::RightToLeft`], from the right
//!   edge (equivalently `1 − from-left`).
//!
//! Coordinates outside the track still produce a valid fraction: the
//! measured distance is clamped into `[0, 1]`, so dragging past an edge
//! saturates instead of erroring.
//!
//! ```
//! use groove_track::{Direction, Orientation, TrackMetrics, fraction_from_point, value_from_fraction};
//! use kurbo::{Point, Rect};
//!
//! // A 200 px wide horizontal track over the range 0..=100.
//! let metrics = TrackMetrics::from_rect(Rect::new(0.0, 0.0, 200.0, 16.0));
//! let fraction = fraction_from_point(
//!     Point::new(100.0, 8.0),
//!     &metrics,
//!     Orientation::Horizontal,
//!     Direction::LeftToRight,
//! );
//! assert_eq!(value_from_fraction(fraction, 0.0, 100.0, 1.0), 50.0);
//! ```
//!
//! ## Degenerate inputs
//!
//! A zero-sized track or a `min == max` range would divide by zero; both
//! cases return the constant fraction 0 instead of propagating a non-finite
//! number. Step quantization snaps to the nearest multiple of `step` offset
//! from `min`, and an exact tie between two multiples rounds toward the
//! larger value.
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Size};

/// Axis a range control lays its track along.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// The track runs along the x axis.
    #[default]
    Horizontal,
    /// The track runs along the y axis, filling bottom-up.
    Vertical,
}

/// Reading direction of a horizontal track.
///
/// Vertical tracks ignore direction entirely.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Direction {
    /// `min` sits at the left edge.
    #[default]
    LeftToRight,
    /// `min` sits at the right edge.
    RightToLeft,
}

/// Snapshot of a track's geometry, captured once at press time.
///
/// The snapshot is reused for the whole drag session and never re-read, so
/// every move of a session resolves against the same geometry. If the
/// element resizes mid-drag the snapshot goes stale; that staleness window
/// is part of the contract (consistency over freshness), not a bug.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrackMetrics {
    /// Top-left corner of the track in the host's coordinate space.
    pub origin: Point,
    /// Track extent.
    pub size: Size,
}

impl TrackMetrics {
    /// Snapshot from an origin and a size.
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Snapshot from a bounding rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            origin: rect.origin(),
            size: rect.size(),
        }
    }
}

/// Map a pointer coordinate to a fraction in `[0, 1]` along the track's
/// active axis.
///
/// Out-of-bounds coordinates clamp to 0 or 1; zero-sized or non-finite
/// geometry yields 0.
pub fn fraction_from_point(
    point: Point,
    metrics: &TrackMetrics,
    orientation: Orientation,
    direction: Direction,
) -> f64 {
    let (distance, extent) = match orientation {
        Orientation::Vertical => (
            metrics.origin.y + metrics.size.height - point.y,
            metrics.size.height,
        ),
        Orientation::Horizontal => match direction {
            Direction::LeftToRight => (point.x - metrics.origin.x, metrics.size.width),
            Direction::RightToLeft => (
                metrics.origin.x + metrics.size.width - point.x,
                metrics.size.width,
            ),
        },
    };
    if extent <= 0.0 || !extent.is_finite() {
        return 0.0;
    }
    let fraction = distance / extent;
    if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Convert a fraction to a stepped value in `[min, max]`.
///
/// The raw value `min + fraction * (max − min)` is snapped to the nearest
/// multiple of `step` offset from `min` (exact ties round toward the larger
/// value), then clamped. The fraction itself is clamped into `[0, 1]`
/// first. A non-positive or non-finite `step` skips quantization.
pub fn value_from_fraction(fraction: f64, min: f64, max: f64, step: f64) -> f64 {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let raw = min + fraction * (max - min);
    let value = if step > 0.0 && step.is_finite() {
        // The fraction clamp above keeps the offset non-negative, so
        // round()'s half-away-from-zero tie rule lands on the larger
        // multiple.
        min + ((raw - min) / step).round() * step
    } else {
        raw
    };
    value.clamp(min, max)
}

/// Inverse of [`value_from_fraction`] without the quantization: the
/// fraction of the track `value` occupies.
///
/// Well-defined for `max > min`; the degenerate `min == max` range returns
/// the constant 0.
pub fn fraction_from_value(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 || !span.is_finite() {
        return 0.0;
    }
    let fraction = (value - min) / span;
    if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// A fraction expressed as a percentage, for rendering track and handle
/// extents.
pub fn percent_from_fraction(fraction: f64) -> f64 {
    fraction * 100.0
}

/// The percentage of the track `value` occupies. See
/// [`fraction_from_value`].
pub fn percent_from_value(value: f64, min: f64, max: f64) -> f64 {
    percent_from_fraction(fraction_from_value(value, min, max))
}
