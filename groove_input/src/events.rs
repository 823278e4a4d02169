// Copyright 2025 the Groove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Native event shapes and the normalized event they collapse into.
//!
//! Each native model keeps its own variant in [`NativeEvent`] so hosts can
//! forward events without reshaping them; [`crate::EventAdapter`] is the
//! only place that knows how to turn any of them into an [`InputEvent`].

use core::num::NonZeroU64;

use kurbo::Point;
use smallvec::SmallVec;

/// Pointer identifier shared by every input model.
///
/// Mouse input uses the constant [`MOUSE_POINTER`]; touch and pointer events
/// map their raw identifiers through [`pointer_id_from_raw`].
pub type PointerId = NonZeroU64;

/// The pointer id used for all mouse input.
pub const MOUSE_POINTER: PointerId = PointerId::MIN;

/// Map a raw host identifier (touch identifier or pointer-event id) to a
/// [`PointerId`].
///
/// Raw ids start at 0 in most hosts, so ids are offset by one to stay
/// nonzero. The offset saturates instead of wrapping for `u64::MAX`.
pub const fn pointer_id_from_raw(raw: u64) -> PointerId {
    match PointerId::new(raw.saturating_add(1)) {
        Some(id) => id,
        None => PointerId::MAX,
    }
}

/// Lifecycle phase of a native mouse event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MousePhase {
    /// A mouse button was pressed.
    Down,
    /// The cursor moved.
    Move,
    /// A mouse button was released.
    Up,
}

/// A native mouse event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MouseEvent {
    /// Which part of the mouse lifecycle this event reports.
    pub phase: MousePhase,
    /// Cursor position in the host's coordinate space.
    pub position: Point,
    /// Button associated with the event (0 = primary).
    pub button: u8,
}

/// One contact point inside a native touch event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchPoint {
    /// Host-assigned touch identifier, stable for the contact's lifetime.
    pub id: u64,
    /// Contact position in the host's coordinate space.
    pub position: Point,
}

/// Lifecycle phase of a native touch event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TouchPhase {
    /// One or more contacts touched down.
    Start,
    /// One or more contacts moved.
    Move,
    /// One or more contacts lifted.
    End,
}

/// A native touch event carrying the contacts that changed.
///
/// Touch events report a list rather than a single point; the adapter only
/// ever adopts one of them (the first contact of the adopting `Start`).
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Which part of the touch lifecycle this event reports.
    pub phase: TouchPhase,
    /// The changed contacts. Two inline slots cover the common case.
    pub touches: SmallVec<[TouchPoint; 2]>,
}

/// Lifecycle phase of a native pointer event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PointerPhase {
    /// The pointer became active (button press or contact).
    Down,
    /// The pointer moved.
    Move,
    /// The pointer became inactive.
    Up,
}

/// A native pointer event (the unified mouse/touch/pen model some hosts
/// provide directly).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Which part of the pointer lifecycle this event reports.
    pub phase: PointerPhase,
    /// Pointer position in the host's coordinate space.
    pub position: Point,
    /// Host-assigned pointer identifier.
    pub pointer_id: u64,
}

/// Tagged union of the three native input models.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeEvent {
    /// A mouse event.
    Mouse(MouseEvent),
    /// A touch event.
    Touch(TouchEvent),
    /// A pointer event.
    Pointer(PointerEvent),
}

/// Which native model produced a normalized event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputSource {
    /// Normalized from a [`MouseEvent`].
    Mouse,
    /// Normalized from a [`TouchEvent`].
    Touch,
    /// Normalized from a [`PointerEvent`].
    Pointer,
}

/// Phase of the normalized input stream.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputPhase {
    /// The tracked pointer went down on the target.
    Press,
    /// The tracked pointer moved while down.
    Move,
    /// The tracked pointer went up.
    Release,
}

/// A normalized input event.
///
/// Exactly one of these is produced per accepted native event; events from
/// pointers other than the session's are dropped before this point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InputEvent {
    /// Normalized lifecycle phase.
    pub phase: InputPhase,
    /// Position in the host's coordinate space.
    pub position: Point,
    /// Identity of the tracked pointer.
    pub pointer: PointerId,
    /// The native model the event came from.
    pub source: InputSource,
}
