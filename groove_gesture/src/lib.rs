// Copyright 2025 the Groove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Groove Gesture: a single-session drag recognizer.
//!
//! ## Overview
//!
//! [`GestureRecognizer`] sits on top of [`groove_input::EventAdapter`] and
//! turns the normalized press/move/release stream into a two-state drag
//! lifecycle:
//!
//! - `Idle --press--> Active`: a [`GestureSession`] is recorded with the
//!   origin coordinate and the adopted pointer id, and
//!   [`GesturePhase::Press`] is emitted.
//! - `Active --move--> Active`: moves whose pointer id matches the session
//!   emit [`GesturePhase::Drag`]; mismatched pointers are silently dropped.
//! - `Active --release--> Idle`: [`GesturePhase::Release`] is emitted, then
//!   the session is destroyed.
//! - `Active --unbind--> Idle`: the session is destroyed without a release
//!   phase. Consumers that need to reset (for example a dragging flag) must
//!   do so when they call [`GestureRecognizer::unbind`].
//!
//! No operation is valid from `Idle` except press; a press while `Active`
//! is ignored until release.
//!
//! Movement deltas are computed from per-session state (the previous
//! position lives in the [`GestureSession`], not in anything shared), so
//! two controls dragged in the same frame never contaminate each other's
//! deltas.
//!
//! ## Consuming phases
//!
//! Phases are returned from [`GestureRecognizer::handle`]; match on them
//! directly, or route them through [`dispatch`] and a [`GestureHandler`]
//! when callback style reads better:
//!
//! ```
//! use groove_gesture::{GesturePhase, GestureRecognizer};
//! use groove_input::{MouseEvent, MousePhase, NativeEvent, NoopHost};
//! use kurbo::Point;
//!
//! let mut recognizer: GestureRecognizer<&str, NoopHost> = GestureRecognizer::new(NoopHost);
//! recognizer.bind(Some("track"));
//!
//! let press = recognizer.handle(&NativeEvent::Mouse(MouseEvent {
//!     phase: MousePhase::Down,
//!     position: Point::new(12.0, 3.0),
//!     button: 0,
//! }));
//! assert!(matches!(
//!     press,
//!     Some(GesturePhase::Press { target: "track", .. })
//! ));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use kurbo::{Point, Vec2};

use groove_input::{
    EventAdapter, InputPhase, InputSource, ListenerHost, NativeEvent, NoopHost, PointerId,
};

/// State of one continuous drag interaction, created on press and destroyed
/// on release or unbind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureSession {
    /// The pointer adopted at press; all later events must match it.
    pub pointer: PointerId,
    /// The native model the session originated from.
    pub source: InputSource,
    /// Where the press happened.
    pub origin: Point,
    /// The most recent tracked position, used for per-session deltas.
    pub last_position: Point,
}

/// One recognized step of a drag gesture.
///
/// Every variant echoes the bound target handle so consumers can reach the
/// origin element without holding their own reference.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GesturePhase<T> {
    /// The drag started.
    Press {
        /// Press position.
        position: Point,
        /// The bound target handle.
        target: T,
    },
    /// The tracked pointer moved while down.
    Drag {
        /// Current position.
        position: Point,
        /// Movement since the previous phase of this session.
        delta: Vec2,
        /// The bound target handle.
        target: T,
    },
    /// The drag ended.
    Release {
        /// Release position.
        position: Point,
        /// The bound target handle.
        target: T,
    },
}

/// Callback-style consumer for [`dispatch`].
///
/// All methods default to no-ops so implementors only write the phases they
/// care about.
pub trait GestureHandler<T> {
    /// The drag started at `position`.
    fn on_press(&mut self, _position: Point, _target: &T) {}

    /// The pointer moved to `position`; `delta` is relative to the previous
    /// phase of the same session.
    fn on_drag(&mut self, _position: Point, _delta: Vec2, _target: &T) {}

    /// The drag ended at `position`.
    fn on_release(&mut self, _position: Point, _target: &T) {}
}

/// Invoke the matching [`GestureHandler`] method for one phase.
pub fn dispatch<T>(phase: &GesturePhase<T>, handler: &mut impl GestureHandler<T>) {
    match phase {
        GesturePhase::Press { position, target } => handler.on_press(*position, target),
        GesturePhase::Drag {
            position,
            delta,
            target,
        } => handler.on_drag(*position, *delta, target),
        GesturePhase::Release { position, target } => handler.on_release(*position, target),
    }
}

/// Two-state (`Idle`/`Active`) drag session machine over an
/// [`EventAdapter`].
///
/// Owns exactly one active session at a time. The recognizer owns the
/// adapter; [`GestureRecognizer::bind`] and [`GestureRecognizer::unbind`]
/// forward to it, and [`GestureRecognizer::handle`] feeds it every native
/// event before interpreting the normalized result.
pub struct GestureRecognizer<T: Clone, H: ListenerHost = NoopHost> {
    adapter: EventAdapter<T, H>,
    session: Option<GestureSession>,
}

impl<T: Clone, H: ListenerHost> core::fmt::Debug for GestureRecognizer<T, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GestureRecognizer")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<T: Clone, H: ListenerHost> GestureRecognizer<T, H> {
    /// Create an unbound recognizer over `host`.
    pub fn new(host: H) -> Self {
        Self {
            adapter: EventAdapter::new(host),
            session: None,
        }
    }

    /// Bind the underlying adapter to `target`.
    ///
    /// Binding to `None` is a no-op; binding while bound replaces the
    /// previous binding and silently drops any active session.
    pub fn bind(&mut self, target: Option<T>) {
        if target.is_some() {
            self.session = None;
        }
        self.adapter.bind(target);
    }

    /// Tear down the adapter and destroy any active session without
    /// emitting [`GesturePhase::Release`].
    pub fn unbind(&mut self) {
        self.adapter.unbind();
        self.session = None;
    }

    /// The bound target handle, if any.
    pub fn target(&self) -> Option<&T> {
        self.adapter.target()
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Whether a drag session is active.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The listener host behind the adapter.
    pub fn host(&self) -> &H {
        self.adapter.host()
    }

    /// Feed one native event through the adapter and advance the session
    /// machine.
    ///
    /// Returns the recognized phase, or `None` when the event was filtered
    /// (unbound, mismatched pointer, press while active, or any non-press
    /// from `Idle`).
    pub fn handle(&mut self, event: &NativeEvent) -> Option<GesturePhase<T>> {
        let input = self.adapter.handle(event)?;
        let target = self.adapter.target().cloned()?;
        match input.phase {
            InputPhase::Press => {
                // The adapter refuses a second press mid-session; this guard
                // stays anyway so a racing adapter can never mint a second
                // session.
                if self.session.is_some() {
                    return None;
                }
                self.session = Some(GestureSession {
                    pointer: input.pointer,
                    source: input.source,
                    origin: input.position,
                    last_position: input.position,
                });
                Some(GesturePhase::Press {
                    position: input.position,
                    target,
                })
            }
            InputPhase::Move => {
                let session = self.session.as_mut()?;
                if session.pointer != input.pointer || session.source != input.source {
                    return None;
                }
                let delta = input.position - session.last_position;
                session.last_position = input.position;
                Some(GesturePhase::Drag {
                    position: input.position,
                    delta,
                    target,
                })
            }
            InputPhase::Release => {
                let session = self.session.take()?;
                debug_assert_eq!(session.pointer, input.pointer, "adapter/session desync");
                Some(GesturePhase::Release {
                    position: input.position,
                    target,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use groove_input::{MouseEvent, MousePhase, TouchEvent, TouchPhase, TouchPoint};

    fn mouse(phase: MousePhase, x: f64, y: f64) -> NativeEvent {
        NativeEvent::Mouse(MouseEvent {
            phase,
            position: Point::new(x, y),
            button: 0,
        })
    }

    fn touch(phase: TouchPhase, points: &[(u64, f64, f64)]) -> NativeEvent {
        NativeEvent::Touch(TouchEvent {
            phase,
            touches: points
                .iter()
                .map(|&(id, x, y)| TouchPoint {
                    id,
                    position: Point::new(x, y),
                })
                .collect(),
        })
    }

    fn recognizer() -> GestureRecognizer<&'static str, NoopHost> {
        let mut r = GestureRecognizer::new(NoopHost);
        r.bind(Some("track"));
        r
    }

    #[test]
    fn press_records_session_and_echoes_target() {
        let mut r = recognizer();
        let phase = r.handle(&mouse(MousePhase::Down, 10.0, 4.0)).unwrap();
        assert_eq!(
            phase,
            GesturePhase::Press {
                position: Point::new(10.0, 4.0),
                target: "track",
            }
        );
        let session = r.session().unwrap();
        assert_eq!(session.origin, Point::new(10.0, 4.0));
        assert_eq!(session.last_position, Point::new(10.0, 4.0));
    }

    #[test]
    fn drag_reports_per_move_deltas() {
        let mut r = recognizer();
        r.handle(&mouse(MousePhase::Down, 10.0, 0.0));

        let first = r.handle(&mouse(MousePhase::Move, 15.0, 2.0)).unwrap();
        assert_eq!(
            first,
            GesturePhase::Drag {
                position: Point::new(15.0, 2.0),
                delta: Vec2::new(5.0, 2.0),
                target: "track",
            }
        );

        let second = r.handle(&mouse(MousePhase::Move, 14.0, 2.0)).unwrap();
        assert!(matches!(
            second,
            GesturePhase::Drag { delta, .. } if delta == Vec2::new(-1.0, 0.0)
        ));
    }

    #[test]
    fn deltas_are_per_session_not_shared() {
        let mut a = recognizer();
        let mut b = recognizer();
        a.handle(&mouse(MousePhase::Down, 0.0, 0.0));
        b.handle(&mouse(MousePhase::Down, 100.0, 0.0));

        // Interleaved moves: each recognizer's delta derives from its own
        // session history only.
        let da = a.handle(&mouse(MousePhase::Move, 10.0, 0.0)).unwrap();
        let db = b.handle(&mouse(MousePhase::Move, 103.0, 0.0)).unwrap();
        assert!(matches!(da, GesturePhase::Drag { delta, .. } if delta == Vec2::new(10.0, 0.0)));
        assert!(matches!(db, GesturePhase::Drag { delta, .. } if delta == Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn mismatched_touch_pointer_is_dropped() {
        let mut r = recognizer();
        r.handle(&touch(TouchPhase::Start, &[(1, 5.0, 0.0)]));
        assert!(r.handle(&touch(TouchPhase::Move, &[(2, 9.0, 0.0)])).is_none());
        // The session still tracks contact 1.
        assert!(r.handle(&touch(TouchPhase::Move, &[(1, 6.0, 0.0)])).is_some());
    }

    #[test]
    fn release_destroys_the_session() {
        let mut r = recognizer();
        r.handle(&mouse(MousePhase::Down, 0.0, 0.0));
        let phase = r.handle(&mouse(MousePhase::Up, 3.0, 0.0)).unwrap();
        assert_eq!(
            phase,
            GesturePhase::Release {
                position: Point::new(3.0, 0.0),
                target: "track",
            }
        );
        assert!(!r.is_active());
        assert!(r.handle(&mouse(MousePhase::Move, 4.0, 0.0)).is_none());
    }

    #[test]
    fn only_press_is_valid_from_idle() {
        let mut r = recognizer();
        assert!(r.handle(&mouse(MousePhase::Move, 1.0, 1.0)).is_none());
        assert!(r.handle(&mouse(MousePhase::Up, 1.0, 1.0)).is_none());
        assert!(!r.is_active());
    }

    #[test]
    fn press_while_active_is_ignored() {
        let mut r = recognizer();
        r.handle(&mouse(MousePhase::Down, 0.0, 0.0));
        assert!(r.handle(&mouse(MousePhase::Down, 50.0, 0.0)).is_none());
        assert_eq!(r.session().unwrap().origin, Point::ZERO);
    }

    #[test]
    fn unbind_is_silent_and_resets() {
        let mut r = recognizer();
        r.handle(&mouse(MousePhase::Down, 0.0, 0.0));
        r.unbind();
        assert!(!r.is_active());
        assert!(r.target().is_none());
        // A fresh binding starts a fresh lifecycle.
        r.bind(Some("track"));
        assert!(r.handle(&mouse(MousePhase::Down, 1.0, 0.0)).is_some());
    }

    #[test]
    fn dispatch_routes_phases_to_handler_methods() {
        #[derive(Default)]
        struct Log {
            seen: Vec<&'static str>,
            last_delta: Option<Vec2>,
        }

        impl GestureHandler<&'static str> for Log {
            fn on_press(&mut self, _position: Point, _target: &&'static str) {
                self.seen.push("press");
            }

            fn on_drag(&mut self, _position: Point, delta: Vec2, _target: &&'static str) {
                self.seen.push("drag");
                self.last_delta = Some(delta);
            }

            fn on_release(&mut self, _position: Point, _target: &&'static str) {
                self.seen.push("release");
            }
        }

        let mut r = recognizer();
        let mut log = Log::default();
        for event in [
            mouse(MousePhase::Down, 0.0, 0.0),
            mouse(MousePhase::Move, 2.0, 0.0),
            mouse(MousePhase::Up, 2.0, 0.0),
        ] {
            if let Some(phase) = r.handle(&event) {
                dispatch(&phase, &mut log);
            }
        }
        assert_eq!(log.seen, ["press", "drag", "release"]);
        assert_eq!(log.last_delta, Some(Vec2::new(2.0, 0.0)));
    }
}
