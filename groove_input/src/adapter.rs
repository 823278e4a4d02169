// Copyright 2025 the Groove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event adapter: listener lifecycle and single-session normalization.

use kurbo::Point;

use crate::events::{
    InputEvent, InputPhase, InputSource, MouseEvent, MousePhase, NativeEvent, PointerEvent,
    PointerId, PointerPhase, TouchEvent, TouchPhase, TouchPoint, MOUSE_POINTER,
    pointer_id_from_raw,
};

bitflags::bitflags! {
    /// Native listener kinds the adapter asks a host to keep attached.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ListenerSet: u16 {
        /// `mousedown` on the target.
        const MOUSE_DOWN   = 0b0_0000_0001;
        /// `mousemove` while tracking.
        const MOUSE_MOVE   = 0b0_0000_0010;
        /// `mouseup` while tracking.
        const MOUSE_UP     = 0b0_0000_0100;
        /// `touchstart` on the target.
        const TOUCH_START  = 0b0_0000_1000;
        /// `touchmove` while tracking.
        const TOUCH_MOVE   = 0b0_0001_0000;
        /// `touchend` while tracking.
        const TOUCH_END    = 0b0_0010_0000;
        /// `pointerdown` on the target.
        const POINTER_DOWN = 0b0_0100_0000;
        /// `pointermove` while tracking.
        const POINTER_MOVE = 0b0_1000_0000;
        /// `pointerup` while tracking.
        const POINTER_UP   = 0b1_0000_0000;

        /// The initiating listeners kept attached at [`Scope::Target`] while
        /// the adapter is bound.
        const PRESS = Self::MOUSE_DOWN.bits()
            | Self::TOUCH_START.bits()
            | Self::POINTER_DOWN.bits();
        /// The move/release listeners attached at [`Scope::Wide`] only while
        /// a session is active.
        const TRACK = Self::MOUSE_MOVE.bits()
            | Self::MOUSE_UP.bits()
            | Self::TOUCH_MOVE.bits()
            | Self::TOUCH_END.bits()
            | Self::POINTER_MOVE.bits()
            | Self::POINTER_UP.bits();
    }
}

/// Where a listener set is attached.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Scope {
    /// The bound target element itself.
    Target,
    /// A wider ancestor scope (document/window), so an active drag keeps
    /// receiving moves after the pointer leaves the target's bounds.
    Wide,
}

/// Host-side mirror of the adapter's listener bookkeeping.
///
/// The adapter is the exclusive owner of attach/detach decisions on the
/// bound target; hosts implement this trait to carry those decisions onto a
/// real platform (DOM listeners, winit subscriptions, a test recorder).
/// Hosts with nothing to mirror use [`NoopHost`].
pub trait ListenerHost {
    /// Handle the host hands back for a single attach, used to detach later.
    type ListenerId: Copy + core::fmt::Debug;

    /// Attach `set` at `scope` and return a handle for detaching.
    fn attach(&mut self, scope: Scope, set: ListenerSet) -> Self::ListenerId;

    /// Detach a previously attached listener set.
    fn detach(&mut self, id: Self::ListenerId);

    /// Toggle suppression of the platform's default scroll behavior.
    ///
    /// Enabled for the duration of touch-originated sessions only.
    fn suppress_default_scroll(&mut self, suppress: bool);
}

/// A [`ListenerHost`] that mirrors nothing.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct NoopHost;

impl ListenerHost for NoopHost {
    type ListenerId = ();

    fn attach(&mut self, _scope: Scope, _set: ListenerSet) -> Self::ListenerId {}

    fn detach(&mut self, _id: Self::ListenerId) {}

    fn suppress_default_scroll(&mut self, _suppress: bool) {}
}

/// Identity of the pointer an active session tracks.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AdapterSession {
    pointer: PointerId,
    source: InputSource,
}

impl AdapterSession {
    fn matches(&self, source: InputSource, pointer: PointerId) -> bool {
        self.source == source && self.pointer == pointer
    }
}

/// Binds to one opaque target handle and normalizes the three native input
/// models into a single [`InputEvent`] stream.
///
/// ## Usage
///
/// - [`EventAdapter::bind`] attaches the press listeners; binding to an
///   absent target (`None`) is a no-op.
/// - Hosts forward every native event to [`EventAdapter::handle`]; the
///   adapter returns the normalized event, or `None` when the event is
///   filtered (unbound, no session, or a pointer the session does not
///   track).
/// - At most one session is active at a time. The first press (or the first
///   touch point of the adopting touch event) wins; everything else waits
///   for the session to end.
/// - [`EventAdapter::unbind`] tears down all listeners and silently
///   destroys any active session — no release event is produced.
pub struct EventAdapter<T, H: ListenerHost = NoopHost> {
    host: H,
    target: Option<T>,
    press_listener: Option<H::ListenerId>,
    track_listener: Option<H::ListenerId>,
    session: Option<AdapterSession>,
}

impl<T, H: ListenerHost> core::fmt::Debug for EventAdapter<T, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventAdapter")
            .field("bound", &self.target.is_some())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<T, H: ListenerHost> EventAdapter<T, H> {
    /// Create an unbound adapter over `host`.
    pub fn new(host: H) -> Self {
        Self {
            host,
            target: None,
            press_listener: None,
            track_listener: None,
            session: None,
        }
    }

    /// Bind to `target` and attach the press listeners.
    ///
    /// Binding to `None` is a no-op. Binding while already bound unbinds
    /// first, which silently ends any active session.
    pub fn bind(&mut self, target: Option<T>) {
        let Some(target) = target else {
            return;
        };
        if self.target.is_some() {
            self.unbind();
        }
        self.press_listener = Some(self.host.attach(Scope::Target, ListenerSet::PRESS));
        self.target = Some(target);
    }

    /// Tear down all listeners and end any active session without emitting
    /// a release.
    pub fn unbind(&mut self) {
        self.end_session();
        if let Some(id) = self.press_listener.take() {
            self.host.detach(id);
        }
        self.target = None;
    }

    /// The bound target handle, if any.
    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// Whether a session is currently active.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The host this adapter mirrors listener state into.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Normalize one native event.
    ///
    /// Returns `None` when the event is filtered: the adapter is unbound, a
    /// press arrives while a session is already active, or a move/release
    /// belongs to a pointer the session does not track.
    pub fn handle(&mut self, event: &NativeEvent) -> Option<InputEvent> {
        self.target.as_ref()?;
        match event {
            NativeEvent::Mouse(mouse) => self.handle_mouse(mouse),
            NativeEvent::Touch(touch) => self.handle_touch(touch),
            NativeEvent::Pointer(pointer) => self.handle_pointer(pointer),
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> Option<InputEvent> {
        match mouse.phase {
            MousePhase::Down => self.press(InputSource::Mouse, MOUSE_POINTER, mouse.position),
            MousePhase::Move => self.track(InputSource::Mouse, MOUSE_POINTER, mouse.position),
            MousePhase::Up => self.release(InputSource::Mouse, MOUSE_POINTER, mouse.position),
        }
    }

    fn handle_pointer(&mut self, pointer: &PointerEvent) -> Option<InputEvent> {
        let id = pointer_id_from_raw(pointer.pointer_id);
        match pointer.phase {
            PointerPhase::Down => self.press(InputSource::Pointer, id, pointer.position),
            PointerPhase::Move => self.track(InputSource::Pointer, id, pointer.position),
            PointerPhase::Up => self.release(InputSource::Pointer, id, pointer.position),
        }
    }

    fn handle_touch(&mut self, touch: &TouchEvent) -> Option<InputEvent> {
        match touch.phase {
            // Adopt the first contact of the first touchstart; a start that
            // arrives during an active session is a concurrent touch and is
            // ignored entirely.
            TouchPhase::Start => {
                let first = touch.touches.first()?;
                self.press(
                    InputSource::Touch,
                    pointer_id_from_raw(first.id),
                    first.position,
                )
            }
            TouchPhase::Move => {
                let point = self.session_touch(touch)?;
                self.track(
                    InputSource::Touch,
                    pointer_id_from_raw(point.id),
                    point.position,
                )
            }
            TouchPhase::End => {
                let point = self.session_touch(touch)?;
                self.release(
                    InputSource::Touch,
                    pointer_id_from_raw(point.id),
                    point.position,
                )
            }
        }
    }

    /// The contact in `touch` that belongs to the active session, if any.
    fn session_touch(&self, touch: &TouchEvent) -> Option<TouchPoint> {
        let session = self.session.as_ref()?;
        if session.source != InputSource::Touch {
            return None;
        }
        touch
            .touches
            .iter()
            .find(|point| pointer_id_from_raw(point.id) == session.pointer)
            .copied()
    }

    fn press(&mut self, source: InputSource, pointer: PointerId, position: Point) -> Option<InputEvent> {
        if self.session.is_some() {
            return None;
        }
        self.session = Some(AdapterSession { pointer, source });
        self.track_listener = Some(self.host.attach(Scope::Wide, ListenerSet::TRACK));
        if source == InputSource::Touch {
            self.host.suppress_default_scroll(true);
        }
        Some(InputEvent {
            phase: InputPhase::Press,
            position,
            pointer,
            source,
        })
    }

    fn track(&mut self, source: InputSource, pointer: PointerId, position: Point) -> Option<InputEvent> {
        let session = self.session.as_ref()?;
        if !session.matches(source, pointer) {
            return None;
        }
        Some(InputEvent {
            phase: InputPhase::Move,
            position,
            pointer,
            source,
        })
    }

    fn release(&mut self, source: InputSource, pointer: PointerId, position: Point) -> Option<InputEvent> {
        let session = self.session.as_ref()?;
        if !session.matches(source, pointer) {
            return None;
        }
        self.end_session();
        Some(InputEvent {
            phase: InputPhase::Release,
            position,
            pointer,
            source,
        })
    }

    /// Detach tracking listeners and drop the session, if one is active.
    fn end_session(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        if let Some(id) = self.track_listener.take() {
            self.host.detach(id);
        }
        if session.source == InputSource::Touch {
            self.host.suppress_default_scroll(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TouchPoint;
    use alloc::vec::Vec;
    use smallvec::smallvec;

    #[derive(Debug, PartialEq)]
    enum HostOp {
        Attach(Scope, ListenerSet, u32),
        Detach(u32),
        Scroll(bool),
    }

    #[derive(Default)]
    struct RecordingHost {
        next_id: u32,
        ops: Vec<HostOp>,
    }

    impl ListenerHost for RecordingHost {
        type ListenerId = u32;

        fn attach(&mut self, scope: Scope, set: ListenerSet) -> u32 {
            let id = self.next_id;
            self.next_id += 1;
            self.ops.push(HostOp::Attach(scope, set, id));
            id
        }

        fn detach(&mut self, id: u32) {
            self.ops.push(HostOp::Detach(id));
        }

        fn suppress_default_scroll(&mut self, suppress: bool) {
            self.ops.push(HostOp::Scroll(suppress));
        }
    }

    fn adapter() -> EventAdapter<u32, RecordingHost> {
        EventAdapter::new(RecordingHost::default())
    }

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

    #[test]
    fn binding_to_absent_target_is_a_noop() {
        let mut a = adapter();
        a.bind(None);
        assert!(a.target().is_none());
        assert!(a.host().ops.is_empty());
        assert!(a.handle(&mouse(MousePhase::Down, 1.0, 1.0)).is_none());
    }

    #[test]
    fn bind_attaches_press_listeners_at_target_scope() {
        let mut a = adapter();
        a.bind(Some(7));
        assert_eq!(a.target(), Some(&7));
        assert_eq!(
            a.host().ops,
            [HostOp::Attach(Scope::Target, ListenerSet::PRESS, 0)]
        );
    }

    #[test]
    fn unbound_adapter_ignores_everything() {
        let mut a = adapter();
        assert!(a.handle(&mouse(MousePhase::Down, 0.0, 0.0)).is_none());
        assert!(a.handle(&mouse(MousePhase::Move, 0.0, 0.0)).is_none());
    }

    #[test]
    fn mouse_press_move_release_normalizes() {
        let mut a = adapter();
        a.bind(Some(1));

        let press = a.handle(&mouse(MousePhase::Down, 10.0, 5.0)).unwrap();
        assert_eq!(press.phase, InputPhase::Press);
        assert_eq!(press.position, Point::new(10.0, 5.0));
        assert_eq!(press.pointer, MOUSE_POINTER);
        assert_eq!(press.source, InputSource::Mouse);
        assert!(a.is_active());

        let moved = a.handle(&mouse(MousePhase::Move, 20.0, 5.0)).unwrap();
        assert_eq!(moved.phase, InputPhase::Move);
        assert_eq!(moved.position, Point::new(20.0, 5.0));

        let release = a.handle(&mouse(MousePhase::Up, 21.0, 5.0)).unwrap();
        assert_eq!(release.phase, InputPhase::Release);
        assert!(!a.is_active());
    }

    #[test]
    fn tracking_listeners_attach_on_press_and_detach_on_release() {
        let mut a = adapter();
        a.bind(Some(1));
        a.handle(&mouse(MousePhase::Down, 0.0, 0.0));
        a.handle(&mouse(MousePhase::Up, 0.0, 0.0));
        assert_eq!(
            a.host().ops,
            [
                HostOp::Attach(Scope::Target, ListenerSet::PRESS, 0),
                HostOp::Attach(Scope::Wide, ListenerSet::TRACK, 1),
                HostOp::Detach(1),
            ]
        );
    }

    #[test]
    fn second_press_during_active_session_is_ignored() {
        let mut a = adapter();
        a.bind(Some(1));
        assert!(a.handle(&mouse(MousePhase::Down, 0.0, 0.0)).is_some());
        assert!(a.handle(&mouse(MousePhase::Down, 9.0, 9.0)).is_none());
        // The original session is still the tracked one.
        assert!(a.handle(&mouse(MousePhase::Move, 1.0, 0.0)).is_some());
    }

    #[test]
    fn move_without_session_is_ignored() {
        let mut a = adapter();
        a.bind(Some(1));
        assert!(a.handle(&mouse(MousePhase::Move, 1.0, 1.0)).is_none());
        assert!(a.handle(&mouse(MousePhase::Up, 1.0, 1.0)).is_none());
    }

    #[test]
    fn first_touch_point_is_adopted() {
        let mut a = adapter();
        a.bind(Some(1));
        let press = a
            .handle(&touch(TouchPhase::Start, &[(5, 10.0, 0.0), (6, 50.0, 0.0)]))
            .unwrap();
        assert_eq!(press.pointer, pointer_id_from_raw(5));
        assert_eq!(press.position, Point::new(10.0, 0.0));
        assert_eq!(press.source, InputSource::Touch);
    }

    #[test]
    fn concurrent_touch_start_is_ignored_entirely() {
        let mut a = adapter();
        a.bind(Some(1));
        a.handle(&touch(TouchPhase::Start, &[(5, 10.0, 0.0)]));
        assert!(
            a.handle(&touch(TouchPhase::Start, &[(6, 50.0, 0.0)]))
                .is_none()
        );
        // Moves from the second contact are dropped; the adopted contact
        // still tracks.
        assert!(
            a.handle(&touch(TouchPhase::Move, &[(6, 55.0, 0.0)]))
                .is_none()
        );
        let moved = a
            .handle(&touch(TouchPhase::Move, &[(6, 60.0, 0.0), (5, 12.0, 0.0)]))
            .unwrap();
        assert_eq!(moved.position, Point::new(12.0, 0.0));
    }

    #[test]
    fn touch_end_without_session_contact_keeps_session() {
        let mut a = adapter();
        a.bind(Some(1));
        a.handle(&touch(TouchPhase::Start, &[(5, 10.0, 0.0)]));
        assert!(
            a.handle(&touch(TouchPhase::End, &[(6, 50.0, 0.0)]))
                .is_none()
        );
        assert!(a.is_active());
        let release = a
            .handle(&touch(TouchPhase::End, &[(5, 11.0, 0.0)]))
            .unwrap();
        assert_eq!(release.phase, InputPhase::Release);
        assert!(!a.is_active());
    }

    #[test]
    fn scroll_suppression_brackets_touch_sessions_only() {
        let mut a = adapter();
        a.bind(Some(1));
        a.handle(&touch(TouchPhase::Start, &[(0, 0.0, 0.0)]));
        a.handle(&touch(TouchPhase::End, &[(0, 0.0, 0.0)]));
        let scrolls: Vec<&HostOp> = a
            .host()
            .ops
            .iter()
            .filter(|op| matches!(op, HostOp::Scroll(_)))
            .collect();
        assert_eq!(scrolls, [&HostOp::Scroll(true), &HostOp::Scroll(false)]);

        let mut b = adapter();
        b.bind(Some(1));
        b.handle(&mouse(MousePhase::Down, 0.0, 0.0));
        b.handle(&mouse(MousePhase::Up, 0.0, 0.0));
        assert!(
            !b.host()
                .ops
                .iter()
                .any(|op| matches!(op, HostOp::Scroll(_)))
        );
    }

    #[test]
    fn mouse_release_does_not_end_touch_session() {
        let mut a = adapter();
        a.bind(Some(1));
        a.handle(&touch(TouchPhase::Start, &[(0, 0.0, 0.0)]));
        assert!(a.handle(&mouse(MousePhase::Up, 0.0, 0.0)).is_none());
        assert!(a.is_active());
    }

    #[test]
    fn unbind_tears_down_without_release() {
        let mut a = adapter();
        a.bind(Some(1));
        a.handle(&touch(TouchPhase::Start, &[(0, 4.0, 0.0)]));
        a.unbind();
        assert!(!a.is_active());
        assert!(a.target().is_none());
        assert_eq!(
            a.host().ops,
            [
                HostOp::Attach(Scope::Target, ListenerSet::PRESS, 0),
                HostOp::Attach(Scope::Wide, ListenerSet::TRACK, 1),
                HostOp::Detach(1),
                HostOp::Scroll(false),
                HostOp::Detach(0),
            ]
        );
        // Nothing is delivered after teardown.
        assert!(
            a.handle(&touch(TouchPhase::End, &[(0, 4.0, 0.0)]))
                .is_none()
        );
    }

    #[test]
    fn rebinding_replaces_the_previous_binding() {
        let mut a = adapter();
        a.bind(Some(1));
        a.handle(&mouse(MousePhase::Down, 0.0, 0.0));
        a.bind(Some(2));
        assert_eq!(a.target(), Some(&2));
        assert!(!a.is_active());
        assert_eq!(
            a.host().ops,
            [
                HostOp::Attach(Scope::Target, ListenerSet::PRESS, 0),
                HostOp::Attach(Scope::Wide, ListenerSet::TRACK, 1),
                HostOp::Detach(1),
                HostOp::Detach(0),
                HostOp::Attach(Scope::Target, ListenerSet::PRESS, 2),
            ]
        );
    }

    #[test]
    fn pointer_events_map_their_native_id() {
        let mut a = adapter();
        a.bind(Some(1));
        let press = a
            .handle(&NativeEvent::Pointer(PointerEvent {
                phase: PointerPhase::Down,
                position: Point::new(3.0, 3.0),
                pointer_id: 9,
            }))
            .unwrap();
        assert_eq!(press.pointer, pointer_id_from_raw(9));
        assert_eq!(press.source, InputSource::Pointer);

        // A different pointer id neither moves nor releases the session.
        assert!(
            a.handle(&NativeEvent::Pointer(PointerEvent {
                phase: PointerPhase::Move,
                position: Point::new(4.0, 3.0),
                pointer_id: 10,
            }))
            .is_none()
        );
        assert!(a.is_active());
    }

    #[test]
    fn empty_touch_start_is_ignored() {
        let mut a = adapter();
        a.bind(Some(1));
        let ev = NativeEvent::Touch(TouchEvent {
            phase: TouchPhase::Start,
            touches: smallvec![],
        });
        assert!(a.handle(&ev).is_none());
        assert!(!a.is_active());
    }
}
