// Copyright 2025 the Groove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The range-value controller.
//!
//! [`RangeControl`] is the single owner of the range state. Four input
//! sources converge on it — pointer drag, keyboard, click-step buttons, and
//! tick labels — and exactly one value and one change-event stream come
//! out. Every mutating method returns `Some(ChangeEvent)` when the mutation
//! was accepted and `None` when it was suppressed (disabled control,
//! unchanged value, non-finite candidate, or no active drag).

use hashbrown::HashMap;
use kurbo::Point;

use groove_gesture::GesturePhase;
use groove_track::{
    Direction, Orientation, TrackMetrics, fraction_from_point, fraction_from_value,
    percent_from_fraction, value_from_fraction,
};

use crate::config::{ConfigError, OnChange, RangeConfig};

bitflags::bitflags! {
    /// Presentation flags. They never feed into value computation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct ControlFlags: u8 {
        const FOCUSED  = 0b01;
        const DRAGGING = 0b10;
    }
}

/// Identifier of a tick label registered on a control.
///
/// The host owns the meaning of individual ids (an interned name, an index
/// into its own label list, a static constant).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LabelId(pub u64);

/// Keyboard intents a focusable range control responds to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Step down (horizontal start direction).
    Left,
    /// Step up.
    Right,
    /// Step up.
    Up,
    /// Step down.
    Down,
    /// Jump to `min`.
    Home,
    /// Jump to `max`.
    End,
    /// Any other key; never affects the value.
    Other,
}

/// The two click-step affordances.
///
/// Semantics are fixed: decrease always moves toward `min`, whatever the
/// reading direction. Only the visual side swaps under right-to-left (see
/// [`RangeControl::button_on_leading_side`]).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StepButton {
    /// Move one step toward `min`.
    Decrease,
    /// Move one step toward `max`.
    Increase,
}

/// Which input triggered an accepted mutation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ChangeOrigin {
    /// A pointer press on the track.
    PointerPress {
        /// Press position.
        position: Point,
    },
    /// A pointer move during an active drag.
    PointerDrag {
        /// Current position.
        position: Point,
    },
    /// The final position of a released drag.
    PointerRelease {
        /// Release position.
        position: Point,
    },
    /// A keyboard step.
    Keyboard(Key),
    /// A click-step button.
    StepButton(StepButton),
    /// A tick-label selection.
    Label(LabelId),
}

/// Record of one accepted value mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeEvent<T> {
    /// The value after the mutation, already clamped.
    pub value: f64,
    /// The input that triggered it.
    pub origin: ChangeOrigin,
    /// The bound element handle.
    pub target: T,
}

/// Read-only accessibility mirror of the range state, refreshed by every
/// mutation (`aria-valuemin`/`aria-valuemax`/`aria-valuenow` in DOM hosts).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RangeSemantics {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Current value.
    pub value: f64,
}

/// Who owns the value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Mode {
    /// The caller supplies the value; internal mutations emit candidates
    /// the caller is expected to feed back. Sticky once entered.
    Controlled,
    /// The control owns the value outright.
    Uncontrolled,
}

/// The range-input state machine: one value, one change-event stream.
///
/// ## Reconciliation
///
/// In uncontrolled mode the control is the sole owner of the value. Once an
/// external value is supplied — at construction or through
/// [`RangeControl::sync_external`] — the control is controlled for the rest
/// of its life: internal mutations still apply and emit, and the caller is
/// expected to feed the emitted value back through `sync_external`, which
/// overwrites silently.
///
/// ## Geometry staleness
///
/// Track metrics are captured once per drag session at press time and
/// reused for every subsequent [`RangeControl::drag`]. If the element
/// resizes mid-drag the cached snapshot goes stale until release; that
/// window favors intra-session consistency and is part of the contract.
pub struct RangeControl<T: Clone> {
    target: T,
    min: f64,
    max: f64,
    step: f64,
    orientation: Orientation,
    direction: Direction,
    direction_pinned: bool,
    disabled: bool,
    mode: Mode,
    value: f64,
    flags: ControlFlags,
    metrics: Option<TrackMetrics>,
    labels: HashMap<LabelId, f64>,
    on_change: Option<OnChange<T>>,
}

impl<T: Clone> core::fmt::Debug for RangeControl<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RangeControl")
            .field("value", &self.value)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .field("mode", &self.mode)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl<T: Clone> RangeControl<T> {
    /// Build a control over `target` from a validated configuration.
    ///
    /// The seed value is the external value in controlled mode, else the
    /// default value, else `min`; whatever it is, it is clamped into
    /// `[min, max]`.
    pub fn new(config: RangeConfig<T>, target: T) -> Result<Self, ConfigError> {
        config.validate()?;
        let mode = if config.value.is_some() {
            Mode::Controlled
        } else {
            Mode::Uncontrolled
        };
        let seed = config
            .value
            .or(config.default_value)
            .filter(|v| v.is_finite())
            .unwrap_or(config.min)
            .clamp(config.min, config.max);
        Ok(Self {
            target,
            min: config.min,
            max: config.max,
            step: config.step,
            orientation: config.orientation,
            direction: config.direction.unwrap_or_default(),
            direction_pinned: config.direction.is_some(),
            disabled: config.disabled,
            mode,
            value: seed,
            flags: ControlFlags::empty(),
            metrics: None,
            labels: HashMap::new(),
            on_change: config.on_change,
        })
    }

    /// The current value, always within `[min, max]`.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Step increment.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Track axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Effective reading direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether interaction is suppressed.
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the caller owns the value.
    pub fn is_controlled(&self) -> bool {
        self.mode == Mode::Controlled
    }

    /// The bound element handle.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The fraction of the track the current value occupies, for rendering.
    pub fn fraction(&self) -> f64 {
        fraction_from_value(self.value, self.min, self.max)
    }

    /// [`RangeControl::fraction`] as a percentage.
    pub fn percent(&self) -> f64 {
        percent_from_fraction(self.fraction())
    }

    /// Presentation flag: the control has keyboard focus.
    pub fn focused(&self) -> bool {
        self.flags.contains(ControlFlags::FOCUSED)
    }

    /// Presentation flag: a drag session is in progress.
    pub fn dragging(&self) -> bool {
        self.flags.contains(ControlFlags::DRAGGING)
    }

    /// Accessibility mirror of the current state.
    pub fn semantics(&self) -> RangeSemantics {
        RangeSemantics {
            min: self.min,
            max: self.max,
            value: self.value,
        }
    }

    /// Toggle the focus presentation flag. Never affects the value.
    pub fn set_focused(&mut self, focused: bool) {
        self.flags.set(ControlFlags::FOCUSED, focused);
    }

    /// Inform the control of the host's text direction.
    ///
    /// Applies only when the configuration left `direction` unset; a
    /// config-supplied direction is permanent.
    pub fn set_text_direction(&mut self, direction: Direction) {
        if !self.direction_pinned {
            self.direction = direction;
        }
    }

    /// Reconcile with an externally supplied value.
    ///
    /// `Some(v)` overwrites the internal value (clamped, no change event)
    /// and switches an uncontrolled control to controlled mode permanently.
    /// `None` leaves both the mode and the value untouched. A non-finite
    /// `v` is rejected.
    pub fn sync_external(&mut self, value: Option<f64>) {
        let Some(value) = value else {
            return;
        };
        self.mode = Mode::Controlled;
        if value.is_finite() {
            self.value = value.clamp(self.min, self.max);
        }
    }

    /// Begin a drag: capture the track metrics for the whole session and
    /// resolve the press position to a value.
    ///
    /// The metrics snapshot is not re-read until the next press, even if
    /// the element resizes (see the type-level notes on staleness).
    pub fn press(&mut self, position: Point, metrics: TrackMetrics) -> Option<ChangeEvent<T>> {
        if self.disabled {
            return None;
        }
        self.flags.insert(ControlFlags::DRAGGING);
        self.metrics = Some(metrics);
        let candidate = self.value_at(position, &metrics);
        self.commit(candidate, ChangeOrigin::PointerPress { position })
    }

    /// Continue an active drag. Uses the metrics captured at press; a call
    /// without an active drag is a no-op.
    pub fn drag(&mut self, position: Point) -> Option<ChangeEvent<T>> {
        if self.disabled || !self.dragging() {
            return None;
        }
        let metrics = self.metrics?;
        let candidate = self.value_at(position, &metrics);
        self.commit(candidate, ChangeOrigin::PointerDrag { position })
    }

    /// End an active drag, resolving the release position one last time.
    ///
    /// A release outside the track clamps like any other coordinate, so
    /// the final value is always well-defined. Updates are continuous
    /// during the drag, so this usually suppresses as unchanged.
    pub fn release(&mut self, position: Point) -> Option<ChangeEvent<T>> {
        if !self.dragging() {
            return None;
        }
        let event = if self.disabled {
            None
        } else if let Some(metrics) = self.metrics {
            let candidate = self.value_at(position, &metrics);
            self.commit(candidate, ChangeOrigin::PointerRelease { position })
        } else {
            None
        };
        self.end_drag();
        event
    }

    /// Drop drag state without resolving a value and without emitting.
    ///
    /// This is the unbind path: the gesture layer destroys its session
    /// silently, and the control must follow suit.
    pub fn cancel_drag(&mut self) {
        self.end_drag();
    }

    /// Route a recognized gesture phase to
    /// [`press`](Self::press)/[`drag`](Self::drag)/[`release`](Self::release).
    ///
    /// `metrics_at_press` is only invoked for the press phase, where the
    /// host must snapshot the track geometry.
    pub fn apply_gesture<F>(
        &mut self,
        phase: &GesturePhase<T>,
        metrics_at_press: F,
    ) -> Option<ChangeEvent<T>>
    where
        F: FnOnce() -> TrackMetrics,
    {
        match phase {
            GesturePhase::Press { position, .. } => self.press(*position, metrics_at_press()),
            GesturePhase::Drag { position, .. } => self.drag(*position),
            GesturePhase::Release { position, .. } => self.release(*position),
        }
    }

    /// Apply a keyboard intent.
    ///
    /// `Left`/`Down` step toward `min`, `Right`/`Up` toward `max`, `Home`
    /// and `End` jump to the bounds. Anything else never affects the value.
    pub fn key(&mut self, key: Key) -> Option<ChangeEvent<T>> {
        if self.disabled {
            return None;
        }
        let candidate = match key {
            Key::Left | Key::Down => self.value - self.step,
            Key::Right | Key::Up => self.value + self.step,
            Key::Home => self.min,
            Key::End => self.max,
            Key::Other => return None,
        };
        self.commit(candidate, ChangeOrigin::Keyboard(key))
    }

    /// Apply a click-step button: one step toward the button's bound.
    pub fn step_button(&mut self, button: StepButton) -> Option<ChangeEvent<T>> {
        if self.disabled {
            return None;
        }
        let candidate = match button {
            StepButton::Decrease => self.value - self.step,
            StepButton::Increase => self.value + self.step,
        };
        self.commit(candidate, ChangeOrigin::StepButton(button))
    }

    /// Which semantic button a renderer should place on the leading visual
    /// side: decrease for left-to-right, increase for right-to-left.
    pub fn button_on_leading_side(&self) -> StepButton {
        match self.direction {
            Direction::LeftToRight => StepButton::Decrease,
            Direction::RightToLeft => StepButton::Increase,
        }
    }

    /// Register (or move) a tick label bound to `value`.
    pub fn insert_label(&mut self, id: LabelId, value: f64) {
        self.labels.insert(id, value);
    }

    /// Remove a tick label, returning its bound value.
    pub fn remove_label(&mut self, id: LabelId) -> Option<f64> {
        self.labels.remove(&id)
    }

    /// Select a tick label: the value is assigned directly, bypassing the
    /// track mapping, subject to the usual clamp.
    pub fn select_label(&mut self, id: LabelId) -> Option<ChangeEvent<T>> {
        if self.disabled {
            return None;
        }
        let candidate = *self.labels.get(&id)?;
        self.commit(candidate, ChangeOrigin::Label(id))
    }

    /// The track fraction a label sits at, for rendering tick marks.
    pub fn label_fraction(&self, id: LabelId) -> Option<f64> {
        let value = *self.labels.get(&id)?;
        Some(fraction_from_value(value, self.min, self.max))
    }

    /// Iterate over the registered labels and their bound values.
    pub fn labels(&self) -> impl Iterator<Item = (LabelId, f64)> + '_ {
        self.labels.iter().map(|(&id, &value)| (id, value))
    }

    fn value_at(&self, position: Point, metrics: &TrackMetrics) -> f64 {
        let fraction = fraction_from_point(position, metrics, self.orientation, self.direction);
        value_from_fraction(fraction, self.min, self.max, self.step)
    }

    /// The single commit gate: clamp finite candidates, reject non-finite
    /// ones, suppress no-ops, emit exactly one event otherwise.
    fn commit(&mut self, candidate: f64, origin: ChangeOrigin) -> Option<ChangeEvent<T>> {
        if !candidate.is_finite() {
            return None;
        }
        let next = candidate.clamp(self.min, self.max);
        if next == self.value {
            return None;
        }
        self.value = next;
        let event = ChangeEvent {
            value: next,
            origin,
            target: self.target.clone(),
        };
        if let Some(hook) = self.on_change {
            hook(&event);
        }
        Some(event)
    }

    fn end_drag(&mut self) {
        self.flags.remove(ControlFlags::DRAGGING);
        self.metrics = None;
    }
}
