// Copyright 2025 the Groove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Groove Input: native pointer-input normalization for range controls.
//!
//! ## Overview
//!
//! Hosts deliver input through three native models — mouse, touch, and
//! pointer events — that differ in shape and identity semantics. This crate
//! normalizes all three at a single boundary into one abstract stream of
//! [`InputEvent`]s (`Press`, `Move`, `Release`) so downstream state machines
//! never branch on input modality.
//!
//! The central type is [`EventAdapter`]: it binds to exactly one opaque
//! target handle, tracks which native listener sets a host should have
//! attached at any moment, and owns the single-session pointer-adoption
//! policy (the first touch point wins; concurrent touches are ignored until
//! the session ends).
//!
//! ## Listener lifecycle
//!
//! While idle, only the initiating press listeners ([`ListenerSet::PRESS`])
//! are attached at [`Scope::Target`]. The moment a session becomes active,
//! the adapter additionally attaches move/release listeners
//! ([`ListenerSet::TRACK`]) at [`Scope::Wide`], so dragging keeps working
//! when the pointer leaves the target's bounds, and detaches them again on
//! release or [`EventAdapter::unbind`]. Hosts that mirror listener state
//! onto a real platform implement [`ListenerHost`]; hosts that do not can
//! use [`NoopHost`].
//!
//! `unbind` forcibly ends an active session **without** emitting a release
//! event. Callers must not rely on a release firing from unbind; this
//! asymmetry is deliberate and part of the contract.
//!
//! ## Minimal example
//!
//! ```
//! use groove_input::{EventAdapter, InputPhase, MouseEvent, MousePhase, NativeEvent, NoopHost};
//! use kurbo::Point;
//!
//! let mut adapter: EventAdapter<&str, NoopHost> = EventAdapter::new(NoopHost);
//! adapter.bind(Some("track"));
//!
//! let press = adapter
//!     .handle(&NativeEvent::Mouse(MouseEvent {
//!         phase: MousePhase::Down,
//!         position: Point::new(40.0, 8.0),
//!         button: 0,
//!     }))
//!     .expect("bound adapter accepts a mouse press");
//! assert_eq!(press.phase, InputPhase::Press);
//! assert!(adapter.is_active());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adapter;
mod events;

pub use adapter::{EventAdapter, ListenerHost, ListenerSet, NoopHost, Scope};
pub use events::{
    InputEvent, InputPhase, InputSource, MouseEvent, MousePhase, NativeEvent, PointerEvent,
    PointerId, PointerPhase, TouchEvent, TouchPhase, TouchPoint, MOUSE_POINTER, pointer_id_from_raw,
};
