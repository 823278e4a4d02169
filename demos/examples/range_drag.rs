// Copyright 2025 the Groove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full-stack wiring: native events → adapter → recognizer → range control.
//!
//! A scripted host feeds mouse and touch streams through the whole pipeline
//! and prints the resulting change events, including the cases that must
//! stay silent (concurrent touches, releases at an unchanged position,
//! unbind teardown).
//!
//! Run:
//! - `cargo run -p groove_demos --example range_drag`

use groove_gesture::GestureRecognizer;
use groove_input::{
    ListenerHost, ListenerSet, MouseEvent, MousePhase, NativeEvent, Scope, TouchEvent, TouchPhase,
    TouchPoint,
};
use groove_range::{
    ChangeEvent, Direction, Key, LabelId, Orientation, RangeConfig, RangeControl, StepButton,
    TrackMetrics,
};
use kurbo::{Point, Rect};

/// A host that narrates the listener bookkeeping the adapter asks for.
struct PrintingHost {
    next_id: u32,
}

impl ListenerHost for PrintingHost {
    type ListenerId = u32;

    fn attach(&mut self, scope: Scope, set: ListenerSet) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        println!("  [host] attach {set:?} at {scope:?} -> #{id}");
        id
    }

    fn detach(&mut self, id: u32) {
        println!("  [host] detach #{id}");
    }

    fn suppress_default_scroll(&mut self, suppress: bool) {
        println!("  [host] default scroll suppressed: {suppress}");
    }
}

fn report(label: &str, event: Option<ChangeEvent<&'static str>>) {
    match event {
        Some(event) => println!("  {label}: value {} ({:?})", event.value, event.origin),
        None => println!("  {label}: (suppressed)"),
    }
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

fn main() {
    // A 200 px wide horizontal track over 0..=100, stepping by 5.
    let metrics = TrackMetrics::from_rect(Rect::new(0.0, 0.0, 200.0, 16.0));
    let mut config: RangeConfig<&str> = RangeConfig::new(0.0, 100.0);
    config.step = 5.0;
    let mut control = RangeControl::new(config, "volume").expect("config is valid");
    control.insert_label(LabelId(1), 25.0);

    let mut recognizer = GestureRecognizer::new(PrintingHost { next_id: 0 });
    recognizer.bind(Some("volume"));

    println!("mouse drag across the track:");
    for event in [
        mouse(MousePhase::Down, 100.0, 8.0),
        mouse(MousePhase::Move, 151.0, 8.0),
        mouse(MousePhase::Move, 151.0, 8.0), // unchanged: suppressed
        mouse(MousePhase::Move, 400.0, 8.0), // past the edge: clamps
        mouse(MousePhase::Up, 400.0, 8.0),
    ] {
        if let Some(phase) = recognizer.handle(&event) {
            report("pointer", control.apply_gesture(&phase, || metrics));
        }
    }

    println!("touch drag; a second concurrent contact stays ignored:");
    for event in [
        touch(TouchPhase::Start, &[(10, 40.0, 8.0)]),
        touch(TouchPhase::Start, &[(11, 190.0, 8.0)]), // ignored entirely
        touch(TouchPhase::Move, &[(11, 10.0, 8.0)]),   // wrong contact: dropped
        touch(TouchPhase::Move, &[(10, 60.0, 8.0)]),
        touch(TouchPhase::End, &[(10, 60.0, 8.0)]),
    ] {
        if let Some(phase) = recognizer.handle(&event) {
            report("pointer", control.apply_gesture(&phase, || metrics));
        }
    }

    println!("keyboard and buttons:");
    report("key Right", control.key(Key::Right));
    report("key Home", control.key(Key::Home));
    report("key Home again", control.key(Key::Home));
    report("button +", control.step_button(StepButton::Increase));
    report("label 25", control.select_label(LabelId(1)));

    println!("a vertical right-to-left control maps bottom-up:");
    let mut vertical_config: RangeConfig<&str> = RangeConfig::new(0.0, 10.0);
    vertical_config.orientation = Orientation::Vertical;
    vertical_config.direction = Some(Direction::RightToLeft);
    let mut vertical = RangeControl::new(vertical_config, "zoom").expect("config is valid");
    let tall = TrackMetrics::from_rect(Rect::new(0.0, 0.0, 16.0, 300.0));
    report("press", vertical.press(Point::new(8.0, 250.0), tall));
    report("release", vertical.release(Point::new(8.0, 250.0)));

    println!("unbind mid-drag tears down silently:");
    recognizer.handle(&mouse(MousePhase::Down, 100.0, 8.0));
    recognizer.unbind();
    control.cancel_drag();
    println!(
        "  final: value {} ({}%), dragging {}",
        control.value(),
        control.percent(),
        control.dragging()
    );
}
