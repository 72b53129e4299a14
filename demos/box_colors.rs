//! Box Color State Machine
//!
//! This example drives a colored box through five states. Each state changes
//! the box's appearance on entry, undoes it on exit, and appends to a log.
//!
//! Key concepts:
//! - Transition edges declared on the source state
//! - Side effects injected through a shared panel handle
//! - Rejected transitions leave the box untouched
//!
//! Run with: RUST_LOG=debug cargo run --example box_colors

use statewise::{state_enum, NextStates, State, StateId, StateMachineBuilder};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum BoxColor {
        Gray,
        Red,
        Green,
        Blue,
        Black,
    }
}

/// Stand-in for the view the states decorate.
#[derive(Debug)]
struct Panel {
    color: &'static str,
    opacity: f32,
    scale: f32,
    rotation: f32,
    corner_radius: f32,
    log: Vec<String>,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            color: "none",
            opacity: 1.0,
            scale: 1.0,
            rotation: 0.0,
            corner_radius: 0.0,
            log: Vec::new(),
        }
    }
}

type Effect = fn(&mut Panel);

/// One box color: its allowed successors and what it does to the panel.
struct ColorState {
    id: BoxColor,
    next: NextStates<BoxColor>,
    panel: Arc<Mutex<Panel>>,
    apply: Effect,
    undo: Effect,
}

impl ColorState {
    fn new(
        id: BoxColor,
        next: impl IntoIterator<Item = BoxColor>,
        panel: &Arc<Mutex<Panel>>,
        apply: Effect,
        undo: Effect,
    ) -> Self {
        Self {
            id,
            next: NextStates::only(next),
            panel: Arc::clone(panel),
            apply,
            undo,
        }
    }

    fn name(&self) -> String {
        self.id.name().to_lowercase()
    }
}

impl State<BoxColor> for ColorState {
    fn id(&self) -> BoxColor {
        self.id
    }

    fn is_valid_next_state(&self, next: &BoxColor) -> bool {
        self.next.permits(next)
    }

    fn did_enter(&self, _previous: Option<&dyn State<BoxColor>>) {
        let mut panel = self.panel.lock().unwrap();
        (self.apply)(&mut *panel);
        panel.log.push(format!("{} state did enter...", self.name()));
    }

    fn will_exit(&self, _next: &dyn State<BoxColor>) {
        let mut panel = self.panel.lock().unwrap();
        (self.undo)(&mut *panel);
        panel.log.push(format!("{} state will exit...", self.name()));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Box Color State Machine ===\n");

    let panel = Arc::new(Mutex::new(Panel::default()));

    let mut machine = StateMachineBuilder::new()
        .state(ColorState::new(
            BoxColor::Gray,
            [BoxColor::Red, BoxColor::Green],
            &panel,
            |p| {
                p.color = "gray";
                p.opacity = 0.2;
            },
            |p| p.opacity = 1.0,
        ))
        .state(ColorState::new(
            BoxColor::Red,
            [BoxColor::Green],
            &panel,
            |p| {
                p.color = "red";
                p.scale = 1.2;
            },
            |p| p.scale = 1.0,
        ))
        .state(ColorState::new(
            BoxColor::Green,
            [BoxColor::Blue],
            &panel,
            |p| {
                p.color = "green";
                p.rotation = 2.5;
            },
            |p| p.rotation = 0.0,
        ))
        .state(ColorState::new(
            BoxColor::Blue,
            [BoxColor::Black],
            &panel,
            |p| {
                p.color = "blue";
                p.scale = 0.1;
            },
            |p| p.scale = 1.0,
        ))
        .state(ColorState::new(
            BoxColor::Black,
            [BoxColor::Gray],
            &panel,
            |p| {
                p.color = "black";
                p.corner_radius = 20.0;
            },
            |p| p.corner_radius = 0.0,
        ))
        .build()
        .expect("box color states are distinct");

    machine.enter(&BoxColor::Gray);

    // Each "button press" moves to the next color the current one allows.
    // From gray, alternate between red and green on successive visits.
    let mut gray_visits = 0;
    for press in 1..=8 {
        let next = match machine.current_id() {
            Some(BoxColor::Gray) => {
                gray_visits += 1;
                if gray_visits % 2 == 1 {
                    BoxColor::Red
                } else {
                    BoxColor::Green
                }
            }
            Some(BoxColor::Red) => BoxColor::Green,
            Some(BoxColor::Green) => BoxColor::Blue,
            Some(BoxColor::Blue) => BoxColor::Black,
            Some(BoxColor::Black) | None => BoxColor::Gray,
        };

        match machine.try_enter(&next) {
            Ok(transition) => {
                println!("press {press}: {:?} -> {:?}", transition.from, transition.to);
            }
            Err(error) => println!("press {press}: {error}"),
        }
    }

    // The presses end on black, which only leads back to gray
    if let Err(error) = machine.try_enter(&BoxColor::Red) {
        println!("\nrejected: {error}");
    }

    let panel = panel.lock().unwrap();
    println!(
        "\nFinal panel: color={}, opacity={}, scale={}, rotation={}, corner_radius={}",
        panel.color, panel.opacity, panel.scale, panel.rotation, panel.corner_radius
    );
    println!("\nLog:");
    for line in &panel.log {
        println!("  {line}");
    }

    println!("\nMachine {} ended in {:?}", machine.id(), machine.current_id());
    println!("\n=== Example Complete ===");
}
