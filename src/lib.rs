//! Statewise: a flat finite state machine with per-state transition policies
//!
//! A machine owns a fixed, ordered set of states and a single "current state"
//! cursor. Each state decides which identities may follow it, and is told
//! when it is entered and exited. There is no central transition table: the
//! graph lives on the source states.
//!
//! # Core Concepts
//!
//! - **StateId**: the tag used to name a state and request a transition
//! - **State**: identity, outgoing-edge policy, entry and exit hooks
//! - **StateMachine**: registry, current state, and the transition algorithm
//! - **Builders**: fluent construction of machines and closure-backed states
//!
//! # Example
//!
//! ```rust
//! use statewise::builder::{allowing_state, StateMachineBuilder};
//! use statewise::{state_enum, TransitionError};
//!
//! state_enum! {
//!     enum BoxColor {
//!         Gray,
//!         Red,
//!         Green,
//!         Blue,
//!     }
//! }
//!
//! let mut machine = StateMachineBuilder::new()
//!     .state(allowing_state(BoxColor::Gray, [BoxColor::Red, BoxColor::Green]))
//!     .state(allowing_state(BoxColor::Red, [BoxColor::Green]))
//!     .state(allowing_state(BoxColor::Green, [BoxColor::Blue]))
//!     .build()
//!     .unwrap();
//!
//! // The first transition is always allowed
//! assert!(machine.enter(&BoxColor::Gray));
//!
//! // Gray does not allow Blue
//! assert_eq!(
//!     machine.try_enter(&BoxColor::Blue),
//!     Err(TransitionError::NotPermitted { from: BoxColor::Gray, to: BoxColor::Blue })
//! );
//!
//! assert!(machine.enter(&BoxColor::Red));
//! assert_eq!(machine.current_id(), Some(BoxColor::Red));
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{BuildError, StateMachineBuilder};
pub use crate::core::{Guard, MachineId, MachineLink, NextStates, State, StateId};
pub use crate::machine::{
    DuplicatePolicy, LookupMode, MachineConfig, SharedStateMachine, StateMachine, Transition,
    TransitionError,
};
