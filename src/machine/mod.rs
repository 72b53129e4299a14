//! The state machine and everything it needs to run transitions.
//!
//! # Key Concepts
//!
//! - **Registry**: the fixed, validated set of states a machine owns
//! - **State Machine**: tracks the current state and performs transitions
//! - **Transition**: the record returned when a transition completes
//! - **Shared handle**: mutex-guarded access for multi-threaded hosts
//!
//! A transition runs synchronously: the current state's policy is asked,
//! the target is resolved, the old state's exit hook runs, the new state's
//! entry hook runs, and only then does the current state change.

mod config;
#[allow(clippy::module_inception)]
mod machine;
mod registry;
mod shared;
mod transition;

pub use config::{DuplicatePolicy, LookupMode, MachineConfig};
pub use machine::StateMachine;
pub use shared::SharedStateMachine;
pub use transition::{Transition, TransitionError};
