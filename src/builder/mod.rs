//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and macros for assembling machines
//! and states with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use state::{FnState, StateBuilder};

use crate::core::StateId;

/// Create a state that permits every transition and has no hooks.
///
/// # Example
///
/// ```
/// use statewise::builder::{simple_state, StateMachineBuilder};
/// use statewise::state_enum;
///
/// state_enum! {
///     enum Phase {
///         Setup,
///         Run,
///     }
/// }
///
/// let mut machine = StateMachineBuilder::new()
///     .state(simple_state(Phase::Setup))
///     .state(simple_state(Phase::Run))
///     .build()
///     .unwrap();
///
/// assert!(machine.enter(&Phase::Run));
/// assert!(machine.enter(&Phase::Setup));
/// ```
pub fn simple_state<I: StateId>(id: I) -> FnState<I> {
    StateBuilder::new(id).build()
}

/// Create a state that only permits transitions to `allowed`.
///
/// # Example
///
/// ```
/// use statewise::builder::{allowing_state, simple_state, StateMachineBuilder};
/// use statewise::state_enum;
///
/// state_enum! {
///     enum Phase {
///         Setup,
///         Run,
///         Done,
///     }
/// }
///
/// let mut machine = StateMachineBuilder::new()
///     .state(allowing_state(Phase::Setup, [Phase::Run]))
///     .state(allowing_state(Phase::Run, [Phase::Done]))
///     .state(simple_state(Phase::Done))
///     .build()
///     .unwrap();
///
/// assert!(machine.enter(&Phase::Setup));
/// assert!(!machine.enter(&Phase::Done));
/// assert!(machine.enter(&Phase::Run));
/// ```
pub fn allowing_state<I: StateId>(id: I, allowed: impl IntoIterator<Item = I>) -> FnState<I> {
    StateBuilder::new(id).allow(allowed).build()
}
