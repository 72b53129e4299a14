//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{State, StateId};
use crate::machine::{DuplicatePolicy, LookupMode, MachineConfig, StateMachine};

/// Builder for constructing state machines with a fluent API.
///
/// States are registered in the order they are added.
pub struct StateMachineBuilder<I: StateId> {
    states: Vec<Box<dyn State<I>>>,
    config: MachineConfig,
}

impl<I: StateId> StateMachineBuilder<I> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            config: MachineConfig::default(),
        }
    }

    /// Register a state.
    pub fn state<T>(mut self, state: T) -> Self
    where
        T: State<I> + 'static,
    {
        self.states.push(Box::new(state));
        self
    }

    /// Register several already boxed states.
    pub fn states(mut self, states: impl IntoIterator<Item = Box<dyn State<I>>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set how duplicate identities are handled.
    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.config.duplicates = policy;
        self
    }

    /// Set how requested identities are resolved.
    pub fn lookup(mut self, mode: LookupMode) -> Self {
        self.config.lookup = mode;
        self
    }

    /// Refuse to build without at least one state.
    pub fn require_states(mut self) -> Self {
        self.config.require_states = true;
        self
    }

    /// Build the state machine.
    /// Returns an error if identities collide, a parent chain loops, or no
    /// states were added while `require_states` is set.
    pub fn build(self) -> Result<StateMachine<I>, BuildError> {
        StateMachine::with_config(self.states, self.config)
    }
}

impl<I: StateId> Default for StateMachineBuilder<I> {
    fn default() -> Self {
        Self::new()
    }
}
