//! Closure-backed states.

use crate::core::{Guard, MachineId, MachineLink, NextStates, State, StateId};
use std::fmt::{self, Debug};

/// Type alias for entry hooks.
type EnterHook<I> = Box<dyn Fn(Option<&dyn State<I>>) + Send + Sync>;

/// Type alias for exit hooks.
type ExitHook<I> = Box<dyn Fn(&dyn State<I>) + Send + Sync>;

/// A state whose policy and hooks are plain values and closures.
///
/// Handy when a state has no data of its own beyond what its hooks capture.
/// Built with [`StateBuilder`].
pub struct FnState<I: StateId> {
    id: I,
    next: NextStates<I>,
    on_enter: Option<EnterHook<I>>,
    on_exit: Option<ExitHook<I>>,
    link: MachineLink,
}

impl<I: StateId> FnState<I> {
    /// The machine this state was registered with, if any.
    pub fn machine(&self) -> Option<MachineId> {
        self.link.machine()
    }

    pub fn next_states(&self) -> &NextStates<I> {
        &self.next
    }
}

impl<I: StateId> State<I> for FnState<I> {
    fn id(&self) -> I {
        self.id.clone()
    }

    fn attach(&mut self, machine: MachineId) {
        let bound = self.link.bind(machine);
        debug_assert!(bound, "state {:?} is already attached to another machine", self.id);
    }

    fn is_valid_next_state(&self, next: &I) -> bool {
        self.next.permits(next)
    }

    fn did_enter(&self, previous: Option<&dyn State<I>>) {
        if let Some(hook) = &self.on_enter {
            hook(previous);
        }
    }

    fn will_exit(&self, next: &dyn State<I>) {
        if let Some(hook) = &self.on_exit {
            hook(next);
        }
    }
}

impl<I: StateId> Debug for FnState<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnState")
            .field("id", &self.id)
            .field("next", &self.next)
            .field("machine", &self.link.machine())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing closure-backed states with a fluent API.
///
/// # Example
///
/// ```rust
/// use statewise::builder::StateBuilder;
/// use statewise::state_enum;
///
/// state_enum! {
///     enum Door {
///         Open,
///         Closed,
///         Locked,
///     }
/// }
///
/// let closed = StateBuilder::new(Door::Closed)
///     .allow([Door::Open, Door::Locked])
///     .on_enter(|previous| {
///         if let Some(previous) = previous {
///             println!("closed after {:?}", previous.id());
///         }
///     })
///     .build();
/// ```
pub struct StateBuilder<I: StateId> {
    id: I,
    next: NextStates<I>,
    on_enter: Option<EnterHook<I>>,
    on_exit: Option<ExitHook<I>>,
}

impl<I: StateId> StateBuilder<I> {
    /// Create a builder for a state that permits every transition.
    pub fn new(id: I) -> Self {
        Self {
            id,
            next: NextStates::Any,
            on_enter: None,
            on_exit: None,
        }
    }

    /// Only permit transitions to the listed identities.
    pub fn allow(mut self, allowed: impl IntoIterator<Item = I>) -> Self {
        self.next = NextStates::only(allowed);
        self
    }

    /// Permit every transition (the default).
    pub fn allow_any(mut self) -> Self {
        self.next = NextStates::Any;
        self
    }

    /// Permit no outgoing transitions.
    pub fn terminal(mut self) -> Self {
        self.next = NextStates::Terminal;
        self
    }

    /// Decide outgoing transitions with a predicate.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        self.next = NextStates::Guarded(Guard::new(predicate));
        self
    }

    /// Set the hook run when this state is entered.
    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(Option<&dyn State<I>>) + Send + Sync + 'static,
    {
        self.on_enter = Some(Box::new(hook));
        self
    }

    /// Set the hook run when this state is exited.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn State<I>) + Send + Sync + 'static,
    {
        self.on_exit = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> FnState<I> {
        FnState {
            id: self.id,
            next: self.next,
            on_enter: self.on_enter,
            on_exit: self.on_exit,
            link: MachineLink::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::StateMachine;
    use serde::{Deserialize, Serialize};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    impl StateId for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
            }
        }
    }

    #[test]
    fn default_state_permits_everything() {
        let state = StateBuilder::new(TestState::Initial).build();

        assert!(state.is_valid_next_state(&TestState::Processing));
        assert!(state.is_valid_next_state(&TestState::Complete));
        assert!(state.machine().is_none());
    }

    #[test]
    fn allow_restricts_edges() {
        let state = StateBuilder::new(TestState::Initial)
            .allow([TestState::Processing])
            .build();

        assert!(state.is_valid_next_state(&TestState::Processing));
        assert!(!state.is_valid_next_state(&TestState::Complete));
    }

    #[test]
    fn terminal_blocks_edges() {
        let state = StateBuilder::new(TestState::Complete).terminal().build();

        assert!(!state.is_valid_next_state(&TestState::Initial));
    }

    #[test]
    fn when_uses_predicate() {
        let state = StateBuilder::new(TestState::Processing)
            .when(|next: &TestState| *next != TestState::Initial)
            .build();

        assert!(state.is_valid_next_state(&TestState::Complete));
        assert!(!state.is_valid_next_state(&TestState::Initial));
    }

    #[test]
    fn later_policy_replaces_earlier() {
        let state = StateBuilder::new(TestState::Initial)
            .terminal()
            .allow_any()
            .build();

        assert!(state.is_valid_next_state(&TestState::Complete));
    }

    #[test]
    fn hooks_run_through_machine() {
        let trace = Arc::new(Mutex::new(Vec::<String>::new()));
        let enter_trace = Arc::clone(&trace);
        let exit_trace = Arc::clone(&trace);

        let initial = StateBuilder::new(TestState::Initial)
            .allow([TestState::Processing])
            .on_exit(move |next| {
                exit_trace
                    .lock()
                    .unwrap()
                    .push(format!("exit to {}", next.id().name()));
            })
            .build();
        let processing = StateBuilder::new(TestState::Processing)
            .on_enter(move |previous| {
                let from = previous.map_or("none".to_string(), |s| s.id().name().to_string());
                enter_trace
                    .lock()
                    .unwrap()
                    .push(format!("enter from {from}"));
            })
            .build();

        let states: Vec<Box<dyn State<TestState>>> = vec![Box::new(initial), Box::new(processing)];
        let mut machine = StateMachine::new(states).unwrap();

        assert!(machine.enter(&TestState::Initial));
        assert!(machine.enter(&TestState::Processing));

        assert_eq!(
            *trace.lock().unwrap(),
            vec!["exit to Processing", "enter from Initial"]
        );
    }

    #[test]
    fn registration_binds_machine_link() {
        let mut state = StateBuilder::new(TestState::Initial).build();
        let machine = MachineId::new();

        state.attach(machine);

        assert_eq!(state.machine(), Some(machine));
    }

    #[test]
    fn reattaching_to_same_machine_is_allowed() {
        let mut state = StateBuilder::new(TestState::Initial).build();
        let machine = MachineId::new();

        state.attach(machine);
        state.attach(machine);

        assert_eq!(state.machine(), Some(machine));
    }

    #[test]
    #[should_panic(expected = "already attached to another machine")]
    fn attaching_to_second_machine_panics_in_debug() {
        let mut state = StateBuilder::new(TestState::Initial).build();

        state.attach(MachineId::new());
        state.attach(MachineId::new());
    }
}
