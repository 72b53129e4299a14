//! State machine that validates and performs transitions.

use crate::builder::BuildError;
use crate::core::{MachineId, State, StateId};
use crate::machine::config::MachineConfig;
use crate::machine::registry::Registry;
use crate::machine::transition::{Transition, TransitionError};
use chrono::{DateTime, Utc};
use std::fmt::{self, Debug};
use std::time::Duration;
use tracing::{debug, info};

/// Single-active-state machine over a fixed set of registered states.
///
/// The current state is absent until the first successful [`enter`]; after
/// that it always points at one of the registered states. The current state
/// decides which identities may follow it.
///
/// [`enter`]: StateMachine::enter
pub struct StateMachine<I: StateId> {
    id: MachineId,
    config: MachineConfig,
    registry: Registry<I>,
    current: Option<usize>,
    entered_at: Option<DateTime<Utc>>,
}

impl<I: StateId> StateMachine<I> {
    /// Create a machine over `states` with the default configuration.
    ///
    /// Every state is attached to the new machine before this returns.
    pub fn new(states: Vec<Box<dyn State<I>>>) -> Result<Self, BuildError> {
        Self::with_config(states, MachineConfig::default())
    }

    /// Create a machine over `states` with an explicit configuration.
    pub fn with_config(
        states: Vec<Box<dyn State<I>>>,
        config: MachineConfig,
    ) -> Result<Self, BuildError> {
        let id = MachineId::new();
        let mut registry = Registry::new(states, &config)?;
        registry.attach_all(id);

        debug!(machine = %id, states = registry.len(), "registered states");

        Ok(Self {
            id,
            config,
            registry,
            current: None,
            entered_at: None,
        })
    }

    pub fn id(&self) -> MachineId {
        self.id
    }

    pub fn config(&self) -> MachineConfig {
        self.config
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> Option<&dyn State<I>> {
        self.current.map(|position| self.registry.get(position))
    }

    /// Get current state identity (pure)
    pub fn current_id(&self) -> Option<I> {
        self.current_state().map(|state| state.id())
    }

    /// Check whether the current state is `id` or a specialization of it.
    pub fn is_in(&self, id: &I) -> bool {
        self.current_state().is_some_and(|state| state.is(id))
    }

    /// Registered states in registration order.
    pub fn states(&self) -> impl Iterator<Item = &(dyn State<I> + 'static)> + '_ {
        self.registry.iter()
    }

    pub fn state_count(&self) -> usize {
        self.registry.len()
    }

    /// Time elapsed since the current state was entered.
    pub fn time_in_state(&self) -> Option<Duration> {
        self.entered_at
            .and_then(|at| Utc::now().signed_duration_since(at).to_std().ok())
    }

    /// Check whether `next` may be entered from the current state (pure).
    ///
    /// Always true before the first transition.
    pub fn can_enter(&self, next: &I) -> bool {
        self.check(next).is_ok()
    }

    /// Resolve an identity to a registered state.
    ///
    /// An exact match always wins, even over a specialization registered
    /// earlier: with `[Circle, Any]`, asking for `Any` returns the second
    /// state. Without an exact match, and unless lookup is `Exact`, the first
    /// registered state (in registration order) whose identity specializes
    /// `id` is returned.
    pub fn state_for_id(&self, id: &I) -> Option<&dyn State<I>> {
        self.registry
            .resolve(id)
            .map(|position| self.registry.get(position))
    }

    /// Enter `next` if the current state permits it and a registered state
    /// matches. Returns whether the transition happened.
    pub fn enter(&mut self, next: &I) -> bool {
        self.try_enter(next).is_ok()
    }

    /// Enter `next`, reporting why the transition was refused.
    ///
    /// On success the old state's `will_exit` runs first, then the new
    /// state's `did_enter`, and only then does the current state change. On
    /// failure nothing runs and nothing changes.
    pub fn try_enter(&mut self, next: &I) -> Result<Transition<I>, TransitionError<I>> {
        if let Err(error) = self.check(next) {
            debug!(machine = %self.id, to = next.name(), %error, "transition rejected");
            return Err(error);
        }

        let Some(position) = self.registry.resolve(next) else {
            let error = TransitionError::UnknownState { to: next.clone() };
            debug!(machine = %self.id, to = next.name(), %error, "transition rejected");
            return Err(error);
        };

        let resolved = self.registry.get(position);
        let previous = self.current_state();

        if let Some(previous) = previous {
            previous.will_exit(resolved);
        }
        resolved.did_enter(previous);

        let transition = Transition {
            from: previous.map(|state| state.id()),
            to: resolved.id(),
            requested: next.clone(),
            timestamp: Utc::now(),
        };

        self.current = Some(position);
        self.entered_at = Some(transition.timestamp);

        info!(
            machine = %self.id,
            from = transition.from.as_ref().map(|id| id.name()),
            to = transition.to.name(),
            "entered state"
        );

        Ok(transition)
    }

    fn check(&self, next: &I) -> Result<(), TransitionError<I>> {
        match self.current_state() {
            Some(current) if !current.is_valid_next_state(next) => {
                Err(TransitionError::NotPermitted {
                    from: current.id(),
                    to: next.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl<I: StateId> Debug for StateMachine<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("current", &self.current_id())
            .field("states", &self.registry.len())
            .finish()
    }
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::core::NextStates;
    use crate::machine::config::{DuplicatePolicy, LookupMode};
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Mode {
        Menu,
        Playing,
        Level1,
        Level2,
        Paused,
    }

    impl StateId for Mode {
        fn name(&self) -> &str {
            match self {
                Self::Menu => "Menu",
                Self::Playing => "Playing",
                Self::Level1 => "Level1",
                Self::Level2 => "Level2",
                Self::Paused => "Paused",
            }
        }

        fn parent(&self) -> Option<Self> {
            match self {
                Self::Level1 | Self::Level2 => Some(Self::Playing),
                _ => None,
            }
        }
    }

    struct ModeState {
        id: Mode,
        next: NextStates<Mode>,
    }

    impl State<Mode> for ModeState {
        fn id(&self) -> Mode {
            self.id.clone()
        }

        fn is_valid_next_state(&self, next: &Mode) -> bool {
            self.next.permits(next)
        }
    }

    fn mode(id: Mode, next: NextStates<Mode>) -> Box<dyn State<Mode>> {
        Box::new(ModeState { id, next })
    }

    fn game(config: MachineConfig) -> StateMachine<Mode> {
        StateMachine::with_config(
            vec![
                mode(Mode::Menu, NextStates::only([Mode::Playing])),
                mode(Mode::Level1, NextStates::only([Mode::Paused, Mode::Level2])),
                mode(Mode::Level2, NextStates::only([Mode::Paused, Mode::Menu])),
                mode(Mode::Paused, NextStates::Any),
            ],
            config,
        )
        .unwrap()
    }

    #[test]
    fn parent_identity_resolves_to_first_specialization() {
        let mut machine = game(MachineConfig::default());

        assert!(machine.enter(&Mode::Menu));
        let transition = machine.try_enter(&Mode::Playing).unwrap();

        assert_eq!(transition.requested, Mode::Playing);
        assert_eq!(transition.to, Mode::Level1);
        assert!(machine.is_in(&Mode::Playing));
        assert_eq!(machine.current_id(), Some(Mode::Level1));
    }

    #[test]
    fn exact_lookup_refuses_parent_identity() {
        let config = MachineConfig {
            lookup: LookupMode::Exact,
            ..MachineConfig::default()
        };
        let mut machine = game(config);

        assert!(machine.enter(&Mode::Menu));
        assert_eq!(
            machine.try_enter(&Mode::Playing).unwrap_err(),
            TransitionError::UnknownState { to: Mode::Playing }
        );
        assert_eq!(machine.current_id(), Some(Mode::Menu));
    }

    #[test]
    fn multi_step_workflow() {
        let mut machine = game(MachineConfig::default());

        assert!(machine.enter(&Mode::Menu));
        assert!(machine.enter(&Mode::Playing));
        assert!(machine.enter(&Mode::Level2));
        assert!(machine.enter(&Mode::Paused));
        assert!(machine.enter(&Mode::Menu));
        assert!(!machine.enter(&Mode::Paused));

        assert_eq!(machine.current_id(), Some(Mode::Menu));
    }

    #[test]
    fn duplicates_allowed_resolve_to_first() {
        let config = MachineConfig {
            duplicates: DuplicatePolicy::FirstRegisteredWins,
            ..MachineConfig::default()
        };
        let mut machine = StateMachine::with_config(
            vec![
                mode(Mode::Menu, NextStates::Terminal),
                mode(Mode::Menu, NextStates::Any),
            ],
            config,
        )
        .unwrap();

        assert!(machine.enter(&Mode::Menu));
        // The first registration is terminal, so nothing may follow
        assert!(!machine.can_enter(&Mode::Menu));
    }
}
