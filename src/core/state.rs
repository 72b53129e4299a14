//! Core State trait for state machine states.
//!
//! A state carries an identity, decides which states may follow it, and
//! reacts to being entered and exited. The machine drives all of these; a
//! state never mutates the machine that owns it.

use super::identity::{MachineId, StateId};
use std::fmt::{self, Debug};

/// Trait for state machine states.
///
/// Every method except the identity has a default, so the smallest state is
/// a type that only names itself. By default every outgoing transition is
/// permitted and both hooks do nothing.
///
/// Hooks take `&self`. A state that needs to mutate something on entry or
/// exit should hold a handle to it (shared buffer, channel, view model)
/// passed in at construction.
///
/// # Example
///
/// ```rust
/// use statewise::core::{State, StateId};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Light {
///     Red,
///     Green,
///     Yellow,
/// }
///
/// impl StateId for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Red => "Red",
///             Self::Green => "Green",
///             Self::Yellow => "Yellow",
///         }
///     }
/// }
///
/// struct RedLight;
///
/// impl State<Light> for RedLight {
///     fn id(&self) -> Light {
///         Light::Red
///     }
///
///     fn is_valid_next_state(&self, next: &Light) -> bool {
///         *next == Light::Green
///     }
/// }
///
/// assert!(RedLight.is_valid_next_state(&Light::Green));
/// assert!(!RedLight.is_valid_next_state(&Light::Yellow));
/// ```
pub trait State<I: StateId>: Send {
    /// The identity this state is registered and requested under.
    fn id(&self) -> I;

    /// Called once by the machine when this state is registered.
    ///
    /// Default implementation ignores the id. States that want to keep the
    /// back-reference store it in a [`MachineLink`](super::MachineLink).
    fn attach(&mut self, _machine: MachineId) {}

    /// Check whether the machine may move from this state to `next`.
    ///
    /// Must be pure. Default implementation permits every identity.
    fn is_valid_next_state(&self, _next: &I) -> bool {
        true
    }

    /// Called after this state has been chosen as the next current state.
    ///
    /// `previous` is `None` for the first state the machine ever enters.
    fn did_enter(&self, _previous: Option<&dyn State<I>>) {}

    /// Called on the current state before `next` is entered.
    fn will_exit(&self, _next: &dyn State<I>) {}
}

impl<I: StateId> dyn State<I> + '_ {
    /// Is-a check: true when this state's identity is `id` or specializes it.
    pub fn is(&self, id: &I) -> bool {
        self.id().is_kind_of(id)
    }
}

impl<I: StateId> Debug for dyn State<I> + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State").field("id", &self.id()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestId {
        Idle,
        Running,
        Stopped,
    }

    impl StateId for TestId {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Running => "Running",
                Self::Stopped => "Stopped",
            }
        }
    }

    struct Plain(TestId);

    impl State<TestId> for Plain {
        fn id(&self) -> TestId {
            self.0.clone()
        }
    }

    struct Picky {
        trace: Arc<Mutex<Vec<String>>>,
    }

    impl State<TestId> for Picky {
        fn id(&self) -> TestId {
            TestId::Running
        }

        fn is_valid_next_state(&self, next: &TestId) -> bool {
            *next == TestId::Stopped
        }

        fn did_enter(&self, previous: Option<&dyn State<TestId>>) {
            let from = previous.map_or("none".to_string(), |s| s.id().name().to_string());
            self.trace.lock().unwrap().push(format!("enter from {from}"));
        }

        fn will_exit(&self, next: &dyn State<TestId>) {
            self.trace
                .lock()
                .unwrap()
                .push(format!("exit to {}", next.id().name()));
        }
    }

    #[test]
    fn default_policy_permits_everything() {
        let state = Plain(TestId::Idle);
        assert!(state.is_valid_next_state(&TestId::Idle));
        assert!(state.is_valid_next_state(&TestId::Running));
        assert!(state.is_valid_next_state(&TestId::Stopped));
    }

    #[test]
    fn overridden_policy_restricts_edges() {
        let state = Picky {
            trace: Arc::default(),
        };
        assert!(state.is_valid_next_state(&TestId::Stopped));
        assert!(!state.is_valid_next_state(&TestId::Idle));
    }

    #[test]
    fn hooks_receive_neighbouring_states() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let state = Picky {
            trace: Arc::clone(&trace),
        };
        let idle = Plain(TestId::Idle);
        let stopped = Plain(TestId::Stopped);

        state.did_enter(None);
        state.did_enter(Some(&idle));
        state.will_exit(&stopped);

        assert_eq!(
            *trace.lock().unwrap(),
            vec!["enter from none", "enter from Idle", "exit to Stopped"]
        );
    }

    #[test]
    fn is_checks_identity() {
        let state: Box<dyn State<TestId>> = Box::new(Plain(TestId::Running));
        assert!(state.is(&TestId::Running));
        assert!(!state.is(&TestId::Idle));
    }

    #[test]
    fn debug_shows_identity() {
        let state: Box<dyn State<TestId>> = Box::new(Plain(TestId::Stopped));
        assert_eq!(format!("{state:?}"), "State { id: Stopped }");
    }
}
