//! Thread-safe handle around a state machine.

use crate::core::StateId;
use crate::machine::machine::StateMachine;
use crate::machine::transition::{Transition, TransitionError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle that serializes access to one [`StateMachine`].
///
/// Every call holds the lock for the whole operation, so validation, both
/// hooks and the pointer update happen as one step from the point of view of
/// other callers. Hooks must not call back into the same handle; the lock is
/// not reentrant and doing so deadlocks.
pub struct SharedStateMachine<I: StateId> {
    inner: Arc<Mutex<StateMachine<I>>>,
}

impl<I: StateId> SharedStateMachine<I> {
    pub fn new(machine: StateMachine<I>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(machine)),
        }
    }

    pub fn enter(&self, next: &I) -> bool {
        self.lock().enter(next)
    }

    pub fn try_enter(&self, next: &I) -> Result<Transition<I>, TransitionError<I>> {
        self.lock().try_enter(next)
    }

    pub fn can_enter(&self, next: &I) -> bool {
        self.lock().can_enter(next)
    }

    pub fn current_id(&self) -> Option<I> {
        self.lock().current_id()
    }

    /// Run `f` with exclusive access to the machine.
    ///
    /// Use this to make a check and a transition atomic together.
    pub fn with<R>(&self, f: impl FnOnce(&mut StateMachine<I>) -> R) -> R {
        f(&mut self.lock())
    }

    // A hook that panicked did so before the current pointer moved, so the
    // machine behind a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, StateMachine<I>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<I: StateId> Clone for SharedStateMachine<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I: StateId> From<StateMachine<I>> for SharedStateMachine<I> {
    fn from(machine: StateMachine<I>) -> Self {
        Self::new(machine)
    }
}
