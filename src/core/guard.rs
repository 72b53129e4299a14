//! Guard predicates and outgoing-edge policies.
//!
//! States decide which identities may follow them. [`NextStates`] covers the
//! common shapes of that decision (anything, an allow-list, nothing, or an
//! arbitrary [`Guard`]) so a state can hold its edges as data.

use super::identity::StateId;
use std::fmt::{self, Debug};
use std::marker::PhantomData;

/// Pure predicate over a candidate next-state identity.
///
/// # Example
///
/// ```rust
/// use statewise::core::{Guard, StateId};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Phase {
///     Handshake,
///     Transfer,
///     Closed,
/// }
///
/// impl StateId for Phase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Handshake => "Handshake",
///             Self::Transfer => "Transfer",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// let not_back_to_start = Guard::new(|next: &Phase| *next != Phase::Handshake);
///
/// assert!(not_back_to_start.check(&Phase::Transfer));
/// assert!(!not_back_to_start.check(&Phase::Handshake));
/// ```
pub struct Guard<I: StateId> {
    predicate: Box<dyn Fn(&I) -> bool + Send + Sync>,
    _phantom: PhantomData<I>,
}

impl<I: StateId> Guard<I> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and side-effect free.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Check if the guard allows moving to `next`.
    pub fn check(&self, next: &I) -> bool {
        (self.predicate)(next)
    }
}

impl<I: StateId> Debug for Guard<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

/// Outgoing-edge policy of a single state.
#[derive(Debug)]
pub enum NextStates<I: StateId> {
    /// Every identity may follow.
    Any,
    /// Only the listed identities may follow (exact comparison).
    Only(Vec<I>),
    /// Decided by a predicate.
    Guarded(Guard<I>),
    /// Nothing may follow.
    Terminal,
}

impl<I: StateId> NextStates<I> {
    /// Build an allow-list policy.
    pub fn only(allowed: impl IntoIterator<Item = I>) -> Self {
        Self::Only(allowed.into_iter().collect())
    }

    /// Check if this policy permits moving to `next`.
    pub fn permits(&self, next: &I) -> bool {
        match self {
            Self::Any => true,
            Self::Only(allowed) => allowed.contains(next),
            Self::Guarded(guard) => guard.check(next),
            Self::Terminal => false,
        }
    }
}

impl<I: StateId> Default for NextStates<I> {
    fn default() -> Self {
        Self::Any
    }
}

impl<I: StateId> From<Guard<I>> for NextStates<I> {
    fn from(guard: Guard<I>) -> Self {
        Self::Guarded(guard)
    }
}
