//! Transition records and rejection reasons.

use crate::core::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a completed transition, returned by `try_enter`.
///
/// The machine does not keep these around; hosts that want an audit trail
/// collect them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Transition<I: StateId> {
    /// The state that was current before, `None` for the first entry
    pub from: Option<I>,
    /// Identity of the registered state that became current
    pub to: I,
    /// Identity the caller asked for; differs from `to` when a parent
    /// identity resolved to a specialized state
    pub requested: I,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Why a transition was refused.
///
/// In both cases the machine is left untouched and no hook has run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError<I: StateId> {
    #[error("Transition from '{}' to '{}' is not permitted", .from.name(), .to.name())]
    NotPermitted { from: I, to: I },

    #[error("No registered state matches '{}'", .to.name())]
    UnknownState { to: I },
}

impl<I: StateId> TransitionError<I> {
    /// The identity that was requested.
    pub fn requested(&self) -> &I {
        match self {
            Self::NotPermitted { to, .. } | Self::UnknownState { to } => to,
        }
    }
}
