//! Build errors for state machine construction.

use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No states registered. Add at least one state before building")]
    NoStates,

    #[error("State '{name}' registered more than once (positions {first} and {duplicate})")]
    DuplicateState {
        name: String,
        first: usize,
        duplicate: usize,
    },

    #[error("State '{name}' has a cyclic parent chain")]
    CyclicParent { name: String },

    #[error("{} registry errors: {}", .0.len(), join(.0))]
    Multiple(Vec<BuildError>),
}

impl BuildError {
    /// Flatten into the individual violations.
    pub fn violations(&self) -> Vec<&BuildError> {
        match self {
            Self::Multiple(errors) => errors.iter().collect(),
            single => vec![single],
        }
    }
}

fn join(errors: &[BuildError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
