//! Validated, indexed collection of registered states.

use crate::builder::BuildError;
use crate::core::{MachineId, State, StateId};
use crate::machine::config::{DuplicatePolicy, LookupMode, MachineConfig};
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// States in registration order plus an exact-identity index.
pub(crate) struct Registry<I: StateId> {
    states: Vec<Box<dyn State<I>>>,
    index: HashMap<I, usize>,
    lookup: LookupMode,
}

impl<I: StateId> Registry<I> {
    /// Validate and index `states`, reporting every violation at once.
    pub(crate) fn new(
        states: Vec<Box<dyn State<I>>>,
        config: &MachineConfig,
    ) -> Result<Self, BuildError> {
        if let Validation::Failure(errors) = validate(&states, config) {
            let mut errors: Vec<BuildError> = errors.iter().cloned().collect();
            return Err(if errors.len() == 1 {
                errors.remove(0)
            } else {
                BuildError::Multiple(errors)
            });
        }

        let mut index = HashMap::with_capacity(states.len());
        for (position, state) in states.iter().enumerate() {
            // First registration wins when duplicates are allowed
            index.entry(state.id()).or_insert(position);
        }

        Ok(Self {
            states,
            index,
            lookup: config.lookup,
        })
    }

    /// Hand every state the id of its owning machine.
    pub(crate) fn attach_all(&mut self, machine: MachineId) {
        for state in &mut self.states {
            state.attach(machine);
        }
    }

    /// Position of the state matching `id`, if any.
    pub(crate) fn resolve(&self, id: &I) -> Option<usize> {
        self.index.get(id).copied().or_else(|| match self.lookup {
            LookupMode::Exact => None,
            LookupMode::KindOf => self
                .states
                .iter()
                .position(|state| state.id().is_kind_of(id)),
        })
    }

    /// State at `position`. Positions come from `resolve`, so always in range.
    pub(crate) fn get(&self, position: usize) -> &dyn State<I> {
        self.states[position].as_ref()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &(dyn State<I> + 'static)> + '_ {
        self.states.iter().map(Box::as_ref)
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }
}

/// Check the registry invariants, accumulating ALL violations.
fn validate<I: StateId>(
    states: &[Box<dyn State<I>>],
    config: &MachineConfig,
) -> Validation<(), NonEmptyVec<BuildError>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = Vec::new();

    if config.require_states && states.is_empty() {
        checks.push(Validation::fail(BuildError::NoStates));
    }

    let mut walked: HashSet<I> = HashSet::new();
    for state in states {
        let id = state.id();
        if walked.insert(id.clone()) && has_cyclic_parent(&id) {
            checks.push(Validation::fail(BuildError::CyclicParent {
                name: id.name().to_string(),
            }));
        }
    }

    if config.duplicates == DuplicatePolicy::Reject {
        let mut first_seen: HashMap<I, usize> = HashMap::new();
        for (position, state) in states.iter().enumerate() {
            let id = state.id();
            let check = if let Some(&first) = first_seen.get(&id) {
                Validation::fail(BuildError::DuplicateState {
                    name: id.name().to_string(),
                    first,
                    duplicate: position,
                })
            } else {
                first_seen.insert(id, position);
                Validation::success(())
            };
            checks.push(check);
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Walk the parent chain of `id`, stopping at the first repeated identity.
fn has_cyclic_parent<I: StateId>(id: &I) -> bool {
    let mut seen = HashSet::new();
    let mut cursor = Some(id.clone());
    while let Some(current) = cursor {
        if !seen.insert(current.clone()) {
            return true;
        }
        cursor = current.parent();
    }
    false
}
