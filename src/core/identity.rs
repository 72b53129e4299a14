//! State identities and machine back-references.
//!
//! A [`StateId`] names a state and is what callers hand to the machine when
//! they request a transition. Identities are plain tags, usually fieldless
//! enums, so "is-a" questions are answered by walking a declared parent chain
//! instead of inspecting runtime types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use uuid::Uuid;

/// Discriminator naming a state.
///
/// # Required Traits
///
/// - `Clone` + `Eq` + `Hash`: identities index the machine's registry
/// - `Debug`: identities show up in diagnostics
/// - `Serialize` + `Deserialize`: identities can be carried in host config
///
/// # Example
///
/// ```rust
/// use statewise::core::StateId;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Shape {
///     Any,
///     Circle,
///     Square,
/// }
///
/// impl StateId for Shape {
///     fn name(&self) -> &str {
///         match self {
///             Self::Any => "Any",
///             Self::Circle => "Circle",
///             Self::Square => "Square",
///         }
///     }
///
///     fn parent(&self) -> Option<Self> {
///         match self {
///             Self::Any => None,
///             _ => Some(Self::Any),
///         }
///     }
/// }
///
/// assert!(Shape::Circle.is_kind_of(&Shape::Any));
/// assert!(Shape::Circle.is_kind_of(&Shape::Circle));
/// assert!(!Shape::Any.is_kind_of(&Shape::Circle));
/// ```
pub trait StateId:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the identity's name for display/logging.
    fn name(&self) -> &str;

    /// The identity this one specializes, if any.
    ///
    /// Parent chains must be acyclic; machines refuse to register a state
    /// whose chain loops. Default implementation returns `None`.
    fn parent(&self) -> Option<Self> {
        None
    }

    /// Check whether this identity equals `ancestor` or specializes it.
    ///
    /// Stops at the first repeated identity if the chain loops.
    fn is_kind_of(&self, ancestor: &Self) -> bool {
        let mut visited = HashSet::new();
        let mut cursor = Some(self.clone());
        while let Some(id) = cursor {
            if &id == ancestor {
                return true;
            }
            if !visited.insert(id.clone()) {
                return false;
            }
            cursor = id.parent();
        }
        false
    }
}

/// Unique identifier of a state machine instance.
///
/// States hold this value instead of a pointer to their machine, so the
/// association never creates an ownership cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineId(Uuid);

impl MachineId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Write-once slot holding the machine a state was registered with.
///
/// Embed one in a state and forward [`State::attach`](crate::core::State::attach)
/// to [`MachineLink::bind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MachineLink {
    machine: Option<MachineId>,
}

impl MachineLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the owning machine.
    ///
    /// Returns `false` and keeps the original value if the link is already
    /// bound to a different machine.
    pub fn bind(&mut self, machine: MachineId) -> bool {
        match self.machine {
            Some(existing) => existing == machine,
            None => {
                self.machine = Some(machine);
                true
            }
        }
    }

    /// The machine this link is bound to, if registered.
    pub fn machine(&self) -> Option<MachineId> {
        self.machine
    }

    pub fn is_attached(&self) -> bool {
        self.machine.is_some()
    }
}
