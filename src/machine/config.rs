//! Registry and lookup configuration.

use serde::{Deserialize, Serialize};

/// What to do when two registered states share an identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail construction with `BuildError::DuplicateState`.
    #[default]
    Reject,

    /// Keep every state; lookups resolve to the first one registered.
    FirstRegisteredWins,
}

/// How a requested identity is resolved to a registered state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMode {
    /// Exact match first, then the first registered state whose identity
    /// specializes the requested one.
    #[default]
    KindOf,

    /// Exact identity match only.
    Exact,
}

/// Machine construction options.
///
/// Deserializable so hosts can keep it next to the rest of their settings:
///
/// ```rust
/// use statewise::{DuplicatePolicy, LookupMode, MachineConfig};
///
/// let config: MachineConfig = serde_json::from_str(r#"{ "lookup": "exact" }"#).unwrap();
/// assert_eq!(config.lookup, LookupMode::Exact);
/// assert_eq!(config.duplicates, DuplicatePolicy::Reject);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub duplicates: DuplicatePolicy,
    pub lookup: LookupMode,
    /// Refuse to build a machine with no states. An empty machine is valid
    /// otherwise; every `enter` on it fails with `UnknownState`.
    pub require_states: bool,
}
