//! Core state machine types.
//!
//! This module contains the pieces a host implements or holds on to:
//! - Identities via the `StateId` trait
//! - State behavior via the `State` trait
//! - Guard predicates and outgoing-edge policies
//!
//! Nothing here performs a transition; that is the machine's job.

mod guard;
mod identity;
mod state;

pub use guard::{Guard, NextStates};
pub use identity::{MachineId, MachineLink, StateId};
pub use state::State;
