//! Network representation and topology checks.
//!
//! This module provides the arena that holds every component and wire of a
//! construction scope. The [`Network`] struct owns the entities, hands out
//! stable handles, and implements the connect/disconnect lifecycle. The
//! propagation passes that run on it live in [`crate::propagation`].

mod graph;
mod types;
mod validate;

pub use graph::Network;
pub use types::*;
pub use validate::{has_cycle, reaches, validate_network};
