//! # Ewire Core
//!
//! Electric network engine for a hands-on circuit building sandbox.
//!
//! This library provides:
//! - A small set of circuit elements (sources, switches, logic gates, lamps)
//! - Wires that connect one output slot to one input slot
//! - Event-driven propagation of power through the wired network
//! - A line-oriented save format (`.ewdata`) with a pluggable object registry
//!
//! ## Architecture
//!
//! - [`components`] - Element kinds and the [`components::Element`] trait
//! - [`wire`] - Wire entities and their ends
//! - [`network`] - Component/wire arena, connect and disconnect
//! - [`propagation`] - Energize/activate passes and engine configuration
//! - [`persist`] - Save file reader, writer and registry
//! - [`session`] - Save directory management around one network
//!
//! ## Usage
//!
//! ```
//! use ewire_core::components::{ComponentKind, Lamp, Source};
//! use ewire_core::network::Transform;
//! use ewire_core::Network;
//!
//! let mut net = Network::new();
//! let source = net.add_component(ComponentKind::Source(Source::new(false)), Transform::default());
//! let lamp = net.add_component(ComponentKind::Lamp(Lamp), Transform::at(0.5, 0.0, 0.0));
//! let wire = net.add_wire(Transform::default());
//! net.connect_wire(source, wire, false, 0)?;
//! net.connect_wire(lamp, wire, true, 0)?;
//!
//! net.toggle(source)?;
//! assert!(net.is_on(lamp)?);
//! # Ok::<(), ewire_core::EwireError>(())
//! ```
//!
//! ## Propagation
//!
//! Changes enter at one component and travel forward, depth first:
//!
//! 1. The component recomputes its energized flag from its inputs
//! 2. Each output wire takes the signal the component pushes onto it
//! 3. A wire whose signal changed energizes the component at its far end
//!
//! Every pass is bounded by [`EngineConfig`] so a feedback loop ends in an
//! error rather than a stack overflow.

pub mod components;
pub mod error;
pub mod network;
pub mod persist;
pub mod propagation;
pub mod session;
pub mod wire;

#[cfg(feature = "cli")]
pub mod inspect;

// Re-export main types for convenience
pub use error::{EwireError, Result};
pub use network::Network;
pub use propagation::{CyclePolicy, EngineConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_VISITS};
pub use persist::{LoadPolicy, LoadReport, Registry};
pub use session::Session;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmNetwork;

/// File extension of save files
pub const FILE_EXTENSION: &str = "ewdata";
