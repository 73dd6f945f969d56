//! Error types for the ElectricWire engine.
//!
//! This module provides a unified error type [`EwireError`] that covers
//! all error conditions that can occur while editing a network, running a
//! propagation pass, and reading or writing save files.

use thiserror::Error;

use crate::network::{ComponentId, WireId};

/// Result type alias using [`EwireError`].
pub type Result<T> = std::result::Result<T, EwireError>;

/// Unified error type for all ElectricWire operations.
#[derive(Error, Debug)]
pub enum EwireError {
    // ============ Topology Errors ============
    /// Component handle does not refer to a live component
    #[error("Component {id} does not exist")]
    UnknownComponent { id: ComponentId },

    /// Wire handle does not refer to a live wire
    #[error("Wire {id} does not exist")]
    UnknownWire { id: WireId },

    /// Slot index beyond the component's fixed arity
    #[error("{side} slot {index} out of range for component {component} (arity {arity})")]
    SlotOutOfRange {
        component: ComponentId,
        side: &'static str,
        index: usize,
        arity: usize,
    },

    /// The wire end is already bound somewhere else
    #[error("{end} end of wire {wire} is already attached to component {component}")]
    WireEndOccupied {
        wire: WireId,
        end: &'static str,
        component: ComponentId,
    },

    /// Binding the wire would close a directed loop
    #[error("Connecting wire {wire} would create a cycle from {from} back to {to}")]
    CycleRejected {
        wire: WireId,
        from: ComponentId,
        to: ComponentId,
    },

    /// Toggle requested on a component without a latch
    #[error("Component {id} ('{object_name}') cannot be toggled")]
    NotToggleable { id: ComponentId, object_name: String },

    // ============ Propagation Errors ============
    /// Pass guard tripped
    #[error("Propagation aborted at component {component}: depth {depth}, {visits} visits exceeded the pass limit")]
    PropagationLimit {
        component: ComponentId,
        depth: usize,
        visits: usize,
    },

    // ============ Save File Errors ============
    /// Header line is not a valid record header
    #[error("Malformed record header at line {line}: {source}")]
    MalformedHeader {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// No registered prototype for the object name
    #[error("Unknown object '{name}' at line {line}")]
    UnknownObject { name: String, line: usize },

    /// Payload line could not be applied to the entity
    #[error("Invalid payload for '{object}' at line {line}: {message}")]
    InvalidPayload {
        object: String,
        line: usize,
        message: String,
    },

    /// Header line with no payload line after it
    #[error("Record at line {line} has no payload line")]
    TruncatedRecord { line: usize },

    /// Component record after the first wire record
    #[error("Component record '{name}' at line {line} follows wire records")]
    OutOfOrderRecord { name: String, line: usize },

    /// Wire payload names a component record that was not loaded
    #[error("Wire at line {line} references component record {ordinal}, which was not loaded")]
    DanglingReference { line: usize, ordinal: usize },

    /// Record could not be encoded
    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    // ============ I/O Errors ============
    /// Error reading a save file
    #[error("Failed to read save file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing or removing a save file
    #[error("Failed to write save file '{path}': {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl EwireError {
    /// Create a slot-out-of-range error
    pub fn slot_out_of_range(component: ComponentId, is_input: bool, index: usize, arity: usize) -> Self {
        Self::SlotOutOfRange {
            component,
            side: if is_input { "input" } else { "output" },
            index,
            arity,
        }
    }

    /// Create an invalid payload error
    pub fn invalid_payload(object: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            object: object.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a propagation limit error
    pub fn propagation_limit(component: ComponentId, depth: usize, visits: usize) -> Self {
        Self::PropagationLimit {
            component,
            depth,
            visits,
        }
    }

    /// Whether this error concerns a single save file record.
    ///
    /// Record errors are the ones a [`LoadPolicy::SkipRecord`] load may step over.
    ///
    /// [`LoadPolicy::SkipRecord`]: crate::persist::LoadPolicy::SkipRecord
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedHeader { .. }
                | Self::UnknownObject { .. }
                | Self::InvalidPayload { .. }
                | Self::OutOfOrderRecord { .. }
                | Self::DanglingReference { .. }
        )
    }
}
