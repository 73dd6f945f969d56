//! Save file format (`.ewdata`).
//!
//! A save file is a flat list of records with no count header; end of file
//! ends the list. Each record is two lines:
//!
//! ```text
//! record   = header '\n' payload '\n'
//! header   = JSON object {objectName, positionX, positionY, positionZ,
//!                         rotationX, rotationY, rotationZ, rotationW}
//! payload  = type-specific text, empty if the type has none
//! ```
//!
//! All component records come first, then all wire records. Entities flagged
//! `skip_save` are not written.
//!
//! # Payloads
//!
//! | Object | Payload |
//! |--------|---------|
//! | `Source` | `{"on":true}` |
//! | `Switch` | `{"latched":false}` |
//! | `GateAND`, `GateOR`, `GateNOT`, `Lamp` | empty |
//! | `Wire` | `{"source":[ordinal,slot],"sink":[ordinal,slot]}` |
//!
//! A wire end refers to a component by its *ordinal*, the zero-based
//! position of its record among the component records, and is `null` when
//! unattached.
//!
//! # Example
//!
//! ```text
//! {"objectName":"Source","positionX":0.0,"positionY":1.0,"positionZ":0.0,"rotationX":0.0,"rotationY":0.0,"rotationZ":0.0,"rotationW":1.0}
//! {"on":true}
//! {"objectName":"Lamp","positionX":0.5,"positionY":1.0,"positionZ":0.0,"rotationX":0.0,"rotationY":0.0,"rotationZ":0.0,"rotationW":1.0}
//!
//! {"objectName":"Wire","positionX":0.25,"positionY":1.0,"positionZ":0.0,"rotationX":0.0,"rotationY":0.0,"rotationZ":0.0,"rotationW":1.0}
//! {"source":[0,0],"sink":[1,0]}
//! ```
//!
//! Derived state (energized flags, wire signals) is never stored. Loading
//! settles the network afterwards.

mod reader;
mod record;
mod registry;
mod writer;

pub use reader::{load_network, LoadReport, RawRecord, RecordReader};
pub use record::{RecordHeader, WireLinks};
pub use registry::{Entity, Prototype, Registry};
pub use writer::save_network;

use std::path::Path;

use crate::error::{EwireError, Result};

/// What a load does with a record it cannot place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Stop at the first bad record
    #[default]
    Abort,
    /// Report the record and continue with the next one
    SkipRecord,
}

/// Read a save file.
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| EwireError::FileRead {
        path: path.display().to_string(),
        source: e,
    })
}

/// Write save file text, replacing any existing file.
pub fn write_file(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|e| EwireError::FileWrite {
        path: path.display().to_string(),
        source: e,
    })
}
