//! Wires and their two ends.
//!
//! A wire is a directed edge from a component output slot (its source end)
//! to a component input slot (its sink end). Either end may be unattached
//! while the host is still building the wire; such an end reads as off and
//! not energized.

use std::fmt;

use crate::network::{Endpoint, Transform, WireId};

/// One of the two ends of a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireEnd {
    /// Bound to a component output slot
    Source,
    /// Bound to a component input slot
    Sink,
}

impl WireEnd {
    /// The end that binds to an input slot when `is_input` is set.
    pub fn for_side(is_input: bool) -> Self {
        if is_input {
            WireEnd::Sink
        } else {
            WireEnd::Source
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WireEnd::Source => "source",
            WireEnd::Sink => "sink",
        }
    }
}

impl fmt::Display for WireEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A wire placed in the network.
#[derive(Debug, Clone)]
pub struct Wire {
    pub id: WireId,
    /// Registry key written to save files
    pub object_name: String,
    /// Component output slot driving the wire
    pub source: Option<Endpoint>,
    /// Component input slot fed by the wire
    pub sink: Option<Endpoint>,
    /// Signal last pushed by the source component
    pub energized: bool,
    /// `(signal, driver on)` last delivered through the sink end
    pub(crate) last_delivery: Option<(bool, bool)>,
    pub transform: Transform,
    pub skip_save: bool,
}

impl Wire {
    pub const OBJECT_NAME: &'static str = "Wire";

    /// Create a wire with both ends unattached.
    pub fn new(id: WireId, transform: Transform) -> Self {
        Self {
            id,
            object_name: Self::OBJECT_NAME.to_string(),
            source: None,
            sink: None,
            energized: false,
            last_delivery: None,
            transform,
            skip_save: false,
        }
    }

    /// The binding of one end.
    pub fn end(&self, end: WireEnd) -> Option<Endpoint> {
        match end {
            WireEnd::Source => self.source,
            WireEnd::Sink => self.sink,
        }
    }

    pub(crate) fn end_mut(&mut self, end: WireEnd) -> &mut Option<Endpoint> {
        match end {
            WireEnd::Source => &mut self.source,
            WireEnd::Sink => &mut self.sink,
        }
    }

    /// Both ends attached.
    pub fn is_complete(&self) -> bool {
        self.source.is_some() && self.sink.is_some()
    }

    /// Signal on the wire; `false` while the source end is unattached.
    pub fn signal(&self) -> bool {
        self.source.is_some() && self.energized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::ComponentId;

    #[test]
    fn test_new_wire_is_detached() {
        let w = Wire::new(WireId(0), Transform::default());
        assert!(!w.is_complete());
        assert!(!w.signal());
        assert_eq!(w.end(WireEnd::Source), None);
        assert_eq!(w.object_name, "Wire");
    }

    #[test]
    fn test_signal_requires_source_end() {
        let mut w = Wire::new(WireId(1), Transform::default());
        w.energized = true;
        assert!(!w.signal());
        *w.end_mut(WireEnd::Source) = Some(Endpoint::new(ComponentId(0), 0));
        assert!(w.signal());
    }

    #[test]
    fn test_end_for_side() {
        assert_eq!(WireEnd::for_side(true), WireEnd::Sink);
        assert_eq!(WireEnd::for_side(false), WireEnd::Source);
    }
}
