//! Reading save files back into a network.

use std::iter::Enumerate;
use std::str::Lines;

use tracing::{debug, warn};

use super::record::{RecordHeader, WireLinks};
use super::registry::{Entity, Prototype, Registry};
use super::LoadPolicy;
use crate::error::{EwireError, Result};
use crate::network::{ComponentId, Network, Transform};

/// One header/payload line pair, not yet interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// Line number of the header (1-indexed)
    pub line: usize,
    pub header: &'a str,
    pub payload: &'a str,
}

/// Splits save file text into line pairs.
///
/// Blank lines at the very end of the text are ignored; anywhere else a
/// blank header line is a malformed record.
pub struct RecordReader<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl<'a> RecordReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for RecordReader<'a> {
    type Item = Result<RawRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, header) = self.lines.next()?;
        if header.trim().is_empty() && self.lines.clone().all(|(_, l)| l.trim().is_empty()) {
            self.lines.by_ref().for_each(drop);
            return None;
        }
        let line = index + 1;
        match self.lines.next() {
            Some((_, payload)) => Some(Ok(RawRecord { line, header, payload })),
            None => Some(Err(EwireError::TruncatedRecord { line })),
        }
    }
}

/// Outcome of a load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Component records placed
    pub components: usize,
    /// Wire records placed
    pub wires: usize,
    /// Records stepped over under [`LoadPolicy::SkipRecord`]
    pub skipped: Vec<EwireError>,
}

enum Placed {
    Component,
    Wire,
}

/// State carried across the records of one file.
struct Loader<'r> {
    registry: &'r Registry,
    /// Handle of each component record in file order; `None` if it failed
    ordinals: Vec<Option<ComponentId>>,
    seen_wire: bool,
}

impl<'r> Loader<'r> {
    fn place(&mut self, network: &mut Network, raw: RawRecord<'_>) -> Result<Placed> {
        let header = RecordHeader::parse(raw.header, raw.line)?;
        if self.registry.get(&header.object_name).is_some_and(Prototype::is_wire) {
            self.seen_wire = true;
        }
        match self.registry.construct(&header, raw.payload, raw.line)? {
            Entity::Component {
                object_name,
                kind,
                transform,
            } => {
                if self.seen_wire {
                    return Err(EwireError::OutOfOrderRecord {
                        name: object_name,
                        line: raw.line,
                    });
                }
                let id = network.add_component(kind, transform);
                network.set_component_object_name(id, object_name)?;
                self.ordinals.push(Some(id));
                Ok(Placed::Component)
            }
            Entity::Wire {
                object_name,
                transform,
                links,
            } => {
                self.place_wire(network, raw.line, object_name, transform, links)?;
                Ok(Placed::Wire)
            }
        }
    }

    fn resolve(&self, line: usize, link: Option<(usize, usize)>) -> Result<Option<(ComponentId, usize)>> {
        let Some((ordinal, slot)) = link else {
            return Ok(None);
        };
        match self.ordinals.get(ordinal).copied().flatten() {
            Some(id) => Ok(Some((id, slot))),
            None => Err(EwireError::DanglingReference { line, ordinal }),
        }
    }

    fn place_wire(
        &mut self,
        network: &mut Network,
        line: usize,
        object_name: String,
        transform: Transform,
        links: WireLinks,
    ) -> Result<()> {
        let source = self.resolve(line, links.source)?;
        let sink = self.resolve(line, links.sink)?;
        for (end, is_input) in [(source, false), (sink, true)] {
            let Some((component, slot)) = end else { continue };
            if let Some(Some(occupant)) = network.component(component)?.slots(is_input).get(slot) {
                return Err(EwireError::invalid_payload(
                    &object_name,
                    line + 1,
                    format!("slot {slot} of {component} already holds {occupant}"),
                ));
            }
        }

        let wire = network.add_wire(transform);
        network.set_wire_object_name(wire, object_name.as_str())?;

        let ends = [(source, false), (sink, true)];
        for (end, is_input) in ends {
            let Some((component, slot)) = end else { continue };
            if let Err(e) = network.connect_wire(component, wire, is_input, slot) {
                let e = match e {
                    EwireError::SlotOutOfRange { .. }
                    | EwireError::WireEndOccupied { .. }
                    | EwireError::CycleRejected { .. } => {
                        EwireError::invalid_payload(&object_name, line + 1, e.to_string())
                    }
                    other => return Err(other),
                };
                network.remove_wire(wire)?;
                return Err(e);
            }
        }
        Ok(())
    }
}

/// Replace the contents of `network` with the records in `text`.
///
/// Records are placed in file order, then every component is settled so
/// derived state matches what live interaction would have produced. Bad
/// records are handled according to the network's [`LoadPolicy`]; with
/// [`LoadPolicy::Abort`] the records placed before the failure stay in the
/// network.
pub fn load_network(network: &mut Network, text: &str, registry: &Registry) -> Result<LoadReport> {
    network.clear();
    let policy = network.config().load_policy;
    let mut loader = Loader {
        registry,
        ordinals: Vec::new(),
        seen_wire: false,
    };
    let mut report = LoadReport::default();

    for record in RecordReader::new(text) {
        let placed = record.and_then(|raw| loader.place(network, raw));
        match placed {
            Ok(Placed::Component) => report.components += 1,
            Ok(Placed::Wire) => report.wires += 1,
            Err(e) if e.is_record_error() && policy == LoadPolicy::SkipRecord => {
                warn!(error = %e, "skipping record");
                if !loader.seen_wire {
                    loader.ordinals.push(None);
                }
                report.skipped.push(e);
            }
            Err(e) => {
                warn!(error = %e, "load aborted");
                return Err(e);
            }
        }
    }

    network.settle()?;
    debug!(
        components = report.components,
        wires = report.wires,
        skipped = report.skipped.len(),
        "load complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_pairs_lines() {
        let text = "h1\np1\nh2\n\n";
        let records: Vec<_> = RecordReader::new(text).collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], RawRecord { line: 1, header: "h1", payload: "p1" });
        assert_eq!(records[1], RawRecord { line: 3, header: "h2", payload: "" });
    }

    #[test]
    fn test_reader_handles_crlf_and_trailing_blanks() {
        let text = "h1\r\np1\r\n\r\n\r\n";
        let records: Vec<_> = RecordReader::new(text).collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].payload, "p1");
    }

    #[test]
    fn test_reader_truncated() {
        let mut reader = RecordReader::new("h1\np1\nh2");
        assert!(reader.next().unwrap().is_ok());
        assert!(matches!(reader.next().unwrap(), Err(EwireError::TruncatedRecord { line: 3 })));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_empty_text_loads_empty_network() {
        let mut net = Network::new();
        let report = load_network(&mut net, "", &Registry::default()).unwrap();
        assert_eq!(report.components, 0);
        assert!(net.is_empty());
    }
}
