//! Writing a network as save file text.

use std::collections::HashMap;

use super::record::WireLinks;
use crate::error::Result;
use crate::network::{ComponentId, Endpoint, Network};

/// Encode every saveable component, then every saveable wire.
///
/// Each entity becomes a header line and a payload line. Wire ends bound to
/// a component that is not saved are written as unattached.
pub fn save_network(network: &Network) -> Result<String> {
    let mut out = String::new();
    let mut ordinals: HashMap<ComponentId, usize> = HashMap::new();

    for component in network.components().filter(|c| !c.skip_save) {
        ordinals.insert(component.id, ordinals.len());
        push_record(&mut out, &component.header_line()?, &component.payload());
    }

    let link = |end: Option<Endpoint>| {
        end.and_then(|e| ordinals.get(&e.component).map(|&ordinal| (ordinal, e.slot)))
    };
    for wire in network.wires().filter(|w| !w.skip_save) {
        let links = WireLinks {
            source: link(wire.source),
            sink: link(wire.sink),
        };
        push_record(&mut out, &wire.header_line()?, &links.to_line()?);
    }

    Ok(out)
}

fn push_record(out: &mut String, header: &str, payload: &str) {
    out.push_str(header);
    out.push('\n');
    out.push_str(payload);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentKind, Lamp, Source};
    use crate::network::Transform;

    #[test]
    fn test_components_before_wires() {
        let mut net = Network::new();
        let w = net.add_wire(Transform::default());
        let s = net.add_component(ComponentKind::Source(Source::new(true)), Transform::default());
        let lamp = net.add_component(ComponentKind::Lamp(Lamp), Transform::at(0.0, 1.0, 0.0));
        net.connect_wire(s, w, false, 1).unwrap();
        net.connect_wire(lamp, w, true, 0).unwrap();

        let text = save_network(&net).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains(r#""objectName":"Source""#));
        assert_eq!(lines[1], r#"{"on":true}"#);
        assert!(lines[2].contains(r#""objectName":"Lamp""#));
        assert_eq!(lines[3], "");
        assert!(lines[4].contains(r#""objectName":"Wire""#));
        assert_eq!(lines[5], r#"{"source":[0,1],"sink":[1,0]}"#);
    }

    #[test]
    fn test_skip_save_entities_are_left_out() {
        let mut net = Network::new();
        let helper = net.add_component(ComponentKind::Source(Source::new(true)), Transform::default());
        let lamp = net.add_component(ComponentKind::Lamp(Lamp), Transform::default());
        let w = net.add_wire(Transform::default());
        net.connect_wire(helper, w, false, 0).unwrap();
        net.connect_wire(lamp, w, true, 0).unwrap();
        let ghost = net.add_wire(Transform::default());
        net.set_component_skip_save(helper, true).unwrap();
        net.set_wire_skip_save(ghost, true).unwrap();

        let text = save_network(&net).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Lamp"));
        assert_eq!(lines[3], r#"{"source":null,"sink":[0,0]}"#);
    }
}
