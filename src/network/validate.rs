//! Network topology checks.

use std::collections::HashSet;

use super::{ComponentId, Network};
use crate::error::{EwireError, Result};
use crate::wire::WireEnd;

/// Components fed directly by the outputs of `id`.
fn downstream(network: &Network, id: ComponentId) -> Vec<ComponentId> {
    let Ok(component) = network.component(id) else {
        return Vec::new();
    };
    component
        .outputs
        .iter()
        .flatten()
        .filter_map(|&w| network.wire(w).ok())
        .filter(|wire| wire.is_complete())
        .filter_map(|wire| wire.sink.map(|sink| sink.component))
        .collect()
}

/// Whether a directed path of complete wires leads from `from` to `to`.
pub fn reaches(network: &Network, from: ComponentId, to: ComponentId) -> bool {
    let mut visited = HashSet::new();
    let mut stack = vec![from];
    while let Some(id) = stack.pop() {
        if id == to {
            return true;
        }
        if visited.insert(id) {
            stack.extend(downstream(network, id));
        }
    }
    false
}

/// Whether any component can reach itself through its outputs.
pub fn has_cycle(network: &Network) -> bool {
    network
        .components()
        .any(|c| downstream(network, c.id).into_iter().any(|next| reaches(network, next, c.id)))
}

/// Validate the slot bookkeeping of a network.
///
/// Checks:
/// - Every occupied slot names a live wire whose matching end points back at it
/// - Every attached wire end names a live component whose slot holds that wire
pub fn validate_network(network: &Network) -> Result<()> {
    for component in network.components() {
        for is_input in [true, false] {
            let end = WireEnd::for_side(is_input);
            for (slot, wire) in component.slots(is_input).iter().enumerate() {
                let Some(wire) = *wire else { continue };
                let bound = network.wire(wire)?.end(end);
                if bound.map(|e| (e.component, e.slot)) != Some((component.id, slot)) {
                    return Err(EwireError::WireEndOccupied {
                        wire,
                        end: end.name(),
                        component: component.id,
                    });
                }
            }
        }
    }

    for wire in network.wires() {
        for end in [WireEnd::Source, WireEnd::Sink] {
            let Some(bound) = wire.end(end) else { continue };
            let component = network.component(bound.component)?;
            let is_input = end == WireEnd::Sink;
            let slots = component.slots(is_input);
            match slots.get(bound.slot) {
                Some(Some(w)) if *w == wire.id => {}
                Some(_) => {
                    return Err(EwireError::WireEndOccupied {
                        wire: wire.id,
                        end: end.name(),
                        component: bound.component,
                    })
                }
                None => {
                    return Err(EwireError::slot_out_of_range(
                        bound.component,
                        is_input,
                        bound.slot,
                        slots.len(),
                    ))
                }
            }
        }
    }

    Ok(())
}
