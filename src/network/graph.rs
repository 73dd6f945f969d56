//! Network arena and the connect/disconnect lifecycle.

use tracing::debug;

use super::types::{ComponentId, Endpoint, Transform, WireId};
use super::validate::reaches;
use crate::components::{Component, ComponentKind, InputSignal};
use crate::error::{EwireError, Result};
use crate::propagation::{CyclePolicy, EngineConfig};
use crate::wire::{Wire, WireEnd};

/// Every component and wire of one construction scope.
///
/// Entities live in an arena addressed by [`ComponentId`] and [`WireId`].
/// Removing an entity leaves its slot vacant, so handles held by the host
/// never start pointing at a different entity.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub(crate) components: Vec<Option<Component>>,
    pub(crate) wires: Vec<Option<Wire>>,
    pub(crate) config: EngineConfig,
}

impl Network {
    /// Create an empty network with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an empty network with custom configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            components: Vec::new(),
            wires: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    // ============ Entities ============

    /// Place a new component with empty slots.
    pub fn add_component(&mut self, kind: ComponentKind, transform: Transform) -> ComponentId {
        let id = ComponentId(self.components.len());
        let component = Component::new(id, kind, transform);
        debug!(component = %id, object = %component.object_name, "add component");
        self.components.push(Some(component));
        id
    }

    /// Place a new wire with both ends unattached.
    pub fn add_wire(&mut self, transform: Transform) -> WireId {
        let id = WireId(self.wires.len());
        debug!(wire = %id, "add wire");
        self.wires.push(Some(Wire::new(id, transform)));
        id
    }

    pub fn component(&self, id: ComponentId) -> Result<&Component> {
        self.components
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(EwireError::UnknownComponent { id })
    }

    pub(crate) fn component_mut(&mut self, id: ComponentId) -> Result<&mut Component> {
        self.components
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(EwireError::UnknownComponent { id })
    }

    pub fn wire(&self, id: WireId) -> Result<&Wire> {
        self.wires
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(EwireError::UnknownWire { id })
    }

    pub(crate) fn wire_mut(&mut self, id: WireId) -> Result<&mut Wire> {
        self.wires
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(EwireError::UnknownWire { id })
    }

    /// Live components in handle order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter().flatten()
    }

    /// Live wires in handle order.
    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.iter().flatten()
    }

    pub fn component_count(&self) -> usize {
        self.components().count()
    }

    pub fn wire_count(&self) -> usize {
        self.wires().count()
    }

    pub fn is_empty(&self) -> bool {
        self.component_count() == 0 && self.wire_count() == 0
    }

    /// Rename the registry key a component is saved under.
    pub fn set_component_object_name(&mut self, id: ComponentId, name: impl Into<String>) -> Result<()> {
        self.component_mut(id)?.object_name = name.into();
        Ok(())
    }

    pub fn set_component_transform(&mut self, id: ComponentId, transform: Transform) -> Result<()> {
        self.component_mut(id)?.transform = transform;
        Ok(())
    }

    pub fn set_component_skip_save(&mut self, id: ComponentId, skip_save: bool) -> Result<()> {
        self.component_mut(id)?.skip_save = skip_save;
        Ok(())
    }

    pub fn set_wire_object_name(&mut self, id: WireId, name: impl Into<String>) -> Result<()> {
        self.wire_mut(id)?.object_name = name.into();
        Ok(())
    }

    pub fn set_wire_transform(&mut self, id: WireId, transform: Transform) -> Result<()> {
        self.wire_mut(id)?.transform = transform;
        Ok(())
    }

    pub fn set_wire_skip_save(&mut self, id: WireId, skip_save: bool) -> Result<()> {
        self.wire_mut(id)?.skip_save = skip_save;
        Ok(())
    }

    /// Remove a component, detaching every wire bound to it first.
    ///
    /// The wires themselves stay in the network with that end unattached.
    pub fn remove_component(&mut self, id: ComponentId) -> Result<()> {
        let (num_inputs, num_outputs) = {
            let c = self.component(id)?;
            (c.inputs.len(), c.outputs.len())
        };
        for index in 0..num_outputs {
            self.disconnect_wire(id, false, index)?;
        }
        for index in 0..num_inputs {
            self.disconnect_wire(id, true, index)?;
        }
        self.components[id.0] = None;
        debug!(component = %id, "remove component");
        Ok(())
    }

    /// Remove a wire, disconnecting both of its ends first.
    pub fn remove_wire(&mut self, id: WireId) -> Result<()> {
        let wire = self.wire(id)?;
        let (source, sink) = (wire.source, wire.sink);
        if let Some(source) = source {
            self.disconnect_wire(source.component, false, source.slot)?;
        }
        if let Some(sink) = sink {
            self.disconnect_wire(sink.component, true, sink.slot)?;
        }
        self.wires[id.0] = None;
        debug!(wire = %id, "remove wire");
        Ok(())
    }

    /// Drop every component and wire. Handles start again from zero.
    pub fn clear(&mut self) {
        self.components.clear();
        self.wires.clear();
        debug!("clear network");
    }

    // ============ Queries ============

    /// Externally observable state of a component.
    pub fn is_on(&self, id: ComponentId) -> Result<bool> {
        Ok(self.component(id)?.is_on())
    }

    /// Internal energized flag of a component.
    pub fn is_energized(&self, id: ComponentId) -> Result<bool> {
        Ok(self.component(id)?.is_energized())
    }

    /// Signal currently carried by a wire.
    pub fn wire_signal(&self, id: WireId) -> Result<bool> {
        Ok(self.wire(id)?.signal())
    }

    /// `is_on` as answered by one end of a wire.
    ///
    /// The source end reports its driving component, the sink end the
    /// component it feeds. An unattached end reports `false`.
    pub fn wire_end_is_on(&self, id: WireId, end: WireEnd) -> Result<bool> {
        let wire = self.wire(id)?;
        match wire.end(end) {
            Some(bound) => self.is_on(bound.component),
            None => Ok(false),
        }
    }

    /// `is_energized` as answered by one end of a wire.
    ///
    /// The source end reports the signal its component pushed onto the wire,
    /// the sink end the energized flag of the component it feeds. An
    /// unattached end reports `false`.
    pub fn wire_end_is_energized(&self, id: WireId, end: WireEnd) -> Result<bool> {
        let wire = self.wire(id)?;
        match (end, wire.end(end)) {
            (WireEnd::Source, Some(_)) => Ok(wire.signal()),
            (WireEnd::Sink, Some(bound)) => self.is_energized(bound.component),
            (_, None) => Ok(false),
        }
    }

    /// Snapshot of every input slot of a component.
    pub fn input_signals(&self, id: ComponentId) -> Result<Vec<InputSignal>> {
        let component = self.component(id)?;
        let signals = component
            .inputs
            .iter()
            .map(|slot| match slot.and_then(|w| self.wire(w).ok()) {
                None => InputSignal::EMPTY,
                Some(wire) => {
                    let on = wire
                        .source
                        .and_then(|src| self.component(src.component).ok())
                        .is_some_and(Component::is_on);
                    InputSignal::attached(wire.signal(), on)
                }
            })
            .collect();
        Ok(signals)
    }

    // ============ Connection Lifecycle ============

    /// Bind `wire` into input or output slot `index` of `component`.
    ///
    /// A wire already in that slot is disconnected first. Afterwards the
    /// component is re-evaluated: an input connection recomputes its
    /// energized flag, an output connection pushes its current signal onto
    /// the new wire. Both end with a propagation pass.
    pub fn connect_wire(&mut self, component: ComponentId, wire: WireId, is_input: bool, index: usize) -> Result<()> {
        let arity = self.component(component)?.slots(is_input).len();
        if index >= arity {
            return Err(EwireError::slot_out_of_range(component, is_input, index, arity));
        }

        let end = WireEnd::for_side(is_input);
        let target = Endpoint::new(component, index);
        let w = self.wire(wire)?;
        let already_bound = match w.end(end) {
            Some(bound) if bound == target => true,
            Some(bound) => {
                return Err(EwireError::WireEndOccupied {
                    wire,
                    end: end.name(),
                    component: bound.component,
                })
            }
            None => false,
        };

        let opposite = if is_input { w.source } else { w.sink };
        if let (Some(other), CyclePolicy::Reject) = (opposite, self.config.cycle_policy) {
            let (from, to) = if is_input {
                (other.component, component)
            } else {
                (component, other.component)
            };
            if from == to || reaches(self, to, from) {
                return Err(EwireError::CycleRejected { wire, from, to });
            }
        }

        if !already_bound {
            let occupant = self.component(component)?.slots(is_input)[index];
            if occupant.is_some() {
                self.disconnect_wire(component, is_input, index)?;
            }
            self.component_mut(component)?.slots_mut(is_input)[index] = Some(wire);
            let w = self.wire_mut(wire)?;
            *w.end_mut(end) = Some(target);
            w.last_delivery = None;
            debug!(%wire, %end, at = %target, "connect wire");
        }

        if is_input {
            let signal = self.wire(wire)?.signal();
            self.energize_by_wire(component, signal, index)
        } else {
            self.activate_output(component)
        }
    }

    /// Clear input or output slot `index` of `component`.
    ///
    /// Clearing an empty slot does nothing. Clearing an input recomputes the
    /// component as if the wire had never been there. Clearing an output
    /// leaves this component's state alone; the wire stops carrying a signal
    /// and whatever it still feeds is recomputed.
    pub fn disconnect_wire(&mut self, component: ComponentId, is_input: bool, index: usize) -> Result<()> {
        let slots = self.component(component)?.slots(is_input);
        let Some(slot) = slots.get(index) else {
            return Err(EwireError::slot_out_of_range(component, is_input, index, slots.len()));
        };
        let Some(wire) = *slot else {
            return Ok(());
        };

        self.component_mut(component)?.slots_mut(is_input)[index] = None;
        let end = WireEnd::for_side(is_input);
        let w = self.wire_mut(wire)?;
        *w.end_mut(end) = None;
        w.last_delivery = None;
        if !is_input {
            w.energized = false;
        }
        let sink = w.sink;
        debug!(%wire, %end, from = %Endpoint::new(component, index), "disconnect wire");

        if is_input {
            self.energize_by_wire(component, false, index)
        } else if let Some(sink) = sink {
            self.energize_by_wire(sink.component, false, sink.slot)
        } else {
            Ok(())
        }
    }
}
