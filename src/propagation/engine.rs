//! Energize and activate passes.

use tracing::{debug, trace, warn};

use super::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_VISITS};
use crate::error::{EwireError, Result};
use crate::network::{ComponentId, Network};
use crate::persist::LoadPolicy;

/// What `connect_wire` does with a wire that would close a directed loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Refuse the connection with `CycleRejected`
    #[default]
    Reject,
    /// Accept it; passes through the loop are bounded by the pass guard
    Allow,
}

/// Configuration for the propagation engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum component visits in one pass.
    pub max_visits: usize,
    /// Maximum recursion depth in one pass.
    pub max_depth: usize,
    /// Handling of loop-closing connections.
    pub cycle_policy: CyclePolicy,
    /// Handling of bad records while loading a save file.
    pub load_policy: LoadPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_visits: DEFAULT_MAX_VISITS,
            max_depth: DEFAULT_MAX_DEPTH,
            cycle_policy: CyclePolicy::default(),
            load_policy: LoadPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visit budget of a pass.
    pub fn with_max_visits(mut self, max_visits: usize) -> Self {
        self.max_visits = max_visits;
        self
    }

    /// Set the depth limit of a pass.
    ///
    /// Only enforced under [`CyclePolicy::Allow`]; an acyclic network is
    /// never deeper than its component count. Each level costs a few stack
    /// frames, so keep this well below what the host thread's stack can hold.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_cycle_policy(mut self, cycle_policy: CyclePolicy) -> Self {
        self.cycle_policy = cycle_policy;
        self
    }

    pub fn with_load_policy(mut self, load_policy: LoadPolicy) -> Self {
        self.load_policy = load_policy;
        self
    }
}

/// Bookkeeping for one propagation pass.
struct Pass {
    max_visits: usize,
    /// `None` when loops are rejected at connect time
    max_depth: Option<usize>,
    visits: usize,
    depth: usize,
}

impl Pass {
    fn new(config: &EngineConfig) -> Self {
        Self {
            max_visits: config.max_visits,
            max_depth: match config.cycle_policy {
                CyclePolicy::Allow => Some(config.max_depth),
                CyclePolicy::Reject => None,
            },
            visits: 0,
            depth: 0,
        }
    }

    fn enter(&mut self, id: ComponentId) -> Result<()> {
        self.visits += 1;
        self.depth += 1;
        let too_deep = self.max_depth.is_some_and(|max| self.depth > max);
        if self.visits > self.max_visits || too_deep {
            return Err(EwireError::propagation_limit(id, self.depth, self.visits));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

impl Network {
    /// Recompute a component from its inputs and propagate the result.
    ///
    /// `on_off` and `index` describe the delivery that triggered the call;
    /// the recompute always reads every input slot.
    pub fn energize_by_wire(&mut self, id: ComponentId, on_off: bool, index: usize) -> Result<()> {
        let mut pass = Pass::new(&self.config);
        let result = self.energize_in(&mut pass, id, on_off, index);
        finish_pass(id, &pass, result)
    }

    /// Push the component's current signal onto each attached output wire
    /// and propagate it downstream.
    pub fn activate_output(&mut self, id: ComponentId) -> Result<()> {
        let mut pass = Pass::new(&self.config);
        let result = pass.enter(id).and_then(|()| {
            self.activate_in(&mut pass, id)?;
            pass.leave();
            Ok(())
        });
        finish_pass(id, &pass, result)
    }

    /// Set the latch of a source or switch and propagate the change.
    pub fn set_toggle(&mut self, id: ComponentId, on: bool) -> Result<()> {
        let component = self.component_mut(id)?;
        if !component.kind.set_latch(on) {
            return Err(EwireError::NotToggleable {
                id,
                object_name: component.object_name.clone(),
            });
        }
        debug!(component = %id, on, "toggle");
        self.energize_by_wire(id, on, 0)
    }

    /// Flip the latch of a source or switch. Returns the new latch state.
    pub fn toggle(&mut self, id: ComponentId) -> Result<bool> {
        let component = self.component(id)?;
        let latch = component.kind.latch().ok_or_else(|| EwireError::NotToggleable {
            id,
            object_name: component.object_name.clone(),
        })?;
        self.set_toggle(id, !latch)?;
        Ok(!latch)
    }

    /// Run one pass from every component, drivers first.
    ///
    /// Brings a graph whose derived state is unknown, such as one just read
    /// from a save file, to its steady state. Every pass is attempted; the
    /// first failure is returned.
    pub fn settle(&mut self) -> Result<()> {
        let mut order: Vec<(bool, ComponentId)> = self
            .components()
            .map(|c| (!(c.kind.is_driver() || c.kind.latch().is_some()), c.id))
            .collect();
        order.sort();

        let mut first_error = None;
        for (_, id) in order {
            if let Err(e) = self.energize_by_wire(id, false, 0) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn energize_in(&mut self, pass: &mut Pass, id: ComponentId, on_off: bool, index: usize) -> Result<()> {
        pass.enter(id)?;
        let inputs = self.input_signals(id)?;
        let component = self.component_mut(id)?;
        component.energized = component.kind.element().recompute(&inputs);
        trace!(
            component = %id,
            on_off,
            index,
            energized = component.energized,
            depth = pass.depth,
            "energize"
        );
        self.activate_in(pass, id)?;
        pass.leave();
        Ok(())
    }

    fn activate_in(&mut self, pass: &mut Pass, id: ComponentId) -> Result<()> {
        let num_outputs = self.component(id)?.outputs.len();
        for output in 0..num_outputs {
            let component = self.component(id)?;
            let Some(wire_id) = component.outputs[output] else {
                continue;
            };
            let inputs = self.input_signals(id)?;
            let signal = component
                .kind
                .element()
                .activation(component.energized, &inputs, output);
            let view = (signal, component.is_on());

            let wire = self.wire_mut(wire_id)?;
            wire.energized = signal;
            let Some(sink) = wire.sink else {
                continue;
            };
            if wire.last_delivery == Some(view) {
                continue;
            }
            wire.last_delivery = Some(view);
            trace!(wire = %wire_id, signal, to = %sink, "deliver");
            if let Err(e) = self.energize_in(pass, sink.component, signal, sink.slot) {
                // The sink never finished; the next pass must deliver again.
                self.wire_mut(wire_id)?.last_delivery = None;
                return Err(e);
            }
        }
        Ok(())
    }
}

fn finish_pass(id: ComponentId, pass: &Pass, result: Result<()>) -> Result<()> {
    match &result {
        Ok(()) => debug!(component = %id, visits = pass.visits, "pass settled"),
        Err(EwireError::PropagationLimit { .. }) => {
            warn!(component = %id, visits = pass.visits, "pass aborted at limit")
        }
        Err(_) => {}
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{AndGate, ComponentKind, Lamp, NotGate, OrGate, Source, Switch};
    use crate::network::{Transform, WireId};

    fn add(net: &mut Network, kind: ComponentKind) -> ComponentId {
        net.add_component(kind, Transform::default())
    }

    fn link(net: &mut Network, from: ComponentId, out: usize, to: ComponentId, input: usize) -> WireId {
        let w = net.add_wire(Transform::default());
        net.connect_wire(from, w, false, out).unwrap();
        net.connect_wire(to, w, true, input).unwrap();
        w
    }

    /// Two sources feeding an AND gate whose output drives a lamp.
    fn and_rig() -> (Network, ComponentId, ComponentId, ComponentId, ComponentId) {
        let mut net = Network::new();
        let a = add(&mut net, ComponentKind::Source(Source::new(false)));
        let b = add(&mut net, ComponentKind::Source(Source::new(false)));
        let gate = add(&mut net, ComponentKind::AndGate(AndGate));
        let lamp = add(&mut net, ComponentKind::Lamp(Lamp));
        link(&mut net, a, 0, gate, 0);
        link(&mut net, b, 0, gate, 1);
        link(&mut net, gate, 0, lamp, 0);
        (net, a, b, gate, lamp)
    }

    #[test]
    fn test_and_gate_with_two_sources() {
        let (mut net, a, b, gate, lamp) = and_rig();
        assert!(!net.is_energized(gate).unwrap());

        net.set_toggle(a, true).unwrap();
        assert!(net.is_energized(gate).unwrap());
        assert!(net.is_on(gate).unwrap());
        assert!(!net.is_on(lamp).unwrap());

        net.set_toggle(b, true).unwrap();
        assert!(net.is_on(lamp).unwrap());

        net.set_toggle(a, false).unwrap();
        assert!(net.is_energized(gate).unwrap());
        assert!(!net.is_on(lamp).unwrap());
    }

    #[test]
    fn test_disconnect_input_leaves_no_residue() {
        let (mut net, a, b, gate, lamp) = and_rig();
        net.set_toggle(a, true).unwrap();
        net.set_toggle(b, true).unwrap();
        assert!(net.is_on(lamp).unwrap());

        net.disconnect_wire(gate, true, 0).unwrap();
        assert!(net.is_energized(gate).unwrap());
        assert!(!net.is_on(lamp).unwrap());

        net.disconnect_wire(gate, true, 1).unwrap();
        assert!(!net.is_energized(gate).unwrap());
    }

    #[test]
    fn test_disconnect_output_keeps_own_state() {
        let (mut net, a, b, gate, lamp) = and_rig();
        net.set_toggle(a, true).unwrap();
        net.set_toggle(b, true).unwrap();

        net.disconnect_wire(gate, false, 0).unwrap();
        assert!(net.is_energized(gate).unwrap());
        assert!(!net.is_on(lamp).unwrap());
    }

    #[test]
    fn test_empty_inputs_recompute_false() {
        let mut net = Network::new();
        for kind in [
            ComponentKind::AndGate(AndGate),
            ComponentKind::OrGate(OrGate),
            ComponentKind::NotGate(NotGate),
            ComponentKind::Lamp(Lamp),
            ComponentKind::Switch(Switch::new(true)),
        ] {
            let id = add(&mut net, kind);
            net.energize_by_wire(id, true, 0).unwrap();
            assert!(!net.is_energized(id).unwrap());
        }
    }

    #[test]
    fn test_switch_gates_power() {
        let mut net = Network::new();
        let s = add(&mut net, ComponentKind::Source(Source::new(true)));
        let sw = add(&mut net, ComponentKind::Switch(Switch::new(false)));
        let lamp = add(&mut net, ComponentKind::Lamp(Lamp));
        link(&mut net, s, 0, sw, 0);
        link(&mut net, sw, 0, lamp, 0);

        assert!(net.is_energized(sw).unwrap());
        assert!(!net.is_on(sw).unwrap());
        assert!(!net.is_on(lamp).unwrap());

        assert!(net.toggle(sw).unwrap());
        assert!(net.is_on(lamp).unwrap());
    }

    #[test]
    fn test_fan_out_reaches_every_branch() {
        let mut net = Network::new();
        let s = add(&mut net, ComponentKind::Source(Source::new(false)));
        let left = add(&mut net, ComponentKind::Lamp(Lamp));
        let right = add(&mut net, ComponentKind::Lamp(Lamp));
        link(&mut net, s, 0, left, 0);
        link(&mut net, s, 1, right, 0);

        net.toggle(s).unwrap();
        assert!(net.is_on(left).unwrap());
        assert!(net.is_on(right).unwrap());
    }

    #[test]
    fn test_toggle_rejects_gates() {
        let mut net = Network::new();
        let g = add(&mut net, ComponentKind::OrGate(OrGate));
        assert!(matches!(net.toggle(g), Err(EwireError::NotToggleable { .. })));
    }

    #[test]
    fn test_loop_rejected_by_default() {
        let mut net = Network::new();
        let a = add(&mut net, ComponentKind::OrGate(OrGate));
        let b = add(&mut net, ComponentKind::OrGate(OrGate));
        link(&mut net, a, 0, b, 0);

        let back = net.add_wire(Transform::default());
        net.connect_wire(b, back, false, 0).unwrap();
        let err = net.connect_wire(a, back, true, 0).unwrap_err();
        assert!(matches!(err, EwireError::CycleRejected { .. }));
        assert_eq!(net.component(a).unwrap().inputs[0], None);

        let own = net.add_wire(Transform::default());
        net.connect_wire(a, own, false, 1).unwrap();
        assert!(net.connect_wire(a, own, true, 1).is_err());
    }

    #[test]
    fn test_stable_loop_latches() {
        let mut net = Network::with_config(EngineConfig::new().with_cycle_policy(CyclePolicy::Allow));
        let s = add(&mut net, ComponentKind::Source(Source::new(false)));
        let a = add(&mut net, ComponentKind::OrGate(OrGate));
        let b = add(&mut net, ComponentKind::OrGate(OrGate));
        link(&mut net, a, 0, b, 0);
        link(&mut net, b, 0, a, 0);
        link(&mut net, s, 0, a, 1);

        net.set_toggle(s, true).unwrap();
        assert!(net.is_on(a).unwrap());
        assert!(net.is_on(b).unwrap());

        net.set_toggle(s, false).unwrap();
        assert!(net.is_on(a).unwrap());
    }

    #[test]
    fn test_oscillating_loop_hits_limit() {
        let config = EngineConfig::new()
            .with_cycle_policy(CyclePolicy::Allow)
            .with_max_visits(64);
        let mut net = Network::with_config(config);
        let not = add(&mut net, ComponentKind::NotGate(NotGate));
        let w = net.add_wire(Transform::default());
        net.connect_wire(not, w, false, 0).unwrap();

        let err = net.connect_wire(not, w, true, 0).unwrap_err();
        match err {
            EwireError::PropagationLimit { visits, .. } => assert_eq!(visits, 65),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_depth_limit() {
        let config = EngineConfig::new()
            .with_cycle_policy(CyclePolicy::Allow)
            .with_max_depth(3);
        let mut net = Network::with_config(config);
        let s = add(&mut net, ComponentKind::Source(Source::new(false)));
        let mut prev = s;
        for _ in 0..3 {
            let g = add(&mut net, ComponentKind::OrGate(OrGate));
            link(&mut net, prev, 0, g, 0);
            prev = g;
        }
        assert!(matches!(
            net.set_toggle(s, true),
            Err(EwireError::PropagationLimit { depth: 4, .. })
        ));
    }

    #[test]
    fn test_settle_restores_steady_state() {
        let (mut net, a, b, _gate, lamp) = and_rig();
        net.set_toggle(a, true).unwrap();
        net.set_toggle(b, true).unwrap();

        let mut copy = net.clone();
        for c in copy.components.iter_mut().flatten() {
            c.energized = false;
        }
        for w in copy.wires.iter_mut().flatten() {
            w.energized = false;
            w.last_delivery = None;
        }
        assert!(!copy.is_on(lamp).unwrap());

        copy.settle().unwrap();
        assert!(copy.is_on(lamp).unwrap());
    }

    fn or_chain(net: &mut Network, len: usize) -> (ComponentId, ComponentId) {
        let s = add(net, ComponentKind::Source(Source::new(false)));
        let mut prev = s;
        for _ in 0..len {
            let g = add(net, ComponentKind::OrGate(OrGate));
            link(net, prev, 0, g, 0);
            prev = g;
        }
        (s, prev)
    }

    #[test]
    fn test_long_chain_under_default_config() {
        let mut net = Network::new();
        let (s, last) = or_chain(&mut net, DEFAULT_MAX_DEPTH + 44);
        net.toggle(s).unwrap();
        assert!(net.is_on(last).unwrap());
    }

    #[test]
    fn test_aborted_pass_is_redelivered() {
        let config = EngineConfig::new()
            .with_cycle_policy(CyclePolicy::Allow)
            .with_max_depth(20);
        let mut net = Network::with_config(config.clone());
        let (s, last) = or_chain(&mut net, 40);

        assert!(matches!(
            net.set_toggle(s, true),
            Err(EwireError::PropagationLimit { depth: 21, .. })
        ));
        assert!(!net.is_on(last).unwrap());

        net.set_config(config.with_max_depth(100));
        net.activate_output(s).unwrap();
        assert!(net.is_on(last).unwrap());
    }
}
