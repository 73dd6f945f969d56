//! Component models for the propagation engine.
//!
//! This module provides the closed set of element kinds a network can hold:
//! - Sources: Source
//! - Controls: Switch
//! - Gates: AND, OR, NOT
//! - Indicators: Lamp
//!
//! Each kind implements [`Element`], which tells the engine how to derive the
//! component's energized flag from its inputs and which signal to push onto
//! each output wire.

mod controls;
mod gates;
mod indicators;
mod sources;

pub use controls::Switch;
pub use gates::{AndGate, NotGate, OrGate};
pub use indicators::Lamp;
pub use sources::Source;

use crate::network::{ComponentId, Transform, WireId};

/// Snapshot of one input slot as seen from the component that owns it.
///
/// An empty slot, or a wire whose source end is unattached, reads as all
/// `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSignal {
    /// A wire occupies the slot
    pub attached: bool,
    /// Signal carried by the wire
    pub energized: bool,
    /// Externally observable state of the component driving the wire
    pub on: bool,
}

impl InputSignal {
    /// An empty slot.
    pub const EMPTY: InputSignal = InputSignal {
        attached: false,
        energized: false,
        on: false,
    };

    pub fn attached(energized: bool, on: bool) -> Self {
        Self {
            attached: true,
            energized,
            on,
        }
    }

    /// Whether the slot is attached and its driver reports on.
    pub fn is_on(&self) -> bool {
        self.attached && self.on
    }
}

/// OR over the energized state of every attached input.
pub fn any_energized(inputs: &[InputSignal]) -> bool {
    inputs.iter().any(|input| input.attached && input.energized)
}

/// Number of input and output slots of an element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub inputs: usize,
    pub outputs: usize,
}

impl Arity {
    pub const fn new(inputs: usize, outputs: usize) -> Self {
        Self { inputs, outputs }
    }
}

/// Behaviour shared by every element kind.
pub trait Element {
    /// Fixed slot counts.
    fn arity(&self) -> Arity;

    /// Derive the energized flag from the current inputs.
    fn recompute(&self, inputs: &[InputSignal]) -> bool;

    /// Signal pushed onto output slot `output`.
    fn activation(&self, energized: bool, inputs: &[InputSignal], output: usize) -> bool;

    /// Externally observable state.
    fn is_on(&self, energized: bool) -> bool {
        energized
    }

    /// Type-specific save data; empty when the kind has none.
    fn payload(&self) -> String {
        String::new()
    }

    /// Restore type-specific save data.
    fn load_payload(&mut self, _payload: &str) -> serde_json::Result<()> {
        Ok(())
    }
}

/// The element kind of a component.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Source(Source),
    Switch(Switch),
    AndGate(AndGate),
    OrGate(OrGate),
    NotGate(NotGate),
    Lamp(Lamp),
}

impl ComponentKind {
    /// Registry name used when the host does not supply one.
    pub fn default_object_name(&self) -> &'static str {
        match self {
            ComponentKind::Source(_) => Source::OBJECT_NAME,
            ComponentKind::Switch(_) => Switch::OBJECT_NAME,
            ComponentKind::AndGate(_) => AndGate::OBJECT_NAME,
            ComponentKind::OrGate(_) => OrGate::OBJECT_NAME,
            ComponentKind::NotGate(_) => NotGate::OBJECT_NAME,
            ComponentKind::Lamp(_) => Lamp::OBJECT_NAME,
        }
    }

    /// Borrow the kind through its [`Element`] interface.
    pub fn element(&self) -> &dyn Element {
        match self {
            ComponentKind::Source(s) => s,
            ComponentKind::Switch(s) => s,
            ComponentKind::AndGate(g) => g,
            ComponentKind::OrGate(g) => g,
            ComponentKind::NotGate(g) => g,
            ComponentKind::Lamp(l) => l,
        }
    }

    /// Mutably borrow the kind through its [`Element`] interface.
    pub fn element_mut(&mut self) -> &mut dyn Element {
        match self {
            ComponentKind::Source(s) => s,
            ComponentKind::Switch(s) => s,
            ComponentKind::AndGate(g) => g,
            ComponentKind::OrGate(g) => g,
            ComponentKind::NotGate(g) => g,
            ComponentKind::Lamp(l) => l,
        }
    }

    /// Current latch of a toggleable kind.
    pub fn latch(&self) -> Option<bool> {
        match self {
            ComponentKind::Source(s) => Some(s.on),
            ComponentKind::Switch(s) => Some(s.latched),
            _ => None,
        }
    }

    /// Set the latch of a toggleable kind. Returns `false` for kinds without one.
    pub fn set_latch(&mut self, on: bool) -> bool {
        match self {
            ComponentKind::Source(s) => {
                s.set_state(on);
                true
            }
            ComponentKind::Switch(s) => {
                s.set_state(on);
                true
            }
            _ => false,
        }
    }

    /// Whether the kind can drive its outputs without any energized input.
    pub fn is_driver(&self) -> bool {
        matches!(self, ComponentKind::Source(_) | ComponentKind::NotGate(_))
    }
}

/// A component placed in the network.
#[derive(Debug, Clone)]
pub struct Component {
    pub id: ComponentId,
    /// Registry key written to save files
    pub object_name: String,
    pub kind: ComponentKind,
    pub inputs: Vec<Option<WireId>>,
    pub outputs: Vec<Option<WireId>>,
    pub energized: bool,
    pub transform: Transform,
    /// Helper components that never reach a save file
    pub skip_save: bool,
}

impl Component {
    /// Create a component with empty slots sized from the kind's arity.
    ///
    /// The energized flag starts out as the kind derives it from empty inputs.
    pub fn new(id: ComponentId, kind: ComponentKind, transform: Transform) -> Self {
        let arity = kind.element().arity();
        let energized = kind.element().recompute(&[]);
        Self {
            id,
            object_name: kind.default_object_name().to_string(),
            kind,
            inputs: vec![None; arity.inputs],
            outputs: vec![None; arity.outputs],
            energized,
            transform,
            skip_save: false,
        }
    }

    /// Externally observable state.
    pub fn is_on(&self) -> bool {
        self.kind.element().is_on(self.energized)
    }

    pub fn is_energized(&self) -> bool {
        self.energized
    }

    pub fn arity(&self) -> Arity {
        self.kind.element().arity()
    }

    /// Slots of one side.
    pub fn slots(&self, is_input: bool) -> &[Option<WireId>] {
        if is_input {
            &self.inputs
        } else {
            &self.outputs
        }
    }

    pub(crate) fn slots_mut(&mut self, is_input: bool) -> &mut [Option<WireId>] {
        if is_input {
            &mut self.inputs
        } else {
            &mut self.outputs
        }
    }

    /// Type-specific save data.
    pub fn payload(&self) -> String {
        self.kind.element().payload()
    }

    /// Restore type-specific save data.
    pub fn load_payload(&mut self, payload: &str) -> serde_json::Result<()> {
        self.kind.element_mut().load_payload(payload)
    }
}
