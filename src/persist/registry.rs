//! Constructible entity types, keyed by object name.

use std::collections::HashMap;

use super::record::{RecordHeader, WireLinks};
use crate::components::{AndGate, ComponentKind, Lamp, NotGate, OrGate, Source, Switch};
use crate::error::{EwireError, Result};
use crate::network::Transform;
use crate::wire::Wire;

/// What an object name builds.
#[derive(Debug, Clone, PartialEq)]
pub enum Prototype {
    /// A component of this kind, in its default state
    Component(ComponentKind),
    /// A wire
    Wire,
}

impl Prototype {
    pub fn is_wire(&self) -> bool {
        matches!(self, Prototype::Wire)
    }
}

/// An entity built from one record, not yet placed in a network.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Component {
        object_name: String,
        kind: ComponentKind,
        transform: Transform,
    },
    Wire {
        object_name: String,
        transform: Transform,
        links: WireLinks,
    },
}

/// Lookup from object names to prototypes.
///
/// [`Registry::default`] knows every built-in kind under its default name.
/// Hosts add their own names (for example prefab names) with
/// [`Registry::register`].
#[derive(Debug, Clone)]
pub struct Registry {
    prototypes: HashMap<String, Prototype>,
}

impl Registry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            prototypes: HashMap::new(),
        }
    }

    /// Register `name`, returning the prototype it replaced.
    pub fn register(&mut self, name: impl Into<String>, prototype: Prototype) -> Option<Prototype> {
        self.prototypes.insert(name.into(), prototype)
    }

    pub fn get(&self, name: &str) -> Option<&Prototype> {
        self.prototypes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.prototypes.contains_key(name)
    }

    /// Build the entity a record describes.
    ///
    /// Pure: the network is not touched. `line` is the header's 1-indexed
    /// line number, used in errors.
    pub fn construct(&self, header: &RecordHeader, payload: &str, line: usize) -> Result<Entity> {
        let prototype = self.get(&header.object_name).ok_or_else(|| EwireError::UnknownObject {
            name: header.object_name.clone(),
            line,
        })?;
        let object_name = header.object_name.clone();
        let transform = header.transform();

        match prototype {
            Prototype::Component(kind) => {
                let mut kind = kind.clone();
                kind.element_mut()
                    .load_payload(payload)
                    .map_err(|e| EwireError::invalid_payload(&object_name, line + 1, e.to_string()))?;
                Ok(Entity::Component {
                    object_name,
                    kind,
                    transform,
                })
            }
            Prototype::Wire => {
                let links = WireLinks::parse(payload)
                    .map_err(|e| EwireError::invalid_payload(&object_name, line + 1, e.to_string()))?;
                Ok(Entity::Wire {
                    object_name,
                    transform,
                    links,
                })
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self::empty();
        let builtins = [
            ComponentKind::Source(Source::default()),
            ComponentKind::Switch(Switch::default()),
            ComponentKind::AndGate(AndGate),
            ComponentKind::OrGate(OrGate),
            ComponentKind::NotGate(NotGate),
            ComponentKind::Lamp(Lamp),
        ];
        for kind in builtins {
            registry.register(kind.default_object_name(), Prototype::Component(kind));
        }
        registry.register(Wire::OBJECT_NAME, Prototype::Wire);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(name: &str) -> RecordHeader {
        RecordHeader::new(name, &Transform::at(1.0, 0.0, 0.0))
    }

    #[test]
    fn test_builtins_registered() {
        let registry = Registry::default();
        for name in ["Source", "Switch", "GateAND", "GateOR", "GateNOT", "Lamp", "Wire"] {
            assert!(registry.contains(name), "missing {name}");
        }
        assert!(registry.get("Wire").unwrap().is_wire());
    }

    #[test]
    fn test_construct_component_applies_payload() {
        let registry = Registry::default();
        let entity = registry.construct(&header("Source"), r#"{"on":true}"#, 1).unwrap();
        match entity {
            Entity::Component { kind, transform, .. } => {
                assert_eq!(kind, ComponentKind::Source(Source::new(true)));
                assert_eq!(transform, Transform::at(1.0, 0.0, 0.0));
            }
            other => panic!("expected component, got {other:?}"),
        }
    }

    #[test]
    fn test_construct_unknown_name() {
        let err = Registry::default().construct(&header("Capacitor"), "", 5).unwrap_err();
        assert!(matches!(err, EwireError::UnknownObject { line: 5, .. }));
    }

    #[test]
    fn test_construct_bad_payload_is_not_defaulted() {
        let err = Registry::default().construct(&header("Switch"), "", 9).unwrap_err();
        assert!(matches!(err, EwireError::InvalidPayload { line: 10, .. }));
    }

    #[test]
    fn test_register_alias() {
        let mut registry = Registry::default();
        registry.register("ElectricGateAND", Prototype::Component(ComponentKind::AndGate(AndGate)));
        let entity = registry.construct(&header("ElectricGateAND"), "", 1).unwrap();
        assert!(matches!(
            entity,
            Entity::Component { kind: ComponentKind::AndGate(_), ref object_name, .. } if object_name == "ElectricGateAND"
        ));
    }
}
