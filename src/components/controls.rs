//! Control components: Switch.

use serde::Deserialize;

use super::{any_energized, Arity, Element, InputSignal};

/// A latching switch.
///
/// The switch is energized when any of its inputs carries a signal, but only
/// passes that signal on while its latch is closed. `is_on` reports the latch,
/// so it can differ from the energized flag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Switch {
    pub latched: bool,
}

#[derive(Deserialize)]
struct SwitchData {
    latched: bool,
}

impl Switch {
    pub const OBJECT_NAME: &'static str = "Switch";
    pub const ARITY: Arity = Arity::new(1, 2);

    /// Create a new switch.
    pub fn new(latched: bool) -> Self {
        Self { latched }
    }

    /// Set the switch state.
    pub fn set_state(&mut self, latched: bool) {
        self.latched = latched;
    }

    /// Toggle the switch state.
    pub fn toggle(&mut self) {
        self.latched = !self.latched;
    }
}

impl Element for Switch {
    fn arity(&self) -> Arity {
        Self::ARITY
    }

    fn recompute(&self, inputs: &[InputSignal]) -> bool {
        any_energized(inputs)
    }

    fn activation(&self, energized: bool, _inputs: &[InputSignal], _output: usize) -> bool {
        energized && self.latched
    }

    fn is_on(&self, _energized: bool) -> bool {
        self.latched
    }

    fn payload(&self) -> String {
        serde_json::json!({ "latched": self.latched }).to_string()
    }

    fn load_payload(&mut self, payload: &str) -> serde_json::Result<()> {
        let data: SwitchData = serde_json::from_str(payload)?;
        self.latched = data.latched;
        Ok(())
    }
}
