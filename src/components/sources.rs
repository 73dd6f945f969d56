//! Power sources.

use serde::Deserialize;

use super::{Arity, Element, InputSignal};

/// A power source.
///
/// Has no inputs. While toggled on it is energized and drives every output
/// wire high.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Source {
    pub on: bool,
}

#[derive(Deserialize)]
struct SourceData {
    on: bool,
}

impl Source {
    pub const OBJECT_NAME: &'static str = "Source";
    pub const ARITY: Arity = Arity::new(0, 2);

    /// Create a new source.
    pub fn new(on: bool) -> Self {
        Self { on }
    }

    /// Set the source state.
    pub fn set_state(&mut self, on: bool) {
        self.on = on;
    }

    /// Toggle the source state.
    pub fn toggle(&mut self) {
        self.on = !self.on;
    }
}

impl Element for Source {
    fn arity(&self) -> Arity {
        Self::ARITY
    }

    fn recompute(&self, _inputs: &[InputSignal]) -> bool {
        self.on
    }

    fn activation(&self, _energized: bool, _inputs: &[InputSignal], _output: usize) -> bool {
        self.on
    }

    fn is_on(&self, _energized: bool) -> bool {
        self.on
    }

    fn payload(&self) -> String {
        serde_json::json!({ "on": self.on }).to_string()
    }

    fn load_payload(&mut self, payload: &str) -> serde_json::Result<()> {
        let data: SourceData = serde_json::from_str(payload)?;
        self.on = data.on;
        Ok(())
    }
}
