//! Indicators.

use super::{any_energized, Arity, Element, InputSignal};

/// A lamp. Lights while its input carries a signal; has no outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lamp;

impl Lamp {
    pub const OBJECT_NAME: &'static str = "Lamp";
    pub const ARITY: Arity = Arity::new(1, 0);
}

impl Element for Lamp {
    fn arity(&self) -> Arity {
        Self::ARITY
    }

    fn recompute(&self, inputs: &[InputSignal]) -> bool {
        any_energized(inputs)
    }

    fn activation(&self, _energized: bool, _inputs: &[InputSignal], _output: usize) -> bool {
        false
    }
}
