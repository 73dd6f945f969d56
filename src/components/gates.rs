//! Logic gates: AND, OR, NOT.
//!
//! All three derive their energized flag as the OR over attached inputs and
//! have no on/off state of their own, so `is_on` equals the energized flag.
//! They differ only in the signal they push onto their outputs.

use super::{any_energized, Arity, Element, InputSignal};

/// Two-input AND gate.
///
/// The energized flag is OR-derived like every other gate. The output is
/// high only when the gate is energized and both input slot 0 and input
/// slot 1 are attached to drivers that report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AndGate;

impl AndGate {
    pub const OBJECT_NAME: &'static str = "GateAND";
    pub const ARITY: Arity = Arity::new(2, 2);
}

impl Element for AndGate {
    fn arity(&self) -> Arity {
        Self::ARITY
    }

    fn recompute(&self, inputs: &[InputSignal]) -> bool {
        any_energized(inputs)
    }

    fn activation(&self, energized: bool, inputs: &[InputSignal], _output: usize) -> bool {
        let slot_on = |i: usize| inputs.get(i).is_some_and(InputSignal::is_on);
        energized && slot_on(0) && slot_on(1)
    }
}

/// Two-input OR gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrGate;

impl OrGate {
    pub const OBJECT_NAME: &'static str = "GateOR";
    pub const ARITY: Arity = Arity::new(2, 2);
}

impl Element for OrGate {
    fn arity(&self) -> Arity {
        Self::ARITY
    }

    fn recompute(&self, inputs: &[InputSignal]) -> bool {
        any_energized(inputs)
    }

    fn activation(&self, energized: bool, _inputs: &[InputSignal], _output: usize) -> bool {
        energized
    }
}

/// Inverter.
///
/// Drives its outputs high while its input is not energized, including when
/// nothing is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotGate;

impl NotGate {
    pub const OBJECT_NAME: &'static str = "GateNOT";
    pub const ARITY: Arity = Arity::new(1, 2);
}

impl Element for NotGate {
    fn arity(&self) -> Arity {
        Self::ARITY
    }

    fn recompute(&self, inputs: &[InputSignal]) -> bool {
        any_energized(inputs)
    }

    fn activation(&self, energized: bool, _inputs: &[InputSignal], _output: usize) -> bool {
        !energized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every slot state an AND input can be in: empty, attached off, attached on.
    fn slot_states() -> [InputSignal; 3] {
        [
            InputSignal::EMPTY,
            InputSignal::attached(false, false),
            InputSignal::attached(true, true),
        ]
    }

    #[test]
    fn test_and_gate_truth_table() {
        for a in slot_states() {
            for b in slot_states() {
                let inputs = [a, b];
                let energized = AndGate.recompute(&inputs);
                assert_eq!(energized, a.energized || b.energized);

                let expected = energized && a.is_on() && b.is_on();
                assert_eq!(AndGate.activation(energized, &inputs, 0), expected);
                assert_eq!(AndGate.is_on(energized), energized);
            }
        }
    }

    #[test]
    fn test_and_gate_single_input_energizes_but_stays_low() {
        let inputs = [InputSignal::attached(true, true), InputSignal::EMPTY];
        let energized = AndGate.recompute(&inputs);
        assert!(energized);
        assert!(!AndGate.activation(energized, &inputs, 0));
    }

    #[test]
    fn test_and_gate_requires_own_energized_flag() {
        // Drivers report on but carry no signal: the OR-derived flag stays low.
        let inputs = [InputSignal::attached(false, true), InputSignal::attached(false, true)];
        assert!(!AndGate.recompute(&inputs));
        assert!(!AndGate.activation(false, &inputs, 1));
    }

    #[test]
    fn test_or_gate() {
        let inputs = [InputSignal::EMPTY, InputSignal::attached(true, true)];
        assert!(OrGate.activation(OrGate.recompute(&inputs), &inputs, 0));
        assert!(!OrGate.recompute(&[InputSignal::EMPTY, InputSignal::EMPTY]));
    }

    #[test]
    fn test_not_gate() {
        let empty = [InputSignal::EMPTY];
        assert!(NotGate.activation(NotGate.recompute(&empty), &empty, 0));

        let powered = [InputSignal::attached(true, true)];
        let energized = NotGate.recompute(&powered);
        assert!(energized);
        assert!(!NotGate.activation(energized, &powered, 0));
    }
}
