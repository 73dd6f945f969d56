//! Signal propagation engine.
//!
//! This module drives every state change through the network. An external
//! event (a wire attached or detached, a source toggled) starts one
//! *propagation pass* at a component:
//!
//! 1. `energize_by_wire` recomputes the component's energized flag from its
//!    current input slots through the kind's [`Element::recompute`]
//! 2. `activate_output` evaluates [`Element::activation`] for every attached
//!    output slot and stores the signal on that wire
//! 3. each wire whose sink end is attached delivers the signal to the
//!    component it feeds, which repeats from step 1
//!
//! The pass runs depth first and to completion before control returns.
//!
//! ## Termination
//!
//! A delivery is skipped when the receiving component already saw the same
//! signal and driver state on that wire, so a pass settles as soon as the
//! graph stops changing. Stable loops such as two OR gates feeding each other
//! therefore terminate. Oscillating loops (an inverter feeding itself) never
//! settle; every pass carries a visit budget, plus a depth limit when loops
//! are allowed, and reports [`EwireError::PropagationLimit`] when one is
//! exceeded. Wires on an aborted path are delivered again by the next pass.
//! By default loops are refused when the closing wire is connected
//! ([`CyclePolicy::Reject`]).
//!
//! [`Element::recompute`]: crate::components::Element::recompute
//! [`Element::activation`]: crate::components::Element::activation
//! [`EwireError::PropagationLimit`]: crate::error::EwireError::PropagationLimit

mod engine;

pub use engine::{CyclePolicy, EngineConfig};

/// Default number of component visits allowed in one pass.
pub const DEFAULT_MAX_VISITS: usize = 10_000;

/// Default recursion depth allowed in one pass when loops are allowed.
pub const DEFAULT_MAX_DEPTH: usize = 256;
