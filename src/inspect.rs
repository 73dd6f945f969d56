//! Plain-text view of a network's state.

use std::fmt::Write;

use crate::network::Network;

/// One line per component: handle, object name, energized flag, on state.
pub fn render_table(network: &Network) -> String {
    let width = network
        .components()
        .map(|c| c.object_name.len())
        .max()
        .unwrap_or(0)
        .max("object".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<6} {:<width$} {:<9} on", "id", "object", "energized");
    for c in network.components() {
        let _ = writeln!(
            out,
            "{:<6} {:<width$} {:<9} {}",
            c.id.to_string(),
            c.object_name,
            c.energized,
            c.is_on()
        );
    }
    out
}
