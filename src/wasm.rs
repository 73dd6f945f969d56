//! WASM bindings for Ewire Core.
//!
//! Lets a browser host load a save, flip sources and switches and read back
//! component state.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmNetwork } from 'ewire_core';
//!
//! await init();
//!
//! const net = new WasmNetwork();
//! net.load(await (await fetch('bench.ewdata')).text());
//! net.toggle(0);
//! console.log(net.is_on(4));
//! ```

use wasm_bindgen::prelude::*;

use crate::error::EwireError;
use crate::network::{ComponentId, Network};
use crate::persist::{self, Registry};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: EwireError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A network driven from JavaScript.
///
/// Components are addressed by their numeric handle.
#[wasm_bindgen]
pub struct WasmNetwork {
    network: Network,
    registry: Registry,
}

#[wasm_bindgen]
impl WasmNetwork {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmNetwork {
        WasmNetwork {
            network: Network::new(),
            registry: Registry::default(),
        }
    }

    /// Replace the network with the contents of save file text.
    ///
    /// Returns the number of components placed.
    #[wasm_bindgen]
    pub fn load(&mut self, text: &str) -> Result<usize, JsValue> {
        let report = persist::load_network(&mut self.network, text, &self.registry).map_err(to_js)?;
        Ok(report.components)
    }

    /// Encode the network as save file text.
    #[wasm_bindgen]
    pub fn save(&self) -> Result<String, JsValue> {
        persist::save_network(&self.network).map_err(to_js)
    }

    /// Flip a source or switch, returning its new state.
    #[wasm_bindgen]
    pub fn toggle(&mut self, id: usize) -> Result<bool, JsValue> {
        self.network.toggle(ComponentId(id)).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn is_on(&self, id: usize) -> Result<bool, JsValue> {
        self.network.is_on(ComponentId(id)).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn is_energized(&self, id: usize) -> Result<bool, JsValue> {
        self.network.is_energized(ComponentId(id)).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn component_count(&self) -> usize {
        self.network.component_count()
    }
}

impl Default for WasmNetwork {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the save file extension.
#[wasm_bindgen]
pub fn file_extension() -> String {
    crate::FILE_EXTENSION.to_string()
}
