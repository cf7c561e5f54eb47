// WASM bindings for the mod-three automaton.
//
// Exports a one-shot `computeModThree` function and a reusable
// `WasmModThree` class wrapping the `ModThreeHandle` from modthree-fsm.
// Rejections are thrown as `Error`s, or returned as plain objects by
// `check`, serialized with serde-wasm-bindgen.
//
// Usage from JavaScript:
//
//   computeModThree("1101");        // => 1
//   const m = new WasmModThree();
//   m.remainder("1110");            // => 2
//   m.trace("110");                 // => [0, 1, 0, 0]
//   m.check("10a1");                // => { character: "a", position: 2, reason: "NotInAlphabet" }
//   m.check("101");                 // => null

use serde::Serialize;
use wasm_bindgen::prelude::*;

use modthree_core::Residue;
use modthree_fsm::{InvalidInput, ModThreeHandle, Rejection};

// ============================================================================
// Serde-serializable DTO types for JS interop
// ============================================================================

/// Serializable representation of a rejected input.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsInvalidInput {
    character: char,
    position: usize,
    reason: &'static str,
    message: String,
}

// ============================================================================
// Conversion helpers
// ============================================================================

fn rejection_to_str(reason: Rejection) -> &'static str {
    match reason {
        Rejection::NotInAlphabet => "NotInAlphabet",
        Rejection::NoTransition => "NoTransition",
    }
}

impl From<&InvalidInput> for JsInvalidInput {
    fn from(e: &InvalidInput) -> Self {
        JsInvalidInput {
            character: e.character,
            position: e.position,
            reason: rejection_to_str(e.reason),
            message: e.to_string(),
        }
    }
}

fn invalid_input_to_js(e: InvalidInput) -> JsError {
    JsError::new(&e.to_string())
}

/// Remainder of a binary numeral divided by three.
///
/// Throws if the numeral contains anything other than `0` and `1`.
#[wasm_bindgen(js_name = "computeModThree")]
pub fn compute_mod_three(input: &str) -> Result<u8, JsError> {
    modthree_fsm::compute_mod_three(input).map_err(invalid_input_to_js)
}

// ============================================================================
// WasmModThree
// ============================================================================

/// Reusable mod-three calculator for WebAssembly.
#[wasm_bindgen]
pub struct WasmModThree {
    handle: ModThreeHandle,
}

#[wasm_bindgen]
impl WasmModThree {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmModThree {
        WasmModThree {
            handle: ModThreeHandle::new(),
        }
    }

    /// Remainder of `input` divided by three. Throws on invalid input.
    pub fn remainder(&mut self, input: &str) -> Result<u8, JsError> {
        self.handle.remainder(input).map_err(invalid_input_to_js)
    }

    /// Residues visited while reading `input`, starting with the initial 0.
    pub fn trace(&mut self, input: &str) -> Result<js_sys::Array, JsError> {
        let states = self.handle.trace(input).map_err(invalid_input_to_js)?;
        Ok(states
            .into_iter()
            .map(|r: Residue| JsValue::from(r.value()))
            .collect())
    }

    /// Validate `input` without throwing.
    ///
    /// Returns `null` if the input is a valid numeral, otherwise an object
    /// with fields `character`, `position`, `reason` and `message`.
    pub fn check(&mut self, input: &str) -> Result<JsValue, JsError> {
        match self.handle.remainder(input) {
            Ok(_) => Ok(JsValue::NULL),
            Err(e) => serde_wasm_bindgen::to_value(&JsInvalidInput::from(&e))
                .map_err(|e| JsError::new(&e.to_string())),
        }
    }

    /// Release resources held by this instance.
    pub fn terminate(self) {}
}

impl Default for WasmModThree {
    fn default() -> Self {
        Self::new()
    }
}
