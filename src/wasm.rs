//! WASM bindings for mermaid-sourcemap.
//!
//! Exposes a `LiveMap` class and `buildMapping` to JavaScript via
//! wasm-bindgen. The host page keeps one `LiveMap`, calls `update` on every
//! edit and `lineFor` on every element click.

use wasm_bindgen::prelude::*;

use crate::annotate::annotate;
use crate::line_map::LineMap;
use crate::resolve::resolve;

#[wasm_bindgen]
pub struct LiveMap {
    map: LineMap,
}

#[wasm_bindgen]
impl LiveMap {
    #[wasm_bindgen(constructor)]
    pub fn new() -> LiveMap {
        LiveMap {
            map: LineMap::default(),
        }
    }

    /// Replace the mapping with one built from `code`.
    pub fn update(&mut self, code: &str) {
        self.map = LineMap::from_source(code);
    }

    /// 1-based source line for a rendered element id, or `undefined`.
    #[wasm_bindgen(js_name = "lineFor")]
    pub fn line_for(&self, element_id: &str) -> Option<u32> {
        resolve(element_id, &self.map).and_then(|line| u32::try_from(line).ok())
    }

    /// Add resolvable ids and click affordances to engine SVG output.
    pub fn annotate(&self, svg: &str) -> Result<String, JsError> {
        annotate(svg)
            .map(|a| a.svg)
            .map_err(|e| JsError::new(&e.to_string()))
    }
}

impl Default for LiveMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Map `code` and return `id:line` entries in first-seen order.
#[wasm_bindgen(js_name = "buildMapping")]
pub fn build_mapping(code: &str) -> Vec<String> {
    LineMap::from_source(code)
        .iter()
        .map(|(id, line)| format!("{id}:{line}"))
        .collect()
}
