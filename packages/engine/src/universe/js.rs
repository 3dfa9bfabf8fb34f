use std::cell::RefCell;

use js_sys::{Reflect, Uint8Array, WebAssembly};
use wasm_bindgen::prelude::*;

use super::{Cell, CellBytes, Universe};
use crate::core::{packed_len, EngineError, Result};

#[wasm_bindgen(module = "playground")]
extern "C" {
    /// Universe class exported by the simulation module
    #[wasm_bindgen(js_name = Universe)]
    pub type PlaygroundUniverse;

    #[wasm_bindgen(catch, static_method_of = PlaygroundUniverse, js_name = new)]
    fn create(width: u32, height: u32, start_type: u32) -> std::result::Result<PlaygroundUniverse, JsValue>;

    #[wasm_bindgen(method)]
    fn width(this: &PlaygroundUniverse) -> u32;

    #[wasm_bindgen(method)]
    fn height(this: &PlaygroundUniverse) -> u32;

    #[wasm_bindgen(method)]
    fn tick(this: &PlaygroundUniverse);

    #[wasm_bindgen(method)]
    fn cells(this: &PlaygroundUniverse) -> u32;

    #[wasm_bindgen(method)]
    fn toggle_cell(this: &PlaygroundUniverse, row: u32, col: u32);

    #[wasm_bindgen(method)]
    fn set_cell(this: &PlaygroundUniverse, row: u32, col: u32, cell: u8);

    #[wasm_bindgen(method)]
    fn get_cell(this: &PlaygroundUniverse, row: u32, col: u32) -> u8;
}

/// Universe living in a separate wasm module, reached through its JS
/// bindings and linear memory.
pub struct JsUniverse {
    inner: PlaygroundUniverse,
    memory: WebAssembly::Memory,
    width: u32,
    height: u32,
    readable: bool,
    scratch: RefCell<Vec<u8>>,
}

impl JsUniverse {
    pub fn create(memory: WebAssembly::Memory, width: u32, height: u32, start_type: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }

        let inner = PlaygroundUniverse::create(width, height, start_type).map_err(EngineError::from_js)?;
        // The module may clamp or round the requested size.
        let width = inner.width();
        let height = inner.height();
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }

        let readable = Reflect::get(inner.as_ref(), &JsValue::from_str("get_cell"))
            .map(|f| f.is_function())
            .unwrap_or(false);

        log::info!(
            "universe {}x{} created (start type {}, get_cell {})",
            width,
            height,
            start_type,
            if readable { "available" } else { "missing" }
        );

        Ok(Self {
            inner,
            memory,
            width,
            height,
            readable,
            scratch: RefCell::new(vec![0; packed_len(width, height)]),
        })
    }
}

impl Universe for JsUniverse {
    fn width(&self) -> u32 { self.width }

    fn height(&self) -> u32 { self.height }

    fn tick(&mut self) {
        self.inner.tick();
    }

    fn cells(&self) -> CellBytes<'_> {
        // Both the pointer and the ArrayBuffer go stale once the module
        // allocates: memory.grow detaches the previous buffer.
        let ptr = self.inner.cells();
        let len = packed_len(self.width, self.height) as u32;
        let buffer = self.memory.buffer();
        let bytes = Uint8Array::new_with_byte_offset_and_length(&buffer, ptr, len);
        CellBytes::from_scratch(&self.scratch, len as usize, |dst| bytes.copy_to(dst))
    }

    fn toggle_cell(&mut self, row: u32, col: u32) {
        self.inner.toggle_cell(row, col);
    }

    fn set_cell(&mut self, row: u32, col: u32, cell: Cell) {
        self.inner.set_cell(row, col, cell as u8);
    }

    fn get_cell(&self, row: u32, col: u32) -> Option<Cell> {
        self.readable.then(|| Cell::from(self.inner.get_cell(row, col)))
    }
}
