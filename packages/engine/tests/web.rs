//! Browser checks for the real backends. Run with
//! `wasm-pack test --headless --chrome packages/engine`.

#![cfg(target_arch = "wasm32")]

use lifeview_engine::core::{packed_len, CellView, EngineError};
use lifeview_engine::render::{Backend, Palette, RenderBackend, RenderMode, SurfaceLayout};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlTexture};

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_canvas() -> HtmlCanvasElement {
    web_sys::window()
        .and_then(|w| w.document())
        .unwrap()
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap()
}

#[wasm_bindgen_test]
fn canvas2d_backend_sizes_surface_and_draws() {
    let canvas = fresh_canvas();
    let layout = SurfaceLayout::new(5, 16, 8);
    let mut backend = Backend::acquire(&canvas, RenderMode::Canvas2d, layout, &Palette::default(), true).unwrap();

    assert_eq!(canvas.width(), 16 * 6 + 1);
    assert_eq!(canvas.height(), 8 * 6 + 1);
    assert_eq!(backend.mode(), RenderMode::Canvas2d);

    let mut bytes = vec![0u8; packed_len(16, 8)];
    bytes[0] = 0b0000_0101;
    backend.draw(&CellView::new(&bytes, 16, 8)).unwrap();
}

#[wasm_bindgen_test]
fn second_context_kind_is_refused() {
    let canvas = fresh_canvas();
    let layout = SurfaceLayout::new(5, 4, 4);
    let _first = Backend::acquire(&canvas, RenderMode::Canvas2d, layout, &Palette::default(), false).unwrap();

    assert!(Backend::acquire(&canvas, RenderMode::WebGl, layout, &Palette::default(), false).is_err());
}

/// RGBA at `(x, y)` measured from the top-left corner
fn pixel_at(gl: &GL, height: u32, x: i32, y: i32) -> [u8; 4] {
    let mut out = [0u8; 4];
    gl.read_pixels_with_opt_u8_array(x, height as i32 - 1 - y, 1, 1, GL::RGBA, GL::UNSIGNED_BYTE, Some(&mut out))
        .unwrap();
    out
}

#[wasm_bindgen_test]
fn webgl_backend_draws_and_releases() {
    let canvas = fresh_canvas();
    let layout = SurfaceLayout::new(5, 4, 4);
    let mut backend = Backend::acquire(&canvas, RenderMode::WebGl, layout, &Palette::default(), true).unwrap();
    assert_eq!(backend.mode(), RenderMode::WebGl);

    // Only (0, 0) alive.
    let bytes = [0b0000_0001u8, 0];
    backend.draw(&CellView::new(&bytes, 4, 4)).unwrap();

    let gl: GL = canvas.get_context("webgl2").unwrap().unwrap().dyn_into().unwrap();
    let height = layout.canvas_height();
    assert_eq!(gl.get_error(), GL::NO_ERROR);

    // Centre of cell (0, 0), centre of cell (0, 1), then the gutter corner.
    assert_eq!(pixel_at(&gl, height, 3, 3), [0, 0, 0, 255]);
    assert_eq!(pixel_at(&gl, height, 9, 3), [255, 255, 255, 255]);
    assert_eq!(pixel_at(&gl, height, 0, 0), [204, 204, 204, 255]);

    // Gutter column between dead cells (0, 1) and (0, 2).
    assert_eq!(pixel_at(&gl, height, 12, 3), [204, 204, 204, 255]);

    // Grid off: that gutter takes the neighbouring dead cell's colour.
    backend.set_draw_grid_flag(false);
    backend.draw_cells(&CellView::new(&bytes, 4, 4)).unwrap();
    assert_eq!(pixel_at(&gl, height, 12, 3), [255, 255, 255, 255]);

    let program: WebGlProgram = gl.get_parameter(GL::CURRENT_PROGRAM).unwrap().dyn_into().unwrap();
    let texture: WebGlTexture = gl.get_parameter(GL::TEXTURE_BINDING_2D).unwrap().dyn_into().unwrap();
    assert!(gl.is_program(Some(&program)));
    assert!(gl.is_texture(Some(&texture)));

    drop(backend);
    assert!(!gl.is_program(Some(&program)));
    assert!(!gl.is_texture(Some(&texture)));
}

#[wasm_bindgen_test]
fn thrown_js_errors_keep_their_message() {
    let throwing = js_sys::Function::new_no_args("throw new Error('unknown start type')");
    let err = EngineError::from_js(throwing.call0(&wasm_bindgen::JsValue::NULL).unwrap_err());
    assert!(matches!(err, EngineError::Js(ref m) if m == "unknown start type"));

    let err = EngineError::from_js(wasm_bindgen::JsValue::from_str("plain"));
    assert_eq!(err.to_string(), "plain");
}
