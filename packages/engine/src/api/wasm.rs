use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Array, Function, WebAssembly};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::pointer::PointerBindings;
use super::scheduler::RafScheduler;
use crate::animation::now_ms;
use crate::core::{EngineError, Result};
use crate::game::{GameConfig, GameController};
use crate::render::{Backend, RenderMode};
use crate::universe::{JsUniverse, Universe};

pub(crate) type WebController = GameController<JsUniverse, Backend, RafScheduler>;

type FpsListener = Rc<RefCell<Option<Function>>>;

/// Run `f` on the controller if it is still alive and not already borrowed.
/// Errors are logged: a throwing event or frame callback would only surface
/// as an uncaught exception in the console anyway.
pub(crate) fn with_controller<F>(weak: &Weak<RefCell<WebController>>, what: &str, f: F)
where
    F: FnOnce(&mut WebController) -> Result<()>,
{
    let Some(rc) = weak.upgrade() else {
        return;
    };
    let result = match rc.try_borrow_mut() {
        Ok(mut controller) => f(&mut controller),
        Err(_) => {
            log::warn!("{}: controller busy, event dropped", what);
            return;
        }
    };
    if let Err(e) = result {
        log::error!("{} failed: {}", what, e);
    }
}

/// Game of Life view bound to one canvas
#[wasm_bindgen]
pub struct GameOfLife {
    controller: Rc<RefCell<WebController>>,
    config: GameConfig,
    fps_listener: FpsListener,
    pointer: Option<PointerBindings>,
}

#[wasm_bindgen]
impl GameOfLife {
    /// Create the universe, size `canvas`, acquire the configured backend
    /// and draw the initial state. Fails without leaving anything running.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        memory: WebAssembly::Memory,
        config_json: Option<String>,
    ) -> std::result::Result<GameOfLife, JsValue> {
        Ok(Self::create(canvas, memory, config_json.as_deref())?)
    }

    /// Identifiers accepted as `renderMode`
    #[wasm_bindgen(js_name = renderModes)]
    pub fn render_modes() -> Array {
        RenderMode::ALL.iter().map(|m| JsValue::from_str(m.id())).collect()
    }

    pub fn start(&self) -> std::result::Result<(), JsValue> {
        Ok(self.controller.borrow_mut().start()?)
    }

    pub fn stop(&self) {
        self.controller.borrow_mut().stop();
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.controller.borrow().is_playing()
    }

    pub fn draw(&self) -> std::result::Result<(), JsValue> {
        Ok(self.controller.borrow_mut().draw()?)
    }

    #[wasm_bindgen(js_name = drawGrid)]
    pub fn draw_grid(&self) {
        self.controller.borrow_mut().draw_grid();
    }

    #[wasm_bindgen(js_name = drawCells)]
    pub fn draw_cells(&self) -> std::result::Result<(), JsValue> {
        Ok(self.controller.borrow_mut().draw_cells()?)
    }

    #[wasm_bindgen(js_name = toggleCell)]
    pub fn toggle_cell(&self, x: f64, y: f64) -> std::result::Result<(), JsValue> {
        Ok(self.controller.borrow_mut().toggle_cell(x, y)?)
    }

    #[wasm_bindgen(js_name = setCellToAlive)]
    pub fn set_cell_to_alive(&self, x: f64, y: f64) -> std::result::Result<(), JsValue> {
        Ok(self.controller.borrow_mut().set_cell_to_alive(x, y)?)
    }

    #[wasm_bindgen(js_name = insertGlider)]
    pub fn insert_glider(&self, x: f64, y: f64) -> std::result::Result<(), JsValue> {
        Ok(self.controller.borrow_mut().insert_glider(x, y)?)
    }

    #[wasm_bindgen(js_name = insertPulsar)]
    pub fn insert_pulsar(&self, x: f64, y: f64) -> std::result::Result<(), JsValue> {
        Ok(self.controller.borrow_mut().insert_pulsar(x, y)?)
    }

    /// Values below 1 are treated as 1.
    #[wasm_bindgen(js_name = setTicksPerFrame)]
    pub fn set_ticks_per_frame(&self, ticks: i32) {
        self.controller.borrow_mut().set_ticks_per_frame(ticks as i64);
    }

    #[wasm_bindgen(js_name = ticksPerFrame)]
    pub fn ticks_per_frame(&self) -> u32 {
        self.controller.borrow().ticks_per_frame()
    }

    #[wasm_bindgen(js_name = setDrawGridFlag)]
    pub fn set_draw_grid_flag(&mut self, flag: bool) {
        self.config.show_grid = flag;
        self.controller.borrow_mut().set_draw_grid_flag(flag);
    }

    /// Move to another backend. `canvas` must be a fresh element: a canvas
    /// keeps the first context kind it handed out. The old backend's
    /// resources and listeners are released before the new one draws.
    #[wasm_bindgen(js_name = switchRenderMode)]
    pub fn switch_render_mode(&mut self, canvas: HtmlCanvasElement, mode: &str) -> std::result::Result<(), JsValue> {
        Ok(self.switch_backend(canvas, mode)?)
    }

    #[wasm_bindgen(js_name = renderMode)]
    pub fn render_mode(&self) -> String {
        self.controller.borrow().backend().mode().id().to_string()
    }

    /// Called with the rounded frame rate after every animation frame
    #[wasm_bindgen(js_name = setFpsListener)]
    pub fn set_fps_listener(&self, listener: Option<Function>) {
        *self.fps_listener.borrow_mut() = listener;
    }

    pub fn fps(&self) -> u32 {
        self.controller.borrow().fps().last()
    }

    #[wasm_bindgen(js_name = fpsMean)]
    pub fn fps_mean(&self) -> f64 {
        self.controller.borrow().fps().mean()
    }

    /// Slowest frame rate in the sample window
    #[wasm_bindgen(js_name = fpsMin)]
    pub fn fps_min(&self) -> f64 {
        self.controller.borrow().fps().min()
    }

    #[wasm_bindgen(js_name = fpsMax)]
    pub fn fps_max(&self) -> f64 {
        self.controller.borrow().fps().max()
    }

    /// Frames currently in the window behind `fpsMean`/`fpsMin`/`fpsMax`
    #[wasm_bindgen(js_name = fpsSamples)]
    pub fn fps_samples(&self) -> usize {
        self.controller.borrow().fps().samples()
    }

    #[wasm_bindgen(js_name = frameTimeMs)]
    pub fn frame_time_ms(&self) -> f64 {
        self.controller.borrow().frame_ms()
    }

    pub fn generation(&self) -> f64 {
        self.controller.borrow().generation() as f64
    }

    pub fn population(&self) -> u32 {
        self.controller.borrow().population()
    }

    pub fn width(&self) -> u32 {
        self.controller.borrow().universe().width()
    }

    pub fn height(&self) -> u32 {
        self.controller.borrow().universe().height()
    }
}

impl GameOfLife {
    fn create(canvas: HtmlCanvasElement, memory: WebAssembly::Memory, config_json: Option<&str>) -> Result<Self> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(json)?,
            None => GameConfig::default(),
        };
        let mode = config.render_mode()?;
        let window = web_sys::window().ok_or(EngineError::Resource("window"))?;

        let universe = JsUniverse::create(memory, config.width, config.height, config.start_type)?;
        let layout = config.layout(universe.width(), universe.height());
        let backend = Backend::acquire(&canvas, mode, layout, &config.palette, config.show_grid)?;

        let (scheduler, frame_slot) = RafScheduler::new(window);
        let mut controller = GameController::new(universe, backend, scheduler, config.cell_size, now_ms());
        controller.set_ticks_per_frame(config.ticks_per_frame);
        controller.draw()?;

        let controller = Rc::new(RefCell::new(controller));
        let fps_listener: FpsListener = Rc::new(RefCell::new(None));

        let frame = {
            let weak = Rc::downgrade(&controller);
            let listener = fps_listener.clone();
            Closure::wrap(Box::new(move |timestamp: f64| {
                let mut fps = None;
                with_controller(&weak, "frame", |c| {
                    let result = c.on_frame(timestamp);
                    fps = Some(c.fps().last());
                    result
                });
                if let (Some(fps), Some(f)) = (fps, listener.borrow().as_ref()) {
                    if let Err(e) = f.call1(&JsValue::NULL, &JsValue::from(fps)) {
                        log::warn!("fps listener threw: {:?}", e);
                    }
                }
            }) as Box<dyn FnMut(f64)>)
        };
        if frame_slot.set(frame).is_err() {
            return Err(EngineError::Resource("frame callback slot"));
        }

        let pointer = PointerBindings::attach(&canvas, &controller)?;

        log::info!(
            "game of life ready: {}x{} cells, {} backend",
            layout.width,
            layout.height,
            mode
        );

        Ok(Self {
            controller,
            config,
            fps_listener,
            pointer: Some(pointer),
        })
    }

    fn switch_backend(&mut self, canvas: HtmlCanvasElement, mode: &str) -> Result<()> {
        let mode: RenderMode = mode.parse()?;
        let layout = *self.controller.borrow().layout();
        let show_grid = self.controller.borrow().draw_grid_flag();

        let backend = Backend::acquire(&canvas, mode, layout, &self.config.palette, show_grid)?;

        // Old listeners point at the discarded canvas.
        self.pointer = None;
        // The new backend is installed even when its first draw fails, so
        // the new canvas gets its listeners before that error is reported.
        let drawn = self.controller.borrow_mut().replace_backend(backend);
        self.pointer = Some(PointerBindings::attach(&canvas, &self.controller)?);
        self.config.render_mode = mode.id().to_string();
        drawn?;

        log::info!("switched to {} backend", mode);
        Ok(())
    }
}

impl Drop for GameOfLife {
    fn drop(&mut self) {
        // A pending frame would otherwise call into a dropped closure.
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.stop();
        }
    }
}
