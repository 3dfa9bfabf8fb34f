//! DOM mouse listeners feeding the controller's pointer session.
//!
//! Down and move are scoped to the canvas. Up is bound on the document,
//! since the button can be released after the pointer left the canvas.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, MouseEvent};

use super::wasm::{with_controller, WebController};
use crate::core::{EngineError, Result};
use crate::interaction::Modifiers;

type Listener = Closure<dyn FnMut(MouseEvent)>;

pub(super) struct PointerBindings {
    canvas: HtmlCanvasElement,
    document: Document,
    down: Listener,
    moved: Listener,
    up: Listener,
}

fn surface_position(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (
        event.client_x() as f64 - rect.left(),
        event.client_y() as f64 - rect.top(),
    )
}

fn modifiers(event: &MouseEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
    }
}

impl PointerBindings {
    pub(super) fn attach(canvas: &HtmlCanvasElement, controller: &Rc<RefCell<WebController>>) -> Result<Self> {
        let document = canvas
            .owner_document()
            .ok_or(EngineError::Resource("document"))?;

        let down = {
            let weak: Weak<_> = Rc::downgrade(controller);
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let (x, y) = surface_position(&canvas, &event);
                with_controller(&weak, "mousedown", |c| c.pointer_down(x, y, modifiers(&event)));
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        let moved = {
            let weak: Weak<_> = Rc::downgrade(controller);
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let (x, y) = surface_position(&canvas, &event);
                with_controller(&weak, "mousemove", |c| c.pointer_move(x, y, modifiers(&event)));
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        let up = {
            let weak: Weak<_> = Rc::downgrade(controller);
            Closure::wrap(Box::new(move |_event: MouseEvent| {
                with_controller(&weak, "mouseup", |c| {
                    c.pointer_up();
                    Ok(())
                });
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        let bindings = Self {
            canvas: canvas.clone(),
            document,
            down,
            moved,
            up,
        };
        // On failure `bindings` drops and detaches whatever did get added.
        bindings.register()?;
        Ok(bindings)
    }

    fn register(&self) -> Result<()> {
        self.canvas
            .add_event_listener_with_callback("mousedown", self.down.as_ref().unchecked_ref())
            .map_err(EngineError::from_js)?;
        self.canvas
            .add_event_listener_with_callback("mousemove", self.moved.as_ref().unchecked_ref())
            .map_err(EngineError::from_js)?;
        self.document
            .add_event_listener_with_callback("mouseup", self.up.as_ref().unchecked_ref())
            .map_err(EngineError::from_js)?;
        Ok(())
    }
}

impl Drop for PointerBindings {
    fn drop(&mut self) {
        let _ = self
            .canvas
            .remove_event_listener_with_callback("mousedown", self.down.as_ref().unchecked_ref());
        let _ = self
            .canvas
            .remove_event_listener_with_callback("mousemove", self.moved.as_ref().unchecked_ref());
        let _ = self
            .document
            .remove_event_listener_with_callback("mouseup", self.up.as_ref().unchecked_ref());
    }
}
