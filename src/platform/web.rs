//! `requestAnimationFrame` loop with scoped ownership
//!
//! The loop runs while its `AnimationLoop` handle is alive. Dropping the
//! handle cancels the pending frame request and frees the callback. Drop it
//! from outside the frame callback; `stop` is safe to call from inside.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameCallback = Closure<dyn FnMut(f64)>;

pub struct AnimationLoop {
    /// Id of the pending request, `None` once stopped
    request_id: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl AnimationLoop {
    /// Start calling `on_frame` with the frame timestamp (ms) every refresh
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let request_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let id_ref = request_id.clone();
        let callback_ref = callback.clone();
        *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            on_frame(timestamp);

            // Stopped during this frame
            if id_ref.get().is_none() {
                return;
            }
            let next = match callback_ref.borrow().as_ref() {
                Some(cb) => request_frame(cb),
                None => return,
            };
            match next {
                Ok(id) => id_ref.set(Some(id)),
                Err(e) => {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                    id_ref.set(None);
                }
            }
        }));

        let first = match callback.borrow().as_ref() {
            Some(cb) => request_frame(cb)?,
            None => return Err(JsValue::from_str("frame callback missing")),
        };
        request_id.set(Some(first));

        Ok(Self {
            request_id,
            callback,
        })
    }

    pub fn is_running(&self) -> bool {
        self.request_id.get().is_some()
    }

    /// Cancel the pending frame; no further callbacks are scheduled
    pub fn stop(&self) {
        if let Some(id) = self.request_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
            log::debug!("Animation loop stopped");
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
        // Breaks the callback's reference to itself
        self.callback.borrow_mut().take();
    }
}

fn request_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}
