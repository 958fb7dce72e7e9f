//! requestAnimationFrame scheduling (WASM only)
//!
//! A `FrameLoop` calls its frame callback once per display refresh for as
//! long as the callback returns true. Stopping is synchronous: `cancel`
//! drops the pending request, so no further frame fires.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameClosure = Closure<dyn FnMut(f64)>;

/// Self re-arming animation-frame loop
pub struct FrameLoop {
    closure: Rc<RefCell<Option<FrameClosure>>>,
    handle: Rc<Cell<Option<i32>>>,
}

fn request(closure: &FrameClosure) -> Option<i32> {
    let window = web_sys::window()?;
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}

impl FrameLoop {
    /// Build a loop around `on_frame(timestamp_ms) -> keep_running`.
    /// Nothing runs until [`FrameLoop::arm`].
    pub fn new<F>(mut on_frame: F) -> Self
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let closure: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let self_ref = closure.clone();
        let frame_handle = handle.clone();
        *closure.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            // This frame's request is spent
            frame_handle.set(None);
            if on_frame(time) && frame_handle.get().is_none() {
                if let Some(closure) = self_ref.borrow().as_ref() {
                    frame_handle.set(request(closure));
                }
            }
        }));

        Self { closure, handle }
    }

    /// Schedule the next frame unless one is already pending
    pub fn arm(&self) {
        if self.handle.get().is_some() {
            return;
        }
        if let Some(closure) = self.closure.borrow().as_ref() {
            self.handle.set(request(closure));
        }
    }

    /// Drop the pending frame, if any
    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.get().is_some()
    }
}
