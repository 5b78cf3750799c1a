use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, Window};

use super::error::CanvasError;

type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` task that reschedules itself after every frame.
///
/// `cancel` (or dropping the loop) cancels the pending frame and releases the
/// closure; later calls are no-ops.
pub struct FrameLoop {
	window: Window,
	callback: FrameClosure,
	pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	pub fn start(window: Window, mut frame: impl FnMut() + 'static) -> Result<Self, CanvasError> {
		let callback: FrameClosure = Rc::new(RefCell::new(None));
		let pending = Rc::new(Cell::new(None));

		let (callback_inner, pending_inner, window_inner) =
			(callback.clone(), pending.clone(), window.clone());
		let closure = Closure::<dyn FnMut()>::new(move || {
			pending_inner.set(None);
			frame();
			// cancelled loops have dropped their closure
			if let Some(ref cb) = *callback_inner.borrow() {
				if let Ok(id) = window_inner.request_animation_frame(cb.as_ref().unchecked_ref()) {
					pending_inner.set(Some(id));
				}
			}
		});

		let id = window.request_animation_frame(closure.as_ref().unchecked_ref())?;
		pending.set(Some(id));
		*callback.borrow_mut() = Some(closure);
		debug!("frame loop started");

		Ok(Self {
			window,
			callback,
			pending,
		})
	}

	pub fn cancel(&self) {
		if let Some(id) = self.pending.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		if self.callback.borrow_mut().take().is_some() {
			debug!("frame loop stopped");
		}
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.cancel();
	}
}

/// An event listener that is removed again when dropped.
pub struct ListenerGuard {
	target: EventTarget,
	event: &'static str,
	capture: bool,
	callback: Closure<dyn FnMut(Event)>,
}

impl ListenerGuard {
	pub fn new(
		target: &EventTarget,
		event: &'static str,
		capture: bool,
		handler: impl FnMut(Event) + 'static,
	) -> Result<Self, CanvasError> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		target.add_event_listener_with_callback_and_bool(
			event,
			callback.as_ref().unchecked_ref(),
			capture,
		)?;
		Ok(Self {
			target: target.clone(),
			event,
			capture,
			callback,
		})
	}
}

impl Drop for ListenerGuard {
	fn drop(&mut self) {
		let _ = self.target.remove_event_listener_with_callback_and_bool(
			self.event,
			self.callback.as_ref().unchecked_ref(),
			self.capture,
		);
	}
}
