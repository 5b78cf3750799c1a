use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

#[derive(Debug, Error)]
pub enum CanvasError {
	#[error("no browser window available")]
	NoWindow,
	#[error("canvas has no 2d context")]
	ContextUnavailable,
	#[error("2d context is not a CanvasRenderingContext2d")]
	NotCanvas2d,
	#[error("browser rejected the call: {0}")]
	Js(String),
}

impl From<JsValue> for CanvasError {
	fn from(value: JsValue) -> Self {
		CanvasError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

pub fn window() -> Result<Window, CanvasError> {
	web_sys::window().ok_or(CanvasError::NoWindow)
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, CanvasError> {
	canvas
		.get_context("2d")?
		.ok_or(CanvasError::ContextUnavailable)?
		.dyn_into()
		.map_err(|_| CanvasError::NotCanvas2d)
}
