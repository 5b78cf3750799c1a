use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::{Canvas, Div};
use leptos::prelude::*;
use log::{debug, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, HtmlElement, MouseEvent, Node};

use super::card::{MatchDetailCard, SelectFiltersHint};
use super::config::{EngineConfig, FRAME_DT};
use super::error::{self, CanvasError};
use super::hit_test::hit_test;
use super::interaction::{InteractionController, OverlayDisplay};
use super::overlay::ContainerRect;
use super::render::{self, FrameInputs};
use super::scheduler::{FrameLoop, ListenerGuard};
use super::state::MatchGraphState;
use super::types::{Candidate, FilterSelection};

type Shared<T> = Rc<RefCell<T>>;

/// Render-ready overlay, resolved against the current candidate list.
#[derive(Clone, Debug, PartialEq)]
enum OverlayView {
	Hidden,
	Detail {
		candidate: Candidate,
		left: f64,
		top: f64,
		width: f64,
		accent: &'static str,
	},
	Hint {
		left: f64,
		top: f64,
	},
}

fn overlay_style(view: &OverlayView) -> String {
	match view {
		OverlayView::Hidden => "display: none;".to_string(),
		OverlayView::Detail {
			left, top, width, ..
		} => format!("position: fixed; left: {left}px; top: {top}px; width: {width}px; z-index: 20;"),
		OverlayView::Hint { left, top } => format!(
			"position: fixed; left: {left}px; top: {top}px; transform: translate(-50%, -50%); pointer-events: none; z-index: 20;"
		),
	}
}

/// Everything that must be torn down on unmount.
struct Mounted {
	_frame: FrameLoop,
	_listeners: Vec<ListenerGuard>,
}

fn container_rect(canvas: &HtmlCanvasElement) -> ContainerRect {
	let rect = canvas.get_bounding_client_rect();
	ContainerRect {
		left: rect.left(),
		top: rect.top(),
		width: rect.width(),
		height: rect.height(),
	}
}

fn parent_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
	canvas
		.parent_element()
		.map(|p| (p.client_width().max(0) as u32, p.client_height().max(0) as u32))
		.unwrap_or((0, 0))
}

/// Sizes the backing store to the parent. Returns the new extent.
fn fit_to_parent(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let (w, h) = parent_size(canvas);
	canvas.set_width(w);
	canvas.set_height(h);
	(w as f64, h as f64)
}

fn refresh_overlay(
	state: &MatchGraphState,
	controller: &InteractionController,
	canvas: &HtmlCanvasElement,
	all_satisfied: bool,
	overlay: RwSignal<OverlayView>,
) {
	let next = match controller.display(state, container_rect(canvas), all_satisfied) {
		OverlayDisplay::Hidden => OverlayView::Hidden,
		OverlayDisplay::Hint { left, top } => OverlayView::Hint { left, top },
		OverlayDisplay::Detail {
			id,
			left,
			top,
			accent,
		} => match state.candidate(&id) {
			Some(candidate) => OverlayView::Detail {
				candidate: candidate.clone(),
				left,
				top,
				width: state.config.card.width,
				accent,
			},
			None => OverlayView::Hidden,
		},
	};
	if overlay.with_untracked(|current| current != &next) {
		overlay.set(next);
	}
}

// `ElementExt::style` from the leptos prelude shadows the web-sys getter
fn set_cursor(canvas: &HtmlCanvasElement, cursor: &str) {
	let _ = HtmlElement::style(canvas).set_property("cursor", cursor);
}

fn related_node(ev: &MouseEvent) -> Option<Node> {
	ev.related_target().and_then(|t| t.dyn_into::<Node>().ok())
}

fn mount(
	canvas: HtmlCanvasElement,
	state: Shared<MatchGraphState>,
	controller: Shared<InteractionController>,
	any_filter_applied: Signal<bool>,
	all_satisfied: Signal<bool>,
	overlay: RwSignal<OverlayView>,
) -> Result<Mounted, CanvasError> {
	let window = error::window()?;
	let ctx = error::context_2d(&canvas)?;
	let (w, h) = fit_to_parent(&canvas);
	state.borrow_mut().resize(w, h);

	let on_container_moved = {
		let (state, controller, canvas) = (state.clone(), controller.clone(), canvas.clone());
		move |resized: bool| {
			if resized {
				let (w, h) = fit_to_parent(&canvas);
				state.borrow_mut().resize(w, h);
			}
			let s = state.borrow();
			let mut c = controller.borrow_mut();
			c.container_moved(container_rect(&canvas));
			refresh_overlay(&s, &c, &canvas, all_satisfied.get_untracked(), overlay);
		}
	};
	let (on_resize, on_scroll) = (on_container_moved.clone(), on_container_moved.clone());
	let listeners = vec![
		ListenerGuard::new(&window, "resize", false, move |_: Event| on_resize(true))?,
		// capture so scrolling any ancestor counts, not just the document
		ListenerGuard::new(&window, "scroll", true, move |_: Event| on_scroll(false))?,
	];

	let frame = FrameLoop::start(window, move || {
		// layout can resize the parent without a window resize
		if parent_size(&canvas) != (canvas.width(), canvas.height()) {
			on_container_moved(true);
		}
		let mut s = state.borrow_mut();
		if !s.is_ready() {
			return;
		}
		let c = controller.borrow();
		s.tick(FRAME_DT, c.hovered());
		render::render(
			&s,
			&ctx,
			FrameInputs {
				hovered: c.hovered(),
				selected: c.selected(),
				any_filter_applied: any_filter_applied.get_untracked(),
			},
		);
	})?;

	debug!("lender match canvas mounted at {w}x{h}");
	Ok(Mounted {
		_frame: frame,
		_listeners: listeners,
	})
}

/// Animated lender-match graph with a node-anchored detail card.
///
/// `any_filter_applied` and `all_categories_satisfied` default to what
/// `filters` implies. `on_selection_change` fires with the pinned lender, or
/// `None` once nothing is pinned.
#[component]
pub fn LenderMatchCanvas(
	#[prop(into)] candidates: Signal<Vec<Candidate>>,
	#[prop(into)] filters: Signal<FilterSelection>,
	#[prop(optional, into)] any_filter_applied: Option<Signal<bool>>,
	#[prop(optional, into)] all_categories_satisfied: Option<Signal<bool>>,
	#[prop(optional, into)] on_selection_change: Option<Callback<Option<Candidate>>>,
	#[prop(optional)] config: Option<EngineConfig>,
) -> impl IntoView {
	let any_filter_applied = any_filter_applied
		.unwrap_or_else(|| Signal::derive(move || filters.with(FilterSelection::any_applied)));
	let all_satisfied = all_categories_satisfied
		.unwrap_or_else(|| Signal::derive(move || filters.with(FilterSelection::all_satisfied)));

	let config = config.unwrap_or_default();
	let card = config.card;
	let state: Shared<MatchGraphState> = Rc::new(RefCell::new(MatchGraphState::new(
		config,
		js_sys::Date::now() as u64,
	)));
	let controller: Shared<InteractionController> =
		Rc::new(RefCell::new(InteractionController::new(card)));
	let mounted: Shared<Option<Mounted>> = Rc::new(RefCell::new(None));

	let canvas_ref = NodeRef::<Canvas>::new();
	let card_ref = NodeRef::<Div>::new();
	let overlay = RwSignal::new(OverlayView::Hidden);
	let close = Trigger::new();

	let notify = move |state: &MatchGraphState, change: Option<Option<String>>| {
		let Some(selected) = change else {
			return;
		};
		debug!("selection changed to {selected:?}");
		if let Some(cb) = on_selection_change {
			cb.run(selected.and_then(|id| state.candidate(&id).cloned()));
		}
	};

	// filters or candidates changed: retarget the arena and drop stale ids
	{
		let (state, controller) = (state.clone(), controller.clone());
		Effect::new(move |_| {
			let candidates = candidates.get();
			let all_satisfied = all_satisfied.get();
			let mut s = state.borrow_mut();
			filters.with(|f| s.sync(&candidates, f));
			let mut c = controller.borrow_mut();
			let canvas = canvas_ref.get_untracked();
			let rect = canvas.as_ref().map(container_rect).unwrap_or_default();
			let change = c.prune(&s, rect);
			notify(&s, change);
			if let Some(canvas) = canvas {
				refresh_overlay(&s, &c, &canvas, all_satisfied, overlay);
			}
		});
	}

	{
		let (state, controller, mounted) = (state.clone(), controller.clone(), mounted.clone());
		Effect::new(move |_| {
			let Some(canvas) = canvas_ref.get() else {
				return;
			};
			if mounted.borrow().is_some() {
				return;
			}
			match mount(
				canvas,
				state.clone(),
				controller.clone(),
				any_filter_applied,
				all_satisfied,
				overlay,
			) {
				Ok(m) => *mounted.borrow_mut() = Some(m),
				Err(err) => warn!("lender match canvas disabled: {err}"),
			}
		});
	}

	{
		let (state, controller) = (state.clone(), controller.clone());
		Effect::new(move |prev: Option<()>| {
			close.track();
			if prev.is_none() {
				return;
			}
			let s = state.borrow();
			let mut c = controller.borrow_mut();
			let change = c.close();
			notify(&s, change);
			overlay.set(OverlayView::Hidden);
		});
	}

	let mounted_cleanup = SendWrapper::new(mounted);
	on_cleanup(move || {
		if mounted_cleanup.borrow_mut().take().is_some() {
			debug!("lender match canvas unmounted");
		}
	});

	let state_mm = state.clone();
	let controller_mm = controller.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let rect = container_rect(&canvas);
		let (x, y) = (
			ev.client_x() as f64 - rect.left,
			ev.client_y() as f64 - rect.top,
		);

		let s = state_mm.borrow();
		let mut c = controller_mm.borrow_mut();
		let hit = hit_test(x, y, s.nodes(), s.config.hit_margin);
		if c.hover(hit, &s, rect) {
			set_cursor(&canvas, if hit.is_some() { "pointer" } else { "default" });
			refresh_overlay(&s, &c, &canvas, all_satisfied.get_untracked(), overlay);
		}
	};

	let state_mc = state.clone();
	let controller_mc = controller.clone();
	let on_click = move |_: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let s = state_mc.borrow();
		let mut c = controller_mc.borrow_mut();
		let change = c.click(&s, container_rect(&canvas));
		notify(&s, change);
		refresh_overlay(&s, &c, &canvas, all_satisfied.get_untracked(), overlay);
	};

	let state_ml = state.clone();
	let controller_ml = controller.clone();
	let on_mouseleave = move |ev: MouseEvent| {
		let into_card = related_node(&ev)
			.zip(card_ref.get_untracked())
			.is_some_and(|(node, card)| card.contains(Some(&node)));
		let s = state_ml.borrow();
		let mut c = controller_ml.borrow_mut();
		let change = c.leave_surface(into_card);
		notify(&s, change);
		if let Some(canvas) = canvas_ref.get_untracked() {
			set_cursor(&canvas, "default");
			refresh_overlay(&s, &c, &canvas, all_satisfied.get_untracked(), overlay);
		}
	};

	let on_card_leave = move |ev: MouseEvent| {
		let into_canvas = related_node(&ev)
			.zip(canvas_ref.get_untracked())
			.is_some_and(|(node, canvas)| canvas.is_same_node(Some(&node)));
		let s = state.borrow();
		let mut c = controller.borrow_mut();
		let change = c.leave_surface(into_canvas);
		notify(&s, change);
		if let Some(canvas) = canvas_ref.get_untracked() {
			refresh_overlay(&s, &c, &canvas, all_satisfied.get_untracked(), overlay);
		}
	};

	view! {
		<div class="lender-match" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="lender-match-canvas"
				on:mousemove=on_mousemove
				on:click=on_click
				on:mouseleave=on_mouseleave
				style="display: block; width: 100%; height: 100%;"
			/>
			<div
				node_ref=card_ref
				class="lender-match-overlay"
				on:mouseleave=on_card_leave
				style=move || overlay.with(overlay_style)
			>
				{move || match overlay.get() {
					OverlayView::Detail { candidate, accent, .. } => {
						view! {
							<MatchDetailCard
								candidate=candidate
								accent=accent
								on_close=move |_| close.notify()
							/>
						}
							.into_any()
					}
					OverlayView::Hint { .. } => view! { <SelectFiltersHint /> }.into_any(),
					OverlayView::Hidden => ().into_any(),
				}}
			</div>
		</div>
	}
}
