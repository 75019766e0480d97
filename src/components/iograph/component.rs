use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::details::NodeDetails;
use super::layout::LayoutConfig;
use super::render;
use super::state::{IoGraphState, ViewFlags};
use super::store::GraphStore;

/// The canvas always fills the window.
fn surface_size(window: &Window) -> (f64, f64) {
	let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
	(
		dimension(window.inner_width()).unwrap_or(800.0),
		dimension(window.inner_height()).unwrap_or(600.0),
	)
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Window-filling column diagram of `store` drawn around its root.
/// Clicking a widget selects its node and publishes the node's details.
#[component]
pub fn IoGraphCanvas(
	store: GraphStore,
	details: RwSignal<Option<NodeDetails>>,
	#[prop(default = LayoutConfig::default())] config: LayoutConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<IoGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window to draw in");
			return;
		};

		let (w, h) = surface_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				error!("canvas has no 2d context");
				return;
			}
		};

		let flags = ViewFlags::from_location(&window.location().href().unwrap_or_default());
		let mut graph = IoGraphState::new(store.clone(), config.clone(), flags, w, h);
		details.set(graph.details());
		*state_init.borrow_mut() = Some(graph);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = surface_size(&win);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.frame_count += 1;
				render::render(s, &ctx, timestamp);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			details.set(s.select_at(x, y));
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.set_cursor(x, y);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.clear_cursor();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="iograph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block; cursor: pointer;"
		/>
	}
}
