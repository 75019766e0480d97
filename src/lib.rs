//! Column diagram viewer for producer/consumer item graphs.
//!
//! `/` shows the graph named by `?graph=` (default `graph.json`) and
//! `/graphs/:name` shows `graphs/<name>.json`. Adding `debug` or
//! `marching` anywhere in the URL switches on the matching overlays.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod components;
mod pages;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Route `log` output to the browser console and report panics there.
/// Debug builds log layout details, release builds only the load phase.
pub fn init_logging() {
	let level = if cfg!(debug_assertions) {
		Level::Debug
	} else {
		Level::Info
	};
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("iograph viewer starting at {} level", level);
}

/// The viewer's routes: the default graph, named graphs, and a 404.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="IO Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/graphs/:name") view=Home />
			</Routes>
		</Router>
	}
}
