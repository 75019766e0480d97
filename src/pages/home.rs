use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};

use crate::components::iograph::{
	DEFAULT_GRAPH_URI, DetailsPanel, IoGraphCanvas, LayoutConfig, NodeDetails, load_graph,
};

/// Column count from `?columns=`, ignoring anything that is not a
/// positive number.
fn layout_config(columns: Option<String>) -> LayoutConfig {
	let defaults = LayoutConfig::default();
	LayoutConfig {
		columns: columns
			.and_then(|c| c.parse::<usize>().ok())
			.filter(|c| *c > 0)
			.unwrap_or(defaults.columns),
		..defaults
	}
}

/// Where to fetch the graph from: `/graphs/<name>` routes load
/// `graphs/<name>.json`, otherwise `?graph=` or the default file.
fn graph_uri(route_name: Option<String>, query_uri: Option<String>) -> String {
	route_name
		.filter(|name| !name.is_empty())
		.map(|name| format!("graphs/{name}.json"))
		.or(query_uri)
		.unwrap_or_else(|| DEFAULT_GRAPH_URI.to_string())
}

/// Graph viewer page: loads the graph, then shows the diagram and the
/// details of the selected node.
#[component]
pub fn Home() -> impl IntoView {
	let route_name = use_params_map().with_untracked(|p| p.get("name"));
	let (uri, config) = use_query_map().with_untracked(|q| {
		(
			graph_uri(route_name, q.get("graph")),
			layout_config(q.get("columns")),
		)
	});

	// The whole graph is loaded before anything is laid out.
	let graph = LocalResource::new(move || load_graph(uri.clone()));
	let details = RwSignal::new(None::<NodeDetails>);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! The graph could not be loaded."</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<Suspense fallback=|| view! { <p class="iograph-loading">"Loading graph..."</p> }>
				<div class="fullscreen-graph">
					{move || {
						let config = config.clone();
						graph
							.get()
							.map(|loaded| {
								loaded
									.map(|store| {
										view! {
											<IoGraphCanvas store=store details=details config=config />
										}
									})
							})
					}}
					<DetailsPanel details=details />
				</div>
			</Suspense>
		</ErrorBoundary>
	}
}
