//! Graph load phase: fetch the source document once, parse it, and fill a
//! fresh store. Runs to completion before any layout happens.

use log::info;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::store::GraphStore;
use super::types::{GraphDocument, NodeDefinition, NodeId};

pub const DEFAULT_GRAPH_URI: &str = "graph.json";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
	#[error("could not request {uri}: {reason}")]
	Request { uri: String, reason: String },
	#[error("{uri} answered with HTTP {status}")]
	Status { uri: String, status: u16 },
	#[error("could not read the body of {uri}: {reason}")]
	Body { uri: String, reason: String },
	#[error("graph source is not valid JSON: {0}")]
	Parse(String),
	#[error("graph source has no \"graph\" object")]
	MissingGraph,
}

/// Splits a graph source into its entries, keeping document order.
pub fn parse_graph(text: &str) -> Result<Vec<(NodeId, NodeDefinition)>, LoadError> {
	let document: GraphDocument =
		serde_json::from_str(text).map_err(|e| LoadError::Parse(e.to_string()))?;
	let graph = document
		.graph
		.as_ref()
		.and_then(|g| g.as_object())
		.ok_or(LoadError::MissingGraph)?;

	Ok(graph
		.iter()
		.map(|(id, value)| (id.clone(), NodeDefinition::from_value(value)))
		.collect())
}

pub fn store_from_source(text: &str) -> Result<GraphStore, LoadError> {
	let mut store = GraphStore::new();
	store.add_map(parse_graph(text)?);
	Ok(store)
}

pub async fn load_graph(uri: String) -> Result<GraphStore, LoadError> {
	let text = fetch_text(&uri).await?;
	let store = store_from_source(&text)?;
	info!("loaded {} nodes from {}", store.len(), uri);
	Ok(store)
}

async fn fetch_text(uri: &str) -> Result<String, LoadError> {
	let request_error = |reason: String| LoadError::Request {
		uri: uri.to_owned(),
		reason,
	};
	let body_error = |reason: String| LoadError::Body {
		uri: uri.to_owned(),
		reason,
	};

	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(RequestMode::Cors);
	let request = Request::new_with_str_and_init(uri, &opts)
		.map_err(|e| request_error(format!("{:?}", e)))?;

	let window = web_sys::window().ok_or_else(|| request_error("no window".into()))?;
	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|e| request_error(format!("{:?}", e)))?
		.dyn_into()
		.map_err(|_| request_error("fetch did not yield a Response".into()))?;

	if !response.ok() {
		return Err(LoadError::Status {
			uri: uri.to_owned(),
			status: response.status(),
		});
	}

	let body = response
		.text()
		.map_err(|e| body_error(format!("{:?}", e)))?;
	JsFuture::from(body)
		.await
		.map_err(|e| body_error(format!("{:?}", e)))?
		.as_string()
		.ok_or_else(|| body_error("body is not text".into()))
}
