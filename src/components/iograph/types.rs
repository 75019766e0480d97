use serde::Deserialize;
use serde_json::{Map, Value};

pub type NodeId = String;

/// Keys under which a node lists the items it consumes.
pub const INPUT_KEYS: &[&str] = &[
	"i", "inputs", "input", "consumes", "reads", "loads", "receives",
];

/// Keys under which a node lists the items it produces.
pub const OUTPUT_KEYS: &[&str] = &[
	"o", "outputs", "output", "produces", "creates", "writes", "sends", "updates", "saves",
	"triggers",
];

/// Top level shape of a graph source: `{ "graph": { "<id>": { ... } } }`.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphDocument {
	pub graph: Option<Value>,
}

/// A titled external link shown in the detail panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailLink {
	pub title: &'static str,
	pub url: String,
}

/// One explicit entry of the `graph` map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeDefinition {
	pub label: Option<String>,
	pub inputs: Vec<NodeId>,
	pub outputs: Vec<NodeId>,
	pub links: Vec<DetailLink>,
}

impl NodeDefinition {
	pub fn from_value(value: &Value) -> Self {
		let Some(fields) = value.as_object() else {
			return Self::default();
		};
		Self {
			label: fields.get("label").and_then(Value::as_str).map(str::to_owned),
			inputs: collect_refs(fields, INPUT_KEYS),
			outputs: collect_refs(fields, OUTPUT_KEYS),
			links: collect_links(fields),
		}
	}
}

/// Concatenates the identifiers found under every alias in `keys`.
///
/// A scalar counts as one identifier and a list contributes its scalar
/// elements. Any other shape is skipped.
fn collect_refs(fields: &Map<String, Value>, keys: &[&str]) -> Vec<NodeId> {
	let mut refs = Vec::new();
	for key in keys {
		match fields.get(*key) {
			Some(Value::Array(items)) => refs.extend(items.iter().filter_map(scalar_id)),
			Some(item) => refs.extend(scalar_id(item)),
			None => {}
		}
	}
	refs
}

fn scalar_id(value: &Value) -> Option<NodeId> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}

fn collect_links(fields: &Map<String, Value>) -> Vec<DetailLink> {
	const SOURCES: &[(&str, &[&str])] = &[
		("View in Live", &["view.live"]),
		("View in Test", &["view.test"]),
		("View in Dev", &["view.dev"]),
		("Source Code", &["source", "src"]),
		("Documentation", &["documentation", "doc", "docs"]),
	];

	SOURCES
		.iter()
		.filter_map(|(title, keys)| {
			keys.iter()
				.filter_map(|key| fields.get(*key).and_then(Value::as_str))
				.find(|url| !url.is_empty())
				.map(|url| DetailLink {
					title: *title,
					url: url.to_owned(),
				})
		})
		.collect()
}
