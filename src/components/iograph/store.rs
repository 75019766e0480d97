use std::collections::HashMap;

use log::{debug, warn};

use super::types::{DetailLink, NodeDefinition, NodeId};

/// Identifier used for the stand-in root when a graph defines nothing.
pub const NO_ROOT_ID: &str = "__no_root__";
const NO_ROOT_LABEL: &str = "No root (no items defined?).";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
	pub id: NodeId,
	pub label: Option<String>,
	pub inputs: Vec<NodeId>,
	pub outputs: Vec<NodeId>,
	pub links: Vec<DetailLink>,
	/// Number of explicit definitions seen; zero for placeholders.
	pub definition_count: u32,
	/// Some node lists this one as an output.
	pub created: bool,
}

impl Node {
	fn placeholder(id: &str) -> Self {
		Self {
			id: id.to_owned(),
			label: None,
			inputs: Vec::new(),
			outputs: Vec::new(),
			links: Vec::new(),
			definition_count: 0,
			created: false,
		}
	}

	fn define(&mut self, definition: NodeDefinition) {
		self.label = definition.label;
		self.inputs = definition.inputs;
		self.outputs = definition.outputs;
		self.links = definition.links;
		self.definition_count = 1;
	}

	pub fn is_placeholder(&self) -> bool {
		self.definition_count == 0
	}

	pub fn consumes(&self, id: &str) -> bool {
		self.inputs.iter().any(|i| i == id)
	}

	pub fn produces(&self, id: &str) -> bool {
		self.outputs.iter().any(|o| o == id)
	}
}

/// Every node known to a view, in the order it was first seen.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	nodes: Vec<Node>,
	by_id: HashMap<NodeId, NodeIdx>,
	first_key: Option<NodeIdx>,
}

impl GraphStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn get(&self, idx: NodeIdx) -> &Node {
		&self.nodes[idx.0]
	}

	pub fn find(&self, id: &str) -> Option<NodeIdx> {
		self.by_id.get(id).copied()
	}

	pub fn iter(&self) -> impl Iterator<Item = (NodeIdx, &Node)> {
		self.nodes.iter().enumerate().map(|(i, n)| (NodeIdx(i), n))
	}

	pub fn get_or_create(&mut self, id: &str) -> NodeIdx {
		if let Some(idx) = self.find(id) {
			return idx;
		}
		self.insert(Node::placeholder(id))
	}

	/// Records an explicit definition of `id`.
	///
	/// The first definition supplies the node's structure, replacing any
	/// placeholder created by an earlier forward reference. Later
	/// definitions only bump `definition_count`.
	pub fn merge(&mut self, id: &str, definition: NodeDefinition) -> NodeIdx {
		let Some(idx) = self.find(id) else {
			let mut node = Node::placeholder(id);
			node.define(definition);
			return self.insert(node);
		};

		let node = &mut self.nodes[idx.0];
		if node.is_placeholder() {
			debug!("filling placeholder '{}' with its definition", id);
			node.define(definition);
		} else {
			node.definition_count += 1;
			warn!(
				"'{}' defined {} times, keeping the first definition",
				id, node.definition_count
			);
		}
		idx
	}

	pub fn mark_created(&mut self, id: &str) {
		let idx = self.get_or_create(id);
		self.nodes[idx.0].created = true;
	}

	/// Loads one `graph` map: definitions first, then `created` flags for
	/// every output target.
	pub fn add_map(&mut self, entries: Vec<(NodeId, NodeDefinition)>) {
		let mut produced = Vec::new();
		for (id, definition) in entries {
			produced.extend(definition.outputs.iter().cloned());
			let idx = self.merge(&id, definition);
			self.first_key.get_or_insert(idx);
		}
		for id in produced {
			self.mark_created(&id);
		}
		debug!("graph store holds {} nodes", self.nodes.len());
	}

	pub fn root(&self) -> Option<NodeIdx> {
		self.first_key
	}

	/// The first defined node, or a stand-in explaining that nothing was
	/// defined.
	pub fn root_or_placeholder(&mut self) -> NodeIdx {
		if let Some(idx) = self.root() {
			return idx;
		}
		let idx = self.get_or_create(NO_ROOT_ID);
		self.nodes[idx.0].label = Some(NO_ROOT_LABEL.to_owned());
		idx
	}

	/// Nodes listing `id` among their outputs, in store order.
	pub fn producers_of(&self, id: &str) -> Vec<NodeIdx> {
		self.iter()
			.filter(|(_, n)| n.produces(id))
			.map(|(idx, _)| idx)
			.collect()
	}

	/// Nodes listing `id` among their inputs, in store order.
	pub fn consumers_of(&self, id: &str) -> Vec<NodeIdx> {
		self.iter()
			.filter(|(_, n)| n.consumes(id))
			.map(|(idx, _)| idx)
			.collect()
	}

	fn insert(&mut self, node: Node) -> NodeIdx {
		let idx = NodeIdx(self.nodes.len());
		self.by_id.insert(node.id.clone(), idx);
		self.nodes.push(node);
		idx
	}
}
