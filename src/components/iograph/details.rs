use super::icons::RoundRobin;
use super::store::{GraphStore, NodeIdx};
use super::types::DetailLink;

const SHRUGS: &[&str] = &["🤷🏼‍♂", "🙇🏼‍♀️", "🙅🏼‍♂️", "🤦🏼‍♀️"];

/// What the detail panel shows for the selected node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDetails {
	pub title: String,
	pub links: Vec<DetailLink>,
	/// Shown in place of the link list when the node has none.
	pub shrug: Option<&'static str>,
}

impl NodeDetails {
	pub fn describe(store: &GraphStore, node: NodeIdx, shrugs: &mut RoundRobin) -> Self {
		let node = store.get(node);
		let shrug = node.links.is_empty().then(|| shrugs.pick(SHRUGS));
		Self {
			title: node.label.clone().unwrap_or_else(|| node.id.clone()),
			links: node.links.clone(),
			shrug,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::iograph::types::NodeDefinition;

	#[test]
	fn defined_node_lists_its_links() {
		let mut store = GraphStore::new();
		let idx = store.merge(
			"svc",
			NodeDefinition {
				label: Some("Order service".into()),
				links: vec![DetailLink {
					title: "Source Code",
					url: "https://example.test/svc".into(),
				}],
				..Default::default()
			},
		);
		let details = NodeDetails::describe(&store, idx, &mut RoundRobin::default());
		assert_eq!(details.title, "Order service");
		assert_eq!(details.links.len(), 1);
		assert_eq!(details.shrug, None);
	}

	#[test]
	fn bare_node_falls_back_to_id_and_shrugs() {
		let mut store = GraphStore::new();
		let idx = store.get_or_create("orders-topic");
		let mut shrugs = RoundRobin::default();
		let first = NodeDetails::describe(&store, idx, &mut shrugs);
		let second = NodeDetails::describe(&store, idx, &mut shrugs);
		assert_eq!(first.title, "orders-topic");
		assert_eq!(first.shrug, Some(SHRUGS[0]));
		assert_eq!(second.shrug, Some(SHRUGS[1]));
	}
}
