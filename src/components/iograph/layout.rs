use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;

use super::icons::IconChooser;
use super::store::{GraphStore, NodeIdx};

const BOTTOM_MARGIN: f64 = 5.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Length of the column chain. Never changes once a layout exists.
	pub columns: usize,
	pub column_gap: f64,
	pub widget_gap: f64,
	pub widget_height: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			columns: 5,
			column_gap: 35.0,
			widget_gap: 8.0,
			widget_height: 30.0,
		}
	}
}

/// Visual flavour of a link. Ordered by precedence when two relations
/// connect the same pair of widgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LinkStyle {
	Default,
	Read,
	Write,
}

impl LinkStyle {
	pub fn color(self) -> &'static str {
		match self {
			LinkStyle::Default => "#666",
			LinkStyle::Read => "#39D",
			LinkStyle::Write => "#5D5",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetRef {
	pub column: usize,
	pub widget: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
	pub target: WidgetRef,
	pub style: LinkStyle,
}

/// The placement of one node inside one column.
#[derive(Clone, Debug)]
pub struct Widget {
	pub node: NodeIdx,
	pub label: String,
	pub icon: String,
	pub y: f64,
	pub bottom: f64,
	pub links: Vec<Link>,
}

impl Widget {
	pub fn contains_y(&self, y: f64) -> bool {
		y >= self.y && y <= self.bottom
	}
}

#[derive(Clone, Debug, Default)]
pub struct Column {
	pub x: f64,
	pub width: f64,
	pub height: f64,
	widgets: Vec<Widget>,
	expanded: HashSet<NodeIdx>,
}

impl Column {
	pub fn widgets(&self) -> &[Widget] {
		&self.widgets
	}

	pub fn contains_x(&self, x: f64) -> bool {
		x > self.x && x < self.x + self.width
	}
}

/// A fixed chain of columns holding the neighbourhood of a root node.
///
/// Column `i` is linked to `i - 1` (previous) and `i + 1` (next). Nodes
/// are placed at most once across the whole chain; the first column to
/// claim a node keeps it.
#[derive(Clone, Debug)]
pub struct ColumnLayout {
	config: LayoutConfig,
	columns: Vec<Column>,
	placed: HashMap<NodeIdx, WidgetRef>,
}

impl ColumnLayout {
	pub fn new(config: LayoutConfig) -> Self {
		let count = config.columns.max(1);
		Self {
			config,
			columns: vec![Column::default(); count],
			placed: HashMap::new(),
		}
	}

	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	pub fn columns(&self) -> &[Column] {
		&self.columns
	}

	pub fn previous(&self, column: usize) -> Option<usize> {
		column.checked_sub(1)
	}

	pub fn next(&self, column: usize) -> Option<usize> {
		(column + 1 < self.columns.len()).then_some(column + 1)
	}

	pub fn widget(&self, at: WidgetRef) -> &Widget {
		&self.columns[at.column].widgets[at.widget]
	}

	pub fn placement_of(&self, node: NodeIdx) -> Option<WidgetRef> {
		self.placed.get(&node).copied()
	}

	/// Spreads the chain across a surface and re-packs every column.
	pub fn resize(&mut self, surface_width: f64, surface_height: f64) {
		let count = self.columns.len() as f64;
		let gap = self.config.column_gap;
		let width = (surface_width - count * gap) / count;
		let height = surface_height - BOTTOM_MARGIN;

		let mut x = gap / 2.0;
		for column in &mut self.columns {
			column.x = x;
			column.width = width;
			column.height = height;
			x = (x + width + gap).floor();
		}
		for column in 0..self.columns.len() {
			self.pack(column);
		}
	}

	/// Places the store's root in the first column, expands its
	/// neighbourhood and packs the result.
	pub fn populate(&mut self, store: &mut GraphStore, icons: &mut dyn IconChooser) -> NodeIdx {
		let root = store.root_or_placeholder();
		self.expand(store, icons, root, 0);
		for column in 0..self.columns.len() {
			self.pack(column);
		}
		debug!(
			"layout placed {} of {} nodes across {} columns",
			self.placed.len(),
			store.len(),
			self.columns.len()
		);
		root
	}

	/// Places `node` in `column` and walks outward from it.
	///
	/// Outputs go to the next column, inputs to the previous one, and every
	/// producer or consumer is pulled in beside the node it relates to.
	/// The walk covers every (node, column) pair reachable this way, once
	/// each. A node takes the column of the first pair that reaches it;
	/// pairs for a node placed elsewhere are still walked so everything
	/// beyond them gets placed, but they carry no links. Calling this again
	/// for a node already in `column` only returns its widget.
	pub fn expand(
		&mut self,
		store: &mut GraphStore,
		icons: &mut dyn IconChooser,
		node: NodeIdx,
		column: usize,
	) -> Option<WidgetRef> {
		let mut queue = VecDeque::new();
		self.visit(store, icons, node, column, &mut queue);

		while let Some((node, column)) = queue.pop_front() {
			let here = self.placed_in(node, column);
			let current = store.get(node);
			let id = current.id.clone();
			let inputs = current.inputs.clone();
			let outputs = current.outputs.clone();

			if let Some(next) = self.next(column) {
				for output in &outputs {
					let target = store.get_or_create(output);
					self.visit(store, icons, target, next, &mut queue);
				}
			}

			if let Some(previous) = self.previous(column) {
				for input in &inputs {
					let source = store.get_or_create(input);
					let left = self.visit(store, icons, source, previous, &mut queue);
					if let (Some(left), Some(here)) = (left, here) {
						self.link(left, here, LinkStyle::Read);
					}
				}
				for producer in store.producers_of(&id) {
					let left = self.visit(store, icons, producer, previous, &mut queue);
					if let (Some(left), Some(here)) = (left, here) {
						self.link(left, here, LinkStyle::Write);
					}
				}
			}

			if let Some(next) = self.next(column) {
				for consumer in store.consumers_of(&id) {
					let right = self.visit(store, icons, consumer, next, &mut queue);
					if let (Some(here), Some(right)) = (here, right) {
						self.link(here, right, LinkStyle::Read);
					}
				}
			}
		}
		self.placed_in(node, column)
	}

	fn placed_in(&self, node: NodeIdx, column: usize) -> Option<WidgetRef> {
		self.placement_of(node).filter(|at| at.column == column)
	}

	/// Queues (`node`, `column`) for walking if it is new and places the
	/// node there unless it already has a column. Returns the widget only
	/// when the node lives in `column`.
	fn visit(
		&mut self,
		store: &GraphStore,
		icons: &mut dyn IconChooser,
		node: NodeIdx,
		column: usize,
		queue: &mut VecDeque<(NodeIdx, usize)>,
	) -> Option<WidgetRef> {
		if self.columns[column].expanded.insert(node) {
			queue.push_back((node, column));
		}
		if self.placement_of(node).is_none() {
			self.place(store, icons, node, column);
		}
		self.placed_in(node, column)
	}

	fn place(
		&mut self,
		store: &GraphStore,
		icons: &mut dyn IconChooser,
		node: NodeIdx,
		column: usize,
	) {
		let model = store.get(node);
		let label = model
			.label
			.clone()
			.unwrap_or_else(|| model.id.replace(['-', '_'], " "));
		let icon = icons.choose(&label);

		let widgets = &mut self.columns[column].widgets;
		let at = WidgetRef {
			column,
			widget: widgets.len(),
		};
		widgets.push(Widget {
			node,
			label,
			icon,
			y: 0.0,
			bottom: 0.0,
			links: Vec::new(),
		});
		self.placed.insert(node, at);
	}

	/// Records a directed link. A second link between the same pair keeps
	/// the single record, taking the higher-precedence style.
	pub fn link(&mut self, source: WidgetRef, target: WidgetRef, style: LinkStyle) {
		let links = &mut self.columns[source.column].widgets[source.widget].links;
		match links.iter_mut().find(|l| l.target == target) {
			Some(existing) => existing.style = existing.style.max(style),
			None => links.push(Link { target, style }),
		}
	}

	/// Stacks a column's widgets, centred vertically, in insertion order.
	pub fn pack(&mut self, column: usize) {
		let LayoutConfig {
			widget_gap,
			widget_height,
			..
		} = self.config;
		let column = &mut self.columns[column];
		let count = column.widgets.len() as f64;
		let total_height = count * widget_height + (count - 1.0) * widget_gap;
		let mut y = column.height / 2.0 - total_height / 2.0;
		for widget in &mut column.widgets {
			widget.y = y.floor();
			widget.bottom = widget.y + widget_height;
			y += widget_height + widget_gap;
		}
	}

	/// The node under a surface position. Later columns and widgets win
	/// where spans overlap.
	pub fn hit_test(&self, x: f64, y: f64) -> Option<NodeIdx> {
		let mut found = None;
		for column in self.columns.iter().filter(|c| c.contains_x(x)) {
			for widget in &column.widgets {
				if widget.contains_y(y) {
					found = Some(widget.node);
				}
			}
		}
		found
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::iograph::icons::KeywordIcons;
	use crate::components::iograph::types::NodeDefinition;

	fn node(inputs: &[&str], outputs: &[&str]) -> NodeDefinition {
		NodeDefinition {
			inputs: inputs.iter().map(|s| s.to_string()).collect(),
			outputs: outputs.iter().map(|s| s.to_string()).collect(),
			..Default::default()
		}
	}

	fn store_of(entries: Vec<(&str, NodeDefinition)>) -> GraphStore {
		let mut store = GraphStore::new();
		store.add_map(entries.into_iter().map(|(id, d)| (id.to_string(), d)).collect());
		store
	}

	fn layout(store: &mut GraphStore, columns: usize) -> ColumnLayout {
		let mut layout = ColumnLayout::new(LayoutConfig {
			columns,
			..Default::default()
		});
		layout.resize(1000.0, 405.0);
		layout.populate(store, &mut KeywordIcons::default());
		layout
	}

	fn ids(store: &GraphStore, layout: &ColumnLayout, column: usize) -> Vec<String> {
		layout.columns()[column]
			.widgets()
			.iter()
			.map(|w| store.get(w.node).id.clone())
			.collect()
	}

	#[test]
	fn producer_and_consumer_share_one_write_link() {
		let mut store = store_of(vec![("A", node(&[], &["B"])), ("B", node(&["A"], &[]))]);
		let layout = layout(&mut store, 3);

		assert_eq!(ids(&store, &layout, 0), vec!["A"]);
		assert_eq!(ids(&store, &layout, 1), vec!["B"]);
		assert!(layout.columns()[2].widgets().is_empty());

		let a = &layout.columns()[0].widgets()[0];
		assert_eq!(
			a.links,
			vec![Link {
				target: WidgetRef { column: 1, widget: 0 },
				style: LinkStyle::Write,
			}]
		);
	}

	#[test]
	fn consumer_declared_input_is_a_read_link() {
		let mut store = store_of(vec![("src", node(&[], &[])), ("sink", node(&["src"], &[]))]);
		let layout = layout(&mut store, 3);

		assert_eq!(ids(&store, &layout, 1), vec!["sink"]);
		let links = &layout.columns()[0].widgets()[0].links;
		assert_eq!(links.len(), 1);
		assert_eq!(links[0].style, LinkStyle::Read);
	}

	#[test]
	fn reverse_scan_finds_producers_not_reached_forward() {
		// "other" never appears downstream of the root but produces "mid".
		let mut store = store_of(vec![
			("root", node(&[], &["mid"])),
			("other", node(&[], &["mid"])),
		]);
		let layout = layout(&mut store, 3);

		assert_eq!(ids(&store, &layout, 0), vec!["root", "other"]);
		assert_eq!(ids(&store, &layout, 1), vec!["mid"]);
		let other = &layout.columns()[0].widgets()[1];
		assert_eq!(other.links[0].target, WidgetRef { column: 1, widget: 0 });
		assert_eq!(other.links[0].style, LinkStyle::Write);
	}

	#[test]
	fn chain_stops_at_last_column() {
		let mut store = store_of(vec![
			("a", node(&[], &["b"])),
			("b", node(&[], &["c"])),
			("c", node(&[], &["d"])),
		]);
		let layout = layout(&mut store, 2);

		assert_eq!(ids(&store, &layout, 0), vec!["a"]);
		assert_eq!(ids(&store, &layout, 1), vec!["b"]);
		assert!(layout.placement_of(store.find("c").unwrap()).is_none());
		assert!(layout.columns()[1].widgets()[0].links.is_empty());
	}

	#[test]
	fn every_node_is_placed_at_most_once() {
		// Cycle a -> b -> a plus a diamond into d.
		let mut store = store_of(vec![
			("a", node(&[], &["b", "c"])),
			("b", node(&[], &["a", "d"])),
			("c", node(&[], &["d"])),
			("d", node(&[], &[])),
		]);
		let layout = layout(&mut store, 4);

		let mut seen = HashSet::new();
		for column in layout.columns() {
			for widget in column.widgets() {
				assert!(seen.insert(widget.node), "node placed twice");
			}
		}
		assert_eq!(ids(&store, &layout, 0), vec!["a"]);
		assert_eq!(ids(&store, &layout, 1), vec!["b", "c"]);
		assert_eq!(ids(&store, &layout, 2), vec!["d"]);
		// b -> a would point back into column 0 and is dropped.
		let b = &layout.columns()[1].widgets()[0];
		assert_eq!(b.links, vec![Link {
			target: WidgetRef { column: 2, widget: 0 },
			style: LinkStyle::Write,
		}]);
	}

	#[test]
	fn nodes_behind_an_already_placed_node_are_still_placed() {
		// N is first reached in column 2 via A -> B -> N. The
		// A -> X <- Y -> N route would put N in column 1, and only from
		// there does O fit inside three columns.
		let mut store = store_of(vec![
			("A", node(&[], &["B", "X"])),
			("B", node(&[], &["N"])),
			("X", node(&["Y"], &[])),
			("Y", node(&[], &["N"])),
			("N", node(&[], &["O"])),
		]);
		let layout = layout(&mut store, 3);

		assert_eq!(ids(&store, &layout, 0), vec!["A", "Y"]);
		assert_eq!(ids(&store, &layout, 1), vec!["B", "X"]);
		assert_eq!(ids(&store, &layout, 2), vec!["N", "O"]);
		for id in ["A", "B", "X", "Y", "N", "O"] {
			assert!(layout.placement_of(store.find(id).unwrap()).is_some(), "{id} not placed");
		}

		let links = |column: usize, widget: usize| layout.columns()[column].widgets()[widget].links.clone();
		let target = |column, widget| WidgetRef { column, widget };
		assert_eq!(
			links(0, 0),
			vec![
				Link { target: target(1, 0), style: LinkStyle::Write },
				Link { target: target(1, 1), style: LinkStyle::Write },
			]
		);
		assert_eq!(links(0, 1), vec![Link { target: target(1, 1), style: LinkStyle::Read }]);
		assert_eq!(links(1, 0), vec![Link { target: target(2, 0), style: LinkStyle::Write }]);
		// Y -> N and N -> O would not join adjacent columns, so they are not drawn.
		assert!(links(2, 0).is_empty());
		assert!(links(1, 1).is_empty());
	}

	#[test]
	fn expand_twice_keeps_single_widget_and_links() {
		let mut store = store_of(vec![("A", node(&[], &["B"])), ("B", node(&["A"], &[]))]);
		let mut layout = layout(&mut store, 3);
		let mut icons = KeywordIcons::default();
		let a = store.find("A").unwrap();
		let b = store.find("B").unwrap();

		let first = layout.expand(&mut store, &mut icons, b, 1);
		let again = layout.expand(&mut store, &mut icons, a, 0);

		assert_eq!(first, Some(WidgetRef { column: 1, widget: 0 }));
		assert_eq!(again, Some(WidgetRef { column: 0, widget: 0 }));
		assert_eq!(layout.columns()[0].widgets().len(), 1);
		assert_eq!(layout.columns()[1].widgets().len(), 1);
		assert_eq!(layout.columns()[0].widgets()[0].links.len(), 1);
		// Already placed in column 0, so another column refuses it.
		assert_eq!(layout.expand(&mut store, &mut icons, a, 2), None);
	}

	#[test]
	fn same_source_yields_same_membership() {
		let entries = || {
			store_of(vec![
				("ingest", node(&["feed"], &["raw"])),
				("clean", node(&["raw"], &["tidy", "rejects"])),
				("report", node(&["tidy"], &[])),
			])
		};
		let (mut first, mut second) = (entries(), entries());
		let (one, two) = (layout(&mut first, 5), layout(&mut second, 5));
		for column in 0..5 {
			assert_eq!(ids(&first, &one, column), ids(&second, &two, column));
		}
		assert_eq!(ids(&first, &one, 1), vec!["raw"]);
		assert_eq!(ids(&first, &one, 2), vec!["clean"]);
		assert_eq!(ids(&first, &one, 3), vec!["tidy", "rejects"]);
		assert_eq!(ids(&first, &one, 4), vec!["report"]);
	}

	#[test]
	fn placeholder_labels_come_from_identifier() {
		let mut store = store_of(vec![("load_job", node(&[], &["daily-report_v2"]))]);
		let layout = layout(&mut store, 2);
		assert_eq!(layout.columns()[0].widgets()[0].label, "load job");
		assert_eq!(layout.columns()[1].widgets()[0].label, "daily report v2");
		assert_eq!(layout.columns()[1].widgets()[0].icon, "📰");
	}

	#[test]
	fn empty_graph_places_only_placeholder_root() {
		let mut store = GraphStore::new();
		store.add_map(Vec::new());
		let layout = layout(&mut store, 3);
		assert_eq!(layout.columns()[0].widgets().len(), 1);
		assert_eq!(
			layout.columns()[0].widgets()[0].label,
			"No root (no items defined?)."
		);
		assert!(layout.columns()[1..].iter().all(|c| c.widgets().is_empty()));
	}

	#[test]
	fn geometry_spreads_columns_across_surface() {
		let mut layout = ColumnLayout::new(LayoutConfig::default());
		layout.resize(1000.0, 405.0);
		let columns = layout.columns();
		assert_eq!(columns[0].x, 17.5);
		assert_eq!(columns[0].width, 165.0);
		assert_eq!(columns[0].height, 400.0);
		assert_eq!(columns[1].x, 217.0);
		assert_eq!(columns[2].x, 417.0);
	}

	#[test]
	fn packing_centres_stack() {
		let mut store = store_of(vec![("a", node(&[], &["x", "y", "z"]))]);
		let layout = layout(&mut store, 2);

		let ys: Vec<_> = layout.columns()[1].widgets().iter().map(|w| (w.y, w.bottom)).collect();
		// total 3*30 + 2*8 = 106, top = 200 - 53 = 147.
		assert_eq!(ys, vec![(147.0, 177.0), (185.0, 215.0), (223.0, 253.0)]);
		let root = &layout.columns()[0].widgets()[0];
		assert_eq!((root.y, root.bottom), (185.0, 215.0));
	}

	#[test]
	fn hit_test_maps_points_to_nodes() {
		let mut store = store_of(vec![("a", node(&[], &["b"]))]);
		let layout = layout(&mut store, 2);
		let a = store.find("a").unwrap();
		let b = store.find("b").unwrap();

		assert_eq!(layout.hit_test(50.0, 185.0), Some(a));
		assert_eq!(layout.hit_test(50.0, 215.0), Some(a));
		assert_eq!(layout.hit_test(500.0, 200.0), None);
		let second = &layout.columns()[1];
		assert_eq!(layout.hit_test(second.x + 1.0, 200.0), Some(b));
		// Column edges are exclusive, gaps and margins miss.
		assert_eq!(layout.hit_test(second.x, 200.0), None);
		assert_eq!(layout.hit_test(5.0, 200.0), None);
		assert_eq!(layout.hit_test(50.0, 10.0), None);
	}

	#[test]
	fn hit_test_prefers_last_overlapping_widget() {
		let mut store = store_of(vec![("a", node(&[], &["b", "c"]))]);
		let mut layout = layout(&mut store, 2);
		layout.columns[1].widgets[1].y = layout.columns[1].widgets[0].y;
		layout.columns[1].widgets[1].bottom = layout.columns[1].widgets[0].bottom;
		let probe = layout.columns[1].widgets[0].y + 1.0;
		let x = layout.columns[1].x + 10.0;
		assert_eq!(layout.hit_test(x, probe), store.find("c"));
	}

	#[test]
	fn packing_empty_column_is_noop() {
		let mut layout = ColumnLayout::new(LayoutConfig::default());
		layout.resize(500.0, 300.0);
		layout.pack(3);
		assert!(layout.columns()[3].widgets().is_empty());
	}
}
