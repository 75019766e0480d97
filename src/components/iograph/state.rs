use log::debug;

use super::details::NodeDetails;
use super::icons::{KeywordIcons, RoundRobin};
use super::layout::{ColumnLayout, LayoutConfig};
use super::store::{GraphStore, NodeIdx};

/// Visual toggles switched on by mentioning them anywhere in the page URL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewFlags {
	pub debug: bool,
	/// Animate link dashes. Implied by `debug`.
	pub marching: bool,
}

impl ViewFlags {
	pub fn from_location(href: &str) -> Self {
		let debug = href.contains("debug");
		Self {
			debug,
			marching: debug || href.contains("marching"),
		}
	}
}

pub struct IoGraphState {
	pub store: GraphStore,
	pub layout: ColumnLayout,
	pub flags: ViewFlags,
	pub cursor: Option<(f64, f64)>,
	pub selected: Option<NodeIdx>,
	pub width: f64,
	pub height: f64,
	pub frame_count: u64,
	shrugs: RoundRobin,
}

impl IoGraphState {
	/// Lays out the store around its root and selects the root.
	pub fn new(
		mut store: GraphStore,
		config: LayoutConfig,
		flags: ViewFlags,
		width: f64,
		height: f64,
	) -> Self {
		let mut layout = ColumnLayout::new(config);
		layout.resize(width, height);
		let root = layout.populate(&mut store, &mut KeywordIcons::default());
		Self {
			store,
			layout,
			flags,
			cursor: None,
			selected: Some(root),
			width,
			height,
			frame_count: 0,
			shrugs: RoundRobin::default(),
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.layout.resize(width, height);
	}

	pub fn set_cursor(&mut self, x: f64, y: f64) {
		self.cursor = Some((x, y));
	}

	pub fn clear_cursor(&mut self) {
		self.cursor = None;
	}

	/// Selects whatever sits under `(x, y)`, clearing the selection when
	/// nothing does.
	pub fn select_at(&mut self, x: f64, y: f64) -> Option<NodeDetails> {
		self.selected = self.layout.hit_test(x, y);
		if let Some(node) = self.selected {
			debug!("selected '{}'", self.store.get(node).id);
		}
		self.details()
	}

	pub fn details(&mut self) -> Option<NodeDetails> {
		self.selected
			.map(|node| NodeDetails::describe(&self.store, node, &mut self.shrugs))
	}

	pub fn is_selected(&self, node: NodeIdx) -> bool {
		self.selected == Some(node)
	}
}
