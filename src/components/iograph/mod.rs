mod component;
mod details;
mod details_panel;
mod icons;
mod layout;
mod load;
mod render;
mod state;
mod store;
mod types;

pub use component::IoGraphCanvas;
pub use details::NodeDetails;
pub use details_panel::DetailsPanel;
pub use layout::LayoutConfig;
pub use load::{DEFAULT_GRAPH_URI, load_graph};
