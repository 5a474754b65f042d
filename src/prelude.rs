//! `use bevy_chunk_nav_graph::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::graph::{
	astar::*, chunk_grid::*, error::*, heightmap::*, hierarchical_graph::*, indexed_graph::*,
	node::*, utilities::*,
};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	plugin::{graph_layer::*, path_layer::*, *},
};
