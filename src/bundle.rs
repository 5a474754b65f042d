//! A ready-made set of components for an entity that owns a navigation graph
//!

use crate::prelude::*;
use bevy::prelude::*;

/// A [HierarchicalGraph] and the [PathCache] filled by path requests against it
#[derive(Bundle)]
pub struct ChunkNavGraphBundle {
	graph: HierarchicalGraph,
	path_cache: PathCache,
}

impl ChunkNavGraphBundle {
	/// Create a new instance of [ChunkNavGraphBundle] with an empty graph for
	/// chunks of `chunk_size x chunk_size` cells
	pub fn new(chunk_size: u32, level_count: u32) -> Self {
		ChunkNavGraphBundle {
			graph: HierarchicalGraph::new(chunk_size, level_count),
			path_cache: PathCache::default(),
		}
	}
	/// Create a new instance of [ChunkNavGraphBundle] whose graph is `columns x rows` flat chunks
	pub fn new_tiled(chunk_size: u32, columns: u32, rows: u32) -> Result<Self, GraphError> {
		Ok(ChunkNavGraphBundle {
			graph: HierarchicalGraph::new_tiled(chunk_size, columns, rows)?,
			path_cache: PathCache::default(),
		})
	}
	/// Create a new instance of [ChunkNavGraphBundle] holding a single chunk
	/// whose elevations are loaded from a `.ron` heightmap
	#[cfg(feature = "ron")]
	pub fn new_from_disk(chunk_size: u32, path: &str) -> Result<Self, GraphError> {
		let heightmap = Heightmap::from_ron(path.to_string())?;
		let mut graph = HierarchicalGraph::new(chunk_size, 1);
		graph.add_chunk_at(0, 0, Some(&heightmap))?;
		Ok(ChunkNavGraphBundle {
			graph,
			path_cache: PathCache::default(),
		})
	}
}
