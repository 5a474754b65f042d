//! The navigation graph itself.
//!
//! Terrain is split into rectangular chunks, each a [chunk_grid::ChunkGrid]
//! holding one [node::GridNode] per cell. Chunks are registered with a
//! [hierarchical_graph::HierarchicalGraph] which stitches neighbouring chunks
//! together and gives every node a compact packed index so the whole world
//! can be searched with [astar::astar].
//!
//! ```text
//!  _____________ _____________
//! | chunk 0     | chunk 1     |
//! |  o-o-o-o    |  o-o-o-o    |
//! |  |X|X|X|====|==|X|X|X|    |
//! |  o-o-o-o    |  o-o-o-o    |
//! |_____________|_____________|
//! ```
//!

pub mod astar;
pub mod chunk_grid;
pub mod error;
pub mod heightmap;
pub mod hierarchical_graph;
pub mod indexed_graph;
pub mod node;
pub mod utilities;
