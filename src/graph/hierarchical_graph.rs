//! The [HierarchicalGraph] aggregates any number of [ChunkGrid]s into a
//! single graph that can be searched with [astar].
//!
//! Each registered chunk receives the next chunk index in insertion order.
//! Every node is then addressable by a [NodeKey] of `(chunk index, local
//! index)` which packs into one integer, the number of bits reserved for
//! the local index being fixed by the chunk size the graph is created with.
//!
//! When a chunk is registered it is stitched to every already registered
//! chunk it shares an edge or corner with, in both directions, so the order
//! chunks are added in makes no difference to the final connections.
//!
//! Connection costs are the distance between the current node positions
//! and are evaluated when queried, so elevation changes made by
//! [HierarchicalGraph::recompute_chunk] are reflected straight away.
//!

use std::collections::BTreeMap;

use crate::prelude::*;
use bevy::prelude::*;

/// Graph of every registered [ChunkGrid]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Clone, Debug)]
pub struct HierarchicalGraph {
	/// Side length in cells of the chunks the graph creates and is sized for
	chunk_size: u32,
	/// Bits of a packed index reserved for the local index
	local_bits: u32,
	/// Number of abstraction levels
	level_count: u32,
	/// Level currently being worked on
	level: u32,
	/// Registered chunks, position is the chunk index
	chunks: Vec<ChunkGrid>,
	/// Lookup of chunk index by origin
	chunk_lookup: BTreeMap<ChunkOrigin, u32>,
	/// Sum of the cells of every registered chunk
	node_count: usize,
}

impl HierarchicalGraph {
	/// Create a new instance of an empty [HierarchicalGraph] for chunks of
	/// `chunk_size x chunk_size` cells
	///
	/// # Panics
	///
	/// If `chunk_size` or `level_count` is zero
	pub fn new(chunk_size: u32, level_count: u32) -> Self {
		if chunk_size == 0 {
			panic!("Chunk size must be greater than zero");
		}
		if level_count == 0 {
			panic!("A graph needs at least one level");
		}
		let cells = chunk_size as usize * chunk_size as usize;
		HierarchicalGraph {
			chunk_size,
			local_bits: required_local_bits(cells),
			level_count,
			level: 0,
			chunks: Vec::new(),
			chunk_lookup: BTreeMap::new(),
			node_count: 0,
		}
	}
	/// Create a new instance of a single level [HierarchicalGraph] made of
	/// `columns x rows` chunks laid edge to edge from the world origin.
	///
	/// Fails with [GraphError::TilingOutOfRange] before building anything if
	/// a chunk origin would not fit an `i32` world coordinate
	pub fn new_tiled(chunk_size: u32, columns: u32, rows: u32) -> Result<Self, GraphError> {
		let mut graph = HierarchicalGraph::new(chunk_size, 1);
		let offset = |count: u32| -> Result<i32, GraphError> {
			count
				.checked_mul(chunk_size)
				.and_then(|o| i32::try_from(o).ok())
				.ok_or(GraphError::TilingOutOfRange {
					chunk_size,
					columns,
					rows,
				})
		};
		offset(columns.saturating_sub(1))?;
		offset(rows.saturating_sub(1))?;
		for row in 0..rows {
			for column in 0..columns {
				graph.add_chunk_at(offset(column)?, offset(row)?, None)?;
			}
		}
		Ok(graph)
	}
	/// Side length in cells of the chunks the graph is sized for
	pub fn get_chunk_size(&self) -> u32 {
		self.chunk_size
	}
	/// Bits of a packed index reserved for the local index
	pub fn get_local_bits(&self) -> u32 {
		self.local_bits
	}
	/// Number of registered chunks
	pub fn get_chunk_count(&self) -> usize {
		self.chunks.len()
	}
	/// Get a reference to the registered chunks in insertion order
	pub fn get_chunks(&self) -> &[ChunkGrid] {
		&self.chunks
	}
	/// Get a chunk by its chunk index
	pub fn get_chunk(&self, chunk_index: u32) -> Option<&ChunkGrid> {
		self.chunks.get(chunk_index as usize)
	}
	/// Get a chunk by its origin
	pub fn get_chunk_by_origin(&self, origin: ChunkOrigin) -> Option<&ChunkGrid> {
		self.chunk_lookup
			.get(&origin)
			.and_then(|i| self.chunks.get(*i as usize))
	}
	/// Register a chunk with the graph, stitching it to every registered
	/// chunk next to it and assigning it the next chunk index which is
	/// returned.
	///
	/// The graph is left unchanged if a chunk with the same origin is
	/// already registered ([GraphError::DuplicateOrigin]), if the chunk has
	/// more cells than the local index can address
	/// ([GraphError::ChunkTooLarge]) or if the chunk belongs to another
	/// graph ([GraphError::AlreadyRegistered])
	pub fn add_chunk(&mut self, mut chunk: ChunkGrid) -> Result<u32, GraphError> {
		let origin = chunk.get_origin();
		if self.chunk_lookup.contains_key(&origin) {
			debug!("Ignoring chunk at {:?}, origin already registered", origin);
			return Err(GraphError::DuplicateOrigin(origin));
		}
		let capacity = 1_usize << self.local_bits;
		if chunk.get_cell_count() > capacity {
			return Err(GraphError::ChunkTooLarge {
				cells: chunk.get_cell_count(),
				capacity,
			});
		}
		if let Some(chunk_index) = chunk.get_chunk_index() {
			return Err(GraphError::AlreadyRegistered {
				origin,
				chunk_index,
			});
		}
		for existing in self.chunks.iter_mut() {
			chunk.connect_bottom(existing);
			existing.connect_bottom(&mut chunk);
			chunk.connect_right(existing);
			existing.connect_right(&mut chunk);
			chunk.connect_diagonal(existing);
			existing.connect_diagonal(&mut chunk);
		}
		let chunk_index = self.chunks.len() as u32;
		chunk.assign_chunk_index(chunk_index)?;
		self.node_count += chunk.get_cell_count();
		self.chunk_lookup.insert(origin, chunk_index);
		self.chunks.push(chunk);
		debug!("Registered chunk {} at {:?}", chunk_index, origin);
		Ok(chunk_index)
	}
	/// Create a chunk of the graph's chunk size at `(x0, z0)`, optionally
	/// derive its elevations from `heightmap`, and register it
	pub fn add_chunk_at(
		&mut self,
		x0: i32,
		z0: i32,
		heightmap: Option<&Heightmap>,
	) -> Result<u32, GraphError> {
		let mut chunk = ChunkGrid::new(self.chunk_size, x0, z0);
		if let Some(heightmap) = heightmap {
			chunk.recompute(heightmap)?;
		}
		self.add_chunk(chunk)
	}
	/// Total number of nodes across every registered chunk
	pub fn get_node_count(&self) -> usize {
		self.node_count
	}
	/// Packed index of a node
	pub fn index_of(&self, key: NodeKey) -> usize {
		key.pack(self.local_bits)
	}
	/// [NodeKey] of a packed index
	pub fn key_of(&self, packed: usize) -> NodeKey {
		NodeKey::unpack(packed, self.local_bits)
	}
	/// Get a registered node
	pub fn get_node(&self, key: NodeKey) -> Result<&GridNode, GraphError> {
		self.chunks
			.get(key.get_chunk() as usize)
			.and_then(|chunk| chunk.get_node_by_local(key.get_local()))
			.ok_or(GraphError::UnknownNode(key))
	}
	/// Convert the order independent identity of a node into its [NodeKey],
	/// [None] if the owning chunk is not registered
	pub fn resolve(&self, node: NodeRef) -> Option<NodeKey> {
		let chunk_index = *self.chunk_lookup.get(&node.get_origin())?;
		let chunk = self.chunks.get(chunk_index as usize)?;
		if (node.get_local() as usize) < chunk.get_cell_count() {
			Some(NodeKey::new(chunk_index, node.get_local()))
		} else {
			None
		}
	}
	/// Find the node of the cell containing a world-space position, `y` is ignored
	pub fn node_at_position(&self, position: Vec3) -> Option<NodeKey> {
		self.chunks.iter().enumerate().find_map(|(i, chunk)| {
			chunk
				.cell_at_position(position)
				.map(|(x, z)| NodeKey::new(i as u32, z * chunk.get_width() + x))
		})
	}
	/// Connections leaving `key` with costs measured between the current
	/// node positions. Connections into chunks that are not registered are
	/// skipped
	pub fn outgoing_connections(
		&self,
		key: NodeKey,
	) -> Result<Vec<WeightedConnection<NodeKey>>, GraphError> {
		let node = self.get_node(key)?;
		let from_position = node.get_position();
		let mut connections = Vec::with_capacity(node.get_connections().len());
		for connection in node.get_connections() {
			let Some(target) = self.resolve(connection.get_to()) else {
				debug!(
					"Skipping connection from {:?} into unregistered chunk {:?}",
					key,
					connection.get_to().get_origin()
				);
				continue;
			};
			let to_position = self.get_node(target)?.get_position();
			connections.push(WeightedConnection::new(
				key,
				target,
				GridNodeConnection::cost(from_position, to_position),
			));
		}
		Ok(connections)
	}
	/// Recalculate the elevations of the chunk at `origin` from `heightmap`,
	/// returns the chunk index of the updated chunk
	pub fn recompute_chunk(
		&mut self,
		origin: ChunkOrigin,
		heightmap: &Heightmap,
	) -> Result<u32, GraphError> {
		let chunk_index = *self
			.chunk_lookup
			.get(&origin)
			.ok_or(GraphError::UnknownChunk(origin))?;
		self.chunks[chunk_index as usize].recompute(heightmap)?;
		Ok(chunk_index)
	}
	/// Find the cheapest route between two registered nodes
	pub fn find_path_between(&self, start: NodeKey, goal: NodeKey) -> Option<GraphPath<NodeKey>> {
		if self.get_node(start).is_err() || self.get_node(goal).is_err() {
			warn!("Cannot path between {:?} and {:?}, node missing", start, goal);
			return None;
		}
		astar(self, start, goal, |a, b| {
			match (self.get_node(a), self.get_node(b)) {
				(Ok(a), Ok(b)) => a.get_position().distance(b.get_position()),
				_ => 0.0,
			}
		})
	}
	/// Find the cheapest route between the nodes of the cells containing two
	/// world-space positions
	pub fn find_path(&self, start: Vec3, goal: Vec3) -> Option<GraphPath<NodeKey>> {
		let Some(start_node) = self.node_at_position(start) else {
			warn!("Path start {:?} is outside of every chunk", start);
			return None;
		};
		let Some(goal_node) = self.node_at_position(goal) else {
			warn!("Path goal {:?} is outside of every chunk", goal);
			return None;
		};
		self.find_path_between(start_node, goal_node)
	}
	/// World-space positions of each node of `path`
	pub fn get_path_positions(&self, path: &GraphPath<NodeKey>) -> Vec<Vec3> {
		path.get_nodes()
			.iter()
			.filter_map(|key| self.get_node(*key).ok())
			.map(|node| node.get_position())
			.collect()
	}
	/// Number of abstraction levels
	pub fn get_level_count(&self) -> u32 {
		self.level_count
	}
	/// Level currently being worked on
	pub fn get_level(&self) -> u32 {
		self.level
	}
	/// Switch the level being worked on
	pub fn set_level(&mut self, level: u32) -> Result<(), GraphError> {
		if level >= self.level_count {
			return Err(GraphError::LevelOutOfRange {
				level,
				count: self.level_count,
			});
		}
		self.level = level;
		Ok(())
	}
	/// Map a node of one level onto the node representing it in another.
	/// Only level `0` is ever populated so there is never a counterpart
	pub fn convert_node_between_levels(
		&self,
		_node: NodeKey,
		_input_level: u32,
		_output_level: u32,
	) -> Option<NodeKey> {
		None
	}
	/// Iterate over the key and position of every node, for debug drawing
	pub fn iter_node_positions(&self) -> impl Iterator<Item = (NodeKey, Vec3)> + '_ {
		self.chunks.iter().flat_map(|chunk| {
			chunk
				.get_nodes()
				.iter()
				.filter_map(|node| node.get_key().map(|key| (key, node.get_position())))
		})
	}
	/// Iterate over the end points of every connection, for debug drawing
	pub fn iter_connection_segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
		self.chunks
			.iter()
			.flat_map(|chunk| chunk.iter_connections())
			.filter_map(move |connection| {
				let from = self.get_node(self.resolve(connection.get_from())?).ok()?;
				let to = self.get_node(self.resolve(connection.get_to())?).ok()?;
				Some((from.get_position(), to.get_position()))
			})
	}
}

impl IndexedGraph for HierarchicalGraph {
	type Node = NodeKey;
	fn get_node_count(&self) -> usize {
		self.node_count
	}
	fn get_index(&self, node: NodeKey) -> usize {
		self.index_of(node)
	}
	fn get_connections(&self, node: NodeKey) -> Vec<WeightedConnection<NodeKey>> {
		match self.outgoing_connections(node) {
			Ok(connections) => connections,
			Err(e) => {
				error!("{}", e);
				Vec::new()
			}
		}
	}
}
