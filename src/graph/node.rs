//! A [GridNode] is a single addressable point of the graph sitting at the
//! centre of a grid cell. Nodes are identified in two ways:
//!
//! * [NodeRef] - the origin of the owning chunk and the local index of the
//! cell. This never changes and is what [GridNodeConnection]s point at, so a
//! connection built before a chunk is registered stays valid afterwards
//! * [NodeKey] - the `(chunk index, local index)` pair handed out once a chunk
//! has been registered with a [crate::prelude::HierarchicalGraph]. It packs
//! into a single integer with the chunk index held in the bits above the
//! local index
//!
//! ```text
//!  packed index
//!  ___________________________________
//! |  chunk index  |    local index    |
//! |_______________|___________________|
//!                  <-- local_bits --->
//! ```
//!

use crate::prelude::*;
use bevy::prelude::*;

/// World-space corner of a chunk on the `x-z` plane, unique within a graph
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct ChunkOrigin {
	/// Offset along `x`
	x: i32,
	/// Offset along `z`
	z: i32,
}

impl ChunkOrigin {
	/// Create a new instance of [ChunkOrigin]
	pub fn new(x: i32, z: i32) -> Self {
		ChunkOrigin { x, z }
	}
	/// Get the `x` offset
	pub fn get_x(&self) -> i32 {
		self.x
	}
	/// Get the `z` offset
	pub fn get_z(&self) -> i32 {
		self.z
	}
}

/// Identity of a node that is independent of chunk registration order
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct NodeRef {
	/// Origin of the chunk owning the node
	origin: ChunkOrigin,
	/// Position of the node within its chunk, `z * width + x`
	local: u32,
}

impl NodeRef {
	/// Create a new instance of [NodeRef]
	pub fn new(origin: ChunkOrigin, local: u32) -> Self {
		NodeRef { origin, local }
	}
	/// Get the origin of the owning chunk
	pub fn get_origin(&self) -> ChunkOrigin {
		self.origin
	}
	/// Get the local index
	pub fn get_local(&self) -> u32 {
		self.local
	}
}

/// Hierarchical key of a registered node, the chunk index and the local index
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct NodeKey {
	/// Insertion order of the owning chunk
	chunk: u32,
	/// Position of the node within its chunk
	local: u32,
}

impl NodeKey {
	/// Create a new instance of [NodeKey]
	pub fn new(chunk: u32, local: u32) -> Self {
		NodeKey { chunk, local }
	}
	/// Get the chunk index
	pub fn get_chunk(&self) -> u32 {
		self.chunk
	}
	/// Get the local index
	pub fn get_local(&self) -> u32 {
		self.local
	}
	/// Fold the key into a single integer, `local_bits` low bits hold the
	/// local index and the chunk index sits above them
	pub fn pack(&self, local_bits: u32) -> usize {
		((self.chunk as usize) << local_bits) | self.local as usize
	}
	/// Inverse of [NodeKey::pack]
	pub fn unpack(packed: usize, local_bits: u32) -> Self {
		let mask = (1_usize << local_bits) - 1;
		NodeKey {
			chunk: (packed >> local_bits) as u32,
			local: (packed & mask) as u32,
		}
	}
}

/// A directed link from one [GridNode] to another. The reverse link is a
/// separate connection
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct GridNodeConnection {
	/// Node the connection leaves
	from: NodeRef,
	/// Node the connection arrives at
	to: NodeRef,
}

impl GridNodeConnection {
	/// Create a new instance of [GridNodeConnection]
	pub fn new(from: NodeRef, to: NodeRef) -> Self {
		GridNodeConnection { from, to }
	}
	/// Get the source of the connection
	pub fn get_from(&self) -> NodeRef {
		self.from
	}
	/// Get the target of the connection
	pub fn get_to(&self) -> NodeRef {
		self.to
	}
	/// Cost of traversing between two positions, the straight line distance
	/// between them. Evaluated whenever asked for so that elevation changes
	/// are always reflected
	pub fn cost(from_position: Vec3, to_position: Vec3) -> f32 {
		from_position.distance(to_position)
	}
}

/// A point of the graph at the centre of a grid cell
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug)]
pub struct GridNode {
	/// Position within the owning chunk, `z * width + x`, fixed at construction
	local_index: u32,
	/// Index of the owning chunk, assigned once on registration
	chunk_index: Option<u32>,
	/// World-space position, `y` is the elevation
	position: Vec3,
	/// Outgoing links in creation order
	connections: Vec<GridNodeConnection>,
}

impl GridNode {
	/// Create a new instance of [GridNode] with no connections
	pub fn new(local_index: u32, position: Vec3) -> Self {
		GridNode {
			local_index,
			chunk_index: None,
			position,
			connections: Vec::new(),
		}
	}
	/// Get the local index
	pub fn get_local_index(&self) -> u32 {
		self.local_index
	}
	/// Get the chunk index, [None] until the owning chunk has been registered
	pub fn get_chunk_index(&self) -> Option<u32> {
		self.chunk_index
	}
	/// Assign the index of the owning chunk. A node can only ever belong to
	/// one chunk index, further attempts fail with
	/// [GraphError::AlreadyRegistered]
	pub fn assign_chunk_index(&mut self, chunk_index: u32, origin: ChunkOrigin) -> Result<(), GraphError> {
		match self.chunk_index {
			Some(existing) => Err(GraphError::AlreadyRegistered {
				origin,
				chunk_index: existing,
			}),
			None => {
				self.chunk_index = Some(chunk_index);
				Ok(())
			}
		}
	}
	/// Get the hierarchical key, [None] until the owning chunk has been registered
	pub fn get_key(&self) -> Option<NodeKey> {
		self.chunk_index
			.map(|chunk| NodeKey::new(chunk, self.local_index))
	}
	/// Get the world-space position
	pub fn get_position(&self) -> Vec3 {
		self.position
	}
	/// Copy `position` into the node
	pub fn set_position(&mut self, position: Vec3) {
		self.position = position;
	}
	/// Change only the `y` component of the position
	pub fn set_elevation(&mut self, elevation: f32) {
		self.position.y = elevation;
	}
	/// Get the outgoing connections
	pub fn get_connections(&self) -> &[GridNodeConnection] {
		&self.connections
	}
	/// Replace every outgoing connection
	pub fn set_connections(&mut self, connections: Vec<GridNodeConnection>) {
		self.connections = connections;
	}
	/// Append outgoing connections, skipping any whose target the node already
	/// links to. An empty collection leaves the node untouched
	pub fn add_connections<I: IntoIterator<Item = GridNodeConnection>>(&mut self, connections: I) {
		for connection in connections {
			if !self.connections.iter().any(|c| c.get_to() == connection.get_to()) {
				self.connections.push(connection);
			}
		}
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn pack_unpack() {
		let key = NodeKey::new(5, 13);
		let packed = key.pack(4);
		assert_eq!((5 << 4) | 13, packed);
		assert_eq!(key, NodeKey::unpack(packed, 4));
	}
	#[test]
	fn pack_zero_bits() {
		// single cell chunks reserve no bits for the local index
		let key = NodeKey::new(7, 0);
		assert_eq!(7, key.pack(0));
		assert_eq!(key, NodeKey::unpack(7, 0));
	}
	#[test]
	fn assign_chunk_index_once() {
		let mut node = GridNode::new(3, Vec3::new(3.5, 0.0, 0.5));
		assert_eq!(None, node.get_key());
		node.assign_chunk_index(2, ChunkOrigin::new(0, 0)).unwrap();
		assert_eq!(Some(NodeKey::new(2, 3)), node.get_key());
	}
	#[test]
	fn assign_chunk_index_twice_fails() {
		let mut node = GridNode::new(3, Vec3::ZERO);
		node.assign_chunk_index(2, ChunkOrigin::new(0, 0)).unwrap();
		let result = node.assign_chunk_index(4, ChunkOrigin::new(0, 0));
		assert!(matches!(
			result,
			Err(GraphError::AlreadyRegistered { chunk_index: 2, .. })
		));
		assert_eq!(Some(2), node.get_chunk_index());
	}
	#[test]
	fn set_position_copies() {
		let mut node = GridNode::new(0, Vec3::ZERO);
		let mut position = Vec3::new(1.0, 2.0, 3.0);
		node.set_position(position);
		position.y = 10.0;
		assert_eq!(Vec3::new(1.0, 2.0, 3.0), node.get_position());
		node.set_elevation(4.0);
		assert_eq!(Vec3::new(1.0, 4.0, 3.0), node.get_position());
	}
	#[test]
	fn add_and_set_connections() {
		let origin = ChunkOrigin::new(0, 0);
		let mut node = GridNode::new(0, Vec3::ZERO);
		let a = GridNodeConnection::new(NodeRef::new(origin, 0), NodeRef::new(origin, 1));
		let b = GridNodeConnection::new(NodeRef::new(origin, 0), NodeRef::new(origin, 2));
		node.add_connections(vec![a]);
		node.add_connections(Vec::new());
		assert_eq!(1, node.get_connections().len());
		node.add_connections([b]);
		assert_eq!(&[a, b], node.get_connections());
		node.set_connections(vec![b]);
		assert_eq!(&[b], node.get_connections());
	}
	#[test]
	fn add_connections_skips_known_targets() {
		let origin = ChunkOrigin::new(0, 0);
		let other = ChunkOrigin::new(4, 0);
		let mut node = GridNode::new(0, Vec3::ZERO);
		let a = GridNodeConnection::new(NodeRef::new(origin, 0), NodeRef::new(other, 1));
		let b = GridNodeConnection::new(NodeRef::new(origin, 0), NodeRef::new(other, 2));
		node.add_connections([a, b]);
		node.add_connections([b, a, b]);
		assert_eq!(&[a, b], node.get_connections());
	}
	#[test]
	fn connection_cost_is_distance() {
		let cost = GridNodeConnection::cost(Vec3::new(0.5, 0.0, 0.5), Vec3::new(1.5, 0.0, 1.5));
		assert!((cost - 2.0_f32.sqrt()).abs() < f32::EPSILON);
	}
}
