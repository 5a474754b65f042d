//! The contract a path search needs from a graph: how many nodes there are,
//! a unique integer for each node and the outgoing connections of a node
//!

/// A directed connection and the cost of traversing it
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedConnection<N> {
	/// Node the connection leaves
	from: N,
	/// Node the connection arrives at
	to: N,
	/// Cost of moving along the connection
	cost: f32,
}

impl<N: Copy> WeightedConnection<N> {
	/// Create a new instance of [WeightedConnection]
	pub fn new(from: N, to: N, cost: f32) -> Self {
		WeightedConnection { from, to, cost }
	}
	/// Get the source node
	pub fn get_from(&self) -> N {
		self.from
	}
	/// Get the target node
	pub fn get_to(&self) -> N {
		self.to
	}
	/// Get the traversal cost
	pub fn get_cost(&self) -> f32 {
		self.cost
	}
}

/// A graph whose nodes can be identified by an integer index, suitable for
/// [crate::prelude::astar]
pub trait IndexedGraph {
	/// Handle used to refer to a node
	type Node: Copy + Eq + std::fmt::Debug;
	/// Total number of nodes in the graph
	fn get_node_count(&self) -> usize;
	/// Unique integer of a node
	fn get_index(&self, node: Self::Node) -> usize;
	/// Connections leaving `node`
	fn get_connections(&self, node: Self::Node) -> Vec<WeightedConnection<Self::Node>>;
}
