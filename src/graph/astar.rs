//! A* search over any [IndexedGraph].
//!
//! The open set is a `BinaryHeap` ordered by smallest estimated total cost,
//! scores and the route taken to each node are recorded against the
//! node's [IndexedGraph::get_index]. Stale heap entries are skipped once a
//! node has been closed.
//!

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::prelude::*;

/// A route through a graph
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct GraphPath<N> {
	/// Nodes from the start to the goal, both included
	nodes: Vec<N>,
	/// Sum of the costs of every connection used
	cost: f32,
}

impl<N> GraphPath<N> {
	/// Create a new instance of [GraphPath]
	pub fn new(nodes: Vec<N>, cost: f32) -> Self {
		GraphPath { nodes, cost }
	}
	/// Get the nodes of the route in travel order
	pub fn get_nodes(&self) -> &[N] {
		&self.nodes
	}
	/// Get the total cost of the route
	pub fn get_cost(&self) -> f32 {
		self.cost
	}
	/// Number of nodes in the route
	pub fn len(&self) -> usize {
		self.nodes.len()
	}
	/// Whether the route has no nodes
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Entry of the open set, ordered so the `BinaryHeap` pops the smallest `f_score`
struct OpenEntry<N> {
	/// Node waiting to be explored
	node: N,
	/// [IndexedGraph::get_index] of `node`
	index: usize,
	/// Cost so far plus the estimate to the goal
	f_score: f32,
}

impl<N> PartialEq for OpenEntry<N> {
	fn eq(&self, other: &Self) -> bool {
		self.f_score.total_cmp(&other.f_score) == Ordering::Equal && self.index == other.index
	}
}

impl<N> Eq for OpenEntry<N> {}

impl<N> PartialOrd for OpenEntry<N> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<N> Ord for OpenEntry<N> {
	fn cmp(&self, other: &Self) -> Ordering {
		// reversed, smallest score is the greatest
		other
			.f_score
			.total_cmp(&self.f_score)
			.then_with(|| other.index.cmp(&self.index))
	}
}

/// Find the cheapest route from `start` to `goal`. `heuristic` estimates the
/// remaining cost between two nodes and must never overestimate it for the
/// result to be optimal.
///
/// Returns [None] if the graph is empty or the goal cannot be reached
pub fn astar<G, H>(graph: &G, start: G::Node, goal: G::Node, heuristic: H) -> Option<GraphPath<G::Node>>
where
	G: IndexedGraph,
	H: Fn(G::Node, G::Node) -> f32,
{
	if graph.get_node_count() == 0 {
		return None;
	}
	if start == goal {
		return Some(GraphPath::new(vec![start], 0.0));
	}
	let start_index = graph.get_index(start);
	let goal_index = graph.get_index(goal);
	// cheapest known cost from the start to a node
	let mut g_scores: HashMap<usize, f32> = HashMap::new();
	// the node (and its index) a node was best reached from
	let mut came_from: HashMap<usize, (usize, G::Node)> = HashMap::new();
	let mut closed: HashSet<usize> = HashSet::new();

	g_scores.insert(start_index, 0.0);
	let mut open = BinaryHeap::new();
	open.push(OpenEntry {
		node: start,
		index: start_index,
		f_score: heuristic(start, goal),
	});

	while let Some(current) = open.pop() {
		if current.index == goal_index {
			let cost = g_scores.get(&goal_index).copied().unwrap_or_default();
			return Some(reconstruct_path(&came_from, start_index, current.node, goal_index, cost));
		}
		if !closed.insert(current.index) {
			continue;
		}
		let current_g = g_scores
			.get(&current.index)
			.copied()
			.unwrap_or(f32::INFINITY);
		for connection in graph.get_connections(current.node) {
			let neighbour = connection.get_to();
			let neighbour_index = graph.get_index(neighbour);
			if closed.contains(&neighbour_index) {
				continue;
			}
			let tentative_g = current_g + connection.get_cost();
			let known_g = g_scores
				.get(&neighbour_index)
				.copied()
				.unwrap_or(f32::INFINITY);
			if tentative_g < known_g {
				g_scores.insert(neighbour_index, tentative_g);
				came_from.insert(neighbour_index, (current.index, current.node));
				open.push(OpenEntry {
					node: neighbour,
					index: neighbour_index,
					f_score: tentative_g + heuristic(neighbour, goal),
				});
			}
		}
	}
	None
}

/// Walk `came_from` back from the goal to the start
fn reconstruct_path<N: Copy>(
	came_from: &HashMap<usize, (usize, N)>,
	start_index: usize,
	goal: N,
	goal_index: usize,
	cost: f32,
) -> GraphPath<N> {
	let mut nodes = vec![goal];
	let mut index = goal_index;
	while index != start_index {
		match came_from.get(&index) {
			Some((previous_index, previous)) => {
				nodes.push(*previous);
				index = *previous_index;
			}
			None => break,
		}
	}
	nodes.reverse();
	GraphPath::new(nodes, cost)
}
