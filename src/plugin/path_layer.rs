//! Logic relating to path requests and the [PathCache] they fill
//!

use std::collections::BTreeMap;

use crate::prelude::*;
use bevy::prelude::*;

/// Identifies a cached path by the nodes it runs between
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect)]
pub struct PathMetadata {
	/// Node the path starts from
	source: NodeKey,
	/// Node the path ends at
	target: NodeKey,
}

impl PathMetadata {
	/// Create a new instance of [PathMetadata]
	pub fn new(source: NodeKey, target: NodeKey) -> Self {
		PathMetadata { source, target }
	}
	pub fn get_source(&self) -> NodeKey {
		self.source
	}
	pub fn get_target(&self) -> NodeKey {
		self.target
	}
}

/// Paths that have been calculated, an actor can poll this for the route
/// it has asked for
#[derive(Component, Default, Clone)]
pub struct PathCache {
	/// Calculated paths keyed by their end points
	paths: BTreeMap<PathMetadata, GraphPath<NodeKey>>,
}

impl PathCache {
	/// Get the map of paths
	pub fn get(&self) -> &BTreeMap<PathMetadata, GraphPath<NodeKey>> {
		&self.paths
	}
	/// Get a path between two nodes. Returns [None] if it hasn't been calculated
	pub fn get_path(&self, source: NodeKey, target: NodeKey) -> Option<&GraphPath<NodeKey>> {
		let path = self.paths.get(&PathMetadata::new(source, target));
		trace!("Path: {:?}", path);
		path
	}
	/// Insert a path into the cache
	pub fn insert_path(&mut self, metadata: PathMetadata, path: GraphPath<NodeKey>) {
		self.paths.insert(metadata, path);
	}
	/// Remove a path from the cache
	pub fn remove_path(&mut self, metadata: PathMetadata) {
		self.paths.remove(&metadata);
	}
	/// Remove every path which visits any of `chunks`, returns the number of paths removed
	pub fn purge_chunks(&mut self, chunks: &[u32]) -> usize {
		let before = self.paths.len();
		self.paths.retain(|_, path| {
			!path
				.get_nodes()
				.iter()
				.any(|node| chunks.contains(&node.get_chunk()))
		});
		before - self.paths.len()
	}
	/// Remove every path
	pub fn clear(&mut self) {
		self.paths.clear();
	}
}

/// A request to find a path between the cells containing two world-space positions
#[derive(Event)]
pub struct EventPathRequest {
	/// Where the path starts
	source: Vec3,
	/// Where the path should end
	target: Vec3,
}

impl EventPathRequest {
	/// Create a new instance of [EventPathRequest]
	pub fn new(source: Vec3, target: Vec3) -> Self {
		EventPathRequest { source, target }
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_source(&self) -> Vec3 {
		self.source
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_target(&self) -> Vec3 {
		self.target
	}
}

/// Process [EventPathRequest] and insert each found path into the [PathCache]
#[cfg(not(tarpaulin_include))]
pub fn process_path_requests(
	mut events: EventReader<EventPathRequest>,
	mut query: Query<(&HierarchicalGraph, &mut PathCache)>,
) {
	for event in events.read() {
		for (graph, mut cache) in query.iter_mut() {
			let (Some(source), Some(target)) = (
				graph.node_at_position(event.get_source()),
				graph.node_at_position(event.get_target()),
			) else {
				warn!(
					"Path request {:?} -> {:?} is outside of the graph",
					event.get_source(),
					event.get_target()
				);
				continue;
			};
			let metadata = PathMetadata::new(source, target);
			// several actors may ask for the same path
			if cache.get().contains_key(&metadata) {
				continue;
			}
			match graph.find_path_between(source, target) {
				Some(path) => cache.insert_path(metadata, path),
				None => debug!("No path from {:?} to {:?}", source, target),
			}
		}
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;

	/// Path visiting the first node of each of `chunks`
	fn path_through(chunks: &[u32]) -> GraphPath<NodeKey> {
		GraphPath::new(chunks.iter().map(|c| NodeKey::new(*c, 0)).collect(), 1.0)
	}

	#[test]
	fn purge_only_paths_through_chunk() {
		let mut cache = PathCache::default();
		let a = PathMetadata::new(NodeKey::new(0, 0), NodeKey::new(2, 0));
		let b = PathMetadata::new(NodeKey::new(0, 0), NodeKey::new(3, 0));
		cache.insert_path(a, path_through(&[0, 1, 2]));
		cache.insert_path(b, path_through(&[0, 3]));
		assert_eq!(1, cache.purge_chunks(&[1]));
		assert!(cache.get_path(NodeKey::new(0, 0), NodeKey::new(2, 0)).is_none());
		assert!(cache.get_path(NodeKey::new(0, 0), NodeKey::new(3, 0)).is_some());
		assert_eq!(0, cache.purge_chunks(&[5]));
	}
	#[test]
	fn remove_and_clear() {
		let mut cache = PathCache::default();
		let a = PathMetadata::new(NodeKey::new(0, 0), NodeKey::new(0, 1));
		let b = PathMetadata::new(NodeKey::new(0, 1), NodeKey::new(0, 0));
		cache.insert_path(a, path_through(&[0]));
		cache.insert_path(b, path_through(&[0]));
		cache.remove_path(a);
		assert_eq!(1, cache.get().len());
		cache.clear();
		assert!(cache.get().is_empty());
	}
}
