//! Logic for growing a [HierarchicalGraph] with new chunks and for applying
//! heightmap changes, which in turn purges cached paths that may of been
//! made invalid by the new elevations
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Used to register a new chunk of the graph's chunk size with every [HierarchicalGraph]
#[derive(Event)]
pub struct EventRegisterChunk {
	/// World-space corner of the new chunk
	origin: ChunkOrigin,
	/// Optional elevations of the new chunk
	heightmap: Option<Heightmap>,
}

impl EventRegisterChunk {
	/// Create a new instance of [EventRegisterChunk] for a flat chunk
	pub fn new(origin: ChunkOrigin) -> Self {
		EventRegisterChunk {
			origin,
			heightmap: None,
		}
	}
	/// Create a new instance of [EventRegisterChunk] whose elevations are derived from `heightmap`
	pub fn with_heightmap(origin: ChunkOrigin, heightmap: Heightmap) -> Self {
		EventRegisterChunk {
			origin,
			heightmap: Some(heightmap),
		}
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_origin(&self) -> ChunkOrigin {
		self.origin
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_heightmap(&self) -> Option<&Heightmap> {
		self.heightmap.as_ref()
	}
}

/// Read [EventRegisterChunk] and add the chunks to each graph. New
/// connections can shorten any cached path so the path caches are emptied
#[cfg(not(tarpaulin_include))]
pub fn process_chunk_registrations(
	mut events: EventReader<EventRegisterChunk>,
	mut query: Query<(&mut HierarchicalGraph, Option<&mut PathCache>)>,
) {
	let requests: Vec<&EventRegisterChunk> = events.read().collect();
	if requests.is_empty() {
		return;
	}
	for (mut graph, path_cache) in query.iter_mut() {
		let mut registered = false;
		for request in requests.iter() {
			let origin = request.get_origin();
			match graph.add_chunk_at(origin.get_x(), origin.get_z(), request.get_heightmap()) {
				Ok(chunk_index) => {
					debug!("Chunk {:?} registered as {}", origin, chunk_index);
					registered = true;
				}
				Err(e) if is_routine_rejection(&e) => {
					debug!("Skipped registering chunk {:?}: {}", origin, e)
				}
				Err(e) => error!("Failed registering chunk {:?}: {}", origin, e),
			}
		}
		if registered {
			if let Some(mut cache) = path_cache {
				cache.clear();
			}
		}
	}
}

/// Rejections that leave a graph unchanged and are expected during normal
/// use: a chunk registered twice, or a heightmap update for a chunk held by
/// a different graph
fn is_routine_rejection(error: &GraphError) -> bool {
	matches!(
		error,
		GraphError::DuplicateOrigin(_) | GraphError::UnknownChunk(_)
	)
}

/// Used to replace the elevations of a registered chunk
#[derive(Event)]
pub struct EventUpdateHeightmap {
	/// Origin of the chunk to update
	origin: ChunkOrigin,
	/// New elevations of the chunk, `(width + 1) x (height + 1)` samples
	heightmap: Heightmap,
}

impl EventUpdateHeightmap {
	/// Create a new instance of [EventUpdateHeightmap]
	pub fn new(origin: ChunkOrigin, heightmap: Heightmap) -> Self {
		EventUpdateHeightmap { origin, heightmap }
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_origin(&self) -> ChunkOrigin {
		self.origin
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_heightmap(&self) -> &Heightmap {
		&self.heightmap
	}
}

/// Read [EventUpdateHeightmap], recompute the elevations of the chunk and
/// request that paths through it are purged
#[cfg(not(tarpaulin_include))]
pub fn process_heightmap_updates(
	mut events: EventReader<EventUpdateHeightmap>,
	mut query: Query<(Entity, &mut HierarchicalGraph)>,
	mut event_cache_clean: EventWriter<EventCleanCaches>,
) {
	// coalesce events to avoid purging the same chunk more than once
	let mut coalesced_chunks = Vec::new();
	for event in events.read() {
		for (entity, mut graph) in query.iter_mut() {
			match graph.recompute_chunk(event.get_origin(), event.get_heightmap()) {
				Ok(chunk_index) => {
					if !coalesced_chunks.contains(&(entity, chunk_index)) {
						coalesced_chunks.push((entity, chunk_index));
					}
				}
				// other graphs may own the chunk
				Err(e) if is_routine_rejection(&e) => {
					debug!("Graph {:?} skipped heightmap update: {}", entity, e)
				}
				Err(e) => error!("Failed updating heightmap of {:?}: {}", event.get_origin(), e),
			}
		}
	}
	for (entity, chunk_index) in coalesced_chunks {
		debug!("Elevations of chunk {} of graph {:?} changed", chunk_index, entity);
		event_cache_clean.write(EventCleanCaches::new(entity, chunk_index));
	}
}

/// For the given chunk of the graph owned by an entity any cached path
/// passing through it is removed
#[derive(Event)]
pub struct EventCleanCaches {
	/// Entity holding the [HierarchicalGraph] the chunk index belongs to
	graph: Entity,
	/// Chunk whose elevations changed
	chunk_index: u32,
}

impl EventCleanCaches {
	/// Create a new instance of [EventCleanCaches]
	pub fn new(graph: Entity, chunk_index: u32) -> Self {
		EventCleanCaches { graph, chunk_index }
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_graph(&self) -> Entity {
		self.graph
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_chunk_index(&self) -> u32 {
		self.chunk_index
	}
}

/// Lookup any cached paths making use of chunks that have had their elevation adjusted and remove them from the cache of the same entity
#[cfg(not(tarpaulin_include))]
pub fn clean_cache(
	mut events: EventReader<EventCleanCaches>,
	mut q_path: Query<(Entity, &mut PathCache)>,
) {
	let requests: Vec<(Entity, u32)> = events
		.read()
		.map(|e| (e.get_graph(), e.get_chunk_index()))
		.collect();
	if requests.is_empty() {
		return;
	}
	for (entity, mut cache) in q_path.iter_mut() {
		let chunks: Vec<u32> = requests
			.iter()
			.filter(|(graph, _)| *graph == entity)
			.map(|(_, chunk_index)| *chunk_index)
			.collect();
		if chunks.is_empty() {
			continue;
		}
		let removed = cache.purge_chunks(&chunks);
		if removed > 0 {
			debug!("Purged {} cached paths", removed);
		}
	}
}
