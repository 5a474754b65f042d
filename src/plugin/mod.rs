//! Defines the Bevy [Plugin] for the chunk navigation graph
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod graph_layer;
pub mod path_layer;

/// Every change to a graph within a frame is applied in [OrderingSet::Build]
/// before any path is searched for in [OrderingSet::Calculate]
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	Build,
	Calculate,
}

pub struct ChunkNavGraphPlugin;

impl Plugin for ChunkNavGraphPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<Ordinal>()
			.register_type::<ChunkOrigin>()
			.register_type::<NodeRef>()
			.register_type::<NodeKey>()
			.register_type::<PathMetadata>()
			.add_event::<graph_layer::EventRegisterChunk>()
			.add_event::<graph_layer::EventUpdateHeightmap>()
			.add_event::<graph_layer::EventCleanCaches>()
			.add_event::<path_layer::EventPathRequest>()
			.configure_sets(Update, (OrderingSet::Build, OrderingSet::Calculate).chain())
			.add_systems(
				Update,
				(
					(
						graph_layer::process_chunk_registrations,
						graph_layer::process_heightmap_updates,
						graph_layer::clean_cache,
					)
						.chain()
						.in_set(OrderingSet::Build),
					path_layer::process_path_requests.in_set(OrderingSet::Calculate),
				),
			);
	}
}
