//! Errors raised while building, mutating and querying the graph
//!

use thiserror::Error;

use crate::prelude::*;

/// Failures of graph construction and lookups
#[derive(Debug, Error)]
pub enum GraphError {
	#[error("Cell ({x}, {z}) is out of range of a {width}x{height} chunk")]
	OutOfRange {
		/// Requested column
		x: u32,
		/// Requested row
		z: u32,
		/// Column count of the chunk
		width: u32,
		/// Row count of the chunk
		height: u32,
	},
	#[error("Node {0:?} does not exist in the graph")]
	UnknownNode(NodeKey),
	#[error("No chunk with origin {0:?} is registered")]
	UnknownChunk(ChunkOrigin),
	#[error("A chunk with origin {0:?} is already registered")]
	DuplicateOrigin(ChunkOrigin),
	#[error("Chunk at {origin:?} has already been assigned chunk index {chunk_index}")]
	AlreadyRegistered {
		/// Origin of the chunk that was registered twice
		origin: ChunkOrigin,
		/// Index it was given the first time
		chunk_index: u32,
	},
	#[error("Chunk of {cells} cells exceeds the {capacity} cells a graph chunk can address")]
	ChunkTooLarge {
		/// Cells in the rejected chunk
		cells: usize,
		/// Local index capacity of the graph
		capacity: usize,
	},
	#[error("Heightmap has {found:?} samples, expected {expected:?}")]
	HeightmapMismatch {
		/// `(width, depth)` of samples required
		expected: (usize, usize),
		/// `(width, depth)` of samples supplied
		found: (usize, usize),
	},
	#[error("Heightmap of {width}x{depth} needs {expected} samples, found {found}")]
	SampleCountMismatch {
		/// Declared samples along `x`
		width: usize,
		/// Declared samples along `z`
		depth: usize,
		/// `width * depth`
		expected: usize,
		/// Samples supplied
		found: usize,
	},
	#[error("{columns}x{rows} chunks of size {chunk_size} reach beyond i32 world coordinates")]
	TilingOutOfRange {
		/// Side length of each chunk
		chunk_size: u32,
		/// Chunks along `x`
		columns: u32,
		/// Chunks along `z`
		rows: u32,
	},
	#[error("Level {level} does not exist, graph has {count} levels")]
	LevelOutOfRange {
		/// Requested level
		level: u32,
		/// Levels in the graph
		count: u32,
	},
	#[error("Failed reading heightmap: {0}")]
	Io(#[from] std::io::Error),
	#[cfg(feature = "ron")]
	#[error("Failed deserializing heightmap: {0}")]
	Ron(String),
	#[cfg(feature = "csv")]
	#[error("Failed parsing heightmap csv: {0}")]
	Csv(#[from] csv::Error),
	#[cfg(feature = "csv")]
	#[error("Heightmap csv expects f32 values, found {0:?}")]
	CsvValue(String),
	#[cfg(feature = "heightmap")]
	#[error("Failed opening heightmap image: {0}")]
	Image(String),
}
