//! Useful structures and tools used by the graph
//!

use bevy::prelude::*;

/// Side length, in cells, of the chunks created by [crate::prelude::HierarchicalGraph::new_tiled] when a caller has no preference
pub const DEFAULT_CHUNK_SIZE: u32 = 16;

/// Number of bits required to give each of `cell_count` cells a distinct local index, i.e `ceil(log2(cell_count))`
pub fn required_local_bits(cell_count: usize) -> u32 {
	if cell_count <= 1 {
		0
	} else {
		usize::BITS - (cell_count - 1).leading_zeros()
	}
}

/// Convenience way of describing the 8 directions a grid cell can be linked in.
///
/// `North` points towards negative `z`, `East` towards positive `x`
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Reflect)]
pub enum Ordinal {
	North,
	East,
	South,
	West,
	NorthEast,
	SouthEast,
	SouthWest,
	NorthWest,
}

impl Ordinal {
	/// Every direction in the order neighbours are linked
	pub const ALL: [Ordinal; 8] = [
		Ordinal::North,
		Ordinal::East,
		Ordinal::South,
		Ordinal::West,
		Ordinal::NorthEast,
		Ordinal::SouthEast,
		Ordinal::SouthWest,
		Ordinal::NorthWest,
	];
	/// The `(x, z)` step taken by moving one cell in this direction
	pub fn get_offset(&self) -> (i32, i32) {
		match self {
			Ordinal::North => (0, -1),
			Ordinal::East => (1, 0),
			Ordinal::South => (0, 1),
			Ordinal::West => (-1, 0),
			Ordinal::NorthEast => (1, -1),
			Ordinal::SouthEast => (1, 1),
			Ordinal::SouthWest => (-1, 1),
			Ordinal::NorthWest => (-1, -1),
		}
	}
	/// Returns the opposite [Ordinal] of the current
	pub fn inverse(&self) -> Ordinal {
		match self {
			Ordinal::North => Ordinal::South,
			Ordinal::East => Ordinal::West,
			Ordinal::South => Ordinal::North,
			Ordinal::West => Ordinal::East,
			Ordinal::NorthEast => Ordinal::SouthWest,
			Ordinal::SouthEast => Ordinal::NorthWest,
			Ordinal::SouthWest => Ordinal::NorthEast,
			Ordinal::NorthWest => Ordinal::SouthEast,
		}
	}
	/// Based on a grid cells `(x, z)` position within a `width` by `height` grid find all possible neighbours including diagonal directions (up to 8)
	pub fn get_all_cell_neighbours(cell: (u32, u32), width: u32, height: u32) -> Vec<(u32, u32)> {
		let mut neighbours = Vec::with_capacity(8);
		for ordinal in Ordinal::ALL.iter() {
			let (dx, dz) = ordinal.get_offset();
			let x = cell.0 as i64 + dx as i64;
			let z = cell.1 as i64 + dz as i64;
			if x >= 0 && z >= 0 && x < width as i64 && z < height as i64 {
				neighbours.push((x as u32, z as u32));
			}
		}
		neighbours
	}
}

/// The three positions `position - 1`, `position` and `position + 1` along a chunk boundary, discarding any that fall outside of `0..length`
pub fn get_boundary_window(position: u32, length: u32) -> Vec<u32> {
	let start = position.saturating_sub(1);
	let end = (position + 1).min(length.saturating_sub(1));
	(start..=end).filter(|p| *p < length).collect()
}
