//! A [ChunkGrid] covers one rectangular chunk of terrain with a dense,
//! row-major array of [GridNode]s, one per cell:
//!
//! ```text
//!        x0      x0 + width
//!   z0    _______________
//!        |0 |1 |2 |3 |..|
//!        |w |..|..|..|..|
//!        |..|..|..|..|..|
//!         ---------------
//!   z0 + height
//! ```
//!
//! Within a chunk every node links to each of its (up to 8) surrounding
//! cells. Chunks that share an edge are stitched together along it, each
//! boundary node linking to the three nearest boundary nodes of the other
//! chunk, and chunks that only share a corner link their corner nodes
//!

use crate::prelude::*;
use bevy::prelude::*;

/// A chunk of terrain and the graph nodes within it
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug)]
pub struct ChunkGrid {
	/// Number of cells along `x`
	width: u32,
	/// Number of cells along `z`
	height: u32,
	/// World-space corner of the chunk
	origin: ChunkOrigin,
	/// Node of cell `(x, z)` sits at `z * width + x`
	nodes: Vec<GridNode>,
	/// Insertion order within the owning graph, assigned once on registration
	chunk_index: Option<u32>,
}

impl ChunkGrid {
	/// Create a new instance of a square [ChunkGrid] of `size x size` cells
	/// with its corner at `(x0, z0)`. All nodes start at an elevation of `0`
	///
	/// # Panics
	///
	/// If `size` is zero
	pub fn new(size: u32, x0: i32, z0: i32) -> Self {
		ChunkGrid::with_dimensions(size, size, x0, z0)
	}
	/// Create a new instance of a [ChunkGrid] of `width x height` cells with
	/// its corner at `(x0, z0)`
	///
	/// # Panics
	///
	/// If either dimension is zero or the cell count does not fit a `u32` local index
	pub fn with_dimensions(width: u32, height: u32, x0: i32, z0: i32) -> Self {
		if width == 0 || height == 0 {
			panic!(
				"Chunk dimensions `({}, {})` cannot hold any cells, both must be greater than zero",
				width, height
			);
		}
		let Some(cells) = width.checked_mul(height) else {
			panic!(
				"Chunk dimensions `({}, {})` hold more cells than a local index can address",
				width, height
			);
		};
		let mut nodes = Vec::with_capacity(cells as usize);
		for z in 0..height {
			for x in 0..width {
				// nodes sit at the centre of their cell
				let position = Vec3::new(
					x as f32 + 0.5 + x0 as f32,
					0.0,
					z as f32 + 0.5 + z0 as f32,
				);
				nodes.push(GridNode::new(z * width + x, position));
			}
		}
		let mut chunk = ChunkGrid {
			width,
			height,
			origin: ChunkOrigin::new(x0, z0),
			nodes,
			chunk_index: None,
		};
		chunk.connect_within();
		chunk
	}
	/// Create a new instance of a square [ChunkGrid] whose node elevations
	/// are derived from `heightmap`
	pub fn with_heightmap(
		size: u32,
		x0: i32,
		z0: i32,
		heightmap: &Heightmap,
	) -> Result<Self, GraphError> {
		let mut chunk = ChunkGrid::new(size, x0, z0);
		chunk.recompute(heightmap)?;
		Ok(chunk)
	}
	/// Number of cells along `x`
	pub fn get_width(&self) -> u32 {
		self.width
	}
	/// Number of cells along `z`
	pub fn get_height(&self) -> u32 {
		self.height
	}
	/// Get the world-space corner of the chunk
	pub fn get_origin(&self) -> ChunkOrigin {
		self.origin
	}
	/// Number of cells (and therefore nodes) in the chunk
	pub fn get_cell_count(&self) -> usize {
		self.nodes.len()
	}
	/// Number of low bits a packed index needs to hold any local index of this chunk
	pub fn get_local_index_bits(&self) -> u32 {
		required_local_bits(self.get_cell_count())
	}
	/// Insertion order within the owning graph, [None] if not registered
	pub fn get_chunk_index(&self) -> Option<u32> {
		self.chunk_index
	}
	/// Get a reference to the nodes in row-major order
	pub fn get_nodes(&self) -> &[GridNode] {
		&self.nodes
	}
	/// Get the node of cell `(x, z)`
	pub fn get_node(&self, x: u32, z: u32) -> Result<&GridNode, GraphError> {
		let i = self.offset(x, z)?;
		Ok(&self.nodes[i])
	}
	/// Get the node of cell `(x, z)` mutably
	pub fn get_node_mut(&mut self, x: u32, z: u32) -> Result<&mut GridNode, GraphError> {
		let i = self.offset(x, z)?;
		Ok(&mut self.nodes[i])
	}
	/// Get a node by its local index
	pub fn get_node_by_local(&self, local: u32) -> Option<&GridNode> {
		self.nodes.get(local as usize)
	}
	/// Cell `(x, z)` of a local index
	pub fn get_cell_of_local(&self, local: u32) -> (u32, u32) {
		(local % self.width, local / self.width)
	}
	/// Find the cell containing a world-space position, `y` is ignored
	pub fn cell_at_position(&self, position: Vec3) -> Option<(u32, u32)> {
		if !position.x.is_finite() || !position.z.is_finite() {
			return None;
		}
		let local_x = position.x - self.origin.get_x() as f32;
		let local_z = position.z - self.origin.get_z() as f32;
		if local_x < 0.0
			|| local_z < 0.0
			|| local_x >= self.width as f32
			|| local_z >= self.height as f32
		{
			return None;
		}
		Some((local_x.floor() as u32, local_z.floor() as u32))
	}
	/// Iterate over every outgoing connection of every node
	pub fn iter_connections(&self) -> impl Iterator<Item = &GridNodeConnection> {
		self.nodes.iter().flat_map(|n| n.get_connections().iter())
	}
	/// Bounds checked position of cell `(x, z)` within `nodes`
	fn offset(&self, x: u32, z: u32) -> Result<usize, GraphError> {
		if x >= self.width || z >= self.height {
			return Err(GraphError::OutOfRange {
				x,
				z,
				width: self.width,
				height: self.height,
			});
		}
		Ok((z * self.width + x) as usize)
	}
	/// World-space `x` of the edge opposite the origin
	fn far_x(&self) -> i64 {
		self.origin.get_x() as i64 + self.width as i64
	}
	/// World-space `z` of the edge opposite the origin
	fn far_z(&self) -> i64 {
		self.origin.get_z() as i64 + self.height as i64
	}
	/// Identity of the node of cell `(x, z)`, the cell must be within the chunk
	fn node_ref(&self, x: u32, z: u32) -> NodeRef {
		NodeRef::new(self.origin, z * self.width + x)
	}
	/// Link every node to each of its surrounding cells within the chunk.
	/// Each cell visits its full neighbourhood so the reverse of every link
	/// is created when the neighbour itself is visited
	fn connect_within(&mut self) {
		for z in 0..self.height {
			for x in 0..self.width {
				let from = self.node_ref(x, z);
				let connections = Ordinal::get_all_cell_neighbours((x, z), self.width, self.height)
					.into_iter()
					.map(|(nx, nz)| GridNodeConnection::new(from, self.node_ref(nx, nz)))
					.collect();
				let i = (z * self.width + x) as usize;
				self.nodes[i].set_connections(connections);
			}
		}
	}
	/// Stitch this chunk to `other` when `other` sits directly below it
	/// (towards positive `z`) with the same `x` origin. Each node along the
	/// bottom row of this chunk links to the nodes of the top row of `other`
	/// at the same, previous and next column, and vice versa.
	///
	/// Returns `false` and leaves both chunks untouched if they are not
	/// adjacent in this way
	pub fn connect_bottom(&mut self, other: &mut ChunkGrid) -> bool {
		if self.origin.get_x() != other.origin.get_x()
			|| self.far_z() != other.origin.get_z() as i64
		{
			return false;
		}
		let shared_length = self.width.min(other.width);
		let bottom_row = self.height - 1;
		for x in 0..shared_length {
			// this chunk into the other
			let from = self.node_ref(x, bottom_row);
			let links: Vec<GridNodeConnection> = get_boundary_window(x, other.width)
				.into_iter()
				.map(|nx| GridNodeConnection::new(from, other.node_ref(nx, 0)))
				.collect();
			self.nodes[from.get_local() as usize].add_connections(links);
			// the other back into this chunk
			let from = other.node_ref(x, 0);
			let links: Vec<GridNodeConnection> = get_boundary_window(x, self.width)
				.into_iter()
				.map(|nx| GridNodeConnection::new(from, self.node_ref(nx, bottom_row)))
				.collect();
			other.nodes[from.get_local() as usize].add_connections(links);
		}
		debug!(
			"Stitched bottom of chunk {:?} to {:?}",
			self.origin, other.origin
		);
		true
	}
	/// Stitch this chunk to `other` when `other` sits directly to the right
	/// of it (towards positive `x`) with the same `z` origin. Each node along
	/// the rightmost column of this chunk links to the nodes of the leftmost
	/// column of `other` at the same, previous and next row, and vice versa.
	///
	/// Returns `false` and leaves both chunks untouched if they are not
	/// adjacent in this way
	pub fn connect_right(&mut self, other: &mut ChunkGrid) -> bool {
		if self.origin.get_z() != other.origin.get_z()
			|| self.far_x() != other.origin.get_x() as i64
		{
			return false;
		}
		let shared_length = self.height.min(other.height);
		let right_column = self.width - 1;
		for z in 0..shared_length {
			let from = self.node_ref(right_column, z);
			let links: Vec<GridNodeConnection> = get_boundary_window(z, other.height)
				.into_iter()
				.map(|nz| GridNodeConnection::new(from, other.node_ref(0, nz)))
				.collect();
			self.nodes[from.get_local() as usize].add_connections(links);
			let from = other.node_ref(0, z);
			let links: Vec<GridNodeConnection> = get_boundary_window(z, self.height)
				.into_iter()
				.map(|nz| GridNodeConnection::new(from, self.node_ref(right_column, nz)))
				.collect();
			other.nodes[from.get_local() as usize].add_connections(links);
		}
		debug!(
			"Stitched right of chunk {:?} to {:?}",
			self.origin, other.origin
		);
		true
	}
	/// Link the touching corner nodes of this chunk and `other` when `other`
	/// sits diagonally below this chunk, either to the bottom-right or to
	/// the bottom-left, sharing only a corner point.
	///
	/// Returns `false` and leaves both chunks untouched otherwise
	pub fn connect_diagonal(&mut self, other: &mut ChunkGrid) -> bool {
		let below = self.far_z() == other.origin.get_z() as i64;
		if !below {
			return false;
		}
		let (own_cell, other_cell) =
			if self.far_x() == other.origin.get_x() as i64 {
				// bottom-right
				((self.width - 1, self.height - 1), (0, 0))
			} else if other.far_x() == self.origin.get_x() as i64 {
				// bottom-left
				((0, self.height - 1), (other.width - 1, 0))
			} else {
				return false;
			};
		let from = self.node_ref(own_cell.0, own_cell.1);
		let to = other.node_ref(other_cell.0, other_cell.1);
		self.nodes[from.get_local() as usize].add_connections([GridNodeConnection::new(from, to)]);
		other.nodes[to.get_local() as usize].add_connections([GridNodeConnection::new(to, from)]);
		debug!(
			"Stitched corner of chunk {:?} to {:?}",
			self.origin, other.origin
		);
		true
	}
	/// Recalculate the elevation of every node as the mean of the four
	/// heightmap samples at the corners of its cell. `heightmap` must hold
	/// `(width + 1) x (height + 1)` samples
	pub fn recompute(&mut self, heightmap: &Heightmap) -> Result<(), GraphError> {
		if !heightmap.fits_chunk(self.width, self.height) {
			return Err(GraphError::HeightmapMismatch {
				expected: (self.width as usize + 1, self.height as usize + 1),
				found: (heightmap.get_width(), heightmap.get_depth()),
			});
		}
		for z in 0..self.height {
			for x in 0..self.width {
				let elevation = heightmap.corner_average(x as usize, z as usize)?;
				self.nodes[(z * self.width + x) as usize].set_elevation(elevation);
			}
		}
		Ok(())
	}
	/// Fold the chunk index into the chunk and every node. Can succeed only once
	pub(crate) fn assign_chunk_index(&mut self, chunk_index: u32) -> Result<(), GraphError> {
		if let Some(existing) = self.chunk_index {
			return Err(GraphError::AlreadyRegistered {
				origin: self.origin,
				chunk_index: existing,
			});
		}
		for node in self.nodes.iter_mut() {
			node.assign_chunk_index(chunk_index, self.origin)?;
		}
		self.chunk_index = Some(chunk_index);
		Ok(())
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	/// Number of connections of cell `(x, z)`
	fn connection_count(chunk: &ChunkGrid, x: u32, z: u32) -> usize {
		chunk.get_node(x, z).unwrap().get_connections().len()
	}
	/// Collect the connection counts of every node
	fn all_connection_counts(chunk: &ChunkGrid) -> Vec<usize> {
		chunk
			.get_nodes()
			.iter()
			.map(|n| n.get_connections().len())
			.collect()
	}
	/// Whether node `from` of `chunk` has a link to `to`
	fn has_link(chunk: &ChunkGrid, from: (u32, u32), to: NodeRef) -> bool {
		chunk
			.get_node(from.0, from.1)
			.unwrap()
			.get_connections()
			.iter()
			.any(|c| c.get_to() == to)
	}
	#[test]
	fn node_layout() {
		let chunk = ChunkGrid::new(4, 8, -4);
		assert_eq!(16, chunk.get_cell_count());
		let node = chunk.get_node(1, 2).unwrap();
		assert_eq!(9, node.get_local_index());
		assert_eq!(Vec3::new(9.5, 0.0, -1.5), node.get_position());
		assert_eq!(None, node.get_chunk_index());
		assert_eq!((1, 2), chunk.get_cell_of_local(9));
	}
	#[test]
	fn rectangular_layout() {
		let chunk = ChunkGrid::with_dimensions(3, 2, 0, 0);
		assert_eq!(6, chunk.get_cell_count());
		assert_eq!(5, chunk.get_node(2, 1).unwrap().get_local_index());
		assert_eq!(3, chunk.get_local_index_bits());
	}
	#[test]
	#[should_panic]
	fn zero_sized_chunk() {
		ChunkGrid::new(0, 0, 0);
	}
	#[test]
	#[should_panic]
	fn cell_count_beyond_local_index() {
		ChunkGrid::with_dimensions(70_000, 70_000, 0, 0);
	}
	#[test]
	fn stitch_near_coordinate_limit() {
		let mut a = ChunkGrid::new(2, 0, i32::MAX - 1);
		let mut b = ChunkGrid::new(2, 2, i32::MAX - 1);
		// the far edge of `a` lies beyond i32::MAX along z, but not along x
		assert!(a.connect_right(&mut b));
		let mut c = ChunkGrid::new(2, 0, i32::MIN);
		assert!(!a.connect_bottom(&mut c));
		assert!(!a.connect_diagonal(&mut c));
	}
	#[test]
	fn node_out_of_range() {
		let mut chunk = ChunkGrid::new(4, 0, 0);
		assert!(matches!(
			chunk.get_node(4, 0),
			Err(GraphError::OutOfRange {
				x: 4,
				z: 0,
				width: 4,
				height: 4
			})
		));
		assert!(chunk.get_node_mut(0, 7).is_err());
		assert!(chunk.get_node_by_local(16).is_none());
	}
	#[test]
	fn local_index_bits() {
		assert_eq!(4, ChunkGrid::new(4, 0, 0).get_local_index_bits());
		assert_eq!(5, ChunkGrid::new(5, 0, 0).get_local_index_bits());
		assert_eq!(0, ChunkGrid::new(1, 0, 0).get_local_index_bits());
	}
	#[test]
	fn intra_chunk_connection_counts() {
		let n = 6;
		let chunk = ChunkGrid::new(n, 0, 0);
		for z in 0..n {
			for x in 0..n {
				let on_x_edge = x == 0 || x == n - 1;
				let on_z_edge = z == 0 || z == n - 1;
				let expected = match (on_x_edge, on_z_edge) {
					(true, true) => 3,
					(true, false) | (false, true) => 5,
					(false, false) => 8,
				};
				assert_eq!(expected, connection_count(&chunk, x, z), "cell ({}, {})", x, z);
			}
		}
	}
	#[test]
	fn intra_chunk_connections_are_symmetric() {
		let chunk = ChunkGrid::with_dimensions(5, 3, 2, 2);
		for node in chunk.get_nodes() {
			for connection in node.get_connections() {
				let target = chunk
					.get_node_by_local(connection.get_to().get_local())
					.unwrap();
				assert!(target
					.get_connections()
					.iter()
					.any(|c| c.get_to() == connection.get_from()));
			}
		}
	}
	#[test]
	fn intra_chunk_connections_leave_from_owner() {
		let chunk = ChunkGrid::new(3, 0, 0);
		for node in chunk.get_nodes() {
			for connection in node.get_connections() {
				assert_eq!(node.get_local_index(), connection.get_from().get_local());
				assert_ne!(node.get_local_index(), connection.get_to().get_local());
			}
		}
	}
	#[test]
	fn connect_bottom_links_both_ways() {
		let mut top = ChunkGrid::new(4, 0, 0);
		let mut bottom = ChunkGrid::new(4, 0, 4);
		assert!(top.connect_bottom(&mut bottom));
		let bottom_origin = bottom.get_origin();
		let top_origin = top.get_origin();
		for x in 0..4 {
			for nx in get_boundary_window(x, 4) {
				assert!(has_link(&top, (x, 3), NodeRef::new(bottom_origin, nx)));
				assert!(has_link(&bottom, (x, 0), NodeRef::new(top_origin, 12 + nx)));
			}
		}
		// boundary rows gained 2 or 3 links, everything else is unchanged
		assert_eq!(3 + 2, connection_count(&top, 0, 3));
		assert_eq!(5 + 3, connection_count(&top, 1, 3));
		assert_eq!(3 + 2, connection_count(&bottom, 3, 0));
		assert_eq!(8, connection_count(&bottom, 1, 1));
		assert_eq!(5, connection_count(&top, 0, 2));
	}
	#[test]
	fn connect_right_links_both_ways() {
		let mut left = ChunkGrid::new(4, 0, 0);
		let mut right = ChunkGrid::new(4, 4, 0);
		assert!(left.connect_right(&mut right));
		let right_origin = right.get_origin();
		let left_origin = left.get_origin();
		for z in 0..4 {
			for nz in get_boundary_window(z, 4) {
				assert!(has_link(&left, (3, z), NodeRef::new(right_origin, nz * 4)));
				assert!(has_link(&right, (0, z), NodeRef::new(left_origin, nz * 4 + 3)));
			}
		}
		assert_eq!(5 + 3, connection_count(&left, 3, 1));
		assert_eq!(3 + 2, connection_count(&right, 0, 3));
	}
	#[test]
	fn repeated_stitch_adds_nothing() {
		let mut left = ChunkGrid::new(4, 0, 0);
		let mut right = ChunkGrid::new(4, 4, 0);
		assert!(left.connect_right(&mut right));
		let once = (all_connection_counts(&left), all_connection_counts(&right));
		assert!(left.connect_right(&mut right));
		assert_eq!(once, (all_connection_counts(&left), all_connection_counts(&right)));
		let mut corner = ChunkGrid::new(4, 4, 4);
		assert!(left.connect_diagonal(&mut corner));
		assert!(left.connect_diagonal(&mut corner));
		assert_eq!(3 + 2 + 1, connection_count(&left, 3, 3));
		assert_eq!(4, connection_count(&corner, 0, 0));
	}
	#[test]
	fn connect_bottom_wrong_direction() {
		let mut top = ChunkGrid::new(4, 0, 0);
		let mut bottom = ChunkGrid::new(4, 0, 4);
		let before = (all_connection_counts(&top), all_connection_counts(&bottom));
		// bottom has nothing below it
		assert!(!bottom.connect_bottom(&mut top));
		assert!(!top.connect_right(&mut bottom));
		assert!(!bottom.connect_right(&mut top));
		let after = (all_connection_counts(&top), all_connection_counts(&bottom));
		assert_eq!(before, after);
	}
	#[test]
	fn stitch_non_adjacent_is_noop() {
		let mut a = ChunkGrid::new(4, 0, 0);
		let mut b = ChunkGrid::new(4, 0, 8);
		let mut c = ChunkGrid::new(4, 2, 4);
		let before = (
			all_connection_counts(&a),
			all_connection_counts(&b),
			all_connection_counts(&c),
		);
		assert!(!a.connect_bottom(&mut b));
		assert!(!a.connect_right(&mut b));
		assert!(!a.connect_diagonal(&mut b));
		// misaligned along x
		assert!(!a.connect_bottom(&mut c));
		assert!(!a.connect_diagonal(&mut c));
		assert!(!c.connect_bottom(&mut b));
		let after = (
			all_connection_counts(&a),
			all_connection_counts(&b),
			all_connection_counts(&c),
		);
		assert_eq!(before, after);
	}
	#[test]
	fn connect_bottom_unequal_widths() {
		let mut top = ChunkGrid::with_dimensions(4, 2, 0, 0);
		let mut bottom = ChunkGrid::with_dimensions(2, 2, 0, 2);
		assert!(top.connect_bottom(&mut bottom));
		// only the first two columns of the top chunk are stitched
		assert_eq!(5, connection_count(&top, 2, 1));
		assert_eq!(5 + 2, connection_count(&top, 1, 1));
		// the bottom chunk's corner reaches up to column 2 of the top
		assert_eq!(3 + 3, connection_count(&bottom, 1, 0));
	}
	#[test]
	fn connect_diagonal_bottom_right() {
		let mut a = ChunkGrid::new(4, 0, 0);
		let mut b = ChunkGrid::new(4, 4, 4);
		assert!(a.connect_diagonal(&mut b));
		assert!(has_link(&a, (3, 3), NodeRef::new(b.get_origin(), 0)));
		assert!(has_link(&b, (0, 0), NodeRef::new(a.get_origin(), 15)));
		assert_eq!(4, connection_count(&a, 3, 3));
		assert_eq!(4, connection_count(&b, 0, 0));
	}
	#[test]
	fn connect_diagonal_bottom_left() {
		let mut a = ChunkGrid::new(4, 4, 0);
		let mut b = ChunkGrid::new(4, 0, 4);
		assert!(a.connect_diagonal(&mut b));
		assert!(has_link(&a, (0, 3), NodeRef::new(b.get_origin(), 3)));
		assert!(has_link(&b, (3, 0), NodeRef::new(a.get_origin(), 12)));
	}
	#[test]
	fn recompute_averages_corners() {
		let mut chunk = ChunkGrid::new(2, 0, 0);
		let mut heightmap = Heightmap::for_chunk(2, 2);
		heightmap.set_sample(0, 0, 1.0).unwrap();
		heightmap.set_sample(0, 1, 2.0).unwrap();
		heightmap.set_sample(1, 0, 3.0).unwrap();
		heightmap.set_sample(1, 1, 4.0).unwrap();
		chunk.recompute(&heightmap).unwrap();
		assert_eq!(2.5, chunk.get_node(0, 0).unwrap().get_position().y);
		// (1,0),(1,1),(2,0),(2,1) = 3 + 4 + 0 + 0
		assert_eq!(1.75, chunk.get_node(1, 0).unwrap().get_position().y);
		// (1,1),(1,2),(2,1),(2,2) = 4 + 0 + 0 + 0
		assert_eq!(1.0, chunk.get_node(1, 1).unwrap().get_position().y);
		// x and z are untouched
		assert_eq!(Vec3::new(0.5, 2.5, 0.5), chunk.get_node(0, 0).unwrap().get_position());
	}
	#[test]
	fn recompute_heightmap_mismatch() {
		let mut chunk = ChunkGrid::new(4, 0, 0);
		let heightmap = Heightmap::for_chunk(3, 4);
		let result = chunk.recompute(&heightmap);
		assert!(matches!(
			result,
			Err(GraphError::HeightmapMismatch {
				expected: (5, 5),
				found: (4, 5)
			})
		));
	}
	#[test]
	fn with_heightmap_sets_elevation() {
		let heightmap = Heightmap::from_fn(5, 5, |_, _| 2.0);
		let chunk = ChunkGrid::with_heightmap(4, 0, 0, &heightmap).unwrap();
		assert!(chunk.get_nodes().iter().all(|n| n.get_position().y == 2.0));
	}
	#[test]
	fn cell_at_position() {
		let chunk = ChunkGrid::new(4, 4, -4);
		assert_eq!(Some((0, 0)), chunk.cell_at_position(Vec3::new(4.0, 9.0, -4.0)));
		assert_eq!(Some((3, 3)), chunk.cell_at_position(Vec3::new(7.9, 0.0, -0.1)));
		assert_eq!(None, chunk.cell_at_position(Vec3::new(8.0, 0.0, -2.0)));
		assert_eq!(None, chunk.cell_at_position(Vec3::new(3.9, 0.0, -2.0)));
		assert_eq!(None, chunk.cell_at_position(Vec3::new(f32::NAN, 0.0, -2.0)));
		assert_eq!(None, chunk.cell_at_position(Vec3::new(5.0, 0.0, f32::NAN)));
		assert_eq!(None, chunk.cell_at_position(Vec3::new(f32::INFINITY, 0.0, -2.0)));
		// y is never looked at
		assert_eq!(Some((1, 1)), chunk.cell_at_position(Vec3::new(5.5, f32::NAN, -2.5)));
	}
	#[test]
	fn assign_chunk_index_once() {
		let mut chunk = ChunkGrid::new(2, 0, 0);
		chunk.assign_chunk_index(3).unwrap();
		assert_eq!(Some(3), chunk.get_chunk_index());
		assert!(chunk
			.get_nodes()
			.iter()
			.all(|n| n.get_key().map(|k| k.get_chunk()) == Some(3)));
		assert!(matches!(
			chunk.assign_chunk_index(4),
			Err(GraphError::AlreadyRegistered { chunk_index: 3, .. })
		));
		assert_eq!(Some(3), chunk.get_chunk_index());
	}
}
