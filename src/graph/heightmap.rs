//! A [Heightmap] stores terrain elevation sampled at the corners (vertices)
//! of grid cells. A chunk of `width x height` cells therefore needs
//! `(width + 1) x (height + 1)` samples:
//!
//! ```text
//!  s---s---s---s
//!  | c | c | c |
//!  s---s---s---s
//!  | c | c | c |
//!  s---s---s---s
//! ```
//!
//! The elevation of a cell `c` is the mean of the four samples `s` around it
//!

use crate::prelude::*;

/// Grid of elevation samples, row-major with sample `(x, z)` at `z * width + x`
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Heightmap {
	/// Number of samples along `x`
	width: usize,
	/// Number of samples along `z`
	depth: usize,
	/// Elevations
	samples: Vec<f32>,
}

impl Heightmap {
	/// Create a new instance of [Heightmap] of `width x depth` samples, all at elevation `0`
	pub fn new(width: usize, depth: usize) -> Self {
		Heightmap {
			width,
			depth,
			samples: vec![0.0; width * depth],
		}
	}
	/// Create a flat [Heightmap] that fits a chunk of `width x height` cells
	pub fn for_chunk(width: u32, height: u32) -> Self {
		Heightmap::new(width as usize + 1, height as usize + 1)
	}
	/// Create a new instance of [Heightmap] where each sample is produced by `f(x, z)`
	pub fn from_fn<F: FnMut(usize, usize) -> f32>(width: usize, depth: usize, mut f: F) -> Self {
		let mut samples = Vec::with_capacity(width * depth);
		for z in 0..depth {
			for x in 0..width {
				samples.push(f(x, z));
			}
		}
		Heightmap {
			width,
			depth,
			samples,
		}
	}
	/// Create a new instance of [Heightmap] from raw row-major samples
	pub fn from_samples(width: usize, depth: usize, samples: Vec<f32>) -> Result<Self, GraphError> {
		if samples.len() != width * depth {
			return Err(GraphError::SampleCountMismatch {
				width,
				depth,
				expected: width * depth,
				found: samples.len(),
			});
		}
		Ok(Heightmap {
			width,
			depth,
			samples,
		})
	}
	/// Number of samples along `x`
	pub fn get_width(&self) -> usize {
		self.width
	}
	/// Number of samples along `z`
	pub fn get_depth(&self) -> usize {
		self.depth
	}
	/// Get a reference to the raw samples
	pub fn get_samples(&self) -> &[f32] {
		&self.samples
	}
	/// Whether the samples line up with the corners of a `width x height` cell chunk
	pub fn fits_chunk(&self, width: u32, height: u32) -> bool {
		self.width == width as usize + 1 && self.depth == height as usize + 1
	}
	/// Retrieve the sample at `(x, z)`
	pub fn get_sample(&self, x: usize, z: usize) -> Result<f32, GraphError> {
		self.offset(x, z).map(|i| self.samples[i])
	}
	/// Set the sample at `(x, z)`
	pub fn set_sample(&mut self, x: usize, z: usize, elevation: f32) -> Result<(), GraphError> {
		let i = self.offset(x, z)?;
		self.samples[i] = elevation;
		Ok(())
	}
	/// Mean of the four samples surrounding cell `(x, z)`
	pub fn corner_average(&self, x: usize, z: usize) -> Result<f32, GraphError> {
		let sum = self.get_sample(x, z)?
			+ self.get_sample(x, z + 1)?
			+ self.get_sample(x + 1, z)?
			+ self.get_sample(x + 1, z + 1)?;
		Ok(sum / 4.0)
	}
	/// Round every sample to the nearest whole number
	pub fn round(&mut self) {
		for sample in self.samples.iter_mut() {
			*sample = sample.round();
		}
	}
	/// Cut every sample down to `digits` decimal places, discarding the rest
	pub fn truncate_digits(&mut self, digits: u32) {
		let factor = 10_f32.powi(digits as i32);
		for sample in self.samples.iter_mut() {
			*sample = (*sample * factor).trunc() / factor;
		}
	}
	/// Multiply every sample by `factor`
	pub fn scale(&mut self, factor: f32) {
		for sample in self.samples.iter_mut() {
			*sample *= factor;
		}
	}
	/// Offset of sample `(x, z)` within `samples`
	fn offset(&self, x: usize, z: usize) -> Result<usize, GraphError> {
		if x >= self.width || z >= self.depth {
			return Err(GraphError::OutOfRange {
				x: x as u32,
				z: z as u32,
				width: self.width as u32,
				height: self.depth as u32,
			});
		}
		Ok(z * self.width + x)
	}
	/// From a `ron` file generate the [Heightmap]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: String) -> Result<Self, GraphError> {
		let file = std::fs::File::open(path)?;
		let heightmap: Heightmap =
			ron::de::from_reader(file).map_err(|e| GraphError::Ron(e.to_string()))?;
		if heightmap.samples.len() != heightmap.width * heightmap.depth {
			return Err(GraphError::SampleCountMismatch {
				width: heightmap.width,
				depth: heightmap.depth,
				expected: heightmap.width * heightmap.depth,
				found: heightmap.samples.len(),
			});
		}
		Ok(heightmap)
	}
	/// From a headerless csv file generate the [Heightmap], each record is a
	/// row of samples along `x` and records progress along `z`
	#[cfg(feature = "csv")]
	pub fn from_csv(path: String) -> Result<Self, GraphError> {
		let data = std::fs::File::open(path)?;
		let mut rdr = csv::ReaderBuilder::new()
			.has_headers(false)
			.from_reader(data);
		let mut samples = Vec::new();
		let mut width = 0;
		let mut depth = 0;
		for record in rdr.records() {
			let record = record?;
			if depth == 0 {
				width = record.len();
			} else if record.len() != width {
				return Err(GraphError::HeightmapMismatch {
					expected: (width, depth + 1),
					found: (record.len(), depth + 1),
				});
			}
			for value in record.iter() {
				let elevation: f32 = value
					.trim()
					.parse()
					.map_err(|_| GraphError::CsvValue(value.to_string()))?;
				samples.push(elevation);
			}
			depth += 1;
		}
		Heightmap::from_samples(width, depth, samples)
	}
	/// Create a [Heightmap] from a greyscale image where each pixel is a
	/// sample. Black is an elevation of `0`, white is `max_elevation`
	#[cfg(feature = "heightmap")]
	pub fn from_image(path: String, max_elevation: f32) -> Result<Self, GraphError> {
		use photon_rs::native::open_image;
		let img = open_image(&path).map_err(|e| GraphError::Image(e.to_string()))?;
		let width = img.get_width() as usize;
		let depth = img.get_height() as usize;
		let raw_pixels = img.get_raw_pixels();
		// raw pixels are arranged from the top left of the image and come in
		// sets of either 3 or 4 (if alpha channel is included)
		let chunk_size = if raw_pixels.len() == width * depth * 4 {
			4
		} else {
			3
		};
		let samples = raw_pixels
			.chunks(chunk_size)
			.map(|px| {
				let colour_avg = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;
				colour_avg / 255.0 * max_elevation
			})
			.collect();
		Heightmap::from_samples(width, depth, samples)
	}
}
