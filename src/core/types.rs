//! Core value types flowing through the pipeline
//!
//! - `VectorMatrix`: validated rows of equal dimensionality
//! - `CenterVector`: reference point for center-weighted runs
//! - `Distances` / `Weights`: one scalar per row
//! - `Embedding2D`: one `[x, y]` pair per row, in row order

use serde::{Deserialize, Serialize};

use super::error::{ReduceError, Result};

/// Rows of equal length. Always at least one row of at least one value.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMatrix {
	rows: Vec<Vec<f64>>,
	dim: usize,
}

impl VectorMatrix {
	/// Validates shape: non-empty, non-zero width, no ragged rows
	pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
		let dim = match rows.first() {
			Some(first) => first.len(),
			None => return Err(ReduceError::EmptyInput),
		};
		if dim == 0 {
			return Err(ReduceError::shape("rows must have at least one field"));
		}
		if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != dim) {
			return Err(ReduceError::shape(format!(
				"row {} has {} fields, expected {}",
				i,
				row.len(),
				dim
			)));
		}
		Ok(Self { rows, dim })
	}

	pub fn rows(&self) -> &[Vec<f64>] {
		&self.rows
	}

	pub fn row(&self, index: usize) -> &[f64] {
		&self.rows[index]
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Always false for a constructed matrix
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Dimensionality D
	pub fn dim(&self) -> usize {
		self.dim
	}
}

/// Reference vector for center-weighted runs
#[derive(Debug, Clone, PartialEq)]
pub struct CenterVector(pub Vec<f64>);

impl CenterVector {
	pub fn as_slice(&self) -> &[f64] {
		&self.0
	}

	pub fn dim(&self) -> usize {
		self.0.len()
	}
}

/// Cosine distance per row, each in [0, 2]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distances(pub Vec<f64>);

/// Emphasis weight per row, each in (0, 1]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weights(pub Vec<f64>);

/// Matrix whose rows have been scaled by their weights
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedMatrix(pub VectorMatrix);

impl WeightedMatrix {
	pub fn matrix(&self) -> &VectorMatrix {
		&self.0
	}
}

/// Distance metric handed to the reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
	#[default]
	Euclidean,
	Cosine,
}

impl Metric {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Euclidean => "euclidean",
			Self::Cosine => "cosine",
		}
	}
}

impl std::fmt::Display for Metric {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One `[x, y]` pair per input row, in input row order.
///
/// Serializes as a plain JSON array of pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding2D(pub Vec<[f64; 2]>);

impl Embedding2D {
	pub fn points(&self) -> &[[f64; 2]] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_finite(&self) -> bool {
		self.0.iter().all(|[x, y]| x.is_finite() && y.is_finite())
	}
}

/// Embedding shifted so the row nearest the center sits at the origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedEmbedding2D {
	pub embedding: Embedding2D,
	pub center_index: usize,
}
