//! Row reweighting ahead of reduction

use super::error::{ReduceError, Result};
use super::types::{VectorMatrix, WeightedMatrix, Weights};

/// Scale every row by its weight. Direction is preserved for positive weights.
pub fn reweight(matrix: &VectorMatrix, weights: &Weights) -> Result<WeightedMatrix> {
	if weights.0.len() != matrix.len() {
		return Err(ReduceError::shape(format!(
			"{} weights for {} rows",
			weights.0.len(),
			matrix.len()
		)));
	}

	let rows = matrix
		.rows()
		.iter()
		.zip(&weights.0)
		.map(|(row, &w)| row.iter().map(|v| v * w).collect())
		.collect();

	VectorMatrix::new(rows).map(WeightedMatrix)
}
