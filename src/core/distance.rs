//! Cosine distance to a center vector and the weights derived from it

use serde::Serialize;

use super::error::{ReduceError, Result};
use super::types::{CenterVector, Distances, VectorMatrix, Weights};

/// Output of the distance and weight engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterAnalysis {
	pub distances: Distances,
	pub weights: Weights,
	/// First row with the smallest distance; stands in for the center
	pub center_index: usize,
}

impl CenterAnalysis {
	/// Cosine similarity per row (1 - distance)
	pub fn similarities(&self) -> Vec<f64> {
		self.distances.0.iter().map(|d| 1.0 - d).collect()
	}
}

/// Compute distances, weights and the row nearest the center.
pub fn analyze(matrix: &VectorMatrix, center: &CenterVector) -> Result<CenterAnalysis> {
	if center.dim() != matrix.dim() {
		return Err(ReduceError::shape(format!(
			"center has {} dimensions, vectors have {}",
			center.dim(),
			matrix.dim()
		)));
	}

	let center = rescaled(center.as_slice()).ok_or_else(|| ReduceError::DegenerateVector("center vector".into()))?;
	let center_norm = norm(&center);

	let distances = matrix
		.rows()
		.iter()
		.enumerate()
		.map(|(i, row)| {
			let row = rescaled(row).ok_or_else(|| ReduceError::DegenerateVector(format!("row {}", i)))?;
			Ok(cosine_distance(&row, &center, norm(&row), center_norm))
		})
		.collect::<Result<Vec<_>>>()?;

	let weights = distances.iter().map(|&d| weight(d)).collect();
	let center_index = argmin(&distances);

	Ok(CenterAnalysis {
		distances: Distances(distances),
		weights: Weights(weights),
		center_index,
	})
}

/// 1 - cos(a, b), clamped to [0, 2] against rounding drift
fn cosine_distance(a: &[f64], b: &[f64], norm_a: f64, norm_b: f64) -> f64 {
	let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
	let similarity = (dot / (norm_a * norm_b)).clamp(-1.0, 1.0);
	1.0 - similarity
}

/// Emphasis weight, 1 at distance 0 and decreasing towards 1/3 at distance 2
pub fn weight(distance: f64) -> f64 {
	1.0 / (1.0 + distance)
}

/// `v` divided by its largest absolute component, or `None` for a zero vector.
///
/// Cosine is scale-invariant, and after this every component lies in [-1, 1],
/// so squaring can neither overflow nor underflow to zero.
pub(crate) fn rescaled(v: &[f64]) -> Option<Vec<f64>> {
	let scale = v.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
	if scale == 0.0 {
		return None;
	}
	Some(v.iter().map(|x| x / scale).collect())
}

fn norm(v: &[f64]) -> f64 {
	v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Index of the smallest value; ties keep the first
fn argmin(values: &[f64]) -> usize {
	values
		.iter()
		.enumerate()
		.fold((0, f64::INFINITY), |(best_i, best), (i, &v)| {
			if v < best {
				(i, v)
			} else {
				(best_i, best)
			}
		})
		.0
}
