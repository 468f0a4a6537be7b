//! Re-centering of an embedding on one of its points

use super::error::{ReduceError, Result};
use super::types::{Embedding2D, NormalizedEmbedding2D};

/// Shift every point so the one at `center_index` lands on (0, 0)
pub fn normalize(embedding: Embedding2D, center_index: usize) -> Result<NormalizedEmbedding2D> {
	let [cx, cy] = *embedding.points().get(center_index).ok_or_else(|| {
		ReduceError::shape(format!(
			"center index {} out of range for {} points",
			center_index,
			embedding.len()
		))
	})?;

	let shifted = embedding.0.into_iter().map(|[x, y]| [x - cx, y - cy]).collect();

	Ok(NormalizedEmbedding2D {
		embedding: Embedding2D(shifted),
		center_index,
	})
}
