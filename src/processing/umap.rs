//! UMAP reducer backed by umap-rs

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::{ReductionParams, INIT_RANGE};
use crate::core::error::BoxError;
use crate::core::distance::rescaled;
use crate::core::{Metric, VectorMatrix};
use crate::ui;

use super::reduce::Reducer;

/// UMAP over a brute-force KNN graph built with the requested metric
#[derive(Debug, Clone, Copy, Default)]
pub struct UmapReducer;

impl Reducer for UmapReducer {
	fn name(&self) -> &'static str {
		"umap"
	}

	fn reduce(&self, matrix: &VectorMatrix, params: &ReductionParams) -> Result<Array2<f64>, BoxError> {
		let n_samples = matrix.len();
		let n_features = matrix.dim();

		if n_samples < 3 {
			return Err(format!("UMAP needs at least 3 rows, got {}", n_samples).into());
		}

		// Same fallback as umap-learn: shrink the neighborhood to fit the data
		let n_neighbors = params.n_neighbors.clamp(2, n_samples - 1);
		if n_neighbors != params.n_neighbors {
			ui::debug(&format!(
				"n_neighbors {} too large for {} rows, using {}",
				params.n_neighbors, n_samples, n_neighbors
			));
		}

		ui::debug(&format!(
			"UMAP {}D -> {}D, metric={}, neighbors={}, seed={}",
			n_features, params.n_components, params.metric, n_neighbors, params.seed
		));

		// umap-rs works in f32
		let data = Array2::from_shape_fn((n_samples, n_features), |(i, j)| matrix.row(i)[j] as f32);

		let (knn_indices, knn_distances) = compute_knn(matrix, n_neighbors, params.metric);

		let mut knn_indices_array = Array2::<u32>::zeros((n_samples, n_neighbors));
		let mut knn_dists_array = Array2::<f32>::zeros((n_samples, n_neighbors));
		for i in 0..n_samples {
			for j in 0..n_neighbors {
				knn_indices_array[[i, j]] = knn_indices[i][j] as u32;
				knn_dists_array[[i, j]] = knn_distances[i][j] as f32;
			}
		}

		let init = initialize_embedding(n_samples, params.n_components, params.seed);

		let config = umap_rs::UmapConfig {
			n_components: params.n_components,
			graph: umap_rs::GraphParams {
				n_neighbors,
				..Default::default()
			},
			..Default::default()
		};

		let umap = umap_rs::Umap::new(config);
		let fitted_model = umap.fit(
			data.view(),
			knn_indices_array.view(),
			knn_dists_array.view(),
			init.view(),
		);
		let embedding = fitted_model.embedding();

		Ok(Array2::from_shape_fn((n_samples, params.n_components), |(i, j)| {
			embedding[[i, j]] as f64
		}))
	}
}

type KnnResult = (Vec<Vec<usize>>, Vec<Vec<f64>>);

/// Brute-force K nearest neighbors, excluding each point itself
fn compute_knn(matrix: &VectorMatrix, k: usize, metric: Metric) -> KnnResult {
	let rows = matrix.rows();
	let scaled: Vec<Option<Vec<f64>>> = match metric {
		Metric::Cosine => rows.iter().map(|r| rescaled(r)).collect(),
		Metric::Euclidean => Vec::new(),
	};

	let results: Vec<(Vec<usize>, Vec<f64>)> = (0..rows.len())
		.into_par_iter()
		.map(|i| {
			let mut distances: Vec<(usize, f64)> = (0..rows.len())
				.filter(|&j| i != j)
				.map(|j| {
					let d = match metric {
						Metric::Euclidean => euclidean(&rows[i], &rows[j]),
						Metric::Cosine => cosine(scaled[i].as_deref(), scaled[j].as_deref()),
					};
					(j, d)
				})
				.collect();

			distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
			distances.truncate(k);

			distances.into_iter().unzip()
		})
		.collect();

	results.into_iter().unzip()
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
	a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
}

/// Cosine distance between rescaled rows; a zero vector counts as orthogonal to everything
fn cosine(a: Option<&[f64]>, b: Option<&[f64]>) -> f64 {
	let (Some(a), Some(b)) = (a, b) else {
		return 1.0;
	};
	let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
	let norm = |v: &[f64]| v.iter().map(|x| x * x).sum::<f64>().sqrt();
	(1.0 - dot / (norm(a) * norm(b))).clamp(0.0, 2.0)
}

/// Seeded uniform initial layout in [-INIT_RANGE, INIT_RANGE]
fn initialize_embedding(n_samples: usize, n_components: usize, seed: u64) -> Array2<f32> {
	let mut rng = StdRng::seed_from_u64(seed);
	Array2::from_shape_simple_fn((n_samples, n_components), || rng.random_range(-INIT_RANGE..INIT_RANGE))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn knn_excludes_self_and_sorts() {
		let matrix = VectorMatrix::new(vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![3.0, 0.0], vec![10.0, 0.0]]).unwrap();
		let (indices, distances) = compute_knn(&matrix, 2, Metric::Euclidean);
		assert_eq!(indices[0], vec![1, 2]);
		assert_eq!(distances[0], vec![1.0, 3.0]);
		assert_eq!(indices[3], vec![2, 1]);
	}

	#[test]
	fn cosine_knn_ignores_magnitude() {
		let matrix = VectorMatrix::new(vec![vec![1.0, 0.0], vec![100.0, 1.0], vec![0.0, 1.0]]).unwrap();
		let (indices, _) = compute_knn(&matrix, 1, Metric::Cosine);
		assert_eq!(indices[0], vec![1]);
	}

	#[test]
	fn cosine_knn_handles_extreme_magnitudes() {
		let matrix = VectorMatrix::new(vec![
			vec![1e200, 1e200],
			vec![1e-200, 1.1e-200],
			vec![1.0, -1.0],
			vec![0.0, 0.0],
		])
		.unwrap();
		let (indices, distances) = compute_knn(&matrix, 3, Metric::Cosine);
		assert_eq!(indices[0][0], 1);
		assert!(distances[0][0] < 0.01);
		assert_eq!(distances[3], vec![1.0, 1.0, 1.0]);
	}

	#[test]
	fn seeded_init_is_repeatable() {
		let a = initialize_embedding(4, 2, 7);
		let b = initialize_embedding(4, 2, 7);
		assert_eq!(a, b);
		assert!(a.iter().all(|v| v.abs() <= INIT_RANGE));
	}
}
