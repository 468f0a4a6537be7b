// Tests for the built-in reducers behind the adapter

use vecscape::config::{PipelineConfig, ReductionParams};
use vecscape::core::{Metric, VectorMatrix};
use vecscape::processing::{reduce, run, Method, NoopObserver, PcaReducer, PipelineInput, UmapReducer};

fn five_rows() -> VectorMatrix {
	VectorMatrix::new(vec![
		vec![0.1, 0.2, 0.3],
		vec![1.0, -0.5, 2.0],
		vec![3.0, 3.1, -1.0],
		vec![-2.0, 0.0, 0.5],
		vec![0.7, 0.9, 0.4],
	])
	.unwrap()
}

/// Two well separated blobs of `per_blob` points each in 4-D
fn two_blobs(per_blob: usize) -> VectorMatrix {
	let mut rows = Vec::new();
	for i in 0..per_blob {
		let t = i as f64 * 0.01;
		rows.push(vec![1.0 + t, 1.0 - t, 0.5 + t * 0.5, 0.2]);
		rows.push(vec![-1.0 - t, -1.0 + t, -0.5, 0.1 + t]);
	}
	VectorMatrix::new(rows).unwrap()
}

#[test]
fn test_umap_plain_five_rows() {
	let params = ReductionParams::default();
	let embedding = reduce(&five_rows(), &params, &UmapReducer).unwrap();

	assert_eq!(embedding.len(), 5);
	assert!(embedding.is_finite());
}

#[test]
fn test_umap_cosine_metric() {
	let params = ReductionParams {
		metric: Metric::Cosine,
		n_neighbors: 5,
		..ReductionParams::default()
	};
	let embedding = reduce(&two_blobs(15), &params, &UmapReducer).unwrap();

	assert_eq!(embedding.len(), 30);
	assert!(embedding.is_finite());
}

#[test]
fn test_umap_rejects_tiny_input() {
	let matrix = VectorMatrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
	let err = reduce(&matrix, &ReductionParams::default(), &UmapReducer).unwrap_err();
	assert_eq!(err.kind(), "ReductionError");
	assert!(err.to_string().contains("umap"));
}

#[test]
fn test_pca_is_deterministic() {
	let params = ReductionParams::default();
	let a = reduce(&two_blobs(10), &params, &PcaReducer).unwrap();
	let b = reduce(&two_blobs(10), &params, &PcaReducer).unwrap();
	assert_eq!(a, b);
}

#[test]
fn test_pca_separates_blobs_on_first_axis() {
	let embedding = reduce(&two_blobs(10), &ReductionParams::default(), &PcaReducer).unwrap();
	let points = embedding.points();

	// Rows alternate between the two blobs
	let first_sign = points[0][0].signum();
	for (i, [x, _]) in points.iter().enumerate() {
		let expected = if i % 2 == 0 { first_sign } else { -first_sign };
		assert_eq!(x.signum(), expected, "row {} at x={}", i, x);
	}
}

#[test]
fn test_pca_handles_degenerate_shapes() {
	let single = VectorMatrix::new(vec![vec![1.0, 2.0, 3.0]]).unwrap();
	let out = reduce(&single, &ReductionParams::default(), &PcaReducer).unwrap();
	assert_eq!(out.points(), &[[0.0, 0.0]]);

	let one_dim = VectorMatrix::new(vec![vec![1.0], vec![2.0], vec![4.0]]).unwrap();
	let out = reduce(&one_dim, &ReductionParams::default(), &PcaReducer).unwrap();
	assert_eq!(out.len(), 3);
	assert!(out.points().iter().all(|[_, y]| *y == 0.0));
	assert!(out.points()[0][0] != out.points()[2][0]);
}

#[test]
fn test_method_selects_reducer() {
	assert_eq!(Method::Umap.reducer().name(), "umap");
	assert_eq!(Method::Pca.reducer().name(), "pca");
}

#[test]
fn test_default_method_repeats_for_same_seed() {
	assert_eq!(Method::default(), Method::Pca);

	let reducer = Method::default().reducer();
	let matrix = two_blobs(20);
	for metric in [Metric::Euclidean, Metric::Cosine] {
		let params = ReductionParams {
			metric,
			..ReductionParams::default()
		};
		let a = reduce(&matrix, &params, reducer.as_ref()).unwrap();
		let b = reduce(&matrix, &params, reducer.as_ref()).unwrap();
		assert_eq!(a, b, "{} output differs between runs", metric);
	}
}

#[test]
fn test_umap_seed_keeps_shape_and_finiteness() {
	// Only the layout init is seeded; the coordinates themselves may move between runs
	let params = ReductionParams {
		n_neighbors: 5,
		..ReductionParams::default()
	};
	let matrix = two_blobs(10);
	for _ in 0..2 {
		let embedding = reduce(&matrix, &params, &UmapReducer).unwrap();
		assert_eq!(embedding.len(), 20);
		assert!(embedding.is_finite());
	}
}

#[test]
fn test_center_weighted_umap_end_to_end() {
	let matrix = two_blobs(12);
	let text = vecscape::core::serialize_matrix(&matrix, Default::default());
	let input = PipelineInput {
		vectors: &text,
		center: Some("1,1,0.5,0.2"),
		config: PipelineConfig {
			n_neighbors: 6,
			..PipelineConfig::default()
		},
	};

	let out = run(&input, &UmapReducer, &NoopObserver).unwrap();
	let idx = out.center_index().unwrap();

	assert_eq!(out.embedding.len(), 24);
	assert!(out.embedding.is_finite());
	assert_eq!(out.embedding.points()[idx], [0.0, 0.0]);
}
