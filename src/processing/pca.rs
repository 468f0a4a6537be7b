//! Deterministic PCA reducer (power iteration with deflation)

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ReductionParams, PCA_MAX_ITERATIONS, PCA_TOLERANCE};
use crate::core::error::BoxError;
use crate::core::{Metric, VectorMatrix};
use crate::ui;

use super::reduce::Reducer;

/// Projects rows onto their leading principal components.
///
/// With the cosine metric rows are L2-normalized first, so that
/// euclidean geometry in the projection follows angular distance.
/// Components that do not exist (constant data, D = 1) come out as zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct PcaReducer;

impl Reducer for PcaReducer {
	fn name(&self) -> &'static str {
		"pca"
	}

	fn reduce(&self, matrix: &VectorMatrix, params: &ReductionParams) -> Result<Array2<f64>, BoxError> {
		let (n, d) = (matrix.len(), matrix.dim());
		let mut x = Array2::from_shape_fn((n, d), |(i, j)| matrix.row(i)[j]);

		if params.metric == Metric::Cosine {
			for mut row in x.rows_mut() {
				// Bring the largest component to 1 before squaring
				let scale = row.fold(0.0_f64, |m, v| m.max(v.abs()));
				if scale > 0.0 {
					row /= scale;
					let norm = row.dot(&row).sqrt();
					row /= norm;
				}
			}
		}

		let mean = x.mean_axis(Axis(0)).ok_or("cannot center an empty matrix")?;
		let x = &x - &mean;

		let mut rng = StdRng::seed_from_u64(params.seed);
		let mut components: Vec<Array1<f64>> = Vec::with_capacity(params.n_components);
		let mut out = Array2::<f64>::zeros((n, params.n_components));

		for c in 0..params.n_components {
			let start = Array1::from_shape_simple_fn(d, || rng.random_range(-1.0..1.0));
			match leading_component(&x, start, &components) {
				Some(v) => {
					out.column_mut(c).assign(&x.dot(&v));
					components.push(v);
				}
				None => {
					ui::debug(&format!("PCA component {} has no variance, leaving it at zero", c + 1));
					break;
				}
			}
		}

		Ok(out)
	}
}

/// Power iteration on XᵀX, kept orthogonal to `found`
fn leading_component(x: &Array2<f64>, start: Array1<f64>, found: &[Array1<f64>]) -> Option<Array1<f64>> {
	let mut v = unit(orthogonalize(start, found))?;

	for _ in 0..PCA_MAX_ITERATIONS {
		let w = x.t().dot(&x.dot(&v));
		let w = unit(orthogonalize(w, found))?;
		let delta: f64 = (&w - &v).mapv(f64::abs).sum();
		v = w;
		if delta < PCA_TOLERANCE {
			break;
		}
	}

	Some(fix_sign(v))
}

fn orthogonalize(mut w: Array1<f64>, found: &[Array1<f64>]) -> Array1<f64> {
	for u in found {
		let p = w.dot(u);
		w.scaled_add(-p, u);
	}
	w
}

fn unit(v: Array1<f64>) -> Option<Array1<f64>> {
	let norm = v.dot(&v).sqrt();
	if norm > 1e-12 {
		Some(v / norm)
	} else {
		None
	}
}

/// Largest-magnitude loading is made positive
fn fix_sign(v: Array1<f64>) -> Array1<f64> {
	let pivot = v.iter().copied().fold(0.0_f64, |acc, x| if x.abs() > acc.abs() { x } else { acc });
	if pivot < 0.0 {
		-v
	} else {
		v
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn recovers_dominant_axis() {
		let x = Array2::from_shape_vec((4, 2), vec![-3.0, 0.1, -1.0, -0.1, 1.0, -0.1, 3.0, 0.1]).unwrap();
		let v = leading_component(&x, Array1::from(vec![0.3, 0.7]), &[]).unwrap();
		assert!((v[0] - 1.0).abs() < 1e-6, "got {:?}", v);
	}

	#[test]
	fn cosine_rows_normalize_at_any_magnitude() {
		let params = ReductionParams {
			metric: Metric::Cosine,
			..ReductionParams::default()
		};
		let huge = VectorMatrix::new(vec![vec![1e200, 1e200], vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
		let unit = VectorMatrix::new(vec![vec![1.0, 1.0], vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();

		let a = PcaReducer.reduce(&huge, &params).unwrap();
		let b = PcaReducer.reduce(&unit, &params).unwrap();
		assert!(a.iter().all(|v| v.is_finite()));
		assert_eq!(a, b);
	}

	#[test]
	fn no_component_left_in_one_dimension() {
		let x = Array2::from_shape_vec((3, 1), vec![-1.0, 0.0, 1.0]).unwrap();
		let first = leading_component(&x, Array1::from(vec![0.5]), &[]).unwrap();
		assert!(leading_component(&x, Array1::from(vec![0.5]), &[first]).is_none());
	}
}
