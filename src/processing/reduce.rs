//! Reduction adapter: the boundary to the 2-D embedding algorithm
//!
//! The algorithm itself is an injectable [`Reducer`]. The adapter owns the
//! checks on either side of the call: input shape before, output shape and
//! finiteness after. Anything the reducer raises, panics included, comes
//! back as [`ReduceError::Reduction`].

use std::panic::{self, AssertUnwindSafe};

use clap::ValueEnum;
use ndarray::Array2;

use crate::config::{ReductionParams, OUTPUT_DIM};
use crate::core::error::BoxError;
use crate::core::{Embedding2D, ReduceError, Result, VectorMatrix};

use super::pca::PcaReducer;
use super::umap::UmapReducer;

/// A 2-D embedding algorithm.
///
/// Returns one row per input row, in input order, with
/// `params.n_components` columns.
pub trait Reducer: Send + Sync {
	fn name(&self) -> &'static str;

	fn reduce(&self, matrix: &VectorMatrix, params: &ReductionParams) -> std::result::Result<Array2<f64>, BoxError>;
}

impl<F> Reducer for F
where
	F: Fn(&VectorMatrix, &ReductionParams) -> std::result::Result<Array2<f64>, BoxError> + Send + Sync,
{
	fn name(&self) -> &'static str {
		"custom"
	}

	fn reduce(&self, matrix: &VectorMatrix, params: &ReductionParams) -> std::result::Result<Array2<f64>, BoxError> {
		self(matrix, params)
	}
}

/// Built-in reduction methods.
///
/// Only `Pca` is reproducible for a fixed seed. umap-rs draws its negative
/// samples from an unseeded thread rng, so `Umap` output varies between runs
/// even though the seed fixes the initial layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Method {
	/// Principal component analysis (deterministic)
	#[default]
	Pca,
	/// Uniform Manifold Approximation and Projection (not reproducible run to run)
	Umap,
}

impl Method {
	pub fn reducer(self) -> Box<dyn Reducer> {
		match self {
			Self::Umap => Box::new(UmapReducer),
			Self::Pca => Box::new(PcaReducer),
		}
	}
}

/// Run `reducer` on `matrix` and shape the result into an [`Embedding2D`]
pub fn reduce(matrix: &VectorMatrix, params: &ReductionParams, reducer: &dyn Reducer) -> Result<Embedding2D> {
	if matrix.is_empty() {
		return Err(ReduceError::shape("cannot reduce an empty matrix"));
	}
	if let Some((i, row)) = matrix.rows().iter().enumerate().find(|(_, r)| r.len() != matrix.dim()) {
		return Err(ReduceError::shape(format!(
			"row {} has {} fields, expected {}",
			i,
			row.len(),
			matrix.dim()
		)));
	}
	if params.n_components != OUTPUT_DIM {
		return Err(ReduceError::shape(format!(
			"only {}-D output is supported, got {}",
			OUTPUT_DIM, params.n_components
		)));
	}

	let name = reducer.name();
	let raw = panic::catch_unwind(AssertUnwindSafe(|| reducer.reduce(matrix, params)))
		.map_err(|payload| ReduceError::reduction(name, panic_message(payload.as_ref())))?
		.map_err(|e| ReduceError::Reduction { reducer: name, source: e })?;

	if raw.dim() != (matrix.len(), OUTPUT_DIM) {
		return Err(ReduceError::reduction(
			name,
			format!(
				"returned a {}x{} matrix for {} rows",
				raw.nrows(),
				raw.ncols(),
				matrix.len()
			),
		));
	}

	let embedding = Embedding2D(raw.rows().into_iter().map(|r| [r[0], r[1]]).collect());
	if !embedding.is_finite() {
		return Err(ReduceError::reduction(name, "produced non-finite coordinates"));
	}

	Ok(embedding)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		format!("panicked: {}", s)
	} else if let Some(s) = payload.downcast_ref::<String>() {
		format!("panicked: {}", s)
	} else {
		"panicked".to_string()
	}
}
