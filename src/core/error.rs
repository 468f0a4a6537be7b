//! Error taxonomy for the embedding pipeline

use thiserror::Error;

/// Result type for pipeline stages
pub type Result<T> = std::result::Result<T, ReduceError>;

/// Boxed cause reported by a reducer
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every way a pipeline invocation can fail.
///
/// Errors are raised at the stage that detects them and abort the run.
/// Nothing is recovered or defaulted internally.
#[derive(Debug, Error)]
pub enum ReduceError {
	/// No rows supplied
	#[error("no vectors supplied")]
	EmptyInput,

	/// A field is not a valid finite number
	#[error("row {row}, field {field}: '{value}' is not a valid number")]
	Parse {
		/// Zero-based row index
		row: usize,
		/// Zero-based field index within the row
		field: usize,
		/// Offending text (trimmed)
		value: String,
	},

	/// Input is not in the expected encoding at all
	#[error("malformed input: {0}")]
	Malformed(String),

	/// Ragged rows, mismatched lengths or dimensionality mismatch
	#[error("{0}")]
	Shape(String),

	/// Zero-magnitude vector where cosine distance is required
	#[error("{0} has zero magnitude, cosine distance is undefined")]
	DegenerateVector(String),

	/// The reduction collaborator failed
	#[error("{reducer} reduction failed: {source}")]
	Reduction {
		reducer: &'static str,
		#[source]
		source: BoxError,
	},
}

impl ReduceError {
	pub fn parse(row: usize, field: usize, value: &str) -> Self {
		Self::Parse {
			row,
			field,
			value: value.to_string(),
		}
	}

	pub fn shape(message: impl Into<String>) -> Self {
		Self::Shape(message.into())
	}

	pub fn reduction(reducer: &'static str, source: impl Into<BoxError>) -> Self {
		Self::Reduction {
			reducer,
			source: source.into(),
		}
	}

	/// Stable name of the error kind, as reported to callers
	pub fn kind(&self) -> &'static str {
		match self {
			Self::EmptyInput => "EmptyInputError",
			Self::Parse { .. } | Self::Malformed(_) => "ParseError",
			Self::Shape(_) => "ShapeError",
			Self::DegenerateVector(_) => "DegenerateVectorError",
			Self::Reduction { .. } => "ReductionError",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kinds_and_messages() {
		let cases: Vec<(ReduceError, &str, &str)> = vec![
			(ReduceError::EmptyInput, "EmptyInputError", "no vectors"),
			(ReduceError::parse(1, 2, "abc"), "ParseError", "'abc'"),
			(
				ReduceError::Malformed("expected a JSON array".into()),
				"ParseError",
				"JSON array",
			),
			(ReduceError::shape("row 1 has 3 fields"), "ShapeError", "3 fields"),
			(
				ReduceError::DegenerateVector("center vector".into()),
				"DegenerateVectorError",
				"center vector",
			),
			(
				ReduceError::reduction("umap", "too few rows"),
				"ReductionError",
				"too few rows",
			),
		];

		for (err, kind, fragment) in cases {
			assert_eq!(err.kind(), kind);
			assert!(
				err.to_string().contains(fragment),
				"{} should mention '{}'",
				err,
				fragment
			);
		}
	}

	#[test]
	fn reduction_error_keeps_source() {
		let err = ReduceError::reduction("pca", "did not converge");
		let source = std::error::Error::source(&err).map(|s| s.to_string());
		assert_eq!(source.as_deref(), Some("did not converge"));
	}
}
