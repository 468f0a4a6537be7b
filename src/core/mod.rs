//! Core domain types and the pure pipeline stages

pub mod correlate;
pub mod distance;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod types;
pub mod weighting;

pub use correlate::{correlate, parse_metadata, Correlation, MetadataRow};
pub use distance::{analyze, CenterAnalysis};
pub use error::{ReduceError, Result};
pub use normalize::normalize;
pub use parse::{parse_center, parse_json_center, parse_json_rows, parse_matrix, serialize_matrix, Delimiters};
pub use types::{
	CenterVector, Distances, Embedding2D, Metric, NormalizedEmbedding2D, VectorMatrix, WeightedMatrix, Weights,
};
pub use weighting::reweight;
