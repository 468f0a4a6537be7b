//! Application configuration and constants

use crate::core::{Delimiters, Metric};

// === Input Format ===
pub const ROW_DELIMITER: char = ';';
pub const FIELD_DELIMITER: char = ',';

// === Reduction Defaults ===
pub const OUTPUT_DIM: usize = 2;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_N_NEIGHBORS: usize = 15;

/// Uniform range for the initial layout handed to UMAP
pub const INIT_RANGE: f32 = 10.0;

// === Correlation ===
/// Metadata columns kept in the correlation report
pub const TOP_CORRELATIONS: usize = 5;

// === PCA ===
pub const PCA_MAX_ITERATIONS: usize = 500;
pub const PCA_TOLERANCE: f64 = 1e-10;

// === Environment ===
pub const SEED_ENV: &str = "VECSCAPE_SEED";
pub const NEIGHBORS_ENV: &str = "VECSCAPE_NEIGHBORS";

/// Encoding of the vector input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
	/// `1,2;3,4`
	#[default]
	Delimited,
	/// `[[1,2],"[3,4]"]`
	Json,
}

/// Settings for one pipeline invocation
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
	pub format: InputFormat,
	pub delimiters: Delimiters,
	pub seed: u64,
	pub n_neighbors: usize,
}

impl Default for PipelineConfig {
	fn default() -> Self {
		Self {
			format: InputFormat::default(),
			delimiters: Delimiters::default(),
			seed: default_seed(),
			n_neighbors: default_neighbors(),
		}
	}
}

/// Parameters handed to a reducer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReductionParams {
	pub metric: Metric,
	pub seed: u64,
	pub n_components: usize,
	pub n_neighbors: usize,
}

impl ReductionParams {
	pub fn new(metric: Metric, config: &PipelineConfig) -> Self {
		Self {
			metric,
			seed: config.seed,
			n_components: OUTPUT_DIM,
			n_neighbors: config.n_neighbors,
		}
	}
}

impl Default for ReductionParams {
	fn default() -> Self {
		Self {
			metric: Metric::default(),
			seed: DEFAULT_SEED,
			n_components: OUTPUT_DIM,
			n_neighbors: DEFAULT_N_NEIGHBORS,
		}
	}
}

/// Seed from VECSCAPE_SEED, falling back to the default
pub fn default_seed() -> u64 {
	env_or(SEED_ENV, DEFAULT_SEED)
}

/// Neighborhood size from VECSCAPE_NEIGHBORS, falling back to the default
pub fn default_neighbors() -> usize {
	env_or(NEIGHBORS_ENV, DEFAULT_N_NEIGHBORS).max(1)
}

fn env_or<T: std::str::FromStr + std::fmt::Display + Copy>(key: &str, fallback: T) -> T {
	match std::env::var(key) {
		Ok(raw) => match raw.trim().parse() {
			Ok(value) => {
				crate::ui::debug(&format!("Using {}={}", key, value));
				value
			}
			Err(_) => {
				crate::ui::debug(&format!("Ignoring invalid {}='{}'", key, raw));
				fallback
			}
		},
		Err(_) => fallback,
	}
}
