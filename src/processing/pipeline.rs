//! Pipeline orchestration
//!
//! Two linear paths, chosen by whether a center vector is supplied:
//!
//! - plain: parse -> reduce (euclidean)
//! - center-weighted: parse -> analyze -> reweight -> reduce (cosine) -> normalize
//!
//! Each run either returns the full result or the first error. Stage
//! transitions are reported to a [`StageObserver`] on the side.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::{InputFormat, PipelineConfig, ReductionParams};
use crate::core::{
	analyze, normalize, parse_center, parse_json_center, parse_json_rows, parse_matrix, reweight, CenterAnalysis,
	CenterVector, Embedding2D, Metric, ReduceError, Result, VectorMatrix,
};

use super::reduce::{reduce, Reducer};

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
	Parse,
	Analyze,
	Reweight,
	Reduce,
	Normalize,
}

impl Stage {
	pub fn label(&self) -> &'static str {
		match self {
			Self::Parse => "parse",
			Self::Analyze => "distances",
			Self::Reweight => "reweight",
			Self::Reduce => "reduce",
			Self::Normalize => "normalize",
		}
	}
}

/// Side channel for stage transitions. All hooks default to no-ops.
pub trait StageObserver {
	fn stage_started(&self, _stage: Stage) {}

	fn stage_finished(&self, _stage: Stage, _elapsed: Duration) {}

	fn stage_failed(&self, _stage: Stage, _error: &ReduceError) {}

	/// Free-form detail about the current stage
	fn note(&self, _stage: Stage, _message: &str) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {}

/// Which path a run took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
	Plain,
	CenterWeighted,
}

/// Raw text inputs for one run
#[derive(Debug, Clone)]
pub struct PipelineInput<'a> {
	pub vectors: &'a str,
	pub center: Option<&'a str>,
	pub config: PipelineConfig,
}

/// Successful result of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
	pub mode: Mode,
	/// Normalized when the run was center-weighted
	pub embedding: Embedding2D,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub analysis: Option<CenterAnalysis>,
}

impl PipelineOutput {
	/// Row whose point sits at the origin, for center-weighted runs
	pub fn center_index(&self) -> Option<usize> {
		self.analysis.as_ref().map(|a| a.center_index)
	}

	/// JSON array of `[x, y]` pairs in input row order
	pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
		if pretty {
			serde_json::to_string_pretty(&self.embedding)
		} else {
			serde_json::to_string(&self.embedding)
		}
	}
}

/// Parse the inputs and run the matching path
pub fn run(input: &PipelineInput<'_>, reducer: &dyn Reducer, observer: &dyn StageObserver) -> Result<PipelineOutput> {
	let config = &input.config;

	let (matrix, center) = stage(observer, Stage::Parse, || {
		let matrix = parse_vectors(input.vectors, config)?;
		let center = input.center.map(|text| parse_center_text(text, config)).transpose()?;
		Ok((matrix, center))
	})?;
	observer.note(
		Stage::Parse,
		&format!("{} rows x {} dims, center {}", matrix.len(), matrix.dim(), if center.is_some() { "given" } else { "absent" }),
	);

	match center {
		Some(center) => run_center_weighted(&matrix, &center, config, reducer, observer),
		None => run_plain(&matrix, config, reducer, observer),
	}
}

/// Plain path: reduce with the euclidean metric
pub fn run_plain(
	matrix: &VectorMatrix,
	config: &PipelineConfig,
	reducer: &dyn Reducer,
	observer: &dyn StageObserver,
) -> Result<PipelineOutput> {
	let params = ReductionParams::new(Metric::Euclidean, config);
	let embedding = reduce_stage(matrix, &params, reducer, observer)?;

	Ok(PipelineOutput {
		mode: Mode::Plain,
		embedding,
		analysis: None,
	})
}

/// Center-weighted path: reweight by closeness to `center`, reduce with the
/// cosine metric, then anchor the row nearest the center at the origin
pub fn run_center_weighted(
	matrix: &VectorMatrix,
	center: &CenterVector,
	config: &PipelineConfig,
	reducer: &dyn Reducer,
	observer: &dyn StageObserver,
) -> Result<PipelineOutput> {
	let analysis = stage(observer, Stage::Analyze, || analyze(matrix, center))?;
	observer.note(
		Stage::Analyze,
		&format!(
			"nearest row {} at distance {:.4}",
			analysis.center_index, analysis.distances.0[analysis.center_index]
		),
	);

	let weighted = stage(observer, Stage::Reweight, || reweight(matrix, &analysis.weights))?;

	let params = ReductionParams::new(Metric::Cosine, config);
	let embedding = reduce_stage(weighted.matrix(), &params, reducer, observer)?;

	let normalized = stage(observer, Stage::Normalize, || normalize(embedding, analysis.center_index))?;

	Ok(PipelineOutput {
		mode: Mode::CenterWeighted,
		embedding: normalized.embedding,
		analysis: Some(analysis),
	})
}

fn reduce_stage(
	matrix: &VectorMatrix,
	params: &ReductionParams,
	reducer: &dyn Reducer,
	observer: &dyn StageObserver,
) -> Result<Embedding2D> {
	observer.note(
		Stage::Reduce,
		&format!("{} with metric={} seed={}", reducer.name(), params.metric, params.seed),
	);
	stage(observer, Stage::Reduce, || reduce(matrix, params, reducer))
}

/// Parse vectors in the configured format
pub fn parse_vectors(text: &str, config: &PipelineConfig) -> Result<VectorMatrix> {
	match config.format {
		InputFormat::Delimited => parse_matrix(text, config.delimiters),
		InputFormat::Json => parse_json_rows(text),
	}
}

/// A center starting with `[` is read as JSON, anything else as delimited
pub fn parse_center_text(text: &str, config: &PipelineConfig) -> Result<CenterVector> {
	if text.trim_start().starts_with('[') {
		parse_json_center(text)
	} else {
		parse_center(text, config.delimiters)
	}
}

fn stage<T>(observer: &dyn StageObserver, stage: Stage, f: impl FnOnce() -> Result<T>) -> Result<T> {
	observer.stage_started(stage);
	let start = Instant::now();
	match f() {
		Ok(value) => {
			observer.stage_finished(stage, start.elapsed());
			Ok(value)
		}
		Err(e) => {
			observer.stage_failed(stage, &e);
			Err(e)
		}
	}
}
