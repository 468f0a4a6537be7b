//! Reduce command - project vectors to 2-D

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use super::{base_config, center_text, read_text, write_text};
use crate::cli::InputArgs;
use crate::processing::{self, Method, Mode, PipelineInput};
use crate::ui::{self, ConsoleObserver};

#[allow(clippy::too_many_arguments)]
pub fn run(
	input: &InputArgs,
	center: Option<String>,
	center_file: Option<&Path>,
	method: Method,
	seed: Option<u64>,
	neighbors: Option<usize>,
	output: &Path,
	pretty: bool,
) -> Result<()> {
	let start = Instant::now();

	let mut config = base_config(input);
	if let Some(seed) = seed {
		config.seed = seed;
	}
	if let Some(neighbors) = neighbors {
		config.n_neighbors = neighbors;
	}

	let vectors = read_text(&input.input)?;
	let center = center_text(center, center_file)?;

	ui::debug(&format!(
		"Reducing with {:?}: seed={}, neighbors={}, center={}",
		method,
		config.seed,
		config.n_neighbors,
		center.as_deref().unwrap_or("none")
	));

	let pipeline_input = PipelineInput {
		vectors: &vectors,
		center: center.as_deref(),
		config,
	};

	let reducer = method.reducer();
	let result = processing::run(&pipeline_input, reducer.as_ref(), &ConsoleObserver)
		.map_err(|e| anyhow::anyhow!("{}: {}", e.kind(), e))?;

	match result.mode {
		Mode::Plain => ui::success(&format!(
			"Projected {} vectors in {:.2}s",
			result.embedding.len(),
			start.elapsed().as_secs_f32()
		)),
		Mode::CenterWeighted => ui::success(&format!(
			"Projected {} vectors around row {} in {:.2}s",
			result.embedding.len(),
			result.center_index().unwrap_or_default(),
			start.elapsed().as_secs_f32()
		)),
	}

	let json = result.to_json(pretty).context("Failed to serialize embedding")?;
	write_text(output, &json)
}
