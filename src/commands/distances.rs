//! Distances command - cosine distances and weights to a center vector,
//! optionally correlated with per-row metadata

use std::path::Path;

use anyhow::{anyhow, Result};
use colored::*;
use serde::Serialize;

use super::{base_config, center_text, read_text, write_text};
use crate::cli::InputArgs;
use crate::core::{analyze, correlate, parse_metadata, CenterAnalysis, Correlation, ReduceError};
use crate::processing::pipeline::{parse_center_text, parse_vectors};
use crate::ui;

#[derive(Debug, Serialize)]
struct DistanceExport {
	center_index: usize,
	rows: Vec<RowInfo>,
	#[serde(skip_serializing_if = "Option::is_none")]
	correlations: Option<Vec<Correlation>>,
}

#[derive(Debug, Serialize)]
struct RowInfo {
	row: usize,
	distance: f64,
	similarity: f64,
	weight: f64,
}

pub fn run(
	input: &InputArgs,
	center: Option<String>,
	center_file: Option<&Path>,
	export: Option<&Path>,
	metadata: Option<&Path>,
	top: usize,
) -> Result<()> {
	let config = base_config(input);

	let vectors = read_text(&input.input)?;
	let center = center_text(center, center_file)?.ok_or_else(|| anyhow!("A center vector is required"))?;

	let kinded = |e: ReduceError| anyhow!("{}: {}", e.kind(), e);
	let matrix = parse_vectors(&vectors, &config).map_err(kinded)?;
	let center = parse_center_text(&center, &config).map_err(kinded)?;
	let analysis = analyze(&matrix, &center).map_err(kinded)?;

	ui::debug(&format!("Analyzed {} rows x {} dims", matrix.len(), matrix.dim()));

	let correlations = match metadata {
		Some(path) => {
			let rows = parse_metadata(&read_text(path)?).map_err(kinded)?;
			let found = correlate(&analysis.similarities(), &rows, top).map_err(kinded)?;
			ui::debug(&format!("{} numeric metadata columns kept", found.len()));
			Some(found)
		}
		None => None,
	};

	if let Some(export_path) = export {
		let json = serde_json::to_string_pretty(&export_rows(&analysis, correlations))?;
		return write_text(export_path, &json);
	}

	print_table(&analysis);
	if let Some(correlations) = &correlations {
		print_correlations(correlations);
	}
	Ok(())
}

fn export_rows(analysis: &CenterAnalysis, correlations: Option<Vec<Correlation>>) -> DistanceExport {
	let rows = analysis
		.distances
		.0
		.iter()
		.zip(analysis.similarities())
		.zip(&analysis.weights.0)
		.enumerate()
		.map(|(row, ((&distance, similarity), &weight))| RowInfo {
			row,
			distance,
			similarity,
			weight,
		})
		.collect();

	DistanceExport {
		center_index: analysis.center_index,
		rows,
		correlations,
	}
}

fn print_table(analysis: &CenterAnalysis) {
	ui::header("Distances");
	println!(
		"{:>6}  {:>10}  {:>10}  {:>8}",
		"row".bright_blue().bold(),
		"distance".bright_blue().bold(),
		"similarity".bright_blue().bold(),
		"weight".bright_blue().bold()
	);

	let similarities = analysis.similarities();
	for (i, (distance, weight)) in analysis.distances.0.iter().zip(&analysis.weights.0).enumerate() {
		let marker = if i == analysis.center_index {
			"◎ nearest".bright_green().to_string()
		} else {
			String::new()
		};
		println!(
			"{:>6}  {:>10.4}  {:>10.4}  {:>8.4}  {}",
			i, distance, similarities[i], weight, marker
		);
	}

	println!();
	ui::success(&format!("Row {} is nearest to the center", analysis.center_index));
}

fn print_correlations(correlations: &[Correlation]) {
	ui::header("Metadata correlations");
	if correlations.is_empty() {
		ui::warn("No numeric metadata columns");
		return;
	}

	println!(
		"{:<20}  {:>8}  {:>10}",
		"column".bright_blue().bold(),
		"r".bright_blue().bold(),
		"p-value".bright_blue().bold()
	);
	for c in correlations {
		let p = format!("{:>10.4}", c.p_value);
		let p = if c.p_value < 0.05 { p.bright_green().to_string() } else { p };
		println!("{:<20}  {:>8.4}  {}", c.column, c.r, p);
	}
}
