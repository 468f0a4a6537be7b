//! Correlation of center similarity with per-row metadata columns
//!
//! Each numeric metadata column is compared against the cosine similarity of
//! its row to the center: Pearson r, plus a two-sided p-value from the
//! t-statistic with n - 2 degrees of freedom.

use serde::Serialize;
use serde_json::{Map, Value};
use statrs::distribution::{ContinuousCDF, StudentsT};

use super::error::{ReduceError, Result};

/// Metadata for one vector row, keyed by column name
pub type MetadataRow = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
	pub column: String,
	/// Pearson correlation coefficient in [-1, 1]
	pub r: f64,
	pub p_value: f64,
}

/// Correlate `similarities` with every numeric column of `metadata` and keep
/// the `top` strongest by |r|.
///
/// Columns are taken from the first row. A column counts as numeric when
/// every row holds a number or a string that parses as one; anything else is
/// skipped.
pub fn correlate(similarities: &[f64], metadata: &[MetadataRow], top: usize) -> Result<Vec<Correlation>> {
	if similarities.len() != metadata.len() {
		return Err(ReduceError::shape(format!(
			"{} metadata rows for {} vectors",
			metadata.len(),
			similarities.len()
		)));
	}
	if metadata.len() < 3 {
		return Err(ReduceError::shape(format!(
			"correlation needs at least 3 rows, got {}",
			metadata.len()
		)));
	}

	let df = (metadata.len() - 2) as f64;
	let t_dist = StudentsT::new(0.0, 1.0, df).map_err(|e| ReduceError::shape(e.to_string()))?;

	let mut correlations: Vec<Correlation> = metadata[0]
		.keys()
		.filter_map(|column| {
			let values = numeric_column(metadata, column)?;
			let r = pearson(similarities, &values);
			Some(Correlation {
				column: column.clone(),
				r,
				p_value: p_value(r, df, &t_dist),
			})
		})
		.collect();

	correlations.sort_by(|a, b| b.r.abs().total_cmp(&a.r.abs()));
	correlations.truncate(top);
	Ok(correlations)
}

/// Metadata file contents: a JSON array with one object per vector row
pub fn parse_metadata(text: &str) -> Result<Vec<MetadataRow>> {
	serde_json::from_str(text).map_err(|e| ReduceError::Malformed(format!("invalid metadata: {}", e)))
}

fn numeric_column(metadata: &[MetadataRow], column: &str) -> Option<Vec<f64>> {
	metadata.iter().map(|row| numeric_value(row.get(column)?)).collect()
}

fn numeric_value(value: &Value) -> Option<f64> {
	let v = match value {
		Value::Number(n) => n.as_f64()?,
		Value::String(s) => s.trim().parse::<f64>().ok()?,
		_ => return None,
	};
	v.is_finite().then_some(v)
}

/// Pearson r; 0 when either side has no variance
fn pearson(x: &[f64], y: &[f64]) -> f64 {
	let n = x.len() as f64;
	let mean_x = x.iter().sum::<f64>() / n;
	let mean_y = y.iter().sum::<f64>() / n;

	let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
	for (a, b) in x.iter().zip(y) {
		let (dx, dy) = (a - mean_x, b - mean_y);
		cov += dx * dy;
		var_x += dx * dx;
		var_y += dy * dy;
	}

	let denominator = (var_x * var_y).sqrt();
	if denominator == 0.0 {
		return 0.0;
	}
	(cov / denominator).clamp(-1.0, 1.0)
}

/// Two-sided p-value of r under the null of no correlation
fn p_value(r: f64, df: f64, t_dist: &StudentsT) -> f64 {
	let residual = 1.0 - r * r;
	if residual <= 0.0 {
		return 0.0;
	}
	let t = r * (df / residual).sqrt();
	(2.0 * (1.0 - t_dist.cdf(t.abs()))).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn rows(values: Value) -> Vec<MetadataRow> {
		serde_json::from_value(values).unwrap()
	}

	#[test]
	fn pearson_of_linear_data() {
		assert!((pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]) - 1.0).abs() < 1e-12);
		assert!((pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]) + 1.0).abs() < 1e-12);
		assert_eq!(pearson(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]), 0.0);
	}

	#[test]
	fn skips_non_numeric_columns() {
		let metadata = rows(json!([
			{ "score": 1, "label": "a", "size": "10", "flag": true },
			{ "score": 2, "label": "b", "size": " 20 ", "flag": false },
			{ "score": 3, "label": "c", "size": "x", "flag": true },
			{ "score": 4, "label": "d", "size": "40", "flag": false },
		]));
		let out = correlate(&[0.1, 0.2, 0.3, 0.4], &metadata, 5).unwrap();

		assert_eq!(out.len(), 1);
		assert_eq!(out[0].column, "score");
		assert!((out[0].r - 1.0).abs() < 1e-12);
		assert!(out[0].p_value < 1e-6);
	}

	#[test]
	fn numeric_strings_and_missing_values() {
		let metadata = rows(json!([
			{ "a": "1.5", "b": 1 },
			{ "a": "2.5", "b": 2 },
			{ "a": "0.5" },
		]));
		let out = correlate(&[0.5, 0.9, 0.1], &metadata, 5).unwrap();
		assert_eq!(out.len(), 1);
		assert_eq!(out[0].column, "a");
	}

	#[test]
	fn p_value_matches_t_table() {
		// r = 0.5 with n = 10: t = 1.633, df = 8, two-sided p = 0.1411
		let t_dist = StudentsT::new(0.0, 1.0, 8.0).unwrap();
		assert!((p_value(0.5, 8.0, &t_dist) - 0.1411).abs() < 1e-3);
		assert!((p_value(0.0, 8.0, &t_dist) - 1.0).abs() < 1e-12);
	}

	#[test]
	fn keeps_strongest_by_absolute_r() {
		let sims = [0.1, 0.4, 0.2, 0.9, 0.5, 0.7];
		let metadata = rows(json!([
			{ "up": 1, "down": 60, "noise": 3, "weak": 2 },
			{ "up": 4, "down": 30, "noise": 1, "weak": 1 },
			{ "up": 2, "down": 50, "noise": 4, "weak": 3 },
			{ "up": 9, "down": 5, "noise": 1, "weak": 2 },
			{ "up": 5, "down": 25, "noise": 5, "weak": 1 },
			{ "up": 7, "down": 15, "noise": 9, "weak": 3 },
		]));
		let out = correlate(&sims, &metadata, 2).unwrap();

		assert_eq!(out.len(), 2);
		let columns: Vec<&str> = out.iter().map(|c| c.column.as_str()).collect();
		assert!(columns.contains(&"up") && columns.contains(&"down"), "got {:?}", columns);
		assert!(out[0].r.abs() >= out[1].r.abs());
		assert!(out.iter().all(|c| (0.0..=1.0).contains(&c.p_value)));
	}

	#[test]
	fn metadata_must_be_array_of_objects() {
		assert_eq!(parse_metadata(r#"[{"a": 1}, {"a": "2"}]"#).unwrap().len(), 2);
		assert_eq!(parse_metadata("[1, 2]").unwrap_err().kind(), "ParseError");
		assert_eq!(parse_metadata("{}").unwrap_err().kind(), "ParseError");
	}

	#[test]
	fn rejects_mismatched_or_short_input() {
		let metadata = rows(json!([{ "a": 1 }, { "a": 2 }, { "a": 3 }]));
		assert_eq!(correlate(&[0.1, 0.2], &metadata, 5).unwrap_err().kind(), "ShapeError");
		assert_eq!(correlate(&[0.1, 0.2], &metadata[..2], 5).unwrap_err().kind(), "ShapeError");
	}
}
