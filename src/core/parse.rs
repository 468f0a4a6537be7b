//! Vector parsing for delimited text and JSON inputs

use serde_json::Value;

use super::error::{ReduceError, Result};
use super::types::{CenterVector, VectorMatrix};
use crate::config::{FIELD_DELIMITER, ROW_DELIMITER};

/// Row and field separators for delimited text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
	pub row: char,
	pub field: char,
}

impl Default for Delimiters {
	fn default() -> Self {
		Self {
			row: ROW_DELIMITER,
			field: FIELD_DELIMITER,
		}
	}
}

/// Parse a delimited blob such as `1,2;3,4` into a matrix.
///
/// A single trailing row delimiter is accepted. Any other empty row
/// fails on its empty field.
pub fn parse_matrix(blob: &str, delims: Delimiters) -> Result<VectorMatrix> {
	let body = blob.trim();
	if body.is_empty() {
		return Err(ReduceError::EmptyInput);
	}
	let body = body.strip_suffix(delims.row).unwrap_or(body);
	if body.trim().is_empty() {
		return Err(ReduceError::EmptyInput);
	}

	let rows = body
		.split(delims.row)
		.enumerate()
		.map(|(i, row)| parse_row(row, delims.field, i))
		.collect::<Result<Vec<_>>>()?;

	VectorMatrix::new(rows)
}

/// Parse a single field-delimited center vector such as `1,0`
pub fn parse_center(text: &str, delims: Delimiters) -> Result<CenterVector> {
	let body = text.trim();
	if body.is_empty() {
		return Err(ReduceError::EmptyInput);
	}
	parse_row(body, delims.field, 0).map(CenterVector)
}

fn parse_row(row: &str, field_delim: char, row_idx: usize) -> Result<Vec<f64>> {
	row.split(field_delim)
		.enumerate()
		.map(|(j, field)| parse_field(field.trim(), row_idx, j))
		.collect()
}

fn parse_field(field: &str, row: usize, col: usize) -> Result<f64> {
	match field.parse::<f64>() {
		Ok(v) if v.is_finite() => Ok(v),
		_ => Err(ReduceError::parse(row, col, field)),
	}
}

/// Parse a JSON array of vectors.
///
/// Each vector is either an array of numbers or a string holding one,
/// the text form vector columns come back as from most databases:
/// `[[1, 0], "[0, 1]"]`.
pub fn parse_json_rows(text: &str) -> Result<VectorMatrix> {
	if text.trim().is_empty() {
		return Err(ReduceError::EmptyInput);
	}
	let value: Value = serde_json::from_str(text)
		.map_err(|e| ReduceError::Malformed(format!("invalid JSON: {}", e)))?;

	let items = match value {
		Value::Array(items) => items,
		_ => return Err(ReduceError::Malformed("expected a JSON array of vectors".into())),
	};
	if items.is_empty() {
		return Err(ReduceError::EmptyInput);
	}

	let rows = items
		.into_iter()
		.enumerate()
		.map(|(i, item)| json_vector(item, i))
		.collect::<Result<Vec<_>>>()?;

	VectorMatrix::new(rows)
}

/// Parse a center vector given as a JSON array, e.g. `[1, 0]`
pub fn parse_json_center(text: &str) -> Result<CenterVector> {
	if text.trim().is_empty() {
		return Err(ReduceError::EmptyInput);
	}
	let value: Value = serde_json::from_str(text)
		.map_err(|e| ReduceError::Malformed(format!("invalid JSON center: {}", e)))?;
	json_vector(value, 0).map(CenterVector)
}

fn json_vector(value: Value, row: usize) -> Result<Vec<f64>> {
	match value {
		Value::Array(fields) => fields
			.iter()
			.enumerate()
			.map(|(j, field)| match field.as_f64() {
				Some(v) if v.is_finite() => Ok(v),
				_ => Err(ReduceError::parse(row, j, &field.to_string())),
			})
			.collect(),
		Value::String(inner) => {
			let nested: Value = serde_json::from_str(&inner).map_err(|e| {
				ReduceError::Malformed(format!("row {}: invalid vector text '{}': {}", row, inner, e))
			})?;
			match nested {
				Value::Array(_) => json_vector(nested, row),
				_ => Err(ReduceError::Malformed(format!(
					"row {}: vector text '{}' is not an array",
					row, inner
				))),
			}
		}
		other => Err(ReduceError::Malformed(format!(
			"row {}: expected an array of numbers, got {}",
			row, other
		))),
	}
}

/// Inverse of [`parse_matrix`]. Uses shortest round-trip float formatting.
pub fn serialize_matrix(matrix: &VectorMatrix, delims: Delimiters) -> String {
	let row_sep = delims.row.to_string();
	let field_sep = delims.field.to_string();
	matrix
		.rows()
		.iter()
		.map(|row| {
			row.iter()
				.map(|v| v.to_string())
				.collect::<Vec<_>>()
				.join(&field_sep)
		})
		.collect::<Vec<_>>()
		.join(&row_sep)
}
