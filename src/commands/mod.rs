//! # Command Implementations
//!
//! Each submodule handles one CLI command.

pub mod distances;
pub mod reduce;

use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::InputArgs;
use crate::config::PipelineConfig;
use crate::core::Delimiters;
use crate::ui;

fn is_stdio(path: &Path) -> bool {
	path.to_str() == Some("-") || path.as_os_str().is_empty()
}

/// Read a file, or stdin for `-`
pub(crate) fn read_text(path: &Path) -> Result<String> {
	if is_stdio(path) {
		let mut buf = String::new();
		io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
		Ok(buf)
	} else {
		std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
	}
}

/// Write to a file, or stdout for `-`
pub(crate) fn write_text(path: &Path, text: &str) -> Result<()> {
	if is_stdio(path) {
		let mut out = io::stdout().lock();
		writeln!(out, "{}", text).context("Failed to write stdout")?;
	} else {
		std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
		ui::success(&format!("Wrote {}", path.display()));
	}
	Ok(())
}

/// Center text from --center or --center-file
pub(crate) fn center_text(inline: Option<String>, file: Option<&Path>) -> Result<Option<String>> {
	match (inline, file) {
		(Some(text), _) => Ok(Some(text)),
		(None, Some(path)) => read_text(path).map(Some),
		(None, None) => Ok(None),
	}
}

pub(crate) fn base_config(input: &InputArgs) -> PipelineConfig {
	PipelineConfig {
		format: input.format.into(),
		delimiters: Delimiters {
			row: input.row_delim,
			field: input.field_delim,
		},
		..PipelineConfig::default()
	}
}
