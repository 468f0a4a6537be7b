use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{InputFormat, FIELD_DELIMITER, ROW_DELIMITER, TOP_CORRELATIONS};
use crate::processing::Method;

/// Encoding of the vector input file
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Format {
	/// Rows split by the row delimiter, fields by the field delimiter
	#[default]
	Delimited,
	/// JSON array of vectors (arrays or strings holding arrays)
	Json,
}

impl From<Format> for InputFormat {
	fn from(format: Format) -> Self {
		match format {
			Format::Delimited => InputFormat::Delimited,
			Format::Json => InputFormat::Json,
		}
	}
}

fn parse_neighbors(s: &str) -> Result<usize, String> {
	let val: usize = s.parse().map_err(|_| format!("'{}' is not a valid count", s))?;
	if val < 2 {
		Err(format!("neighbors must be at least 2, got {}", val))
	} else {
		Ok(val)
	}
}

fn styles() -> Styles {
	let blue = Some(Color::Ansi(AnsiColor::Blue));
	Styles::styled()
		.header(Style::new().bold().fg_color(blue))
		.usage(Style::new().bold().fg_color(blue))
		.literal(Style::new().fg_color(blue))
		.placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
		.valid(Style::new().fg_color(blue))
		.invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "vecscape",
	author,
	version,
	about = "Project high-dimensional vectors to 2-D, optionally centered on a reference vector",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {bin} {reduce}     {reduce_args}                  {reduce_desc}
  {bin} {reduce}     {center_args}   {center_desc}
  {bin} {distances}  {distances_args}     {distances_desc}
  {bin} {distances}  {metadata_args}       {metadata_desc}
  {bin} {help}       {help_args}                     {help_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "vecscape".bright_blue(),
		reduce = "reduce".yellow(),
		reduce_args = "-i vectors.txt",
		reduce_desc = "Plain 2-D projection".dimmed(),
		center_args = "-i vectors.txt -c \"1,0,0\"",
		center_desc = "Center-weighted projection".dimmed(),
		distances = "distances".yellow(),
		distances_args = "-i vectors.txt -c \"1,0,0\"",
		distances_desc = "Distances and weights only".dimmed(),
		metadata_args = "-c \"1,0,0\" -M meta.json",
		metadata_desc = "Correlate similarity with metadata".dimmed(),
		help = "help".yellow(),
		help_args = "reduce",
		help_desc = "Show help for reduce".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

/// Options shared by commands that read vectors
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
	/// Vector file, or - for stdin
	#[arg(short = 'i', long = "input", default_value = "-")]
	pub input: PathBuf,

	/// Input encoding
	#[arg(short = 'f', long = "format", default_value = "delimited")]
	pub format: Format,

	/// Row delimiter for delimited input
	#[arg(long = "row-delim", default_value_t = ROW_DELIMITER)]
	pub row_delim: char,

	/// Field delimiter for delimited input and the center vector
	#[arg(long = "field-delim", default_value_t = FIELD_DELIMITER)]
	pub field_delim: char,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Reduce vectors to 2-D coordinates
	Reduce {
		#[command(flatten)]
		input: InputArgs,

		/// Center vector, delimited ("1,0,0") or JSON ("[1,0,0]")
		#[arg(short = 'c', long = "center", conflicts_with = "center_file")]
		center: Option<String>,

		/// Read the center vector from a file
		#[arg(long = "center-file", value_name = "PATH")]
		center_file: Option<PathBuf>,

		/// Reduction method; only pca gives identical output for the same seed
		#[arg(short = 'm', long = "method", default_value = "pca")]
		method: Method,

		/// Random seed (default: $VECSCAPE_SEED or 42). Pins pca output; for umap it only fixes the initial layout
		#[arg(long = "seed")]
		seed: Option<u64>,

		/// UMAP neighborhood size (default: $VECSCAPE_NEIGHBORS or 15)
		#[arg(short = 'n', long = "neighbors", value_parser = parse_neighbors)]
		neighbors: Option<usize>,

		/// Output file, or - for stdout
		#[arg(short = 'o', long = "output", default_value = "-")]
		output: PathBuf,

		/// Pretty-print the JSON output
		#[arg(long = "pretty")]
		pretty: bool,
	},

	/// Show cosine distances and weights relative to a center vector
	Distances {
		#[command(flatten)]
		input: InputArgs,

		/// Center vector, delimited ("1,0,0") or JSON ("[1,0,0]")
		#[arg(short = 'c', long = "center", required_unless_present = "center_file")]
		center: Option<String>,

		/// Read the center vector from a file
		#[arg(long = "center-file", value_name = "PATH", conflicts_with = "center")]
		center_file: Option<PathBuf>,

		/// Export as JSON to a file, or - for stdout
		#[arg(short = 'e', long = "export", value_name = "PATH")]
		export: Option<PathBuf>,

		/// Per-row metadata (JSON array of objects) to correlate with center similarity
		#[arg(short = 'M', long = "metadata", value_name = "PATH")]
		metadata: Option<PathBuf>,

		/// Number of metadata columns to report, strongest first
		#[arg(long = "top", default_value_t = TOP_CORRELATIONS, requires = "metadata")]
		top: usize,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}
