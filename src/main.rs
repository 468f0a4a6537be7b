//! vecscape - 2-D projection of embedding vectors
//!
//! Reads vectors from a file or stdin and writes `[x, y]` pairs as JSON.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use vecscape::cli::{Cli, Command};
use vecscape::commands;
use vecscape::ui::{self, Log};

fn main() {
	let cli = Cli::parse();
	Log::set_verbose(cli.verbose);

	if let Err(e) = dispatch(cli.command) {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn dispatch(command: Command) -> Result<()> {
	match command {
		Command::Reduce {
			input,
			center,
			center_file,
			method,
			seed,
			neighbors,
			output,
			pretty,
		} => commands::reduce::run(
			&input,
			center,
			center_file.as_deref(),
			method,
			seed,
			neighbors,
			&output,
			pretty,
		),
		Command::Distances {
			input,
			center,
			center_file,
			export,
			metadata,
			top,
		} => commands::distances::run(
			&input,
			center,
			center_file.as_deref(),
			export.as_deref(),
			metadata.as_deref(),
			top,
		),
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			match subcommand {
				Some(sub) => match cmd.find_subcommand_mut(&sub) {
					Some(sub_cmd) => sub_cmd.print_help()?,
					None => {
						ui::warn(&format!("Unknown subcommand: {}", sub));
						cmd.print_help()?;
					}
				},
				None => cmd.print_help()?,
			}
			Ok(())
		}
	}
}
