use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate run-time parameter documentation from a source tree.",
	long_about = "pardoc scans header files for the getParam / getParamFromGroup access idiom, \
	              merges the extracted metadata with a curated JSON override file, and writes a \
	              sorted, column-aligned parameter table into a doxygen comment block.\n\nQuick \
	              start:\n  pardoc generate  Scan and overwrite the parameter list\n  pardoc \
	              check     Verify the committed list is up to date"
)]
pub struct PardocCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Root path of the source tree to scan.
	#[arg(long, short, global = true)]
	pub root: Option<PathBuf>,

	/// Path to the curated override JSON file (default:
	/// `doc/parameters.json` under the root).
	#[arg(long, global = true)]
	pub overrides: Option<PathBuf>,

	/// Path of the output file (default: `doc/parameterlist.txt` under the
	/// root).
	#[arg(long, short, global = true)]
	pub output: Option<PathBuf>,

	/// Enable verbose output, including informational notes about decisions
	/// the reconciler made on its own.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Scan the source tree and overwrite the parameter list.
	///
	/// Walks all eligible header files (skipping `test` and `examples`
	/// subtrees), extracts every parameter access, reconciles duplicates
	/// against the override file, and writes the rendered table. The output
	/// is written even when problems were found; the exit status reports
	/// them: 0 when clean, 1 when any error was recorded.
	Generate {
		/// Render the parameter list without writing it; prints the
		/// document to stdout instead.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Check that the committed parameter list is up to date.
	///
	/// Runs the same scan and reconciliation as `generate` but compares the
	/// rendered document against the file on disk instead of overwriting
	/// it. Exits non-zero when the file is stale or any error was recorded.
	/// Ideal for CI pipelines.
	Check,
}
