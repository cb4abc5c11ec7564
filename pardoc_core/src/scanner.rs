use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::config::PardocConfig;
use crate::error::PardocError;
use crate::error::PardocResult;
use crate::extract::RawParam;
use crate::extract::extract_param;
use crate::report::Issue;
use crate::report::Reporter;

/// Directory names pruned from the walk by default. These subtrees hold
/// test and example code whose parameter accesses are not part of the
/// public documentation.
pub const DEFAULT_EXCLUDE_DIRS: [&str; 2] = ["test", "examples"];

/// File extension of header-like source files scanned by default.
pub const DEFAULT_EXTENSIONS: [&str; 1] = ["hh"];

/// Base name of the generated documentation source, skipped so the scan
/// never re-reads its own output.
pub const DEFAULT_RESERVED_STEM: &str = "parameters";

/// Options controlling which files the scanner visits.
#[derive(Debug, Clone)]
pub struct ScanOptions {
	/// File extensions considered header-like source files.
	pub extensions: Vec<String>,
	/// Directory names pruned before descending.
	pub exclude_dirs: Vec<String>,
	/// Base name excluded from scanning regardless of directory.
	pub reserved_stem: String,
	/// Additional gitignore-style exclude patterns.
	pub exclude_patterns: Vec<String>,
}

impl Default for ScanOptions {
	fn default() -> Self {
		Self {
			extensions: DEFAULT_EXTENSIONS.map(String::from).to_vec(),
			exclude_dirs: DEFAULT_EXCLUDE_DIRS.map(String::from).to_vec(),
			reserved_stem: DEFAULT_RESERVED_STEM.to_string(),
			exclude_patterns: Vec::new(),
		}
	}
}

impl ScanOptions {
	/// Construct [`ScanOptions`] from a loaded [`PardocConfig`], falling
	/// back to the defaults for anything the config leaves unset.
	pub fn from_config(config: Option<&PardocConfig>) -> Self {
		let defaults = Self::default();
		let Some(scan) = config.map(|config| &config.scan) else {
			return defaults;
		};

		Self {
			extensions: scan.extensions.clone().unwrap_or(defaults.extensions),
			exclude_dirs: scan.exclude_dirs.clone().unwrap_or(defaults.exclude_dirs),
			reserved_stem: scan
				.reserved_stem
				.clone()
				.unwrap_or(defaults.reserved_stem),
			exclude_patterns: scan.patterns.clone(),
		}
	}
}

/// One line that looked like a parameter access but failed extraction.
/// Never fatal to the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
	/// 1-indexed line number.
	pub line: usize,
	/// The offending line, trimmed.
	pub text: String,
	pub message: String,
}

/// Everything a scan pass produced: the flat extraction list plus per-file
/// error lists.
#[derive(Debug, Default)]
pub struct ScanOutcome {
	/// Raw extractions in discovery order across the whole tree walk.
	pub params: Vec<RawParam>,
	/// Extraction failures keyed by file.
	pub file_errors: BTreeMap<PathBuf, Vec<ScanError>>,
}

/// Walk the source tree under `root` and extract every parameter access.
///
/// Excluded directories are pruned before recursion so their subtrees are
/// never opened. A malformed line is recorded against its file and the scan
/// continues; one bad line never aborts the documentation build.
pub fn scan(root: &Path, options: &ScanOptions, reporter: &mut Reporter) -> PardocResult<ScanOutcome> {
	tracing::debug!("searching for parameters under {}", root.display());
	let exclude_matcher = build_exclude_matcher(root, &options.exclude_patterns)?;

	let mut outcome = ScanOutcome::default();
	walk_dir(root, options, &exclude_matcher, &mut outcome)?;

	for (file, errors) in &outcome.file_errors {
		tracing::warn!(
			"{} parameter(s) in file {} could not be retrieved automatically",
			errors.len(),
			file.display()
		);
		for error in errors {
			reporter.record(Issue::ExtractionFailure {
				file: file.clone(),
				line: error.line,
				text: error.text.clone(),
				message: error.message.clone(),
			});
		}
	}

	Ok(outcome)
}

fn walk_dir(
	dir: &Path,
	options: &ScanOptions,
	exclude_matcher: &Gitignore,
	outcome: &mut ScanOutcome,
) -> PardocResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	// Sort entries so discovery order (and with it tie-breaking) is
	// deterministic across filesystems.
	let mut entries: Vec<PathBuf> = Vec::new();
	for entry in std::fs::read_dir(dir)? {
		entries.push(entry?.path());
	}
	entries.sort();

	for path in entries {
		let is_dir = path.is_dir();

		if exclude_matcher.matched(&path, is_dir).is_ignore() {
			continue;
		}

		if is_dir {
			// Prune before descending; excluded subtrees are never opened.
			let excluded = path
				.file_name()
				.and_then(|name| name.to_str())
				.is_some_and(|name| options.exclude_dirs.iter().any(|dir| dir == name));
			if excluded {
				continue;
			}
			walk_dir(&path, options, exclude_matcher, outcome)?;
		} else if is_eligible_file(&path, options) {
			scan_file(&path, outcome)?;
		}
	}

	Ok(())
}

/// Apply the call-site extractor to every line of one file.
fn scan_file(path: &Path, outcome: &mut ScanOutcome) -> PardocResult<()> {
	let content = std::fs::read_to_string(path)?;

	for (index, line) in content.lines().enumerate() {
		match extract_param(line) {
			Ok(Some(param)) => outcome.params.push(param),
			Ok(None) => {}
			Err(error) => {
				outcome
					.file_errors
					.entry(path.to_path_buf())
					.or_default()
					.push(ScanError {
						line: index + 1,
						text: line.trim().to_string(),
						message: error.to_string(),
					});
			}
		}
	}

	Ok(())
}

/// A file is eligible when its extension marks it as header-like source and
/// its base name is not the reserved documentation stem.
fn is_eligible_file(path: &Path, options: &ScanOptions) -> bool {
	let Some(extension) = path.extension().and_then(|extension| extension.to_str()) else {
		return false;
	};
	if !options.extensions.iter().any(|eligible| eligible == extension) {
		return false;
	}

	path.file_stem()
		.and_then(|stem| stem.to_str())
		.is_some_and(|stem| stem != options.reserved_stem)
}

/// Build a `Gitignore` matcher from the configured exclude patterns. These
/// follow `.gitignore` syntax and are applied on top of the directory-name
/// pruning.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> PardocResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|error| {
			PardocError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {error}"))
		})?;
	}
	builder
		.build()
		.map_err(|error| PardocError::ConfigParse(format!("failed to build exclude rules: {error}")))
}
