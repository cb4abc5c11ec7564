use std::path::Path;
use std::path::PathBuf;

use crate::config::DEFAULT_OUTPUT_PATH;
use crate::config::DEFAULT_OVERRIDES_PATH;
use crate::config::PardocConfig;
use crate::error::PardocError;
use crate::error::PardocResult;
use crate::overrides::OverrideSet;
use crate::reconcile::reconcile;
use crate::render::render;
use crate::report::Issue;
use crate::report::Reporter;
use crate::report::Severity;
use crate::scanner::ScanOptions;
use crate::scanner::scan;

/// Resolved options for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
	/// Root of the source tree to scan.
	pub root: PathBuf,
	/// Path of the override dataset.
	pub overrides_path: PathBuf,
	/// Path of the output document.
	pub output_path: PathBuf,
	/// Scanner options.
	pub scan: ScanOptions,
}

impl PipelineOptions {
	/// Resolve options for `root` from its discovered config file, applying
	/// the defaults for anything left unset. Relative override/output paths
	/// are anchored at the root.
	pub fn resolve(root: &Path) -> PardocResult<Self> {
		let config = PardocConfig::load(root)?;
		Ok(Self::from_config(root, config.as_ref()))
	}

	/// Build options from an already-loaded config.
	pub fn from_config(root: &Path, config: Option<&PardocConfig>) -> Self {
		let overrides_path = config
			.and_then(|config| config.overrides.clone())
			.unwrap_or_else(|| PathBuf::from(DEFAULT_OVERRIDES_PATH));
		let output_path = config
			.and_then(|config| config.output.clone())
			.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

		Self {
			root: root.to_path_buf(),
			overrides_path: anchor(root, overrides_path),
			output_path: anchor(root, output_path),
			scan: ScanOptions::from_config(config),
		}
	}
}

/// Everything one pipeline run produced.
#[derive(Debug)]
pub struct PipelineReport {
	/// The rendered parameter list document.
	pub document: String,
	/// Where the document was (or would be) written.
	pub output_path: PathBuf,
	/// Number of resolved table rows.
	pub row_count: usize,
	/// All recorded issues, in recording order.
	pub issues: Vec<Issue>,
}

impl PipelineReport {
	/// Number of error-severity issues; non-zero means the run should exit
	/// with a failure status even though the document was produced.
	pub fn error_count(&self) -> usize {
		self.issues
			.iter()
			.filter(|issue| issue.severity() == Severity::Error)
			.count()
	}

	pub fn is_ok(&self) -> bool {
		self.error_count() == 0
	}
}

/// Run scan → reconcile → render and overwrite the output document.
///
/// The document is written even when issues were recorded; the policy is
/// to produce the best achievable documentation and report every unresolved
/// ambiguity, not to abort on the first defect.
pub fn generate(options: &PipelineOptions) -> PardocResult<PipelineReport> {
	let report = produce(options)?;

	if let Some(parent) = report.output_path.parent() {
		std::fs::create_dir_all(parent).map_err(|error| {
			PardocError::OutputWrite {
				path: report.output_path.display().to_string(),
				reason: error.to_string(),
			}
		})?;
	}
	std::fs::write(&report.output_path, &report.document).map_err(|error| {
		PardocError::OutputWrite {
			path: report.output_path.display().to_string(),
			reason: error.to_string(),
		}
	})?;
	tracing::info!("overwrote parameter list at {}", report.output_path.display());

	Ok(report)
}

/// Run scan → reconcile → render without touching the output file.
pub fn produce(options: &PipelineOptions) -> PardocResult<PipelineReport> {
	let overrides = OverrideSet::load(&options.overrides_path)?;
	let mut reporter = Reporter::new();

	let outcome = scan(&options.root, &options.scan, &mut reporter)?;
	tracing::debug!(
		"extracted {} parameter access(es) from the source tree",
		outcome.params.len()
	);

	let rows = reconcile(outcome.params, &overrides, &mut reporter);
	let document = render(&rows, &mut reporter);

	Ok(PipelineReport {
		document,
		output_path: options.output_path.clone(),
		row_count: rows.len(),
		issues: reporter.into_issues(),
	})
}

fn anchor(root: &Path, path: PathBuf) -> PathBuf {
	if path.is_absolute() {
		path
	} else {
		root.join(path)
	}
}
