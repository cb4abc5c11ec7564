use std::path::PathBuf;

/// How an [`Issue`] affects the run's exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	/// Counted towards the failure exit status; demands manual attention.
	Error,
	/// Informational trace of a decision the pipeline made on its own.
	Note,
}

/// A problem or noteworthy decision recorded while scanning, reconciling,
/// or rendering. Issues are accumulated and reported at the end of a run;
/// none of them aborts the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Issue {
	/// A line looked like a parameter access but could not be extracted.
	ExtractionFailure {
		file: PathBuf,
		/// 1-indexed line number.
		line: usize,
		/// The offending line, trimmed.
		text: String,
		message: String,
	},
	/// An override entry without `manual` mode was never found in source,
	/// likely stale. The entry is dropped from the output.
	StaleOverride { key: String },
	/// Duplicate extractions of one key disagree on the type tag and no
	/// override entry arbitrates. The first-seen type is used as a fallback.
	ConflictingTypes { key: String, candidates: Vec<String> },
	/// Duplicate extractions of one key disagree on the default value and no
	/// override entry arbitrates. The first non-absent default is used.
	ConflictingDefaults {
		key: String,
		candidates: Vec<Option<String>>,
	},
	/// A row reached rendering with an empty explanation. The row is still
	/// emitted.
	MissingExplanation { key: String },
	/// A `manual` override entry was added to the output even though it was
	/// never found in source.
	ManualOverrideAdded { key: String },
	/// Conflicting raw extractions were resolved by the override entry; the
	/// discarded raw values are listed for traceability.
	OverrideArbitrated {
		key: String,
		field: &'static str,
		candidates: Vec<String>,
	},
}

impl Issue {
	pub fn severity(&self) -> Severity {
		match self {
			Self::ExtractionFailure { .. }
			| Self::StaleOverride { .. }
			| Self::ConflictingTypes { .. }
			| Self::ConflictingDefaults { .. }
			| Self::MissingExplanation { .. } => Severity::Error,
			Self::ManualOverrideAdded { .. } | Self::OverrideArbitrated { .. } => Severity::Note,
		}
	}

	/// Human-readable message for this issue.
	pub fn message(&self) -> String {
		match self {
			Self::ExtractionFailure {
				file,
				line,
				text,
				message,
			} => {
				format!(
					"{}:{line}: parameter could not be retrieved automatically: {message} (in \
					 `{text}`)",
					file.display()
				)
			}
			Self::StaleOverride { key } => {
				format!(
					"override entry `{key}` was not found in the source tree; set its mode to \
					 `manual` if it is to be kept, otherwise delete it"
				)
			}
			Self::ConflictingTypes { key, candidates } => {
				format!(
					"found multiple occurrences of parameter `{key}` with differing type names \
					 ({}) ; please provide the type manually in the override file",
					candidates.join(", ")
				)
			}
			Self::ConflictingDefaults { key, candidates } => {
				let listed: Vec<&str> = candidates
					.iter()
					.map(|value| value.as_deref().unwrap_or("- (none given)"))
					.collect();
				format!(
					"found multiple occurrences of parameter `{key}` with differing default \
					 values ({}) ; please provide the default manually in the override file",
					listed.join(", ")
				)
			}
			Self::MissingExplanation { key } => {
				format!("parameter `{key}` has no explanation; add it to the override file")
			}
			Self::ManualOverrideAdded { key } => {
				format!(
					"added parameter `{key}` from the override file; it could not be extracted \
					 from source"
				)
			}
			Self::OverrideArbitrated {
				key,
				field,
				candidates,
			} => {
				format!(
					"parameter `{key}` has differing extracted {field}s ({}); the override file \
					 value has been chosen",
					candidates.join(", ")
				)
			}
		}
	}
}

/// Accumulating sink for [`Issue`]s. Created by the driver at run start and
/// threaded through every phase that can fail; its error count decides the
/// process exit status at run end.
#[derive(Debug, Default)]
pub struct Reporter {
	issues: Vec<Issue>,
}

impl Reporter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record an issue, tracing it at a level matching its severity.
	pub fn record(&mut self, issue: Issue) {
		match issue.severity() {
			Severity::Error => tracing::warn!("{}", issue.message()),
			Severity::Note => tracing::debug!("{}", issue.message()),
		}
		self.issues.push(issue);
	}

	pub fn issues(&self) -> &[Issue] {
		&self.issues
	}

	/// Number of recorded issues with [`Severity::Error`].
	pub fn error_count(&self) -> usize {
		self.issues
			.iter()
			.filter(|issue| issue.severity() == Severity::Error)
			.count()
	}

	pub fn has_errors(&self) -> bool {
		self.error_count() > 0
	}

	/// Hand the accumulated issues over, consuming the reporter.
	pub fn into_issues(self) -> Vec<Issue> {
		self.issues
	}
}
