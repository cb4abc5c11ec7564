use miette::Diagnostic;
use thiserror::Error;

/// Fatal pipeline errors. Anything that stops a run before or outside the
/// scan itself; recoverable per-line extraction failures are recorded as
/// [`Issue`](crate::report::Issue)s instead and never abort the run.
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum PardocError {
	#[error(transparent)]
	#[diagnostic(code(pardoc::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read override file `{path}`: {reason}")]
	#[diagnostic(
		code(pardoc::override_read),
		help("pass --overrides pointing at an existing parameter JSON file")
	)]
	OverrideRead { path: String, reason: String },

	#[error("failed to parse override file `{path}`: {reason}")]
	#[diagnostic(
		code(pardoc::override_parse),
		help(
			"the override file must be a JSON object keyed by `Group.Parameter` (use `-.Name` \
			 for ungrouped parameters)"
		)
	)]
	OverrideParse { path: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(pardoc::config_parse),
		help("check that pardoc.toml is valid TOML with an optional [scan] section")
	)]
	ConfigParse(String),

	#[error("failed to write parameter list to `{path}`: {reason}")]
	#[diagnostic(code(pardoc::output_write))]
	OutputWrite { path: String, reason: String },
}

/// Per-line extraction failures. These are captured by the scanner and
/// recorded against the offending file and line; they never propagate out of
/// a scan.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
	#[error("could not get content between `{open}` and `{close}` in `{text}`")]
	UnbalancedDelimiters {
		open: String,
		close: String,
		text: String,
	},

	#[error("cannot process multiple parameter accesses in one line")]
	AmbiguousCall,

	#[error("could not process parameter name: {0}")]
	MalformedKey(String),
}

pub type PardocResult<T> = Result<T, PardocError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
