use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::PardocError;
use crate::error::PardocResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["pardoc.toml", ".pardoc.toml"];

/// Default override dataset path, relative to the root.
pub const DEFAULT_OVERRIDES_PATH: &str = "doc/parameters.json";

/// Default output document path, relative to the root.
pub const DEFAULT_OUTPUT_PATH: &str = "doc/parameterlist.txt";

/// Configuration loaded from a `pardoc.toml` file.
///
/// ```toml
/// output = "doc/parameterlist.txt"
/// overrides = "doc/parameters.json"
///
/// [scan]
/// extensions = ["hh"]
/// exclude_dirs = ["test", "examples"]
/// reserved_stem = "parameters"
/// patterns = ["vendor/", "*.generated.hh"]
/// ```
///
/// Every key is optional; command line flags take precedence over config
/// values.
#[derive(Debug, Default, Deserialize)]
pub struct PardocConfig {
	/// Path of the output document, relative to the root.
	#[serde(default)]
	pub output: Option<PathBuf>,
	/// Path of the override dataset, relative to the root.
	#[serde(default)]
	pub overrides: Option<PathBuf>,
	/// Scanner configuration.
	#[serde(default)]
	pub scan: ScanConfig,
}

/// The `[scan]` section of `pardoc.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct ScanConfig {
	/// File extensions considered header-like source files.
	#[serde(default)]
	pub extensions: Option<Vec<String>>,
	/// Directory names pruned before descending.
	#[serde(default)]
	pub exclude_dirs: Option<Vec<String>>,
	/// Base name excluded from scanning (the generated documentation
	/// source).
	#[serde(default)]
	pub reserved_stem: Option<String>,
	/// Additional gitignore-style exclude patterns.
	#[serde(default)]
	pub patterns: Vec<String>,
}

impl PardocConfig {
	/// Discover and load the config file under `root`. Returns `Ok(None)`
	/// when no candidate exists; a present but malformed file is a fatal
	/// error.
	pub fn load(root: &Path) -> PardocResult<Option<Self>> {
		for candidate in CONFIG_FILE_CANDIDATES {
			let path = root.join(candidate);
			if !path.is_file() {
				continue;
			}

			let content = std::fs::read_to_string(&path)?;
			let config = toml::from_str(&content)
				.map_err(|error| PardocError::ConfigParse(error.to_string()))?;
			return Ok(Some(config));
		}

		Ok(None)
	}
}
