use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::PardocError;
use crate::error::PardocResult;

/// A field of an override entry that may be authored as a single string or
/// a sequence of strings.
///
/// ```json
/// { "type": "int" }
/// { "type": ["int", "double"] }
/// ```
///
/// The effective number of table rows for a key is the maximum length over
/// its three fields; shorter fields are broadcast up via [`broadcast_to`]
/// (repeating their last value) so partially-specified arrays degrade to the
/// last given value instead of failing.
///
/// [`broadcast_to`]: OneOrMany::broadcast_to
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneOrMany {
	One(String),
	Many(Vec<String>),
}

impl Default for OneOrMany {
	fn default() -> Self {
		Self::Many(Vec::new())
	}
}

impl OneOrMany {
	pub fn as_slice(&self) -> &[String] {
		match self {
			Self::One(value) => std::slice::from_ref(value),
			Self::Many(values) => values,
		}
	}

	pub fn len(&self) -> usize {
		self.as_slice().len()
	}

	pub fn is_empty(&self) -> bool {
		self.as_slice().is_empty()
	}

	pub fn first(&self) -> Option<&str> {
		self.as_slice().first().map(String::as_str)
	}

	/// Yield exactly `n` values: extra values are dropped, missing values
	/// repeat the last given one (an empty field broadcasts to empty
	/// strings).
	pub fn broadcast_to(&self, n: usize) -> Vec<String> {
		let mut values = self.as_slice().to_vec();
		values.truncate(n);
		while values.len() < n {
			values.push(values.last().cloned().unwrap_or_default());
		}
		values
	}
}

/// A curated, hand-maintained metadata entry used to fill gaps and resolve
/// conflicts the static scan cannot.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OverrideEntry {
	/// The documentation group, `-` for ungrouped parameters.
	pub group: String,
	/// The parameter name without its group prefix.
	pub parameter: String,
	#[serde(default, rename = "type")]
	pub param_type: OneOrMany,
	#[serde(default)]
	pub default: OneOrMany,
	#[serde(default)]
	pub explanation: OneOrMany,
	/// `manual` marks an entry that is trusted even though it was not found
	/// by scanning (e.g. a parameter name computed at runtime).
	#[serde(default)]
	pub mode: Option<String>,
}

impl OverrideEntry {
	/// Number of table rows this entry expands to: the maximum length over
	/// its type, default, and explanation fields.
	pub fn slot_count(&self) -> usize {
		self.param_type
			.len()
			.max(self.default.len())
			.max(self.explanation.len())
	}

	/// Whether this entry is trusted without a matching source extraction.
	pub fn is_manual(&self) -> bool {
		self.mode.as_deref() == Some("manual")
	}
}

/// The override dataset: a JSON object keyed by `Group.Parameter` (`-.Name`
/// for ungrouped parameters), normalized to plain scan keys on load.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
	entries: BTreeMap<String, OverrideEntry>,
}

impl OverrideSet {
	pub fn empty() -> Self {
		Self::default()
	}

	/// Load and parse the override dataset. Unreadable or malformed input
	/// fails fast; the scan never starts without a valid dataset.
	pub fn load(path: &Path) -> PardocResult<Self> {
		let content = std::fs::read_to_string(path).map_err(|error| {
			PardocError::OverrideRead {
				path: path.display().to_string(),
				reason: error.to_string(),
			}
		})?;
		let raw: BTreeMap<String, OverrideEntry> =
			serde_json::from_str(&content).map_err(|error| {
				PardocError::OverrideParse {
					path: path.display().to_string(),
					reason: error.to_string(),
				}
			})?;

		let entries = raw
			.into_iter()
			.map(|(key, entry)| (normalize_key(&key), entry))
			.collect();
		Ok(Self { entries })
	}

	/// Look up an entry by scan key (the dotted key as extracted from
	/// source, without any `-.` prefix).
	pub fn get(&self, scan_key: &str) -> Option<&OverrideEntry> {
		self.entries.get(scan_key)
	}

	/// Iterate entries sorted by normalized key, for deterministic issue
	/// ordering.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &OverrideEntry)> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Strip the `-.` ungrouped marker so override keys compare equal to scan
/// keys.
fn normalize_key(key: &str) -> String {
	key.strip_prefix("-.").unwrap_or(key).to_string()
}
