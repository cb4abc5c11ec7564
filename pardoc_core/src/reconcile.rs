use std::collections::BTreeMap;

use crate::extract::RawParam;
use crate::overrides::OverrideEntry;
use crate::overrides::OverrideSet;
use crate::report::Issue;
use crate::report::Reporter;

/// Sentinel group for keys without a `.` separator.
pub const UNGROUPED: &str = "-";

/// Placeholder default column value when no default was extracted or
/// supplied.
pub const NO_DEFAULT: &str = "-";

/// All extractions sharing one key, in discovery order. The two vectors
/// always have equal length: one slot per extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledKey {
	pub key: String,
	pub param_types: Vec<String>,
	pub default_values: Vec<Option<String>>,
}

impl ReconciledKey {
	fn new(param: RawParam) -> Self {
		Self {
			key: param.key,
			param_types: vec![param.param_type],
			default_values: vec![param.default_value],
		}
	}

	fn push(&mut self, param: RawParam) {
		self.param_types.push(param.param_type);
		self.default_values.push(param.default_value);
	}
}

/// One fully resolved documentation table row. Keys with multi-entry
/// overrides produce several rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
	pub group: String,
	pub name: String,
	pub param_type: String,
	pub default_value: String,
	pub explanation: String,
}

impl TableRow {
	/// The full dotted key this row documents. Ungrouped rows use the bare
	/// name.
	pub fn key(&self) -> String {
		if self.group == UNGROUPED {
			self.name.clone()
		} else {
			format!("{}.{}", self.group, self.name)
		}
	}
}

/// Split a dotted key into group and name; keys without a `.` fall into the
/// `-` ungrouped bucket.
pub fn split_group(key: &str) -> (&str, &str) {
	match key.split_once('.') {
		Some((group, name)) => (group, name),
		None => (UNGROUPED, key),
	}
}

/// Merge raw extractions with the curated override dataset into resolved
/// table rows, sorted by key.
///
/// Duplicate extractions of a key are reconciled here: agreeing duplicates
/// collapse to one row, disagreements are either arbitrated by the override
/// entry (when one exists) or recorded as errors with a first-seen
/// fallback. Override entries absent from the scan are synthesized into the
/// output when marked `manual` and reported as stale otherwise.
pub fn reconcile(
	raw: Vec<RawParam>,
	overrides: &OverrideSet,
	reporter: &mut Reporter,
) -> Vec<TableRow> {
	let mut keyed: BTreeMap<String, ReconciledKey> = BTreeMap::new();
	for param in raw {
		match keyed.get_mut(&param.key) {
			Some(entry) => entry.push(param),
			None => {
				keyed.insert(param.key.clone(), ReconciledKey::new(param));
			}
		}
	}

	merge_missing_overrides(&mut keyed, overrides, reporter);

	let mut rows = Vec::new();
	for reconciled in keyed.values() {
		resolve_key(reconciled, overrides, reporter, &mut rows);
	}

	rows
}

/// Fold override entries with no matching extraction into the keyed set
/// (`manual` mode) or report them as stale.
fn merge_missing_overrides(
	keyed: &mut BTreeMap<String, ReconciledKey>,
	overrides: &OverrideSet,
	reporter: &mut Reporter,
) {
	for (key, entry) in overrides.iter() {
		if keyed.contains_key(key) {
			continue;
		}

		if entry.is_manual() {
			// Broadcast both fields to a common length so the synthesized
			// entry keeps the one-slot-per-extraction invariant.
			let len = entry.param_type.len().max(entry.default.len()).max(1);
			keyed.insert(
				key.clone(),
				ReconciledKey {
					key: key.clone(),
					param_types: entry.param_type.broadcast_to(len),
					default_values: entry
						.default
						.broadcast_to(len)
						.into_iter()
						.map(|value| (!value.is_empty()).then_some(value))
						.collect(),
				},
			);
			reporter.record(Issue::ManualOverrideAdded { key: key.clone() });
		} else {
			reporter.record(Issue::StaleOverride { key: key.clone() });
		}
	}
}

/// Resolve one reconciled key into its table row(s).
fn resolve_key(
	reconciled: &ReconciledKey,
	overrides: &OverrideSet,
	reporter: &mut Reporter,
	rows: &mut Vec<TableRow>,
) {
	let (group, name) = split_group(&reconciled.key);
	let override_entry = overrides.get(&reconciled.key);
	let slots = override_entry.map_or(0, OverrideEntry::slot_count);

	let first_type = reconciled.param_types.first().cloned().unwrap_or_default();
	let first_default: Option<String> = reconciled.default_values.iter().flatten().next().cloned();

	// In case of multiple occurrences we prefer the override values,
	// otherwise the first non-absent extraction.
	let types_disagree = reconciled
		.param_types
		.iter()
		.any(|param_type| *param_type != first_type);
	let defaults_disagree = reconciled
		.default_values
		.iter()
		.any(|default| default.as_deref() != first_default.as_deref());

	if types_disagree {
		if slots == 0 {
			reporter.record(Issue::ConflictingTypes {
				key: reconciled.key.clone(),
				candidates: reconciled.param_types.clone(),
			});
		} else {
			reporter.record(Issue::OverrideArbitrated {
				key: reconciled.key.clone(),
				field: "type",
				candidates: reconciled.param_types.clone(),
			});
		}
	}
	if defaults_disagree {
		if slots == 0 {
			reporter.record(Issue::ConflictingDefaults {
				key: reconciled.key.clone(),
				candidates: reconciled.default_values.clone(),
			});
		} else {
			reporter.record(Issue::OverrideArbitrated {
				key: reconciled.key.clone(),
				field: "default value",
				candidates: reconciled
					.default_values
					.iter()
					.map(|value| {
						value
							.clone()
							.unwrap_or_else(|| "- (none given)".to_string())
					})
					.collect(),
			});
		}
	}

	if slots == 0 {
		rows.push(TableRow {
			group: group.to_string(),
			name: name.to_string(),
			param_type: first_type,
			default_value: first_default.unwrap_or_else(|| NO_DEFAULT.to_string()),
			// Flagged as a missing explanation during rendering.
			explanation: String::new(),
		});
		return;
	}

	// slots > 0 implies an override entry exists.
	let Some(entry) = override_entry else {
		return;
	};
	let param_types = if types_disagree {
		entry.param_type.broadcast_to(slots)
	} else {
		vec![first_type; slots]
	};
	let default_values = if defaults_disagree || first_default.is_none() {
		entry.default.broadcast_to(slots)
	} else {
		vec![first_default.unwrap_or_default(); slots]
	};
	let explanations = entry.explanation.broadcast_to(slots);

	for slot in 0..slots {
		rows.push(TableRow {
			group: group.to_string(),
			name: name.to_string(),
			param_type: param_types[slot].clone(),
			default_value: default_values[slot].clone(),
			explanation: explanations[slot].clone(),
		});
	}
}
