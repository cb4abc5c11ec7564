use crate::delim::enclosed_content;
use crate::error::ExtractError;

/// Base name of the parameter access idiom. Both recognized call shapes,
/// `getParam<T>("Group.Name", default)` and
/// `getParamFromGroup<T>(group, "Name", default)`, start with it.
pub const IDIOM: &str = "getParam";

const GROUPED_IDIOM: &str = "getParamFromGroup";
const GROUPED_MARKER: &str = "getParamFromGroup<";
const PLAIN_MARKER: &str = "getParam<";

/// A single parameter access pulled out of one line of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParam {
	/// The template argument, e.g. `int` or `std::vector<double>`.
	pub param_type: String,
	/// The dotted parameter key with its surrounding quotes stripped, e.g.
	/// `Grid.Cells`.
	pub key: String,
	/// The default value expression passed as the trailing call argument, if
	/// any. Kept verbatim; it may be an arbitrary expression.
	pub default_value: Option<String>,
}

/// Extract a parameter access from a single line of source text.
///
/// Returns `Ok(None)` when the line does not contain the idiom at all.
/// Lines containing more than one occurrence of the idiom are refused with
/// [`ExtractError::AmbiguousCall`] rather than guessed at.
///
/// This is deliberately not a tokenizer: everything after a `;` on the line
/// is discarded, and any construct the idiom detection cannot handle fails
/// loudly so it can be resolved by hand in the override file.
pub fn extract_param(line: &str) -> Result<Option<RawParam>, ExtractError> {
	let has_group_argument = if line.contains(GROUPED_MARKER) {
		true
	} else if line.contains(PLAIN_MARKER) {
		false
	} else {
		return Ok(None);
	};

	if line.matches(IDIOM).count() > 1 {
		return Err(ExtractError::AmbiguousCall);
	}

	let idiom = if has_group_argument { GROUPED_IDIOM } else { IDIOM };
	let rest = line.split_once(idiom).map_or("", |(_, rest)| rest);

	// Cut off everything behind a statement-ending semicolon. A deliberate
	// approximation; trailing comments and chained statements are out of
	// scope for this extractor.
	let rest = rest.trim();
	let rest = rest.split(';').next().unwrap_or(rest);

	let (param_type, after_type) = enclosed_content(rest, "<", ">")?;
	let (arguments, _) = enclosed_content(after_type, "(", ")")?;

	// The grouped variant takes the group name as its first argument; drop
	// it so both variants leave `"key"[, default]` behind.
	let arguments = if has_group_argument {
		arguments.split_once(',').map_or("", |(_, rest)| rest)
	} else {
		arguments
	};

	let (key_literal, default_value) = match arguments.split_once(',') {
		Some((key, default)) if !default.trim().is_empty() => (key, Some(default.trim())),
		Some((key, _)) => (key, None),
		None => (arguments, None),
	};

	let param_type = param_type.trim().to_string();
	let key = unquote_key(key_literal.trim())?;

	Ok(Some(RawParam {
		param_type,
		key,
		default_value: default_value.map(str::to_string),
	}))
}

/// Validate a key literal and strip its surrounding quotes.
///
/// The sole validity checks: the literal must be non-empty, wrapped in a
/// pair of double quotes, and free of interior whitespace. Anything else is
/// accepted verbatim.
fn unquote_key(literal: &str) -> Result<String, ExtractError> {
	if literal.is_empty() {
		return Err(ExtractError::MalformedKey(
			"parameter name is empty".to_string(),
		));
	}

	let Some(key) = literal
		.strip_prefix('"')
		.and_then(|key| key.strip_suffix('"'))
	else {
		return Err(ExtractError::MalformedKey(format!(
			"`{literal}` is not a double-quoted string literal"
		)));
	};

	if key.contains(char::is_whitespace) {
		return Err(ExtractError::MalformedKey(format!(
			"`{literal}` contains whitespace"
		)));
	}

	Ok(key.to_string())
}
