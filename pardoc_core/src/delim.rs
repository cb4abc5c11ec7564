use crate::error::ExtractError;

/// Find the content of `text` between the first matching pair of
/// `open`/`close` delimiters.
///
/// The search starts at the first occurrence of `open` (anything before it
/// is discarded) and extends one `close`-delimited chunk at a time until the
/// counts of `open` and `close` inside the span agree. This tolerates nested
/// occurrences of the same pair, e.g. `<std::vector<int>>` or a default
/// value expression containing its own parentheses.
///
/// Returns the content strictly between the delimiters together with the
/// remainder of `text` after the matching `close`.
pub fn enclosed_content<'a>(
	text: &'a str,
	open: &str,
	close: &str,
) -> Result<(&'a str, &'a str), ExtractError> {
	let unbalanced = || {
		ExtractError::UnbalancedDelimiters {
			open: open.to_string(),
			close: close.to_string(),
			text: text.to_string(),
		}
	};

	let Some(start) = text.find(open) else {
		return Err(unbalanced());
	};
	let text = &text[start..];

	// Extend the span past the next `close` until opens and closes balance.
	let mut search_from = open.len();
	let span_end = loop {
		let Some(position) = text[search_from..].find(close) else {
			return Err(unbalanced());
		};
		let end = search_from + position + close.len();
		let span = &text[..end];

		if span.matches(open).count() == span.matches(close).count() {
			break end;
		}

		search_from = end;
	};

	let content = &text[open.len()..span_end - close.len()];
	let remainder = &text[span_end..];
	Ok((content, remainder))
}
