use crate::reconcile::TableRow;
use crate::reconcile::UNGROUPED;
use crate::report::Issue;
use crate::report::Reporter;

// Minimum column widths. Content exceeding its width is emitted in full;
// padding, not truncation.
const GROUP_WIDTH: usize = 20;
const NAME_WIDTH: usize = 45;
const TYPE_WIDTH: usize = 24;
const DEFAULT_WIDTH: usize = 15;
const EXPLANATION_WIDTH: usize = 150;

/// Serialize resolved rows into the parameter list document: a doxygen
/// block comment holding a fixed header followed by one pipe-delimited,
/// column-aligned line per row.
///
/// Rows are stably sorted by full key, then partitioned so that all grouped
/// rows precede the ungrouped bucket. The first row of each group carries
/// the `\b` doxygen bold marker on its group cell. Rows whose explanation
/// is empty are recorded as [`Issue::MissingExplanation`] but still
/// emitted.
pub fn render(rows: &[TableRow], reporter: &mut Reporter) -> String {
	let mut sorted: Vec<&TableRow> = rows.iter().collect();
	sorted.sort_by_cached_key(|row| row.key());

	let mut grouped_lines = Vec::new();
	let mut ungrouped_lines = Vec::new();
	let mut previous_group: Option<&str> = None;

	for row in sorted {
		let is_group_boundary = previous_group != Some(row.group.as_str());
		if is_group_boundary {
			previous_group = Some(row.group.as_str());
		}

		if row.explanation.trim().is_empty() {
			reporter.record(Issue::MissingExplanation { key: row.key() });
		}

		let group_cell = if is_group_boundary && row.group != UNGROUPED {
			format!("\\b {}", row.group)
		} else {
			row.group.clone()
		};
		let line = table_line(
			&group_cell,
			&row.name,
			&row.param_type,
			&row.default_value,
			&row.explanation,
		);

		if row.group == UNGROUPED {
			ungrouped_lines.push(line);
		} else {
			grouped_lines.push(line);
		}
	}

	let mut document = header();
	for line in grouped_lines.iter().chain(&ungrouped_lines) {
		document.push_str(line);
		document.push('\n');
	}
	document.push_str(" */\n");
	document
}

/// One column-aligned table line inside the block comment.
fn table_line(group: &str, name: &str, param_type: &str, default_value: &str, explanation: &str) -> String {
	format!(
		" * | {group:<GROUP_WIDTH$} | {name:<NAME_WIDTH$} | {param_type:<TYPE_WIDTH$} | \
		 {default_value:<DEFAULT_WIDTH$} | {explanation:<EXPLANATION_WIDTH$} |"
	)
}

/// The static document header: warning banner, column legend, separator
/// row, and the implicit always-present `ParameterFile` pseudo-row.
fn header() -> String {
	let mut header = String::from(
		"/*!\n \
		 *\\internal\n \
		 * ****** W A R N I N G **************************************\n \
		 * This file is auto-generated. Do not manually edit.\n \
		 * Run pardoc generate\n \
		 * ***********************************************************\n \
		 *\\endinternal\n \
		 *\n \
		 *\\file\n \
		 *\\ingroup Parameter\n \
		 *\n \
		 *\\brief List of currently useable run-time parameters\n \
		 *\n \
		 * The listed run-time parameters are available in general,\n \
		 * but we point out that a certain model might not be able\n \
		 * to use every parameter!\n \
		 *\n",
	);

	header.push_str(&legend_line(
		"Group",
		"Parameter",
		"Type",
		"Default Value",
		" | Explanation ",
	));
	header.push_str(&legend_line(":-", ":-", ":-", ":-", " | :- "));
	header.push_str(&legend_line(
		"-",
		"ParameterFile",
		"std::string",
		"executable.input",
		" | :- ",
	));
	header
}

/// A header line: four padded columns plus the explanation tail. The
/// explanation cell keeps its historical layout where the ` | ` separator
/// is padded together with the title.
fn legend_line(
	group: &str,
	name: &str,
	param_type: &str,
	default_value: &str,
	explanation_cell: &str,
) -> String {
	format!(
		" * | {group:<GROUP_WIDTH$} | {name:<NAME_WIDTH$} | {param_type:<TYPE_WIDTH$} | \
		 {default_value:<DEFAULT_WIDTH$}{explanation_cell:<EXPLANATION_WIDTH$}|\n"
	)
}
