use std::path::Path;

use assert_cmd::Command;

pub fn pardoc_cmd() -> Command {
	let mut cmd = Command::cargo_bin("pardoc").expect("pardoc binary should be built");
	cmd.env("NO_COLOR", "1");
	cmd
}

/// Lay out a minimal scannable project: one header with two clean parameter
/// accesses and an override file explaining both.
pub fn write_clean_project(root: &Path) {
	std::fs::create_dir_all(root.join("common")).expect("create source dir");
	std::fs::write(
		root.join("common").join("grid.hh"),
		"const auto cells = getParam<int>(\"Grid.Cells\", 10);\nconst auto radius = \
		 getParam<double>(\"Radius\", 1.0);\n",
	)
	.expect("write header");
	std::fs::write(
		root.join("parameters.json"),
		r#"{
			"Grid.Cells": {
				"group": "Grid",
				"parameter": "Cells",
				"type": "int",
				"default": "10",
				"explanation": "number of cells per direction"
			},
			"-.Radius": {
				"group": "-",
				"parameter": "Radius",
				"type": "double",
				"default": "1.0",
				"explanation": "radius of the domain"
			}
		}"#,
	)
	.expect("write overrides");
}
