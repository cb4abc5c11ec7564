use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use pardoc_cli::Commands;
use pardoc_cli::PardocCli;
use pardoc_core::AnyError;
use pardoc_core::Issue;
use pardoc_core::PardocConfig;
use pardoc_core::PipelineOptions;
use pardoc_core::PipelineReport;
use pardoc_core::Severity;
use pardoc_core::generate;
use pardoc_core::produce;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = PardocCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	if args.verbose {
		tracing_subscriber::fmt()
			.with_env_filter(
				tracing_subscriber::EnvFilter::try_from_default_env()
					.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pardoc_core=debug")),
			)
			.with_writer(std::io::stderr)
			.init();
	}

	let result = match args.command {
		Some(Commands::Generate { dry_run }) => run_generate(&args, dry_run),
		Some(Commands::Check) => run_check(&args),
		None => {
			eprintln!("No subcommand specified. Run `pardoc --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<pardoc_core::PardocError>() {
			Ok(pardoc_err) => {
				let report: miette::Report = (*pardoc_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn resolve_root(args: &PardocCli) -> PathBuf {
	args.root
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Resolve pipeline options from the config file, then apply command line
/// flags on top.
fn resolve_options(args: &PardocCli) -> Result<PipelineOptions, AnyError> {
	let root = resolve_root(args);
	let config = PardocConfig::load(&root)?;
	let mut options = PipelineOptions::from_config(&root, config.as_ref());

	if let Some(overrides) = &args.overrides {
		options.overrides_path = overrides.clone();
	}
	if let Some(output) = &args.output {
		options.output_path = output.clone();
	}

	Ok(options)
}

/// Print every recorded issue; notes only in verbose mode.
fn print_issues(report: &PipelineReport, verbose: bool) {
	for issue in &report.issues {
		match issue.severity() {
			Severity::Error => {
				eprintln!("{} {}", colored!("error:", red), issue.message());
			}
			Severity::Note => {
				if verbose || matches!(issue, Issue::ManualOverrideAdded { .. }) {
					eprintln!("{} {}", colored!("note:", yellow), issue.message());
				}
			}
		}
	}
}

fn run_generate(args: &PardocCli, dry_run: bool) -> Result<(), AnyError> {
	let options = resolve_options(args)?;

	let report = if dry_run {
		let report = produce(&options)?;
		print!("{}", report.document);
		report
	} else {
		generate(&options)?
	};

	print_issues(&report, args.verbose);

	if report.is_ok() {
		if !dry_run {
			println!(
				"{} created new parameter list at {}",
				colored!("Successfully", green),
				report.output_path.display()
			);
		}
	} else {
		eprintln!(
			"Finished with {} error(s). Please fix them and re-run, or resolve the parameters \
			 manually in {}.",
			report.error_count(),
			options.overrides_path.display()
		);
		process::exit(1);
	}

	Ok(())
}

fn run_check(args: &PardocCli) -> Result<(), AnyError> {
	let options = resolve_options(args)?;
	let report = produce(&options)?;

	print_issues(&report, args.verbose);

	let current = std::fs::read_to_string(&report.output_path).ok();
	let stale = current.as_deref() != Some(report.document.as_str());
	if stale {
		eprintln!(
			"{} parameter list at {} is out of date; run `pardoc generate`",
			colored!("error:", red),
			report.output_path.display()
		);
	}

	if stale || !report.is_ok() {
		if !report.is_ok() {
			eprintln!("Finished with {} error(s).", report.error_count());
		}
		process::exit(1);
	}

	println!(
		"Parameter list at {} is {}",
		report.output_path.display(),
		colored!("up to date", green)
	);

	Ok(())
}
