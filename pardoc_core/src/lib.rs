//! `pardoc_core` is the core library for the pardoc parameter documentation
//! generator. It scans a tree of header-like source files for the run-time
//! parameter access idiom, reconciles the extracted metadata with a curated
//! override dataset, and renders a sorted, column-aligned parameter table
//! inside a doxygen block comment.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source tree
//!   → Scanner (walks the tree, applies the call-site extractor per line)
//!   → Extractor (balances <…>/(…) delimiters, derives key + type + default)
//!   → Reconciler (groups by key, resolves conflicts against the overrides)
//!   → Renderer (sorts, groups, column-aligns, emits the document)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `pardoc.toml`: scan extensions,
//!   excluded directories, override and output paths.
//! - [`overrides`]: The curated override dataset: hand-maintained metadata
//!   used to fill gaps and resolve conflicts the static scan cannot.
//! - [`scanner`]: Directory walking and per-line extraction with per-file
//!   error capture.
//!
//! ## Key Types
//!
//! - [`RawParam`]: One parameter access pulled out of a line of source.
//! - [`TableRow`]: A fully resolved documentation table row.
//! - [`Reporter`]: The accumulating issue sink deciding the exit status.
//! - [`PipelineReport`]: The outcome of one `generate`/`produce` run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use pardoc_core::PipelineOptions;
//! use pardoc_core::generate;
//!
//! let options = PipelineOptions::resolve(Path::new(".")).unwrap();
//! let report = generate(&options).unwrap();
//! if !report.is_ok() {
//! 	eprintln!("{} error(s) recorded", report.error_count());
//! }
//! ```

pub use config::*;
pub use delim::*;
pub use error::*;
pub use extract::*;
pub use overrides::*;
pub use pipeline::*;
pub use reconcile::*;
pub use render::*;
pub use report::*;
pub use scanner::*;

pub mod config;
mod delim;
mod error;
mod extract;
pub mod overrides;
mod pipeline;
mod reconcile;
mod render;
mod report;
pub mod scanner;
