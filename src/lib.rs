//! # Bookstats - Bookshop Catalog Analysis Library
//!
//! Bookstats reads a bookshop catalog from CSV and answers six questions
//! about it: publication trends, most prolific authors, language mix,
//! publisher output, ISBN completeness, and books per year by language.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bookstats::analyser::logic;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let df = logic::load_dataset(Path::new("Dataset_Books.csv"))?;
//! let authors = logic::analyze_top_authors(&df, 5)?;
//! for entry in &authors.author_counts {
//!     println!("{}: {} books", entry.name, entry.count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`analyser`]: Catalog loading and the analysis engine
//!   - [`analyser::logic`]: Column resolution, year extraction, aggregations
//! - [`report`]: Text, chart and JSON rendering of results
//! - [`config`]: Persistent user settings
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: Error types and handling utilities
//!
//! ## Key Concepts
//!
//! ### Logical fields
//!
//! Catalogs name their columns inconsistently. Each analysis asks for a
//! logical field (publication date, authors, language, publisher) and the
//! first matching alias in the table is used:
//!
//! ```
//! use bookstats::analyser::logic::{LogicalField, resolve_alias};
//!
//! let columns = ["title", "Language", "language_code"];
//! assert_eq!(
//!     resolve_alias(&columns, LogicalField::Language.aliases()),
//!     Some("language_code"),
//! );
//! ```
//!
//! ### Expected failures
//!
//! Analyses return [`analyser::logic::AnalysisResult`]. A missing column or a
//! column with no usable values is an ordinary `Err` carrying a message fit
//! for the user, never a panic.

#![warn(clippy::all, rust_2018_idioms)]

pub mod analyser;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
