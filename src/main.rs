//! # Bookstats Command-Line Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Load settings, start logging
//!   ├─> Load the catalog (exit 1 on failure)
//!   │
//!   ├─> Analysis flags given:
//!   │   └─> Run each in menu order, print text or JSON
//!   │
//!   └─> Otherwise:
//!       └─> Interactive menu on stdin/stdout
//! ```
//!
//! ## Examples
//!
//! ```bash
//! bookstats --trends --languages
//! bookstats --file catalog.csv --menu
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod menu;

use clap::Parser as _;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\nUnexpected error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
