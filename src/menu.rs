//! Interactive numbered menu over an already loaded catalog.

use bookstats::analyser::logic::{AnalysisKind, AnalysisOptions, run_analysis};
use bookstats::report::{self, RenderOptions};
use polars::prelude::DataFrame;
use std::io::{self, BufRead, Write};

const MENU_WIDTH: usize = 60;
const EXIT_CHOICE: usize = AnalysisKind::ALL.len() + 1;
const FAREWELL: &str = "\nThank you for using the Bookshop Catalog Analysis Tool!";

pub struct MenuContext<'a> {
    pub df: &'a DataFrame,
    pub analysis: AnalysisOptions,
    pub render: RenderOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Run(AnalysisKind),
    Exit,
}

/// `1..=6` select an analysis in menu order; `7` exits.
pub fn parse_choice(input: &str) -> Option<MenuChoice> {
    let n: usize = input.trim().parse().ok()?;
    if n == EXIT_CHOICE {
        return Some(MenuChoice::Exit);
    }
    let kind = AnalysisKind::ALL.get(n.checked_sub(1)?)?;
    Some(MenuChoice::Run(*kind))
}

fn write_menu<W: Write>(out: &mut W, options: &AnalysisOptions) -> io::Result<()> {
    let rule = "=".repeat(MENU_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "           BOOKSHOP CATALOG - ANALYSIS MENU")?;
    writeln!(out, "{rule}")?;
    for (i, kind) in AnalysisKind::ALL.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, kind.menu_label(options))?;
    }
    writeln!(out, "{EXIT_CHOICE}. Exit")?;
    writeln!(out, "{rule}")
}

/// Reads a trimmed line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

/// Shows the menu until the user exits or input ends.
///
/// Analysis failures are printed and the loop carries on; only I/O errors on
/// `input` or `out` end it early.
pub fn run_menu<R: BufRead, W: Write>(
    ctx: &MenuContext<'_>,
    mut input: R,
    mut out: W,
) -> io::Result<()> {
    loop {
        write_menu(&mut out, &ctx.analysis)?;
        write!(out, "\nEnter your choice (1-{EXIT_CHOICE}): ")?;
        out.flush()?;

        let Some(line) = read_line(&mut input)? else {
            writeln!(out, "{FAREWELL}")?;
            return Ok(());
        };

        match parse_choice(&line) {
            Some(MenuChoice::Exit) => {
                writeln!(out, "{FAREWELL}")?;
                return Ok(());
            }
            Some(MenuChoice::Run(kind)) => {
                tracing::debug!(?kind, "menu selection");
                let result = run_analysis(kind, ctx.df, &ctx.analysis);
                if let Err(e) = &result
                    && !e.is_expected()
                {
                    tracing::error!(?kind, "Analysis failed unexpectedly: {e}");
                }
                write!(
                    out,
                    "{}",
                    report::render_section(kind, &result, &ctx.analysis, &ctx.render)
                )?;

                write!(out, "\nPress Enter to continue...")?;
                out.flush()?;
                if read_line(&mut input)?.is_none() {
                    writeln!(out, "{FAREWELL}")?;
                    return Ok(());
                }
            }
            None => {
                writeln!(
                    out,
                    "\nInvalid choice! Please enter a number between 1-{EXIT_CHOICE}."
                )?;
            }
        }
    }
}
