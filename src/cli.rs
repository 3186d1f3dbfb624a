use anyhow::{Context as _, Result};
use bookstats::analyser::logic::*;
use bookstats::config::{AppSettings, CONFIG_ENV_VAR, load_app_config};
use bookstats::report::{self, RenderOptions};
use clap::Parser;
use polars::prelude::DataFrame;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::menu::{self, MenuContext};

const EXAMPLES: &str = "\
Examples:
  bookstats --menu                       # Show interactive menu
  bookstats --trends                     # Show publication trends
  bookstats --authors --top-authors 10   # Show top 10 authors
  bookstats -l -p                        # Languages, then publishers
  bookstats --isbn --json                # ISBN completeness as JSON
  bookstats --file custom_dataset.csv    # Use custom dataset file";

#[derive(Parser, Debug)]
#[command(
    name = "bookstats",
    version,
    about = "Bookshop catalog analysis tool",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Path to the dataset CSV file (default: from config, initially Dataset_Books.csv)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Show interactive menu (default when no analysis is selected)
    #[arg(short, long)]
    pub menu: bool,

    /// Show publication trends over time
    #[arg(short, long)]
    pub trends: bool,

    /// Show the most prolific authors
    #[arg(short, long)]
    pub authors: bool,

    /// Show language distribution of books
    #[arg(short, long)]
    pub languages: bool,

    /// Show number of books published by each publisher
    #[arg(short, long)]
    pub publishers: bool,

    /// Show missing ISBN analysis
    #[arg(short, long)]
    pub isbn: bool,

    /// Show books per year by language (first 1000 records)
    #[arg(short, long)]
    pub year_language: bool,

    /// Show table shape, column types and the first rows
    #[arg(long)]
    pub overview: bool,

    /// Number of authors to list
    #[arg(long, value_name = "N")]
    pub top_authors: Option<usize>,

    /// Number of publishers to list
    #[arg(long, value_name = "N")]
    pub top_publishers: Option<usize>,

    /// Print tables only, without text charts
    #[arg(long)]
    pub no_graph: bool,

    /// Print results as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a JSON settings file
    #[arg(long, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Analyses requested by flag, in menu order regardless of flag order.
    pub fn selected(&self) -> Vec<AnalysisKind> {
        AnalysisKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                AnalysisKind::PublicationTrends => self.trends,
                AnalysisKind::TopAuthors => self.authors,
                AnalysisKind::LanguageDistribution => self.languages,
                AnalysisKind::Publishers => self.publishers,
                AnalysisKind::MissingIsbn => self.isbn,
                AnalysisKind::YearByLanguage => self.year_language,
            })
            .collect()
    }

    pub fn wants_menu(&self) -> bool {
        self.menu || (self.selected().is_empty() && !self.overview)
    }

    pub fn analysis_options(&self, settings: &AppSettings) -> AnalysisOptions {
        AnalysisOptions {
            window: YearWindow::current(),
            top_authors: self.top_authors.unwrap_or(settings.top_authors),
            top_publishers: self.top_publishers.unwrap_or(settings.top_publishers),
        }
    }

    pub fn render_options(&self, settings: &AppSettings) -> RenderOptions {
        RenderOptions {
            charts: settings.show_charts && !self.no_graph,
            chart_width: settings.chart_width,
        }
    }
}

/// Everything a batch run needs besides the table itself.
pub struct RunPlan {
    pub kinds: Vec<AnalysisKind>,
    pub overview: bool,
    pub json: bool,
    pub preview_rows: usize,
    pub analysis: AnalysisOptions,
    pub render: RenderOptions,
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_app_config(cli.config.as_deref());
    let settings = config.settings();
    let _guard = bookstats::logging::init(cli.verbose, settings.log_to_file)?;

    let path = cli
        .file
        .clone()
        .unwrap_or_else(|| settings.default_dataset.clone());

    let df = match load_dataset(&path) {
        Ok(df) => df,
        Err(e) => {
            tracing::error!("Failed to load {}: {e}", path.display());
            eprintln!("Error: {e}");
            eprintln!("Failed to load dataset. Please check the file path and try again.");
            return Ok(ExitCode::FAILURE);
        }
    };

    let analysis = cli.analysis_options(settings);
    let render = cli.render_options(settings);
    let stdout = std::io::stdout();

    if cli.wants_menu() && !cli.json {
        println!("Successfully loaded dataset from '{}'", path.display());
        let ctx = MenuContext {
            df: &df,
            analysis,
            render,
        };
        let stdin = std::io::stdin();
        menu::run_menu(&ctx, stdin.lock(), stdout.lock()).context("Menu I/O failed")?;
        return Ok(ExitCode::SUCCESS);
    }

    let plan = RunPlan {
        kinds: if cli.wants_menu() {
            AnalysisKind::ALL.to_vec()
        } else {
            cli.selected()
        },
        overview: cli.overview,
        json: cli.json,
        preview_rows: settings.preview_rows,
        analysis,
        render,
    };
    if !plan.json {
        println!("Successfully loaded dataset from '{}'", path.display());
    }
    run_batch(&df, &plan, &mut stdout.lock())?;
    Ok(ExitCode::SUCCESS)
}

/// Runs each planned analysis against `df` and writes the combined report.
pub fn run_batch<W: Write>(df: &DataFrame, plan: &RunPlan, out: &mut W) -> Result<()> {
    let sections: Vec<_> = plan
        .kinds
        .iter()
        .map(|&kind| {
            let result = run_analysis(kind, df, &plan.analysis);
            if let Err(e) = &result
                && !e.is_expected()
            {
                tracing::error!(?kind, "Analysis failed unexpectedly: {e}");
            }
            (kind, result)
        })
        .collect();
    let overview = plan.overview.then(|| dataset_overview(df));

    if plan.json {
        let text = report::render_json(overview.as_ref(), &sections)
            .context("Failed to serialize results")?;
        writeln!(out, "{text}")?;
        return Ok(());
    }

    if let Some(overview) = &overview {
        let preview = limit_rows(df, Some(plan.preview_rows));
        write!(out, "{}", report::render_overview(overview, &preview))?;
    }
    if sections.len() > 1 {
        writeln!(out, "Running {} analyses in sequence...", sections.len())?;
    }
    for (i, (kind, result)) in sections.iter().enumerate() {
        if i > 0 || overview.is_some() {
            write!(out, "{}", report::separator())?;
        }
        write!(
            out,
            "{}",
            report::render_section(*kind, result, &plan.analysis, &plan.render)
        )?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;
    use polars::prelude::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_selected_follows_menu_order() {
        let cli = Cli::parse_from(["bookstats", "-y", "-t", "--isbn"]);
        assert_eq!(
            cli.selected(),
            vec![
                AnalysisKind::PublicationTrends,
                AnalysisKind::MissingIsbn,
                AnalysisKind::YearByLanguage
            ]
        );
        assert!(!cli.wants_menu());
    }

    #[test]
    fn test_no_flags_means_menu() {
        let cli = Cli::parse_from(["bookstats"]);
        assert!(cli.wants_menu());
        let cli = Cli::parse_from(["bookstats", "--overview"]);
        assert!(!cli.wants_menu());
        let cli = Cli::parse_from(["bookstats", "-a", "--menu"]);
        assert!(cli.wants_menu());
    }

    #[test]
    fn test_overrides_beat_settings() {
        let settings = AppSettings::default();
        let cli = Cli::parse_from(["bookstats", "--top-authors", "3", "--no-graph"]);
        let analysis = cli.analysis_options(&settings);
        assert_eq!(analysis.top_authors, 3);
        assert_eq!(analysis.top_publishers, 20);
        assert!(!cli.render_options(&settings).charts);
    }

    fn plan(kinds: Vec<AnalysisKind>, json: bool) -> RunPlan {
        RunPlan {
            kinds,
            overview: false,
            json,
            preview_rows: 30,
            analysis: AnalysisOptions::for_current_year(2024),
            render: RenderOptions {
                charts: false,
                chart_width: 40,
            },
        }
    }

    #[test]
    fn test_batch_separates_sections() -> Result<()> {
        let df = df!(
            "authors" => ["A", "B", "A"],
            "language_code" => ["eng", "eng", "fre"]
        )?;
        let mut out = Vec::new();
        run_batch(
            &df,
            &plan(
                vec![AnalysisKind::TopAuthors, AnalysisKind::LanguageDistribution],
                false,
            ),
            &mut out,
        )?;
        let text = String::from_utf8(out)?;
        assert!(text.contains("Running 2 analyses in sequence..."));
        assert_eq!(text.matches(&"-".repeat(60)).count(), 1);
        assert!(text.find("TOP 5 MOST PROLIFIC AUTHORS") < text.find("LANGUAGE DISTRIBUTION"));
        Ok(())
    }

    #[test]
    fn test_batch_reports_errors_and_continues() -> Result<()> {
        let df = df!("authors" => ["A"])?;
        let mut out = Vec::new();
        run_batch(
            &df,
            &plan(vec![AnalysisKind::Publishers, AnalysisKind::TopAuthors], false),
            &mut out,
        )?;
        let text = String::from_utf8(out)?;
        assert!(text.contains("Error: Publisher column not found in dataset!"));
        assert!(text.contains("1. A: 1 books"));
        Ok(())
    }

    #[test]
    fn test_batch_json() -> Result<()> {
        let df = df!("authors" => ["A", "A"])?;
        let mut out = Vec::new();
        run_batch(&df, &plan(vec![AnalysisKind::TopAuthors], true), &mut out)?;
        let value: serde_json::Value = serde_json::from_slice(&out)?;
        assert_eq!(value["analyses"][0]["author_counts"][0]["count"], 2);
        assert!(value.get("overview").is_none());
        Ok(())
    }
}
