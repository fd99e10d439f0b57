use anyhow::{Context, Result};
use chat_scraper_core::aggregate::{AggregationState, ParseErrorPolicy, parse_category_list};
use chat_scraper_core::category::{CategoryDomainMap, MatchMode};
use chat_scraper_core::error::ScrapeError;
use chat_scraper_core::report::{ReportFormat, generate_report, save_report};
use clap::ArgMatches;
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Filename that selects standard input instead of a file.
pub const STDIN_SOURCE: &str = "-";

/// Options for a `links list` run
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub source: String,
    pub categories: String,
    pub grouped: bool,
    pub match_mode: MatchMode,
    pub on_invalid_url: ParseErrorPolicy,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
}

impl ListOptions {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            categories: "all".to_string(),
            grouped: false,
            match_mode: MatchMode::default(),
            on_invalid_url: ParseErrorPolicy::default(),
            format: ReportFormat::Text,
            output: None,
        }
    }

    pub fn from_matches(source: &str, sub_matches: &ArgMatches) -> Self {
        let mut options = Self::new(source);
        if let Some(categories) = sub_matches.get_one::<String>("category") {
            options.categories = categories.clone();
        }
        options.grouped = sub_matches.get_flag("grouped");
        options.match_mode = sub_matches
            .get_one::<String>("match-mode")
            .and_then(|m| MatchMode::from_str(m))
            .unwrap_or_default();
        if sub_matches.get_flag("skip-invalid") {
            options.on_invalid_url = ParseErrorPolicy::Skip;
        }
        options.format = sub_matches
            .get_one::<String>("format")
            .and_then(|f| ReportFormat::from_str(f))
            .unwrap_or(ReportFormat::Text);
        options.output = sub_matches.get_one::<PathBuf>("output").cloned();
        options
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the verbosity flag.
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // a subscriber may already be installed when running under tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Open a file, or stdin for `-`, as a line source. `~` is expanded.
pub fn open_source(name: &str) -> Result<Box<dyn BufRead>, ScrapeError> {
    if name == STDIN_SOURCE {
        debug!("Reading links from stdin");
        return Ok(Box::new(io::stdin().lock()));
    }

    let expanded = shellexpand::tilde(name);
    let path = Path::new(expanded.as_ref());
    let file = File::open(path).map_err(|source| ScrapeError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Reading links from {}", path.display());
    Ok(Box::new(BufReader::new(file)))
}

/// Ingest, filter and optionally group the links from a line source.
pub fn collect_links<R: BufRead>(reader: R, options: &ListOptions) -> Result<AggregationState> {
    let map = CategoryDomainMap::new(options.match_mode);
    let mut state = AggregationState::new();

    state
        .ingest_reader(reader, options.on_invalid_url)
        .with_context(|| format!("scanning links from {}", options.source))?;

    state.filter(&parse_category_list(&options.categories), &map);

    if options.grouped {
        state.group(&map);
    }

    info!(
        "{} of {} links selected",
        state.all().len(),
        state.discovered().len()
    );
    Ok(state)
}

/// Run `links list` end to end and return the rendered report.
pub fn run_links_list(options: &ListOptions) -> Result<String> {
    let reader = open_source(&options.source).context("opening input")?;
    let state = collect_links(reader, options)?;
    generate_report(&state, options.format).context("rendering report")
}

/// Run `links list` and write the report or a `✗` failure line.
///
/// Returns the process exit code: 0 on success, 1 on any failure.
pub fn execute_links_list<O: Write, E: Write>(
    options: &ListOptions,
    out: &mut O,
    err: &mut E,
) -> i32 {
    let report = match run_links_list(options) {
        Ok(report) => report,
        Err(e) => {
            let _ = writeln!(err, "{} {:#}", "✗".red().bold(), e);
            return 1;
        }
    };

    let written = match options.output {
        Some(ref path) => save_report(&report, path)
            .with_context(|| format!("writing report to {}", path.display()))
            .and_then(|_| {
                writeln!(
                    out,
                    "{} Report saved to: {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                )
                .context("writing to stdout")
            }),
        None => write!(out, "{}", report).context("writing to stdout"),
    };

    match written {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "{} {:#}", "✗".red().bold(), e);
            1
        }
    }
}

pub fn handle_links_list(source: &str, sub_matches: &ArgMatches) {
    let options = ListOptions::from_matches(source, sub_matches);
    let code = execute_links_list(&options, &mut io::stdout(), &mut io::stderr());
    if code != 0 {
        std::process::exit(code);
    }
}
