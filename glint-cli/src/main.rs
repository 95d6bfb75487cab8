//! Command-line interface for glint
//! Measures Groovy sources: code and comment lines, highlighting and copy/paste tokens, with
//! optional external complexity results and surefire test reports folded in.
//!
//! Usage:
//!   glint [`<path>`...] [--config `<file>`] [--format summary|json|yaml]
//!   glint src --include-headers --complexity `<results.json>` --surefire `<reports dir>`

mod discovery;
mod output;

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use discovery::SourceDiscovery;
use glint_config::{ConfigError, GlintConfig, Loader};
use glint_engine::complexity::publish_complexity;
use glint_engine::{Batch, ClassResults, ReportCollector};
use glint_surefire::{ReportError, UnitTestIndex};
use output::{render, OutputError, OutputFormat, RunReport};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Project-local configuration picked up from the working directory when present.
const LOCAL_CONFIG: &str = "glint.toml";

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid test pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid complexity results in {path}: {source}")]
    Complexity {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot read test reports: {0}")]
    Reports(#[from] ReportError),
    #[error("cannot start worker runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error(transparent)]
    Output(#[from] OutputError),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = command().get_matches();
    match run(&matches) {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn command() -> Command {
    Command::new("glint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Line metrics, highlighting and copy/paste tokens for Groovy sources")
        .arg(
            Arg::new("paths")
                .help("Files or directories to analyze (default: current directory)")
                .num_args(1..)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(PossibleValuesParser::new(OutputFormat::NAMES))
                .default_value("summary"),
        )
        .arg(
            Arg::new("include-headers")
                .long("include-headers")
                .help("Count comments that start on the first line of a file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("encoding")
                .long("encoding")
                .help("Source encoding (utf-8, utf-16le, utf-16be, iso-8859-1)"),
        )
        .arg(
            Arg::new("workers")
                .long("workers")
                .help("Number of files analyzed at once")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("deadline")
                .long("deadline")
                .help("Give up on unfinished files after this many seconds")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("complexity")
                .long("complexity")
                .help("JSON file of external complexity results, keyed by file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("surefire")
                .long("surefire")
                .help("Directory of TEST-*.xml test reports")
                .value_parser(value_parser!(PathBuf)),
        )
}

fn run(matches: &ArgMatches) -> Result<String, CliError> {
    let config = load_config(matches)?;
    let discovery = SourceDiscovery::new(&config.sources, config.encoding())?;
    let roots: Vec<PathBuf> = matches
        .get_many::<PathBuf>("paths")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_else(|| vec![PathBuf::from(".")]);
    let files = discovery.discover(&roots);
    info!(files = files.len(), "discovered sources");

    let mut batch = Batch::new(config.engine_settings()).with_deadline(config.deadline());
    if let Some(workers) = config.workers() {
        batch = batch.with_workers(workers);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let mut collector = ReportCollector::new();
    let summary = runtime.block_on(batch.run(files, &mut collector));

    if let Some(path) = matches.get_one::<PathBuf>("complexity") {
        publish_complexity(&load_complexity(path)?, &mut collector);
    }

    let tests = config
        .reports_path()
        .map(UnitTestIndex::from_dir)
        .transpose()?;

    let format = matches
        .get_one::<String>("format")
        .and_then(|name| OutputFormat::from_name(name))
        .unwrap_or(OutputFormat::Summary);
    let report = RunReport {
        summary,
        files: collector,
        tests,
    };
    Ok(render(&report, format)?)
}

/// Defaults, then `glint.toml`, then `--config`, then individual flags.
fn load_config(matches: &ArgMatches) -> Result<GlintConfig, ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("include-headers") {
        loader = loader.set_override("metrics.ignore_header_comments", false)?;
    }
    if let Some(encoding) = matches.get_one::<String>("encoding") {
        loader = loader.set_override("sources.encoding", encoding.as_str())?;
    }
    if let Some(workers) = matches.get_one::<u32>("workers") {
        loader = loader.set_override("batch.workers", i64::from(*workers))?;
    }
    if let Some(deadline) = matches.get_one::<u32>("deadline") {
        loader = loader.set_override("batch.deadline_secs", i64::from(*deadline))?;
    }
    if let Some(reports) = matches.get_one::<PathBuf>("surefire") {
        let reports = reports.to_string_lossy().into_owned();
        loader = loader.set_override("surefire.reports_path", reports)?;
    }
    loader.build()
}

fn load_complexity(path: &Path) -> Result<BTreeMap<String, Vec<ClassResults>>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::Complexity {
        path: path.to_path_buf(),
        source,
    })
}
