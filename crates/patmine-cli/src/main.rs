//! Command-line interface for the patmine pattern miner.

use clap::builder::PossibleValue;
use clap::{Parser, ValueEnum};
use miette::Diagnostic;
use patmine_objects::{ObjectCode, ObjectProvider, Variant};
use patmine_search::{
    DistinctPatterns, MineEvent, MineOutcome, Miner, SearchConfig, DEFAULT_DESTINATION,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Instant;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI error with a diagnostic code for pretty printing.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(patmine::config_error))]
    Config { message: String },

    #[error("mining failed: {message}")]
    #[diagnostic(code(patmine::mine_error))]
    Mine { message: String },
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "patmine", version)]
#[command(about = "Mine minimal non-linearizable patterns of concurrent objects", long_about = None)]
struct Cli {
    /// Object to mine
    #[arg(value_enum, value_name = "OBJECT")]
    object: ObjectArg,

    /// Where to put the files
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_DESTINATION)]
    destination: PathBuf,

    /// Limit to N executions
    #[arg(short, long, value_name = "N", default_value = "10")]
    executions: usize,

    /// Limit to N operations per sequence
    #[arg(short, long, value_name = "N", default_value = "4")]
    operations: usize,

    /// Number of threads the object is sized for
    #[arg(short, long, value_name = "N", default_value = "1")]
    threads: usize,

    /// Keep only patterns that differ from every pattern already found
    #[arg(long)]
    distinct: bool,

    /// Log filter directives (overrides --verbose)
    #[arg(long, value_name = "DIRECTIVES")]
    log: Option<String>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Object code as a command-line value; help lists every code with its
/// description.
#[derive(Debug, Clone, Copy)]
struct ObjectArg(ObjectCode);

impl ValueEnum for ObjectArg {
    fn value_variants<'a>() -> &'a [Self] {
        static VARIANTS: OnceLock<[ObjectArg; 16]> = OnceLock::new();
        VARIANTS.get_or_init(|| ObjectCode::ALL.map(ObjectArg))
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.0.code()).help(self.0.description()))
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match (&cli.log, cli.verbose) {
        (Some(directives), _) => EnvFilter::new(directives),
        (None, true) => EnvFilter::new("debug"),
        (None, false) => EnvFilter::new("warn"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cmd_mine(&cli) {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}

fn cmd_mine(cli: &Cli) -> CliResult<()> {
    if cli.threads == 0 {
        return Err(CliError::Config {
            message: "thread count must be at least 1".to_string(),
        });
    }

    let config = SearchConfig {
        destination: cli.destination.clone(),
        num_executions: cli.executions,
        num_threads: cli.threads,
        operation_limit: cli.operations,
    };

    let ObjectArg(code) = cli.object;
    let variant = Variant::new(code, config.num_threads);
    info!(
        object = variant.name(),
        description = code.description(),
        spec = %variant.spec(),
        "selected object"
    );

    println!("Generating negative patterns...");
    let start = Instant::now();

    let miner = Miner::new(&variant, config);
    let miner = if cli.distinct {
        miner.with_filter(DistinctPatterns)
    } else {
        miner
    };
    let outcome = miner.run(print_event).map_err(|e| CliError::Mine {
        message: e.to_string(),
    })?;

    print_patterns(&outcome);
    info!(
        sequences = outcome.sequences,
        excluded = outcome.excluded,
        discarded = outcome.discarded,
        rejected = outcome.rejected,
        patterns = outcome.patterns.len(),
        secs = start.elapsed().as_secs_f64(),
        "done"
    );
    Ok(())
}

fn print_event(event: MineEvent<'_>) {
    match event {
        MineEvent::Excluded(h) => print!("EXCLUDED\n{}", h),
        MineEvent::Weakened(h) => print!("WEAKENED\n{}", h),
        MineEvent::Sequence(_) | MineEvent::Discarded(_) | MineEvent::Rejected(_) => {}
    }
}

fn print_patterns(outcome: &MineOutcome) {
    println!("PATTERNS");
    for pattern in &outcome.patterns {
        println!("PATTERN");
        print!("{}", pattern);
    }
}
