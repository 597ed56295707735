//! Study eligibility command-line interface

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use study_eligibility::cli::output::{self, ColorMode, OutputFormat};
use study_eligibility::cli::{catalog, check, validate};
use tracing_subscriber::EnvFilter;

/// Study eligibility tool
#[derive(Parser)]
#[command(name = "eligibility")]
#[command(author, version, about = "Check research-study eligibility criteria", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Pretty, global = true)]
    format: OutputFormat,

    /// Color output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile criteria expressions and report errors
    Validate {
        /// Expressions to validate
        expressions: Vec<String>,
    },

    /// Assess a child against a study
    Check {
        /// Study document (JSON)
        #[arg(short, long)]
        study: PathBuf,

        /// Child document (JSON)
        #[arg(short, long)]
        child: PathBuf,

        /// Participation records (JSON array)
        #[arg(short, long)]
        responses: Option<PathBuf>,

        /// Date ages are computed on (YYYY-MM-DD)
        #[arg(short, long)]
        today: Option<NaiveDate>,
    },

    /// List known conditions, languages, fields and literals
    Catalog,
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    output::setup_colors(cli.color);

    let result = match cli.command {
        Commands::Validate { expressions } => validate::validate(validate::ValidateConfig {
            expressions,
            format: cli.format,
        }),

        Commands::Check {
            study,
            child,
            responses,
            today,
        } => check::check(check::CheckConfig {
            study,
            child,
            responses,
            today,
            format: cli.format,
        }),

        Commands::Catalog => catalog::catalog(cli.format),
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
