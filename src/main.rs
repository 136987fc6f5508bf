use clap::{Args as ClapArgs, Parser, Subcommand};
use leg_eff::dataset;
use leg_eff::output::{self, OutputFormat};
use leg_eff::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Score legislator effectiveness from cached LegiScan and NY Senate data
#[derive(Parser, Debug)]
#[command(name = "leg-eff")]
#[command(about = "Classify bill lifecycles and score sponsor effectiveness")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

/// Dataset selection shared by all subcommands
#[derive(ClapArgs, Debug)]
struct DatasetArgs {
    /// State abbreviation (only NY is implemented)
    #[arg(long, default_value = "NY")]
    state: String,

    /// Session year (e.g., 2023)
    #[arg(long)]
    year: u16,

    /// Directory holding the raw datasets (default: data/raw, or LEG_EFF_DATA_DIR env var)
    #[arg(long = "data-dir")]
    data_dir: Option<String>,

    /// YAML keyword vocabulary replacing the built-in one
    #[arg(long)]
    vocabulary: Option<PathBuf>,

    /// What to do with malformed rows: fail or skip
    #[arg(long = "on-malformed", default_value = "fail", value_parser = ["fail", "skip"])]
    on_malformed: String,

    /// Write output to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score every main sponsor
    Score {
        #[command(flatten)]
        input: DatasetArgs,

        /// Output format: jsonl (one sponsor per line), json (full report) or table
        #[arg(long, default_value = "jsonl", value_parser = ["jsonl", "json", "table"])]
        format: String,
    },

    /// Print per-bill classifications with their main sponsor
    Bills {
        #[command(flatten)]
        input: DatasetArgs,

        /// Output format: jsonl or json
        #[arg(long, default_value = "jsonl", value_parser = ["jsonl", "json"])]
        format: String,
    },
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  score   Score every main sponsor");
    println!("  bills   Print per-bill classifications with their main sponsor");
}

fn get_data_dir(data_dir: Option<String>) -> PathBuf {
    // Check flag first, then environment variable, then default
    if let Some(data_dir) = data_dir {
        PathBuf::from(data_dir)
    } else if let Ok(data_dir) = std::env::var("LEG_EFF_DATA_DIR") {
        PathBuf::from(data_dir)
    } else {
        PathBuf::from("data").join("raw")
    }
}

fn build_config(args: &DatasetArgs) -> anyhow::Result<Config> {
    let mut builder = ConfigBuilder::new(get_data_dir(args.data_dir.clone()))
        .state(args.state.as_str())
        .year(args.year)
        .on_malformed_str(&args.on_malformed)?;

    if let Some(path) = &args.vocabulary {
        builder = builder.vocabulary_path(path);
    }

    Ok(builder.build()?)
}

fn write_output(path: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, contents)?;
            info!(path = %path.display(), "saved output");
        }
        None => print!("{}", contents),
    }
    Ok(())
}

fn run_score_command(args: DatasetArgs, format: &str) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    let options = config.pipeline_options()?;
    let datasets = dataset::load(&config)?;

    let report = pipeline::run_datasets(&datasets, &options)?;

    let summary = &report.summary;
    if !summary.skipped.is_empty() {
        warn!(count = summary.skipped.len(), "malformed rows were skipped");
    }
    info!(
        bills = summary.bills_classified,
        attributed = summary.bills_attributed,
        unattributed = summary.unattributed.len(),
        sponsors = report.sponsors.len(),
        "scoring complete"
    );

    let contents = match OutputFormat::parse(format)? {
        OutputFormat::Json => serde_json::to_string_pretty(&report)? + "\n",
        other => output::render_sponsors(&report.sponsors, other)?,
    };
    write_output(args.output.as_deref(), &contents)
}

fn run_bills_command(args: DatasetArgs, format: &str) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    let options = config.pipeline_options()?;
    let datasets = dataset::load(&config)?;

    let classification = pipeline::classify_datasets(&datasets, &options)?;

    let contents = match OutputFormat::parse(format)? {
        OutputFormat::Json => serde_json::to_string_pretty(&classification.bills)? + "\n",
        _ => output::to_json_lines(&classification.bills)?,
    };
    write_output(args.output.as_deref(), &contents)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Some(Command::Score { input, format }) => run_score_command(input, &format),
        Some(Command::Bills { input, format }) => run_bills_command(input, &format),
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
