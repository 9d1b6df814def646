//! ATTREX CLI - Command-line interface
//!
//! Usage:
//!   attrex extract <name>
//!   attrex run --input <records.jsonl> --output <attributes.jsonl>
//!   attrex vocabulary [--category <category>] [--summary]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use attrex_core::{AppConfig, Category, ConfigError, LoggingConfig, PipelineConfig};
use attrex_extractor::dataset::{
    append_jsonl, new_entries, process_records, read_jsonl, read_previous,
};
use attrex_extractor::{AttributeExtractor, MultilingualExtractor, Vocabulary};

#[derive(Parser)]
#[command(name = "attrex")]
#[command(about = "Multilingual product attribute extraction")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract attributes from a single product name
    Extract {
        /// Product name
        name: String,
    },
    /// Enrich a JSON Lines dataset and append rows not seen before
    Run {
        /// Input records
        #[arg(long)]
        input: Option<PathBuf>,
        /// File new entries are appended to
        #[arg(long)]
        output: Option<PathBuf>,
        /// Previous results to diff against (defaults to the output file)
        #[arg(long)]
        previous: Option<PathBuf>,
        /// Extract on a single thread
        #[arg(long)]
        sequential: bool,
    },
    /// List the extraction vocabulary
    Vocabulary {
        /// Only list this category
        #[arg(long)]
        category: Option<Category>,
        /// Print languages and token counts per category instead of entries
        #[arg(long)]
        summary: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    init_tracing(&config.logging);

    match cli.command {
        Commands::Extract { name } => {
            let extractor = MultilingualExtractor::from_config(&config.extraction)?;
            let record = extractor.extract(&name)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Run {
            input,
            output,
            previous,
            sequential,
        } => {
            let mut pipeline = config.pipeline.clone();
            pipeline.input = input.or(pipeline.input);
            pipeline.output = output.or(pipeline.output);
            pipeline.previous = previous.or(pipeline.previous);
            pipeline.parallel &= !sequential;

            let extractor = MultilingualExtractor::from_config(&config.extraction)?;
            run_pipeline(&extractor, &pipeline)?;
        }
        Commands::Vocabulary { category, summary } => {
            let vocabulary =
                Vocabulary::with_entries(config.extraction.extra_vocabulary.iter().cloned());

            if summary {
                for line in summarize(&vocabulary, category) {
                    println!("{line}");
                }
                return Ok(());
            }

            for entry in vocabulary
                .entries()
                .iter()
                .filter(|e| category.map_or(true, |c| e.category == c))
            {
                println!("{}\t{}\t{}", entry.category, entry.language, entry.token);
            }
        }
    }

    Ok(())
}

/// One `category, languages, token count` line per category
fn summarize(vocabulary: &Vocabulary, only: Option<Category>) -> Vec<String> {
    Category::ALL
        .into_iter()
        .filter(|c| only.map_or(true, |o| o == *c))
        .map(|category| {
            let languages: Vec<&str> = vocabulary
                .languages(category)
                .iter()
                .map(|l| l.code())
                .collect();
            format!(
                "{category}\t{}\t{} tokens",
                languages.join(","),
                vocabulary.tokens(category).len()
            )
        })
        .collect()
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location)
        .with_writer(std::io::stderr);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load, enrich, diff and append; returns the number of rows written
fn run_pipeline<E>(extractor: &E, pipeline: &PipelineConfig) -> anyhow::Result<usize>
where
    E: AttributeExtractor + ?Sized,
{
    let input = required(&pipeline.input, "input")?;
    let output = required(&pipeline.output, "output")?;
    let previous = pipeline.previous.as_deref().unwrap_or(output);

    let records = read_jsonl(input)?;
    tracing::info!("Loaded {} records from {}", records.len(), input.display());

    let rows = process_records(extractor, &records, pipeline);
    let fresh = new_entries(rows, &read_previous(previous)?)?;
    tracing::info!("Found {} new entries.", fresh.len());

    if fresh.is_empty() {
        return Ok(0);
    }

    let written = append_jsonl(output, &fresh)?;
    tracing::info!("Data saved to {}", output.display());
    Ok(written)
}

fn required<'a>(path: &'a Option<PathBuf>, key: &str) -> Result<&'a Path, ConfigError> {
    path.as_deref()
        .ok_or_else(|| ConfigError::MissingRequired(key.to_string()))
}
