//! mongo-lookup command line
//!
//! Reads a lookup as JSON (`{"filter": [...], "sort": [...]}`) from a file
//! or stdin and prints the MongoDB filter document and sort specification it
//! translates to, as relaxed extended JSON.

use std::io::Read;
use std::path::{Path, PathBuf};

use bson::{Bson, Document};
use clap::Parser;
use mongo_lookup::{LookupSpec, MongoLookup};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info};

mod config;
mod logging;

use config::{Config, OutputConfig};

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read lookup: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid lookup JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Translate(#[from] mongo_lookup::TranslateError),
}

/// Translate a storage-agnostic lookup into a MongoDB query.
#[derive(Parser)]
#[command(name = "mongo-lookup")]
#[command(version)]
struct Cli {
    /// Lookup JSON file; reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// YAML configuration file.
    #[arg(short, long, env = "MONGO_LOOKUP_CONFIG")]
    config: Option<PathBuf>,

    /// Emit the sort as a `{path: 1 | -1}` document.
    #[arg(long)]
    sort_document: bool,

    /// Single-line JSON output.
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.sort_document {
        config.output.sort_document = true;
    }
    if cli.compact {
        config.output.pretty = false;
    }

    logging::init(&config.logging);

    let output = run(cli.input.as_deref(), &config.output)?;
    println!("{}", output);

    Ok(())
}

fn run(input: Option<&Path>, output: &OutputConfig) -> Result<String, CliError> {
    let raw = read_input(input)?;
    let lookup: LookupSpec = serde_json::from_str(&raw)?;
    debug!(
        expressions = lookup.filter.len(),
        sort_keys = lookup.sort.len(),
        "parsed lookup"
    );

    let translated = MongoLookup::from_lookup(&lookup)?;
    info!(filter_keys = translated.filter.len(), "translated lookup");

    render(&translated, output)
}

fn read_input(input: Option<&Path>) -> Result<String, CliError> {
    match input {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

fn render(translated: &MongoLookup, output: &OutputConfig) -> Result<String, CliError> {
    let sort = if output.sort_document {
        document_to_json(translated.sort_document())
    } else {
        json!(translated.sort)
    };

    let rendered = json!({
        "filter": document_to_json(translated.filter.clone()),
        "sort": sort,
    });

    let text = if output.pretty {
        serde_json::to_string_pretty(&rendered)?
    } else {
        serde_json::to_string(&rendered)?
    };
    Ok(text)
}

fn document_to_json(document: Document) -> serde_json::Value {
    Bson::Document(document).into_relaxed_extjson()
}
