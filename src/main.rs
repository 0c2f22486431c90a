use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use devxplore::classifier::Classifier;
use devxplore::config::{self, CONFIG};
use devxplore::data_models::ClassificationResult;
use devxplore::provider::{ProviderResponse, ProviderStatus};
use devxplore::rules::RuleSet;

#[derive(Parser)]
#[command(name = "devxplore", about = "Sort search results into DevXplore tabs")]
struct Cli {
    /// JSON file with an ordered array of category rules (defaults to the built-in tabs)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a saved provider response and print the tabs as JSON
    Classify {
        results: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
    /// Print every item's score in every category
    Score { results: PathBuf },
    /// Print the effective rule set
    Rules,
}

/// Serialized directly rather than through `serde_json::Value` so the tabs
/// keep their evaluation order.
#[derive(Serialize)]
struct ClassifyOutput<'a> {
    status: ProviderStatus,
    results: ClassificationResult<'a>,
}

fn load_rules(cli_path: Option<&Path>) -> anyhow::Result<RuleSet> {
    let path = cli_path
        .map(Path::to_path_buf)
        .or_else(|| CONFIG.rules_path.as_ref().map(PathBuf::from));
    match path {
        Some(path) => RuleSet::load(&path)
            .with_context(|| format!("failed to load rules from {}", path.display())),
        None => Ok(RuleSet::default()),
    }
}

fn load_response(path: &Path) -> anyhow::Result<ProviderResponse> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    ProviderResponse::from_json_str(&raw)
        .with_context(|| format!("failed to decode provider response {}", path.display()))
}

fn parse_log_level(raw: &str) -> Option<tracing::Level> {
    tracing::Level::from_str(raw.trim()).ok()
}

fn main() -> anyhow::Result<()> {
    // CONFIG must not be touched before the subscriber is installed
    let raw_level = config::log_level_from_env();
    let level = parse_log_level(&raw_level);
    tracing_subscriber::fmt()
        .with_max_level(level.unwrap_or(tracing::Level::INFO))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    if level.is_none() {
        tracing::warn!(
            "ignoring unparseable {}={raw_level:?}, using info",
            config::LOG_LEVEL_KEY
        );
    }

    let cli = Cli::parse();
    let rules = load_rules(cli.rules.as_deref())?;
    let classifier = Classifier::new(rules)
        .with_min_score(CONFIG.min_score)
        .with_fuzzy_cutoff(CONFIG.fuzzy_cutoff);

    match cli.command {
        Command::Classify { results, pretty } => {
            let response = load_response(&results)?;
            let classified = classifier.classify(&response.items);
            tracing::info!(
                items = response.items.len(),
                categories = classifier.rules().len(),
                "classified search results"
            );
            let output = ClassifyOutput {
                status: response.status,
                results: classified,
            };
            let rendered = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{rendered}");
        }
        Command::Score { results } => {
            let response = load_response(&results)?;
            let table = classifier.score_table(&response.items);
            for (item, scores) in response.items.iter().zip(table) {
                let cells = scores
                    .iter()
                    .map(|(name, score)| format!("{name}={score}"))
                    .collect::<Vec<String>>()
                    .join(" ");
                println!("{}\t{cells}", item.link);
            }
        }
        Command::Rules => {
            println!("{}", serde_json::to_string_pretty(classifier.rules().rules())?);
        }
    }

    Ok(())
}
