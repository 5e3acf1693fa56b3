use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use jobtrakr_client::{DefaultJobExtractor, build_extractor};
use jobtrakr_core::FetchConfig;
use jobtrakr_core::extract::extract_from_url;
use jobtrakr_core::models::JobExtraction;

#[derive(Parser)]
#[command(name = "jobtrakr", version, about = "Extract structured details from job postings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract title, company, employment type, and experience level from a posting
    Extract {
        /// Job posting URL
        #[arg(short, long)]
        url: String,

        #[command(flatten)]
        fetch: FetchArgs,

        /// Print single-line JSON
        #[arg(long, default_value_t = false)]
        compact: bool,
    },

    /// Extract every URL in a file (one per line), printing JSON lines
    Batch {
        /// File of posting URLs; blank lines and lines starting with '#' are skipped
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Show what can be recovered from the URL alone, without fetching
    Slug {
        /// Job posting URL
        #[arg(short, long)]
        url: String,
    },
}

/// Overrides for the environment-derived fetch configuration.
#[derive(Args)]
struct FetchArgs {
    /// Per-attempt request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Total fetch attempts (timeouts only are retried)
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Delay before the first retry in seconds, doubled for each retry after
    #[arg(long)]
    backoff: Option<u64>,
}

impl FetchArgs {
    fn resolve(&self) -> Result<FetchConfig> {
        let mut config = FetchConfig::from_env().context("Invalid fetch configuration")?;
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(attempts) = self.max_attempts {
            config = config.with_max_attempts(attempts);
        }
        if let Some(secs) = self.backoff {
            config = config.with_initial_backoff(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

/// One line of `batch` output.
#[derive(Serialize)]
struct BatchLine<'a> {
    url: &'a str,
    #[serde(flatten)]
    record: &'a JobExtraction,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("jobtrakr=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            url,
            fetch,
            compact,
        } => {
            let extractor = new_extractor(&fetch)?;
            let record = extractor.extract_job(&url).await;
            print_record(&record, compact)?;
        }
        Commands::Batch { file, fetch } => {
            let extractor = new_extractor(&fetch)?;
            cmd_batch(&file, &extractor).await?;
        }
        Commands::Slug { url } => {
            print_record(&extract_from_url(&url), false)?;
        }
    }

    Ok(())
}

fn new_extractor(args: &FetchArgs) -> Result<DefaultJobExtractor> {
    let config = args.resolve()?;
    tracing::debug!(?config, "Fetch configuration");
    build_extractor(&config).context("Failed to create extraction pipeline")
}

fn print_record(record: &JobExtraction, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(record)?
    } else {
        serde_json::to_string_pretty(record)?
    };
    println!("{json}");
    Ok(())
}

async fn cmd_batch(path: &Path, extractor: &DefaultJobExtractor) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL file: {}", path.display()))?;

    let urls: Vec<&str> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    tracing::info!("Extracting {} URLs", urls.len());

    for url in urls {
        let record = extractor.extract_job(url).await;
        let line = BatchLine {
            url,
            record: &record,
        };
        println!("{}", serde_json::to_string(&line)?);
    }

    Ok(())
}
