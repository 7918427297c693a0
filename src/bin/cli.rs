//! feedcheck CLI
//!
//! Local entry point for the validation and phone-check operations. Feed
//! sources may be HTTP(S) URLs or local paths.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use price_placements::{
    error::Result,
    fetch::SourceFetcher,
    models::{
        CheckRequest, CheckResponse, Config, FeedUrls, Provider, ValidateFeedAllRequest,
        ValidateFeedAllResponse, ValidateFeedRequest, ValidateFeedResponse,
    },
    services::FeedService,
};
use serde::Serialize;

/// feedcheck - real-estate feed validator
#[derive(Parser, Debug)]
#[command(
    name = "feedcheck",
    version,
    about = "Validates real-estate classifieds feeds and extracts phone-check lots"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print responses as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// One optional source per provider.
#[derive(Args, Debug)]
struct Sources {
    #[arg(long)]
    realty: Option<String>,
    #[arg(long)]
    cian: Option<String>,
    #[arg(long)]
    avito: Option<String>,
    #[arg(long)]
    domclick: Option<String>,
}

impl From<Sources> for FeedUrls {
    fn from(sources: Sources) -> Self {
        Self {
            realty: sources.realty,
            cian: sources.cian,
            avito: sources.avito,
            domclick: sources.domclick,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a single feed
    Validate {
        /// realty, cian, avito or domclick
        provider: Provider,
        /// Feed URL or path
        source: String,
    },

    /// Validate several feeds concurrently
    ValidateAll {
        #[command(flatten)]
        sources: Sources,
    },

    /// Extract phone-check lots from a single feed
    CheckPhones {
        provider: Provider,
        source: String,
    },

    /// Extract phone-check lots from several feeds
    CheckPhonesAll {
        #[command(flatten)]
        sources: Sources,
    },

    /// Validate the configuration file
    CheckConfig,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_validation(response: &ValidateFeedResponse) {
    let modified = response
        .last_modified
        .map(|time| time.to_rfc3339())
        .unwrap_or_else(|| "unknown".to_string());
    println!(
        "{} {} (last modified: {}): {} findings",
        response.provider,
        response.url,
        modified,
        response.errors.len()
    );
    for error in &response.errors {
        println!("  {error}");
    }
}

fn print_reports(response: &ValidateFeedAllResponse) {
    for report in &response.reports {
        match &report.failure {
            Some(failure) => println!("{} {}: FAILED: {failure}", report.provider, report.url),
            None => {
                println!("{} {}: {} findings", report.provider, report.url, report.errors.len());
                for error in &report.errors {
                    println!("  {error}");
                }
            }
        }
    }
}

fn print_lots(response: &CheckResponse) {
    for lot in &response.lots {
        println!("{}\t{}\t{}", lot.id, lot.phone, lot.object);
    }
    log::info!("{} lots", response.lots.len());
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    if let Command::CheckConfig = cli.command {
        log::info!("Validating configuration...");
        if let Err(e) = config.validate() {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
        log::info!("Config OK");
        return Ok(());
    }

    let service = FeedService::new(SourceFetcher::new(&config.fetch)?, &config);

    match cli.command {
        Command::Validate { provider, source } => {
            let response = service
                .validate_feed(&ValidateFeedRequest {
                    provider,
                    url: source,
                })
                .await?;
            if cli.json {
                print_json(&response)?;
            } else {
                print_validation(&response);
            }
        }

        Command::ValidateAll { sources } => {
            let request = ValidateFeedAllRequest {
                urls: sources.into(),
            };
            let response = service.validate_feed_all(&request).await?;
            if cli.json {
                print_json(&response)?;
            } else {
                print_reports(&response);
            }
        }

        Command::CheckPhones { provider, source } => {
            let request = CheckRequest {
                urls: FeedUrls::default().with(provider, source),
            };
            let response = match provider {
                Provider::Realty => service.check_phones_realty(&request).await?,
                Provider::Cian => service.check_phones_cian(&request).await?,
                Provider::Avito => service.check_phones_avito(&request).await?,
                Provider::Domclick => service.check_phones_domclick(&request).await?,
            };
            if cli.json {
                print_json(&response)?;
            } else {
                print_lots(&response);
            }
        }

        Command::CheckPhonesAll { sources } => {
            let request = CheckRequest {
                urls: sources.into(),
            };
            let response = service.check_phones_all(&request).await?;
            if cli.json {
                print_json(&response)?;
            } else {
                print_lots(&response);
            }
        }

        Command::CheckConfig => {}
    }

    Ok(())
}
