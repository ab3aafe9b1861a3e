use anyhow::Result;
use clap::{Parser, Subcommand};
use coin_tracker::{
    commands::{list, track},
    config::{GeckoConfig, DEFAULT_PRICE_FILE},
    context::AppContext,
};
use log::{debug, info};
use std::path::PathBuf;
use std::process::ExitCode;

const CONNECTION_FAILED_MESSAGE: &str = "Connection to the CoinGecko API is not working.";

#[derive(Parser)]
#[command(name = "coin-tracker")]
#[command(about = "Fetch CoinGecko prices and save them to CSV")]
struct Cli {
    /// Location of the cached coin catalog
    #[arg(long = "catalog-file", value_name = "PATH", global = true)]
    catalog_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the list of coins that can be tracked
    List {
        /// Download the list of coins again and overwrite the cache
        #[arg(short, long)]
        update: bool,
    },
    /// Fetch current USD prices for one or more coins
    Track {
        /// CoinGecko coin ids, for example: bitcoin ethereum solana
        #[arg(required = true, num_args = 1..)]
        coin: Vec<String>,
        /// Path to the output CSV file
        #[arg(short, long, value_name = "PATH", default_value = DEFAULT_PRICE_FILE)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let Cli {
        catalog_file,
        command,
    } = Cli::parse();

    // .env may carry RUST_LOG, so it is loaded before the logger.
    let dotenv = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => return Err(err.into()),
    }

    let config = GeckoConfig::from_env()?.with_catalog_path(catalog_file);
    let app_context = AppContext::initialize(config)?;

    if !app_context.check_connectivity().await?.is_healthy() {
        println!("{}", CONNECTION_FAILED_MESSAGE);
        return Ok(ExitCode::FAILURE);
    }

    match command {
        Commands::List { update } => {
            if let Some(listing) = list::run(&app_context, update).await? {
                println!("{}", listing);
            }
        }
        Commands::Track { coin, output } => {
            let report = track::run(&app_context, &coin, &output).await?;
            info!(
                "Tracked {} of {} requested coin(s)",
                report.table.len(),
                coin.len()
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
