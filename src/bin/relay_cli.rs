// src/bin/relay_cli.rs
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::time::Duration;

use quote_relay::client::YahooChartClient;
use quote_relay::config::Config;
use quote_relay::resolve::resolve;
use quote_relay::symbols::{classify, normalize};
use quote_relay::types::MarketHint;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Quote lookup CLI for HK/JP stock symbols", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a symbol against the live upstream and print the quote
    Lookup {
        symbol: String,
        #[arg(short, long, default_value = "auto")]
        market: String,
        /// Skip the pause between candidate lookups
        #[arg(long)]
        no_delay: bool,
    },
    /// Print the inferred market for a symbol
    Classify { symbol: String },
    /// Print the candidate formats that would be tried, in order
    Candidates {
        symbol: String,
        #[arg(short, long, default_value = "auto")]
        market: String,
    },
}

fn hint_for(symbol: &str, market: &str) -> MarketHint {
    match market {
        "auto" => classify(symbol),
        other => MarketHint::parse(other),
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::from_env().expect("Missing config");

    match cli.command {
        Commands::Lookup {
            symbol,
            market,
            no_delay,
        } => {
            let hint = hint_for(&symbol, &market);
            let candidates = match normalize(&symbol, hint) {
                Ok(candidates) => candidates,
                Err(e) => {
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
            };
            let fetcher = YahooChartClient::new(&config).expect("Failed to build upstream client");
            let delay = if no_delay {
                Duration::ZERO
            } else {
                config.candidate_delay
            };
            match resolve(&symbol, &candidates, &fetcher, delay).await {
                Ok(quote) => {
                    println!("✅ {} resolved as {}", symbol, quote.format_used);
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&quote).expect("quote serializes")
                    );
                }
                Err(failure) => {
                    eprintln!("❌ {} not found ({})", symbol, failure.error);
                    eprintln!("Attempted formats: {}", failure.attempted.join(", "));
                    std::process::exit(1);
                }
            }
        }
        Commands::Classify { symbol } => {
            println!("{}", classify(&symbol));
        }
        Commands::Candidates { symbol, market } => {
            let hint = hint_for(&symbol, &market);
            match normalize(&symbol, hint) {
                Ok(candidates) => {
                    for candidate in candidates {
                        println!("{} ({})", candidate.symbol, candidate.market);
                    }
                }
                Err(e) => {
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
