// src/lib.rs
pub mod client;
pub mod config;
pub mod error;
pub mod resolve;
pub mod server;
pub mod symbols;
pub mod types;

// Optional re-exports
pub use client::YahooChartClient;
pub use config::Config;
pub use error::QuoteError;
pub use resolve::{resolve, QuoteFetcher};
pub use server::AppState;
pub use symbols::{classify, normalize};
pub use types::{Candidate, Market, MarketHint, Quote, ResolutionFailure};
