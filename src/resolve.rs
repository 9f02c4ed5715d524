// src/resolve.rs
use crate::error::QuoteError;
use crate::types::{Candidate, FailureKind, Quote, ResolutionFailure};
use async_trait::async_trait;
use std::time::Duration;

/// One upstream lookup for a single candidate format.
///
/// `Ok(None)` means the upstream answered but had no usable quote for this
/// candidate; `Err` is a per-candidate transient failure. Both advance the
/// resolution loop to the next candidate.
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    async fn fetch(&self, candidate: &Candidate) -> Result<Option<Quote>, QuoteError>;
}

/// Tries candidates in order and accepts the first usable quote, stopping
/// immediately so later candidates cost no upstream calls. Per-candidate
/// failures are recorded and skipped; exhaustion yields a `ResolutionFailure`
/// carrying the full attempted list and the last error. No candidate is ever
/// retried. `delay` spaces consecutive lookups to respect upstream rate
/// limits; zero disables it.
pub async fn resolve(
    original: &str,
    candidates: &[Candidate],
    fetcher: &dyn QuoteFetcher,
    delay: Duration,
) -> Result<Quote, ResolutionFailure> {
    let mut last_error: Option<QuoteError> = None;
    let mut saw_logical_failure = false;

    for (i, candidate) in candidates.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match fetcher.fetch(candidate).await {
            Ok(Some(quote)) if is_usable(&quote) => {
                let mut quote = quote;
                quote.format_used = candidate.symbol.clone();
                quote.market = candidate.market;
                log::info!(
                    "resolved {} via {} ({} of {} formats)",
                    original,
                    candidate.symbol,
                    i + 1,
                    candidates.len()
                );
                return Ok(quote);
            }
            Ok(_) => {
                log::debug!("no usable quote for {}", candidate.symbol);
                saw_logical_failure = true;
                last_error = Some(QuoteError::transient(format!(
                    "no quote data for {}",
                    candidate.symbol
                )));
            }
            Err(e) => {
                log::warn!("lookup failed for {}: {}", candidate.symbol, e);
                if !e.is_network() {
                    saw_logical_failure = true;
                }
                last_error = Some(e);
            }
        }
    }

    // Only a run of pure network failures counts as the upstream being down.
    let kind = if last_error.is_some() && !saw_logical_failure && !candidates.is_empty() {
        FailureKind::UpstreamUnavailable
    } else {
        FailureKind::NotFound
    };

    Err(ResolutionFailure {
        original_symbol: original.to_string(),
        attempted: candidates.iter().map(|c| c.symbol.clone()).collect(),
        error: last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no candidate formats to try".to_string()),
        kind,
    })
}

/// A quote is usable once it identifies the instrument and carries a price.
fn is_usable(quote: &Quote) -> bool {
    let identified = !quote.company_name.trim().is_empty() || !quote.symbol.trim().is_empty();
    identified && quote.price.is_finite()
}
