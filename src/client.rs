// src/client.rs
use crate::config::Config;
use crate::error::QuoteError;
use crate::resolve::QuoteFetcher;
use crate::types::{Candidate, Quote, now_millis};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;

/// Quote lookups against the Yahoo Finance chart endpoint. One GET per
/// candidate; all HTTP-level trouble is reported as a transient error so the
/// resolution loop can move on to the next format.
pub struct YahooChartClient {
    base_url: String,
    client: Client,
    /// Read-only display-name fallbacks keyed by candidate symbol, applied
    /// when the upstream omits a company name.
    name_overrides: HashMap<String, String>,
}

impl YahooChartClient {
    pub fn new(config: &Config) -> Result<Self, QuoteError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
            client,
            name_overrides: config.name_overrides.clone(),
        })
    }

    fn chart_url(&self, candidate: &Candidate) -> String {
        // Prefixed formats like TYO:7203 need the colon percent-encoded.
        format!(
            "{}/v8/finance/chart/{}",
            self.base_url,
            urlencoding::encode(&candidate.symbol)
        )
    }
}

#[async_trait]
impl QuoteFetcher for YahooChartClient {
    async fn fetch(&self, candidate: &Candidate) -> Result<Option<Quote>, QuoteError> {
        let url = self.chart_url(candidate);
        let response = self.client.get(&url).send().await.map_err(|e| {
            QuoteError::network(format!("request failed for {}: {}", candidate.symbol, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::transient(format!(
                "{} returned {}",
                candidate.symbol, status
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            QuoteError::transient(format!(
                "malformed response for {}: {}",
                candidate.symbol, e
            ))
        })?;

        let meta = match body
            .get("chart")
            .and_then(|c| c.get("result"))
            .and_then(|r| r.get(0))
            .and_then(|r| r.get("meta"))
        {
            Some(meta) => meta,
            None => return Ok(None),
        };

        let name = meta
            .get("longName")
            .and_then(Value::as_str)
            .or_else(|| meta.get("shortName").and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| self.name_overrides.get(&candidate.symbol).cloned());
        let price = meta.get("regularMarketPrice").and_then(Value::as_f64);

        let (name, price) = match (name, price) {
            (Some(name), Some(price)) if !name.trim().is_empty() => (name, price),
            _ => return Ok(None),
        };

        let currency = meta
            .get("currency")
            .and_then(Value::as_str)
            .unwrap_or("USD")
            .to_string();
        let previous_close = meta
            .get("previousClose")
            .and_then(Value::as_f64)
            .or_else(|| meta.get("chartPreviousClose").and_then(Value::as_f64));
        let change = previous_close.map(|prev| price - prev);
        let change_percent = previous_close.and_then(|prev| {
            if prev != 0.0 {
                Some((price - prev) / prev * 100.0)
            } else {
                None
            }
        });

        Ok(Some(Quote {
            symbol: candidate.symbol.clone(),
            company_name: name,
            price,
            currency,
            market: candidate.market,
            format_used: candidate.symbol.clone(),
            previous_close,
            change,
            change_percent,
            timestamp: now_millis(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Market;

    fn test_client(overrides: &[(&str, &str)]) -> YahooChartClient {
        let mut config = Config {
            upstream_base_url: "https://query1.finance.yahoo.com/".to_string(),
            timeout: std::time::Duration::from_secs(10),
            candidate_delay: std::time::Duration::ZERO,
            port: 0,
            name_overrides: HashMap::new(),
        };
        for (symbol, name) in overrides {
            config
                .name_overrides
                .insert((*symbol).to_string(), (*name).to_string());
        }
        YahooChartClient::new(&config).unwrap()
    }

    #[test]
    fn chart_url_encodes_prefixed_formats() {
        let client = test_client(&[]);
        let url = client.chart_url(&Candidate::new("TYO:7203", Market::Jp));
        assert_eq!(
            url,
            "https://query1.finance.yahoo.com/v8/finance/chart/TYO%3A7203"
        );
    }

    #[test]
    fn chart_url_trims_trailing_slash_from_base() {
        let client = test_client(&[]);
        let url = client.chart_url(&Candidate::new("0700.HK", Market::Hk));
        assert_eq!(
            url,
            "https://query1.finance.yahoo.com/v8/finance/chart/0700.HK"
        );
    }
}
