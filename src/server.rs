// src/server.rs
use actix_web::{web, HttpResponse, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::client::YahooChartClient;
use crate::config::Config;
use crate::error::QuoteError;
use crate::resolve::{resolve, QuoteFetcher};
use crate::symbols::{classify, normalize};
use crate::types::{
    BatchItemError, BatchItemResult, BatchRequest, BatchResponse, FailureKind, MarketHint,
    now_millis,
};

const ALLOW_ORIGIN: (&str, &str) = ("Access-Control-Allow-Origin", "*");

pub struct AppState {
    pub config: Config,
    pub session_id: Uuid,
    pub fetcher: Arc<dyn QuoteFetcher>,
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, QuoteError> {
        let fetcher = Arc::new(YahooChartClient::new(&config)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Builds state around an externally supplied fetcher. Used by tests to
    /// script the upstream.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn QuoteFetcher>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            config,
            fetcher,
            start_time: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub symbol: Option<String>,
    pub market: Option<String>,
}

/// GET /api/stock-info?symbol=700&market=hk
pub async fn stock_info(
    query: web::Query<StockQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let symbol = match query
        .symbol
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(s) => s,
        None => return Ok(bad_request("missing 'symbol' parameter")),
    };

    let hint = match query.market.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => MarketHint::parse(m),
        _ => classify(symbol),
    };
    log::info!("stock info lookup: {} (market: {})", symbol, hint);

    let candidates = match normalize(symbol, hint) {
        Ok(candidates) => candidates,
        Err(e) => return Ok(bad_request(&e.to_string())),
    };

    match resolve(
        symbol,
        &candidates,
        state.fetcher.as_ref(),
        state.config.candidate_delay,
    )
    .await
    {
        Ok(quote) => {
            log::info!("resolved {} as {} ({})", symbol, quote.format_used, quote.company_name);
            Ok(HttpResponse::Ok().insert_header(ALLOW_ORIGIN).json(quote))
        }
        Err(failure) => {
            log::warn!("resolution failed for {}: {}", symbol, failure.error);
            let mut response = match failure.kind {
                FailureKind::UpstreamUnavailable => HttpResponse::BadGateway(),
                FailureKind::NotFound => HttpResponse::NotFound(),
            };
            Ok(response.insert_header(ALLOW_ORIGIN).json(failure))
        }
    }
}

/// POST /api/batch-update with `{ "stocks": [{ "symbol": "...", ... }] }`.
/// Items are looked up sequentially; per-item failures land in `errors` and
/// never abort the batch.
pub async fn batch_update(
    payload: web::Json<BatchRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let stocks = &payload.stocks;
    log::info!("batch update for {} stocks", stocks.len());

    let mut results = Vec::new();
    let mut errors = Vec::new();

    for stock in stocks {
        let symbol = stock.symbol.trim();
        if symbol.is_empty() {
            errors.push(BatchItemError {
                symbol: "unknown".to_string(),
                error: "missing stock symbol".to_string(),
                success: false,
            });
            continue;
        }

        let hint = match stock.market.as_deref().map(str::trim) {
            Some(m) if !m.is_empty() => MarketHint::parse(m),
            _ => classify(symbol),
        };
        let candidates = match normalize(symbol, hint) {
            Ok(candidates) => candidates,
            Err(e) => {
                errors.push(BatchItemError {
                    symbol: symbol.to_string(),
                    error: e.to_string(),
                    success: false,
                });
                continue;
            }
        };

        match resolve(
            symbol,
            &candidates,
            state.fetcher.as_ref(),
            state.config.candidate_delay,
        )
        .await
        {
            Ok(quote) => results.push(BatchItemResult {
                quote,
                original_symbol: symbol.to_string(),
                id: stock.id.clone(),
                success: true,
            }),
            Err(failure) => {
                log::warn!("batch item failed for {}: {}", symbol, failure.error);
                errors.push(BatchItemError {
                    symbol: symbol.to_string(),
                    error: failure.error,
                    success: false,
                });
            }
        }
    }

    let response = BatchResponse {
        total: stocks.len(),
        success_count: results.len(),
        error_count: errors.len(),
        results,
        errors,
        timestamp: now_millis(),
    };
    log::info!(
        "batch update done: {}/{} succeeded",
        response.success_count,
        response.total
    );
    Ok(HttpResponse::Ok().insert_header(ALLOW_ORIGIN).json(response))
}

pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .insert_header(ALLOW_ORIGIN)
        .json(serde_json::json!({
            "status": "healthy",
            "service": "quote-relay",
            "session_id": state.session_id,
            "uptime_seconds": (Utc::now() - state.start_time).num_seconds(),
            "version": env!("CARGO_PKG_VERSION"),
        })))
}

/// Default service: answers CORS preflight and anything unrouted.
pub async fn cors_handler() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(ALLOW_ORIGIN)
        .insert_header(("Access-Control-Allow-Methods", "POST, GET, OPTIONS"))
        .insert_header(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
        .finish()
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest()
        .insert_header(ALLOW_ORIGIN)
        .json(serde_json::json!({ "error": message }))
}
