// src/types.rs
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Regional exchange indicator, supplied by the caller or inferred from the
/// raw symbol shape by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketHint {
    Hk,
    Jp,
    Auto,
}

impl MarketHint {
    /// Lenient parse of the `market` query parameter. Anything unrecognized
    /// falls back to `Auto` so resolution tries both regional sequences.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "hk" => MarketHint::Hk,
            "jp" => MarketHint::Jp,
            _ => MarketHint::Auto,
        }
    }
}

impl std::fmt::Display for MarketHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketHint::Hk => write!(f, "hk"),
            MarketHint::Jp => write!(f, "jp"),
            MarketHint::Auto => write!(f, "auto"),
        }
    }
}

/// The exchange a candidate format targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Hk,
    Jp,
    /// Non-regional ticker passed through unchanged (e.g. a US symbol).
    Other,
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Market::Hk => write!(f, "hk"),
            Market::Jp => write!(f, "jp"),
            Market::Other => write!(f, "other"),
        }
    }
}

/// One fully-qualified symbol format to try against the upstream, plus the
/// market it targets. Built by the normalizer, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub symbol: String,
    pub market: Market,
}

impl Candidate {
    pub fn new(symbol: impl Into<String>, market: Market) -> Self {
        Self {
            symbol: symbol.into(),
            market,
        }
    }
}

/// Normalized quote for one resolved symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub company_name: String,
    pub price: f64,
    pub currency: String,
    pub market: Market,
    /// The candidate format that actually succeeded upstream.
    pub format_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Candidates were tried and rejected; the symbol likely does not exist.
    NotFound,
    /// Every attempt died at the network layer; the upstream never answered.
    UpstreamUnavailable,
}

/// Diagnostic record returned when no candidate produced a usable quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionFailure {
    pub original_symbol: String,
    /// Every candidate format attempted, in the order it was tried.
    pub attempted: Vec<String>,
    pub error: String,
    pub kind: FailureKind,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub stocks: Vec<BatchStock>,
}

#[derive(Debug, Deserialize)]
pub struct BatchStock {
    pub symbol: String,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct BatchItemResult {
    #[serde(flatten)]
    pub quote: Quote,
    pub original_symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct BatchItemError {
    pub symbol: String,
    pub error: String,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<BatchItemResult>,
    pub errors: Vec<BatchItemError>,
    pub total: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub timestamp: i64,
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
