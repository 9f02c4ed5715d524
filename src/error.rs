// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("invalid stock symbol: {0}")]
    InvalidSymbol(String),

    #[error("{message}")]
    Transient { message: String, network: bool },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuoteError {
    /// A per-candidate failure where the upstream answered but had nothing
    /// usable (non-200, malformed body, no quote data).
    pub fn transient(message: impl Into<String>) -> Self {
        QuoteError::Transient {
            message: message.into(),
            network: false,
        }
    }

    /// A per-candidate failure at the network layer (connect, timeout).
    pub fn network(message: impl Into<String>) -> Self {
        QuoteError::Transient {
            message: message.into(),
            network: true,
        }
    }

    /// Whether the failure never reached the upstream's application layer.
    /// Drives the not-found vs upstream-unavailable distinction on exhaustion.
    pub fn is_network(&self) -> bool {
        match self {
            QuoteError::Transient { network, .. } => *network,
            QuoteError::Request(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
