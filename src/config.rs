// src/config.rs
use anyhow::Result;
use std::collections::HashMap;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream quote source.
    pub upstream_base_url: String,
    /// Per-candidate request timeout.
    pub timeout: Duration,
    /// Fixed pause between consecutive candidate lookups, to stay under the
    /// upstream's rate limits. Zero disables the pause.
    pub candidate_delay: Duration,
    pub port: u16,
    /// Read-only display-name overrides keyed by candidate symbol, used when
    /// the upstream omits a company name.
    pub name_overrides: HashMap<String, String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .unwrap_or_else(|_| "https://query1.finance.yahoo.com".to_string()),
            timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
            ),
            candidate_delay: Duration::from_millis(
                env::var("CANDIDATE_DELAY_MS")
                    .unwrap_or_else(|_| "100".to_string())
                    .parse()
                    .unwrap_or(100),
            ),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            name_overrides: parse_name_overrides(
                &env::var("NAME_OVERRIDES").unwrap_or_default(),
            ),
        })
    }
}

/// Parses `NAME_OVERRIDES` of the form `0700.HK=Tencent,7203.T=Toyota`.
/// Malformed pairs are skipped.
fn parse_name_overrides(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter_map(|pair| {
            let (symbol, name) = pair.split_once('=')?;
            let symbol = symbol.trim();
            let name = name.trim();
            if symbol.is_empty() || name.is_empty() {
                return None;
            }
            Some((symbol.to_uppercase(), name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_override_pairs() {
        let map = parse_name_overrides("0700.HK=Tencent Holdings, 7203.t = Toyota Motor");
        assert_eq!(map.get("0700.HK").map(String::as_str), Some("Tencent Holdings"));
        assert_eq!(map.get("7203.T").map(String::as_str), Some("Toyota Motor"));
    }

    #[test]
    fn skips_malformed_pairs() {
        let map = parse_name_overrides("=nameless,orphan,0005.HK=HSBC");
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("0005.HK"));
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(parse_name_overrides("").is_empty());
    }
}
