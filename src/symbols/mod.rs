// src/symbols/mod.rs
pub mod classify;
pub mod normalize;

pub use classify::classify;
pub use normalize::normalize;

use crate::types::Market;

/// Exchange suffixes the normalizer and classifier recognize.
const HK_SUFFIX: &str = ".HK";
const JP_SUFFIXES: [&str; 3] = [".T", ".TO", ".JP"];
const HK_PREFIX: &str = "HK:";
const JP_PREFIXES: [&str; 2] = ["TYO:", "TSE:"];

/// Market implied by a recognized suffix, if any.
fn suffix_market(symbol: &str) -> Option<Market> {
    if symbol.ends_with(HK_SUFFIX) {
        return Some(Market::Hk);
    }
    if JP_SUFFIXES.iter().any(|s| symbol.ends_with(s)) {
        return Some(Market::Jp);
    }
    None
}

/// Market implied by a recognized prefix, if any.
fn prefix_market(symbol: &str) -> Option<Market> {
    if symbol.starts_with(HK_PREFIX) {
        return Some(Market::Hk);
    }
    if JP_PREFIXES.iter().any(|p| symbol.starts_with(p)) {
        return Some(Market::Jp);
    }
    None
}

/// Removes one recognized suffix or prefix, leaving the bare symbol.
fn strip_decorations(symbol: &str) -> &str {
    if symbol.ends_with(HK_SUFFIX) {
        return &symbol[..symbol.len() - HK_SUFFIX.len()];
    }
    for suffix in JP_SUFFIXES {
        if symbol.ends_with(suffix) {
            return &symbol[..symbol.len() - suffix.len()];
        }
    }
    if let Some(rest) = symbol.strip_prefix(HK_PREFIX) {
        return rest;
    }
    for prefix in JP_PREFIXES {
        if let Some(rest) = symbol.strip_prefix(prefix) {
            return rest;
        }
    }
    symbol
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
