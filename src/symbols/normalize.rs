// src/symbols/normalize.rs
use super::{is_all_digits, strip_decorations, suffix_market};
use crate::error::QuoteError;
use crate::types::{Candidate, Market, MarketHint};

/// Produces the ordered candidate formats to try upstream for `raw` under
/// `hint`, most likely to succeed first. Pure: the same input always yields
/// the same sequence.
pub fn normalize(raw: &str, hint: MarketHint) -> Result<Vec<Candidate>, QuoteError> {
    let symbol = raw.trim().to_uppercase();
    let base = strip_decorations(&symbol).to_string();
    if !base.chars().any(|c| c.is_ascii_alphanumeric()) {
        return Err(QuoteError::InvalidSymbol(raw.trim().to_string()));
    }

    // A recognized suffix pins the format: the caller already qualified the
    // symbol, so it is the sole candidate even under auto.
    if let Some(market) = suffix_market(&symbol) {
        return Ok(vec![Candidate::new(symbol, market)]);
    }

    let candidates = match hint {
        MarketHint::Hk => hk_candidates(&base),
        MarketHint::Jp => jp_candidates(&base),
        MarketHint::Auto => {
            if !base.chars().any(|c| c.is_ascii_digit()) {
                // Alphabetic ticker: pass through as a non-regional symbol.
                vec![Candidate::new(base, Market::Other)]
            } else {
                // Leading-zero and high 4-digit codes skew HK, so HK first.
                let mut all = hk_candidates(&base);
                all.extend(jp_candidates(&base));
                all
            }
        }
    };
    Ok(candidates)
}

/// HK formats in priority order: the zero-padded form has the highest
/// observed hit rate, then the leading-zero variants.
fn hk_candidates(base: &str) -> Vec<Candidate> {
    let core = padded_core(base);
    let mut out = vec![Candidate::new(format!("{core}.HK"), Market::Hk)];
    if core.starts_with('0') && core.len() > 4 {
        let stripped = &core[1..];
        if !stripped.is_empty() {
            out.push(Candidate::new(format!("{stripped}.HK"), Market::Hk));
        }
    }
    if !core.starts_with('0') && core.len() < 4 {
        out.push(Candidate::new(format!("0{core}.HK"), Market::Hk));
    }
    out
}

/// JP formats in priority order, `.T` (Tokyo Stock Exchange) first.
fn jp_candidates(base: &str) -> Vec<Candidate> {
    let core = padded_core(base);
    [
        format!("{core}.T"),
        core.clone(),
        format!("{core}.TO"),
        format!("TYO:{core}"),
        format!("{core}.JP"),
        format!("TSE:{core}"),
    ]
    .into_iter()
    .map(|symbol| Candidate::new(symbol, Market::Jp))
    .collect()
}

/// Numeric codes are zero-padded to the 4-digit exchange convention;
/// anything else is used as-is.
fn padded_core(base: &str) -> String {
    if is_all_digits(base) && base.len() < 4 {
        format!("{base:0>4}")
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.symbol.as_str()).collect()
    }

    #[test]
    fn hk_pads_to_four_digits() {
        let candidates = normalize("700", MarketHint::Hk).unwrap();
        assert_eq!(symbols(&candidates), vec!["0700.HK"]);
    }

    #[test]
    fn hk_five_digit_code_gets_stripped_variant() {
        let candidates = normalize("00700", MarketHint::Hk).unwrap();
        assert_eq!(symbols(&candidates), vec!["00700.HK", "0700.HK"]);
    }

    #[test]
    fn jp_emits_six_formats_in_order() {
        let candidates = normalize("7203", MarketHint::Jp).unwrap();
        assert_eq!(
            symbols(&candidates),
            vec!["7203.T", "7203", "7203.TO", "TYO:7203", "7203.JP", "TSE:7203"]
        );
        assert!(candidates.iter().all(|c| c.market == Market::Jp));
    }

    #[test]
    fn jp_pads_short_codes() {
        let candidates = normalize("72", MarketHint::Jp).unwrap();
        assert_eq!(candidates[0].symbol, "0072.T");
    }

    #[test]
    fn auto_alphabetic_passes_through() {
        let candidates = normalize("AAPL", MarketHint::Auto).unwrap();
        assert_eq!(symbols(&candidates), vec!["AAPL"]);
        assert_eq!(candidates[0].market, Market::Other);
    }

    #[test]
    fn auto_numeric_tries_hk_then_jp() {
        let candidates = normalize("700", MarketHint::Auto).unwrap();
        assert_eq!(
            symbols(&candidates),
            vec!["0700.HK", "0700.T", "0700", "0700.TO", "TYO:0700", "0700.JP", "TSE:0700"]
        );
        assert_eq!(candidates[0].market, Market::Hk);
        assert_eq!(candidates[1].market, Market::Jp);
    }

    #[test]
    fn recognized_suffix_is_sole_candidate_even_under_auto() {
        let candidates = normalize("700.HK", MarketHint::Auto).unwrap();
        assert_eq!(symbols(&candidates), vec!["700.HK"]);
        assert_eq!(candidates[0].market, Market::Hk);

        let candidates = normalize("7203.to", MarketHint::Auto).unwrap();
        assert_eq!(symbols(&candidates), vec!["7203.TO"]);
        assert_eq!(candidates[0].market, Market::Jp);
    }

    #[test]
    fn prefix_is_stripped_before_formatting() {
        let candidates = normalize("TYO:7203", MarketHint::Jp).unwrap();
        assert_eq!(candidates[0].symbol, "7203.T");
    }

    #[test]
    fn empty_after_stripping_is_invalid() {
        assert!(matches!(
            normalize(".HK", MarketHint::Hk),
            Err(QuoteError::InvalidSymbol(_))
        ));
        assert!(matches!(
            normalize(".", MarketHint::Auto),
            Err(QuoteError::InvalidSymbol(_))
        ));
        assert!(matches!(
            normalize("  ", MarketHint::Auto),
            Err(QuoteError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn normalize_is_idempotent() {
        let first = normalize("00700", MarketHint::Auto).unwrap();
        let second = normalize("00700", MarketHint::Auto).unwrap();
        assert_eq!(first, second);
    }
}
