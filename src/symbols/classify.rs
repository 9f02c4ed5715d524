// src/symbols/classify.rs
use super::{is_all_digits, prefix_market, suffix_market};
use crate::types::{Market, MarketHint};

/// Best-effort market guess for an undecorated symbol, used when the caller
/// supplies no hint. Rules run in order, first match wins. The digit
/// heuristics are tuned to observed HK/JP listing patterns and stay a guess,
/// not a guarantee.
pub fn classify(raw: &str) -> MarketHint {
    let symbol = raw.trim().to_uppercase();

    match suffix_market(&symbol).or_else(|| prefix_market(&symbol)) {
        Some(Market::Hk) => return MarketHint::Hk,
        Some(Market::Jp) => return MarketHint::Jp,
        _ => {}
    }

    // Bare code for the digit rules: text before any '.', after any ':'.
    let mut base = symbol.as_str();
    if let Some((head, _)) = base.split_once('.') {
        base = head;
    }
    if let Some((_, tail)) = base.split_once(':') {
        base = tail;
    }

    if !is_all_digits(base) {
        return MarketHint::Auto;
    }
    if base.starts_with('0')
        || (base.len() == 4 && base.parse::<u32>().map_or(false, |v| v >= 1000))
    {
        return MarketHint::Hk;
    }
    if base.len() == 4 {
        // Kept for rule-order fidelity: a 4-digit code below 1000 always
        // carries a leading zero and is caught by the HK rule above.
        return MarketHint::Jp;
    }
    if base.len() < 4 {
        return MarketHint::Jp;
    }
    MarketHint::Auto
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_and_prefix_win_over_digit_rules() {
        assert_eq!(classify("700.HK"), MarketHint::Hk);
        assert_eq!(classify("HK:9988"), MarketHint::Hk);
        assert_eq!(classify("7203.T"), MarketHint::Jp);
        assert_eq!(classify("7203.TO"), MarketHint::Jp);
        assert_eq!(classify("6758.JP"), MarketHint::Jp);
        assert_eq!(classify("TYO:7203"), MarketHint::Jp);
        assert_eq!(classify("TSE:6758"), MarketHint::Jp);
    }

    #[test]
    fn leading_zero_means_hk() {
        assert_eq!(classify("0700"), MarketHint::Hk);
        assert_eq!(classify("00700"), MarketHint::Hk);
        assert_eq!(classify("0999"), MarketHint::Hk);
    }

    #[test]
    fn four_digit_boundary_at_one_thousand() {
        assert_eq!(classify("1000"), MarketHint::Hk);
        assert_eq!(classify("9988"), MarketHint::Hk);
        // 7203 is a Tokyo listing, but the documented rules put 4-digit
        // codes >= 1000 in HK; auto resolution still reaches JP formats.
        assert_eq!(classify("7203"), MarketHint::Hk);
    }

    #[test]
    fn short_numeric_codes_lean_jp() {
        assert_eq!(classify("700"), MarketHint::Jp);
        assert_eq!(classify("7"), MarketHint::Jp);
    }

    #[test]
    fn non_digit_and_long_codes_stay_auto() {
        assert_eq!(classify("AAPL"), MarketHint::Auto);
        assert_eq!(classify("BRK.B"), MarketHint::Auto);
        assert_eq!(classify("12345"), MarketHint::Auto);
        assert_eq!(classify(""), MarketHint::Auto);
    }
}
