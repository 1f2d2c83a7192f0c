//! USD / ETH conversion helpers.
//!
//! The rate is a hardcoded demo constant. A production deployment would
//! read it from an oracle feed instead.

/// Demo ETH price in USD.
pub const ETH_PRICE_USD: f64 = 2000.0;

/// Convert a USD amount to an ETH decimal string at the fixed rate.
///
/// No rounding or bounds checking is applied; negative and non-finite
/// inputs pass straight through.
pub fn usd_to_eth(usd_amount: f64) -> String {
    (usd_amount / ETH_PRICE_USD).to_string()
}

/// Convert an ETH decimal string back to USD. Malformed input yields `NaN`
/// rather than an error.
pub fn eth_to_usd(eth_amount: &str) -> f64 {
    eth_amount.trim().parse::<f64>().unwrap_or(f64::NAN) * ETH_PRICE_USD
}

/// Format a USD amount the way the dashboard shows it: `$1,234.56`,
/// negative amounts as `-$1,234.56`.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }

    let cents = (amount.abs() * 100.0).round() as u128;
    let dollars = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut whole = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, c) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            whole.push(',');
        }
        whole.push(c);
    }

    if amount < 0.0 && cents > 0 {
        format!("-${whole}.{fraction:02}")
    } else {
        format!("${whole}.{fraction:02}")
    }
}

/// Parse a user-entered USD string, ignoring currency symbols and grouping
/// characters. Returns `NaN` when nothing parseable remains.
pub fn parse_usd(amount: &str) -> f64 {
    let cleaned: String = amount
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().unwrap_or(f64::NAN)
}
