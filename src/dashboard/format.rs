//! Display formatting for subgraph values.
//!
//! Subgraphs return token amounts as raw integer strings in the token's
//! smallest unit. Scaling is done on big integers so 256-bit balances
//! render exactly.

use num_bigint::BigUint;

/// Fallback decimals when the subgraph does not report them (token0, token1)
const LEGACY_DECIMALS: [u8; 2] = [18, 6];

/// Decimals for the i-th pool token.
///
/// ERC-20 decimals are a uint8; a reported value outside that range is
/// treated as missing and the legacy guess is used.
pub fn resolve_decimals(reported: Option<u64>, index: usize) -> u8 {
    reported
        .and_then(|d| u8::try_from(d).ok())
        .unwrap_or_else(|| LEGACY_DECIMALS.get(index).copied().unwrap_or(18))
}

/// Format a raw token balance.
///
/// Token 0 renders as a rounded whole number, other tokens with two
/// fraction digits. Empty or non-integer input renders as "0".
pub fn format_token_balance(raw: &str, decimals: u8, index: usize) -> String {
    let raw = raw.trim();
    let Some(value) = BigUint::parse_bytes(raw.as_bytes(), 10) else {
        return "0".to_string();
    };
    let precision = if index == 0 { 0 } else { 2 };
    format_scaled(&value, decimals, precision)
}

/// `value / 10^decimals`, rounded half-up to `precision` fraction digits
fn format_scaled(value: &BigUint, decimals: u8, precision: u32) -> String {
    let ten = BigUint::from(10u32);
    let numerator = value * ten.pow(precision);
    let denominator = ten.pow(u32::from(decimals));

    let mut units = &numerator / &denominator;
    let remainder = &numerator % &denominator;
    if remainder * 2u32 >= denominator {
        units += 1u32;
    }

    split_fraction(&units.to_string(), precision as usize)
}

/// Place the decimal point `precision` digits from the right and group the integer part
fn split_fraction(digits: &str, precision: usize) -> String {
    if precision == 0 {
        return group_thousands(digits);
    }
    let padded = format!("{:0>width$}", digits, width = precision + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - precision);
    format!("{}.{}", group_thousands(int_part), frac_part)
}

/// Insert comma separators into a run of ASCII digits
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Fixed-point rendering of an f64 with grouping, e.g. 3500.456 @2 -> "3,500.46"
fn format_fixed(value: f64, precision: usize) -> String {
    let fixed = format!("{:.*}", precision, value.abs());
    let grouped = match fixed.split_once('.') {
        Some((int_part, frac_part)) => format!("{}.{}", group_thousands(int_part), frac_part),
        None => group_thousands(&fixed),
    };
    if value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// USD amount with two decimals, e.g. "3500.456" -> "$3,500.46"
pub fn format_usd(value: &str) -> String {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => {
            let fixed = format_fixed(v, 2);
            match fixed.strip_prefix('-') {
                Some(abs) => format!("-${}", abs),
                None => format!("${}", fixed),
            }
        }
        _ => "$0.00".to_string(),
    }
}

/// Compact notation for large counts: 1.23B / 4.56M / 7.89K, else grouped
pub fn format_number(value: &str) -> String {
    let v = match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return "0".to_string(),
    };

    if v >= 1e9 {
        format!("{:.2}B", v / 1e9)
    } else if v >= 1e6 {
        format!("{:.2}M", v / 1e6)
    } else if v >= 1e3 {
        format!("{:.2}K", v / 1e3)
    } else {
        let fixed = format_fixed(v, 3);
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// 0x1234...abcd
pub fn shorten_address(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}
