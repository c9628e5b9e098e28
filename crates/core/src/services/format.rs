//! Display formatting for amounts. The engine never rounds; these helpers do.

/// Format a crypto amount for display.
///
/// - `0` → `"0"`
/// - below 1e-8 → scientific notation with two decimals
/// - below 1 → up to `max_decimals` decimals
/// - below 100 → up to 6 decimals
/// - otherwise → up to 4 decimals
///
/// Thousands are grouped with commas and trailing zeros are dropped.
#[must_use]
pub fn format_crypto_amount(amount: f64, max_decimals: usize) -> String {
    if amount == 0.0 {
        return "0".to_string();
    }
    let magnitude = amount.abs();
    if magnitude < 0.000_000_01 {
        return format!("{amount:.2e}");
    }
    let decimals = if magnitude < 1.0 {
        max_decimals
    } else if magnitude < 100.0 {
        6
    } else {
        4
    };
    let fixed = format!("{amount:.decimals$}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    group_thousands(trimmed)
}

/// Format a USD value with exactly two decimals, e.g. `"$1,234.50"`.
#[must_use]
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${}", group_thousands(&fixed))
}

/// Insert commas into the integer part of a plain decimal string.
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
