//! Currency formatting and amount-input cleanup.
//!
//! Every page formats money the same way: en-US dollars, two fraction
//! digits, thousands grouped with commas, minus sign ahead of the `$`.

#[cfg(test)]
#[path = "currency_test.rs"]
mod currency_test;

/// Format `amount` as US dollars, e.g. `-1234.5` -> `-$1,234.50`.
///
/// Cents round half away from zero. Non-finite input formats as `$0.00`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_owned();
    }
    let cents = (amount * 100.0).round();
    let sign = if cents < 0.0 { "-" } else { "" };
    // Integral floats print exactly, so no magnitude is clamped.
    let digits = format!("{:03.0}", cents.abs());
    let (dollars, cents) = digits.split_at(digits.len() - 2);
    format!("{sign}${}.{cents}", group_thousands(dollars))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse a user-typed amount, ignoring everything but digits and the first
/// decimal point. `"$1,250.5"` -> `1250.5`. Returns `None` when no digits remain.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<f64> {
    let mut cleaned = String::with_capacity(raw.len());
    let mut seen_point = false;
    for ch in raw.chars() {
        match ch {
            '0'..='9' => cleaned.push(ch),
            '.' if !seen_point => {
                seen_point = true;
                cleaned.push(ch);
            }
            '.' => break,
            _ => {}
        }
    }
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Normalize an amount input field to two decimals, e.g. `"12.3"` -> `"12.30"`.
/// `None` means the field should be cleared.
#[must_use]
pub fn sanitize_amount_input(raw: &str) -> Option<String> {
    parse_amount(raw).map(|value| format!("{value:.2}"))
}
