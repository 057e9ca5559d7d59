//! Display formatting for minor-unit amounts.

#[cfg(test)]
#[path = "money_test.rs"]
mod money_test;

/// Render minor units with two decimal places, e.g. `-1250` → `-12.50`.
pub fn format_minor(amount_minor: i64) -> String {
    let sign = if amount_minor < 0 { "-" } else { "" };
    let abs = amount_minor.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// [`format_minor`] followed by the currency code, when known.
pub fn format_amount(amount_minor: i64, currency: Option<&str>) -> String {
    match currency {
        Some(code) if !code.is_empty() => format!("{} {code}", format_minor(amount_minor)),
        _ => format_minor(amount_minor),
    }
}
