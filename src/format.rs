pub const UNAVAILABLE: &str = "N/A";

/// Percent as `total / projected * 100`, or `None` when the ratio is not a
/// finite number (zero or missing projected amount).
pub fn percent_of(total: f64, projected: f64) -> Option<f64> {
    finite(total / projected * 100.0)
}

pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Two fraction digits with `,` thousands grouping, e.g. `1,234,567.50`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return UNAVAILABLE.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // -0.004 rounds to 0.00 and should not keep its sign.
    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{}%", format_amount(value)),
        _ => UNAVAILABLE.to_string(),
    }
}
