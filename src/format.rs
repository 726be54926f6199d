// 💵 Answer formatting helpers

/// `$1,234,567.89` - two decimals, comma thousands separators.
/// Negative amounts render as `$-1,234.00`.
pub fn format_currency(amount: f64) -> String {
    format!("${}", group_thousands(&format!("{:.2}", amount)))
}

/// `7.79%` - two decimals, no grouping
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Percent change from `previous` to `current`.
/// None when `previous` is zero or either side is not finite.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// Insert commas into the integer part of an already-rendered decimal
fn group_thousands(rendered: &str) -> String {
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
