//! Number formatting for labels, tooltips and narration.

use super::Metric;

/// Format with comma thousands separators and at most three fraction
/// digits: `1234567.891` becomes `1,234,567.891`, `0.5` stays `0.5`.
pub fn group_thousands(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let fixed = format!("{rounded:.3}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && rounded > 0.0 {
        out.push('-');
    }
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Tooltip text for one bar: grouped, with a rupee sign for money.
pub fn tooltip_value(metric: Metric, value: f64) -> String {
    if metric.is_currency() {
        format!("₹{}", group_thousands(value))
    } else {
        group_thousands(value)
    }
}

/// Short axis and bar label: `950`, `1.2K`, `3.4M`, `5B`.
pub fn compact(value: f64) -> String {
    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    if !value.is_finite() {
        return group_thousands(value);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    // Largest unit first, so 999.96K is caught as 1M.
    for (scale, suffix) in UNITS {
        let scaled = round1(abs / scale);
        if scaled >= 1.0 {
            return format!("{sign}{}{suffix}", trim1(scaled));
        }
    }
    format!("{sign}{}", trim1(round1(abs)))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One decimal place, dropping a trailing `.0`.
fn trim1(value: f64) -> String {
    let s = format!("{value:.1}");
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}
