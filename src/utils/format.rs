//! Format - Formatting Utilities

use chrono::{DateTime, Local, Utc};

/// Format a UTC datetime for display in local time
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = dt.with_timezone(&Local);
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Truncate a string to `max_chars` characters with ellipsis
pub fn truncate(s: &str, max_chars: usize) -> String {
    let count = s.chars().count();
    if count <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return s.chars().take(max_chars).collect();
    }
    let mut out: String = s.chars().take(max_chars - 3).collect();
    out.push_str("...");
    out
}

/// Format a number with thousand separators
pub fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Format a monetary or count value; whole numbers get separators
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format_number(value as i64)
    } else {
        format!("{value:.2}")
    }
}

/// Pad or truncate to exactly `width` characters
pub fn fit(s: &str, width: usize) -> String {
    let cell = truncate(s, width);
    format!("{cell:<width$}")
}
