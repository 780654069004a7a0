//! Number formatting for counters, scores and rates.

/// Insert thousands separators into a run of ASCII digits.
fn group_digits(digits: &str) -> String {
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

/// Format an unsigned integer with thousands separators.
pub fn format_unsigned(n: u128) -> String {
    group_digits(&n.to_string())
}

/// Format an integer with thousands separators (`1234567` -> `1,234,567`).
pub fn format_count(n: i128) -> String {
    let grouped = group_digits(&n.unsigned_abs().to_string());
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a float with two decimals and thousands separators.
pub fn format_rate(v: f64) -> String {
    let fixed = format!("{:.2}", v.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if v < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, group_digits(whole), frac)
}

/// Format an integer delta with an explicit sign (`+20`, `-3`).
pub fn format_count_delta(d: i128) -> String {
    if d >= 0 {
        format!("+{}", format_count(d))
    } else {
        format_count(d)
    }
}

/// Format a rate delta with an explicit sign (`+5.00`, `-0.25`).
pub fn format_rate_delta(d: f64) -> String {
    let body = format_rate(d);
    if body.starts_with('-') {
        body
    } else {
        format!("+{}", body)
    }
}
