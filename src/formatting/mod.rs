//! Display formatting for calculator outputs.
//!
//! Pure string formatting, US-style grouping ("1,234,567", "$15,750").
//! Engines hand out raw doubles; every rounding decision lives here.
//!
//! Non-finite values render as [`PLACEHOLDER`] rather than "inf"/"NaN": an
//! infinite sample size is a legitimate engine output (zero detectable
//! effect) and must read as "no answer", not as a number.

/// Rendered in place of any non-finite value.
pub const PLACEHOLDER: &str = "—";

/// Format a number with thousand separators and fixed decimals.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let rendered = format!("{value:.decimals$}");
    let (sign, unsigned) = split_sign(&rendered);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    let mut out = String::with_capacity(rendered.len() + rendered.len() / 3);
    out.push_str(sign);
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a dollar amount with thousand separators.
///
/// ROAS reports use zero decimals; cost estimates in the sample-size report
/// carry cents.
pub fn format_currency(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    if value < 0.0 {
        format!("-${}", format_number(-value, decimals))
    } else {
        format!("${}", format_number(value, decimals))
    }
}

/// Format a fraction as a percentage with fixed decimals.
pub fn format_percent(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.*}%", decimals, value * 100.0)
}

/// Format a ROAS multiplier, e.g. "2.9x".
pub fn format_roas(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{value:.1}x")
}

/// Format a relative MDE as a whole percentage, e.g. "20%" or "+20%".
pub fn format_mde(value: f64, show_plus: bool) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let percent = format!("{:.0}%", value * 100.0);
    if show_plus {
        format!("+{percent}")
    } else {
        percent
    }
}

fn split_sign(rendered: &str) -> (&str, &str) {
    match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered),
    }
}

/// Insert thousand separators into a bare digit string.
fn group_thousands(digits: &str) -> String {
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(std::str::from_utf8)
        .collect::<Result<Vec<&str>, _>>()
        .unwrap()
        .join(",")
}
