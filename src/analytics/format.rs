//! en-US display formatting for summary values.

/// Whole-dollar USD amount, e.g. `$1,235` or `-$50`
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$NaN".to_string();
    }
    let rounded = format!("{:.0}", round_half_away(value.abs(), 0));
    let sign = if value < 0.0 && rounded != "0" { "-" } else { "" };
    format!("{sign}${}", group_thousands(&rounded))
}

/// Number with thousands separators and at most two decimals, e.g. `1,234.5`
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "NaN".to_string();
    }
    let fixed = format!("{:.2}", round_half_away(value.abs(), 2));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let sign = if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{sign}{}", group_thousands(int_part))
    } else {
        format!("{sign}{}.{frac_part}", group_thousands(int_part))
    }
}

/// Percentage with one decimal and no sign, e.g. `12.3`
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "NaN".to_string();
    }
    format!("{:.1}", round_half_away(value, 1))
}

/// Round to `digits` decimals with ties away from zero, as en-US
/// number formatting does. `format!` alone rounds ties to even.
fn round_half_away(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

/// Optional value formatted with `f`, or `n/a` when absent
pub fn or_na(value: Option<f64>, f: fn(f64) -> String) -> String {
    value.map(f).unwrap_or_else(|| "n/a".to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
