/// Formats an amount with thousands separators and at most two decimals,
/// trimming trailing zeros: `1234.5` → `1,234.5`, `30000` → `30,000`.
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let fraction = fraction.trim_end_matches('0');
    let mut out = String::new();
    if negative && (grouped != "0" || !fraction.is_empty()) {
        out.push('-');
    }
    out.push_str(&grouped);
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Whole-number percentage, e.g. `87.5` → `88%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.0}%", value)
}
