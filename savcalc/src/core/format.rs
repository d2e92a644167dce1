// src/core/format.rs
use crate::models::{FieldName as _, FormattedResults, ResultName, Results};

/// Marker shown in place of a value that cannot be displayed.
pub const DEFAULT_UNAVAILABLE: &str = "N/A";

/// Formats whole US dollars the way an en-US currency formatter with no
/// fraction digits does: `12345` becomes `$12,345`, `-1500` becomes
/// `-$1,500`. The locale is fixed. Negative zero keeps its sign, `-$0`,
/// as does anything that rounds to it.
///
/// Returns `None` for infinite or NaN values.
#[must_use]
pub fn currency(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let rounded = value.round();
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    Some(format!("{sign}${}", group_thousands(&format!("{:.0}", rounded.abs()))))
}

/// Formats a value as a bare number, `300` stays `300`. Magnitudes of
/// `1e21` and above, or below `1e-6`, switch to exponent form (`1e+21`,
/// `5e-7`) like the page's own number-to-string conversion.
///
/// Returns `None` for infinite or NaN values.
#[must_use]
pub fn plain(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        // Never `-0`.
        return Some(String::from("0"));
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exponent = format!("{value:e}");
        if exponent.contains("e-") {
            return Some(exponent);
        }
        return Some(exponent.replacen('e', "e+", 1));
    }
    Some(format!("{value}"))
}

/// Display text for every result, in result order.
#[must_use]
pub fn format_results(results: &Results, unavailable: &str) -> FormattedResults {
    let entries = ResultName::ALL
        .iter()
        .map(|&name| {
            let raw = results.get(name);
            let text = if name.is_currency() {
                currency(raw)
            } else {
                plain(raw)
            };
            (name, text.unwrap_or_else(|| unavailable.to_owned()))
        })
        .collect();
    FormattedResults::new(entries)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (index, c) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
