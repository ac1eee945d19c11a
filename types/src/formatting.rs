//! Number formatting for table cells.
//!
//! All metric display goes through this module, including optional
//! European-style formatting (swapping `.` and `,`).

use crate::record::Metric;

/// Swap `.` and `,` in a formatted number.
fn europeanize(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '.' => ',',
            ',' => '.',
            _ => c,
        })
        .collect()
}

#[inline]
fn maybe_eu(s: String, european: bool) -> String {
    if european { europeanize(&s) } else { s }
}

/// Format an integer with thousands separators.
///
/// # Examples
/// ```
/// use evtable_types::formatting::format_thousands;
/// assert_eq!(format_thousands(0), "0");
/// assert_eq!(format_thousands(999), "999");
/// assert_eq!(format_thousands(1_500), "1,500");
/// assert_eq!(format_thousands(-1_500_000), "-1,500,000");
/// ```
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a float with at most two decimals, trimming trailing zeros.
///
/// # Examples
/// ```
/// use evtable_types::formatting::format_decimal;
/// assert_eq!(format_decimal(0.75), "0.75");
/// assert_eq!(format_decimal(2.5), "2.5");
/// assert_eq!(format_decimal(3.0), "3");
/// assert_eq!(format_decimal(1.006), "1.01");
/// ```
pub fn format_decimal(n: f64) -> String {
    let s = format!("{n:.2}");
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" { "0".to_string() } else { trimmed.to_string() }
}

/// Render a metric cell. Strings pass through untouched.
///
/// # Examples
/// ```
/// use evtable_types::Metric;
/// use evtable_types::formatting::format_metric;
/// assert_eq!(format_metric(&Metric::Int(12_000), false), "12,000");
/// assert_eq!(format_metric(&Metric::Int(12_000), true), "12.000");
/// assert_eq!(format_metric(&Metric::Float(0.75), true), "0,75");
/// assert_eq!(format_metric(&Metric::Text("High".into()), true), "High");
/// assert_eq!(format_metric(&Metric::Absent, false), "");
/// ```
pub fn format_metric(metric: &Metric, european: bool) -> String {
    match metric {
        Metric::Int(n) => maybe_eu(format_thousands(*n), european),
        Metric::Float(f) => maybe_eu(format_decimal(*f), european),
        Metric::Text(s) => s.clone(),
        Metric::Absent => String::new(),
        Metric::Other(v) => v.to_string(),
    }
}
