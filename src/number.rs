//! Locale-aware parsing of numeric cell text.
//!
//! Ledgers exported from Argentine banks write `1.234,56`: `.` groups
//! thousands and `,` is the decimal separator. Cells already holding a plain
//! `1234.56` must keep working too.

/// Parse numeric cell text, returning `None` for non-numeric content.
///
/// - surrounding whitespace and embedded spaces are removed;
/// - with both `,` and `.` present, `.` is a thousands separator and `,` the
///   decimal point;
/// - with only `,` present, it is the decimal point;
/// - otherwise the text is parsed as-is.
///
/// `None` is not an error: callers decide whether it means zero or "no value".
///
/// Only finite values count as numbers. `inf`, `nan` and `infinity` are
/// rejected even though a generic float parser (Rust's or Python's `float()`)
/// would read them.
pub fn normalize_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut cleaned = trimmed.replace(' ', "");
    if cleaned.contains(',') && cleaned.contains('.') {
        cleaned = cleaned.replace('.', "").replace(',', ".");
    } else if cleaned.contains(',') {
        cleaned = cleaned.replace(',', ".");
    }

    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}
