//! Compact decimal formatting for seed payloads.

/// Format `value` with `precision` decimals, dropping the leading zero of
/// values in (-1, 1): `0.5` -> `.500`, `-0.25` -> `-.250`. Zero is `0`.
pub fn format_compact(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let s = format!("{value:.precision$}");
    if let Some(rest) = s.strip_prefix("0.") {
        format!(".{rest}")
    } else if let Some(rest) = s.strip_prefix("-0.") {
        format!("-.{rest}")
    } else {
        s
    }
}

/// Parse a token written by [`format_compact`] (or any plain decimal).
///
/// Returns `None` for anything that is not a number. Non-finite values
/// parse successfully and are left for the caller to reject.
pub fn parse_compact(token: &str) -> Option<f64> {
    let token = token.trim();
    if token == "." || token == "-." {
        return None;
    }
    let expanded = if let Some(rest) = token.strip_prefix("-.") {
        format!("-0.{rest}")
    } else if let Some(rest) = token.strip_prefix('.') {
        format!("0.{rest}")
    } else {
        token.to_string()
    };
    expanded.parse().ok()
}
