//! Permissive numeric parsing

use serde_json::Value;

/// Interpret a raw JSON field as a finite number
///
/// Numbers are taken as-is. Strings parse from their leading numeric portion
/// (`" 12.5%"` is 12.5). Anything else, including non-finite results, is `None`.
pub fn parse_numeric(raw: &Value) -> Option<f64> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Parse the longest decimal float prefix of `s`
fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => {
                // Exponent only counts when digits follow it
                let mut look = end + 1;
                if matches!(bytes.get(look), Some(b'+' | b'-')) {
                    look += 1;
                }
                if matches!(bytes.get(look), Some(b'0'..=b'9')) {
                    seen_exp = true;
                    end = look;
                    continue;
                }
                break;
            }
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }
    s[..end].parse().ok()
}
