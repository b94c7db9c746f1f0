//! Lenient number parsing for form fields and table formatting.
//!
//! Form inputs are free text; a field that does not start with a number is
//! treated as zero rather than rejected.

/// Longest numeric prefix of `raw` as f64, or 0.
///
/// `"12.5kg"` → 12.5, `""` → 0, `"abc"` → 0. Non-finite results are 0.
pub fn parse_or_zero(raw: &str) -> f64 {
    let s = raw.trim();
    let end = numeric_prefix_len(s, true);
    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Integer prefix of `raw`, or 0. `"2015.7"` → 2015.
pub fn parse_int_or_zero(raw: &str) -> i64 {
    let s = raw.trim();
    let end = numeric_prefix_len(s, false);
    s[..end].parse::<i64>().unwrap_or(0)
}

/// Strictly positive decimal id (`^\d+$`), as produced by selecting from a list
pub fn parse_id(raw: &str) -> Option<u64> {
    let s = raw.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u64>().ok()
}

fn numeric_prefix_len(s: &str, allow_fraction: bool) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut has_digits = i > digits_start;
    if allow_fraction && i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > frac_start || has_digits {
            has_digits = has_digits || j > frac_start;
            i = j;
        }
    }
    if !has_digits {
        return 0;
    }
    if allow_fraction && i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}

/// One decimal, trailing `.0` dropped: 12.0 → "12", 12.34 → "12.3"
pub fn format_decimal(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let formatted = format!("{:.1}", value);
    let trimmed = formatted.strip_suffix(".0").unwrap_or(&formatted);
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Two fixed decimals, used by the monitoring tables
pub fn format_fixed2(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
    }
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_zero_takes_numeric_prefix() {
        assert_eq!(parse_or_zero("12.5"), 12.5);
        assert_eq!(parse_or_zero(" 7 "), 7.0);
        assert_eq!(parse_or_zero("12.5kg"), 12.5);
        assert_eq!(parse_or_zero(".5"), 0.5);
        assert_eq!(parse_or_zero("-3"), -3.0);
        assert_eq!(parse_or_zero("1e2"), 100.0);
    }

    #[test]
    fn test_parse_or_zero_defaults_to_zero() {
        assert_eq!(parse_or_zero(""), 0.0);
        assert_eq!(parse_or_zero("abc"), 0.0);
        assert_eq!(parse_or_zero("-"), 0.0);
        assert_eq!(parse_or_zero("."), 0.0);
    }

    #[test]
    fn test_parse_int_or_zero_truncates() {
        assert_eq!(parse_int_or_zero("2015"), 2015);
        assert_eq!(parse_int_or_zero("2015.7"), 2015);
        assert_eq!(parse_int_or_zero("tahun"), 0);
    }

    #[test]
    fn test_parse_id_requires_all_digits() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("4a2"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("-1"), None);
    }

    #[test]
    fn test_format_decimal_strips_trailing_zero() {
        assert_eq!(format_decimal(12.0), "12");
        assert_eq!(format_decimal(12.34), "12.3");
        assert_eq!(format_decimal(0.04), "0");
        assert_eq!(format_decimal(-0.04), "0");
        assert_eq!(format_decimal(f64::NAN), "0");
    }

    #[test]
    fn test_format_fixed2() {
        assert_eq!(format_fixed2(3.14159), "3.14");
        assert_eq!(format_fixed2(2.0), "2.00");
    }
}
