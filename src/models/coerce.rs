//! Lenient field coercion
//!
//! Stored rows may hold anything a person typed into a cell. These helpers
//! define exactly how such values are read back; none of them fail or log.

/// Parse a number, returning `default` when `value` is not a finite number
pub fn parse_number_or_default(value: &str, default: f64) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => default,
    }
}

/// Strip every non-digit character from a phone number
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Read a boolean cell; only a case-insensitive `true` is true
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// The literal persisted for a boolean cell
pub fn format_flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_or_default() {
        assert_eq!(parse_number_or_default("12.5", 0.0), 12.5);
        assert_eq!(parse_number_or_default(" 7 ", 0.0), 7.0);
        assert_eq!(parse_number_or_default("1e2", 0.0), 100.0);
        assert_eq!(parse_number_or_default("", 0.0), 0.0);
        assert_eq!(parse_number_or_default("ten", 3.0), 3.0);
        assert_eq!(parse_number_or_default("NaN", 0.0), 0.0);
        assert_eq!(parse_number_or_default("inf", 1.0), 1.0);
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("(11) 98765-4321"), "11987654321");
        assert_eq!(normalize_phone("+55 11 98765 4321"), "5511987654321");
        assert_eq!(normalize_phone("no phone"), "");
    }

    #[test]
    fn test_flags() {
        assert!(parse_flag("True"));
        assert!(parse_flag("true"));
        assert!(parse_flag(" TRUE "));
        assert!(!parse_flag("False"));
        assert!(!parse_flag("1"));
        assert!(!parse_flag(""));
        assert_eq!(format_flag(true), "True");
        assert_eq!(format_flag(false), "False");
    }
}
