/// Parses a decimal number the way the source data writes them: surrounding
/// whitespace is ignored, exponents and a leading sign are accepted.
pub fn parse_float(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok()
}

pub fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<i64>().ok()
}

/// Owned text kept verbatim, with empty strings treated as missing.
pub fn non_empty_text(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("40.1"), Some(40.1));
        assert_eq!(parse_float(" -70.25 "), Some(-70.25));
        assert_eq!(parse_float("1e3"), Some(1000.0));
        assert_eq!(parse_float("bad"), None);
        assert_eq!(parse_float("   "), None);
        assert_eq!(parse_float("40,1"), None);
    }

    #[test]
    fn test_non_empty_text() {
        assert_eq!(non_empty_text(Some(" CA ")), Some(" CA ".to_string()));
        assert_eq!(non_empty_text(Some("")), None);
        assert_eq!(non_empty_text(None), None);
    }
}
