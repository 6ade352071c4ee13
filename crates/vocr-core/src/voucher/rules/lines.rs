//! Line normalization.

// Line boundaries recognized in OCR output.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

// Unicode whitespace plus the ASCII separators 0x1c..=0x1f.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Split OCR text into trimmed, non-empty lines in original order.
pub fn normalize_lines(text: Option<&str>) -> Vec<&str> {
    text.unwrap_or_default()
        .split(LINE_BREAKS)
        .map(|line| line.trim_matches(is_blank))
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lines() {
        let text = "  Voucher No: 1  \n\n\t\nDate 12/05/2023\r\n   \r\nTotal 10";
        assert_eq!(
            normalize_lines(Some(text)),
            vec!["Voucher No: 1", "Date 12/05/2023", "Total 10"]
        );
    }

    #[test]
    fn test_normalize_absent_or_blank() {
        assert!(normalize_lines(None).is_empty());
        assert!(normalize_lines(Some("")).is_empty());
        assert!(normalize_lines(Some(" \n \r\n\t")).is_empty());
    }

    #[test]
    fn test_lone_carriage_return_splits() {
        assert_eq!(normalize_lines(Some("a\rb")), vec!["a", "b"]);
    }

    #[test]
    fn test_unit_separator_is_trimmed() {
        assert_eq!(
            normalize_lines(Some("a\n\u{1f}\u{1f}\n\u{1f}b\u{1f}")),
            vec!["a", "b"]
        );
    }
}
