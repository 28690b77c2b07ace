//! # String Utilities

use std::borrow::Cow;

/// Decode bytes as UTF-8, replacing invalid sequences; without copying valid input.
pub fn string_from_utf8_lossy(v: Vec<u8>) -> String {
    match String::from_utf8(v) {
        Ok(string) => string,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Replace every ASCII decimal digit with `'0'`.
///
/// Borrows when there is nothing to replace.
pub fn normalize_digits(text: &str) -> Cow<'_, str> {
    if !text.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| if c.is_ascii_digit() { '0' } else { c })
            .collect(),
    )
}

/// Strip a trailing `"\n"` or `"\r\n"`.
pub fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_from_lossy_utf8() {
        let v = vec![0x61, 0x62, 0xff, 0x28];
        assert_eq!(string_from_utf8_lossy(v), "ab\u{fffd}(".to_string());

        let v = vec![0x61, 0x62];
        assert_eq!(string_from_utf8_lossy(v), "ab".to_string());
    }

    #[test]
    fn test_normalize_digits() {
        assert_eq!(normalize_digits("2024"), "0000");
        assert_eq!(normalize_digits("1999"), "0000");
        assert_eq!(normalize_digits("a1b22"), "a0b00");
        assert!(matches!(normalize_digits("cats"), Cow::Borrowed("cats")));
        assert!(matches!(normalize_digits("000"), Cow::Borrowed("000")));

        // Only ASCII digits are folded.
        assert_eq!(normalize_digits("\u{0663}7"), "\u{0663}0");
    }

    #[test]
    fn test_strip_line_terminator() {
        assert_eq!(strip_line_terminator("abc\n"), "abc");
        assert_eq!(strip_line_terminator("abc\r\n"), "abc");
        assert_eq!(strip_line_terminator("abc"), "abc");
        assert_eq!(strip_line_terminator("\n"), "");
        assert_eq!(strip_line_terminator("a b\n\n"), "a b\n");
    }
}
