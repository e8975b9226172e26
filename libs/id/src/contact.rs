//! Email and postal code checks, plus small text helpers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::digits::extract_digits;

/// Number of digits in a CEP.
pub const POSTAL_CODE_LEN: usize = 8;

/// `local@domain.tld` with no whitespace (Unicode included) and a single `@`.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex pattern")
});

/// Basic shape check for an email address. This is not RFC 5322 validation.
#[must_use]
pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_PATTERN.is_match(raw)
}

/// A CEP is valid when it has exactly eight digits after stripping the mask.
#[must_use]
pub fn is_valid_postal_code(raw: &str) -> bool {
    extract_digits(raw).len() == POSTAL_CODE_LEN
}

/// Upper-cases the first character and lower-cases the rest.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@b.c", true)]
    #[case("contato@empresa.com.br", true)]
    #[case("first.last+tag@sub.example.org", true)]
    #[case("not-an-email", false)]
    #[case("", false)]
    #[case("a@b", false)]
    #[case("a b@c.d", false)]
    #[case("a@@b.c", false)]
    #[case("@b.c", false)]
    #[case("a@b.", false)]
    #[case("a\u{a0}b@c.d", false)]
    #[case("a@b\u{2003}c.d", false)]
    #[case("a@b.c\u{3000}", false)]
    fn test_is_valid_email(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(raw), expected, "{raw:?}");
    }

    #[rstest]
    #[case("01310100", true)]
    #[case("01310-100", true)]
    #[case("0131010", false)]
    #[case("013101000", false)]
    #[case("", false)]
    fn test_is_valid_postal_code(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(is_valid_postal_code(raw), expected);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("são PAULO"), "São paulo");
        assert_eq!(capitalize("ÉDEN"), "Éden");
        assert_eq!(capitalize(""), "");
    }
}
