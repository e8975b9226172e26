//! Digit extraction.

/// Returns the ASCII decimal digits of `raw`, in order.
///
/// Everything else (punctuation, whitespace, letters, non-ASCII digits) is
/// dropped. Empty input yields an empty string.
#[must_use]
pub fn extract_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Removes a display mask. Alias of [`extract_digits`] used by the form layer
/// when building the submission payload.
#[must_use]
pub fn remove_mask(masked: &str) -> String {
    extract_digits(masked)
}

/// Digit values of an already-extracted digit string.
pub(crate) fn digit_values(digits: &str) -> Vec<u32> {
    digits.bytes().map(|b| u32::from(b - b'0')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_digits_strips_mask() {
        assert_eq!(extract_digits("111.444.777-35"), "11144477735");
        assert_eq!(extract_digits("11.222.333/0001-81"), "11222333000181");
        assert_eq!(extract_digits("(11) 98765-4321"), "11987654321");
    }

    #[test]
    fn test_extract_digits_empty() {
        assert_eq!(extract_digits(""), "");
        assert_eq!(extract_digits("abc -./"), "");
    }

    #[test]
    fn test_extract_digits_ignores_non_ascii_digits() {
        // Arabic-Indic digits are Unicode decimal digits but not ASCII.
        assert_eq!(extract_digits("1٢3"), "13");
    }

    #[test]
    fn test_digit_values() {
        assert_eq!(digit_values("0921"), vec![0, 9, 2, 1]);
    }
}
