//! Check-digit validation for CPF and CNPJ.
//!
//! Both identifiers end in two check digits computed modulo 11. Each check
//! digit is derived from a weighted sum over every digit before it:
//!
//! ```text
//! remainder = sum(digit[i] * weight[i]) % 11
//! check     = if remainder < 2 { 0 } else { 11 - remainder }
//! ```
//!
//! CPF weights descend linearly (10..=2, then 11..=2). CNPJ weights descend
//! from 5 (then 6) and wrap from 2 back to 9.

use crate::digits::{digit_values, extract_digits};

/// Number of digits in a CPF.
pub const INDIVIDUAL_LEN: usize = 11;

/// Number of digits in a CNPJ.
pub const LEGAL_ENTITY_LEN: usize = 14;

/// Returns true if `digits` is non-empty and made of a single repeated digit.
///
/// Sequences such as `00000000000` and `99999999999999` satisfy the check-digit
/// arithmetic but are never issued.
#[must_use]
pub fn is_repeated_digit(digits: &str) -> bool {
    let mut bytes = digits.bytes();
    match bytes.next() {
        Some(first) => bytes.all(|b| b == first),
        None => false,
    }
}

fn check_digit(values: &[u32], weights: impl Iterator<Item = u32>) -> u32 {
    let sum: u32 = values.iter().zip(weights).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

/// CNPJ weights: start at `first`, count down, wrap from 2 to 9.
fn cyclic_weights(first: u32) -> impl Iterator<Item = u32> {
    std::iter::successors(Some(first), |w| Some(if *w == 2 { 9 } else { w - 1 }))
}

/// Verifies the two CPF check digits of an 11-digit string.
///
/// Does not reject repeated-digit sequences; see [`is_valid_individual_identifier`].
#[must_use]
pub fn has_valid_individual_check_digits(digits: &str) -> bool {
    if digits.len() != INDIVIDUAL_LEN || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let values = digit_values(digits);

    let first = check_digit(&values[..9], (2..=10).rev());
    if first != values[9] {
        return false;
    }
    let second = check_digit(&values[..10], (2..=11).rev());
    second == values[10]
}

/// Verifies the two CNPJ check digits of a 14-digit string.
///
/// Does not reject repeated-digit sequences; see [`is_valid_legal_entity_identifier`].
#[must_use]
pub fn has_valid_legal_entity_check_digits(digits: &str) -> bool {
    if digits.len() != LEGAL_ENTITY_LEN || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let values = digit_values(digits);

    let first = check_digit(&values[..12], cyclic_weights(5));
    if first != values[12] {
        return false;
    }
    let second = check_digit(&values[..13], cyclic_weights(6));
    second == values[13]
}

/// Validates a CPF, masked or not.
#[must_use]
pub fn is_valid_individual_identifier(raw: &str) -> bool {
    let digits = extract_digits(raw);
    digits.len() == INDIVIDUAL_LEN
        && !is_repeated_digit(&digits)
        && has_valid_individual_check_digits(&digits)
}

/// Validates a CNPJ, masked or not.
#[must_use]
pub fn is_valid_legal_entity_identifier(raw: &str) -> bool {
    let digits = extract_digits(raw);
    digits.len() == LEGAL_ENTITY_LEN
        && !is_repeated_digit(&digits)
        && has_valid_legal_entity_check_digits(&digits)
}

/// Validates a CPF or CNPJ, choosing the algorithm by digit count.
///
/// Exactly 11 digits are checked as a CPF, exactly 14 as a CNPJ; any other
/// count is invalid.
#[must_use]
pub fn is_valid_identifier(raw: &str) -> bool {
    let digits = extract_digits(raw);
    match digits.len() {
        INDIVIDUAL_LEN => is_valid_individual_identifier(&digits),
        LEGAL_ENTITY_LEN => is_valid_legal_entity_identifier(&digits),
        _ => false,
    }
}
