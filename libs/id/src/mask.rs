//! Display masks.
//!
//! A mask inserts fixed punctuation at fixed digit offsets. A separator is
//! only written when at least one digit follows it, so partially typed input
//! is grouped progressively (`0131010` masks as `01310-10`). The result is
//! then truncated to the canonical length of the fully typed identifier.

use crate::digits::extract_digits;
use crate::types::PersonalityType;

/// A separator written before the digit at `offset`.
#[derive(Debug, Clone, Copy)]
struct Break {
    offset: usize,
    text: &'static str,
}

const fn brk(offset: usize, text: &'static str) -> Break {
    Break { offset, text }
}

/// A positional mask over a digit string.
#[derive(Debug, Clone, Copy)]
struct Pattern {
    breaks: &'static [Break],
    max_len: Option<usize>,
}

impl Pattern {
    fn apply(&self, digits: &str) -> String {
        let mut out = String::with_capacity(digits.len() + self.breaks.len() * 2);
        let mut start = 0;

        for b in self.breaks {
            if digits.len() <= b.offset {
                break;
            }
            out.push_str(&digits[start..b.offset]);
            out.push_str(b.text);
            start = b.offset;
        }
        out.push_str(&digits[start..]);

        // Masks only ever contain ASCII, so byte truncation is char-safe.
        if let Some(max) = self.max_len {
            out.truncate(max);
        }
        out
    }
}

const LEGAL_ENTITY: Pattern = Pattern {
    breaks: &[brk(2, "."), brk(5, "."), brk(8, "/"), brk(12, "-")],
    max_len: Some(18),
};

const INDIVIDUAL: Pattern = Pattern {
    breaks: &[brk(3, "."), brk(6, "."), brk(9, "-")],
    max_len: Some(14),
};

const POSTAL_CODE: Pattern = Pattern {
    breaks: &[brk(5, "-")],
    max_len: Some(9),
};

const LANDLINE: Pattern = Pattern {
    breaks: &[brk(4, "-")],
    max_len: None,
};

const MOBILE: Pattern = Pattern {
    breaks: &[brk(5, "-")],
    max_len: None,
};

const LANDLINE_DIGITS: usize = 10;
const MOBILE_MAX_LEN: usize = 15;

/// Masks a legal-entity identifier (CNPJ): `11.222.333/0001-81`.
#[must_use]
pub fn format_legal_entity(raw: &str) -> String {
    LEGAL_ENTITY.apply(&extract_digits(raw))
}

/// Masks an individual identifier (CPF): `111.444.777-35`.
#[must_use]
pub fn format_individual(raw: &str) -> String {
    INDIVIDUAL.apply(&extract_digits(raw))
}

/// Masks a postal code (CEP): `01310-100`.
#[must_use]
pub fn format_postal_code(raw: &str) -> String {
    POSTAL_CODE.apply(&extract_digits(raw))
}

/// Masks a phone number.
///
/// Up to 10 digits use the landline layout `(11) 2345-6789`; anything longer
/// uses the mobile layout `(11) 98765-4321`, truncated to 15 characters. The
/// landline layout is not truncated.
#[must_use]
pub fn format_phone(raw: &str) -> String {
    let digits = extract_digits(raw);
    if digits.len() <= 2 {
        return digits;
    }

    let (area, number) = digits.split_at(2);
    let (local, max_len) = if digits.len() <= LANDLINE_DIGITS {
        (LANDLINE, None)
    } else {
        (MOBILE, Some(MOBILE_MAX_LEN))
    };

    let mut out = format!("({area}) {}", local.apply(number));
    if let Some(max) = max_len {
        out.truncate(max);
    }
    out
}

/// Masks a CPF or CNPJ by digit count alone.
///
/// Up to 11 digits are treated as a CPF, so a partially typed CNPJ is shown
/// with the CPF layout until its twelfth digit arrives.
#[must_use]
pub fn format_identifier(raw: &str) -> String {
    let digits = extract_digits(raw);
    if digits.len() <= INDIVIDUAL_DIGITS {
        INDIVIDUAL.apply(&digits)
    } else {
        LEGAL_ENTITY.apply(&digits)
    }
}

const INDIVIDUAL_DIGITS: usize = 11;

/// Masks a CPF or CNPJ, preferring the personality chosen on the form.
///
/// Without a personality this falls back to [`format_identifier`]. The same
/// partial input can therefore render differently depending on whether the
/// personality field has been filled in yet.
#[must_use]
pub fn format_identifier_by_type(raw: &str, personality: Option<PersonalityType>) -> String {
    match personality {
        Some(PersonalityType::Individual) => format_individual(raw),
        Some(PersonalityType::LegalEntity) => format_legal_entity(raw),
        None => format_identifier(raw),
    }
}
