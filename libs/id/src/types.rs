//! Typed identifier definitions.
//!
//! Each type stores the canonical digit string and validates on construction,
//! so holding a `Cpf` means holding a well-formed CPF.

use serde::{Deserialize, Serialize};

use crate::checksum::{
    has_valid_individual_check_digits, has_valid_legal_entity_check_digits, is_repeated_digit,
};
use crate::define_digit_id;
use crate::{format_individual, format_legal_entity, format_postal_code, IdError, IdKind};

// =============================================================================
// Personality
// =============================================================================

/// Whether a partner is a natural person or a registered business.
///
/// Serialized with the labels the backend expects (`Física` / `Jurídica`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonalityType {
    /// Pessoa física: identified by a CPF.
    #[serde(rename = "Física")]
    Individual,
    /// Pessoa jurídica: identified by a CNPJ.
    #[serde(rename = "Jurídica")]
    LegalEntity,
}

impl PersonalityType {
    /// The label used on the form and on the wire.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            PersonalityType::Individual => "Física",
            PersonalityType::LegalEntity => "Jurídica",
        }
    }

    /// The identifier kind this personality is registered with.
    #[must_use]
    pub const fn id_kind(&self) -> IdKind {
        match self {
            PersonalityType::Individual => IdKind::Cpf,
            PersonalityType::LegalEntity => IdKind::Cnpj,
        }
    }

    /// Interprets free text from a form field.
    ///
    /// Accepts the wire labels, their unaccented spellings, and the English
    /// variant names, ignoring case. Anything else is `None`, which callers
    /// treat the same as an unset field.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "física" | "fisica" | "pf" | "individual" => Some(PersonalityType::Individual),
            "jurídica" | "juridica" | "pj" | "legal-entity" | "legalentity" | "legal_entity" => {
                Some(PersonalityType::LegalEntity)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PersonalityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| format!("unknown personality type: {s}"))
    }
}

// =============================================================================
// CPF / CNPJ / CEP
// =============================================================================

fn check_individual(digits: &str) -> Result<(), IdError> {
    if is_repeated_digit(digits) {
        return Err(IdError::RepeatedDigits { kind: IdKind::Cpf });
    }
    if !has_valid_individual_check_digits(digits) {
        return Err(IdError::ChecksumMismatch { kind: IdKind::Cpf });
    }
    Ok(())
}

fn check_legal_entity(digits: &str) -> Result<(), IdError> {
    if is_repeated_digit(digits) {
        return Err(IdError::RepeatedDigits { kind: IdKind::Cnpj });
    }
    if !has_valid_legal_entity_check_digits(digits) {
        return Err(IdError::ChecksumMismatch { kind: IdKind::Cnpj });
    }
    Ok(())
}

define_digit_id!(
    /// Cadastro de Pessoas Físicas: 11-digit individual taxpayer number.
    Cpf,
    IdKind::Cpf,
    11,
    format_individual,
    check_individual
);

define_digit_id!(
    /// Cadastro Nacional da Pessoa Jurídica: 14-digit legal-entity number.
    Cnpj,
    IdKind::Cnpj,
    14,
    format_legal_entity,
    check_legal_entity
);

define_digit_id!(
    /// Código de Endereçamento Postal: 8-digit postal code. No checksum.
    Cep,
    IdKind::Cep,
    8,
    format_postal_code,
    |_digits| Ok(())
);

// =============================================================================
// Tax ID
// =============================================================================

/// A CPF or a CNPJ, whichever the digit count indicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaxId {
    /// An individual's CPF.
    Individual(Cpf),
    /// A business's CNPJ.
    LegalEntity(Cnpj),
}

impl TaxId {
    /// Parses a CPF (11 digits) or CNPJ (14 digits).
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        let digits = crate::extract_digits(raw);
        match digits.len() {
            0 => Err(IdError::Empty {
                kind: IdKind::TaxId,
            }),
            Cpf::LEN => Cpf::parse(&digits).map(TaxId::Individual),
            Cnpj::LEN => Cnpj::parse(&digits).map(TaxId::LegalEntity),
            actual => Err(IdError::InvalidLength {
                kind: IdKind::TaxId,
                expected: "11 or 14",
                actual,
            }),
        }
    }

    /// The personality implied by this identifier.
    #[must_use]
    pub const fn personality(&self) -> PersonalityType {
        match self {
            TaxId::Individual(_) => PersonalityType::Individual,
            TaxId::LegalEntity(_) => PersonalityType::LegalEntity,
        }
    }

    /// Returns the canonical digits.
    #[must_use]
    pub fn digits(&self) -> &str {
        match self {
            TaxId::Individual(cpf) => cpf.digits(),
            TaxId::LegalEntity(cnpj) => cnpj.digits(),
        }
    }

    /// Returns the display mask.
    #[must_use]
    pub fn masked(&self) -> String {
        match self {
            TaxId::Individual(cpf) => cpf.masked(),
            TaxId::LegalEntity(cnpj) => cnpj.masked(),
        }
    }
}

impl std::fmt::Display for TaxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.masked())
    }
}

impl std::str::FromStr for TaxId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Cpf> for TaxId {
    fn from(cpf: Cpf) -> Self {
        TaxId::Individual(cpf)
    }
}

impl From<Cnpj> for TaxId {
    fn from(cnpj: Cnpj) -> Self {
        TaxId::LegalEntity(cnpj)
    }
}

// =============================================================================
// Tests
// =============================================================================
