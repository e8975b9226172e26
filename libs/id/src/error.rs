//! Error types for identifier parsing.

use thiserror::Error;

/// The kind of identifier being parsed, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// CPF (individual taxpayer).
    Cpf,
    /// CNPJ (legal entity).
    Cnpj,
    /// CPF or CNPJ, decided by length.
    TaxId,
    /// CEP (postal code).
    Cep,
}

impl IdKind {
    /// Short uppercase label (`CPF`, `CNPJ`, ...).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            IdKind::Cpf => "CPF",
            IdKind::Cnpj => "CNPJ",
            IdKind::TaxId => "CNPJ/CPF",
            IdKind::Cep => "CEP",
        }
    }
}

impl std::fmt::Display for IdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that can occur when parsing a typed identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input contained no digits.
    #[error("{kind} cannot be empty")]
    Empty { kind: IdKind },

    /// The input had the wrong number of digits.
    #[error("{kind} must have {expected} digits, got {actual}")]
    InvalidLength {
        kind: IdKind,
        expected: &'static str,
        actual: usize,
    },

    /// The input is one digit repeated (e.g. `00000000000`).
    #[error("{kind} cannot be a single repeated digit")]
    RepeatedDigits { kind: IdKind },

    /// The check digits do not match.
    #[error("{kind} check digits do not match")]
    ChecksumMismatch { kind: IdKind },
}

impl IdError {
    /// Returns true if this error indicates the input had no digits.
    pub fn is_empty(&self) -> bool {
        matches!(self, IdError::Empty { .. })
    }

    /// Returns true if the digit count was right but the number is not valid.
    pub fn is_checksum_error(&self) -> bool {
        matches!(
            self,
            IdError::RepeatedDigits { .. } | IdError::ChecksumMismatch { .. }
        )
    }

    /// The identifier kind this error refers to.
    pub fn kind(&self) -> IdKind {
        match self {
            IdError::Empty { kind }
            | IdError::InvalidLength { kind, .. }
            | IdError::RepeatedDigits { kind }
            | IdError::ChecksumMismatch { kind } => *kind,
        }
    }
}
