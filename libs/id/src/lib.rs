//! # onboard-id
//!
//! Brazilian taxpayer and postal identifiers for the partner onboarding form.
//!
//! ## Design Principles
//!
//! - Every operation takes whatever the user typed; non-digits are stripped first
//! - Masking is a pure function of the digit sequence and never consults validity
//! - Validation is a pure function of the digit sequence and never panics
//! - Typed identifiers (`Cpf`, `Cnpj`, `Cep`) store canonical digits only
//!
//! ## Identifier Formats
//!
//! | Kind | Digits | Mask                 |
//! |------|--------|----------------------|
//! | CPF  | 11     | `111.444.777-35`     |
//! | CNPJ | 14     | `11.222.333/0001-81` |
//! | CEP  | 8      | `01310-100`          |
//!
//! Phone numbers are masked (`(11) 98765-4321`) but carry no checksum.

mod checksum;
mod contact;
mod digits;
mod error;
mod macros;
mod mask;
mod types;

pub use checksum::{
    has_valid_individual_check_digits, has_valid_legal_entity_check_digits, is_repeated_digit,
    is_valid_identifier, is_valid_individual_identifier, is_valid_legal_entity_identifier,
};
pub use contact::{capitalize, is_valid_email, is_valid_postal_code};
pub use digits::{extract_digits, remove_mask};
pub use error::{IdError, IdKind};
pub use mask::{
    format_identifier, format_identifier_by_type, format_individual, format_legal_entity,
    format_phone, format_postal_code,
};
pub use types::*;
