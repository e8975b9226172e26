//! Form schema validation.
//!
//! Rules live on [`PartnerFormData`] as `validator` attributes; the text rules
//! below supply the per-field messages shown next to each input. Only the first
//! failing message of a field is kept, matching what the form displays.

use std::borrow::Cow;
use std::collections::BTreeMap;

use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::model::{Field, PartnerFormData};

/// Validation failures keyed by field, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} campo(s) inválido(s): {}", .0.len(), summary(.0))]
pub struct FormErrors(BTreeMap<Field, String>);

fn summary(errors: &BTreeMap<Field, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl FormErrors {
    /// Returns true if no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The message for a field, if it failed.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Failing fields and their messages, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = BTreeMap::new();
        for (name, failures) in errors.field_errors() {
            let name = name.to_string();
            let Some(field) = Field::from_name(&name) else {
                tracing::warn!(field = %name, "validation error for unknown form field");
                continue;
            };
            if let Some(first) = failures.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                out.insert(field, message);
            }
        }
        Self(out)
    }
}

/// Validates the whole form.
pub fn validate_form(data: &PartnerFormData) -> Result<(), FormErrors> {
    data.validate().map_err(FormErrors::from)
}

/// Validates a single field in the context of the whole form, returning its
/// message if it fails.
#[must_use]
pub fn validate_field(data: &PartnerFormData, field: Field) -> Option<String> {
    match validate_form(data) {
        Ok(()) => None,
        Err(errors) => errors.get(field).map(str::to_string),
    }
}

// =============================================================================
// Text rules
// =============================================================================

/// Presence and length limits for a text field, with their messages.
#[derive(Debug, Clone, Copy)]
struct TextRule {
    required: &'static str,
    min: Option<(usize, &'static str)>,
    max: Option<(usize, &'static str)>,
}

impl TextRule {
    fn check(&self, value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(failure("required", self.required));
        }
        let len = value.chars().count();
        if let Some((min, message)) = self.min {
            if len < min {
                return Err(failure("length", message));
            }
        }
        if let Some((max, message)) = self.max {
            if len > max {
                return Err(failure("length", message));
            }
        }
        Ok(())
    }
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

const fn rule(
    required: &'static str,
    min: Option<(usize, &'static str)>,
    max: Option<(usize, &'static str)>,
) -> TextRule {
    TextRule { required, min, max }
}

/// Field validators referenced from the `#[validate]` attributes.
pub(crate) mod rules {
    use onboard_id::{is_valid_email, is_valid_identifier, is_valid_postal_code};
    use validator::ValidationError;

    use super::{failure, rule, TextRule};

    const COMPANY_NAME: TextRule = rule(
        "Razão social é obrigatória",
        Some((2, "Razão social deve ter pelo menos 2 caracteres")),
        Some((255, "Razão social deve ter no máximo 255 caracteres")),
    );
    const TRADE_NAME: TextRule = rule(
        "Nome fantasia é obrigatório",
        None,
        Some((255, "Nome fantasia deve ter no máximo 255 caracteres")),
    );
    const SEGMENT: TextRule = rule(
        "Segmento é obrigatório",
        None,
        Some((100, "Segmento deve ter no máximo 100 caracteres")),
    );
    const CATEGORY: TextRule = rule(
        "Categoria é obrigatória",
        None,
        Some((100, "Categoria deve ter no máximo 100 caracteres")),
    );
    const COUNTRY: TextRule = rule(
        "País é obrigatório",
        None,
        Some((50, "País deve ter no máximo 50 caracteres")),
    );
    const STATE: TextRule = rule(
        "UF é obrigatória",
        Some((2, "UF deve ter exatamente 2 caracteres")),
        Some((2, "UF deve ter exatamente 2 caracteres")),
    );
    const CITY: TextRule = rule(
        "Município é obrigatório",
        None,
        Some((100, "Município deve ter no máximo 100 caracteres")),
    );
    const STREET: TextRule = rule(
        "Logradouro é obrigatório",
        None,
        Some((255, "Logradouro deve ter no máximo 255 caracteres")),
    );
    const NUMBER: TextRule = rule(
        "Número é obrigatório",
        None,
        Some((20, "Número deve ter no máximo 20 caracteres")),
    );
    const DISTRICT: TextRule = rule(
        "Bairro é obrigatório",
        None,
        Some((100, "Bairro deve ter no máximo 100 caracteres")),
    );
    const EMAIL: TextRule = rule(
        "Email é obrigatório",
        None,
        Some((255, "Email deve ter no máximo 255 caracteres")),
    );
    // Limits apply to the masked value: `(11) 2345-6789` is 14 characters.
    const PHONE: TextRule = rule(
        "Telefone é obrigatório",
        Some((14, "Telefone deve ter pelo menos 10 dígitos")),
        Some((15, "Telefone deve ter no máximo 11 dígitos")),
    );

    pub fn company_name(value: &str) -> Result<(), ValidationError> {
        COMPANY_NAME.check(value)
    }

    pub fn trade_name(value: &str) -> Result<(), ValidationError> {
        TRADE_NAME.check(value)
    }

    pub fn segment(value: &str) -> Result<(), ValidationError> {
        SEGMENT.check(value)
    }

    pub fn category(value: &str) -> Result<(), ValidationError> {
        CATEGORY.check(value)
    }

    pub fn country(value: &str) -> Result<(), ValidationError> {
        COUNTRY.check(value)
    }

    pub fn state(value: &str) -> Result<(), ValidationError> {
        STATE.check(value)
    }

    pub fn city(value: &str) -> Result<(), ValidationError> {
        CITY.check(value)
    }

    pub fn street(value: &str) -> Result<(), ValidationError> {
        STREET.check(value)
    }

    pub fn number(value: &str) -> Result<(), ValidationError> {
        NUMBER.check(value)
    }

    pub fn district(value: &str) -> Result<(), ValidationError> {
        DISTRICT.check(value)
    }

    pub fn phone(value: &str) -> Result<(), ValidationError> {
        PHONE.check(value)
    }

    pub fn cnpj_cpf(value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(failure("required", "CNPJ/CPF é obrigatório"));
        }
        if !is_valid_identifier(value) {
            return Err(failure("cnpj_cpf", "CNPJ/CPF inválido"));
        }
        Ok(())
    }

    pub fn zip_code(value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(failure("required", "CEP é obrigatório"));
        }
        if !is_valid_postal_code(value) {
            return Err(failure("cep", "CEP inválido"));
        }
        Ok(())
    }

    pub fn email(value: &str) -> Result<(), ValidationError> {
        EMAIL.check(value)?;
        if !is_valid_email(value) {
            return Err(failure("email", "Email deve ter um formato válido"));
        }
        Ok(())
    }
}
