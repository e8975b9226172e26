//! Validate command.

use anyhow::Result;
use clap::{Args, ValueEnum};
use onboard_id::{is_valid_email, Cep, Cnpj, Cpf, TaxId};
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{print_output, print_success, OutputFormat};

use super::CommandContext;

/// Check a value. Exits with status 1 if it is invalid.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Kind of value.
    kind: ValidateKind,

    /// Value to check, masked or not.
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ValidateKind {
    Cpf,
    Cnpj,
    TaxId,
    Email,
    Cep,
}

impl ValidateKind {
    fn label(self) -> &'static str {
        match self {
            ValidateKind::Cpf => "CPF",
            ValidateKind::Cnpj => "CNPJ",
            ValidateKind::TaxId => "CNPJ/CPF",
            ValidateKind::Email => "Email",
            ValidateKind::Cep => "CEP",
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct ValidationRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,

    #[tabled(rename = "Value")]
    value: String,

    #[tabled(rename = "Valid")]
    valid: bool,

    #[tabled(rename = "Reason")]
    reason: String,
}

impl ValidateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let (value, outcome) = check(self.kind, &self.value);
        let kind = self.kind.label();

        match ctx.format {
            OutputFormat::Table => {
                if let Ok(()) = &outcome {
                    print_success(&format!("Valid {kind}: {value}"));
                }
            }
            OutputFormat::Json => {
                let row = ValidationRow {
                    kind,
                    value,
                    valid: outcome.is_ok(),
                    reason: outcome.as_ref().err().cloned().unwrap_or_default(),
                };
                print_output(&[row], ctx.format);
            }
        }

        outcome.map_err(|reason| CliError::InvalidValue { kind, reason }.into())
    }
}

/// Returns the normalized value and, if invalid, why.
fn check(kind: ValidateKind, raw: &str) -> (String, Result<(), String>) {
    fn id<T: std::fmt::Display, E: std::fmt::Display>(
        raw: &str,
        parsed: Result<T, E>,
    ) -> (String, Result<(), String>) {
        match parsed {
            Ok(id) => (id.to_string(), Ok(())),
            Err(err) => (raw.to_string(), Err(err.to_string())),
        }
    }

    match kind {
        ValidateKind::Cpf => id(raw, Cpf::parse(raw)),
        ValidateKind::Cnpj => id(raw, Cnpj::parse(raw)),
        ValidateKind::TaxId => id(raw, TaxId::parse(raw)),
        ValidateKind::Cep => id(raw, Cep::parse(raw)),
        ValidateKind::Email if is_valid_email(raw) => (raw.to_string(), Ok(())),
        ValidateKind::Email => (
            raw.to_string(),
            Err("expected name@domain.tld without spaces".to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ValidateKind::Cpf, "11144477735", "111.444.777-35")]
    #[case(ValidateKind::Cnpj, "11.222.333/0001-81", "11.222.333/0001-81")]
    #[case(ValidateKind::TaxId, "52998224725", "529.982.247-25")]
    #[case(ValidateKind::TaxId, "11444777000161", "11.444.777/0001-61")]
    #[case(ValidateKind::Cep, "01310100", "01310-100")]
    #[case(ValidateKind::Email, "contato@exemplo.com.br", "contato@exemplo.com.br")]
    fn accepts_valid_values(#[case] kind: ValidateKind, #[case] raw: &str, #[case] shown: &str) {
        let (value, outcome) = check(kind, raw);
        assert_eq!(outcome, Ok(()));
        assert_eq!(value, shown);
    }

    #[rstest]
    #[case(ValidateKind::Cpf, "11111111111")]
    #[case(ValidateKind::Cpf, "11144477736")]
    #[case(ValidateKind::Cnpj, "11222333000182")]
    #[case(ValidateKind::TaxId, "123456789012")]
    #[case(ValidateKind::Cep, "0131010")]
    #[case(ValidateKind::Email, "user@domain")]
    #[case(ValidateKind::Email, " a@b.c ")]
    fn rejects_invalid_values(#[case] kind: ValidateKind, #[case] raw: &str) {
        let (_, outcome) = check(kind, raw);
        assert!(outcome.is_err());
    }
}
