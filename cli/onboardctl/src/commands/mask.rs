//! Mask command.

use anyhow::Result;
use clap::{Args, ValueEnum};
use onboard_id::{
    extract_digits, format_identifier_by_type, format_individual, format_legal_entity,
    format_phone, format_postal_code, PersonalityType,
};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_output, OutputFormat};

use super::CommandContext;

/// Apply a display mask to a value.
#[derive(Debug, Args)]
pub struct MaskCommand {
    /// Kind of value.
    kind: MaskKind,

    /// Raw input; anything but digits is ignored.
    value: String,

    /// Personality for tax-id masking (Física or Jurídica).
    ///
    /// Without it, up to 11 digits are masked as CPF and longer input as CNPJ.
    #[arg(long)]
    personality: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MaskKind {
    Cpf,
    Cnpj,
    TaxId,
    Cep,
    Phone,
}

impl MaskKind {
    fn label(self) -> &'static str {
        match self {
            MaskKind::Cpf => "CPF",
            MaskKind::Cnpj => "CNPJ",
            MaskKind::TaxId => "CNPJ/CPF",
            MaskKind::Cep => "CEP",
            MaskKind::Phone => "Phone",
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct MaskRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,

    #[tabled(rename = "Digits")]
    digits: String,

    #[tabled(rename = "Masked")]
    masked: String,
}

impl MaskCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let personality = self.personality.as_deref().and_then(|raw| {
            let parsed = PersonalityType::parse_lenient(raw);
            if parsed.is_none() {
                tracing::warn!(personality = %raw, "unrecognized personality, masking by length");
            }
            parsed
        });

        let row = MaskRow {
            kind: self.kind.label(),
            digits: extract_digits(&self.value),
            masked: apply(self.kind, &self.value, personality),
        };

        match ctx.format {
            OutputFormat::Table => println!("{}", row.masked),
            OutputFormat::Json => print_output(&[row], ctx.format),
        }
        Ok(())
    }
}

fn apply(kind: MaskKind, value: &str, personality: Option<PersonalityType>) -> String {
    match kind {
        MaskKind::Cpf => format_individual(value),
        MaskKind::Cnpj => format_legal_entity(value),
        MaskKind::TaxId => format_identifier_by_type(value, personality),
        MaskKind::Cep => format_postal_code(value),
        MaskKind::Phone => format_phone(value),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(MaskKind::Cpf, "11144477735", None, "111.444.777-35")]
    #[case(MaskKind::Cnpj, "11222333000181", None, "11.222.333/0001-81")]
    #[case(MaskKind::TaxId, "1122233300", None, "112.223.330-0")]
    #[case(
        MaskKind::TaxId,
        "1122233300",
        Some(PersonalityType::LegalEntity),
        "11.222.333/00"
    )]
    #[case(MaskKind::Cep, "01310100", None, "01310-100")]
    #[case(MaskKind::Phone, "11987654321", None, "(11) 98765-4321")]
    fn applies_mask_for_kind(
        #[case] kind: MaskKind,
        #[case] value: &str,
        #[case] personality: Option<PersonalityType>,
        #[case] expected: &str,
    ) {
        assert_eq!(apply(kind, value, personality), expected);
    }
}
