//! Submit command, plus the form helpers shared with `fill`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use onboard_lookup::LookupClient;
use onboard_partner::{
    validate_field, validate_form, Field, FormSession, PartnerFormData, PartnerLookups,
    SubmitOutcome,
};
use serde::Serialize;
use tabled::Tabled;
use url::Url;

use crate::error::CliError;
use crate::output::{print_output, print_record, print_success, print_warning, OutputFormat};

use super::CommandContext;

/// Validate and submit a partner form from a file.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Form file: `.toml`, or JSON for any other extension.
    ///
    /// Keys are the PascalCase field names (`CnpjCpf`, `ZipCode`, ...).
    file: PathBuf,

    /// Validate only and print the payload that would be sent.
    #[arg(long)]
    dry_run: bool,

    /// Submit even if the backend fails its health check.
    #[arg(long)]
    force: bool,
}

impl SubmitCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let data = load_form(&self.file)?;
        let config = ctx.lookup_config()?;
        let mut session = FormSession::new(LookupClient::new(&config).map_err(CliError::Lookup)?);
        replay(&mut session, &data);

        if self.dry_run {
            validate_form(session.data()).map_err(CliError::InvalidForm)?;
            let payload = session.data().cleaned();
            print_record(&payload, &form_rows(session.data()), ctx.format);
            return Ok(());
        }

        require_online(&mut session, &config.api_base_url, self.force).await?;
        report_outcome(session.submit().await, ctx.format)
    }
}

/// One form field as shown to the user.
#[derive(Debug, Serialize, Tabled)]
pub(super) struct FormRow {
    #[tabled(rename = "Field")]
    field: Field,

    #[tabled(rename = "Value")]
    value: String,

    #[tabled(rename = "Error")]
    error: String,
}

/// The form plus its validation messages, for JSON output.
#[derive(Debug, Serialize)]
pub(super) struct FormReport<'a> {
    pub form: &'a PartnerFormData,
    pub errors: BTreeMap<Field, String>,
}

impl<'a> FormReport<'a> {
    pub fn new(form: &'a PartnerFormData) -> Self {
        let errors = Field::ALL
            .into_iter()
            .filter_map(|field| validate_field(form, field).map(|message| (field, message)))
            .collect();
        Self { form, errors }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Status")]
    status: &'static str,

    #[tabled(rename = "Message")]
    message: String,
}

/// Reads a form file.
pub(super) fn load_form(path: &Path) -> Result<PartnerFormData> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read form file {}", path.display()))?;
    parse_form(&text, path.extension().and_then(|ext| ext.to_str()))
}

fn parse_form(text: &str, extension: Option<&str>) -> Result<PartnerFormData> {
    match extension {
        Some("toml") => toml::from_str(text).context("Invalid TOML form"),
        _ => serde_json::from_str(text).context("Invalid JSON form"),
    }
}

/// Enters every non-empty field through the session so masks apply.
pub(super) fn replay<L: PartnerLookups>(session: &mut FormSession<L>, data: &PartnerFormData) {
    for field in Field::ALL {
        match data.get(field) {
            Some(value) if !value.is_empty() => {
                session.set_field(field, value);
            }
            _ => {}
        }
    }
}

/// Fails with [`CliError::Offline`] unless the backend answers or `force` is set.
pub(super) async fn require_online<L: PartnerLookups>(
    session: &mut FormSession<L>,
    backend: &Url,
    force: bool,
) -> Result<()> {
    if session.check_server().await {
        return Ok(());
    }
    if !force {
        return Err(CliError::Offline(backend.to_string()).into());
    }
    print_warning(&format!("Backend at {backend} is offline; continuing because of --force."));
    Ok(())
}

/// Field/value/error rows in form order.
pub(super) fn form_rows(data: &PartnerFormData) -> Vec<FormRow> {
    Field::ALL
        .into_iter()
        .map(|field| FormRow {
            field,
            value: data.get(field).unwrap_or_default().to_string(),
            error: validate_field(data, field).unwrap_or_default(),
        })
        .collect()
}

/// Prints a successful outcome or turns a failed one into an error.
pub(super) fn report_outcome(outcome: SubmitOutcome, format: OutputFormat) -> Result<()> {
    match outcome {
        SubmitOutcome::Created { message } => {
            match format {
                OutputFormat::Table => print_success(&message),
                OutputFormat::Json => print_output(
                    &[OutcomeRow {
                        status: "created",
                        message,
                    }],
                    format,
                ),
            }
            Ok(())
        }
        SubmitOutcome::Rejected { message } => Err(CliError::Rejected(message).into()),
        SubmitOutcome::Invalid(errors) => Err(CliError::InvalidForm(errors).into()),
    }
}

#[cfg(test)]
mod tests {
    use onboard_lookup::LookupConfig;
    use onboard_partner::{PartnerType, PersonalityType};

    use super::*;
    use crate::output::render_record;

    const TOML_FORM: &str = r#"
PartnerType = "Despachante"
PersonalityType = "Jurídica"
CnpjCpf = "11222333000181"
CompanyName = "Empresa Exemplo LTDA"
TradeName = "Exemplo"
Segment = "Logística"
Category = "Aduaneiro"
ZipCode = "01310100"
Country = "Brasil"
State = "sp"
City = "São Paulo"
Street = "Avenida Paulista"
Number = "1000"
District = "Bela Vista"
Email = "contato@exemplo.com.br"
Phone = "1123456789"
"#;

    fn offline_session() -> FormSession<LookupClient> {
        let config = LookupConfig::local_mock("http://127.0.0.1:9").unwrap();
        FormSession::new(LookupClient::new(&config).unwrap())
    }

    #[test]
    fn parses_toml_and_json_forms() {
        let from_toml = parse_form(TOML_FORM, Some("toml")).unwrap();
        assert_eq!(from_toml.partner_type, Some(PartnerType::CustomsBroker));
        assert_eq!(from_toml.personality_type, Some(PersonalityType::LegalEntity));

        let json = serde_json::to_string(&from_toml).unwrap();
        let from_json = parse_form(&json, Some("json")).unwrap();
        assert_eq!(from_json, from_toml);
    }

    #[test]
    fn rejects_malformed_form() {
        assert!(parse_form("{ not json", None).is_err());
    }

    #[test]
    fn replay_applies_masks() {
        let data = parse_form(TOML_FORM, Some("toml")).unwrap();
        let mut session = offline_session();
        replay(&mut session, &data);

        let form = session.data();
        assert_eq!(form.cnpj_cpf, "11.222.333/0001-81");
        assert_eq!(form.zip_code, "01310-100");
        assert_eq!(form.phone, "(11) 2345-6789");
        assert_eq!(form.state, "SP");
        assert!(validate_form(form).is_ok());
    }

    #[test]
    fn form_rows_carry_errors() {
        let rows = form_rows(&PartnerFormData::default());
        assert_eq!(rows.len(), Field::ALL.len());
        let email = rows.iter().find(|r| r.field == Field::Email).unwrap();
        assert!(!email.error.is_empty());
        let notes = rows.iter().find(|r| r.field == Field::Notes).unwrap();
        assert!(notes.error.is_empty());
    }

    #[test]
    fn report_lists_only_failing_fields() {
        let data = parse_form(TOML_FORM, Some("toml")).unwrap();
        let mut session = offline_session();
        replay(&mut session, &data);
        assert!(FormReport::new(session.data()).errors.is_empty());

        let empty = PartnerFormData::default();
        let report = FormReport::new(&empty);
        assert!(report.errors.contains_key(&Field::CnpjCpf));
        assert!(!report.errors.contains_key(&Field::Notes));
    }

    #[test]
    fn dry_run_table_lists_every_field() {
        let data = parse_form(TOML_FORM, Some("toml")).unwrap();
        let mut session = offline_session();
        replay(&mut session, &data);

        let rows = form_rows(session.data());
        let table = render_record(&session.data().cleaned(), &rows, OutputFormat::Table);
        assert!(table.contains("CnpjCpf"));
        assert!(table.contains("11.222.333/0001-81"));

        let json = render_record(&session.data().cleaned(), &rows, OutputFormat::Json);
        assert!(json.contains("\"11222333000181\""));
    }

    #[tokio::test]
    async fn offline_backend_blocks_submission() {
        let mut session = offline_session();
        let backend = Url::parse("http://127.0.0.1:9").unwrap();

        let err = require_online(&mut session, &backend, false).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Offline(url)) if url == "http://127.0.0.1:9/"
        ));

        assert!(require_online(&mut session, &backend, true).await.is_ok());
    }

    #[test]
    fn rejected_outcome_is_error() {
        let result = report_outcome(
            SubmitOutcome::Rejected {
                message: "CNPJ/CPF já cadastrado".into(),
            },
            OutputFormat::Table,
        );
        assert_eq!(result.unwrap_err().to_string(), "CNPJ/CPF já cadastrado");
    }
}
