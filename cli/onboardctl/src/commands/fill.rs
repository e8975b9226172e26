//! Fill command: enter a form line by line, the way the web form is typed.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use onboard_lookup::LookupClient;
use onboard_partner::{Autofill, Field, FormSession, SharedSession};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

use crate::error::CliError;
use crate::output::{print_info, print_record, print_warning, OutputFormat};

use super::submit::{form_rows, report_outcome, require_online, FormReport};
use super::CommandContext;

/// Fill in a form from `Field=value` lines on stdin.
///
/// The backend must pass its health check first, unless `--force` is given.
/// Each value is masked as it is entered. A complete postal code or CNPJ
/// triggers the address or company lookup once input pauses. Blank lines and
/// lines starting with `#` are ignored.
#[derive(Debug, Args)]
pub struct FillCommand {
    /// Submit the form when input ends.
    #[arg(long)]
    submit: bool,

    /// Do not look up addresses or companies.
    #[arg(long)]
    no_autofill: bool,

    /// Stop at the first malformed line instead of skipping it.
    #[arg(long)]
    strict: bool,

    /// Continue even if the backend fails its health check.
    #[arg(long)]
    force: bool,
}

impl FillCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let config = ctx.lookup_config()?;
        let client = LookupClient::new(&config).map_err(CliError::Lookup)?;
        let mut session = FormSession::new(client);
        require_online(&mut session, &config.api_base_url, self.force).await?;
        let session: SharedSession<LookupClient> = Arc::new(Mutex::new(session));

        let autofill = (!self.no_autofill)
            .then(|| Autofill::spawn(Arc::clone(&session), config.autofill_delays()));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
            let (field, value) = match parse_line(&line) {
                Ok(Some(entry)) => entry,
                Ok(None) => continue,
                Err(err) if self.strict => return Err(err.into()),
                Err(err) => {
                    print_warning(&err.to_string());
                    continue;
                }
            };

            let mut guard = session.lock().await;
            let update = guard.set_field(field, value);
            if let Some(autofill) = &autofill {
                autofill.notify(&update, guard.data());
            }
            drop(guard);

            if ctx.format == OutputFormat::Table {
                for cleared in &update.cleared {
                    print_info(&format!("{cleared} cleared after {field} changed"));
                }
            }
        }

        if let Some(autofill) = autofill {
            autofill.finish().await;
        }

        let mut session = session.lock().await;

        if self.submit {
            return report_outcome(session.submit().await, ctx.format);
        }

        let report = FormReport::new(session.data());
        print_record(&report, &form_rows(session.data()), ctx.format);
        if !report.errors.is_empty() && ctx.format == OutputFormat::Table {
            print_warning(&format!(
                "{} field(s) still invalid; fix them before submitting.",
                report.errors.len()
            ));
        }
        Ok(())
    }
}

/// Splits `Field=value`. Returns `None` for blank and comment lines.
fn parse_line(line: &str) -> Result<Option<(Field, &str)>, CliError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (name, value) = trimmed
        .split_once('=')
        .ok_or_else(|| CliError::MalformedLine(trimmed.to_string()))?;
    let field = Field::from_name(name.trim())
        .ok_or_else(|| CliError::UnknownField(name.trim().to_string()))?;

    Ok(Some((field, value.trim())))
}
