//! Error handling and display for the CLI.

use colored::Colorize;
use onboard_lookup::LookupError;
use onboard_partner::{Field, FormErrors};
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// A value given to `validate` failed its check.
    #[error("Invalid {kind}: {reason}")]
    InvalidValue { kind: &'static str, reason: String },

    /// The form did not pass validation.
    #[error("{0}")]
    InvalidForm(FormErrors),

    /// The backend refused the submission.
    #[error("{0}")]
    Rejected(String),

    /// A `Field=value` line named no known field.
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// A line on stdin was not `Field=value`.
    #[error("Expected Field=value, got `{0}`")]
    MalformedLine(String),

    /// The backend did not answer its health check.
    #[error("Backend at {0} is offline")]
    Offline(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    let Some(cli_err) = err.downcast_ref::<CliError>() else {
        return;
    };

    match cli_err {
        CliError::InvalidForm(errors) => {
            eprintln!();
            for (field, message) in errors.iter() {
                eprintln!("  {} {}", format!("{field}:").bold(), message);
            }
        }
        CliError::UnknownField(_) | CliError::MalformedLine(_) => {
            let names: Vec<&str> = Field::ALL.iter().map(Field::as_str).collect();
            eprintln!(
                "\n{}",
                format!("Hint: Known fields are {}.", names.join(", ")).yellow()
            );
        }
        CliError::Offline(_) => {
            eprintln!(
                "\n{}",
                "Hint: Check that the backend is running, or pass --api-url.".yellow()
            );
        }
        CliError::Lookup(lookup) if lookup.is_transport() => {
            eprintln!(
                "\n{}",
                "Hint: Check your network connection and the --api-url / --cep-url endpoints."
                    .yellow()
            );
        }
        CliError::Lookup(lookup) if lookup.is_retryable() => {
            eprintln!(
                "\n{}",
                "Hint: The service is busy or failing. Try again in a few minutes.".yellow()
            );
        }
        CliError::Lookup(LookupError::Config(_)) => {
            eprintln!(
                "\n{}",
                "Hint: Check ONBOARD_* environment variables and the --config file.".yellow()
            );
        }
        _ => {}
    }
}
