//! CLI commands.

mod fill;
mod health;
mod lookup;
mod mask;
mod submit;
mod validate;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use onboard_lookup::{LookupClient, LookupConfig};
use url::Url;

use crate::error::CliError;
use crate::output::OutputFormat;

/// onboard - Register partners from the terminal.
#[derive(Debug, Parser)]
#[command(name = "onboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Onboarding backend URL (overrides ONBOARD_API_BASE_URL).
    #[arg(long, global = true)]
    api_url: Option<Url>,

    /// Postal code service URL (overrides ONBOARD_CEP_BASE_URL).
    #[arg(long, global = true)]
    cep_url: Option<Url>,

    /// Configuration file (TOML, JSON, or YAML).
    #[arg(long, global = true, env = "ONBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply a display mask to a value.
    Mask(mask::MaskCommand),

    /// Check a value (exits 1 if invalid).
    Validate(validate::ValidateCommand),

    /// Look up an address or a company.
    Lookup(lookup::LookupCommand),

    /// Check whether the backend is online.
    Health,

    /// Validate and submit a partner form from a file.
    Submit(submit::SubmitCommand),

    /// Fill in a form from `Field=value` lines on stdin.
    Fill(fill::FillCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Whether logs should be JSON.
    pub fn log_json(&self) -> bool {
        self.log_json
    }

    /// Run the CLI command.
    pub async fn run(self) -> Result<()> {
        let ctx = CommandContext {
            format: OutputFormat::parse(&self.format),
            config_path: self.config,
            api_url: self.api_url,
            cep_url: self.cep_url,
        };

        match self.command {
            Commands::Mask(cmd) => cmd.run(ctx),
            Commands::Validate(cmd) => cmd.run(ctx),
            Commands::Lookup(cmd) => cmd.run(ctx).await,
            Commands::Health => health::run(ctx).await,
            Commands::Submit(cmd) => cmd.run(ctx).await,
            Commands::Fill(cmd) => cmd.run(ctx).await,
            Commands::Version => {
                println!("onboard {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub format: OutputFormat,
    pub config_path: Option<PathBuf>,
    pub api_url: Option<Url>,
    pub cep_url: Option<Url>,
}

impl CommandContext {
    /// Load lookup configuration, with flags taking precedence.
    pub fn lookup_config(&self) -> Result<LookupConfig> {
        let mut config =
            LookupConfig::load(self.config_path.as_deref()).map_err(CliError::Lookup)?;
        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(url) = &self.cep_url {
            config.cep_base_url = url.clone();
        }
        Ok(config)
    }

    /// Get a lookup client for the configured endpoints.
    pub fn client(&self) -> Result<LookupClient> {
        let config = self.lookup_config()?;
        Ok(LookupClient::new(&config).map_err(CliError::Lookup)?)
    }
}
