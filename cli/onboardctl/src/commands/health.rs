//! Health command.

use anyhow::Result;
use onboard_lookup::LookupClient;
use onboard_partner::PartnerLookups;
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{print_output, print_success, OutputFormat};

use super::CommandContext;

#[derive(Debug, Serialize, Tabled)]
struct HealthRow {
    #[tabled(rename = "Backend")]
    backend: String,

    #[tabled(rename = "Online")]
    online: bool,
}

/// Probe the backend; fails if it is offline.
pub async fn run(ctx: CommandContext) -> Result<()> {
    let config = ctx.lookup_config()?;
    let client = LookupClient::new(&config).map_err(CliError::Lookup)?;
    let backend = config.api_base_url.to_string();

    let online = client.check_health().await;
    tracing::debug!(backend = %backend, online, "health check");

    match ctx.format {
        OutputFormat::Table if online => print_success(&format!("Backend at {backend} is online")),
        OutputFormat::Table => {}
        OutputFormat::Json => print_output(
            &[HealthRow {
                backend: backend.clone(),
                online,
            }],
            ctx.format,
        ),
    }

    if online {
        Ok(())
    } else {
        Err(CliError::Offline(backend).into())
    }
}
