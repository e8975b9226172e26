//! Lookup client configuration.
//!
//! Endpoints and timings are carried in [`LookupConfig`] and handed to
//! [`crate::LookupClient::new`], so tests can point the clients at mock
//! servers. Values are layered: built-in defaults, then an optional config
//! file, then `ONBOARD_*` environment variables.

use std::path::Path;
use std::time::Duration;

use onboard_partner::AutofillDelays;
use serde::Deserialize;
use url::Url;

use crate::error::LookupError;

/// Public ViaCEP endpoint.
pub const DEFAULT_CEP_BASE_URL: &str = "https://viacep.com.br/ws";

/// Onboarding backend on a developer machine.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Prefix for environment overrides (`ONBOARD_API_BASE_URL`, ...).
pub const ENV_PREFIX: &str = "ONBOARD";

/// Configuration for the lookup and submission clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LookupConfig {
    /// Base URL of the postal code service.
    pub cep_base_url: Url,

    /// Base URL of the onboarding backend (CNPJ lookups, partners, health).
    pub api_base_url: Url,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Quiet period before an address lookup, in milliseconds.
    pub cep_debounce_ms: u64,

    /// Quiet period before a company lookup, in milliseconds.
    pub cnpj_debounce_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            cep_base_url: Url::parse(DEFAULT_CEP_BASE_URL).expect("default CEP URL is valid"),
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default API URL is valid"),
            timeout_secs: 10,
            cep_debounce_ms: 500,
            cnpj_debounce_ms: 1000,
        }
    }
}

impl LookupConfig {
    /// Loads defaults overridden by environment variables.
    ///
    /// Variables:
    /// - `ONBOARD_CEP_BASE_URL` (default: `https://viacep.com.br/ws`)
    /// - `ONBOARD_API_BASE_URL` (default: `http://localhost:3000`)
    /// - `ONBOARD_TIMEOUT_SECS` (default: 10)
    /// - `ONBOARD_CEP_DEBOUNCE_MS` (default: 500)
    /// - `ONBOARD_CNPJ_DEBOUNCE_MS` (default: 1000)
    pub fn from_env() -> Result<Self, LookupError> {
        Self::load(None)
    }

    /// Loads defaults, then `file` (TOML, JSON, or YAML by extension) if
    /// given, then environment variables.
    pub fn load(file: Option<&Path>) -> Result<Self, LookupError> {
        Self::build(file, ::config::Environment::with_prefix(ENV_PREFIX))
    }

    fn build(file: Option<&Path>, env: ::config::Environment) -> Result<Self, LookupError> {
        let defaults = Self::default();
        let mut builder = ::config::Config::builder()
            .set_default("cep_base_url", defaults.cep_base_url.as_str())?
            .set_default("api_base_url", defaults.api_base_url.as_str())?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("cep_debounce_ms", defaults.cep_debounce_ms)?
            .set_default("cnpj_debounce_ms", defaults.cnpj_debounce_ms)?;

        if let Some(path) = file {
            builder = builder.add_source(::config::File::from(path));
        }

        let config = builder
            .add_source(env)
            .build()?
            .try_deserialize::<Self>()?;

        tracing::debug!(
            cep_base_url = %config.cep_base_url,
            api_base_url = %config.api_base_url,
            timeout_secs = config.timeout_secs,
            "lookup configuration loaded"
        );
        Ok(config)
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Debounce periods for the form's auto-fill.
    pub fn autofill_delays(&self) -> AutofillDelays {
        AutofillDelays {
            address: Duration::from_millis(self.cep_debounce_ms),
            company: Duration::from_millis(self.cnpj_debounce_ms),
        }
    }

    /// Configuration pointing both services at one local mock server.
    pub fn local_mock(base_url: &str) -> Result<Self, LookupError> {
        let url = Url::parse(base_url)?;
        Ok(Self {
            cep_base_url: url.clone(),
            api_base_url: url,
            timeout_secs: 5,
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> ::config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ::config::Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = LookupConfig::build(None, env(&[])).unwrap();
        assert_eq!(config, LookupConfig::default());
        assert_eq!(config.cep_base_url.as_str(), "https://viacep.com.br/ws");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_env_overrides() {
        let config = LookupConfig::build(
            None,
            env(&[
                ("ONBOARD_API_BASE_URL", "https://partners.example.com"),
                ("ONBOARD_TIMEOUT_SECS", "3"),
                ("ONBOARD_CNPJ_DEBOUNCE_MS", "250"),
            ]),
        )
        .unwrap();
        assert_eq!(config.api_base_url.as_str(), "https://partners.example.com/");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(
            config.autofill_delays().company,
            Duration::from_millis(250)
        );
        assert_eq!(config.autofill_delays().address, Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = LookupConfig::build(None, env(&[("ONBOARD_API_BASE_URL", "not a url")]));
        assert!(matches!(result, Err(LookupError::Config(_))));
    }

    #[test]
    fn test_local_mock() {
        let config = LookupConfig::local_mock("http://127.0.0.1:4000").unwrap();
        assert_eq!(config.cep_base_url, config.api_base_url);
        assert_eq!(config.timeout_secs, 5);
    }
}
