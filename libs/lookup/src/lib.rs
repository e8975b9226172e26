//! # onboard-lookup
//!
//! HTTP side of partner onboarding:
//!
//! - [`CepClient`]: address lookups against ViaCEP
//! - [`PartnerApiClient`]: CNPJ lookups, partner creation, health checks
//! - [`LookupClient`]: both behind one [`PartnerLookups`] implementation
//!
//! Endpoints come from [`LookupConfig`].

pub mod api;
pub mod cep;
pub mod config;
pub mod error;

use async_trait::async_trait;
use onboard_partner::{ApiResponse, CnpjResponse, PartnerFormData, PartnerLookups, ViaCepResponse};

pub use api::PartnerApiClient;
pub use cep::CepClient;
pub use config::LookupConfig;
pub use error::LookupError;

/// Address, company, and partner endpoints sharing one connection pool.
#[derive(Debug, Clone)]
pub struct LookupClient {
    cep: CepClient,
    api: PartnerApiClient,
}

impl LookupClient {
    /// Builds the clients described by `config`.
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("onboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| LookupError::Http {
                endpoint: "client",
                source,
            })?;

        Ok(Self {
            cep: CepClient::new(http.clone(), config.cep_base_url.as_str()),
            api: PartnerApiClient::new(http, config.api_base_url.as_str()),
        })
    }

    /// The postal code client.
    pub fn cep(&self) -> &CepClient {
        &self.cep
    }

    /// The backend client.
    pub fn api(&self) -> &PartnerApiClient {
        &self.api
    }
}

#[async_trait]
impl PartnerLookups for LookupClient {
    type Error = LookupError;

    async fn lookup_address(&self, cep: &str) -> Result<ViaCepResponse, LookupError> {
        self.cep.fetch(cep).await
    }

    async fn lookup_company(&self, cnpj: &str) -> Result<CnpjResponse, LookupError> {
        self.api.fetch_company(cnpj).await
    }

    async fn create_partner(&self, data: &PartnerFormData) -> Result<ApiResponse, LookupError> {
        self.api.create_partner(data).await
    }

    async fn check_health(&self) -> bool {
        self.api.check_health().await
    }
}
