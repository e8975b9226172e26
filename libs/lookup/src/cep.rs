//! Postal code (CEP) lookups against ViaCEP.

use onboard_id::extract_digits;
use onboard_partner::ViaCepResponse;
use tracing::debug;

use crate::error::LookupError;

const ENDPOINT: &str = "viacep";
const CEP_LEN: usize = 8;

/// Client for the ViaCEP address service.
#[derive(Debug, Clone)]
pub struct CepClient {
    http: reqwest::Client,
    base_url: String,
}

impl CepClient {
    /// Creates a client for `base_url` (e.g. `https://viacep.com.br/ws`).
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, digits: &str) -> String {
        format!("{}/{}/json/", self.base_url, digits)
    }

    /// Fetches the address for `cep`. Masked and unmasked input both work.
    ///
    /// ViaCEP answers unknown codes with `200 {"erro": true}`; that becomes
    /// [`LookupError::CepNotFound`].
    pub async fn fetch(&self, cep: &str) -> Result<ViaCepResponse, LookupError> {
        let digits = extract_digits(cep);
        if digits.len() != CEP_LEN {
            return Err(LookupError::InvalidCep {
                digits: digits.len(),
            });
        }

        let url = self.url(&digits);
        debug!(url = %url, "fetching address");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| LookupError::Http {
                endpoint: ENDPOINT,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::UnexpectedStatus {
                endpoint: ENDPOINT,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| LookupError::Http {
            endpoint: ENDPOINT,
            source,
        })?;
        let value: serde_json::Value =
            serde_json::from_slice(&body).map_err(|source| LookupError::Decode {
                endpoint: ENDPOINT,
                source,
            })?;

        if value.get("erro").is_some() {
            return Err(LookupError::CepNotFound { cep: digits });
        }

        serde_json::from_value(value).map_err(|source| LookupError::Decode {
            endpoint: ENDPOINT,
            source,
        })
    }
}
