//! Client for the onboarding backend: company lookups, partner creation,
//! and health checks.

use onboard_id::extract_digits;
use onboard_partner::{ApiResponse, CnpjResponse, PartnerFormData};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::LookupError;

const ENDPOINT: &str = "partner-api";
const CNPJ_LEN: usize = 14;

/// Message used when the backend has no company data and gives no reason.
pub const CNPJ_NOT_FOUND_MESSAGE: &str = "CNPJ não encontrado";

/// Client for the onboarding backend.
#[derive(Debug, Clone)]
pub struct PartnerApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PartnerApiClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:3000`).
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches registry data for `cnpj`. Masked and unmasked input both work.
    ///
    /// Transport failures, bad bodies, and error statuses without a message
    /// become [`LookupError::CompanyLookupFailed`].
    pub async fn fetch_company(&self, cnpj: &str) -> Result<CnpjResponse, LookupError> {
        self.request_company(cnpj)
            .await
            .map_err(|err| unexplained(err, |cause| LookupError::CompanyLookupFailed { cause }))
    }

    async fn request_company(&self, cnpj: &str) -> Result<CnpjResponse, LookupError> {
        let digits = extract_digits(cnpj);
        if digits.len() != CNPJ_LEN {
            return Err(LookupError::InvalidCnpj {
                digits: digits.len(),
            });
        }

        let url = self.url(&format!("/cnpj/{digits}"));
        debug!(url = %url, "fetching company");

        let response = self.http.get(&url).send().await.map_err(http_error)?;
        let status = response.status();

        if !status.is_success() {
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => LookupError::RateLimited,
                StatusCode::BAD_REQUEST => LookupError::CnpjRejected,
                _ => match error_message(response).await {
                    Some(message) => LookupError::Api {
                        status: status.as_u16(),
                        message,
                    },
                    None => LookupError::UnexpectedStatus {
                        endpoint: ENDPOINT,
                        status: status.as_u16(),
                    },
                },
            });
        }

        let body: ApiResponse<CnpjResponse> = decode(response).await?;
        match body {
            ApiResponse {
                success: true,
                data: Some(company),
                ..
            } => Ok(company),
            ApiResponse { message, .. } => Err(LookupError::CnpjNotFound {
                message: if message.is_empty() {
                    CNPJ_NOT_FOUND_MESSAGE.to_string()
                } else {
                    message
                },
            }),
        }
    }

    /// Submits a partner. `data` should already be cleaned of masks.
    ///
    /// A 2xx answer is returned as-is, including `success: false`; error
    /// statuses become [`LookupError`]s, preferring the backend's message.
    /// Anything without a reason becomes [`LookupError::SubmitFailed`].
    pub async fn create_partner(&self, data: &PartnerFormData) -> Result<ApiResponse, LookupError> {
        self.send_partner(data)
            .await
            .map_err(|err| unexplained(err, |cause| LookupError::SubmitFailed { cause }))
    }

    async fn send_partner(&self, data: &PartnerFormData) -> Result<ApiResponse, LookupError> {
        let url = self.url("/partners");
        debug!(url = %url, "submitting partner");

        let response = self
            .http
            .post(&url)
            .json(data)
            .send()
            .await
            .map_err(http_error)?;
        let status = response.status();

        if status.is_success() {
            return decode(response).await;
        }

        let message = error_message(response).await;
        warn!(status = status.as_u16(), message = ?message, "partner submission refused");

        Err(match (message, status) {
            (Some(message), _) => LookupError::Api {
                status: status.as_u16(),
                message,
            },
            (None, StatusCode::BAD_REQUEST) => LookupError::InvalidPartner,
            (None, StatusCode::INTERNAL_SERVER_ERROR) => LookupError::Server,
            (None, _) => LookupError::UnexpectedStatus {
                endpoint: ENDPOINT,
                status: status.as_u16(),
            },
        })
    }

    /// Returns true if `GET /health` answers 200. Network errors count as
    /// offline.
    pub async fn check_health(&self) -> bool {
        match self.http.get(self.url("/health")).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(err) => {
                debug!(error = %err, "health check failed");
                false
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

fn http_error(source: reqwest::Error) -> LookupError {
    LookupError::Http {
        endpoint: ENDPOINT,
        source,
    }
}

/// Wraps failures the backend did not explain in the endpoint's generic error.
fn unexplained(err: LookupError, generic: fn(Box<LookupError>) -> LookupError) -> LookupError {
    match err {
        LookupError::Http { .. }
        | LookupError::UnexpectedStatus { .. }
        | LookupError::Decode { .. } => {
            warn!(error = %err, "partner-api request failed");
            generic(Box::new(err))
        }
        other => other,
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, LookupError> {
    let body = response.bytes().await.map_err(http_error)?;
    serde_json::from_slice(&body).map_err(|source| LookupError::Decode {
        endpoint: ENDPOINT,
        source,
    })
}

/// Message from an error body, if it has a non-empty one.
async fn error_message(response: reqwest::Response) -> Option<String> {
    let body = response.bytes().await.ok()?;
    serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = PartnerApiClient::new(reqwest::Client::new(), "http://localhost:3000/");
        assert_eq!(client.url("/health"), "http://localhost:3000/health");
    }

    #[tokio::test]
    async fn test_short_cnpj_rejected_without_request() {
        let client = PartnerApiClient::new(reqwest::Client::new(), "http://127.0.0.1:9");
        let err = client.fetch_company("11.222.333/0001").await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidCnpj { digits: 12 }));
    }

    #[test]
    fn test_unexplained_keeps_specific_errors() {
        let wrap = |cause| LookupError::SubmitFailed { cause };
        assert!(matches!(
            unexplained(LookupError::InvalidPartner, wrap),
            LookupError::InvalidPartner
        ));
        assert!(matches!(
            unexplained(
                LookupError::UnexpectedStatus {
                    endpoint: ENDPOINT,
                    status: 422
                },
                wrap
            ),
            LookupError::SubmitFailed { .. }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_offline() {
        let client = PartnerApiClient::new(reqwest::Client::new(), "http://127.0.0.1:9");
        assert!(!client.check_health().await);
    }
}
