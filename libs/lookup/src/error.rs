//! Lookup error types.
//!
//! Messages are the Portuguese texts the form shows to the user; the
//! structured fields carry what logs and callers need.

use thiserror::Error;

/// Errors from the postal code, company, and partner endpoints.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The postal code does not have eight digits.
    #[error("CEP deve ter 8 dígitos (recebido {digits})")]
    InvalidCep { digits: usize },

    /// The postal code service has no address for this code.
    #[error("CEP não encontrado")]
    CepNotFound { cep: String },

    /// The CNPJ does not have fourteen digits.
    #[error("CNPJ deve ter 14 dígitos (recebido {digits})")]
    InvalidCnpj { digits: usize },

    /// The backend answered without company data.
    #[error("{message}")]
    CnpjNotFound { message: String },

    /// The backend refused the CNPJ as malformed.
    #[error("CNPJ inválido.")]
    CnpjRejected,

    /// Too many company lookups in a short time.
    #[error("Muitas consultas. Tente novamente em alguns minutos.")]
    RateLimited,

    /// The backend refused the partner data.
    #[error("Dados inválidos. Verifique os campos e tente novamente.")]
    InvalidPartner,

    /// The backend failed while handling the request.
    #[error("Erro interno do servidor. Tente novamente mais tarde.")]
    Server,

    /// A company lookup failed and the backend gave no reason.
    #[error("Erro ao consultar CNPJ. Tente novamente mais tarde.")]
    CompanyLookupFailed {
        #[source]
        cause: Box<LookupError>,
    },

    /// A partner submission failed and the backend gave no reason.
    #[error("Erro ao cadastrar parceiro. Verifique sua conexão e tente novamente.")]
    SubmitFailed {
        #[source]
        cause: Box<LookupError>,
    },

    /// Any other error status that came with a message.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Error status without a usable body.
    #[error("{endpoint} respondeu com status {status}")]
    UnexpectedStatus { endpoint: &'static str, status: u16 },

    /// The request could not be sent or timed out.
    #[error("Falha de comunicação com {endpoint}: {source}")]
    Http {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not the expected JSON.
    #[error("Resposta inválida de {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// A configured URL is malformed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl LookupError {
    /// HTTP status behind this error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited => Some(429),
            Self::CnpjRejected | Self::InvalidPartner => Some(400),
            Self::Server => Some(500),
            Self::Api { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::CompanyLookupFailed { cause } | Self::SubmitFailed { cause } => cause.status(),
            _ => None,
        }
    }

    /// Returns true if the looked-up record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CepNotFound { .. } | Self::CnpjNotFound { .. })
    }

    /// Returns true if retrying later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited | Self::Server => true,
            Self::Http { source, .. } => source.is_timeout() || source.is_connect(),
            Self::UnexpectedStatus { status, .. } => *status >= 500,
            Self::CompanyLookupFailed { cause } | Self::SubmitFailed { cause } => {
                cause.is_retryable()
            }
            _ => false,
        }
    }

    /// Returns true if the request never got an answer.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Http { .. } => true,
            Self::CompanyLookupFailed { cause } | Self::SubmitFailed { cause } => {
                cause.is_transport()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(LookupError::RateLimited.status(), Some(429));
        assert_eq!(LookupError::CnpjRejected.status(), Some(400));
        assert_eq!(
            LookupError::Api {
                status: 404,
                message: "x".into()
            }
            .status(),
            Some(404)
        );
        assert_eq!(LookupError::InvalidCep { digits: 3 }.status(), None);
    }

    #[test]
    fn test_classification() {
        assert!(LookupError::CepNotFound { cep: "00000000".into() }.is_not_found());
        assert!(!LookupError::RateLimited.is_not_found());
        assert!(LookupError::RateLimited.is_retryable());
        assert!(!LookupError::InvalidPartner.is_retryable());
        assert!(LookupError::UnexpectedStatus {
            endpoint: "viacep",
            status: 503
        }
        .is_retryable());
    }

    #[test]
    fn test_generic_failures_delegate_to_cause() {
        let err = LookupError::SubmitFailed {
            cause: Box::new(LookupError::UnexpectedStatus {
                endpoint: "partner-api",
                status: 503,
            }),
        };
        assert_eq!(err.status(), Some(503));
        assert!(err.is_retryable());
        assert!(!err.is_transport());
        assert_eq!(
            err.to_string(),
            "Erro ao cadastrar parceiro. Verifique sua conexão e tente novamente."
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_messages() {
        assert_eq!(LookupError::CepNotFound { cep: "1".into() }.to_string(), "CEP não encontrado");
        assert_eq!(
            LookupError::CnpjNotFound {
                message: "CNPJ não encontrado".into()
            }
            .to_string(),
            "CNPJ não encontrado"
        );
    }
}
