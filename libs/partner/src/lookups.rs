//! The seam between the form and the network.

use async_trait::async_trait;

use crate::model::{ApiResponse, CnpjResponse, PartnerFormData, ViaCepResponse};

/// External services the form talks to.
///
/// The HTTP implementation lives in `onboard-lookup`; tests substitute an
/// in-memory one.
#[async_trait]
pub trait PartnerLookups: Send + Sync {
    /// Error type for failed lookups. Its `Display` is shown to the user.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches the address of a postal code.
    async fn lookup_address(&self, cep: &str) -> Result<ViaCepResponse, Self::Error>;

    /// Fetches registry data for a CNPJ.
    async fn lookup_company(&self, cnpj: &str) -> Result<CnpjResponse, Self::Error>;

    /// Submits a cleaned (unmasked) form.
    async fn create_partner(&self, data: &PartnerFormData) -> Result<ApiResponse, Self::Error>;

    /// Returns true if the backend answers its health check.
    async fn check_health(&self) -> bool;
}
