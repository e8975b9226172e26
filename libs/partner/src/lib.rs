//! # onboard-partner
//!
//! The partner registration form, independent of any UI.
//!
//! - [`model`]: form fields, the form data itself, and lookup payloads
//! - [`schema`]: field rules and their user-facing messages
//! - [`session`]: masking on edit, auto-fill from lookups, submission
//! - [`debounce`]: the quiet-period timer behind auto-fill
//!
//! Network access goes through the [`PartnerLookups`] trait; `onboard-lookup`
//! provides the HTTP implementation.

pub mod debounce;
pub mod lookups;
pub mod model;
pub mod schema;
pub mod session;

pub use debounce::Debouncer;
pub use lookups::PartnerLookups;
pub use model::{
    identifier_label, identifier_placeholder, Activity, ApiResponse, CnpjResponse, Field,
    PartnerFormData, PartnerType, Shareholder, ViaCepResponse, DEFAULT_COUNTRY,
};
pub use schema::{validate_field, validate_form, FormErrors};
pub use session::{
    Autofill, AutofillDelays, FieldUpdate, FormSession, SharedSession, SubmitOutcome,
};

/// Re-export so callers can name personalities without depending on `onboard-id`.
pub use onboard_id::PersonalityType;
