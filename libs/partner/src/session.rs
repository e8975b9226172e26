//! Form session: field edits, auto-fill, and submission.
//!
//! A [`FormSession`] owns one in-progress form. Edits go through
//! [`FormSession::set_field`], which applies the field's mask and re-validates
//! it. Lookups are explicit calls here; [`Autofill`] wires them to debounced
//! edits for interactive use.

use std::sync::Arc;
use std::time::Duration;

use onboard_id::{
    format_identifier_by_type, format_phone, format_postal_code, is_valid_postal_code,
    remove_mask, PersonalityType,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::debounce::Debouncer;
use crate::lookups::PartnerLookups;
use crate::model::{Field, PartnerFormData};
use crate::schema::{validate_field, validate_form, FormErrors};

/// Message shown after a successful submission.
pub const CREATED_MESSAGE: &str = "Parceiro cadastrado com sucesso!";

/// Message shown when the backend rejects a submission without explaining why.
pub const REJECTED_MESSAGE: &str = "Erro ao cadastrar parceiro";

const CNPJ_DIGITS: usize = 14;
const STATE_LEN: usize = 2;

/// Result of editing one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    /// The edited field.
    pub field: Field,
    /// The value as stored (masked where the field has a mask).
    pub value: String,
    /// The field's validation message, if it is currently invalid.
    pub error: Option<String>,
    /// Other fields cleared as a side effect of this edit.
    pub cleared: Vec<Field>,
}

/// Result of submitting the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend accepted the partner. The form has been reset.
    Created { message: String },
    /// The backend (or the network) refused the submission.
    Rejected { message: String },
    /// The form did not pass validation; nothing was sent.
    Invalid(FormErrors),
}

/// One partner form being filled in.
pub struct FormSession<L> {
    lookups: L,
    data: PartnerFormData,
    server_online: bool,
}

impl<L: PartnerLookups> FormSession<L> {
    /// Starts an empty form.
    pub fn new(lookups: L) -> Self {
        Self::with_data(lookups, PartnerFormData::default())
    }

    /// Starts from existing values (e.g. a form loaded from a file).
    pub fn with_data(lookups: L, data: PartnerFormData) -> Self {
        Self {
            lookups,
            data,
            server_online: false,
        }
    }

    /// Current form values.
    pub fn data(&self) -> &PartnerFormData {
        &self.data
    }

    /// The lookup backend.
    pub fn lookups(&self) -> &L {
        &self.lookups
    }

    /// Result of the last [`FormSession::check_server`].
    pub fn server_online(&self) -> bool {
        self.server_online
    }

    /// Probes the backend and remembers whether it answered.
    pub async fn check_server(&mut self) -> bool {
        self.server_online = self.lookups.check_health().await;
        if !self.server_online {
            warn!("backend is not responding");
        }
        self.server_online
    }

    /// Edits a field the way the form input would.
    ///
    /// - `CnpjCpf` is masked as CPF or CNPJ according to the current personality
    /// - `ZipCode` gets the postal mask, `Phone`/`MobilePhone` the phone mask
    /// - `State` is upper-cased and cut to two characters
    /// - choosing a different `PersonalityType` clears `CnpjCpf`
    pub fn set_field(&mut self, field: Field, raw: &str) -> FieldUpdate {
        let mut cleared = Vec::new();

        let value = match field {
            Field::CnpjCpf => format_identifier_by_type(raw, self.data.personality_type),
            Field::ZipCode => format_postal_code(raw),
            Field::Phone | Field::MobilePhone => format_phone(raw),
            Field::State => raw.to_uppercase().chars().take(STATE_LEN).collect(),
            Field::PersonalityType => {
                let next = PersonalityType::parse_lenient(raw);
                if next.is_some() && next != self.data.personality_type {
                    self.data.cnpj_cpf.clear();
                    cleared.push(Field::CnpjCpf);
                }
                raw.to_string()
            }
            _ => raw.to_string(),
        };

        self.data.set_raw(field, value);
        let value = self.data.get(field).unwrap_or_default().to_string();
        debug!(field = %field, value = %value, "field updated");

        FieldUpdate {
            field,
            error: validate_field(&self.data, field),
            value,
            cleared,
        }
    }

    /// Looks up the postal code and fills in the address.
    ///
    /// Does nothing unless the postal code has eight digits. Lookup failures
    /// are logged and leave the form untouched. Returns the filled fields.
    pub async fn autofill_address(&mut self) -> Option<Vec<Field>> {
        let cep = self.data.zip_code.clone();
        if !is_valid_postal_code(&cep) {
            return None;
        }

        match self.lookups.lookup_address(&cep).await {
            Ok(address) => {
                let touched = self.data.apply_address(&address);
                info!(cep = %remove_mask(&cep), city = %address.city, "address filled from postal code");
                Some(touched)
            }
            Err(err) => {
                warn!(cep = %remove_mask(&cep), error = %err, "address lookup failed");
                None
            }
        }
    }

    /// Looks up the CNPJ and fills in company details.
    ///
    /// Only runs for legal entities with a complete 14-digit identifier.
    /// Lookup failures are logged and leave the form untouched. Returns the
    /// filled fields.
    pub async fn autofill_company(&mut self) -> Option<Vec<Field>> {
        if self.data.personality_type != Some(PersonalityType::LegalEntity) {
            return None;
        }
        let cnpj = self.data.cnpj_cpf.clone();
        if remove_mask(&cnpj).len() != CNPJ_DIGITS {
            return None;
        }

        match self.lookups.lookup_company(&cnpj).await {
            Ok(company) => {
                let touched = self.data.apply_company(&company);
                info!(cnpj = %remove_mask(&cnpj), fields = touched.len(), "company filled from CNPJ");
                Some(touched)
            }
            Err(err) => {
                warn!(cnpj = %remove_mask(&cnpj), error = %err, "company lookup failed");
                None
            }
        }
    }

    /// Validates and submits the form.
    ///
    /// The payload has masks removed. On success the form is reset.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if let Err(errors) = validate_form(&self.data) {
            debug!(invalid_fields = errors.len(), "submission blocked by validation");
            return SubmitOutcome::Invalid(errors);
        }

        let payload = self.data.cleaned();
        match self.lookups.create_partner(&payload).await {
            Ok(response) if response.success => {
                info!(cnpj_cpf = %payload.cnpj_cpf, "partner created");
                self.reset();
                SubmitOutcome::Created {
                    message: CREATED_MESSAGE.to_string(),
                }
            }
            Ok(response) => {
                let message = if response.message.is_empty() {
                    REJECTED_MESSAGE.to_string()
                } else {
                    response.message
                };
                warn!(message = %message, "partner rejected by backend");
                SubmitOutcome::Rejected { message }
            }
            Err(err) => {
                warn!(error = %err, "partner submission failed");
                SubmitOutcome::Rejected {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Clears every field.
    pub fn reset(&mut self) {
        self.data = PartnerFormData::default();
    }
}

// =============================================================================
// Debounced auto-fill
// =============================================================================

/// A session shared between the input loop and the auto-fill tasks.
pub type SharedSession<L> = Arc<Mutex<FormSession<L>>>;

/// Quiet periods for the auto-fill lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutofillDelays {
    pub address: Duration,
    pub company: Duration,
}

impl Default for AutofillDelays {
    fn default() -> Self {
        Self {
            address: crate::debounce::CEP_DEBOUNCE,
            company: crate::debounce::CNPJ_DEBOUNCE,
        }
    }
}

/// Debounced address and company lookups for a shared session.
pub struct Autofill {
    address: Debouncer<String>,
    company: Debouncer<String>,
}

impl Autofill {
    /// Spawns the lookup tasks on the current tokio runtime.
    pub fn spawn<L>(session: SharedSession<L>, delays: AutofillDelays) -> Self
    where
        L: PartnerLookups + 'static,
    {
        let address = Debouncer::spawn(delays.address, {
            let session = Arc::clone(&session);
            move |_cep: String| {
                let session = Arc::clone(&session);
                async move {
                    session.lock().await.autofill_address().await;
                }
            }
        });

        let company = Debouncer::spawn(delays.company, move |_cnpj: String| {
            let session = Arc::clone(&session);
            async move {
                session.lock().await.autofill_company().await;
            }
        });

        Self { address, company }
    }

    /// Tells the auto-fill that a field changed. Only the postal code,
    /// identifier, and personality fields schedule lookups.
    pub fn notify(&self, update: &FieldUpdate, data: &PartnerFormData) {
        match update.field {
            Field::ZipCode => self.address.push(update.value.clone()),
            Field::CnpjCpf | Field::PersonalityType => self.company.push(data.cnpj_cpf.clone()),
            _ => {}
        }
    }

    /// Runs any pending lookups and waits for them to finish.
    pub async fn finish(self) {
        self.address.finish().await;
        self.company.finish().await;
    }
}
