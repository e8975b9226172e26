//! Form data and lookup payloads.
//!
//! Field names on the wire are PascalCase (`CompanyName`, `CnpjCpf`, ...)
//! because that is what the partners endpoint accepts.

use onboard_id::{format_phone, remove_mask, PersonalityType};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schema::rules;

// =============================================================================
// Partner type
// =============================================================================

/// Commercial relationship with the partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartnerType {
    #[serde(rename = "Agente Logística")]
    LogisticsAgent,
    #[serde(rename = "Cliente")]
    Customer,
    #[serde(rename = "Despachante")]
    CustomsBroker,
    #[serde(rename = "Fornecedor")]
    Supplier,
}

impl PartnerType {
    /// All partner types, in form order.
    pub const ALL: [PartnerType; 4] = [
        PartnerType::LogisticsAgent,
        PartnerType::Customer,
        PartnerType::CustomsBroker,
        PartnerType::Supplier,
    ];

    /// The label used on the form and on the wire.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            PartnerType::LogisticsAgent => "Agente Logística",
            PartnerType::Customer => "Cliente",
            PartnerType::CustomsBroker => "Despachante",
            PartnerType::Supplier => "Fornecedor",
        }
    }

    /// Interprets free text, ignoring case and accents on the label.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let needle = fold(raw);
        Self::ALL.into_iter().find(|t| {
            fold(t.label()) == needle || fold(&format!("{t:?}")) == needle
        })
    }
}

impl std::fmt::Display for PartnerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower-cases and drops accents, spaces, and separators.
fn fold(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_'))
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

// =============================================================================
// Form fields
// =============================================================================

/// A field of the partner form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    PartnerType,
    PersonalityType,
    CompanyName,
    TradeName,
    CnpjCpf,
    Segment,
    Category,
    ZipCode,
    Country,
    State,
    City,
    Street,
    Number,
    District,
    Email,
    Phone,
    AddressComplement,
    MobilePhone,
    Notes,
}

impl Field {
    /// All fields, in form order.
    pub const ALL: [Field; 19] = [
        Field::PartnerType,
        Field::PersonalityType,
        Field::CompanyName,
        Field::TradeName,
        Field::CnpjCpf,
        Field::Segment,
        Field::Category,
        Field::ZipCode,
        Field::Country,
        Field::State,
        Field::City,
        Field::Street,
        Field::Number,
        Field::District,
        Field::Email,
        Field::Phone,
        Field::AddressComplement,
        Field::MobilePhone,
        Field::Notes,
    ];

    /// The wire name of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Field::PartnerType => "PartnerType",
            Field::PersonalityType => "PersonalityType",
            Field::CompanyName => "CompanyName",
            Field::TradeName => "TradeName",
            Field::CnpjCpf => "CnpjCpf",
            Field::Segment => "Segment",
            Field::Category => "Category",
            Field::ZipCode => "ZipCode",
            Field::Country => "Country",
            Field::State => "State",
            Field::City => "City",
            Field::Street => "Street",
            Field::Number => "Number",
            Field::District => "District",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::AddressComplement => "AddressComplement",
            Field::MobilePhone => "MobilePhone",
            Field::Notes => "Notes",
        }
    }

    /// Finds a field by wire name (`CnpjCpf`) or Rust name (`cnpj_cpf`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = fold(name);
        Self::ALL
            .into_iter()
            .find(|f| fold(f.as_str()) == needle)
    }

    /// Whether the form requires a value for this field.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        !matches!(
            self,
            Field::AddressComplement | Field::MobilePhone | Field::Notes
        )
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown form field: {s}"))
    }
}

// =============================================================================
// Form data
// =============================================================================

/// Everything the partner form collects.
///
/// Text fields start empty; the selects start unset. Values are stored as
/// displayed (masked); [`PartnerFormData::cleaned`] produces the payload sent
/// to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", default)]
pub struct PartnerFormData {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Tipo de parceiro é obrigatório"))]
    pub partner_type: Option<PartnerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Personalidade é obrigatória"))]
    pub personality_type: Option<PersonalityType>,
    #[validate(custom(function = "rules::company_name"))]
    pub company_name: String,
    #[validate(custom(function = "rules::trade_name"))]
    pub trade_name: String,
    #[validate(custom(function = "rules::cnpj_cpf"))]
    pub cnpj_cpf: String,
    #[validate(custom(function = "rules::segment"))]
    pub segment: String,
    #[validate(custom(function = "rules::category"))]
    pub category: String,
    #[validate(custom(function = "rules::zip_code"))]
    pub zip_code: String,
    #[validate(custom(function = "rules::country"))]
    pub country: String,
    #[validate(custom(function = "rules::state"))]
    pub state: String,
    #[validate(custom(function = "rules::city"))]
    pub city: String,
    #[validate(custom(function = "rules::street"))]
    pub street: String,
    #[validate(custom(function = "rules::number"))]
    pub number: String,
    #[validate(custom(function = "rules::district"))]
    pub district: String,
    #[validate(custom(function = "rules::email"))]
    pub email: String,
    #[validate(custom(function = "rules::phone"))]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_complement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PartnerFormData {
    /// Returns the current value of a field as text, if set.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        let text = match field {
            Field::PartnerType => return self.partner_type.map(|t| t.label()),
            Field::PersonalityType => return self.personality_type.map(|p| p.label()),
            Field::AddressComplement => return self.address_complement.as_deref(),
            Field::MobilePhone => return self.mobile_phone.as_deref(),
            Field::Notes => return self.notes.as_deref(),
            Field::CompanyName => &self.company_name,
            Field::TradeName => &self.trade_name,
            Field::CnpjCpf => &self.cnpj_cpf,
            Field::Segment => &self.segment,
            Field::Category => &self.category,
            Field::ZipCode => &self.zip_code,
            Field::Country => &self.country,
            Field::State => &self.state,
            Field::City => &self.city,
            Field::Street => &self.street,
            Field::Number => &self.number,
            Field::District => &self.district,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        };
        (!text.is_empty()).then_some(text.as_str())
    }

    /// Stores a value exactly as given. Select fields are parsed leniently and
    /// become unset when the text is not recognized. Empty text clears
    /// optional fields.
    pub fn set_raw(&mut self, field: Field, value: String) {
        let optional = |v: String| (!v.is_empty()).then_some(v);
        match field {
            Field::PartnerType => self.partner_type = PartnerType::parse_lenient(&value),
            Field::PersonalityType => {
                self.personality_type = PersonalityType::parse_lenient(&value)
            }
            Field::AddressComplement => self.address_complement = optional(value),
            Field::MobilePhone => self.mobile_phone = optional(value),
            Field::Notes => self.notes = optional(value),
            Field::CompanyName => self.company_name = value,
            Field::TradeName => self.trade_name = value,
            Field::CnpjCpf => self.cnpj_cpf = value,
            Field::Segment => self.segment = value,
            Field::Category => self.category = value,
            Field::ZipCode => self.zip_code = value,
            Field::Country => self.country = value,
            Field::State => self.state = value,
            Field::City => self.city = value,
            Field::Street => self.street = value,
            Field::Number => self.number = value,
            Field::District => self.district = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
        }
    }

    /// The submission payload: identifier, postal code, and phones with their
    /// masks removed. A missing mobile phone is sent as an empty string.
    #[must_use]
    pub fn cleaned(&self) -> Self {
        Self {
            cnpj_cpf: remove_mask(&self.cnpj_cpf),
            zip_code: remove_mask(&self.zip_code),
            phone: remove_mask(&self.phone),
            mobile_phone: Some(
                self.mobile_phone
                    .as_deref()
                    .map(remove_mask)
                    .unwrap_or_default(),
            ),
            ..self.clone()
        }
    }

    /// Applies an address lookup. Returns the fields that were written.
    pub fn apply_address(&mut self, address: &ViaCepResponse) -> Vec<Field> {
        self.street = address.street.clone();
        self.district = address.district.clone();
        self.city = address.city.clone();
        self.state = address.state.clone();
        self.country = DEFAULT_COUNTRY.to_string();

        vec![
            Field::Street,
            Field::District,
            Field::City,
            Field::State,
            Field::Country,
        ]
    }

    /// Applies a company lookup. Returns the fields that were written.
    ///
    /// The trade name falls back to the company name; email and phone are
    /// only overwritten when the registry has them.
    pub fn apply_company(&mut self, company: &CnpjResponse) -> Vec<Field> {
        let mut touched = vec![Field::CompanyName, Field::TradeName];

        self.company_name = company.company_name.clone();
        self.trade_name = company
            .trade_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&company.company_name)
            .to_string();

        if !company.email.is_empty() {
            self.email = company.email.clone();
            touched.push(Field::Email);
        }
        if !company.phone.is_empty() {
            self.phone = format_phone(&company.phone);
            touched.push(Field::Phone);
        }

        touched
    }
}

/// Country written by the address auto-fill.
pub const DEFAULT_COUNTRY: &str = "Brasil";

/// Input hint for the identifier field given the chosen personality.
#[must_use]
pub fn identifier_placeholder(personality: Option<PersonalityType>) -> &'static str {
    match personality {
        Some(PersonalityType::Individual) => "000.000.000-00",
        Some(PersonalityType::LegalEntity) => "00.000.000/0000-00",
        None => "000.000.000-00 ou 00.000.000/0000-00",
    }
}

/// Label of the identifier field given the chosen personality.
#[must_use]
pub fn identifier_label(personality: Option<PersonalityType>) -> &'static str {
    match personality {
        Some(PersonalityType::Individual) => "CPF",
        Some(PersonalityType::LegalEntity) => "CNPJ",
        None => "CPF/CNPJ",
    }
}

// =============================================================================
// Lookup payloads
// =============================================================================

/// Address returned by the ViaCEP postal code service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViaCepResponse {
    pub cep: String,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "complemento")]
    pub complement: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "localidade")]
    pub city: String,
    #[serde(rename = "uf")]
    pub state: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
}

/// An economic activity (CNAE) of a company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub code: String,
    pub text: String,
}

/// A partner or administrator listed in the company registry (QSA).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shareholder {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "qual")]
    pub qualification: String,
}

/// Company registry data returned by the backend's CNPJ endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CnpjResponse {
    #[serde(rename = "companyName")]
    pub company_name: String,
    #[serde(rename = "tradeName", skip_serializing_if = "Option::is_none")]
    pub trade_name: Option<String>,
    pub email: String,
    pub phone: String,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "municipio")]
    pub city: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "uf")]
    pub state: String,
    pub cep: String,
    #[serde(rename = "situacao")]
    pub registration_status: String,
    pub status: String,
    #[serde(rename = "abertura")]
    pub opened_on: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "porte")]
    pub size: String,
    #[serde(rename = "natureza_juridica")]
    pub legal_nature: String,
    #[serde(rename = "atividade_principal")]
    pub main_activities: Vec<Activity>,
    #[serde(rename = "atividades_secundarias")]
    pub secondary_activities: Vec<Activity>,
    #[serde(rename = "qsa")]
    pub shareholders: Vec<Shareholder>,
    #[serde(rename = "capital_social")]
    pub share_capital: String,
    #[serde(rename = "data_situacao")]
    pub status_date: String,
    pub cnpj: String,
    #[serde(rename = "ultima_atualizacao")]
    pub last_updated: String,
}

/// Envelope used by the onboarding backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = serde_json::Value> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> PartnerFormData {
        PartnerFormData {
            partner_type: Some(PartnerType::Supplier),
            personality_type: Some(PersonalityType::LegalEntity),
            company_name: "Empresa Exemplo LTDA".into(),
            trade_name: "Exemplo".into(),
            cnpj_cpf: "11.222.333/0001-81".into(),
            zip_code: "01310-100".into(),
            phone: "(11) 98765-4321".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_form_serializes_pascal_case() {
        let json = serde_json::to_value(sample_form()).unwrap();
        assert_eq!(json["PartnerType"], "Fornecedor");
        assert_eq!(json["PersonalityType"], "Jurídica");
        assert_eq!(json["CnpjCpf"], "11.222.333/0001-81");
        assert_eq!(json["ZipCode"], "01310-100");
        assert!(json.get("Notes").is_none());
    }

    #[test]
    fn test_form_deserializes_partial() {
        let form: PartnerFormData =
            serde_json::from_str(r#"{"CompanyName": "ACME", "PartnerType": "Cliente"}"#).unwrap();
        assert_eq!(form.company_name, "ACME");
        assert_eq!(form.partner_type, Some(PartnerType::Customer));
        assert!(form.personality_type.is_none());
        assert!(form.email.is_empty());
    }

    #[test]
    fn test_cleaned_strips_masks() {
        let clean = sample_form().cleaned();
        assert_eq!(clean.cnpj_cpf, "11222333000181");
        assert_eq!(clean.zip_code, "01310100");
        assert_eq!(clean.phone, "11987654321");
        assert_eq!(clean.mobile_phone.as_deref(), Some(""));
        assert_eq!(clean.company_name, "Empresa Exemplo LTDA");
    }

    #[test]
    fn test_cleaned_keeps_mobile_digits() {
        let mut form = sample_form();
        form.mobile_phone = Some("(11) 91234-5678".into());
        assert_eq!(form.cleaned().mobile_phone.as_deref(), Some("11912345678"));
    }

    #[test]
    fn test_apply_address() {
        let mut form = PartnerFormData::default();
        let address = ViaCepResponse {
            cep: "01310-100".into(),
            street: "Avenida Paulista".into(),
            district: "Bela Vista".into(),
            city: "São Paulo".into(),
            state: "SP".into(),
            ..Default::default()
        };
        let touched = form.apply_address(&address);
        assert_eq!(touched.len(), 5);
        assert_eq!(form.street, "Avenida Paulista");
        assert_eq!(form.city, "São Paulo");
        assert_eq!(form.country, "Brasil");
    }

    #[test]
    fn test_apply_company_trade_name_fallback() {
        let mut form = PartnerFormData {
            email: "keep@me.com".into(),
            ..Default::default()
        };
        let company = CnpjResponse {
            company_name: "ACME INDUSTRIA SA".into(),
            trade_name: Some(String::new()),
            phone: "1123456789".into(),
            ..Default::default()
        };
        let touched = form.apply_company(&company);
        assert_eq!(form.trade_name, "ACME INDUSTRIA SA");
        assert_eq!(form.email, "keep@me.com");
        assert_eq!(form.phone, "(11) 2345-6789");
        assert_eq!(touched, vec![Field::CompanyName, Field::TradeName, Field::Phone]);
    }

    #[test]
    fn test_cnpj_response_wire_names() {
        let json = r#"{
            "companyName": "ACME",
            "tradeName": "Acme",
            "email": "a@acme.com",
            "phone": "11 2345-6789",
            "municipio": "Campinas",
            "atividade_principal": [{"code": "62.01-5-01", "text": "Software"}],
            "qsa": [{"nome": "Fulano", "qual": "Sócio-Administrador"}]
        }"#;
        let company: CnpjResponse = serde_json::from_str(json).unwrap();
        assert_eq!(company.trade_name.as_deref(), Some("Acme"));
        assert_eq!(company.city, "Campinas");
        assert_eq!(company.main_activities[0].code, "62.01-5-01");
        assert_eq!(company.shareholders[0].name, "Fulano");
        assert!(company.secondary_activities.is_empty());
    }

    #[test]
    fn test_field_from_name() {
        assert_eq!(Field::from_name("CnpjCpf"), Some(Field::CnpjCpf));
        assert_eq!(Field::from_name("cnpj_cpf"), Some(Field::CnpjCpf));
        assert_eq!(Field::from_name("zipcode"), Some(Field::ZipCode));
        assert_eq!(Field::from_name("Fax"), None);
    }

    #[test]
    fn test_partner_type_lenient() {
        assert_eq!(
            PartnerType::parse_lenient("agente logistica"),
            Some(PartnerType::LogisticsAgent)
        );
        assert_eq!(PartnerType::parse_lenient("Supplier"), Some(PartnerType::Supplier));
        assert_eq!(PartnerType::parse_lenient("Parceiro"), None);
    }

    #[test]
    fn test_get_and_set_raw() {
        let mut form = PartnerFormData::default();
        assert_eq!(form.get(Field::City), None);
        form.set_raw(Field::City, "Recife".into());
        form.set_raw(Field::PersonalityType, "Física".into());
        form.set_raw(Field::Notes, String::new());
        assert_eq!(form.get(Field::City), Some("Recife"));
        assert_eq!(form.get(Field::PersonalityType), Some("Física"));
        assert_eq!(form.notes, None);
    }

    #[test]
    fn test_identifier_hints() {
        assert_eq!(identifier_label(Some(PersonalityType::Individual)), "CPF");
        assert_eq!(
            identifier_placeholder(Some(PersonalityType::LegalEntity)),
            "00.000.000/0000-00"
        );
    }
}
