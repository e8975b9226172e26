//! Lookup commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use onboard_id::format_phone;
use onboard_partner::{CnpjResponse, ViaCepResponse};

use crate::error::CliError;
use crate::output::{print_record, DetailRow};

use super::CommandContext;

/// Look up an address or a company.
#[derive(Debug, Args)]
pub struct LookupCommand {
    #[command(subcommand)]
    command: LookupSubcommand,
}

#[derive(Debug, Subcommand)]
enum LookupSubcommand {
    /// Address for a postal code.
    Cep {
        /// Postal code, masked or not.
        cep: String,
    },

    /// Registry data for a CNPJ.
    Cnpj {
        /// CNPJ, masked or not.
        cnpj: String,
    },
}

impl LookupCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let client = ctx.client()?;

        match self.command {
            LookupSubcommand::Cep { cep } => {
                let address = client.cep().fetch(&cep).await.map_err(CliError::Lookup)?;
                print_record(&address, &address_rows(&address), ctx.format);
            }
            LookupSubcommand::Cnpj { cnpj } => {
                let company = client
                    .api()
                    .fetch_company(&cnpj)
                    .await
                    .map_err(CliError::Lookup)?;
                print_record(&company, &company_rows(&company), ctx.format);
            }
        }
        Ok(())
    }
}

fn address_rows(address: &ViaCepResponse) -> Vec<DetailRow> {
    vec![
        DetailRow::new("CEP", &address.cep),
        DetailRow::new("Street", &address.street),
        DetailRow::new("Complement", &address.complement),
        DetailRow::new("District", &address.district),
        DetailRow::new("City", &address.city),
        DetailRow::new("State", &address.state),
        DetailRow::new("Area code", &address.ddd),
        DetailRow::new("IBGE", &address.ibge),
    ]
}

fn company_rows(company: &CnpjResponse) -> Vec<DetailRow> {
    let mut rows = vec![
        DetailRow::new("CNPJ", &company.cnpj),
        DetailRow::new("Company name", &company.company_name),
        DetailRow::new(
            "Trade name",
            company.trade_name.as_deref().unwrap_or_default(),
        ),
        DetailRow::new("Email", &company.email),
        DetailRow::new("Phone", format_phone(&company.phone)),
        DetailRow::new("Status", &company.registration_status),
        DetailRow::new("Opened", &company.opened_on),
        DetailRow::new("Size", &company.size),
        DetailRow::new("Legal nature", &company.legal_nature),
        DetailRow::new(
            "Address",
            format!(
                "{}, {} - {}, {}/{}",
                company.street, company.number, company.district, company.city, company.state
            ),
        ),
    ];

    for activity in &company.main_activities {
        rows.push(DetailRow::new(
            "Main activity",
            format!("{} {}", activity.code, activity.text),
        ));
    }
    for partner in &company.shareholders {
        rows.push(DetailRow::new(
            "Shareholder",
            format!("{} ({})", partner.name, partner.qualification),
        ));
    }

    rows
}

#[cfg(test)]
mod tests {
    use onboard_partner::{Activity, Shareholder};

    use super::*;

    #[test]
    fn company_rows_mask_phone_and_list_activities() {
        let company = CnpjResponse {
            company_name: "EMPRESA EXEMPLO LTDA".into(),
            phone: "1123456789".into(),
            main_activities: vec![Activity {
                code: "62.01-5-01".into(),
                text: "Desenvolvimento de software".into(),
            }],
            shareholders: vec![Shareholder {
                name: "Fulano".into(),
                qualification: "Sócio".into(),
            }],
            ..Default::default()
        };

        let rows = company_rows(&company);
        let phone = rows.iter().find(|r| r.field == "Phone").unwrap();
        assert_eq!(phone.value, "(11) 2345-6789");
        assert!(rows.iter().any(|r| r.field == "Main activity"));
        assert!(rows.iter().any(|r| r.value == "Fulano (Sócio)"));
    }

    #[test]
    fn address_rows_cover_lookup_fields() {
        let address = ViaCepResponse {
            city: "São Paulo".into(),
            state: "SP".into(),
            ..Default::default()
        };
        let rows = address_rows(&address);
        assert!(rows.iter().any(|r| r.field == "City" && r.value == "São Paulo"));
    }
}
