//! Output formatting for CLI commands.

use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

/// A labelled value, for showing one record as a two-column table.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct DetailRow {
    #[tabled(rename = "Field")]
    pub field: String,

    #[tabled(rename = "Value")]
    pub value: String,
}

impl DetailRow {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Print data in the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No items found.".dimmed());
            } else {
                let table = Table::new(data).to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json => {
            println!("{}", format_json(data, "[]"));
        }
    }
}

/// Print one record: as a field/value table, or as the record's own JSON.
pub fn print_record<T, R>(data: &T, rows: &[R], format: OutputFormat)
where
    T: Serialize,
    R: Serialize + Tabled,
{
    println!("{}", render_record(data, rows, format));
}

pub(crate) fn render_record<T, R>(data: &T, rows: &[R], format: OutputFormat) -> String
where
    T: Serialize,
    R: Serialize + Tabled,
{
    match format {
        OutputFormat::Table if rows.is_empty() => "No items found.".dimmed().to_string(),
        OutputFormat::Table => Table::new(rows).to_string(),
        OutputFormat::Json => format_json(data, "{}"),
    }
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue().bold(), message);
}

/// Print a warning to stderr.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}

fn format_json<T: Serialize + ?Sized>(data: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parse_defaults_to_table() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("yaml"), OutputFormat::Table);
    }

    #[test]
    fn detail_rows_serialize_as_pairs() {
        let rows = vec![DetailRow::new("City", "São Paulo")];
        let value = serde_json::to_value(&rows).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "field": "City", "value": "São Paulo" }])
        );
    }

    #[test]
    fn record_renders_rows_as_table_and_data_as_json() {
        #[derive(Serialize, Tabled)]
        struct Row {
            name: &'static str,
            error: &'static str,
        }

        let rows = vec![Row {
            name: "Email",
            error: "E-mail inválido",
        }];
        let data = serde_json::json!({ "Email": "x" });

        let table = render_record(&data, &rows, OutputFormat::Table);
        assert!(table.contains("E-mail inválido"));

        let json = render_record(&data, &rows, OutputFormat::Json);
        assert_eq!(serde_json::from_str::<serde_json::Value>(&json).unwrap(), data);
    }

    #[test]
    fn detail_rows_render_table() {
        let rows = vec![DetailRow::new("UF", "SP")];
        let table = Table::new(&rows).to_string();
        assert!(table.contains("Field"));
        assert!(table.contains("SP"));
    }
}
