//! Output formatting for extracted records (JSON, table, markdown, CSV).

use crate::config::OutputFormat;
use crate::extract::ProductRecord;

/// Formats product records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single record.
    pub fn format_record(&self, record: &ProductRecord) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => self.table_single(record),
            OutputFormat::Markdown => self.markdown_single(record),
            OutputFormat::Csv => self.csv_records(std::slice::from_ref(record)),
        }
    }

    /// Formats multiple records.
    pub fn format_records(&self, records: &[ProductRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No products extracted.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Csv => self.csv_records(records),
            OutputFormat::Table => {
                records.iter().map(|r| self.table_single(r)).collect::<Vec<_>>().join("\n\n")
            }
            OutputFormat::Markdown => {
                records.iter().map(|r| self.markdown_single(r)).collect::<Vec<_>>().join("\n\n")
            }
        }
    }

    // Table formatting

    fn table_single(&self, record: &ProductRecord) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Title:       {}", or_na(&record.title)));
        lines.push(format!("Brand:       {}", or_na(&record.brand)));
        lines.push(format!("Price:       {}", price_text(record)));

        if let Some(description) = &record.description {
            lines.push(format!("Description: {}", truncate(description, 80)));
        }

        lines.push(format!("Images:      {}", record.images.len()));
        for image in &record.images {
            lines.push(format!("  - {}", image));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, record: &ProductRecord) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", record.title.as_deref().unwrap_or("Untitled product")));
        lines.push(String::new());

        if let Some(brand) = &record.brand {
            lines.push(format!("- **Brand:** {}", brand));
        }
        if record.price.is_some() || record.currency.is_some() {
            lines.push(format!("- **Price:** {}", price_text(record)));
        }
        if let Some(description) = &record.description {
            lines.push(format!("- **Description:** {}", description));
        }
        for image in &record.images {
            lines.push(format!("- ![image]({})", image));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "title,brand,price,currency,description,images".to_string()
    }

    fn csv_records(&self, records: &[ProductRecord]) -> String {
        let mut lines = vec![self.csv_header()];

        for record in records {
            lines.push(
                [
                    Self::csv_escape(record.title.as_deref().unwrap_or_default()),
                    Self::csv_escape(record.brand.as_deref().unwrap_or_default()),
                    Self::csv_escape(record.price.as_deref().unwrap_or_default()),
                    Self::csv_escape(record.currency.as_deref().unwrap_or_default()),
                    Self::csv_escape(record.description.as_deref().unwrap_or_default()),
                    Self::csv_escape(&record.images.join(" ")),
                ]
                .join(","),
            );
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

fn price_text(record: &ProductRecord) -> String {
    match (&record.currency, &record.price) {
        (Some(currency), Some(price)) => format!("{} {}", currency, price),
        (None, Some(price)) => price.clone(),
        (Some(currency), None) => format!("{} N/A", currency),
        (None, None) => "N/A".to_string(),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
