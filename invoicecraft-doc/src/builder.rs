//! # Invoice Document Builder
//!
//! Single-pass, stateless transformation from an `InvoiceRecord` to an
//! `InvoiceDocument`. The builder never rejects incomplete data: missing
//! billing fields become placeholder text, an empty item list becomes one
//! placeholder item, and a missing invoice number is generated on the spot.

use crate::document::{format_currency, format_quantity, Block, InvoiceDocument, TextStyle};
use crate::record::{BillTo, InvoiceRecord, LineItem};
use chrono::{Local, NaiveDate};
use rand::Rng;
use tracing::debug;

/// Substituted when the record carries no items so the rendered document is
/// never empty.
pub const PLACEHOLDER_ITEM_DESCRIPTION: &str = "Sample Item";
pub const PLACEHOLDER_ITEM_RATE: f64 = 100.0;

/// Static content of the generated document.
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Company name shown in the header band.
    pub company_name: String,
    /// Document title shown under the company name.
    pub title: String,
    /// Footer lines printed at the bottom of the document.
    pub footer_lines: Vec<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            company_name: "Invoicecraft Labs".to_string(),
            title: "INVOICE".to_string(),
            footer_lines: vec!["Thank you for your business.".to_string()],
        }
    }
}

/// Builds an `InvoiceDocument` from an `InvoiceRecord`.
pub struct InvoiceDocumentBuilder {
    config: DocumentConfig,
}

impl InvoiceDocumentBuilder {
    /// Create a builder with the default document configuration
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    /// Create a builder with custom document configuration
    pub fn with_config(config: DocumentConfig) -> Self {
        Self { config }
    }

    /// Consume a record and emit the block sequence in fixed order:
    /// header -> metadata -> billing -> items table -> notes -> footer.
    pub fn build(&self, record: InvoiceRecord) -> InvoiceDocument {
        let mut record = record;

        // Normalize identifiers. Collisions in the generated numeral are
        // accepted; there is no uniqueness check.
        if record
            .invoice_number
            .as_deref()
            .map(str::trim)
            .map_or(true, str::is_empty)
        {
            let number = generate_invoice_number();
            debug!(invoice_number = %number, "generated invoice number");
            record.invoice_number = Some(number);
        }
        // The generation date always wins over caller input.
        record.date = Some(Local::now().date_naive());

        let mut items = record.items;
        if items.is_empty() {
            items.push(LineItem::new(
                PLACEHOLDER_ITEM_DESCRIPTION,
                1.0,
                PLACEHOLDER_ITEM_RATE,
            ));
        }

        let mut blocks = Vec::new();

        // Header
        blocks.push(Block::Text {
            content: self.config.company_name.clone(),
            style: TextStyle::CompanyName,
        });
        blocks.push(Block::Text {
            content: self.config.title.clone(),
            style: TextStyle::DocumentTitle,
        });
        blocks.push(Block::Spacer { points: 20.0 });

        // Metadata
        blocks.push(Block::Table {
            header: None,
            rows: vec![
                vec![
                    "Invoice Number:".to_string(),
                    record.invoice_number.clone().unwrap_or_default(),
                ],
                vec!["Date:".to_string(), format_date(record.date)],
            ],
            footer: None,
        });
        blocks.push(Block::Spacer { points: 20.0 });

        // Billing
        blocks.push(Block::Text {
            content: "BILL TO:".to_string(),
            style: TextStyle::SectionHeading,
        });
        blocks.push(Block::Text {
            content: billing_block(record.bill_to.as_ref()),
            style: TextStyle::Body,
        });
        blocks.push(Block::Spacer { points: 20.0 });

        // Items
        blocks.push(Block::Text {
            content: "ITEMS:".to_string(),
            style: TextStyle::SectionHeading,
        });

        let mut rows = Vec::with_capacity(items.len());
        let mut total = 0.0;
        for item in &items {
            let amount = item.amount();
            total += amount;
            rows.push(vec![
                item.description.clone(),
                format_quantity(item.quantity),
                format_currency(item.rate),
                format_currency(amount),
            ]);
        }

        blocks.push(Block::Table {
            header: Some(vec![
                "Description".to_string(),
                "Quantity".to_string(),
                "Rate".to_string(),
                "Amount".to_string(),
            ]),
            rows,
            footer: Some(vec![
                String::new(),
                String::new(),
                "TOTAL:".to_string(),
                format_currency(total),
            ]),
        });
        blocks.push(Block::Spacer { points: 20.0 });

        // Notes, only when non-empty
        if let Some(notes) = record.notes.as_deref().map(str::trim) {
            if !notes.is_empty() {
                blocks.push(Block::Text {
                    content: "NOTES:".to_string(),
                    style: TextStyle::SectionHeading,
                });
                blocks.push(Block::Text {
                    content: notes.to_string(),
                    style: TextStyle::Body,
                });
                blocks.push(Block::Spacer { points: 20.0 });
            }
        }

        // Footer
        blocks.push(Block::Text {
            content: self.config.footer_lines.join("\n"),
            style: TextStyle::Footer,
        });

        InvoiceDocument { blocks, total }
    }
}

impl Default for InvoiceDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a 16-digit invoice numeral from a non-cryptographic source.
/// Collision risk is accepted and unhandled.
pub fn generate_invoice_number() -> String {
    let mut rng = rand::thread_rng();
    (0..16)
        .map(|_| char::from(b'0' + rng.gen_range(0u8..10)))
        .collect()
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Render the billing block body. Missing fields fall back to placeholder
/// text; the email line is emitted only when an email is present.
fn billing_block(bill_to: Option<&BillTo>) -> String {
    let empty = BillTo::default();
    let bill_to = bill_to.unwrap_or(&empty);

    let field = |value: &Option<String>, placeholder: &str| -> String {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => placeholder.to_string(),
        }
    };

    let mut lines = vec![
        field(&bill_to.name, "Customer Name"),
        field(&bill_to.address, "Customer Address"),
        format!(
            "{}, {} {}",
            field(&bill_to.city, "City"),
            field(&bill_to.state, "State"),
            field(&bill_to.zip, "ZIP"),
        ),
    ];
    if let Some(email) = bill_to.email.as_deref().map(str::trim) {
        if !email.is_empty() {
            lines.push(email.to_string());
        }
    }
    lines.join("\n")
}
