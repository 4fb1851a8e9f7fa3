//! # Invoice Record Model
//!
//! The parsed form of an invoice request. Records arrive as UTF-8 JSON with
//! every field optional; parsing fills serde defaults and validation only
//! rejects what placeholder repair cannot fix (negative quantities or rates,
//! non-finite numbers). A record is constructed fresh per request, consumed
//! once by the builder, then discarded.

use crate::error::{self, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Billing target. Every field is optional; missing fields are replaced with
/// placeholder text at build time, never rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillTo {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    /// Only rendered when present; no placeholder is substituted.
    pub email: Option<String>,
}

/// A single invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    /// Non-negative; defaults to 1 when absent.
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    /// Non-negative currency amount; defaults to 0 when absent.
    #[serde(default)]
    pub rate: f64,
}

fn default_quantity() -> f64 {
    1.0
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, rate: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
        }
    }

    /// Derived amount: quantity x rate.
    pub fn amount(&self) -> f64 {
        self.quantity * self.rate
    }
}

/// A parsed invoice record.
///
/// `invoice_number` and `date` are normalized by the builder: a missing or
/// empty number is replaced with a generated 16-digit numeral, and `date` is
/// always set to the generation-time date. A caller-supplied `date` field in
/// the input JSON is accepted and discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceRecord {
    pub invoice_number: Option<String>,
    /// Set during normalization; never read from input.
    #[serde(skip_deserializing)]
    pub date: Option<NaiveDate>,
    pub bill_to: Option<BillTo>,
    pub items: Vec<LineItem>,
    pub notes: Option<String>,
}

impl InvoiceRecord {
    /// Parse a record from a UTF-8 JSON string and validate it.
    ///
    /// Malformed JSON and negative or non-finite numeric fields produce a
    /// `ParseFailed` error; everything else is repairable downstream.
    pub fn from_json(input: &str) -> Result<Self> {
        let record: InvoiceRecord = serde_json::from_str(input)
            .map_err(|e| {
                error::parse_error("invoice record is not valid JSON")
                    .with_operation("record::from_json")
                    .set_source(e)
            })?;
        record.validate()?;
        Ok(record)
    }

    /// Reject numeric values the document model cannot represent.
    fn validate(&self) -> Result<()> {
        for (i, item) in self.items.iter().enumerate() {
            if !item.quantity.is_finite() || item.quantity < 0.0 {
                return Err(error::parse_error("line item quantity must be non-negative")
                    .with_operation("record::validate")
                    .with_context("line", i.to_string())
                    .with_context("quantity", item.quantity.to_string()));
            }
            if !item.rate.is_finite() || item.rate < 0.0 {
                return Err(error::parse_error("line item rate must be non-negative")
                    .with_operation("record::validate")
                    .with_context("line", i.to_string())
                    .with_context("rate", item.rate.to_string()));
            }
        }
        Ok(())
    }

    /// Sum of derived line amounts. Always recomputed; never caller-supplied.
    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_full_record() {
        let input = r#"{
            "invoice_number": "INV-001",
            "bill_to": {
                "name": "John Doe",
                "address": "123 Main St",
                "city": "Anytown",
                "state": "ST",
                "zip": "12345",
                "email": "john@example.com"
            },
            "items": [
                {"description": "Web Development", "quantity": 10, "rate": 75.0}
            ],
            "notes": "Net 30"
        }"#;

        let record = InvoiceRecord::from_json(input).unwrap();
        assert_eq!(record.invoice_number.as_deref(), Some("INV-001"));
        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].amount(), 750.0);
        assert_eq!(record.notes.as_deref(), Some("Net 30"));
    }

    #[test]
    fn test_parse_empty_object() {
        let record = InvoiceRecord::from_json("{}").unwrap();
        assert!(record.invoice_number.is_none());
        assert!(record.bill_to.is_none());
        assert!(record.items.is_empty());
        assert!(record.notes.is_none());
    }

    #[test]
    fn test_item_defaults() {
        let record = InvoiceRecord::from_json(r#"{"items": [{"description": "Consulting"}]}"#)
            .unwrap();
        assert_eq!(record.items[0].quantity, 1.0);
        assert_eq!(record.items[0].rate, 0.0);
        assert_eq!(record.items[0].amount(), 0.0);
    }

    #[test]
    fn test_caller_date_is_discarded() {
        let record = InvoiceRecord::from_json(r#"{"date": "1999-12-31"}"#).unwrap();
        assert!(record.date.is_none());
    }

    #[test]
    fn test_malformed_input() {
        let result = InvoiceRecord::from_json("not json at all");
        assert!(result.is_err_and(|e| e.kind() == ErrorKind::ParseFailed));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let result = InvoiceRecord::from_json(
            r#"{"items": [{"description": "x", "quantity": -2, "rate": 10.0}]}"#,
        );
        assert!(result.is_err_and(|e| e.kind() == ErrorKind::ParseFailed));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = InvoiceRecord::from_json(
            r#"{"items": [{"description": "x", "quantity": 2, "rate": -10.0}]}"#,
        );
        assert!(result.is_err_and(|e| e.kind() == ErrorKind::ParseFailed));
    }

    #[test]
    fn test_total() {
        let record = InvoiceRecord {
            items: vec![
                LineItem::new("Design", 3.0, 50.0),
                LineItem::new("Hosting", 2.0, 12.5),
            ],
            ..Default::default()
        };
        assert_eq!(record.total(), 175.0);
    }
}
