//! # Invoice Document Model
//!
//! An `InvoiceDocument` is an ordered sequence of typed blocks plus the grand
//! total computed from its line items. Blocks are abstract units of content;
//! turning them into bytes on disk is entirely the renderer's concern.

use serde::{Deserialize, Serialize};

/// Text styles a renderer may map to fonts and sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    /// Company name at the top of the document
    CompanyName,
    /// The large document title ("INVOICE")
    DocumentTitle,
    /// Section headings ("BILL TO:", "ITEMS:", "NOTES:")
    SectionHeading,
    /// Regular body text, possibly multi-line
    Body,
    /// Footer text at the bottom of the document
    Footer,
}

/// An abstract unit of document content consumed by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    /// A run of styled text; `content` may contain newlines.
    Text { content: String, style: TextStyle },

    /// A table with an optional header row, data rows, and an optional
    /// emphasized footer row (used for the TOTAL line).
    Table {
        #[serde(default)]
        header: Option<Vec<String>>,
        rows: Vec<Vec<String>>,
        #[serde(default)]
        footer: Option<Vec<String>>,
    },

    /// Vertical whitespace, in points.
    Spacer { points: f64 },
}

/// The built document: blocks in render order plus the computed grand total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    pub blocks: Vec<Block>,
    /// Sum of all line-item amounts. Recomputed on every build.
    pub total: f64,
}

impl InvoiceDocument {
    /// All text contents carrying the given style, in document order.
    pub fn texts_with_style(&self, style: TextStyle) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Text { content, style: s } if *s == style => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All table blocks, in document order.
    pub fn tables(&self) -> Vec<&Block> {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Table { .. }))
            .collect()
    }

    /// Whether any text block contains the given needle.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.blocks.iter().any(|b| match b {
            Block::Text { content, .. } => content.contains(needle),
            Block::Table { header, rows, footer } => {
                header.iter().flatten().any(|c| c.contains(needle))
                    || rows.iter().flatten().any(|c| c.contains(needle))
                    || footer.iter().flatten().any(|c| c.contains(needle))
            }
            Block::Spacer { .. } => false,
        })
    }
}

/// Format a currency amount to two decimals with a dollar prefix.
/// No locale handling, no currency codes.
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Format a quantity the way the invoice table shows it: whole numbers
/// without a decimal point, fractional quantities as-is.
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> InvoiceDocument {
        InvoiceDocument {
            blocks: vec![
                Block::Text {
                    content: "Acme".into(),
                    style: TextStyle::CompanyName,
                },
                Block::Spacer { points: 20.0 },
                Block::Table {
                    header: Some(vec!["Description".into(), "Amount".into()]),
                    rows: vec![vec!["Design".into(), "$150.00".into()]],
                    footer: Some(vec!["TOTAL:".into(), "$150.00".into()]),
                },
            ],
            total: 150.0,
        }
    }

    #[test]
    fn test_texts_with_style() {
        let doc = sample_document();
        assert_eq!(doc.texts_with_style(TextStyle::CompanyName), vec!["Acme"]);
        assert!(doc.texts_with_style(TextStyle::Footer).is_empty());
    }

    #[test]
    fn test_contains_text() {
        let doc = sample_document();
        assert!(doc.contains_text("Design"));
        assert!(doc.contains_text("TOTAL:"));
        assert!(!doc.contains_text("Nonexistent"));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(150.0), "$150.00");
        assert_eq!(format_currency(12.345), "$12.35");
        assert_eq!(format_currency(12.344), "$12.34");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(1.0), "1");
        assert_eq!(format_quantity(20.0), "20");
        assert_eq!(format_quantity(2.5), "2.5");
    }

    #[test]
    fn test_block_serde_roundtrip_tagging() {
        let block = Block::Spacer { points: 12.0 };
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains(r#""block":"spacer""#));
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }
}
