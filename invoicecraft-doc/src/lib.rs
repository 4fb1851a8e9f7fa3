//! # invoicecraft-doc
//!
//! The invoice document core: a single-pass, stateless transformation from a
//! JSON invoice record to a rendered document.
//!
//! ## Core Concepts
//! - **Record**: the parsed invoice input (`InvoiceRecord`, `BillTo`, `LineItem`)
//! - **Document**: an ordered sequence of typed blocks plus the computed total
//! - **Builder**: normalizes the record and emits blocks in a fixed order
//! - **Renderer**: trait-based persistence of a document (PDF, in-memory)
//!
//! One invocation parses one record, builds one document, renders one file,
//! and returns the output path. Nothing is retained between invocations.

pub mod builder;
pub mod document;
pub mod error;
pub mod generate;
pub mod record;
pub mod render;

pub use builder::{DocumentConfig, InvoiceDocumentBuilder};
pub use document::{format_currency, Block, InvoiceDocument, TextStyle};
pub use error::{Error, ErrorKind, ErrorStatus, Result};
pub use generate::{generate_invoice, generate_invoice_message};
pub use record::{BillTo, InvoiceRecord, LineItem};
pub use render::{output_filename, DocumentRenderer, MemoryRenderer, PdfRenderer};
