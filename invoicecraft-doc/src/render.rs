//! # Document Renderers
//!
//! Persistence of an `InvoiceDocument` behind a trait, so the block pipeline
//! stays byte-format agnostic. Two implementations:
//! - `PdfRenderer`: draws blocks onto a single letter-size page via printpdf
//! - `MemoryRenderer`: records what would be drawn (useful for testing)
//!
//! There is no pagination: an invoice is a one-page document by construction.

use crate::document::{Block, InvoiceDocument, TextStyle};
use crate::error::{self, Error, Result};
use chrono::{DateTime, Local};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Letter page, in millimeters.
const PAGE_WIDTH_MM: f64 = 215.9;
const PAGE_HEIGHT_MM: f64 = 279.4;

const MARGIN_LEFT_MM: f64 = 20.0;
const MARGIN_RIGHT_MM: f64 = 20.0;
const TOP_MM: f64 = 260.0;

/// One typographic point in millimeters.
const PT_TO_MM: f64 = 0.352_778;

/// Renderer trait - turns a block sequence into a persisted file
pub trait DocumentRenderer: Send + Sync {
    /// Get renderer name for debugging
    fn renderer_name(&self) -> &'static str;

    /// Persist the document at the given path. Implementations must not
    /// leave a usable partial file behind on failure.
    fn render(&self, document: &InvoiceDocument, path: &Path) -> Result<()>;
}

/// Derive the output filename from a timestamp: `invoice_<YYYYMMDD_HHMMSS>.pdf`
pub fn output_filename(at: DateTime<Local>) -> String {
    format!("invoice_{}.pdf", at.format("%Y%m%d_%H%M%S"))
}

// =============================================================================
// PDF renderer (printpdf)
// =============================================================================

/// Draws blocks top-down onto a single letter page with built-in Times fonts.
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Per-style font size (points) and whether the bold face is used.
fn style_spec(style: TextStyle) -> (f64, bool) {
    match style {
        TextStyle::CompanyName => (22.0, true),
        TextStyle::DocumentTitle => (28.0, true),
        TextStyle::SectionHeading => (14.0, true),
        TextStyle::Body => (11.0, false),
        TextStyle::Footer => (10.0, false),
    }
}

fn style_color(style: TextStyle) -> Color {
    match style {
        TextStyle::CompanyName | TextStyle::DocumentTitle | TextStyle::SectionHeading => {
            // Accent blue
            Color::Rgb(Rgb::new(0.26, 0.52, 0.96, None))
        }
        TextStyle::Body => Color::Rgb(Rgb::new(0.1, 0.1, 0.1, None)),
        TextStyle::Footer => Color::Rgb(Rgb::new(0.38, 0.38, 0.38, None)),
    }
}

impl DocumentRenderer for PdfRenderer {
    fn renderer_name(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, document: &InvoiceDocument, path: &Path) -> Result<()> {
        let (doc, page, layer) =
            PdfDocument::new("Invoice", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "invoice");
        let layer = doc.get_page(page).get_layer(layer);

        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::TimesRoman).map_err(|e| {
                error::render_error(format!("failed to load built-in font: {}", e))
                    .with_operation("render::pdf")
            })?,
            bold: doc.add_builtin_font(BuiltinFont::TimesBold).map_err(|e| {
                error::render_error(format!("failed to load built-in font: {}", e))
                    .with_operation("render::pdf")
            })?,
        };

        let mut cursor = TOP_MM;
        for block in &document.blocks {
            cursor = draw_block(&layer, &fonts, block, cursor);
        }

        let file = File::create(path).map_err(|e| {
            Error::from(e)
                .with_operation("render::pdf")
                .with_context("path", path.display().to_string())
        })?;
        let mut writer = BufWriter::new(file);
        if let Err(e) = doc.save(&mut writer) {
            // Never leave a usable-looking partial file behind.
            drop(writer);
            let _ = fs::remove_file(path);
            return Err(error::render_error(format!("failed to save pdf: {}", e))
                .with_operation("render::pdf")
                .with_context("path", path.display().to_string()));
        }

        debug!(path = %path.display(), blocks = document.blocks.len(), "rendered pdf");
        Ok(())
    }
}

/// Draw a single block at the current cursor and return the next cursor.
fn draw_block(layer: &PdfLayerReference, fonts: &Fonts, block: &Block, cursor: f64) -> f64 {
    match block {
        Block::Text { content, style } => {
            let (size, use_bold) = style_spec(*style);
            let font = if use_bold { &fonts.bold } else { &fonts.regular };
            let line_height = size * PT_TO_MM * 1.4;

            layer.set_fill_color(style_color(*style));
            let mut y = cursor;
            for line in content.split('\n') {
                y -= line_height;
                layer.use_text(line, size, Mm(MARGIN_LEFT_MM), Mm(y), font);
            }
            y
        }
        Block::Table { header, rows, footer } => {
            draw_table(layer, fonts, header.as_deref(), rows, footer.as_deref(), cursor)
        }
        Block::Spacer { points } => cursor - points * PT_TO_MM,
    }
}

fn draw_table(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    header: Option<&[String]>,
    rows: &[Vec<String>],
    footer: Option<&[String]>,
    cursor: f64,
) -> f64 {
    let columns = header
        .map(|cells| cells.len())
        .or_else(|| rows.first().map(Vec::len))
        .unwrap_or(1)
        .max(1);
    let usable = PAGE_WIDTH_MM - MARGIN_LEFT_MM - MARGIN_RIGHT_MM;

    const ROW_HEIGHT_MM: f64 = 7.0;

    fn draw_row(
        layer: &PdfLayerReference,
        y: &mut f64,
        columns: usize,
        usable: f64,
        cells: &[String],
        size: f64,
        font: &IndirectFontRef,
        color: Color,
    ) {
        *y -= ROW_HEIGHT_MM;
        layer.set_fill_color(color);
        for (i, cell) in cells.iter().enumerate() {
            let x = MARGIN_LEFT_MM + usable * (i as f64) / (columns as f64);
            layer.use_text(cell.as_str(), size, Mm(x), Mm(*y), font);
        }
    }

    let mut y = cursor;

    if let Some(cells) = header {
        draw_row(
            layer,
            &mut y,
            columns,
            usable,
            cells,
            12.0,
            &fonts.bold,
            Color::Rgb(Rgb::new(0.26, 0.52, 0.96, None)),
        );
        // Rule under the header row
        let rule_y = y - 1.5;
        layer.set_outline_color(Color::Rgb(Rgb::new(0.8, 0.8, 0.8, None)));
        layer.set_outline_thickness(0.5);
        layer.add_shape(Line {
            points: vec![
                (Point::new(Mm(MARGIN_LEFT_MM), Mm(rule_y)), false),
                (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_RIGHT_MM), Mm(rule_y)), false),
            ],
            is_closed: false,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        });
    }

    for cells in rows {
        draw_row(
            layer,
            &mut y,
            columns,
            usable,
            cells,
            11.0,
            &fonts.regular,
            Color::Rgb(Rgb::new(0.1, 0.1, 0.1, None)),
        );
    }

    if let Some(cells) = footer {
        draw_row(
            layer,
            &mut y,
            columns,
            usable,
            cells,
            12.0,
            &fonts.bold,
            Color::Rgb(Rgb::new(0.21, 0.68, 0.33, None)),
        );
    }

    y
}

// =============================================================================
// In-memory renderer (for testing)
// =============================================================================

/// Records every line that would be drawn instead of producing a file.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    lines: Mutex<Vec<String>>,
    last_path: Mutex<Option<PathBuf>>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines recorded by the last render, in draw order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// The path handed to the last render call.
    pub fn last_path(&self) -> Option<PathBuf> {
        self.last_path.lock().unwrap().clone()
    }
}

impl DocumentRenderer for MemoryRenderer {
    fn renderer_name(&self) -> &'static str {
        "memory"
    }

    fn render(&self, document: &InvoiceDocument, path: &Path) -> Result<()> {
        let mut lines = self.lines.lock().unwrap();
        lines.clear();

        for block in &document.blocks {
            match block {
                Block::Text { content, style } => {
                    for line in content.split('\n') {
                        lines.push(format!("text[{:?}] {}", style, line));
                    }
                }
                Block::Table { header, rows, footer } => {
                    if let Some(cells) = header {
                        lines.push(format!("table-header {}", cells.join(" | ")));
                    }
                    for cells in rows {
                        lines.push(format!("table-row {}", cells.join(" | ")));
                    }
                    if let Some(cells) = footer {
                        lines.push(format!("table-footer {}", cells.join(" | ")));
                    }
                }
                Block::Spacer { points } => {
                    lines.push(format!("spacer {}", points));
                }
            }
        }

        *self.last_path.lock().unwrap() = Some(path.to_path_buf());
        Ok(())
    }
}
