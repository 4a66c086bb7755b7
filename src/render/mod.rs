//! Renderer adapter: fills the named DOCX template, attempts the PDF
//! rendition, and falls back to a generated summary page so document
//! generation always yields a downloadable artifact.

mod convert;
mod docx;
mod fallback;

pub use docx::{fill_template, write_starter_template};

use std::fs;
use std::path::{Path, PathBuf};

use crate::context::{format_amount, Context, CURRENCY_SYMBOL};
use crate::error::{DocError, Result};
use crate::pricing::PricingResult;
use crate::request::{DocType, DocumentRequest};

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Docx,
    Pdf,
}

impl ArtifactKind {
    pub fn mime(&self) -> &'static str {
        match self {
            ArtifactKind::Docx => DOCX_MIME,
            ArtifactKind::Pdf => PDF_MIME,
        }
    }
}

/// One produced output file.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub kind: ArtifactKind,
}

/// The PDF rendition, by how it was produced.
#[derive(Debug, Clone)]
pub enum Secondary {
    /// Full-fidelity conversion of the primary document.
    Converted(Artifact),
    /// Reduced summary page; conversion was unavailable.
    Fallback(Artifact),
}

impl Secondary {
    pub fn artifact(&self) -> &Artifact {
        match self {
            Secondary::Converted(artifact) | Secondary::Fallback(artifact) => artifact,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub primary: Artifact,
    pub secondary: Option<Secondary>,
}

/// Everything the renderer needs beyond the request itself.
pub struct RenderPlan<'a> {
    pub template_path: &'a Path,
    pub output_dir: &'a Path,
    pub soffice: &'a str,
    /// Letterhead image composited under the fallback page, when installed.
    pub letterhead: Option<PathBuf>,
    pub with_pdf: bool,
    /// Overrides the default primary artifact path.
    pub output_override: Option<PathBuf>,
}

/// Header lines for the fallback page: document number, customer, and the
/// key amounts.
fn summary_lines(request: &DocumentRequest, pricing: &PricingResult) -> Vec<(String, String)> {
    let rupees = |value: i64| format!("{CURRENCY_SYMBOL} {}", format_amount(value));

    let mut lines = vec![
        ("Document No".to_string(), request.doc_number.clone()),
        ("Customer".to_string(), request.customer_name.clone()),
        ("Total Price".to_string(), rupees(pricing.total_price)),
    ];
    if request.doc_type == DocType::QuotationSummary {
        lines.push(("Subsidy".to_string(), rupees(pricing.subsidy)));
    }
    lines.push(("Final Price".to_string(), rupees(pricing.final_price)));
    if request.doc_type.is_receipt() {
        lines.push((
            "Amount Received".to_string(),
            format!("{CURRENCY_SYMBOL} {}", request.payment.amount_received),
        ));
    }
    if request.doc_type == DocType::PartialProformaReceipt {
        lines.push((
            "Balance Due".to_string(),
            format!("{CURRENCY_SYMBOL} {}", request.payment.balance_due),
        ));
    }
    lines
}

/// Render the primary DOCX and, when requested, the PDF rendition.
/// Conversion failures downgrade to the fallback page; only missing
/// templates and write failures abort.
pub fn render(
    request: &DocumentRequest,
    pricing: &PricingResult,
    context: &Context,
    plan: &RenderPlan,
) -> Result<RenderOutcome> {
    if !plan.template_path.exists() {
        return Err(DocError::TemplateNotFound(plan.template_path.to_path_buf()));
    }

    fs::create_dir_all(plan.output_dir)?;

    let stem = request.doc_type.file_stem(&request.doc_number);
    let docx_path = plan
        .output_override
        .clone()
        .unwrap_or_else(|| plan.output_dir.join(format!("{stem}.docx")));

    fill_template(plan.template_path, &docx_path, context)?;
    let primary = Artifact {
        path: docx_path.clone(),
        kind: ArtifactKind::Docx,
    };

    let secondary = if plan.with_pdf {
        let pdf_path = docx_path.with_extension("pdf");
        match convert::docx_to_pdf(plan.soffice, &docx_path, &pdf_path) {
            Ok(()) => Some(Secondary::Converted(Artifact {
                path: pdf_path,
                kind: ArtifactKind::Pdf,
            })),
            Err(_failure) => {
                fallback::write_summary_pdf(
                    &pdf_path,
                    request.doc_type.label(),
                    &summary_lines(request, pricing),
                    plan.letterhead.as_deref(),
                )?;
                Some(Secondary::Fallback(Artifact {
                    path: pdf_path,
                    kind: ArtifactKind::Pdf,
                }))
            }
        }
    } else {
        None
    };

    Ok(RenderOutcome { primary, secondary })
}
