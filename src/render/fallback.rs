//! Minimal summary PDF used when DOCX conversion is unavailable.
//!
//! Built entirely in-process, with no external tooling: a reduced
//! header-line summary laid over the letterhead image when one is
//! installed next to the templates.

use std::collections::BTreeMap;
use std::path::Path;

use printpdf::{Base64OrRaw, GeneratePdfOptions, PdfDocument};

use crate::error::{DocError, Result};

const LETTERHEAD_SRC: &str = "letterhead.png";

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Simple markup keeps the layout within what printpdf's HTML renderer
/// supports.
fn summary_html(title: &str, lines: &[(String, String)], letterhead: bool) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><html><head><style>body { font-family: sans-serif; }</style></head><body>",
    );
    if letterhead {
        html.push_str(&format!("<img src=\"{LETTERHEAD_SRC}\"/>"));
    }
    html.push_str(&format!("<h1>{}</h1>", escape_html(title)));
    for (label, value) in lines {
        html.push_str(&format!(
            "<p><strong>{}:</strong> {}</p>",
            escape_html(label),
            escape_html(value)
        ));
    }
    html.push_str("</body></html>");
    html
}

/// Write the reduced summary page to `path`.
pub(crate) fn write_summary_pdf(
    path: &Path,
    title: &str,
    lines: &[(String, String)],
    letterhead: Option<&Path>,
) -> Result<()> {
    let mut images = BTreeMap::new();
    if let Some(image_path) = letterhead {
        if let Ok(bytes) = std::fs::read(image_path) {
            images.insert(LETTERHEAD_SRC.to_string(), Base64OrRaw::Raw(bytes));
        }
    }

    let html = summary_html(title, lines, !images.is_empty());
    let mut warnings = Vec::new();
    let doc = PdfDocument::from_html(
        &html,
        &images,
        &BTreeMap::new(),
        &GeneratePdfOptions::default(),
        &mut warnings,
    )
    .map_err(|e| DocError::FallbackPdf(e.to_string()))?;

    let bytes = doc.save(&Default::default(), &mut warnings);
    std::fs::write(path, bytes)?;
    Ok(())
}
