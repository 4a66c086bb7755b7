//! Best-effort DOCX to PDF conversion through a headless LibreOffice run.

use std::path::Path;
use std::process::Command;

/// Why a conversion attempt did not produce a PDF. Recovered by the
/// fallback page, never surfaced to the user.
#[derive(Debug)]
pub(crate) struct ConversionFailure(pub String);

pub(crate) fn docx_to_pdf(
    soffice: &str,
    docx: &Path,
    pdf: &Path,
) -> std::result::Result<(), ConversionFailure> {
    // Check the converter binary is available
    if Command::new(soffice).arg("--version").output().is_err() {
        return Err(ConversionFailure(format!("{soffice} not found")));
    }

    let outdir = pdf.parent().unwrap_or_else(|| Path::new("."));

    let output = Command::new(soffice)
        .args(["--headless", "--convert-to", "pdf", "--outdir"])
        .arg(outdir)
        .arg(docx)
        .output()
        .map_err(|e| ConversionFailure(e.to_string()))?;

    if !output.status.success() {
        return Err(ConversionFailure(
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ));
    }

    // soffice names its output after the input stem
    let produced = match docx.file_stem() {
        Some(stem) => outdir.join(stem).with_extension("pdf"),
        None => return Err(ConversionFailure("input has no file stem".to_string())),
    };
    if !produced.exists() {
        return Err(ConversionFailure("converter produced no output".to_string()));
    }
    if produced != pdf {
        std::fs::rename(&produced, pdf).map_err(|e| ConversionFailure(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_converter_binary_is_a_conversion_failure() {
        let dir = tempfile::tempdir().unwrap();
        let docx = dir.path().join("doc.docx");
        let pdf = dir.path().join("doc.pdf");
        std::fs::write(&docx, b"not a real docx").unwrap();

        let err = docx_to_pdf("orbitdoc-no-such-converter", &docx, &pdf).unwrap_err();
        assert!(err.0.contains("not found"));
        assert!(!pdf.exists());
    }
}
