//! DOCX template fill: placeholder substitution inside the template's
//! document XML.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;

use crate::catalog::CATALOG;
use crate::context::{Context, ContextValue};
use crate::error::{DocError, Result};
use crate::request::DocType;

/// Archive parts that carry placeholder text.
fn is_text_part(name: &str) -> bool {
    name == "word/document.xml"
        || (name.starts_with("word/header") && name.ends_with(".xml"))
        || (name.starts_with("word/footer") && name.ends_with(".xml"))
}

fn fill_error(path: &Path, message: impl ToString) -> DocError {
    DocError::TemplateFill {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Fill `template` with `context` and write the result to `output`.
/// Non-text archive parts (images, styles, relationships) are copied
/// through unchanged.
pub fn fill_template(template: &Path, output: &Path, context: &Context) -> Result<()> {
    if !template.exists() {
        return Err(DocError::TemplateNotFound(template.to_path_buf()));
    }

    let file = File::open(template)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| fill_error(template, e))?;

    let mut writer = zip::ZipWriter::new(File::create(output)?);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| fill_error(template, e))?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;

        let bytes = if is_text_part(&name) {
            let xml =
                String::from_utf8(bytes).map_err(|_| fill_error(template, "invalid UTF-8"))?;
            substitute(&xml, context).into_bytes()
        } else {
            bytes
        };

        writer
            .start_file(name, options)
            .map_err(|e| fill_error(template, e))?;
        writer.write_all(&bytes)?;
    }

    writer.finish().map_err(|e| fill_error(template, e))?;
    Ok(())
}

/// Replace `{{key}}` and `{{ key }}` markers with rendered values.
/// Emphasized values close the current run and open a bold one, so markers
/// must sit inside a single `<w:t>` element.
fn substitute(xml: &str, context: &Context) -> String {
    let mut out = xml.to_string();
    for (key, value) in context {
        let replacement = match value {
            ContextValue::Count(qty) => qty.to_string(),
            ContextValue::Text(text) => escape_xml(text),
            ContextValue::Emphasis(text) => format!(
                "</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r><w:r><w:t xml:space=\"preserve\">",
                escape_xml(text)
            ),
        };
        for marker in [format!("{{{{{key}}}}}"), format!("{{{{ {key} }}}}")] {
            out = out.replace(&marker, &replacement);
        }
    }
    out
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Write a minimal valid template carrying every placeholder for the
/// document type. `init` installs these so generation works before branded
/// templates are dropped in.
pub fn write_starter_template(path: &Path, doc_type: DocType) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = zip::ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
        ("_rels/.rels", RELS_XML.to_string()),
        ("word/document.xml", starter_document_xml(doc_type)),
    ];
    for (name, content) in parts {
        writer
            .start_file(name, options)
            .map_err(|e| fill_error(path, e))?;
        writer.write_all(content.as_bytes())?;
    }

    writer.finish().map_err(|e| fill_error(path, e))?;
    Ok(())
}

fn starter_document_xml(doc_type: DocType) -> String {
    let paragraph = |text: &str| {
        format!(
            "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            text
        )
    };

    let mut body = String::new();
    body.push_str(&paragraph(doc_type.label()));
    if doc_type.is_receipt() {
        body.push_str(&paragraph("Receipt No: {{receipt_no}}    Date: {{date}}"));
    } else {
        body.push_str(&paragraph("Quotation No: {{quotation_no}}    Date: {{date}}"));
    }
    body.push_str(&paragraph("Customer: {{customer_name}}"));
    body.push_str(&paragraph("Address: {{address_line1}}"));
    body.push_str(&paragraph("Phone: {{phone}}    Email: {{email}}"));

    for item in CATALOG {
        body.push_str(&paragraph(&format!(
            "{}: {{{{{}}}}}",
            escape_xml(item.name),
            item.placeholder
        )));
    }

    body.push_str(&paragraph("Total Price: ₹ {{total_price}}"));
    match doc_type {
        DocType::QuotationSummary => {
            body.push_str(&paragraph("Subsidy: ₹ {{subsidy}}"));
            body.push_str(&paragraph("Final Price: ₹ {{final_price}}"));
        }
        DocType::PartialProformaReceipt => {
            body.push_str(&paragraph("Final Price: ₹ {{final_price}}"));
            body.push_str(&paragraph(
                "Amount Received: ₹ {{amount_received}}    Mode: {{payment_mode}}",
            ));
            body.push_str(&paragraph(
                "Reference: {{reference_id}}    Payment Date: {{payment_date}}",
            ));
            body.push_str(&paragraph(
                "Balance Due: ₹ {{balance_due}}    Tentative Delivery: {{tentative_delivery}}",
            ));
        }
        DocType::FullProformaReceipt => {
            body.push_str(&paragraph("Final Price: ₹ {{final_price}}"));
            body.push_str(&paragraph(
                "Amount Received: ₹ {{amount_received}}    Mode: {{payment_mode}}",
            ));
            body.push_str(&paragraph(
                "Reference: {{reference_id}}    Payment Date: {{payment_date}}",
            ));
            body.push_str(&paragraph("Delivery Date: {{delivery_date}}"));
        }
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>{}</w:body></w:document>",
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextValue;
    use std::collections::BTreeMap;

    fn small_context() -> Context {
        let mut ctx = BTreeMap::new();
        ctx.insert("customer_name", ContextValue::Emphasis("Ravi & Sons".to_string()));
        ctx.insert("total_price", ContextValue::Text("168,000".to_string()));
        ctx.insert("quantity_battery", ContextValue::Count(2));
        ctx
    }

    #[test]
    fn substitute_replaces_both_marker_forms() {
        let xml = "<w:t>{{total_price}} and {{ total_price }}</w:t>";
        let out = substitute(xml, &small_context());
        assert_eq!(out, "<w:t>168,000 and 168,000</w:t>");
    }

    #[test]
    fn substitute_writes_quantities_numerically() {
        let out = substitute("<w:t>{{quantity_battery}}</w:t>", &small_context());
        assert_eq!(out, "<w:t>2</w:t>");
    }

    #[test]
    fn emphasized_values_become_bold_runs() {
        let xml = "<w:r><w:t>Name: {{customer_name}}</w:t></w:r>";
        let out = substitute(xml, &small_context());
        assert!(out.contains("<w:b/>"));
        assert!(out.contains("Ravi &amp; Sons"));
        assert!(!out.contains("{{customer_name}}"));
    }

    #[test]
    fn values_are_xml_escaped() {
        let mut ctx = Context::new();
        ctx.insert("address_line1", ContextValue::Text("<Plot 5> & Co".to_string()));
        let out = substitute("<w:t>{{address_line1}}</w:t>", &ctx);
        assert_eq!(out, "<w:t>&lt;Plot 5&gt; &amp; Co</w:t>");
    }

    #[test]
    fn unknown_markers_are_left_alone() {
        let out = substitute("<w:t>{{mystery}}</w:t>", &small_context());
        assert_eq!(out, "<w:t>{{mystery}}</w:t>");
    }

    #[test]
    fn starter_template_round_trips_through_fill() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("starter.docx");
        let output = dir.path().join("filled.docx");

        write_starter_template(&template, DocType::QuotationSummary).unwrap();
        fill_template(&template, &output, &small_context()).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let mut document = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut document)
            .unwrap();

        assert!(document.contains("Ravi &amp; Sons"));
        assert!(document.contains("168,000"));
        assert!(!document.contains("{{customer_name}}"));
        assert!(!document.contains("{{total_price}}"));
        // markers without a context entry survive untouched
        assert!(document.contains("{{quotation_no}}"));
    }

    #[test]
    fn starter_templates_cover_every_quantity_placeholder() {
        for doc_type in [
            DocType::QuotationSummary,
            DocType::PartialProformaReceipt,
            DocType::FullProformaReceipt,
        ] {
            let xml = starter_document_xml(doc_type);
            for item in CATALOG {
                assert!(
                    xml.contains(&format!("{{{{{}}}}}", item.placeholder)),
                    "{} missing from {:?}",
                    item.placeholder,
                    doc_type
                );
            }
        }
    }

    #[test]
    fn missing_template_is_a_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.docx");
        let output = dir.path().join("out.docx");
        let err = fill_template(&missing, &output, &small_context()).unwrap_err();
        assert!(matches!(err, DocError::TemplateNotFound(_)));
    }
}
