use serde::{Deserialize, Serialize};

use crate::request::DocType;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub templates: TemplateSettings,
    #[serde(default)]
    pub convert: ConvertSettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TemplateSettings {
    #[serde(default = "default_template_dir")]
    pub dir: String,
    #[serde(default = "default_quotation_template")]
    pub quotation_summary: String,
    #[serde(default = "default_partial_template")]
    pub partial_proforma_receipt: String,
    #[serde(default = "default_full_template")]
    pub full_proforma_receipt: String,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            dir: default_template_dir(),
            quotation_summary: default_quotation_template(),
            partial_proforma_receipt: default_partial_template(),
            full_proforma_receipt: default_full_template(),
        }
    }
}

impl TemplateSettings {
    /// Template file name for a document type.
    pub fn file_for(&self, doc_type: DocType) -> &str {
        match doc_type {
            DocType::QuotationSummary => &self.quotation_summary,
            DocType::PartialProformaReceipt => &self.partial_proforma_receipt,
            DocType::FullProformaReceipt => &self.full_proforma_receipt,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ConvertSettings {
    #[serde(default = "default_soffice")]
    pub soffice: String,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            soffice: default_soffice(),
        }
    }
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_template_dir() -> String {
    "templates".to_string()
}

fn default_quotation_template() -> String {
    "Orbit_Agritech_Quotation_Summary_Template.docx".to_string()
}

fn default_partial_template() -> String {
    "Orbit_Agritech_Partial_Proforma_Receipt.docx".to_string()
}

fn default_full_template() -> String {
    "Orbit_Agritech_Full_Proforma_Receipt.docx".to_string()
}

fn default_soffice() -> String {
    "soffice".to_string()
}
