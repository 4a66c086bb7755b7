use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("Config directory not found at {0}. Run 'orbitdoc init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid document type '{0}'. Use quotation, partial-receipt, or full-receipt.")]
    InvalidDocType(String),

    #[error("Invalid role '{0}'. Use telecaller, bdo, manager, or co-founder.")]
    InvalidRole(String),

    #[error("Invalid date '{0}'. Use YYYY-MM-DD or DD/MM/YYYY.")]
    InvalidDate(String),

    #[error("Unknown item '{0}'. Run 'orbitdoc items' to see the catalog.")]
    ItemNotFound(String),

    #[error("Invalid item format '{0}'. Expected 'item:quantity' (e.g., 'battery:2')")]
    InvalidItemFormat(String),

    #[error("Invalid quantity '{qty}' for item '{item}': {reason}")]
    InvalidQuantity {
        item: String,
        qty: String,
        reason: String,
    },

    #[error("No item quantities selected. Use --item <id>:<qty> to add at least one line.")]
    NoItems,

    #[error("Quantity {qty} for '{item}' is below the minimum of {min}")]
    BelowMinimum { item: String, qty: u32, min: u32 },

    #[error("Missing mandatory field: {0}")]
    MissingField(&'static str),

    #[error("Phone number must be exactly 10 digits (got {0})")]
    PhoneLength(usize),

    #[error("Amount received is required for proforma receipts")]
    MissingAmountReceived,

    #[error("Balance due is required for partial proforma receipts")]
    MissingBalanceDue,

    #[error("Subsidy applies to Quotation Summary documents only")]
    SubsidyNotApplicable,

    #[error("Subsidy requires --filled-by so the cap can be determined")]
    SubsidyWithoutRole,

    #[error("Subsidy {amount} is outside the allowed range 0..={cap} for this role and battery count")]
    SubsidyOutOfRange { amount: i64, cap: i64 },

    #[error("Subsidy must be a multiple of 1,000 (got {0})")]
    SubsidyStep(i64),

    #[error("Template file not found: {0}")]
    TemplateNotFound(PathBuf),

    #[error("Failed to fill template {path}: {message}")]
    TemplateFill { path: PathBuf, message: String },

    #[error("Failed to generate fallback PDF: {0}")]
    FallbackPdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DocError>;
