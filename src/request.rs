//! Document requests: the immutable, validated input to pricing and
//! context assembly.

use chrono::NaiveDate;

use crate::catalog::{self, LineSelection, CATALOG};
use crate::error::{DocError, Result};
use crate::pricing::{self, Role, SUBSIDY_STEP};

/// Output date format used in all documents.
pub const DATE_DISPLAY: &str = "%d/%m/%Y";

pub const DOC_NUMBER_DIGITS: usize = 4;
pub const PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocType {
    QuotationSummary,
    PartialProformaReceipt,
    FullProformaReceipt,
}

impl DocType {
    pub fn label(&self) -> &'static str {
        match self {
            DocType::QuotationSummary => "Quotation Summary",
            DocType::PartialProformaReceipt => "Partial Proforma Receipt",
            DocType::FullProformaReceipt => "Full Proforma Receipt",
        }
    }

    pub fn parse(raw: &str) -> Option<DocType> {
        match raw.to_ascii_lowercase().as_str() {
            "quotation" | "quotation-summary" => Some(DocType::QuotationSummary),
            "partial-receipt" | "partial-proforma-receipt" => {
                Some(DocType::PartialProformaReceipt)
            }
            "full-receipt" | "full-proforma-receipt" => Some(DocType::FullProformaReceipt),
            _ => None,
        }
    }

    pub fn is_receipt(&self) -> bool {
        !matches!(self, DocType::QuotationSummary)
    }

    /// Artifact file stem: label with underscores plus the document number,
    /// e.g. `Quotation_Summary_0042`.
    pub fn file_stem(&self, doc_number: &str) -> String {
        format!("{}_{}", self.label().replace(' ', "_"), doc_number)
    }
}

/// Payment mode selector; anything other than the known modes is free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMode {
    Cashfree,
    Cash,
    Other(String),
}

impl PaymentMode {
    pub fn parse(raw: &str) -> PaymentMode {
        match raw.to_ascii_lowercase().as_str() {
            "cashfree" => PaymentMode::Cashfree,
            "cash" => PaymentMode::Cash,
            _ => PaymentMode::Other(raw.trim().to_string()),
        }
    }

    pub fn display(&self) -> &str {
        match self {
            PaymentMode::Cashfree => "Cashfree",
            PaymentMode::Cash => "Cash",
            PaymentMode::Other(text) => text,
        }
    }
}

/// Payment fields; only populated for receipt document types.
#[derive(Debug, Clone, Default)]
pub struct PaymentDetails {
    pub amount_received: String,
    pub mode: Option<PaymentMode>,
    pub reference_id: String,
    pub payment_date: Option<NaiveDate>,
    /// Partial receipts only.
    pub balance_due: String,
    pub tentative_delivery: Option<NaiveDate>,
    /// Full receipts only.
    pub delivery_date: Option<NaiveDate>,
}

/// One generation request. Constructed once per invocation, never mutated.
#[derive(Debug, Clone)]
pub struct DocumentRequest {
    pub doc_type: DocType,
    /// Digits only, at most four.
    pub doc_number: String,
    pub date: NaiveDate,
    pub customer_name: String,
    pub customer_address: String,
    /// Digits only, at most ten.
    pub customer_phone: String,
    /// May be empty; rendered as "N/A" when absent.
    pub customer_email: String,
    pub filled_by: Option<Role>,
    /// Catalog-ordered, quantities all positive.
    pub selections: Vec<LineSelection>,
    /// Requested subsidy amount; only honored on quotations.
    pub subsidy: Option<i64>,
    pub payment: PaymentDetails,
}

/// Strip non-digits and truncate, mirroring the fixed-width numeric form
/// fields. Truncation happens before validation.
pub fn numeric_only(raw: &str, max_len: usize) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(max_len)
        .collect()
}

/// Truncate free text to a field's maximum length.
pub fn clip(raw: &str, max_chars: usize) -> String {
    raw.chars().take(max_chars).collect()
}

/// Accepts YYYY-MM-DD or DD/MM/YYYY.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, DATE_DISPLAY))
        .map_err(|_| DocError::InvalidDate(raw.to_string()))
}

/// Parse item input like "battery:2" into a catalog index and quantity.
fn parse_item_input(input: &str) -> Result<(usize, u32)> {
    let parts: Vec<&str> = input.split(':').collect();
    if parts.len() != 2 {
        return Err(DocError::InvalidItemFormat(input.to_string()));
    }

    let item_id = parts[0].trim();
    let qty_str = parts[1].trim();

    let index =
        catalog::position(item_id).ok_or_else(|| DocError::ItemNotFound(item_id.to_string()))?;

    let quantity: u32 = qty_str.parse().map_err(|_| DocError::InvalidQuantity {
        item: item_id.to_string(),
        qty: qty_str.to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    if quantity == 0 {
        return Err(DocError::InvalidQuantity {
            item: item_id.to_string(),
            qty: qty_str.to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok((index, quantity))
}

/// Parse repeated `id:qty` inputs into a catalog-ordered selection vector.
/// Repeating an item replaces its earlier quantity.
pub fn parse_selections(inputs: &[String]) -> Result<Vec<LineSelection>> {
    let mut quantities = vec![0u32; CATALOG.len()];
    for input in inputs {
        let (index, quantity) = parse_item_input(input)?;
        quantities[index] = quantity;
    }

    Ok(CATALOG
        .iter()
        .zip(quantities)
        .filter(|(_, qty)| *qty > 0)
        .map(|(item, quantity)| LineSelection { item, quantity })
        .collect())
}

/// The slider-equivalent bounding control: subsidy eligibility plus range
/// and step checks. Amounts above the cap never reach the pricing engine.
pub fn bounded_subsidy(
    doc_type: DocType,
    role: Option<Role>,
    selections: &[LineSelection],
    requested: Option<i64>,
) -> Result<i64> {
    let Some(amount) = requested else {
        return Ok(0);
    };
    if doc_type != DocType::QuotationSummary {
        return Err(DocError::SubsidyNotApplicable);
    }
    let Some(role) = role else {
        return Err(DocError::SubsidyWithoutRole);
    };
    if amount % SUBSIDY_STEP != 0 {
        return Err(DocError::SubsidyStep(amount));
    }
    let cap = pricing::subsidy_cap(role, catalog::battery_quantity(selections));
    if amount < 0 || amount > cap {
        return Err(DocError::SubsidyOutOfRange { amount, cap });
    }
    Ok(amount)
}

impl DocumentRequest {
    /// Subsidy amount the pricing engine sees. Zero unless this is a
    /// quotation with a role selected and an opted-in amount; assumes
    /// `validate` has already bounded the request.
    pub fn effective_subsidy(&self) -> i64 {
        match (self.doc_type, self.filled_by, self.subsidy) {
            (DocType::QuotationSummary, Some(_), Some(amount)) => amount,
            _ => 0,
        }
    }

    /// Full validation pass. Generation is blocked on the first failure;
    /// the context builder assumes a validated request.
    pub fn validate(&self) -> Result<()> {
        if self.selections.is_empty() {
            return Err(DocError::NoItems);
        }
        for sel in &self.selections {
            if sel.quantity < sel.item.min_quantity {
                return Err(DocError::BelowMinimum {
                    item: sel.item.id.to_string(),
                    qty: sel.quantity,
                    min: sel.item.min_quantity,
                });
            }
        }

        if self.doc_number.is_empty() {
            return Err(DocError::MissingField("document number"));
        }
        if self.customer_name.trim().is_empty() {
            return Err(DocError::MissingField("customer name"));
        }
        if self.customer_address.trim().is_empty() {
            return Err(DocError::MissingField("address"));
        }
        if self.customer_phone.is_empty() {
            return Err(DocError::MissingField("phone number"));
        }
        if self.customer_phone.len() != PHONE_DIGITS {
            return Err(DocError::PhoneLength(self.customer_phone.len()));
        }

        bounded_subsidy(self.doc_type, self.filled_by, &self.selections, self.subsidy)?;

        if self.doc_type.is_receipt() {
            if self.payment.amount_received.trim().is_empty() {
                return Err(DocError::MissingAmountReceived);
            }
            if self.doc_type == DocType::PartialProformaReceipt
                && self.payment.balance_due.trim().is_empty()
            {
                return Err(DocError::MissingBalanceDue);
            }
        }

        Ok(())
    }
}
