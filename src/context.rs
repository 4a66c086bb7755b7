//! Document context assembly: flattens a validated request and its pricing
//! into the placeholder mapping the renderer consumes.

use std::collections::BTreeMap;

use crate::catalog::CATALOG;
use crate::pricing::PricingResult;
use crate::request::{DocumentRequest, DATE_DISPLAY};

/// Currency symbol used on all display surfaces.
pub const CURRENCY_SYMBOL: &str = "₹";

/// A single value in the render mapping. Quantities stay numeric until the
/// renderer formats them; `Emphasis` values render bold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValue {
    Count(u32),
    Text(String),
    Emphasis(String),
}

impl ContextValue {
    /// Display text, without any markup.
    pub fn render(&self) -> String {
        match self {
            ContextValue::Count(qty) => qty.to_string(),
            ContextValue::Text(text) | ContextValue::Emphasis(text) => text.clone(),
        }
    }

    pub fn is_emphasized(&self) -> bool {
        matches!(self, ContextValue::Emphasis(_))
    }
}

/// The flat placeholder mapping handed to the template renderer.
pub type Context = BTreeMap<&'static str, ContextValue>;

/// Keys rendered bold when they carry a value. Totals and the document date
/// stay regular weight.
const EMPHASIZED: &[&str] = &[
    "quotation_no",
    "receipt_no",
    "customer_name",
    "address_line1",
    "phone",
    "email",
    "amount_received",
    "payment_mode",
    "reference_id",
    "payment_date",
    "balance_due",
    "tentative_delivery",
    "delivery_date",
];

fn field(key: &'static str, value: String) -> ContextValue {
    if EMPHASIZED.contains(&key) && !value.is_empty() {
        ContextValue::Emphasis(value)
    } else {
        ContextValue::Text(value)
    }
}

/// Whole rupees with thousands separators, no symbol and no decimals.
pub fn format_amount(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

fn or_na(value: &str) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

/// Build the placeholder mapping for one request. Pure: identical inputs
/// produce an identical mapping. Every catalog placeholder is always
/// present, quantity 0 for unselected items.
pub fn build_context(request: &DocumentRequest, pricing: &PricingResult) -> Context {
    let mut ctx = Context::new();
    let payment = &request.payment;

    ctx.insert("quotation_no", field("quotation_no", request.doc_number.clone()));
    ctx.insert("receipt_no", field("receipt_no", request.doc_number.clone()));
    ctx.insert(
        "date",
        ContextValue::Text(request.date.format(DATE_DISPLAY).to_string()),
    );

    ctx.insert(
        "customer_name",
        field("customer_name", request.customer_name.clone()),
    );
    ctx.insert(
        "address_line1",
        field("address_line1", request.customer_address.clone()),
    );
    ctx.insert("phone", field("phone", request.customer_phone.clone()));
    ctx.insert("email", field("email", or_na(&request.customer_email)));

    ctx.insert(
        "total_price",
        ContextValue::Text(format_amount(pricing.total_price)),
    );
    ctx.insert("subsidy", ContextValue::Text(format_amount(pricing.subsidy)));
    ctx.insert(
        "final_price",
        ContextValue::Text(format_amount(pricing.final_price)),
    );

    ctx.insert(
        "amount_received",
        field("amount_received", payment.amount_received.clone()),
    );
    ctx.insert(
        "payment_mode",
        field(
            "payment_mode",
            payment.mode.as_ref().map_or(String::new(), |m| m.display().to_string()),
        ),
    );
    ctx.insert("reference_id", field("reference_id", or_na(&payment.reference_id)));
    ctx.insert(
        "payment_date",
        field(
            "payment_date",
            payment
                .payment_date
                .map_or(String::new(), |d| d.format(DATE_DISPLAY).to_string()),
        ),
    );
    ctx.insert("balance_due", field("balance_due", payment.balance_due.clone()));
    ctx.insert(
        "tentative_delivery",
        field(
            "tentative_delivery",
            payment
                .tentative_delivery
                .map_or(String::new(), |d| d.format(DATE_DISPLAY).to_string()),
        ),
    );
    ctx.insert(
        "delivery_date",
        field(
            "delivery_date",
            payment
                .delivery_date
                .map_or(String::new(), |d| d.format(DATE_DISPLAY).to_string()),
        ),
    );

    for item in CATALOG {
        ctx.insert(item.placeholder, ContextValue::Count(0));
    }
    for sel in &request.selections {
        ctx.insert(sel.item.placeholder, ContextValue::Count(sel.quantity));
    }

    ctx
}
