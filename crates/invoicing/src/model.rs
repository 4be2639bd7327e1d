//! Object-safe document interface and the read-only view handed to renderers.

use std::fmt;

use argentum_core::{ArgentumResult, Value};
use serde::Serialize;

use crate::document::Document;
use crate::tax::Tax;

/// Behaviour shared by core documents and gateway-specific documents.
pub trait DocumentModel: fmt::Debug + Send + Sync {
    fn document_type(&self) -> &str;

    fn validate(&self) -> ArgentumResult<()>;

    /// Recursive export to a plain nested map.
    fn to_value(&self) -> Value;

    fn view(&self) -> DocumentView;

    /// The underlying core document, when there is one.
    fn as_document(&self) -> Option<&Document> {
        None
    }
}

/// Computed state of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentView {
    #[serde(rename = "type")]
    pub document_type: String,
    pub currency: Option<String>,
    pub parameters: Value,
    pub taxes: Vec<TaxLine>,
    pub subtotal: f64,
    pub discounts_amount: f64,
    pub taxes_amount: f64,
    pub total: f64,
}

/// One synthesized tax of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxLine {
    #[serde(rename = "type")]
    pub tax_type: Option<String>,
    pub name: Option<String>,
    pub rate: Option<f64>,
    pub base_amount: f64,
    pub amount: f64,
}

impl TaxLine {
    pub fn from_tax(tax: &Tax, places: u32) -> Self {
        let base_amount = tax.base_amount().unwrap_or(0.0);
        Self {
            tax_type: tax.tax_type().map(str::to_string),
            name: tax.name().map(str::to_string),
            rate: tax.rate(),
            base_amount,
            amount: tax.amount_for_with_places(base_amount, places),
        }
    }
}
