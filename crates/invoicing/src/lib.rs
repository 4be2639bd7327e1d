//! `argentum-invoicing`: fiscal documents and their totals.
//!
//! Items carry their own taxes; a [`Document`] merges them per tax type,
//! subtracts discounts and rounds once per synthesized tax.

pub mod attribute;
pub mod currency;
pub mod discount;
pub mod document;
pub mod item;
pub mod model;
pub mod relation;
pub mod tax;

pub use attribute::Attribute;
pub use currency::Currency;
pub use discount::Discount;
pub use document::{Document, DocumentKind};
pub use item::Item;
pub use model::{DocumentModel, DocumentView, TaxLine};
pub use relation::Relation;
pub use tax::Tax;
