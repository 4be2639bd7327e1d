//! Fiscal documents: tickets, invoices and credit notes.
//!
//! All three share one [`Document`] type tagged with a [`DocumentKind`]. The
//! kind decides the required parties and the exported `type`; everything
//! else (items, discounts, totals) is common.

use argentum_core::helper::to_float;
use argentum_core::{
    ArgentumError, ArgentumResult, AttributeContainer, AttributeValue, Bag, Parametrized, Params,
    RequiredFields, Setter, Value, raw_setter,
};
use argentum_parties::Person;
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, bag_or_raw, entity_or_raw};
use crate::currency::{self, DEFAULT_DECIMAL_PLACES};
use crate::discount::Discount;
use crate::item::Item;
use crate::model::{DocumentModel, DocumentView, TaxLine};
use crate::relation::Relation;
use crate::tax::Tax;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    Ticket,
    Invoice,
    CreditNote,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::Ticket,
        DocumentKind::Invoice,
        DocumentKind::CreditNote,
    ];

    /// Value exported under the `type` key.
    pub fn type_name(self) -> &'static str {
        match self {
            DocumentKind::Ticket => "ticket",
            DocumentKind::Invoice => "invoice",
            DocumentKind::CreditNote => "creditNote",
        }
    }

    /// Capitalized name used when resolving document classes.
    pub fn class_name(self) -> &'static str {
        match self {
            DocumentKind::Ticket => "Ticket",
            DocumentKind::Invoice => "Invoice",
            DocumentKind::CreditNote => "CreditNote",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_name() == name)
    }

    /// Invoices and credit notes name a receiver (`to`); tickets do not.
    pub fn has_receiver(self) -> bool {
        !matches!(self, DocumentKind::Ticket)
    }

    fn required_fields(self) -> &'static [&'static str] {
        if self.has_receiver() {
            &["type", "from", "to"]
        } else {
            &["type", "from"]
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

static DOCUMENT_SETTERS: &[Setter<Document>] = &[
    raw_setter!(Document, "setType", "type"),
    raw_setter!(Document, "setContent", "content"),
    raw_setter!(Document, "setExtra", "extra"),
    raw_setter!(Document, "setId", "id"),
    raw_setter!(Document, "setPaymentType", "payment_type"),
    raw_setter!(Document, "setPaymentMethod", "payment_method"),
    raw_setter!(Document, "setPaymentConditions", "payment_conditions"),
    raw_setter!(Document, "setPaymentAccount", "payment_account"),
    raw_setter!(Document, "setScheme", "scheme"),
    raw_setter!(Document, "setUsage", "usage"),
    Setter::new("setDate", |doc, value| {
        doc.parameters.set("date", Attribute::Value(parse_date(value)));
        Ok(())
    }),
    Setter::new("setCurrency", |doc, value| {
        let value = match value {
            Value::String(code) => Value::String(code.to_uppercase()),
            other => other,
        };
        doc.parameters.set("currency", Attribute::Value(value));
        Ok(())
    }),
    Setter::new("setFrom", |doc, value| {
        let attr = entity_or_raw(value, Person::new, Attribute::Person)?;
        doc.parameters.set("from", attr);
        Ok(())
    }),
    Setter::new("setTo", |doc, value| {
        if !doc.kind.has_receiver() {
            tracing::trace!(kind = %doc.kind, "ignoring receiver on a document without one");
            return Ok(());
        }
        let attr = entity_or_raw(value, Person::new, Attribute::Person)?;
        doc.parameters.set("to", attr);
        Ok(())
    }),
    Setter::new("setItems", |doc, value| {
        let attr = bag_or_raw(value, Item::new, Attribute::Items)?;
        doc.parameters.set("items", attr);
        Ok(())
    }),
    Setter::new("setTaxes", |doc, value| {
        if let Some(Attribute::Items(items)) = doc.parameters.get_mut("items") {
            for item in items.iter_mut() {
                item.set_taxes_value(value.clone())?;
            }
        }
        Ok(())
    }),
    Setter::new("setDiscounts", |doc, value| {
        let attr = bag_or_raw(value, Discount::new, Attribute::Discounts)?;
        doc.parameters.set("discounts", attr);
        Ok(())
    }),
    // Deprecated: a single flat amount.
    Setter::new("setDiscount", |doc, value| {
        if value.is_null() {
            return Ok(());
        }
        let mut discount = Discount::empty();
        discount.set_name("Discount").set_amount(to_float(&value)?);
        doc.set_discounts(vec![discount]);
        Ok(())
    }),
    Setter::new("setRelations", |doc, value| {
        let attr = bag_or_raw(value, Relation::new, Attribute::Relations)?;
        doc.parameters.set("relations", attr);
        Ok(())
    }),
];

/// RFC 3339 timestamps and plain `YYYY-MM-DD` dates become [`Value::DateTime`].
fn parse_date(value: Value) -> Value {
    match value {
        Value::String(s) => match parse_date_str(&s) {
            Some(date) => Value::DateTime(date),
            None => Value::String(s),
        },
        other => other,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc())
        })
}

/// Ticket, invoice or credit note.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    kind: DocumentKind,
    parameters: AttributeContainer<Attribute>,
    required: RequiredFields,
}

impl Document {
    pub fn new(kind: DocumentKind, params: Params) -> ArgentumResult<Self> {
        let mut document = Self::empty(kind);
        document.initialize(params)?;
        Ok(document)
    }

    pub fn ticket(params: Params) -> ArgentumResult<Self> {
        Self::new(DocumentKind::Ticket, params)
    }

    pub fn invoice(params: Params) -> ArgentumResult<Self> {
        Self::new(DocumentKind::Invoice, params)
    }

    pub fn credit_note(params: Params) -> ArgentumResult<Self> {
        Self::new(DocumentKind::CreditNote, params)
    }

    /// Uninitialized document; call [`Parametrized::initialize`] to apply
    /// defaults.
    pub fn empty(kind: DocumentKind) -> Self {
        Self {
            kind,
            parameters: AttributeContainer::new(),
            required: RequiredFields::new(kind.required_fields()),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn document_type(&self) -> &'static str {
        self.kind.type_name()
    }

    fn value(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key).and_then(Attribute::as_value)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(Value::as_str)
    }

    fn set_text(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.parameters
            .set(key, Attribute::Value(Value::String(value.into())));
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.text("id")
    }

    pub fn set_id(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("id", value)
    }

    pub fn date(&self) -> Option<&DateTime<Utc>> {
        self.value("date").and_then(Value::as_datetime)
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) -> &mut Self {
        self.parameters.set("date", Attribute::Value(Value::DateTime(date)));
        self
    }

    pub fn content(&self) -> Option<&Value> {
        self.value("content")
    }

    pub fn set_content(&mut self, content: Value) -> &mut Self {
        self.parameters.set("content", Attribute::Value(content));
        self
    }

    pub fn extra(&self) -> Option<&Value> {
        self.value("extra")
    }

    pub fn set_extra(&mut self, extra: Value) -> &mut Self {
        self.parameters.set("extra", Attribute::Value(extra));
        self
    }

    pub fn from(&self) -> Option<&Person> {
        self.parameters.get("from").and_then(Attribute::as_person)
    }

    pub fn set_from(&mut self, person: Person) -> &mut Self {
        self.parameters.set("from", Attribute::Person(person));
        self
    }

    pub fn to(&self) -> Option<&Person> {
        self.parameters.get("to").and_then(Attribute::as_person)
    }

    pub fn set_to(&mut self, person: Person) -> &mut Self {
        self.parameters.set("to", Attribute::Person(person));
        self
    }

    pub fn items(&self) -> &[Item] {
        match self.parameters.get("items") {
            Some(Attribute::Items(bag)) => bag.all(),
            _ => &[],
        }
    }

    pub fn set_items(&mut self, items: impl Into<Bag<Item>>) -> &mut Self {
        self.parameters.set("items", Attribute::Items(items.into()));
        self
    }

    pub fn add_item(&mut self, item: Item) -> &mut Self {
        match self.parameters.get_mut("items") {
            Some(Attribute::Items(bag)) => bag.add(item),
            _ => self
                .parameters
                .set("items", Attribute::Items(Bag::from(vec![item]))),
        }
        self
    }

    /// Attach clones of `taxes` to every current item.
    pub fn apply_taxes(&mut self, taxes: &Bag<Tax>) -> &mut Self {
        if let Some(Attribute::Items(items)) = self.parameters.get_mut("items") {
            for item in items.iter_mut() {
                item.set_taxes(taxes.clone());
            }
        }
        self
    }

    pub fn discounts(&self) -> &[Discount] {
        match self.parameters.get("discounts") {
            Some(Attribute::Discounts(bag)) => bag.all(),
            _ => &[],
        }
    }

    pub fn set_discounts(&mut self, discounts: impl Into<Bag<Discount>>) -> &mut Self {
        self.parameters
            .set("discounts", Attribute::Discounts(discounts.into()));
        self
    }

    pub fn add_discount(&mut self, discount: Discount) -> &mut Self {
        match self.parameters.get_mut("discounts") {
            Some(Attribute::Discounts(bag)) => bag.add(discount),
            _ => {
                self.set_discounts(vec![discount]);
            }
        }
        self
    }

    pub fn relations(&self) -> &[Relation] {
        match self.parameters.get("relations") {
            Some(Attribute::Relations(bag)) => bag.all(),
            _ => &[],
        }
    }

    pub fn set_relations(&mut self, relations: impl Into<Bag<Relation>>) -> &mut Self {
        self.parameters
            .set("relations", Attribute::Relations(relations.into()));
        self
    }

    /// Append a relation, replacing anything that is not a relation bag.
    pub fn add_relation(&mut self, relation: Relation) -> &mut Self {
        match self.parameters.get_mut("relations") {
            Some(Attribute::Relations(bag)) => bag.add(relation),
            _ => {
                self.set_relations(vec![relation]);
            }
        }
        self
    }

    pub fn currency(&self) -> Option<&str> {
        self.text("currency")
    }

    pub fn set_currency(&mut self, code: &str) -> &mut Self {
        self.set_text("currency", code.to_uppercase())
    }

    pub fn payment_type(&self) -> Option<&str> {
        self.text("payment_type")
    }

    pub fn set_payment_type(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("payment_type", value)
    }

    pub fn payment_method(&self) -> Option<&str> {
        self.text("payment_method")
    }

    pub fn set_payment_method(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("payment_method", value)
    }

    pub fn payment_conditions(&self) -> Option<&str> {
        self.text("payment_conditions")
    }

    pub fn payment_account(&self) -> Option<&str> {
        self.text("payment_account")
    }

    pub fn scheme(&self) -> Option<&str> {
        self.text("scheme")
    }

    pub fn usage(&self) -> Option<&str> {
        self.text("usage")
    }

    pub fn currency_decimal_places(&self) -> u32 {
        match self.currency() {
            Some(code) => currency::decimal_places(Some(code)),
            None => DEFAULT_DECIMAL_PLACES,
        }
    }

    pub fn format_currency(&self, amount: f64) -> String {
        currency::format_amount(amount, self.currency_decimal_places())
    }

    /// Σ `price * quantity` over the items.
    pub fn subtotal(&self) -> f64 {
        self.items().iter().map(Item::amount).sum()
    }

    /// One tax per distinct type found on the items.
    ///
    /// The first occurrence of a type provides its name, rate and fixed
    /// amount; the base is the unrounded sum of `amount - discount` of every
    /// item carrying it.
    pub fn taxes(&self) -> Bag<Tax> {
        let mut running: IndexMap<&str, (&Tax, f64)> = IndexMap::new();

        for item in self.items() {
            let base = item.taxable_amount();
            for tax in item.taxes() {
                let key = tax.tax_type().unwrap_or_default();
                running.entry(key).or_insert((tax, 0.0)).1 += base;
            }
        }

        tracing::trace!(types = running.len(), "aggregated item taxes");

        running
            .into_values()
            .map(|(first, base)| {
                let mut tax = first.clone();
                tax.set_base_amount(base);
                tax
            })
            .collect()
    }

    pub fn taxes_amount(&self) -> f64 {
        let places = self.currency_decimal_places();
        self.taxes()
            .iter()
            .map(|tax| tax.amount_for_with_places(tax.base_amount().unwrap_or(0.0), places))
            .sum()
    }

    /// Explicit discounts when any exist, otherwise the item discounts.
    pub fn discounts_amount(&self) -> f64 {
        let discounts = self.discounts();
        if discounts.is_empty() {
            self.items().iter().map(Item::discount).sum()
        } else {
            discounts.iter().filter_map(Discount::amount).sum()
        }
    }

    pub fn total(&self) -> f64 {
        self.subtotal() - self.discounts_amount() + self.taxes_amount()
    }

    pub fn validate(&self) -> ArgentumResult<()> {
        self.validate_required()?;

        if self.text("type").is_none() {
            return Err(ArgentumError::invalid_type("type", "must be a string"));
        }

        match self.value("date") {
            Some(v) if !v.is_blank() && v.as_datetime().is_none() => {
                return Err(ArgentumError::invalid_type("date", "must be a date"));
            }
            _ => {}
        }

        self.validate_person("from")?;
        if self.kind.has_receiver() {
            self.validate_person("to")?;
        }

        match self.parameters.get("items") {
            Some(Attribute::Items(bag)) => bag.iter().try_for_each(Item::validate)?,
            other => reject_non_blank("items", other, "must be a list of Item objects")?,
        }

        match self.parameters.get("discounts") {
            Some(Attribute::Discounts(bag)) => bag.iter().try_for_each(Discount::validate)?,
            other => reject_non_blank("discounts", other, "must be a list of Discount objects")?,
        }

        match self.parameters.get("relations") {
            Some(Attribute::Relations(bag)) => bag.iter().try_for_each(Relation::validate)?,
            other => reject_non_blank("relations", other, "must be a list of Relation objects")?,
        }

        Ok(())
    }

    fn validate_person(&self, key: &str) -> ArgentumResult<()> {
        match self.parameters.get(key) {
            Some(Attribute::Person(person)) => person.validate(),
            other => reject_non_blank(key, other, "must be a Person object"),
        }
    }

    pub fn to_value(&self) -> Value {
        self.parameters.export()
    }

    /// Read-only projection for renderers.
    pub fn view(&self) -> DocumentView {
        let places = self.currency_decimal_places();
        let taxes: Vec<TaxLine> = self
            .taxes()
            .iter()
            .map(|tax| TaxLine::from_tax(tax, places))
            .collect();
        let subtotal = self.subtotal();
        let discounts_amount = self.discounts_amount();
        let taxes_amount = taxes.iter().map(|line| line.amount).sum();

        DocumentView {
            document_type: self.document_type().to_string(),
            currency: self.currency().map(str::to_string),
            parameters: self.to_value(),
            taxes,
            subtotal,
            discounts_amount,
            taxes_amount,
            total: subtotal - discounts_amount + taxes_amount,
        }
    }
}

fn reject_non_blank(key: &str, attr: Option<&Attribute>, reason: &str) -> ArgentumResult<()> {
    match attr {
        Some(a) if !a.is_blank() => {
            tracing::debug!(field = key, reason, "rejecting document field");
            Err(ArgentumError::invalid_type(key, reason))
        }
        _ => Ok(()),
    }
}

impl Parametrized for Document {
    type Attr = Attribute;

    fn setters() -> &'static [Setter<Self>] {
        DOCUMENT_SETTERS
    }

    fn parameters(&self) -> &AttributeContainer<Attribute> {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut AttributeContainer<Attribute> {
        &mut self.parameters
    }

    fn required(&self) -> &RequiredFields {
        &self.required
    }

    fn required_mut(&mut self) -> &mut RequiredFields {
        &mut self.required
    }

    fn after_initialize(&mut self) {
        if !self.parameters.has("content") {
            self.set_content(Value::Map(Params::new()));
        }
        let kind = self.document_type();
        self.set_text("type", kind);
        if !self.parameters.is_filled("date") {
            self.set_date(Utc::now());
        }
    }

    fn validate(&self) -> ArgentumResult<()> {
        Document::validate(self)
    }

    fn to_value(&self) -> Value {
        Document::to_value(self)
    }
}

impl DocumentModel for Document {
    fn document_type(&self) -> &str {
        self.kind.type_name()
    }

    fn validate(&self) -> ArgentumResult<()> {
        Document::validate(self)
    }

    fn to_value(&self) -> Value {
        Document::to_value(self)
    }

    fn view(&self) -> DocumentView {
        Document::view(self)
    }

    fn as_document(&self) -> Option<&Document> {
        Some(self)
    }
}
