//! Line item of a document.

use argentum_core::{
    ArgentumError, ArgentumResult, AttributeContainer, Bag, Parametrized, Params, RequiredFields,
    Setter, Value, numeric_setter, raw_setter,
};

use crate::attribute::{Attribute, bag_or_raw};
use crate::tax::Tax;

static ITEM_SETTERS: &[Setter<Item>] = &[
    raw_setter!(Item, "setCode", "code"),
    raw_setter!(Item, "setName", "name"),
    raw_setter!(Item, "setDescription", "description"),
    numeric_setter!(Item, "setQuantity", "quantity"),
    raw_setter!(Item, "setUnit", "unit"),
    raw_setter!(Item, "setUnitCode", "unit_code"),
    numeric_setter!(Item, "setPrice", "price"),
    numeric_setter!(Item, "setDiscount", "discount"),
    Setter::new("setTaxes", |item, value| item.set_taxes_value(value)),
];

/// Item entity.
///
/// Required: `name`, `price`. `taxes` given as a list of maps becomes a
/// [`Bag`] of [`Tax`].
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    parameters: AttributeContainer<Attribute>,
    required: RequiredFields,
}

impl Item {
    pub fn new(params: Params) -> ArgentumResult<Self> {
        let mut item = Self::empty();
        item.initialize(params)?;
        Ok(item)
    }

    pub fn empty() -> Self {
        Self {
            parameters: AttributeContainer::new(),
            required: RequiredFields::new(&["name", "price"]),
        }
    }

    fn value(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key).and_then(Attribute::as_value)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(Value::as_str)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.value(key).and_then(Value::as_f64)
    }

    fn set_text(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.parameters
            .set(key, Attribute::Value(Value::String(value.into())));
        self
    }

    fn set_number(&mut self, key: &str, value: f64) -> &mut Self {
        self.parameters.set(key, Attribute::Value(Value::Number(value)));
        self
    }

    pub fn code(&self) -> Option<&str> {
        self.text("code")
    }

    pub fn set_code(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("code", value)
    }

    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("name", value)
    }

    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }

    pub fn set_description(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("description", value)
    }

    pub fn quantity(&self) -> Option<f64> {
        self.number("quantity")
    }

    pub fn set_quantity(&mut self, quantity: f64) -> &mut Self {
        self.set_number("quantity", quantity)
    }

    pub fn unit(&self) -> Option<&str> {
        self.text("unit")
    }

    pub fn set_unit(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("unit", value)
    }

    pub fn unit_code(&self) -> Option<&str> {
        self.text("unit_code")
    }

    pub fn set_unit_code(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("unit_code", value)
    }

    pub fn price(&self) -> Option<f64> {
        self.number("price")
    }

    pub fn set_price(&mut self, price: f64) -> &mut Self {
        self.set_number("price", price)
    }

    /// Line discount, `0` when unset.
    pub fn discount(&self) -> f64 {
        self.number("discount").unwrap_or(0.0)
    }

    pub fn set_discount(&mut self, discount: f64) -> &mut Self {
        self.set_number("discount", discount)
    }

    /// Taxes applied to this line; empty when none were given.
    pub fn taxes(&self) -> &[Tax] {
        match self.parameters.get("taxes") {
            Some(Attribute::Taxes(bag)) => bag.all(),
            _ => &[],
        }
    }

    pub fn set_taxes(&mut self, taxes: impl Into<Bag<Tax>>) -> &mut Self {
        self.parameters.set("taxes", Attribute::Taxes(taxes.into()));
        self
    }

    pub fn add_tax(&mut self, tax: Tax) -> &mut Self {
        match self.parameters.get_mut("taxes") {
            Some(Attribute::Taxes(bag)) => bag.add(tax),
            _ => {
                self.parameters
                    .set("taxes", Attribute::Taxes(Bag::from(vec![tax])));
            }
        }
        self
    }

    pub(crate) fn set_taxes_value(&mut self, value: Value) -> ArgentumResult<()> {
        let attr = bag_or_raw(value, Tax::new, Attribute::Taxes)?;
        self.parameters.set("taxes", attr);
        Ok(())
    }

    /// `price * quantity`; a missing operand counts as zero.
    pub fn amount(&self) -> f64 {
        self.price().unwrap_or(0.0) * self.quantity().unwrap_or(0.0)
    }

    /// Amount the line's taxes are computed over: `amount - discount`.
    pub fn taxable_amount(&self) -> f64 {
        self.amount() - self.discount()
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::empty()
    }
}

impl Parametrized for Item {
    type Attr = Attribute;

    fn setters() -> &'static [Setter<Self>] {
        ITEM_SETTERS
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

    fn validate(&self) -> ArgentumResult<()> {
        self.validate_required()?;

        for key in ["code", "name", "description", "unit", "unit_code"] {
            if let Some(v) = self.value(key) {
                if !v.is_blank() && v.as_str().is_none() {
                    return Err(ArgentumError::invalid_type(key, "must be a string"));
                }
            }
        }

        match self.parameters.get("taxes") {
            Some(Attribute::Taxes(bag)) => {
                for tax in bag {
                    tax.validate()?;
                }
            }
            Some(Attribute::Value(v)) if !v.is_blank() => {
                return Err(ArgentumError::invalid_type(
                    "taxes",
                    "must be a list of Tax objects",
                ));
            }
            _ => {}
        }

        Ok(())
    }
}
