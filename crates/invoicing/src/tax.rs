//! Tax applied to items and synthesized per document.

use argentum_core::helper::round_half_up;
use argentum_core::{
    ArgentumError, ArgentumResult, AttributeContainer, Parametrized, Params, RequiredFields,
    Setter, Value, numeric_setter, raw_setter,
};

use crate::currency::DEFAULT_DECIMAL_PLACES;

static TAX_SETTERS: &[Setter<Tax>] = &[
    raw_setter!(Tax, "setType", "type"),
    raw_setter!(Tax, "setName", "name"),
    numeric_setter!(Tax, "setRate", "rate"),
    raw_setter!(Tax, "setRateType", "rate_type"),
    numeric_setter!(Tax, "setBaseAmount", "base_amount"),
    numeric_setter!(Tax, "setFixedAmount", "fixed_amount"),
];

/// Tax entity.
///
/// Required: `type`, `rate`. Only one of `type`/`name` needs to be supplied,
/// the other is derived (`vat` ⇄ `VAT`).
#[derive(Debug, Clone, PartialEq)]
pub struct Tax {
    parameters: AttributeContainer,
    required: RequiredFields,
}

impl Tax {
    pub fn new(params: Params) -> ArgentumResult<Self> {
        let mut tax = Self::empty();
        tax.initialize(params)?;
        Ok(tax)
    }

    pub fn empty() -> Self {
        Self {
            parameters: AttributeContainer::new(),
            required: RequiredFields::new(&["type", "rate"]),
        }
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(Value::as_str)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.parameters.get(key).and_then(Value::as_f64)
    }

    pub fn tax_type(&self) -> Option<&str> {
        self.text("type")
    }

    pub fn set_tax_type(&mut self, value: impl Into<String>) -> &mut Self {
        self.parameters.set("type", Value::String(value.into()));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.parameters.set("name", Value::String(value.into()));
        self
    }

    /// Percentage rate, e.g. `16.0` for 16 %.
    pub fn rate(&self) -> Option<f64> {
        self.number("rate")
    }

    pub fn set_rate(&mut self, rate: f64) -> &mut Self {
        self.parameters.set("rate", Value::Number(rate));
        self
    }

    pub fn rate_type(&self) -> Option<&str> {
        self.text("rate_type")
    }

    pub fn base_amount(&self) -> Option<f64> {
        self.number("base_amount")
    }

    pub fn set_base_amount(&mut self, amount: f64) -> &mut Self {
        self.parameters.set("base_amount", Value::Number(amount));
        self
    }

    pub fn add_base_amount(&mut self, amount: f64) -> &mut Self {
        let total = self.base_amount().unwrap_or(0.0) + amount;
        self.set_base_amount(total)
    }

    /// Amount that overrides the rate computation when set.
    pub fn fixed_amount(&self) -> Option<f64> {
        self.number("fixed_amount")
    }

    pub fn set_fixed_amount(&mut self, amount: f64) -> &mut Self {
        self.parameters.set("fixed_amount", Value::Number(amount));
        self
    }

    pub fn add_fixed_amount(&mut self, amount: f64) -> &mut Self {
        let total = self.fixed_amount().unwrap_or(0.0) + amount;
        self.set_fixed_amount(total)
    }

    /// Amount over the stored base amount.
    pub fn amount(&self) -> f64 {
        self.amount_for(self.base_amount().unwrap_or(0.0))
    }

    pub fn amount_for(&self, base: f64) -> f64 {
        self.amount_for_with_places(base, DEFAULT_DECIMAL_PLACES)
    }

    /// `fixed_amount` when present, else `round(base * rate / 100, places)`.
    pub fn amount_for_with_places(&self, base: f64, places: u32) -> f64 {
        if let Some(fixed) = self.fixed_amount() {
            return fixed;
        }
        let rate = self.rate().unwrap_or(0.0);
        round_half_up(base * rate / 100.0, places)
    }
}

impl Default for Tax {
    fn default() -> Self {
        Self::empty()
    }
}

impl Parametrized for Tax {
    type Attr = Value;

    fn setters() -> &'static [Setter<Self>] {
        TAX_SETTERS
    }

    fn parameters(&self) -> &AttributeContainer {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut AttributeContainer {
        &mut self.parameters
    }

    fn required(&self) -> &RequiredFields {
        &self.required
    }

    fn required_mut(&mut self) -> &mut RequiredFields {
        &mut self.required
    }

    fn after_initialize(&mut self) {
        if !self.parameters.is_filled("type") {
            if let Some(name) = self.name().map(str::to_lowercase) {
                self.set_tax_type(name);
            }
        }
        if !self.parameters.is_filled("name") {
            if let Some(kind) = self.tax_type().map(str::to_uppercase) {
                self.set_name(kind);
            }
        }
    }

    fn validate(&self) -> ArgentumResult<()> {
        self.validate_required()?;

        for key in ["type", "name"] {
            if let Some(v) = self.parameters.get(key) {
                if !v.is_blank() && v.as_str().is_none() {
                    return Err(ArgentumError::invalid_type(key, "must be a string"));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argentum_core::params_from_json;
    use serde_json::json;

    fn tax(json: serde_json::Value) -> Tax {
        Tax::new(params_from_json(json)).unwrap()
    }

    #[test]
    fn derives_name_from_type_and_type_from_name() {
        let a = tax(json!({ "type": "vat", "rate": 16 }));
        assert_eq!(a.name(), Some("VAT"));

        let b = tax(json!({ "name": "IEPS", "rate": 8 }));
        assert_eq!(b.tax_type(), Some("ieps"));

        let c = tax(json!({ "type": "vat", "name": "IVA", "rate": 16 }));
        assert_eq!(c.tax_type(), Some("vat"));
        assert_eq!(c.name(), Some("IVA"));
    }

    #[test]
    fn accepts_camel_and_snake_keys() {
        let t = tax(json!({
            "type": "vat",
            "rate": "16",
            "baseAmount": "100.00",
            "rate_type": "percent"
        }));
        assert_eq!(t.rate(), Some(16.0));
        assert_eq!(t.base_amount(), Some(100.0));
        assert_eq!(t.rate_type(), Some("percent"));
    }

    #[test]
    fn rejects_non_numeric_rate() {
        let err = Tax::new(params_from_json(json!({ "type": "vat", "rate": "16%" }))).unwrap_err();
        assert!(matches!(err, ArgentumError::InvalidNumericValue(_)));
    }

    #[test]
    fn amount_rounds_rate_over_base() {
        let mut t = tax(json!({ "type": "vat", "rate": 16 }));
        t.set_base_amount(190.0);
        assert_eq!(t.amount(), 30.4);
        assert_eq!(t.amount_for(0.03125 * 100.0), 0.5);
        assert_eq!(t.amount_for_with_places(333.33, 0), 53.0);
    }

    #[test]
    fn fixed_amount_takes_precedence() {
        let mut t = tax(json!({ "type": "vat", "rate": 16, "fixed_amount": 5 }));
        t.set_base_amount(1000.0);
        assert_eq!(t.amount(), 5.0);
        t.add_fixed_amount(2.5);
        assert_eq!(t.amount(), 7.5);
    }

    #[test]
    fn add_base_amount_accumulates_from_zero() {
        let mut t = Tax::empty();
        t.add_base_amount(10.0).add_base_amount(5.5);
        assert_eq!(t.base_amount(), Some(15.5));
    }

    #[test]
    fn validate_requires_type_and_rate() {
        let missing_rate = tax(json!({ "type": "vat" }));
        assert_eq!(missing_rate.validate(), Err(ArgentumError::missing("rate")));

        let missing_type = tax(json!({ "rate": 16 }));
        assert_eq!(missing_type.validate(), Err(ArgentumError::missing("type")));

        assert!(tax(json!({ "name": "VAT", "rate": 0 })).validate().is_ok());
    }
}
