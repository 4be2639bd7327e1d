//! Document-level discount.

use argentum_core::{
    ArgentumError, ArgentumResult, AttributeContainer, Parametrized, Params, RequiredFields,
    Setter, Value, numeric_setter, raw_setter,
};

static DISCOUNT_SETTERS: &[Setter<Discount>] = &[
    raw_setter!(Discount, "setName", "name"),
    raw_setter!(Discount, "setDescription", "description"),
    numeric_setter!(Discount, "setAmount", "amount"),
];

/// Discount entity. Required: `name`, `amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct Discount {
    parameters: AttributeContainer,
    required: RequiredFields,
}

impl Discount {
    pub fn new(params: Params) -> ArgentumResult<Self> {
        let mut discount = Self::empty();
        discount.initialize(params)?;
        Ok(discount)
    }

    pub fn empty() -> Self {
        Self {
            parameters: AttributeContainer::new(),
            required: RequiredFields::new(&["name", "amount"]),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.parameters.get("name").and_then(Value::as_str)
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.parameters.set("name", Value::String(value.into()));
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.parameters.get("description").and_then(Value::as_str)
    }

    pub fn set_description(&mut self, value: impl Into<String>) -> &mut Self {
        self.parameters.set("description", Value::String(value.into()));
        self
    }

    pub fn amount(&self) -> Option<f64> {
        self.parameters.get("amount").and_then(Value::as_f64)
    }

    pub fn set_amount(&mut self, amount: f64) -> &mut Self {
        self.parameters.set("amount", Value::Number(amount));
        self
    }
}

impl Default for Discount {
    fn default() -> Self {
        Self::empty()
    }
}

impl Parametrized for Discount {
    type Attr = Value;

    fn setters() -> &'static [Setter<Self>] {
        DISCOUNT_SETTERS
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

    fn validate(&self) -> ArgentumResult<()> {
        self.validate_required()?;
        match self.parameters.get("name") {
            Some(v) if v.as_str().is_none() => {
                Err(ArgentumError::invalid_type("name", "must be a string"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argentum_core::params_from_json;
    use serde_json::json;

    #[test]
    fn parses_amount_from_string() {
        let d = Discount::new(params_from_json(json!({
            "name": "Promo",
            "description": "Spring sale",
            "amount": "12.50"
        })))
        .unwrap();
        assert_eq!(d.amount(), Some(12.5));
        assert_eq!(d.description(), Some("Spring sale"));
        assert!(d.validate().is_ok());
    }

    #[test]
    fn requires_name_then_amount() {
        let d = Discount::new(params_from_json(json!({ "amount": 3 }))).unwrap();
        assert_eq!(d.validate(), Err(ArgentumError::missing("name")));

        let mut d = Discount::empty();
        d.set_name("Promo");
        assert_eq!(d.validate(), Err(ArgentumError::missing("amount")));
    }

    #[test]
    fn null_amount_clears_value() {
        let d = Discount::new(params_from_json(json!({ "name": "X", "amount": null }))).unwrap();
        assert_eq!(d.amount(), None);
        assert!(!d.has_parameter("amount"));
    }
}
