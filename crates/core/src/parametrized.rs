//! Parametrized entities: attribute storage + required fields + validation.
//!
//! Every domain entity is constructed from a raw [`Params`] map. Each key is
//! resolved to a setter name (`payment_type` → `setPaymentType`) and looked up
//! in the entity's statically declared setter table; keys with no matching
//! setter are ignored.

use crate::attributes::{AttributeContainer, AttributeValue};
use crate::error::{ArgentumError, ArgentumResult};
use crate::helper::setter_name;
use crate::value::{Params, Value};

/// Typed setter invoked with a raw input value.
pub type SetterFn<T> = fn(&mut T, Value) -> ArgentumResult<()>;

/// One entry of an entity's setter table.
pub struct Setter<T: 'static> {
    pub name: &'static str,
    pub apply: SetterFn<T>,
}

impl<T> Setter<T> {
    pub const fn new(name: &'static str, apply: SetterFn<T>) -> Self {
        Self { name, apply }
    }
}

impl<T> core::fmt::Debug for Setter<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Setter").field("name", &self.name).finish()
    }
}

/// Setter that stores the raw input under `$key` without interpretation.
#[macro_export]
macro_rules! raw_setter {
    ($ty:ty, $setter:literal, $key:literal) => {
        $crate::Setter::<$ty>::new($setter, |target, value| {
            $crate::Parametrized::parameters_mut(target).set($key, value.into());
            Ok(())
        })
    };
}

/// Setter that converts the input with [`to_float`](crate::helper::to_float).
///
/// `null` clears the key.
#[macro_export]
macro_rules! numeric_setter {
    ($ty:ty, $setter:literal, $key:literal) => {
        $crate::Setter::<$ty>::new($setter, |target, value| {
            let attrs = $crate::Parametrized::parameters_mut(target);
            if value.is_null() {
                attrs.remove($key);
            } else {
                let number = $crate::helper::to_float(&value)?;
                attrs.set($key, $crate::Value::Number(number).into());
            }
            Ok(())
        })
    };
}

/// Ordered set of required parameter keys.
///
/// Subtypes add their own keys on top of their parent's; the first missing
/// key in declaration order is the one reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredFields {
    keys: Vec<String>,
}

impl RequiredFields {
    pub fn new(keys: &[&str]) -> Self {
        let mut fields = Self::default();
        fields.add(keys);
        fields
    }

    /// Union with `keys`, keeping declaration order and skipping duplicates.
    pub fn add(&mut self, keys: &[&str]) {
        for key in keys {
            if !self.contains(key) {
                self.keys.push((*key).to_string());
            }
        }
    }

    pub fn replace(&mut self, keys: &[&str]) {
        self.keys.clear();
        self.add(keys);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

/// Entity backed by an [`AttributeContainer`] and a [`RequiredFields`] set.
pub trait Parametrized: Sized + 'static {
    type Attr: AttributeValue;

    /// Statically declared setter table.
    fn setters() -> &'static [Setter<Self>];

    fn parameters(&self) -> &AttributeContainer<Self::Attr>;

    fn parameters_mut(&mut self) -> &mut AttributeContainer<Self::Attr>;

    fn required(&self) -> &RequiredFields;

    fn required_mut(&mut self) -> &mut RequiredFields;

    /// Hook for defaults and normalisation once setters have run.
    fn after_initialize(&mut self) {}

    /// Reset the attributes and populate them from `params`.
    fn initialize(&mut self, params: Params) -> ArgentumResult<&mut Self> {
        self.parameters_mut().clear();
        apply_parameters(self, params)?;
        self.after_initialize();
        Ok(self)
    }

    fn has_parameter(&self, key: &str) -> bool {
        self.parameters().has(key)
    }

    fn parameters_required(&self) -> Vec<&str> {
        self.required().iter().collect()
    }

    fn add_parameters_required(&mut self, keys: &[&str]) {
        self.required_mut().add(keys);
    }

    fn set_parameters_required(&mut self, keys: &[&str]) {
        self.required_mut().replace(keys);
    }

    /// Fail with the first required key that is absent or blank.
    fn validate_required(&self) -> ArgentumResult<()> {
        for key in self.required().iter() {
            if !self.parameters().is_filled(key) {
                tracing::debug!(field = key, "required parameter missing");
                return Err(ArgentumError::missing(key));
            }
        }
        Ok(())
    }

    fn validate(&self) -> ArgentumResult<()> {
        self.validate_required()
    }

    /// Recursive export to a plain nested map.
    fn to_value(&self) -> Value {
        self.parameters().export()
    }
}

/// Apply each input key through the target's setter table.
pub fn apply_parameters<T: Parametrized>(target: &mut T, params: Params) -> ArgentumResult<()> {
    for (key, value) in params {
        let name = setter_name(&key);
        match T::setters().iter().find(|setter| setter.name == name) {
            Some(setter) => (setter.apply)(target, value)?,
            None => tracing::trace!(key = %key, setter = %name, "ignoring unknown parameter"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::params_from_json;
    use serde_json::json;

    #[derive(Debug, Default)]
    struct Sample {
        parameters: AttributeContainer,
        required: RequiredFields,
    }

    static SAMPLE_SETTERS: &[Setter<Sample>] = &[
        Setter::new("setName", |s, v| {
            s.parameters.set("name", v);
            Ok(())
        }),
        raw_setter!(Sample, "setUnitCode", "unit_code"),
        numeric_setter!(Sample, "setPrice", "price"),
    ];

    impl Parametrized for Sample {
        type Attr = Value;

        fn setters() -> &'static [Setter<Self>] {
            SAMPLE_SETTERS
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
    }

    fn sample(json: serde_json::Value) -> ArgentumResult<Sample> {
        let mut s = Sample::default();
        s.add_parameters_required(&["name", "price"]);
        s.initialize(params_from_json(json))?;
        Ok(s)
    }

    #[test]
    fn initialize_routes_snake_and_camel_keys_and_ignores_unknown() {
        let s = sample(json!({
            "name": "Widget",
            "unitCode": "H87",
            "price": "12.50",
            "colour": "red"
        }))
        .unwrap();

        assert_eq!(s.parameters().get("name"), Some(&Value::from("Widget")));
        assert_eq!(s.parameters().get("unit_code"), Some(&Value::from("H87")));
        assert_eq!(s.parameters().get("price"), Some(&Value::from(12.5)));
        assert!(!s.has_parameter("colour"));
    }

    #[test]
    fn initialize_surfaces_numeric_conversion_failures() {
        let err = sample(json!({ "name": "Widget", "price": "twelve" })).unwrap_err();
        assert!(matches!(err, ArgentumError::InvalidNumericValue(_)));
    }

    #[test]
    fn numeric_setter_clears_on_null() {
        let mut s = sample(json!({ "name": "Widget", "price": 4 })).unwrap();
        s.initialize(params_from_json(json!({ "name": "Widget", "price": null })))
            .unwrap();
        assert!(!s.has_parameter("price"));
    }

    #[test]
    fn initialize_resets_previous_attributes() {
        let mut s = sample(json!({ "name": "Widget", "price": 1 })).unwrap();
        s.initialize(params_from_json(json!({ "price": 2 }))).unwrap();

        assert!(!s.has_parameter("name"));
        assert_eq!(s.parameters().get("price"), Some(&Value::from(2.0)));
    }

    #[test]
    fn validate_reports_first_missing_required_key() {
        let s = sample(json!({})).unwrap();
        assert_eq!(s.validate().unwrap_err(), ArgentumError::missing("name"));

        let s = sample(json!({ "name": "Widget" })).unwrap();
        assert_eq!(s.validate().unwrap_err(), ArgentumError::missing("price"));

        let s = sample(json!({ "name": "", "price": 3 })).unwrap();
        assert_eq!(s.validate().unwrap_err(), ArgentumError::missing("name"));

        let s = sample(json!({ "name": "Widget", "price": 3 })).unwrap();
        assert!(s.validate().is_ok());
    }

    #[test]
    fn required_fields_accumulate_without_duplicates() {
        let mut s = Sample::default();
        s.add_parameters_required(&["type"]);
        s.add_parameters_required(&["from", "type"]);
        s.add_parameters_required(&["to"]);
        assert_eq!(s.parameters_required(), vec!["type", "from", "to"]);

        s.set_parameters_required(&["id"]);
        assert_eq!(s.parameters_required(), vec!["id"]);
    }
}
