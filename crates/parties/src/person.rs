//! Person: issuer (`from`) or receiver (`to`) of a document.

use std::sync::LazyLock;

use argentum_core::{
    ArgentumError, ArgentumResult, AttributeContainer, AttributeValue, Parametrized, Params,
    RequiredFields, Setter, Value, raw_setter,
};
use regex::Regex;

use crate::address::Address;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

/// Attribute stored on a [`Person`]: a raw value or a nested address.
#[derive(Debug, Clone, PartialEq)]
pub enum PartyAttribute {
    Value(Value),
    Address(Address),
}

impl From<Value> for PartyAttribute {
    fn from(value: Value) -> Self {
        PartyAttribute::Value(value)
    }
}

impl AttributeValue for PartyAttribute {
    fn is_blank(&self) -> bool {
        match self {
            PartyAttribute::Value(v) => v.is_blank(),
            PartyAttribute::Address(_) => false,
        }
    }

    fn export(&self) -> Value {
        match self {
            PartyAttribute::Value(v) => v.clone(),
            PartyAttribute::Address(a) => a.to_value(),
        }
    }
}

static PERSON_SETTERS: &[Setter<Person>] = &[
    raw_setter!(Person, "setId", "id"),
    raw_setter!(Person, "setType", "type"),
    raw_setter!(Person, "setName", "name"),
    raw_setter!(Person, "setEmail", "email"),
    raw_setter!(Person, "setPhone", "phone"),
    raw_setter!(Person, "setFax", "fax"),
    Setter::new("setAddress", |person, value| {
        let attr = match value {
            Value::Map(params) => PartyAttribute::Address(Address::new(params)?),
            other => PartyAttribute::Value(other),
        };
        person.parameters.set("address", attr);
        Ok(())
    }),
];

/// Person entity.
///
/// Required: `id`, `name`. A map given as `address` becomes an [`Address`].
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    parameters: AttributeContainer<PartyAttribute>,
    required: RequiredFields,
}

impl Person {
    pub fn new(params: Params) -> ArgentumResult<Self> {
        let mut person = Self::empty();
        person.initialize(params)?;
        Ok(person)
    }

    pub fn empty() -> Self {
        Self {
            parameters: AttributeContainer::new(),
            required: RequiredFields::new(&["id", "name"]),
        }
    }

    fn value(&self, key: &str) -> Option<&Value> {
        match self.parameters.get(key) {
            Some(PartyAttribute::Value(v)) => Some(v),
            _ => None,
        }
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(Value::as_str)
    }

    fn set_text(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.parameters
            .set(key, PartyAttribute::Value(Value::String(value.into())));
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.text("id")
    }

    pub fn set_id(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("id", value)
    }

    pub fn person_type(&self) -> Option<&str> {
        self.text("type")
    }

    pub fn set_person_type(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("type", value)
    }

    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("name", value)
    }

    pub fn email(&self) -> Option<&str> {
        self.text("email")
    }

    pub fn set_email(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("email", value)
    }

    pub fn phone(&self) -> Option<&str> {
        self.text("phone")
    }

    pub fn set_phone(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("phone", value)
    }

    pub fn fax(&self) -> Option<&str> {
        self.text("fax")
    }

    pub fn set_fax(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("fax", value)
    }

    pub fn address(&self) -> Option<&Address> {
        match self.parameters.get("address") {
            Some(PartyAttribute::Address(a)) => Some(a),
            _ => None,
        }
    }

    pub fn set_address(&mut self, address: Address) -> &mut Self {
        self.parameters
            .set("address", PartyAttribute::Address(address));
        self
    }

    /// Present and non-blank values must be strings.
    fn ensure_text(&self, key: &str) -> ArgentumResult<()> {
        match self.value(key) {
            Some(v) if !v.is_blank() && v.as_str().is_none() => Err(ArgentumError::invalid_type(
                key,
                "must be a string",
            )),
            _ => Ok(()),
        }
    }
}

impl Default for Person {
    fn default() -> Self {
        Self::empty()
    }
}

impl Parametrized for Person {
    type Attr = PartyAttribute;

    fn setters() -> &'static [Setter<Self>] {
        PERSON_SETTERS
    }

    fn parameters(&self) -> &AttributeContainer<PartyAttribute> {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut AttributeContainer<PartyAttribute> {
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

        for key in ["id", "name", "type"] {
            self.ensure_text(key)?;
        }

        if let Some(email) = self.value("email").filter(|v| !v.is_blank()) {
            let valid = email.as_str().is_some_and(|e| EMAIL.is_match(e));
            if !valid {
                tracing::debug!(?email, "rejecting invalid email");
                return Err(ArgentumError::invalid_type("email", "must be a valid email"));
            }
        }

        for key in ["phone", "fax"] {
            self.ensure_text(key)?;
        }

        match self.parameters.get("address") {
            Some(PartyAttribute::Address(address)) => address.validate()?,
            Some(PartyAttribute::Value(v)) if !v.is_blank() => {
                return Err(ArgentumError::invalid_type(
                    "address",
                    "must be an Address object",
                ));
            }
            _ => {}
        }

        Ok(())
    }
}
