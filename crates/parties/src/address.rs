//! Postal address of a party.

use argentum_core::{
    ArgentumResult, AttributeContainer, Parametrized, Params, RequiredFields, Setter, Value,
    raw_setter,
};

/// Components joined, in this order, by the human-readable form.
const LINE_PARTS: [&str; 7] = [
    "address_1",
    "address_2",
    "address_3",
    "neighborhood",
    "postcode",
    "locality",
    "state",
];

static ADDRESS_SETTERS: &[Setter<Address>] = &[
    raw_setter!(Address, "setAddress_1", "address_1"),
    raw_setter!(Address, "setAddress_2", "address_2"),
    raw_setter!(Address, "setAddress_3", "address_3"),
    raw_setter!(Address, "setNeighborhood", "neighborhood"),
    raw_setter!(Address, "setPostcode", "postcode"),
    raw_setter!(Address, "setLocality", "locality"),
    raw_setter!(Address, "setState", "state"),
    raw_setter!(Address, "setCountry", "country"),
];

/// Address entity.
///
/// Required: `address_1`, `locality`, `country`.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    parameters: AttributeContainer,
    required: RequiredFields,
}

impl Address {
    pub fn new(params: Params) -> ArgentumResult<Self> {
        let mut address = Self::empty();
        address.initialize(params)?;
        Ok(address)
    }

    pub fn empty() -> Self {
        Self {
            parameters: AttributeContainer::new(),
            required: RequiredFields::new(&["address_1", "locality", "country"]),
        }
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(Value::as_str)
    }

    fn set_text(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.parameters.set(key, Value::String(value.into()));
        self
    }

    pub fn address_1(&self) -> Option<&str> {
        self.text("address_1")
    }

    pub fn set_address_1(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("address_1", value)
    }

    pub fn address_2(&self) -> Option<&str> {
        self.text("address_2")
    }

    pub fn set_address_2(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("address_2", value)
    }

    pub fn address_3(&self) -> Option<&str> {
        self.text("address_3")
    }

    pub fn set_address_3(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("address_3", value)
    }

    pub fn neighborhood(&self) -> Option<&str> {
        self.text("neighborhood")
    }

    pub fn set_neighborhood(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("neighborhood", value)
    }

    pub fn postcode(&self) -> Option<&str> {
        self.text("postcode")
    }

    pub fn set_postcode(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("postcode", value)
    }

    pub fn locality(&self) -> Option<&str> {
        self.text("locality")
    }

    pub fn set_locality(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("locality", value)
    }

    pub fn state(&self) -> Option<&str> {
        self.text("state")
    }

    pub fn set_state(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("state", value)
    }

    pub fn country(&self) -> Option<&str> {
        self.text("country")
    }

    pub fn set_country(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_text("country", value)
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::empty()
    }
}

impl Parametrized for Address {
    type Attr = Value;

    fn setters() -> &'static [Setter<Self>] {
        ADDRESS_SETTERS
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

impl core::fmt::Display for Address {
    /// Non-empty components joined with `", "`; the country is not part of the line.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let parts: Vec<String> = LINE_PARTS
            .iter()
            .filter_map(|key| self.parameters.get(key))
            .filter(|value| !value.is_blank())
            .filter_map(Value::to_text)
            .filter(|part| !part.is_empty())
            .collect();
        f.write_str(&parts.join(", "))
    }
}
