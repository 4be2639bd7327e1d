//! Typed link from a document to another object (e.g. the invoice a credit
//! note refers to).

use argentum_core::{
    ArgentumError, ArgentumResult, AttributeContainer, Parametrized, Params, RequiredFields,
    Setter, Value, raw_setter,
};

use crate::attribute::Attribute;
use crate::document::Document;

static RELATION_SETTERS: &[Setter<Relation>] = &[
    raw_setter!(Relation, "setType", "type"),
    raw_setter!(Relation, "setName", "name"),
    raw_setter!(Relation, "setObject", "object"),
];

/// Relation entity. Required: `type`, `object`.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    parameters: AttributeContainer<Attribute>,
    required: RequiredFields,
}

impl Relation {
    pub fn new(params: Params) -> ArgentumResult<Self> {
        let mut relation = Self::empty();
        relation.initialize(params)?;
        Ok(relation)
    }

    pub fn empty() -> Self {
        Self {
            parameters: AttributeContainer::new(),
            required: RequiredFields::new(&["type", "object"]),
        }
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.parameters
            .get(key)
            .and_then(Attribute::as_value)
            .and_then(Value::as_str)
    }

    pub fn relation_type(&self) -> Option<&str> {
        self.text("type")
    }

    pub fn set_relation_type(&mut self, value: impl Into<String>) -> &mut Self {
        self.parameters
            .set("type", Attribute::Value(Value::String(value.into())));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.parameters
            .set("name", Attribute::Value(Value::String(value.into())));
        self
    }

    pub fn object(&self) -> Option<&Attribute> {
        self.parameters.get("object")
    }

    /// The related object when it is a document.
    pub fn document(&self) -> Option<&Document> {
        self.object().and_then(Attribute::as_document)
    }

    pub fn set_object(&mut self, object: impl Into<Attribute>) -> &mut Self {
        self.parameters.set("object", object.into());
        self
    }
}

impl Default for Relation {
    fn default() -> Self {
        Self::empty()
    }
}

impl Parametrized for Relation {
    type Attr = Attribute;

    fn setters() -> &'static [Setter<Self>] {
        RELATION_SETTERS
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
        if self.relation_type().is_none() {
            return Err(ArgentumError::invalid_type("type", "must be a string"));
        }
        Ok(())
    }
}
