//! Attribute values stored on items, relations and documents.

use argentum_core::{ArgentumResult, AttributeValue, Bag, Params, Parametrized, Value};
use argentum_parties::Person;

use crate::discount::Discount;
use crate::document::Document;
use crate::item::Item;
use crate::relation::Relation;
use crate::tax::Tax;

/// A raw value or one of the nested entity kinds a document is composed of.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Value(Value),
    Person(Person),
    Items(Bag<Item>),
    Taxes(Bag<Tax>),
    Discounts(Bag<Discount>),
    Relations(Bag<Relation>),
    Document(Box<Document>),
}

impl Attribute {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Attribute::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_person(&self) -> Option<&Person> {
        match self {
            Attribute::Person(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Attribute::Document(d) => Some(d),
            _ => None,
        }
    }
}

impl From<Value> for Attribute {
    fn from(value: Value) -> Self {
        Attribute::Value(value)
    }
}

impl From<Person> for Attribute {
    fn from(person: Person) -> Self {
        Attribute::Person(person)
    }
}

impl From<Document> for Attribute {
    fn from(document: Document) -> Self {
        Attribute::Document(Box::new(document))
    }
}

impl AttributeValue for Attribute {
    fn is_blank(&self) -> bool {
        match self {
            Attribute::Value(v) => v.is_blank(),
            _ => false,
        }
    }

    fn export(&self) -> Value {
        match self {
            Attribute::Value(v) => v.clone(),
            Attribute::Person(p) => p.to_value(),
            Attribute::Items(bag) => Value::List(bag.iter().map(Parametrized::to_value).collect()),
            Attribute::Taxes(bag) => Value::List(bag.iter().map(Parametrized::to_value).collect()),
            Attribute::Discounts(bag) => {
                Value::List(bag.iter().map(Parametrized::to_value).collect())
            }
            Attribute::Relations(bag) => {
                Value::List(bag.iter().map(Parametrized::to_value).collect())
            }
            Attribute::Document(d) => d.to_value(),
        }
    }
}

/// Build a bag from a list of maps, or keep the raw value for `validate()` to reject.
pub(crate) fn bag_or_raw<T>(
    value: Value,
    build: fn(Params) -> ArgentumResult<T>,
    wrap: fn(Bag<T>) -> Attribute,
) -> ArgentumResult<Attribute> {
    match value {
        Value::List(elements) if elements.iter().all(|e| matches!(e, Value::Map(_))) => {
            let mut bag = Bag::new();
            for element in elements {
                if let Value::Map(params) = element {
                    bag.add(build(params)?);
                }
            }
            Ok(wrap(bag))
        }
        other => Ok(Attribute::Value(other)),
    }
}

/// Wrap a map into an entity, or keep the raw value.
pub(crate) fn entity_or_raw<T>(
    value: Value,
    build: fn(Params) -> ArgentumResult<T>,
    wrap: fn(T) -> Attribute,
) -> ArgentumResult<Attribute> {
    match value {
        Value::Map(params) => Ok(wrap(build(params)?)),
        other => Ok(Attribute::Value(other)),
    }
}
