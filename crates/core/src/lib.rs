//! `argentum-core`: building blocks shared by every fiscal document entity.
//!
//! This crate contains **pure** primitives (no IO): the opaque parameter
//! value, the attribute container, the parametrized-entity contract, the bag
//! collection and the naming/numeric helpers.

pub mod attributes;
pub mod bag;
pub mod error;
pub mod helper;
pub mod parametrized;
pub mod value;

pub use attributes::{AttributeContainer, AttributeValue};
pub use bag::Bag;
pub use error::{ArgentumError, ArgentumResult};
pub use parametrized::{Parametrized, RequiredFields, Setter, SetterFn, apply_parameters};
pub use value::{Params, Value, params_from_json};
