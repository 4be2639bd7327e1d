//! Parties domain module (document issuers and receivers).
//!
//! Pure entity definitions and their validation rules (no IO).

pub mod address;
pub mod person;

pub use address::Address;
pub use person::{PartyAttribute, Person};
