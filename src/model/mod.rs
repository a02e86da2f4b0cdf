//! Domain models and operation-specific parameter types.
//!
//! Models here are independent of the on-disk representation in the `entity`
//! crate. Conversions happen at the repository boundary through `from_entity`
//! and `to_entity`.

pub mod settings;
pub mod table;
