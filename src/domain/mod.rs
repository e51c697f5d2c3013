//! Typed catalog entities and the value objects they are built from.

pub mod product;
pub mod types;
