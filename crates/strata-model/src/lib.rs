//! Entity and field descriptors for the Strata schema engine.
//!
//! This crate provides the foundational types consumed by the schema
//! generator: declarative descriptions of domain entities and their fields,
//! the naming transform that maps identifiers to SQL names, and the
//! [`DomainModel`] trait behind which entity enumeration lives.
//!
//! No crate in the workspace depends on anything *except* `strata-model` for
//! these definitions. This keeps the dependency graph clean and lets callers
//! describe their schema without pulling in the database stack.
//!
//! Descriptors are plain records populated through builder methods — there is
//! no runtime introspection anywhere in Strata. Whatever produced a
//! [`FieldDescriptor`] (hand-written registration, build-time generation) is
//! invisible to the engine.

mod entity;
mod field;
mod naming;

pub use entity::{DomainModel, EntityDescriptor, StaticModel};
pub use field::{FieldDescriptor, FieldType};
pub use naming::to_sql_name;
