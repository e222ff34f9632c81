//! Entity descriptors and the domain-model source trait.

use serde::{Deserialize, Serialize};

use crate::field::FieldDescriptor;
use crate::naming::to_sql_name;

/// Declarative description of a domain entity.
///
/// An entity is a named, ordered sequence of field descriptors. The entity
/// name maps 1:1 to a table name through [`to_sql_name`]; fields map to
/// columns in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Entity (type) name, e.g. `PersonDetail`.
    pub name: String,

    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl EntityDescriptor {
    /// Creates an entity with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field. Declaration order is column order.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// The SQL table name for this entity.
    pub fn table_name(&self) -> String {
        to_sql_name(&self.name)
    }
}

/// Source of domain entity descriptions.
///
/// This is the seam where entity enumeration lives. Implementations must be
/// deterministic for a given build — the schema generator snapshots the
/// returned list once at build time and never re-reads it.
pub trait DomainModel {
    /// Returns every known entity, in a stable order.
    fn entities(&self) -> Vec<EntityDescriptor>;
}

/// A [`DomainModel`] over a fixed, pre-resolved entity list.
///
/// The registration-style source: callers collect descriptors however they
/// like and hand over the finished list.
#[derive(Debug, Clone, Default)]
pub struct StaticModel(pub Vec<EntityDescriptor>);

impl DomainModel for StaticModel {
    fn entities(&self) -> Vec<EntityDescriptor> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;

    #[test]
    fn fields_keep_declaration_order() {
        let entity = EntityDescriptor::new("Person")
            .field(FieldDescriptor::new("name", FieldType::Text))
            .field(FieldDescriptor::new("age", FieldType::Integer));

        let names: Vec<&str> = entity.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["name", "age"]);
    }

    #[test]
    fn table_name_uses_sql_transform() {
        assert_eq!(EntityDescriptor::new("PersonDetail").table_name(), "PERSON_DETAIL");
    }

    #[test]
    fn static_model_returns_registered_entities() {
        let model = StaticModel(vec![
            EntityDescriptor::new("Person"),
            EntityDescriptor::new("Note"),
        ]);
        let entities = model.entities();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].name, "Person");
    }
}
