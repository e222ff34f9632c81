//! Field descriptors — the per-column unit of a schema description.

use serde::{Deserialize, Serialize};

/// Semantic type of an entity field.
///
/// These are storage-class types, not language types: the schema generator
/// maps each variant to a SQLite column type token. A [`FieldType::Reference`]
/// names another entity and is stored as the referenced row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Integer family (any width).
    Integer,
    /// Floating-point family.
    Real,
    /// Character data.
    Text,
    /// Stored as an integer 0/1.
    Boolean,
    /// Calendar date, stored as an integer day value.
    Date,
    /// Instant in time, stored as integer milliseconds.
    Timestamp,
    /// Raw byte sequence.
    Blob,
    /// Enumerated type, stored by name.
    Enumeration,
    /// Reference to another entity, stored as the referenced row id.
    Reference(String),
    /// Homogeneous collection. Not representable as a single column; the
    /// schema generator omits such fields.
    List(Box<FieldType>),
}

/// Declarative description of a single entity field.
///
/// Carries the field name, its semantic type, and the optional constraint
/// set: an explicit column-name override, `NOT NULL`, and `UNIQUE`. The
/// schema generator consumes only this record — how it was produced is the
/// caller's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name as declared on the domain type.
    pub name: String,

    /// Semantic type of the field.
    pub field_type: FieldType,

    /// Explicit column name. When present it is used verbatim; when absent
    /// the column name is derived from `name` via [`crate::to_sql_name`].
    pub column_name: Option<String>,

    /// Whether the column carries a `NOT NULL` constraint.
    pub not_null: bool,

    /// Whether the column carries a `UNIQUE` constraint.
    pub unique: bool,
}

impl FieldDescriptor {
    /// Creates a field with the given name and type and no constraints.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            column_name: None,
            not_null: false,
            unique: false,
        }
    }

    /// Marks the field `NOT NULL`.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Marks the field `UNIQUE`.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Overrides the column name. The override is emitted verbatim — it is
    /// not passed through the naming transform.
    #[must_use]
    pub fn with_column_name(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = Some(column_name.into());
        self
    }
}
