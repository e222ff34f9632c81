//! Field-type to SQLite column-type resolution.
//!
//! Every supported [`FieldType`] maps to a column type token. Tokens for
//! types whose columns are nullable by default carry [`NULLABLE_MARKER`] as
//! a suffix; applying a `NOT NULL` constraint replaces that marker rather
//! than stacking contradictory clauses. Unsupported types resolve to `None`
//! and the corresponding field is omitted from the generated table — a
//! deliberate policy, not an error.

use strata_model::FieldType;

/// Suffix carried by column type tokens that are nullable by default.
///
/// A `NOT NULL` constraint removes exactly this suffix before appending its
/// own clause.
pub const NULLABLE_MARKER: &str = " NULL";

/// A SQL column type token, possibly carrying a trailing nullable marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnToken(String);

impl ColumnToken {
    fn new(sql: &str) -> Self {
        Self(sql.to_string())
    }

    /// The token text as it appears in a column definition.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token carries the nullable marker.
    pub fn has_nullable_marker(&self) -> bool {
        self.0.ends_with(NULLABLE_MARKER)
    }

    /// Returns the token with a `NOT NULL` constraint applied: a trailing
    /// nullable marker is replaced, otherwise the constraint is appended.
    pub fn not_null(&self) -> String {
        let base = self
            .0
            .strip_suffix(NULLABLE_MARKER)
            .unwrap_or(&self.0);
        format!("{base} NOT NULL")
    }
}

/// Resolves a field's semantic type to its column type token.
///
/// Returns `None` for types the engine does not map to a column; callers
/// skip such fields.
pub fn resolve_column_type(field_type: &FieldType) -> Option<ColumnToken> {
    let token = match field_type {
        FieldType::Integer => ColumnToken::new("INTEGER"),
        FieldType::Real => ColumnToken::new("REAL"),
        FieldType::Text => ColumnToken::new("TEXT"),
        FieldType::Boolean => ColumnToken::new("INTEGER"),
        FieldType::Date | FieldType::Timestamp => ColumnToken::new("INTEGER NULL"),
        FieldType::Blob => ColumnToken::new("BLOB"),
        FieldType::Enumeration => ColumnToken::new("TEXT"),
        FieldType::Reference(_) => ColumnToken::new("INTEGER"),
        FieldType::List(_) => return None,
    };
    Some(token)
}
