//! Error types for the schema engine.

/// Errors surfaced by the fallible schema operations.
///
/// The batch operations on [`crate::SchemaGenerator`] degrade these to log
/// lines per the best-effort convergence policy; the single-entity
/// [`crate::SchemaGenerator::create_table`] surfaces them as values.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A DDL or DML statement was rejected by the database engine.
    #[error("schema database error: {0}")]
    Database(#[from] rusqlite::Error),
}
