//! Structured DDL building.
//!
//! Statements are assembled as a list of column clauses joined with explicit
//! separators, never by appending to a half-built string. The rendered shape
//! is the one the rest of the engine (and its tests) depend on:
//!
//! ```text
//! CREATE TABLE PERSON ( ID INTEGER PRIMARY KEY AUTOINCREMENT , NAME TEXT )
//! ```

/// Clause for the implicit primary key column every table carries.
pub const ID_COLUMN_CLAUSE: &str = "ID INTEGER PRIMARY KEY AUTOINCREMENT";

/// A `CREATE TABLE` statement under construction.
#[derive(Debug)]
pub struct CreateTable {
    table_name: String,
    clauses: Vec<String>,
}

impl CreateTable {
    /// Starts a table definition seeded with the implicit `ID` column.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            clauses: vec![ID_COLUMN_CLAUSE.to_string()],
        }
    }

    /// Appends a finished column clause, e.g. `NAME TEXT NOT NULL`.
    pub fn column(&mut self, clause: impl Into<String>) {
        self.clauses.push(clause.into());
    }

    /// Renders the statement.
    pub fn render(&self) -> String {
        format!(
            "CREATE TABLE {} ( {} )",
            self.table_name,
            self.clauses.join(" , ")
        )
    }
}

/// Renders the idempotent drop statement for a table.
pub fn drop_table_sql(table_name: &str) -> String {
    format!("DROP TABLE IF EXISTS {table_name}")
}
