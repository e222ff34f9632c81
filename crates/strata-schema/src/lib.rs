//! Schema derivation and migration engine for embedded SQLite.
//!
//! Strata maps annotated entity descriptors onto table definitions, creates
//! those tables, and applies version-numbered migration scripts when the
//! database version increases. Three pieces cooperate:
//!
//! - the **column type resolver** ([`resolve_column_type`]) maps a field's
//!   semantic type to a SQL column type token;
//! - the **schema generator** ([`SchemaGenerator`]) derives `CREATE TABLE`
//!   DDL per entity and orchestrates create / upgrade / delete;
//! - the **script locator** ([`list_scripts`], [`read_script`]) discovers
//!   migration scripts by naming convention in an [`AssetStore`] and feeds
//!   them to the generator in ascending numeric order.
//!
//! # Design decisions
//!
//! - **Best-effort convergence**: a broken entity or script is logged and
//!   never blocks the rest of the batch. The public batch operations surface
//!   no errors; `do_upgrade` returns only whether any script ran.
//! - **Externally owned resources**: the connection and script store are
//!   passed per call. The engine never opens, closes, or pools anything —
//!   that lives in `strata-db`.
//! - **No reflection**: entities are plain descriptor records; how they were
//!   produced is invisible here.

mod column;
mod ddl;
mod error;
mod generator;
mod scripts;
mod store;

pub use column::{resolve_column_type, ColumnToken, NULLABLE_MARKER};
pub use ddl::{drop_table_sql, CreateTable, ID_COLUMN_CLAUSE};
pub use error::SchemaError;
pub use generator::{SchemaGenerator, SchemaGeneratorBuilder};
pub use scripts::{
    execute_script, list_scripts, read_script, script_version, MigrationScript,
    UPGRADES_NAMESPACE,
};
pub use store::{AssetStore, DirAssetStore, EmbeddedAssets};
