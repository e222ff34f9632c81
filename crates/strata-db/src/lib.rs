//! Embedding glue for the Strata schema engine.
//!
//! Provides SQLite connection pooling (via `r2d2`) with WAL-mode
//! initialization, TOML + environment configuration loading, and the
//! `user_version`-driven open path that decides whether a database needs
//! creation, upgrade, or nothing.
//!
//! # Design decisions
//!
//! - **SQLite with WAL mode**: no external database process; WAL allows
//!   concurrent readers with a single writer, which matches the embedded
//!   access pattern the schema engine assumes.
//! - **`r2d2` connection pool**: bounded connection reuse without manual
//!   lifetime management. The schema path checks out a single connection,
//!   so schema work is serialized by construction.
//! - **`user_version` pragma**: the version a database file carries lives in
//!   the file itself; the target version lives in code as an argument to
//!   [`attach_schema`].

mod config;
mod open;
mod pool;

pub use config::{load_config, ConfigError, DatabaseConfig, DbConfig, MigrationsConfig};
pub use open::{attach_schema, SchemaOutcome};
pub use pool::{create_pool, DbPool, DbSettings, PoolError};
