//! Schema attachment on database open.
//!
//! SQLite's `user_version` pragma tracks which schema version a database
//! file carries. [`attach_schema`] compares it against the version the
//! running code expects and drives the generator accordingly: a fresh
//! database gets its tables created, a stale one gets the upgrade path,
//! a current one is left alone. The stored version is stamped afterwards.

use rusqlite::Connection;
use strata_schema::{AssetStore, SchemaGenerator};

/// What [`attach_schema`] did to the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaOutcome {
    /// Fresh database: every entity table was created.
    Created,
    /// Stored version was behind: the upgrade path ran.
    Upgraded {
        /// Whether at least one migration script executed.
        scripts_executed: bool,
    },
    /// Stored version already matches the target.
    Current,
}

/// Converges the database to `target_version` and stamps `user_version`.
///
/// A database is fresh when `user_version` is 0 and it contains no tables;
/// it gets `create_database`. A database whose stored version is below the
/// target gets `do_upgrade(stored, target)`. Anything else is already
/// current — including a stored version *above* the target, which is left
/// untouched apart from a warning (downgrades are not supported).
///
/// # Errors
///
/// Returns the underlying `rusqlite::Error` if the version pragma cannot be
/// read or written. Schema convergence itself is best-effort and surfaces
/// no errors.
pub fn attach_schema(
    conn: &Connection,
    generator: &SchemaGenerator,
    store: &dyn AssetStore,
    target_version: i32,
) -> Result<SchemaOutcome, rusqlite::Error> {
    let stored: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    let outcome = if stored == 0 && table_count(conn)? == 0 {
        tracing::info!(version = target_version, "creating fresh database schema");
        generator.create_database(conn);
        SchemaOutcome::Created
    } else if stored < target_version {
        tracing::info!(
            from = stored,
            to = target_version,
            "upgrading database schema"
        );
        let scripts_executed = generator.do_upgrade(conn, store, stored, target_version);
        SchemaOutcome::Upgraded { scripts_executed }
    } else {
        if stored > target_version {
            tracing::warn!(
                stored = stored,
                target = target_version,
                "database version is ahead of this build, leaving schema untouched"
            );
            return Ok(SchemaOutcome::Current);
        }
        SchemaOutcome::Current
    };

    if stored != target_version {
        conn.pragma_update(None, "user_version", target_version)?;
    }

    Ok(outcome)
}

fn table_count(conn: &Connection) -> Result<i64, rusqlite::Error> {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )
}
