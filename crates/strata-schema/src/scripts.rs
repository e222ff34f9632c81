//! Migration script discovery and execution.
//!
//! Scripts live under the reserved [`UPGRADES_NAMESPACE`] in an
//! [`AssetStore`], named `<version>.<extension>` (`2.sql`, `10.sql`). The
//! stem must parse as an integer version; anything else in the namespace is
//! logged and ignored. Scripts apply in ascending numeric order — `2` before
//! `10`, regardless of how the names sort as strings.

use rusqlite::Connection;

use crate::store::AssetStore;

/// Reserved namespace under which migration scripts are stored.
pub const UPGRADES_NAMESPACE: &str = "schema_upgrades";

/// A discovered migration script: its parsed version and the storage name
/// it is opened by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    /// Version parsed from the name stem.
    pub version: i32,
    /// Entry name within the upgrades namespace.
    pub name: String,
}

/// Parses the version from a script name.
///
/// The stem is the text before the first `.`; a name without a dot is all
/// stem. Returns `None` when the stem is not an integer — such entries are
/// not migration scripts.
pub fn script_version(name: &str) -> Option<i32> {
    let stem = name.split('.').next().unwrap_or(name);
    stem.parse().ok()
}

/// Lists the migration scripts available in the store, in ascending
/// version order.
///
/// Enumeration failure degrades to an empty listing, and entries whose name
/// does not carry an integer stem are skipped; both are logged, neither is
/// an error.
pub fn list_scripts(store: &dyn AssetStore) -> Vec<MigrationScript> {
    let names = match store.list(UPGRADES_NAMESPACE) {
        Ok(names) => names,
        Err(e) => {
            tracing::error!(error = %e, "failed to list migration scripts");
            return Vec::new();
        }
    };

    let mut scripts = Vec::with_capacity(names.len());
    for name in names {
        match script_version(&name) {
            Some(version) => scripts.push(MigrationScript { version, name }),
            None => {
                tracing::debug!(script = %name, "not a migration script, ignored");
            }
        }
    }

    scripts.sort_by_key(|s| s.version);
    scripts
}

/// Reads a script's statement lines in file order.
///
/// Returns `None` when the entry is absent; the caller logs and skips.
pub fn read_script(store: &dyn AssetStore, name: &str) -> Option<Vec<String>> {
    let contents = store.open(UPGRADES_NAMESPACE, name)?;
    Some(contents.lines().map(str::to_string).collect())
}

/// Executes a script's lines against the database, one statement per
/// non-empty line, in file order.
///
/// A rejected statement is logged and the remaining lines still run; there
/// is no transaction around the script.
pub fn execute_script(conn: &Connection, name: &str, lines: &[String]) {
    for line in lines {
        let statement = line.trim();
        if statement.is_empty() {
            continue;
        }
        tracing::debug!(script = %name, statement = %statement, "executing script statement");
        if let Err(e) = conn.execute(statement, []) {
            tracing::error!(script = %name, error = %e, "script statement failed");
        }
    }
    tracing::info!(script = %name, "script executed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EmbeddedAssets;

    #[test]
    fn version_comes_from_the_stem() {
        assert_eq!(script_version("2.sql"), Some(2));
        assert_eq!(script_version("10.sql"), Some(10));
        assert_eq!(script_version("7"), Some(7));
        assert_eq!(script_version("README.sql"), None);
        assert_eq!(script_version("v2.sql"), None);
    }

    #[test]
    fn scripts_sort_numerically_not_lexicographically() {
        static ASSETS: &[(&str, &str)] = &[
            ("2.sql", ""),
            ("10.sql", ""),
            ("3.sql", ""),
            ("README.sql", ""),
        ];
        let scripts = list_scripts(&EmbeddedAssets::new(ASSETS));
        let versions: Vec<i32> = scripts.iter().map(|s| s.version).collect();
        assert_eq!(versions, [2, 3, 10]);
    }

    #[test]
    fn listing_failure_degrades_to_empty() {
        struct FailingStore;
        impl AssetStore for FailingStore {
            fn list(&self, _namespace: &str) -> std::io::Result<Vec<String>> {
                Err(std::io::Error::other("storage offline"))
            }
            fn open(&self, _namespace: &str, _name: &str) -> Option<String> {
                None
            }
        }

        assert!(list_scripts(&FailingStore).is_empty());
    }

    #[test]
    fn read_script_yields_lines_in_order() {
        static ASSETS: &[(&str, &str)] =
            &[("4.sql", "ALTER TABLE PERSON ADD COLUMN NICK TEXT\nUPDATE PERSON SET NICK = ''")];
        let lines = read_script(&EmbeddedAssets::new(ASSETS), "4.sql").unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ALTER TABLE"));
        assert!(lines[1].starts_with("UPDATE"));
    }

    #[test]
    fn read_script_missing_entry_is_none() {
        assert!(read_script(&EmbeddedAssets::empty(), "4.sql").is_none());
    }

    #[test]
    fn failing_statement_does_not_abort_the_script() {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        conn.execute("CREATE TABLE T ( ID INTEGER PRIMARY KEY AUTOINCREMENT , N TEXT )", [])
            .unwrap();

        let lines = vec![
            "INSERT INTO T (N) VALUES ('a')".to_string(),
            "INSERT INTO NO_SUCH_TABLE (N) VALUES ('x')".to_string(),
            "".to_string(),
            "INSERT INTO T (N) VALUES ('b')".to_string(),
        ];
        execute_script(&conn, "5.sql", &lines);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM T", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2, "statements after the failure should still run");
    }
}
