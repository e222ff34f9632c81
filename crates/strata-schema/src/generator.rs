//! Schema generation and the versioned upgrade path.
//!
//! The generator owns an immutable snapshot of the domain entities and
//! converges the database toward them: `CREATE TABLE` per entity on first
//! creation, create-on-missing plus ordered migration scripts on upgrade.
//! The database connection and script store are externally owned and passed
//! in per call.
//!
//! Batch operations are best-effort by design: one entity's rejected DDL or
//! one script's failed statement is logged and never aborts the rest of the
//! batch. The only signal surfaced to the caller is the boolean from
//! [`SchemaGenerator::do_upgrade`] saying whether any script ran.

use rusqlite::Connection;
use strata_model::{to_sql_name, DomainModel, EntityDescriptor};

use crate::column::resolve_column_type;
use crate::ddl::{drop_table_sql, CreateTable};
use crate::error::SchemaError;
use crate::scripts::{execute_script, list_scripts, read_script};
use crate::store::AssetStore;

/// Builder for [`SchemaGenerator`].
///
/// Entities may be added one at a time, in bulk, or pulled from a
/// [`DomainModel`]; `build()` freezes the list. There is no post-build
/// augmentation — register everything first.
#[derive(Debug, Default)]
pub struct SchemaGeneratorBuilder {
    entities: Vec<EntityDescriptor>,
}

impl SchemaGeneratorBuilder {
    /// Registers a single entity.
    #[must_use]
    pub fn entity(mut self, entity: EntityDescriptor) -> Self {
        self.entities.push(entity);
        self
    }

    /// Registers a batch of entities.
    #[must_use]
    pub fn entities(mut self, entities: impl IntoIterator<Item = EntityDescriptor>) -> Self {
        self.entities.extend(entities);
        self
    }

    /// Registers every entity a domain model reports.
    #[must_use]
    pub fn model(self, model: &impl DomainModel) -> Self {
        self.entities(model.entities())
    }

    /// Freezes the entity list into an immutable generator.
    pub fn build(self) -> SchemaGenerator {
        SchemaGenerator {
            entities: self.entities,
        }
    }
}

/// Derives table definitions from entity descriptors and applies them, plus
/// versioned migration scripts, to a SQLite database.
#[derive(Debug)]
pub struct SchemaGenerator {
    entities: Vec<EntityDescriptor>,
}

impl SchemaGenerator {
    /// Starts building a generator.
    pub fn builder() -> SchemaGeneratorBuilder {
        SchemaGeneratorBuilder::default()
    }

    /// The entities this generator manages.
    pub fn entities(&self) -> &[EntityDescriptor] {
        &self.entities
    }

    /// Creates every entity's table.
    ///
    /// One DDL execution per entity, no ordering guarantees between
    /// entities — references are plain integer ids, so none are needed. A
    /// failing entity is logged and the rest of the batch still runs.
    pub fn create_database(&self, conn: &Connection) {
        for entity in &self.entities {
            self.create_table_logged(entity, conn);
        }
    }

    /// Brings the schema up to date after a version increase.
    ///
    /// First pass: probe each entity's table with a read query and create
    /// any table the probe says is missing. Second pass: execute every
    /// migration script whose version lies in `(old_version, new_version]`,
    /// in ascending numeric order.
    ///
    /// Returns `true` if at least one script actually executed.
    pub fn do_upgrade(
        &self,
        conn: &Connection,
        store: &dyn AssetStore,
        old_version: i32,
        new_version: i32,
    ) -> bool {
        for entity in &self.entities {
            let table_name = entity.table_name();
            if let Err(e) = probe_table(conn, &table_name) {
                tracing::info!(
                    table = %table_name,
                    error = %e,
                    "creating table on upgrade"
                );
                self.create_table_logged(entity, conn);
            }
        }

        self.execute_upgrade_scripts(conn, store, old_version, new_version)
    }

    /// Drops every entity's table. Idempotent — missing tables are fine.
    pub fn delete_tables(&self, conn: &Connection) {
        for entity in &self.entities {
            let table_name = entity.table_name();
            if let Err(e) = conn.execute(&drop_table_sql(&table_name), []) {
                tracing::error!(table = %table_name, error = %e, "failed to drop table");
            }
        }
    }

    /// Derives the `CREATE TABLE` statement for an entity.
    ///
    /// Every table carries the implicit `ID INTEGER PRIMARY KEY
    /// AUTOINCREMENT` column. Fields are visited in declaration order; a
    /// field is skipped when its type has no column representation or when
    /// its transformed name is `ID` (the check runs before any explicit
    /// `column_name` override is applied, so an override is emitted verbatim
    /// while a field named `id` never produces a second column). `NOT NULL`
    /// replaces a trailing nullable marker on the type token; `UNIQUE`
    /// appends. An entity with no resolvable fields still yields a valid
    /// ID-only table.
    pub fn create_table_sql(entity: &EntityDescriptor) -> String {
        let mut ddl = CreateTable::new(entity.table_name());

        for field in &entity.fields {
            let Some(token) = resolve_column_type(&field.field_type) else {
                continue;
            };

            let derived_name = to_sql_name(&field.name);
            if derived_name.eq_ignore_ascii_case("id") {
                continue;
            }

            let column_name = field.column_name.as_deref().unwrap_or(&derived_name);
            let mut clause = if field.not_null {
                format!("{column_name} {}", token.not_null())
            } else {
                format!("{column_name} {}", token.as_str())
            };
            if field.unique {
                clause.push_str(" UNIQUE");
            }
            ddl.column(clause);
        }

        ddl.render()
    }

    /// Creates a single entity's table, surfacing the engine error.
    ///
    /// The batch operations use this internally and downgrade failures to
    /// log lines; callers who need the error can invoke it directly.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Database`] when the engine rejects the DDL
    /// (for example when the table already exists).
    pub fn create_table(
        &self,
        entity: &EntityDescriptor,
        conn: &Connection,
    ) -> Result<(), SchemaError> {
        let sql = Self::create_table_sql(entity);
        tracing::info!(table = %entity.table_name(), "creating table");
        conn.execute(&sql, [])?;
        Ok(())
    }

    fn create_table_logged(&self, entity: &EntityDescriptor, conn: &Connection) {
        if let Err(e) = self.create_table(entity, conn) {
            tracing::error!(table = %entity.table_name(), error = %e, "table creation failed");
        }
    }

    fn execute_upgrade_scripts(
        &self,
        conn: &Connection,
        store: &dyn AssetStore,
        old_version: i32,
        new_version: i32,
    ) -> bool {
        let mut executed = false;

        for script in list_scripts(store) {
            if script.version <= old_version || script.version > new_version {
                tracing::debug!(
                    script = %script.name,
                    version = script.version,
                    "script outside upgrade range, skipping"
                );
                continue;
            }

            match read_script(store, &script.name) {
                Some(lines) => {
                    tracing::info!(
                        script = %script.name,
                        version = script.version,
                        "applying migration script"
                    );
                    execute_script(conn, &script.name, &lines);
                    executed = true;
                }
                None => {
                    tracing::error!(script = %script.name, "migration script missing, skipped");
                }
            }
        }

        executed
    }
}

/// Read-only existence probe. An error means the table is absent (or
/// otherwise unusable) and should be created.
fn probe_table(conn: &Connection, table_name: &str) -> Result<(), rusqlite::Error> {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {table_name}"),
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_model::{FieldDescriptor, FieldType, StaticModel};

    fn person() -> EntityDescriptor {
        EntityDescriptor::new("Person")
            .field(FieldDescriptor::new("name", FieldType::Text))
            .field(FieldDescriptor::new("age", FieldType::Integer))
            .field(FieldDescriptor::new("email", FieldType::Text).unique())
            .field(FieldDescriptor::new("bio", FieldType::Text).not_null())
    }

    #[test]
    fn person_ddl_matches_expected_shape() {
        assert_eq!(
            SchemaGenerator::create_table_sql(&person()),
            "CREATE TABLE PERSON ( ID INTEGER PRIMARY KEY AUTOINCREMENT , NAME TEXT , \
             AGE INTEGER , EMAIL TEXT UNIQUE , BIO TEXT NOT NULL )"
        );
    }

    #[test]
    fn entity_with_no_resolvable_fields_yields_id_only_table() {
        let entity = EntityDescriptor::new("Tags")
            .field(FieldDescriptor::new("values", FieldType::List(Box::new(FieldType::Text))));
        assert_eq!(
            SchemaGenerator::create_table_sql(&entity),
            "CREATE TABLE TAGS ( ID INTEGER PRIMARY KEY AUTOINCREMENT )"
        );
    }

    #[test]
    fn id_field_never_produces_a_second_column() {
        for name in ["id", "Id", "ID"] {
            let entity = EntityDescriptor::new("Person")
                .field(FieldDescriptor::new(name, FieldType::Integer))
                .field(FieldDescriptor::new("name", FieldType::Text));
            let sql = SchemaGenerator::create_table_sql(&entity);
            assert_eq!(
                sql,
                "CREATE TABLE PERSON ( ID INTEGER PRIMARY KEY AUTOINCREMENT , NAME TEXT )",
                "field {name:?} should be skipped"
            );
        }
    }

    #[test]
    fn id_skip_runs_before_the_column_name_override() {
        // A field *named* id is skipped even if renamed; a field renamed
        // *to* Id is kept, emitted verbatim.
        let renamed_id = EntityDescriptor::new("Person")
            .field(FieldDescriptor::new("id", FieldType::Integer).with_column_name("LEGACY_ID"));
        assert_eq!(
            SchemaGenerator::create_table_sql(&renamed_id),
            "CREATE TABLE PERSON ( ID INTEGER PRIMARY KEY AUTOINCREMENT )"
        );

        let renamed_to_id = EntityDescriptor::new("Person")
            .field(FieldDescriptor::new("slot", FieldType::Integer).with_column_name("Id"));
        assert_eq!(
            SchemaGenerator::create_table_sql(&renamed_to_id),
            "CREATE TABLE PERSON ( ID INTEGER PRIMARY KEY AUTOINCREMENT , Id INTEGER )"
        );
    }

    #[test]
    fn not_null_strips_the_nullable_marker_from_date_columns() {
        let entity = EntityDescriptor::new("Person")
            .field(FieldDescriptor::new("born", FieldType::Date).not_null())
            .field(FieldDescriptor::new("seen", FieldType::Timestamp));
        assert_eq!(
            SchemaGenerator::create_table_sql(&entity),
            "CREATE TABLE PERSON ( ID INTEGER PRIMARY KEY AUTOINCREMENT , \
             BORN INTEGER NOT NULL , SEEN INTEGER NULL )"
        );
    }

    #[test]
    fn reference_fields_become_integer_columns() {
        let entity = EntityDescriptor::new("Note").field(FieldDescriptor::new(
            "author",
            FieldType::Reference("Person".to_string()),
        ));
        assert_eq!(
            SchemaGenerator::create_table_sql(&entity),
            "CREATE TABLE NOTE ( ID INTEGER PRIMARY KEY AUTOINCREMENT , AUTHOR INTEGER )"
        );
    }

    #[test]
    fn builder_collects_from_model_and_explicit_adds() {
        let model = StaticModel(vec![EntityDescriptor::new("Person")]);
        let generator = SchemaGenerator::builder()
            .model(&model)
            .entity(EntityDescriptor::new("Note"))
            .build();
        let names: Vec<&str> = generator.entities().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Person", "Note"]);
    }

    #[test]
    fn create_database_creates_every_table() {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        let generator = SchemaGenerator::builder()
            .entity(person())
            .entity(EntityDescriptor::new("Note"))
            .build();

        generator.create_database(&conn);

        assert!(probe_table(&conn, "PERSON").is_ok());
        assert!(probe_table(&conn, "NOTE").is_ok());
    }

    #[test]
    fn one_broken_entity_does_not_abort_the_batch() {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        // "select" is a keyword; its CREATE TABLE is rejected by SQLite.
        let generator = SchemaGenerator::builder()
            .entity(EntityDescriptor::new("select"))
            .entity(person())
            .build();

        generator.create_database(&conn);

        assert!(probe_table(&conn, "PERSON").is_ok());
    }

    #[test]
    fn delete_then_create_is_idempotent() {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        let generator = SchemaGenerator::builder().entity(person()).build();

        for _ in 0..2 {
            generator.delete_tables(&conn);
            generator.create_database(&conn);
        }

        let tables: Vec<String> = {
            let mut stmt = conn
                .prepare(
                    "SELECT name FROM sqlite_master WHERE type='table' \
                     AND name NOT LIKE 'sqlite_%' ORDER BY name",
                )
                .unwrap();
            let rows = stmt.query_map([], |row| row.get(0)).unwrap();
            rows.map(Result::unwrap).collect()
        };
        assert_eq!(tables, ["PERSON"]);
    }

    #[test]
    fn create_table_surfaces_the_engine_error() {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        let generator = SchemaGenerator::builder().entity(person()).build();
        let entity = &generator.entities()[0];

        generator.create_table(entity, &conn).expect("first create should succeed");
        let err = generator.create_table(entity, &conn);
        assert!(matches!(err, Err(crate::SchemaError::Database(_))));
    }

    #[test]
    fn delete_tables_tolerates_missing_tables() {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        let generator = SchemaGenerator::builder().entity(person()).build();
        // Never created; both passes must be clean no-ops.
        generator.delete_tables(&conn);
        generator.delete_tables(&conn);
    }
}
