//! `SQLite`-backed catalog storage.
//!
//! The catalog models a pg_class/pg_constraint-shaped metadata store:
//! every schema object draws its oid from a single shared sequence, so
//! ids never collide across kinds. Registration (`create_table`,
//! `add_constraint`) and the [`CatalogReader`] read operations live
//! here; graph logic does not.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use super::{CatalogReader, SCHEMA};
use crate::error::{Error, Result};
use crate::types::{ConstraintKind, ObjectId, ObjectKind, ObjectRef};

/// Parse an object kind string from the catalog.
///
/// Returns an error for unrecognized values, indicating possible catalog
/// corruption.
fn parse_object_kind(s: &str) -> rusqlite::Result<ObjectKind> {
    match s {
        "table" => Ok(ObjectKind::Table),
        "constraint" => Ok(ObjectKind::Constraint),
        unknown => Err(rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("Unknown object kind '{unknown}' in catalog. Catalog may be corrupted or from a newer version.").into(),
        )),
    }
}

/// `SQLite` catalog wrapper.
///
/// The connection is wrapped in a `Mutex` so the catalog can be shared
/// across read operations while keeping writes exclusive. Independent
/// traversals never share state through the catalog: the dependents
/// graph is built fresh per query from whatever the catalog holds at
/// call time.
pub struct Catalog {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Catalog {
    /// Open or create a file-backed catalog.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Open an in-memory catalog.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Path of the backing database file, if file-backed.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Acquire the connection lock.
    pub(crate) fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            Error::Internal(format!(
                "catalog connection mutex poisoned (a thread panicked while holding the lock): {e}"
            ))
        })
    }

    /// Register a table, returning its oid.
    ///
    /// The oid is allocated from the shared object sequence in the same
    /// transaction as the table row, so either both exist or neither.
    pub fn create_table(&mut self, name: &str) -> Result<ObjectId> {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO objects (kind) VALUES (?1)",
            [ObjectKind::Table.as_str()],
        )?;
        let oid = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO tables (oid, name) VALUES (?1, ?2)",
            params![oid, name],
        )?;

        tx.commit()?;
        tracing::debug!(oid, name, "Registered table");
        Ok(ObjectId::from(oid))
    }

    /// Register a constraint on a table, returning its oid.
    ///
    /// Foreign keys must name a referent; other kinds must not.
    pub fn add_constraint(
        &mut self,
        table: ObjectId,
        name: &str,
        kind: ConstraintKind,
        referent: Option<ObjectId>,
    ) -> Result<ObjectId> {
        match (kind, referent) {
            (ConstraintKind::ForeignKey, None) => {
                return Err(Error::Config(format!(
                    "foreign key constraint '{name}' requires a referenced table"
                )));
            }
            (ConstraintKind::PrimaryKey | ConstraintKind::Unique, Some(_)) => {
                return Err(Error::Config(format!(
                    "constraint '{name}' of kind {} cannot reference a table",
                    kind.as_str()
                )));
            }
            _ => {}
        }

        let mut conn = self.connection()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO objects (kind) VALUES (?1)",
            [ObjectKind::Constraint.as_str()],
        )?;
        let oid = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO constraints (oid, table_oid, name, kind, refers_to)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                oid,
                table.as_i64(),
                name,
                kind.as_str(),
                referent.map(ObjectId::as_i64)
            ],
        )?;

        tx.commit()?;
        tracing::debug!(
            oid,
            name,
            table_oid = table.as_i64(),
            kind = kind.as_str(),
            "Registered constraint"
        );
        Ok(ObjectId::from(oid))
    }

    /// Look up a table's oid by name.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if no table has that name.
    pub fn table_oid(&self, name: &str) -> Result<ObjectId> {
        let conn = self.connection()?;

        conn.query_row("SELECT oid FROM tables WHERE name = ?1", [name], |row| {
            row.get::<_, i64>(0).map(ObjectId::from)
        })
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("table '{name}'")))
    }

    /// Look up a constraint's oid by owning table and name.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the table owns no such constraint.
    pub fn constraint_oid(&self, table: ObjectId, name: &str) -> Result<ObjectId> {
        let conn = self.connection()?;

        conn.query_row(
            "SELECT oid FROM constraints WHERE table_oid = ?1 AND name = ?2",
            params![table.as_i64(), name],
            |row| row.get::<_, i64>(0).map(ObjectId::from),
        )
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("constraint '{name}' on table oid {}", table.as_i64())))
    }

    /// Look up an object reference by oid.
    pub fn object_ref(&self, oid: ObjectId) -> Result<Option<ObjectRef>> {
        let conn = self.connection()?;

        conn.query_row(
            "SELECT kind FROM objects WHERE oid = ?1",
            [oid.as_i64()],
            |row| {
                let kind = parse_object_kind(&row.get::<_, String>(0)?)?;
                Ok(ObjectRef { id: oid, kind })
            },
        )
        .optional()
        .map_err(Into::into)
    }
}

impl CatalogReader for Catalog {
    fn owned_constraints(&self, table: ObjectId) -> Result<Vec<ObjectRef>> {
        let conn = self.connection()?;

        let mut stmt = conn.prepare(
            "SELECT oid FROM constraints WHERE table_oid = ?1 ORDER BY oid",
        )?;

        let constraints = stmt
            .query_map([table.as_i64()], |row| {
                Ok(ObjectRef::constraint(ObjectId::from(row.get::<_, i64>(0)?)))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(constraints)
    }

    fn referencing_tables(&self, table: ObjectId) -> Result<Vec<ObjectRef>> {
        let conn = self.connection()?;

        // DISTINCT: a table with several foreign keys at the same target
        // is still a single dependent
        let mut stmt = conn.prepare(
            "SELECT DISTINCT table_oid FROM constraints
             WHERE kind = 'foreign_key' AND refers_to = ?1
             ORDER BY table_oid",
        )?;

        let tables = stmt
            .query_map([table.as_i64()], |row| {
                Ok(ObjectRef::table(ObjectId::from(row.get::<_, i64>(0)?)))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(tables)
    }
}
