//! Catalog schema definition for Keystone.

/// Catalog schema definition.
///
/// Tables and constraints draw their oids from the shared `objects`
/// sequence, so an oid identifies exactly one schema object regardless
/// of kind.
pub(crate) const SCHEMA: &str = r"
-- Shared oid sequence; one row per schema object
CREATE TABLE IF NOT EXISTS objects (
    oid INTEGER PRIMARY KEY,
    kind TEXT NOT NULL
);

-- Tables registered in the schema
CREATE TABLE IF NOT EXISTS tables (
    oid INTEGER PRIMARY KEY REFERENCES objects(oid) ON DELETE CASCADE,
    name TEXT NOT NULL UNIQUE
);

CREATE INDEX IF NOT EXISTS idx_tables_name ON tables(name);

-- Constraints owned by tables
-- refers_to is NULL except for foreign keys, where it names the
-- referenced table (possibly the owning table itself)
CREATE TABLE IF NOT EXISTS constraints (
    oid INTEGER PRIMARY KEY REFERENCES objects(oid) ON DELETE CASCADE,
    table_oid INTEGER NOT NULL REFERENCES tables(oid) ON DELETE CASCADE,
    name TEXT NOT NULL,
    kind TEXT NOT NULL,
    refers_to INTEGER REFERENCES tables(oid) ON DELETE CASCADE,
    UNIQUE (table_oid, name)
);

CREATE INDEX IF NOT EXISTS idx_constraints_table ON constraints(table_oid);
CREATE INDEX IF NOT EXISTS idx_constraints_refers_to ON constraints(refers_to);
";
