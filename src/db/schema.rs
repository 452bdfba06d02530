//! SQL DDL for the registry tables.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT on every table
/// - `parents.email` UNIQUE, the external lookup key for parents
/// - dates stored as `YYYY-MM-DD` TEXT
/// - `reminder_sent` BOOLEAN (stored as INTEGER 0/1), defaults to 0
/// - indexes on the columns the service filters by
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS parents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS children (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    dob TEXT NOT NULL, -- YYYY-MM-DD
    parent_id INTEGER NOT NULL REFERENCES parents(id)
);

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    child_id INTEGER NOT NULL REFERENCES children(id),
    vaccine TEXT NOT NULL,
    date TEXT NOT NULL, -- YYYY-MM-DD
    reminder_sent INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_children_name ON children(name);
CREATE INDEX IF NOT EXISTS idx_appointments_child_id ON appointments(child_id);
CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(date, reminder_sent);
"#;
