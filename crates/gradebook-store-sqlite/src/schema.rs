//! SQL schema for the gradebook SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS students (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    math        REAL NOT NULL,
    science     REAL NOT NULL,
    english     REAL NOT NULL,
    total_marks REAL NOT NULL,   -- math + science + english
    percentage  REAL NOT NULL,   -- total_marks / 300 * 100
    grade       TEXT NOT NULL    -- grade label, e.g. 'B, Distinction'
);

CREATE TABLE IF NOT EXISTS users (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,      -- argon2 PHC string
    role     TEXT NOT NULL       -- 'admin' | 'user'
);

PRAGMA user_version = 1;
";
