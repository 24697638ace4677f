//! Database schema and migrations for doorkeep.
//!
//! Migrations are applied sequentially when the database is first opened
//! or upgraded; the `schema_version` table records which have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
-- Users table for account management
CREATE TABLE users (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL,
    -- Case-insensitive uniqueness: lookups treat Alice@X and alice@x as the
    -- same account, so the constraint must collate the same way
    email           TEXT NOT NULL COLLATE NOCASE UNIQUE,
    password        TEXT NOT NULL,           -- Argon2 hash, never plaintext
    accepted_terms  INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
];
