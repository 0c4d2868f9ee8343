//! Database schema and migrations for Filebox.
//!
//! Migrations are applied sequentially when the database is first opened
//! or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id          TEXT PRIMARY KEY,
    email       TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- SHA-1 hex or Argon2 PHC string
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: file and folder nodes
    r#"
CREATE TABLE files (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    id          TEXT NOT NULL UNIQUE,
    user_id     TEXT NOT NULL REFERENCES users(id),
    name        TEXT NOT NULL,
    type        TEXT NOT NULL,           -- 'folder', 'file', 'image'
    is_public   INTEGER NOT NULL DEFAULT 0,
    parent_id   TEXT NOT NULL DEFAULT '0',  -- '0' is the root sentinel
    local_path  TEXT,                    -- NULL for folders
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_files_owner_parent ON files(user_id, parent_id, seq);
"#,
    // v3: expiring key/value entries for the database session backend
    r#"
CREATE TABLE sessions (
    name        TEXT PRIMARY KEY,        -- e.g. 'session:<token>'
    value       TEXT NOT NULL,
    expires_at  INTEGER NOT NULL         -- unix seconds
);

CREATE INDEX idx_sessions_expires_at ON sessions(expires_at);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_first_migration_contains_users_table() {
        let first = MIGRATIONS[0];
        assert!(first.contains("CREATE TABLE users"));
        assert!(first.contains("email"));
        assert!(first.contains("UNIQUE"));
    }

    #[test]
    fn test_files_migration_has_root_sentinel() {
        assert!(MIGRATIONS[1].contains("CREATE TABLE files"));
        assert!(MIGRATIONS[1].contains("DEFAULT '0'"));
    }
}
