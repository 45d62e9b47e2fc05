//! Hand-written statements for the write paths.
//!
//! Postgres placeholders; values are always bound, never interpolated.

/// Insert, or overwrite name and email when the id already exists.
pub const UPSERT_USER: &str = "INSERT INTO users (id, name, email) VALUES ($1, $2, $3) \
     ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, email = EXCLUDED.email";

/// Transaction scoped; released on commit or rollback.
pub const LOCK_USER: &str = "SELECT pg_advisory_xact_lock($1)";

pub const DELETE_USER: &str = "DELETE FROM users WHERE id = $1";

pub const EMAIL_EXISTS: &str =
    r#"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) AS "exists""#;
