//! Teacher credential store backed by the `teachers` table.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use crate::error::{PortalError, Result};

/// Maximum username length accepted at registration.
pub const MAX_USERNAME_LEN: usize = 150;

pub fn create(conn: &Connection, username: &str, password: &str) -> Result<i64> {
    let exists: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM teachers WHERE username = ?",
            [username],
            |r| r.get(0),
        )
        .optional()?;
    if exists.is_some() {
        return Err(PortalError::DuplicateUsername);
    }

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    let created_at = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO teachers(username, password_hash, is_active, is_staff, created_at)
         VALUES(?, ?, 1, 0, ?)",
        (username, &password_hash, &created_at),
    )?;

    Ok(conn.last_insert_rowid())
}

/// Returns the account id when the username exists, the password matches,
/// and the account is active.
pub fn verify(conn: &Connection, username: &str, password: &str) -> Result<Option<i64>> {
    let row: Option<(i64, String, bool)> = conn
        .query_row(
            "SELECT id, password_hash, is_active FROM teachers WHERE username = ?",
            [username],
            |r| Ok((r.get(0)?, r.get(1)?, r.get::<_, i64>(2)? != 0)),
        )
        .optional()?;

    let Some((id, password_hash, is_active)) = row else {
        return Ok(None);
    };
    if !is_active || !bcrypt::verify(password, &password_hash)? {
        return Ok(None);
    }

    Ok(Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn open_store() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        db::init_schema(&conn).expect("init schema");
        conn
    }

    #[test]
    fn test_create_and_verify() {
        let conn = open_store();
        let id = create(&conn, "alice", "chalk and talk").unwrap();
        assert_eq!(verify(&conn, "alice", "chalk and talk").unwrap(), Some(id));
    }

    #[test]
    fn test_verify_wrong_password() {
        let conn = open_store();
        create(&conn, "alice", "chalk and talk").unwrap();
        assert_eq!(verify(&conn, "alice", "wrong").unwrap(), None);
    }

    #[test]
    fn test_verify_unknown_username() {
        let conn = open_store();
        assert_eq!(verify(&conn, "nobody", "whatever").unwrap(), None);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let conn = open_store();
        create(&conn, "alice", "first").unwrap();
        let err = create(&conn, "alice", "second").unwrap_err();
        assert!(matches!(err, PortalError::DuplicateUsername));
    }

    #[test]
    fn test_inactive_account_fails_verification() {
        let conn = open_store();
        create(&conn, "alice", "chalk and talk").unwrap();
        conn.execute("UPDATE teachers SET is_active = 0 WHERE username = 'alice'", [])
            .unwrap();
        assert_eq!(verify(&conn, "alice", "chalk and talk").unwrap(), None);
    }
}
