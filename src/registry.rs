//! Student registry: the `(name, subject) -> marks` mapping behind the
//! student CRUD endpoints.
//!
//! Every operation takes an explicit connection; the HTTP layer owns the
//! shared handle. Adding to an existing `(name, subject)` pair accumulates
//! marks instead of overwriting; the 0..=100 bound applies to each
//! increment, not to the accumulated total.

use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use serde_json::Value;

use crate::error::{PortalError, Result};
use crate::validate;

#[derive(Debug, Clone, Serialize)]
pub struct StudentRecord {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub marks: i64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added(i64),
    Accumulated(i64),
}

/// Accepts a JSON integer or a string holding a decimal integer, and
/// enforces the 0..=100 range.
pub fn parse_marks(value: &Value) -> Result<i64> {
    let marks = match value {
        Value::Number(n) => n.as_i64().ok_or(PortalError::InvalidMarks)?,
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| PortalError::InvalidMarks)?,
        _ => return Err(PortalError::InvalidMarks),
    };
    check_marks(marks)?;
    Ok(marks)
}

fn check_marks(marks: i64) -> Result<()> {
    if !(0..=100).contains(&marks) {
        return Err(PortalError::InvalidMarks);
    }
    Ok(())
}

fn check_text(name: &str, subject: &str) -> Result<()> {
    if !validate::clean_text(name) || !validate::clean_text(subject) {
        return Err(PortalError::InvalidInput);
    }
    Ok(())
}

pub fn list(conn: &Connection) -> Result<Vec<StudentRecord>> {
    let mut stmt = conn.prepare("SELECT id, name, subject, marks FROM students ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(StudentRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                subject: row.get(2)?,
                marks: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn add(conn: &Connection, name: &str, subject: &str, marks: i64) -> Result<AddOutcome> {
    check_text(name, subject)?;
    check_marks(marks)?;

    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM students WHERE name = ? AND subject = ?",
            (name, subject),
            |r| r.get(0),
        )
        .optional()?;

    match existing {
        Some(id) => {
            conn.execute(
                "UPDATE students SET marks = marks + ? WHERE id = ?",
                (marks, id),
            )?;
            Ok(AddOutcome::Accumulated(id))
        }
        None => {
            conn.execute(
                "INSERT INTO students(name, subject, marks) VALUES(?, ?, ?)",
                (name, subject, marks),
            )?;
            Ok(AddOutcome::Added(conn.last_insert_rowid()))
        }
    }
}

pub fn update(conn: &Connection, id: i64, name: &str, subject: &str, marks: i64) -> Result<()> {
    check_text(name, subject)?;
    check_marks(marks)?;

    let exists: Option<i64> = conn
        .query_row("SELECT 1 FROM students WHERE id = ?", [id], |r| r.get(0))
        .optional()?;
    if exists.is_none() {
        return Err(PortalError::NotFound);
    }

    // The (name, subject) pair is not pre-checked; a collision surfaces as
    // the store's UNIQUE failure.
    conn.execute(
        "UPDATE students SET name = ?, subject = ?, marks = ? WHERE id = ?",
        (name, subject, marks, id),
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            PortalError::DuplicateStudent
        } else {
            PortalError::from(e)
        }
    })?;

    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let affected = conn.execute("DELETE FROM students WHERE id = ?", [id])?;
    if affected == 0 {
        return Err(PortalError::NotFound);
    }
    Ok(())
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
