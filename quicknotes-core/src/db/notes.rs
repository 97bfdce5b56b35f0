//! Note persistence.
//!
//! Every operation is one statement on one pooled connection. The connection
//! goes back to the pool when the guard drops, on success and error alike.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::clock::{to_storage, Clock, SystemClock};
use crate::models::{Note, NoteId};

const NOTE_COLUMNS: &str = "id, title, content, created_at, updated_at";

/// Data access for notes.
///
/// Absence is reported as `None`/`false`, never as a placeholder note.
pub trait NoteStore: Send + Sync {
    /// Inserts a note with a store-assigned id; both timestamps are "now".
    fn insert(&self, title: &str, content: Option<&str>) -> DbResult<Note>;
    /// Notes in ascending id order, skipping `offset` rows.
    fn list(&self, offset: u64, limit: u32) -> DbResult<Vec<Note>>;
    fn get(&self, id: NoteId) -> DbResult<Option<Note>>;
    /// Overwrites only the supplied fields and bumps `updated_at`.
    fn update(
        &self,
        id: NoteId,
        title: Option<&str>,
        content: Option<&str>,
    ) -> DbResult<Option<Note>>;
    /// Hard delete. Returns `false` when no row had this id.
    fn delete(&self, id: NoteId) -> DbResult<bool>;
}

#[derive(Clone)]
pub struct SqliteNoteStore {
    db: Database,
    clock: Arc<dyn Clock>,
}

impl SqliteNoteStore {
    pub fn new(db: Database) -> Self {
        Self::with_clock(db, Arc::new(SystemClock))
    }

    pub fn with_clock(db: Database, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn now(&self) -> String {
        to_storage(self.clock.now())
    }
}

impl NoteStore for SqliteNoteStore {
    fn insert(&self, title: &str, content: Option<&str>) -> DbResult<Note> {
        let now = self.now();
        let conn = self.db.connection()?;
        let row = conn.query_row(
            &format!(
                "INSERT INTO notes (title, content, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?3)
                 RETURNING {NOTE_COLUMNS}"
            ),
            params![title, content, now],
            NoteRow::from_row,
        )?;

        let note = row.into_note()?;
        tracing::debug!(note_id = note.id, "note inserted");
        Ok(note)
    }

    fn list(&self, offset: u64, limit: u32) -> DbResult<Vec<Note>> {
        // OFFSET is a signed 64-bit integer; anything past it is past every row anyway.
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let conn = self.db.connection()?;
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes ORDER BY id ASC LIMIT ?1 OFFSET ?2"
        ))?;

        let rows = stmt
            .query_map(params![i64::from(limit), offset], NoteRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(NoteRow::into_note).collect()
    }

    fn get(&self, id: NoteId) -> DbResult<Option<Note>> {
        let conn = self.db.connection()?;
        let row = conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
                [id],
                NoteRow::from_row,
            )
            .optional()?;

        row.map(NoteRow::into_note).transpose()
    }

    fn update(
        &self,
        id: NoteId,
        title: Option<&str>,
        content: Option<&str>,
    ) -> DbResult<Option<Note>> {
        let now = self.now();
        let conn = self.db.connection()?;
        // MAX keeps updated_at from moving backwards if the clock does.
        let row = conn
            .query_row(
                &format!(
                    "UPDATE notes
                     SET title = COALESCE(?2, title),
                         content = COALESCE(?3, content),
                         updated_at = MAX(updated_at, ?4)
                     WHERE id = ?1
                     RETURNING {NOTE_COLUMNS}"
                ),
                params![id, title, content, now],
                NoteRow::from_row,
            )
            .optional()?;

        match row {
            Some(row) => {
                let note = row.into_note()?;
                tracing::debug!(note_id = id, "note updated");
                Ok(Some(note))
            }
            None => Ok(None),
        }
    }

    fn delete(&self, id: NoteId) -> DbResult<bool> {
        let conn = self.db.connection()?;
        let changed = conn.execute("DELETE FROM notes WHERE id = ?1", [id])?;
        if changed > 0 {
            tracing::debug!(note_id = id, "note deleted");
        }
        Ok(changed > 0)
    }
}

/// Raw column values, before timestamp parsing.
struct NoteRow {
    id: NoteId,
    title: String,
    content: Option<String>,
    created_at: String,
    updated_at: String,
}

impl NoteRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            content: row.get("content")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn into_note(self) -> DbResult<Note> {
        Ok(Note {
            id: self.id,
            title: self.title,
            content: self.content,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
        })
    }
}

fn parse_timestamp(column: &'static str, value: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidData {
            column,
            message: format!("`{value}` is not an RFC 3339 timestamp: {e}"),
        })
}
