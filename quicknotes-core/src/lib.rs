//! Core library for quicknotes.
//!
//! Holds the note model, its SQLite store and the use-case service that
//! validates requests, independent of any transport layer.
//!
//! # Usage
//!
//! ```no_run
//! use quicknotes_core::{CreateNoteInput, Database, NoteService, SqliteNoteStore};
//!
//! let db = Database::open_default()?;
//! db.migrate()?;
//!
//! let service = NoteService::new(SqliteNoteStore::new(db));
//! let note = service.create(CreateNoteInput::new("Groceries", Some("eggs")))?;
//! println!("created note {}", note.id);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod clock;
pub mod db;
pub mod error;
pub mod models;
pub mod service;

// Re-export commonly used types at crate root
pub use clock::{Clock, ManualClock, SystemClock};
pub use db::{Database, DbError, NoteStore, SqliteNoteStore};
pub use error::{ServiceError, ServiceResult};
pub use models::*;
pub use service::NoteService;
