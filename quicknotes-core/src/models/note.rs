use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Patch;

pub type NoteId = i64;

pub const DEFAULT_LIST_LIMIT: i64 = 100;
pub const MAX_LIST_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a create request.
///
/// `title` is optional here so that a missing title reaches the service and
/// is reported as a validation failure rather than a decoding error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl CreateNoteInput {
    pub fn new(title: impl Into<String>, content: Option<&str>) -> Self {
        Self {
            title: Some(title.into()),
            content: content.map(str::to_owned),
        }
    }
}

/// Body of an update request. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateNoteInput {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub content: Patch<String>,
}

impl UpdateNoteInput {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Patch::Set(title.into()),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Patch::Set(content.into()),
            ..Self::default()
        }
    }
}

/// Offset pagination. Signed so that out-of-range values can be reported
/// instead of failing to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNotesQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for ListNotesQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

fn default_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}
