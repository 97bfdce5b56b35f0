//! Note use-cases: validate the request, then make exactly one store call.

use crate::db::NoteStore;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{
    CreateNoteInput, ListNotesQuery, Note, NoteId, UpdateNoteInput, MAX_LIST_LIMIT,
};

pub struct NoteService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create(&self, input: CreateNoteInput) -> ServiceResult<Note> {
        let title = match input.title {
            Some(title) => title,
            None => return Err(ServiceError::validation("`title` is required")),
        };
        validate_title(&title)?;

        Ok(self.store.insert(&title, input.content.as_deref())?)
    }

    pub fn list(&self, query: ListNotesQuery) -> ServiceResult<Vec<Note>> {
        let offset = u64::try_from(query.skip).map_err(|_| {
            ServiceError::validation(format!(
                "`skip` must be at least 0, got {}",
                query.skip
            ))
        })?;
        let limit = u32::try_from(query.limit)
            .ok()
            .filter(|limit| (1..=MAX_LIST_LIMIT).contains(limit))
            .ok_or_else(|| {
                ServiceError::validation(format!(
                    "`limit` must be between 1 and {MAX_LIST_LIMIT}, got {}",
                    query.limit
                ))
            })?;

        Ok(self.store.list(offset, limit)?)
    }

    pub fn get(&self, id: NoteId) -> ServiceResult<Note> {
        self.store.get(id)?.ok_or(ServiceError::NotFound(id))
    }

    /// Applies a partial update. Only fields carrying a value are written;
    /// an omitted or `null` field keeps its stored value. At least one
    /// field must carry a value.
    pub fn update(&self, id: NoteId, input: UpdateNoteInput) -> ServiceResult<Note> {
        let title = input.title.as_set().map(String::as_str);
        let content = input.content.as_set().map(String::as_str);
        if title.is_none() && content.is_none() {
            return Err(ServiceError::validation(
                "at least one of `title` or `content` must be provided",
            ));
        }
        if let Some(title) = title {
            validate_title(title)?;
        }

        self.store
            .update(id, title, content)?
            .ok_or(ServiceError::NotFound(id))
    }

    pub fn delete(&self, id: NoteId) -> ServiceResult<()> {
        if self.store.delete(id)? {
            Ok(())
        } else {
            Err(ServiceError::NotFound(id))
        }
    }
}

fn validate_title(title: &str) -> ServiceResult<()> {
    if title.is_empty() {
        return Err(ServiceError::validation("`title` must not be empty"));
    }
    Ok(())
}
