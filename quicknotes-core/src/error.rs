use crate::db::DbError;
use crate::models::NoteId;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of a note use-case.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Input rejected before touching storage.
    #[error("{0}")]
    Validation(String),
    #[error("Note with id {0} not found")]
    NotFound(NoteId),
    /// Storage failed; nothing the caller can fix by changing the request.
    #[error(transparent)]
    Infrastructure(#[from] DbError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
