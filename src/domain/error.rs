use thiserror::Error;

use super::todo::TodoId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoError {
    /// The caller supplied input the store refuses, e.g. a blank title.
    #[error("{0}")]
    Validation(String),
    /// No item carries this id, including ids of items already removed.
    #[error("Todo not found")]
    NotFound(TodoId),
}
