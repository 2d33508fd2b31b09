use thiserror::Error;

/// Domain errors. The message of the first five variants is written for
/// clients and returned verbatim; the remaining variants carry internal
/// detail that is logged but never sent out.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Name is taken.")]
    NameTaken,

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Authorization(String),

    /// The event's timeslot set is not a perfect rectangle. Never
    /// user-caused through normal flows; callers log it and return a
    /// generic failure.
    #[error("Grid dimension error: {0}")]
    GridDimension(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type GridResult<T> = Result<T, GridError>;
