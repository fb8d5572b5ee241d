pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(&'static str),

    #[error("author not found: {0}")]
    AuthorNotFound(i64),

    #[error("author {0} is still referenced by news")]
    AuthorInUse(i64),
}

impl Error {
    /// Translates the driver's unique constraint signal for `field`, keeping
    /// everything else a plain database error.
    pub(crate) fn on_unique(err: sqlx::Error, field: &'static str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Error::AlreadyExists(field),
            _ => Error::Database(err),
        }
    }
}
