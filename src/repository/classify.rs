/// SQLSTATE reported by Postgres when a unique constraint rejects a row.
pub const UNIQUE_VIOLATION: &str = "23505";

/// The store failures the repository knows how to recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFailure {
    UniqueViolation,
    NoRows,
    Other,
}

/// Maps a driver specific error onto a [`StoreFailure`].
pub trait ClassifyStoreError {
    fn classify(&self) -> StoreFailure;
}

impl ClassifyStoreError for sqlx::Error {
    fn classify(&self) -> StoreFailure {
        match self {
            sqlx::Error::RowNotFound => StoreFailure::NoRows,
            sqlx::Error::Database(db_error)
                if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                StoreFailure::UniqueViolation
            }
            _ => StoreFailure::Other,
        }
    }
}
