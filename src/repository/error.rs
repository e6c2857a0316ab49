use crate::domain::NewSubscriptionError;
use crate::repository::classify::{ClassifyStoreError, StoreFailure};
use crate::utils::error_chain_fmt;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every failure a repository operation can report.
///
/// Store errors are classified before they leave the repository, so callers
/// only need to match on the variant.
#[derive(thiserror::Error)]
pub enum SubscriptionStoreError {
    #[error("subscription exists")]
    SubscriptionExists,
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("invalid start_date format")]
    InvalidStartDateFormat,
    #[error("invalid end_date format")]
    InvalidEndDateFormat,
    #[error("{0}")]
    InvalidRequest(String),
    #[error("unable to calculate the total cost of all subscriptions for a selected period")]
    UnableToCalculateSum(#[source] BoxError),
    #[error("{operation}: store failure")]
    Unexpected {
        operation: &'static str,
        #[source]
        source: BoxError,
    },
}

impl SubscriptionStoreError {
    /// Classifies a store error raised while running `operation`.
    pub fn from_store<E>(operation: &'static str, err: E) -> Self
    where
        E: ClassifyStoreError + std::error::Error + Send + Sync + 'static,
    {
        match err.classify() {
            StoreFailure::UniqueViolation => SubscriptionStoreError::SubscriptionExists,
            StoreFailure::NoRows => SubscriptionStoreError::SubscriptionNotFound,
            StoreFailure::Other => SubscriptionStoreError::Unexpected {
                operation,
                source: Box::new(err),
            },
        }
    }
}

impl From<NewSubscriptionError> for SubscriptionStoreError {
    fn from(err: NewSubscriptionError) -> Self {
        match err {
            NewSubscriptionError::InvalidStartDate => SubscriptionStoreError::InvalidStartDateFormat,
            NewSubscriptionError::InvalidField(message) => {
                SubscriptionStoreError::InvalidRequest(message)
            }
        }
    }
}

impl std::fmt::Debug for SubscriptionStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
