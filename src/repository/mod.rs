pub mod classify;
pub mod error;
pub mod postgres;

pub use classify::{ClassifyStoreError, StoreFailure};
pub use error::SubscriptionStoreError;
pub use postgres::SubscriptionRepository;
