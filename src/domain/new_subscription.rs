use serde::{Deserialize, Serialize};

use crate::domain::month_year::MonthYear;
use crate::domain::price::Price;
use crate::domain::service_name::ServiceName;
use crate::domain::user_id::UserId;

/// A validated subscription, ready to be written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub service_name: ServiceName,
    pub price: Price,
    pub user_id: UserId,
    pub start_date: MonthYear,
}

/// JSON body accepted by create and update. Every field is replaced on update.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubscriptionBody {
    pub service_name: String,
    pub price: i32,
    pub user_id: String,
    pub start_date: String,
}

pub type CreateSubscriptionBody = SubscriptionBody;
pub type UpdateSubscriptionBody = SubscriptionBody;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SumSubscriptionBody {
    pub service_name: String,
    pub user_id: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum NewSubscriptionError {
    #[error("invalid start_date format")]
    InvalidStartDate,
    #[error("{0}")]
    InvalidField(String),
}

impl NewSubscription {
    /// The start date is checked first so a malformed date is always reported as such.
    pub fn parse(body: &SubscriptionBody) -> Result<NewSubscription, NewSubscriptionError> {
        let start_date = MonthYear::parse(&body.start_date)
            .map_err(|_| NewSubscriptionError::InvalidStartDate)?;
        let service_name = ServiceName::parse(body.service_name.clone())
            .map_err(NewSubscriptionError::InvalidField)?;
        let price = Price::parse(body.price).map_err(NewSubscriptionError::InvalidField)?;
        let user_id =
            UserId::parse(body.user_id.clone()).map_err(NewSubscriptionError::InvalidField)?;

        Ok(NewSubscription {
            service_name,
            price,
            user_id,
            start_date,
        })
    }
}
