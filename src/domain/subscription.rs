use serde::Serialize;

use crate::domain::month_year::MonthYear;
use crate::domain::new_subscription::SubscriptionBody;
use crate::domain::price::Price;
use crate::domain::service_name::ServiceName;
use crate::domain::user_id::UserId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscription {
    pub id: i64,
    pub service_name: ServiceName,
    pub price: Price,
    pub user_id: UserId,
    pub start_date: MonthYear,
}

/// Echo of an accepted create or update body, with the id it was stored under.
#[derive(Debug, Serialize)]
pub struct SavedSubscriptionResponse {
    pub id: i64,
    #[serde(flatten)]
    pub subscription: SubscriptionBody,
}

#[derive(Debug, Serialize)]
pub struct DeleteSubscriptionResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct SumSubscriptionResponse {
    pub total_sum: i64,
}
