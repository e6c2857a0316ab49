pub mod month_year;
pub mod new_subscription;
pub mod price;
pub mod service_name;
pub mod subscription;
pub mod user_id;

pub use month_year::MonthYear;
pub use new_subscription::{
    CreateSubscriptionBody, NewSubscription, NewSubscriptionError, SubscriptionBody,
    SumSubscriptionBody, UpdateSubscriptionBody,
};
pub use price::Price;
pub use service_name::ServiceName;
pub use subscription::{
    DeleteSubscriptionResponse, SavedSubscriptionResponse, Subscription, SumSubscriptionResponse,
};
pub use user_id::UserId;
