mod health_check;
mod subscriptions;

pub use health_check::health_check;
pub use subscriptions::{
    handle_create_subscription, handle_delete_subscription, handle_list_subscriptions,
    handle_read_subscription, handle_sum_subscriptions, handle_update_subscription,
    json_error_handler,
};
