use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::domain::{
    CreateSubscriptionBody, DeleteSubscriptionResponse, SavedSubscriptionResponse,
    SumSubscriptionBody, SumSubscriptionResponse, UpdateSubscriptionBody,
};
use crate::repository::{SubscriptionRepository, SubscriptionStoreError};

#[derive(Debug, Serialize)]
struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: message.into(),
    })
}

/// Answers undecodable JSON bodies with the same error shape as every other failure.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::error!("Failed to decode request body: {:?}", err);

    InternalError::from_response(
        err,
        error_response(StatusCode::BAD_REQUEST, "failed to decode request body"),
    )
    .into()
}

fn parse_subscription_id(raw_id: &str) -> Result<i64, HttpResponse> {
    raw_id.parse::<i64>().map_err(|err| {
        tracing::error!("Could not parse subscription id {}: {:?}", raw_id, err);
        error_response(StatusCode::BAD_REQUEST, "could not parse subscription id")
    })
}

/// User facing message for `err`. Unclassified failures only expose `fallback`.
fn error_message(err: &SubscriptionStoreError, fallback: &str) -> String {
    match err {
        SubscriptionStoreError::SubscriptionExists => String::from("subscription already exists"),
        SubscriptionStoreError::UnableToCalculateSum(_) => String::from("unable to calculate sum"),
        SubscriptionStoreError::Unexpected { .. } => String::from(fallback),
        other => other.to_string(),
    }
}

// Each endpoint keeps its own status mapping; they intentionally differ for
// the same error kind (e.g. "exists" is 400 on create but 500 on update).

fn create_error_status(_err: &SubscriptionStoreError) -> StatusCode {
    StatusCode::BAD_REQUEST
}

fn read_error_status(err: &SubscriptionStoreError) -> StatusCode {
    match err {
        SubscriptionStoreError::SubscriptionNotFound => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn update_error_status(err: &SubscriptionStoreError) -> StatusCode {
    match err {
        SubscriptionStoreError::InvalidStartDateFormat
        | SubscriptionStoreError::InvalidRequest(_)
        | SubscriptionStoreError::SubscriptionNotFound => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn delete_error_status(_err: &SubscriptionStoreError) -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

fn sum_error_status(err: &SubscriptionStoreError) -> StatusCode {
    match err {
        SubscriptionStoreError::InvalidStartDateFormat
        | SubscriptionStoreError::InvalidEndDateFormat => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[tracing::instrument(
    name = "Creating a new subscription handler",
    skip(body, repository),
    fields(
        service_name = %body.service_name,
        user_id = %body.user_id
    )
)]
pub async fn handle_create_subscription(
    body: web::Json<CreateSubscriptionBody>,
    repository: web::Data<SubscriptionRepository>,
) -> HttpResponse {
    let body = body.into_inner();

    match repository.create(&body).await {
        Ok(id) => HttpResponse::Created().json(SavedSubscriptionResponse {
            id,
            subscription: body,
        }),
        Err(err) => {
            tracing::error!("Failed to save subscription: {:?}", err);
            error_response(
                create_error_status(&err),
                error_message(&err, "failed to save subscription"),
            )
        }
    }
}

#[tracing::instrument(name = "Reading a subscription handler", skip(repository))]
pub async fn handle_read_subscription(
    path: web::Path<String>,
    repository: web::Data<SubscriptionRepository>,
) -> HttpResponse {
    let id = match parse_subscription_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match repository.read(id).await {
        Ok(subscription) => HttpResponse::Ok().json(subscription),
        Err(err) => {
            tracing::error!("Failed to read subscription: {:?}", err);
            error_response(
                read_error_status(&err),
                error_message(&err, "internal server error"),
            )
        }
    }
}

#[tracing::instrument(name = "Listing subscriptions handler", skip(repository))]
pub async fn handle_list_subscriptions(
    repository: web::Data<SubscriptionRepository>,
) -> HttpResponse {
    match repository.list().await {
        Ok(subscriptions) => HttpResponse::Ok().json(subscriptions),
        Err(err) => {
            tracing::error!("Failed to list subscriptions: {:?}", err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}

#[tracing::instrument(
    name = "Updating a subscription handler",
    skip(body, repository),
    fields(
        service_name = %body.service_name,
        user_id = %body.user_id
    )
)]
pub async fn handle_update_subscription(
    path: web::Path<String>,
    body: web::Json<UpdateSubscriptionBody>,
    repository: web::Data<SubscriptionRepository>,
) -> HttpResponse {
    let id = match parse_subscription_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let body = body.into_inner();

    match repository.update(&body, id).await {
        Ok(id) => HttpResponse::Ok().json(SavedSubscriptionResponse {
            id,
            subscription: body,
        }),
        Err(err) => {
            tracing::error!("Failed to update subscription {}: {:?}", id, err);
            error_response(
                update_error_status(&err),
                error_message(&err, "failed to update subscription"),
            )
        }
    }
}

#[tracing::instrument(name = "Deleting a subscription handler", skip(repository))]
pub async fn handle_delete_subscription(
    path: web::Path<String>,
    repository: web::Data<SubscriptionRepository>,
) -> HttpResponse {
    let id = match parse_subscription_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match repository.delete(id).await {
        Ok(id) => HttpResponse::Ok().json(DeleteSubscriptionResponse {
            message: String::from("subscription deleted successfully"),
            id,
        }),
        Err(err) => {
            tracing::error!("Failed to delete subscription {}: {:?}", id, err);
            error_response(
                delete_error_status(&err),
                error_message(&err, "failed to delete subscription"),
            )
        }
    }
}

#[tracing::instrument(
    name = "Summing subscription prices handler",
    skip(body, repository),
    fields(
        service_name = %body.service_name,
        user_id = %body.user_id
    )
)]
pub async fn handle_sum_subscriptions(
    body: web::Json<SumSubscriptionBody>,
    repository: web::Data<SubscriptionRepository>,
) -> HttpResponse {
    match repository.sum(&body).await {
        Ok(total_sum) => HttpResponse::Ok().json(SumSubscriptionResponse { total_sum }),
        Err(err) => {
            tracing::error!("Failed to sum subscriptions: {:?}", err);
            error_response(
                sum_error_status(&err),
                error_message(&err, "unable to calculate sum"),
            )
        }
    }
}
