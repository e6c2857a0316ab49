use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::{
    CreateSubscriptionBody, MonthYear, NewSubscription, Price, ServiceName, Subscription,
    SumSubscriptionBody, UpdateSubscriptionBody, UserId,
};
use crate::repository::error::SubscriptionStoreError;

/// Postgres backed storage for subscriptions.
///
/// Cloning is cheap: clones share the same connection pool, and each
/// operation checks a connection out of it for a single statement.
#[derive(Clone)]
pub struct SubscriptionRepository {
    db_pool: PgPool,
}

impl SubscriptionRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    #[tracing::instrument(
        name = "Insert a new subscription into the database",
        skip(self, body),
        fields(
            service_name = %body.service_name,
            user_id = %body.user_id,
            start_date = %body.start_date
        )
    )]
    pub async fn create(
        &self,
        body: &CreateSubscriptionBody,
    ) -> Result<i64, SubscriptionStoreError> {
        const OPERATION: &str = "repository.postgres.create";

        let new_subscription = NewSubscription::parse(body)?;

        sqlx::query(
            r#"
            INSERT INTO subscriptions (serviceName, price, userId, startDate)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(new_subscription.service_name.as_ref())
        .bind(new_subscription.price.value())
        .bind(new_subscription.user_id.as_ref())
        .bind(new_subscription.start_date.first_day())
        .try_map(|row: PgRow| row.try_get::<i64, _>("id"))
        .fetch_one(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            SubscriptionStoreError::from_store(OPERATION, err)
        })
    }

    #[tracing::instrument(name = "Fetch a subscription by id", skip(self))]
    pub async fn read(&self, id: i64) -> Result<Subscription, SubscriptionStoreError> {
        const OPERATION: &str = "repository.postgres.read";

        sqlx::query(
            r#"
            SELECT id, serviceName AS service_name, price, userId AS user_id, startDate AS start_date
            FROM subscriptions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .try_map(subscription_from_row)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            SubscriptionStoreError::from_store(OPERATION, err)
        })
    }

    /// Returns every subscription ordered by id. An empty table yields an empty vector.
    #[tracing::instrument(name = "Fetch all subscriptions", skip(self))]
    pub async fn list(&self) -> Result<Vec<Subscription>, SubscriptionStoreError> {
        const OPERATION: &str = "repository.postgres.list";

        sqlx::query(
            r#"
            SELECT id, serviceName AS service_name, price, userId AS user_id, startDate AS start_date
            FROM subscriptions
            ORDER BY id
            "#,
        )
        .try_map(subscription_from_row)
        .fetch_all(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            SubscriptionStoreError::Unexpected {
                operation: OPERATION,
                source: Box::new(err),
            }
        })
    }

    #[tracing::instrument(
        name = "Replace a subscription in the database",
        skip(self, body),
        fields(
            service_name = %body.service_name,
            user_id = %body.user_id,
            start_date = %body.start_date
        )
    )]
    pub async fn update(
        &self,
        body: &UpdateSubscriptionBody,
        id: i64,
    ) -> Result<i64, SubscriptionStoreError> {
        const OPERATION: &str = "repository.postgres.update";

        let new_subscription = NewSubscription::parse(body)?;

        sqlx::query(
            r#"
            UPDATE subscriptions
            SET serviceName = $1, price = $2, userId = $3, startDate = $4
            WHERE id = $5
            RETURNING id
            "#,
        )
        .bind(new_subscription.service_name.as_ref())
        .bind(new_subscription.price.value())
        .bind(new_subscription.user_id.as_ref())
        .bind(new_subscription.start_date.first_day())
        .bind(id)
        .try_map(|row: PgRow| row.try_get::<i64, _>("id"))
        .fetch_one(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            SubscriptionStoreError::from_store(OPERATION, err)
        })
    }

    #[tracing::instrument(name = "Delete a subscription from the database", skip(self))]
    pub async fn delete(&self, id: i64) -> Result<i64, SubscriptionStoreError> {
        const OPERATION: &str = "repository.postgres.delete";

        sqlx::query("DELETE FROM subscriptions WHERE id = $1 RETURNING id")
            .bind(id)
            .try_map(|row: PgRow| row.try_get::<i64, _>("id"))
            .fetch_one(&self.db_pool)
            .await
            .map_err(|err| {
                tracing::error!("Failed to execute query: {:?}", err);
                SubscriptionStoreError::from_store(OPERATION, err)
            })
    }

    /// Total price of the user's subscriptions to a service starting within
    /// `[start_date, end_date]`. No matching rows is a total of 0.
    #[tracing::instrument(
        name = "Sum subscription prices over a period",
        skip(self, body),
        fields(
            service_name = %body.service_name,
            user_id = %body.user_id,
            start_date = %body.start_date,
            end_date = %body.end_date
        )
    )]
    pub async fn sum(&self, body: &SumSubscriptionBody) -> Result<i64, SubscriptionStoreError> {
        let start_date = MonthYear::parse(&body.start_date)
            .map_err(|_| SubscriptionStoreError::InvalidStartDateFormat)?;
        let end_date = MonthYear::parse(&body.end_date)
            .map_err(|_| SubscriptionStoreError::InvalidEndDateFormat)?;

        let total_sum = sqlx::query(
            r#"
            SELECT SUM(price) AS total_sum
            FROM subscriptions
            WHERE userId = $1
                AND serviceName = $2
                AND startDate BETWEEN $3 AND $4
            "#,
        )
        .bind(body.user_id.as_str())
        .bind(body.service_name.as_str())
        .bind(start_date.first_day())
        .bind(end_date.first_day())
        .try_map(|row: PgRow| row.try_get::<Option<i64>, _>("total_sum"))
        .fetch_one(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to calculate sum: {:?}", err);
            SubscriptionStoreError::UnableToCalculateSum(Box::new(err))
        })?;

        Ok(total_sum.unwrap_or(0))
    }
}

fn subscription_from_row(row: PgRow) -> Result<Subscription, sqlx::Error> {
    Ok(Subscription {
        id: row.try_get("id")?,
        service_name: ServiceName::parse(row.try_get("service_name")?).map_err(decode_error)?,
        price: Price::parse(row.try_get("price")?).map_err(decode_error)?,
        user_id: UserId::parse(row.try_get("user_id")?).map_err(decode_error)?,
        start_date: MonthYear::from_date(row.try_get("start_date")?),
    })
}

fn decode_error(message: String) -> sqlx::Error {
    sqlx::Error::Decode(message.into())
}
