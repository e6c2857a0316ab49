use reqwest::Response;
use sqlx::{migrate, Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;

use subscription_aggregator::{
    config::{get_configuration, DatabaseSettings},
    repository::SubscriptionRepository,
    startup::{get_connection_db_pool, Application},
};

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        let mut config = get_configuration().expect("Missing configuration file.");
        let db_test_name = format!("db_{}", Uuid::new_v4().to_string().replace('-', "_"));

        // Port 0 asks the OS for any free port, so tests can run in parallel
        config.set_app_port(0);

        let db_pool = configure_db(&mut config.database, db_test_name).await;

        let application = Application::build(config)
            .await
            .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stop());

        TestApp {
            address,
            db_pool,
            client: reqwest::Client::new(),
        }
    }

    pub fn repository(&self) -> SubscriptionRepository {
        SubscriptionRepository::new(self.db_pool.clone())
    }

    pub async fn post_subscription(&self, body: &serde_json::Value) -> Response {
        self.client
            .post(format!("{}/subscriptions", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw_subscription(&self, body: &'static str) -> Response {
        self.client
            .post(format!("{}/subscriptions", self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_subscription(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/subscriptions/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn list_subscriptions(&self) -> Response {
        self.client
            .get(format!("{}/subscriptions", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put_subscription(&self, id: &str, body: &serde_json::Value) -> Response {
        self.client
            .put(format!("{}/subscriptions/{}", self.address, id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete_subscription(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/subscriptions/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_sum(&self, body: &serde_json::Value) -> Response {
        self.client
            .post(format!("{}/subscriptions/sum", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Creates a subscription through the API and returns its id.
    pub async fn create_subscription(&self, body: &serde_json::Value) -> i64 {
        let response = self.post_subscription(body).await;

        assert_eq!(201, response.status().as_u16());

        let created: serde_json::Value = response.json().await.expect("Invalid JSON body.");

        created["id"].as_i64().expect("Missing id in response.")
    }

    pub async fn count_subscriptions(&self) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subscriptions")
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count subscriptions.")
    }
}

pub fn subscription_body(
    service_name: &str,
    price: i32,
    user_id: &str,
    start_date: &str,
) -> serde_json::Value {
    serde_json::json!({
        "service_name": service_name,
        "price": price,
        "user_id": user_id,
        "start_date": start_date
    })
}

async fn configure_db(db_config: &mut DatabaseSettings, db_test_name: String) -> PgPool {
    let mut connection = PgConnection::connect_with(&db_config.get_server_options())
        .await
        .expect("Failed to connect to Postgres.");

    connection
        .execute(&*format!(r#"CREATE DATABASE "{}";"#, db_test_name))
        .await
        .expect("Failed to create database.");

    connection
        .close()
        .await
        .expect("Failed to close connection.");

    db_config.set_name(db_test_name);

    let db_pool = get_connection_db_pool(db_config);

    migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run migrations.");

    db_pool
}
