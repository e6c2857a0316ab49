use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::config::{DatabaseSettings, Settings};
use crate::repository::SubscriptionRepository;
use crate::routes::{
    handle_create_subscription, handle_delete_subscription, handle_list_subscriptions,
    handle_read_subscription, handle_sum_subscriptions, handle_update_subscription, health_check,
    json_error_handler,
};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, std::io::Error> {
        let db_pool = get_connection_db_pool(&config.database);
        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();

        tracing::info!("Server listening on {}", config.get_address());

        let server = run(listener, db_pool)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(listener: TcpListener, db_pool: PgPool) -> Result<Server, std::io::Error> {
    let repository = web::Data::new(SubscriptionRepository::new(db_pool));

    let server = HttpServer::new(move || {
        App::new()
            // Emits a span per incoming request
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/subscriptions/sum", web::post().to(handle_sum_subscriptions))
            .route("/subscriptions", web::post().to(handle_create_subscription))
            .route("/subscriptions", web::get().to(handle_list_subscriptions))
            .route("/subscriptions/{id}", web::get().to(handle_read_subscription))
            .route("/subscriptions/{id}", web::put().to(handle_update_subscription))
            .route(
                "/subscriptions/{id}",
                web::delete().to(handle_delete_subscription),
            )
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(repository.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Lazily connecting pool; the first query opens the first connection.
pub fn get_connection_db_pool(config: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.get_db_options())
}
