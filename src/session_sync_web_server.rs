use crate::core::{AppConfig, StripeClient};
use crate::routes::session_sync_routes;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{dev::Server, web::Data, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct SessionSyncWebServer {
    port: u16,
    server: Server,
}

impl SessionSyncWebServer {
    pub async fn build(configuration: AppConfig) -> Result<Self, anyhow::Error> {
        let address = format!(
            "{}:{}",
            configuration.session_sync_server_config.host,
            configuration.session_sync_server_config.port
        );

        let pg_pool = PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect_lazy_with(configuration.postgres.connect());

        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = run(listener, pg_pool, configuration).await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub async fn run(
    listener: TcpListener,
    pg_pool: PgPool,
    configuration: AppConfig,
) -> Result<Server, anyhow::Error> {
    let pg_pool = Data::new(pg_pool);
    let stripe_client = Data::new(StripeClient::new(configuration.stripe.clone()));
    let app_config = Data::new(configuration.clone());

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&configuration.cors.allowed_origin)
            .allow_any_method()
            .allowed_headers(vec![
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
            ])
            .supports_credentials();
        App::new()
            .configure(session_sync_routes)
            .app_data(pg_pool.clone())
            .app_data(stripe_client.clone())
            .app_data(app_config.clone())
            .wrap(TracingLogger::default())
            .wrap(cors)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
