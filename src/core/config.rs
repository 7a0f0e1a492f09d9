use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;

#[derive(Deserialize, Clone)]
pub struct AppConfig {
    pub session_sync_server_config: SessionSyncServerConfig,
    pub postgres: PostgresConfig,
    pub jwt_auth_config: JwtAuthConfig,
    pub stripe: StripeConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self, config::ConfigError> {
        let base_path = std::env::current_dir().expect("Failed to find the current dir");
        let config_dir = base_path.join("src/core/configurations");

        let app_environment: Environment = std::env::var("SESSION_SYNC_APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .expect("Failed to parse SESSION_SYNC_APP_ENVIRONMENT");

        let configurations = config::Config::builder()
            .add_source(
                config::File::from(config_dir.join(app_environment.as_str())).required(true),
            )
            .build()?;

        configurations.try_deserialize()
    }
}

#[derive(Deserialize, Clone)]
pub struct SessionSyncServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone)]
pub struct PostgresConfig {
    pub username: String,
    pub password: Secret<String>,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

impl PostgresConfig {
    pub fn connect(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .database(&self.database_name);

        options.log_statements(tracing::log::LevelFilter::Trace)
    }
}

#[derive(Deserialize, Clone)]
pub struct JwtAuthConfig {
    pub secret: Secret<String>,
    pub token_expiration_time: i64,
}

#[derive(Deserialize, Clone)]
pub struct StripeConfig {
    pub secret_key: Secret<String>,
    pub base_url: String,
    pub currency: String,
}

#[derive(Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

pub enum Environment {
    Local,
    Sandbox,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not supported environment. Use either `local`, `sandbox` or `production` ",
                other
            )),
        }
    }
}
