pub mod config;
pub mod jwt_auth;
pub mod payments;
mod responses;
mod telementry;

pub use self::config::AppConfig;
pub use payments::StripeClient;
pub use responses::*;
pub use telementry::*;
