pub mod auth;
pub mod config;
pub mod logging;

pub use auth::Principal;
pub use config::{AppConfig, BrokerConfig, DatabaseConfig, LoggingConfig, ServerConfig};
pub use logging::init_logging;
