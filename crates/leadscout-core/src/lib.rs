pub mod app_config;
pub mod command;
mod config;
pub mod record;
pub mod request;

pub use app_config::{AppConfig, Environment};
pub use command::{parse_command, CommandError, COMMAND_SIGIL};
pub use config::{load_app_config, load_app_config_from_env};
pub use record::BusinessRecord;
pub use request::{region_code, EngineId, RequestError, SearchRequest};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
