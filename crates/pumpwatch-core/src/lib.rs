//! Shared types for the pumpwatch workspace: runtime configuration, the
//! retailer directory entry, the two output record shapes, and the JSON
//! Lines sink they are written through.

pub mod app_config;
pub mod config;
pub mod jsonl;
pub mod records;
pub mod retailers;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use jsonl::write_jsonl;
pub use records::{RetailerRecord, StationRecord};
pub use retailers::Retailer;

use thiserror::Error;

/// Errors loading application configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors writing an output file. Sink failures are fatal to the run;
/// a partially written file may be left behind.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize record for {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
