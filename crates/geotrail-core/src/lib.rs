mod app_config;
mod config;
pub mod icons;
pub mod records;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use icons::{load_icon_table, IconTable};
pub use records::{ActivityInfo, GeoRecord, PathGeometry, PathKind, RecordKind};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read icon table {path}: {source}")]
    IconsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse icon table: {0}")]
    IconsFileParse(#[from] serde_yaml::Error),

    #[error("icon table validation failed: {0}")]
    Validation(String),
}
