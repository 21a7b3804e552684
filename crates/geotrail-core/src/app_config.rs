use std::path::PathBuf;

/// Process-wide settings for a render run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: String,
    /// Directory that receives the HTML map and CSV table.
    pub output_dir: PathBuf,
    /// Optional YAML file overriding the built-in activity icon table.
    pub icons_path: Option<PathBuf>,
    /// Output name used when the caller passes an empty name hint.
    pub default_name: String,
}
