use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application configuration.
/// Loaded from environment variables and/or config files.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Catalog and file storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: 0.0.0.0)
    #[serde(default = "default_host")]
    pub host: String,
    /// HTTP port (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,
    /// Log level (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the managed app files. The only location files are
    /// served from unless an entry carries an administrative override path.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Path to the catalog JSON file.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
    /// Directory checked for app icons on the download page endpoint.
    #[serde(default = "default_icon_dir")]
    pub icon_dir: PathBuf,
    /// Whether `app_file_path` entries may point outside the storage root.
    /// Off by default — catalog data alone must not widen the served tree.
    #[serde(default)]
    pub allow_overrides: bool,
}

impl AppConfig {
    /// Load config from environment variables and optional config file.
    pub fn load() -> Result<Self, config::ConfigError> {
        let cfg = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DEPOT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        cfg.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            catalog_path: default_catalog_path(),
            icon_dir: default_icon_dir(),
            allow_overrides: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_root() -> PathBuf {
    PathBuf::from("./apps_link")
}
fn default_catalog_path() -> PathBuf {
    PathBuf::from("./apps_data.json")
}
fn default_icon_dir() -> PathBuf {
    PathBuf::from("./static/images/app_icons")
}
