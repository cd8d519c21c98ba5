use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub rekognition: RekognitionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Key-value store holding one reference image per user email
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub endpoint: String,
    #[serde(default = "default_table_name")]
    pub table_name: String,
    pub auth_token: Option<String>,
    pub timeout_secs: Option<u64>,
}

fn default_table_name() -> String {
    "rekognitionAuth".to_string()
}

/// Face-comparison service settings
#[derive(Debug, Clone, Deserialize)]
pub struct RekognitionSettings {
    pub endpoint: String,
    pub auth_token: Option<String>,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
    pub timeout_secs: Option<u64>,
}

fn default_similarity_threshold() -> f32 {
    80.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with FACEAUTH_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with FACEAUTH_)
            // e.g., FACEAUTH_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FACEAUTH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Apply direct environment overrides for the collaborator endpoints
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("FACEAUTH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply unprefixed endpoint overrides
///
/// FACE_STORE_ENDPOINT and REKOGNITION_ENDPOINT are checked first so that
/// deploy environments can point at the collaborators without the
/// FACEAUTH_ naming convention.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let store_endpoint = env::var("FACE_STORE_ENDPOINT")
        .or_else(|_| env::var("FACEAUTH_STORE__ENDPOINT"))
        .ok();
    let rekognition_endpoint = env::var("REKOGNITION_ENDPOINT")
        .or_else(|_| env::var("FACEAUTH_REKOGNITION__ENDPOINT"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = store_endpoint {
        builder = builder.set_override("store.endpoint", endpoint)?;
    }
    if let Some(endpoint) = rekognition_endpoint {
        builder = builder.set_override("rekognition.endpoint", endpoint)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_name() {
        assert_eq!(default_table_name(), "rekognitionAuth");
    }

    #[test]
    fn test_default_similarity_threshold() {
        assert_eq!(default_similarity_threshold(), 80.0);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }
}
