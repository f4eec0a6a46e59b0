/// Environment-driven settings for the harness binary.
use std::env;

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Path of the deployment configuration file.
    pub config_file_path: String,
    /// The network the run targets.
    pub network: String,
}

impl HarnessConfig {
    /// Reads settings from environment variables.
    ///
    /// # Defaults
    ///
    /// - `CONFIG_DIR` defaults to `"./config"`.
    /// - `CONFIG_FILE_NAME` defaults to `"config.json"`.
    /// - `NETWORK` defaults to `"local"`.
    pub fn from_env() -> Self {
        let conf_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "./config".to_string());
        let conf_dir = format!("{}/", conf_dir.trim_end_matches('/'));
        let config_file_name =
            env::var("CONFIG_FILE_NAME").unwrap_or_else(|_| "config.json".to_string());

        Self {
            config_file_path: format!("{}{}", conf_dir, config_file_name),
            network: env::var("NETWORK").unwrap_or_else(|_| "local".to_string()),
        }
    }
}
