//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! binary owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by the command handlers)
//! 2. Environment variables: `NETSCAFF__SECTION__KEY`, e.g. `NETSCAFF__SERVER__PORT=8080`
//! 3. Config file: `--config FILE`, else the platform config file, else
//!    `.netscaff.toml` in the current directory
//! 4. Built-in defaults (always present)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "NETSCAFF";
const ENV_SEPARATOR: &str = "__";
const LOCAL_CONFIG_FILE: &str = ".netscaff.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub workspace: WorkspaceConfig,
    pub sdk: SdkConfig,
    pub templates: TemplateConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Mount the `/api/dev/*` routes that write into `outputPath`.
    pub dev_endpoints: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Parent of the per-request `netscaff-{uuid}` directories.
    pub temp_root: PathBuf,
    /// Delay before a successful request's workspace is removed.
    pub cleanup_delay_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    pub executable: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Per-file template overrides.
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 5050,
                dev_endpoints: false,
            },
            workspace: WorkspaceConfig {
                temp_root: std::env::temp_dir().join("netscaff"),
                cleanup_delay_secs: 60,
            },
            sdk: SdkConfig {
                executable: netscaff_adapters::sdk::DEFAULT_EXECUTABLE.into(),
            },
            templates: TemplateConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the process
    /// environment.
    ///
    /// `config_file` is the path passed via `--config`; an explicit file must
    /// exist, the implicit locations are optional.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        Self::load_with_env(config_file, None)
    }

    /// [`Self::load`] with the environment replaced by `env` when given.
    pub fn load_with_env(
        config_file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;
        let mut builder = Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Loading config file");
                builder = builder.add_source(File::from(path.to_path_buf()).required(true));
            }
            None => {
                for path in [Self::config_path(), PathBuf::from(LOCAL_CONFIG_FILE)] {
                    if path.is_file() {
                        debug!(path = %path.display(), "Loading config file");
                    }
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(env);

        builder
            .add_source(environment)
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error)
    }

    /// Path to the platform configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.netscaff.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "netscaff", "netscaff")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn config_error(err: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}
