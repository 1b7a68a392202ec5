//! Configuration management for the RAX file access server
//!
//! Loaded once at startup from `config.toml` with environment overrides.
//! The resulting values are immutable for the lifetime of the process.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_PREVIEW_EXTENSIONS: &[&str] = &[
    "txt", "md", "json", "yml", "yaml", "csv", "log", "xml", "html", "css", "js", "ts", "py",
    "rs", "toml", "ini", "cfg", "sh",
];

const DEFAULT_PROMPT_EXTENSIONS: &[&str] = &["yml", "yaml", "json"];

/// Complete server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address the HTTP listener binds to
    /// Environment: RAX_FILES__BIND_ADDRESS
    pub bind_address: String,

    /// Port the HTTP listener binds to
    /// Environment: RAX_FILES__PORT
    pub port: u16,

    /// Root of the browsable directory tree
    /// Environment: RAX_FILES__BASE_DIRECTORY
    pub base_directory: String,

    /// Prefix used to build download references for files
    /// Environment: RAX_FILES__STATIC_BASE_URL
    pub static_base_url: String,

    /// Root of the prompt library
    /// Environment: RAX_FILES__PROMPTS_DIRECTORY
    pub prompts_directory: String,

    /// Extensions whose content may be returned inline
    pub preview_extensions: Vec<String>,

    /// Extensions listed as prompts in folder summaries
    pub prompt_extensions: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let config_paths = [
            "rax-file-access/config", // Docker production: /app/rax-file-access/config.toml
            "config",                 // Local development: ./config.toml
        ];

        let mut builder = Self::defaults(Config::builder())?;
        for config_path in config_paths {
            builder = builder.add_source(File::with_name(config_path).required(false));
        }

        let settings = builder
            .add_source(Environment::with_prefix("RAX_FILES").separator("__"))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string layered over the defaults
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let settings = Self::defaults(Config::builder())?
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("bind_address", "127.0.0.1")?
            .set_default("port", 3000)?
            .set_default("preview_extensions", to_values(DEFAULT_PREVIEW_EXTENSIONS))?
            .set_default("prompt_extensions", to_values(DEFAULT_PROMPT_EXTENSIONS))
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.base_directory.trim().is_empty() {
            return Err(ConfigError::Message("base_directory cannot be empty".into()));
        }

        if self.static_base_url.trim().is_empty() {
            return Err(ConfigError::Message("static_base_url cannot be empty".into()));
        }

        if self.prompts_directory.trim().is_empty() {
            return Err(ConfigError::Message(
                "prompts_directory cannot be empty".into(),
            ));
        }

        if self.preview_extensions.is_empty() {
            return Err(ConfigError::Message(
                "preview_extensions must list at least one extension".into(),
            ));
        }

        if self.prompt_extensions.is_empty() {
            return Err(ConfigError::Message(
                "prompt_extensions must list at least one extension".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as socket address
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn base_directory_path(&self) -> PathBuf {
        PathBuf::from(&self.base_directory)
    }

    pub fn prompts_directory_path(&self) -> PathBuf {
        PathBuf::from(&self.prompts_directory)
    }
}

fn to_values(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
