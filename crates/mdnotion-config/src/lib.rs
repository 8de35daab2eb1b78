//! Configuration management for mdnotion.
//!
//! Parses `mdnotion.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! `notion.token` is the exception: an unset variable leaves it empty, and
//! [`Config::require_notion`] reports it only for commands that call the API.
//!
//! Expanded fields:
//! - `notion.endpoint`
//! - `notion.version`
//! - `notion.token`
//! - `notion.parent_id`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override API token.
    pub token: Option<String>,
    /// Override API base URL.
    pub endpoint: Option<String>,
    /// Override default parent page.
    pub parent_id: Option<String>,
    /// Override upload batch size.
    pub batch_size: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdnotion.toml";

/// Largest number of children Notion accepts in one append request.
pub const MAX_BATCH_SIZE: usize = 100;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Notion API connection.
    pub notion: NotionConfig,
    /// Upload batching and retries.
    pub upload: UploadConfig,
    /// Markdown conversion switches.
    pub convert: ConvertConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Notion API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    /// API base URL.
    pub endpoint: String,
    /// Value of the `Notion-Version` header.
    pub version: String,
    /// Integration token. Usually `${NOTION_TOKEN}`.
    pub token: String,
    /// Parent page used when none is given on the command line.
    pub parent_id: Option<String>,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.notion.com/v1".to_owned(),
            version: "2022-06-28".to_owned(),
            token: String::new(),
            parent_id: None,
            timeout_secs: 30,
        }
    }
}

impl NotionConfig {
    /// Validate that the connection can be used for API calls.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the token is missing or the
    /// endpoint is not an http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.endpoint, "notion.endpoint")?;
        require_http_url(&self.endpoint, "notion.endpoint")?;
        require_non_empty(&self.version, "notion.version")?;
        if self.token.is_empty() {
            return Err(ConfigError::Validation(
                "notion.token cannot be empty (set NOTION_TOKEN or pass --token)".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Upload configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Blocks per append request.
    pub batch_size: usize,
    /// Retries for rate-limited or failed requests.
    pub max_retries: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            batch_size: MAX_BATCH_SIZE,
            max_retries: 3,
        }
    }
}

/// Conversion configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Keep `#` headings as `heading_1`.
    pub preserve_heading_1: bool,
    /// Keep `1.` items as `numbered_list_item`.
    pub preserve_numbered_lists: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`notion.token`").
        field: String,
        /// Error message (e.g., "${`NOTION_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdnotion.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(token) = &settings.token {
            self.notion.token.clone_from(token);
        }
        if let Some(endpoint) = &settings.endpoint {
            self.notion.endpoint.clone_from(endpoint);
        }
        if let Some(parent_id) = &settings.parent_id {
            self.notion.parent_id = Some(parent_id.clone());
        }
        if let Some(batch_size) = settings.batch_size {
            self.upload.batch_size = batch_size;
        }
    }

    /// Get validated Notion configuration.
    ///
    /// Use this instead of accessing the `notion` field directly when the
    /// command talks to the API.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the token or endpoint is invalid.
    pub fn require_notion(&self) -> Result<&NotionConfig, ConfigError> {
        self.notion.validate()?;
        Ok(&self.notion)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks value ranges only; the token is checked by
    /// [`require_notion`](Self::require_notion) since conversion does not
    /// need it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_notion()?;
        self.validate_upload()?;
        Ok(())
    }

    fn validate_notion(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.notion.endpoint, "notion.endpoint")?;
        require_http_url(&self.notion.endpoint, "notion.endpoint")?;
        require_non_empty(&self.notion.version, "notion.version")?;
        if self.notion.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "notion.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_upload(&self) -> Result<(), ConfigError> {
        let batch_size = self.upload.batch_size;
        if batch_size == 0 {
            return Err(ConfigError::Validation(
                "upload.batch_size must be greater than 0".to_owned(),
            ));
        }
        if batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::Validation(format!(
                "upload.batch_size cannot exceed {MAX_BATCH_SIZE}"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let notion = &mut self.notion;
        notion.endpoint = expand::expand_env(&notion.endpoint, "notion.endpoint")?;
        notion.version = expand::expand_env(&notion.version, "notion.version")?;
        // An unset token variable only matters to commands that call the API.
        notion.token = expand::expand_env_or_empty(&notion.token);
        if let Some(ref parent_id) = notion.parent_id {
            notion.parent_id = Some(expand::expand_env(parent_id, "notion.parent_id")?);
        }
        Ok(())
    }
}
