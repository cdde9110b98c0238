use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use songbook_core::{Format, Record};
use std::path::{Path, PathBuf};

/// Configuration for songbook.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SONGBOOK_* prefix)
/// 3. Config file (~/.config/songbook/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the songs and artists documents.
    ///
    /// Can be set via:
    /// - CLI: --data-dir /path/to/dir
    /// - ENV: SONGBOOK_DATA_DIR
    /// - Config: data_dir = "/path/to/dir"
    /// - Default: ~/.local/share/songbook
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Document format: xml, json or yaml.
    #[serde(default)]
    pub format: Format,

    /// Log filter used when RUST_LOG is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            format: Format::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new()
            .context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path.to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder.add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("songbook");
        builder.add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded configuration.
    #[must_use]
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, format: Option<Format>) -> Self {
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    /// Where the document for `R` lives under this configuration.
    pub fn document_path<R: Record>(&self) -> PathBuf {
        self.format.document_path::<R>(&self.data_dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Returns: ~/.local/share/songbook (or platform equivalent)
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("songbook")
}

fn default_log_level() -> String {
    String::from("warn")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/songbook/config.toml
/// - macOS: ~/Library/Application Support/songbook/config.toml
/// - Windows: %APPDATA%\songbook\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("songbook")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Songbook Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SONGBOOK_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Directory holding songs.<format> and artists.<format>
#
# Can also be set via:
# - CLI: songbook --data-dir /custom/dir songs
# - Environment: SONGBOOK_DATA_DIR=/custom/dir
#
# Default: Platform-specific data directory
#data_dir = "/path/to/songbook"

# Document format: "xml", "json" or "yaml"
format = "xml"

# Log filter when RUST_LOG is unset (error, warn, info, debug, trace)
log_level = "warn"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config())
        .context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use songbook_core::{Artist, Song};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.data_dir.as_os_str().is_empty());
        assert_eq!(config.format, Format::Xml);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_overrides() {
        let config = Config::default()
            .with_overrides(Some(PathBuf::from("/tmp/catalog")), Some(Format::Yaml));

        assert_eq!(config.document_path::<Song>(), PathBuf::from("/tmp/catalog/songs.yaml"));
        assert_eq!(config.document_path::<Artist>(), PathBuf::from("/tmp/catalog/artists.yaml"));
    }

    #[test]
    fn test_no_overrides_keeps_values() {
        let config = Config::default().with_overrides(None, None);
        assert_eq!(config.data_dir, default_data_dir());
        assert_eq!(config.format, Format::Xml);
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(example_config()).unwrap();
        assert_eq!(config.format, Format::Xml);
        assert_eq!(config.data_dir, default_data_dir());
    }
}
