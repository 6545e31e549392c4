use crate::constants::{CONFIG_DIR, CONFIG_FILES};
use crate::error::{Error, Result};
use crate::loader::interface::ConfigProvider;
use log::debug;
use std::path::{Path, PathBuf};

/// Provider reading a configuration file from disk.
///
/// The format follows the extension: `.json`, `.yaml`/`.yml` or `.toml`.
pub struct FileConfigProvider<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> FileConfigProvider<P> {
    /// Creates a new FileConfigProvider instance.
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

fn parse_content(path: &Path, content: &str) -> Result<serde_json::Value> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match extension {
        "json" => serde_json::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid JSON: {e}"))),
        "yaml" | "yml" => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid YAML: {e}"))),
        "toml" => toml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid TOML: {e}"))),
        other => {
            Err(Error::ConfigError(format!("Unsupported configuration format: '{other}'")))
        }
    }
}

impl<P: AsRef<Path>> ConfigProvider for FileConfigProvider<P> {
    fn source(&self) -> String {
        self.path.as_ref().display().to_string()
    }

    /// Reads and parses the configuration file.
    ///
    /// # Errors
    /// * `Error::IoError` if the file cannot be read
    /// * `Error::ConfigError` if it does not parse. An empty file is an empty layer.
    fn provide(&self) -> Result<serde_json::Value> {
        let path = self.path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(serde_json::Value::Object(Default::default()));
        }
        parse_content(path, &content)
    }
}

/// Provider holding an in-memory layer.
pub struct InlineConfigProvider {
    name: String,
    value: serde_json::Value,
}

impl InlineConfigProvider {
    pub fn new<S: Into<String>>(name: S, value: serde_json::Value) -> Self {
        Self { name: name.into(), value }
    }
}

impl ConfigProvider for InlineConfigProvider {
    fn source(&self) -> String {
        self.name.clone()
    }

    fn provide(&self) -> Result<serde_json::Value> {
        Ok(self.value.clone())
    }
}

/// Returns the config file path a [`FileConfigProvider`] should read, if any.
pub fn find_config_file<P: AsRef<Path>>(root: P) -> Option<PathBuf> {
    let config_dir = root.as_ref().join(CONFIG_DIR);
    if !config_dir.is_dir() {
        return None;
    }
    CONFIG_FILES.iter().map(|name| config_dir.join(name)).find(|path| path.is_file())
}
