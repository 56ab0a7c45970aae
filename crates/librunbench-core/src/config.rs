//! Loading and saving configuration documents
//!
//! Documents are TOML or JSON, chosen by file extension. Every load path
//! validates the parsed value before handing it out.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RunbenchError;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, RunbenchError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
            _ => Err(RunbenchError::InvalidArgs(format!(
                "unsupported config format: {} (expected .json or .toml)",
                path.display()
            ))),
        }
    }
}

/// A structured, validated configuration object
pub trait Config: Serialize + DeserializeOwned {
    /// Check constraints serde cannot express
    fn validate(&self) -> Result<(), RunbenchError>;

    /// Reject values TOML cannot carry, such as an explicit null that would
    /// read back as the field's default
    fn check_toml_representable(&self) -> Result<(), RunbenchError> {
        Ok(())
    }

    fn from_json_str(content: &str) -> Result<Self, RunbenchError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn from_toml_str(content: &str) -> Result<Self, RunbenchError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn from_str_as(content: &str, format: Format) -> Result<Self, RunbenchError> {
        match format {
            Format::Json => Self::from_json_str(content),
            Format::Toml => Self::from_toml_str(content),
        }
    }

    /// Load and validate a config file
    fn load(path: &Path) -> Result<Self, RunbenchError> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                RunbenchError::NotFound(format!("config file not found: {}", path.display()))
            }
            _ => RunbenchError::Io(e),
        })?;
        Self::from_str_as(&content, format)
    }

    fn to_json_string(&self) -> Result<String, RunbenchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn to_toml_string(&self) -> Result<String, RunbenchError> {
        self.check_toml_representable()?;
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save to a file, creating parent directories
    fn save(&self, path: &Path) -> Result<(), RunbenchError> {
        let content = match Format::from_path(path)? {
            Format::Json => self.to_json_string()?,
            Format::Toml => self.to_toml_string()?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
