//! Serverless service definition, as far as the plugin needs to see it.
//!
//! Only `provider.stage`, `custom` and `functions[*].events` are interpreted;
//! everything else is carried through untouched so the definition can be
//! written back out.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{EventDescriptor, PluginError};

/// Provider section of a service definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A deployable function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Trigger events; absent until something is attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FunctionDefinition {
    /// Append an event after any existing ones.
    pub fn push_event(&mut self, event: &EventDescriptor) -> Result<(), PluginError> {
        let value = event.to_value()?;
        self.events.get_or_insert_with(Vec::new).push(value);
        Ok(())
    }

    /// Number of attached events.
    pub fn event_count(&self) -> usize {
        self.events.as_ref().map_or(0, Vec::len)
    }
}

/// A service definition: provider, custom plugin sections and functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub custom: Map<String, Value>,

    #[serde(default)]
    pub functions: IndexMap<String, FunctionDefinition>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// On-disk formats a service definition can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFormat {
    Json,
    Yaml,
    Toml,
}

impl ServiceFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ServiceFormat::Json),
            "yml" | "yaml" => Some(ServiceFormat::Yaml),
            "toml" => Some(ServiceFormat::Toml),
            _ => None,
        }
    }
}

impl ServiceDefinition {
    /// Read a service definition from a JSON, YAML or TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PluginError> {
        let path = path.as_ref();
        let format = ServiceFormat::from_path(path).ok_or_else(|| {
            PluginError::Parse(format!(
                "unsupported file extension for {} (expected .json, .yml, .yaml or .toml)",
                path.display()
            ))
        })?;
        let contents = fs::read_to_string(path).map_err(|source| PluginError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str_with_format(&contents, format)
    }

    /// Parse a service definition from text in the given format.
    pub fn from_str_with_format(contents: &str, format: ServiceFormat) -> Result<Self, PluginError> {
        match format {
            ServiceFormat::Json => {
                serde_json::from_str(contents).map_err(|e| PluginError::Parse(e.to_string()))
            }
            ServiceFormat::Yaml => {
                serde_yaml::from_str(contents).map_err(|e| PluginError::Parse(e.to_string()))
            }
            ServiceFormat::Toml => {
                toml::from_str(contents).map_err(|e| PluginError::Parse(e.to_string()))
            }
        }
    }

    /// Build a service definition from an in-memory value.
    pub fn from_value(value: Value) -> Result<Self, PluginError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize back to a JSON value.
    pub fn to_value(&self) -> Result<Value, PluginError> {
        Ok(serde_json::to_value(self)?)
    }
}
