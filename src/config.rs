// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Configuration file types and parsing for channel managers.
//!
//! JSON5 configuration format supporting:
//! - Handlers and processors as locator keys or structured entries
//! - A default channel, by flag or by name
//! - Comments and trailing commas

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::channel::{ChannelConfig, FormatterSpec, HandlerDefinition, HandlerSpec, Params};
use crate::channel::{ProcessorSpec, Reference};
use crate::manager::EMERGENCY_CHANNEL;

/// Manager configuration (JSON5 file format)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManagerConfig {
    /// Default channel; overrides any `default: true` flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_channel: Option<String>,

    /// Fall back to the emergency channel when a channel cannot be provided
    #[serde(default = "default_true")]
    pub use_emergency_channel: bool,

    /// Channels by name
    #[serde(default)]
    pub channels: BTreeMap<String, ChannelEntry>,
}

fn default_true() -> bool {
    true
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            default_channel: None,
            use_emergency_channel: true,
            channels: BTreeMap::new(),
        }
    }
}

/// Channel as stored in config file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChannelEntry {
    #[serde(default)]
    pub default: bool,

    /// Handlers in write order; required, may be empty
    pub handlers: Vec<HandlerEntry>,

    /// Processor locator keys in application order
    #[serde(default)]
    pub processors: Vec<String>,
}

/// Handler as stored in config file: a locator key or a structured entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum HandlerEntry {
    Key(String),
    Structured {
        /// Handler type in the handler catalog
        name: String,
        #[serde(default, skip_serializing_if = "Params::is_empty")]
        params: Params,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        formatter: Option<FormatterEntry>,
    },
}

/// Formatter as stored in config file: a locator key, bare or as `{name}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FormatterEntry {
    Key(String),
    Named { name: String },
}

impl ManagerConfig {
    /// Load configuration from a JSON5 file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON5 string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Serialize configuration to JSON5 string (with pretty formatting)
    pub fn to_json5(&self) -> String {
        // Plain JSON is valid JSON5; json5 is only used for input
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Save configuration to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5();
        std::fs::write(path, content)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut flagged_default: Option<&str> = None;

        for (name, channel) in &self.channels {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyChannelName);
            }
            if name == EMERGENCY_CHANNEL {
                return Err(ConfigError::ReservedChannelName(name.clone()));
            }

            for (index, handler) in channel.handlers.iter().enumerate() {
                let empty = match handler {
                    HandlerEntry::Key(key) => key.is_empty(),
                    HandlerEntry::Structured { name, .. } => name.trim().is_empty(),
                };
                if empty {
                    return Err(ConfigError::EmptyHandlerName {
                        channel: name.clone(),
                        index,
                    });
                }
            }

            if channel.default {
                if let Some(first) = flagged_default {
                    return Err(ConfigError::MultipleDefaults {
                        first: first.to_string(),
                        second: name.clone(),
                    });
                }
                flagged_default = Some(name);
            }
        }

        if let Some(name) = &self.default_channel {
            if !self.channels.contains_key(name) {
                return Err(ConfigError::UnknownDefaultChannel(name.clone()));
            }
        }

        Ok(())
    }

    /// Channel configurations in name order
    pub fn channel_configs(&self) -> Vec<(String, ChannelConfig)> {
        self.channels
            .iter()
            .map(|(name, entry)| (name.clone(), entry.to_channel_config()))
            .collect()
    }
}

impl ChannelEntry {
    /// Convert to the configuration a channel is built from
    pub fn to_channel_config(&self) -> ChannelConfig {
        ChannelConfig {
            handlers: self.handlers.iter().map(HandlerEntry::to_spec).collect(),
            processors: self
                .processors
                .iter()
                .map(|key| ProcessorSpec::key(key.as_str()))
                .collect(),
            default: self.default,
        }
    }
}

impl HandlerEntry {
    pub fn to_spec(&self) -> HandlerSpec {
        match self {
            HandlerEntry::Key(key) => HandlerSpec::key(key.as_str()),
            HandlerEntry::Structured {
                name,
                params,
                formatter,
            } => HandlerSpec::Structured(HandlerDefinition {
                name: name.clone(),
                params: params.clone(),
                formatter: formatter.as_ref().map(FormatterEntry::to_spec),
            }),
        }
    }
}

impl FormatterEntry {
    pub fn to_spec(&self) -> FormatterSpec {
        match self {
            FormatterEntry::Key(key) => FormatterSpec::Reference(Reference::key(key.as_str())),
            FormatterEntry::Named { name } => FormatterSpec::Named(Reference::key(name.as_str())),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    IoError(std::path::PathBuf, String),
    ParseError(String),
    EmptyChannelName,
    EmptyHandlerName { channel: String, index: usize },
    MultipleDefaults { first: String, second: String },
    UnknownDefaultChannel(String),
    ReservedChannelName(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, msg) => {
                write!(
                    f,
                    "failed to read config file '{}': {}",
                    path.display(),
                    msg
                )
            }
            ConfigError::ParseError(msg) => write!(f, "failed to parse config: {}", msg),
            ConfigError::EmptyChannelName => write!(f, "channel name must not be empty"),
            ConfigError::EmptyHandlerName { channel, index } => {
                write!(f, "handler {} of channel '{}' has an empty name", index, channel)
            }
            ConfigError::MultipleDefaults { first, second } => write!(
                f,
                "channels '{}' and '{}' are both flagged as default",
                first, second
            ),
            ConfigError::UnknownDefaultChannel(name) => {
                write!(f, "default channel '{}' is not configured", name)
            }
            ConfigError::ReservedChannelName(name) => {
                write!(f, "channel name '{}' is reserved", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
